use serde::Serialize;

/// Wall ids affected by a topology edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WallChanges {
    /// Walls that did not exist before the edit.
    pub created: Vec<String>,
    /// Existing walls kept untouched because they already cover part of the edit.
    pub reused: Vec<String>,
    /// Existing walls whose geometry changed (shortened by a split, moved).
    pub modified: Vec<String>,
    /// Walls deleted by the edit.
    pub removed: Vec<String>,
}

impl WallChanges {
    /// Every id whose geometry differs from before the edit, for incremental detection.
    #[must_use]
    pub fn touched(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .created
            .iter()
            .chain(&self.modified)
            .chain(&self.removed)
            .cloned()
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.created.is_empty()
            && self.reused.is_empty()
            && self.modified.is_empty()
            && self.removed.is_empty()
    }

    pub(crate) fn note_modified(&mut self, id: &str) {
        if !self.created.iter().any(|c| c == id) && !self.modified.iter().any(|m| m == id) {
            self.modified.push(id.to_owned());
        }
    }
}
