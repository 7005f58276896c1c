use std::collections::HashSet;

use crate::model::Wall;

/// Source of fresh wall ids.
///
/// Ids are opaque to the engine; the generator only has to avoid the ids
/// already present in the wall set.
pub trait IdGenerator {
    /// Returns an id that is not contained in `taken`.
    fn fresh_id(&mut self, taken: &HashSet<String>) -> String;
}

/// Deterministic `"<prefix>-N"` ids, using the first unused N.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("wall")
    }
}

impl IdGenerator for SequentialIds {
    fn fresh_id(&mut self, taken: &HashSet<String>) -> String {
        loop {
            let id = format!("{}-{}", self.prefix, self.next);
            self.next += 1;
            if !taken.contains(&id) {
                return id;
            }
        }
    }
}

/// Collects the ids of `walls` for use with [`IdGenerator::fresh_id`].
pub(crate) fn wall_ids(walls: &[Wall]) -> HashSet<String> {
    walls.iter().map(|w| w.id.clone()).collect()
}
