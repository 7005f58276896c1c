//! Room naming rules.
//!
//! A room name may be replaced automatically only when it matches one of
//! [`AUTO_NAME_PATTERNS`]. Anything else is treated as user-entered and kept.

use std::sync::LazyLock;

use regex::Regex;

/// Names the engine itself generates, or that drawing tools use as placeholders.
pub const AUTO_NAME_PATTERNS: &[&str] = &[
    // "Room 7"
    r"^Room \d+$",
    // "Room 7 - 2", "Kitchen - 3": child names derived from a parent.
    r"^.+ - \d+$",
    // Placeholders left by drawing tools.
    r"^(Room|New Room|Unnamed|Unnamed Room|Untitled)$",
    r"^New Room \d+$",
];

static AUTO_NAMES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    AUTO_NAME_PATTERNS
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
});

static ROOM_NUMBER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^Room (\d+)$").ok());

/// Returns `true` when `name` looks generated and may be overwritten.
#[must_use]
pub fn is_auto_generated_name(name: &str) -> bool {
    let name = name.trim();
    name.is_empty() || AUTO_NAMES.iter().any(|re| re.is_match(name))
}

/// Parses the `N` out of a `"Room N"` name.
#[must_use]
pub fn room_number(name: &str) -> Option<u64> {
    ROOM_NUMBER
        .as_ref()?
        .captures(name.trim())?
        .get(1)?
        .as_str()
        .parse()
        .ok()
}

/// Hands out `"Room N"` names above the highest number already in use.
#[derive(Debug, Clone, Default)]
pub struct RoomNamer {
    highest: u64,
}

impl RoomNamer {
    /// Seeds the counter from every name already taken.
    pub fn new<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let highest = names.into_iter().filter_map(room_number).max().unwrap_or(0);
        Self { highest }
    }

    /// Returns the next free `"Room N"` name.
    pub fn next_name(&mut self) -> String {
        self.highest += 1;
        format!("Room {}", self.highest)
    }
}

/// Name given to the `index`-th (1-based) auto-named child of `parent_name`.
#[must_use]
pub fn child_name(parent_name: &str, index: usize) -> String {
    format!("{parent_name} - {index}")
}
