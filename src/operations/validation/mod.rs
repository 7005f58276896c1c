mod validate_rooms;

pub use validate_rooms::{IssueKind, ValidateRooms, ValidationIssue, ValidationReport};
