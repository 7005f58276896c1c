mod apply_edit;

pub use apply_edit::{ApplyWallEdit, EditOutcome, WallEdit};
