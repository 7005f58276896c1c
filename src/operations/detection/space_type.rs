/// Labels the engine may assign or replace on its own.
///
/// A room whose `space_type` is empty or one of these is re-labelled on every
/// detection; any other value was chosen by the user and is kept verbatim.
pub const AUTO_SPACE_TYPES: &[&str] = &[
    "Unassigned",
    "Shaft",
    "Net Area",
    "Storage",
    "Bathroom",
    "Utility",
    "General",
];

/// Net area below which a parented room is treated as a shaft, in m².
const SHAFT_MAX_AREA: f64 = 1.5;
/// Upper bounds (exclusive, m²) of the size bands for ordinary rooms.
const STORAGE_MAX_AREA: f64 = 4.0;
const BATHROOM_MAX_AREA: f64 = 8.0;
const UTILITY_MAX_AREA: f64 = 12.0;

#[must_use]
pub fn is_auto_space_type(label: &str) -> bool {
    let label = label.trim();
    label.is_empty() || AUTO_SPACE_TYPES.contains(&label)
}

/// Suggests a label from a room's size and its place in the hierarchy.
#[must_use]
pub fn suggest_space_type(net_area_m2: f64, has_parent: bool, has_children: bool) -> &'static str {
    if has_parent && net_area_m2 < SHAFT_MAX_AREA {
        "Shaft"
    } else if !has_parent && has_children {
        "Net Area"
    } else if net_area_m2 < STORAGE_MAX_AREA {
        "Storage"
    } else if net_area_m2 < BATHROOM_MAX_AREA {
        "Bathroom"
    } else if net_area_m2 < UTILITY_MAX_AREA {
        "Utility"
    } else {
        "General"
    }
}

/// Keeps a custom label, otherwise replaces it with a suggestion.
#[must_use]
pub fn resolve_space_type(
    current: &str,
    net_area_m2: f64,
    has_parent: bool,
    has_children: bool,
) -> String {
    if is_auto_space_type(current) {
        suggest_space_type(net_area_m2, has_parent, has_children).to_owned()
    } else {
        current.to_owned()
    }
}
