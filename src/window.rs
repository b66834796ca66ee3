//! Cyclic six-month window over a fixed twelve-month year.
//!
//! The year is a ring of [`MONTHS_IN_YEAR`] calendar indices (0 = January).
//! The window never truncates at December: it wraps into the next January.

pub const MONTHS_IN_YEAR: usize = 12;
pub const WINDOW_LEN: usize = 6;

pub const MONTH_NAMES: [&str; MONTHS_IN_YEAR] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// Reduce any (possibly pre-offset) index into `[0, 12)`.
pub fn cyclic_index(n: usize) -> usize {
    n % MONTHS_IN_YEAR
}

/// Calendar indices shown for a window starting at `current`.
pub fn visible_slots(current: usize) -> [usize; WINDOW_LEN] {
    std::array::from_fn(|k| cyclic_index(current + k))
}

pub fn advance(current: usize) -> usize {
    cyclic_index(current + 1)
}

/// Step back one month. Adds a full year before subtracting so the operand
/// never goes below zero.
pub fn retreat(current: usize) -> usize {
    cyclic_index(cyclic_index(current) + MONTHS_IN_YEAR - 1)
}

pub fn month_name(index: usize) -> &'static str {
    MONTH_NAMES[cyclic_index(index)]
}

/// Human label for the visible range, e.g. "November – April".
pub fn range_label(current: usize) -> String {
    let slots = visible_slots(current);
    format!(
        "{} \u{2013} {}",
        month_name(slots[0]),
        month_name(slots[WINDOW_LEN - 1])
    )
}
