//! Internal helpers shared by the value wrappers.

/// Resolve a possibly negative `start`/`length` pair against `count` items.
///
/// A negative `start` counts from the end and is clamped to 0. A negative
/// `length` stops that many items before the end. The returned range is
/// always within `0..=count` and never inverted.
pub(crate) fn window(count: usize, start: i64, length: i64) -> (usize, usize) {
    let count = i64::try_from(count).unwrap_or(i64::MAX);
    let from = if start < 0 {
        count.saturating_add(start).max(0)
    } else {
        start.min(count)
    };
    let to = if length < 0 {
        count.saturating_add(length)
    } else {
        from.saturating_add(length).min(count)
    };
    (from as usize, to.max(from) as usize)
}
