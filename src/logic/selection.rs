//! Cursor movement
//!
//! Pure functions moving the highlighted row of the listing. Lists wrap at
//! both ends for single steps; paging clamps instead.

/// Move the cursor by `delta` rows with wrap-around.
///
/// With no current row, moving down lands on the first row and moving up
/// on the last.
///
/// # Examples
/// ```
/// use filepick::logic::selection::step;
///
/// assert_eq!(step(None, 1, 3), Some(0));
/// assert_eq!(step(None, -1, 3), Some(2));
/// assert_eq!(step(Some(2), 1, 3), Some(0));
/// assert_eq!(step(Some(0), -1, 3), Some(2));
/// assert_eq!(step(Some(0), 1, 0), None);
/// ```
pub fn step(current: Option<usize>, delta: isize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let len = len as isize;
    let next = match current {
        None if delta >= 0 => 0,
        None => len - 1,
        Some(i) => (i.min(len as usize - 1) as isize + delta).rem_euclid(len),
    };
    Some(next as usize)
}

/// Move the cursor a page at a time, clamping at the ends
pub fn page(current: Option<usize>, page_size: usize, down: bool, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let current = current.unwrap_or(0).min(len - 1);
    let page_size = page_size.max(1);
    Some(if down {
        (current + page_size).min(len - 1)
    } else {
        current.saturating_sub(page_size)
    })
}

/// Keep a cursor valid after the list was replaced
pub fn clamp(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(current.unwrap_or(0).min(len - 1))
}
