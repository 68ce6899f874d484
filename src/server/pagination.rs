pub const QUESTIONS_PER_PAGE: usize = 10;

/// Pages are 1-indexed. Anything absent, non-numeric or below 1 falls
/// back to page 1.
pub fn parse_page(raw: Option<&str>) -> usize {
    raw.and_then(|value| value.parse::<usize>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

/// Slices the already-formatted selection into the requested window.
/// A page past the end of the collection yields an empty vec; callers
/// decide whether that is an error.
pub fn paginate<T>(selection: Vec<T>, page: usize) -> Vec<T> {
    let start = (page - 1) * QUESTIONS_PER_PAGE;
    selection
        .into_iter()
        .skip(start)
        .take(QUESTIONS_PER_PAGE)
        .collect()
}
