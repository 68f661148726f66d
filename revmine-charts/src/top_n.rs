//! Top-N selection for histogram-style widgets

/// Select the top `n` categories by descending total count.
///
/// `totals` is an ordered `(category, count)` mapping; entries with equal
/// counts keep their relative input order (stable sort), so shrinking `n`
/// or narrowing `range` never reorders the categories that remain visible.
/// `range` is an optional inclusive `[min, max]` occurrence-count filter
/// applied before truncation.
pub fn select_top(
    totals: &[(String, u32)],
    n: usize,
    range: Option<(u32, u32)>,
) -> Vec<(String, u32)> {
    let mut selected: Vec<(String, u32)> = totals
        .iter()
        .filter(|(_, count)| match range {
            Some((min, max)) => *count >= min && *count <= max,
            None => true,
        })
        .cloned()
        .collect();

    selected.sort_by(|a, b| b.1.cmp(&a.1));
    selected.truncate(n);
    selected
}
