pub const FILTER_YEAR_MIN: i64 = 1891;
pub const FILTER_YEAR_MAX: i64 = 2025;

/// Static year labels offered to filter UIs. This range is a presentation
/// affordance; the store may hold data for only a subset of it.
#[must_use]
pub fn filter_year_labels() -> Vec<String> {
    (FILTER_YEAR_MIN..=FILTER_YEAR_MAX)
        .map(|year| year.to_string())
        .collect()
}
