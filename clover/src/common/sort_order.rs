/// Specifies the direction for sorting query results.
///
/// Used with [crate::collection::Query::sort]:
/// ```text
/// let newest_first = db.query("todos").sort("id", SortOrder::Descending).find_all()?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest to largest
    Ascending,
    /// Largest to smallest
    Descending,
}

impl SortOrder {
    /// Applies this direction to an ascending comparison result.
    #[inline]
    pub fn apply(&self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}
