use crate::collection::Document;
use crate::common::{SortOrder, Value};
use std::cmp::Ordering;

/// Options controlling the shape of a query's result: sort keys, skip and
/// limit.
///
/// Sorting is stable and uses [Value::sort_cmp]; a missing field sorts
/// before every present value, including null. Skip and limit are applied
/// after sorting.
///
/// # Examples
///
/// ```rust
/// use clover::collection::{order_by, FindOptions};
/// use clover::common::SortOrder;
///
/// let options = order_by("userId", SortOrder::Descending)
///     .then_by("title", SortOrder::Ascending)
///     .skip(10)
///     .limit(20);
/// assert_eq!(options.skip_count(), Some(10));
/// assert_eq!(options.limit_count(), Some(20));
/// ```
#[derive(Clone, Debug, Default)]
pub struct FindOptions {
    pub(crate) sort_by: Vec<(String, SortOrder)>,
    pub(crate) skip: Option<usize>,
    pub(crate) limit: Option<usize>,
}

/// Creates `FindOptions` sorting by a single field.
pub fn order_by(field_name: &str, sort_order: SortOrder) -> FindOptions {
    FindOptions::new().then_by(field_name, sort_order)
}

/// Creates `FindOptions` that skips the first `skip` results.
pub fn skip_by(skip: usize) -> FindOptions {
    FindOptions::new().skip(skip)
}

/// Creates `FindOptions` returning at most `limit` results.
pub fn limit_to(limit: usize) -> FindOptions {
    FindOptions::new().limit(limit)
}

impl FindOptions {
    pub fn new() -> Self {
        FindOptions::default()
    }

    /// Adds a sort key. Earlier keys take precedence over later ones.
    pub fn then_by(mut self, field_name: &str, sort_order: SortOrder) -> Self {
        self.sort_by.push((field_name.to_string(), sort_order));
        self
    }

    pub fn skip(mut self, skip: usize) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn skip_count(&self) -> Option<usize> {
        self.skip
    }

    pub fn limit_count(&self) -> Option<usize> {
        self.limit
    }

    pub fn sort_keys(&self) -> &[(String, SortOrder)] {
        &self.sort_by
    }

    pub(crate) fn is_windowed(&self) -> bool {
        self.skip.is_some() || self.limit.is_some()
    }

    /// Sorts, then skips, then limits `documents`.
    pub(crate) fn apply(&self, mut documents: Vec<Document>) -> Vec<Document> {
        if !self.sort_by.is_empty() {
            documents.sort_by(|a, b| self.compare(a, b));
        }

        if !self.is_windowed() {
            return documents;
        }

        let skip = self.skip.unwrap_or(0);
        let limit = self.limit.unwrap_or(usize::MAX);
        documents.into_iter().skip(skip).take(limit).collect()
    }

    /// Number of results left after skip and limit out of `total` matches.
    pub(crate) fn window_len(&self, total: usize) -> usize {
        let remaining = total.saturating_sub(self.skip.unwrap_or(0));
        match self.limit {
            Some(limit) => remaining.min(limit),
            None => remaining,
        }
    }

    fn compare(&self, a: &Document, b: &Document) -> Ordering {
        for (field, order) in &self.sort_by {
            let ordering = order.apply(compare_field(a.get(field), b.get(field)));
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

fn compare_field(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.sort_cmp(b),
    }
}
