use crate::common::Value;

use super::{Criteria, Operator};

/// Starts a criteria on the field at `path`.
///
/// # Examples
///
/// ```rust
/// use clover::criteria::row;
///
/// let criteria = row("userId").is_in(vec![5, 8]);
/// assert_eq!(criteria.to_string(), "(userId in [5, 8])");
/// ```
pub fn row(path: &str) -> FieldCriteria {
    FieldCriteria {
        path: path.to_string(),
    }
}

/// Builder for leaf criteria on a single field path.
pub struct FieldCriteria {
    path: String,
}

impl FieldCriteria {
    #[inline]
    pub fn eq<T: Into<Value>>(self, value: T) -> Criteria {
        self.build(Operator::Eq(value.into()))
    }

    /// Matches when the field differs from `value` or is absent.
    #[inline]
    pub fn neq<T: Into<Value>>(self, value: T) -> Criteria {
        self.build(Operator::Neq(value.into()))
    }

    #[inline]
    pub fn gt<T: Into<Value>>(self, value: T) -> Criteria {
        self.build(Operator::Gt(value.into()))
    }

    #[inline]
    pub fn gt_eq<T: Into<Value>>(self, value: T) -> Criteria {
        self.build(Operator::GtEq(value.into()))
    }

    #[inline]
    pub fn lt<T: Into<Value>>(self, value: T) -> Criteria {
        self.build(Operator::Lt(value.into()))
    }

    #[inline]
    pub fn lt_eq<T: Into<Value>>(self, value: T) -> Criteria {
        self.build(Operator::LtEq(value.into()))
    }

    /// Matches when the field equals any of `values`. An empty set never
    /// matches.
    #[inline]
    pub fn is_in<T: Into<Value>>(self, values: Vec<T>) -> Criteria {
        self.build(Operator::In(values.into_iter().map(Into::into).collect()))
    }

    /// Matches when the field is present, even if it holds null.
    #[inline]
    pub fn exists(self) -> Criteria {
        self.build(Operator::Exists)
    }

    fn build(self, op: Operator) -> Criteria {
        Criteria::field(&self.path, op)
    }
}
