use crate::collection::Document;
use crate::common::Value;
use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

/// Comparison applied by a leaf criteria to the value at its field path.
#[derive(Clone, PartialEq)]
pub enum Operator {
    Eq(Value),
    Neq(Value),
    Gt(Value),
    GtEq(Value),
    Lt(Value),
    LtEq(Value),
    In(Vec<Value>),
    Exists,
}

impl Operator {
    /// Evaluates the operator against the resolved field value.
    ///
    /// `None` means the field is absent from the document.
    fn apply(&self, field_value: Option<&Value>) -> bool {
        match self {
            Operator::Eq(operand) => field_value.map(|v| v == operand).unwrap_or(false),
            Operator::Neq(operand) => field_value.map(|v| v != operand).unwrap_or(true),
            Operator::Gt(operand) => compare(field_value, operand, |o| o == Ordering::Greater),
            Operator::GtEq(operand) => compare(field_value, operand, |o| o != Ordering::Less),
            Operator::Lt(operand) => compare(field_value, operand, |o| o == Ordering::Less),
            Operator::LtEq(operand) => compare(field_value, operand, |o| o != Ordering::Greater),
            Operator::In(operands) => field_value
                .map(|v| operands.iter().any(|operand| v == operand))
                .unwrap_or(false),
            Operator::Exists => field_value.is_some(),
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            Operator::Eq(_) => "==",
            Operator::Neq(_) => "!=",
            Operator::Gt(_) => ">",
            Operator::GtEq(_) => ">=",
            Operator::Lt(_) => "<",
            Operator::LtEq(_) => "<=",
            Operator::In(_) => "in",
            Operator::Exists => "exists",
        }
    }
}

#[inline]
fn compare(field_value: Option<&Value>, operand: &Value, accept: impl Fn(Ordering) -> bool) -> bool {
    field_value
        .and_then(|v| v.compare(operand))
        .map(accept)
        .unwrap_or(false)
}

#[derive(Clone, PartialEq)]
enum CriteriaNode {
    Field { path: String, op: Operator },
    And(Criteria, Criteria),
    Or(Criteria, Criteria),
    Not(Criteria),
}

/// An immutable boolean predicate over documents.
///
/// Leaves bind a dotted field path to an [Operator]; `and`, `or` and `not`
/// build new trees that share their children with the originals, so
/// combining criteria never changes an existing one.
///
/// Evaluation never fails: an absent field or a comparison between
/// incompatible kinds simply evaluates to false (true for `neq`).
///
/// # Examples
///
/// ```rust
/// use clover::criteria::row;
/// use clover::doc;
///
/// let done_by_heavy_users = row("completed").eq(true).and(row("userId").gt(2));
/// let todo = doc!{ completed: true, userId: 3 };
/// assert!(done_by_heavy_users.matches(&todo));
/// assert!(!done_by_heavy_users.not().matches(&todo));
/// ```
#[derive(Clone, PartialEq)]
pub struct Criteria {
    node: Arc<CriteriaNode>,
}

impl Criteria {
    /// Creates a leaf criteria on `path`.
    pub fn field(path: &str, op: Operator) -> Self {
        Criteria::from_node(CriteriaNode::Field {
            path: path.to_string(),
            op,
        })
    }

    fn from_node(node: CriteriaNode) -> Self {
        Criteria {
            node: Arc::new(node),
        }
    }

    /// Evaluates this criteria against `document`.
    ///
    /// `and` and `or` short-circuit on their left operand.
    pub fn matches(&self, document: &Document) -> bool {
        match self.node.as_ref() {
            CriteriaNode::Field { path, op } => op.apply(document.get(path)),
            CriteriaNode::And(lhs, rhs) => lhs.matches(document) && rhs.matches(document),
            CriteriaNode::Or(lhs, rhs) => lhs.matches(document) || rhs.matches(document),
            CriteriaNode::Not(inner) => !inner.matches(document),
        }
    }

    /// True when both this and `other` match.
    pub fn and(&self, other: Criteria) -> Criteria {
        Criteria::from_node(CriteriaNode::And(self.clone(), other))
    }

    /// True when either this or `other` matches.
    pub fn or(&self, other: Criteria) -> Criteria {
        Criteria::from_node(CriteriaNode::Or(self.clone(), other))
    }

    /// Negation of this criteria.
    pub fn not(&self) -> Criteria {
        Criteria::from_node(CriteriaNode::Not(self.clone()))
    }
}

impl Display for Criteria {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.node.as_ref() {
            CriteriaNode::Field { path, op } => match op {
                Operator::Exists => write!(f, "({} exists)", path),
                Operator::In(values) => write!(f, "({} in {})", path, Value::Array(values.clone())),
                Operator::Eq(v)
                | Operator::Neq(v)
                | Operator::Gt(v)
                | Operator::GtEq(v)
                | Operator::Lt(v)
                | Operator::LtEq(v) => write!(f, "({} {} {})", path, op.symbol(), v),
            },
            CriteriaNode::And(lhs, rhs) => write!(f, "({} && {})", lhs, rhs),
            CriteriaNode::Or(lhs, rhs) => write!(f, "({} || {})", lhs, rhs),
            CriteriaNode::Not(inner) => write!(f, "!{}", inner),
        }
    }
}

impl Debug for Criteria {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Criteria{}", self)
    }
}
