use crate::schema::EntityType;
use crate::value::Value;
use std::sync::Arc;

/// Comparison operator for [`Filter::Compare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Comparison {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::Ne => "<>",
            Comparison::Lt => "<",
            Comparison::Le => "<=",
            Comparison::Gt => ">",
            Comparison::Ge => ">=",
        }
    }
}

/// A lazy row filter. Column names refer to the row source the filter is
/// applied to; inside [`Correlated`] they refer to the subquery's rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    IsNull(String),
    IsNotNull(String),
    Compare {
        column: String,
        op: Comparison,
        value: Value,
    },
    In {
        column: String,
        values: Vec<Value>,
    },
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Not(Arc<Filter>),
    Exists(Arc<Correlated>),
}

/// Correlated existence subquery:
/// `EXISTS (SELECT 1 FROM table WHERE table.inner_column = outer.outer_column AND filter)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correlated {
    pub entity: EntityType,
    pub table: String,
    pub inner_column: String,
    pub outer_column: String,
    pub filter: Option<Arc<Filter>>,
}

impl Filter {
    pub fn is_null(column: impl Into<String>) -> Self {
        Filter::IsNull(column.into())
    }

    pub fn is_not_null(column: impl Into<String>) -> Self {
        Filter::IsNotNull(column.into())
    }

    pub fn equals(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, Comparison::Eq, value)
    }

    pub fn compare(column: impl Into<String>, op: Comparison, value: impl Into<Value>) -> Self {
        Filter::Compare {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    pub fn in_list<I, V>(column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Filter::In {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Equality on every `(column, value)` pair, AND-ed together.
    pub fn matching<I, C, V>(conditions: I) -> Self
    where
        I: IntoIterator<Item = (C, V)>,
        C: Into<String>,
        V: Into<Value>,
    {
        Filter::And(
            conditions
                .into_iter()
                .map(|(column, value)| Filter::equals(column, value))
                .collect(),
        )
    }

    pub fn exists(subquery: Correlated) -> Self {
        Filter::Exists(Arc::new(subquery))
    }

    /// Logical AND, flattening nested conjunctions.
    #[must_use]
    pub fn and(self, other: Filter) -> Self {
        match (self, other) {
            (Filter::And(mut left), Filter::And(right)) => {
                left.extend(right);
                Filter::And(left)
            }
            (Filter::And(mut left), other) => {
                left.push(other);
                Filter::And(left)
            }
            (this, Filter::And(mut right)) => {
                right.insert(0, this);
                Filter::And(right)
            }
            (this, other) => Filter::And(vec![this, other]),
        }
    }

    /// Logical OR, flattening nested disjunctions.
    #[must_use]
    pub fn or(self, other: Filter) -> Self {
        match (self, other) {
            (Filter::Or(mut left), Filter::Or(right)) => {
                left.extend(right);
                Filter::Or(left)
            }
            (Filter::Or(mut left), other) => {
                left.push(other);
                Filter::Or(left)
            }
            (this, Filter::Or(mut right)) => {
                right.insert(0, this);
                Filter::Or(right)
            }
            (this, other) => Filter::Or(vec![this, other]),
        }
    }

    /// Negation node wrapping a shared filter.
    #[must_use]
    pub fn negate(inner: Arc<Filter>) -> Self {
        Filter::Not(inner)
    }
}

impl std::ops::Not for Filter {
    type Output = Filter;

    fn not(self) -> Self::Output {
        Filter::Not(Arc::new(self))
    }
}
