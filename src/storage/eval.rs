use crate::predicate::{Comparison, Correlated, Filter};
use crate::value::{Row, Value};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Tables visible to correlated subqueries, keyed by table name then primary key.
pub type Tables = BTreeMap<String, BTreeMap<Value, Row>>;

/// Evaluate `filter` against `row` with SQL three-valued logic.
///
/// `None` is UNKNOWN; a WHERE clause keeps a row only on `Some(true)`.
#[must_use]
pub fn evaluate(filter: &Filter, row: &Row, tables: &Tables) -> Option<bool> {
    match filter {
        Filter::IsNull(column) => Some(cell(row, column).is_null()),
        Filter::IsNotNull(column) => Some(!cell(row, column).is_null()),
        Filter::Compare { column, op, value } => {
            cell(row, column).sql_cmp(value).map(|ord| compare(*op, ord))
        }
        Filter::In { column, values } => in_list(cell(row, column), values),
        Filter::And(items) => and(items, row, tables),
        Filter::Or(items) => or(items, row, tables),
        Filter::Not(inner) => evaluate(inner, row, tables).map(|b| !b),
        Filter::Exists(subquery) => Some(exists(subquery, row, tables)),
    }
}

static NULL: Value = Value::Null;

fn cell<'a>(row: &'a Row, column: &str) -> &'a Value {
    row.get(column).unwrap_or(&NULL)
}

fn compare(op: Comparison, ord: Ordering) -> bool {
    match op {
        Comparison::Eq => ord == Ordering::Equal,
        Comparison::Ne => ord != Ordering::Equal,
        Comparison::Lt => ord == Ordering::Less,
        Comparison::Le => ord != Ordering::Greater,
        Comparison::Gt => ord == Ordering::Greater,
        Comparison::Ge => ord != Ordering::Less,
    }
}

fn in_list(value: &Value, values: &[Value]) -> Option<bool> {
    if value.is_null() {
        return None;
    }
    let mut unknown = false;
    for candidate in values {
        match value.sql_cmp(candidate) {
            Some(Ordering::Equal) => return Some(true),
            None if candidate.is_null() => unknown = true,
            _ => {}
        }
    }
    if unknown {
        None
    } else {
        Some(false)
    }
}

fn and(items: &[Filter], row: &Row, tables: &Tables) -> Option<bool> {
    let mut unknown = false;
    for item in items {
        match evaluate(item, row, tables) {
            Some(false) => return Some(false),
            None => unknown = true,
            Some(true) => {}
        }
    }
    if unknown {
        None
    } else {
        Some(true)
    }
}

fn or(items: &[Filter], row: &Row, tables: &Tables) -> Option<bool> {
    let mut unknown = false;
    for item in items {
        match evaluate(item, row, tables) {
            Some(true) => return Some(true),
            None => unknown = true,
            Some(false) => {}
        }
    }
    if unknown {
        None
    } else {
        Some(false)
    }
}

fn exists(subquery: &Correlated, outer: &Row, tables: &Tables) -> bool {
    let key = cell(outer, &subquery.outer_column);
    if key.is_null() {
        return false;
    }
    let Some(rows) = tables.get(&subquery.table) else {
        return false;
    };
    rows.values().any(|candidate| {
        cell(candidate, &subquery.inner_column).sql_cmp(key) == Some(Ordering::Equal)
            && subquery
                .filter
                .as_ref()
                .map_or(true, |filter| evaluate(filter, candidate, tables) == Some(true))
    })
}
