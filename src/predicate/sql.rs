use super::filter::{Correlated, Filter};
use crate::value::Value;
use serde::Serialize;

/// Rendered SQL with positional (`$n`) parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SqlFragment {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Double-quote an identifier, doubling embedded quotes.
#[must_use]
pub fn quote_identifier(name: &str) -> String {
    let mut quoted = String::with_capacity(name.len().saturating_add(2));
    quoted.push('"');
    for c in name.chars() {
        if c == '"' {
            quoted.push('"');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Render `filter` as a WHERE-clause fragment over rows aliased `alias`.
/// Correlated subqueries get aliases `t<n+1>`, `t<n+2>`, ... in render order,
/// where `n` is the number in an `alias` of the form `t<n>` (else 0).
#[must_use]
pub fn render(filter: &Filter, alias: &str) -> SqlFragment {
    let mut renderer = Renderer {
        aliases: alias
            .strip_prefix('t')
            .and_then(|n| n.parse().ok())
            .unwrap_or(0),
        ..Renderer::default()
    };
    renderer.filter(filter, alias);
    renderer.finish()
}

/// Render a full `SELECT` over `table` restricted by every filter in `filters`.
#[must_use]
pub fn render_select(table: &str, filters: &[Filter]) -> SqlFragment {
    const ALIAS: &str = "t0";
    let mut renderer = Renderer::default();
    renderer.sql.push_str("SELECT ");
    renderer.sql.push_str(&quote_identifier(ALIAS));
    renderer.sql.push_str(".* FROM ");
    renderer.sql.push_str(&quote_identifier(table));
    renderer.sql.push_str(" AS ");
    renderer.sql.push_str(&quote_identifier(ALIAS));
    match filters {
        [] => {}
        [only] => {
            renderer.sql.push_str(" WHERE ");
            renderer.filter(only, ALIAS);
        }
        many => {
            renderer.sql.push_str(" WHERE ");
            renderer.joined(many, " AND ", ALIAS);
        }
    }
    renderer.finish()
}

#[derive(Default)]
struct Renderer {
    sql: String,
    params: Vec<Value>,
    aliases: usize,
}

impl Renderer {
    fn finish(self) -> SqlFragment {
        SqlFragment {
            sql: self.sql,
            params: self.params,
        }
    }

    fn column(&mut self, alias: &str, column: &str) {
        self.sql.push_str(&quote_identifier(alias));
        self.sql.push('.');
        self.sql.push_str(&quote_identifier(column));
    }

    fn param(&mut self, value: &Value) {
        self.params.push(value.clone());
        self.sql.push('$');
        self.sql.push_str(&self.params.len().to_string());
    }

    fn filter(&mut self, filter: &Filter, alias: &str) {
        match filter {
            Filter::IsNull(column) => {
                self.column(alias, column);
                self.sql.push_str(" IS NULL");
            }
            Filter::IsNotNull(column) => {
                self.column(alias, column);
                self.sql.push_str(" IS NOT NULL");
            }
            Filter::Compare { column, op, value } => {
                self.column(alias, column);
                self.sql.push(' ');
                self.sql.push_str(op.as_sql());
                self.sql.push(' ');
                self.param(value);
            }
            Filter::In { column, values } => self.in_list(alias, column, values),
            Filter::And(items) => self.group(items, " AND ", "1 = 1", alias),
            Filter::Or(items) => self.group(items, " OR ", "1 = 0", alias),
            Filter::Not(inner) => {
                self.sql.push_str("NOT ");
                if is_self_delimited(inner) {
                    self.filter(inner, alias);
                } else {
                    self.sql.push('(');
                    self.filter(inner, alias);
                    self.sql.push(')');
                }
            }
            Filter::Exists(subquery) => self.exists(subquery, alias),
        }
    }

    fn in_list(&mut self, alias: &str, column: &str, values: &[Value]) {
        if values.is_empty() {
            self.sql.push_str("1 = 0");
            return;
        }
        self.column(alias, column);
        self.sql.push_str(" IN (");
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                self.sql.push_str(", ");
            }
            self.param(value);
        }
        self.sql.push(')');
    }

    fn group(&mut self, items: &[Filter], separator: &str, empty: &str, alias: &str) {
        match items {
            [] => self.sql.push_str(empty),
            [only] => self.filter(only, alias),
            many => {
                self.sql.push('(');
                self.joined(many, separator, alias);
                self.sql.push(')');
            }
        }
    }

    fn joined(&mut self, items: &[Filter], separator: &str, alias: &str) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.sql.push_str(separator);
            }
            self.filter(item, alias);
        }
    }

    fn exists(&mut self, subquery: &Correlated, outer_alias: &str) {
        self.aliases = self.aliases.saturating_add(1);
        let alias = format!("t{}", self.aliases);
        self.sql.push_str("EXISTS (SELECT 1 FROM ");
        self.sql.push_str(&quote_identifier(&subquery.table));
        self.sql.push_str(" AS ");
        self.sql.push_str(&quote_identifier(&alias));
        self.sql.push_str(" WHERE ");
        self.column(&alias, &subquery.inner_column);
        self.sql.push_str(" = ");
        self.column(outer_alias, &subquery.outer_column);
        if let Some(filter) = &subquery.filter {
            self.sql.push_str(" AND ");
            self.filter(filter, &alias);
        }
        self.sql.push(')');
    }
}

/// Nodes that already render inside their own parentheses.
fn is_self_delimited(filter: &Filter) -> bool {
    match filter {
        Filter::Exists(_) => true,
        Filter::And(items) | Filter::Or(items) => items.len() > 1,
        _ => false,
    }
}

#[cfg(test)]
#[path = "sql_tests.rs"]
mod tests;
