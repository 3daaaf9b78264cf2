//! Visibility predicates: the lazy filter expression tree, the cascading
//! deleted-set builder and SQL rendering.
mod builder;
mod filter;
mod sql;

pub use builder::PredicateBuilder;
pub use filter::{Comparison, Correlated, Filter};
pub use sql::{quote_identifier, render, render_select, SqlFragment};
