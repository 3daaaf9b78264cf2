//! Named query scopes (`only_deleted`, `without_deleted`) over an entity.
mod query;

pub use query::Query;
