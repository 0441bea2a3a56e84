//! Prelude module for tursorepo
//!
//! Re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use tursorepo::prelude::*;
//! ```

// Re-export the derive macro
pub use tursorepo_macros::Entity;

pub use crate::connection::Builder;
pub use crate::connection::Connection;
pub use crate::entity::EntityRepoExt;
pub use crate::entity::EntityTrait;
pub use crate::entity::FromRow;
pub use crate::entity::ModelTrait;
pub use crate::error::Error;
pub use crate::error::Result;
pub use crate::page::PageQuery;
pub use crate::page::PageResult;
pub use crate::page::Pager;
pub use crate::query::Order;
pub use crate::query::Predicate;
pub use crate::query::Query;
pub use crate::query::Setter;
pub use crate::repository::ExecResult;
pub use crate::repository::Repository;
pub use crate::value::FromValue;
pub use crate::value::IntoInValues;
pub use crate::value::IntoValue;
pub use crate::value::Value;
