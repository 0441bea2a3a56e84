#![deny(warnings)]

//! # tursorepo
//!
//! A generic repository, fluent predicate builder, and pagination engine for
//! [Turso](https://turso.tech).
//!
//! ## Features
//!
//! - Derive macro for defining entities
//! - Repository bound to an entity capability (table name + primary key)
//! - Chainable filters with nested predicate grouping
//! - Pagination with total-count bookkeeping
//! - Partial updates with skip-zero semantics and an explicit `Setter` bypass
//! - Automatic state reset after every terminal operation
//!
//! ## Quick Start
//!
//! ```ignore
//! use tursorepo::prelude::*;
//!
//! // Define an entity
//! #[derive(Clone, Debug, Entity)]
//! #[tursorepo(table_name = "users")]
//! pub struct User {
//!     #[tursorepo(primary_key, auto_increment)]
//!     pub id:   i64,
//!     pub name: String,
//!     pub age:  i64,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Connect to database
//!     let db = Builder::new_local(":memory:").build().await?;
//!     let conn = db.connect()?;
//!
//!     conn.execute(
//!         "CREATE TABLE users (
//!             id INTEGER PRIMARY KEY AUTOINCREMENT,
//!             name TEXT NOT NULL,
//!             age INTEGER NOT NULL
//!         )",
//!         (),
//!     )
//!     .await?;
//!
//!     let mut repo = UserEntity::repo(conn);
//!
//!     // Insert a row
//!     repo.create(&User { id: 0, name: "Alice".to_string(), age: 30 }).await?;
//!
//!     // Chain filters, then run a terminal method
//!     let adults = repo.ge("age", 18).order_by_desc("age").all().await?;
//!
//!     // The state reset after `all`; this chain starts clean
//!     let page = repo.like("name", "li").paginate(1, 20).await?;
//!     println!("{} of {} rows", page.list.len(), page.total_size);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Query Examples
//!
//! ```ignore
//! // Single rows; a missing row is Ok(None), never an error
//! let first = repo.eq("status", "active").first().await?;
//! let last = repo.last().await?;
//!
//! // Three-argument operator form, IN included
//! let some = repo.where_op("age", ">", 18).where_op("id", "IN", "1,2,3").all().await?;
//!
//! // Nested grouping: age > 18 AND (vip = 1 OR role = 'admin')
//! let vips = repo
//!     .gt("age", 18)
//!     .where_group(|g| g.eq("vip", 1).or_eq("role", "admin"))
//!     .all()
//!     .await?;
//!
//! // Partial updates: whole-model updates skip zero values,
//! // a Setter sends every entry verbatim
//! repo.eq("id", 1).updates(&user).await?;
//! repo.eq("id", 1).updates(Setter::new().set("age", 0)).await?;
//! ```
//!
//! ## Pagination
//!
//! ```ignore
//! // Positional and configuration-object forms are equivalent
//! let page = repo.gt("age", 18).paginate(2, 20).await?;
//! let page = repo.gt("age", 18).paginate_with(PageQuery::new(2, 20)).await?;
//!
//! // Composition over an externally built query
//! let page = Pager::new()
//!     .with_query(Query::new().gt("age", 18))
//!     .page(PageQuery::new(2, 20))
//!     .run::<UserEntity>(&conn)
//!     .await?;
//! ```
//!
//! ## Concurrency
//!
//! A repository owns one mutable query chain. Chain methods take
//! `&mut self`, so two tasks cannot interleave builder calls on a shared
//! instance; clone the [`Connection`] and bind one repository per
//! concurrent chain instead.

pub mod connection;
pub mod entity;
pub mod error;
pub mod page;
pub mod prelude;
pub mod query;
pub mod repository;
pub mod value;
// Re-export main types at crate root
pub use connection::Builder;
pub use connection::Connection;
pub use connection::Database;
pub use entity::EntityRepoExt;
pub use entity::EntityTrait;
pub use entity::FromRow;
pub use entity::ModelTrait;
pub use error::Error;
pub use error::Result;
pub use page::PageQuery;
pub use page::PageResult;
pub use page::Pager;
pub use page::paginate_query;
pub use query::Combinator;
pub use query::IntoSetValues;
pub use query::Order;
pub use query::OrderBy;
pub use query::Predicate;
pub use query::Query;
pub use query::Setter;
pub use repository::ExecResult;
pub use repository::LimitArgs;
pub use repository::Repository;
pub use repository::TxFuture;
pub use turso::Row;
pub use turso::Rows;
// Re-export the derive macro
pub use tursorepo_macros::Entity;
pub use value::FromValue;
pub use value::IntoInValues;
pub use value::IntoValue;
pub use value::Value;
pub use value::is_zero_value;
