//! Entity capability traits
//!
//! The repository is generic over these three traits and never inspects an
//! entity beyond them:
//!
//! - [`EntityTrait`] - table identifier and primary-key metadata
//! - [`ModelTrait`] - a row as a Rust struct: primary-key accessor and the
//!   ordered column/value listing used by insert and update terminals
//! - [`FromRow`] - decodes a database row into a model
//!
//! All three are typically implemented by the `#[derive(Entity)]` macro.

use crate::Repository;
use crate::connection::Connection;
use crate::error::Result;
use crate::value::Value;

/// Trait for entity marker types that represent database tables
///
/// # Example
///
/// ```ignore
/// #[derive(Clone, Debug, Entity)]
/// #[tursorepo(table_name = "users")]
/// pub struct User {
///     #[tursorepo(primary_key, auto_increment)]
///     pub id:   i64,
///     pub name: String,
///     pub age:  i64,
/// }
///
/// // The derive generates `UserEntity` and the trait impls:
/// let mut repo = UserEntity::repo(conn);
/// let adults = repo.ge("age", 18).all().await?;
/// ```
pub trait EntityTrait: Default + Send + Sync + 'static {
    /// The model type for this entity
    type Model: ModelTrait<Entity = Self> + FromRow + Send;

    /// Get the table name
    fn table_name() -> &'static str;

    /// Get the primary key column name
    fn primary_key() -> &'static str;

    /// Whether the primary key auto-increments
    ///
    /// When true, `create` omits the primary-key column from the INSERT if
    /// its value is zero-valued, letting the database assign it.
    fn primary_key_auto_increment() -> bool {
        false
    }

    /// The column set by `delete_soft` instead of removing rows
    ///
    /// `None` (the default) makes `delete_soft` an invalid-argument error
    /// for this entity.
    fn soft_delete_column() -> Option<&'static str> {
        None
    }
}

/// Trait for model structs representing one database row
pub trait ModelTrait: Clone + Send + Sync {
    /// The entity this model belongs to
    type Entity: EntityTrait;

    /// The value of the primary-key column
    fn primary_key_value(&self) -> Value;

    /// Every column of this row, in declaration order
    fn to_row(&self) -> Vec<(&'static str, Value)>;
}

/// Trait for decoding a database row into a model
pub trait FromRow: Sized {
    fn from_row(row: &turso::Row) -> Result<Self>;
}

/// Binds a repository to an entity in one call
pub trait EntityRepoExt: EntityTrait {
    fn repo(conn: Connection) -> Repository<Self> {
        Repository::new(conn)
    }
}

impl<E: EntityTrait> EntityRepoExt for E {}
