//! Generic repository over an entity capability
//!
//! A [`Repository`] binds an entity type to a [`Connection`] and a working
//! [`Query`]. Chain methods mutate the working state in place and return
//! `&mut Self`; terminal methods capture the state, swap the pristine
//! baseline back in, execute against the client, and return a `Result`.
//! The capture-and-swap runs on every path, so a failed call never leaves
//! the repository polluted for the next chain.

use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;

use crate::connection::Connection;
use crate::entity::EntityTrait;
use crate::entity::FromRow;
use crate::entity::ModelTrait;
use crate::error::Error;
use crate::error::Result;
use crate::page::PageQuery;
use crate::page::PageResult;
use crate::page::paginate_query;
use crate::query::IntoSetValues;
use crate::query::Order;
use crate::query::Query;
use crate::query::Setter;
use crate::value::IntoInValues;
use crate::value::IntoValue;
use crate::value::Value;
use crate::value::is_zero_value;

/// Boxed future returned by [`Repository::transaction`] callbacks
pub type TxFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a>>;

/// Outcome of a write terminal
#[derive(Clone, Copy, Debug, Default)]
pub struct ExecResult {
    pub rows_affected:  u64,
    pub last_insert_id: i64,
}

/// Optional limit input for [`Repository::list`]
///
/// Converts from `()` (no limit), a single integer, or a slice/`Vec`. A
/// slice with more than one element is a contract violation reported as
/// [`Error::InvalidArgument`] before any query executes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LimitArgs {
    None,
    One(u64),
    Many(usize),
}

impl From<()> for LimitArgs {
    fn from(_: ()) -> Self {
        LimitArgs::None
    }
}

impl From<u64> for LimitArgs {
    fn from(limit: u64) -> Self {
        LimitArgs::One(limit)
    }
}

impl From<Vec<u64>> for LimitArgs {
    fn from(limits: Vec<u64>) -> Self {
        LimitArgs::from(limits.as_slice())
    }
}

impl From<&[u64]> for LimitArgs {
    fn from(limits: &[u64]) -> Self {
        match limits {
            [] => LimitArgs::None,
            [limit] => LimitArgs::One(*limit),
            _ => LimitArgs::Many(limits.len()),
        }
    }
}

/// Generic repository: chainable filters plus terminal operations
///
/// One repository serves one logical query chain at a time. Chain methods
/// take `&mut self`, so concurrent chains on a shared instance do not
/// compile; clone the [`Connection`] and bind one repository per task
/// instead. Sequential reuse is safe: every terminal resets the working
/// state before executing, on success and failure alike.
///
/// # Example
///
/// ```ignore
/// let mut repo: Repository<UserEntity> = Repository::new(conn);
///
/// let adults = repo.ge("age", 18).order_by_desc("age").all().await?;
/// let page = repo.like("name", "li").paginate(1, 20).await?;
/// ```
pub struct Repository<E: EntityTrait> {
    conn:    Connection,
    query:   Query,
    _entity: PhantomData<E>,
}

impl<E: EntityTrait> std::fmt::Debug for Repository<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository").field("table", &E::table_name()).field("query", &self.query).finish()
    }
}

impl<E: EntityTrait> Repository<E> {
    /// Bind a repository to a connection with an empty baseline state
    pub fn new(conn: Connection) -> Self {
        Self { conn, query: Query::new(), _entity: PhantomData }
    }

    /// Bind with an externally built query as the initial working state
    pub fn with_query(conn: Connection, query: Query) -> Self {
        Self { conn, query, _entity: PhantomData }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// The current working state
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Capture the working state and restore the pristine baseline
    pub fn take_query(&mut self) -> Query {
        std::mem::take(&mut self.query)
    }

    /// Restore the working state to the pristine baseline
    ///
    /// Every terminal method does this implicitly; calling it directly is
    /// only needed to abandon a partially built chain.
    pub fn reset(&mut self) -> &mut Self {
        self.query = Query::new();
        self
    }

    fn chain(&mut self, f: impl FnOnce(Query) -> Query) -> &mut Self {
        self.query = f(std::mem::take(&mut self.query));
        self
    }

    /// Capture the state, reset, and fail on any deferred builder error
    fn checked_take(&mut self) -> Result<Query> {
        let query = self.take_query();
        if let Some(message) = query.pending() {
            return Err(Error::InvalidArgument(message.to_string()));
        }
        Ok(query)
    }

    // ---- chain methods -----------------------------------------------------

    pub fn eq(&mut self, column: &str, value: impl IntoValue) -> &mut Self {
        self.chain(|q| q.eq(column, value))
    }

    pub fn or_eq(&mut self, column: &str, value: impl IntoValue) -> &mut Self {
        self.chain(|q| q.or_eq(column, value))
    }

    pub fn neq(&mut self, column: &str, value: impl IntoValue) -> &mut Self {
        self.chain(|q| q.neq(column, value))
    }

    pub fn gt(&mut self, column: &str, value: impl IntoValue) -> &mut Self {
        self.chain(|q| q.gt(column, value))
    }

    pub fn ge(&mut self, column: &str, value: impl IntoValue) -> &mut Self {
        self.chain(|q| q.ge(column, value))
    }

    pub fn lt(&mut self, column: &str, value: impl IntoValue) -> &mut Self {
        self.chain(|q| q.lt(column, value))
    }

    pub fn le(&mut self, column: &str, value: impl IntoValue) -> &mut Self {
        self.chain(|q| q.le(column, value))
    }

    pub fn like(&mut self, column: &str, pattern: impl Into<String>) -> &mut Self {
        self.chain(|q| q.like(column, pattern))
    }

    pub fn like_left(&mut self, column: &str, pattern: impl Into<String>) -> &mut Self {
        self.chain(|q| q.like_left(column, pattern))
    }

    pub fn like_right(&mut self, column: &str, pattern: impl Into<String>) -> &mut Self {
        self.chain(|q| q.like_right(column, pattern))
    }

    pub fn not_like(&mut self, column: &str, pattern: impl Into<String>) -> &mut Self {
        self.chain(|q| q.not_like(column, pattern))
    }

    pub fn is_null(&mut self, column: &str) -> &mut Self {
        self.chain(|q| q.is_null(column))
    }

    pub fn is_not_null(&mut self, column: &str) -> &mut Self {
        self.chain(|q| q.is_not_null(column))
    }

    pub fn between(&mut self, column: &str, low: impl IntoValue, high: impl IntoValue) -> &mut Self {
        self.chain(|q| q.between(column, low, high))
    }

    pub fn not_between(&mut self, column: &str, low: impl IntoValue, high: impl IntoValue) -> &mut Self {
        self.chain(|q| q.not_between(column, low, high))
    }

    pub fn find_in_set(&mut self, column: &str, value: impl IntoValue) -> &mut Self {
        self.chain(|q| q.find_in_set(column, value))
    }

    /// `column operator ?`; an `IN` operator delegates to IN-normalization
    pub fn where_op(&mut self, column: &str, operator: &str, value: impl IntoValue) -> &mut Self {
        self.chain(|q| q.where_op(column, operator, value))
    }

    pub fn or_op(&mut self, column: &str, operator: &str, value: impl IntoValue) -> &mut Self {
        self.chain(|q| q.or_op(column, operator, value))
    }

    pub fn where_raw(&mut self, sql: impl Into<String>, values: Vec<Value>) -> &mut Self {
        self.chain(|q| q.where_raw(sql, values))
    }

    pub fn or_raw(&mut self, sql: impl Into<String>, values: Vec<Value>) -> &mut Self {
        self.chain(|q| q.or_raw(sql, values))
    }

    pub fn is_in(&mut self, column: &str, values: impl IntoInValues) -> &mut Self {
        self.chain(|q| q.is_in(column, values))
    }

    pub fn or_in(&mut self, column: &str, values: impl IntoInValues) -> &mut Self {
        self.chain(|q| q.or_in(column, values))
    }

    pub fn not_in(&mut self, column: &str, values: impl IntoInValues) -> &mut Self {
        self.chain(|q| q.not_in(column, values))
    }

    /// Nested grouping, AND-combined; see [`Query::where_group`]
    pub fn where_group(&mut self, f: impl FnOnce(Query) -> Query) -> &mut Self {
        self.chain(|q| q.where_group(f))
    }

    /// Nested grouping, OR-combined
    pub fn or_group(&mut self, f: impl FnOnce(Query) -> Query) -> &mut Self {
        self.chain(|q| q.or_group(f))
    }

    /// Apply `f` to this repository only when `condition` holds
    pub fn when(&mut self, condition: bool, f: impl FnOnce(&mut Self)) -> &mut Self {
        if condition {
            f(self);
        }
        self
    }

    pub fn select<I, S>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.chain(|q| q.select(columns))
    }

    pub fn order_by(&mut self, column: impl Into<String>, direction: Order) -> &mut Self {
        self.chain(|q| q.order_by(column, direction))
    }

    pub fn order_by_asc(&mut self, column: impl Into<String>) -> &mut Self {
        self.chain(|q| q.order_by_asc(column))
    }

    pub fn order_by_desc(&mut self, column: impl Into<String>) -> &mut Self {
        self.chain(|q| q.order_by_desc(column))
    }

    pub fn limit(&mut self, limit: u64) -> &mut Self {
        self.chain(|q| q.limit(limit))
    }

    pub fn offset(&mut self, offset: u64) -> &mut Self {
        self.chain(|q| q.offset(offset))
    }

    pub fn group_by(&mut self, column: impl Into<String>) -> &mut Self {
        self.chain(|q| q.group_by(column))
    }

    pub fn having(&mut self, sql: impl Into<String>, values: Vec<Value>) -> &mut Self {
        self.chain(|q| q.having(sql, values))
    }

    pub fn distinct(&mut self) -> &mut Self {
        self.chain(Query::distinct)
    }

    pub fn joins(&mut self, sql: impl Into<String>, values: Vec<Value>) -> &mut Self {
        self.chain(|q| q.joins(sql, values))
    }

    // ---- terminal methods --------------------------------------------------

    /// First row ordered by primary key ascending, `Ok(None)` when absent
    pub async fn first(&mut self) -> Result<Option<E::Model>> {
        let query = self.checked_take()?.order_by(E::primary_key(), Order::Asc).limit(1);
        self.fetch_one(query).await
    }

    /// Last row ordered by primary key descending, `Ok(None)` when absent
    pub async fn last(&mut self) -> Result<Option<E::Model>> {
        let query = self.checked_take()?.order_by(E::primary_key(), Order::Desc).limit(1);
        self.fetch_one(query).await
    }

    /// One row with no implicit ordering, `Ok(None)` when absent
    pub async fn one(&mut self) -> Result<Option<E::Model>> {
        let query = self.checked_take()?.limit(1);
        self.fetch_one(query).await
    }

    async fn fetch_one(&self, query: Query) -> Result<Option<E::Model>> {
        let (sql, params) = query.build_select(E::table_name());
        tracing::trace!("SQL: {}", sql);
        let mut rows = self.conn.query(&sql, params).await?;
        match rows.next().await? {
            Some(row) => Ok(Some(E::Model::from_row(&row)?)),
            None => Ok(None),
        }
    }

    /// Every matching row
    pub async fn all(&mut self) -> Result<Vec<E::Model>> {
        self.list(()).await
    }

    /// Matching rows with at most one optional limit
    ///
    /// ```ignore
    /// repo.all().await?;                 // no limit
    /// repo.list(10u64).await?;           // LIMIT 10
    /// repo.list(vec![10, 20]).await?;    // Err(InvalidArgument)
    /// ```
    pub async fn list<L: Into<LimitArgs>>(&mut self, limit: L) -> Result<Vec<E::Model>> {
        let mut query = self.checked_take()?;
        match limit.into() {
            LimitArgs::None => {}
            LimitArgs::One(limit) => query = query.limit(limit),
            LimitArgs::Many(count) => {
                return Err(Error::InvalidArgument(format!(
                    "list accepts at most one limit value, got {}",
                    count
                )));
            }
        }
        let (sql, params) = query.build_select(E::table_name());
        fetch_all::<E>(&self.conn, &sql, params).await
    }

    /// Count of matching rows
    pub async fn count(&mut self) -> Result<u64> {
        let query = self.checked_take()?;
        let (sql, params) = query.build_count(E::table_name());
        fetch_count(&self.conn, &sql, params).await
    }

    /// One page plus total-count bookkeeping; positional form
    pub async fn paginate(&mut self, page_no: u64, page_size: u64) -> Result<PageResult<E::Model>> {
        self.paginate_with(PageQuery::new(page_no, page_size)).await
    }

    /// One page plus total-count bookkeeping; configuration-object form
    pub async fn paginate_with(&mut self, page: PageQuery) -> Result<PageResult<E::Model>> {
        let query = self.take_query();
        paginate_query::<E>(&self.conn, &query, &page).await
    }

    /// INSERT the model
    ///
    /// The primary-key column is omitted when it auto-increments and the
    /// model's value for it is zero-valued, letting the database assign it
    /// (see [`ExecResult::last_insert_id`]).
    pub async fn create(&mut self, model: &E::Model) -> Result<ExecResult> {
        let _ = self.take_query();

        let mut columns = Vec::new();
        let mut params = Vec::new();
        for (column, value) in model.to_row() {
            if column == E::primary_key() && E::primary_key_auto_increment() && is_zero_value(&value) {
                continue;
            }
            columns.push(column);
            params.push(value);
        }

        let sql = if columns.is_empty() {
            format!("INSERT INTO {} DEFAULT VALUES", E::table_name())
        } else {
            let placeholders: Vec<&str> = columns.iter().map(|_| "?").collect();
            format!("INSERT INTO {} ({}) VALUES ({})", E::table_name(), columns.join(", "), placeholders.join(", "))
        };
        tracing::debug!("Insert SQL: {}", sql);

        let rows_affected = self.conn.execute(&sql, params).await?;
        Ok(ExecResult { rows_affected, last_insert_id: self.conn.last_insert_rowid() })
    }

    /// INSERT when the primary key is zero-valued, otherwise a full-row
    /// UPDATE by primary key (zero values included)
    pub async fn save(&mut self, model: &E::Model) -> Result<ExecResult> {
        let pk_value = model.primary_key_value();
        if is_zero_value(&pk_value) {
            return self.create(model).await;
        }

        let _ = self.take_query();
        let sets: Vec<(String, Value)> = model
            .to_row()
            .into_iter()
            .filter(|(column, _)| *column != E::primary_key())
            .map(|(column, value)| (column.to_string(), value))
            .collect();

        let query = Query::new().eq(E::primary_key(), pk_value);
        let (sql, params) = query.build_update(E::table_name(), &sets)?;
        tracing::debug!("Save SQL: {}", sql);

        let rows_affected = self.conn.execute(&sql, params).await?;
        Ok(ExecResult { rows_affected, last_insert_id: self.conn.last_insert_rowid() })
    }

    /// UPDATE a single column over the current predicates, zero values
    /// included
    pub async fn update(&mut self, column: &str, value: impl IntoValue) -> Result<ExecResult> {
        self.updates(Setter::new().set(column, value)).await
    }

    /// Partial UPDATE over the current predicates
    ///
    /// Accepts a model reference (zero-valued and primary-key columns are
    /// skipped) or a [`Setter`] (every entry sent verbatim).
    pub async fn updates<S: IntoSetValues>(&mut self, values: S) -> Result<ExecResult> {
        let query = self.checked_take()?;
        let sets = values.into_set_values();
        let (sql, params) = query.build_update(E::table_name(), &sets)?;
        tracing::debug!("Update SQL: {}", sql);

        let rows_affected = self.conn.execute(&sql, params).await?;
        Ok(ExecResult { rows_affected, last_insert_id: self.conn.last_insert_rowid() })
    }

    /// Hard DELETE over the current predicates, optionally narrowed by
    /// primary-key ids
    ///
    /// # Warning
    ///
    /// With neither predicates nor ids this deletes every row in the table.
    pub async fn delete(&mut self, ids: impl IntoInValues) -> Result<ExecResult> {
        let mut query = self.checked_take()?;
        let ids = ids.into_in_values();
        if !ids.is_empty() {
            query = query.is_in(E::primary_key(), ids);
        }
        let (sql, params) = query.build_delete(E::table_name());
        tracing::debug!("Delete SQL: {}", sql);

        let rows_affected = self.conn.execute(&sql, params).await?;
        Ok(ExecResult { rows_affected, last_insert_id: self.conn.last_insert_rowid() })
    }

    /// Soft delete: set the entity's soft-delete column to the current
    /// timestamp instead of removing rows
    pub async fn delete_soft(&mut self, ids: impl IntoInValues) -> Result<ExecResult> {
        let Some(column) = E::soft_delete_column() else {
            let _ = self.take_query();
            return Err(Error::InvalidArgument(format!(
                "{} declares no soft delete column",
                E::table_name()
            )));
        };

        let mut query = self.checked_take()?;
        let ids = ids.into_in_values();
        if !ids.is_empty() {
            query = query.is_in(E::primary_key(), ids);
        }

        let mut sql = format!("UPDATE {} SET {} = CURRENT_TIMESTAMP", E::table_name(), column);
        let mut params = Vec::new();
        if let Some((where_sql, where_params)) = query.render_where() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_sql);
            params.extend(where_params);
        }
        tracing::debug!("Soft delete SQL: {}", sql);

        let rows_affected = self.conn.execute(&sql, params).await?;
        Ok(ExecResult { rows_affected, last_insert_id: self.conn.last_insert_rowid() })
    }

    /// Scoped transaction: COMMIT on `Ok`, ROLLBACK on `Err`, no retry
    ///
    /// # Example
    ///
    /// ```ignore
    /// repo.transaction(|conn| {
    ///     let conn = conn.clone();
    ///     Box::pin(async move {
    ///         conn.execute("INSERT INTO users (name) VALUES (?)", vec![Value::Text("a".into())]).await?;
    ///         conn.execute("INSERT INTO users (name) VALUES (?)", vec![Value::Text("b".into())]).await?;
    ///         Ok(())
    ///     })
    /// })
    /// .await?;
    /// ```
    pub async fn transaction<T, F>(&mut self, f: F) -> Result<T>
    where
        F: for<'c> FnOnce(&'c Connection) -> TxFuture<'c, T>,
    {
        self.reset();
        self.conn.execute_batch("BEGIN").await?;
        match f(&self.conn).await {
            Ok(value) => {
                self.conn.execute_batch("COMMIT").await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = self.conn.execute_batch("ROLLBACK").await {
                    tracing::warn!("Rollback failed: {}", rollback_err);
                }
                Err(err)
            }
        }
    }

    /// Execute a raw statement, returning the affected row count
    pub async fn exec(&mut self, sql: &str, params: Vec<Value>) -> Result<ExecResult> {
        self.reset();
        tracing::debug!("Exec SQL: {}", sql);
        let rows_affected = self.conn.execute(sql, params).await?;
        Ok(ExecResult { rows_affected, last_insert_id: self.conn.last_insert_rowid() })
    }

    /// Run a raw query and decode the rows as models
    pub async fn raw(&mut self, sql: &str, params: Vec<Value>) -> Result<Vec<E::Model>> {
        self.reset();
        fetch_all::<E>(&self.conn, sql, params).await
    }
}

pub(crate) async fn fetch_all<E: EntityTrait>(
    conn: &Connection,
    sql: &str,
    params: Vec<Value>,
) -> Result<Vec<E::Model>> {
    tracing::trace!("SQL: {}", sql);
    tracing::trace!("Params: {:?}", params);

    let mut rows = conn.query(sql, params).await?;
    let mut models = Vec::new();
    while let Some(row) = rows.next().await? {
        models.push(E::Model::from_row(&row)?);
    }
    Ok(models)
}

pub(crate) async fn fetch_count(conn: &Connection, sql: &str, params: Vec<Value>) -> Result<u64> {
    tracing::trace!("SQL: {}", sql);

    let mut rows = conn.query(sql, params).await?;
    match rows.next().await? {
        Some(row) => match row.get_value(0)? {
            Value::Integer(count) => Ok(count.max(0) as u64),
            _ => Ok(0),
        },
        None => Ok(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_args_from_unit() {
        assert_eq!(LimitArgs::from(()), LimitArgs::None);
    }

    #[test]
    fn test_limit_args_from_integer() {
        assert_eq!(LimitArgs::from(5u64), LimitArgs::One(5));
    }

    #[test]
    fn test_limit_args_from_empty_vec() {
        assert_eq!(LimitArgs::from(Vec::<u64>::new()), LimitArgs::None);
    }

    #[test]
    fn test_limit_args_from_single_element_vec() {
        assert_eq!(LimitArgs::from(vec![7u64]), LimitArgs::One(7));
    }

    #[test]
    fn test_limit_args_from_multiple_elements() {
        assert_eq!(LimitArgs::from(vec![1u64, 2]), LimitArgs::Many(2));
    }

    #[test]
    fn test_limit_args_from_slice() {
        assert_eq!(LimitArgs::from([1u64, 2, 3].as_slice()), LimitArgs::Many(3));
    }

    #[test]
    fn test_exec_result_default() {
        let result = ExecResult::default();
        assert_eq!(result.rows_affected, 0);
        assert_eq!(result.last_insert_id, 0);
    }
}
