use crate::error::Error;
use crate::error::Result;
use crate::query::predicate::Combinator;
use crate::query::predicate::Order;
use crate::query::predicate::OrderBy;
use crate::query::predicate::Predicate;
use crate::query::predicate::render_fragments;
use crate::value::IntoInValues;
use crate::value::IntoValue;
use crate::value::Value;
use crate::value::normalize_in_scalar;

/// Accumulating query state: predicates, ordering, projection, joins,
/// grouping, limit and offset
///
/// `Query` is a value builder; every call consumes and returns it. A
/// [`Repository`](crate::Repository) owns one as its working state, and a
/// fresh `Query` is the sub-builder handed to grouping closures. Builder
/// calls never fail: the first invalid call (for example an empty IN
/// sequence) is recorded and reported by the next terminal method, before
/// any SQL executes.
///
/// # Example
///
/// ```ignore
/// let query = Query::new()
///     .eq("status", "active")
///     .where_group(|g| g.gt("age", 18).or_eq("vip", true))
///     .order_by_desc("created_at")
///     .limit(10);
/// let (sql, params) = query.build_select("users");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Query {
    predicates: Vec<(Combinator, Predicate)>,
    orders:     Vec<OrderBy>,
    columns:    Option<Vec<String>>,
    joins:      Vec<Predicate>,
    group_by:   Vec<String>,
    having:     Option<Predicate>,
    distinct:   bool,
    limit:      Option<u64>,
    offset:     Option<u64>,
    pending:    Option<String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, combinator: Combinator, predicate: Predicate) -> Self {
        self.predicates.push((combinator, predicate));
        self
    }

    fn defer(mut self, message: String) -> Self {
        if self.pending.is_none() {
            self.pending = Some(message);
        }
        self
    }

    /// The first invalid builder call recorded on this state, if any
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    // ---- predicate surface -------------------------------------------------

    pub fn eq(self, column: &str, value: impl IntoValue) -> Self {
        self.push(Combinator::And, Predicate::eq(column, value))
    }

    pub fn or_eq(self, column: &str, value: impl IntoValue) -> Self {
        self.push(Combinator::Or, Predicate::eq(column, value))
    }

    pub fn neq(self, column: &str, value: impl IntoValue) -> Self {
        self.push(Combinator::And, Predicate::neq(column, value))
    }

    pub fn gt(self, column: &str, value: impl IntoValue) -> Self {
        self.push(Combinator::And, Predicate::gt(column, value))
    }

    pub fn ge(self, column: &str, value: impl IntoValue) -> Self {
        self.push(Combinator::And, Predicate::ge(column, value))
    }

    pub fn lt(self, column: &str, value: impl IntoValue) -> Self {
        self.push(Combinator::And, Predicate::lt(column, value))
    }

    pub fn le(self, column: &str, value: impl IntoValue) -> Self {
        self.push(Combinator::And, Predicate::le(column, value))
    }

    pub fn like(self, column: &str, pattern: impl Into<String>) -> Self {
        self.push(Combinator::And, Predicate::like(column, pattern))
    }

    pub fn like_left(self, column: &str, pattern: impl Into<String>) -> Self {
        self.push(Combinator::And, Predicate::like_left(column, pattern))
    }

    pub fn like_right(self, column: &str, pattern: impl Into<String>) -> Self {
        self.push(Combinator::And, Predicate::like_right(column, pattern))
    }

    pub fn not_like(self, column: &str, pattern: impl Into<String>) -> Self {
        self.push(Combinator::And, Predicate::not_like(column, pattern))
    }

    pub fn is_null(self, column: &str) -> Self {
        self.push(Combinator::And, Predicate::is_null(column))
    }

    pub fn is_not_null(self, column: &str) -> Self {
        self.push(Combinator::And, Predicate::is_not_null(column))
    }

    pub fn between(self, column: &str, low: impl IntoValue, high: impl IntoValue) -> Self {
        self.push(Combinator::And, Predicate::between(column, low, high))
    }

    pub fn not_between(self, column: &str, low: impl IntoValue, high: impl IntoValue) -> Self {
        self.push(Combinator::And, Predicate::not_between(column, low, high))
    }

    pub fn find_in_set(self, column: &str, value: impl IntoValue) -> Self {
        self.push(Combinator::And, Predicate::find_in_set(column, value))
    }

    /// Three-argument predicate form: `column operator ?`
    ///
    /// An operator that case-insensitively equals `IN` delegates to the
    /// IN-normalization path instead: a comma-separated string value splits
    /// into text tokens, any other scalar becomes a one-element list.
    pub fn where_op(self, column: &str, operator: &str, value: impl IntoValue) -> Self {
        self.op(Combinator::And, column, operator, value)
    }

    pub fn or_op(self, column: &str, operator: &str, value: impl IntoValue) -> Self {
        self.op(Combinator::Or, column, operator, value)
    }

    fn op(self, combinator: Combinator, column: &str, operator: &str, value: impl IntoValue) -> Self {
        if operator.trim().eq_ignore_ascii_case("in") {
            let values = normalize_in_scalar(value.into_value());
            return self.push_in(combinator, column, values, false);
        }
        self.push(combinator, Predicate::compare(column, operator, value))
    }

    /// Raw parameterized fragment, AND-combined
    pub fn where_raw(self, sql: impl Into<String>, values: Vec<Value>) -> Self {
        self.push(Combinator::And, Predicate::raw(sql, values))
    }

    /// Raw parameterized fragment, OR-combined
    pub fn or_raw(self, sql: impl Into<String>, values: Vec<Value>) -> Self {
        self.push(Combinator::Or, Predicate::raw(sql, values))
    }

    pub fn is_in(self, column: &str, values: impl IntoInValues) -> Self {
        let values = values.into_in_values();
        self.push_in(Combinator::And, column, values, false)
    }

    pub fn or_in(self, column: &str, values: impl IntoInValues) -> Self {
        let values = values.into_in_values();
        self.push_in(Combinator::Or, column, values, false)
    }

    pub fn not_in(self, column: &str, values: impl IntoInValues) -> Self {
        let values = values.into_in_values();
        self.push_in(Combinator::And, column, values, true)
    }

    fn push_in(self, combinator: Combinator, column: &str, values: Vec<Value>, negated: bool) -> Self {
        if values.is_empty() {
            return self.defer(format!("IN predicate on {} requires at least one value", column));
        }
        let predicate = if negated { Predicate::not_in(column, values) } else { Predicate::is_in(column, values) };
        self.push(combinator, predicate)
    }

    /// Nested grouping, AND-combined
    ///
    /// The closure receives a fresh, empty sub-builder and returns it; the
    /// fragments it accumulated are wrapped in parentheses as one group and
    /// combined into this state. Fragments registered inside the closure
    /// never appear in this state's list directly. An empty group is a
    /// no-op. Ordering, projection, limit and offset set on the sub-builder
    /// are discarded.
    pub fn where_group(self, f: impl FnOnce(Query) -> Query) -> Self {
        self.group(Combinator::And, f)
    }

    /// Nested grouping, OR-combined
    pub fn or_group(self, f: impl FnOnce(Query) -> Query) -> Self {
        self.group(Combinator::Or, f)
    }

    fn group(mut self, combinator: Combinator, f: impl FnOnce(Query) -> Query) -> Self {
        let sub = f(Query::new());
        if let Some(message) = sub.pending {
            self = self.defer(message);
        }
        match Predicate::group(&sub.predicates) {
            Some(predicate) => self.push(combinator, predicate),
            None => self,
        }
    }

    // ---- non-predicate state -----------------------------------------------

    /// Restrict the projection to the given columns (default `*`)
    pub fn select<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, direction: Order) -> Self {
        self.orders.push(OrderBy { column: column.into(), direction });
        self
    }

    pub fn order_by_asc(self, column: impl Into<String>) -> Self {
        self.order_by(column, Order::Asc)
    }

    pub fn order_by_desc(self, column: impl Into<String>) -> Self {
        self.order_by(column, Order::Desc)
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn group_by(mut self, column: impl Into<String>) -> Self {
        self.group_by.push(column.into());
        self
    }

    pub fn having(mut self, sql: impl Into<String>, values: Vec<Value>) -> Self {
        self.having = Some(Predicate::raw(sql, values));
        self
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Raw join fragment appended after the table, with its own parameters
    pub fn joins(mut self, sql: impl Into<String>, values: Vec<Value>) -> Self {
        self.joins.push(Predicate::raw(sql, values));
        self
    }

    // ---- rendering ---------------------------------------------------------

    pub(crate) fn render_where(&self) -> Option<(String, Vec<Value>)> {
        if self.predicates.is_empty() {
            return None;
        }
        Some(render_fragments(&self.predicates))
    }

    /// Render a SELECT over the accumulated state
    pub fn build_select(&self, table: &str) -> (String, Vec<Value>) {
        let mut sql = String::from("SELECT ");
        if self.distinct {
            sql.push_str("DISTINCT ");
        }
        match &self.columns {
            Some(columns) => sql.push_str(&columns.join(", ")),
            None => sql.push('*'),
        }
        sql.push_str(" FROM ");
        sql.push_str(table);

        let mut params = Vec::new();

        for join in &self.joins {
            sql.push(' ');
            sql.push_str(&join.sql);
            params.extend(join.values.iter().cloned());
        }

        if let Some((where_sql, where_params)) = self.render_where() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_sql);
            params.extend(where_params);
        }

        if !self.group_by.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&self.group_by.join(", "));
        }

        if let Some(having) = &self.having {
            sql.push_str(" HAVING ");
            sql.push_str(&having.sql);
            params.extend(having.values.iter().cloned());
        }

        if !self.orders.is_empty() {
            let order_parts: Vec<String> =
                self.orders.iter().map(|o| format!("{} {}", o.column, o.direction)).collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&order_parts.join(", "));
        }

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        if let Some(offset) = self.offset {
            sql.push_str(&format!(" OFFSET {}", offset));
        }

        (sql, params)
    }

    /// Render a COUNT over the same predicates, ignoring ordering, limit
    /// and offset
    pub fn build_count(&self, table: &str) -> (String, Vec<Value>) {
        let mut sql = format!("SELECT COUNT(*) FROM {}", table);
        let mut params = Vec::new();

        for join in &self.joins {
            sql.push(' ');
            sql.push_str(&join.sql);
            params.extend(join.values.iter().cloned());
        }

        if let Some((where_sql, where_params)) = self.render_where() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_sql);
            params.extend(where_params);
        }

        (sql, params)
    }

    /// Render an UPDATE setting `sets` over the accumulated predicates
    ///
    /// # Errors
    ///
    /// Returns [`Error::Query`] when `sets` is empty.
    pub fn build_update(&self, table: &str, sets: &[(String, Value)]) -> Result<(String, Vec<Value>)> {
        if sets.is_empty() {
            return Err(Error::Query("no columns to update".to_string()));
        }

        let set_parts: Vec<String> = sets.iter().map(|(column, _)| format!("{} = ?", column)).collect();
        let mut sql = format!("UPDATE {} SET {}", table, set_parts.join(", "));
        let mut params: Vec<Value> = sets.iter().map(|(_, value)| value.clone()).collect();

        if let Some((where_sql, where_params)) = self.render_where() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_sql);
            params.extend(where_params);
        }

        Ok((sql, params))
    }

    /// Render a DELETE over the accumulated predicates
    pub fn build_delete(&self, table: &str) -> (String, Vec<Value>) {
        let mut sql = format!("DELETE FROM {}", table);
        let mut params = Vec::new();

        if let Some((where_sql, where_params)) = self.render_where() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_sql);
            params.extend(where_params);
        }

        (sql, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_select_bare() {
        let (sql, params) = Query::new().build_select("users");
        assert_eq!(sql, "SELECT * FROM users");
        assert!(params.is_empty());
    }

    #[test]
    fn test_build_select_single_predicate() {
        let (sql, params) = Query::new().eq("id", 1).build_select("users");
        assert_eq!(sql, "SELECT * FROM users WHERE (id = ?)");
        assert_eq!(params, vec![Value::Integer(1)]);
    }

    #[test]
    fn test_build_select_multiple_predicates() {
        let (sql, params) = Query::new().eq("name", "Alice").gt("age", 18).build_select("users");
        assert_eq!(sql, "SELECT * FROM users WHERE (name = ?) AND (age > ?)");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_build_select_or_predicate() {
        let (sql, _) = Query::new().eq("name", "Alice").or_eq("name", "Bob").build_select("users");
        assert_eq!(sql, "SELECT * FROM users WHERE (name = ?) OR (name = ?)");
    }

    #[test]
    fn test_build_select_projection() {
        let (sql, _) = Query::new().select(["id", "name"]).build_select("users");
        assert_eq!(sql, "SELECT id, name FROM users");
    }

    #[test]
    fn test_build_select_distinct() {
        let (sql, _) = Query::new().distinct().select(["name"]).build_select("users");
        assert_eq!(sql, "SELECT DISTINCT name FROM users");
    }

    #[test]
    fn test_build_select_order_by() {
        let (sql, _) = Query::new().order_by_asc("name").order_by_desc("age").build_select("users");
        assert!(sql.contains("ORDER BY name ASC, age DESC"));
    }

    #[test]
    fn test_build_select_first_specified_order_is_primary() {
        let (sql, _) = Query::new().order_by_desc("age").order_by_asc("id").build_select("users");
        let age_pos = sql.find("age DESC").unwrap();
        let id_pos = sql.find("id ASC").unwrap();
        assert!(age_pos < id_pos);
    }

    #[test]
    fn test_build_select_limit_offset() {
        let (sql, _) = Query::new().limit(10).offset(20).build_select("users");
        assert!(sql.contains("LIMIT 10"));
        assert!(sql.contains("OFFSET 20"));
    }

    #[test]
    fn test_build_select_group_by_having() {
        let (sql, params) =
            Query::new().select(["age"]).group_by("age").having("COUNT(*) > ?", vec![Value::Integer(1)]).build_select("users");
        assert!(sql.contains("GROUP BY age"));
        assert!(sql.contains("HAVING COUNT(*) > ?"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_build_select_joins() {
        let (sql, params) = Query::new()
            .joins("JOIN orders ON orders.user_id = users.id AND orders.status = ?", vec![Value::Text("paid".to_string())])
            .eq("users.active", 1)
            .build_select("users");
        assert!(sql.contains("FROM users JOIN orders ON orders.user_id = users.id"));
        // join parameters come before predicate parameters
        assert_eq!(params[0], Value::Text("paid".to_string()));
        assert_eq!(params[1], Value::Integer(1));
    }

    #[test]
    fn test_build_select_clause_order() {
        let (sql, _) = Query::new()
            .limit(5)
            .eq("id", 1)
            .offset(10)
            .order_by_asc("name")
            .build_select("users");

        let where_pos = sql.find("WHERE").unwrap();
        let order_pos = sql.find("ORDER BY").unwrap();
        let limit_pos = sql.find("LIMIT").unwrap();
        let offset_pos = sql.find("OFFSET").unwrap();

        assert!(where_pos < order_pos);
        assert!(order_pos < limit_pos);
        assert!(limit_pos < offset_pos);
    }

    #[test]
    fn test_where_op_custom_operator() {
        let (sql, params) = Query::new().where_op("age", ">", 18).build_select("users");
        assert!(sql.contains("(age > ?)"));
        assert_eq!(params, vec![Value::Integer(18)]);
    }

    #[test]
    fn test_where_op_in_delegates_to_normalization() {
        let (sql, params) = Query::new().where_op("age", "IN", "21,23").build_select("users");
        assert!(sql.contains("age IN (?, ?)"));
        assert_eq!(params, vec![Value::Text("21".to_string()), Value::Text("23".to_string())]);
    }

    #[test]
    fn test_where_op_in_case_insensitive() {
        let (sql, _) = Query::new().where_op("age", "in", 21).build_select("users");
        assert!(sql.contains("age IN (?)"));
    }

    #[test]
    fn test_or_op() {
        let (sql, _) = Query::new().eq("a", 1).or_op("b", "<", 2).build_select("t");
        assert!(sql.contains("(a = ?) OR (b < ?)"));
    }

    #[test]
    fn test_where_raw_passthrough() {
        let (sql, params) =
            Query::new().where_raw("age > ? AND age < ?", vec![Value::Integer(18), Value::Integer(65)]).build_select("users");
        assert!(sql.contains("WHERE (age > ? AND age < ?)"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_where_raw_no_values() {
        let (sql, params) = Query::new().where_raw("deleted_at IS NULL", vec![]).build_select("users");
        assert!(sql.contains("WHERE (deleted_at IS NULL)"));
        assert!(params.is_empty());
    }

    #[test]
    fn test_is_in_comma_string() {
        let (sql, params) = Query::new().is_in("age", "21,23").build_select("users");
        assert!(sql.contains("age IN (?, ?)"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_is_in_vec() {
        let (sql, params) = Query::new().is_in("age", vec![20i64, 21]).build_select("users");
        assert!(sql.contains("age IN (?, ?)"));
        assert_eq!(params, vec![Value::Integer(20), Value::Integer(21)]);
    }

    #[test]
    fn test_not_in() {
        let (sql, _) = Query::new().not_in("id", vec![1i64, 2]).build_select("users");
        assert!(sql.contains("id NOT IN (?, ?)"));
    }

    #[test]
    fn test_or_in() {
        let (sql, _) = Query::new().eq("a", 1).or_in("id", vec![1i64, 2]).build_select("t");
        assert!(sql.contains("(a = ?) OR (id IN (?, ?))"));
    }

    #[test]
    fn test_is_in_empty_defers_error() {
        let query = Query::new().is_in("age", ());
        assert!(query.pending().is_some());
        assert!(query.pending().unwrap().contains("age"));
    }

    #[test]
    fn test_first_deferred_error_wins() {
        let query = Query::new().is_in("first", ()).is_in("second", ());
        assert!(query.pending().unwrap().contains("first"));
    }

    #[test]
    fn test_deferred_error_keeps_building() {
        let (sql, _) = Query::new().is_in("age", ()).eq("name", "x").build_select("users");
        assert!(sql.contains("(name = ?)"));
    }

    #[test]
    fn test_where_group_renders_parenthesized_group() {
        let (sql, params) = Query::new()
            .eq("a", 1)
            .eq("b", 2)
            .where_group(|g| g.eq("c", 3).eq("d", 4))
            .build_select("t");
        assert_eq!(sql, "SELECT * FROM t WHERE (a = ?) AND (b = ?) AND ((c = ?) AND (d = ?))");
        assert_eq!(params.len(), 4);
    }

    #[test]
    fn test_or_group_combines_with_or() {
        let (sql, _) = Query::new().eq("a", 1).or_group(|g| g.eq("c", 3).or_eq("d", 4)).build_select("t");
        assert_eq!(sql, "SELECT * FROM t WHERE (a = ?) OR ((c = ?) OR (d = ?))");
    }

    #[test]
    fn test_group_fragments_do_not_leak_into_parent() {
        let query = Query::new().eq("a", 1).where_group(|g| g.eq("c", 3));
        // one top-level fragment for `a`, one for the whole group
        assert_eq!(query.predicates.len(), 2);
    }

    #[test]
    fn test_empty_group_is_noop() {
        let (sql, _) = Query::new().eq("a", 1).where_group(|g| g).build_select("t");
        assert_eq!(sql, "SELECT * FROM t WHERE (a = ?)");
    }

    #[test]
    fn test_nested_groups() {
        let (sql, _) = Query::new()
            .eq("a", 1)
            .where_group(|g| g.eq("b", 2).or_group(|h| h.eq("c", 3).eq("d", 4)))
            .build_select("t");
        assert_eq!(sql, "SELECT * FROM t WHERE (a = ?) AND ((b = ?) OR ((c = ?) AND (d = ?)))");
    }

    #[test]
    fn test_group_deferred_error_propagates_to_parent() {
        let query = Query::new().where_group(|g| g.is_in("age", ()));
        assert!(query.pending().is_some());
    }

    #[test]
    fn test_build_count_ignores_order_limit_offset() {
        let query = Query::new().eq("age", 30).order_by_asc("name").limit(5).offset(10);
        let (sql, params) = query.build_count("users");
        assert_eq!(sql, "SELECT COUNT(*) FROM users WHERE (age = ?)");
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_build_count_bare() {
        let (sql, params) = Query::new().build_count("users");
        assert_eq!(sql, "SELECT COUNT(*) FROM users");
        assert!(params.is_empty());
    }

    #[test]
    fn test_build_update() {
        let sets = vec![("name".to_string(), Value::Text("Bob".to_string()))];
        let (sql, params) = Query::new().eq("id", 1).build_update("users", &sets).unwrap();
        assert_eq!(sql, "UPDATE users SET name = ? WHERE (id = ?)");
        assert_eq!(params, vec![Value::Text("Bob".to_string()), Value::Integer(1)]);
    }

    #[test]
    fn test_build_update_multiple_sets() {
        let sets = vec![
            ("name".to_string(), Value::Text("Bob".to_string())),
            ("age".to_string(), Value::Integer(0)),
        ];
        let (sql, params) = Query::new().build_update("users", &sets).unwrap();
        assert_eq!(sql, "UPDATE users SET name = ?, age = ?");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_build_update_no_sets_is_error() {
        let result = Query::new().eq("id", 1).build_update("users", &[]);
        assert!(result.is_err());
    }

    #[test]
    fn test_build_delete() {
        let (sql, params) = Query::new().eq("id", 1).build_delete("users");
        assert_eq!(sql, "DELETE FROM users WHERE (id = ?)");
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_build_delete_unfiltered() {
        let (sql, params) = Query::new().build_delete("users");
        assert_eq!(sql, "DELETE FROM users");
        assert!(params.is_empty());
    }

    #[test]
    fn test_convenience_predicates_render() {
        let (sql, _) = Query::new()
            .neq("a", 1)
            .ge("b", 2)
            .le("c", 3)
            .lt("d", 4)
            .between("e", 5, 6)
            .is_null("f")
            .build_select("t");
        assert!(sql.contains("(a != ?)"));
        assert!(sql.contains("(b >= ?)"));
        assert!(sql.contains("(c <= ?)"));
        assert!(sql.contains("(d < ?)"));
        assert!(sql.contains("(e BETWEEN ? AND ?)"));
        assert!(sql.contains("(f IS NULL)"));
    }

    #[test]
    fn test_like_variants_wrap_patterns() {
        let (_, params) = Query::new()
            .like("a", "x")
            .like_left("b", "y")
            .like_right("c", "z")
            .build_select("t");
        assert_eq!(params[0], Value::Text("%x%".to_string()));
        assert_eq!(params[1], Value::Text("%y".to_string()));
        assert_eq!(params[2], Value::Text("z%".to_string()));
    }

    #[test]
    fn test_query_clone_builds_identical_sql() {
        let query = Query::new().eq("id", 1).order_by_asc("name").limit(10);
        let cloned = query.clone();

        let (sql1, params1) = query.build_select("users");
        let (sql2, params2) = cloned.build_select("users");

        assert_eq!(sql1, sql2);
        assert_eq!(params1, params2);
    }

    #[test]
    fn test_query_default_is_empty() {
        let query = Query::default();
        assert!(query.pending().is_none());
        let (sql, _) = query.build_select("t");
        assert_eq!(sql, "SELECT * FROM t");
    }
}
