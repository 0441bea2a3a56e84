use crate::value::IntoValue;
use crate::value::Value;

/// How a predicate fragment combines with its preceding siblings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator {
    And,

    Or,
}

impl std::fmt::Display for Combinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Combinator::And => write!(f, "AND"),
            Combinator::Or => write!(f, "OR"),
        }
    }
}

/// One comparison clause: a SQL fragment with `?` placeholders plus its values
#[derive(Clone, Debug)]
pub struct Predicate {
    pub(crate) sql:    String,
    pub(crate) values: Vec<Value>,
}

impl Predicate {
    pub fn compare(column: &str, operator: &str, value: impl IntoValue) -> Self {
        Self { sql: format!("{} {} ?", column, operator), values: vec![value.into_value()] }
    }

    pub fn eq(column: &str, value: impl IntoValue) -> Self {
        Self::compare(column, "=", value)
    }

    pub fn neq(column: &str, value: impl IntoValue) -> Self {
        Self::compare(column, "!=", value)
    }

    pub fn gt(column: &str, value: impl IntoValue) -> Self {
        Self::compare(column, ">", value)
    }

    pub fn ge(column: &str, value: impl IntoValue) -> Self {
        Self::compare(column, ">=", value)
    }

    pub fn lt(column: &str, value: impl IntoValue) -> Self {
        Self::compare(column, "<", value)
    }

    pub fn le(column: &str, value: impl IntoValue) -> Self {
        Self::compare(column, "<=", value)
    }

    pub fn like(column: &str, pattern: impl Into<String>) -> Self {
        Self { sql: format!("{} LIKE ?", column), values: vec![Value::Text(format!("%{}%", pattern.into()))] }
    }

    pub fn like_left(column: &str, pattern: impl Into<String>) -> Self {
        Self { sql: format!("{} LIKE ?", column), values: vec![Value::Text(format!("%{}", pattern.into()))] }
    }

    pub fn like_right(column: &str, pattern: impl Into<String>) -> Self {
        Self { sql: format!("{} LIKE ?", column), values: vec![Value::Text(format!("{}%", pattern.into()))] }
    }

    pub fn not_like(column: &str, pattern: impl Into<String>) -> Self {
        Self { sql: format!("{} NOT LIKE ?", column), values: vec![Value::Text(format!("%{}%", pattern.into()))] }
    }

    pub fn is_null(column: &str) -> Self {
        Self { sql: format!("{} IS NULL", column), values: vec![] }
    }

    pub fn is_not_null(column: &str) -> Self {
        Self { sql: format!("{} IS NOT NULL", column), values: vec![] }
    }

    pub fn between(column: &str, low: impl IntoValue, high: impl IntoValue) -> Self {
        Self {
            sql:    format!("{} BETWEEN ? AND ?", column),
            values: vec![low.into_value(), high.into_value()],
        }
    }

    pub fn not_between(column: &str, low: impl IntoValue, high: impl IntoValue) -> Self {
        Self {
            sql:    format!("{} NOT BETWEEN ? AND ?", column),
            values: vec![low.into_value(), high.into_value()],
        }
    }

    /// `FIND_IN_SET(?, column)` - requires a backend shipping that function
    pub fn find_in_set(column: &str, value: impl IntoValue) -> Self {
        Self { sql: format!("FIND_IN_SET(?, {})", column), values: vec![value.into_value()] }
    }

    /// `column IN (?, ...)` over an already-normalized value sequence
    pub fn is_in(column: &str, values: Vec<Value>) -> Self {
        let placeholders: Vec<&str> = values.iter().map(|_| "?").collect();
        Self { sql: format!("{} IN ({})", column, placeholders.join(", ")), values }
    }

    pub fn not_in(column: &str, values: Vec<Value>) -> Self {
        let placeholders: Vec<&str> = values.iter().map(|_| "?").collect();
        Self { sql: format!("{} NOT IN ({})", column, placeholders.join(", ")), values }
    }

    pub fn raw(sql: impl Into<String>, values: Vec<Value>) -> Self {
        Self { sql: sql.into(), values }
    }

    /// Collapse a fragment list into one parenthesized group
    ///
    /// Returns `None` for an empty list: an empty group contributes nothing
    /// to the parent.
    pub fn group(items: &[(Combinator, Predicate)]) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        let (sql, values) = render_fragments(items);
        Some(Self { sql, values })
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

/// Render an ordered fragment list: each fragment parenthesized, joined by
/// its own combinator. The first fragment's combinator is not rendered.
pub(crate) fn render_fragments(items: &[(Combinator, Predicate)]) -> (String, Vec<Value>) {
    let mut sql = String::new();
    let mut values = Vec::new();

    for (i, (combinator, predicate)) in items.iter().enumerate() {
        if i > 0 {
            sql.push(' ');
            sql.push_str(&combinator.to_string());
            sql.push(' ');
        }
        sql.push('(');
        sql.push_str(&predicate.sql);
        sql.push(')');
        values.extend(predicate.values.iter().cloned());
    }

    (sql, values)
}

/// Sort direction for an ordering clause
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    Asc,

    Desc,
}

impl std::fmt::Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Order::Asc => write!(f, "ASC"),
            Order::Desc => write!(f, "DESC"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct OrderBy {
    pub(crate) column:    String,
    pub(crate) direction: Order,
}

impl OrderBy {
    pub fn asc(column: impl Into<String>) -> Self {
        Self { column: column.into(), direction: Order::Asc }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self { column: column.into(), direction: Order::Desc }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicate_eq() {
        let predicate = Predicate::eq("id", 42);
        assert_eq!(predicate.sql(), "id = ?");
        assert_eq!(predicate.values(), &[Value::Integer(42)]);
    }

    #[test]
    fn test_predicate_eq_with_string() {
        let predicate = Predicate::eq("name", "Alice");
        assert_eq!(predicate.sql(), "name = ?");
        assert_eq!(predicate.values()[0], Value::Text("Alice".to_string()));
    }

    #[test]
    fn test_predicate_neq() {
        let predicate = Predicate::neq("id", 42);
        assert_eq!(predicate.sql(), "id != ?");
    }

    #[test]
    fn test_predicate_gt() {
        let predicate = Predicate::gt("age", 18);
        assert_eq!(predicate.sql(), "age > ?");
        assert_eq!(predicate.values()[0], Value::Integer(18));
    }

    #[test]
    fn test_predicate_ge() {
        assert_eq!(Predicate::ge("age", 18).sql(), "age >= ?");
    }

    #[test]
    fn test_predicate_lt() {
        assert_eq!(Predicate::lt("age", 65).sql(), "age < ?");
    }

    #[test]
    fn test_predicate_le() {
        assert_eq!(Predicate::le("age", 65).sql(), "age <= ?");
    }

    #[test]
    fn test_predicate_compare_custom_operator() {
        let predicate = Predicate::compare("age", "<>", 30);
        assert_eq!(predicate.sql(), "age <> ?");
    }

    #[test]
    fn test_predicate_like_wraps_both_sides() {
        let predicate = Predicate::like("name", "li");
        assert_eq!(predicate.sql(), "name LIKE ?");
        assert_eq!(predicate.values()[0], Value::Text("%li%".to_string()));
    }

    #[test]
    fn test_predicate_like_left() {
        let predicate = Predicate::like_left("name", "ce");
        assert_eq!(predicate.values()[0], Value::Text("%ce".to_string()));
    }

    #[test]
    fn test_predicate_like_right() {
        let predicate = Predicate::like_right("name", "Al");
        assert_eq!(predicate.values()[0], Value::Text("Al%".to_string()));
    }

    #[test]
    fn test_predicate_not_like() {
        let predicate = Predicate::not_like("name", "Bob");
        assert_eq!(predicate.sql(), "name NOT LIKE ?");
        assert_eq!(predicate.values()[0], Value::Text("%Bob%".to_string()));
    }

    #[test]
    fn test_predicate_is_null() {
        let predicate = Predicate::is_null("email");
        assert_eq!(predicate.sql(), "email IS NULL");
        assert!(predicate.values().is_empty());
    }

    #[test]
    fn test_predicate_is_not_null() {
        let predicate = Predicate::is_not_null("email");
        assert_eq!(predicate.sql(), "email IS NOT NULL");
        assert!(predicate.values().is_empty());
    }

    #[test]
    fn test_predicate_between() {
        let predicate = Predicate::between("age", 18, 65);
        assert_eq!(predicate.sql(), "age BETWEEN ? AND ?");
        assert_eq!(predicate.values(), &[Value::Integer(18), Value::Integer(65)]);
    }

    #[test]
    fn test_predicate_not_between() {
        let predicate = Predicate::not_between("age", 0, 18);
        assert_eq!(predicate.sql(), "age NOT BETWEEN ? AND ?");
        assert_eq!(predicate.values().len(), 2);
    }

    #[test]
    fn test_predicate_find_in_set() {
        let predicate = Predicate::find_in_set("tags", "rust");
        assert_eq!(predicate.sql(), "FIND_IN_SET(?, tags)");
        assert_eq!(predicate.values()[0], Value::Text("rust".to_string()));
    }

    #[test]
    fn test_predicate_is_in() {
        let predicate = Predicate::is_in("id", vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]);
        assert_eq!(predicate.sql(), "id IN (?, ?, ?)");
        assert_eq!(predicate.values().len(), 3);
    }

    #[test]
    fn test_predicate_is_in_single() {
        let predicate = Predicate::is_in("id", vec![Value::Integer(42)]);
        assert_eq!(predicate.sql(), "id IN (?)");
    }

    #[test]
    fn test_predicate_not_in() {
        let predicate = Predicate::not_in("id", vec![Value::Integer(1), Value::Integer(2)]);
        assert_eq!(predicate.sql(), "id NOT IN (?, ?)");
    }

    #[test]
    fn test_predicate_raw() {
        let predicate = Predicate::raw("id > ? AND age < ?", vec![Value::Integer(5), Value::Integer(30)]);
        assert_eq!(predicate.sql(), "id > ? AND age < ?");
        assert_eq!(predicate.values().len(), 2);
    }

    #[test]
    fn test_predicate_raw_no_values() {
        let predicate = Predicate::raw("deleted_at IS NULL", vec![]);
        assert!(predicate.values().is_empty());
    }

    #[test]
    fn test_render_fragments_single() {
        let items = vec![(Combinator::And, Predicate::eq("a", 1))];
        let (sql, values) = render_fragments(&items);
        assert_eq!(sql, "(a = ?)");
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn test_render_fragments_and_or() {
        let items = vec![
            (Combinator::And, Predicate::eq("a", 1)),
            (Combinator::And, Predicate::eq("b", 2)),
            (Combinator::Or, Predicate::eq("c", 3)),
        ];
        let (sql, values) = render_fragments(&items);
        assert_eq!(sql, "(a = ?) AND (b = ?) OR (c = ?)");
        assert_eq!(values, vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]);
    }

    #[test]
    fn test_render_fragments_first_combinator_not_rendered() {
        let items = vec![(Combinator::Or, Predicate::eq("a", 1))];
        let (sql, _) = render_fragments(&items);
        assert_eq!(sql, "(a = ?)");
    }

    #[test]
    fn test_group_wraps_fragments() {
        let items =
            vec![(Combinator::And, Predicate::eq("c", 3)), (Combinator::And, Predicate::eq("d", 4))];
        let group = Predicate::group(&items).unwrap();
        assert_eq!(group.sql(), "(c = ?) AND (d = ?)");
        assert_eq!(group.values().len(), 2);
    }

    #[test]
    fn test_group_empty_is_none() {
        assert!(Predicate::group(&[]).is_none());
    }

    #[test]
    fn test_group_value_order_follows_fragment_order() {
        let items =
            vec![(Combinator::And, Predicate::eq("a", 1)), (Combinator::Or, Predicate::eq("b", 2))];
        let group = Predicate::group(&items).unwrap();
        assert_eq!(group.values(), &[Value::Integer(1), Value::Integer(2)]);
    }

    #[test]
    fn test_combinator_display() {
        assert_eq!(format!("{}", Combinator::And), "AND");
        assert_eq!(format!("{}", Combinator::Or), "OR");
    }

    #[test]
    fn test_order_display() {
        assert_eq!(format!("{}", Order::Asc), "ASC");
        assert_eq!(format!("{}", Order::Desc), "DESC");
    }

    #[test]
    fn test_order_by_asc() {
        let order_by = OrderBy::asc("name");
        assert_eq!(order_by.column, "name");
        assert_eq!(order_by.direction, Order::Asc);
    }

    #[test]
    fn test_order_by_desc() {
        let order_by = OrderBy::desc("age");
        assert_eq!(order_by.column, "age");
        assert_eq!(order_by.direction, Order::Desc);
    }

    #[test]
    fn test_predicate_clone() {
        let predicate = Predicate::eq("id", 42);
        let cloned = predicate.clone();
        assert_eq!(cloned.sql(), "id = ?");
        assert_eq!(cloned.values()[0], Value::Integer(42));
    }
}
