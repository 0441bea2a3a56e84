use crate::entity::EntityTrait;
use crate::entity::ModelTrait;
use crate::value::IntoValue;
use crate::value::Value;
use crate::value::is_zero_value;

/// Ordered column-to-value map for explicit partial updates
///
/// Every entry in a `Setter` is sent verbatim by
/// [`updates`](crate::Repository::updates), bypassing the skip-zero
/// semantics of whole-model updates. Re-setting a key overwrites its value
/// and keeps the position of the first insertion.
///
/// # Example
///
/// ```ignore
/// repo.eq("id", 1)
///     .updates(Setter::new().set("age", 0).set("name", "Bob"))
///     .await?;
/// ```
#[derive(Clone, Debug, Default)]
pub struct Setter {
    entries: Vec<(String, Value)>,
}

impl Setter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `column -> value`; returns the setter for chaining
    pub fn set(mut self, column: impl Into<String>, value: impl IntoValue) -> Self {
        let column = column.into();
        let value = value.into_value();
        match self.entries.iter_mut().find(|(existing, _)| *existing == column) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((column, value)),
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[(String, Value)] {
        &self.entries
    }
}

/// Input to [`updates`](crate::Repository::updates): either a [`Setter`]
/// (entries sent verbatim) or a model reference (zero-valued and
/// primary-key columns skipped)
pub trait IntoSetValues {
    fn into_set_values(self) -> Vec<(String, Value)>;
}

impl IntoSetValues for Setter {
    fn into_set_values(self) -> Vec<(String, Value)> {
        self.entries
    }
}

impl<M: ModelTrait> IntoSetValues for &M {
    fn into_set_values(self) -> Vec<(String, Value)> {
        let primary_key = <M::Entity as EntityTrait>::primary_key();
        self.to_row()
            .into_iter()
            .filter(|(column, value)| *column != primary_key && !is_zero_value(value))
            .map(|(column, value)| (column.to_string(), value))
            .collect()
    }
}
