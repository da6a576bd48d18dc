//! Ordered collection of fields passed to a function for one invocation.

use crate::value::Value;

/// A row of possibly absent field values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tuple {
    fields: Vec<Option<Value>>,
}

impl Tuple {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tuple where every field is present.
    pub fn from_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        values.into_iter().map(|v| Some(v.into())).collect()
    }

    /// Number of fields, including absent ones.
    pub fn size(&self) -> usize {
        self.fields.len()
    }

    /// Field `index`, or `None` if the field is absent or out of range.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.fields.get(index).and_then(Option::as_ref)
    }

    pub fn append(&mut self, value: Option<Value>) {
        self.fields.push(value);
    }

    pub fn fields(&self) -> &[Option<Value>] {
        &self.fields
    }
}

impl From<Vec<Option<Value>>> for Tuple {
    fn from(fields: Vec<Option<Value>>) -> Self {
        Self { fields }
    }
}

impl FromIterator<Option<Value>> for Tuple {
    fn from_iter<T: IntoIterator<Item = Option<Value>>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
