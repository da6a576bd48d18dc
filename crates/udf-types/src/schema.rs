//! Static signature descriptions published by functions at plan time.

use crate::value::DataType;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Description of one field: an optional alias and its type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub alias: Option<String>,
    pub data_type: DataType,
}

impl FieldSchema {
    pub fn new(alias: Option<&str>, data_type: DataType) -> Self {
        Self {
            alias: alias.map(str::to_string),
            data_type,
        }
    }

    pub fn unnamed(data_type: DataType) -> Self {
        Self::new(None, data_type)
    }
}

impl Display for FieldSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "{alias}: {}", self.data_type),
            None => write!(f, "{}", self.data_type),
        }
    }
}

/// Ordered list of field schemas.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub fields: Vec<FieldSchema>,
}

impl Schema {
    /// A schema with a single field.
    pub fn new(field: FieldSchema) -> Self {
        Self {
            fields: vec![field],
        }
    }

    pub fn from_fields(fields: Vec<FieldSchema>) -> Self {
        Self { fields }
    }

    /// Whether a call with the given argument types matches this schema
    /// positionally.  No implicit casts are applied.
    pub fn accepts(&self, arg_types: &[DataType]) -> bool {
        self.fields.len() == arg_types.len()
            && self
                .fields
                .iter()
                .zip(arg_types)
                .all(|(field, ty)| field.data_type == *ty)
    }
}

impl Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (index, field) in self.fields.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{field}")?;
        }
        f.write_str("}")
    }
}

/// A function name paired with an input schema it accepts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuncSpec {
    pub name: String,
    pub input_schema: Schema,
}

impl FuncSpec {
    pub fn new(name: impl Into<String>, input_schema: Schema) -> Self {
        Self {
            name: name.into(),
            input_schema,
        }
    }
}

impl Display for FuncSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.input_schema)
    }
}
