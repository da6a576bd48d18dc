//! Value is a dynamically-typed object that can represent the contents of a
//! single tuple field.

use crate::tuple::Tuple;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Display};

/// The type of a [`Value`], as seen by the host's type checker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Boolean,
    Int,
    Long,
    Float,
    Double,
    CharArray,
    ByteArray,
    DateTime,
    Tuple,
    Bag,
    Map,
}

impl DataType {
    /// Host type name, as used in scripts and in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Boolean => "boolean",
            DataType::Int => "int",
            DataType::Long => "long",
            DataType::Float => "float",
            DataType::Double => "double",
            DataType::CharArray => "chararray",
            DataType::ByteArray => "bytearray",
            DataType::DateTime => "datetime",
            DataType::Tuple => "tuple",
            DataType::Bag => "bag",
            DataType::Map => "map",
        }
    }

    /// Type name of a possibly absent field.
    pub fn find_type_name(value: Option<&Value>) -> &'static str {
        match value {
            None => "NULL",
            Some(value) => value.data_type().name(),
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A non-null field value.
///
/// Absent (`NULL`) fields are represented as `None` by the containing
/// [`Tuple`], so every variant here carries data.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Boolean(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    CharArray(String),
    ByteArray(Vec<u8>),
    DateTime(DateTime<FixedOffset>),
    Tuple(Tuple),
    Bag(Vec<Tuple>),
    Map(BTreeMap<String, Option<Value>>),
}

impl Value {
    /// Get the runtime type of a value.
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Boolean(_) => DataType::Boolean,
            Value::Int(_) => DataType::Int,
            Value::Long(_) => DataType::Long,
            Value::Float(_) => DataType::Float,
            Value::Double(_) => DataType::Double,
            Value::CharArray(_) => DataType::CharArray,
            Value::ByteArray(_) => DataType::ByteArray,
            Value::DateTime(_) => DataType::DateTime,
            Value::Tuple(_) => DataType::Tuple,
            Value::Bag(_) => DataType::Bag,
            Value::Map(_) => DataType::Map,
        }
    }

    /// The string contents of a chararray, `None` for every other type.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::CharArray(s) => Some(s),
            _ => None,
        }
    }
}

// Fields are rendered the way a tab-separated storage writer would print
// them; absent fields print as nothing.
fn fmt_field(f: &mut fmt::Formatter<'_>, field: &Option<Value>) -> fmt::Result {
    match field {
        None => Ok(()),
        Some(value) => write!(f, "{value}"),
    }
}

impl Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (index, field) in self.fields().iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            fmt_field(f, field)?;
        }
        f.write_str(")")
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Long(l) => write!(f, "{l}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Double(x) => write!(f, "{x}"),
            Value::CharArray(s) => f.write_str(s),
            Value::ByteArray(bytes) => f.write_str(&String::from_utf8_lossy(bytes)),
            Value::DateTime(dt) => f.write_str(&dt.to_rfc3339()),
            Value::Tuple(t) => write!(f, "{t}"),
            Value::Bag(tuples) => {
                f.write_str("{")?;
                for (index, t) in tuples.iter().enumerate() {
                    if index > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{t}")?;
                }
                f.write_str("}")
            }
            Value::Map(entries) => {
                f.write_str("[")?;
                for (index, (key, value)) in entries.iter().enumerate() {
                    if index > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{key}#")?;
                    fmt_field(f, value)?;
                }
                f.write_str("]")
            }
        }
    }
}

macro_rules! make_froms {
    ($type: ty, $variant: ident) => {
        impl From<$type> for Value {
            #[inline]
            fn from(value: $type) -> Self {
                Value::$variant(value)
            }
        }
    };
}

make_froms!(bool, Boolean);
make_froms!(i32, Int);
make_froms!(i64, Long);
make_froms!(f32, Float);
make_froms!(f64, Double);
make_froms!(String, CharArray);
make_froms!(Vec<u8>, ByteArray);
make_froms!(DateTime<FixedOffset>, DateTime);
make_froms!(Tuple, Tuple);
make_froms!(Vec<Tuple>, Bag);

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Value::CharArray(value.to_string())
    }
}

#[cfg(test)]
mod test {
    use super::{DataType, Value};
    use crate::Tuple;
    use chrono::DateTime;
    use std::collections::BTreeMap;

    #[test]
    fn type_names() {
        assert_eq!(Value::from(42).data_type().name(), "int");
        assert_eq!(Value::from(42i64).data_type().name(), "long");
        assert_eq!(Value::from(1.5f32).data_type().name(), "float");
        assert_eq!(Value::from(0.5).data_type().name(), "double");
        assert_eq!(Value::from("x").data_type().name(), "chararray");
        assert_eq!(Value::from(vec![1u8]).data_type().name(), "bytearray");
        assert_eq!(Value::from(true).data_type().name(), "boolean");
        assert_eq!(DataType::find_type_name(None), "NULL");
        assert_eq!(
            DataType::find_type_name(Some(&Value::Map(BTreeMap::new()))),
            "map"
        );
    }

    #[test]
    fn serialize_data_type() {
        assert_eq!(
            serde_json::to_string(&DataType::CharArray).unwrap(),
            "\"chararray\""
        );
        assert_eq!(
            serde_json::from_str::<DataType>("\"bytearray\"").unwrap(),
            DataType::ByteArray
        );
    }

    #[test]
    fn as_str_only_for_chararray() {
        assert_eq!(Value::from("abc").as_str(), Some("abc"));
        assert_eq!(Value::from(vec![b'a']).as_str(), None);
        assert_eq!(Value::from(1).as_str(), None);
    }

    #[test]
    fn display() {
        let inner = Tuple::from(vec![Some(Value::from("a")), None, Some(Value::from(1))]);
        assert_eq!(Value::from(inner.clone()).to_string(), "(a,,1)");
        assert_eq!(
            Value::from(vec![inner.clone(), Tuple::new()]).to_string(),
            "{(a,,1),()}"
        );

        let mut map = BTreeMap::new();
        map.insert("k".to_string(), Some(Value::from(2.5)));
        map.insert("n".to_string(), None);
        assert_eq!(Value::Map(map).to_string(), "[k#2.5,n#]");

        let dt = DateTime::parse_from_rfc3339("2015-06-01T10:00:00+02:00").unwrap();
        assert_eq!(Value::from(dt).to_string(), "2015-06-01T10:00:00+02:00");
    }
}
