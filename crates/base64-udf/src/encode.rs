//! `Base64Encode(chararray) -> chararray`

use base64::prelude::*;
use udf_types::{
    DataType, EvalFunc, ExecError, FieldSchema, FuncSpec, FunctionFactory, Schema, Tuple, Value,
};

inventory::submit!(FunctionFactory {
    name: Base64Encode::NAME,
    create,
});

fn create() -> Box<dyn EvalFunc> {
    Box::new(Base64Encode)
}

/// Encodes a string with the standard, padded Base64 alphabet of RFC 4648.
///
/// Absent input yields `None`. The empty string is passed through unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct Base64Encode;

impl Base64Encode {
    pub const NAME: &'static str = "Base64Encode";

    /// Encode field 0 of `input`.
    ///
    /// Checks run in a fixed order: absent input, empty string, argument
    /// count, argument type.  An empty first argument therefore short-circuits
    /// even when extra arguments follow it.
    pub fn encode(&self, input: Option<&Tuple>) -> Result<Option<String>, ExecError> {
        let Some(input) = input else {
            return Ok(None);
        };
        let Some(arg0) = input.get(0) else {
            return Ok(None);
        };

        if arg0.as_str() == Some("") {
            return Ok(Some(String::new()));
        }

        if input.size() > 1 {
            return Err(ExecError::WrongNumberOfArguments {
                max: 1,
                actual: input.size(),
            });
        }

        match arg0 {
            Value::CharArray(s) => Ok(Some(BASE64_STANDARD.encode(s.as_bytes()))),
            other => Err(ExecError::InvalidDataType {
                type_name: other.data_type().name(),
            }),
        }
    }

    fn chararray_schema() -> Schema {
        Schema::new(FieldSchema::unnamed(DataType::CharArray))
    }
}

impl EvalFunc for Base64Encode {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn exec(&self, input: Option<&Tuple>) -> Result<Option<Value>, ExecError> {
        Ok(self.encode(input)?.map(Value::CharArray))
    }

    fn arg_to_func_mapping(&self) -> Vec<FuncSpec> {
        vec![FuncSpec::new(Self::NAME, Self::chararray_schema())]
    }

    fn output_schema(&self) -> Schema {
        Self::chararray_schema()
    }
}
