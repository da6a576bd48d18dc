//! Types shared between a data-processing host and the user-defined
//! functions it evaluates.
//!
//! The host hands a function one [`Tuple`] per row and expects either a
//! result [`Value`] or an [`ExecError`].  Before running anything, the host's
//! planner asks each function for the argument schemas it accepts
//! ([`FuncSpec`]) and type-checks the call site against them through a
//! [`FunctionRegistry`].

pub mod error;
pub mod function;
pub mod registry;
pub mod schema;
pub mod tuple;
pub mod value;

pub use error::{DetailedError, ErrorResponse, ErrorSeverity, ExecError, PlanError};
pub use function::{EvalFunc, FunctionFactory};
pub use registry::FunctionRegistry;
pub use schema::{FieldSchema, FuncSpec, Schema};
pub use tuple::Tuple;
pub use value::{DataType, Value};
