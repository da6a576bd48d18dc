//! The contract every user-defined function implements.

use crate::{
    error::ExecError,
    schema::{FuncSpec, Schema},
    tuple::Tuple,
    value::Value,
};

/// A scalar function evaluated once per row.
///
/// Implementations must be stateless with respect to rows: the host may call
/// [`exec`](EvalFunc::exec) concurrently from many threads, in any order.
pub trait EvalFunc: Send + Sync {
    /// Name under which the function is registered.
    fn name(&self) -> &str;

    /// Evaluate the function on one row.
    ///
    /// `None` input means the host had no row to offer; a `None` result is
    /// the function's null output.
    fn exec(&self, input: Option<&Tuple>) -> Result<Option<Value>, ExecError>;

    /// Argument schemas accepted by this function, queried once at plan
    /// time.  An empty list means the function does not declare a signature
    /// and any call site is accepted.
    fn arg_to_func_mapping(&self) -> Vec<FuncSpec> {
        Vec::new()
    }

    /// Schema of the value returned by [`exec`](EvalFunc::exec).
    fn output_schema(&self) -> Schema;
}

/// Factory for creating functions with a specific name.
///
/// Crates providing functions register a factory with
/// `inventory::submit!`; [`FunctionRegistry::with_builtins`] collects them.
///
/// [`FunctionRegistry::with_builtins`]: crate::FunctionRegistry::with_builtins
pub struct FunctionFactory {
    pub name: &'static str,
    pub create: fn() -> Box<dyn EvalFunc>,
}

inventory::collect!(FunctionFactory);
