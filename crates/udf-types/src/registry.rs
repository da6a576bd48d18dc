//! Function table consulted by the host's planner.

use crate::{
    error::PlanError,
    function::{EvalFunc, FunctionFactory},
    value::DataType,
};
use itertools::Itertools;
use log::debug;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Maps function names and aliases to function instances.
#[derive(Default)]
pub struct FunctionRegistry {
    functions: BTreeMap<String, Arc<dyn EvalFunc>>,
    aliases: BTreeMap<String, String>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every function registered through
    /// [`FunctionFactory`].
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for factory in inventory::iter::<FunctionFactory> {
            registry.register(factory.name, (factory.create)());
        }
        registry
    }

    /// Add `function` under `name`, replacing any function with that name.
    pub fn register(&mut self, name: impl Into<String>, function: Box<dyn EvalFunc>) {
        let name = name.into();
        debug!("registering function '{name}'");
        self.functions.insert(name, Arc::from(function));
    }

    /// Bind `alias` to the function registered as `target`, the equivalent of
    /// a script-level `DEFINE alias target`.
    pub fn define(&mut self, alias: &str, target: &str) -> Result<(), PlanError> {
        if self.functions.contains_key(alias) || self.aliases.contains_key(alias) {
            return Err(PlanError::DuplicateAlias(alias.to_string()));
        }
        let target = self.canonical_name(target)?.to_string();
        debug!("defining alias '{alias}' for '{target}'");
        self.aliases.insert(alias.to_string(), target);
        Ok(())
    }

    /// Look up a function by name or alias.
    pub fn get(&self, name: &str) -> Option<Arc<dyn EvalFunc>> {
        let name = self.aliases.get(name).map(String::as_str).unwrap_or(name);
        self.functions.get(name).cloned()
    }

    /// Names of all registered functions, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    /// All `(alias, target)` pairs, in order of alias.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases
            .iter()
            .map(|(alias, target)| (alias.as_str(), target.as_str()))
    }

    /// Type-check a call to `name` with arguments of `arg_types` against the
    /// argument schemas the function declares.
    pub fn resolve(
        &self,
        name: &str,
        arg_types: &[DataType],
    ) -> Result<Arc<dyn EvalFunc>, PlanError> {
        let function = self
            .get(name)
            .ok_or_else(|| PlanError::UnknownFunction(name.to_string()))?;

        let specs = function.arg_to_func_mapping();
        if specs.is_empty() || specs.iter().any(|s| s.input_schema.accepts(arg_types)) {
            debug!("resolved {name}({})", arg_types.iter().join(","));
            return Ok(function);
        }

        Err(PlanError::NoMatchingSignature {
            name: name.to_string(),
            args: arg_types.iter().join(","),
            expected: specs.iter().map(|s| &s.input_schema).join(", "),
        })
    }

    fn canonical_name<'a>(&'a self, name: &'a str) -> Result<&'a str, PlanError> {
        if self.functions.contains_key(name) {
            Ok(name)
        } else if let Some(target) = self.aliases.get(name) {
            Ok(target)
        } else {
            Err(PlanError::UnknownFunction(name.to_string()))
        }
    }
}

#[cfg(test)]
mod test {
    use super::FunctionRegistry;
    use crate::{
        DataType, EvalFunc, ExecError, FieldSchema, FuncSpec, FunctionFactory, PlanError, Schema,
        Tuple, Value,
    };

    /// Returns its first argument unchanged.
    struct Identity;

    impl EvalFunc for Identity {
        fn name(&self) -> &str {
            "Identity"
        }

        fn exec(&self, input: Option<&Tuple>) -> Result<Option<Value>, ExecError> {
            Ok(input.and_then(|t| t.get(0)).cloned())
        }

        fn output_schema(&self) -> Schema {
            Schema::new(FieldSchema::unnamed(DataType::CharArray))
        }
    }

    /// Accepts a single int or a single long.
    struct Widen;

    impl EvalFunc for Widen {
        fn name(&self) -> &str {
            "Widen"
        }

        fn exec(&self, input: Option<&Tuple>) -> Result<Option<Value>, ExecError> {
            Ok(match input.and_then(|t| t.get(0)) {
                Some(Value::Int(i)) => Some(Value::Long(i64::from(*i))),
                other => other.cloned(),
            })
        }

        fn arg_to_func_mapping(&self) -> Vec<FuncSpec> {
            vec![
                FuncSpec::new("Widen", Schema::new(FieldSchema::unnamed(DataType::Int))),
                FuncSpec::new("Widen", Schema::new(FieldSchema::unnamed(DataType::Long))),
            ]
        }

        fn output_schema(&self) -> Schema {
            Schema::new(FieldSchema::unnamed(DataType::Long))
        }
    }

    fn create_identity() -> Box<dyn EvalFunc> {
        Box::new(Identity)
    }

    inventory::submit!(FunctionFactory {
        name: "Identity",
        create: create_identity,
    });

    fn registry() -> FunctionRegistry {
        let mut registry = FunctionRegistry::new();
        registry.register("Widen", Box::new(Widen));
        registry.register("Identity", Box::new(Identity));
        registry
    }

    #[test]
    fn builtins_come_from_inventory() {
        let registry = FunctionRegistry::with_builtins();
        assert!(registry.names().any(|n| n == "Identity"));
        assert!(registry.get("Widen").is_none());
    }

    #[test]
    fn resolve_checks_signatures() {
        let registry = registry();

        assert!(registry.resolve("Widen", &[DataType::Int]).is_ok());
        assert!(registry.resolve("Widen", &[DataType::Long]).is_ok());
        assert_eq!(
            registry
                .resolve("Widen", &[DataType::CharArray, DataType::Int])
                .err(),
            Some(PlanError::NoMatchingSignature {
                name: "Widen".to_string(),
                args: "chararray,int".to_string(),
                expected: "{int}, {long}".to_string(),
            })
        );

        // No declared signature: anything goes.
        assert!(registry.resolve("Identity", &[]).is_ok());
        assert_eq!(
            registry.resolve("Missing", &[]).err(),
            Some(PlanError::UnknownFunction("Missing".to_string()))
        );
    }

    #[test]
    fn define_alias() {
        let mut registry = registry();
        registry.define("w", "Widen").unwrap();
        registry.define("ww", "w").unwrap();

        let f = registry.resolve("ww", &[DataType::Int]).unwrap();
        assert_eq!(f.name(), "Widen");
        assert_eq!(
            f.exec(Some(&Tuple::from_values([7]))).unwrap(),
            Some(Value::Long(7))
        );
        assert_eq!(
            registry.aliases().collect::<Vec<_>>(),
            vec![("w", "Widen"), ("ww", "Widen")]
        );

        assert_eq!(
            registry.define("w", "Identity"),
            Err(PlanError::DuplicateAlias("w".to_string()))
        );
        assert_eq!(
            registry.define("Identity", "Widen"),
            Err(PlanError::DuplicateAlias("Identity".to_string()))
        );
        assert_eq!(
            registry.define("x", "Missing"),
            Err(PlanError::UnknownFunction("Missing".to_string()))
        );
    }
}
