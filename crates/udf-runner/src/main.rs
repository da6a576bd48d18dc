//! A CLI for applying user-defined functions to tab-separated data.
//!
//! Plays the part of the host engine: it loads rows, type-checks the call
//! against the function's declared signature, invokes the function once per
//! row and applies an error policy to failed rows.

use std::collections::BTreeMap;

use clap::Parser;
use log::debug;
use serde::Serialize;
use udf_types::{
    DataType, DetailedError, ErrorResponse, FuncSpec, FunctionRegistry, PlanError, Schema,
};

mod cli;
mod run;

use crate::cli::*;
use crate::run::{open_input, open_output, run, RunError};

/// Output of the `describe` command.
#[derive(Serialize)]
struct Description {
    name: String,
    arg_to_func_mapping: Vec<FuncSpec>,
    output_schema: Schema,
}

/// Output of the `list` command.
#[derive(Serialize)]
struct Listing<'a> {
    functions: Vec<&'a str>,
    aliases: BTreeMap<&'a str, &'a str>,
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Failed to serialize output: {e}"),
    }
}

/// Report `response` in the requested format and exit with a failure code.
fn exit_with(format: OutputFormat, response: ErrorResponse) -> ! {
    match format {
        OutputFormat::Text => eprintln!("{}", response.message),
        OutputFormat::Json => print_json(&response),
    }
    std::process::exit(1);
}

fn exit_with_error<E: DetailedError>(format: OutputFormat, error: &E) -> ! {
    exit_with(format, ErrorResponse::from_error_nolog(error))
}

fn exit_with_io_error(error: anyhow::Error) -> ! {
    eprintln!("{error:#}");
    std::process::exit(1);
}

fn build_registry(defines: &[(String, String)]) -> Result<FunctionRegistry, PlanError> {
    let mut registry = FunctionRegistry::with_builtins();
    for (alias, function) in defines {
        registry.define(alias, function)?;
    }
    Ok(registry)
}

fn run_command(registry: &FunctionRegistry, args: RunArgs, format: OutputFormat) {
    // Every input column is loaded as a chararray.
    let arg_types = vec![DataType::CharArray; args.args.len()];
    let function = if args.skip_type_check {
        registry
            .get(&args.function)
            .ok_or_else(|| PlanError::UnknownFunction(args.function.clone()))
    } else {
        registry.resolve(&args.function, &arg_types)
    }
    .unwrap_or_else(|e| exit_with_error(format, &e));

    let input = open_input(args.input.as_deref()).unwrap_or_else(|e| exit_with_io_error(e));
    let output = open_output(args.output.as_deref()).unwrap_or_else(|e| exit_with_io_error(e));

    match run(function.as_ref(), input, output, &args.args, args.on_error) {
        Ok(stats) => debug!("run finished: {stats:?}"),
        Err(RunError::Exec { row, source }) => {
            let mut response = ErrorResponse::from_exec_error(&source);
            response.message = format!("row {row}: {}", response.message);
            exit_with(format, response)
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn describe(registry: &FunctionRegistry, name: &str, format: OutputFormat) {
    let function = registry.get(name).unwrap_or_else(|| {
        exit_with_error(format, &PlanError::UnknownFunction(name.to_string()))
    });

    let description = Description {
        name: function.name().to_string(),
        arg_to_func_mapping: function.arg_to_func_mapping(),
        output_schema: function.output_schema(),
    };

    match format {
        OutputFormat::Text => {
            if description.arg_to_func_mapping.is_empty() {
                println!("{}(*) -> {}", description.name, description.output_schema);
            }
            for spec in &description.arg_to_func_mapping {
                println!("{spec} -> {}", description.output_schema);
            }
        }
        OutputFormat::Json => print_json(&description),
    }
}

fn list(registry: &FunctionRegistry, format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            for name in registry.names() {
                println!("{name}");
            }
            for (alias, target) in registry.aliases() {
                println!("{alias} -> {target}");
            }
        }
        OutputFormat::Json => print_json(&Listing {
            functions: registry.names().collect(),
            aliases: registry.aliases().collect(),
        }),
    }
}

fn main() {
    let cli = Cli::parse();

    let _r = env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .format_target(false)
        .format_timestamp(None)
        .try_init();

    let registry =
        build_registry(&cli.defines).unwrap_or_else(|e| exit_with_error(cli.format, &e));

    match cli.command {
        Commands::Run(args) => run_command(&registry, args, cli.format),
        Commands::Describe { name } => describe(&registry, &name, cli.format),
        Commands::List => list(&registry, cli.format),
    }
}
