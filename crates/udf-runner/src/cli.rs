use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "udf-runner",
    about = "Apply a registered user-defined function to every row of a tab-separated file.",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    /// The format in which descriptions and errors are printed.
    #[arg(
        long,
        env = "UDF_RUNNER_FORMAT",
        global = true,
        help_heading = "Global Options",
        default_value = "text"
    )]
    pub format: OutputFormat,
    /// Bind an alias to a registered function, like `DEFINE alias Function`
    /// in a script. Can be repeated.
    #[arg(
        long = "define",
        value_name = "ALIAS=FUNCTION",
        value_parser = parse_define,
        global = true,
        help_heading = "Global Options"
    )]
    pub defines: Vec<(String, String)>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate a function on each row of the input.
    Run(RunArgs),
    /// Print the argument schemas and output schema of a function.
    Describe {
        /// Name or alias of the function.
        name: String,
    },
    /// List registered functions and aliases.
    List,
}

#[derive(Args)]
pub struct RunArgs {
    /// Name or alias of the function to apply.
    #[arg(default_value = base64_udf::Base64Encode::NAME)]
    pub function: String,
    /// Tab-separated input file. Reads stdin if omitted.
    #[arg(long, short, env = "UDF_RUNNER_INPUT", value_hint = ValueHint::FilePath)]
    pub input: Option<PathBuf>,
    /// Output file. Writes stdout if omitted.
    #[arg(long, short, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
    /// Zero-based input columns passed to the function as its arguments, in
    /// order.
    #[arg(long, value_delimiter = ',', default_value = "0")]
    pub args: Vec<usize>,
    /// What to do when the function fails on a row.
    #[arg(long, env = "UDF_RUNNER_ON_ERROR", default_value = "fail")]
    pub on_error: ErrorPolicy,
    /// Do not check the call against the function's declared argument
    /// schemas before running; mismatches then surface as row errors.
    #[arg(long)]
    pub skip_type_check: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
#[value(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable text.
    Text,
    /// JSON, one document per output.
    Json,
}

/// Host policy for rows on which the function raises an error.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
#[value(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Abort the run and report the error.
    Fail,
    /// Drop the row and log a warning.
    Skip,
    /// Emit a null (empty line) for the row and log a warning.
    Null,
}

fn parse_define(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((alias, function)) if !alias.is_empty() && !function.is_empty() => {
            Ok((alias.to_string(), function.to_string()))
        }
        _ => Err(format!("expected ALIAS=FUNCTION, got '{s}'")),
    }
}

#[cfg(test)]
mod test {
    use super::{parse_define, Cli, Commands, ErrorPolicy, OutputFormat};
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_defines() {
        assert_eq!(
            parse_define("b64=Base64Encode"),
            Ok(("b64".to_string(), "Base64Encode".to_string()))
        );
        assert!(parse_define("b64").is_err());
        assert!(parse_define("=Base64Encode").is_err());
        assert!(parse_define("b64=").is_err());
    }

    #[test]
    fn run_defaults() {
        let cli = Cli::try_parse_from(["udf-runner", "run"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Text);
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.function, "Base64Encode");
                assert_eq!(args.args, vec![0]);
                assert_eq!(args.on_error, ErrorPolicy::Fail);
                assert!(args.input.is_none());
                assert!(!args.skip_type_check);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn run_options() {
        let cli = Cli::try_parse_from([
            "udf-runner",
            "--define",
            "b64=Base64Encode",
            "run",
            "b64",
            "--args",
            "1,0",
            "--on-error",
            "skip",
            "--skip-type-check",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(
            cli.defines,
            vec![("b64".to_string(), "Base64Encode".to_string())]
        );
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.function, "b64");
                assert_eq!(args.args, vec![1, 0]);
                assert_eq!(args.on_error, ErrorPolicy::Skip);
                assert!(args.skip_type_check);
            }
            _ => panic!("expected run"),
        }
    }
}
