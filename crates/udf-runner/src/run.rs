//! Row loop: read tab-separated lines, evaluate a function per line, write
//! one line per result.

use crate::cli::ErrorPolicy;
use anyhow::Context;
use log::{info, warn};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::str::Utf8Error;
use thiserror::Error;
use udf_types::{EvalFunc, ExecError, Tuple, Value};

/// Counters reported at the end of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    pub rows_read: u64,
    pub rows_written: u64,
    pub rows_failed: u64,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("row {row}: invalid UTF-8: {source}")]
    Decode {
        row: u64,
        #[source]
        source: Utf8Error,
    },

    #[error("row {row}: {source}")]
    Exec {
        row: u64,
        #[source]
        source: ExecError,
    },
}

pub fn open_input(path: Option<&Path>) -> anyhow::Result<Box<dyn Read>> {
    Ok(match path {
        None => Box::new(io::stdin().lock()),
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("unable to open '{}'", path.display()))?,
        )),
    })
}

pub fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match path {
        None => Box::new(io::stdout().lock()),
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("unable to create '{}'", path.display()))?,
        ),
    })
}

/// Build the argument tuple for one line.  An empty line is a single empty
/// column; columns past the end of a short line are absent.
fn project(line: &str, columns: &[usize]) -> Tuple {
    let fields: Vec<&str> = line.split('\t').collect();
    columns
        .iter()
        .map(|&column| fields.get(column).map(|field| Value::from(*field)))
        .collect()
}

fn strip_newline(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn write_result<W: Write>(output: &mut W, result: Option<&Value>) -> io::Result<()> {
    match result {
        None => writeln!(output),
        Some(value) => writeln!(output, "{value}"),
    }
}

/// Evaluate `function` on each line of `input`.
///
/// Every line is a row, blank ones included, so the output has one line per
/// input line unless rows are skipped.  A `None` result is written as an
/// empty line.
pub fn run<R, W>(
    function: &dyn EvalFunc,
    input: R,
    output: W,
    columns: &[usize],
    policy: ErrorPolicy,
) -> Result<RunStats, RunError>
where
    R: Read,
    W: Write,
{
    let mut input = BufReader::new(input);
    let mut output = BufWriter::new(output);
    let mut stats = RunStats::default();
    let mut line = Vec::new();

    loop {
        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        stats.rows_read += 1;
        let row = stats.rows_read;

        let result = match std::str::from_utf8(strip_newline(&line)) {
            Ok(text) => function
                .exec(Some(&project(text, columns)))
                .map_err(|source| RunError::Exec { row, source }),
            Err(source) => Err(RunError::Decode { row, source }),
        };

        match result {
            Ok(result) => {
                write_result(&mut output, result.as_ref())?;
                stats.rows_written += 1;
            }
            Err(error) => {
                stats.rows_failed += 1;
                match policy {
                    ErrorPolicy::Fail => return Err(error),
                    ErrorPolicy::Skip => warn!("skipping {error}"),
                    ErrorPolicy::Null => {
                        warn!("writing null for {error}");
                        write_result(&mut output, None)?;
                        stats.rows_written += 1;
                    }
                }
            }
        }
    }

    output.flush()?;
    info!(
        "{}: {} rows read, {} written, {} failed",
        function.name(),
        stats.rows_read,
        stats.rows_written,
        stats.rows_failed
    );
    Ok(stats)
}
