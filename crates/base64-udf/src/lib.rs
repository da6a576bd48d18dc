//! Base64 encoding of character strings, packaged as a user-defined
//! function.
//!
//! ```text
//! -- Define function call
//! DEFINE Base64Encode Base64Encode();
//!
//! input = LOAD 'input_file' AS (line:chararray);
//! output = FOREACH input GENERATE Base64Encode(line) AS encoded_string;
//! ```
//!
//! Linking this crate registers the function with
//! [`udf_types::FunctionRegistry::with_builtins`].

pub mod encode;

pub use encode::Base64Encode;
