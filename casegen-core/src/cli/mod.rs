//! Command-line interface module
//!
//! Argument parsing and command definitions; the handlers live in the binary.

pub mod args;

pub use args::*;
