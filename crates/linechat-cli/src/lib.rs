//! linechat CLI Library
//!
//! Argument surface for the `linechat` binary.

pub mod cli;
