//! Crate-level tests for synscan.

mod unit;
