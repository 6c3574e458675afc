//! Common utilities for integration tests

pub mod cli;

