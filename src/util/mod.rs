//! Shared helpers for tests and fixtures

pub mod testing;
