//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! insurance engine test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for common values
//! - `builders`: Builders for profiles, policies and claims, plus [`EngineHarness`]
//! - `assertions`: Assertion helpers for money and engine errors
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
