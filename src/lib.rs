//! Core library for the plane-to-linear command line application.
//!
//! The conversion is a single pass: the user mapping is loaded by
//! [`config`], rows are read and written by the adapters under [`io`], each
//! row is rewritten by [`transform`] according to the column table in
//! [`model`], and [`convert`] ties the stages together.

pub mod config;
pub mod convert;
pub mod error;
pub mod io;
pub mod logging;
pub mod model;
pub mod transform;

pub use error::{Result, ToolError};
