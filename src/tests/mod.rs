//! Shared test support
//!
//! - `fixtures`: JSON replies shaped like the live API
//! - `utils`: logging and temp file helpers

pub mod utils;
