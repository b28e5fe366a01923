//! API DTOs module
//!
//! This module contains the endpoint replies:
//! - `paste`: get paste and create paste

pub mod paste;

pub use paste::*;
