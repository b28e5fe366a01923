//! Typed models for the mystbin paste service
//!
//! Converts decoded API replies into [`Paste`] and [`File`] values. Transport
//! is out of scope: hand this crate the JSON the server returned and get
//! typed, immutable values back.
//!
//! ```
//! use mystbin::Paste;
//!
//! let paste = Paste::from_json(r#"{
//!     "id": "abc123",
//!     "created_at": "2021-01-01T00:00:00",
//!     "files": [{"filename": "main.py", "content": "print(1)", "loc": 1, "charcount": 8}]
//! }"#)?;
//!
//! assert_eq!(paste.id(), "abc123");
//! assert_eq!(paste.files()[0].syntax(), Some("py"));
//! # Ok::<(), mystbin::MystbinError>(())
//! ```

pub mod config;
pub mod decode;
pub mod error;
pub mod file;
pub mod paste;
pub mod timestamp;

#[cfg(test)]
mod tests;

pub use config::{MapperConfig, MapperConfigBuilder, SyntaxSource};
pub use error::{ErrorCode, MystbinError, Result};
pub use file::{File, FileBuilder};
pub use paste::Paste;

pub use mystbin_protocol as protocol;
