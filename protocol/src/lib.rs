//! Wire shapes for the mystbin paste API
//!
//! These types mirror the JSON bodies the remote service sends and accepts.
//! They carry no behavior: timestamps stay as the strings the server sent and
//! fields the client never consumes are still decoded so nothing is lost.
//!
//! - `common`: shapes shared between endpoints (files)
//! - `api`: endpoint replies (get paste, create paste)

pub mod api;
pub mod common;
