//! Decoding raw JSON into protocol shapes
//!
//! The transport hands over either JSON text or an already parsed
//! `serde_json::Value`. Decoding failures are sorted into the error taxonomy
//! here so callers can tell a missing key from a wrong type.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{MystbinError, Result};
use mystbin_protocol::api::{CreatePasteResponse, GetPasteResponse};
use mystbin_protocol::common::FileResponse;

pub const FILE_SHAPE: &str = "file";
pub const PASTE_SHAPE: &str = "paste";
pub const CREATE_PASTE_SHAPE: &str = "create paste";

/// Decode a parsed JSON value into `T`, naming the shape in errors
pub fn decode_value<T: DeserializeOwned>(shape: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|err| classify(shape, err))
}

/// Decode JSON text into `T`
///
/// Text that is not JSON at all is a serialization error; valid JSON with
/// the wrong shape is classified like [`decode_value`].
pub fn decode_str<T: DeserializeOwned>(shape: &str, text: &str) -> Result<T> {
    let value: Value = serde_json::from_str(text)?;
    decode_value(shape, value)
}

pub fn file_response(value: Value) -> Result<FileResponse> {
    decode_value(FILE_SHAPE, value)
}

pub fn paste_response(value: Value) -> Result<GetPasteResponse> {
    decode_value(PASTE_SHAPE, value)
}

pub fn create_paste_response(value: Value) -> Result<CreatePasteResponse> {
    decode_value(CREATE_PASTE_SHAPE, value)
}

fn classify(shape: &str, err: serde_json::Error) -> MystbinError {
    let message = err.to_string();
    match missing_field_name(&message) {
        Some(field) => MystbinError::missing_field(shape, field),
        None => MystbinError::invalid_response(shape, message),
    }
}

// serde reports missing keys as "missing field `name`"
fn missing_field_name(message: &str) -> Option<&str> {
    message
        .strip_prefix("missing field `")?
        .split_once('`')
        .map(|(field, _)| field)
}
