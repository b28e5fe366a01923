//! Paste API replies
//!
//! Replies for the paste endpoints. Timestamp fields are ISO-8601 strings;
//! the optional ones may be absent, `null`, or an empty string, all of which
//! mean "not set".

use serde::{Deserialize, Serialize};

pub use crate::common::{FilePayload, FileResponse};

// ============================================================================
// Get Paste
// ============================================================================

/// Get paste response
///
/// Response for GET /paste/{id}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetPasteResponse {
    pub id: String,
    pub created_at: String,
    #[serde(default)]
    pub expires: Option<String>,
    #[serde(default)]
    pub last_edited: Option<String>,
    /// Files in the order the server stores them
    pub files: Vec<FileResponse>,
    /// Not every deployment reports views
    #[serde(default)]
    pub views: Option<u64>,
    #[serde(default)]
    pub has_password: Option<bool>,
}

// ============================================================================
// Create Paste
// ============================================================================

/// Create paste response
///
/// Response for POST /paste. Files are not echoed back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePasteResponse {
    pub id: String,
    pub created_at: String,
    #[serde(default)]
    pub expires: Option<String>,
    /// Token proving ownership of the new paste
    #[serde(default)]
    pub safety: Option<String>,
}
