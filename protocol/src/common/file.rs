//! File-related wire structures
//!
//! A paste is made of one or more files. The server reports each file with
//! its own size metrics; the client submits only name, body and syntax.

use serde::{Deserialize, Serialize};

// ============================================================================
// File Structures
// ============================================================================

/// File as returned inside a paste reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileResponse {
    pub filename: String,
    pub content: String,
    /// Line count computed by the server
    pub loc: u64,
    /// Character count computed by the server
    pub charcount: u64,
    /// Server-side note attached to the file (may be empty)
    #[serde(default)]
    pub annotation: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
}

/// File body submitted when creating a paste
///
/// Metrics are left out, the server recomputes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePayload {
    pub content: String,
    pub filename: String,
    pub syntax: Option<String>,
}
