//! Pastes returned by the mystbin API

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::fmt;
use tracing::debug;

use crate::config::MapperConfig;
use crate::decode;
use crate::error::Result;
use crate::file::File;
use crate::timestamp::{parse_optional_timestamp, parse_timestamp};
use mystbin_protocol::api::{CreatePasteResponse, GetPasteResponse};

/// A paste and the files it owns
///
/// Built once from a server reply and read-only afterwards. Edits and
/// deletions happen through the API and yield a fresh `Paste`.
#[derive(Clone, PartialEq, Eq)]
pub struct Paste {
    id: String,
    created_at: DateTime<Utc>,
    expires: Option<DateTime<Utc>>,
    last_edited: Option<DateTime<Utc>>,
    files: Vec<File>,
    views: Option<u64>,
    safety: Option<String>,
}

impl Paste {
    /// Map a get-paste reply using the default mapping rules
    pub fn from_data(payload: GetPasteResponse) -> Result<Self> {
        Self::from_data_with(payload, &MapperConfig::default())
    }

    /// Map a get-paste reply
    ///
    /// Fails on the first malformed timestamp; no partial paste is returned.
    pub fn from_data_with(payload: GetPasteResponse, config: &MapperConfig) -> Result<Self> {
        let offset = config.naive_offset()?;

        let created_at = parse_timestamp("created_at", &payload.created_at, offset)?;
        let expires = parse_optional_timestamp("expires", payload.expires.as_deref(), offset)?;
        let last_edited =
            parse_optional_timestamp("last_edited", payload.last_edited.as_deref(), offset)?;

        let files: Vec<File> = payload
            .files
            .into_iter()
            .map(|file| File::from_data_with(file, config))
            .collect();

        debug!(id = %payload.id, files = files.len(), views = ?payload.views, "mapped paste");

        Ok(Self {
            id: payload.id,
            created_at,
            expires,
            last_edited,
            files,
            views: payload.views,
            safety: None,
        })
    }

    /// Map a create-paste reply together with the files that were submitted
    pub fn from_create(reply: CreatePasteResponse, files: Vec<File>) -> Result<Self> {
        Self::from_create_with(reply, files, &MapperConfig::default())
    }

    /// Map a create-paste reply
    ///
    /// The reply does not echo files back, so the submitted ones are kept in
    /// submission order.
    pub fn from_create_with(
        reply: CreatePasteResponse,
        files: Vec<File>,
        config: &MapperConfig,
    ) -> Result<Self> {
        let offset = config.naive_offset()?;

        let created_at = parse_timestamp("created_at", &reply.created_at, offset)?;
        let expires = parse_optional_timestamp("expires", reply.expires.as_deref(), offset)?;

        debug!(id = %reply.id, files = files.len(), "mapped created paste");

        Ok(Self {
            id: reply.id,
            created_at,
            expires,
            last_edited: None,
            files,
            views: None,
            safety: reply.safety,
        })
    }

    /// Decode and map a raw JSON get-paste reply
    pub fn from_value(value: Value) -> Result<Self> {
        Self::from_value_with(value, &MapperConfig::default())
    }

    pub fn from_value_with(value: Value, config: &MapperConfig) -> Result<Self> {
        Self::from_data_with(decode::paste_response(value)?, config)
    }

    /// Decode and map a get-paste reply body
    pub fn from_json(text: &str) -> Result<Self> {
        Self::from_json_with(text, &MapperConfig::default())
    }

    pub fn from_json_with(text: &str, config: &MapperConfig) -> Result<Self> {
        let payload: GetPasteResponse = decode::decode_str(decode::PASTE_SHAPE, text)?;
        Self::from_data_with(payload, config)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// `None` means the paste never expires
    pub fn expires(&self) -> Option<DateTime<Utc>> {
        self.expires
    }

    pub fn last_edited(&self) -> Option<DateTime<Utc>> {
        self.last_edited
    }

    /// Files in server order
    pub fn files(&self) -> &[File] {
        &self.files
    }

    pub fn into_files(self) -> Vec<File> {
        self.files
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// The first file, which the web UI shows as the paste's main file
    pub fn primary_file(&self) -> Option<&File> {
        self.files.first()
    }

    /// `None` when the server did not report views, distinct from `Some(0)`
    pub fn views(&self) -> Option<u64> {
        self.views
    }

    /// Ownership token, only present on pastes built from a create reply
    pub fn safety(&self) -> Option<&str> {
        self.safety.as_deref()
    }
}

impl fmt::Display for Paste {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Paste with ID: '{}'.", self.id)
    }
}

impl fmt::Debug for Paste {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paste")
            .field("id", &self.id)
            .field("files", &self.files.len())
            .finish()
    }
}
