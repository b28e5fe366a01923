//! Files contained in a paste

use mystbin_protocol::common::{FilePayload, FileResponse};
use serde_json::{json, Value};
use tracing::{trace, warn};

use crate::config::{MapperConfig, SyntaxSource};
use crate::decode;
use crate::error::Result;

/// One named text file inside a paste
///
/// Line and character counts are derived from `content` unless supplied.
/// Values are immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    filename: String,
    content: String,
    syntax: Option<String>,
    lines_of_code: u64,
    character_count: u64,
}

/// Builder for [`File`] when metrics are known up front
#[derive(Debug, Clone)]
pub struct FileBuilder {
    filename: String,
    content: String,
    syntax: Option<String>,
    lines_of_code: Option<u64>,
    character_count: Option<u64>,
}

impl FileBuilder {
    pub fn syntax(mut self, syntax: impl Into<String>) -> Self {
        self.syntax = Some(syntax.into());
        self
    }

    pub fn maybe_syntax(mut self, syntax: Option<String>) -> Self {
        self.syntax = syntax;
        self
    }

    /// Zero is treated as "not supplied"
    pub fn lines_of_code(mut self, lines_of_code: u64) -> Self {
        self.lines_of_code = Some(lines_of_code);
        self
    }

    /// Zero is treated as "not supplied"
    pub fn character_count(mut self, character_count: u64) -> Self {
        self.character_count = Some(character_count);
        self
    }

    pub fn build(self) -> File {
        let lines_of_code = self
            .lines_of_code
            .filter(|&n| n > 0)
            .unwrap_or_else(|| count_lines(&self.content));
        let character_count = self
            .character_count
            .filter(|&n| n > 0)
            .unwrap_or_else(|| count_characters(&self.content));

        File {
            filename: self.filename,
            content: self.content,
            syntax: self.syntax,
            lines_of_code,
            character_count,
        }
    }
}

impl File {
    /// Create a file, deriving both metrics from `content`
    pub fn new(
        filename: impl Into<String>,
        content: impl Into<String>,
        syntax: Option<String>,
    ) -> Self {
        Self::builder(filename, content).maybe_syntax(syntax).build()
    }

    pub fn builder(filename: impl Into<String>, content: impl Into<String>) -> FileBuilder {
        FileBuilder {
            filename: filename.into(),
            content: content.into(),
            syntax: None,
            lines_of_code: None,
            character_count: None,
        }
    }

    /// Build a file from a server reply using the default mapping rules
    pub fn from_data(payload: FileResponse) -> Self {
        Self::from_data_with(payload, &MapperConfig::default())
    }

    /// Build a file from a server reply
    ///
    /// Metrics come from `loc` and `charcount`; syntax follows
    /// `config.syntax_source`.
    pub fn from_data_with(payload: FileResponse, config: &MapperConfig) -> Self {
        let syntax = match config.syntax_source {
            SyntaxSource::Extension => syntax_from_filename(&payload.filename),
            SyntaxSource::Annotation => payload
                .annotation
                .as_deref()
                .map(str::trim)
                .filter(|annotation| !annotation.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| syntax_from_filename(&payload.filename)),
        };

        if payload.loc == 0 {
            warn!(filename = %payload.filename, "server reported zero lines of code, deriving from content");
        }
        if payload.charcount == 0 && !payload.content.is_empty() {
            warn!(filename = %payload.filename, "server reported zero characters, deriving from content");
        }

        let file = Self::builder(payload.filename, payload.content)
            .syntax(syntax)
            .lines_of_code(payload.loc)
            .character_count(payload.charcount)
            .build();

        trace!(
            filename = %file.filename,
            syntax = ?file.syntax,
            lines_of_code = file.lines_of_code,
            character_count = file.character_count,
            "mapped file"
        );
        file
    }

    /// Decode and map a raw JSON file reply
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(Self::from_data(decode::file_response(value)?))
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn syntax(&self) -> Option<&str> {
        self.syntax.as_deref()
    }

    pub fn lines_of_code(&self) -> u64 {
        self.lines_of_code
    }

    pub fn character_count(&self) -> u64 {
        self.character_count
    }

    /// Minimal structure for re-submitting this file
    pub fn to_payload(&self) -> FilePayload {
        FilePayload::from(self)
    }

    /// Same as [`File::to_payload`] as a plain JSON object
    pub fn to_value(&self) -> Value {
        json!({
            "content": self.content,
            "filename": self.filename,
            "syntax": self.syntax,
        })
    }
}

impl From<&File> for FilePayload {
    fn from(file: &File) -> Self {
        Self {
            content: file.content.clone(),
            filename: file.filename.clone(),
            syntax: file.syntax.clone(),
        }
    }
}

/// Text after the last `.`, or the whole name when there is none
pub fn syntax_from_filename(filename: &str) -> String {
    filename
        .rsplit('.')
        .next()
        .unwrap_or(filename)
        .to_string()
}

/// Number of `\n`-separated segments (an empty body is one line)
pub fn count_lines(content: &str) -> u64 {
    content.split('\n').count() as u64
}

pub fn count_characters(content: &str) -> u64 {
    content.chars().count() as u64
}
