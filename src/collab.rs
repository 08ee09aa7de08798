// SPDX-License-Identifier: MIT
//
// Collaborator seams: image color extraction and mockup image generation.
//
// Neither service is reachable from here. Both are traits so the session
// can be driven by a real client, a canned reply on disk, or a test fake.
// The only wire format we own is the extraction reply:
//
//     { "palette": ["#RRGGBB", ...] }

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use swatch_harmony::Palette;

/// Most colors an extraction may contribute to a palette.
pub const MAX_EXTRACTED: usize = 5;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Palette extraction failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The service itself failed (transport, quota, refusal).
    Service(String),
    /// The reply was not `{ "palette": [ "#...", ... ] }`.
    Malformed(String),
    /// The reply held an empty palette.
    Empty,
}

impl fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Service(msg) => write!(f, "extraction service failed: {msg}"),
            Self::Malformed(msg) => write!(f, "malformed extraction reply: {msg}"),
            Self::Empty => f.write_str("extraction reply contained no colors"),
        }
    }
}

impl std::error::Error for ExtractionError {}

/// Mockup generation failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    Service(String),
    /// The service answered without an image.
    NoImage,
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Service(msg) => write!(f, "image service failed: {msg}"),
            Self::NoImage => f.write_str("no image was generated"),
        }
    }
}

impl std::error::Error for GenerationError {}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// An image handed to a collaborator: base64 data plus its MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImagePayload {
    pub data: String,
    pub mime_type: String,
}

/// A mockup the session has received, kept newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    pub id: String,
    pub prompt: String,
    /// Base64 PNG.
    pub data: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Pulls dominant colors out of an image.
pub trait PaletteExtractor {
    /// At most [`MAX_EXTRACTED`] hex strings, most dominant first.
    ///
    /// # Errors
    ///
    /// Any [`ExtractionError`]; the session is left untouched.
    fn extract(&self, image: &ImagePayload) -> Result<Vec<String>, ExtractionError>;
}

/// Renders a mockup image from a prompt and an optional reference image.
pub trait MockupGenerator {
    /// The generated image as base64 PNG data.
    ///
    /// # Errors
    ///
    /// Any [`GenerationError`]; the session is left untouched.
    fn generate(&self, prompt: &str, reference: Option<&ImagePayload>)
    -> Result<String, GenerationError>;
}

/// An extractor that replays a reply saved to disk earlier.
///
/// The image is ignored; the reply already describes it.
#[derive(Debug, Clone)]
pub struct CannedReply {
    json: String,
}

impl CannedReply {
    #[must_use]
    pub const fn new(json: String) -> Self {
        Self { json }
    }
}

impl PaletteExtractor for CannedReply {
    fn extract(&self, _image: &ImagePayload) -> Result<Vec<String>, ExtractionError> {
        parse_extraction_response(&self.json)
    }
}

/// A generator that replays an image saved to disk earlier, as base64 text.
///
/// The prompt and reference are ignored; the saved image already answers them.
#[derive(Debug, Clone)]
pub struct CannedImage {
    data: String,
}

impl CannedImage {
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }
}

impl MockupGenerator for CannedImage {
    fn generate(
        &self,
        _prompt: &str,
        _reference: Option<&ImagePayload>,
    ) -> Result<String, GenerationError> {
        Ok(self.data.trim().to_string())
    }
}

// ---------------------------------------------------------------------------
// Wire helpers
// ---------------------------------------------------------------------------

/// Validate an extraction reply and return its colors.
///
/// The `palette` array must be non-empty and every entry a string starting
/// with `#`. Entries past [`MAX_EXTRACTED`] are validated, then dropped. Hex digits are not
/// checked here; importing the result does that.
///
/// # Errors
///
/// [`ExtractionError::Malformed`] for anything not shaped like a reply,
/// [`ExtractionError::Empty`] for an empty array.
pub fn parse_extraction_response(json: &str) -> Result<Vec<String>, ExtractionError> {
    let root: Value =
        serde_json::from_str(json).map_err(|e| ExtractionError::Malformed(e.to_string()))?;

    let entries = root
        .get("palette")
        .and_then(Value::as_array)
        .ok_or_else(|| ExtractionError::Malformed("missing \"palette\" array".into()))?;

    if entries.is_empty() {
        return Err(ExtractionError::Empty);
    }

    let mut hexes = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| match entry.as_str() {
            Some(hex) if hex.starts_with('#') => Ok(hex.to_string()),
            _ => Err(ExtractionError::Malformed(format!(
                "entry {i} is not a \"#\" color string: {entry}"
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;
    hexes.truncate(MAX_EXTRACTED);
    Ok(hexes)
}

/// Build the mockup prompt: the user's subject plus the current palette.
#[must_use]
pub fn mockup_prompt(palette: &Palette, subject: &str) -> String {
    let subject = subject.trim();
    let colors = palette.hexes().join(", ");
    if colors.is_empty() {
        return subject.to_string();
    }
    format!("{subject}. Use this color palette: {colors}.")
}
