//! Container format identifiers.

use std::fmt;

use image::ImageFormat;
use serde::{Deserialize, Serialize};

/// Container format reported by the decoder and used to pick the encoder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatTag {
    Jpeg,
    Png,
    /// A format that decodes but has no grayscale encoder, e.g. `"gif"`.
    Other(String),
}

impl FormatTag {
    /// Whether a grayscale encoder exists for this format.
    pub fn is_encodable(&self) -> bool {
        matches!(self, FormatTag::Jpeg | FormatTag::Png)
    }
}

impl From<ImageFormat> for FormatTag {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Jpeg => FormatTag::Jpeg,
            ImageFormat::Png => FormatTag::Png,
            other => FormatTag::Other(format!("{:?}", other).to_lowercase()),
        }
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatTag::Jpeg => f.write_str("jpeg"),
            FormatTag::Png => f.write_str("png"),
            FormatTag::Other(name) => f.write_str(name),
        }
    }
}
