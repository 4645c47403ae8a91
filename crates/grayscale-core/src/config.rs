//! Conversion options.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::codec::DEFAULT_JPEG_QUALITY;
use crate::pipeline::Traversal;

/// Suffix appended to the file stem of every output file.
pub const DEFAULT_SUFFIX: &str = "_bw";

/// Options shared by every conversion in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Marker inserted between the file stem and the extension.
    pub suffix: String,
    /// Directory for output files. `None` writes relative to the working
    /// directory; the input's own directory is never used.
    pub output_dir: Option<PathBuf>,
    /// JPEG quality (1 to 100)
    pub jpeg_quality: u8,
    /// Pixel pipeline traversal.
    pub traversal: Traversal,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_SUFFIX.to_string(),
            output_dir: None,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            traversal: Traversal::default(),
        }
    }
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn with_traversal(mut self, traversal: Traversal) -> Self {
        self.traversal = traversal;
        self
    }
}
