//! Single-image conversion: read, decode, grayscale, encode, write.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

use crate::codec::{Codec, DecodeError, EncodeError, FormatTag, ImageCodec};
use crate::config::ConvertOptions;
use crate::pipeline::to_grayscale;

/// Per-image conversion failure. None of these abort a batch.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The input file could not be read.
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input bytes are not a valid or recognised image.
    #[error("cannot decode image: {0}")]
    Decode(#[from] DecodeError),

    /// The image decoded but its format has no grayscale encoder.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(FormatTag),

    /// The grayscale image could not be encoded.
    #[error("cannot encode image: {0}")]
    Encode(EncodeError),

    /// The output file could not be created or written.
    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input path has no file name to derive an output name from.
    #[error("no file name in {}", .0.display())]
    InvalidPath(PathBuf),

    /// The conversion task panicked.
    #[error("conversion task panicked: {0}")]
    Panicked(String),
}

impl From<EncodeError> for ConversionError {
    fn from(error: EncodeError) -> Self {
        match error {
            EncodeError::UnsupportedFormat(tag) => ConversionError::UnsupportedFormat(tag),
            other => ConversionError::Encode(other),
        }
    }
}

/// Derive the output path for `input`.
///
/// The file stem gets `suffix` appended and the original extension (if any)
/// reattached: `photos/cat.jpg` becomes `cat_bw.jpg`. The input's directory
/// is dropped, so with no `output_dir` the result is relative to the working
/// directory.
pub fn derive_output_path(
    input: &Path,
    suffix: &str,
    output_dir: Option<&Path>,
) -> Result<PathBuf, ConversionError> {
    let stem = input
        .file_stem()
        .ok_or_else(|| ConversionError::InvalidPath(input.to_path_buf()))?;

    let mut name = OsString::from(stem);
    name.push(suffix);
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }

    Ok(match output_dir {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    })
}

/// Converts one image at a time with a fixed codec and options.
///
/// A converter holds no mutable state and can be shared across threads.
#[derive(Debug, Clone)]
pub struct Converter<C = ImageCodec> {
    codec: C,
    options: ConvertOptions,
}

impl Converter<ImageCodec> {
    /// Create a converter using the `image`-backed codec.
    pub fn new(options: ConvertOptions) -> Self {
        let codec = ImageCodec::new(options.jpeg_quality);
        Self { codec, options }
    }
}

impl<C: Codec> Converter<C> {
    pub fn with_codec(codec: C, options: ConvertOptions) -> Self {
        Self { codec, options }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert the image at `path` and write the grayscale copy.
    ///
    /// Encoding happens before the output file is created, so a failed
    /// encode never leaves an empty file behind. An existing output file is
    /// truncated and overwritten.
    ///
    /// # Returns
    ///
    /// The path of the written file.
    pub fn convert(&self, path: &Path) -> Result<PathBuf, ConversionError> {
        let bytes = fs::read(path).map_err(|source| ConversionError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let (grid, format) = self.codec.decode(&bytes)?;
        debug!("{}: {} {}x{}", path.display(), format, grid.width, grid.height);

        let gray = to_grayscale(&grid, self.options.traversal);
        drop(grid);

        let output = derive_output_path(
            path,
            &self.options.suffix,
            self.options.output_dir.as_deref(),
        )?;

        let encoded = self.codec.encode(&gray, &format)?;
        fs::write(&output, encoded).map_err(|source| ConversionError::Write {
            path: output.clone(),
            source,
        })?;

        info!("{} converted to {}", path.display(), output.display());
        Ok(output)
    }
}
