//! Grayscale Core - batch grayscale conversion
//!
//! This crate decodes raster images, maps every pixel to its BT.601 luma and
//! writes the result in the original container format next to a `_bw` name.
//!
//! # Module Structure
//!
//! - `luma` - Fixed-point luma formula
//! - `grid` - In-memory color and grayscale grids
//! - `pipeline` - Sequential and row-parallel grayscale transform
//! - `codec` - Format detection, decoding and grayscale encoding
//! - `convert` - Per-image orchestration and output naming
//! - `batch` - Concurrent batch driver and status reporting

pub mod batch;
pub mod codec;
pub mod config;
pub mod convert;
pub mod grid;
pub mod luma;
pub mod pipeline;

pub use batch::{run_batch, BatchSummary, ConversionReport, LineSink, StatusSink};
pub use codec::{Codec, FormatTag, ImageCodec};
pub use config::ConvertOptions;
pub use convert::{derive_output_path, ConversionError, Converter};
pub use grid::{GrayscaleGrid, PixelGrid};
pub use pipeline::{to_grayscale, Traversal};
