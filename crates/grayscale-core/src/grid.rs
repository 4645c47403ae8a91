//! In-memory pixel grids for the conversion pipeline.

/// Bytes per pixel in a [`PixelGrid`] (RGBA8).
pub const RGBA_CHANNELS: usize = 4;

/// A decoded color image.
///
/// Pixels are RGBA8 with straight alpha, stored row-major with the origin at
/// the top-left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGBA pixel data, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

impl PixelGrid {
    /// Create a new PixelGrid with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * RGBA_CHANNELS,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a PixelGrid from an image::RgbaImage.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// RGBA sample at `(x, y)`.
    ///
    /// # Panics
    /// Panics if the coordinate is outside the grid.
    pub fn get(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(
            x < self.width && y < self.height,
            "({}, {}) outside {}x{} grid",
            x,
            y,
            self.width,
            self.height
        );
        let i = (y as usize * self.width as usize + x as usize) * RGBA_CHANNELS;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// One row of RGBA bytes.
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * RGBA_CHANNELS;
        let start = y as usize * stride;
        &self.pixels[start..start + stride]
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A single-channel 8-bit luma image with the same dimensions as its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayscaleGrid {
    pub width: u32,
    pub height: u32,
    /// Luma values, `width * height` bytes, row-major.
    pub pixels: Vec<u8>,
}

impl GrayscaleGrid {
    /// Allocate a zeroed grid matching `source`'s dimensions.
    pub fn matching(source: &PixelGrid) -> Self {
        Self {
            width: source.width,
            height: source.height,
            pixels: vec![0; source.pixel_count()],
        }
    }

    /// Luma value at `(x, y)`.
    ///
    /// # Panics
    /// Panics if the coordinate is outside the grid.
    pub fn get(&self, x: u32, y: u32) -> u8 {
        assert!(
            x < self.width && y < self.height,
            "({}, {}) outside {}x{} grid",
            x,
            y,
            self.width,
            self.height
        );
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Convert to an image::GrayImage, e.g. for encoding.
    pub fn to_gray_image(&self) -> Option<image::GrayImage> {
        image::GrayImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
