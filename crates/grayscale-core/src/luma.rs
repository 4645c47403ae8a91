//! Luma calculation using ITU-R BT.601 coefficients.
//!
//! The integer path works in 16-bit fixed point: 8-bit samples are widened to
//! 16 bits, alpha is premultiplied, and the weighted sum is shifted back down
//! to 8 bits. The weights sum to exactly 65536, so neutral gray maps to itself
//! and fully transparent pixels map to black.

/// ITU-R BT.601 coefficient for red channel.
pub const LUMA_R: f32 = 0.299;

/// ITU-R BT.601 coefficient for green channel.
pub const LUMA_G: f32 = 0.587;

/// ITU-R BT.601 coefficient for blue channel.
pub const LUMA_B: f32 = 0.114;

/// Fixed-point red weight (`0.299 * 65536`).
const WEIGHT_R: u32 = 19595;
/// Fixed-point green weight (`0.587 * 65536`).
const WEIGHT_G: u32 = 38470;
/// Fixed-point blue weight (`0.114 * 65536`).
const WEIGHT_B: u32 = 7471;

/// Calculate luma from normalized RGB values (0.0 to 1.0).
///
/// Floating-point reference for the fixed-point [`luma_rgba8`]; the two agree
/// to within one 8-bit step for opaque pixels.
#[inline]
pub fn calculate_luma(r: f32, g: f32, b: f32) -> f32 {
    LUMA_R * r + LUMA_G * g + LUMA_B * b
}

/// Calculate luma from an RGBA8 sample.
///
/// # Arguments
/// * `r`, `g`, `b` - Color channels (0-255, straight alpha)
/// * `a` - Alpha (0-255); color is premultiplied before weighting
///
/// # Returns
/// Luma value (0-255)
#[inline]
pub fn luma_rgba8(r: u8, g: u8, b: u8, a: u8) -> u8 {
    let a16 = widen(a);
    let r16 = premultiply(widen(r), a16);
    let g16 = premultiply(widen(g), a16);
    let b16 = premultiply(widen(b), a16);

    // Max sum is 65536 * 65535 + 32768, which still fits in u32.
    let y = (WEIGHT_R * r16 + WEIGHT_G * g16 + WEIGHT_B * b16 + (1 << 15)) >> 24;
    y as u8
}

/// Calculate luma from an opaque RGB8 sample.
#[inline]
pub fn luma_rgb8(r: u8, g: u8, b: u8) -> u8 {
    luma_rgba8(r, g, b, u8::MAX)
}

#[inline]
fn widen(v: u8) -> u32 {
    v as u32 * 0x101
}

#[inline]
fn premultiply(c16: u32, a16: u32) -> u32 {
    c16 * a16 / 0xffff
}
