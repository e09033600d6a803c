//! Input fitting: bound loaded images before they reach the pipeline.
//!
//! Large photos are shrunk so the per-effect cost stays interactive. The
//! aspect ratio is kept and resampling is `image::imageops::thumbnail`, an
//! integer area average, so the same input always yields the same buffer.

use gs_common::{PixelBuffer, PixelBufferError};
use image::{imageops, RgbaImage};
use tracing::debug;

use crate::PipelineError;

/// Target size for a `width`x`height` image bounded by `max_width`x`max_height`.
///
/// `ratio = min(max_w / w, max_h / h)`; each side is scaled by `ratio`, floored and kept at
/// least 1. Images already inside the bounds keep their size.
pub fn fit_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width <= max_width && height <= max_height {
        return (width, height);
    }
    // Compare max_w/w against max_h/h in integers so flooring is exact.
    let (w, h) = (u64::from(width), u64::from(height));
    let (max_w, max_h) = (u64::from(max_width), u64::from(max_height));
    let (num, den) = if max_w * h <= max_h * w {
        (max_w, w)
    } else {
        (max_h, h)
    };
    let fit = |side: u64| ((side * num / den) as u32).max(1);
    (fit(w), fit(h))
}

/// Downscale `source` to fit within the bounds by area averaging.
///
/// Returns an unchanged clone when no scaling is needed.
pub fn downscale_to_fit(
    source: &PixelBuffer,
    max_width: u32,
    max_height: u32,
) -> Result<PixelBuffer, PipelineError> {
    let (src_w, src_h) = (source.width(), source.height());
    let (dst_w, dst_h) = fit_dimensions(src_w, src_h, max_width.max(1), max_height.max(1));
    if (dst_w, dst_h) == (src_w, src_h) {
        return Ok(source.clone());
    }

    debug!(src_w, src_h, dst_w, dst_h, "Downscaling input image");

    let expected = PixelBuffer::byte_len_for(src_w, src_h)?;
    let got = source.byte_size();
    let img = RgbaImage::from_raw(src_w, src_h, source.samples().to_vec()).ok_or(
        PixelBufferError::InvalidBuffer {
            width: src_w,
            height: src_h,
            expected,
            got,
        },
    )?;
    let fitted = imageops::thumbnail(&img, dst_w, dst_h);

    Ok(PixelBuffer::new(dst_w, dst_h, fitted.into_raw())?)
}
