//! RGBA8 pixel buffer: the value every effect consumes and produces.
//!
//! Samples are row-major, top-to-bottom, 4 bytes per pixel in R, G, B, A
//! order. The length invariant `samples.len() == width * height * 4` is
//! checked on construction and cannot be broken afterwards: mutable access
//! is only ever handed out as a fixed-length slice.

use crate::error::PixelBufferError;

/// Bytes per RGBA8 pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// Width/height-tagged RGBA8 image.
///
/// `Clone` is a deep copy, so a cloned buffer can be processed without
/// touching the original.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    samples: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer from raw RGBA bytes.
    ///
    /// Fails with [`PixelBufferError::InvalidBuffer`] if `samples.len()` is not
    /// exactly `width * height * 4`, and with
    /// [`PixelBufferError::InvalidDimensions`] if either dimension is zero.
    pub fn new(width: u32, height: u32, samples: Vec<u8>) -> Result<Self, PixelBufferError> {
        let expected = Self::byte_len_for(width, height)?;
        if samples.len() != expected {
            return Err(PixelBufferError::InvalidBuffer {
                width,
                height,
                expected,
                got: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Create a buffer where every pixel is `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, PixelBufferError> {
        let len = Self::byte_len_for(width, height)?;
        let samples = rgba.iter().copied().cycle().take(len).collect();
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Create a buffer by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> [u8; 4],
    ) -> Result<Self, PixelBufferError> {
        let len = Self::byte_len_for(width, height)?;
        let mut samples = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                samples.extend_from_slice(&f(x, y));
            }
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Required byte length for the given dimensions.
    pub fn byte_len_for(width: u32, height: u32) -> Result<usize, PixelBufferError> {
        if width == 0 || height == 0 {
            return Err(PixelBufferError::InvalidDimensions { width, height });
        }
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
            .ok_or(PixelBufferError::InvalidDimensions { width, height })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether `other` has the same width and height.
    pub fn same_dimensions(&self, other: &PixelBuffer) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Raw RGBA bytes.
    #[inline]
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Raw RGBA bytes, mutable. The slice length is fixed.
    #[inline]
    pub fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }

    /// Consume the buffer and return its bytes.
    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }

    /// Byte size of the sample data.
    pub fn byte_size(&self) -> usize {
        self.samples.len()
    }

    /// Byte offset of pixel `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn byte_index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds for {}x{}",
            self.width,
            self.height
        );
        (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL
    }

    /// Read pixel `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.byte_index(x, y);
        [
            self.samples[i],
            self.samples[i + 1],
            self.samples[i + 2],
            self.samples[i + 3],
        ]
    }

    /// Read pixel `(x, y)`, or `None` if out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        (x < self.width && y < self.height).then(|| self.pixel(x, y))
    }

    /// Read a pixel with signed coordinates clamped to the nearest edge.
    #[inline]
    pub fn pixel_clamped(&self, x: i64, y: i64) -> [u8; 4] {
        let cx = x.clamp(0, self.width as i64 - 1) as u32;
        let cy = y.clamp(0, self.height as i64 - 1) as u32;
        self.pixel(cx, cy)
    }

    /// Write pixel `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = self.byte_index(x, y);
        self.samples[i..i + BYTES_PER_PIXEL].copy_from_slice(&rgba);
    }

    /// Bytes of row `y`.
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &self.samples[start..start + stride]
    }

    /// Mutable bytes of row `y`.
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &mut self.samples[start..start + stride]
    }

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// Iterate over pixels as 4-byte chunks.
    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> {
        self.samples.chunks_exact(BYTES_PER_PIXEL)
    }

    /// Iterate mutably over pixels as 4-byte chunks.
    pub fn pixels_mut(&mut self) -> impl Iterator<Item = &mut [u8]> {
        self.samples.chunks_exact_mut(BYTES_PER_PIXEL)
    }
}
