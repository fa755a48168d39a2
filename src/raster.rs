//! Image input adapter: polymorphic sources → fixed 8-bit rasters.
//!
//! Callers hand a save operation images in whatever shape their pipeline
//! produces. [`ImageInput`] is the boundary type covering the accepted
//! shapes, and [`ImageInput::normalize`] collapses all of them into one
//! internal representation — a batch of 8-bit [`DynamicImage`]s (grayscale,
//! RGB, or RGBA) — before any sequencing or writing happens. Downstream code
//! never sees the input polymorphism.
//!
//! | Input | Handling |
//! |-------|----------|
//! | Single raster | batch of one, converted to 8-bit |
//! | Sequence of rasters | each converted to 8-bit |
//! | Wrapping record with an `images` field | unwrapped recursively |
//! | `f32` tensor `[B,H,W,C]` or `[H,W,C]`, values in `[0,1]` | clamped, scaled to `u8`; C ∈ {1, 3, 4} |
//!
//! Anything else fails conversion with a [`RasterError`], which aborts the
//! whole save before a single file is written.

use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};
use thiserror::Error;

/// Conversion failures. All of them are fatal to the batch they occur in.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("unsupported channel count {0} (expected 1, 3, or 4)")]
    UnsupportedChannels(usize),
    #[error("unsupported tensor shape {0:?} (expected [B, H, W, C] or [H, W, C])")]
    UnsupportedShape(Vec<usize>),
    #[error("tensor holds {actual} values but shape {shape:?} needs {expected}")]
    DataLengthMismatch {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },
    #[error("image batch is empty")]
    EmptyBatch,
}

/// A raw pixel tensor with a trailing channel dimension.
///
/// Shape is `[batch, height, width, channels]`; a 3-dimensional
/// `[height, width, channels]` tensor is treated as a batch of one.
/// Values are expected in `[0, 1]` and are clamped on conversion.
#[derive(Debug, Clone)]
pub struct PixelTensor {
    shape: Vec<usize>,
    data: Vec<f32>,
}

impl PixelTensor {
    pub fn new(shape: Vec<usize>, data: Vec<f32>) -> Self {
        Self { shape, data }
    }

    /// Split into per-image 8-bit rasters.
    fn into_rasters(self) -> Result<Vec<DynamicImage>, RasterError> {
        let [batch, height, width, channels] = match self.shape.len() {
            3 => [1, self.shape[0], self.shape[1], self.shape[2]],
            4 => [self.shape[0], self.shape[1], self.shape[2], self.shape[3]],
            _ => return Err(RasterError::UnsupportedShape(self.shape)),
        };

        if !matches!(channels, 1 | 3 | 4) {
            return Err(RasterError::UnsupportedChannels(channels));
        }

        let per_image = height * width * channels;
        let expected = batch * per_image;
        if self.data.len() != expected {
            return Err(RasterError::DataLengthMismatch {
                shape: self.shape,
                expected,
                actual: self.data.len(),
            });
        }

        let (w, h) = (width as u32, height as u32);
        let mut rasters = Vec::with_capacity(batch);
        for chunk in self.data.chunks_exact(per_image.max(1)).take(batch) {
            let bytes: Vec<u8> = chunk
                .iter()
                .map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
                .collect();
            rasters.push(raster_from_bytes(w, h, channels, bytes)?);
        }
        Ok(rasters)
    }
}

fn raster_from_bytes(
    w: u32,
    h: u32,
    channels: usize,
    bytes: Vec<u8>,
) -> Result<DynamicImage, RasterError> {
    let mismatch = RasterError::DataLengthMismatch {
        shape: vec![h as usize, w as usize, channels],
        expected: (w * h) as usize * channels,
        actual: bytes.len(),
    };
    match channels {
        1 => GrayImage::from_raw(w, h, bytes)
            .map(DynamicImage::ImageLuma8)
            .ok_or(mismatch),
        3 => RgbImage::from_raw(w, h, bytes)
            .map(DynamicImage::ImageRgb8)
            .ok_or(mismatch),
        4 => RgbaImage::from_raw(w, h, bytes)
            .map(DynamicImage::ImageRgba8)
            .ok_or(mismatch),
        other => Err(RasterError::UnsupportedChannels(other)),
    }
}

/// Reduce any decoded raster to one of the three 8-bit layouts.
///
/// 16-bit and float variants are narrowed; alpha survives, exotic layouts
/// collapse to RGB/RGBA.
fn to_eight_bit(img: DynamicImage) -> DynamicImage {
    match img {
        keep @ (DynamicImage::ImageLuma8(_)
        | DynamicImage::ImageRgb8(_)
        | DynamicImage::ImageRgba8(_)) => keep,
        other if other.color().has_alpha() => DynamicImage::ImageRgba8(other.to_rgba8()),
        other if other.color().channel_count() == 1 => DynamicImage::ImageLuma8(other.to_luma8()),
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    }
}

/// The accepted image input shapes. See the module docs for the table.
#[derive(Debug)]
pub enum ImageInput {
    /// A single decoded raster.
    Raster(DynamicImage),
    /// An ordered sequence of decoded rasters.
    Batch(Vec<DynamicImage>),
    /// A wrapping record whose `images` field holds any accepted form.
    Wrapped { images: Box<ImageInput> },
    /// A raw pixel tensor.
    Tensor(PixelTensor),
}

impl ImageInput {
    /// Collapse to the internal representation: a non-empty batch of
    /// 8-bit rasters, in input order.
    pub fn normalize(self) -> Result<Vec<DynamicImage>, RasterError> {
        let rasters = self.collect()?;
        if rasters.is_empty() {
            return Err(RasterError::EmptyBatch);
        }
        Ok(rasters)
    }

    fn collect(self) -> Result<Vec<DynamicImage>, RasterError> {
        match self {
            ImageInput::Raster(img) => Ok(vec![to_eight_bit(img)]),
            ImageInput::Batch(imgs) => Ok(imgs.into_iter().map(to_eight_bit).collect()),
            ImageInput::Wrapped { images } => images.collect(),
            ImageInput::Tensor(tensor) => tensor.into_rasters(),
        }
    }
}
