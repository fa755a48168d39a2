//! Shared test utilities for the seqshot test suite.
//!
//! Fixture builders for metadata records and raster batches, plus small
//! filesystem helpers for seeding output directories with pre-existing
//! files.

use std::path::Path;

use image::{DynamicImage, RgbImage};

use crate::metadata::MetadataRecord;
use crate::raster::ImageInput;

/// Create an empty file named `name` inside `dir`.
pub fn touch(dir: &Path, name: &str) {
    std::fs::write(dir.join(name), b"").unwrap();
}

/// Names of all `.png` files in `dir`, sorted.
pub fn png_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .flatten()
                .filter_map(|e| e.file_name().into_string().ok())
                .filter(|n| n.ends_with(".png"))
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

/// A small solid-color RGB raster.
pub fn solid_raster(width: u32, height: u32, rgb: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, image::Rgb(rgb)))
}

/// A batch of `n` distinguishable 4x4 rasters.
pub fn sample_batch(n: usize) -> ImageInput {
    let rasters = (0..n)
        .map(|i| solid_raster(4, 4, [i as u8 * 40, 0, 255 - i as u8 * 40]))
        .collect();
    ImageInput::Batch(rasters)
}

/// The minimal three-field record used in formatting examples.
pub fn sample_record() -> MetadataRecord {
    let mut record = MetadataRecord::new();
    record.push("positive_prompt", "a cat");
    record.push("steps", 20u32);
    record.push("cfg", 7.0);
    record
}

/// A record with the full canonical field set.
pub fn full_record() -> MetadataRecord {
    let mut record = MetadataRecord::new();
    record.push("model_description", "SDXL base\nfine-tuned on interiors");
    record.push("positive_prompt", "a cat");
    record.push("negative_prompt", "blurry, low quality");
    record.push("steps", 20u32);
    record.push("cfg", 7.0);
    record.push("sampler_name", "euler");
    record.push("scheduler", "normal");
    record
}
