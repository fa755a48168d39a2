//! Persistence: sequenced PNG files with embedded tags plus Markdown sidecars.
//!
//! [`save_batch`] is the whole write path. For a batch of N images it
//! produces N PNG files named `{prefix}_{NNNNN}.png` — each carrying the
//! metadata as PNG text chunks — and N sibling `.md` documents sharing the
//! base names.
//!
//! ## Two error paths, on purpose
//!
//! The image files are the primary artifact: directory creation, input
//! conversion, and PNG writes all fail the call. The sidecar documents are
//! secondary: a failed sidecar write is recorded in the returned
//! [`SaveOutcome`] and the batch keeps going. The asymmetry is kept explicit
//! in code — images go through `?`, sidecars through a recorded `Err`.
//!
//! Conversion runs over the entire batch before the first write, so an
//! unsupported input aborts the call with zero files on disk. A PNG write
//! failure mid-batch leaves the earlier images in place; there is no
//! rollback.
//!
//! ## Text chunks
//!
//! Tags whose values fit in Latin-1 are embedded as `tEXt`, everything else
//! as `iTXt` (UTF-8), mirroring what generation-metadata readers expect.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::DynamicImage;
use serde::Serialize;
use thiserror::Error;

use crate::metadata::MetadataRecord;
use crate::raster::{ImageInput, RasterError};
use crate::sequence;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("could not create output directory {path}: {source}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported image input: {0}")]
    UnsupportedImageFormat(#[from] RasterError),
    #[error("failed to write {path}: {source}")]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("PNG encoding failed for {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: png::EncodingError,
    },
}

/// A sidecar write that failed. Informational only — the save succeeded.
#[derive(Debug, Clone, Serialize)]
pub struct SidecarFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of a successful [`save_batch`] call.
#[derive(Debug, Serialize)]
pub struct SaveOutcome {
    /// Written image paths, in input batch order.
    pub paths: Vec<PathBuf>,
    /// The line-per-field metadata rendering — the one value surfaced to
    /// external callers.
    pub metadata_line: String,
    /// Sidecar documents that could not be written.
    pub sidecar_failures: Vec<SidecarFailure>,
}

/// Save a batch of images into `directory` under `prefix`.
///
/// Creates the directory (and parents) if missing, resolves the prefix via
/// the whitespace-fallback rule, allocates sequence numbers by scanning the
/// directory, and writes one PNG + one Markdown sidecar per image. Numbers
/// are strictly increasing within the batch; each image re-checks existence
/// before claiming its name.
pub fn save_batch(
    images: ImageInput,
    directory: &Path,
    prefix: &str,
    default_prefix: &str,
    record: &MetadataRecord,
) -> Result<SaveOutcome, SaveError> {
    std::fs::create_dir_all(directory).map_err(|source| SaveError::DirectoryCreation {
        path: directory.to_path_buf(),
        source,
    })?;

    let prefix = sequence::resolve_prefix(prefix, default_prefix);
    let start = sequence::next_sequence_number(directory, &prefix);

    // Convert everything before writing anything: a bad input means
    // zero files for this call.
    let rasters = images.normalize()?;

    let tags = record.format_tags();
    let document = record.format_document();

    let mut paths = Vec::with_capacity(rasters.len());
    let mut sidecar_failures = Vec::new();

    for (idx, raster) in rasters.iter().enumerate() {
        let (_, path) = sequence::first_free(directory, &prefix, start + idx as u32);
        write_png(&path, raster, &tags)?;

        let sidecar = path.with_extension("md");
        if let Err(source) = std::fs::write(&sidecar, &document) {
            sidecar_failures.push(SidecarFailure {
                path: sidecar,
                reason: source.to_string(),
            });
        }

        paths.push(path);
    }

    Ok(SaveOutcome {
        paths,
        metadata_line: record.format_line_string(),
        sidecar_failures,
    })
}

/// Embed one tag, choosing `tEXt` for Latin-1 values and `iTXt` otherwise.
fn add_tag<W: Write>(
    encoder: &mut png::Encoder<'_, W>,
    key: &str,
    value: &str,
) -> Result<(), png::EncodingError> {
    if value.chars().all(|c| (c as u32) <= 0xFF) {
        encoder.add_text_chunk(key.to_string(), value.to_string())
    } else {
        encoder.add_itxt_chunk(key.to_string(), value.to_string())
    }
}

fn write_png(
    path: &Path,
    raster: &DynamicImage,
    tags: &[(String, String)],
) -> Result<(), SaveError> {
    let file = File::create(path).map_err(|source| SaveError::ImageWrite {
        path: path.to_path_buf(),
        source,
    })?;
    let encode_err = |source| SaveError::Encode {
        path: path.to_path_buf(),
        source,
    };

    // Normalization guarantees 8-bit Luma/Rgb/Rgba; the final arm is a
    // safety net for rasters that bypassed it.
    let (color, data): (png::ColorType, std::borrow::Cow<'_, [u8]>) = match raster {
        DynamicImage::ImageLuma8(img) => (png::ColorType::Grayscale, img.as_raw().into()),
        DynamicImage::ImageRgb8(img) => (png::ColorType::Rgb, img.as_raw().into()),
        DynamicImage::ImageRgba8(img) => (png::ColorType::Rgba, img.as_raw().into()),
        other => (png::ColorType::Rgba, other.to_rgba8().into_raw().into()),
    };

    let mut encoder = png::Encoder::new(BufWriter::new(file), raster.width(), raster.height());
    encoder.set_color(color);
    encoder.set_depth(png::BitDepth::Eight);
    for (key, value) in tags {
        add_tag(&mut encoder, key, value).map_err(encode_err)?;
    }

    let mut writer = encoder.write_header().map_err(encode_err)?;
    writer.write_image_data(&data).map_err(encode_err)?;
    writer.finish().map_err(encode_err)
}
