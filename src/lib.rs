//! # seqshot
//!
//! Save batches of raster images to disk with collision-avoiding sequence
//! numbers, generation metadata embedded in the PNG, and a Markdown sidecar
//! per image. Your output directory is the data source: the next filename is
//! always re-derived from what is actually on disk, so independent runs can
//! share a directory without a counter file or a lock.
//!
//! # Architecture: Adapter → Allocator → Writer
//!
//! A save call moves through three small, separately testable pieces:
//!
//! ```text
//! 1. raster     any accepted input shape  →  batch of 8-bit rasters
//! 2. sequence   directory scan            →  next free {prefix}_{NNNNN}.png
//! 3. writer     rasters + metadata        →  PNGs with text chunks + .md sidecars
//! ```
//!
//! The adapter runs first and fails fast: nothing touches the filesystem
//! until the whole batch has a known pixel layout. The allocator is a pure
//! read of directory state. Only the writer creates files.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`raster`] | Input adapter — single images, batches, wrapping records, and `f32` pixel tensors all normalize to 8-bit rasters |
//! | [`sequence`] | Sequence allocation — scan-derived maximum plus an existence walk, no persisted counter |
//! | [`metadata`] | The ordered metadata record and its three renderings (tags, line string, Markdown document) |
//! | [`sampler`] | Typed sampler settings, range validation, canonical record assembly |
//! | [`writer`] | The save path: sequenced PNGs with embedded tags, best-effort sidecars |
//! | [`explorer`] | Open a file or directory in the platform file manager |
//! | [`config`] | `seqshot.toml` loading and validation, the named folder map |
//! | [`output`] | CLI output formatting — pure `format_*` functions plus print wrappers |
//!
//! # Design Decisions
//!
//! ## Scan-Derived Numbering, No Counter State
//!
//! The next sequence number comes from reading the directory, every time.
//! A persisted counter would need locking to be correct across independent
//! processes writing to the same directory; disk state needs none to stay
//! consistent with itself. The existence walk after the scan absorbs files
//! the digit parse can't account for. What this deliberately does **not**
//! give you is cross-process atomicity — two simultaneous saves can pick the
//! same number and the filesystem's last writer wins. For a single-operator
//! tool that trade is taken openly rather than hidden behind a lock that
//! would still leak on unclean exits.
//!
//! ## Dual-Format Metadata Persistence
//!
//! Every image carries its generation metadata twice: as PNG text chunks
//! (machine-readable, travels with the file) and as a Markdown sidecar
//! (human-readable, greppable, renders anywhere). The two are generated
//! from one ordered record so they can never disagree on content or field
//! order.
//!
//! ## Sidecars Are Best-Effort
//!
//! A sidecar that cannot be written must not cost you the image — the pixels
//! are the artifact that cannot be regenerated cheaply. Sidecar write errors
//! are collected into the save outcome and reported as warnings; image write
//! errors fail the call. The two error paths are kept visibly separate in
//! the writer rather than funneled through one handler.
//!
//! ## PNG Encoding via the `png` Crate
//!
//! Text chunks must be registered on the encoder before the header is
//! written, which the high-level `image::save` path doesn't expose. The
//! writer drives the `png` crate directly: `tEXt` for Latin-1 values,
//! `iTXt` for the rest, matching what generation-metadata readers parse.

pub mod config;
pub mod explorer;
pub mod metadata;
pub mod output;
pub mod raster;
pub mod sampler;
pub mod sequence;
pub mod writer;

#[cfg(test)]
pub(crate) mod test_helpers;
