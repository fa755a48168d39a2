//! Sequence number allocation for output filenames.
//!
//! Output files follow the `{prefix}_{NNNNN}.png` convention: a user-chosen
//! prefix, an underscore, and a 5-digit zero-padded sequence number. The next
//! number is re-derived from a directory scan on every save — there is no
//! persisted counter, so independent invocations writing into the same
//! directory stay out of each other's way without shared state.
//!
//! ## Allocation
//!
//! 1. Scan the directory for entries that start with `{prefix}_` and end in
//!    `.png`, both case-insensitively.
//! 2. For each match, take the final run of decimal digits immediately before
//!    the extension. Entries whose digits don't parse are skipped.
//! 3. Seed the candidate at `max + 1` and walk it forward past any name that
//!    already exists on disk.
//!
//! The existence walk in step 3 covers files the digit scan cannot account
//! for (legacy names, foreign numbering schemes). It checks directory state
//! at the instant of the call — it is not a reservation. Two processes
//! allocating against the same prefix at the same time can pick the same
//! number, and the filesystem's create/overwrite semantics decide the winner.
//! [`next_sequence_number`] has no side effects by design.

use std::path::{Path, PathBuf};

/// Apply the prefix fallback rule: a trimmed, non-empty input wins,
/// otherwise the fallback is used verbatim.
pub fn resolve_prefix(input: &str, fallback: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Render the canonical filename for a (prefix, sequence number) pair.
pub fn sequence_filename(prefix: &str, n: u32) -> String {
    format!("{prefix}_{n:05}.png")
}

/// Final run of ASCII digits in `stem`, or `None` if it doesn't end in one.
fn trailing_digits(stem: &str) -> Option<&str> {
    let start = stem
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()?
        .0;
    Some(&stem[start..])
}

/// Next unused sequence number for `prefix` in `directory`.
///
/// A missing or unreadable directory counts as containing zero matching
/// files; it is not created here. Returns `1` when nothing matches.
pub fn next_sequence_number(directory: &Path, prefix: &str) -> u32 {
    let needle = format!("{}_", prefix.to_lowercase());
    let mut max_n: u32 = 0;

    if let Ok(entries) = std::fs::read_dir(directory) {
        for entry in entries.flatten() {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            let lower = name.to_lowercase();
            if !lower.starts_with(&needle) || !lower.ends_with(".png") {
                continue;
            }
            // ".png" is ASCII, so byte slicing is safe here.
            let stem = &name[..name.len() - 4];
            if let Some(n) = trailing_digits(stem).and_then(|d| d.parse::<u32>().ok()) {
                max_n = max_n.max(n);
            }
        }
    }

    first_free(directory, prefix, max_n + 1).0
}

/// First sequence number at or after `seed` whose filename does not exist
/// in `directory`, together with the full path for it.
///
/// Callers saving a batch seed this at `start + index` per image so numbers
/// stay strictly increasing within one batch.
pub fn first_free(directory: &Path, prefix: &str, seed: u32) -> (u32, PathBuf) {
    let mut candidate = seed;
    loop {
        let path = directory.join(sequence_filename(prefix, candidate));
        if !path.exists() {
            return (candidate, path);
        }
        candidate += 1;
    }
}
