//! CLI output formatting for save results.
//!
//! # Information-First Display
//!
//! The primary display for every saved image is its positional index and
//! filename; sidecar status is shown as an indented context line. Sidecar
//! failures are warnings, not errors — the save succeeded — so they appear
//! inline where the file would have been, never as a separate error dump.
//!
//! # Output Format
//!
//! ```text
//! Saved 3 images → output
//!     001 render_00005.png
//!         Sidecar: render_00005.md
//!     002 render_00006.png
//!         Sidecar: failed (Is a directory (os error 21))
//!     003 render_00007.png
//!         Sidecar: render_00007.md
//!
//! Metadata
//!     Model Description: SDXL base
//!     Positive Prompt: a cat
//!     Steps: 20
//! ```
//!
//! # Architecture
//!
//! [`format_save_output`] returns `Vec<String>` for testability; the
//! `print_*` wrapper writes to stdout. Format functions are pure — no I/O,
//! no side effects.

use crate::writer::SaveOutcome;
use std::collections::HashMap;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Format a save outcome: one indexed line per image, sidecar status
/// indented beneath it, then the metadata line rendering as its own section.
pub fn format_save_output(outcome: &SaveOutcome, directory: &Path) -> Vec<String> {
    let plural = if outcome.paths.len() == 1 {
        "image"
    } else {
        "images"
    };
    let mut lines = vec![format!(
        "Saved {} {plural} \u{2192} {}",
        outcome.paths.len(),
        directory.display()
    )];

    let failures: HashMap<&Path, &str> = outcome
        .sidecar_failures
        .iter()
        .map(|f| (f.path.as_path(), f.reason.as_str()))
        .collect();

    for (i, path) in outcome.paths.iter().enumerate() {
        lines.push(format!("    {} {}", format_index(i + 1), file_name(path)));
        let sidecar = path.with_extension("md");
        match failures.get(sidecar.as_path()) {
            Some(reason) => lines.push(format!("        Sidecar: failed ({reason})")),
            None => lines.push(format!("        Sidecar: {}", file_name(&sidecar))),
        }
    }

    if !outcome.metadata_line.is_empty() {
        lines.push(String::new());
        lines.push("Metadata".to_string());
        for line in outcome.metadata_line.lines() {
            lines.push(format!("    {line}"));
        }
    }

    lines
}

/// Print save output to stdout.
pub fn print_save_output(outcome: &SaveOutcome, directory: &Path) {
    for line in format_save_output(outcome, directory) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::SidecarFailure;
    use std::path::PathBuf;

    fn outcome(paths: &[&str], failures: &[(&str, &str)]) -> SaveOutcome {
        SaveOutcome {
            paths: paths.iter().map(PathBuf::from).collect(),
            metadata_line: "Positive Prompt: a cat\nSteps: 20".to_string(),
            sidecar_failures: failures
                .iter()
                .map(|(p, r)| SidecarFailure {
                    path: PathBuf::from(p),
                    reason: r.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn header_counts_and_points_at_directory() {
        let out = outcome(&["out/img_00001.png"], &[]);
        let lines = format_save_output(&out, Path::new("out"));
        assert_eq!(lines[0], "Saved 1 image \u{2192} out");
    }

    #[test]
    fn plural_for_multiple_images() {
        let out = outcome(&["out/img_00001.png", "out/img_00002.png"], &[]);
        let lines = format_save_output(&out, Path::new("out"));
        assert_eq!(lines[0], "Saved 2 images \u{2192} out");
    }

    #[test]
    fn images_are_indexed_with_sidecar_context() {
        let out = outcome(&["out/img_00005.png", "out/img_00006.png"], &[]);
        let lines = format_save_output(&out, Path::new("out"));
        assert_eq!(lines[1], "    001 img_00005.png");
        assert_eq!(lines[2], "        Sidecar: img_00005.md");
        assert_eq!(lines[3], "    002 img_00006.png");
        assert_eq!(lines[4], "        Sidecar: img_00006.md");
    }

    #[test]
    fn failed_sidecars_show_reason_inline() {
        let out = outcome(
            &["out/img_00001.png"],
            &[("out/img_00001.md", "permission denied")],
        );
        let lines = format_save_output(&out, Path::new("out"));
        assert_eq!(lines[2], "        Sidecar: failed (permission denied)");
    }

    #[test]
    fn metadata_section_indents_each_line() {
        let out = outcome(&["out/img_00001.png"], &[]);
        let lines = format_save_output(&out, Path::new("out"));
        let meta_at = lines.iter().position(|l| l == "Metadata").unwrap();
        assert_eq!(lines[meta_at - 1], "");
        assert_eq!(lines[meta_at + 1], "    Positive Prompt: a cat");
        assert_eq!(lines[meta_at + 2], "    Steps: 20");
    }
}
