//! Generation metadata: the ordered record and its three renderings.
//!
//! One [`MetadataRecord`] travels with every save and is rendered three ways:
//!
//! | Rendering | Destination | Shape |
//! |-----------|-------------|-------|
//! | [`format_tags`](MetadataRecord::format_tags) | PNG text chunks | `(key, stringified value)` pairs |
//! | [`format_line_string`](MetadataRecord::format_line_string) | caller-facing output value | `Title Case Key: value` per line |
//! | [`format_document`](MetadataRecord::format_document) | Markdown sidecar | `##` heading per field, fenced multiline values |
//!
//! Field order is insertion order in all three. Values are emitted verbatim —
//! no markdown escaping — so a prompt containing backticks lands in the
//! sidecar exactly as typed.
//!
//! ## Value stringification
//!
//! Integers and strings render the obvious way. Floats with no fractional
//! part keep a trailing `.0` (`7.0` → `"7.0"`, not `"7"`), so a guidance
//! scale reads as the decimal the user entered.

use std::fmt;

/// A single metadata value: string, integer, or float.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    Str(String),
    Int(i64),
    Float(f64),
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaValue::Str(s) => f.write_str(s),
            MetaValue::Int(n) => write!(f, "{n}"),
            MetaValue::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            MetaValue::Float(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for MetaValue {
    fn from(s: &str) -> Self {
        MetaValue::Str(s.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(s: String) -> Self {
        MetaValue::Str(s)
    }
}

impl From<i64> for MetaValue {
    fn from(n: i64) -> Self {
        MetaValue::Int(n)
    }
}

impl From<u32> for MetaValue {
    fn from(n: u32) -> Self {
        MetaValue::Int(n.into())
    }
}

impl From<f64> for MetaValue {
    fn from(v: f64) -> Self {
        MetaValue::Float(v)
    }
}

/// Ordered field-name → value mapping.
///
/// Backed by a plain vector: the field count is small and fixed per save,
/// and insertion order must survive into every rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataRecord {
    fields: Vec<(String, MetaValue)>,
}

impl MetadataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field. Keys are not deduplicated; callers own uniqueness.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<MetaValue>) {
        self.fields.push((key.into(), value.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// The embeddable tag set: keys unchanged, values stringified.
    pub fn format_tags(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect()
    }

    /// Line-per-field rendering: `Title Case Key: value`, newline-joined,
    /// no trailing newline. This is the only value surfaced to callers of
    /// a save as an output.
    pub fn format_line_string(&self) -> String {
        self.fields
            .iter()
            .map(|(k, v)| format!("{}: {v}", title_case(k)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Structured Markdown document for the sidecar file.
    ///
    /// One `##` section per field. Multiline string values are wrapped in a
    /// triple-backtick fence so prompts keep their line breaks; everything
    /// else renders as a bare line. Two blank lines separate sections.
    pub fn format_document(&self) -> String {
        let mut lines: Vec<String> = vec!["# Image Metadata".to_string(), String::new()];

        for (key, value) in &self.fields {
            lines.push(format!("## {}", title_case(key)));
            lines.push(String::new());

            match value {
                MetaValue::Str(s) if s.contains('\n') => {
                    lines.push("```".to_string());
                    lines.push(s.clone());
                    lines.push("```".to_string());
                }
                other => lines.push(other.to_string()),
            }

            lines.push(String::new());
            lines.push(String::new());
        }

        lines.join("\n")
    }
}

/// `model_description` → `Model Description`: underscores become spaces,
/// each word gets an initial capital with the rest lowercased.
fn title_case(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Join prompt fragments into one string, dropping empty and
/// whitespace-only parts. Fragments are used untrimmed.
pub fn join_fragments<'a>(parts: impl IntoIterator<Item = &'a str>, sep: &str) -> String {
    parts
        .into_iter()
        .filter(|s| !s.trim().is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}
