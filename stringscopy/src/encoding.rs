//! Byte-order-mark sniffing and declared-vs-detected encoding reconciliation.
//!
//! Localization sources are often labeled with one charset while the bytes on
//! disk carry the marker of another. The pipeline trusts the marker.

use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE};

/// Canonical family name shared by both UTF-16 byte orders.
pub const UTF16_FAMILY: &str = "UTF-16";

/// Canonical name of UTF-8.
pub const UTF8: &str = "UTF-8";

/// Encoding guessed from the leading bytes of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SniffResult {
    Utf16Be,
    Utf16Le,
    Utf8,
    Unknown,
}

impl SniffResult {
    /// The family name used for decisions, folding both UTF-16 byte orders.
    pub fn family(self) -> Option<&'static str> {
        match self {
            SniffResult::Utf16Be | SniffResult::Utf16Le => Some(UTF16_FAMILY),
            SniffResult::Utf8 => Some(UTF8),
            SniffResult::Unknown => None,
        }
    }

    /// Length in bytes of the detected marker.
    pub fn bom_len(self) -> usize {
        match self {
            SniffResult::Utf16Be | SniffResult::Utf16Le => 2,
            SniffResult::Utf8 => 3,
            SniffResult::Unknown => 0,
        }
    }
}

impl std::fmt::Display for SniffResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SniffResult::Utf16Be => "UTF-16BE",
            SniffResult::Utf16Le => "UTF-16LE",
            SniffResult::Utf8 => "UTF-8",
            SniffResult::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Guesses the encoding of `bytes` from its byte-order mark only.
///
/// Never looks past the first three bytes and never fails; short or unmarked
/// input is [`SniffResult::Unknown`].
pub fn sniff(bytes: &[u8]) -> SniffResult {
    match Encoding::for_bom(bytes) {
        Some((encoding, _)) if encoding == UTF_16BE => SniffResult::Utf16Be,
        Some((encoding, _)) if encoding == UTF_16LE => SniffResult::Utf16Le,
        Some((encoding, _)) if encoding == UTF_8 => SniffResult::Utf8,
        _ => SniffResult::Unknown,
    }
}

/// Returns the key two charset labels are compared by.
///
/// `UTF-16`, `UTF-16BE` and `UTF-16LE` all fold to `UTF-16`. Other labels known
/// to `encoding_rs` fold to their canonical name, anything else to upper case.
pub fn fold_label(label: &str) -> String {
    let trimmed = label.trim();
    let upper = trimmed.to_ascii_uppercase();
    match upper.as_str() {
        "UTF-16" | "UTF-16BE" | "UTF-16LE" | "UTF16" | "UTF16BE" | "UTF16LE" => {
            UTF16_FAMILY.to_string()
        }
        _ => match Encoding::for_label(trimmed.as_bytes()) {
            Some(encoding) if encoding == UTF_16LE || encoding == UTF_16BE => {
                UTF16_FAMILY.to_string()
            }
            Some(encoding) => encoding.name().to_ascii_uppercase(),
            None => upper,
        },
    }
}

/// Whether `label` names UTF-8.
pub fn is_utf8(label: &str) -> bool {
    fold_label(label) == UTF8
}

/// A declared encoding that disagrees with the bytes of the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingMismatch {
    pub declared: String,
    pub detected: SniffResult,
}

impl std::fmt::Display for EncodingMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "declared {} but content is {} ({})",
            self.declared,
            self.detected.family().unwrap_or("unknown"),
            self.detected
        )
    }
}

/// Outcome of comparing the sniffed encoding with the declared one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// The encoding the rest of the pipeline should trust.
    pub effective: Option<String>,
    /// Set when the declared encoding was overruled.
    pub mismatch: Option<EncodingMismatch>,
}

/// Decides the effective encoding of a file.
///
/// The sniffed family wins whenever both values exist and differ after
/// folding. Otherwise the declared value is kept as given.
pub fn reconcile(sniffed: SniffResult, declared: Option<&str>) -> Reconciliation {
    match (sniffed.family(), declared) {
        (Some(family), Some(declared)) if fold_label(declared) != family => Reconciliation {
            effective: Some(family.to_string()),
            mismatch: Some(EncodingMismatch {
                declared: declared.to_string(),
                detected: sniffed,
            }),
        },
        _ => Reconciliation {
            effective: declared.map(str::to_string),
            mismatch: None,
        },
    }
}
