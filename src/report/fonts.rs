//! Report font resolution.
//!
//! Reports carry Japanese text, so the renderer needs a CJK-capable font
//! file to embed. The candidate list is probed once per process: the first
//! file that exists and parses as an embeddable font wins, and its bytes
//! are cached so every later document reuses them. When nothing usable is
//! found the built-in Helvetica is used instead; documents still render,
//! with Japanese glyphs missing, and the degradation is logged.
//!
//! `REPORT_FONT` overrides the probe order with an explicit path.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use once_cell::sync::Lazy;
use printpdf::{Mm, PdfDocument};

pub const FONT_ENV: &str = "REPORT_FONT";

const CANDIDATE_PATHS: [&str; 4] = [
    "C:/Windows/Fonts/msgothic.ttc",
    "/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/ipafont-gothic/ipag.ttf",
];

/// The font every report document is set in.
#[derive(Clone, Debug)]
pub enum DocumentFont {
    /// A font file read from disk, embedded into each document.
    Embedded { name: String, data: Vec<u8> },
    /// Built-in Helvetica, the degraded fallback.
    Builtin,
}

impl DocumentFont {
    pub fn is_embedded(&self) -> bool {
        matches!(self, DocumentFont::Embedded { .. })
    }
}

static DOCUMENT_FONT: Lazy<DocumentFont> = Lazy::new(|| {
    let mut candidates: Vec<String> = Vec::new();
    if let Ok(path) = std::env::var(FONT_ENV) {
        if !path.is_empty() {
            candidates.push(path);
        }
    }
    candidates.extend(CANDIDATE_PATHS.iter().map(|p| p.to_string()));
    resolve_from_candidates(&candidates)
});

/// The process-wide report font. Resolved on first use.
pub fn document_font() -> &'static DocumentFont {
    &DOCUMENT_FONT
}

/// Probes the given paths in order and returns the first embeddable font,
/// or the builtin fallback when none works.
pub fn resolve_from_candidates<P: AsRef<Path>>(paths: &[P]) -> DocumentFont {
    for path in paths {
        let path = path.as_ref();
        let data = match fs::read(path) {
            Ok(data) => data,
            Err(_) => continue,
        };
        if !embeddable(&data) {
            log::warn!("report font {} exists but cannot be embedded", path.display());
            continue;
        }
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("embedded")
            .to_string();
        log::info!("report font: {}", path.display());
        return DocumentFont::Embedded { name, data };
    }
    log::warn!("no CJK-capable font found, reports fall back to Helvetica");
    DocumentFont::Builtin
}

/// A font is usable only if the PDF writer accepts it. Parsing against a
/// scratch document catches corrupt or unsupported files up front.
fn embeddable(data: &[u8]) -> bool {
    let (doc, _, _) = PdfDocument::new("font-probe", Mm(10.0), Mm(10.0), "probe");
    doc.add_external_font(Cursor::new(data)).is_ok()
}
