//! Runtime font discovery
//!
//! Charts need a TTF for axis labels and cell text. Rather than embedding
//! a font, probe the usual system locations and take the first one that
//! parses. TTC collections load at face index 0.

use std::fs;

use ab_glyph::FontVec;
use anyhow::{Result, bail};

const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/usr/share/fonts/gnu-free/FreeSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Load the first usable system font.
pub fn load_font() -> Result<FontVec> {
    for path in FONT_CANDIDATES {
        if let Ok(bytes) = fs::read(path) {
            if let Ok(font) = FontVec::try_from_vec_and_index(bytes, 0) {
                return Ok(font);
            }
        }
    }
    bail!(
        "no usable font found; searched:\n  {}",
        FONT_CANDIDATES.join("\n  ")
    )
}
