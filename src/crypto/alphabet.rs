//! The fixed, process-lifetime constants the cipher is built on: the raw
//! glyph alphabet `U`, the header alphabet `H`, and the keyword vocabulary
//! `K`.
//!
//! None of these depend on a password or salt; they are computed once and
//! cached behind [`std::sync::OnceLock`] so that constructing many
//! [`crate::CipherEngine`]s (e.g. one per file during a recursive directory
//! walk) does not repeat the work.

use std::sync::OnceLock;

use crate::error::{Error, Result};

/// Minimum acceptable size of the raw alphabet `U`.
pub const MIN_RAW_ALPHABET_LEN: usize = 1080;

/// The four closed Unicode code point ranges the raw alphabet is drawn from:
/// emoticons, misc symbols & pictographs, transport & map symbols, and
/// supplemental symbols & pictographs.
const RAW_RANGES: [(u32, u32); 4] = [
    (0x1F600, 0x1F64F),
    (0x1F300, 0x1F5FF),
    (0x1F680, 0x1F6FF),
    (0x1F900, 0x1F9FF),
];

/// The 16-glyph header alphabet: moon phases 0..7, then clocks 1..8.
///
/// Indexed 0..15 and used as a nibble-to-glyph map for the header and
/// footer.
pub const HEADER_ALPHABET: [char; 16] = [
    '🌑', '🌒', '🌓', '🌔', '🌕', '🌖', '🌗', '🌘', '🕐', '🕑', '🕒', '🕓', '🕔', '🕕', '🕖', '🕗',
];

/// The 38 keyword tokens, in binding order. Order is load-bearing: position
/// `i` in this list is bound to position `i` of the shuffled keyword ring.
pub const KEYWORDS: [&str; 38] = [
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "int", "long", "register", "return", "short",
    "signed", "sizeof", "static", "struct", "switch", "typedef", "union", "unsigned", "void",
    "volatile", "while", "include", "define", "main", "printf", "NULL", "#include", "#define",
];

fn header_set() -> &'static std::collections::HashSet<u32> {
    static SET: OnceLock<std::collections::HashSet<u32>> = OnceLock::new();
    SET.get_or_init(|| HEADER_ALPHABET.iter().map(|&c| c as u32).collect())
}

/// Builds the raw alphabet `U`: every code point in [`RAW_RANGES`], in
/// ascending numeric order, excluding the 16 header glyphs.
///
/// Implementations must not assume every code point in the ranges is an
/// assigned emoji; this simply iterates the closed integer intervals and
/// accepts all of them (minus the header exclusions), exactly as specified.
fn build_raw_alphabet() -> Vec<char> {
    let header = header_set();
    let mut out = Vec::with_capacity(MIN_RAW_ALPHABET_LEN + 64);
    for &(lo, hi) in &RAW_RANGES {
        for cp in lo..=hi {
            if header.contains(&cp) {
                continue;
            }
            if let Some(c) = char::from_u32(cp) {
                out.push(c);
            }
        }
    }
    out
}

/// Returns the raw alphabet `U`, computed once per process.
///
/// # Errors
///
/// Returns [`Error::AlphabetUnderflow`] if fewer than
/// [`MIN_RAW_ALPHABET_LEN`] glyphs were produced.
pub fn raw_alphabet() -> Result<&'static [char]> {
    static ALPHABET: OnceLock<Vec<char>> = OnceLock::new();
    let alphabet = ALPHABET.get_or_init(build_raw_alphabet);
    if alphabet.len() < MIN_RAW_ALPHABET_LEN {
        return Err(Error::AlphabetUnderflow {
            found: alphabet.len(),
            minimum: MIN_RAW_ALPHABET_LEN,
        });
    }
    Ok(alphabet.as_slice())
}

/// Looks up the nibble a header glyph represents, or `None` if `c` is not a
/// member of [`HEADER_ALPHABET`].
pub fn header_nibble(c: char) -> Option<u8> {
    HEADER_ALPHABET.iter().position(|&h| h == c).map(|i| i as u8)
}
