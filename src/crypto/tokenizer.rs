//! Encode-side tokenizer: partitions plaintext into an alternating sequence
//! of keyword tokens and raw-byte data runs.

use std::sync::OnceLock;

use regex::Regex;

use super::alphabet::KEYWORDS;

/// One piece of the partitioned input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// A recognized keyword, carrying its index into [`KEYWORDS`].
    Keyword(usize),
    /// A run of bytes that matched no keyword.
    Data(&'a [u8]),
}

/// Builds the combined alternation regex.
///
/// Symbolic keywords (`#include`, `#define`) are anchored first in the
/// alternation so the `#`-prefixed form wins the leftmost match against
/// their alphabetic-only counterparts (`include`, `define`); word-like
/// keywords are wrapped in `\b` boundaries, symbolic ones are matched
/// literally with no boundary constraint.
fn pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        let mut symbolic = Vec::new();
        let mut word_like = Vec::new();
        for &kw in KEYWORDS.iter() {
            if kw.starts_with('#') {
                symbolic.push(regex::escape(kw));
            } else {
                word_like.push(regex::escape(kw));
            }
        }
        // Longest match among equal-priority alternatives first, so e.g.
        // a hypothetical keyword that is a prefix of another loses ties
        // correctly; also keeps symbolic keywords ahead of their
        // alphabetic suffixes.
        symbolic.sort_by_key(|s| std::cmp::Reverse(s.len()));
        word_like.sort_by_key(|s| std::cmp::Reverse(s.len()));

        let mut alternatives = symbolic;
        let word_alt = word_like.join("|");
        alternatives.push(format!(r"\b(?:{word_alt})\b"));

        Regex::new(&alternatives.join("|")).expect("keyword pattern is well-formed")
    })
}

/// Returns the index of the matched keyword in [`KEYWORDS`], stripping the
/// word boundary artifacts the combined pattern may have matched around it.
fn keyword_index(matched: &str) -> Option<usize> {
    KEYWORDS.iter().position(|&kw| kw == matched)
}

/// Tokenizes `input` into an alternating sequence of [`Token::Keyword`] and
/// [`Token::Data`] pieces, in left-to-right order.
///
/// Operates on the whole input in one pass; the tokenizer does not support
/// incremental/chunked feeding (see the streaming-state notes in
/// DESIGN.md).
pub fn tokenize(input: &[u8]) -> Vec<Token<'_>> {
    // Keywords are all ASCII, so scanning the UTF-8-valid subset is safe;
    // the CLI always hands the tokenizer a whole file, which may contain
    // arbitrary bytes in non-keyword regions, so we redo this over a
    // lossless window: every byte either falls in a keyword match (regex
    // scans the underlying bytes via `find_iter` on a UTF-8 view of the
    // ASCII-identifier-safe text) or spills into the data run.
    //
    // The regex crate requires valid UTF-8. C source handed to this tool
    // is expected to be ASCII/UTF-8, so we operate on it as `&str` where
    // possible and fall back to raw-byte passthrough otherwise.
    let text = match std::str::from_utf8(input) {
        Ok(s) => s,
        Err(_) => return vec![Token::Data(input)],
    };

    let mut tokens = Vec::new();
    let mut last_end = 0usize;
    for m in pattern().find_iter(text) {
        if m.start() > last_end {
            tokens.push(Token::Data(&input[last_end..m.start()]));
        }
        if let Some(idx) = keyword_index(m.as_str()) {
            tokens.push(Token::Keyword(idx));
        } else {
            // The word-like alternative carries `\b` anchors as part of the
            // match region only when they consume no characters, so this
            // branch is unreachable in practice; kept as a defensive data
            // fallback rather than a panic.
            tokens.push(Token::Data(&input[m.start()..m.end()]));
        }
        last_end = m.end();
    }
    if last_end < input.len() {
        tokens.push(Token::Data(&input[last_end..]));
    }
    tokens
}
