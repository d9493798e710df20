//! Header codec: encodes and parses the `salt ‖ auth-check` header line that
//! precedes the body of every `.mojic` file.

use super::alphabet::{header_nibble, HEADER_ALPHABET};
use crate::error::{Error, Result};

/// Fixed salt length in bytes. This implementation fixes the salt size
/// (see DESIGN.md, Open Question O1) rather than supporting the legacy
/// variable-length salt the distilled spec mentions.
pub const SALT_LEN: usize = 32;
/// Length of the auth-check prefix in bytes.
pub const AUTH_CHECK_LEN: usize = 4;
/// Total header length in glyphs: `2 * SALT_LEN` hex nibbles for the salt,
/// plus `2 * AUTH_CHECK_LEN` for the auth-check.
pub const HEADER_GLYPH_LEN: usize = 2 * SALT_LEN + 2 * AUTH_CHECK_LEN;

/// Encodes `salt ‖ auth_check` as a line of header glyphs terminated by
/// `'\n'`.
pub fn encode(salt: &[u8; SALT_LEN], auth_check: &[u8; AUTH_CHECK_LEN]) -> String {
    let mut out = String::with_capacity(HEADER_GLYPH_LEN * 4 + 1);
    for &byte in salt.iter().chain(auth_check.iter()) {
        out.push(HEADER_ALPHABET[(byte >> 4) as usize]);
        out.push(HEADER_ALPHABET[(byte & 0x0f) as usize]);
    }
    out.push('\n');
    out
}

/// Parses the header line at the start of `input`, returning the salt, the
/// auth-check, and the byte offset of the first byte after the header's
/// `'\n'` terminator.
///
/// Pure parser: holds no engine state, unlike [`crate::CipherEngine`].
pub fn decode(input: &str) -> Result<(([u8; SALT_LEN], [u8; AUTH_CHECK_LEN]), usize)> {
    let newline_pos = input
        .find('\n')
        .ok_or_else(|| Error::InvalidHeader("missing header terminator".to_string()))?;
    let header_line = &input[..newline_pos];

    let glyphs: Vec<char> = header_line.chars().collect();
    if glyphs.len() != HEADER_GLYPH_LEN {
        return Err(Error::InvalidHeader(format!(
            "expected {HEADER_GLYPH_LEN} header glyphs, found {}",
            glyphs.len()
        )));
    }

    let mut nibbles = Vec::with_capacity(HEADER_GLYPH_LEN);
    for &g in &glyphs {
        let nibble = header_nibble(g)
            .ok_or_else(|| Error::InvalidHeader(format!("glyph {g:?} not in header alphabet")))?;
        nibbles.push(nibble);
    }

    let mut bytes = Vec::with_capacity(SALT_LEN + AUTH_CHECK_LEN);
    for pair in nibbles.chunks_exact(2) {
        bytes.push((pair[0] << 4) | pair[1]);
    }

    let mut salt = [0u8; SALT_LEN];
    let mut auth_check = [0u8; AUTH_CHECK_LEN];
    salt.copy_from_slice(&bytes[..SALT_LEN]);
    auth_check.copy_from_slice(&bytes[SALT_LEN..SALT_LEN + AUTH_CHECK_LEN]);

    Ok(((salt, auth_check), newline_pos + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_round_trip() {
        let salt = [0x42u8; SALT_LEN];
        let auth_check = [0xDEu8, 0xAD, 0xBE, 0xEF];
        let encoded = encode(&salt, &auth_check);
        let rest = "body-placeholder";
        let full = format!("{encoded}{rest}");
        let ((decoded_salt, decoded_auth), offset) = decode(&full).unwrap();
        assert_eq!(decoded_salt, salt);
        assert_eq!(decoded_auth, auth_check);
        assert_eq!(&full[offset..], rest);
    }

    #[test]
    fn encode_length_is_72_glyphs_plus_newline() {
        let encoded = encode(&[0u8; SALT_LEN], &[0u8; AUTH_CHECK_LEN]);
        assert_eq!(encoded.chars().count(), HEADER_GLYPH_LEN + 1);
        assert!(encoded.ends_with('\n'));
    }

    #[test]
    fn decode_rejects_foreign_glyph() {
        let mut bad = encode(&[0u8; SALT_LEN], &[0u8; AUTH_CHECK_LEN]);
        bad.replace_range(0..1, "x");
        assert!(matches!(decode(&bad), Err(Error::InvalidHeader(_))));
    }

    #[test]
    fn decode_rejects_missing_newline() {
        let err = decode("no newline here").unwrap_err();
        assert!(matches!(err, Error::InvalidHeader(_)));
    }

    #[test]
    fn decode_rejects_wrong_length() {
        let mut short = encode(&[0u8; SALT_LEN], &[0u8; AUTH_CHECK_LEN]);
        short.remove(0);
        assert!(matches!(decode(&short), Err(Error::InvalidHeader(_))));
    }
}
