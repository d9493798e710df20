//! Round-trip integration tests for the cipher engine.
//!
//! Mirrors the end-to-end scenarios: arbitrary C source, pattern-hiding
//! whitespace, and the minimal single-keyword case all decode back to
//! exactly what was encoded.

use mojic::{CipherEngine, Password};

fn round_trip(password: &str, plaintext: &[u8]) -> Vec<u8> {
    let mut encoder = CipherEngine::new(Password::new(password.to_string()));
    encoder.init(None, None).unwrap();
    let full = format!(
        "{}{}",
        encoder.encode_header(),
        encoder.encode_stream(plaintext).unwrap()
    );

    let ((salt, auth_check), offset) = CipherEngine::decode_header(&full).unwrap();
    let mut decoder = CipherEngine::new(Password::new(password.to_string()));
    decoder.init(Some(salt), Some(auth_check)).unwrap();
    decoder.decode_stream(&full[offset..]).unwrap()
}

#[test]
fn minimal_source_round_trips() {
    let plaintext = b"int x;\n";
    assert_eq!(round_trip("hunter2ok", plaintext), plaintext);
}

#[test]
fn c_source_with_all_keyword_categories_round_trips() {
    let plaintext = br#"#include <stdio.h>
#define MAX 100

static const unsigned long volatile flag = 0;

int main(void) {
    struct Point { int x, y; };
    enum Color { RED, GREEN, BLUE };
    for (int i = 0; i < MAX; i++) {
        if (i % 2 == 0) {
            printf("even: %d\n", i);
        } else {
            continue;
        }
    }
    return 0;
}
"#;
    assert_eq!(round_trip("c-source-test-pw", plaintext), plaintext);
}

#[test]
fn pattern_hiding_repeated_blank_lines_round_trip() {
    let plaintext = b"    \n    \n    \n";
    assert_eq!(round_trip("whitespace-pw", plaintext), plaintext);
}

#[test]
fn pattern_hiding_emits_distinct_blocks_for_identical_input() {
    let plaintext = b"    \n    \n    \n";
    let mut encoder = CipherEngine::new(Password::new("whitespace-pw".to_string()));
    encoder.init(None, None).unwrap();
    let body = encoder.encode_stream(plaintext).unwrap();

    // Three identical 5-byte groups -> three 4-glyph data blocks; the mask
    // rotates each time, so consecutive blocks must differ pairwise. The
    // trailing 64 non-whitespace atoms are the HMAC footer, not payload.
    let non_whitespace: Vec<char> = body.chars().filter(|c| !c.is_whitespace()).collect();
    let payload = &non_whitespace[..non_whitespace.len() - 64];
    assert_eq!(payload.len(), 12);
    let group_a = &payload[0..4];
    let group_b = &payload[4..8];
    let group_c = &payload[8..12];
    assert_ne!(group_a, group_b);
    assert_ne!(group_b, group_c);
    assert_ne!(group_a, group_c);
}

#[test]
fn long_source_spans_multiple_line_wraps() {
    let mut plaintext = String::new();
    for i in 0..200 {
        plaintext.push_str(&format!("int variable_{i} = {i};\n"));
    }
    let recovered = round_trip("long-source-pw", plaintext.as_bytes());
    assert_eq!(recovered, plaintext.into_bytes());
}

#[test]
fn empty_identifier_runs_between_keywords_round_trip() {
    // Back-to-back keywords with no data bytes in between at all.
    let plaintext = b"int int int";
    assert_eq!(round_trip("adjacent-pw", plaintext), plaintext);
}

#[test]
fn single_byte_plaintext_round_trips() {
    for &byte in &[b'a', b'1', b' ', b'{', b'\n'] {
        let plaintext = [byte];
        assert_eq!(round_trip("single-byte-pw", &plaintext), plaintext);
    }
}
