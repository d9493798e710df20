//! Password and integrity integration tests: wrong password, tamper
//! detection, re-seeding, and rotation, as end-to-end `.mojic` round trips.

use mojic::{CipherEngine, Error, Password};

fn encode(password: &str, plaintext: &[u8]) -> String {
    let mut encoder = CipherEngine::new(Password::new(password.to_string()));
    encoder.init(None, None).unwrap();
    format!(
        "{}{}",
        encoder.encode_header(),
        encoder.encode_stream(plaintext).unwrap()
    )
}

fn decode(password: &str, file: &str) -> mojic::Result<Vec<u8>> {
    let ((salt, auth_check), offset) = CipherEngine::decode_header(file)?;
    let mut decoder = CipherEngine::new(Password::new(password.to_string()));
    decoder.init(Some(salt), Some(auth_check))?;
    decoder.decode_stream(&file[offset..])
}

#[test]
fn wrong_password_is_rejected_before_body_is_read() {
    let file = encode("correct-horse", b"int x;\n");
    let err = decode("incorrect-horse", &file).unwrap_err();
    assert!(matches!(err, Error::WrongPassword));
}

#[test]
fn tampering_any_payload_glyph_is_detected() {
    let file = encode("tamper-test-pw", b"static int counter = 0;\n");
    let ((_, _), offset) = CipherEngine::decode_header(&file).unwrap();

    let mut chars: Vec<char> = file.chars().collect();
    // Pick a body glyph (skip the header, which ends at `offset`) that is
    // not adjacent to a newline, and swap it for another raw-alphabet glyph.
    let body_start = file[..offset].chars().count();
    let victim = body_start + 2;
    let original = chars[victim];
    let replacement = mojic::crypto::alphabet::raw_alphabet()
        .unwrap()
        .iter()
        .copied()
        .find(|&c| c != original)
        .unwrap();
    chars[victim] = replacement;
    let tampered: String = chars.into_iter().collect();

    let err = decode("tamper-test-pw", &tampered).unwrap_err();
    assert!(matches!(err, Error::FileTampered | Error::InvalidGlyph { .. }));
}

#[test]
fn truncated_file_is_rejected() {
    let file = encode("truncate-test-pw", b"int x;\n");
    let ((salt, auth_check), offset) = CipherEngine::decode_header(&file).unwrap();

    // Keep the header plus a single body atom; the 64-atom footer window
    // can never fill, so decoding must report truncation rather than
    // guessing at a short footer.
    let body: String = file[offset..].chars().take(1).collect();

    let mut decoder = CipherEngine::new(Password::new("truncate-test-pw".to_string()));
    decoder.init(Some(salt), Some(auth_check)).unwrap();
    let err = decoder.decode_stream(&body).unwrap_err();
    assert!(matches!(err, Error::FileTruncated { .. }));
}

#[test]
fn reseeding_preserves_plaintext_but_changes_bytes() {
    let plaintext = b"void f(void) { return; }\n";
    let first = encode("reseed-pw", plaintext);

    // Simulate `reseed`: decode then re-encode under the same password with
    // a fresh salt.
    let recovered = decode("reseed-pw", &first).unwrap();
    assert_eq!(recovered, plaintext);
    let second = encode("reseed-pw", &recovered);

    assert_ne!(first, second);
    assert_eq!(decode("reseed-pw", &first).unwrap(), plaintext);
    assert_eq!(decode("reseed-pw", &second).unwrap(), plaintext);
}

#[test]
fn rotating_password_locks_out_the_old_one() {
    let plaintext = b"#define VERSION 2\n";
    let original = encode("old-password-1", plaintext);

    let recovered = decode("old-password-1", &original).unwrap();
    let rotated = encode("new-password-2", &recovered);

    assert!(decode("old-password-1", &rotated).is_err());
    assert_eq!(decode("new-password-2", &rotated).unwrap(), plaintext);
}
