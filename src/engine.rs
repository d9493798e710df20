//! The `CipherEngine`: ties key derivation, the CSPRNG, the alphabet
//! binder, the tokenizer, and the base-1024 block codec into the streaming
//! encode/decode state machines.

use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;
use std::collections::VecDeque;
use unicode_segmentation::UnicodeSegmentation;

use crate::crypto::alphabet::{self, KEYWORDS};
use crate::crypto::binder::AlphabetBinding;
use crate::crypto::block;
use crate::crypto::header;
use crate::crypto::kdf;
use crate::crypto::password::Password;
use crate::crypto::rng::Csprng;
use crate::crypto::tokenizer::{self, Token};
use crate::error::{Error, Result};

/// Byte threshold that triggers a forced line wrap during encoding.
const LINE_WRAP_THRESHOLD: usize = 300;
/// Size of the trailing footer-reservation window, in atoms.
const FOOTER_WINDOW_LEN: usize = 64;

type HmacSha256 = Hmac<Sha256>;

/// A single encode-or-decode session. Construction never fails; call
/// [`CipherEngine::init`] before using any other method.
///
/// Valid for exactly one encode or decode pass. Not thread-safe, not
/// re-entrant: no two concurrent calls may share an instance.
pub struct CipherEngine {
    password: Password,
    state: Option<EngineState>,
}

struct EngineState {
    salt: [u8; header::SALT_LEN],
    auth_check: [u8; header::AUTH_CHECK_LEN],
    rng: Csprng,
    binding: AlphabetBinding,
    hmac: HmacSha256,
    line_wrap_counter: usize,
    pending_data: Vec<u8>,
    data_digit_buffer: Vec<u16>,
    atom_count: usize,
}

impl CipherEngine {
    /// Constructs an engine bound to `password`. Never fails; key
    /// derivation is deferred to [`Self::init`].
    pub fn new(password: Password) -> Self {
        Self {
            password,
            state: None,
        }
    }

    /// Derives key material from the engine's password and either a fresh
    /// random salt (`salt = None`, the encode path) or a salt parsed from
    /// an existing file's header (the decode path).
    ///
    /// When `auth_check` is `Some` (always the decode path), validates the
    /// password against it before proceeding.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WrongPassword`] on auth-check mismatch, or
    /// [`Error::KdfFailure`]/[`Error::AlphabetUnderflow`] on lower-level
    /// failure.
    pub fn init(
        &mut self,
        salt: Option<[u8; header::SALT_LEN]>,
        auth_check: Option<[u8; header::AUTH_CHECK_LEN]>,
    ) -> Result<()> {
        let salt = salt.unwrap_or_else(random_salt);

        log::debug!("deriving key material via scrypt");
        let key_material = kdf::derive(self.password.as_bytes(), &salt)?;
        let computed_check = key_material.auth_check();

        if let Some(expected) = auth_check {
            if computed_check != expected {
                log::warn!("password verification failed");
                return Err(Error::WrongPassword);
            }
        }

        let mut rng = Csprng::new(&key_material.rng_key, &key_material.rng_iv);
        let binding = AlphabetBinding::bind(&mut rng)?;
        let hmac = HmacSha256::new_from_slice(&key_material.auth_key)
            .expect("HMAC-SHA256 accepts keys of any length");

        self.state = Some(EngineState {
            salt,
            auth_check: computed_check,
            rng,
            binding,
            hmac,
            line_wrap_counter: 0,
            pending_data: Vec::new(),
            data_digit_buffer: Vec::new(),
            atom_count: 0,
        });
        log::debug!("cipher engine initialized");
        Ok(())
    }

    /// Emits the header line: `hex(salt) ‖ hex(auth_check)` mapped through
    /// the header alphabet, terminated by `'\n'`.
    pub fn encode_header(&self) -> String {
        let state = self.state.as_ref().expect("engine not initialized");
        header::encode(&state.salt, &state.auth_check)
    }

    /// Parses the header line of an existing `.mojic` file. Static: takes
    /// no engine state.
    pub fn decode_header(
        input: &str,
    ) -> Result<(([u8; header::SALT_LEN], [u8; header::AUTH_CHECK_LEN]), usize)> {
        header::decode(input)
    }

    /// Consumes plaintext, emitting polymorphic keyword glyphs, whitened
    /// base-1024 data glyphs, forced line wraps, and the HMAC footer.
    pub fn encode_stream(&mut self, input: &[u8]) -> Result<String> {
        let mut out = String::new();
        for token in tokenizer::tokenize(input) {
            match token {
                Token::Keyword(idx) => {
                    self.flush_pending(&mut out)?;
                    self.emit_keyword(idx, &mut out);
                }
                Token::Data(bytes) => self.append_data(bytes, &mut out)?,
            }
        }
        self.flush_pending(&mut out)?;
        out.push_str(&self.footer());
        Ok(out)
    }

    /// Consumes payload and footer glyphs (everything after the header
    /// line), emitting plaintext. Verifies the HMAC footer before
    /// returning.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGlyph`] on a payload glyph in neither the
    /// keyword ring nor the data alphabet, [`Error::FileTruncated`] if
    /// fewer than 64 footer atoms are present, [`Error::InvalidFooter`] on
    /// a non-`H` footer glyph, and [`Error::FileTampered`] on HMAC
    /// mismatch.
    pub fn decode_stream(&mut self, input: &str) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        let mut footer_window: VecDeque<char> = VecDeque::with_capacity(FOOTER_WINDOW_LEN + 1);

        for grapheme in input.graphemes(true) {
            if grapheme.chars().all(char::is_whitespace) {
                continue;
            }
            for atom in grapheme.chars() {
                footer_window.push_back(atom);
                if footer_window.len() > FOOTER_WINDOW_LEN {
                    let released = footer_window.pop_front().expect("window just overflowed");
                    self.process_atom(released, &mut out)?;
                }
            }
        }

        if footer_window.len() != FOOTER_WINDOW_LEN {
            log::warn!("footer shorter than expected, file truncated");
            return Err(Error::FileTruncated {
                found: footer_window.len(),
            });
        }

        let mut footer_bytes = [0u8; 32];
        for (i, pair) in footer_window.iter().collect::<Vec<_>>().chunks_exact(2).enumerate() {
            let hi = alphabet::header_nibble(*pair[0])
                .ok_or(Error::InvalidFooter { offset: i * 2 })?;
            let lo = alphabet::header_nibble(*pair[1])
                .ok_or(Error::InvalidFooter { offset: i * 2 + 1 })?;
            footer_bytes[i] = (hi << 4) | lo;
        }

        let state = self.state.as_ref().expect("engine not initialized");
        let computed = state.hmac.clone().finalize().into_bytes();
        if footer_bytes.as_slice() != computed.as_slice() {
            log::warn!("HMAC verification failed, file tampered or wrong password");
            return Err(Error::FileTampered);
        }
        log::debug!("HMAC verification succeeded");

        Ok(out)
    }

    fn process_atom(&mut self, atom: char, out: &mut Vec<u8>) -> Result<()> {
        let state = self.state.as_mut().expect("engine not initialized");
        let offset = state.atom_count;
        state.atom_count += 1;

        let mut buf = [0u8; 4];
        let encoded = atom.encode_utf8(&mut buf);
        state.hmac.update(encoded.as_bytes());

        if let Some(emit_idx) = state.binding.keyword_position(atom) {
            let len = KEYWORDS.len() as u64;
            let shift = state.rng.next_u64() % len;
            let base = ((emit_idx as u64 + len - shift) % len) as usize;
            state.data_digit_buffer.clear();
            out.extend_from_slice(KEYWORDS[base].as_bytes());
            return Ok(());
        }

        if let Some(digit) = state.binding.data_digit(atom) {
            state.data_digit_buffer.push(digit);
            if state.data_digit_buffer.len() == block::BLOCK_DIGITS {
                let digits: [u16; 4] = state
                    .data_digit_buffer
                    .drain(..)
                    .collect::<Vec<_>>()
                    .try_into()
                    .expect("exactly 4 digits buffered");
                let masked = block::digits_to_bytes(&digits);
                let mask = state.rng.next_bytes(block::BLOCK_BYTES);
                let mut plain = [0u8; block::BLOCK_BYTES];
                for i in 0..block::BLOCK_BYTES {
                    plain[i] = masked[i] ^ mask[i];
                }
                let mut end = plain.len();
                while end > 0 && plain[end - 1] == 0 {
                    end -= 1;
                }
                out.extend_from_slice(&plain[..end]);
            }
            return Ok(());
        }

        Err(Error::InvalidGlyph { offset })
    }

    fn append_data(&mut self, bytes: &[u8], out: &mut String) -> Result<()> {
        {
            let state = self.state.as_mut().expect("engine not initialized");
            state.pending_data.extend_from_slice(bytes);
        }
        loop {
            let ready = {
                let state = self.state.as_ref().expect("engine not initialized");
                state.pending_data.len() >= block::BLOCK_BYTES
            };
            if !ready {
                break;
            }
            let block_bytes: [u8; 5] = {
                let state = self.state.as_mut().expect("engine not initialized");
                let drained: Vec<u8> = state.pending_data.drain(0..block::BLOCK_BYTES).collect();
                drained.try_into().expect("drained exactly 5 bytes")
            };
            self.emit_block(&block_bytes, out)?;
        }
        Ok(())
    }

    fn flush_pending(&mut self, out: &mut String) -> Result<()> {
        let remaining = {
            let state = self.state.as_mut().expect("engine not initialized");
            std::mem::take(&mut state.pending_data)
        };
        if remaining.is_empty() {
            return Ok(());
        }
        let mut block_bytes = [0u8; block::BLOCK_BYTES];
        block_bytes[..remaining.len()].copy_from_slice(&remaining);
        self.emit_block(&block_bytes, out)
    }

    fn emit_block(&mut self, plain: &[u8; 5], out: &mut String) -> Result<()> {
        let glyphs = {
            let state = self.state.as_mut().expect("engine not initialized");
            let mask = state.rng.next_bytes(block::BLOCK_BYTES);
            let mut whitened = [0u8; block::BLOCK_BYTES];
            for i in 0..block::BLOCK_BYTES {
                whitened[i] = plain[i] ^ mask[i];
            }
            let digits = block::bytes_to_digits(&whitened);
            digits.map(|d| state.binding.data_alphabet[d as usize])
        };
        self.emit_glyphs(&glyphs, out);
        Ok(())
    }

    fn emit_keyword(&mut self, idx: usize, out: &mut String) {
        let glyph = {
            let state = self.state.as_mut().expect("engine not initialized");
            let len = KEYWORDS.len() as u64;
            let shift = state.rng.next_u64() % len;
            let emit_idx = ((idx as u64 + shift) % len) as usize;
            state.binding.keyword_ring[emit_idx]
        };
        self.emit_glyphs(&[glyph], out);
    }

    fn emit_glyphs(&mut self, glyphs: &[char], out: &mut String) {
        let state = self.state.as_mut().expect("engine not initialized");
        for &g in glyphs {
            out.push(g);
            let mut buf = [0u8; 4];
            let encoded = g.encode_utf8(&mut buf);
            state.hmac.update(encoded.as_bytes());
            state.line_wrap_counter += encoded.len();
        }
        if state.line_wrap_counter > LINE_WRAP_THRESHOLD {
            out.push('\n');
            state.line_wrap_counter = 0;
        }
    }

    fn footer(&mut self) -> String {
        let state = self.state.as_ref().expect("engine not initialized");
        let mac = state.hmac.clone().finalize().into_bytes();
        let mut out = String::with_capacity(65);
        out.push('\n');
        for byte in mac {
            out.push(alphabet::HEADER_ALPHABET[(byte >> 4) as usize]);
            out.push(alphabet::HEADER_ALPHABET[(byte & 0x0f) as usize]);
        }
        out
    }
}

fn random_salt() -> [u8; header::SALT_LEN] {
    let mut salt = [0u8; header::SALT_LEN];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    salt
}
