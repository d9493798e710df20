//! Error types for the cipher engine and its CLI orchestrator.
//!
//! This module provides the [`Error`] enum which represents all possible
//! failure modes when encoding or decoding a `.mojic` stream, along with a
//! convenient [`Result<T>`] type alias.
//!
//! # Error Handling
//!
//! All fallible operations in this crate return `Result<T, Error>`. Handle
//! errors using pattern matching or the `?` operator:
//!
//! ```rust,no_run
//! use mojic::{CipherEngine, Password, Result};
//!
//! fn decode(password: &str, input: &str) -> Result<Vec<u8>> {
//!     let mut engine = CipherEngine::new(Password::new(password.to_string()));
//!     let ((salt, auth_check), offset) = CipherEngine::decode_header(input)?;
//!     engine.init(Some(salt), Some(auth_check))?;
//!     engine.decode_stream(&input[offset..])
//! }
//! ```
//!
//! ## User-Friendly Error Messages
//!
//! ```rust
//! use mojic::Error;
//!
//! fn print_user_message(error: &Error) {
//!     match error {
//!         Error::WrongPassword => println!("Incorrect password."),
//!         Error::FileTampered => println!("Integrity check failed; the file may be corrupted."),
//!         Error::FileTruncated { .. } => println!("The file ends before a complete footer was read."),
//!         _ => println!("Error: {}", error),
//!     }
//! }
//! ```

use std::io;

/// The crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// All failure modes surfaced by the cipher engine and its CLI orchestrator.
///
/// | Category | Variants | Meaning |
/// |---|---|---|
/// | Key setup | [`KdfFailure`][Self::KdfFailure], [`WrongPassword`][Self::WrongPassword], [`AlphabetUnderflow`][Self::AlphabetUnderflow] | Engine initialization |
/// | Framing | [`InvalidHeader`][Self::InvalidHeader], [`InvalidFooter`][Self::InvalidFooter], [`FileTruncated`][Self::FileTruncated] | Malformed `.mojic` structure |
/// | Payload | [`InvalidGlyph`][Self::InvalidGlyph], [`FileTampered`][Self::FileTampered] | Corrupt or tampered body |
/// | Filesystem | [`Io`][Self::Io] | CLI-layer I/O failures |
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An I/O error occurred while reading or writing a file.
    ///
    /// This wraps [`std::io::Error`] and is returned by the CLI orchestrator,
    /// never by the engine itself (the engine operates purely on in-memory
    /// byte slices).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The supplied password does not match the auth-check prefix stored in
    /// the header.
    ///
    /// Detected during [`init`](crate::CipherEngine::init), before any body
    /// glyph is processed.
    #[error("wrong password")]
    WrongPassword,

    /// The header line is malformed: too short, contains a glyph outside the
    /// 16-glyph header alphabet `H`, or (for fixed-salt implementations) has
    /// a length other than 72 glyphs.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// A payload glyph belongs to neither the keyword ring `KR` nor the data
    /// alphabet `DA`.
    ///
    /// Surfaced instead of the reference implementation's silent skip, per
    /// the strictness preference recorded in the design notes.
    #[error("invalid glyph in payload at atom offset {offset}")]
    InvalidGlyph {
        /// The offset (in atoms, i.e. code points, since the start of the
        /// body) at which the invalid glyph was found.
        offset: usize,
    },

    /// A footer glyph does not belong to the header alphabet `H`.
    #[error("invalid footer: glyph at nibble offset {offset} is not in H")]
    InvalidFooter {
        /// The nibble offset within the 64-nibble footer.
        offset: usize,
    },

    /// Fewer than 64 residual atoms remained at end-of-stream to form a
    /// footer.
    #[error("file truncated: footer has {found} of 64 required atoms")]
    FileTruncated {
        /// The number of atoms actually available.
        found: usize,
    },

    /// The computed HMAC-SHA256 does not match the footer.
    ///
    /// Indicates the body was tampered with or corrupted after encoding.
    #[error("file tampered: HMAC verification failed")]
    FileTampered,

    /// The scrypt key derivation invocation failed.
    ///
    /// This can only happen if the requested output length or cost
    /// parameters are rejected by the scrypt implementation; it does not
    /// happen in ordinary use of this crate's fixed parameters.
    #[error("key derivation failed: {0}")]
    KdfFailure(String),

    /// The raw alphabet generator produced fewer than 1080 glyphs.
    ///
    /// This is a build-time invariant violation (the Unicode ranges backing
    /// the raw alphabet shrank below the minimum this design assumes) rather
    /// than a runtime condition triggered by user input.
    #[error("alphabet underflow: generated {found} glyphs, need at least {minimum}")]
    AlphabetUnderflow {
        /// The number of glyphs actually generated.
        found: usize,
        /// The minimum required.
        minimum: usize,
    },

    /// A password shorter than the minimum length was rejected by the CLI.
    #[error("password must be longer than {minimum} characters")]
    PasswordTooShort {
        /// The minimum password length (exclusive).
        minimum: usize,
    },
}
