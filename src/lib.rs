//! # mojic
//!
//! Obfuscates C source into a password-seeded stream of Unicode pictographic
//! characters ("emojis") and restores it exactly, given the same password.
//!
//! The core is a symmetric, streaming codec combining a key-derived shuffled
//! code alphabet, a polymorphic keyword mapping (the same keyword encodes to
//! a different glyph every occurrence), and XOR-whitened base-1024 data
//! glyphs, all sealed by an HMAC-SHA256 footer.
//!
//! ## Quick Start
//!
//! ```rust
//! use mojic::{CipherEngine, Password};
//!
//! fn main() -> mojic::Result<()> {
//!     let plaintext = b"int main(void) { return 0; }\n";
//!
//!     let mut encoder = CipherEngine::new(Password::new("hunter22".to_string()));
//!     encoder.init(None, None)?;
//!     let header = encoder.encode_header();
//!     let body = encoder.encode_stream(plaintext)?;
//!     let mojic_file = format!("{header}{body}");
//!
//!     let ((salt, auth_check), offset) = CipherEngine::decode_header(&mojic_file)?;
//!     let mut decoder = CipherEngine::new(Password::new("hunter22".to_string()));
//!     decoder.init(Some(salt), Some(auth_check))?;
//!     let recovered = decoder.decode_stream(&mojic_file[offset..])?;
//!
//!     assert_eq!(recovered, plaintext);
//!     Ok(())
//! }
//! ```
//!
//! ## Non-goals
//!
//! This is an obfuscator, not a confidentiality cipher in the formal sense:
//! the keyword vocabulary is fixed and public, so the *positions* of
//! keywords remain visible to traffic analysis even though the glyph
//! standing for each keyword is not. It makes no attempt to hide program
//! structure or length, and it is not a C parser — keywords are recognized
//! by a fixed word-boundary vocabulary, not by lexical context.
//!
//! ## Error Handling
//!
//! All operations return [`Result<T>`], an alias for
//! `std::result::Result<T, Error>`. See [`Error`] for the full failure
//! taxonomy.
//!
//! ## Minimum Supported Rust Version (MSRV)
//!
//! This crate requires **Rust 1.85** or later.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod crypto;
pub mod engine;
pub mod error;
pub mod progress;

pub use crypto::Password;
pub use engine::CipherEngine;
pub use error::{Error, Result};
