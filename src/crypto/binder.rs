//! Shuffles the raw alphabet with the CSPRNG and partitions it into the
//! keyword ring `KR` and the data alphabet `DA`.

use std::collections::HashMap;

use super::alphabet::{self, KEYWORDS};
use super::rng::Csprng;
use crate::error::Result;

/// Size of the keyword ring: one glyph slot per entry in [`KEYWORDS`].
pub const KEYWORD_RING_LEN: usize = KEYWORDS.len();
/// Size of the data alphabet: one glyph per base-1024 digit.
pub const DATA_ALPHABET_LEN: usize = 1024;

/// The password-derived bindings every encode/decode pass needs: the
/// keyword ring, the data alphabet, and their inverse lookup maps.
pub struct AlphabetBinding {
    /// `KR[i]` is the base glyph for `KEYWORDS[i]`.
    pub keyword_ring: Vec<char>,
    /// `DA[j]` is the glyph for base-1024 digit `j`.
    pub data_alphabet: Vec<char>,
    keyword_index: HashMap<char, usize>,
    digit_index: HashMap<char, u16>,
}

impl AlphabetBinding {
    /// Shuffles the raw alphabet with `rng` (Fisher-Yates, one `next_float`
    /// per step) and binds the keyword ring and data alphabet from the
    /// shuffled prefix.
    ///
    /// Consumes exactly `|U| - 1` draws from `rng`. Must be the first thing
    /// drawn from a freshly-constructed [`Csprng`], and in the same relative
    /// order on encode and decode.
    pub fn bind(rng: &mut Csprng) -> Result<Self> {
        let mut shuffled: Vec<char> = alphabet::raw_alphabet()?.to_vec();
        fisher_yates_shuffle(&mut shuffled, rng);

        let keyword_ring: Vec<char> = shuffled[0..KEYWORD_RING_LEN].to_vec();
        let data_alphabet: Vec<char> =
            shuffled[KEYWORD_RING_LEN..KEYWORD_RING_LEN + DATA_ALPHABET_LEN].to_vec();

        let keyword_index = keyword_ring
            .iter()
            .enumerate()
            .map(|(i, &c)| (c, i))
            .collect();
        let digit_index = data_alphabet
            .iter()
            .enumerate()
            .map(|(i, &c)| (c, i as u16))
            .collect();

        Ok(Self {
            keyword_ring,
            data_alphabet,
            keyword_index,
            digit_index,
        })
    }

    /// Returns the keyword ring position of `glyph`, if it belongs to `KR`.
    pub fn keyword_position(&self, glyph: char) -> Option<usize> {
        self.keyword_index.get(&glyph).copied()
    }

    /// Returns the base-1024 digit `glyph` encodes, if it belongs to `DA`.
    pub fn data_digit(&self, glyph: char) -> Option<u16> {
        self.digit_index.get(&glyph).copied()
    }
}

/// Fisher-Yates shuffle using `j = floor(rng.next_float() * (i + 1))`,
/// iterating `i` from `len - 1` down to `1`.
fn fisher_yates_shuffle<T>(items: &mut [T], rng: &mut Csprng) {
    for i in (1..items.len()).rev() {
        let j = (rng.next_float() * (i as f64 + 1.0)).floor() as usize;
        items.swap(i, j);
    }
}
