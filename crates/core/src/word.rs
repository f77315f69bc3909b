// Wordline - Word-queue UART line firmware
// Copyright (C) 2026 Wordline Contributors
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Explicit little-endian decomposition of queue words into bytes and back.
//! The bus is 64-bit little-endian; byte 0 of a word is the oldest byte.

/// Bytes per queue word.
pub const WORD_BYTES: usize = 8;

/// Decompose a queue word into its 8 bytes in arrival order.
///
/// Deterministic and stateless: the same word always yields the same bytes.
#[inline]
pub fn unpack_word(word: u64) -> [u8; WORD_BYTES] {
    word.to_le_bytes()
}

/// Pack up to 8 bytes into a queue word, zero-padding unused high positions.
/// Input longer than 8 bytes is truncated to the first 8.
#[inline]
pub fn pack_word(bytes: &[u8]) -> u64 {
    let n = bytes.len().min(WORD_BYTES);
    let mut padded = [0u8; WORD_BYTES];
    padded[..n].copy_from_slice(&bytes[..n]);
    u64::from_le_bytes(padded)
}
