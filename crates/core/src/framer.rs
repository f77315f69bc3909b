// Wordline - Word-queue UART line firmware
// Copyright (C) 2026 Wordline Contributors
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Output framing: re-packing byte sequences into word-sized register writes.

use crate::device::WordUart;
use crate::word::{pack_word, WORD_BYTES};

/// Acknowledgment banner emitted before each echoed line.
pub const ACK_BANNER: &[u8] = b"ack> ";

/// Write a byte sequence to the transmit register in 8-byte chunks.
///
/// The final chunk is zero-padded when the length is not a multiple of 8,
/// so a sequence of N bytes always costs exactly ceil(N/8) register writes.
/// Chunks are issued strictly in order; the hardware consumes writes in
/// issue order and nothing here may batch or reorder them.
pub fn emit<D: WordUart + ?Sized>(dev: &mut D, bytes: &[u8]) {
    for chunk in bytes.chunks(WORD_BYTES) {
        dev.write_word(pack_word(chunk));
    }
}

#[cfg(test)]
mod tests {
    use super::{emit, ACK_BANNER};
    use crate::device::WordUart;
    use crate::word::unpack_word;

    /// Test double recording every word write in issue order.
    struct RecordingUart {
        words: [u64; 8],
        count: usize,
    }

    impl RecordingUart {
        fn new() -> Self {
            Self {
                words: [0; 8],
                count: 0,
            }
        }
    }

    impl WordUart for RecordingUart {
        fn rx_available(&mut self) -> usize {
            0
        }

        fn read_word(&mut self) -> u64 {
            0
        }

        fn write_word(&mut self, word: u64) {
            self.words[self.count] = word;
            self.count += 1;
        }
    }

    #[test]
    fn test_emit_chunk_count_is_ceil_div_8() {
        for (len, expected) in [(0usize, 0usize), (1, 1), (8, 1), (9, 2), (16, 2), (17, 3)] {
            let mut dev = RecordingUart::new();
            let bytes = [b'z'; 17];
            emit(&mut dev, &bytes[..len]);
            assert_eq!(dev.count, expected, "length {}", len);
        }
    }

    #[test]
    fn test_emit_round_trips_with_final_chunk_padding() {
        let mut dev = RecordingUart::new();
        let sequence = b"hello wordline";
        emit(&mut dev, sequence);
        assert_eq!(dev.count, 2);

        let mut rebuilt = [0u8; 16];
        rebuilt[..8].copy_from_slice(&unpack_word(dev.words[0]));
        rebuilt[8..].copy_from_slice(&unpack_word(dev.words[1]));
        assert_eq!(&rebuilt[..sequence.len()], sequence);
        // Only trailing zero-padding after the payload.
        assert!(rebuilt[sequence.len()..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_banner_fits_one_word() {
        let mut dev = RecordingUart::new();
        emit(&mut dev, ACK_BANNER);
        assert_eq!(dev.count, 1);
        assert_eq!(&unpack_word(dev.words[0])[..ACK_BANNER.len()], ACK_BANNER);
    }
}
