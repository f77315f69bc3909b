// Wordline - Word-queue UART line firmware
// Copyright (C) 2026 Wordline Contributors
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

/// Register-level access to the word-queue UART front-end.
///
/// Every method models an access to a live hardware register, so every
/// method takes `&mut self` and callers must never cache a returned value
/// across loop iterations. In particular `rx_available` reflects bytes in
/// flight and must be re-queried at each decision point, and `read_word`
/// is a consuming read that advances the hardware's internal pointer.
pub trait WordUart {
    /// Number of bytes (not words) currently waiting in the receive queue.
    /// Non-blocking; may return 0.
    fn rx_available(&mut self) -> usize;

    /// Dequeue and return the next 8-byte word from the receive queue.
    ///
    /// Only call when `rx_available` has just reported a positive count;
    /// reading an empty queue is undefined at the hardware level. Byte
    /// positions beyond the reported count hold stale padding.
    fn read_word(&mut self) -> u64;

    /// Enqueue 8 bytes for transmission. Writes are consumed in issue order.
    fn write_word(&mut self, word: u64);

    /// Free space in the transmit queue, in bytes.
    ///
    /// The hardware exposes this register but the engine does not consult
    /// it yet; reserved for backpressure.
    fn tx_space(&mut self) -> usize {
        usize::MAX
    }
}
