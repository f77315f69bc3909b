// Wordline - Word-queue UART line firmware
// Copyright (C) 2026 Wordline Contributors
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

/// Output behavior of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Echo each received word back unmodified.
    Passthrough,
    /// Add a fixed offset to every byte of each word before echoing it.
    /// Per-byte wrapping arithmetic: 0xFF + 1 wraps to 0x00 and no carry
    /// crosses a byte boundary.
    Transform { offset: u8 },
    /// Collect bytes into newline-terminated lines, then echo each full
    /// line prefixed with the acknowledgment banner.
    #[default]
    LineEcho,
}
