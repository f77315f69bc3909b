#![no_std]
// Wordline - Word-queue UART line firmware
// Copyright (C) 2026 Wordline Contributors
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Device-independent core of the wordline firmware.
//!
//! The hardware front-end delivers received serial bytes as 8-byte words
//! while reporting availability at byte granularity. This crate reconciles
//! the two: it extracts valid bytes from each word, assembles them into
//! newline-terminated lines, and re-packs output into word-sized register
//! writes. All hardware access goes through the [`WordUart`] trait so the
//! same engine runs against the real MMIO registers and the host simulator.

pub mod device;
pub mod engine;
pub mod framer;
pub mod line;
pub mod mode;
pub mod word;

pub use device::WordUart;
pub use engine::{Engine, ServiceReport};
pub use line::{LineAssembler, LineBuffer, LinePush, LINE_CAPACITY};
pub use mode::Mode;
pub use word::{pack_word, unpack_word, WORD_BYTES};

/// Line terminator byte: `'\n'`.
pub const LINE_TERMINATOR: u8 = 0x0A;

/// Errors the core can detect. The hardware interface itself cannot fail,
/// so the only condition is a line outgrowing its fixed buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A line exceeded the fixed buffer capacity before a terminator arrived.
    BufferOverflow { capacity: usize },
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::BufferOverflow { capacity } => {
                write!(f, "line exceeded buffer capacity of {} bytes", capacity)
            }
        }
    }
}
