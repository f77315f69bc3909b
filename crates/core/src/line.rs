// Wordline - Word-queue UART line firmware
// Copyright (C) 2026 Wordline Contributors
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Bounded line buffer and the assembler state machine that fills it.

use crate::{Error, LINE_TERMINATOR};

/// Fixed capacity of the in-flight line buffer, in bytes.
pub const LINE_CAPACITY: usize = 512;

/// Fixed-capacity line buffer. Appends are capacity-checked; overflowing
/// returns an error instead of writing out of bounds.
pub struct LineBuffer {
    buf: [u8; LINE_CAPACITY],
    len: usize,
}

impl LineBuffer {
    /// Create an empty buffer.
    pub const fn new() -> Self {
        Self {
            buf: [0u8; LINE_CAPACITY],
            len: 0,
        }
    }

    /// Append one byte.
    pub fn push(&mut self, byte: u8) -> Result<(), Error> {
        if self.len >= LINE_CAPACITY {
            return Err(Error::BufferOverflow {
                capacity: LINE_CAPACITY,
            });
        }
        self.buf[self.len] = byte;
        self.len += 1;
        Ok(())
    }

    /// Discard the contents; capacity is unchanged.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The collected bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of feeding one byte to the assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinePush {
    /// Byte absorbed (or filtered); the line is still being collected.
    Collecting,
    /// The byte was the terminator; a complete line is ready in the buffer.
    Complete,
    /// The byte did not fit; the line was dropped and input is being
    /// discarded until the next terminator.
    Rejected,
}

/// Two-state line assembler: collects bytes until the newline terminator,
/// then hands the full line (terminator included) to the caller.
///
/// Zero bytes are filtered before they reach the buffer. They appear in the
/// unused tail of word-aligned reads, so a zero is always treated as queue
/// padding rather than payload.
///
/// A line that outgrows [`LINE_CAPACITY`] is rejected as a whole: the buffer
/// resets and every following byte is discarded until a terminator re-arms
/// collection. This replaces the silent out-of-bounds write the original
/// hardware firmware performed.
pub struct LineAssembler {
    buf: LineBuffer,
    discarding: bool,
}

impl LineAssembler {
    pub const fn new() -> Self {
        Self {
            buf: LineBuffer::new(),
            discarding: false,
        }
    }

    /// Feed one extracted byte into the state machine.
    pub fn push(&mut self, byte: u8) -> LinePush {
        if byte == 0 {
            // Queue padding, never payload.
            return LinePush::Collecting;
        }
        if self.discarding {
            if byte == LINE_TERMINATOR {
                self.discarding = false;
            }
            return LinePush::Collecting;
        }
        match self.buf.push(byte) {
            Ok(()) => {
                if byte == LINE_TERMINATOR {
                    LinePush::Complete
                } else {
                    LinePush::Collecting
                }
            }
            Err(Error::BufferOverflow { .. }) => {
                self.buf.clear();
                // The dropped byte could itself have been the terminator.
                self.discarding = byte != LINE_TERMINATOR;
                LinePush::Rejected
            }
        }
    }

    /// The completed line, terminator included. Valid after `push` returned
    /// [`LinePush::Complete`] and until the next [`clear`](Self::clear).
    pub fn line(&self) -> &[u8] {
        self.buf.as_bytes()
    }

    /// Number of bytes collected so far.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    /// Reset for the next line.
    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

impl Default for LineAssembler {
    fn default() -> Self {
        Self::new()
    }
}
