// Wordline - Word-queue UART line firmware
// Copyright (C) 2026 Wordline Contributors
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! The busy-poll control loop tying reader, assembler and framer together.

use crate::device::WordUart;
use crate::framer::{emit, ACK_BANNER};
use crate::line::{LineAssembler, LinePush};
use crate::mode::Mode;
use crate::word::{pack_word, unpack_word, WORD_BYTES};

/// Counters from one [`Engine::service`] pass. The core has no logging
/// facility of its own; hosts log and assert on these instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ServiceReport {
    /// Valid payload bytes consumed from the receive queue.
    pub bytes_consumed: usize,
    /// Words dequeued from the receive register.
    pub words_read: usize,
    /// Lines completed and echoed (line-echo mode only).
    pub lines_completed: usize,
    /// Lines rejected for exceeding the buffer capacity.
    pub lines_rejected: usize,
}

impl ServiceReport {
    /// Fold another pass into a running total.
    pub fn accumulate(&mut self, other: ServiceReport) {
        self.bytes_consumed += other.bytes_consumed;
        self.words_read += other.words_read;
        self.lines_completed += other.lines_completed;
        self.lines_rejected += other.lines_rejected;
    }
}

/// Single-threaded polling engine. One instance owns the device; there is
/// no scheduler, no interrupts and no suspension primitive, so "waiting"
/// is a busy re-poll of the byte-count register.
pub struct Engine<D: WordUart> {
    dev: D,
    mode: Mode,
    assembler: LineAssembler,
}

impl<D: WordUart> Engine<D> {
    pub fn new(dev: D, mode: Mode) -> Self {
        Self {
            dev,
            mode,
            assembler: LineAssembler::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn device(&self) -> &D {
        &self.dev
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.dev
    }

    pub fn into_device(self) -> D {
        self.dev
    }

    /// Drain everything the receive queue currently holds.
    ///
    /// The availability register is live hardware state: it is re-read after
    /// every word consumption rather than decremented locally, and the count
    /// sampled immediately before a `read_word` decides how many of that
    /// word's 8 byte positions carry payload. Returns immediately with an
    /// empty report when no data is waiting.
    pub fn service(&mut self) -> ServiceReport {
        let mut report = ServiceReport::default();
        let mut available = self.dev.rx_available();
        while available > 0 {
            let word = self.dev.read_word();
            let valid = available.min(WORD_BYTES);
            report.words_read += 1;
            report.bytes_consumed += valid;
            self.handle_word(word, valid, &mut report);
            available = self.dev.rx_available();
        }
        report
    }

    fn handle_word(&mut self, word: u64, valid: usize, report: &mut ServiceReport) {
        match self.mode {
            Mode::Passthrough => self.dev.write_word(word),
            Mode::Transform { offset } => {
                // Only the reported bytes are payload; stale positions are
                // dropped and the output word is re-padded with zeros.
                let mut bytes = unpack_word(word);
                for byte in &mut bytes[..valid] {
                    *byte = byte.wrapping_add(offset);
                }
                self.dev.write_word(pack_word(&bytes[..valid]));
            }
            Mode::LineEcho => {
                for &byte in &unpack_word(word)[..valid] {
                    match self.assembler.push(byte) {
                        LinePush::Collecting => {}
                        LinePush::Complete => {
                            emit(&mut self.dev, ACK_BANNER);
                            emit(&mut self.dev, self.assembler.line());
                            self.assembler.clear();
                            report.lines_completed += 1;
                        }
                        LinePush::Rejected => report.lines_rejected += 1,
                    }
                }
            }
        }
    }

    /// Run forever. Busy-polls the device with no yield: the target has no
    /// interrupt model, so this loop is the whole program.
    pub fn run(&mut self) -> ! {
        loop {
            self.service();
        }
    }
}
