#![no_std]
// Wordline - Word-queue UART line firmware
// Copyright (C) 2026 Wordline Contributors
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.
#![no_main]

use core::ptr::{read_volatile, write_volatile};

use panic_halt as _;
use riscv_rt::entry;
use wordline_core::{Engine, Mode, WordUart};

// UART front-end register block. The linker script places nothing here;
// these addresses are decoded by the soft-core's bus fabric.
const UART_BASE: usize = 0xFFFF_FFFF_FFFF_F000;
const RX_BYTES_AVAILABLE: *const u64 = UART_BASE as *const u64;
const RX_QUEUE_NEXT: *const u64 = (UART_BASE + 0x08) as *const u64;
const TX_QUEUE_SPACE: *const u64 = (UART_BASE + 0x10) as *const u64;
const TX_WRITE: *mut u64 = (UART_BASE + 0x18) as *mut u64;

/// The real device. Every access is a volatile register access; reading
/// `RX_QUEUE_NEXT` dequeues a word as a hardware side effect.
struct MmioWordUart;

impl WordUart for MmioWordUart {
    fn rx_available(&mut self) -> usize {
        unsafe { read_volatile(RX_BYTES_AVAILABLE) as usize }
    }

    fn read_word(&mut self) -> u64 {
        unsafe { read_volatile(RX_QUEUE_NEXT) }
    }

    fn write_word(&mut self, word: u64) {
        unsafe { write_volatile(TX_WRITE, word) }
    }

    fn tx_space(&mut self) -> usize {
        unsafe { read_volatile(TX_QUEUE_SPACE) as usize }
    }
}

#[entry]
fn main() -> ! {
    let mut engine = Engine::new(MmioWordUart, Mode::LineEcho);
    engine.run()
}
