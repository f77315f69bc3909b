// Wordline - Word-queue UART line firmware
// Copyright (C) 2026 Wordline Contributors
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! End-to-end runs of the real engine against the simulated device.

use wordline_core::{Engine, Mode, LINE_CAPACITY};
use wordline_sim::{strip_padding, SimWordUart};

fn line_echo_engine() -> Engine<SimWordUart> {
    Engine::new(SimWordUart::new(), Mode::LineEcho)
}

#[test]
fn test_line_echo_single_line() {
    let mut engine = line_echo_engine();
    engine.device_mut().push_rx(b"hi\n");
    let report = engine.service();

    assert_eq!(report.lines_completed, 1);
    assert_eq!(report.lines_rejected, 0);
    let out = strip_padding(engine.device().tx_bytes());
    assert_eq!(out, b"ack> hi\n");
}

#[test]
fn test_line_accumulates_across_service_passes() {
    // Bytes arrive in dribs and drabs over several polls; the in-flight
    // line must survive between passes without loss.
    let mut engine = line_echo_engine();
    for burst in [&b"hel"[..], b"lo wor", b"ld\n"] {
        engine.device_mut().push_rx(burst);
        engine.service();
    }
    let out = strip_padding(engine.device().tx_bytes());
    assert_eq!(out, b"ack> hello world\n");
}

#[test]
fn test_multiple_lines_in_one_burst() {
    let mut engine = line_echo_engine();
    engine.device_mut().push_rx(b"one\ntwo\n");
    let report = engine.service();

    assert_eq!(report.lines_completed, 2);
    let out = strip_padding(engine.device().tx_bytes());
    assert_eq!(out, b"ack> one\nack> two\n");
}

#[test]
fn test_oversized_line_is_rejected_not_corrupted() {
    let mut engine = line_echo_engine();
    let mut input = vec![b'x'; LINE_CAPACITY + 1];
    input.push(b'\n');
    input.extend_from_slice(b"ok\n");
    engine.device_mut().push_rx(&input);
    let report = engine.service();

    assert_eq!(report.lines_rejected, 1);
    assert_eq!(report.lines_completed, 1);
    let out = strip_padding(engine.device().tx_bytes());
    assert_eq!(out, b"ack> ok\n");
}

#[test]
fn test_passthrough_echoes_word_stream() {
    let mut engine = Engine::new(SimWordUart::new(), Mode::Passthrough);
    engine.device_mut().push_rx(b"abcdefgh12345678");
    let report = engine.service();

    assert_eq!(report.words_read, 2);
    assert_eq!(engine.device().tx_bytes(), b"abcdefgh12345678");
}

#[test]
fn test_transform_applies_offset_with_wraparound() {
    let mut engine = Engine::new(SimWordUart::new(), Mode::Transform { offset: 1 });
    engine.device_mut().push_rx(&[0x41, 0xFF]);
    engine.service();

    let tx = engine.device().tx_bytes();
    assert_eq!(&tx[..2], &[0x42, 0x00]);
    // Padding positions carry no payload and stay zero on the way out.
    assert!(tx[2..].iter().all(|&b| b == 0));
}

#[test]
fn test_available_count_is_reread_after_each_word() {
    let mut engine = line_echo_engine();
    engine.device_mut().push_rx(b"0123456789abcdef\n");
    engine.service();

    let counts = engine.device().access_counts();
    assert_eq!(counts.words_read, 3);
    // One poll before each word plus the final empty poll.
    assert_eq!(counts.rx_polls, counts.words_read + 1);
}

#[test]
fn test_engine_consumes_everything_it_was_given() {
    let mut engine = line_echo_engine();
    engine.device_mut().push_rx(b"partial line without terminator");
    let report = engine.service();

    assert_eq!(report.bytes_consumed, 31);
    assert_eq!(engine.device().rx_pending(), 0);
    // Nothing echoed until the terminator shows up.
    assert!(engine.device().tx_bytes().is_empty());
    assert_eq!(report.lines_completed, 0);
}
