// Wordline - Word-queue UART line firmware
// Copyright (C) 2026 Wordline Contributors
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

use wordline_config::load_scenario;
use wordline_core::{Engine, Mode, ServiceReport};
use wordline_sim::{strip_padding, SimWordUart};

const EXIT_PASS: u8 = 0;
const EXIT_ASSERT_FAIL: u8 = 1;
const EXIT_CONFIG_ERROR: u8 = 2;
const EXIT_RUNTIME_ERROR: u8 = 3;

const RESULT_SCHEMA_VERSION: &str = "1.0";

fn parse_mode(s: &str) -> Result<Mode, String> {
    let v = s.trim().to_ascii_lowercase();
    match v.as_str() {
        "passthrough" | "echo" => Ok(Mode::Passthrough),
        "transform" => Ok(Mode::Transform { offset: 1 }),
        "line-echo" | "line" => Ok(Mode::LineEcho),
        _ => Err(format!(
            "unsupported mode '{}'; supported: passthrough, transform, line-echo",
            s
        )),
    }
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Wordline host runner",
    long_about = None
)]
struct Cli {
    /// Input file fed to the simulated receive queue (defaults to stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Engine mode: passthrough, transform or line-echo
    #[arg(short, long, default_value = "line-echo", value_parser = parse_mode)]
    mode: Mode,

    /// Per-byte offset used by transform mode
    #[arg(long, default_value = "1")]
    offset: u8,

    /// Bytes pushed to the receive queue per service pass
    #[arg(long, default_value = "64")]
    burst: usize,

    /// Enable register-level execution tracing
    #[arg(short, long, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Deterministic, CI-friendly runner mode driven by a scenario (YAML).
    Test(TestArgs),
}

#[derive(Parser, Debug)]
struct TestArgs {
    /// Path to the scenario YAML file
    #[arg(short, long)]
    scenario: PathBuf,

    /// Print the machine-readable result record as a JSON line
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct TestResult {
    result_schema_version: String,
    status: String,
    scenario: String,
    passes: usize,
    bytes_consumed: usize,
    words_read: usize,
    lines_completed: usize,
    lines_rejected: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Feed bytes through the engine in bursts, servicing after each burst.
fn pump(engine: &mut Engine<SimWordUart>, bytes: &[u8], burst: usize) -> (ServiceReport, usize) {
    let mut total = ServiceReport::default();
    let mut passes = 0;
    for chunk in bytes.chunks(burst.max(1)) {
        engine.device_mut().push_rx(chunk);
        total.accumulate(engine.service());
        passes += 1;
    }
    (total, passes)
}

fn run_stream(cli: &Cli) -> Result<()> {
    let bytes = match &cli.input {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("Failed to read input {:?}", path))?
        }
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let mode = match cli.mode {
        Mode::Transform { .. } => Mode::Transform { offset: cli.offset },
        other => other,
    };

    let mut engine = Engine::new(SimWordUart::new(), mode);
    let (report, passes) = pump(&mut engine, &bytes, cli.burst);

    let output = strip_padding(engine.device().tx_bytes());
    std::io::stdout()
        .write_all(&output)
        .context("Failed to write output")?;

    info!(
        passes,
        bytes_consumed = report.bytes_consumed,
        words_read = report.words_read,
        lines_completed = report.lines_completed,
        lines_rejected = report.lines_rejected,
        "run complete"
    );
    Ok(())
}

fn run_test(args: &TestArgs) -> u8 {
    let scenario = match load_scenario(&args.scenario) {
        Ok(s) => s,
        Err(e) => {
            error!("Scenario error: {:#}", e);
            return EXIT_CONFIG_ERROR;
        }
    };
    let bursts = match scenario.input_bursts() {
        Ok(b) => b,
        Err(e) => {
            error!("Scenario error: {}", e);
            return EXIT_CONFIG_ERROR;
        }
    };

    let mut engine = Engine::new(SimWordUart::new(), scenario.mode());
    let mut total = ServiceReport::default();
    let mut passes = 0;
    let mut stuck = false;
    for burst in &bursts {
        engine.device_mut().push_rx(burst);
        while engine.device().rx_pending() > 0 {
            total.accumulate(engine.service());
            passes += 1;
            if passes > scenario.max_passes {
                stuck = true;
                break;
            }
        }
        if stuck {
            break;
        }
    }

    let output = strip_padding(engine.device().tx_bytes());
    let (status, code, message) = if stuck {
        (
            "error",
            EXIT_RUNTIME_ERROR,
            Some(format!("exceeded max_passes ({})", scenario.max_passes)),
        )
    } else {
        match &scenario.expected_output {
            Some(expected) if expected.as_bytes() != output.as_slice() => (
                "fail",
                EXIT_ASSERT_FAIL,
                Some(format!(
                    "output mismatch: expected {:?}, got {:?}",
                    expected,
                    String::from_utf8_lossy(&output)
                )),
            ),
            _ => ("pass", EXIT_PASS, None),
        }
    };

    let result = TestResult {
        result_schema_version: RESULT_SCHEMA_VERSION.to_string(),
        status: status.to_string(),
        scenario: scenario.name.clone(),
        passes,
        bytes_consumed: total.bytes_consumed,
        words_read: total.words_read,
        lines_completed: total.lines_completed,
        lines_rejected: total.lines_rejected,
        message: message.clone(),
    };

    if args.json {
        match serde_json::to_string(&result) {
            Ok(line) => println!("{}", line),
            Err(e) => error!("Failed to serialize result: {}", e),
        }
    }

    match status {
        "pass" => info!(scenario = %result.scenario, "scenario passed"),
        _ => error!(
            scenario = %result.scenario,
            message = message.as_deref().unwrap_or(""),
            "scenario failed"
        ),
    }
    code
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Keep human-readable logs on stderr; stdout carries the transmit stream.
    if cli.trace {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_writer(std::io::stderr)
            .init();
    }

    match &cli.command {
        Some(Commands::Test(args)) => ExitCode::from(run_test(args)),
        None => match run_stream(&cli) {
            Ok(()) => ExitCode::from(EXIT_PASS),
            Err(e) => {
                error!("Runtime error: {:#}", e);
                ExitCode::from(EXIT_RUNTIME_ERROR)
            }
        },
    }
}
