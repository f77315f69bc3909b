// Wordline - Word-queue UART line firmware
// Copyright (C) 2026 Wordline Contributors
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! YAML scenario schema for the deterministic, CI-friendly test runner.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use wordline_core::Mode;

/// Default schema version for scenario files.
fn default_schema_version() -> String {
    "1.0".to_string()
}

fn default_transform_offset() -> u8 {
    1
}

fn default_max_passes() -> usize {
    10_000
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScenarioError {
    #[error("unsupported schema version '{0}'; supported: 1.0")]
    UnsupportedSchema(String),
    #[error("input chunk {0} must set exactly one of 'text' or 'hex'")]
    AmbiguousChunk(usize),
    #[error("input chunk {index}: invalid hex byte '{token}'")]
    BadHex { index: usize, token: String },
}

/// Engine mode selector. `transform_offset` on the scenario supplies the
/// per-byte offset when this is `Transform`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModeSpec {
    Passthrough,
    Transform,
    #[default]
    LineEcho,
}

/// One burst of receive-queue input. Exactly one of `text` or `hex` is set;
/// `hex` is whitespace-separated byte values (`"41 0a"`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputChunk {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub hex: Option<String>,
}

impl InputChunk {
    fn bytes(&self, index: usize) -> Result<Vec<u8>, ScenarioError> {
        match (&self.text, &self.hex) {
            (Some(text), None) => Ok(text.as_bytes().to_vec()),
            (None, Some(hex)) => hex
                .split_whitespace()
                .map(|token| {
                    u8::from_str_radix(token, 16).map_err(|_| ScenarioError::BadHex {
                        index,
                        token: token.to_string(),
                    })
                })
                .collect(),
            _ => Err(ScenarioError::AmbiguousChunk(index)),
        }
    }
}

/// A deterministic runner scenario: feed the input bursts through the
/// simulated device, service the engine after each burst, compare the
/// padding-stripped transmit stream against `expected_output`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    pub name: String,
    #[serde(default)]
    pub mode: ModeSpec,
    #[serde(default = "default_transform_offset")]
    pub transform_offset: u8,
    #[serde(default)]
    pub input: Vec<InputChunk>,
    #[serde(default)]
    pub expected_output: Option<String>,
    /// Upper bound on engine service passes before the run is declared stuck.
    #[serde(default = "default_max_passes")]
    pub max_passes: usize,
}

impl Scenario {
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.schema_version != "1.0" {
            return Err(ScenarioError::UnsupportedSchema(self.schema_version.clone()));
        }
        for (index, chunk) in self.input.iter().enumerate() {
            chunk.bytes(index)?;
        }
        Ok(())
    }

    /// The input bursts as raw byte vectors, in feed order.
    pub fn input_bursts(&self) -> Result<Vec<Vec<u8>>, ScenarioError> {
        self.input
            .iter()
            .enumerate()
            .map(|(index, chunk)| chunk.bytes(index))
            .collect()
    }

    /// The engine mode this scenario selects.
    pub fn mode(&self) -> Mode {
        match self.mode {
            ModeSpec::Passthrough => Mode::Passthrough,
            ModeSpec::Transform => Mode::Transform {
                offset: self.transform_offset,
            },
            ModeSpec::LineEcho => Mode::LineEcho,
        }
    }
}

/// Load and validate a scenario file.
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<Scenario> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario file {:?}", path))?;
    let scenario: Scenario = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse scenario {:?}", path))?;
    scenario
        .validate()
        .with_context(|| format!("Invalid scenario {:?}", path))?;
    Ok(scenario)
}
