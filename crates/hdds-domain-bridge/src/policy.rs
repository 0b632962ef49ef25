// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! QoS policy vocabulary used by the bridge.
//!
//! Names match the keys accepted in bridge configuration files
//! (`reliable`, `best_effort`, `volatile`, `transient_local`,
//! `keep_last`, `keep_all`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a policy name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {policy} policy '{value}' (expected one of: {expected})")]
pub struct PolicyParseError {
    pub policy: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Lowercase, with `-` folded into `_`.
fn normalize(s: &str) -> String {
    s.trim().to_ascii_lowercase().replace('-', "_")
}

/// Reliability policy
///
/// Determines delivery guarantees for samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reliability {
    /// Retransmit until acknowledged.
    Reliable,
    /// Fire-and-forget.
    BestEffort,
}

impl Reliability {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reliable => "reliable",
            Self::BestEffort => "best_effort",
        }
    }
}

impl FromStr for Reliability {
    type Err = PolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "reliable" => Ok(Self::Reliable),
            "best_effort" => Ok(Self::BestEffort),
            _ => Err(PolicyParseError {
                policy: "reliability",
                value: s.to_string(),
                expected: "reliable, best_effort",
            }),
        }
    }
}

impl fmt::Display for Reliability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Durability policy
///
/// Determines whether late-joining readers receive samples published
/// before they matched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Durability {
    /// Samples are not kept for late-joiners.
    Volatile,
    /// Writer caches samples (up to history depth) for late-joiners.
    TransientLocal,
}

impl Durability {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Volatile => "volatile",
            Self::TransientLocal => "transient_local",
        }
    }
}

impl FromStr for Durability {
    type Err = PolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "volatile" => Ok(Self::Volatile),
            "transient_local" => Ok(Self::TransientLocal),
            _ => Err(PolicyParseError {
                policy: "durability",
                value: s.to_string(),
                expected: "volatile, transient_local",
            }),
        }
    }
}

impl fmt::Display for Durability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// History policy kind.
///
/// The depth is carried separately so that it survives a switch
/// between `KeepAll` and `KeepLast`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryKind {
    /// Keep the last N samples, dropping the oldest.
    #[default]
    KeepLast,
    /// Keep every sample within resource limits.
    KeepAll,
}

impl HistoryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::KeepLast => "keep_last",
            Self::KeepAll => "keep_all",
        }
    }
}

impl FromStr for HistoryKind {
    type Err = PolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "keep_last" => Ok(Self::KeepLast),
            "keep_all" => Ok(Self::KeepAll),
            _ => Err(PolicyParseError {
                policy: "history",
                value: s.to_string(),
                expected: "keep_last, keep_all",
            }),
        }
    }
}

impl fmt::Display for HistoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
