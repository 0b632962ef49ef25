// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Bridge configuration.
//!
//! Supports both programmatic and file-based configuration. Each bridged
//! topic carries a `[topics.qos]` table whose keys are turned into a
//! [`QosOverride`]; keys that are absent keep their defaults (and, for
//! reliability and durability, stay auto-detected).

use crate::policy::{Durability, HistoryKind, Reliability};
use crate::qos_override::QosOverride;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Bridge configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Bridge-wide settings.
    #[serde(default)]
    pub bridge: BridgeSection,

    /// Topics to bridge.
    #[serde(default)]
    pub topics: Vec<TopicConfig>,
}

/// Bridge-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeSection {
    /// Bridge name (for identification).
    #[serde(default = "default_bridge_name")]
    pub name: String,

    /// Default source domain ID.
    #[serde(default)]
    pub from_domain: u32,

    /// Default destination domain ID.
    #[serde(default = "default_to_domain")]
    pub to_domain: u32,
}

fn default_bridge_name() -> String {
    "hdds-domain-bridge".to_string()
}

fn default_to_domain() -> u32 {
    1
}

impl Default for BridgeSection {
    fn default() -> Self {
        Self {
            name: default_bridge_name(),
            from_domain: 0,
            to_domain: default_to_domain(),
        }
    }
}

impl BridgeConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!(
            "Loaded bridge config '{}' from {} ({} topics)",
            config.bridge.name,
            path.display(),
            config.topics.len()
        );
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Create a bridge between two domains with no topics yet.
    pub fn bridge(from_domain: u32, to_domain: u32) -> Self {
        Self {
            bridge: BridgeSection {
                from_domain,
                to_domain,
                ..Default::default()
            },
            topics: Vec::new(),
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.topics.is_empty() {
            return Err(ConfigError::Invalid("No topics configured".into()));
        }

        let mut seen = HashSet::new();
        for (i, topic) in self.topics.iter().enumerate() {
            if topic.name.is_empty() {
                return Err(ConfigError::Invalid(format!("Topic {} has empty name", i)));
            }
            if topic.type_name.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "Topic '{}' has empty type name",
                    topic.name
                )));
            }

            let (from, to) = self.domains_for(topic);
            if from == to {
                return Err(ConfigError::Invalid(format!(
                    "Topic '{}' has same source and destination domain ({})",
                    topic.name, from
                )));
            }

            if !seen.insert((topic.name.as_str(), from, to)) {
                return Err(ConfigError::Invalid(format!(
                    "Topic '{}' is bridged twice from domain {} to domain {}",
                    topic.name, from, to
                )));
            }
        }

        Ok(())
    }

    /// Add a topic.
    pub fn add_topic(&mut self, topic: TopicConfig) {
        self.topics.push(topic);
    }

    /// Effective `(from, to)` domains for a topic.
    pub fn domains_for(&self, topic: &TopicConfig) -> (u32, u32) {
        (
            topic.from_domain.unwrap_or(self.bridge.from_domain),
            topic.to_domain.unwrap_or(self.bridge.to_domain),
        )
    }
}

/// Configuration for a single bridged topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicConfig {
    /// Topic name.
    pub name: String,

    /// Type name.
    pub type_name: String,

    /// Source domain ID (defaults to the bridge's).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_domain: Option<u32>,

    /// Destination domain ID (defaults to the bridge's).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_domain: Option<u32>,

    /// QoS overrides.
    #[serde(default)]
    pub qos: QosSettings,
}

impl TopicConfig {
    /// Create a new topic entry.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            from_domain: None,
            to_domain: None,
            qos: QosSettings::default(),
        }
    }

    /// Set source and destination domains for this topic only.
    pub fn domains(mut self, from_domain: u32, to_domain: u32) -> Self {
        self.from_domain = Some(from_domain);
        self.to_domain = Some(to_domain);
        self
    }

    /// Set QoS settings.
    pub fn qos(mut self, qos: QosSettings) -> Self {
        self.qos = qos;
        self
    }

    /// Build the QoS override for this topic.
    pub fn qos_override(&self) -> QosOverride {
        self.qos.to_override()
    }
}

/// QoS keys as written by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QosSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reliability: Option<Reliability>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub durability: Option<Durability>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<HistoryKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<usize>,
}

impl QosSettings {
    /// Apply the keys that were given on top of the default overrides.
    pub fn to_override(&self) -> QosOverride {
        let mut qos = QosOverride::default();
        if let Some(reliability) = self.reliability {
            qos.set_reliability(reliability);
        }
        if let Some(durability) = self.durability {
            qos.set_durability(durability);
        }
        if let Some(history) = self.history {
            qos.set_history(history);
        }
        if let Some(depth) = self.depth {
            qos.set_depth(depth);
        }
        qos
    }
}
