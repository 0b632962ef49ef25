// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! HDDS Domain Bridge QoS
//!
//! Per-topic QoS overrides for bridging topics between DDS domains.
//!
//! For every bridged topic the operator may force reliability and/or
//! durability, or leave them unset so the bridge mirrors what the upstream
//! publisher offers. History kind and depth always have a concrete value.
//!
//! # Features
//!
//! - **Overrides**: [`QosOverride`], a plain value with fluent setters
//! - **Resolution**: [`QosResolver`] merges overrides with detected QoS
//! - **Configuration**: TOML files, one `[topics.qos]` table per topic
//!
//! # Configuration File
//!
//! ```toml
//! [bridge]
//! name = "my-bridge"
//! from_domain = 0
//! to_domain = 1
//!
//! [[topics]]
//! name = "chatter"
//! type_name = "std_msgs::String"
//!
//! [topics.qos]
//! reliability = "best_effort"   # durability stays auto-detected
//! depth = 5
//! ```

pub mod config;
pub mod policy;
pub mod qos_override;
pub mod resolve;

pub use config::{BridgeConfig, ConfigError, QosSettings, TopicConfig};
pub use policy::{Durability, HistoryKind, PolicyParseError, Reliability};
pub use qos_override::QosOverride;
pub use resolve::{
    DetectedQos, QosResolver, Resolution, ResolveError, ResolverPolicy, TopicQos, ZeroDepth,
};
