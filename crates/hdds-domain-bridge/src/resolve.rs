// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Outbound QoS resolution.
//!
//! Combines a topic's [`QosOverride`] with the QoS detected on an upstream
//! publisher. Forced policies always win; unset ones take the detected
//! value, or the resolver's fallback if nothing has been detected yet.

use crate::policy::{Durability, HistoryKind, Reliability};
use crate::qos_override::QosOverride;
use serde::Serialize;
use thiserror::Error;

/// Resolution errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Topic '{topic}' uses keep_last history with depth 0")]
    ZeroDepth { topic: String },
}

/// QoS observed on a remote publisher.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DetectedQos {
    pub reliability: Reliability,
    pub durability: Durability,
}

impl DetectedQos {
    pub fn new(reliability: Reliability, durability: Durability) -> Self {
        Self {
            reliability,
            durability,
        }
    }
}

/// Concrete QoS used on the outbound side of a bridged topic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TopicQos {
    pub reliability: Reliability,
    pub durability: Durability,
    pub history: HistoryKind,
    pub depth: usize,
}

/// Result of a resolution: the QoS plus anything the operator should know.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub qos: TopicQos,
    pub warnings: Vec<String>,
}

/// What to do with `keep_last` and depth 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ZeroDepth {
    /// Use depth 1 and warn.
    #[default]
    Clamp,
    /// Fail with [`ResolveError::ZeroDepth`].
    Reject,
}

/// Resolver policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolverPolicy {
    /// Reliability used when unset and no publisher was detected.
    pub fallback_reliability: Reliability,
    /// Durability used when unset and no publisher was detected.
    pub fallback_durability: Durability,
    pub zero_depth: ZeroDepth,
}

impl Default for ResolverPolicy {
    fn default() -> Self {
        Self {
            fallback_reliability: Reliability::Reliable,
            fallback_durability: Durability::Volatile,
            zero_depth: ZeroDepth::Clamp,
        }
    }
}

/// Turns overrides into concrete outbound QoS.
#[derive(Clone, Copy, Debug, Default)]
pub struct QosResolver {
    policy: ResolverPolicy,
}

impl QosResolver {
    /// Create a resolver with the given policy.
    pub fn new(policy: ResolverPolicy) -> Self {
        Self { policy }
    }

    /// Get the resolver policy.
    pub fn policy(&self) -> &ResolverPolicy {
        &self.policy
    }

    /// Resolve the outbound QoS for `topic`.
    ///
    /// `detected` is the QoS of the upstream publisher, if one has been
    /// seen. Picking one among several publishers is the caller's job.
    pub fn resolve(
        &self,
        topic: &str,
        overrides: &QosOverride,
        detected: Option<&DetectedQos>,
    ) -> Result<Resolution, ResolveError> {
        let mut warnings = Vec::new();

        let reliability = match (overrides.reliability(), detected) {
            (Some(forced), _) => forced,
            (None, Some(d)) => d.reliability,
            (None, None) => {
                warnings.push(format!(
                    "No publisher detected on topic '{}'; using '{}' reliability",
                    topic, self.policy.fallback_reliability
                ));
                self.policy.fallback_reliability
            }
        };

        let durability = match (overrides.durability(), detected) {
            (Some(forced), _) => forced,
            (None, Some(d)) => d.durability,
            (None, None) => {
                warnings.push(format!(
                    "No publisher detected on topic '{}'; using '{}' durability",
                    topic, self.policy.fallback_durability
                ));
                self.policy.fallback_durability
            }
        };

        let history = overrides.history();
        let mut depth = overrides.depth();

        match history {
            HistoryKind::KeepLast if depth == 0 => match self.policy.zero_depth {
                ZeroDepth::Clamp => {
                    warnings.push(format!(
                        "Topic '{}' has keep_last depth 0; using depth 1",
                        topic
                    ));
                    depth = 1;
                }
                ZeroDepth::Reject => {
                    return Err(ResolveError::ZeroDepth {
                        topic: topic.to_string(),
                    });
                }
            },
            HistoryKind::KeepAll if depth != QosOverride::DEFAULT_DEPTH => {
                warnings.push(format!(
                    "Topic '{}' sets depth {} with keep_all history; depth is ignored",
                    topic, depth
                ));
            }
            _ => {}
        }

        for warning in &warnings {
            tracing::warn!("{}", warning);
        }

        let qos = TopicQos {
            reliability,
            durability,
            history,
            depth,
        };
        tracing::debug!(
            topic,
            reliability = %qos.reliability,
            durability = %qos.durability,
            history = %qos.history,
            depth = qos.depth,
            "Resolved outbound QoS"
        );

        Ok(Resolution { qos, warnings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detected() -> DetectedQos {
        DetectedQos::new(Reliability::BestEffort, Durability::TransientLocal)
    }

    #[test]
    fn test_defaults_mirror_detected() {
        let resolver = QosResolver::default();
        let res = resolver
            .resolve("chatter", &QosOverride::default(), Some(&detected()))
            .expect("resolve");

        assert_eq!(
            res.qos,
            TopicQos {
                reliability: Reliability::BestEffort,
                durability: Durability::TransientLocal,
                history: HistoryKind::KeepLast,
                depth: 10,
            }
        );
        assert!(res.warnings.is_empty());
    }

    #[test]
    fn test_override_wins_over_detected() {
        let mut overrides = QosOverride::default();
        overrides.set_reliability(Reliability::Reliable);

        let res = QosResolver::default()
            .resolve("chatter", &overrides, Some(&detected()))
            .expect("resolve");

        assert_eq!(res.qos.reliability, Reliability::Reliable);
        // durability still mirrors the publisher
        assert_eq!(res.qos.durability, Durability::TransientLocal);
    }

    #[test]
    fn test_fallback_without_publisher() {
        let res = QosResolver::default()
            .resolve("chatter", &QosOverride::default(), None)
            .expect("resolve");

        assert_eq!(res.qos.reliability, Reliability::Reliable);
        assert_eq!(res.qos.durability, Durability::Volatile);
        assert_eq!(res.warnings.len(), 2);
    }

    #[test]
    fn test_forced_policies_need_no_publisher() {
        let mut overrides = QosOverride::default();
        overrides
            .set_reliability(Reliability::BestEffort)
            .set_durability(Durability::TransientLocal);

        let res = QosResolver::default()
            .resolve("chatter", &overrides, None)
            .expect("resolve");

        assert_eq!(res.qos.reliability, Reliability::BestEffort);
        assert_eq!(res.qos.durability, Durability::TransientLocal);
        assert!(res.warnings.is_empty());
    }

    #[test]
    fn test_custom_fallback() {
        let resolver = QosResolver::new(ResolverPolicy {
            fallback_reliability: Reliability::BestEffort,
            fallback_durability: Durability::TransientLocal,
            ..Default::default()
        });
        let res = resolver
            .resolve("chatter", &QosOverride::default(), None)
            .expect("resolve");

        assert_eq!(res.qos.reliability, Reliability::BestEffort);
        assert_eq!(res.qos.durability, Durability::TransientLocal);
    }

    #[test]
    fn test_zero_depth_clamped() {
        let mut overrides = QosOverride::default();
        overrides.set_depth(0);

        let res = QosResolver::default()
            .resolve("chatter", &overrides, Some(&detected()))
            .expect("resolve");

        assert_eq!(res.qos.depth, 1);
        assert_eq!(res.warnings.len(), 1);
        assert!(res.warnings[0].contains("depth 0"));
    }

    #[test]
    fn test_zero_depth_rejected() {
        let resolver = QosResolver::new(ResolverPolicy {
            zero_depth: ZeroDepth::Reject,
            ..Default::default()
        });
        let mut overrides = QosOverride::default();
        overrides.set_depth(0);

        let err = resolver
            .resolve("chatter", &overrides, Some(&detected()))
            .unwrap_err();
        assert_eq!(
            err,
            ResolveError::ZeroDepth {
                topic: "chatter".into()
            }
        );
    }

    #[test]
    fn test_zero_depth_with_keep_all_is_fine() {
        let mut overrides = QosOverride::default();
        overrides.set_history(HistoryKind::KeepAll).set_depth(0);

        let resolver = QosResolver::new(ResolverPolicy {
            zero_depth: ZeroDepth::Reject,
            ..Default::default()
        });
        let res = resolver
            .resolve("chatter", &overrides, Some(&detected()))
            .expect("resolve");

        assert_eq!(res.qos.history, HistoryKind::KeepAll);
        assert_eq!(res.qos.depth, 0);
        assert_eq!(res.warnings.len(), 1);
    }

    #[test]
    fn test_keep_all_default_depth_no_warning() {
        let mut overrides = QosOverride::default();
        overrides.set_history(HistoryKind::KeepAll);

        let res = QosResolver::default()
            .resolve("chatter", &overrides, Some(&detected()))
            .expect("resolve");

        assert_eq!(res.qos.history, HistoryKind::KeepAll);
        assert!(res.warnings.is_empty());
    }

    #[test]
    fn test_keep_all_custom_depth_warns() {
        let mut overrides = QosOverride::default();
        overrides.set_depth(50).set_history(HistoryKind::KeepAll);

        let res = QosResolver::default()
            .resolve("chatter", &overrides, Some(&detected()))
            .expect("resolve");

        assert_eq!(res.qos.depth, 50);
        assert_eq!(res.warnings.len(), 1);
        assert!(res.warnings[0].contains("ignored"));
    }
}
