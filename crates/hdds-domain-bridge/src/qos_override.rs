// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-topic QoS overrides.
//!
//! A [`QosOverride`] tells the bridge which outbound QoS policies are forced
//! by the operator and which are left to auto-detection from the upstream
//! publisher.
//!
//! | Policy      | Default      | When unset                  |
//! |-------------|--------------|-----------------------------|
//! | reliability | unset        | use the detected value      |
//! | durability  | unset        | use the detected value      |
//! | history     | `KeepLast`   | always concrete             |
//! | depth       | `10`         | always concrete             |
//!
//! # Example
//!
//! ```
//! use hdds_domain_bridge::{HistoryKind, QosOverride, Reliability};
//!
//! let mut qos = QosOverride::default();
//! qos.set_reliability(Reliability::BestEffort)
//!     .set_history(HistoryKind::KeepAll)
//!     .set_depth(50);
//!
//! assert_eq!(qos.reliability(), Some(Reliability::BestEffort));
//! assert_eq!(qos.durability(), None); // still auto-detected
//! ```

use crate::policy::{Durability, HistoryKind, Reliability};
use serde::Serialize;

/// Options for overriding the QoS of a bridged topic.
///
/// Reliability and durability start unset, meaning the bridge mirrors
/// whatever the upstream publisher offers. Once set they cannot be unset
/// again. History and depth always hold a concrete value.
///
/// Depth is not validated here; the resolver decides what to do with
/// a zero depth or a depth combined with `KeepAll`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct QosOverride {
    reliability: Option<Reliability>,
    durability: Option<Durability>,
    history: HistoryKind,
    depth: usize,
}

impl QosOverride {
    /// History depth used when none is configured.
    pub const DEFAULT_DEPTH: usize = 10;

    /// Create overrides with default values (see module docs).
    pub fn new() -> Self {
        Self::default()
    }

    /// Get reliability, `None` if it should be auto-detected.
    pub fn reliability(&self) -> Option<Reliability> {
        self.reliability
    }

    /// Force reliability.
    pub fn set_reliability(&mut self, reliability: Reliability) -> &mut Self {
        self.reliability = Some(reliability);
        self
    }

    /// Get durability, `None` if it should be auto-detected.
    pub fn durability(&self) -> Option<Durability> {
        self.durability
    }

    /// Force durability.
    pub fn set_durability(&mut self, durability: Durability) -> &mut Self {
        self.durability = Some(durability);
        self
    }

    /// Get history kind.
    pub fn history(&self) -> HistoryKind {
        self.history
    }

    /// Set history kind.
    pub fn set_history(&mut self, history: HistoryKind) -> &mut Self {
        self.history = history;
        self
    }

    /// Get history depth.
    ///
    /// Only meaningful with [`HistoryKind::KeepLast`].
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Set history depth.
    pub fn set_depth(&mut self, depth: usize) -> &mut Self {
        self.depth = depth;
        self
    }

    /// True when both reliability and durability are left to detection.
    pub fn is_auto_detected(&self) -> bool {
        self.reliability.is_none() && self.durability.is_none()
    }
}

impl Default for QosOverride {
    fn default() -> Self {
        Self {
            reliability: None,
            durability: None,
            history: HistoryKind::KeepLast,
            depth: Self::DEFAULT_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let qos = QosOverride::default();
        assert_eq!(qos.reliability(), None);
        assert_eq!(qos.durability(), None);
        assert_eq!(qos.history(), HistoryKind::KeepLast);
        assert_eq!(qos.depth(), 10);
        assert!(qos.is_auto_detected());
        assert_eq!(QosOverride::new(), qos);
    }

    #[test]
    fn test_set_then_get() {
        for r in [Reliability::Reliable, Reliability::BestEffort] {
            assert_eq!(QosOverride::new().set_reliability(r).reliability(), Some(r));
        }
        for d in [Durability::Volatile, Durability::TransientLocal] {
            assert_eq!(QosOverride::new().set_durability(d).durability(), Some(d));
        }
        for h in [HistoryKind::KeepLast, HistoryKind::KeepAll] {
            assert_eq!(QosOverride::new().set_history(h).history(), h);
        }
        for n in [0, 1, 10, usize::MAX] {
            assert_eq!(QosOverride::new().set_depth(n).depth(), n);
        }
    }

    #[test]
    fn test_fields_are_independent() {
        let mut qos = QosOverride::default();
        qos.set_reliability(Reliability::Reliable);

        assert_eq!(qos.reliability(), Some(Reliability::Reliable));
        assert_eq!(qos.durability(), None);
        assert_eq!(qos.history(), HistoryKind::KeepLast);
        assert_eq!(qos.depth(), 10);
        assert!(!qos.is_auto_detected());
    }

    #[test]
    fn test_chaining_mutates_same_instance() {
        let mut qos = QosOverride::default();
        qos.set_history(HistoryKind::KeepAll).set_depth(5);

        assert_eq!(qos.history(), HistoryKind::KeepAll);
        assert_eq!(qos.depth(), 5);
    }

    #[test]
    fn test_last_set_wins() {
        let mut qos = QosOverride::default();
        qos.set_durability(Durability::TransientLocal)
            .set_durability(Durability::Volatile)
            .set_depth(3)
            .set_depth(7);

        assert_eq!(qos.durability(), Some(Durability::Volatile));
        assert_eq!(qos.depth(), 7);
    }

    #[test]
    fn test_copy_is_independent() {
        let mut original = QosOverride::default();
        original.set_reliability(Reliability::BestEffort);

        let mut copy = original;
        assert_eq!(copy, original);

        copy.set_durability(Durability::TransientLocal).set_depth(1);
        assert_ne!(copy, original);
        assert_eq!(original.durability(), None);
        assert_eq!(original.depth(), 10);
    }

    #[test]
    fn test_depth_then_history() {
        let mut qos = QosOverride::default();
        qos.set_depth(50);
        qos.set_history(HistoryKind::KeepAll);

        assert_eq!(qos.reliability(), None);
        assert_eq!(qos.durability(), None);
        assert_eq!(qos.history(), HistoryKind::KeepAll);
        assert_eq!(qos.depth(), 50);
    }
}
