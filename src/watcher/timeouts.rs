//! Debounce timers, one per component
//!
//! A timer is just a deadline. Scheduling a component that already has a
//! pending deadline replaces it, which is how a burst of events collapses
//! into one rebuild.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::models::ComponentIdentity;

/// A rebuild waiting for its debounce window to elapse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRebuild {
    pub identity: ComponentIdentity,
    pub deadline: Instant,
    /// Most recent path that (re)scheduled this rebuild
    pub trigger: PathBuf,
    /// Number of events coalesced into this rebuild
    pub events: usize,
}

/// Component key to pending rebuild; at most one entry per key
#[derive(Debug, Default)]
pub struct RebuildTimeouts {
    pending: HashMap<ComponentIdentity, PendingRebuild>,
}

impl RebuildTimeouts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `identity` to rebuild at `now + delay`.
    ///
    /// Returns `true` when an earlier pending rebuild was replaced.
    pub fn schedule(
        &mut self,
        identity: ComponentIdentity,
        trigger: PathBuf,
        now: Instant,
        delay: Duration,
    ) -> bool {
        let deadline = now + delay;
        match self.pending.get_mut(&identity) {
            Some(pending) => {
                pending.deadline = deadline;
                pending.trigger = trigger;
                pending.events += 1;
                true
            }
            None => {
                self.pending.insert(
                    identity.clone(),
                    PendingRebuild {
                        identity,
                        deadline,
                        trigger,
                        events: 1,
                    },
                );
                false
            }
        }
    }

    /// Remove and return every rebuild whose deadline has passed, earliest first
    pub fn take_due(&mut self, now: Instant) -> Vec<PendingRebuild> {
        let due: Vec<ComponentIdentity> = self
            .pending
            .iter()
            .filter(|(_, p)| p.deadline <= now)
            .map(|(id, _)| id.clone())
            .collect();

        let mut taken: Vec<PendingRebuild> = due
            .iter()
            .filter_map(|id| self.pending.remove(id))
            .collect();
        taken.sort_by(|a, b| {
            a.deadline
                .cmp(&b.deadline)
                .then_with(|| a.identity.cmp(&b.identity))
        });
        taken
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|p| p.deadline).min()
    }

    /// Drop every pending rebuild, returning how many were cancelled
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.pending.len();
        self.pending.clear();
        cancelled
    }

    pub fn contains(&self, identity: &ComponentIdentity) -> bool {
        self.pending.contains_key(identity)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
