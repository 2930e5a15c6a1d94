//! Claim/cooldown state machine.
//!
//! ```text
//! Unknown ──status──▶ Idle ◀──────────── tick (now ≥ deadline)
//!    │                 │  ▲                        │
//!    │            begin│  │retry                   │
//!    │                 ▼  │                        │
//!    └──status──▶ CoolingDown ◀──granted/cooldown── Claiming
//! ```
//!
//! Only the deadline is stored; the remaining time is always derived from the
//! injected [`Clock`]. Every claim carries a [`ClaimTicket`]; a resolution whose
//! ticket is no longer current (the coordinator was reset, or another claim
//! started) is dropped.

use super::api::StatusResponse;
use super::clock::Clock;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClaimTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimState {
    Unknown,
    Idle,
    Claiming { ticket: ClaimTicket },
    CoolingDown { deadline: DateTime<Utc> },
}

impl ClaimState {
    fn name(&self) -> &'static str {
        match self {
            ClaimState::Unknown => "unknown",
            ClaimState::Idle => "idle",
            ClaimState::Claiming { .. } => "claiming",
            ClaimState::CoolingDown { .. } => "cooling_down",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClaimRejected {
    #[error("A claim is already in flight")]
    AlreadyClaiming,
    #[error("Cooling down for another {remaining_seconds}s")]
    CoolingDown { remaining_seconds: u64 },
    #[error("Faucet status is not known yet")]
    StatusUnknown,
}

/// How an in-flight claim ended, as far as the state machine cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimResolution {
    /// Tokens sent. Without a next-eligible time the claim button comes back at once.
    Granted { next_claim_at: Option<DateTime<Utc>> },
    /// The server reports an active cooldown; its figure replaces ours.
    Cooldown { remaining_seconds: u64 },
    /// Anything the user may simply try again after.
    Retry,
}

/// Returned by [`ClaimCoordinator::tick`] on the tick that ends a cooldown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownElapsed;

pub struct ClaimCoordinator {
    clock: Arc<dyn Clock>,
    state: ClaimState,
    generation: u64,
    epoch: u64,
}

impl ClaimCoordinator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            state: ClaimState::Unknown,
            generation: 0,
            epoch: 0,
        }
    }

    pub fn state(&self) -> &ClaimState {
        &self.state
    }

    pub fn can_claim(&self) -> bool {
        matches!(self.state, ClaimState::Idle)
    }

    pub fn is_claiming(&self) -> bool {
        matches!(self.state, ClaimState::Claiming { .. })
    }

    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        match self.state {
            ClaimState::CoolingDown { deadline } => Some(deadline),
            _ => None,
        }
    }

    /// Whole seconds until the deadline, rounded up; 0 when not cooling down.
    pub fn remaining_seconds(&self) -> u64 {
        self.deadline()
            .map(|deadline| seconds_until(deadline, self.clock.now()))
            .unwrap_or(0)
    }

    /// Bumped by every [`reset`](Self::reset) and every claim start. Status
    /// responses requested under an older epoch must be discarded by the caller.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Folds a status query into the state. `wallet_known` is whether the
    /// query was made for a connected wallet; without one, a clear status
    /// says nothing about this user and is ignored.
    pub fn apply_status(&mut self, status: &StatusResponse, wallet_known: bool) {
        if self.is_claiming() {
            debug!("Ignoring status while a claim is in flight");
            return;
        }
        if !status.can_claim && status.cooldown_remaining > 0 {
            self.cool_down_for(status.cooldown_remaining);
        } else if wallet_known {
            self.enter(ClaimState::Idle);
        }
    }

    /// A status query for a connected wallet failed. Nothing says the user is
    /// cooling down, so an unknown state opens up for a (retryable) claim.
    pub fn status_unavailable(&mut self) {
        if self.state == ClaimState::Unknown {
            self.enter(ClaimState::Idle);
        }
    }

    /// Moves `Idle → Claiming`. The returned ticket must accompany the resolution.
    pub fn begin_claim(&mut self) -> Result<ClaimTicket, ClaimRejected> {
        match self.state {
            ClaimState::Idle => {
                self.generation += 1;
                self.epoch += 1;
                let ticket = ClaimTicket(self.generation);
                self.enter(ClaimState::Claiming { ticket });
                Ok(ticket)
            }
            ClaimState::Claiming { .. } => Err(ClaimRejected::AlreadyClaiming),
            ClaimState::CoolingDown { .. } => Err(ClaimRejected::CoolingDown {
                remaining_seconds: self.remaining_seconds(),
            }),
            ClaimState::Unknown => Err(ClaimRejected::StatusUnknown),
        }
    }

    /// Ends the claim identified by `ticket`. Returns `false`, changing
    /// nothing, when the ticket is stale.
    #[must_use]
    pub fn resolve(&mut self, ticket: ClaimTicket, resolution: ClaimResolution) -> bool {
        if self.state != (ClaimState::Claiming { ticket }) {
            debug!(ticket = ticket.0, state = self.state.name(), "Dropping stale claim resolution");
            return false;
        }
        match resolution {
            ClaimResolution::Granted {
                next_claim_at: Some(deadline),
            } if deadline > self.clock.now() => self.enter(ClaimState::CoolingDown { deadline }),
            ClaimResolution::Granted { .. } | ClaimResolution::Retry => {
                self.enter(ClaimState::Idle)
            }
            ClaimResolution::Cooldown { remaining_seconds } => {
                self.cool_down_for(remaining_seconds)
            }
        }
        true
    }

    /// Called once per timer period. Fires `CoolingDown → Idle` the first time
    /// the deadline has passed; every other call is a no-op.
    pub fn tick(&mut self) -> Option<CooldownElapsed> {
        let deadline = self.deadline()?;
        if self.clock.now() < deadline {
            return None;
        }
        self.enter(ClaimState::Idle);
        Some(CooldownElapsed)
    }

    /// Disconnect/teardown: back to `Idle`, invalidating any in-flight claim
    /// and any pending status query.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.epoch += 1;
        self.enter(ClaimState::Idle);
    }

    fn cool_down_for(&mut self, seconds: u64) {
        if seconds == 0 {
            self.enter(ClaimState::Idle);
            return;
        }
        let now = self.clock.now();
        // Out-of-range server figures clamp to the far future.
        let deadline = i64::try_from(seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|span| now.checked_add_signed(span))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.enter(ClaimState::CoolingDown { deadline });
    }

    fn enter(&mut self, next: ClaimState) {
        if self.state != next {
            info!(from = self.state.name(), to = next.name(), "Claim state changed");
        }
        self.state = next;
    }
}

fn seconds_until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let ms = (deadline - now).num_milliseconds();
    if ms <= 0 {
        0
    } else {
        ((ms + 999) / 1000) as u64
    }
}
