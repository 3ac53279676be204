//! Reward cycle policy
//!
//! The wearer is given a window of `base + growth × level` seconds to take
//! enough steps. When the window elapses:
//!
//! - too few steps: the reward level goes up and a pulse is requested, but
//!   the window start is left where it was. Since the window only grows by
//!   `growth` seconds per level, a still wearer is nudged again as soon as
//!   the longer window has also elapsed.
//! - enough steps: the window restarts at `now` and the caller clears its
//!   step count. The level is kept.

use crate::config::RewardPolicy;

/// Result of evaluating the cycle at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RewardOutcome {
    /// Window has not elapsed yet
    Pending,
    /// Window elapsed with too few steps: level raised, pulse requested
    Granted,
    /// Window elapsed with enough steps: window restarted, steps cleared
    Reset,
}

/// Reward window bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RewardCycle {
    /// Start of the current window (seconds)
    pub start_s: u32,
    /// Rewards granted so far
    pub level: u32,
}

impl RewardCycle {
    /// Start the first window at `now_s`
    pub const fn new(now_s: u32) -> Self {
        Self {
            start_s: now_s,
            level: 0,
        }
    }

    /// Seconds since the window started
    ///
    /// A clock that steps backwards reads as zero elapsed.
    pub fn elapsed_s(&self, now_s: u32) -> u32 {
        now_s.saturating_sub(self.start_s)
    }

    /// Evaluate the window at `now_s` without mutating
    pub fn evaluate(
        &self,
        now_s: u32,
        step_count: u32,
        policy: &RewardPolicy,
    ) -> (RewardCycle, RewardOutcome) {
        if self.elapsed_s(now_s) <= policy.cycle_length_s(self.level) {
            return (*self, RewardOutcome::Pending);
        }

        if step_count < policy.min_steps {
            let next = RewardCycle {
                start_s: self.start_s,
                level: self.level.saturating_add(1),
            };
            (next, RewardOutcome::Granted)
        } else {
            let next = RewardCycle {
                start_s: now_s,
                level: self.level,
            };
            (next, RewardOutcome::Reset)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> RewardPolicy {
        RewardPolicy::default()
    }

    #[test]
    fn test_pending_before_window_elapses() {
        let cycle = RewardCycle::new(0);
        assert_eq!(cycle.evaluate(3, 0, &policy()), (cycle, RewardOutcome::Pending));
    }

    #[test]
    fn test_exact_window_is_still_pending() {
        // Elapsed must strictly exceed the window
        let cycle = RewardCycle::new(0);
        assert_eq!(cycle.evaluate(5, 0, &policy()).1, RewardOutcome::Pending);
    }

    #[test]
    fn test_grant_keeps_window_start() {
        let cycle = RewardCycle::new(0);
        let (next, outcome) = cycle.evaluate(6, 5, &policy());
        assert_eq!(outcome, RewardOutcome::Granted);
        assert_eq!(next, RewardCycle { start_s: 0, level: 1 });
    }

    #[test]
    fn test_reset_restarts_window() {
        let cycle = RewardCycle::new(0);
        let (next, outcome) = cycle.evaluate(6, 12, &policy());
        assert_eq!(outcome, RewardOutcome::Reset);
        assert_eq!(next, RewardCycle { start_s: 6, level: 0 });
    }

    #[test]
    fn test_reset_keeps_level() {
        let cycle = RewardCycle { start_s: 100, level: 2 };
        let (next, outcome) = cycle.evaluate(116, 10, &policy());
        assert_eq!(outcome, RewardOutcome::Reset);
        assert_eq!(next.level, 2);
        assert_eq!(next.start_s, 116);
    }

    #[test]
    fn test_repeated_grants_without_reset() {
        // A still wearer: the window start never moves, so each longer
        // window elapses in turn.
        let mut cycle = RewardCycle::new(0);
        let mut grants = 0;
        for now in 0..=40 {
            let (next, outcome) = cycle.evaluate(now, 0, &policy());
            if outcome == RewardOutcome::Granted {
                grants += 1;
            }
            cycle = next;
        }
        // Windows 5, 10, 15, 20, 25, 30, 35 elapse at t = 6, 11, 16, 21, 26, 31, 36
        assert_eq!(grants, 7);
        assert_eq!(cycle.level, 7);
        assert_eq!(cycle.start_s, 0);
    }

    #[test]
    fn test_clock_going_backwards_is_pending() {
        let cycle = RewardCycle::new(1000);
        assert_eq!(cycle.evaluate(10, 0, &policy()).1, RewardOutcome::Pending);
    }
}
