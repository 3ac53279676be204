//! Motion classifier
//!
//! Turns accelerometer batches into a step count, a display row for the
//! clock label, and reward cycle decisions.
//!
//! Each batch is averaged per axis and compared with the previous batch's
//! average. A batch counts as a step only when all three axis deltas
//! strictly exceed their thresholds. There is no hysteresis and no partial
//! credit.
//!
//! The transition is pure: [`MotionClassifier::evaluate`] computes deltas
//! against the old state and returns the next state alongside the result.
//! [`MotionClassifier::ingest`] commits it.

use super::position::display_row;
use super::sample::{average, Axes, AxisDeltas, SampleBatch};
use crate::config::{DisplayMapping, RewardPolicy, StepThresholds, WatchConfig};
use crate::reward::{RewardCycle, RewardOutcome};

/// Mutable classifier state, owned by the watch controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClassifierState {
    /// Average of the most recent batch
    pub previous: Axes,
    /// Vertical (y) component of the most recent average
    pub vertical: i32,
    /// Steps counted in the current reward window
    pub step_count: u32,
    /// Reward window and level
    pub cycle: RewardCycle,
}

impl ClassifierState {
    /// Startup state with the first reward window opening at `now_s`
    pub const fn new(now_s: u32) -> Self {
        Self {
            previous: Axes::ZERO,
            vertical: 0,
            step_count: 0,
            cycle: RewardCycle::new(now_s),
        }
    }
}

/// Outcome of one classifier invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClassificationResult {
    /// Step count after this batch (and any cycle reset)
    pub step_count: u32,
    /// Row where the clock label starts
    pub y_pos: i32,
    /// Rewards granted so far
    pub reward_level: u32,
    /// A reward was granted by this batch; the caller should pulse
    pub reward_granted: bool,
    /// This batch was classified as a step
    pub step_detected: bool,
    /// This batch closed a successful window and cleared the step count
    pub cycle_reset: bool,
}

/// A computed but uncommitted transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ingest {
    /// State to commit
    pub next: ClassifierState,
    /// Deltas against the pre-update average
    pub deltas: AxisDeltas,
    /// Result to report
    pub result: ClassificationResult,
}

impl StepThresholds {
    /// Whether every axis delta strictly exceeds its threshold
    pub fn exceeded_by(&self, deltas: &AxisDeltas) -> bool {
        deltas.x > self.x && deltas.y > self.y && deltas.z > self.z
    }
}

/// Fixed-threshold step detector with reward cycle
#[derive(Debug, Clone)]
pub struct MotionClassifier {
    state: ClassifierState,
    thresholds: StepThresholds,
    mapping: DisplayMapping,
    policy: RewardPolicy,
}

impl MotionClassifier {
    /// Create a classifier whose first reward window opens at `now_s`
    pub fn new(config: &WatchConfig, now_s: u32) -> Self {
        Self::with_state(config, ClassifierState::new(now_s))
    }

    /// Create a classifier resuming from an explicit state
    pub fn with_state(config: &WatchConfig, state: ClassifierState) -> Self {
        Self {
            state,
            thresholds: config.thresholds,
            mapping: config.display,
            policy: config.reward,
        }
    }

    /// Current state
    pub fn state(&self) -> &ClassifierState {
        &self.state
    }

    /// Current step count
    pub fn step_count(&self) -> u32 {
        self.state.step_count
    }

    /// Current reward level
    pub fn reward_level(&self) -> u32 {
        self.state.cycle.level
    }

    /// Current display row for the clock label
    pub fn y_pos(&self) -> i32 {
        display_row(self.state.vertical, &self.mapping)
    }

    /// Compute the transition for `batch` at `now_s` without committing it
    pub fn evaluate(&self, batch: &SampleBatch, now_s: u32) -> Ingest {
        let prev = &self.state;

        let averaged = average(batch);
        let deltas = averaged.abs_diff(&prev.previous);

        let step_detected = self.thresholds.exceeded_by(&deltas);
        let mut step_count = prev.step_count;
        if step_detected {
            step_count = step_count.saturating_add(1);
        }

        let y_pos = display_row(averaged.y, &self.mapping);

        let (cycle, outcome) = prev.cycle.evaluate(now_s, step_count, &self.policy);
        if outcome == RewardOutcome::Reset {
            step_count = 0;
        }

        let next = ClassifierState {
            previous: averaged,
            vertical: averaged.y,
            step_count,
            cycle,
        };

        Ingest {
            next,
            deltas,
            result: ClassificationResult {
                step_count,
                y_pos,
                reward_level: cycle.level,
                reward_granted: outcome == RewardOutcome::Granted,
                step_detected,
                cycle_reset: outcome == RewardOutcome::Reset,
            },
        }
    }

    /// Classify `batch` at `now_s` and commit the new state
    pub fn ingest(&mut self, batch: &SampleBatch, now_s: u32) -> ClassificationResult {
        let ingest = self.evaluate(batch, now_s);
        self.state = ingest.next;
        ingest.result
    }
}
