//! Watch controller
//!
//! The controller owns the classifier state and is the only thing that
//! mutates it. It:
//! - Groups incoming samples into batches
//! - Reads the clock once per batch
//! - Runs the classifier
//! - Pulses the haptic motor when a reward is granted
//! - Pushes results and clock ticks to the display

use crate::config::WatchConfig;
use crate::motion::{ClassificationResult, MotionClassifier, Sample, SampleBatch, SampleBatcher};
use crate::traits::{Clock, DisplaySink, Haptics};

/// Top-level coordinator for one watch
#[derive(Debug, Clone)]
pub struct WatchController {
    /// Step classifier and reward cycle
    classifier: MotionClassifier,
    /// Pending samples for the next batch
    batcher: SampleBatcher,
    /// Result of the most recent batch
    last_result: Option<ClassificationResult>,
    /// Batches classified since startup
    batches: u32,
}

impl WatchController {
    /// Create a controller; the first reward window opens now
    pub fn new<C: Clock>(config: &WatchConfig, clock: &C) -> Self {
        Self::with_classifier(MotionClassifier::new(config, clock.now_s()))
    }

    /// Create a controller around an existing classifier
    pub fn with_classifier(classifier: MotionClassifier) -> Self {
        Self {
            classifier,
            batcher: SampleBatcher::new(),
            last_result: None,
            batches: 0,
        }
    }

    /// Feed one sample; classifies once a full batch has accumulated
    pub fn on_sample<C, H, D>(
        &mut self,
        sample: Sample,
        clock: &C,
        haptics: &mut H,
        display: &mut D,
    ) -> Option<ClassificationResult>
    where
        C: Clock,
        H: Haptics,
        D: DisplaySink,
    {
        let batch = self.batcher.push(sample)?;
        Some(self.on_batch(&batch, clock, haptics, display))
    }

    /// Classify a complete batch and notify collaborators
    pub fn on_batch<C, H, D>(
        &mut self,
        batch: &SampleBatch,
        clock: &C,
        haptics: &mut H,
        display: &mut D,
    ) -> ClassificationResult
    where
        C: Clock,
        H: Haptics,
        D: DisplaySink,
    {
        let now_s = clock.now_s();
        let result = self.classifier.ingest(batch, now_s);

        if result.reward_granted {
            haptics.short_pulse();
        }
        display.show_classification(&result);

        self.batches = self.batches.wrapping_add(1);
        self.last_result = Some(result);
        result
    }

    /// Once-per-second clock update; does not touch classifier state
    pub fn on_tick<C, D>(&mut self, clock: &C, display: &mut D)
    where
        C: Clock,
        D: DisplaySink,
    {
        display.show_time(clock.now_s());
    }

    /// Result of the most recent batch, if any
    pub fn last_result(&self) -> Option<&ClassificationResult> {
        self.last_result.as_ref()
    }

    /// The classifier and its state
    pub fn classifier(&self) -> &MotionClassifier {
        &self.classifier
    }

    /// Samples waiting for a full batch
    pub fn pending_samples(&self) -> usize {
        self.batcher.len()
    }

    /// Batches classified since startup
    pub fn batches_processed(&self) -> u32 {
        self.batches
    }
}
