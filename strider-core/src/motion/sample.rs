//! Accelerometer samples and fixed-size batches

use heapless::Vec;

/// Number of samples delivered per classifier invocation
pub const BATCH_SIZE: usize = 3;

/// One raw accelerometer reading in milli-g
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl Sample {
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }
}

/// Per-axis values widened to `i32`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Axes {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Axes {
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Absolute per-axis difference from `previous`
    pub fn abs_diff(&self, previous: &Axes) -> AxisDeltas {
        AxisDeltas {
            x: self.x.abs_diff(previous.x),
            y: self.y.abs_diff(previous.y),
            z: self.z.abs_diff(previous.z),
        }
    }
}

/// Absolute change of each axis between consecutive batch averages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisDeltas {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

/// Exactly [`BATCH_SIZE`] samples, oldest first
pub type SampleBatch = [Sample; BATCH_SIZE];

/// Average each axis over a batch
///
/// Integer division truncates toward zero, so `(-1 + -1 + 0) / 3 == 0`.
pub fn average(batch: &SampleBatch) -> Axes {
    let sum = batch.iter().fold(Axes::ZERO, |acc, s| Axes {
        x: acc.x + i32::from(s.x),
        y: acc.y + i32::from(s.y),
        z: acc.z + i32::from(s.z),
    });

    let n = BATCH_SIZE as i32;
    Axes::new(sum.x / n, sum.y / n, sum.z / n)
}

/// Groups single samples into batches
///
/// Samples arrive one at a time from the sensor; the classifier wants them
/// in groups of [`BATCH_SIZE`]. A batch is handed out as soon as it is
/// complete and the batcher starts over empty.
#[derive(Debug, Clone, Default)]
pub struct SampleBatcher {
    pending: Vec<Sample, BATCH_SIZE>,
}

impl SampleBatcher {
    /// Create an empty batcher
    pub const fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Add a sample, returning a batch once [`BATCH_SIZE`] have accumulated
    pub fn push(&mut self, sample: Sample) -> Option<SampleBatch> {
        // Cannot fail: the batch is drained the moment it fills up
        let _ = self.pending.push(sample);

        if self.pending.is_full() {
            let batch = [self.pending[0], self.pending[1], self.pending[2]];
            self.pending.clear();
            Some(batch)
        } else {
            None
        }
    }

    /// Number of samples waiting for a full batch
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Discard any partial batch
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
