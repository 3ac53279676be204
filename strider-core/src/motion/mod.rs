//! Motion classification
//!
//! Batch averaging, step detection, and the vertical-position mapping.

pub mod classifier;
pub mod position;
pub mod sample;

pub use classifier::{ClassificationResult, ClassifierState, Ingest, MotionClassifier};
pub use position::display_row;
pub use sample::{average, Axes, AxisDeltas, Sample, SampleBatch, SampleBatcher, BATCH_SIZE};
