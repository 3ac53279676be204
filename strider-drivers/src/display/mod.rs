//! Display drivers

pub mod sharp_memory;

pub use sharp_memory::{SharpError, SharpMemoryDisplay};
