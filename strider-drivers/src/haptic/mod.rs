//! Haptic output drivers

pub mod vibration;

pub use vibration::VibrationMotor;
