//! Hardware driver implementations
//!
//! This crate provides concrete implementations for the watch hardware:
//!
//! - Accelerometer (LIS3DH over I2C), implementing the core `MotionSensor`
//! - Display (Sharp memory LCD over SPI), an `embedded-graphics` draw target
//! - Haptics (GPIO-driven vibration motor)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod accel;
pub mod display;
pub mod haptic;
