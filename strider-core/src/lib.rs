//! Board-agnostic core logic for the Strider watch firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (motion sensor, clock, haptics, display sink)
//! - Motion classification (batch averaging, step detection, position mapping)
//! - Reward cycle policy and progress bar model
//! - Watch controller tying the classifier to its collaborators
//! - Configuration types and the `watch.toml` parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod motion;
pub mod reward;
pub mod traits;
pub mod watch;
