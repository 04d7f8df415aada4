//! Module for sampling random networks.
//!
//! - [`distribution`]: clipped normal distributions of weights and delays
//! - [`network`]: balanced random networks of excitatory and inhibitory neurons
pub mod distribution;
pub mod network;
