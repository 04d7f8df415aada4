//! Module implementing the concept of connections in a network.

use serde::{Deserialize, Serialize};

use crate::error::SNNError;

/// Represents a connection between two neurons in a network.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy)]
pub struct Connection {
    /// ID of the source (presynaptic) neuron
    pub source_id: usize,
    /// ID of the target (postsynaptic) neuron
    pub target_id: usize,
    /// Connection weight
    pub weight: f64,
    /// Connection delay (must be non-negative)
    pub delay: f64,
}

impl Connection {
    pub fn new(source_id: usize, target_id: usize, weight: f64, delay: f64) -> Self {
        Connection {
            source_id,
            target_id,
            weight,
            delay,
        }
    }

    /// Create a new connection with the specified parameters.
    /// Returns an error if the delay is negative or if the weight or delay is not finite.
    pub fn build(
        source_id: usize,
        target_id: usize,
        weight: f64,
        delay: f64,
    ) -> Result<Self, SNNError> {
        check_synapse(weight, delay)?;
        Ok(Connection::new(source_id, target_id, weight, delay))
    }
}

/// Check that a (weight, delay) pair describes a valid synapse.
pub fn check_synapse(weight: f64, delay: f64) -> Result<(), SNNError> {
    if !weight.is_finite() {
        return Err(SNNError::InvalidParameter(format!(
            "Connection weight must be finite, got {}",
            weight
        )));
    }
    if !delay.is_finite() || delay < 0.0 {
        return Err(SNNError::InvalidParameter(format!(
            "Connection delay must be non-negative and finite, got {}",
            delay
        )));
    }
    Ok(())
}
