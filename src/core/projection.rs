//! Populations and projections, the units in which connectivity is handed to a simulator.
use serde::{Deserialize, Serialize};

use crate::core::connection::Connection;
use crate::error::SNNError;

/// The kind of synapse a projection targets on the receiving neurons.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Receptor {
    Excitatory,
    Inhibitory,
}

/// What a population is made of.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PopulationKind {
    /// Current-based leaky integrate-and-fire neurons with exponential synapses.
    IfCurrExp,
    /// Poisson spike source firing at the given rate (in Hz).
    SpikeSourcePoisson { rate: f64 },
}

/// A labelled group of neurons, addressed by ids in `[0, size)`.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Population {
    pub label: String,
    pub size: usize,
    pub kind: PopulationKind,
}

impl Population {
    pub fn new(label: &str, size: usize, kind: PopulationKind) -> Self {
        Population {
            label: label.to_string(),
            size,
            kind,
        }
    }
}

/// A labelled list of connections from a source population to a target population.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Projection {
    pub label: String,
    pub source: String,
    pub target: String,
    pub receptor: Receptor,
    pub connections: Vec<Connection>,
}

impl Projection {
    /// Create a projection between two populations.
    /// Returns an error if a connection refers to a neuron outside of the populations.
    pub fn build(
        label: &str,
        source: &Population,
        target: &Population,
        receptor: Receptor,
        connections: Vec<Connection>,
    ) -> Result<Self, SNNError> {
        if let Some(connection) = connections
            .iter()
            .find(|c| c.source_id >= source.size || c.target_id >= target.size)
        {
            return Err(SNNError::OutOfBounds(format!(
                "Connection {} -> {} of projection {} does not fit populations {} ({}) and {} ({})",
                connection.source_id,
                connection.target_id,
                label,
                source.label,
                source.size,
                target.label,
                target.size
            )));
        }

        Ok(Projection {
            label: label.to_string(),
            source: source.label.clone(),
            target: target.label.clone(),
            receptor,
            connections,
        })
    }

    /// The number of connections in the projection.
    pub fn num_connections(&self) -> usize {
        self.connections.len()
    }
}

/// One-to-one connections between two populations of the same size.
pub fn one_to_one(size: usize, weight: f64, delay: f64) -> Vec<Connection> {
    (0..size)
        .map(|id| Connection::new(id, id, weight, delay))
        .collect()
}
