//! This module provides a sampler of balanced random networks: a population of excitatory
//! and inhibitory neurons, randomly connected with clipped-normal weights and delays, each
//! neuron driven by its own Poisson source, plus a shared Poisson input population.
//!
//! # Examples
//!
//! ```rust
//! use sudoku_snn::sampler::network::{BalancedRandomNetwork, BalancedRandomParams};
//!
//! let params = BalancedRandomParams {
//!     n_neurons: 50,
//!     n_input: 10,
//!     ..Default::default()
//! };
//! let network = BalancedRandomNetwork::sample(&params).unwrap();
//!
//! assert_eq!(network.population("Excitatory").unwrap().size, 40);
//! assert_eq!(network.population("Inhibitory").unwrap().size, 10);
//! assert_eq!(network.projection("input_exc").unwrap().num_connections(), 10 * 40);
//! ```
use derivative::Derivative;
use itertools::iproduct;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::Distribution;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::core::connection::{check_synapse, Connection};
use crate::core::projection::{one_to_one, Population, PopulationKind, Projection, Receptor};
use crate::error::SNNError;
use crate::sampler::distribution::ClippedNormal;

/// A period of the simulation during which the input population fires at a fixed rate.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct InputPhase {
    /// Duration of the phase (in ms)
    pub duration: f64,
    /// Firing rate of the input population (in Hz)
    pub rate: f64,
}

#[derive(Derivative, Debug, PartialEq, Clone, Serialize, Deserialize)]
#[derivative(Default)]
#[serde(default)]
pub struct BalancedRandomParams {
    /// Number of excitatory and inhibitory neurons
    #[derivative(Default(value = "500"))]
    pub n_neurons: usize,
    /// Fraction of excitatory neurons
    #[derivative(Default(value = "0.8"))]
    pub exc_fraction: f64,
    /// Number of neurons in the input population
    #[derivative(Default(value = "100"))]
    pub n_input: usize,
    /// Mean weight of the excitatory connections
    #[derivative(Default(value = "0.1"))]
    pub weight_exc: f64,
    /// Mean weight of the inhibitory connections, relative to the excitatory one
    #[derivative(Default(value = "-5.0"))]
    pub inh_exc_ratio: f64,
    /// Mean weight of the connections from the input population
    #[derivative(Default(value = "0.001"))]
    pub weight_input: f64,
    /// Probability of a connection between two neurons of the network
    #[derivative(Default(value = "0.1"))]
    pub p_connect: f64,
    /// Firing rate of the sources driving each neuron (in Hz)
    #[derivative(Default(value = "1000.0"))]
    pub stim_rate: f64,
    /// Delay of the connections from the driving sources (in ms)
    #[derivative(Default(value = "1.0"))]
    pub stim_delay: f64,
    /// Successive rates of the input population
    #[derivative(Default(value = "default_schedule()"))]
    pub input_schedule: Vec<InputPhase>,
    /// Seed of the random number generator
    pub seed: u64,
}

fn default_schedule() -> Vec<InputPhase> {
    [0.0, 50.0, 10.0, 20.0]
        .iter()
        .map(|&rate| InputPhase {
            duration: 1000.0,
            rate,
        })
        .collect()
}

impl BalancedRandomParams {
    /// The number of excitatory and inhibitory neurons.
    pub fn split(&self) -> (usize, usize) {
        let n_exc = (self.n_neurons as f64 * self.exc_fraction).round() as usize;
        let n_exc = n_exc.min(self.n_neurons);
        (n_exc, self.n_neurons - n_exc)
    }

    /// The mean weight of the inhibitory connections.
    pub fn weight_inh(&self) -> f64 {
        self.inh_exc_ratio * self.weight_exc
    }

    /// Load the parameters from a JSON file, missing fields take their default value.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, SNNError> {
        let file = File::open(path).map_err(|e| SNNError::IOError(e.to_string()))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| SNNError::IOError(e.to_string()))
    }

    fn validate(&self) -> Result<(), SNNError> {
        if !(0.0..=1.0).contains(&self.exc_fraction) {
            return Err(SNNError::InvalidParameter(format!(
                "The fraction of excitatory neurons must be in [0, 1], got {}",
                self.exc_fraction
            )));
        }
        if !(0.0..=1.0).contains(&self.p_connect) {
            return Err(SNNError::InvalidParameter(format!(
                "The connection probability must be in [0, 1], got {}",
                self.p_connect
            )));
        }
        check_synapse(self.weight_exc, self.stim_delay)?;
        check_synapse(self.weight_inh(), self.stim_delay)?;
        check_synapse(self.weight_input, self.stim_delay)?;
        if !self.stim_rate.is_finite() || self.stim_rate < 0.0 {
            return Err(SNNError::InvalidParameter(format!(
                "The stimulation rate must be non-negative and finite, got {}",
                self.stim_rate
            )));
        }
        if let Some(phase) = self
            .input_schedule
            .iter()
            .find(|phase| !(phase.duration > 0.0) || !(phase.rate >= 0.0))
        {
            return Err(SNNError::InvalidParameter(format!(
                "Invalid input phase: {:?}",
                phase
            )));
        }
        Ok(())
    }
}

/// Connect each ordered pair of neurons independently with probability `p`.
pub fn fixed_probability<R: Rng, W: Distribution<f64>, D: Distribution<f64>>(
    num_sources: usize,
    num_targets: usize,
    p: f64,
    weights: &W,
    delays: &D,
    rng: &mut R,
) -> Result<Vec<Connection>, SNNError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(SNNError::InvalidParameter(format!(
            "Connection probability must be in [0, 1], got {}",
            p
        )));
    }
    let mut connections = Vec::new();
    for (source_id, target_id) in iproduct!(0..num_sources, 0..num_targets) {
        if rng.gen_bool(p) {
            connections.push(Connection::build(
                source_id,
                target_id,
                weights.sample(rng),
                delays.sample(rng),
            )?);
        }
    }
    Ok(connections)
}

/// Connect every source to every target.
pub fn all_to_all<R: Rng, W: Distribution<f64>, D: Distribution<f64>>(
    num_sources: usize,
    num_targets: usize,
    weights: &W,
    delays: &D,
    rng: &mut R,
) -> Result<Vec<Connection>, SNNError> {
    iproduct!(0..num_sources, 0..num_targets)
        .map(|(source_id, target_id)| {
            Connection::build(source_id, target_id, weights.sample(rng), delays.sample(rng))
        })
        .collect()
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct BalancedRandomNetwork {
    pub populations: Vec<Population>,
    pub projections: Vec<Projection>,
    pub input_schedule: Vec<InputPhase>,
}

impl BalancedRandomNetwork {
    /// Sample a network from the parameters, deterministic for a given seed.
    pub fn sample(params: &BalancedRandomParams) -> Result<Self, SNNError> {
        params.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
        let (n_exc, n_inh) = params.split();
        log::info!(
            "Sampling a balanced random network of {} excitatory and {} inhibitory neurons",
            n_exc,
            n_inh
        );

        let initial_rate = params.input_schedule.first().map_or(0.0, |phase| phase.rate);
        let input = Population::new(
            "Input",
            params.n_input,
            PopulationKind::SpikeSourcePoisson { rate: initial_rate },
        );
        let exc = Population::new("Excitatory", n_exc, PopulationKind::IfCurrExp);
        let inh = Population::new("Inhibitory", n_inh, PopulationKind::IfCurrExp);
        let stim_kind = PopulationKind::SpikeSourcePoisson {
            rate: params.stim_rate,
        };
        let stim_exc = Population::new("Stim_Exc", n_exc, stim_kind);
        let stim_inh = Population::new("Stim_Inh", n_inh, stim_kind);

        let delays_exc = ClippedNormal::build(1.5, 0.75, 1.0, 1.6)?;
        let weights_exc = ClippedNormal::build(params.weight_exc, 0.1, 0.0, f64::INFINITY)?;
        let delays_inh = ClippedNormal::build(0.75, 0.375, 1.0, 1.6)?;
        let weights_inh =
            ClippedNormal::build(params.weight_inh(), 0.1, f64::NEG_INFINITY, 0.0)?;
        let delays_input = ClippedNormal::build(1.5, 0.75, 1.0, 1.6)?;
        let weights_input =
            ClippedNormal::build(params.weight_input, 0.01, 0.0, f64::INFINITY)?;

        let p = params.p_connect;
        let mut projections = Vec::with_capacity(7);
        for (label, source, target) in [("exc_exc", &exc, &exc), ("exc_inh", &exc, &inh)] {
            let connections = fixed_probability(
                source.size,
                target.size,
                p,
                &weights_exc,
                &delays_exc,
                &mut rng,
            )?;
            projections.push(Projection::build(
                label,
                source,
                target,
                Receptor::Excitatory,
                connections,
            )?);
        }
        for (label, source, target) in [("inh_inh", &inh, &inh), ("inh_exc", &inh, &exc)] {
            let connections = fixed_probability(
                source.size,
                target.size,
                p,
                &weights_inh,
                &delays_inh,
                &mut rng,
            )?;
            projections.push(Projection::build(
                label,
                source,
                target,
                Receptor::Inhibitory,
                connections,
            )?);
        }
        for (label, source, target) in [
            ("stim_exc_exc", &stim_exc, &exc),
            ("stim_inh_inh", &stim_inh, &inh),
        ] {
            projections.push(Projection::build(
                label,
                source,
                target,
                Receptor::Excitatory,
                one_to_one(target.size, params.weight_exc, params.stim_delay),
            )?);
        }
        let connections = all_to_all(
            input.size,
            exc.size,
            &weights_input,
            &delays_input,
            &mut rng,
        )?;
        projections.push(Projection::build(
            "input_exc",
            &input,
            &exc,
            Receptor::Excitatory,
            connections,
        )?);

        let network = BalancedRandomNetwork {
            populations: vec![input, exc, inh, stim_exc, stim_inh],
            projections,
            input_schedule: params.input_schedule.clone(),
        };
        log::info!(
            "Balanced random network sampled: {} connections",
            network.num_connections()
        );
        Ok(network)
    }

    /// The population with the given label.
    pub fn population(&self, label: &str) -> Option<&Population> {
        self.populations.iter().find(|population| population.label == label)
    }

    /// The projection with the given label.
    pub fn projection(&self, label: &str) -> Option<&Projection> {
        self.projections.iter().find(|projection| projection.label == label)
    }

    /// The number of connections over all projections.
    pub fn num_connections(&self) -> usize {
        self.projections.iter().map(Projection::num_connections).sum()
    }

    /// The total duration of the input schedule (in ms).
    pub fn duration(&self) -> f64 {
        self.input_schedule.iter().map(|phase| phase.duration).sum()
    }

    /// Save the network to a file.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), SNNError> {
        let file = File::create(path).map_err(|e| SNNError::IOError(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self).map_err(|e| SNNError::IOError(e.to_string()))?;
        writer.flush().map_err(|e| SNNError::IOError(e.to_string()))
    }

    /// Load a network from a file.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, SNNError> {
        let file = File::open(path).map_err(|e| SNNError::IOError(e.to_string()))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| SNNError::IOError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::tempdir;

    fn small_params(seed: u64) -> BalancedRandomParams {
        BalancedRandomParams {
            n_neurons: 100,
            n_input: 20,
            seed,
            ..Default::default()
        }
    }

    #[test]
    fn test_params_default() {
        let params = BalancedRandomParams::default();
        assert_eq!(params.split(), (400, 100));
        assert_eq!(params.weight_inh(), -0.5);
        assert_eq!(params.input_schedule.len(), 4);
        assert_eq!(params.input_schedule[1].rate, 50.0);
        assert_eq!(params.seed, 0);
    }

    #[test]
    fn test_params_split_covers_every_neuron() {
        for (n_neurons, exc_fraction) in [(5, 0.5), (7, 0.3), (1, 0.5), (0, 0.8), (9, 1.0)] {
            let params = BalancedRandomParams {
                n_neurons,
                exc_fraction,
                ..Default::default()
            };
            let (n_exc, n_inh) = params.split();
            assert_eq!(n_exc + n_inh, n_neurons);
        }
        let params = BalancedRandomParams {
            n_neurons: 5,
            exc_fraction: 0.5,
            ..Default::default()
        };
        assert_eq!(params.split(), (3, 2));
    }

    #[test]
    fn test_params_load_partial() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("params.json");
        std::fs::write(&path, r#"{"n_neurons": 10, "seed": 3}"#).unwrap();
        let params = BalancedRandomParams::load_from(&path).unwrap();
        assert_eq!(params.n_neurons, 10);
        assert_eq!(params.seed, 3);
        assert_eq!(params.p_connect, 0.1);
        assert_eq!(params.input_schedule.len(), 4);
    }

    #[test]
    fn test_params_invalid() {
        let params = BalancedRandomParams {
            p_connect: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            BalancedRandomNetwork::sample(&params),
            Err(SNNError::InvalidParameter(_))
        ));

        for params in [
            BalancedRandomParams {
                stim_delay: -3.0,
                ..Default::default()
            },
            BalancedRandomParams {
                stim_delay: f64::NAN,
                ..Default::default()
            },
            BalancedRandomParams {
                weight_exc: f64::INFINITY,
                ..Default::default()
            },
        ] {
            assert!(matches!(
                BalancedRandomNetwork::sample(&params),
                Err(SNNError::InvalidParameter(_))
            ));
        }

        let params = BalancedRandomParams {
            input_schedule: vec![InputPhase {
                duration: 0.0,
                rate: 10.0,
            }],
            ..Default::default()
        };
        assert!(matches!(
            BalancedRandomNetwork::sample(&params),
            Err(SNNError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_fixed_probability_extremes() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let dist = ClippedNormal::build(1.0, 0.0, 0.0, 2.0).unwrap();
        assert!(fixed_probability(10, 10, 0.0, &dist, &dist, &mut rng)
            .unwrap()
            .is_empty());
        let connections = fixed_probability(10, 10, 1.0, &dist, &dist, &mut rng).unwrap();
        assert_eq!(connections.len(), 100);
        let pairs: HashSet<(usize, usize)> = connections
            .iter()
            .map(|c| (c.source_id, c.target_id))
            .collect();
        assert_eq!(pairs.len(), 100);
        assert!(fixed_probability(10, 10, -0.1, &dist, &dist, &mut rng).is_err());
    }

    #[test]
    fn test_all_to_all() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let dist = ClippedNormal::build(1.0, 0.0, 0.0, 2.0).unwrap();
        let connections = all_to_all(3, 4, &dist, &dist, &mut rng).unwrap();
        assert_eq!(connections.len(), 12);
        assert_eq!(connections[5], Connection::new(1, 1, 1.0, 1.0));
    }

    #[test]
    fn test_sample_structure() {
        let network = BalancedRandomNetwork::sample(&small_params(0)).unwrap();
        assert_eq!(network.populations.len(), 5);
        assert_eq!(network.projections.len(), 7);
        assert_eq!(network.duration(), 4000.0);

        let exc_exc = network.projection("exc_exc").unwrap();
        assert_eq!(exc_exc.receptor, Receptor::Excitatory);
        // About 10% of the 80 x 80 pairs
        assert!((400..900).contains(&exc_exc.num_connections()));
        assert!(exc_exc
            .connections
            .iter()
            .all(|c| c.weight >= 0.0 && (1.0..=1.6).contains(&c.delay)));

        let inh_exc = network.projection("inh_exc").unwrap();
        assert_eq!(inh_exc.receptor, Receptor::Inhibitory);
        assert!(inh_exc.connections.iter().all(|c| c.weight <= 0.0));

        let stim = network.projection("stim_inh_inh").unwrap();
        assert_eq!(stim.num_connections(), 20);
        assert!(stim
            .connections
            .iter()
            .all(|c| c.source_id == c.target_id && c.weight == 0.1 && c.delay == 1.0));

        assert_eq!(network.projection("input_exc").unwrap().num_connections(), 20 * 80);
        assert_eq!(
            network.population("Input").unwrap().kind,
            PopulationKind::SpikeSourcePoisson { rate: 0.0 }
        );
    }

    #[test]
    fn test_sample_seeded() {
        let first = BalancedRandomNetwork::sample(&small_params(7)).unwrap();
        assert_eq!(first, BalancedRandomNetwork::sample(&small_params(7)).unwrap());
        assert_ne!(first, BalancedRandomNetwork::sample(&small_params(8)).unwrap());
    }

    #[test]
    fn test_save_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("balanced.json");
        let network = BalancedRandomNetwork::sample(&small_params(1)).unwrap();
        network.save_to(&path).unwrap();
        assert_eq!(BalancedRandomNetwork::load_from(&path).unwrap(), network);
    }
}
