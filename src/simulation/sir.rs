//! Single strain SIR dynamics with a unit infectious period.
//!
//! Every step, each susceptible node is exposed once per contact with an infected neighbour
//! (weights count as multiple contacts). Infected nodes are removed after one step and never
//! return.

use rand::prelude::*;

use super::outcome::{SirOutcome, Termination};
use crate::config::SirParameters;
use crate::core::{ContactGraph, SirState, attempt_infection};
use crate::errors::{Result, SimulationError};

pub struct SirSimulation<'a, R: Rng> {
    graph: &'a ContactGraph,
    transmissibility: f64,
    rng: R,
    states: Vec<SirState>,
    exposures: Vec<u32>,
}

impl<'a, R: Rng> SirSimulation<'a, R> {
    pub fn new(graph: &'a ContactGraph, parameters: &SirParameters, rng: R) -> Result<Self> {
        parameters.validate()?;
        Ok(Self {
            graph,
            transmissibility: parameters.transmissibility,
            rng,
            states: vec![SirState::Susceptible; graph.n_nodes()],
            exposures: vec![0; graph.n_nodes()],
        })
    }

    pub fn states(&self) -> &[SirState] {
        &self.states
    }

    /// Count weighted contacts of every node with infected neighbours.
    fn expose(&mut self) {
        self.exposures.fill(0);
        for node in 0..self.graph.n_nodes() {
            if self.states[node] == SirState::Infected {
                for (neighbor, weight) in self.graph.neighbors(node) {
                    self.exposures[neighbor] = self.exposures[neighbor].saturating_add(weight);
                }
            }
        }
    }

    fn infect(&mut self) {
        for node in 0..self.graph.n_nodes() {
            if self.states[node] == SirState::Susceptible
                && attempt_infection(&mut self.rng, self.exposures[node], self.transmissibility)
            {
                self.states[node] = SirState::Pending;
            }
        }
    }

    /// Remove infected nodes and activate pending ones. Returns the number of new infections.
    fn commit(&mut self) -> usize {
        let mut infected = 0;
        for state in self.states.iter_mut() {
            match *state {
                SirState::Infected => *state = SirState::Removed,
                SirState::Pending => {
                    *state = SirState::Infected;
                    infected += 1;
                }
                SirState::Susceptible | SirState::Removed => {}
            }
        }
        infected
    }

    /// Advance the epidemic by one step. Returns the number of new infections.
    pub fn step(&mut self) -> usize {
        self.expose();
        self.infect();
        self.commit()
    }

    /// Simulate an epidemic started by `seed_node` until extinction or `max_steps`.
    pub fn run(&mut self, seed_node: usize, max_steps: usize) -> Result<SirOutcome> {
        if seed_node >= self.graph.n_nodes() {
            return Err(SimulationError::ConfigurationError(format!(
                "Seed node {seed_node} is outside of the population of {}",
                self.graph.n_nodes()
            )));
        }

        self.states.fill(SirState::Susceptible);
        self.states[seed_node] = SirState::Infected;

        let mut profile = vec![1];
        let mut total_infected = 1;
        let mut infected = 1;
        let mut steps = 0;

        while infected > 0 && steps < max_steps {
            infected = self.step();
            steps += 1;
            total_infected += infected;
            profile.push(infected);
            log::debug!("step={steps} infected={infected}");
        }

        let termination = if infected == 0 {
            Termination::Extinct
        } else {
            Termination::StepLimit
        };
        log::info!(
            "SIR run finished after {steps} steps ({termination}) with {total_infected} infections"
        );

        Ok(SirOutcome {
            steps,
            termination,
            profile,
            total_infected,
        })
    }
}
