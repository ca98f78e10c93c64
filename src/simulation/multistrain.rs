//! Multi strain SIR dynamics with mutating variants and partial immunity
//!
//! Each step runs through five stages:
//!
//! 1. Exposure: every infected node offers its variant to each susceptible neighbour. A node
//!    collects one candidate per infected neighbour, duplicates included.
//! 2. Competition: candidates are tried in order of their effective transmission probability,
//!    the first success infects the node.
//! 3. Mutation: a successful transmission may spawn a child of the infecting variant, which then
//!    replaces it in the newly infected node.
//! 4. Commit: pending infections become live and previous infections end after a single step.
//! 5. Waning: susceptible nodes lose one unit of immunity at every locus.

use rand::prelude::*;
use rand_distr::Bernoulli;

use super::outcome::{MultiStrainOutcome, Termination, WindowViolation};
use crate::config::MultiStrainParameters;
use crate::core::{
    ContactGraph, Genome, Immunity, Mutator, NodeState, VariantId, VariantRegistry,
    attempt_infection,
};
use crate::errors::{Result, SimulationError};

/// Result of the competition of candidate variants for a single node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Infected { variant: VariantId, uncovered: usize },
    /// A fully immune node was reached at the nominal transmissibility. It stays susceptible.
    Residual,
    Escaped,
}

/// Let the candidate variants compete for a node with the given immunity.
///
/// Variants with uncovered loci are tried in order of decreasing effective probability, ties in
/// order of encounter. In coupled runs the effective probability is the transmissibility scaled
/// by the fraction of uncovered loci, otherwise it is the transmissibility itself. Variants the
/// node is fully immune to never infect. In uncoupled runs they are still tried in order of
/// encounter at their nominal transmissibility once all others failed, and a success is reported
/// as `Resolution::Residual`.
pub fn resolve_candidates<R: Rng + ?Sized>(
    rng: &mut R,
    immunity: &Immunity,
    candidates: &[VariantId],
    registry: &VariantRegistry,
    coupled: bool,
) -> Resolution {
    let mut contenders: Vec<(f64, VariantId, usize)> = Vec::with_capacity(candidates.len());
    let mut residuals: Vec<f64> = Vec::new();

    for &variant in candidates {
        let genome = registry.genome(variant);
        let transmissibility = registry.transmissibility(variant);
        let uncovered = immunity.uncovered(genome);
        if uncovered == 0 {
            if !coupled {
                residuals.push(transmissibility);
            }
        } else if coupled {
            let fraction = uncovered as f64 / genome.ones() as f64;
            contenders.push((fraction * transmissibility, variant, uncovered));
        } else {
            contenders.push((transmissibility, variant, uncovered));
        }
    }

    // stable, keeps encounter order among equal probabilities
    contenders.sort_by(|a, b| b.0.total_cmp(&a.0));

    for (probability, variant, uncovered) in contenders {
        if attempt_infection(rng, 1, probability) {
            return Resolution::Infected { variant, uncovered };
        }
    }

    for probability in residuals {
        if attempt_infection(rng, 1, probability) {
            return Resolution::Residual;
        }
    }

    Resolution::Escaped
}

/// Trailing incidence of `variant` over `window` steps, reported if it exceeds the population.
///
/// A node cannot be infected twice by the same variant while its immunity lasts, so the sum is
/// bounded by `n_nodes` in a consistent run.
pub fn check_window(
    registry: &VariantRegistry,
    variant: VariantId,
    window: usize,
    n_nodes: usize,
    step: usize,
) -> Option<WindowViolation> {
    let window_sum = registry.window_sum(variant, window);
    (window_sum > n_nodes).then_some(WindowViolation {
        step,
        variant,
        window_sum,
    })
}

pub struct MultiStrainSimulation<'a, R: Rng> {
    graph: &'a ContactGraph,
    parameters: MultiStrainParameters,
    rng: R,
    mutator: Mutator,
    mutation_sampler: Bernoulli,
    registry: VariantRegistry,
    states: Vec<NodeState>,
    immunity: Vec<Immunity>,
    candidates: Vec<Vec<VariantId>>,
    step: usize,
    incidence: Vec<usize>,
    total_infected: usize,
    severity: Vec<usize>,
    residual_exposures: usize,
    violations: Vec<WindowViolation>,
}

impl<'a, R: Rng> MultiStrainSimulation<'a, R> {
    /// Construct a simulation with a root genome of `initial_ones` randomly placed mutations.
    pub fn new(
        graph: &'a ContactGraph,
        parameters: MultiStrainParameters,
        mut rng: R,
    ) -> Result<Self> {
        parameters.validate()?;
        let mut mutator = Self::make_mutator(&parameters);
        let root = Genome::random(&mut rng, mutator.index_pool(), parameters.initial_ones);
        Self::with_mutator(graph, parameters, rng, mutator, root)
    }

    /// Construct a simulation with a given root genome.
    pub fn with_root(
        graph: &'a ContactGraph,
        parameters: MultiStrainParameters,
        rng: R,
        root: Genome,
    ) -> Result<Self> {
        parameters.validate()?;
        if root.len() != parameters.genome_length {
            return Err(SimulationError::ConfigurationError(format!(
                "Root genome has {} loci instead of {}",
                root.len(),
                parameters.genome_length
            )));
        }
        let mutator = Self::make_mutator(&parameters);
        Self::with_mutator(graph, parameters, rng, mutator, root)
    }

    fn make_mutator(parameters: &MultiStrainParameters) -> Mutator {
        Mutator::new(
            parameters.genome_length,
            parameters.min_edits,
            parameters.max_edits,
            parameters.transmissibility_drift,
            parameters.coupled,
        )
    }

    fn with_mutator(
        graph: &'a ContactGraph,
        parameters: MultiStrainParameters,
        rng: R,
        mutator: Mutator,
        root: Genome,
    ) -> Result<Self> {
        let mutation_sampler = Bernoulli::new(parameters.mutation_probability)
            .map_err(|err| SimulationError::ConfigurationError(err.to_string()))?;
        let registry =
            VariantRegistry::new(root, parameters.transmissibility, parameters.max_variants)?;
        let n_nodes = graph.n_nodes();
        let genome_length = parameters.genome_length;

        Ok(Self {
            graph,
            rng,
            mutator,
            mutation_sampler,
            registry,
            states: vec![NodeState::Susceptible; n_nodes],
            immunity: vec![Immunity::new(genome_length); n_nodes],
            candidates: vec![Vec::new(); n_nodes],
            step: 0,
            incidence: Vec::new(),
            total_infected: 0,
            severity: vec![0; genome_length + 1],
            residual_exposures: 0,
            violations: Vec::new(),
            parameters,
        })
    }

    pub fn states(&self) -> &[NodeState] {
        &self.states
    }

    pub fn immunity(&self, node: usize) -> &Immunity {
        &self.immunity[node]
    }

    pub fn registry(&self) -> &VariantRegistry {
        &self.registry
    }

    pub fn current_step(&self) -> usize {
        self.step
    }

    /// Infect `seed_node` with the root variant at step zero.
    pub fn seed(&mut self, seed_node: usize) -> Result<()> {
        if seed_node >= self.graph.n_nodes() {
            return Err(SimulationError::ConfigurationError(format!(
                "Seed node {seed_node} is outside of the population of {}",
                self.graph.n_nodes()
            )));
        }

        let mode = self.parameters.immunity_mode;
        let strength = mode.seed_strength(self.parameters.immunity_strength);
        let root = self.registry.genome(0);

        self.states[seed_node] = NodeState::Infected(0);
        self.immunity[seed_node].apply(root, strength);
        self.severity[root.ones()] += 1;
        log::debug!(
            "Seeded node {seed_node} with root genome {} (transmissibility {})",
            root,
            self.registry.transmissibility(0)
        );

        self.registry.record_infection(0, 1);
        self.incidence.push(1);
        self.total_infected += 1;
        Ok(())
    }

    /// Collect a candidate variant per infected neighbour of every susceptible node.
    fn expose(&mut self) {
        self.candidates.iter_mut().for_each(|c| c.clear());
        for from in 0..self.graph.n_nodes() {
            if let Some(variant) = self.states[from].infecting_variant() {
                for (to, _) in self.graph.neighbors(from) {
                    if self.states[to].is_susceptible() {
                        self.candidates[to].push(variant);
                    }
                }
            }
        }
    }

    /// Resolve competing candidates and mutate successful transmissions.
    fn infect(&mut self) -> Result<()> {
        let mode = self.parameters.immunity_mode;
        let strength = mode.infection_strength(self.parameters.immunity_strength);

        for node in 0..self.graph.n_nodes() {
            if self.candidates[node].is_empty() {
                continue;
            }

            let resolution = resolve_candidates(
                &mut self.rng,
                &self.immunity[node],
                &self.candidates[node],
                &self.registry,
                self.parameters.coupled,
            );

            match resolution {
                Resolution::Infected { variant, uncovered } => {
                    self.severity[uncovered] += 1;
                    self.immunity[node].apply(self.registry.genome(variant), strength);

                    let mut infecting = variant;
                    if self.mutation_sampler.sample(&mut self.rng) {
                        let (genome, transmissibility) = self.mutator.mutate(
                            &mut self.rng,
                            self.registry.genome(variant),
                            self.registry.transmissibility(variant),
                        );
                        infecting =
                            self.registry
                                .spawn(variant, genome, transmissibility, self.step)?;
                        self.immunity[node].apply(self.registry.genome(infecting), strength);
                    }

                    log::trace!("Node {node} infected by variant {infecting}");
                    self.states[node] = NodeState::Pending(infecting);
                }
                Resolution::Residual => {
                    self.severity[0] += 1;
                    self.residual_exposures += 1;
                }
                Resolution::Escaped => {}
            }
        }
        Ok(())
    }

    /// End current infections, activate pending ones and record incidence per variant.
    fn commit(&mut self) -> Result<usize> {
        let n_nodes = self.graph.n_nodes();
        let mut counts = vec![0; self.registry.len()];
        let mut infected = 0;

        for state in self.states.iter_mut() {
            match *state {
                NodeState::Pending(variant) => {
                    *state = NodeState::Infected(variant);
                    counts[variant] += 1;
                    infected += 1;
                }
                NodeState::Infected(_) => *state = NodeState::Susceptible,
                NodeState::Susceptible => {}
            }
        }

        if infected > n_nodes {
            return Err(SimulationError::ConsistencyViolation(format!(
                "{infected} infections in a population of {n_nodes}"
            )));
        }

        let window = (self
            .parameters
            .immunity_mode
            .base_strength(self.parameters.immunity_strength) as usize)
            .saturating_add(1);
        for (variant, &count) in counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            self.registry.record_infection(variant, count);
            if let Some(violation) =
                check_window(&self.registry, variant, window, n_nodes, self.step)
            {
                log::warn!(
                    "Variant {variant} infected {} nodes within its trailing window at step {}",
                    violation.window_sum,
                    self.step
                );
                self.violations.push(violation);
            }
        }

        self.incidence.push(infected);
        self.total_infected += infected;
        Ok(infected)
    }

    fn wane(&mut self) {
        for (state, immunity) in self.states.iter().zip(self.immunity.iter_mut()) {
            if state.is_susceptible() {
                immunity.decay();
            }
        }
    }

    /// Advance the epidemic by one step. Returns the number of new infections.
    pub fn step(&mut self) -> Result<usize> {
        self.step += 1;
        self.expose();
        self.infect()?;
        let infected = self.commit()?;
        if self.parameters.immunity_mode.wanes() {
            self.wane();
        }
        log::debug!(
            "step={} infected={infected} variants={}",
            self.step,
            self.registry.len()
        );
        Ok(infected)
    }

    /// Simulate an epidemic started by `seed_node` until extinction or `max_steps`.
    pub fn run(mut self, seed_node: usize, max_steps: usize) -> Result<MultiStrainOutcome> {
        self.seed(seed_node)?;

        let mut infected = 1;
        while infected > 0 && self.step < max_steps {
            infected = self.step()?;
        }

        let termination = if infected == 0 {
            Termination::Extinct
        } else {
            Termination::StepLimit
        };
        log::info!(
            "Multi strain run finished after {} steps ({termination}) with {} infections and {} variants",
            self.step,
            self.total_infected,
            self.registry.len()
        );

        Ok(MultiStrainOutcome {
            steps: self.step,
            termination,
            variants: self.registry.into_variants(),
            incidence: self.incidence,
            total_infected: self.total_infected,
            severity: self.severity,
            residual_exposures: self.residual_exposures,
            violations: self.violations,
        })
    }
}
