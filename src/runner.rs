use anyhow::Result;

use indicatif::{ProgressBar, ProgressStyle};
use rand::prelude::*;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::Path;

use crate::args::Args;
use crate::config::{Model, Settings};
use crate::core::{ContactGraph, WeightOrder};
use crate::errors;
use crate::readwrite::{GraphIO, OutcomeWriter, write_report};
use crate::simulation::{MultiStrainSimulation, RunOutcome, SirSimulation};
use crate::stats::IncidenceSummary;

pub struct Runner {
    args: Args,
    settings: Settings,
    graph: ContactGraph,
    seeds: Vec<u64>,
}

impl Runner {
    pub fn new(args: Args) -> Result<Runner> {
        Self::setup_logger(&args);
        #[cfg(feature = "parallel")]
        Self::setup_rayon(&args);

        let settings = Self::load_settings(&args.settings)?;
        let graph = Self::load_graph(&args)?;
        settings.validate(graph.n_nodes())?;

        if args.report {
            Self::write_graph_report(&graph, Path::new(args.outdir.as_str()))?;
        }

        let seeds = derive_seeds(args.seed, args.replicates);

        Ok(Self {
            args,
            settings,
            graph,
            seeds,
        })
    }

    pub fn start(&mut self) -> Result<()> {
        let outcomes = self.run()?;
        self.finish(&outcomes)
    }

    fn finish(&self, outcomes: &[RunOutcome]) -> Result<()> {
        log::info!("Storing results...");
        let mut writer = OutcomeWriter::create(Path::new(self.args.outdir.as_str()))?;
        for (replicate, outcome) in outcomes.iter().enumerate() {
            writer.write(replicate, outcome, self.graph.n_nodes())?;
        }
        writer.flush()?;
        log::info!("Finished storing results.");
        Ok(())
    }

    /// Setup logging level and file
    fn setup_logger(args: &Args) {
        let log_level = match args.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };
        simple_logging::log_to_file(args.log_file.as_str(), log_level).unwrap_or_else(|_| {
            eprintln!("Unable to open log file.");
            std::process::exit(1);
        });
    }

    /// Setup rayon thread pool
    #[cfg(feature = "parallel")]
    fn setup_rayon(args: &Args) {
        if let Some(n_threads) = args.threads {
            println!("Setting number of threads to {}.", n_threads);
            rayon::ThreadPoolBuilder::new()
                .num_threads(n_threads)
                .build_global()
                .unwrap_or_else(|_| {
                    eprintln!("Unable to set number of threads.");
                    std::process::exit(1);
                });
        }
    }

    /// Load settings from file
    fn load_settings(path: &str) -> Result<Settings> {
        let settings: Settings = Settings::read_from_file(path)?;
        log::info!("Loaded settings\n{}", settings);
        Ok(settings)
    }

    /// Load the contact graph from either an adjacency list or a weight list
    fn load_graph(args: &Args) -> Result<ContactGraph> {
        let graph = match (&args.graph, &args.weights) {
            (Some(path), _) => ContactGraph::read_adjacency_list(path)?,
            (None, Some(path)) => {
                let n_nodes = args
                    .nodes
                    .ok_or_else(|| anyhow::anyhow!("A weight list requires --nodes"))?;
                let order = if args.row_major {
                    WeightOrder::RowMajor
                } else {
                    WeightOrder::Diagonal
                };
                ContactGraph::read_weight_list(path, n_nodes, order)?
            }
            (None, None) => anyhow::bail!("Either --graph or --weights has to be given"),
        };
        Ok(graph)
    }

    fn write_graph_report(graph: &ContactGraph, outdir: &Path) -> Result<()> {
        fs::create_dir_all(outdir)?;
        let mut report_file = io::BufWriter::new(fs::File::create(outdir.join("graph_report.txt"))?);
        write_report(graph, &mut report_file)?;
        log::info!("Wrote graph report to {}", outdir.join("graph_report.txt").display());
        Ok(())
    }

    fn create_progress_bar(&self) -> Option<ProgressBar> {
        match self.args.disable_progress_bar {
            true => None,
            false => {
                let bar = ProgressBar::new(self.seeds.len() as u64);
                bar.set_style(
                    ProgressStyle::default_bar()
                        .template(
                            "[{bar:40}] {pos:>7}/{len:7} [{elapsed_precise} / {duration_precise}] {msg}",
                        )
                        .expect("Unable to create template.")
                        .progress_chars("=> "),
                );
                Some(bar)
            }
        }
    }

    fn run_replicate(&self, replicate: usize, seed: u64) -> errors::Result<RunOutcome> {
        log::debug!("Starting replicate {replicate} with seed {seed}");
        let rng = StdRng::seed_from_u64(seed);
        let outcome = match &self.settings.model {
            Model::Sir(parameters) => {
                let mut simulation = SirSimulation::new(&self.graph, parameters, rng)?;
                RunOutcome::Sir(simulation.run(self.settings.seed_node, self.settings.max_steps)?)
            }
            Model::MultiStrain(parameters) => {
                let simulation = MultiStrainSimulation::new(&self.graph, parameters.clone(), rng)?;
                RunOutcome::MultiStrain(
                    simulation.run(self.settings.seed_node, self.settings.max_steps)?,
                )
            }
        };
        let (peak_step, peak_infected) = outcome.peak();
        log::info!(
            r###"
        replicate={replicate}
        steps={}
        termination={}
        total_infected={}
        peak={peak_infected}@{peak_step}"###,
            outcome.steps(),
            outcome.termination(),
            outcome.total_infected()
        );
        Ok(outcome)
    }

    #[cfg(feature = "parallel")]
    fn run(&mut self) -> Result<Vec<RunOutcome>> {
        let bar = self.create_progress_bar();
        log::info!("Running {} replicates in parallel...", self.seeds.len());

        let outcomes: errors::Result<Vec<RunOutcome>> = self
            .seeds
            .par_iter()
            .enumerate()
            .map(|(replicate, &seed)| {
                let outcome = self.run_replicate(replicate, seed);
                if let Some(bar) = bar.as_ref() {
                    bar.inc(1);
                }
                outcome
            })
            .collect();

        if let Some(bar) = bar {
            bar.finish_with_message("Done.");
        }
        log::info!("Finished simulation.");
        Ok(outcomes?)
    }

    #[cfg(not(feature = "parallel"))]
    fn run(&mut self) -> Result<Vec<RunOutcome>> {
        let bar = self.create_progress_bar();
        log::info!("Running {} replicates...", self.seeds.len());

        let mut outcomes = Vec::with_capacity(self.seeds.len());
        for (replicate, &seed) in self.seeds.iter().enumerate() {
            let outcome = self.run_replicate(replicate, seed)?;
            if let Some(bar) = bar.as_ref() {
                bar.inc(1);
                bar.set_message(format!("total_infected={}", outcome.total_infected()));
            }
            outcomes.push(outcome);
        }

        if let Some(bar) = bar {
            bar.finish_with_message("Done.");
        }
        log::info!("Finished simulation.");
        Ok(outcomes)
    }
}

/// Draw one seed per replicate from a generator seeded with `master_seed`.
fn derive_seeds(master_seed: u64, replicates: usize) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(master_seed);
    (0..replicates).map(|_| rng.random()).collect()
}
