//! CSV output of run results.
//!
//! Every replicate contributes one summary row, one row per step of its incidence and, for the
//! multi strain model, one row per variant.

use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::core::VariantId;
use crate::simulation::{MultiStrainOutcome, RunOutcome, Termination};
use crate::stats::{IncidenceSummary, LineageStatistics, format_profile};

#[derive(Debug, Serialize)]
pub struct SummaryRecord {
    pub replicate: usize,
    pub model: &'static str,
    pub steps: usize,
    pub termination: Termination,
    pub total_infected: usize,
    pub peak_step: usize,
    pub peak_infected: usize,
    pub attack_rate: f64,
    pub variants: usize,
    pub successful_variants: usize,
    pub residual_exposures: usize,
    pub window_violations: usize,
}

impl SummaryRecord {
    pub fn new(replicate: usize, outcome: &RunOutcome, n_nodes: usize) -> Self {
        let (peak_step, peak_infected) = outcome.peak();
        let (variants, successful_variants, residual_exposures, window_violations) = match outcome
        {
            RunOutcome::Sir(_) => (1, 1, 0, 0),
            RunOutcome::MultiStrain(outcome) => (
                outcome.variants.len(),
                outcome.successful_variants(),
                outcome.residual_exposures,
                outcome.violations.len(),
            ),
        };
        Self {
            replicate,
            model: outcome.model(),
            steps: outcome.steps(),
            termination: outcome.termination(),
            total_infected: outcome.total_infected(),
            peak_step,
            peak_infected,
            attack_rate: outcome.attack_rate(n_nodes),
            variants,
            successful_variants,
            residual_exposures,
            window_violations,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VariantRecord {
    pub replicate: usize,
    pub variant: VariantId,
    pub parent: Option<VariantId>,
    pub origin: usize,
    pub depth: usize,
    pub distance: usize,
    pub transmissibility: f64,
    pub genome: String,
    pub profile: String,
}

impl VariantRecord {
    pub fn from_outcome(replicate: usize, outcome: &MultiStrainOutcome) -> Vec<Self> {
        let depths = outcome.lineage_depths();
        let distances = outcome.root_distances();
        outcome
            .variants
            .iter()
            .enumerate()
            .map(|(id, variant)| Self {
                replicate,
                variant: id,
                parent: variant.parent,
                origin: variant.origin,
                depth: depths[id],
                distance: distances[id],
                transmissibility: variant.transmissibility,
                genome: variant.genome.to_string(),
                profile: format_profile(&variant.profile),
            })
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct IncidenceRecord {
    pub replicate: usize,
    pub step: usize,
    pub infected: usize,
}

#[derive(Debug, Serialize)]
pub struct SeverityRecord {
    pub replicate: usize,
    pub uncovered: usize,
    pub infections: usize,
}

/// Writes the results of all replicates into separate CSV tables.
pub struct OutcomeWriter<W: Write> {
    summary: csv::Writer<W>,
    variants: csv::Writer<W>,
    incidence: csv::Writer<W>,
    severity: csv::Writer<W>,
}

impl OutcomeWriter<fs::File> {
    /// Create `summary.csv`, `variants.csv`, `incidence.csv` and `severity.csv` in `outdir`.
    pub fn create(outdir: &Path) -> io::Result<Self> {
        fs::create_dir_all(outdir)?;
        log::info!("Writing results to {}", outdir.display());
        Ok(Self::new(
            fs::File::create(outdir.join("summary.csv"))?,
            fs::File::create(outdir.join("variants.csv"))?,
            fs::File::create(outdir.join("incidence.csv"))?,
            fs::File::create(outdir.join("severity.csv"))?,
        ))
    }
}

impl<W: Write> OutcomeWriter<W> {
    pub fn new(summary: W, variants: W, incidence: W, severity: W) -> Self {
        Self {
            summary: csv::Writer::from_writer(summary),
            variants: csv::Writer::from_writer(variants),
            incidence: csv::Writer::from_writer(incidence),
            severity: csv::Writer::from_writer(severity),
        }
    }

    pub fn write(&mut self, replicate: usize, outcome: &RunOutcome, n_nodes: usize) -> io::Result<()> {
        self.summary
            .serialize(SummaryRecord::new(replicate, outcome, n_nodes))?;

        for (step, &infected) in outcome.incidence().iter().enumerate() {
            self.incidence.serialize(IncidenceRecord {
                replicate,
                step,
                infected,
            })?;
        }

        if let RunOutcome::MultiStrain(outcome) = outcome {
            for record in VariantRecord::from_outcome(replicate, outcome) {
                self.variants.serialize(record)?;
            }
            for (uncovered, &infections) in outcome.severity.iter().enumerate() {
                self.severity.serialize(SeverityRecord {
                    replicate,
                    uncovered,
                    infections,
                })?;
            }
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.summary.flush()?;
        self.variants.flush()?;
        self.incidence.flush()?;
        self.severity.flush()?;
        Ok(())
    }

    /// Flush all tables and hand back the underlying writers.
    pub fn into_inner(self) -> io::Result<(W, W, W, W)> {
        Ok((
            self.summary.into_inner().map_err(|err| err.into_error())?,
            self.variants.into_inner().map_err(|err| err.into_error())?,
            self.incidence.into_inner().map_err(|err| err.into_error())?,
            self.severity.into_inner().map_err(|err| err.into_error())?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Genome, Variant};
    use crate::simulation::SirOutcome;

    fn buffers(
        writer: OutcomeWriter<Vec<u8>>,
    ) -> (String, String, String, String) {
        let (summary, variants, incidence, severity) = writer.into_inner().unwrap();
        (
            String::from_utf8(summary).unwrap(),
            String::from_utf8(variants).unwrap(),
            String::from_utf8(incidence).unwrap(),
            String::from_utf8(severity).unwrap(),
        )
    }

    #[test]
    fn write_sir_outcome() {
        let outcome = RunOutcome::Sir(SirOutcome {
            steps: 3,
            termination: Termination::Extinct,
            profile: vec![1, 2, 1, 0],
            total_infected: 4,
        });
        let mut writer = OutcomeWriter::new(Vec::new(), Vec::new(), Vec::new(), Vec::new());
        writer.write(0, &outcome, 4).unwrap();
        let (summary, variants, incidence, severity) = buffers(writer);

        assert_eq!(
            summary,
            "replicate,model,steps,termination,total_infected,peak_step,peak_infected,attack_rate,variants,successful_variants,residual_exposures,window_violations\n\
             0,sir,3,extinct,4,1,2,1.0,1,1,0,0\n"
        );
        assert_eq!(
            incidence,
            "replicate,step,infected\n0,0,1\n0,1,2\n0,2,1\n0,3,0\n"
        );
        assert!(variants.is_empty());
        assert!(severity.is_empty());
    }

    #[test]
    fn write_multi_strain_outcome() {
        let outcome = RunOutcome::MultiStrain(MultiStrainOutcome {
            steps: 1,
            termination: Termination::StepLimit,
            variants: vec![
                Variant {
                    genome: Genome::from_ones(3, &[0]),
                    transmissibility: 0.5,
                    parent: None,
                    origin: 0,
                    profile: vec![1, 1],
                },
                Variant {
                    genome: Genome::from_ones(3, &[0, 2]),
                    transmissibility: 0.25,
                    parent: Some(0),
                    origin: 1,
                    profile: vec![1],
                },
            ],
            incidence: vec![1, 2],
            total_infected: 3,
            severity: vec![0, 2, 1, 0],
            residual_exposures: 0,
            violations: vec![],
        });
        let mut writer = OutcomeWriter::new(Vec::new(), Vec::new(), Vec::new(), Vec::new());
        writer.write(2, &outcome, 5).unwrap();
        let (summary, variants, _, severity) = buffers(writer);

        assert_eq!(
            summary.lines().nth(1).unwrap(),
            "2,multi_strain,1,step_limit,3,1,2,0.6,2,2,0,0"
        );
        assert_eq!(
            variants,
            "replicate,variant,parent,origin,depth,distance,transmissibility,genome,profile\n\
             2,0,,0,0,0,0.5,100,1;1\n\
             2,1,0,1,1,1,0.25,101,1\n"
        );
        assert_eq!(
            severity,
            "replicate,uncovered,infections\n2,0,0\n2,1,2\n2,2,1\n2,3,0\n"
        );
    }
}
