//! Settings module.

use serde::{Deserialize, Serialize};
use std::fs;

use super::parameters::{MultiStrainParameters, SirParameters};
use crate::errors::{Result, SimulationError};

/// Epidemic model simulated in every run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Model {
    Sir(SirParameters),
    MultiStrain(MultiStrainParameters),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    /// Node infected at the start of every run.
    pub seed_node: usize,

    /// Upper bound on the number of simulated steps.
    pub max_steps: usize,

    pub model: Model,
}

#[derive(Debug)]
pub enum SettingsError {
    IoError(std::io::Error),
    YamlError(serde_yaml::Error),
}

impl std::error::Error for SettingsError {}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::IoError(error) => write!(formatter, "IO error: {}", error),
            SettingsError::YamlError(error) => write!(formatter, "YAML error: {}", error),
        }
    }
}

impl std::fmt::Display for Settings {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let output = serde_yaml::to_string(self).map_err(|_| std::fmt::Error)?;
        write!(formatter, "{}", output)
    }
}

impl Settings {
    pub fn write(&self, writer: &mut dyn std::io::Write) -> std::result::Result<(), SettingsError> {
        serde_yaml::to_writer(writer, self).map_err(SettingsError::YamlError)
    }

    pub fn read(reader: &mut dyn std::io::Read) -> std::result::Result<Settings, SettingsError> {
        serde_yaml::from_reader(reader).map_err(SettingsError::YamlError)
    }

    pub fn write_to_file(&self, filename: &str) -> std::result::Result<(), SettingsError> {
        let file = fs::File::create(filename).map_err(SettingsError::IoError)?;
        let mut writer = std::io::BufWriter::new(file);
        self.write(&mut writer)
    }

    pub fn read_from_file(filename: &str) -> std::result::Result<Settings, SettingsError> {
        let file = fs::File::open(filename).map_err(SettingsError::IoError)?;
        let mut reader = std::io::BufReader::new(file);
        Self::read(&mut reader)
    }

    /// Check the settings against a population of `n_nodes`.
    pub fn validate(&self, n_nodes: usize) -> Result<()> {
        if self.seed_node >= n_nodes {
            return Err(SimulationError::ConfigurationError(format!(
                "Seed node {} is outside of the population of {n_nodes}",
                self.seed_node
            )));
        }
        match &self.model {
            Model::Sir(parameters) => parameters.validate(),
            Model::MultiStrain(parameters) => parameters.validate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ImmunityMode;
    use serial_test::serial;

    fn multi_strain_settings() -> Settings {
        Settings {
            seed_node: 3,
            max_steps: 500,
            model: Model::MultiStrain(MultiStrainParameters {
                transmissibility: 0.3,
                coupled: false,
                mutation_probability: 0.02,
                max_variants: 200,
                immunity_mode: ImmunityMode::Waning,
                immunity_strength: 4,
                genome_length: 32,
                initial_ones: 8,
                min_edits: 1,
                max_edits: 4,
                transmissibility_drift: 0.05,
            }),
        }
    }

    #[test]
    fn read_write() {
        let settings = multi_strain_settings();
        let mut output = vec![];
        settings.write(&mut output).unwrap();
        let settings2 = Settings::read(&mut &output[..]).unwrap();
        assert_eq!(settings, settings2);
    }

    #[test]
    fn read_write_sir() {
        let settings = Settings {
            seed_node: 0,
            max_steps: 10,
            model: Model::Sir(SirParameters {
                transmissibility: 0.25,
            }),
        };
        let mut output = vec![];
        settings.write(&mut output).unwrap();
        let settings2 = Settings::read(&mut &output[..]).unwrap();
        assert_eq!(settings, settings2);
    }

    #[test]
    #[serial]
    fn read_write_file() {
        let tmp_dir = std::env::temp_dir().join("strainspread_test_settings.yaml");
        let path = tmp_dir.to_str().unwrap();
        let settings = multi_strain_settings();
        settings.write_to_file(path).unwrap();
        let read_settings = Settings::read_from_file(path).unwrap();
        assert_eq!(read_settings, settings);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn validate_seed_node() {
        let settings = multi_strain_settings();
        assert!(settings.validate(10).is_ok());
        assert!(matches!(
            settings.validate(3),
            Err(SimulationError::ConfigurationError(_))
        ));
    }
}
