use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, fs, ops::RangeBounds, path::Path};

/// Analysis configuration parameters.
///
/// Loaded from an optional TOML file and validated before use.
/// See [`Config::from_file`] for loading.
#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Magnitude histogram parameters.
    pub histogram: HistogramConfig,
    /// Magnitude density curve parameters.
    pub density: DensityConfig,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistogramConfig {
    /// Number of equal-width magnitude bins.
    pub bins: usize,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self { bins: 6 }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DensityConfig {
    /// Whether to estimate the magnitude density curve.
    pub enabled: bool,
    /// Number of points the curve is evaluated on.
    pub grid_size: usize,
}

impl Default for DensityConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            grid_size: 200,
        }
    }
}

impl Config {
    /// Load a [`Config`] from a TOML file.
    ///
    /// Missing sections and fields take their default values.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;

        Self::parse(&contents)
    }

    /// Parse and validate a [`Config`] from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        check_num(self.histogram.bins, 1..=1_000).context("invalid number of histogram bins")?;
        check_num(self.density.grid_size, 2..=10_000).context("invalid density grid size")?;

        Ok(())
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}
