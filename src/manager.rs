use crate::analysis::{Analysis, analyze};
use crate::cleaner::{MissingSummary, clean, missing_summary};
use crate::config::Config;
use crate::data::sample_catalog;
use crate::model::Dataset;
use anyhow::{Context, Result};
use rmp_serde::encode;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Everything written to the results file.
#[derive(Debug, Serialize, Deserialize)]
pub struct Results {
    pub before: MissingSummary,
    pub after: MissingSummary,
    pub analysis: Analysis,
}

pub struct Manager {
    out_dir: PathBuf,
    cfg: Config,
}

impl Manager {
    pub fn new<P: AsRef<Path>>(out_dir: P) -> Result<Self> {
        let out_dir = out_dir.as_ref().to_path_buf();

        let config_file = out_dir.join("config.toml");
        let cfg = if config_file.is_file() {
            Config::from_file(&config_file).context("failed to construct cfg")?
        } else {
            log::info!("{config_file:?} not found, using default config");
            Config::default()
        };
        log::info!("{cfg:#?}");

        Ok(Self { out_dir, cfg })
    }

    pub fn summarize(&self) -> Result<()> {
        self.load_and_clean()?;
        Ok(())
    }

    pub fn run_analysis(&self) -> Result<()> {
        let (before, cleaned, after) = self.load_and_clean()?;

        let analysis = analyze(&cleaned, &self.cfg);
        log::info!(
            "derived {} monthly counts, {} magnitudes in {} bins, {} scatter points",
            analysis.monthly_counts.len(),
            analysis.magnitude.histogram.total(),
            analysis.magnitude.histogram.counts.len(),
            analysis.depth_magnitude.points.len()
        );
        for entry in &analysis.monthly_counts {
            log::debug!("{}: {} records", entry.month, entry.count);
        }

        let results = Results {
            before,
            after,
            analysis,
        };

        fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("failed to create {:?}", self.out_dir))?;
        self.save_results(&results).context("failed to save results")?;

        Ok(())
    }

    pub fn purge(&self) -> Result<()> {
        let results_file = self.results_file();
        if results_file.is_file() {
            fs::remove_file(&results_file)
                .with_context(|| format!("failed to remove {results_file:?}"))?;
            log::info!("removed {results_file:?}");
        }
        Ok(())
    }

    /// Load the catalog, clean it and print its missing-value summaries.
    ///
    /// The summary before cleaning is printed even if cleaning fails.
    fn load_and_clean(&self) -> Result<(MissingSummary, Dataset, MissingSummary)> {
        let dataset = sample_catalog().context("failed to load catalog")?;
        log::info!("loaded {} records", dataset.len());

        let before = missing_summary(&dataset);
        print_summary("Before cleaning", &before);

        let cleaned = clean(&dataset).context("failed to clean catalog")?;

        let after = missing_summary(&cleaned);
        print_summary("After cleaning", &after);
        log::info!("filled {} missing values", before.total() - after.total());

        Ok((before, cleaned, after))
    }

    /// Write the results next to their final path, then move them into place.
    fn save_results(&self, results: &Results) -> Result<()> {
        let results_file = self.results_file();
        let tmp_file = results_file.with_extension("msgpack.tmp");

        let file =
            File::create(&tmp_file).with_context(|| format!("failed to create {tmp_file:?}"))?;
        let mut writer = BufWriter::new(file);
        encode::write_named(&mut writer, results).context("failed to serialize results")?;
        writer.flush().context("failed to flush writer stream")?;
        drop(writer);

        fs::rename(&tmp_file, &results_file)
            .with_context(|| format!("failed to rename {tmp_file:?} to {results_file:?}"))?;
        log::info!("saved {results_file:?}");
        Ok(())
    }

    fn results_file(&self) -> PathBuf {
        self.out_dir.join("results.msgpack")
    }
}

fn print_summary(title: &str, summary: &MissingSummary) {
    println!("{title}:\n{summary}");
}
