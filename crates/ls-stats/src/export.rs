//! Legacy CSV exports, kept for older downstream tooling.
//!
//! Every export writes `<commodity>_<job_id>.csv` into an existing
//! directory, one file per commodity, and returns the paths written.

use std::path::{Path, PathBuf};

use csv::{Writer, WriterBuilder};
use log::{info, warn};

use crate::{MeanSd, StatsAccumulator, StatsError, StatsResult};

fn csv_path(dir: &Path, commodity: &str, job_id: i64) -> PathBuf {
    dir.join(format!("{commodity}_{job_id}.csv"))
}

fn check_dir(dir: &Path) -> StatsResult<()> {
    if !dir.is_dir() {
        return Err(StatsError::NotADirectory(dir.to_path_buf()));
    }
    Ok(())
}

impl StatsAccumulator {
    /// `link_id,mean,sd` over `n_runs` runs, one row per link whose sum is
    /// positive.  Moments mode only.
    ///
    /// An inconsistent link aborts the export with
    /// [`StatsError::NegativeVariance`]; files already written stay on disk.
    pub fn write_mean_sd_csv(&self, dir: &Path, n_runs: usize, job_id: i64) -> StatsResult<Vec<PathBuf>> {
        let vectors = self.moment_vectors()?;
        check_dir(dir)?;
        if n_runs == 0 {
            return Err(StatsError::NoRuns);
        }

        let mut written = Vec::with_capacity(vectors.len());
        for (commodity, moments) in vectors {
            let path = csv_path(dir, commodity, job_id);
            let mut out = Writer::from_path(&path)?;
            out.write_record(["link_id", "mean", "sd"])?;
            for (link, m) in moments.iter().enumerate() {
                if m.sum <= 0.0 {
                    continue;
                }
                match m.mean_sd(n_runs) {
                    MeanSd::Valid { mean, sd, clamped } => {
                        if clamped {
                            warn!("{commodity}: link {link} variance slightly negative, sd clamped to 0");
                        }
                        out.write_record(&[link.to_string(), mean.to_string(), sd.to_string()])?;
                    }
                    MeanSd::Inconsistent { mean, variance } => {
                        return Err(StatsError::NegativeVariance {
                            commodity: commodity.to_owned(),
                            link,
                            variance,
                            mean,
                            sum: m.sum,
                            sum_sq: m.sum_sq,
                        });
                    }
                }
            }
            out.flush()?;
            written.push(path);
        }
        info!("wrote mean/sd CSV for {} commodities (job {job_id})", written.len());
        Ok(written)
    }

    /// `link_id,x,x2` with the raw sums for every link.  Moments mode only.
    pub fn write_moments_csv(&self, dir: &Path, job_id: i64) -> StatsResult<Vec<PathBuf>> {
        let vectors = self.moment_vectors()?;
        check_dir(dir)?;

        let mut written = Vec::with_capacity(vectors.len());
        for (commodity, moments) in vectors {
            let path = csv_path(dir, commodity, job_id);
            let mut out = Writer::from_path(&path)?;
            out.write_record(["link_id", "x", "x2"])?;
            for (link, m) in moments.iter().enumerate() {
                out.write_record(&[link.to_string(), m.sum.to_string(), m.sum_sq.to_string()])?;
            }
            out.flush()?;
            written.push(path);
        }
        info!("wrote raw moments CSV for {} commodities (job {job_id})", written.len());
        Ok(written)
    }

    /// A single header-less row of all link values.  Single-value mode only.
    pub fn write_values_csv(&self, dir: &Path, job_id: i64) -> StatsResult<Vec<PathBuf>> {
        let vectors = self.single_values()?;
        check_dir(dir)?;

        let mut written = Vec::with_capacity(vectors.len());
        for (commodity, values) in vectors {
            let path = csv_path(dir, commodity, job_id);
            let mut out = WriterBuilder::new().has_headers(false).from_path(&path)?;
            out.write_record(values.iter().map(|v| v.to_string()))?;
            out.flush()?;
            written.push(path);
        }
        info!("wrote value rows for {} commodities (job {job_id})", written.len());
        Ok(written)
    }
}
