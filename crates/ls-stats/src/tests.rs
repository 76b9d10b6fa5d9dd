//! Unit tests for ls-stats.

#[cfg(test)]
mod helpers {
    use std::path::Path;

    use tempfile::TempDir;

    pub fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    pub fn read_floats(path: &Path) -> Vec<f32> {
        std::fs::read(path)
            .unwrap()
            .chunks_exact(4)
            .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
            .collect()
    }

    pub fn csv_rows(path: &Path, has_headers: bool) -> Vec<csv::StringRecord> {
        csv::ReaderBuilder::new()
            .has_headers(has_headers)
            .from_path(path)
            .unwrap()
            .records()
            .map(|r| r.unwrap())
            .collect()
    }
}

// ── Moments ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod moments {
    use approx::assert_relative_eq;

    use crate::{MeanSd, Moments};

    fn from_runs(xs: &[f64]) -> Moments {
        let mut m = Moments::default();
        for &x in xs {
            m.add(x);
        }
        m
    }

    #[test]
    fn mean_and_population_sd() {
        let m = from_runs(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        match m.mean_sd(8) {
            MeanSd::Valid { mean, sd, clamped } => {
                assert_relative_eq!(mean, 5.0);
                assert_relative_eq!(sd, 2.0);
                assert!(!clamped);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn constant_runs_have_zero_sd() {
        let m = from_runs(&[0.1, 0.1, 0.1]);
        match m.mean_sd(3) {
            MeanSd::Valid { mean, sd, .. } => {
                assert_relative_eq!(mean, 0.1, epsilon = 1e-12);
                assert!(sd < 1e-6);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn small_negative_variance_clamped() {
        let m = Moments { sum: 1.0, sum_sq: 0.995 };
        assert_eq!(m.mean_sd(1), MeanSd::Valid { mean: 1.0, sd: 0.0, clamped: true });
    }

    #[test]
    fn negative_variance_negligible_against_mean_clamped() {
        let m = Moments { sum: 1e6, sum_sq: 1e12 - 0.02 };
        match m.mean_sd(1) {
            MeanSd::Valid { sd, clamped, .. } => {
                assert_eq!(sd, 0.0);
                assert!(clamped);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn large_negative_variance_inconsistent() {
        let m = Moments { sum: 1.0, sum_sq: 0.5 };
        match m.mean_sd(1) {
            MeanSd::Inconsistent { mean, variance } => {
                assert_relative_eq!(mean, 1.0);
                assert_relative_eq!(variance, -0.5);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}

// ── Accumulator ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod accumulator {
    use crate::{AccumulatorMode, LinkStats, Moments, StatsAccumulator, StatsError};

    #[test]
    fn commodities_created_lazily_with_fixed_length() {
        let mut acc = StatsAccumulator::new(4, AccumulatorMode::SingleValue);
        assert!(acc.get("grain").is_none());
        assert_eq!(acc.values_mut("grain").unwrap().len(), 4);
        assert_eq!(acc.entry("coal").len(), 4);
        assert_eq!(acc.commodities().collect::<Vec<_>>(), vec!["coal", "grain"]);
    }

    #[test]
    fn mode_is_fixed() {
        let mut acc = StatsAccumulator::new(2, AccumulatorMode::SingleValue);
        assert!(matches!(
            acc.moments_mut("grain"),
            Err(StatsError::ModeMismatch { expected: AccumulatorMode::Moments, .. })
        ));
        let mut acc = StatsAccumulator::new(2, AccumulatorMode::Moments);
        assert!(matches!(
            acc.values_mut("grain"),
            Err(StatsError::ModeMismatch { expected: AccumulatorMode::SingleValue, .. })
        ));
        assert_eq!(acc.entry("grain").mode(), AccumulatorMode::Moments);
    }

    #[test]
    fn single_value_record_replaces() {
        let mut acc = StatsAccumulator::new(3, AccumulatorMode::SingleValue);
        acc.record("grain", &[1.0, 2.0, 3.0]).unwrap();
        acc.record("grain", &[4.0, 0.0, 1.5]).unwrap();
        assert_eq!(acc.get("grain"), Some(&LinkStats::Values(vec![4.0, 0.0, 1.5])));
    }

    #[test]
    fn moments_record_adds_total_and_square() {
        let mut acc = StatsAccumulator::new(2, AccumulatorMode::Moments);
        acc.record("grain", &[1.0, 3.0]).unwrap();
        acc.record("grain", &[2.0, 0.0]).unwrap();
        assert_eq!(
            acc.get("grain"),
            Some(&LinkStats::Moments(vec![
                Moments { sum: 3.0, sum_sq: 5.0 },
                Moments { sum: 3.0, sum_sq: 9.0 },
            ]))
        );
    }

    #[test]
    fn record_length_checked() {
        let mut acc = StatsAccumulator::new(3, AccumulatorMode::SingleValue);
        assert!(matches!(
            acc.record("grain", &[1.0]),
            Err(StatsError::LinkCountMismatch { expected: 3, got: 1 })
        ));
    }
}

// ── Binary slots ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod slots {
    use ls_store::{SimulationShape, SimulationStore, StoreError};

    use super::helpers::{read_floats, tmp};
    use crate::{AccumulatorMode, StatsAccumulator, StatsError};

    #[test]
    fn serialise_into_slots() {
        let dir = tmp();
        let store = SimulationStore::open(dir.path()).unwrap();
        store.preallocate("apples", SimulationShape::new(3, 3)).unwrap();
        store.preallocate("oranges", SimulationShape::new(3, 3)).unwrap();

        let mut acc = StatsAccumulator::new(3, AccumulatorMode::SingleValue);
        acc.values_mut("apples").unwrap().copy_from_slice(&[1.0, 1.0, 1.0]);
        acc.values_mut("oranges").unwrap().copy_from_slice(&[1.0, 2.0, 3.0]);

        acc.write_slot(&store, 3, 0).unwrap();
        acc.write_slot(&store, 3, 2).unwrap();

        assert_eq!(
            read_floats(&store.path_for("apples")),
            vec![1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0]
        );
        assert_eq!(
            read_floats(&store.path_for("oranges")),
            vec![1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 1.0, 2.0, 3.0]
        );
    }

    #[test]
    fn accumulate_into_slot() {
        let dir = tmp();
        let store = SimulationStore::open(dir.path()).unwrap();
        store.preallocate("apples", SimulationShape::new(2, 2)).unwrap();

        let mut acc = StatsAccumulator::new(2, AccumulatorMode::SingleValue);
        acc.record("apples", &[1.0, 2.0]).unwrap();
        acc.accumulate_slot(&store, 2, 1).unwrap();
        acc.accumulate_slot(&store, 2, 1).unwrap();
        assert_eq!(store.read_slot("apples", SimulationShape::new(2, 2), 1).unwrap(), vec![2.0, 4.0]);
    }

    #[test]
    fn link_count_must_match_file() {
        let dir = tmp();
        let store = SimulationStore::open(dir.path()).unwrap();
        store.preallocate("apples", SimulationShape::new(3, 3)).unwrap();

        let mut acc = StatsAccumulator::new(2, AccumulatorMode::SingleValue);
        acc.record("apples", &[7.0, 7.0]).unwrap();
        assert!(matches!(
            acc.write_slot(&store, 3, 1),
            Err(StatsError::Store(StoreError::ShapeMismatch { expected: 24, actual: 36, .. }))
        ));
        assert!(matches!(
            acc.accumulate_slot(&store, 3, 1),
            Err(StatsError::Store(StoreError::ShapeMismatch { .. }))
        ));
        assert_eq!(read_floats(&store.path_for("apples")), vec![0.0; 9]);
    }

    #[test]
    fn slot_beyond_simulation_count_rejected() {
        let dir = tmp();
        let store = SimulationStore::open(dir.path()).unwrap();
        store.preallocate("apples", SimulationShape::new(2, 2)).unwrap();

        let mut acc = StatsAccumulator::new(2, AccumulatorMode::SingleValue);
        acc.record("apples", &[1.0, 1.0]).unwrap();
        assert!(matches!(
            acc.write_slot(&store, 2, 2),
            Err(StatsError::Store(StoreError::SlotOutOfRange { slot: 2, n_simulations: 2 }))
        ));
        assert_eq!(read_floats(&store.path_for("apples")), vec![0.0; 4]);
    }

    #[test]
    fn moments_cannot_be_written_to_slots() {
        let dir = tmp();
        let store = SimulationStore::open(dir.path()).unwrap();
        let acc = StatsAccumulator::new(2, AccumulatorMode::Moments);
        assert!(matches!(acc.write_slot(&store, 1, 0), Err(StatsError::ModeMismatch { .. })));
    }
}

// ── Legacy CSV ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod legacy_csv {
    use approx::assert_relative_eq;

    use super::helpers::{csv_rows, tmp};
    use crate::{AccumulatorMode, StatsAccumulator, StatsError};

    #[test]
    fn mean_sd_skips_unused_links() {
        let dir = tmp();
        let mut acc = StatsAccumulator::new(3, AccumulatorMode::Moments);
        acc.record("grain", &[2.0, 0.0, 1.0]).unwrap();
        acc.record("grain", &[4.0, 0.0, 1.0]).unwrap();

        let written = acc.write_mean_sd_csv(dir.path(), 2, 7).unwrap();
        assert_eq!(written, vec![dir.path().join("grain_7.csv")]);

        let mut rdr = csv::Reader::from_path(&written[0]).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["link_id", "mean", "sd"]);

        let rows = csv_rows(&written[0], true);
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "0");
        assert_relative_eq!(rows[0][1].parse::<f64>().unwrap(), 3.0);
        assert_relative_eq!(rows[0][2].parse::<f64>().unwrap(), 1.0);
        assert_eq!(&rows[1][0], "2");
        assert_relative_eq!(rows[1][1].parse::<f64>().unwrap(), 1.0);
        assert_eq!(rows[1][2].parse::<f64>().unwrap(), 0.0);
    }

    #[test]
    fn mean_sd_inconsistent_moments_fail() {
        let dir = tmp();
        let mut acc = StatsAccumulator::new(1, AccumulatorMode::Moments);
        acc.moments_mut("grain").unwrap()[0] = crate::Moments { sum: 1.0, sum_sq: 0.5 };
        match acc.write_mean_sd_csv(dir.path(), 1, 0) {
            Err(StatsError::NegativeVariance { commodity, link: 0, .. }) => assert_eq!(commodity, "grain"),
            other => panic!("expected NegativeVariance, got {other:?}"),
        }
    }

    #[test]
    fn mean_sd_needs_runs_and_directory() {
        let dir = tmp();
        let acc = StatsAccumulator::new(1, AccumulatorMode::Moments);
        assert!(matches!(acc.write_mean_sd_csv(dir.path(), 0, 0), Err(StatsError::NoRuns)));
        assert!(matches!(
            acc.write_mean_sd_csv(&dir.path().join("missing"), 1, 0),
            Err(StatsError::NotADirectory(_))
        ));
    }

    #[test]
    fn raw_moments_all_links() {
        let dir = tmp();
        let mut acc = StatsAccumulator::new(2, AccumulatorMode::Moments);
        acc.record("coal", &[3.0, 0.0]).unwrap();
        let written = acc.write_moments_csv(dir.path(), 1).unwrap();

        let mut rdr = csv::Reader::from_path(&written[0]).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["link_id", "x", "x2"]);
        let rows = csv_rows(&written[0], true);
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "3");
        assert_eq!(&rows[0][2], "9");
        assert_eq!(&rows[1][1], "0");
    }

    #[test]
    fn values_single_row_without_header() {
        let dir = tmp();
        let mut acc = StatsAccumulator::new(3, AccumulatorMode::SingleValue);
        acc.record("coal", &[1.5, 0.0, 2.0]).unwrap();
        let written = acc.write_values_csv(dir.path(), 3).unwrap();
        assert_eq!(written, vec![dir.path().join("coal_3.csv")]);
        assert_eq!(std::fs::read_to_string(&written[0]).unwrap(), "1.5,0,2\n");
    }

    #[test]
    fn exports_check_mode() {
        let dir = tmp();
        let single = StatsAccumulator::new(1, AccumulatorMode::SingleValue);
        let moments = StatsAccumulator::new(1, AccumulatorMode::Moments);
        assert!(matches!(single.write_moments_csv(dir.path(), 0), Err(StatsError::ModeMismatch { .. })));
        assert!(matches!(moments.write_values_csv(dir.path(), 0), Err(StatsError::ModeMismatch { .. })));
    }
}
