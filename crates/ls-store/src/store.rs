//! `SimulationStore` — per-commodity slot files inside one directory.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::matrix::SimulationFile;
use crate::raw::{decode, encode, read_row_at, write_row_at};
use crate::{Layout, SimulationShape, SlotRef, StoreError, StoreResult};

/// `<commodity>.dat`
pub fn commodity_file_name(commodity: &str) -> String {
    format!("{commodity}.dat")
}

/// A directory of simulation files, one per commodity.
///
/// The store keeps no open handles and no in-memory state beyond the
/// directory path; every operation opens the commodity file, does its
/// positional I/O, and closes it again.  Separate processes can each hold a
/// `SimulationStore` on the same directory.
#[derive(Clone, Debug)]
pub struct SimulationStore {
    dir: PathBuf,
}

impl SimulationStore {
    /// Open a store rooted at `dir`, which must be an existing directory.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let store = Self { dir: dir.into() };
        store.check_dir()?;
        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, commodity: &str) -> PathBuf {
        self.dir.join(commodity_file_name(commodity))
    }

    /// Create `<commodity>.dat` holding `shape.n_simulations` zero rows of
    /// `shape.n_links` floats.  Fails if the file already exists.
    ///
    /// Returns a simulation-major handle on the new file.
    pub fn preallocate(&self, commodity: &str, shape: SimulationShape) -> StoreResult<SimulationFile> {
        self.check_dir()?;
        let path = self.path_for(commodity);
        let file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(StoreError::FileAlreadyExists(path));
            }
            Err(e) => return Err(e.into()),
        };

        let zero_row = encode(&vec![0.0; shape.n_links]);
        let mut out = BufWriter::new(file);
        for _ in 0..shape.n_simulations {
            out.write_all(&zero_row)?;
        }
        out.flush()?;

        info!(
            "preallocated {} ({} simulations × {} links, {} bytes)",
            path.display(),
            shape.n_simulations,
            shape.n_links,
            shape.file_len()
        );
        Ok(SimulationFile::new(path, shape, Layout::SimulationMajor))
    }

    /// Overwrite slot `slot` of `<commodity>.dat`, a file of `shape`, with
    /// `values`.
    ///
    /// `values` must hold exactly `shape.n_links` floats and `slot` must be
    /// below `shape.n_simulations`, so the write never leaves the slot's own
    /// byte range.  A missing or empty file is created at its full size
    /// first; a file of any other length is a [`StoreError::ShapeMismatch`].
    pub fn write_slot(
        &self,
        commodity: &str,
        shape:     SimulationShape,
        slot:      i64,
        values:    &[f32],
    ) -> StoreResult<()> {
        let slot = slot_for(shape, slot, values)?;
        self.check_dir()?;
        let path = self.path_for(commodity);
        let file = OpenOptions::new().write(true).create(true).truncate(false).open(&path)?;
        let len = file.metadata()?.len();
        if len == 0 {
            file.set_len(shape.file_len())?;
        } else {
            check_file_len(&path, shape, len)?;
        }
        write_row_at(&file, &path, &encode(values), slot.byte_offset())?;
        debug!("wrote slot {} of {}", slot.index(), path.display());
        Ok(())
    }

    /// Add `values` element-wise onto slot `slot` of an existing
    /// `<commodity>.dat` of `shape`.  The same row checks as
    /// [`write_slot`](Self::write_slot) apply, and the file must already
    /// have exactly `shape.file_len()` bytes.
    ///
    /// This is a read-modify-write with no locking: two writers on the same
    /// slot race and one update can be lost.
    pub fn accumulate_slot(
        &self,
        commodity: &str,
        shape:     SimulationShape,
        slot:      i64,
        values:    &[f32],
    ) -> StoreResult<()> {
        let slot = slot_for(shape, slot, values)?;
        self.check_dir()?;
        let path = self.path_for(commodity);
        let file = OpenOptions::new().read(true).write(true).open(&path)?;
        check_file_len(&path, shape, file.metadata()?.len())?;

        let mut buf = vec![0u8; slot.byte_len()];
        read_row_at(&file, &path, &mut buf, slot.byte_offset())?;
        let summed: Vec<f32> = decode(&buf)
            .into_iter()
            .zip(values)
            .map(|(old, add)| old + add)
            .collect();
        write_row_at(&file, &path, &encode(&summed), slot.byte_offset())?;
        debug!("accumulated into slot {} of {}", slot.index(), path.display());
        Ok(())
    }

    /// Read slot `slot` (`shape.n_links` floats) of a simulation-major file
    /// of `shape`.
    pub fn read_slot(&self, commodity: &str, shape: SimulationShape, slot: i64) -> StoreResult<Vec<f32>> {
        let slot = SlotRef::new(shape, slot)?;
        self.check_dir()?;
        let path = self.path_for(commodity);
        let file = File::open(&path)?;
        check_file_len(&path, shape, file.metadata()?.len())?;
        let mut buf = vec![0u8; slot.byte_len()];
        read_row_at(&file, &path, &mut buf, slot.byte_offset())?;
        Ok(decode(&buf))
    }

    fn check_dir(&self) -> StoreResult<()> {
        if !self.dir.is_dir() {
            return Err(StoreError::NotADirectory(self.dir.clone()));
        }
        Ok(())
    }
}

fn slot_for(shape: SimulationShape, slot: i64, values: &[f32]) -> StoreResult<SlotRef> {
    if values.len() != shape.n_links {
        return Err(StoreError::RowLengthMismatch { expected: shape.n_links, got: values.len() });
    }
    SlotRef::new(shape, slot)
}

fn check_file_len(path: &Path, shape: SimulationShape, actual: u64) -> StoreResult<()> {
    if actual != shape.file_len() {
        return Err(StoreError::ShapeMismatch {
            path:     path.to_path_buf(),
            expected: shape.file_len(),
            actual,
        });
    }
    Ok(())
}
