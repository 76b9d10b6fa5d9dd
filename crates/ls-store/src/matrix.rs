//! Whole-file transpose and link-row extraction.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::raw::{decode, encode, read_row_at};
use crate::{FLOAT_BYTES, Layout, SimulationShape, SlotRef, StoreError, StoreResult};

/// Rewrite `path`, read as `n_simulations` rows of `n_links` floats, as
/// `n_links` rows of `n_simulations` floats.
///
/// `output[link][sim] = input[sim][link]`.  The whole file is held in memory
/// twice while this runs.  The orientation is not checked: calling this on
/// a link-major file with the same arguments scrambles it; to undo a
/// transpose swap the two counts.
pub fn transpose(path: &Path, n_simulations: usize, n_links: usize) -> StoreResult<()> {
    let shape = SimulationShape::new(n_simulations, n_links);
    let bytes = fs::read(path)?;
    if bytes.len() as u64 != shape.file_len() {
        return Err(StoreError::ShapeMismatch {
            path:     path.to_path_buf(),
            expected: shape.file_len(),
            actual:   bytes.len() as u64,
        });
    }

    let input = decode(&bytes);
    drop(bytes);
    let mut output = vec![0.0f32; input.len()];
    for (sim, row) in input.chunks_exact(n_links.max(1)).enumerate() {
        for (link, &v) in row.iter().enumerate() {
            output[link * n_simulations + sim] = v;
        }
    }

    fs::write(path, encode(&output))?;
    info!("transposed {} ({n_simulations} × {n_links} → {n_links} × {n_simulations})", path.display());
    Ok(())
}

/// For each of `link_ids`, read the `n_simulations` floats stored at
/// `link_id × n_simulations × 4` and concatenate them in request order.
///
/// Only meaningful on a link-major (transposed) file; on a simulation-major
/// file the same offsets return unrelated values.  This is not checked.
pub fn extract_rows(path: &Path, link_ids: &[i64], n_simulations: usize) -> StoreResult<Vec<f32>> {
    let file = File::open(path)?;
    let mut out = Vec::with_capacity(link_ids.len() * n_simulations);
    let mut buf = vec![0u8; n_simulations * FLOAT_BYTES];
    for &link in link_ids {
        let row = SlotRef::link_row(n_simulations, link)?;
        read_row_at(&file, path, &mut buf, row.byte_offset())?;
        out.extend(decode(&buf));
    }
    debug!("extracted {} link rows from {}", link_ids.len(), path.display());
    Ok(out)
}

// ── SimulationFile ────────────────────────────────────────────────────────────

/// A commodity file together with its shape and the layout the caller
/// believes it has.
///
/// The layout lives only in this handle, never on disk.  The handle keeps
/// it in step across [`transpose`](Self::transpose) and refuses row
/// extraction on a simulation-major file.
#[derive(Clone, Debug)]
pub struct SimulationFile {
    path:   PathBuf,
    shape:  SimulationShape,
    layout: Layout,
}

impl SimulationFile {
    /// Wrap an existing file.  Nothing is read; `shape` and `layout` are
    /// taken on trust.
    pub fn new(path: impl Into<PathBuf>, shape: SimulationShape, layout: Layout) -> Self {
        Self { path: path.into(), shape, layout }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn shape(&self) -> SimulationShape {
        self.shape
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Transpose in place and flip the recorded layout.
    pub fn transpose(&mut self) -> StoreResult<()> {
        let (rows, row_len) = self.shape.rows(self.layout);
        transpose(&self.path, rows, row_len)?;
        self.layout = self.layout.transposed();
        Ok(())
    }

    /// All simulations of each requested link, concatenated.  Link ids are
    /// checked against the shape before anything is read.
    pub fn extract_rows(&self, link_ids: &[i64]) -> StoreResult<Vec<f32>> {
        if self.layout != Layout::LinkMajor {
            return Err(StoreError::WrongLayout { expected: Layout::LinkMajor, actual: self.layout });
        }
        let n_links = self.shape.n_links;
        if let Some(&link) = link_ids.iter().find(|&&l| l >= 0 && l as u64 >= n_links as u64) {
            return Err(StoreError::LinkOutOfRange { link, n_links });
        }
        extract_rows(&self.path, link_ids, self.shape.n_simulations)
    }

    /// The whole file in its current layout.
    pub fn read_all(&self) -> StoreResult<Vec<f32>> {
        let bytes = fs::read(&self.path)?;
        if bytes.len() as u64 != self.shape.file_len() {
            return Err(StoreError::ShapeMismatch {
                path:     self.path.clone(),
                expected: self.shape.file_len(),
                actual:   bytes.len() as u64,
            });
        }
        Ok(decode(&bytes))
    }
}
