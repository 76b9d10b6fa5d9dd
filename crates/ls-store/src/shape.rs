//! Byte-range arithmetic for simulation files.
//!
//! All offset computations live here so the I/O code never multiplies raw
//! indices itself.

use crate::{StoreError, StoreResult};

/// Size of one stored value.
pub const FLOAT_BYTES: usize = std::mem::size_of::<f32>();

/// Which index varies slowest in the file.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Layout {
    /// Row `s` holds all links of simulation `s`.  This is how slots are
    /// written.
    SimulationMajor,
    /// Row `l` holds all simulations of link `l`.  Produced by transpose;
    /// required by row extraction.
    LinkMajor,
}

impl Layout {
    pub fn transposed(self) -> Layout {
        match self {
            Layout::SimulationMajor => Layout::LinkMajor,
            Layout::LinkMajor       => Layout::SimulationMajor,
        }
    }
}

/// Logical matrix shape of one commodity file.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct SimulationShape {
    pub n_simulations: usize,
    pub n_links:       usize,
}

impl SimulationShape {
    pub fn new(n_simulations: usize, n_links: usize) -> Self {
        Self { n_simulations, n_links }
    }

    pub fn n_values(&self) -> usize {
        self.n_simulations * self.n_links
    }

    /// Exact file size in bytes.
    pub fn file_len(&self) -> u64 {
        (self.n_simulations as u64)
            .saturating_mul(self.n_links as u64)
            .saturating_mul(FLOAT_BYTES as u64)
    }

    /// `(rows, row_len)` of the file in the given layout.
    pub fn rows(&self, layout: Layout) -> (usize, usize) {
        match layout {
            Layout::SimulationMajor => (self.n_simulations, self.n_links),
            Layout::LinkMajor       => (self.n_links, self.n_simulations),
        }
    }
}

/// One row of a file: `index` rows of `row_len` floats precede it.
///
/// Used both for simulation slots (row = one job's link vector) and for
/// link rows in a transposed file (row = one link's simulation vector).
/// Construction validates the index and computes the byte range with
/// checked arithmetic, so an accepted `SlotRef` always names a
/// representable range.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct SlotRef {
    row_len: usize,
    index:   usize,
    offset:  u64,
}

impl SlotRef {
    /// Simulation slot `slot` of a simulation-major file of `shape`.
    /// Rejects negative indices and slots past `shape.n_simulations`.
    pub fn new(shape: SimulationShape, slot: i64) -> StoreResult<Self> {
        let index = usize::try_from(slot).map_err(|_| StoreError::NegativeSlot(slot))?;
        if index >= shape.n_simulations {
            return Err(StoreError::SlotOutOfRange { slot, n_simulations: shape.n_simulations });
        }
        Self::at(shape.n_links, index, slot)
    }

    /// A link row of a link-major file holding `n_simulations` per link.
    ///
    /// The file length is not known here; a row past the end surfaces as a
    /// short read.
    pub fn link_row(n_simulations: usize, link_id: i64) -> StoreResult<Self> {
        let index = usize::try_from(link_id).map_err(|_| StoreError::NegativeLinkId(link_id))?;
        Self::at(n_simulations, index, link_id)
    }

    fn at(row_len: usize, index: usize, requested: i64) -> StoreResult<Self> {
        let overflow = || StoreError::OffsetOverflow { index: requested, row_len };
        let byte_len = (row_len as u64).checked_mul(FLOAT_BYTES as u64).ok_or_else(overflow)?;
        let offset = (index as u64).checked_mul(byte_len).ok_or_else(overflow)?;
        offset.checked_add(byte_len).ok_or_else(overflow)?;
        Ok(Self { row_len, index, offset })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn row_len(&self) -> usize {
        self.row_len
    }

    /// First byte of the row.
    #[inline]
    pub fn byte_offset(&self) -> u64 {
        self.offset
    }

    /// Number of bytes in the row.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.row_len * FLOAT_BYTES
    }

    /// One past the last byte of the row.
    #[inline]
    pub fn byte_end(&self) -> u64 {
        self.offset + self.byte_len() as u64
    }
}
