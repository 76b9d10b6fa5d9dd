//! Positional reads/writes and `f32` ⇄ byte conversion.

use std::fs::File;
use std::io;
use std::path::Path;

use crate::{FLOAT_BYTES, StoreError, StoreResult};

#[cfg(unix)]
fn pwrite(file: &File, buf: &[u8], offset: u64) -> io::Result<usize> {
    std::os::unix::fs::FileExt::write_at(file, buf, offset)
}

#[cfg(windows)]
fn pwrite(file: &File, buf: &[u8], offset: u64) -> io::Result<usize> {
    std::os::windows::fs::FileExt::seek_write(file, buf, offset)
}

#[cfg(unix)]
fn pread(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    std::os::unix::fs::FileExt::read_at(file, buf, offset)
}

#[cfg(windows)]
fn pread(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    std::os::windows::fs::FileExt::seek_read(file, buf, offset)
}

/// Write `buf` at `offset` with a single positional write.  A partial write
/// is reported, not retried.
pub(crate) fn write_row_at(file: &File, path: &Path, buf: &[u8], offset: u64) -> StoreResult<()> {
    let written = pwrite(file, buf, offset)?;
    if written != buf.len() {
        return Err(StoreError::ShortWrite {
            path: path.to_path_buf(),
            offset,
            expected: buf.len(),
            written,
        });
    }
    Ok(())
}

/// Fill `buf` from `offset`.  Hitting end-of-file first is a short read.
pub(crate) fn read_row_at(file: &File, path: &Path, buf: &mut [u8], offset: u64) -> StoreResult<()> {
    let mut read = 0;
    while read < buf.len() {
        match pread(file, &mut buf[read..], offset + read as u64) {
            Ok(0) => break,
            Ok(n) => read += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    if read != buf.len() {
        return Err(StoreError::ShortRead {
            path: path.to_path_buf(),
            offset,
            expected: buf.len(),
            read,
        });
    }
    Ok(())
}

pub(crate) fn encode(values: &[f32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(values.len() * FLOAT_BYTES);
    for v in values {
        out.extend_from_slice(&v.to_ne_bytes());
    }
    out
}

/// Decode native-endian floats.  Trailing bytes that do not form a whole
/// value are ignored; callers validate lengths beforehand.
pub(crate) fn decode(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(FLOAT_BYTES)
        .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}
