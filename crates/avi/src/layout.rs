//! Top-level walk over an AVI file, locating the `movi` list and `idx1`.

use std::io::{Read, Seek};

use riff::{BinaryView, FourCc, HEADER_SIZE};
use tracing::debug;

use crate::error::{AviError, Result};

pub const AVI_FORM: FourCc = FourCc(*b"AVI ");
pub const MOVI: FourCc = FourCc(*b"movi");
pub const IDX1: FourCc = FourCc(*b"idx1");

/// Where the media data and the legacy index live in an AVI file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AviLayout {
    /// Absolute offset of the `movi` list type, the first byte of its payload.
    pub movi_offset: u64,
    /// Absolute offset of the first `idx1` entry.
    pub index_start: u64,
    /// One past the last `idx1` byte.
    pub index_end: u64,
}

impl AviLayout {
    /// First byte after the `movi` list type, where the first media chunk starts.
    pub fn movi_data(&self) -> u64 {
        self.movi_offset + 4
    }

    pub fn index_len(&self) -> u64 {
        self.index_end - self.index_start
    }
}

/// Walks the top-level chunks of an AVI file up to its `idx1` chunk.
///
/// Lists other than `movi` are skipped whole. On success the stream is left
/// at the first index entry.
pub fn walk<S: Read + Seek>(view: &mut BinaryView<S>) -> Result<AviLayout> {
    let len = view.stream_len()?;
    view.seek_to(0)?;

    let riff = view.read_header()?;
    if riff.id != FourCc::RIFF {
        return Err(AviError::InvalidFourcc(riff.id));
    }
    let form_type = view.read_fourcc()?;
    if form_type != AVI_FORM {
        return Err(AviError::InvalidFiletype(form_type));
    }

    let mut movi_offset = None;
    loop {
        let offset = view.position()?;
        if offset + HEADER_SIZE > len {
            return Err(AviError::MissingIndex);
        }

        let header = view.read_header()?;
        debug!(offset, id = %header.id, size = header.size, "chunk");

        if header.id == FourCc::LIST {
            let list_type = view.read_fourcc()?;
            let payload = view.skip(-4)?;
            if list_type == MOVI {
                movi_offset = Some(payload);
            }
        }

        if header.id == IDX1 {
            let movi_offset = movi_offset.ok_or(AviError::MissingMovi)?;
            let index_start = view.position()?;
            return Ok(AviLayout {
                movi_offset,
                index_start,
                index_end: index_start + u64::from(header.size),
            });
        }

        view.skip(header.padded_size() as i64)?;
    }
}
