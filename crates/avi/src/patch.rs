//! Resolving key frame index entries to their chunks and blanking them.

use std::fmt;
use std::io::{ErrorKind, Read, Seek, Write};

use riff::{BinaryView, ChunkHeader, FourCc};
use tracing::debug;

use crate::error::{AviError, Result};
use crate::index::{self, IndexEntry};
use crate::layout::AviLayout;

/// Reference point an index entry's offset was resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexBase {
    /// Start of the file.
    Absolute,
    /// The `movi` list type; the first chunk sits at offset 4.
    MoviList,
    /// The first byte after the `movi` list type.
    MoviData,
}

impl IndexBase {
    pub const ALL: [IndexBase; 3] = [IndexBase::Absolute, IndexBase::MoviList, IndexBase::MoviData];

    pub fn origin(self, layout: &AviLayout) -> u64 {
        match self {
            IndexBase::Absolute => 0,
            IndexBase::MoviList => layout.movi_offset,
            IndexBase::MoviData => layout.movi_data(),
        }
    }

    /// Absolute offset of `offset` under this base, or `None` if it lands before the file.
    pub fn resolve(self, layout: &AviLayout, offset: i32) -> Option<u64> {
        let at = self.origin(layout) as i64 + i64::from(offset);
        u64::try_from(at).ok()
    }
}

impl fmt::Display for IndexBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IndexBase::Absolute => "absolute",
            IndexBase::MoviList => "movi-relative",
            IndexBase::MoviData => "movi-data-relative",
        };
        f.write_str(name)
    }
}

/// Where the four `JUNK` bytes land within the targeted chunk header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Over the chunk id, whatever the offset convention.
    #[default]
    Fourcc,
    /// Over the size field for absolute offsets and over the id otherwise,
    /// as older releases of the tool did.
    Legacy,
}

impl WriteMode {
    fn write_offset(self, base: IndexBase, header_offset: u64) -> u64 {
        match (self, base) {
            (WriteMode::Legacy, IndexBase::Absolute) => header_offset + 4,
            _ => header_offset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Patch {
    /// Position of the entry within `idx1`.
    pub ordinal: usize,
    pub entry: IndexEntry,
    pub base: IndexBase,
    pub header_offset: u64,
    pub write_offset: u64,
    /// The chunk already reads `JUNK`, e.g. from an earlier run.
    pub already_blank: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchPlan {
    /// Index entries read from `idx1`.
    pub entries: usize,
    /// Entries carrying the key frame flag, including the spared first one.
    pub keyframes: usize,
    pub patches: Vec<Patch>,
}

impl PatchPlan {
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    pub fn count(&self, base: IndexBase) -> usize {
        self.patches.iter().filter(|p| p.base == base).count()
    }

    /// Writes `JUNK` at every planned offset.
    pub fn apply<W: Write + Seek>(&self, view: &mut BinaryView<W>) -> Result<()> {
        for patch in &self.patches {
            view.write_fourcc_at(patch.write_offset, FourCc::JUNK)?;
        }
        view.flush()?;
        Ok(())
    }
}

/// Reads the index and resolves every key frame except the first.
///
/// Nothing is written; any entry that cannot be resolved aborts the plan.
pub fn plan<S: Read + Seek>(
    view: &mut BinaryView<S>,
    layout: &AviLayout,
    mode: WriteMode,
) -> Result<PatchPlan> {
    let mut entries = 0;
    let mut keyframes = Vec::new();
    for (ordinal, entry) in index::entries(view, layout).enumerate() {
        let entry = entry?;
        entries += 1;
        if entry.is_keyframe() {
            keyframes.push((ordinal, entry));
        }
    }

    let mut patches = Vec::with_capacity(keyframes.len().saturating_sub(1));
    for &(ordinal, entry) in keyframes.iter().skip(1) {
        let (base, header_offset, already_blank) =
            locate(view, layout, &entry)?.ok_or(AviError::InvalidIndexEntry {
                ordinal,
                id: entry.id,
                offset: entry.offset,
            })?;
        let write_offset = mode.write_offset(base, header_offset);
        debug!(
            ordinal,
            id = %entry.id,
            %base,
            header_offset,
            write_offset,
            already_blank,
            "key frame"
        );
        patches.push(Patch {
            ordinal,
            entry,
            base,
            header_offset,
            write_offset,
            already_blank,
        });
    }

    Ok(PatchPlan {
        entries,
        keyframes: keyframes.len(),
        patches,
    })
}

/// Relative bases go first when looking for blanked chunks: a small relative
/// offset read as absolute lands in the header lists, where `JUNK` padding
/// chunks are common.
const BLANK_ORDER: [IndexBase; 3] = [IndexBase::MoviList, IndexBase::MoviData, IndexBase::Absolute];

fn locate<S: Read + Seek>(
    view: &mut BinaryView<S>,
    layout: &AviLayout,
    entry: &IndexEntry,
) -> Result<Option<(IndexBase, u64, bool)>> {
    let mut probes = [None; 3];
    for (slot, base) in probes.iter_mut().zip(IndexBase::ALL) {
        if let Some(at) = base.resolve(layout, entry.offset) {
            *slot = probe(view, at)?.map(|header| (base, at, header));
        }
    }

    let exact = probes
        .iter()
        .flatten()
        .find(|(_, _, header)| header.id == entry.id);
    if let Some(&(base, at, _)) = exact {
        return Ok(Some((base, at, false)));
    }

    let blank = BLANK_ORDER.iter().find_map(|&base| {
        probes.iter().flatten().find(|(b, _, header)| {
            *b == base && header.id == FourCc::JUNK && header.size == entry.size
        })
    });
    Ok(blank.map(|&(base, at, _)| (base, at, true)))
}

/// Chunk header at `at`, or `None` when it would run past the end.
fn probe<S: Read + Seek>(view: &mut BinaryView<S>, at: u64) -> Result<Option<ChunkHeader>> {
    match view.read_header_at(at) {
        Ok(header) => Ok(Some(header)),
        Err(err) if err.kind() == ErrorKind::UnexpectedEof => Ok(None),
        Err(err) => Err(err.into()),
    }
}
