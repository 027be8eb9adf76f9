//! Legacy `idx1` index entries.

use std::io::{Error, Read, Seek};

use riff::{BinaryView, FourCc};
use tracing::warn;

use crate::layout::AviLayout;

/// Length of one `idx1` record.
pub const ENTRY_SIZE: u64 = 16;

pub const AVIIF_LIST: u32 = 0x1;
pub const AVIIF_KEYFRAME: u32 = 0x10;
pub const AVIIF_NO_TIME: u32 = 0x100;

/// https://learn.microsoft.com/en-us/previous-versions/windows/desktop/api/Aviriff/ns-aviriff-avioldindex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry {
    pub id: FourCc,
    pub flags: u32,
    /// Either file-absolute or relative to the `movi` list; muxers disagree.
    pub offset: i32,
    pub size: u32,
}

impl IndexEntry {
    pub fn read<S: Read>(view: &mut BinaryView<S>) -> Result<IndexEntry, Error> {
        Ok(IndexEntry {
            id: view.read_fourcc()?,
            flags: view.read_u32()?,
            offset: view.read_i32()?,
            size: view.read_u32()?,
        })
    }

    pub fn is_keyframe(&self) -> bool {
        self.flags & AVIIF_KEYFRAME != 0
    }
}

/// Iterator over the entries between `index_start` and `index_end`.
pub struct Entries<'a, S> {
    view: &'a mut BinaryView<S>,
    next: u64,
    end: u64,
    started: bool,
}

pub fn entries<'a, S: Read + Seek>(
    view: &'a mut BinaryView<S>,
    layout: &AviLayout,
) -> Entries<'a, S> {
    Entries {
        view,
        next: layout.index_start,
        end: layout.index_end,
        started: false,
    }
}

impl<S: Read + Seek> Iterator for Entries<'_, S> {
    type Item = Result<IndexEntry, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next + ENTRY_SIZE > self.end {
            if self.next < self.end {
                warn!(
                    offset = self.next,
                    trailing = self.end - self.next,
                    "ignoring partial index entry"
                );
                self.next = self.end;
            }
            return None;
        }

        if !self.started {
            self.started = true;
            if let Err(err) = self.view.seek_to(self.next) {
                self.next = self.end;
                return Some(Err(err));
            }
        }

        match IndexEntry::read(self.view) {
            Ok(entry) => {
                self.next += ENTRY_SIZE;
                Some(Ok(entry))
            }
            Err(err) => {
                self.next = self.end;
                Some(Err(err))
            }
        }
    }
}
