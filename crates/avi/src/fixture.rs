//! Synthetic AVI files for tests.
//!
//! Layout: `RIFF AVI ` > `LIST hdrl` (`avih`), an odd-sized `JUNK` chunk,
//! `LIST movi` with the frames, then `idx1`.

use byteorder::{LittleEndian, WriteBytesExt};
use riff::{Chunk, FourCc};

pub const KEYFRAME: u32 = 0x10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offsets {
    Absolute,
    /// Relative to the `movi` list type, first chunk at 4.
    MoviList,
    /// Relative to the first byte after the `movi` list type.
    MoviData,
}

#[derive(Debug, Clone)]
pub struct Frame {
    pub id: [u8; 4],
    pub key: bool,
    pub payload: Vec<u8>,
}

impl Frame {
    pub fn key(id: &[u8; 4], len: usize) -> Frame {
        Frame {
            id: *id,
            key: true,
            payload: vec![0xaa; len],
        }
    }

    pub fn delta(id: &[u8; 4], len: usize) -> Frame {
        Frame {
            id: *id,
            key: false,
            payload: vec![0x55; len],
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RawEntry {
    pub id: [u8; 4],
    pub flags: u32,
    pub offset: i32,
    pub size: u32,
}

#[derive(Debug, Clone)]
pub struct SampleAvi {
    pub bytes: Vec<u8>,
    /// Absolute offset of the `movi` list type.
    pub movi_offset: u64,
    /// Absolute offset of each frame's chunk header.
    pub chunk_offsets: Vec<u64>,
}

impl SampleAvi {
    pub fn id_at(&self, offset: u64) -> &[u8] {
        let at = offset as usize;
        &self.bytes[at..at + 4]
    }
}

fn header_chunks() -> Vec<Chunk> {
    vec![
        Chunk::list(b"hdrl", vec![Chunk::new(b"avih", vec![0; 56])]),
        Chunk::new(b"JUNK", vec![0; 11]),
    ]
}

fn movi_offset() -> u64 {
    let before: usize = header_chunks().iter().map(Chunk::len_on_disk).sum();
    // RIFF header + form type, then the LIST header
    (12 + before + 8) as u64
}

fn chunk_offsets(frames: &[Frame]) -> Vec<u64> {
    let mut offset = movi_offset() + 4;
    frames
        .iter()
        .map(|frame| {
            let at = offset;
            offset += 8 + frame.payload.len() as u64 + (frame.payload.len() as u64 & 1);
            at
        })
        .collect()
}

/// Index entries for `frames` with offsets in the given convention.
pub fn index_for(frames: &[Frame], offsets: Offsets) -> Vec<RawEntry> {
    let movi = movi_offset() as i64;
    frames
        .iter()
        .zip(chunk_offsets(frames))
        .map(|(frame, at)| {
            let offset = match offsets {
                Offsets::Absolute => at as i64,
                Offsets::MoviList => at as i64 - movi,
                Offsets::MoviData => at as i64 - movi - 4,
            };
            RawEntry {
                id: frame.id,
                flags: if frame.key { KEYFRAME } else { 0 },
                offset: offset as i32,
                size: frame.payload.len() as u32,
            }
        })
        .collect()
}

pub fn build(frames: &[Frame], offsets: Offsets) -> SampleAvi {
    assemble(frames, &index_for(frames, offsets))
}

pub fn assemble(frames: &[Frame], index: &[RawEntry]) -> SampleAvi {
    let mut idx1 = Vec::with_capacity(index.len() * 16);
    for entry in index {
        idx1.extend_from_slice(&entry.id);
        idx1.write_u32::<LittleEndian>(entry.flags).unwrap();
        idx1.write_i32::<LittleEndian>(entry.offset).unwrap();
        idx1.write_u32::<LittleEndian>(entry.size).unwrap();
    }

    let movi = Chunk::list(
        b"movi",
        frames
            .iter()
            .map(|frame| Chunk::new(frame.id, frame.payload.clone()))
            .collect(),
    );

    let mut children = header_chunks();
    children.push(movi);
    children.push(Chunk::new(b"idx1", idx1));
    let avi = Chunk::list_with_id(FourCc::RIFF, b"AVI ", children);

    SampleAvi {
        bytes: avi.to_bytes(),
        movi_offset: movi_offset(),
        chunk_offsets: chunk_offsets(frames),
    }
}

/// Three key frames with a delta frame between the first two.
pub fn three_keyframes() -> Vec<Frame> {
    vec![
        Frame::key(b"00dc", 24),
        Frame::delta(b"00dc", 10),
        Frame::key(b"00dc", 24),
        Frame::key(b"00dc", 17),
    ]
}
