use std::io::{Error, Read, Seek, SeekFrom, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::fourcc::FourCc;
use crate::riff::ChunkHeader;

/// Little-endian view over a seekable byte stream.
///
/// Reads need `S: Read`, writes need `S: Write`, and every positional
/// operation needs `S: Seek`, so the same type wraps read-only sources and
/// write-only targets alike.
#[derive(Debug)]
pub struct BinaryView<S> {
    inner: S,
}

impl<S> BinaryView<S> {
    pub fn new(inner: S) -> BinaryView<S> {
        BinaryView { inner }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: Seek> BinaryView<S> {
    pub fn position(&mut self) -> Result<u64, Error> {
        self.inner.stream_position()
    }

    pub fn seek_to(&mut self, offset: u64) -> Result<u64, Error> {
        self.inner.seek(SeekFrom::Start(offset))
    }

    /// Moves relative to the current position and returns the new offset.
    pub fn skip(&mut self, delta: i64) -> Result<u64, Error> {
        self.inner.seek(SeekFrom::Current(delta))
    }

    /// Total stream length. The current position is left where it was.
    pub fn stream_len(&mut self) -> Result<u64, Error> {
        let pos = self.position()?;
        let end = self.inner.seek(SeekFrom::End(0))?;
        if pos != end {
            self.seek_to(pos)?;
        }
        Ok(end)
    }
}

impl<S: Read> BinaryView<S> {
    pub fn read_u32(&mut self) -> Result<u32, Error> {
        self.inner.read_u32::<LittleEndian>()
    }

    pub fn read_i32(&mut self) -> Result<i32, Error> {
        self.inner.read_i32::<LittleEndian>()
    }

    pub fn read_fourcc(&mut self) -> Result<FourCc, Error> {
        let mut buf = [0u8; 4];
        self.inner.read_exact(&mut buf)?;
        Ok(FourCc(buf))
    }

    pub fn read_header(&mut self) -> Result<ChunkHeader, Error> {
        let id = self.read_fourcc()?;
        let size = self.read_u32()?;
        Ok(ChunkHeader { id, size })
    }
}

impl<S: Read + Seek> BinaryView<S> {
    pub fn read_header_at(&mut self, offset: u64) -> Result<ChunkHeader, Error> {
        self.seek_to(offset)?;
        self.read_header()
    }
}

impl<S: Write> BinaryView<S> {
    pub fn write_u32(&mut self, value: u32) -> Result<(), Error> {
        self.inner.write_u32::<LittleEndian>(value)
    }

    pub fn write_fourcc(&mut self, fourcc: FourCc) -> Result<(), Error> {
        self.inner.write_all(fourcc.as_bytes())
    }

    pub fn flush(&mut self) -> Result<(), Error> {
        self.inner.flush()
    }
}

impl<S: Write + Seek> BinaryView<S> {
    pub fn write_fourcc_at(&mut self, offset: u64, fourcc: FourCc) -> Result<(), Error> {
        self.seek_to(offset)?;
        self.write_fourcc(fourcc)
    }
}
