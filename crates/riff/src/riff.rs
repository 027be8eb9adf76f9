use std::io::{Error, Write};

use crate::fourcc::FourCc;

/// Length of a chunk header: FOURCC followed by a little-endian u32 size.
pub const HEADER_SIZE: u64 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    pub id: FourCc,
    /// Payload length, excluding the header and the pad byte.
    pub size: u32,
}

impl ChunkHeader {
    pub fn new(id: impl Into<FourCc>, size: u32) -> ChunkHeader {
        ChunkHeader {
            id: id.into(),
            size,
        }
    }

    /// Payload length on disk. Odd size chunks are followed by a null pad byte.
    pub fn padded_size(&self) -> u64 {
        let size = u64::from(self.size);
        size + (size & 1)
    }

    pub fn to_bytes(&self) -> [u8; 8] {
        let mut buf = [0u8; 8];
        buf[..4].copy_from_slice(self.id.as_bytes());
        buf[4..].copy_from_slice(&self.size.to_le_bytes());
        buf
    }
}

/// In-memory chunk tree that serializes to RIFF layout.
#[derive(Debug, Clone)]
pub struct Chunk {
    pub id: FourCc,
    pub size: usize,
    pub form_type: Option<FourCc>,
    pub children: Vec<Chunk>,
    pub data: Vec<u8>,
}

impl Chunk {
    pub fn list(form_type: impl Into<FourCc>, children: Vec<Chunk>) -> Chunk {
        Self::list_with_id(FourCc::LIST, form_type, children)
    }

    pub fn list_with_id(
        id: impl Into<FourCc>,
        form_type: impl Into<FourCc>,
        children: Vec<Chunk>,
    ) -> Chunk {
        Chunk {
            id: id.into(),
            size: 4 + children.iter().map(Chunk::len_on_disk).sum::<usize>(),
            form_type: Some(form_type.into()),
            children,
            data: Vec::new(),
        }
    }

    pub fn new(id: impl Into<FourCc>, data: Vec<u8>) -> Chunk {
        Chunk {
            id: id.into(),
            size: data.len(),
            form_type: None,
            children: Vec::new(),
            data,
        }
    }

    pub fn header(&self) -> ChunkHeader {
        ChunkHeader::new(self.id, self.size as u32)
    }

    /// Bytes taken by this chunk when written: header, payload and pad byte.
    pub fn len_on_disk(&self) -> usize {
        HEADER_SIZE as usize + self.size + (self.size & 1)
    }

    pub fn write<W: Write>(&self, out: &mut W) -> Result<(), Error> {
        out.write_all(&self.header().to_bytes())?;

        match self.form_type {
            Some(form_type) => {
                out.write_all(form_type.as_bytes())?;
                for child in self.children.iter() {
                    child.write(out)?;
                }
            }
            None => out.write_all(&self.data)?,
        }

        if self.size & 1 == 1 {
            out.write_all(&[0])?;
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len_on_disk());
        // Writing into a Vec cannot fail.
        let _ = self.write(&mut out);
        out
    }
}
