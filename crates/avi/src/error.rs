use riff::FourCc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AviError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The outer chunk is not `RIFF`.
    #[error("incorrect FOURCC `{0}`, expected `RIFF`")]
    InvalidFourcc(FourCc),

    /// The RIFF form type is not `AVI `.
    #[error("incorrect file type `{0}`, expected `AVI `")]
    InvalidFiletype(FourCc),

    #[error("missing movi list before idx1")]
    MissingMovi,

    /// End of file reached without an `idx1` chunk, e.g. OpenDML-only files.
    #[error("missing idx1 index")]
    MissingIndex,

    #[error("incorrect index entry #{ordinal}: no `{id}` chunk at offset {offset}")]
    InvalidIndexEntry { ordinal: usize, id: FourCc, offset: i32 },
}

pub type Result<T> = std::result::Result<T, AviError>;
