//! # deliframes
//!
//! Datamoshing preparation for AVI files: every key frame but the first is
//! renamed to `JUNK` in place, so decoders skip it and later frames smear
//! over whatever picture came before.
//!
//! The legacy `idx1` index drives the patching. Its offsets may be absolute or
//! relative to the `movi` list, and each entry is probed to tell which.

pub mod cli;
pub mod error;
pub mod index;
pub mod layout;
pub mod logging;
pub mod ops;
pub mod patch;

#[cfg(test)]
mod fixture;

pub use error::{AviError, Result};
pub use layout::{walk, AviLayout};
pub use ops::{patch_copy, patch_in_place, remove_keyframes, remove_keyframes_into, Options};
pub use patch::{IndexBase, Patch, PatchPlan, WriteMode};
