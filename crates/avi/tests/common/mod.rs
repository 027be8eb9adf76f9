#![allow(dead_code)]

use std::path::{Path, PathBuf};

#[path = "../../src/fixture.rs"]
mod fixture;

pub use fixture::*;

pub fn write_sample(dir: &Path, name: &str, avi: &SampleAvi) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, &avi.bytes).expect("write sample");
    path
}
