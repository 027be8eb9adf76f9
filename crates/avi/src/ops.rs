//! Stream and file level entry points.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, Read, Seek, Write};
use std::path::Path;

use riff::BinaryView;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::Result;
use crate::layout;
use crate::patch::{self, PatchPlan, WriteMode};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    pub mode: WriteMode,
    /// Resolve every target but write nothing.
    pub dry_run: bool,
}

/// Walks `source` and plans the patches without touching it.
pub fn plan_stream<R: Read + Seek>(source: R, mode: WriteMode) -> Result<PatchPlan> {
    let mut view = BinaryView::new(source);
    let layout = layout::walk(&mut view)?;
    debug!(
        movi_offset = layout.movi_offset,
        index_start = layout.index_start,
        index_len = layout.index_len(),
        "layout"
    );
    patch::plan(&mut view, &layout, mode)
}

/// Blanks all key frames but the first, in place.
pub fn remove_keyframes<S: Read + Write + Seek>(stream: S, options: &Options) -> Result<PatchPlan> {
    let mut view = BinaryView::new(stream);
    let layout = layout::walk(&mut view)?;
    let plan = patch::plan(&mut view, &layout, options.mode)?;
    if !options.dry_run {
        plan.apply(&mut view)?;
    }
    Ok(plan)
}

/// Plans against `source` and writes the patches to `target`, which must
/// hold the same bytes as `source`.
pub fn remove_keyframes_into<R, W>(source: R, target: W, options: &Options) -> Result<PatchPlan>
where
    R: Read + Seek,
    W: Write + Seek,
{
    let plan = plan_stream(source, options.mode)?;
    if !options.dry_run {
        plan.apply(&mut BinaryView::new(target))?;
    }
    Ok(plan)
}

pub fn patch_in_place(path: &Path, options: &Options) -> Result<PatchPlan> {
    let file = OpenOptions::new()
        .read(true)
        .write(!options.dry_run)
        .open(path)?;
    let plan = remove_keyframes_into(BufReader::new(&file), &file, options)?;
    log_plan(path, &plan, options);
    Ok(plan)
}

/// Copies `source` to `target` and patches the copy.
///
/// The copy is staged next to `target` and only renamed into place once every
/// patch is written, so a failed run leaves no target behind.
pub fn patch_copy(source: &Path, target: &Path, options: &Options) -> Result<PatchPlan> {
    let mut input = File::open(source)?;
    if options.dry_run {
        let plan = plan_stream(BufReader::new(&input), options.mode)?;
        log_plan(source, &plan, options);
        return Ok(plan);
    }

    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)?;
    let copied = io::copy(&mut input, staged.as_file_mut())?;
    debug!(copied, staged = %staged.path().display(), "copied source");
    fs::set_permissions(staged.path(), input.metadata()?.permissions())?;

    input.rewind()?;
    let plan = remove_keyframes_into(BufReader::new(&input), staged.as_file(), options)?;
    staged.persist(target).map_err(|err| err.error)?;

    log_plan(target, &plan, options);
    Ok(plan)
}

fn log_plan(path: &Path, plan: &PatchPlan, options: &Options) {
    let blank = plan.patches.iter().filter(|p| p.already_blank).count();
    info!(
        path = %path.display(),
        entries = plan.entries,
        keyframes = plan.keyframes,
        patched = plan.patches.len(),
        already_blank = blank,
        absolute = plan.count(patch::IndexBase::Absolute),
        movi_relative = plan.count(patch::IndexBase::MoviList),
        movi_data_relative = plan.count(patch::IndexBase::MoviData),
        dry_run = options.dry_run,
        "removed key frames"
    );
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::fixture::{self, Offsets};

    #[test]
    fn test_remove_keyframes_in_memory() -> Result<()> {
        let avi = fixture::build(&fixture::three_keyframes(), Offsets::MoviList);
        let mut cursor = Cursor::new(avi.bytes.clone());

        let plan = remove_keyframes(&mut cursor, &Options::default())?;
        assert_eq!(plan.patches.len(), 2);

        let out = cursor.into_inner();
        assert_eq!(out.len(), avi.bytes.len());
        assert_eq!(&out[avi.chunk_offsets[2] as usize..][..4], b"JUNK");
        Ok(())
    }

    #[test]
    fn test_into_matches_in_place() -> Result<()> {
        for offsets in [Offsets::Absolute, Offsets::MoviList] {
            let avi = fixture::build(&fixture::three_keyframes(), offsets);

            let mut in_place = Cursor::new(avi.bytes.clone());
            remove_keyframes(&mut in_place, &Options::default())?;

            let mut copy = Cursor::new(avi.bytes.clone());
            remove_keyframes_into(Cursor::new(&avi.bytes), &mut copy, &Options::default())?;

            assert_eq!(in_place.into_inner(), copy.into_inner());
        }
        Ok(())
    }

    #[test]
    fn test_dry_run_writes_nothing() -> Result<()> {
        let avi = fixture::build(&fixture::three_keyframes(), Offsets::Absolute);
        let mut cursor = Cursor::new(avi.bytes.clone());
        let options = Options {
            dry_run: true,
            ..Options::default()
        };

        let plan = remove_keyframes(&mut cursor, &options)?;
        assert_eq!(plan.patches.len(), 2);
        assert_eq!(cursor.into_inner(), avi.bytes);
        Ok(())
    }

    #[test]
    fn test_invalid_index_writes_nothing() {
        let frames = fixture::three_keyframes();
        let mut index = fixture::index_for(&frames, Offsets::MoviList);
        index[3].offset = 100_000;
        let avi = fixture::assemble(&frames, &index);
        let mut cursor = Cursor::new(avi.bytes.clone());

        assert!(remove_keyframes(&mut cursor, &Options::default()).is_err());
        assert_eq!(cursor.into_inner(), avi.bytes);
    }
}
