//! Scratch space for configuration archives
//!
//! Layout below the scratch root:
//!
//! ```text
//! <root>/latest/        extracted newest configuration version
//! <root>/previous/      extracted previous configuration version
//! <root>/latest.tar     decompressed archive of the newest version
//! <root>/previous.tar   decompressed archive of the previous version
//! ```
//!
//! The root lives under the user's data directory rather than the system
//! temp dir, so it keeps working where `/tmp` is mounted `noexec`.

use log::{debug, warn};
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::scratch;
use crate::error::{Result, TfeError};

/// Which configuration version a scratch path belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Latest,
    Previous,
}

impl Slot {
    fn dir_name(self) -> &'static str {
        match self {
            Slot::Latest => scratch::LATEST_DIR,
            Slot::Previous => scratch::PREVIOUS_DIR,
        }
    }

    fn archive_name(self) -> &'static str {
        match self {
            Slot::Latest => scratch::LATEST_ARCHIVE,
            Slot::Previous => scratch::PREVIOUS_ARCHIVE,
        }
    }
}

/// Owner of the scratch root; the root is removed when this is dropped
#[derive(Debug)]
pub struct ScratchSpace {
    root: PathBuf,
}

impl ScratchSpace {
    /// Default scratch root
    ///
    /// `<data-local-dir>/tfx-probe/scratch`, falling back to
    /// `$HOME/.tfx-probe/scratch` when the platform has no data dir.
    pub fn default_root() -> Result<PathBuf> {
        if let Some(data) = dirs::data_local_dir() {
            return Ok(data.join(scratch::APP_DIR).join(scratch::ROOT_DIR));
        }

        dirs::home_dir()
            .map(|home| home.join(scratch::HOME_APP_DIR).join(scratch::ROOT_DIR))
            .ok_or_else(|| {
                TfeError::Config("cannot determine a directory for scratch files".to_string())
            })
    }

    /// Take ownership of `root`, clearing anything a previous run left there
    pub fn create(root: PathBuf) -> Result<Self> {
        let space = Self { root };
        space.remove_root()?;
        space.prepare()?;
        debug!("Scratch space at {}", space.root.display());
        Ok(space)
    }

    /// Archive file for a slot
    pub fn archive_path(&self, slot: Slot) -> PathBuf {
        self.root.join(slot.archive_name())
    }

    /// Extraction directory for a slot
    pub fn extract_dir(&self, slot: Slot) -> PathBuf {
        self.root.join(slot.dir_name())
    }

    /// Make sure both extraction directories exist
    pub fn prepare(&self) -> Result<()> {
        for slot in [Slot::Latest, Slot::Previous] {
            let dir = self.extract_dir(slot);
            fs::create_dir_all(&dir).map_err(|e| {
                TfeError::Io(format!("Failed to create '{}': {}", dir.display(), e))
            })?;
        }
        Ok(())
    }

    /// Empty both extraction directories and drop both archives
    pub fn reset(&self) -> Result<()> {
        for slot in [Slot::Latest, Slot::Previous] {
            let dir = self.extract_dir(slot);
            remove_if_present(&dir, true)?;
            fs::create_dir_all(&dir).map_err(|e| {
                TfeError::Io(format!("Failed to create '{}': {}", dir.display(), e))
            })?;
            remove_if_present(&self.archive_path(slot), false)?;
        }
        Ok(())
    }

    fn remove_root(&self) -> Result<()> {
        remove_if_present(&self.root, true)
    }

    /// Remove the scratch root and everything below it
    pub fn cleanup(&self) {
        match self.remove_root() {
            Ok(()) => debug!("Removed scratch space {}", self.root.display()),
            Err(e) => warn!("{}", e),
        }
    }
}

impl Drop for ScratchSpace {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn remove_if_present(path: &Path, dir: bool) -> Result<()> {
    let removed = if dir {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };

    match removed {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(TfeError::Io(format!(
            "Failed to remove '{}': {}",
            path.display(),
            e
        ))),
    }
}

/// Unpack a plain (already decompressed) tar archive into `dest`
pub fn extract_archive(archive: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive)
        .map_err(|e| TfeError::Io(format!("Failed to open '{}': {}", archive.display(), e)))?;

    let mut tar = tar::Archive::new(file);
    tar.unpack(dest).map_err(|e| {
        TfeError::Io(format!(
            "could not unpack '{}' into '{}': {}",
            archive.display(),
            dest.display(),
            e
        ))
    })?;

    debug!("Extracted {} into {}", archive.display(), dest.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_tar(path: &Path, files: &[(&str, &str)]) {
        let file = File::create(path).unwrap();
        let mut builder = tar::Builder::new(file);
        for (name, content) in files {
            let mut header = tar::Header::new_gnu();
            header.set_size(content.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder
                .append_data(&mut header, name, content.as_bytes())
                .unwrap();
        }
        builder.finish().unwrap();
    }

    #[test]
    fn test_create_lays_out_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("scratch");
        let space = ScratchSpace::create(root.clone()).unwrap();

        assert!(space.extract_dir(Slot::Latest).is_dir());
        assert!(space.extract_dir(Slot::Previous).is_dir());
        assert_eq!(space.archive_path(Slot::Latest), root.join("latest.tar"));
        assert_eq!(space.archive_path(Slot::Previous), root.join("previous.tar"));
    }

    #[test]
    fn test_create_clears_leftovers() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("scratch");
        fs::create_dir_all(root.join("latest")).unwrap();
        fs::write(root.join("latest").join("stale.tf"), "old").unwrap();

        let space = ScratchSpace::create(root).unwrap();
        assert!(!space.extract_dir(Slot::Latest).join("stale.tf").exists());
    }

    #[test]
    fn test_reset_empties_dirs_and_archives() {
        let tmp = tempfile::tempdir().unwrap();
        let space = ScratchSpace::create(tmp.path().join("scratch")).unwrap();

        fs::write(space.extract_dir(Slot::Previous).join("main.tf"), "x").unwrap();
        fs::write(space.archive_path(Slot::Latest), "tar").unwrap();

        space.reset().unwrap();
        assert!(space.extract_dir(Slot::Previous).is_dir());
        assert_eq!(
            fs::read_dir(space.extract_dir(Slot::Previous)).unwrap().count(),
            0
        );
        assert!(!space.archive_path(Slot::Latest).exists());
    }

    #[test]
    fn test_drop_removes_root() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("scratch");
        {
            let space = ScratchSpace::create(root.clone()).unwrap();
            fs::write(space.archive_path(Slot::Latest), "tar").unwrap();
        }
        assert!(!root.exists());
    }

    #[test]
    fn test_extract_archive() {
        let tmp = tempfile::tempdir().unwrap();
        let space = ScratchSpace::create(tmp.path().join("scratch")).unwrap();
        let archive = space.archive_path(Slot::Latest);
        write_tar(&archive, &[("main.tf", "resource {}\n"), ("modules/net.tf", "# net\n")]);

        let dest = space.extract_dir(Slot::Latest);
        extract_archive(&archive, &dest).unwrap();

        assert_eq!(
            fs::read_to_string(dest.join("main.tf")).unwrap(),
            "resource {}\n"
        );
        assert_eq!(
            fs::read_to_string(dest.join("modules").join("net.tf")).unwrap(),
            "# net\n"
        );
    }

    #[test]
    fn test_extract_missing_archive_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = extract_archive(&tmp.path().join("nope.tar"), tmp.path()).unwrap_err();
        assert!(matches!(err, TfeError::Io(_)));
    }
}
