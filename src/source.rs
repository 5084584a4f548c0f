use std::fs::File;
use std::path::Path;

use memmap2::{Mmap, MmapOptions};

use crate::error::{BrcError, Result};

/// Read-only view of a whole input file.
///
/// Zero-length files are never mapped; they read back as an empty buffer.
pub struct Source {
    mmap: Option<Mmap>,
}

impl Source {
    pub fn open(file_path: &Path) -> Result<Self> {
        let file: File = File::open(file_path)
            .map_err(| source | BrcError::Open { path: file_path.to_path_buf(), source })?;

        let size = file
            .metadata()
            .map_err(| source | BrcError::Stat { path: file_path.to_path_buf(), source })?
            .len();

        if size == 0 {
            return Ok(Self { mmap: None });
        }

        // SAFETY: the mapping is read-only and lives as long as `Source`. The
        // input must not be truncated or rewritten by another process while
        // a run is in progress.
        let mmap = unsafe { MmapOptions::new().populate().map(&file) }
            .map_err(| source | BrcError::Map { path: file_path.to_path_buf(), source })?;

        #[cfg(unix)]
        if let Err(error) = mmap.advise(memmap2::Advice::Sequential) {
            tracing::warn!(%error, "madvise(SEQUENTIAL) rejected");
        }

        Ok(Self { mmap: Some(mmap) })
    }

    pub fn bytes(&self) -> &[u8] {
        match &self.mmap {
            Some(mmap) => &mmap[..],
            None => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
