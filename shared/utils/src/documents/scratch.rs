//! Request-scoped storage for uploaded files.

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

use crate::error::{SpecMatchError, SpecMatchResult};

/// A uniquely named temporary directory owned by one request.
///
/// Everything persisted here is removed when the handle is dropped, whether
/// the request succeeded or failed.
#[derive(Debug)]
pub struct ScratchSpace {
    dir: TempDir,
}

impl ScratchSpace {
    /// Creates scratch space under `root`, or the system temp dir when `None`.
    pub fn new(root: Option<&Path>) -> SpecMatchResult<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("specmatch-upload-");
        
        let dir = match root {
            Some(root) => {
                std::fs::create_dir_all(root)?;
                builder.tempdir_in(root)?
            }
            None => builder.tempdir()?,
        };
        
        debug!(path = %dir.path().display(), "Created upload scratch space");
        Ok(Self { dir })
    }
    
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
    
    /// Writes an uploaded file and returns its path.
    ///
    /// Only the final component of `file_name` is used, so client-supplied
    /// names cannot escape the scratch directory. `slot` prefixes the stored
    /// name so two uploads with the same name do not collide.
    pub fn persist(&self, slot: &str, file_name: &str, data: &[u8]) -> SpecMatchResult<PathBuf> {
        let base = Path::new(file_name)
            .file_name()
            .and_then(|name| name.to_str())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| SpecMatchError::validation(slot, format!("Invalid file name: {:?}", file_name)))?;
        
        let path = self.dir.path().join(format!("{}-{}", slot, base));
        std::fs::write(&path, data)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persist_and_cleanup_on_drop() {
        let root = tempfile::tempdir().unwrap();
        let stored;
        let scratch_path;
        {
            let scratch = ScratchSpace::new(Some(root.path())).unwrap();
            scratch_path = scratch.path().to_path_buf();
            stored = scratch.persist("spec", "spec.txt", b"RAM").unwrap();
            
            assert!(stored.starts_with(&scratch_path));
            assert_eq!(std::fs::read(&stored).unwrap(), b"RAM");
        }
        
        assert!(!stored.exists());
        assert!(!scratch_path.exists());
    }

    #[test]
    fn test_persist_strips_directories() {
        let scratch = ScratchSpace::new(None).unwrap();
        let stored = scratch.persist("offers", "../../etc/offers.xlsx", b"x").unwrap();
        
        assert_eq!(stored.parent(), Some(scratch.path()));
        assert!(stored.ends_with("offers-offers.xlsx"));
    }

    #[test]
    fn test_same_name_in_two_slots() {
        let scratch = ScratchSpace::new(None).unwrap();
        let a = scratch.persist("spec", "data.xlsx", b"a").unwrap();
        let b = scratch.persist("offers", "data.xlsx", b"b").unwrap();
        
        assert_ne!(a, b);
        assert_eq!(std::fs::read(&a).unwrap(), b"a");
    }

    #[test]
    fn test_concurrent_spaces_are_distinct() {
        let a = ScratchSpace::new(None).unwrap();
        let b = ScratchSpace::new(None).unwrap();
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn test_rejects_empty_name() {
        let scratch = ScratchSpace::new(None).unwrap();
        assert!(scratch.persist("spec", "", b"x").is_err());
        assert!(scratch.persist("spec", "..", b"x").is_err());
    }
}
