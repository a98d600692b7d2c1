use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use log::trace;

use crate::error::ReadError;

pub const BLOCK_FILE: &str = "block.ssz_snappy";
pub const PRE_STATE_FILE: &str = "pre.ssz_snappy";
// Optional, its absence means the transition must fail
pub const POST_STATE_FILE: &str = "post.ssz_snappy";

/// One fixture directory. Files are read on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    name: String,
    path: PathBuf,
}

impl TestCase {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_file(&self, name: &str) -> Result<Vec<u8>, ReadError> {
        let path = self.path.join(name);
        match fs::read(&path) {
            Ok(bytes) => {
                trace!("read {} bytes from {}", bytes.len(), path.display());
                Ok(bytes)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(ReadError::Absent(path)),
            Err(source) => Err(ReadError::Io { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_file_absent_and_io() {
        let dir = tempfile::tempdir().unwrap();
        let case = TestCase::new("case_0", dir.path());

        fs::write(dir.path().join(BLOCK_FILE), [1u8, 2, 3]).unwrap();
        assert_eq!(case.read_file(BLOCK_FILE).unwrap(), vec![1, 2, 3]);

        assert!(matches!(
            case.read_file(POST_STATE_FILE),
            Err(ReadError::Absent(_))
        ));

        // A directory exists but cannot be read as a file
        fs::create_dir(dir.path().join(PRE_STATE_FILE)).unwrap();
        assert!(matches!(
            case.read_file(PRE_STATE_FILE),
            Err(ReadError::Io { .. })
        ));
    }
}
