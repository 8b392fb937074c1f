use crate::error::AudioResult;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Byte length of one produced file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSize {
    /// File path as given
    pub path: PathBuf,
    /// Size on disk in bytes
    pub bytes: u64,
}

impl FileSize {
    /// Read the size of `path`
    pub fn of<P: AsRef<Path>>(path: P) -> AudioResult<Self> {
        let path = path.as_ref();
        let bytes = fs::metadata(path)?.len();
        Ok(FileSize {
            path: path.to_path_buf(),
            bytes,
        })
    }

    /// Size in kilobytes (1024 bytes)
    pub fn kilobytes(&self) -> f64 {
        self.bytes as f64 / 1024.0
    }
}

impl fmt::Display for FileSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} bytes ({:.2} KB)",
            self.path.display(),
            self.bytes,
            self.kilobytes()
        )
    }
}

/// Sizes of each file, in the order given
pub fn file_sizes<I, P>(paths: I) -> AudioResult<Vec<FileSize>>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    paths.into_iter().map(FileSize::of).collect()
}

/// Print a size listing to stdout
pub fn print_sizes(sizes: &[FileSize]) {
    println!("File Size Comparison:");
    for size in sizes {
        println!("{size}");
    }
}
