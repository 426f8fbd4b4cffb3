//! Filesystem access used by the generator.

use std::io::{self, Read, Write};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, File};

/// Blocking filesystem operations needed to scaffold a package.
///
/// Paths handed to [`FileSystem::create`], [`FileSystem::read_all`],
/// [`FileSystem::write_all`] and [`FileSystem::make_dir`] are relative to the
/// output root. [`FileSystem::open`] reads caller-supplied input.
pub trait FileSystem {
    /// Opens an existing file for reading.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be opened.
    fn open(&self, path: &Utf8Path) -> io::Result<Box<dyn Read>>;

    /// Creates or truncates a file for writing.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be created.
    fn create(&self, path: &Utf8Path) -> io::Result<Box<dyn Write>>;

    /// Reads a whole file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read.
    fn read_all(&self, path: &Utf8Path) -> io::Result<Vec<u8>>;

    /// Replaces the contents of a file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    fn write_all(&self, path: &Utf8Path, contents: &[u8]) -> io::Result<()>;

    /// Creates a directory. A directory that already exists is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error for any failure other than the directory already
    /// existing.
    fn make_dir(&self, path: &Utf8Path) -> io::Result<()>;
}

/// [`FileSystem`] confined to an output root through a `cap-std` directory
/// capability.
#[derive(Debug)]
pub struct CapFileSystem {
    root: Dir,
    root_path: Utf8PathBuf,
}

impl CapFileSystem {
    /// Opens `root`, creating it first when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error when the root cannot be created or opened.
    pub fn open_ambient(root: &Utf8Path) -> io::Result<Self> {
        let dir = match Dir::open_ambient_dir(root, ambient_authority()) {
            Ok(dir) => dir,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Dir::create_ambient_dir_all(root, ambient_authority())?;
                Dir::open_ambient_dir(root, ambient_authority())?
            }
            Err(err) => return Err(err),
        };
        Ok(Self {
            root: dir,
            root_path: root.to_path_buf(),
        })
    }

    /// Returns the output root this filesystem writes under.
    #[must_use]
    pub fn root_path(&self) -> &Utf8Path {
        &self.root_path
    }
}

impl FileSystem for CapFileSystem {
    fn open(&self, path: &Utf8Path) -> io::Result<Box<dyn Read>> {
        let file = File::open_ambient(path, ambient_authority())?;
        Ok(Box::new(file))
    }

    fn create(&self, path: &Utf8Path) -> io::Result<Box<dyn Write>> {
        let file = self.root.create(path)?;
        Ok(Box::new(file))
    }

    fn read_all(&self, path: &Utf8Path) -> io::Result<Vec<u8>> {
        self.root.read(path)
    }

    fn write_all(&self, path: &Utf8Path, contents: &[u8]) -> io::Result<()> {
        self.root.write(path, contents)
    }

    fn make_dir(&self, path: &Utf8Path) -> io::Result<()> {
        match self.root.create_dir_all(path) {
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => Ok(()),
            other => other,
        }
    }
}
