use std::{
    fs, io,
    io::{Cursor, Write},
    path::{Component, Path, PathBuf},
};

use taster_process::ArchiveWriter;
use zip::{result::ZipError, write::SimpleFileOptions, CompressionMethod, ZipWriter};

pub struct ZipFileArchive {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
}

impl ZipFileArchive {
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
        }
    }
}

impl ArchiveWriter for ZipFileArchive {
    type Error = ZipError;

    fn write(&mut self, path: &str, content: &str) -> Result<(), Self::Error> {
        self.writer.start_file(path, self.options)?;
        self.writer.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_folder(&mut self, name: &str) -> Result<(), Self::Error> {
        self.writer.add_directory(name, self.options)
    }

    fn finalize(self) -> Result<Vec<u8>, Self::Error> {
        Ok(self.writer.finish()?.into_inner())
    }
}

/// Lays the archive entries out under `root` instead of packing them.
/// `finalize` has no bytes to return.
pub struct DirectoryArchive {
    root: PathBuf,
}

impl DirectoryArchive {
    pub fn create(root: impl AsRef<Path>) -> io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn resolve(&self, rel: &str) -> io::Result<PathBuf> {
        let rel = Path::new(rel);
        if !rel.components().all(|c| matches!(c, Component::Normal(_))) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("refusing to write outside archive root: {}", rel.display()),
            ));
        }
        Ok(self.root.join(rel))
    }
}

impl ArchiveWriter for DirectoryArchive {
    type Error = io::Error;

    fn write(&mut self, path: &str, content: &str) -> Result<(), Self::Error> {
        let full = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(full, content)
    }

    fn write_folder(&mut self, name: &str) -> Result<(), Self::Error> {
        fs::create_dir_all(self.resolve(name)?)
    }

    fn finalize(self) -> Result<Vec<u8>, Self::Error> {
        Ok(Vec::new())
    }
}
