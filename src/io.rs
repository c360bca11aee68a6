//! Line Sources and Sinks

use std::{
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// Errors reading or writing line files.
#[derive(Debug, Error)]
pub enum LinesError {
    /// Input could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        /// Input path
        path: PathBuf,

        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Output could not be written
    #[error("failed to write {path}: {source}")]
    Write {
        /// Output path
        path: PathBuf,

        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

/// Supplies the complete, ordered input.
pub trait LineSource {
    /// Read every line.
    ///
    /// # Errors
    ///
    /// Returns an error if the lines cannot be read.
    fn read_lines(&self) -> Result<Vec<String>, LinesError>;
}

/// Accepts the complete, ordered output.
pub trait LineSink {
    /// Persist every line.
    ///
    /// # Errors
    ///
    /// Returns an error if the lines cannot be written.
    fn write_lines(&self, lines: &[String]) -> Result<(), LinesError>;
}

/// Reads lines from a text file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineSource for FileSource {
    fn read_lines(&self) -> Result<Vec<String>, LinesError> {
        let contents = fs::read_to_string(&self.path).map_err(|source| LinesError::Read {
            path: self.path.clone(),
            source,
        })?;

        Ok(contents.lines().map(ToString::to_string).collect())
    }
}

/// Writes lines to a text file, replacing previous contents.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Create a sink for the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path being written.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_error(&self, source: std::io::Error) -> LinesError {
        LinesError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl LineSink for FileSink {
    fn write_lines(&self, lines: &[String]) -> Result<(), LinesError> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.write_error(source))?;
        }

        let mut contents = String::with_capacity(lines.iter().map(|line| line.len() + 1).sum());

        for line in lines {
            contents.push_str(line);
            contents.push('\n');
        }

        fs::write(&self.path, contents).map_err(|source| self.write_error(source))
    }
}
