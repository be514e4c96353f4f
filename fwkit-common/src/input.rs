//! Models how uploaded binary data is read.

use std::{
    error::Error,
    fmt, io,
    path::{Path, PathBuf},
};

use positioned_io::{RandomAccessFile, ReadAt as _, Size as _};

/// Where the bytes of an upload come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// The bytes are the content of the given file.
    File(PathBuf),
    /// The bytes are read from stdin.
    Stdin,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Stdin => f.write_str("<stdin>"),
        }
    }
}

/// An upload could not be read as binary data.
#[derive(Debug)]
pub struct FileReadError {
    /// The source that failed to be read.
    pub origin: Source,
    /// The underlying I/O error.
    pub err: io::Error,
}

impl fmt::Display for FileReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to read {}: {}", self.origin, self.err)
    }
}

impl Error for FileReadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.err)
    }
}

/// Reads the complete content of the given file as an undifferentiated byte sequence.
///
/// The read happens once; failures are reported to the caller and not retried.
pub fn read_file_bytes(path: impl AsRef<Path>) -> Result<Vec<u8>, FileReadError> {
    let path = path.as_ref();
    let wrap = |err: io::Error| {
        log::warn!("could not read {}: {err}", path.display());
        FileReadError {
            origin: Source::File(path.to_path_buf()),
            err,
        }
    };

    let file = RandomAccessFile::open(path).map_err(wrap)?;
    let len = file
        .size()
        .and_then(|size| size.ok_or_else(|| io::Error::other("cannot get file size")))
        .map_err(wrap)?;
    let len = usize::try_from(len)
        .map_err(|_| wrap(io::Error::other("file does not fit into memory")))?;

    let mut buf = vec![0; len];
    file.read_exact_at(0, &mut buf).map_err(wrap)?;

    log::debug!("read {len} bytes from {}", path.display());

    Ok(buf)
}

/// Reads all of stdin as an undifferentiated byte sequence.
///
/// This should only be called once since it consumes stdin.
pub fn read_stdin_bytes() -> Result<Vec<u8>, FileReadError> {
    let mut buf = Vec::new();
    io::Read::read_to_end(&mut io::stdin(), &mut buf).map_err(|err| FileReadError {
        origin: Source::Stdin,
        err,
    })?;

    Ok(buf)
}
