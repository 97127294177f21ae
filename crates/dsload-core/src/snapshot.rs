//! Savestate container.
//!
//! Layout (little-endian):
//!   [0..4]   Magic: "DSLS"
//!   [4..8]   Version: u32
//!   [8..12]  Payload size: u32
//!   [12..16] Reserved, written as zero
//!   [16..]   Machine payload, opaque to this crate

use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use thiserror::Error;

const MAGIC: &[u8; 4] = b"DSLS";
pub const SNAPSHOT_VERSION: u32 = 1;
const HEADER_SIZE: usize = 16;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("savestate too small for header ({0} bytes)")]
    TooSmall(usize),

    #[error("invalid savestate magic")]
    BadMagic,

    #[error("savestate version {0} is newer than supported ({SNAPSHOT_VERSION})")]
    UnsupportedVersion(u32),

    #[error("savestate truncated: header says {expected} bytes, file has {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("savestate payload of {0} bytes does not fit the header")]
    PayloadTooLarge(usize),
}

/// One machine state capture.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    payload: Vec<u8>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn set_payload(&mut self, payload: Vec<u8>) {
        self.payload = payload;
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, SnapshotError> {
        if data.len() < HEADER_SIZE {
            return Err(SnapshotError::TooSmall(data.len()));
        }
        if &data[0..4] != MAGIC {
            return Err(SnapshotError::BadMagic);
        }

        let version = read_u32(data, 4);
        if version > SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(version));
        }

        let expected = read_u32(data, 8) as usize;
        let body = &data[HEADER_SIZE..];
        if body.len() < expected {
            return Err(SnapshotError::Truncated {
                expected,
                actual: body.len(),
            });
        }

        Ok(Self {
            payload: body[..expected].to_vec(),
        })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        let len = payload_len(self.payload.len())?;
        let mut out = Vec::with_capacity(HEADER_SIZE + self.payload.len());
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&SNAPSHOT_VERSION.to_le_bytes());
        out.extend_from_slice(&len.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&self.payload);
        Ok(out)
    }

    /// Read and validate a savestate file.
    pub fn read(path: &Path) -> Result<Self, SnapshotError> {
        let data = fs::read(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&data)
    }
}

fn payload_len(len: usize) -> Result<u32, SnapshotError> {
    u32::try_from(len).map_err(|_| SnapshotError::PayloadTooLarge(len))
}

fn read_u32(data: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}

/// Savestate file opened for writing.
///
/// The file is created (and truncated) on open so that an unwritable path is
/// reported before the machine state is captured.
#[derive(Debug)]
pub struct SnapshotWriter {
    file: File,
    path: PathBuf,
}

impl SnapshotWriter {
    pub fn create(path: &Path) -> Result<Self, SnapshotError> {
        let file = File::create(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn commit(mut self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        let bytes = snapshot.to_bytes()?;
        self.file
            .write_all(&bytes)
            .and_then(|()| self.file.flush())
            .map_err(|source| SnapshotError::Io {
                path: self.path.clone(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(payload: &[u8]) -> Snapshot {
        let mut s = Snapshot::new();
        s.set_payload(payload.to_vec());
        s
    }

    #[test]
    fn written_file_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.ml1");

        let writer = SnapshotWriter::create(&path).unwrap();
        writer.commit(&snap(b"machine")).unwrap();

        assert_eq!(Snapshot::read(&path).unwrap().payload(), b"machine");
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            Snapshot::from_bytes(b"short"),
            Err(SnapshotError::TooSmall(5))
        ));
        assert!(matches!(
            Snapshot::from_bytes(&[0u8; 32]),
            Err(SnapshotError::BadMagic)
        ));
    }

    #[test]
    fn rejects_truncated_payload() {
        let mut bytes = snap(&[1, 2, 3, 4]).to_bytes().unwrap();
        bytes.truncate(bytes.len() - 2);
        assert!(matches!(
            Snapshot::from_bytes(&bytes),
            Err(SnapshotError::Truncated {
                expected: 4,
                actual: 2
            })
        ));
    }

    #[test]
    fn rejects_newer_version() {
        let mut bytes = snap(&[]).to_bytes().unwrap();
        bytes[4..8].copy_from_slice(&(SNAPSHOT_VERSION + 1).to_le_bytes());
        assert!(matches!(
            Snapshot::from_bytes(&bytes),
            Err(SnapshotError::UnsupportedVersion(_))
        ));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn oversized_payload_length_is_refused() {
        let len = u32::MAX as usize + 1;
        assert!(matches!(
            payload_len(len),
            Err(SnapshotError::PayloadTooLarge(n)) if n == len
        ));
        assert_eq!(payload_len(u32::MAX as usize).unwrap(), u32::MAX);
    }

    #[test]
    fn create_fails_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("state.ml1");
        assert!(matches!(
            SnapshotWriter::create(&path),
            Err(SnapshotError::Io { .. })
        ));
    }
}
