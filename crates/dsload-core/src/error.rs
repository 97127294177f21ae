use std::{fmt, io, path::PathBuf};

use thiserror::Error;

/// Boot artifact checked by the verification pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Artifact {
    Bios9,
    Bios7,
    DsiBios9,
    DsiBios7,
    Firmware,
    DsiFirmware,
    DsiNand,
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Artifact::Bios9 => "ARM9 BIOS",
            Artifact::Bios7 => "ARM7 BIOS",
            Artifact::DsiBios9 => "DSi ARM9 BIOS",
            Artifact::DsiBios7 => "DSi ARM7 BIOS",
            Artifact::Firmware => "firmware",
            Artifact::DsiFirmware => "DSi firmware",
            Artifact::DsiNand => "DSi NAND",
        };
        f.write_str(name)
    }
}

/// Why an artifact failed verification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtifactFault {
    Missing,
    WrongSize,
    /// Present, but too small to boot on its own (128KB DS firmware).
    NotBootable,
}

impl fmt::Display for ArtifactFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            ArtifactFault::Missing => "is missing",
            ArtifactFault::WrongSize => "has the wrong size",
            ArtifactFault::NotBootable => "is not bootable",
        };
        f.write_str(reason)
    }
}

/// Outcome of a failed load, verification or snapshot operation.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("{artifact} {fault}")]
    Artifact {
        artifact: Artifact,
        fault: ArtifactFault,
    },

    #[error("save directory {} does not exist", .0.display())]
    SaveDirectoryMissing(PathBuf),

    #[error("GBA cartridges cannot be loaded in DSi mode")]
    UnsupportedCombination,

    #[error("the cartridge could not be loaded")]
    CartridgeLoadFailed,

    #[error("could not read savestate")]
    SnapshotReadFailed,

    #[error("could not write savestate")]
    SnapshotWriteFailed,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl LoadError {
    pub(crate) const fn artifact(artifact: Artifact, fault: ArtifactFault) -> Self {
        LoadError::Artifact { artifact, fault }
    }

    /// Returns whether this is the "firmware present but not bootable" signal,
    /// which callers recover from by forcing direct boot.
    pub fn is_not_bootable(&self) -> bool {
        matches!(
            self,
            LoadError::Artifact {
                fault: ArtifactFault::NotBootable,
                ..
            }
        )
    }
}

pub type LoadResult<T = ()> = Result<T, LoadError>;
