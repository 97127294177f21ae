//! Boot artifact checks.
//!
//! Only presence and size are checked. Contents are never inspected.

use std::path::Path;

use log::debug;

use crate::{
    config::FrontendConfig,
    error::{Artifact, ArtifactFault, LoadError, LoadResult},
    hardware::ConsoleVariant,
    probe::FileProbe,
};

pub const BIOS9_SIZE: u64 = 0x1000;
pub const BIOS7_SIZE: u64 = 0x4000;
pub const DSI_BIOS_SIZE: u64 = 0x10000;
/// DS firmware sizes that boot on their own.
pub const FIRMWARE_SIZES: [u64; 2] = [0x40000, 0x80000];
/// 128KB DS firmware dumps (e.g. from a DS Lite) cannot boot; DSi firmware is
/// always this size.
pub const FIRMWARE_SIZE_UNBOOTABLE: u64 = 0x20000;
pub const DSI_FIRMWARE_SIZE: u64 = 0x20000;

/// Size of `path`, or `Missing` if it is unset or unreadable.
fn probe_size<P: FileProbe + ?Sized>(
    probe: &P,
    path: Option<&Path>,
    artifact: Artifact,
) -> LoadResult<u64> {
    let Some(path) = path else {
        return Err(LoadError::artifact(artifact, ArtifactFault::Missing));
    };
    match probe.file_size(path) {
        Ok(len) => Ok(len),
        Err(e) => {
            debug!("{artifact} at {}: {e}", path.display());
            Err(LoadError::artifact(artifact, ArtifactFault::Missing))
        }
    }
}

fn check_exact<P: FileProbe + ?Sized>(
    probe: &P,
    path: Option<&Path>,
    artifact: Artifact,
    expected: u64,
) -> LoadResult {
    let len = probe_size(probe, path, artifact)?;
    if len != expected {
        return Err(LoadError::artifact(artifact, ArtifactFault::WrongSize));
    }
    Ok(())
}

pub fn verify_ds_bios<P: FileProbe + ?Sized>(config: &FrontendConfig, probe: &P) -> LoadResult {
    check_exact(probe, config.bios.bios9.as_deref(), Artifact::Bios9, BIOS9_SIZE)?;
    check_exact(probe, config.bios.bios7.as_deref(), Artifact::Bios7, BIOS7_SIZE)
}

pub fn verify_dsi_bios<P: FileProbe + ?Sized>(config: &FrontendConfig, probe: &P) -> LoadResult {
    check_exact(
        probe,
        config.bios.dsi_bios9.as_deref(),
        Artifact::DsiBios9,
        DSI_BIOS_SIZE,
    )?;
    check_exact(
        probe,
        config.bios.dsi_bios7.as_deref(),
        Artifact::DsiBios7,
        DSI_BIOS_SIZE,
    )
}

pub fn verify_ds_firmware<P: FileProbe + ?Sized>(
    config: &FrontendConfig,
    probe: &P,
) -> LoadResult {
    let len = probe_size(probe, config.bios.firmware.as_deref(), Artifact::Firmware)?;
    if len == FIRMWARE_SIZE_UNBOOTABLE {
        return Err(LoadError::artifact(
            Artifact::Firmware,
            ArtifactFault::NotBootable,
        ));
    }
    if !FIRMWARE_SIZES.contains(&len) {
        return Err(LoadError::artifact(
            Artifact::Firmware,
            ArtifactFault::WrongSize,
        ));
    }
    Ok(())
}

pub fn verify_dsi_firmware<P: FileProbe + ?Sized>(
    config: &FrontendConfig,
    probe: &P,
) -> LoadResult {
    check_exact(
        probe,
        config.bios.dsi_firmware.as_deref(),
        Artifact::DsiFirmware,
        DSI_FIRMWARE_SIZE,
    )
}

pub fn verify_dsi_nand<P: FileProbe + ?Sized>(config: &FrontendConfig, probe: &P) -> LoadResult {
    probe_size(probe, config.bios.dsi_nand.as_deref(), Artifact::DsiNand).map(|_| ())
}

/// Run every check required by the configured console variant, stopping at the
/// first failure.
pub fn verify_boot<P: FileProbe + ?Sized>(config: &FrontendConfig, probe: &P) -> LoadResult {
    verify_ds_bios(config, probe)?;

    match config.console_variant {
        ConsoleVariant::Dsi => {
            verify_dsi_bios(config, probe)?;
            verify_dsi_firmware(config, probe)?;
            verify_dsi_nand(config, probe)
        }
        ConsoleVariant::Ds => verify_ds_firmware(config, probe),
    }
}
