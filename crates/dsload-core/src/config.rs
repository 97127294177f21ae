use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::hardware::ConsoleVariant;

#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
/// Boot artifact locations.
pub struct BiosPaths {
    pub bios9: Option<PathBuf>,
    pub bios7: Option<PathBuf>,
    pub firmware: Option<PathBuf>,
    pub dsi_bios9: Option<PathBuf>,
    pub dsi_bios7: Option<PathBuf>,
    pub dsi_firmware: Option<PathBuf>,
    pub dsi_nand: Option<PathBuf>,
}

/// Frontend settings the load core reads. The core never writes them.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FrontendConfig {
    pub console_variant: ConsoleVariant,

    /// Store save files in `save_dir` instead of next to the ROM.
    pub save_dir_enabled: bool,
    pub save_dir: Option<PathBuf>,

    pub direct_boot: bool,
    /// Move the cartridge save next to the savestate on save/load state.
    pub savestate_relocates_save_data: bool,
    pub cheats_enabled: bool,

    pub bios: BiosPaths,
}

impl FrontendConfig {
    /// The custom save directory, if the user enabled one.
    pub fn custom_save_dir(&self) -> Option<&PathBuf> {
        if self.save_dir_enabled {
            self.save_dir.as_ref()
        } else {
            None
        }
    }
}
