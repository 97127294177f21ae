//! Savestate load/save with an in-memory backup for rollback and undo.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{error, info, warn};

use crate::{
    config::FrontendConfig,
    error::{LoadError, LoadResult},
    hardware::Slot,
    machine::Machine,
    probe::FileProbe,
    save_path::colocated_save_path,
    session::Session,
    snapshot::{Snapshot, SnapshotWriter},
};

/// Base name used for savestates when no DS cartridge is loaded.
const FIRMWARE_STATE_STEM: &str = "firmware";

/// Savestate file for numbered slot `slot` of `rom`.
///
/// States go into the custom save directory when it is enabled and exists,
/// otherwise next to the ROM.
pub fn savestate_name<P: FileProbe + ?Sized>(
    config: &FrontendConfig,
    probe: &P,
    rom: Option<&Path>,
    slot: u32,
) -> PathBuf {
    let save_dir = config
        .custom_save_dir()
        .filter(|dir| probe.dir_exists(dir));

    let base = match (rom, save_dir) {
        (None, Some(dir)) => dir.join(FIRMWARE_STATE_STEM),
        (None, None) => PathBuf::from(FIRMWARE_STATE_STEM),
        (Some(rom), Some(dir)) => match rom.file_stem() {
            Some(stem) => dir.join(stem),
            None => dir.join(FIRMWARE_STATE_STEM),
        },
        (Some(rom), None) => rom.with_extension(""),
    };

    let mut name = base.into_os_string();
    name.push(format!(".ml{slot}"));
    PathBuf::from(name)
}

impl<M: Machine, P: FileProbe> Session<M, P> {
    /// Load the savestate at `path`.
    ///
    /// The live state is backed up first and becomes the undo target whether or
    /// not the load succeeds. If the file cannot be read or the machine rejects
    /// it, the backup is applied again so the machine ends up where it started,
    /// and `SnapshotReadFailed` is returned.
    pub fn load_state(&mut self, path: &Path) -> LoadResult {
        let old_gba_fingerprint = self.machine.secondary_cart_fingerprint();

        let mut backup = Snapshot::new();
        self.machine.capture_snapshot(&mut backup);

        let applied = match Snapshot::read(path) {
            Ok(state) => self.machine.apply_snapshot(&state),
            Err(e) => {
                warn!("Could not load savestate: {e}");
                false
            }
        };

        if !applied {
            if !self.machine.apply_snapshot(&backup) {
                error!("Restoring the pre-load backup failed");
            }
            self.backup = Some(backup);
            return Err(LoadError::SnapshotReadFailed);
        }

        self.backup = Some(backup);

        let nds = self.paths.slot_mut(Slot::Nds);
        nds.prev_save = nds.save.clone();

        if self.config.savestate_relocates_save_data && nds.image.is_some() {
            let save = colocated_save_path(path);
            self.machine.relocate_save_data(&save, false);
            nds.save = Some(save);
        }

        // a state taken with a different GBA cart brings that cart's ROM header
        // along; never reload the old image on reset or write to its save
        if self.machine.secondary_cart_inserted()
            && self.machine.secondary_cart_fingerprint() != old_gba_fingerprint
        {
            warn!("Savestate replaced the GBA cartridge (ROM header only)");
            self.paths.slot_mut(Slot::Gba).clear();
        }

        self.savestate_loaded = true;
        info!("Loaded state from {}", path.display());
        Ok(())
    }

    /// Write the live state to `path`.
    pub fn save_state(&mut self, path: &Path) -> LoadResult {
        let writer = match SnapshotWriter::create(path) {
            Ok(w) => w,
            Err(e) => {
                warn!("Could not save state: {e}");
                return Err(LoadError::SnapshotWriteFailed);
            }
        };

        let mut state = Snapshot::new();
        self.machine.capture_snapshot(&mut state);
        if let Err(e) = writer.commit(&state) {
            warn!("Could not save state: {e}");
            return Err(LoadError::SnapshotWriteFailed);
        }

        if self.config.savestate_relocates_save_data && self.paths.has_image(Slot::Nds) {
            let save = colocated_save_path(path);
            self.machine.relocate_save_data(&save, true);
            self.paths.slot_mut(Slot::Nds).save = Some(save);
        }

        info!("Saved state to {}", path.display());
        Ok(())
    }

    /// Go back to the state from before the last savestate load.
    ///
    /// Does nothing if no savestate was loaded since the last cartridge or
    /// firmware load. There is no fallback if the backup is rejected.
    ///
    /// Only the machine state and the DS save path are rolled back. GBA paths
    /// cleared because the loaded state carried a different GBA cartridge stay
    /// cleared, even though the old cartridge is back in the machine.
    pub fn undo_state_load(&mut self) {
        if !self.savestate_loaded {
            return;
        }

        if let Some(backup) = &self.backup
            && !self.machine.apply_snapshot(backup)
        {
            error!("Undo failed: backup state was rejected");
        }

        let nds = self.paths.slot_mut(Slot::Nds);
        if nds.image.is_some() {
            nds.save = nds.prev_save.clone();
            if let Some(save) = &nds.save {
                self.machine.relocate_save_data(save, false);
            }
        }

        info!("Undid savestate load");
    }

    /// Savestate file for numbered slot `slot`, e.g. `game.ml1`.
    pub fn savestate_name(&self, slot: u32) -> PathBuf {
        savestate_name(&self.config, &self.probe, self.paths.image(Slot::Nds), slot)
    }

    pub fn savestate_exists(&self, slot: u32) -> bool {
        self.probe.file_exists(&self.savestate_name(slot))
    }

    /// Import a raw save file into the running DS cartridge. Returns how many
    /// bytes differed from the save already in use.
    pub fn import_save_data(&mut self, path: &Path) -> LoadResult<usize> {
        let data = fs::read(path)?;
        let diff = self.machine.import_save_data(&data);
        info!(
            "Imported {} bytes of save data from {} ({diff} changed)",
            data.len(),
            path.display()
        );
        Ok(diff)
    }
}
