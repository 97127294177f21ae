//! Cartridge load, unload and reset.

use std::path::Path;

use log::{info, warn};

use crate::{
    error::{LoadError, LoadResult},
    hardware::{ConsoleVariant, Slot},
    machine::Machine,
    probe::FileProbe,
    session::Session,
    verify::verify_boot,
};

impl<M: Machine, P: FileProbe> Session<M, P> {
    /// Verify boot artifacts and work out whether direct boot is required.
    ///
    /// Unbootable DS firmware is not an error here: the caller just has to skip
    /// the firmware boot sequence.
    fn verify_for_boot(&self) -> LoadResult<bool> {
        let mut direct_boot = self.config.direct_boot;
        match verify_boot(&self.config, &self.probe) {
            Ok(()) => {}
            Err(e) if e.is_not_bootable() => {
                info!("Firmware is not bootable, forcing direct boot");
                direct_boot = true;
            }
            Err(e) => return Err(e),
        }
        Ok(direct_boot)
    }

    /// DSi mode has no GBA slot.
    fn drop_gba_cart(&mut self) {
        self.machine.eject_secondary_cartridge();
        self.paths.slot_mut(Slot::Gba).clear();
    }

    /// Load the cartridge image at `path` into `slot`.
    ///
    /// On failure the image and save paths of both slots are exactly what they
    /// were before the call.
    pub fn load_cartridge(&mut self, path: &Path, slot: Slot) -> LoadResult {
        let variant = self.config.console_variant;
        if !variant.supports_slot(slot) {
            return Err(LoadError::UnsupportedCombination);
        }

        let direct_boot = self.verify_for_boot()?;

        let nds_checkpoint = self.paths.checkpoint(Slot::Nds);
        let gba_checkpoint = self.paths.checkpoint(Slot::Gba);

        if variant == ConsoleVariant::Dsi {
            self.drop_gba_cart();
        }

        self.paths.slot_mut(slot).image = Some(path.to_path_buf());

        // the GBA save path is refreshed too so an inserted GBA cart keeps
        // working across the DS cart change
        if let Err(e) = self
            .setup_save_path(Slot::Nds)
            .and_then(|()| self.setup_save_path(Slot::Gba))
        {
            self.paths.restore(nds_checkpoint);
            self.paths.restore(gba_checkpoint);
            return Err(e);
        }

        self.machine.set_console_variant(variant);

        let image = path;
        let save = self.paths.save(slot).map(Path::to_path_buf);
        let loaded = match slot {
            Slot::Nds => self
                .machine
                .load_cartridge(image, save.as_deref(), direct_boot),
            Slot::Gba => self.machine.load_secondary_cartridge(image, save.as_deref()),
        };

        if !loaded {
            warn!(
                "Failed to load {} into {slot:?} slot, reverting",
                path.display()
            );
            self.paths.restore(nds_checkpoint);
            self.paths.restore(gba_checkpoint);
            return Err(LoadError::CartridgeLoadFailed);
        }

        self.savestate_loaded = false;
        self.backup = None;

        if slot == Slot::Nds {
            self.reload_cheats();
            self.reattach_gba_cart();
        }

        let paths = self.paths.slot_mut(slot);
        paths.prev_save = paths.save.clone();

        info!(
            "Loaded {} into {slot:?} slot (direct boot: {direct_boot})",
            path.display()
        );
        Ok(())
    }

    /// Reinsert the registered GBA cartridge after the DS side was reloaded.
    /// Failure is logged only.
    fn reattach_gba_cart(&mut self) {
        let Some(image) = self.paths.image(Slot::Gba) else {
            return;
        };
        let save = self.paths.save(Slot::Gba);
        if !self.machine.load_secondary_cartridge(image, save) {
            warn!("Could not reinsert GBA cartridge {}", image.display());
        }
    }

    /// Remove the cartridge from `slot`. The save path is kept so the cartridge
    /// can be loaded again.
    pub fn unload_cartridge(&mut self, slot: Slot) {
        if slot == Slot::Gba {
            self.machine.eject_secondary_cartridge();
        }
        self.paths.slot_mut(slot).image = None;
    }

    /// Reboot with whatever is registered in both slots. With no DS cartridge
    /// the firmware is booted instead.
    pub fn reset(&mut self) -> LoadResult {
        let variant = self.config.console_variant;
        let direct_boot = self.verify_for_boot()?;

        if variant == ConsoleVariant::Dsi {
            self.drop_gba_cart();
        }

        self.savestate_loaded = false;
        self.machine.set_console_variant(variant);

        match self.paths.image(Slot::Nds).map(Path::to_path_buf) {
            None => self.machine.load_firmware_only(),
            Some(image) => {
                if let Err(e) = self.setup_save_path(Slot::Nds) {
                    warn!("Keeping previous DS save path: {e}");
                }
                let save = self.paths.save(Slot::Nds).map(Path::to_path_buf);
                if !self
                    .machine
                    .load_cartridge(&image, save.as_deref(), direct_boot)
                {
                    return Err(LoadError::CartridgeLoadFailed);
                }
            }
        }

        if let Some(image) = self.paths.image(Slot::Gba).map(Path::to_path_buf) {
            if let Err(e) = self.setup_save_path(Slot::Gba) {
                warn!("Keeping previous GBA save path: {e}");
            }
            let save = self.paths.save(Slot::Gba).map(Path::to_path_buf);
            if !self
                .machine
                .load_secondary_cartridge(&image, save.as_deref())
            {
                return Err(LoadError::CartridgeLoadFailed);
            }
        }

        self.reload_cheats();

        info!("Reset ({variant:?}, direct boot: {direct_boot})");
        Ok(())
    }
}
