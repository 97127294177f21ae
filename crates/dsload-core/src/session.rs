use log::{debug, info};

use crate::{
    cheats::{CheatFile, CheatHook, cheat_path_for},
    config::FrontendConfig,
    error::LoadResult,
    hardware::Slot,
    machine::Machine,
    probe::{FileProbe, StdFileProbe},
    registry::PathRegistry,
    save_path::resolve_save_path,
    snapshot::Snapshot,
    verify::verify_boot,
};

/// Owns everything the load transactions touch: the machine, the slot path
/// registry, the cheat binding and the savestate undo backup.
///
/// Every operation runs to completion before returning. A `Session` is meant to
/// be driven from one thread.
pub struct Session<M: Machine, P: FileProbe = StdFileProbe> {
    pub(crate) config: FrontendConfig,
    pub(crate) machine: M,
    pub(crate) probe: P,
    pub(crate) paths: PathRegistry,
    pub(crate) cheats: CheatHook,
    /// State captured right before the last successful savestate load.
    pub(crate) backup: Option<Snapshot>,
    pub(crate) savestate_loaded: bool,
}

impl<M: Machine> Session<M> {
    pub fn new(config: FrontendConfig, machine: M) -> Self {
        Self::with_probe(config, machine, StdFileProbe)
    }
}

impl<M: Machine, P: FileProbe> Session<M, P> {
    pub fn with_probe(config: FrontendConfig, machine: M, probe: P) -> Self {
        let cheats = CheatHook::new(config.cheats_enabled);
        Self {
            config,
            machine,
            probe,
            paths: PathRegistry::new(),
            cheats,
            backup: None,
            savestate_loaded: false,
        }
    }

    pub fn config(&self) -> &FrontendConfig {
        &self.config
    }

    /// Replace the configuration. Takes effect on the next operation; paths that
    /// were already resolved are not touched.
    pub fn set_config(&mut self, config: FrontendConfig) {
        self.config = config;
    }

    pub fn machine(&self) -> &M {
        &self.machine
    }

    pub fn machine_mut(&mut self) -> &mut M {
        &mut self.machine
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    pub fn paths(&self) -> &PathRegistry {
        &self.paths
    }

    /// Whether a savestate load can currently be undone.
    pub fn savestate_loaded(&self) -> bool {
        self.savestate_loaded
    }

    pub fn cheat_file(&self) -> Option<&CheatFile> {
        self.cheats.file()
    }

    pub fn cheats_enabled(&self) -> bool {
        self.cheats.enabled()
    }

    /// Recompute the save path of `slot` from its image path. Nothing is
    /// written unless resolution succeeds; an empty slot is left alone.
    pub fn setup_save_path(&mut self, slot: Slot) -> LoadResult {
        let Some(image) = self.paths.image(slot) else {
            return Ok(());
        };
        let save_dir = self.config.custom_save_dir().map(|d| d.as_path());
        let save = resolve_save_path(image, save_dir, &self.probe)?;
        debug!("{slot:?} save path: {}", save.display());
        self.paths.slot_mut(slot).save = Some(save);
        Ok(())
    }

    /// Boot the firmware menu with no DS cartridge.
    pub fn load_firmware(&mut self) -> LoadResult {
        verify_boot(&self.config, &self.probe)?;

        self.paths.slot_mut(Slot::Nds).clear();

        self.machine.set_console_variant(self.config.console_variant);
        self.machine.load_firmware_only();

        self.savestate_loaded = false;
        self.backup = None;
        self.reload_cheats();

        info!("Booted {:?} firmware", self.config.console_variant);
        Ok(())
    }

    /// Re-read the cheat file belonging to the current DS cartridge and rebind it.
    pub fn reload_cheats(&mut self) {
        let path = cheat_path_for(self.paths.image(Slot::Nds));
        let file = CheatFile::open(&path);
        debug!(
            "Loaded {} cheat categories from {}",
            file.categories.len(),
            path.display()
        );
        self.cheats.replace(file);
        self.machine.set_cheats(self.cheats.active());
    }

    /// Toggle cheats without re-reading the cheat file.
    pub fn set_cheats_enabled(&mut self, enabled: bool) {
        self.cheats.set_enabled(enabled);
        if self.cheats.file().is_some() {
            self.machine.set_cheats(self.cheats.active());
        }
    }
}
