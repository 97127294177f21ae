use std::path::Path;

use crate::{cheats::CheatFile, hardware::ConsoleVariant, snapshot::Snapshot};

/// Calls the load core makes into the emulation core.
///
/// The emulation core owns the live machine. Everything here runs
/// synchronously on the caller's thread.
pub trait Machine {
    fn set_console_variant(&mut self, variant: ConsoleVariant);

    /// Boot into the firmware menu with no cartridge.
    fn load_firmware_only(&mut self);

    /// Insert a DS cartridge and reset. Returns `false` if the core rejected it.
    fn load_cartridge(&mut self, image: &Path, save: Option<&Path>, direct_boot: bool) -> bool;

    /// Insert a GBA cartridge. Returns `false` if the core rejected it.
    fn load_secondary_cartridge(&mut self, image: &Path, save: Option<&Path>) -> bool;

    fn eject_secondary_cartridge(&mut self);

    fn secondary_cart_inserted(&self) -> bool;

    /// Checksum of the inserted GBA cartridge ROM.
    fn secondary_cart_fingerprint(&self) -> u32;

    /// Serialize the live state into `snapshot`.
    fn capture_snapshot(&mut self, snapshot: &mut Snapshot);

    /// Replace the live state. Returns `false` if the payload was rejected.
    fn apply_snapshot(&mut self, snapshot: &Snapshot) -> bool;

    /// Point the DS cartridge save at `path`. With `is_save_direction` the current
    /// save contents are written to the new file; otherwise they are read from it.
    fn relocate_save_data(&mut self, path: &Path, is_save_direction: bool);

    /// Import raw save data. Returns how many bytes differed from the current save.
    fn import_save_data(&mut self, data: &[u8]) -> usize;

    /// Bind (or with `None`, unbind) the cheat codes the CPU should apply.
    fn set_cheats(&mut self, cheats: Option<&CheatFile>);
}
