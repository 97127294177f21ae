//! Firmware, cartridge and savestate loading for a DS emulator frontend.
//!
//! This crate sits between files on disk and a running emulation core. It
//! verifies boot artifacts, derives save file locations, and loads cartridges
//! and savestates so that a failed load leaves the slot paths and the machine
//! as they were. The emulation core is reached through the [`machine::Machine`]
//! trait; frontends drive everything via [`session::Session`].

/// Cartridge load, unload and reset transactions.
pub mod cartridge;

/// Action Replay cheat files and their binding to the machine.
pub mod cheats;

/// Settings read by the load transactions.
pub mod config;

/// Load and verification error taxonomy.
pub mod error;

/// Console variants and cartridge slots.
pub mod hardware;

/// Contract with the emulation core.
pub mod machine;

/// File size and presence queries.
pub mod probe;

/// Per-slot ROM and save paths.
pub mod registry;

/// Save file path derivation.
pub mod save_path;

/// Savestate load/save/undo transactions.
pub mod savestate;

/// Load session owning the machine and slot state.
pub mod session;

/// Savestate file container.
pub mod snapshot;

/// Boot ROM / firmware / NAND verification.
pub mod verify;

pub use error::{Artifact, ArtifactFault, LoadError, LoadResult};
pub use hardware::{ConsoleVariant, Slot};
pub use machine::Machine;
pub use session::Session;
