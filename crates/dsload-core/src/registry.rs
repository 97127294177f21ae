use std::path::{Path, PathBuf};

use crate::hardware::Slot;

/// Per-slot ROM and save paths.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SlotPaths {
    pub image: Option<PathBuf>,
    pub save: Option<PathBuf>,
    /// Save path in effect before the last savestate load, for undo.
    pub prev_save: Option<PathBuf>,
}

impl SlotPaths {
    pub fn clear(&mut self) {
        self.image = None;
        self.save = None;
    }
}

/// Image and save paths captured before a cartridge load mutates a slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotCheckpoint {
    slot: Slot,
    image: Option<PathBuf>,
    save: Option<PathBuf>,
}

/// Paths currently associated with both cartridge slots.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathRegistry {
    slots: [SlotPaths; 2],
}

impl PathRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, slot: Slot) -> &SlotPaths {
        &self.slots[slot.index()]
    }

    pub fn slot_mut(&mut self, slot: Slot) -> &mut SlotPaths {
        &mut self.slots[slot.index()]
    }

    pub fn image(&self, slot: Slot) -> Option<&Path> {
        self.slot(slot).image.as_deref()
    }

    pub fn save(&self, slot: Slot) -> Option<&Path> {
        self.slot(slot).save.as_deref()
    }

    pub fn prev_save(&self, slot: Slot) -> Option<&Path> {
        self.slot(slot).prev_save.as_deref()
    }

    pub fn has_image(&self, slot: Slot) -> bool {
        self.slot(slot).image.is_some()
    }

    pub fn checkpoint(&self, slot: Slot) -> SlotCheckpoint {
        let paths = self.slot(slot);
        SlotCheckpoint {
            slot,
            image: paths.image.clone(),
            save: paths.save.clone(),
        }
    }

    /// Write a checkpoint's image and save paths back. `prev_save` is left alone.
    pub fn restore(&mut self, checkpoint: SlotCheckpoint) {
        let paths = self.slot_mut(checkpoint.slot);
        paths.image = checkpoint.image;
        paths.save = checkpoint.save;
    }
}
