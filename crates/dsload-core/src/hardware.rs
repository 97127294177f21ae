use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Console model the machine is configured as.
///
/// The variant decides which boot artifacts have to be present and whether a
/// NAND image is required.
pub enum ConsoleVariant {
    #[default]
    Ds,
    /// DSi mode: extra BIOS/firmware images plus NAND, no GBA slot.
    Dsi,
}

impl ConsoleVariant {
    #[inline]
    /// Returns whether this variant can accept a cartridge in `slot`.
    pub const fn supports_slot(self, slot: Slot) -> bool {
        !matches!((self, slot), (ConsoleVariant::Dsi, Slot::Gba))
    }

    #[inline]
    pub const fn has_gba_slot(self) -> bool {
        matches!(self, ConsoleVariant::Ds)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Cartridge bay a path applies to.
pub enum Slot {
    /// Primary DS card slot.
    Nds,
    /// GBA cartridge slot (slot-2 adapter).
    Gba,
}

impl Slot {
    pub const ALL: [Slot; 2] = [Slot::Nds, Slot::Gba];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Slot::Nds => 0,
            Slot::Gba => 1,
        }
    }
}
