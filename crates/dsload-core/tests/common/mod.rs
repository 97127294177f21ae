#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

use dsload_core::cheats::CheatFile;
use dsload_core::config::{BiosPaths, FrontendConfig};
use dsload_core::machine::Machine;
use dsload_core::probe::FileProbe;
use dsload_core::snapshot::Snapshot;
use dsload_core::verify::{BIOS7_SIZE, BIOS9_SIZE, DSI_BIOS_SIZE, DSI_FIRMWARE_SIZE};
use dsload_core::{ConsoleVariant, Session};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    SetVariant(ConsoleVariant),
    FirmwareOnly,
    LoadCart {
        image: PathBuf,
        save: Option<PathBuf>,
        direct_boot: bool,
    },
    LoadGba {
        image: PathBuf,
        save: Option<PathBuf>,
    },
    EjectGba,
    Relocate {
        path: PathBuf,
        save_direction: bool,
    },
    Import(usize),
    SetCheats(Option<usize>),
}

/// Records every call and keeps a small fake machine state that round-trips
/// through snapshots.
#[derive(Debug, Default)]
pub struct MockMachine {
    pub state: Vec<u8>,
    pub gba_inserted: bool,
    pub gba_fingerprint: u32,
    pub save_data: Vec<u8>,
    pub calls: Vec<Call>,
    pub fail_cart: bool,
    pub fail_gba: bool,
    pub reject_states: bool,
}

impl MockMachine {
    pub fn cart_loads(&self) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::LoadCart { .. }))
            .collect()
    }

    pub fn relocations(&self) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Relocate { .. }))
            .collect()
    }

    pub fn called(&self, call: &Call) -> bool {
        self.calls.contains(call)
    }
}

impl Machine for MockMachine {
    fn set_console_variant(&mut self, variant: ConsoleVariant) {
        self.calls.push(Call::SetVariant(variant));
    }

    fn load_firmware_only(&mut self) {
        self.calls.push(Call::FirmwareOnly);
    }

    fn load_cartridge(&mut self, image: &Path, save: Option<&Path>, direct_boot: bool) -> bool {
        self.calls.push(Call::LoadCart {
            image: image.to_path_buf(),
            save: save.map(Path::to_path_buf),
            direct_boot,
        });
        !self.fail_cart
    }

    fn load_secondary_cartridge(&mut self, image: &Path, save: Option<&Path>) -> bool {
        self.calls.push(Call::LoadGba {
            image: image.to_path_buf(),
            save: save.map(Path::to_path_buf),
        });
        if self.fail_gba {
            return false;
        }
        self.gba_inserted = true;
        true
    }

    fn eject_secondary_cartridge(&mut self) {
        self.calls.push(Call::EjectGba);
        self.gba_inserted = false;
    }

    fn secondary_cart_inserted(&self) -> bool {
        self.gba_inserted
    }

    fn secondary_cart_fingerprint(&self) -> u32 {
        self.gba_fingerprint
    }

    fn capture_snapshot(&mut self, snapshot: &mut Snapshot) {
        let mut payload = vec![u8::from(self.gba_inserted)];
        payload.extend_from_slice(&self.gba_fingerprint.to_le_bytes());
        payload.extend_from_slice(&self.state);
        snapshot.set_payload(payload);
    }

    fn apply_snapshot(&mut self, snapshot: &Snapshot) -> bool {
        let data = snapshot.payload();
        if self.reject_states || data.len() < 5 {
            return false;
        }
        self.gba_inserted = data[0] != 0;
        self.gba_fingerprint = u32::from_le_bytes([data[1], data[2], data[3], data[4]]);
        self.state = data[5..].to_vec();
        true
    }

    fn relocate_save_data(&mut self, path: &Path, is_save_direction: bool) {
        self.calls.push(Call::Relocate {
            path: path.to_path_buf(),
            save_direction: is_save_direction,
        });
    }

    fn import_save_data(&mut self, data: &[u8]) -> usize {
        self.calls.push(Call::Import(data.len()));
        let diff = data
            .iter()
            .zip(self.save_data.iter().chain(std::iter::repeat(&0)))
            .filter(|(a, b)| a != b)
            .count();
        self.save_data = data.to_vec();
        diff
    }

    fn set_cheats(&mut self, cheats: Option<&CheatFile>) {
        self.calls
            .push(Call::SetCheats(cheats.map(|c| c.categories.len())));
    }
}

/// In-memory filesystem that remembers which files were queried.
#[derive(Debug, Default)]
pub struct MockProbe {
    pub files: HashMap<PathBuf, u64>,
    pub dirs: HashSet<PathBuf>,
    pub queried: RefCell<Vec<PathBuf>>,
}

impl MockProbe {
    pub fn with_file(mut self, path: &str, size: u64) -> Self {
        self.files.insert(PathBuf::from(path), size);
        self
    }

    pub fn with_dir(mut self, path: &str) -> Self {
        self.dirs.insert(PathBuf::from(path));
        self
    }

    pub fn was_queried(&self, path: &str) -> bool {
        self.queried.borrow().iter().any(|p| p == Path::new(path))
    }
}

impl FileProbe for MockProbe {
    fn file_size(&self, path: &Path) -> io::Result<u64> {
        self.queried.borrow_mut().push(path.to_path_buf());
        self.files
            .get(path)
            .copied()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }

    fn dir_exists(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }
}

pub fn config(variant: ConsoleVariant) -> FrontendConfig {
    FrontendConfig {
        console_variant: variant,
        bios: BiosPaths {
            bios9: Some("bios9.bin".into()),
            bios7: Some("bios7.bin".into()),
            firmware: Some("firmware.bin".into()),
            dsi_bios9: Some("dsi_bios9.bin".into()),
            dsi_bios7: Some("dsi_bios7.bin".into()),
            dsi_firmware: Some("dsi_firmware.bin".into()),
            dsi_nand: Some("nand.bin".into()),
        },
        ..FrontendConfig::default()
    }
}

/// Probe with every boot artifact present at a valid size.
pub fn good_probe(firmware_size: u64) -> MockProbe {
    MockProbe::default()
        .with_file("bios9.bin", BIOS9_SIZE)
        .with_file("bios7.bin", BIOS7_SIZE)
        .with_file("firmware.bin", firmware_size)
        .with_file("dsi_bios9.bin", DSI_BIOS_SIZE)
        .with_file("dsi_bios7.bin", DSI_BIOS_SIZE)
        .with_file("dsi_firmware.bin", DSI_FIRMWARE_SIZE)
        .with_file("nand.bin", 0x1000_0000)
}

pub type TestSession = Session<MockMachine, MockProbe>;

pub fn session(config: FrontendConfig, probe: MockProbe) -> TestSession {
    Session::with_probe(config, MockMachine::default(), probe)
}

pub fn ds_session() -> TestSession {
    session(config(ConsoleVariant::Ds), good_probe(0x40000))
}
