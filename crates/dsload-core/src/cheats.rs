//! Action Replay cheat files.
//!
//! ```text
//! CAT Infinite items
//! CODE 1 Max money
//! 02000000 0098967F
//! ```
//!
//! `CAT` opens a category, `CODE <enabled> <name>` opens a code in it, and
//! every following line holds hex word pairs for that code.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::{debug, warn};

pub const CHEAT_EXTENSION: &str = "mch";
/// Cheat file used when no cartridge is loaded.
pub const FIRMWARE_CHEAT_FILE: &str = "firmware.mch";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheatCode {
    pub name: String,
    pub enabled: bool,
    pub words: Vec<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheatCategory {
    pub name: String,
    pub codes: Vec<CheatCode>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheatFile {
    pub path: PathBuf,
    pub categories: Vec<CheatCategory>,
}

impl CheatFile {
    /// Load the cheat file at `path`. A missing file gives an empty list.
    pub fn open(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(path, &text),
            Err(e) => {
                if e.kind() == io::ErrorKind::NotFound {
                    debug!("No cheat file at {}", path.display());
                } else {
                    warn!("Failed to read cheat file {}: {e}", path.display());
                }
                Self {
                    path: path.to_path_buf(),
                    categories: Vec::new(),
                }
            }
        }
    }

    pub fn parse(path: &Path, text: &str) -> Self {
        let mut categories: Vec<CheatCategory> = Vec::new();

        for (lineno, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(name) = line.strip_prefix("CAT ") {
                categories.push(CheatCategory {
                    name: name.trim().to_string(),
                    codes: Vec::new(),
                });
            } else if let Some(rest) = line.strip_prefix("CODE ") {
                let Some(cat) = categories.last_mut() else {
                    warn!("{}:{}: code outside category", path.display(), lineno + 1);
                    continue;
                };
                let (flag, name) = rest.split_once(' ').unwrap_or((rest, ""));
                cat.codes.push(CheatCode {
                    name: name.trim().to_string(),
                    enabled: flag == "1",
                    words: Vec::new(),
                });
            } else {
                let code = categories.last_mut().and_then(|c| c.codes.last_mut());
                let Some(code) = code else {
                    warn!("{}:{}: data outside code", path.display(), lineno + 1);
                    continue;
                };
                match parse_words(line) {
                    Some(words) => code.words.extend(words),
                    None => warn!("{}:{}: bad code line", path.display(), lineno + 1),
                }
            }
        }

        Self {
            path: path.to_path_buf(),
            categories,
        }
    }

    pub fn enabled_codes(&self) -> impl Iterator<Item = &CheatCode> {
        self.categories
            .iter()
            .flat_map(|c| c.codes.iter())
            .filter(|c| c.enabled)
    }
}

fn parse_words(line: &str) -> Option<Vec<u32>> {
    let words = line
        .split_whitespace()
        .map(|w| u32::from_str_radix(w, 16).ok())
        .collect::<Option<Vec<_>>>()?;
    if words.len() % 2 != 0 {
        return None;
    }
    Some(words)
}

/// Cheat file path for the given cartridge image, or the firmware one.
pub fn cheat_path_for(image: Option<&Path>) -> PathBuf {
    match image {
        Some(image) => image.with_extension(CHEAT_EXTENSION),
        None => PathBuf::from(FIRMWARE_CHEAT_FILE),
    }
}

/// Currently loaded cheat file and whether it is bound to the machine.
#[derive(Debug, Default)]
pub struct CheatHook {
    file: Option<CheatFile>,
    enabled: bool,
}

impl CheatHook {
    pub fn new(enabled: bool) -> Self {
        Self {
            file: None,
            enabled,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn file(&self) -> Option<&CheatFile> {
        self.file.as_ref()
    }

    /// Replace the current cheat file.
    pub fn replace(&mut self, file: CheatFile) {
        self.file = Some(file);
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// What should be bound to the machine right now.
    pub fn active(&self) -> Option<&CheatFile> {
        if self.enabled { self.file.as_ref() } else { None }
    }
}
