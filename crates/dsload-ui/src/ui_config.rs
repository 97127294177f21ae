use dsload_core::config::FrontendConfig;
use log::{debug, warn};
use std::io;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "dsload";
const FILE_NAME: &str = "dsload.toml";

/// Per-user configuration directory, if the environment names one.
fn user_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return Some(PathBuf::from(appdata));
        }
    }

    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
}

/// `dsload/dsload.toml` under the user config directory, or `dsload.toml` in
/// the working directory when there is none.
pub fn default_config_path() -> PathBuf {
    match user_config_dir() {
        Some(dir) => dir.join(APP_DIR).join(FILE_NAME),
        None => PathBuf::from(FILE_NAME),
    }
}

fn parse(path: &Path, text: &str) -> FrontendConfig {
    toml::from_str(text).unwrap_or_else(|e| {
        warn!("Ignoring config {}: {e}", path.display());
        FrontendConfig::default()
    })
}

/// Read the config at `path`. Anything unusable falls back to the defaults;
/// only a file that exists but cannot be read or parsed is worth a warning.
pub fn load_from_file(path: &Path) -> FrontendConfig {
    match std::fs::read_to_string(path) {
        Ok(text) => parse(path, &text),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No config at {}, using defaults", path.display());
            FrontendConfig::default()
        }
        Err(e) => {
            warn!("Cannot read config {}: {e}", path.display());
            FrontendConfig::default()
        }
    }
}

pub fn save_to_file(path: &Path, cfg: &FrontendConfig) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let text = toml::to_string_pretty(cfg).map_err(io::Error::other)?;
    std::fs::write(path, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsload_core::ConsoleVariant;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            load_from_file(&dir.path().join("none.toml")),
            FrontendConfig::default()
        );
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("dsload.toml");

        let mut cfg = FrontendConfig {
            console_variant: ConsoleVariant::Dsi,
            save_dir_enabled: true,
            save_dir: Some(PathBuf::from("/saves")),
            ..FrontendConfig::default()
        };
        cfg.bios.bios9 = Some(PathBuf::from("/bios/bios9.bin"));
        save_to_file(&path, &cfg).unwrap();

        assert_eq!(load_from_file(&path), cfg);
    }

    #[test]
    fn kebab_case_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dsload.toml");
        std::fs::write(
            &path,
            "console-variant = \"dsi\"\ndirect-boot = true\n\n[bios]\nfirmware = \"fw.bin\"\n",
        )
        .unwrap();

        let cfg = load_from_file(&path);
        assert_eq!(cfg.console_variant, ConsoleVariant::Dsi);
        assert!(cfg.direct_boot);
        assert_eq!(cfg.bios.firmware, Some(PathBuf::from("fw.bin")));
    }

    #[test]
    fn default_path_ends_in_app_dir() {
        let path = default_config_path();
        assert!(path.ends_with(FILE_NAME));
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            assert!(parent.ends_with(APP_DIR));
        }
    }

    #[test]
    fn unreadable_path_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        // a directory cannot be read as a file
        assert_eq!(load_from_file(dir.path()), FrontendConfig::default());
    }

    #[test]
    fn broken_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dsload.toml");
        std::fs::write(&path, "console-variant = [").unwrap();
        assert_eq!(load_from_file(&path), FrontendConfig::default());
    }
}
