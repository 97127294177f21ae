mod ui_config;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dsload_core::{
    ConsoleVariant, LoadResult,
    cheats::{CheatFile, cheat_path_for},
    config::FrontendConfig,
    probe::StdFileProbe,
    save_path::resolve_save_path,
    savestate::savestate_name,
    verify::verify_boot,
};
use log::{error, info};

#[derive(Parser)]
#[command(name = "dsload", about = "Check and locate DS boot files, saves and savestates")]
struct Args {
    /// Path to the config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Treat the console as a DSi
    #[arg(long, global = true)]
    dsi: bool,

    /// Skip the firmware boot sequence
    #[arg(long, global = true)]
    direct_boot: bool,

    /// Store saves and savestates in this directory
    #[arg(long, global = true, value_name = "DIR")]
    save_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check that the BIOS, firmware and NAND images are usable
    Verify,

    /// Print the save file path for a ROM
    SavePath { rom: PathBuf },

    /// Print the savestate file name for a numbered slot
    StateName {
        slot: u32,

        /// ROM the state belongs to (firmware if omitted)
        #[arg(long)]
        rom: Option<PathBuf>,
    },

    /// List the cheat codes for a ROM
    Cheats { rom: Option<PathBuf> },

    /// Write the effective configuration to the config file
    WriteConfig,
}

fn apply_overrides(args: &Args, config: &mut FrontendConfig) {
    if args.dsi {
        config.console_variant = ConsoleVariant::Dsi;
    }
    if args.direct_boot {
        config.direct_boot = true;
    }
    if let Some(dir) = &args.save_dir {
        config.save_dir_enabled = true;
        config.save_dir = Some(dir.clone());
    }
}

fn list_cheats(rom: Option<&Path>) {
    let path = cheat_path_for(rom);
    let file = CheatFile::open(&path);
    if file.categories.is_empty() {
        println!("No cheats in {}", path.display());
        return;
    }

    for cat in &file.categories {
        println!("{}", cat.name);
        for code in &cat.codes {
            let mark = if code.enabled { 'x' } else { ' ' };
            println!("  [{mark}] {} ({} words)", code.name, code.words.len());
        }
    }
}

fn run(command: &Command, config: &FrontendConfig, config_path: &Path) -> LoadResult {
    let probe = StdFileProbe;
    match command {
        Command::Verify => {
            match verify_boot(config, &probe) {
                Ok(()) => println!("{:?} boot files OK", config.console_variant),
                // the frontend can still direct-boot games with this firmware
                Err(e) if e.is_not_bootable() => println!("{e} (direct boot only)"),
                Err(e) => return Err(e),
            }
        }
        Command::SavePath { rom } => {
            let save_dir = config.custom_save_dir().map(PathBuf::as_path);
            let save = resolve_save_path(rom, save_dir, &probe)?;
            println!("{}", save.display());
        }
        Command::StateName { slot, rom } => {
            let name = savestate_name(config, &probe, rom.as_deref(), *slot);
            println!("{}", name.display());
        }
        Command::Cheats { rom } => list_cheats(rom.as_deref()),
        Command::WriteConfig => {
            ui_config::save_to_file(config_path, config)?;
            info!("Wrote {}", config_path.display());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(ui_config::default_config_path);
    let mut config = ui_config::load_from_file(&config_path);
    apply_overrides(&args, &mut config);

    match run(&args.command, &config, &config_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
