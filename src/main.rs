use clap::{ArgAction, Parser, Subcommand};
use playfield_pro::export::{AsmTemplate, export_registers, export_rows};
use playfield_pro::model::{ColorSystem, NewPlayfield, PlayfieldMode, PlayfieldModel};
use playfield_pro::project::PROJECT_EXTENSION;
use playfield_pro::symbol::FontRegistry;
use playfield_pro::{ConfigError, EditorConfig, ProjectError, ProjectManager};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "ppp")]
#[command(version, about = "Playfield Pixel Perfect Pro - Atari 2600 playfield tool", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty playfield project
    New {
        /// Output project file
        file: PathBuf,

        /// Playfield name
        #[arg(long)]
        name: String,

        /// Symmetry mode: Asymmetric, Symmetric or Mirror
        #[arg(long, default_value = "Asymmetric")]
        mode: PlayfieldMode,

        /// Color system: NTSC, PAL or SECAM
        #[arg(long, default_value = "NTSC")]
        color_system: ColorSystem,

        /// Scanline count (defaults per color system)
        #[arg(long)]
        scanlines: Option<usize>,
    },

    /// Show a summary of a project
    Info {
        file: PathBuf,
    },

    /// Print a project as one `.byte` row per scanline
    Asm {
        file: PathBuf,

        /// Column layout, see `ppp templates`
        #[arg(short, long, default_value = "PF0_PF1_PF2")]
        template: AsmTemplate,
    },

    /// Print a project as per-register data blocks
    Registers {
        file: PathBuf,
    },

    /// List the available row templates
    Templates,

    /// List the fonts found in the configured font directories
    Fonts,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Project(#[from] ProjectError),
}

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .compact()
        .finish()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    let config = EditorConfig::from_env()?;
    let manager = ProjectManager::new(config.version.clone());

    match command {
        Commands::New {
            file,
            name,
            mode,
            color_system,
            scanlines,
        } => {
            let mut params = NewPlayfield::new(name, mode, color_system);
            params.scanlines = scanlines;

            let mut pf = manager.create(&params)?;
            let path = with_project_extension(file);
            manager.save(&mut pf, &path)?;
            println!(
                "Created '{}' ({} scanlines) at {}",
                pf.name,
                pf.scanline_count(),
                path.display()
            );
        }
        Commands::Info { file } => {
            let pf = manager.load(&file)?;
            print_info(&pf);
        }
        Commands::Asm { file, template } => {
            let pf = manager.load(&file)?;
            println!("{}", export_rows(&pf, template, &config.version).join("\n"));
        }
        Commands::Registers { file } => {
            let pf = manager.load(&file)?;
            println!("{}", export_registers(&pf, &config.version).join("\n"));
        }
        Commands::Templates => {
            for template in AsmTemplate::ALL {
                println!("{}", template);
            }
        }
        Commands::Fonts => {
            let fonts = FontRegistry::from_dirs(&config.fonts_dirs);
            if fonts.is_empty() {
                println!("No fonts found in:");
                for dir in &config.fonts_dirs {
                    println!("  {}", dir.display());
                }
            }
            for name in fonts.names() {
                println!("{}", name);
            }
        }
    }

    Ok(())
}

fn with_project_extension(file: PathBuf) -> PathBuf {
    if file.extension().is_some() {
        file
    } else {
        file.with_extension(PROJECT_EXTENSION)
    }
}

fn print_info(pf: &PlayfieldModel) {
    let lit: usize = pf
        .lines()
        .iter()
        .map(|line| line.pixels.iter().filter(|&&lit| lit).count())
        .sum();

    println!("Name:         {}", pf.name);
    println!("Mode:         {}", pf.mode);
    println!("Color system: {}", pf.color_system);
    println!("Scanlines:    {}", pf.scanline_count());
    println!("Lit pixels:   {}", lit);
    if let Some(path) = pf.filename.as_deref().map(Path::display) {
        println!("File:         {}", path);
    }
}
