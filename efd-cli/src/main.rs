use anyhow::Result;
use clap::{Parser, Subcommand};
use efd_cli::{commands, DecodeOptions, ExportFormat};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "efd")]
#[command(about = "efd - Decoder for Canon EOS-1V EFD shooting data files", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Fail on codes missing from the lookup tables
    #[arg(long, global = true)]
    strict: bool,

    /// JSON file with replacement lookup tables
    #[arg(long, global = true)]
    tables: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the roll header and record counts
    Info {
        /// Input EFD file ("-" for stdin)
        #[arg(short, long)]
        input: String,
    },

    /// List every frame with its exposure settings
    Frames {
        /// Input EFD file ("-" for stdin)
        #[arg(short, long)]
        input: String,
    },

    /// Draw the AF point grid of one frame
    Focus {
        /// Input EFD file ("-" for stdin)
        #[arg(short, long)]
        input: String,

        /// Frame number
        #[arg(short, long)]
        frame: u32,

        /// Highlight active points with ANSI colours
        #[arg(long)]
        color: bool,
    },

    /// Export decoded frames to JSON or CSV
    Export {
        /// Input EFD file ("-" for stdin)
        #[arg(short, long)]
        input: String,

        /// Output file
        #[arg(short, long)]
        output: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
    },

    /// Extract embedded thumbnails as PNG files
    Thumbnails {
        /// Input EFD file ("-" for stdin)
        #[arg(short, long)]
        input: String,

        /// Output directory
        #[arg(short, long)]
        output: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let options = DecodeOptions {
        strict: cli.strict,
        tables: cli.tables,
    };

    match cli.command {
        Commands::Info { input } => commands::info::execute(&input, &options),

        Commands::Frames { input } => commands::frames::execute(&input, &options),

        Commands::Focus {
            input,
            frame,
            color,
        } => commands::focus::execute(&input, frame, color),

        Commands::Export {
            input,
            output,
            format,
        } => commands::export::execute(&input, &output, format, &options),

        Commands::Thumbnails { input, output } => {
            commands::thumbnails::execute(&input, &output).map(|_| ())
        }
    }
}
