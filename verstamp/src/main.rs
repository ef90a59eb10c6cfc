use std::io::Write as _;

use clap::{
    Parser, Subcommand,
    builder::{Styles, styling::AnsiColor},
};
use color_eyre::eyre::WrapErr as _;
use verstamp::{
    VERSION_INFO,
    generate::{self, GenerateArgs},
    report::{self, Format},
};
use verstamp_telemetry::TelemetryConfig;

fn clap_v3_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Yellow.on_default())
        .usage(AnsiColor::Green.on_default())
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

#[derive(Debug, Parser)]
#[command(
    author,
    version = VERSION_INFO.package,
    about,
    styles = clap_v3_styles(),
)]
struct Cli {
    /// More logs on stderr. Repeat for even more.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the version info embedded in this binary. The default command.
    Show {
        #[arg(long, value_enum, default_value_t)]
        format: Format,
    },
    /// Generate a version info artifact for a repository.
    Generate(GenerateArgs),
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let telemetry = TelemetryConfig::new().with_verbosity(cli.verbose).init();

    let result = run(cli.command.unwrap_or(Commands::Show {
        format: Format::Text,
    }));

    telemetry.flush_blocking();
    result
}

fn run(command: Commands) -> color_eyre::Result<()> {
    let output = match command {
        Commands::Show { format } => report::render(&VERSION_INFO, format)
            .wrap_err("failed to format version info")?,
        Commands::Generate(args) => {
            let generated = generate::run(&args)?;
            format!("{}\n", generated.descriptor.package())
        }
    };

    std::io::stdout()
        .lock()
        .write_all(output.as_bytes())
        .wrap_err("failed to write to stdout")
}
