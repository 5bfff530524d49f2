//! phi - terminal front end for the phi synth
//!
//! # Commands
//!
//! - `phi` / `phi play` - play live on the default output device
//! - `phi print` - list engine size and parameters
//! - `phi render [blocks]` - render offline and log levels per block
//!
//! Run with: cargo run --bin phi -- render 10 --rate 44100

mod app;
mod meter;
mod offline;
mod ui;

use clap::{builder::RangedU64ValueParser, Args, Parser, Subcommand};
use color_eyre::eyre::Result as EyreResult;
use phi_synth::{engine::DEFAULT_SAMPLE_RATE, SynthConfig, MAX_BLOCK_SIZE};

/// Golden-ratio tone generator with a comb/allpass reverb
#[derive(Parser, Debug)]
#[command(name = "phi")]
#[command(version)]
struct Cli {
    /// Defaults to `play`
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Play live on the default output device
    Play,

    /// List engine size and parameters
    Print(OfflineArgs),

    /// Render blocks offline with the gate held and log their levels
    Render {
        /// Number of blocks to render
        #[arg(default_value_t = offline::DEFAULT_BLOCKS)]
        blocks: usize,

        #[command(flatten)]
        offline: OfflineArgs,
    },
}

/// Engine settings for the offline commands. Live playback uses the
/// device's own rate.
#[derive(Args, Debug, Clone, Copy, PartialEq)]
struct OfflineArgs {
    /// Sample rate in Hz
    #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
    rate: u32,

    /// Frames per block
    #[arg(
        long,
        default_value_t = SynthConfig::default().block_size,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_BLOCK_SIZE as u64),
    )]
    block: usize,
}

impl From<OfflineArgs> for SynthConfig {
    fn from(args: OfflineArgs) -> Self {
        Self {
            sample_rate: args.rate,
            block_size: args.block,
        }
    }
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => app::run(),
        Commands::Print(args) => {
            init_tracing();
            offline::print_info(&args.into());
            Ok(())
        }
        Commands::Render { blocks, offline: args } => {
            init_tracing();
            offline::render(&args.into(), blocks);
            Ok(())
        }
    }
}

/// Log to stderr; the live TUI owns the terminal so it skips this.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Option<Commands>, clap::Error> {
        Cli::try_parse_from(std::iter::once("phi").chain(args.iter().copied())).map(|cli| cli.command)
    }

    fn defaults() -> OfflineArgs {
        OfflineArgs {
            rate: 48_000,
            block: 512,
        }
    }

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments_plays_live() {
        assert_eq!(parse(&[]).unwrap(), None);
        assert_eq!(parse(&["play"]).unwrap(), Some(Commands::Play));
        assert_eq!(SynthConfig::from(defaults()), SynthConfig::default());
    }

    #[test]
    fn render_count_is_optional() {
        assert_eq!(
            parse(&["render"]).unwrap(),
            Some(Commands::Render {
                blocks: offline::DEFAULT_BLOCKS,
                offline: defaults(),
            })
        );
        assert_eq!(
            parse(&["render", "12", "--rate", "44100"]).unwrap(),
            Some(Commands::Render {
                blocks: 12,
                offline: OfflineArgs {
                    rate: 44_100,
                    block: 512,
                },
            })
        );
        assert_eq!(
            parse(&["render", "--block", "64"]).unwrap(),
            Some(Commands::Render {
                blocks: offline::DEFAULT_BLOCKS,
                offline: OfflineArgs {
                    rate: 48_000,
                    block: 64,
                },
            })
        );
    }

    #[test]
    fn print_accepts_offline_settings() {
        assert_eq!(
            parse(&["print", "--rate", "96000"]).unwrap(),
            Some(Commands::Print(OfflineArgs {
                rate: 96_000,
                block: 512,
            }))
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse(&["--loud"]).is_err());
        assert!(parse(&["render", "--rate"]).is_err());
        assert!(parse(&["render", "--block", "0"]).is_err());
        assert!(parse(&["render", "--block", "4096"]).is_err());
        assert!(parse(&["render", "many"]).is_err());
        assert!(parse(&["play", "--rate", "44100"]).is_err());
    }
}
