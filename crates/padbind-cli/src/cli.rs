use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Debug, Subcommand, PartialEq)]
pub(crate) enum Command {
    /// Parse a community mapping database and report statistics.
    Check {
        /// The database file to parse
        #[clap(short, long)]
        db: PathBuf,
    },
    /// Resolve the full input vocabulary for one pad.
    Resolve {
        /// The community mapping database file
        #[clap(long)]
        db: PathBuf,

        /// Directory containing override tables (userControllers.json,
        /// n64Controllers.json, ...)
        #[clap(long)]
        overrides: Option<PathBuf>,

        /// Hardware GUID of the pad
        #[clap(long)]
        guid: String,

        /// Target console identifier (n64, megadrive, snes, ...)
        #[clap(long)]
        console: String,

        /// Backend driver name
        #[clap(long, default_value = "sdl2")]
        driver: String,

        /// The pad was enumerated by the virtual fixed-layout API
        #[clap(long)]
        virtual_pad: bool,

        /// Subtype code reported by the virtual API (1 = gamepad,
        /// 2 = wheel, 3 = arcade stick, ...)
        #[clap(long, requires = "virtual_pad")]
        subtype: Option<u8>,

        /// Raw device index of the pad
        #[clap(long, default_value_t = 0)]
        index: u32,

        /// Count of virtual-API devices already enumerated
        #[clap(long, default_value_t = 0)]
        virtual_count: u32,

        /// Enable the console-accurate special-pad mapping
        #[clap(long)]
        activation_switch: bool,

        /// Prefer analog-stick-as-dpad directional entries
        #[clap(long)]
        analog_dpad: bool,

        /// Arcade-stick mode
        #[clap(long)]
        arcade_stick: bool,
    },
}

/// Resolve which physical inputs satisfy a console's logical buttons.
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub(crate) struct Cli {
    /// Turn debugging information on
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// The command to run
    #[clap(subcommand)]
    pub command: Command,
}
