use clap::{Parser, Subcommand};

use bestcode_cli::commands::{encode_ops, run_ops, settings_ops};
use bestcode_cli::trace_init::init_tracing;

#[derive(Parser)]
#[command(name = "bestcode", about = "Find the lowest-cost key sequence for a text")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode the input file named by a run config and write the report
    Run {
        /// Path to the run config TOML
        config: String,
        /// Write the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Encode a short text and print the chosen words and codes
    Encode {
        /// Path to the RIME-style dictionary
        #[arg(long)]
        dict: String,
        /// Path to the key-pair cost file
        #[arg(long)]
        costs: String,
        /// Linking strategy: nogap, spaceorpunct or jd6
        #[arg(long, default_value = "nogap")]
        strat: String,
        /// Text to encode
        text: String,
    },

    /// Print the intrinsic cost of a code
    Cost {
        /// Path to the key-pair cost file
        costs_file: String,
        /// Code to price
        code: String,
    },

    /// Print the code a word receives after disambiguation
    Lookup {
        /// Path to the RIME-style dictionary
        dict_file: String,
        /// Path to the key-pair cost file
        costs_file: String,
        /// Word to look up
        word: String,
    },

    /// Print the default engine settings TOML
    SettingsExport,

    /// Validate an engine settings TOML file
    SettingsValidate {
        /// Path to the settings TOML
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Command::Run { config, json } => run_ops::run_cmd(&config, json),
        Command::Encode {
            dict,
            costs,
            strat,
            text,
        } => encode_ops::encode_cmd(&dict, &costs, &strat, &text),
        Command::Cost { costs_file, code } => encode_ops::cost_cmd(&costs_file, &code),
        Command::Lookup {
            dict_file,
            costs_file,
            word,
        } => encode_ops::lookup_cmd(&dict_file, &costs_file, &word),
        Command::SettingsExport => settings_ops::settings_export(),
        Command::SettingsValidate { file } => settings_ops::settings_validate(&file),
    }
}
