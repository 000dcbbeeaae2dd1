use clap::{Parser, Subcommand, ValueEnum};

use crate::store::Encoding;

const PASSFORM_LONG_VERSION: &str = concat!(
    "version: ", env!("CARGO_PKG_VERSION"), "\n",
    "git sha: ", env!("PASSFORM_GIT_SHA"), "\n",
    "build time (UTC): ", env!("PASSFORM_BUILD_TIME"), "\n",
    "target: ", env!("PASSFORM_TARGET")
);

#[derive(Parser)]
#[command(
    name = "passform",
    version = env!("CARGO_PKG_VERSION"),
    long_version = PASSFORM_LONG_VERSION,
    about = "🔑 passform: generate, save and look up website passwords"
)]
pub struct Cli {
    /// Store file path override
    #[arg(long, global = true)]
    pub path: Option<String>,
    /// Store encoding override
    #[arg(long, value_enum, global = true)]
    pub encoding: Option<EncodingArg>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a random password and copy it to the clipboard
    Generate {
        /// Do not copy to clipboard
        #[arg(long)]
        no_copy: bool,
        /// Print the password to stdout
        #[arg(long)]
        echo: bool,
    },
    /// Save a website credential (prompts for anything not given)
    Save {
        #[arg(long)]
        website: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Stored as "-" when empty
        #[arg(long)]
        username: Option<String>,
        #[arg(long, conflicts_with = "generate")]
        password: Option<String>,
        /// Generate the password instead of prompting
        #[arg(long)]
        generate: bool,
        /// Do not ask for confirmation
        #[arg(long)]
        yes: bool,
        /// Do not copy a generated password to the clipboard
        #[arg(long)]
        no_copy: bool,
    },
    /// Look up a website (exact match) and copy its password
    Lookup {
        website: String,
        /// Do not copy to clipboard
        #[arg(long)]
        no_copy: bool,
        /// Print the password to stdout
        #[arg(long)]
        echo: bool,
    },
    /// Launch the interactive terminal form
    Form,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum EncodingArg {
    Document,
    Tabular,
}

impl From<EncodingArg> for Encoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Document => Encoding::Document,
            EncodingArg::Tabular => Encoding::Tabular,
        }
    }
}
