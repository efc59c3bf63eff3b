//! SVG Utils CLI
//!
//! Usage:
//!   svg-utils [OPTIONS] <COMMAND>
//!
//! Commands:
//!   demo      Render the sample drawing
//!   data-uri  Wrap SVG markup in a data URI
//!   base64    UTF-8 safe base64 encode/decode
//!
//! Options:
//!   -c, --config <FILE>  Serialization config (TOML format)
//!   -v, --verbose        Debug logging on stderr
//!   -h, --help           Print help

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use svg_utils::{
    decode_base64, demo_drawing, encode_base64, encode_html, markup_to_data_uri,
    markup_to_data_uri64, to_data_uri, to_data_uri64, SvgConfig, SvgDocument,
};

#[derive(Parser)]
#[command(name = "svg-utils")]
#[command(about = "Build SVG fragments and encode them as data URIs")]
struct Cli {
    /// Serialization config file (TOML format)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the sample drawing with paths, gradients and a label
    Demo {
        #[arg(short, long, value_enum, default_value_t = Format::Markup)]
        format: Format,
    },
    /// Wrap SVG markup from FILE (or stdin) in a data URI
    DataUri {
        input: Option<PathBuf>,

        /// Use base64 instead of percent-encoding
        #[arg(short, long)]
        base64: bool,
    },
    /// Base64 encode or decode text from FILE (or stdin)
    Base64 {
        #[arg(value_enum)]
        direction: Direction,

        input: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Markup,
    DataUri,
    DataUri64,
}

#[derive(Clone, Copy, ValueEnum)]
enum Direction {
    Encode,
    Decode,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => match SvgConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => SvgConfig::default(),
    };

    match run(cli.command, config) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(command: Command, config: SvgConfig) -> Result<String, Box<dyn std::error::Error>> {
    match command {
        Command::Demo { format } => {
            let mut doc = SvgDocument::with_config(config);
            let svg = demo_drawing(&mut doc)?;
            let output = match format {
                Format::Markup => encode_html(&doc, svg)?,
                Format::DataUri => to_data_uri(&doc, svg)?,
                Format::DataUri64 => to_data_uri64(&doc, svg)?,
            };
            Ok(output)
        }
        Command::DataUri { input, base64 } => {
            let markup = read_input(input.as_deref())?;
            let markup = markup.trim_end();
            Ok(if base64 {
                markup_to_data_uri64(markup)
            } else {
                markup_to_data_uri(markup)
            })
        }
        Command::Base64 { direction, input } => {
            let text = read_input(input.as_deref())?;
            Ok(match direction {
                Direction::Encode => encode_base64(&text),
                Direction::Decode => decode_base64(&text)?,
            })
        }
    }
}

fn read_input(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}
