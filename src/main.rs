use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};

use huffpack::config::CodecConfig;
use huffpack::HuffmanCodec;

#[derive(Parser)]
#[command(name = "huffpack", version, about = "Huffman-compress and decompress files")]
struct Cli {
    /// JSON codec configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compress INPUT into OUTPUT
    Encode {
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        /// Print the code assigned to each symbol
        #[arg(long)]
        show_codes: bool,
    },
    /// Decompress INPUT into OUTPUT
    Decode {
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => CodecConfig::from_json_file(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => CodecConfig::default(),
    };
    let codec = HuffmanCodec::new(config);

    match cli.command {
        Command::Encode {
            input,
            output,
            show_codes,
        } => {
            let data = fs::read(&input).with_context(|| format!("read {}", input.display()))?;
            if show_codes {
                for (symbol, code) in codec.code_table(&data)?.iter() {
                    println!("{:#04x} {:?} {}", symbol, symbol as char, code);
                }
            }
            let encoded = codec.encode(&data).context("encode input")?;
            fs::write(&output, &encoded)
                .with_context(|| format!("write {}", output.display()))?;
            let ratio = if data.is_empty() {
                1.0
            } else {
                encoded.len() as f64 / data.len() as f64
            };
            info!(
                original = data.len(),
                compressed = encoded.len(),
                ratio,
                "compressed {}",
                input.display()
            );
        }
        Command::Decode { input, output } => {
            let data = fs::read(&input).with_context(|| format!("read {}", input.display()))?;
            let decoded = codec.decode(&data).context("decode input")?;
            fs::write(&output, &decoded)
                .with_context(|| format!("write {}", output.display()))?;
            info!(
                compressed = data.len(),
                restored = decoded.len(),
                "decompressed {}",
                input.display()
            );
        }
    }

    Ok(())
}
