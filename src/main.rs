use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::Level;

use respack::archive::{ArchivePacker, PackSummary};
use respack::codec::{Lz4Codec, NoCompression, ZlibCodec};
use respack::manifest::Manifest;

#[derive(Parser)]
#[command(
    name = "respack",
    about = "Pack named resource files into a single archive with perfect hash lookup",
    version,
    long_about = "Reads a manifest of tab-separated (name, path) pairs, compresses each \
                  file, and writes one archive blob indexed by a minimal perfect hash so \
                  any file can be located by name in constant time."
)]
struct Cli {
    /// Manifest file: one `name<TAB>path` pair per line
    input: PathBuf,

    /// Output archive file
    output: PathBuf,

    /// Compression codec for file payloads
    #[arg(short, long, value_enum, default_value = "lz4")]
    codec: CodecChoice,

    /// Set the logging level
    #[arg(short, long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CodecChoice {
    Lz4,
    Zlib,
    None,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(Level::from(cli.log_level))
        .with_target(false)
        .init();

    let manifest = Manifest::load(&cli.input)?;
    let summary = match cli.codec {
        CodecChoice::Lz4 => ArchivePacker::new(Lz4Codec).pack_to_file(&manifest, &cli.output)?,
        CodecChoice::Zlib => ArchivePacker::new(ZlibCodec).pack_to_file(&manifest, &cli.output)?,
        CodecChoice::None => {
            ArchivePacker::new(NoCompression).pack_to_file(&manifest, &cli.output)?
        }
    };

    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &PackSummary) {
    let ratio = if summary.original_bytes == 0 {
        1.0
    } else {
        summary.compressed_bytes as f64 / summary.original_bytes as f64
    };
    println!(
        "packed {} files: {} -> {} bytes ({:.1}%)",
        summary.files,
        summary.original_bytes,
        summary.compressed_bytes,
        ratio * 100.0
    );
}
