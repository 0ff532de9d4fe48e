use clap::Parser;
use humansize::{format_size, BINARY};
use std::path::PathBuf;
use std::process;

use zstd_bridge::file;

// This program compresses each given file into a `.zst` file next to it,
// and reports how much space was saved.
#[derive(Parser, Debug)]
#[command(author, version, about = "Compress files with zstd")]
struct Args {
    /// Compression level
    #[arg(short, long, default_value_t = zstd_bridge::DEFAULT_COMPRESSION_LEVEL, allow_hyphen_values = true)]
    level: i32,

    /// Output file (only with a single input file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Files to compress
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if args.output.is_some() && args.files.len() > 1 {
        eprintln!("--output requires a single input file");
        process::exit(2);
    }

    let mut failed = false;
    for source in &args.files {
        let target = match &args.output {
            Some(output) => output.clone(),
            None => file::default_target(source),
        };

        match file::compress_file(source, &target, args.level) {
            Ok(report) => println!(
                "Compressed {} -> {}: {} -> {} ({:.2}% saved)",
                source.display(),
                target.display(),
                format_size(report.original_size, BINARY),
                format_size(report.compressed_size, BINARY),
                report.saved_percent()
            ),
            Err(e) => {
                eprintln!("Error compressing {}: {}", source.display(), e);
                failed = true;
            }
        }
    }

    if failed {
        process::exit(1);
    }
}
