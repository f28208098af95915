use std::{
    io::{BufWriter, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

use bedmat::{Degeneracy, DecoderBuilder};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Decode a PLINK .bed file into a standardized genotype matrix (TSV on stdout)."
)]
struct CliArgs {
    /// Path to the SNP-major .bed file
    bed: PathBuf,

    /// Total number of samples in the file
    #[arg(short = 'n', long)]
    n_samples: usize,

    /// Strictly ascending variant indices (default: every variant in the file)
    #[arg(short, long, value_delimiter = ',')]
    variants: Option<Vec<usize>>,

    /// Sample indices, one output column each (default: every sample)
    #[arg(short, long, value_delimiter = ',')]
    samples: Option<Vec<usize>>,

    /// Write raw dosages (missing = -1) instead of standardized values
    #[arg(long)]
    raw: bool,

    /// Handling of zero-variance rows: propagate, zero or error
    #[arg(long, default_value = "propagate")]
    degeneracy: Degeneracy,

    #[arg(long, default_value = "Info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = CliArgs::parse();

    let log_level = args
        .log_level
        .parse::<log::LevelFilter>()
        .unwrap_or(log::LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_micros()
        .init();
    debug!("Arguments: {args:?}");

    let decoder = DecoderBuilder::default()
        .n_samples(args.n_samples)
        .degeneracy(args.degeneracy)
        .build()?;

    let variants = match args.variants {
        Some(variants) => variants,
        None => {
            let size = std::fs::metadata(&args.bed)
                .with_context(|| format!("Failed to stat {}", args.bed.display()))?
                .len();
            let n_variants = decoder.layout().num_variants(usize::try_from(size)?);
            (0..n_variants).collect()
        }
    };
    let samples = args
        .samples
        .unwrap_or_else(|| (0..args.n_samples).collect());

    info!(
        "Decoding {} variants x {} samples from {}",
        variants.len(),
        samples.len(),
        args.bed.display()
    );

    let mut matrix = vec![0.0f32; variants.len() * samples.len()];
    let mut reader = decoder
        .open(&args.bed)
        .with_context(|| format!("Failed to open {}", args.bed.display()))?;
    if args.raw {
        decoder.decode_dosages_into(&mut reader, &variants, &samples, &mut matrix)?;
    } else {
        decoder.decode_into(&mut reader, &variants, &samples, &mut matrix)?;
    }
    drop(reader);

    let mut out = BufWriter::new(std::io::stdout().lock());
    if !samples.is_empty() {
        for row in matrix.chunks_exact(samples.len()) {
            let line: Vec<String> = row.iter().map(ToString::to_string).collect();
            writeln!(out, "{}", line.join("\t"))?;
        }
    }
    out.flush()?;

    info!("Wrote {} rows", variants.len());
    Ok(())
}
