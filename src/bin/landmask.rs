use anyhow::Result;
use clap::Parser;
use landmask::driver::DEFAULT_TABLE_NAME;
use landmask::{generate_mask_table, BoundaryConfig, Config, MaskConvention};
use log::info;
use std::path::PathBuf;

/// Generate a mask table that eliminates land-only blocks from an ocean model decomposition.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Topography file (JSON) holding a `mask` or `wet` field
    #[arg(short = 't', long = "topofile")]
    topography: PathBuf,

    /// Number of compute tasks to run on
    #[arg(short = 'n', long)]
    npes: usize,

    /// Largest number of I/O tasks to try
    #[arg(long, default_value = "1")]
    tiopes: usize,

    /// The domain is periodic along x
    #[arg(long)]
    rx: bool,

    /// The domain is periodic along y
    #[arg(long)]
    ry: bool,

    /// The northern boundary is a tripolar fold
    #[arg(long)]
    tn: bool,

    /// Directory the mask table is written to
    #[arg(short = 'o', long, default_value = ".")]
    output_dir: PathBuf,

    /// Which input value marks an ocean cell: `one-is-active` or `zero-is-active`
    #[arg(long, default_value = "one-is-active")]
    convention: MaskConvention,

    /// Name of the mask table file
    #[arg(long, default_value = DEFAULT_TABLE_NAME)]
    filename: String,
}

fn main() -> Result<()> {
    landmask::initialize_logger();
    let args = Args::parse();

    let mut config = Config::new(args.npes, args.tiopes);
    config.convention = args.convention;
    config.boundary = BoundaryConfig {
        reentrant_x: args.rx,
        reentrant_y: args.ry,
        tripolar_n: args.tn,
    };

    let outcome = generate_mask_table(
        &args.topography,
        &config,
        &args.output_dir,
        &args.filename,
    )?;

    info!(
        "layout {} with {} masked blocks, I/O layout {}, written to {:?}",
        outcome.decomposition.layout,
        outcome.table.nmask(),
        outcome.decomposition.io_layout,
        outcome.path
    );

    Ok(())
}
