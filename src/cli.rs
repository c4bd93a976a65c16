// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::scenes::Variant;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "shape-drift")]
#[command(about = "Drifting 3D shape background with pointer parallax", long_about = None)]
pub struct Cli {
    /// Shape set to animate
    #[arg(long, value_enum)]
    pub variant: Option<Variant>,

    /// Number of shapes (defaults to 16 geometric, 12 petals)
    #[arg(long = "shapes")]
    pub shape_count: Option<usize>,

    /// Seed for a reproducible layout
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON file with animator settings; flags override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Show the debug overlay
    #[arg(long, default_value = "false")]
    pub hud: bool,

    /// Initial window width in logical pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Initial window height in logical pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Exit after this many seconds
    #[arg(long)]
    pub duration: Option<f32>,
}
