use anyhow::Result;
use bgm_icons::icon_gen;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "bgm-icons",
    about = "Generate placeholder PNG icons for the HI MY BGM extension"
)]
struct Args {
    /// Output directory for the generated icons.
    #[clap(short, long, value_name = "DIR", default_value = "assets")]
    output: PathBuf,

    /// Skip raster drawing and write the minimal 1x1 placeholder PNG for
    /// every icon slot instead.
    #[clap(long)]
    minimal: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    icon_gen::generate_icons(icon_gen::Args {
        output: args.output,
        minimal: args.minimal,
    })
}
