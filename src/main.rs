use anyhow::Result;
use clap::Parser;
use daypilot_icon::icon_gen::{self, Args};

fn main() -> Result<()> {
    let args = Args::parse();

    icon_gen::generate_icons(args)
}
