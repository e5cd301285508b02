use anyhow::Result;
use clap::Args;
use jet_core::engines::EngineSpec;
use jet_core::EngineProfile;
use serde::Serialize;

use super::print_json;
use crate::report::render_engine;

#[derive(Args, Debug, Default)]
pub struct EnginesArgs {
    /// Print the profiles as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct EngineListing {
    name: EngineProfile,
    slug: &'static str,
    spec: &'static EngineSpec,
    jet_sizes: Vec<u32>,
}

pub fn run(args: EnginesArgs) -> Result<()> {
    if args.json {
        let listing: Vec<EngineListing> = EngineProfile::ALL
            .into_iter()
            .map(|engine| EngineListing {
                name: engine,
                slug: engine.slug(),
                spec: engine.spec(),
                jet_sizes: engine.spec().jet_sizes.sizes(),
            })
            .collect();
        return print_json(&listing);
    }

    for (i, engine) in EngineProfile::ALL.into_iter().enumerate() {
        if i > 0 {
            println!();
        }
        print!("{}", render_engine(engine, engine.spec()));
    }
    Ok(())
}
