use std::error::Error;

use girderviz::{open_or_warn, render_summary, run_girder_diagram, BridgeConfig, CONFIG_FILE};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // The element chain, span and output path all come from the configuration;
    // without a bridge.json the screened bridge is drawn.
    let config = BridgeConfig::load_or_default(CONFIG_FILE)?;

    // Any missing force value aborts here, before an image exists.
    let outcome = run_girder_diagram(&config)?;
    println!("{}", render_summary(&outcome.diagram));

    // A missing desktop opener is only logged; the artifact is already written.
    if config.show {
        open_or_warn(&outcome.output);
    }

    Ok(())
}
