use std::error::Error;

use girderviz::{open_or_warn, run_bridge_model, BridgeConfig, CONFIG_FILE};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = BridgeConfig::load_or_default(CONFIG_FILE)?;

    // The output directory is not created here: exporting into a missing
    // directory is reported as an error.
    let outcome = run_bridge_model(&config)?;

    // A missing desktop opener is only logged; the artifact is already written.
    if config.show {
        open_or_warn(&outcome.output);
    }

    Ok(())
}
