//! Demo entry point: wire the SDL platform and the gradient module into the
//! platform loop and run it until quit.

mod sim;

use framepump_core::{AudioConfig, Runner};
use framepump_sdl::SdlPlatform;
use sim::GradientSim;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let audio = AudioConfig::default();
    let platform = SdlPlatform::new("framepump gradient", 1920, 1080, &audio)?;

    let mut runner = Runner::new(platform, GradientSim::new(), audio)?;
    runner.run();

    log::info!("bye");
    Ok(())
}
