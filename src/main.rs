use anyhow::{Context, Result};
use avour::cli;

fn main() -> Result<()> {
    // Process CLI arguments first (before logging init for cleaner output)
    let options = cli::process_cli();

    // Routes log::info!() etc. to /tmp/avour_debug.log.
    // CLI --log-level wins over RUST_LOG, which wins over the config.
    avour::debug::init_log_bridge(options.log_level);

    let config = options.load_config().context("failed to load configuration")?;
    avour::debug::apply_config_log_level(config.log_level.to_level_filter());

    log::info!("Starting avour demo {:?}", options.demo);
    let result = options.demo.run(config);
    log::info!("Event loop exited");

    if let Err(ref e) = result {
        eprintln!("avour: error: {e:#}");
        #[cfg(target_os = "linux")]
        {
            let msg = format!("{e:?}").to_lowercase();
            if msg.contains("display")
                || msg.contains("wayland")
                || msg.contains("xcb")
                || msg.contains("x server")
                || msg.contains("compositor")
            {
                eprintln!(
                    "avour: hint: no display server found; ensure DISPLAY (X11) or \
                     WAYLAND_DISPLAY (Wayland) is set and a compositor is running"
                );
            }
        }
    }
    result.map_err(Into::into)
}
