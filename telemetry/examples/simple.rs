use tracing::{debug, error, info, trace, warn};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let telemetry = verstamp_telemetry::TelemetryConfig::new().init();

    trace!("TRACE");
    debug!("DEBUG");
    info!("INFO");
    warn!("WARN");
    error!("ERROR");

    telemetry.flush_blocking();

    Ok(())
}
