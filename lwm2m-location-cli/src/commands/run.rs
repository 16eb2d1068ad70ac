//! Run command - serve the location resource until interrupted.

use std::path::PathBuf;

use lwm2m_location::config::ConfigFile;
use lwm2m_location::location::{
    ChangeEvent, LocationResource, LocationResourceConfig, ResourceChangeBroadcaster,
    ResourceProvider,
};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the run command.
#[derive(Debug, Default)]
pub struct RunArgs {
    pub url: Option<String>,
    pub interval: Option<u64>,
    pub config: Option<PathBuf>,
    pub debug: bool,
}

impl RunArgs {
    /// Overlay command-line flags onto the loaded config. Flags win.
    fn apply_overrides(&self, config: &mut ConfigFile) {
        if let Some(url) = &self.url {
            config.source.url = url.clone();
        }
        if let Some(interval) = self.interval {
            config.refresh.interval = interval;
        }
    }
}

/// Run the run command.
pub fn run(args: RunArgs) -> Result<(), CliError> {
    let mut runner = CliRunner::new(args.config.as_deref(), args.debug)?;
    runner.log_startup("run");

    args.apply_overrides(runner.config_mut());

    let resource_config = runner.config().resource_config();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("lwm2m-location")
        .build()
        .map_err(CliError::Runtime)?;

    runtime.block_on(serve(resource_config))
}

/// Start the resource and report changes until Ctrl-C.
async fn serve(config: LocationResourceConfig) -> Result<(), CliError> {
    let mut resource = LocationResource::start(&config)?;
    let mut events = resource.subscribe();

    println!(
        "Polling {} every {}s (Ctrl-C to stop)",
        config.source_url,
        config.refresh_interval.as_secs()
    );

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = &mut shutdown => {
                if let Err(e) = result {
                    warn!(error = %e, "Failed to listen for Ctrl-C, shutting down");
                }
                info!("Shutdown requested");
                break;
            }
            event = events.recv() => match event {
                Ok(event) => report_change(&resource, &event),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Change events dropped, observer fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    }

    resource.shutdown().await;
    info!("Location resource stopped");
    Ok(())
}

/// Read back every changed resource, as an observer would.
fn report_change(resource: &LocationResource, event: &ChangeEvent) {
    info!(changed = %event, "Location changed");

    for id in event.resource_ids() {
        match resource.read_resource(id) {
            Ok(value) => {
                info!(resource_id = id, value = %value, "Notify");
                println!("  /6/0/{} = {}", id, value);
            }
            Err(e) => warn!(resource_id = id, error = %e, "Read-back failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let mut config = ConfigFile::default();
        config.source.url = "http://10.0.0.7:5000/get-location".to_string();
        config.refresh.interval = 30;

        let args = RunArgs {
            url: Some("http://10.0.0.9:8080/pos".to_string()),
            interval: Some(5),
            ..Default::default()
        };
        args.apply_overrides(&mut config);

        assert_eq!(config.source.url, "http://10.0.0.9:8080/pos");
        assert_eq!(config.refresh.interval, 5);
    }

    #[test]
    fn test_absent_flags_keep_config() {
        let mut config = ConfigFile::default();
        config.source.url = "http://10.0.0.7:5000/get-location".to_string();
        config.source.timeout = 4;
        config.refresh.interval = 30;
        let expected = config.clone();

        RunArgs::default().apply_overrides(&mut config);

        assert_eq!(config, expected);
    }

    #[test]
    fn test_only_interval_flag() {
        let mut config = ConfigFile::default();
        let args = RunArgs {
            interval: Some(60),
            ..Default::default()
        };
        args.apply_overrides(&mut config);

        assert_eq!(config.refresh.interval, 60);
        assert_eq!(config.source.url, ConfigFile::default().source.url);
    }
}
