use clap::Parser;
use core::time::Duration;
use hub_rank::Result;
use hub_rank::config::Config;
use hub_rank::hosting::HostingClient;
use hub_rank::hub::NullHub;
use hub_rank::metrics::{self, MetricDeps};
use std::sync::Arc;

#[derive(Parser, Debug)]
pub struct MetricsArgs {}

/// Print the name and description of every registered metric.
pub fn list_metrics(_args: &MetricsArgs) -> Result<()> {
    // Enumeration needs no live collaborators
    let config = Arc::new(Config::default());
    let deps = MetricDeps {
        hub: Arc::new(NullHub),
        hosting: Arc::new(HostingClient::new(None, Duration::from_secs(config.api_timeout_secs))?),
        config,
    };

    let registry = metrics::builtin(&deps)?;
    let name_width = registry.names().map(str::len).max().unwrap_or(0);

    for metric in registry.iter() {
        println!("{:<name_width$}  {}", metric.name(), metric.description());
    }

    Ok(())
}
