//! A tool to score the quality of machine-learning models hosted on a model hub.
//!
//! # Overview
//!
//! `hub-rank` takes a model URL (or bare `org/name` identifier) together with the
//! code repositories and datasets associated with it, runs a set of heuristic
//! quality metrics against hub metadata, code hosting data, and shallow clones
//! of the linked repositories, and produces bounded scores in `[0.0, 1.0]`.
//!
//! # Quick Start
//!
//! Score a model with its linked resources:
//!
//! ```bash
//! hub-rank score https://huggingface.co/org/model \
//!   --code https://github.com/org/model-code \
//!   --dataset https://huggingface.co/datasets/squad
//! ```
//!
//! This displays a color-coded console report with one row per metric.
//!
//! # Output Formats
//!
//! ```bash
//! hub-rank score org/model --json        # machine-readable report
//! hub-rank score org/model --color never # plain console report
//! ```
//!
//! # Selecting Metrics
//!
//! By default all registered metrics run. To run a subset:
//!
//! ```bash
//! hub-rank score org/model --metric bus_factor --metric ramp_up_time
//! ```
//!
//! `hub-rank metrics` lists the available metric names.
//!
//! # GitHub Integration
//!
//! The bus-factor metric queries the GitHub API for contributor counts and
//! commit recency. Unauthenticated access is rate-limited; provide a token to
//! raise the limit:
//!
//! ```bash
//! export GITHUB_TOKEN=ghp_xxxxxxxxxxxxxxxxxxxx
//! hub-rank score org/model --code https://github.com/org/model-code
//! ```
//!
//! # Configuration
//!
//! `hub-rank init` writes a default `hubrank.toml` with the hub base URL,
//! timeouts, analysis limits, scoring bands, and the known-organization
//! allowlist. Pass `--config PATH` to use a file elsewhere.

use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};
use hub_rank::Result;

mod commands;

use crate::commands::{InitArgs, MetricsArgs, ScoreArgs, init_config, list_metrics, score_model};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "hub-rank", version, about)]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: HubRankSubcommand,
}

#[derive(Subcommand, Debug)]
enum HubRankSubcommand {
    /// Score a model and its associated resources
    Score(Box<ScoreArgs>),
    /// List the registered quality metrics
    Metrics(MetricsArgs),
    /// Generate a default configuration file
    Init(InitArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        HubRankSubcommand::Score(score_args) => score_model(score_args).await,
        HubRankSubcommand::Metrics(metrics_args) => list_metrics(metrics_args),
        HubRankSubcommand::Init(init_args) => init_config(init_args),
    }
}
