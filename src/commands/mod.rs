mod common;
mod init;
mod metrics;
mod score;

pub use init::{InitArgs, init_config};
pub use metrics::{MetricsArgs, list_metrics};
pub use score::{ScoreArgs, score_model};
