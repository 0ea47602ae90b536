use super::common::{Common, CommonArgs};
use clap::Parser;
use futures_util::future::join_all;
use hub_rank::Result;
use hub_rank::bundle::ResourceBundle;
use hub_rank::metrics::{self, Metric, MetricResult};
use hub_rank::reports::{ScoreReport, generate_console, generate_json};

#[derive(Parser, Debug)]
pub struct ScoreArgs {
    /// Model URL or bare identifier (format: `https://huggingface.co/org/name` or `org/name`)
    #[arg(value_name = "MODEL")]
    pub model: String,

    /// Code repository URL associated with the model (repeatable)
    #[arg(long, value_name = "URL")]
    pub code: Vec<String>,

    /// Dataset URL or identifier associated with the model (repeatable)
    #[arg(long, value_name = "URL")]
    pub dataset: Vec<String>,

    /// Run only the named metric (repeatable) [default: all registered metrics]
    #[arg(long, value_name = "NAME")]
    pub metric: Vec<String>,

    /// Output the report as JSON instead of a console table
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn score_model(args: &ScoreArgs) -> Result<()> {
    let common = Common::new(&args.common)?;
    let registry = metrics::builtin(&common.deps)?;

    let bundle = ResourceBundle::new(args.model.clone(), args.code.clone(), args.dataset.clone())?;

    // Resolve metric names up front so a typo fails before any network work
    let selected: Vec<&dyn Metric> = if args.metric.is_empty() {
        registry.iter().collect()
    } else {
        args.metric.iter().map(|name| registry.get(name)).collect::<Result<_>>()?
    };

    let scores = join_all(selected.iter().map(|metric| metric.compute(&bundle))).await;
    let results: Vec<(&'static str, MetricResult)> = selected.iter().map(|metric| metric.name()).zip(scores).collect();

    let report = ScoreReport::new(bundle.model_url(), bundle.model_id(), results);

    let mut output = String::new();
    if args.json {
        generate_json(&report, &mut output)?;
    } else {
        generate_console(&report, &common.deps.config, common.color, &mut output)?;
    }
    print!("{output}");

    Ok(())
}
