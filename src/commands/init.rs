use camino::Utf8PathBuf;
use clap::Parser;
use hub_rank::Result;
use hub_rank::config::{Config, DEFAULT_CONFIG_FILE};
use ohno::IntoAppError;
use std::fs;

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output configuration file path
    #[arg(value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub output: Utf8PathBuf,
}

pub fn init_config(args: &InitArgs) -> Result<()> {
    fs::write(&args.output, Config::default_toml()).into_app_err_with(|| format!("could not write '{}'", args.output))?;
    println!("Generated default configuration file: {}", args.output);
    Ok(())
}
