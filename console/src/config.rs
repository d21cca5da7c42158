use anyhow::{bail, Result};
use clap::Parser;
use social_graph_core::{Weight, WeightRange};

use crate::render::OutputFormat;

/// Social network console - manage users and friendships, find paths and suggestions
#[derive(Parser, Debug)]
#[command(name = "social-graph")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Lowest accepted interaction weight
    #[arg(long, default_value_t = WeightRange::DEFAULT_MIN, env = "SOCIAL_GRAPH_MIN_WEIGHT")]
    pub min_weight: Weight,

    /// Highest accepted interaction weight
    #[arg(long, default_value_t = WeightRange::DEFAULT_MAX, env = "SOCIAL_GRAPH_MAX_WEIGHT")]
    pub max_weight: Weight,

    /// Print query results as JSON
    #[arg(long)]
    pub json: bool,

    /// Log filter (tracing EnvFilter syntax), written to stderr
    #[arg(long, default_value = "warn", env = "SOCIAL_GRAPH_LOG")]
    pub log_level: String,
}

impl Config {
    pub fn weight_range(&self) -> Result<WeightRange> {
        match WeightRange::new(self.min_weight, self.max_weight) {
            Some(range) => Ok(range),
            None => bail!(
                "invalid weight range {}..={}: min must be at least 1 and not above max",
                self.min_weight,
                self.max_weight
            ),
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}
