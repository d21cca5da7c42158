//! social-graph: interactive console for the in-memory social network.
//!
//! Reads menu choices from stdin, writes results to stdout. Logs go to
//! stderr so piped sessions stay clean.

use std::io;

use clap::Parser;
use social_graph_core::SocialGraph;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;
mod render;
mod session;

use config::Config;
use session::Session;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let weights = config.weight_range()?;
    tracing::info!(
        min_weight = weights.min(),
        max_weight = weights.max(),
        json = config.json,
        "starting console"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(
        SocialGraph::with_weight_range(weights),
        stdin.lock(),
        stdout.lock(),
        config.output_format(),
    );
    session.run()?;

    tracing::info!(
        users = session.graph().user_count(),
        friendships = session.graph().edge_count(),
        "session ended"
    );
    Ok(())
}
