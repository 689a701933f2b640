//! Opinion-Dynamics Simulation CLI
//!
//! Builds a model from a TOML configuration and/or CLI flags, drives it to
//! the horizon, and writes the run report (and optionally the move log) to
//! the output directory.

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Deserialize;

use sim_core::{
    output, setup, ActivationPolicy, Graph, NetworkModel, RunConfig, SelectionKind, TimingKind,
    Topology,
};
use sim_events::RunReport;

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "opinion_sim")]
#[command(about = "An event-driven opinion-dynamics simulation engine")]
struct Args {
    /// TOML run configuration; flags below override individual fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Number of nodes (ignored when --edges is given)
    #[arg(long)]
    nodes: Option<usize>,

    /// Simulation end time
    #[arg(long)]
    horizon: Option<f64>,

    /// Interval between value snapshots
    #[arg(long)]
    log_interval: Option<f64>,

    /// Neighbor selection policy
    #[arg(long, value_enum)]
    selection: Option<SelectionKind>,

    /// Inter-event-time policy
    #[arg(long, value_enum)]
    timing: Option<TimingKind>,

    /// Activation rule
    #[arg(long, value_enum)]
    activation: Option<ActivationPolicy>,

    /// JSON edge list describing the topology (default: a cycle)
    #[arg(long)]
    edges: Option<PathBuf>,

    /// Record every move to events.jsonl
    #[arg(long)]
    events: bool,

    /// Output directory
    #[arg(long, default_value = "output")]
    output: PathBuf,
}

/// On-disk topology description: node count plus undirected edges.
#[derive(Debug, Deserialize)]
struct EdgeListFile {
    nodes: usize,
    edges: Vec<(usize, usize)>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(e) = run(Args::parse()) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => RunConfig::from_file(path)?,
        None => RunConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(nodes) = args.nodes {
        config.nodes = nodes;
    }
    if let Some(horizon) = args.horizon {
        config.horizon = horizon;
    }
    if let Some(log_interval) = args.log_interval {
        config.log_interval = log_interval;
    }
    if let Some(selection) = args.selection {
        config.selection = selection;
    }
    if let Some(timing) = args.timing {
        config.timing = timing;
    }
    if let Some(activation) = args.activation {
        config.activation = activation;
    }
    if args.events {
        config.event_logging = true;
    }
    config.validate()?;

    let graph = match &args.edges {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            let parsed: EdgeListFile = serde_json::from_str(&content)?;
            Graph::from_edges(parsed.nodes, &parsed.edges)?
        }
        None => Graph::cycle(config.nodes)?,
    };
    config.nodes = graph.node_count();

    // Feature sampling draws from its own stream so that model-internal
    // draws stay aligned across topologies of the same size.
    let mut feature_rng = SmallRng::seed_from_u64(config.seed.wrapping_add(1));
    let features = setup::build_features(&config, &mut feature_rng);

    tracing::info!(
        nodes = config.nodes,
        horizon = config.horizon,
        seed = config.seed,
        selection = ?config.selection,
        timing = ?config.timing,
        "starting simulation"
    );

    let mut model = NetworkModel::new(graph, &features, config.policy_set(), config.model_config())?;
    let convergence = model.run_simulation()?;

    tracing::info!(
        convergence_rate = convergence.convergence_rate,
        final_error = ?convergence.final_error(),
        moves = model.agents().iter().map(|a| a.move_count()).sum::<u64>(),
        "simulation complete"
    );

    let report = RunReport {
        seed: config.seed,
        horizon: config.horizon,
        log_interval: config.log_interval,
        node_count: config.nodes,
        final_values: model.get_values(),
        snapshots: model.time_series().to_vec(),
        convergence,
    };
    let report_path = output::write_report(&args.output, &report)?;
    tracing::info!(path = %report_path.display(), "wrote run report");

    if config.event_logging {
        let events_path = output::write_event_log(&args.output, model.event_log())?;
        tracing::info!(path = %events_path.display(), "wrote move log");
    }

    Ok(())
}
