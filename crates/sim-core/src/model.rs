//! Network Model
//!
//! Assembles a topology, a per-node feature list, and the policy set into a
//! runnable simulation, drives it to the horizon, and exposes the results.
//!
//! The model is the single driver of the scheduler: it pops the next due
//! resumption and executes it, so exactly one logical process (one agent, or
//! the periodic logger) runs at any instant. All randomness flows through
//! one seeded RNG owned by the model, consumed in a fixed order (agent
//! construction in id order, then events in schedule order), which makes a
//! run fully reproducible from its seed.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use sim_events::{AgentFeatures, ConvergenceReport, MoveEvent, ValueSnapshot};

use crate::agent::Agent;
use crate::error::SimError;
use crate::logger::PeriodicLogger;
use crate::metrics;
use crate::policy::{ActivationPolicy, PolicySet};
use crate::scheduler::{EventScheduler, ProcessToken};
use crate::topology::{NodeId, Topology};

/// Run-level parameters of one model instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Simulation end time. Events at or past the horizon never fire.
    pub horizon: f64,
    /// Cadence of the periodic value logger.
    pub log_interval: f64,
    /// Record every move as a [`MoveEvent`].
    pub event_logging: bool,
    /// Record the periodic snapshot series (required for convergence
    /// measurement).
    pub time_logging: bool,
    /// Seed for the model RNG.
    pub seed: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            horizon: 50.0,
            log_interval: 1.0,
            event_logging: false,
            time_logging: true,
            seed: 42,
        }
    }
}

/// Owns the agent population and drives one simulation run.
pub struct NetworkModel<T: Topology> {
    topology: T,
    agents: Vec<Agent>,
    scheduler: EventScheduler,
    activation: ActivationPolicy,
    config: ModelConfig,
    initial_values: Vec<f64>,
    logger: Option<PeriodicLogger>,
    event_log: Vec<MoveEvent>,
    rng: SmallRng,
}

impl<T: Topology> NetworkModel<T> {
    /// Builds the model and activates the initially-active agents.
    ///
    /// Fails fast on any configuration error: feature/topology size
    /// mismatch, empty topology, isolated nodes, non-positive speeds, or an
    /// unusable run window. Nothing is silently corrected.
    pub fn new(
        topology: T,
        features: &[AgentFeatures],
        policies: PolicySet,
        config: ModelConfig,
    ) -> Result<Self, SimError> {
        if !config.horizon.is_finite()
            || config.horizon <= 0.0
            || !config.log_interval.is_finite()
            || config.log_interval <= 0.0
        {
            return Err(SimError::InvalidRunWindow);
        }
        let node_count = topology.node_count();
        if node_count == 0 {
            return Err(SimError::EmptyTopology);
        }
        if features.len() != node_count {
            return Err(SimError::FeatureCountMismatch {
                expected: node_count,
                found: features.len(),
            });
        }

        let mut rng = SmallRng::seed_from_u64(config.seed);
        let mut scheduler = EventScheduler::new();

        // The logger is registered before any agent is activated, so under
        // the FIFO tie-break the t=0 snapshot always precedes same-tick
        // moves.
        let logger = if config.time_logging {
            scheduler.schedule_after(0.0, ProcessToken::Logger)?;
            Some(PeriodicLogger::new(config.log_interval))
        } else {
            None
        };

        let mut agents = Vec::with_capacity(node_count);
        for (id, feature) in features.iter().enumerate() {
            agents.push(Agent::new(id, feature, &topology, &policies, &mut rng)?);
        }
        let initial_values: Vec<f64> = agents.iter().map(|a| a.value).collect();

        let mut model = Self {
            topology,
            agents,
            scheduler,
            activation: policies.activation,
            config,
            initial_values,
            logger,
            event_log: Vec::new(),
            rng,
        };
        for (id, feature) in features.iter().enumerate() {
            if feature.state.is_active() {
                model.activate(id)?;
            }
        }
        Ok(model)
    }

    /// Activates a dormant agent and schedules its first move after its
    /// pre-sampled wait. Returns false if the agent was already active;
    /// re-activation has no observable effect.
    pub fn activate(&mut self, id: NodeId) -> Result<bool, SimError> {
        if id >= self.agents.len() {
            return Err(SimError::UnknownNode(id));
        }
        let now = self.scheduler.now();
        if !self.agents[id].activate(now) {
            return Ok(false);
        }
        let wait = self.agents[id].next_wait();
        let at = self.scheduler.schedule_after(wait, ProcessToken::Agent(id))?;
        self.agents[id].arm(wait, at);
        tracing::debug!(agent = id, time = now, next_move_at = at, "agent activated");
        Ok(true)
    }

    /// Drives the scheduler until no event remains before the horizon, then
    /// advances the clock to the horizon.
    pub fn run_to_horizon(&mut self) -> Result<(), SimError> {
        let horizon = self.config.horizon;
        while let Some((now, token)) = self.scheduler.pop_due(horizon) {
            match token {
                ProcessToken::Agent(id) => self.perform_move(id, now)?,
                ProcessToken::Logger => self.record_snapshot(now)?,
            }
        }
        self.scheduler.finish_at(horizon);
        Ok(())
    }

    /// Runs to the horizon and measures convergence over the snapshot
    /// series. This is the only externally observable product of a run
    /// besides the logs.
    pub fn run_simulation(&mut self) -> Result<ConvergenceReport, SimError> {
        self.run_to_horizon()?;
        let logger = self.logger.as_ref().ok_or(SimError::SnapshotsDisabled)?;
        metrics::measure(logger.snapshots(), &self.initial_values)
    }

    /// One fired move: select a partner, interact, account, re-arm.
    fn perform_move(&mut self, id: NodeId, now: f64) -> Result<(), SimError> {
        let selection = self.agents[id].selection_policy();
        let interaction = self.agents[id].interaction_policy();
        let timing = self.agents[id].timing_policy();

        let partner = selection.select(&self.agents[id], &mut self.rng);
        if partner >= self.agents.len() {
            return Err(SimError::UnknownNode(partner));
        }
        if self.activation == ActivationPolicy::OnContact {
            self.activate(partner)?;
        }

        let (mover, other) = pair_mut(&mut self.agents, id, partner)?;
        interaction.apply(mover, other);
        mover.finish_move(now);
        let value = mover.value;

        if self.config.event_logging {
            self.event_log.push(MoveEvent::new(now, id, partner, value));
        }

        let wait = timing.next_wait(self.agents[id].speed(), &mut self.rng);
        let at = self.scheduler.schedule_after(wait, ProcessToken::Agent(id))?;
        self.agents[id].arm(wait, at);
        Ok(())
    }

    /// One logger firing: observe every agent, schedule the next firing.
    fn record_snapshot(&mut self, now: f64) -> Result<(), SimError> {
        let values = self.get_values();
        if let Some(logger) = self.logger.as_mut() {
            logger.record(now, values);
            let interval = logger.interval();
            self.scheduler
                .schedule_after(interval, ProcessToken::Logger)?;
        }
        Ok(())
    }

    /// Current value of every agent, ordered by node id.
    pub fn get_values(&self) -> Vec<f64> {
        self.agents.iter().map(|a| a.value).collect()
    }

    /// Current simulation time.
    pub fn current_time(&self) -> f64 {
        self.scheduler.now()
    }

    /// The value vector captured before any event fired.
    pub fn initial_values(&self) -> &[f64] {
        &self.initial_values
    }

    /// The snapshot series recorded so far (empty when time logging is
    /// disabled).
    pub fn time_series(&self) -> &[ValueSnapshot] {
        self.logger.as_ref().map_or(&[], |l| l.snapshots())
    }

    /// The move events recorded so far (empty when event logging is
    /// disabled).
    pub fn event_log(&self) -> &[MoveEvent] {
        &self.event_log
    }

    /// Per-node diagnostic trajectories (see [`metrics::individual_errors`]).
    pub fn individual_errors(&self) -> Vec<f64> {
        metrics::individual_errors(self.time_series(), &self.initial_values)
    }

    /// Read access to one agent.
    pub fn agent(&self, id: NodeId) -> Option<&Agent> {
        self.agents.get(id)
    }

    /// Read access to the whole population, ordered by node id.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// The topology this model runs on.
    pub fn topology(&self) -> &T {
        &self.topology
    }

    /// The run-level parameters.
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }
}

/// Mutable access to two distinct agents at once.
fn pair_mut(agents: &mut [Agent], a: NodeId, b: NodeId) -> Result<(&mut Agent, &mut Agent), SimError> {
    if a == b {
        return Err(SimError::SelfInteraction(a));
    }
    if a < b {
        let (left, right) = agents.split_at_mut(b);
        Ok((&mut left[a], &mut right[0]))
    } else {
        let (left, right) = agents.split_at_mut(a);
        Ok((&mut right[0], &mut left[b]))
    }
}
