use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::Error;

/// One bounded breadth-first pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BfsPass {
    pub max_depth: usize,
    #[serde(with = "millis")]
    pub time_budget: Duration,
    pub node_budget: usize,
}

/// Budgets for every stage of the search cascade.
///
/// The defaults reproduce the tuned limits; tests and the CLI shrink or stretch them. Durations are
/// read and written as milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub bfs_passes: Vec<BfsPass>,
    pub max_visited: usize,
    pub phase_repetitions: usize,
    pub progress_threshold: f64,
    pub phase_move_limit: usize,
    pub iddfs_depths: Vec<usize>,
    #[serde(with = "millis")]
    pub iddfs_time_budget: Duration,
    pub iddfs_narrow_window: usize,
    pub iddfs_narrow_width: usize,
    pub max_attempts: usize,
    pub max_sequence_length: usize,
    pub perturb_every: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            bfs_passes: BFS_PASSES
                .iter()
                .map(|(max_depth, time_budget, node_budget)| BfsPass {
                    max_depth: *max_depth,
                    time_budget: *time_budget,
                    node_budget: *node_budget,
                })
                .collect(),
            max_visited: MAX_VISITED,
            phase_repetitions: PHASE_REPETITIONS,
            progress_threshold: PROGRESS_THRESHOLD,
            phase_move_limit: PHASE_MOVE_LIMIT,
            iddfs_depths: IDDFS_DEPTHS.to_vec(),
            iddfs_time_budget: IDDFS_TIME_BUDGET,
            iddfs_narrow_window: IDDFS_NARROW_WINDOW,
            iddfs_narrow_width: IDDFS_NARROW_WIDTH,
            max_attempts: MAX_ATTEMPTS,
            max_sequence_length: MAX_SEQUENCE_LENGTH,
            perturb_every: PERTURB_EVERY,
        }
    }
}

impl SolverConfig {
    /// Scale every wall-clock budget so the whole cascade roughly fits in `timeout`.
    ///
    /// The default budgets add up to 64 seconds; each keeps its share.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, Error> {
        let total = self.total_time_budget();
        if total.is_zero() {
            return Ok(self);
        }
        let ratio = timeout.as_secs_f64() / total.as_secs_f64();
        for pass in self.bfs_passes.iter_mut() {
            pass.time_budget = scale(pass.time_budget, ratio)?;
        }
        self.iddfs_time_budget = scale(self.iddfs_time_budget, ratio)?;
        Ok(self)
    }

    /// [SolverConfig::with_timeout] from a number of seconds, rejecting negative or non-finite values.
    pub fn with_timeout_secs(self, secs: f64) -> Result<Self, Error> {
        let timeout =
            Duration::try_from_secs_f64(secs).map_err(|_| Error::InvalidTimeout(secs.to_string()))?;
        self.with_timeout(timeout)
    }

    /// Worst-case wall-clock time spent in the budgeted stages.
    pub fn total_time_budget(&self) -> Duration {
        let bfs: Duration = self.bfs_passes.iter().map(|p| p.time_budget).sum();
        bfs + self.iddfs_time_budget * self.iddfs_depths.len() as u32
    }

    pub fn from_json(data: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_file<P>(path: P) -> Result<Self, Error>
    where
        P: AsRef<Path>,
    {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }
}

fn scale(budget: Duration, ratio: f64) -> Result<Duration, Error> {
    let secs = budget.as_secs_f64() * ratio;
    Duration::try_from_secs_f64(secs).map_err(|_| Error::InvalidTimeout(format!("{}s", secs)))
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}
