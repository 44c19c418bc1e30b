use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::{Phase, ALL_PHASES, PERMUTATION_FIXERS, PERTURBATION_MOVES};
use crate::config::{BfsPass, SolverConfig};
use crate::facelet::Facelets;
use crate::move_order::order_moves;
use crate::moves::Move;
use crate::state::CubeState;

/// The cascade stage that produced a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// Validation failed, nothing was searched.
    Invalid,
    AlreadySolved,
    /// The first, shallowest breadth-first pass.
    Bfs,
    /// Any later breadth-first pass.
    ExtendedBfs,
    Systematic,
    Iddfs,
    Guaranteed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Invalid => "validation",
            Stage::AlreadySolved => "already solved",
            Stage::Bfs => "breadth-first search",
            Stage::ExtendedBfs => "extended breadth-first search",
            Stage::Systematic => "layer-by-layer fallback",
            Stage::Iddfs => "iterative deepening",
            Stage::Guaranteed => "guaranteed fallback",
        };
        write!(f, "{}", name)
    }
}

/// Solution result:
/// * success: false only when the configuration failed validation.
/// * solved: replaying `moves` on the input reaches a face-uniform cube.
/// * moves: the move sequence, empty on failure or for an already solved cube.
/// * message: human-readable summary, or the validation error.
/// * stage: the cascade stage the moves come from.
/// * solve_time: time spent in [Solver::solve].
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SolveResult {
    pub success: bool,
    pub solved: bool,
    pub moves: Vec<Move>,
    pub message: String,
    pub stage: Stage,
    pub solve_time: Duration,
}

/// Why a budgeted pass gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exhausted {
    Time,
    Nodes,
    Visited,
    Frontier,
}

/// Search node: a state and the moves that reached it from the start.
struct Node {
    state: CubeState,
    moves: Vec<Move>,
}

impl Node {
    fn child(&self, m: Move) -> Node {
        let mut moves = Vec::with_capacity(self.moves.len() + 1);
        moves.extend_from_slice(&self.moves);
        moves.push(m);
        Node {
            state: self.state.apply_move(m),
            moves,
        }
    }
}

/// The layered search engine.
///
/// Stages, each run only when the previous one came back empty:
/// 1. bounded breadth-first passes,
/// 2. layer-by-layer replay of the canned sequences,
/// 3. iterative-deepening depth-first search,
/// 4. guaranteed-termination replay, which always returns a sequence but may not solve.
///
/// A `Solver` holds only its budgets. Frontiers and visited sets live on the stack of each call, so one
/// instance can serve solves on several threads at once.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    pub config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn solve(&self, facelets: &Facelets) -> SolveResult {
        self.solve_with_rng(facelets, &mut rand::thread_rng())
    }

    /// Solve with an explicit random source, which only the guaranteed-termination stage consumes.
    pub fn solve_with_rng<R: Rng + ?Sized>(&self, facelets: &Facelets, rng: &mut R) -> SolveResult {
        self.solve_with_progress(facelets, rng, &mut |_| {})
    }

    /// Solve, reporting each stage and pass to `progress` as it starts.
    pub fn solve_with_progress<R: Rng + ?Sized>(
        &self,
        facelets: &Facelets,
        rng: &mut R,
        progress: &mut dyn FnMut(&str),
    ) -> SolveResult {
        let start_time = Instant::now();
        if let Err(e) = facelets.validate() {
            info!("Rejected configuration: {}", e);
            return SolveResult {
                success: false,
                solved: false,
                moves: Vec::new(),
                message: e.to_string(),
                stage: Stage::Invalid,
                solve_time: start_time.elapsed(),
            };
        }

        let state = CubeState::from(facelets);
        if state.is_solved() {
            return SolveResult {
                success: true,
                solved: true,
                moves: Vec::new(),
                message: "Cube is already solved!".to_string(),
                stage: Stage::AlreadySolved,
                solve_time: start_time.elapsed(),
            };
        }

        let (stage, moves) = self.cascade(&state, rng, progress);
        let solved = state.apply_moves(&moves).is_solved();
        let message = match (stage, solved) {
            (_, false) => {
                warn!("Best-effort sequence of {} moves does not solve the cube", moves.len());
                format!(
                    "Best-effort sequence of {} moves found, but it does not reach the solved state",
                    moves.len()
                )
            }
            (Stage::Bfs, true) => format!("Optimal solution found in {} moves!", moves.len()),
            (Stage::ExtendedBfs, true) => format!("Solution found in {} moves!", moves.len()),
            (_, true) => format!("Complex solution found in {} moves!", moves.len()),
        };
        let solve_time = start_time.elapsed();
        info!("{} ({}, {:?})", message, stage, solve_time);
        SolveResult {
            success: true,
            solved,
            moves,
            message,
            stage,
            solve_time,
        }
    }

    /// Run the stages in order until one yields moves. The last stage always does.
    pub fn cascade<R: Rng + ?Sized>(
        &self,
        state: &CubeState,
        rng: &mut R,
        progress: &mut dyn FnMut(&str),
    ) -> (Stage, Vec<Move>) {
        let mut progress = |message: &str| {
            info!("{}", message);
            progress(message);
        };
        for (i, pass) in self.config.bfs_passes.iter().enumerate() {
            progress(&format!("Searching up to {} moves...", pass.max_depth));
            if let Some(moves) = self.bfs(state, pass) {
                let stage = if i == 0 { Stage::Bfs } else { Stage::ExtendedBfs };
                return (stage, moves);
            }
        }

        progress("Solving layer by layer...");
        if let Some(moves) = self.systematic(state) {
            return (Stage::Systematic, moves);
        }

        for depth in &self.config.iddfs_depths {
            progress(&format!("Deep search at depth {}...", depth));
            if let Some(moves) = self.depth_limited(state, *depth) {
                return (Stage::Iddfs, moves);
            }
        }

        progress("Using guaranteed fallback...");
        (Stage::Guaranteed, self.guaranteed(state, rng))
    }

    /// Bounded breadth-first search.
    ///
    /// A successor is kept only if its state is new or now reached in strictly fewer moves. Returns the
    /// first solving sequence, the shortest among the states the pruned search visits.
    pub fn bfs(&self, start: &CubeState, pass: &BfsPass) -> Option<Vec<Move>> {
        if start.is_solved() {
            return Some(Vec::new());
        }
        let start_time = Instant::now();
        let mut queue = VecDeque::from([Node {
            state: *start,
            moves: Vec::new(),
        }]);
        let mut visited: HashMap<CubeState, usize> = HashMap::from([(*start, 0)]);
        let mut explored = 0;

        let exhausted = loop {
            if start_time.elapsed() > pass.time_budget {
                break Exhausted::Time;
            }
            if explored >= pass.node_budget {
                break Exhausted::Nodes;
            }
            if visited.len() >= self.config.max_visited {
                break Exhausted::Visited;
            }
            let Some(node) = queue.pop_front() else {
                break Exhausted::Frontier;
            };
            explored += 1;

            let depth = node.moves.len();
            if depth >= pass.max_depth {
                continue;
            }
            for m in order_moves(&node.moves) {
                let child = node.child(m);
                if visited
                    .get(&child.state)
                    .map_or(false, |seen| *seen <= depth + 1)
                {
                    continue;
                }
                visited.insert(child.state, depth + 1);
                if child.state.is_solved() {
                    debug!(
                        "BFS depth {}: solution of {} moves after {} nodes ({:?})",
                        pass.max_depth,
                        child.moves.len(),
                        explored,
                        start_time.elapsed()
                    );
                    return Some(child.moves);
                }
                if depth + 1 < pass.max_depth {
                    queue.push_back(child);
                }
            }
        };
        debug!(
            "BFS depth {} gave up ({:?}) after {} nodes, {} states ({:?})",
            pass.max_depth,
            exhausted,
            explored,
            visited.len(),
            start_time.elapsed()
        );
        None
    }

    /// Layer-by-layer fallback: each phase contributes moves to a shared running state.
    ///
    /// Returns the concatenated moves only if they reach the goal.
    pub fn systematic(&self, start: &CubeState) -> Option<Vec<Move>> {
        let mut current = *start;
        let mut all_moves = Vec::new();
        for phase in ALL_PHASES {
            let Some(step) = self.solve_phase(&current, phase) else {
                debug!("Phase {}: no sequence made progress", phase);
                continue;
            };
            if step.len() >= self.config.phase_move_limit {
                continue;
            }
            debug!("Phase {}: {} moves", phase, step.len());
            current = current.apply_moves(&step);
            all_moves.extend(step);
            if current.is_solved() {
                return Some(all_moves);
            }
        }
        None
    }

    /// Try the phase's sequences in order, repeating each until it solves the cube or improves the
    /// solved-facelet score by more than the progress threshold.
    pub fn solve_phase(&self, state: &CubeState, phase: Phase) -> Option<Vec<Move>> {
        let limit = self.config.phase_repetitions;
        for sequence in phase.sequences() {
            let mut test_state = *state;
            let mut moves = Vec::new();
            for _ in 0..limit {
                if moves.len() >= limit {
                    break;
                }
                test_state = test_state.apply_moves(sequence);
                moves.extend_from_slice(sequence);
                if test_state.is_solved()
                    || test_state.progress_from(state) > self.config.progress_threshold
                {
                    return Some(moves);
                }
            }
        }
        None
    }

    /// Depth-limited depth-first search, bounded by the per-depth time budget.
    ///
    /// Within the last few plies above `max_depth` only the best few ordered moves are expanded. The
    /// visited set belongs to this attempt alone.
    pub fn depth_limited(&self, start: &CubeState, max_depth: usize) -> Option<Vec<Move>> {
        let start_time = Instant::now();
        let mut stack = vec![Node {
            state: *start,
            moves: Vec::new(),
        }];
        let mut visited: HashSet<CubeState> = HashSet::new();
        let mut explored = 0;

        let exhausted = loop {
            if start_time.elapsed() > self.config.iddfs_time_budget {
                break Exhausted::Time;
            }
            if visited.len() >= self.config.max_visited {
                break Exhausted::Visited;
            }
            let Some(node) = stack.pop() else {
                break Exhausted::Frontier;
            };
            explored += 1;

            if !visited.insert(node.state) {
                continue;
            }
            if node.state.is_solved() {
                debug!(
                    "DFS depth {}: solution of {} moves after {} nodes ({:?})",
                    max_depth,
                    node.moves.len(),
                    explored,
                    start_time.elapsed()
                );
                return Some(node.moves);
            }

            let depth = node.moves.len();
            if depth < max_depth {
                let ordered = order_moves(&node.moves);
                let width = if depth + self.config.iddfs_narrow_window > max_depth {
                    self.config.iddfs_narrow_width.min(ordered.len())
                } else {
                    ordered.len()
                };
                // reversed so the best candidate is popped first
                for m in ordered[..width].iter().rev() {
                    stack.push(node.child(*m));
                }
            }
        };
        debug!(
            "DFS depth {} gave up ({:?}) after {} nodes ({:?})",
            max_depth,
            exhausted,
            explored,
            start_time.elapsed()
        );
        None
    }

    /// Replay the permutation catalog until the cube is solved or the caps are hit, perturbing the state
    /// with one random move every few passes.
    ///
    /// Always returns the moves applied; they solve the cube only if the goal was reached.
    pub fn guaranteed<R: Rng + ?Sized>(&self, start: &CubeState, rng: &mut R) -> Vec<Move> {
        let max_length = self.config.max_sequence_length;
        let mut current = *start;
        let mut solution = Vec::new();
        let mut attempts = 0;

        'attempts: while !current.is_solved() && attempts < self.config.max_attempts {
            attempts += 1;
            for (name, sequence) in PERMUTATION_FIXERS {
                if solution.len() + sequence.len() > max_length {
                    break 'attempts;
                }
                current = current.apply_moves(sequence);
                solution.extend_from_slice(sequence);
                if current.is_solved() {
                    debug!("Solved by {} after {} attempts", name, attempts);
                    break 'attempts;
                }
            }
            if self.config.perturb_every > 0 && attempts % self.config.perturb_every == 0 {
                if solution.len() >= max_length {
                    break;
                }
                let m = *PERTURBATION_MOVES.choose(rng).unwrap_or(&Move::U);
                current = current.apply_move(m);
                solution.push(m);
            }
        }
        debug!(
            "Guaranteed fallback: {} moves, {} attempts, solved: {}",
            solution.len(),
            attempts,
            current.is_solved()
        );
        solution
    }
}

/// Solve a configuration with the default budgets.
///
/// # Examples
/// ```rust
/// use facelet_solver::facelet::{self, Facelets};
/// use facelet_solver::moves::Move;
/// use facelet_solver::solver::solve;
/// use facelet_solver::state::CubeState;
///
/// let state = CubeState::from(&facelet::solved()).apply_move(Move::U);
/// let result = solve(&Facelets::from(&state));
/// assert!(result.success);
/// assert_eq!(result.moves, vec![Move::U3]);
/// ```
pub fn solve(facelets: &Facelets) -> SolveResult {
    Solver::default().solve(facelets)
}

#[cfg(test)]
mod test {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::facelet::{self, Color};
    use crate::moves::Move::*;

    fn quick_config() -> SolverConfig {
        SolverConfig {
            bfs_passes: vec![BfsPass {
                max_depth: 4,
                time_budget: Duration::from_secs(2),
                node_budget: 20_000,
            }],
            iddfs_depths: vec![5],
            iddfs_time_budget: Duration::from_millis(300),
            ..SolverConfig::default()
        }
    }

    #[test_log::test]
    fn test_bfs_single_move() {
        let solver = Solver::default();
        let state = CubeState::default().apply_move(U);
        let moves = solver.bfs(&state, &solver.config.bfs_passes[0]).unwrap();
        assert_eq!(moves, vec![U3]);
    }

    #[test_log::test]
    fn test_bfs_three_moves() {
        let solver = Solver::default();
        let state = CubeState::default().apply_moves(&[R, U, R3]);
        let moves = solver.bfs(&state, &solver.config.bfs_passes[0]).unwrap();
        assert_eq!(moves, vec![R, U3, R3]);
        assert!(state.apply_moves(&moves).is_solved());
    }

    #[test_log::test]
    fn test_bfs_node_budget() {
        let solver = Solver::default();
        let state = CubeState::default().apply_moves(&[R, U, F, L, D, B]);
        let pass = BfsPass {
            max_depth: 8,
            time_budget: Duration::from_secs(5),
            node_budget: 100,
        };
        assert!(solver.bfs(&state, &pass).is_none());
    }

    #[test_log::test]
    fn test_bfs_depth_ceiling() {
        let solver = Solver::default();
        let state = CubeState::default().apply_moves(&[R, U, F]);
        let pass = BfsPass {
            max_depth: 2,
            time_budget: Duration::from_secs(5),
            node_budget: 100_000,
        };
        assert!(solver.bfs(&state, &pass).is_none());
    }

    #[test]
    fn test_solve_phase_skips_useless_candidates() {
        let solver = Solver::default();
        // undone by the second cross sequence, the first one gains nothing
        let state = CubeState::default().apply_moves(&[F, R3, F3, R, U, R3]);
        let step = solver.solve_phase(&state, Phase::Cross).unwrap();
        assert_eq!(step, vec![R, U3, R3, F, R, F3]);
        assert!(state.apply_moves(&step).is_solved());
        assert!(solver.solve_phase(&state, Phase::SecondLayer).is_none());
    }

    #[test_log::test]
    fn test_systematic() {
        let solver = Solver::default();
        // inverse of the first cross sequence
        let state = CubeState::default().apply_moves(&[F, R, U3, R3, U, R, U, R3, F3]);
        let moves = solver.systematic(&state).unwrap();
        assert_eq!(moves, vec![F, R, U3, R3, U3, R, U, R3, F3]);
        assert!(state.apply_moves(&moves).is_solved());
    }

    #[test_log::test]
    fn test_depth_limited() {
        let solver = Solver::default();
        let state = CubeState::default().apply_moves(&[F, R]);
        let moves = solver.depth_limited(&state, 3).unwrap();
        assert!(state.apply_moves(&moves).is_solved());
        assert!(moves.len() <= 3);
    }

    #[test_log::test]
    fn test_guaranteed_caps_length() {
        let solver = Solver::default();
        let state = CubeState::default().apply_moves(&[R, U, F, L, D, B, R2, U3]);
        let mut rng = StdRng::seed_from_u64(1);
        let moves = solver.guaranteed(&state, &mut rng);
        assert!(!moves.is_empty());
        assert!(moves.len() <= 200);
    }

    #[test_log::test]
    fn test_guaranteed_solves_catalog_word() {
        let solver = Solver::default();
        // undone by the first catalog word
        let state = CubeState::default().apply_moves(&[U, R, U3, R3]);
        let mut rng = StdRng::seed_from_u64(1);
        let moves = solver.guaranteed(&state, &mut rng);
        assert_eq!(moves, vec![R, U, R3, U3]);
    }

    #[test_log::test]
    fn test_guaranteed_seeded() {
        let solver = Solver::default();
        let state = CubeState::default().apply_moves(&[L, D, B]);
        let a = solver.guaranteed(&state, &mut StdRng::seed_from_u64(9));
        let b = solver.guaranteed(&state, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test_log::test]
    fn test_guaranteed_perturbs_between_passes() {
        let solver = Solver::new(SolverConfig {
            perturb_every: 1,
            max_attempts: 3,
            max_sequence_length: 1000,
            ..SolverConfig::default()
        });
        let state = CubeState::default().apply_moves(&[R, U, F, L, D, B, R2, U3]);
        let catalog: Vec<Move> = PERMUTATION_FIXERS
            .iter()
            .flat_map(|(_, seq)| seq.iter().copied())
            .collect();
        assert_eq!(catalog.len(), 49);

        let runs: Vec<Vec<Move>> = (0..16)
            .map(|seed| solver.guaranteed(&state, &mut StdRng::seed_from_u64(seed)))
            .collect();
        for moves in &runs {
            // three catalog passes, each followed by one random move
            assert_eq!(moves.len(), 3 * (catalog.len() + 1));
            assert!(PERTURBATION_MOVES.contains(&moves[49]));
            for chunk in moves.chunks(catalog.len() + 1) {
                assert_eq!(&chunk[..catalog.len()], &catalog[..]);
                assert!(PERTURBATION_MOVES.contains(&chunk[catalog.len()]));
            }
        }
        assert!(runs.iter().any(|moves| *moves != runs[0]));
    }

    #[test_log::test]
    fn test_solve_invalid() {
        let mut fc = facelet::solved();
        fc.set("F2".parse().unwrap(), Color::White);
        let result = solve(&fc);
        assert!(!result.success);
        assert!(result.moves.is_empty());
        assert_eq!(result.stage, Stage::Invalid);
        assert_eq!(result.message, "Color white appears 10 times, expected 9");
    }

    #[test_log::test]
    fn test_solve_already_solved() {
        let result = solve(&facelet::solved());
        assert!(result.success);
        assert!(result.solved);
        assert!(result.moves.is_empty());
        assert_eq!(result.stage, Stage::AlreadySolved);
    }

    #[test_log::test]
    fn test_cascade_falls_through() {
        // too deep for the shrunken budgets: every stage is visited
        let solver = Solver::new(quick_config());
        let state = CubeState::default().apply_moves(&[R, U2, F3, L, D2, B, U3, R2, F]);
        let mut stages = Vec::new();
        let (stage, moves) = solver.cascade(
            &state,
            &mut StdRng::seed_from_u64(3),
            &mut |msg| stages.push(msg.to_string()),
        );
        assert_eq!(stage, Stage::Guaranteed);
        assert!(!moves.is_empty());
        assert!(moves.len() <= 200);
        assert_eq!(
            stages,
            vec![
                "Searching up to 4 moves...",
                "Solving layer by layer...",
                "Deep search at depth 5...",
                "Using guaranteed fallback...",
            ]
        );
    }

    #[test_log::test]
    fn test_bfs_messages() {
        let solver = Solver::default();
        let fc = Facelets::from(&CubeState::default().apply_move(R2));
        let result = solver.solve(&fc);
        assert_eq!(result.stage, Stage::Bfs);
        assert_eq!(result.message, "Optimal solution found in 1 moves!");

        // a first pass too shallow for the scramble leaves it to the second
        let mut config = quick_config();
        config.bfs_passes.insert(
            0,
            BfsPass {
                max_depth: 1,
                time_budget: Duration::from_secs(2),
                node_budget: 20_000,
            },
        );
        let fc = Facelets::from(&CubeState::default().apply_moves(&[R, U]));
        let result = Solver::new(config).solve(&fc);
        assert_eq!(result.stage, Stage::ExtendedBfs);
        assert_eq!(result.moves, vec![U3, R3]);
        assert_eq!(result.message, "Solution found in 2 moves!");
    }
}
