use std::time::Duration;

/// Number of facelets on the cube.
pub const N_FACELETS: usize = 54;
/// Number of faces, and also of colors.
pub const N_FACES: usize = 6;
/// Number of facelets on one face.
pub const N_FACE_CELLS: usize = 9;
/// Number of moves in the generator alphabet: six faces, three turns each.
pub const N_MOVE: usize = 18;
/// Offset of the center facelet inside a face (position 5 in 1-based naming).
pub const CENTER: usize = 4;

/// BFS passes: depth ceiling, wall-clock budget, explored-node budget.
pub const BFS_PASSES: [(usize, Duration, usize); 2] = [
    (8, Duration::from_secs(6), 300_000),
    (12, Duration::from_secs(10), 500_000),
];
/// Upper bound on visited-dictionary entries kept by a single search pass.
pub const MAX_VISITED: usize = 2_000_000;

/// Systematic fallback: repetitions of one canned sequence inside a phase.
pub const PHASE_REPETITIONS: usize = 15;
/// Fraction of the 54 cells a phase must gain to count as progress.
pub const PROGRESS_THRESHOLD: f64 = 0.3;
/// A phase contribution at least this long is discarded.
pub const PHASE_MOVE_LIMIT: usize = 100;

/// Depth ceilings tried by the iterative-deepening stage.
pub const IDDFS_DEPTHS: [usize; 6] = [15, 17, 19, 21, 23, 25];
pub const IDDFS_TIME_BUDGET: Duration = Duration::from_secs(8);
/// Plies below the ceiling where branching is narrowed.
pub const IDDFS_NARROW_WINDOW: usize = 3;
/// Candidate moves kept per node inside the narrowed window.
pub const IDDFS_NARROW_WIDTH: usize = 6;

/// Guaranteed-termination stage: catalog passes before giving up.
pub const MAX_ATTEMPTS: usize = 50;
/// Longest move sequence the guaranteed-termination stage may emit.
pub const MAX_SEQUENCE_LENGTH: usize = 200;
/// Catalog passes between two random perturbation moves.
pub const PERTURB_EVERY: usize = 10;
