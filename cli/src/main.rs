use clap::{arg, command, Parser, Subcommand};
use crossterm::style::{Attribute, Color as TermColor, SetBackgroundColor, Stylize};
use facelet_solver::{
    config::SolverConfig,
    error::Error,
    facelet::{self, Color, Face, Facelets, Position},
    moves::Move,
    scramble::{gen_scramble, scramble_from_str, scramble_to_str},
    solver::Solver,
    state::CubeState,
};
use log::debug;
use rand::{rngs::StdRng, SeedableRng};
use spinners::Spinner;
use std::{
    path::PathBuf,
    time::Instant,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "solves the cube with the layered search")]
    #[clap(group(
    clap::ArgGroup::new("state")
        .required(true)
        .args(&["scramble", "facelet", "json"]),
    ))]
    Solve {
        #[arg(short, long)]
        scramble: Option<String>,

        /// 54 color initials (w r b o g y) in U F R B L D order
        #[arg(short, long)]
        facelet: Option<String>,

        /// JSON file mapping positions such as "U5" to color names
        #[arg(short, long)]
        json: Option<PathBuf>,

        /// Scale all search budgets to roughly this many seconds
        #[arg(short, long)]
        timeout: Option<f32>,

        /// JSON file with solver budgets
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(long)]
        seed: Option<u64>,

        #[arg(short, long)]
        verbose: bool,

        #[arg(short, long)]
        preview: bool,
    },

    #[command(about = "generates scramble")]
    Scramble {
        #[arg(short, long, default_value_t = 20)]
        length: usize,
        #[arg(short, long)]
        preview: bool,
    },

    #[command(about = "explains a move sequence in words")]
    Describe { moves: String },

    #[command(about = "validates a facelet string and prints its color counts")]
    Check { facelet: String },
}

struct SolveArgs<'a> {
    timeout: Option<f32>,
    config: &'a Option<PathBuf>,
    seed: Option<u64>,
    verbose: bool,
    preview: bool,
}

fn load_facelets(
    scramble: &Option<String>,
    facelet: &Option<String>,
    json: &Option<PathBuf>,
) -> Result<Facelets, Error> {
    if let Some(scramble) = scramble {
        let scramble = scramble_from_str(scramble)?;
        let state = CubeState::from(&facelet::solved()).apply_moves(&scramble);
        Ok(Facelets::from(&state))
    } else if let Some(facelet) = facelet {
        facelet.parse()
    } else if let Some(json) = json {
        Facelets::from_json(&std::fs::read_to_string(json)?)
    } else {
        Ok(facelet::solved())
    }
}

fn build_solver(args: &SolveArgs) -> Result<Solver, Error> {
    let mut config = match args.config {
        Some(path) => SolverConfig::from_file(path)?,
        None => SolverConfig::default(),
    };
    if let Some(timeout) = args.timeout {
        config = config.with_timeout_secs(f64::from(timeout))?;
    }
    debug!("Solver config: {:?}", config);
    Ok(Solver::new(config))
}

fn solve(facelets: &Facelets, args: &SolveArgs) -> Result<(), Error> {
    if args.preview {
        print_facelet(facelets);
    }
    let solver = build_solver(args)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let start = Instant::now();
    let mut spinner = Spinner::new(spinners::Spinners::Dots, "Solving".to_owned());
    let result = {
        let mut progress = |message: &str| {
            spinner.stop_with_newline();
            spinner = Spinner::new(spinners::Spinners::Dots, message.to_owned());
        };
        solver.solve_with_progress(facelets, &mut rng, &mut progress)
    };
    let end = Instant::now();

    spinner.stop_with_newline();

    if !result.success {
        let styled = "Invalid:".with(TermColor::Red).attribute(Attribute::Bold);
        println!("{styled} {}", result.message);
        return Ok(());
    }

    println!("{}", result.message);
    println!("Solution: {}", scramble_to_str(&result.moves));
    println!("Move count: {}", result.moves.len());
    println!("Stage: {}", result.stage);
    println!("Solve time: {:?}", result.solve_time);
    println!("Total time: {:?}", end - start);
    if args.verbose {
        print_steps(&result.moves);
    }

    Ok(())
}

fn print_steps(moves: &[Move]) {
    for (i, m) in moves.iter().enumerate() {
        println!("{:>3}. {:<3} {}", i + 1, m.to_string(), m.describe());
    }
}

fn color_to_termcolor(color: Option<Color>) -> TermColor {
    match color {
        Some(Color::White) => TermColor::White,
        Some(Color::Red) => TermColor::Red,
        Some(Color::Blue) => TermColor::Blue,
        Some(Color::Orange) => TermColor::DarkYellow,
        Some(Color::Green) => TermColor::Green,
        Some(Color::Yellow) => TermColor::Yellow,
        None => TermColor::DarkGrey,
    }
}

fn face_row(facelets: &Facelets, face: Face, row: u8) -> String {
    let mut layer = String::new();
    for col in 0..3 {
        let color = Position::new(face, 3 * row + col + 1)
            .ok()
            .and_then(|p| facelets.get(p));
        layer.push_str(&format!("{}  ", SetBackgroundColor(color_to_termcolor(color))));
    }
    layer.push_str(&format!("{}", SetBackgroundColor(TermColor::Reset)));
    layer
}

/// Unfolded net: U on top, then L F R B, then D, each face under its neighbour.
fn print_facelet(facelets: &Facelets) {
    println!();
    for row in 0..3 {
        println!("      {}", face_row(facelets, Face::U, row));
    }
    for row in 0..3 {
        let layer: String = [Face::L, Face::F, Face::R, Face::B]
            .into_iter()
            .map(|face| face_row(facelets, face, row))
            .collect();
        println!("{layer}");
    }
    for row in 0..3 {
        println!("      {}", face_row(facelets, Face::D, row));
    }
    println!();
}

fn scramble(length: usize, preview: bool) -> Result<(), Error> {
    let ss = gen_scramble(length);
    let state = CubeState::from(&facelet::solved()).apply_moves(&ss);
    let fc = Facelets::from(&state);
    println!("Scramble: {}", scramble_to_str(&ss));
    println!("Facelets: {}", fc);
    if preview {
        print_facelet(&fc);
    }
    Ok(())
}

fn describe(moves: &str) -> Result<(), Error> {
    print_steps(&scramble_from_str(moves)?);
    Ok(())
}

fn check(facelet: &str) -> Result<(), Error> {
    let fc: Facelets = facelet.parse()?;
    let stats = fc.stats();
    print_facelet(&fc);
    println!("{}", stats.validation_message);
    println!("Solved: {}", stats.is_solved);
    for (color, count) in &stats.color_distribution {
        println!("{:>7}: {}", color.to_string(), count);
    }
    Ok(())
}

fn main() {
    pretty_env_logger::init();
    let program = Cli::parse();

    let result = match &program.command {
        Some(Commands::Solve {
            scramble,
            facelet,
            json,
            timeout,
            config,
            seed,
            verbose,
            preview,
        }) => load_facelets(scramble, facelet, json).and_then(|facelets| {
            let args = SolveArgs {
                timeout: *timeout,
                config,
                seed: *seed,
                verbose: *verbose,
                preview: *preview,
            };
            solve(&facelets, &args)
        }),
        Some(Commands::Scramble { length, preview }) => scramble(*length, *preview),
        Some(Commands::Describe { moves }) => describe(moves),
        Some(Commands::Check { facelet }) => check(facelet),
        _ => Ok(()),
    };

    if let Err(error) = result {
        let styled = "Error:".with(TermColor::Red).attribute(Attribute::Bold);
        println!("{styled} {error}");
    }
}
