//! CLI for sortviz: watch sorting algorithms work, one step at a time.

mod commands;
mod tui;

use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sortviz")]
#[command(about = "sortviz: step through sorting algorithms in your terminal")]
#[command(version = sortviz_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available algorithms with their complexity
    List {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a trace and print one line per step, or write it as JSON
    Trace {
        /// Algorithm id (bubble-sort, insertion-sort, selection-sort, merge-sort, quick-sort)
        #[arg(long, default_value = "bubble-sort")]
        algorithm: String,

        /// Explicit comma-separated input, e.g. "5,3,4,1". Overrides --size/--seed.
        #[arg(long)]
        input: Option<String>,

        /// Random array length
        #[arg(long, default_value_t = 16, value_parser = RangedU64ValueParser::<usize>::new().range(1..=1000))]
        size: usize,

        /// Seed for the random array
        #[arg(long)]
        seed: Option<u64>,

        /// Write the full trace as JSON to this path instead of printing a summary
        #[arg(long)]
        output: Option<String>,
    },

    /// Interactive single-algorithm player (TUI)
    Play {
        /// Initial algorithm id
        #[arg(long, default_value = "bubble-sort")]
        algorithm: String,

        /// Explicit comma-separated input. Overrides --size/--seed for the first run.
        #[arg(long)]
        input: Option<String>,

        /// Array size
        #[arg(long, default_value_t = 100, value_parser = RangedU64ValueParser::<usize>::new().range(5..=1000))]
        size: usize,

        /// Playback speed (0 = slowest, 100 = fastest)
        #[arg(long, default_value_t = 55, value_parser = clap::value_parser!(u8).range(0..=100))]
        speed: u8,

        /// Seed for the first random array
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run several algorithms side by side on the same input (TUI)
    Compare {
        /// Comma-separated algorithm ids, or "all"
        #[arg(long, default_value = "all")]
        algorithms: String,

        /// Explicit comma-separated input. Overrides --size/--seed for the first run.
        #[arg(long)]
        input: Option<String>,

        /// Array size
        #[arg(long, default_value_t = 60, value_parser = RangedU64ValueParser::<usize>::new().range(5..=300))]
        size: usize,

        /// Playback speed (0 = slowest, 100 = fastest)
        #[arg(long, default_value_t = 55, value_parser = clap::value_parser!(u8).range(0..=100))]
        speed: u8,

        /// Seed for the first random array
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List { json } => commands::list::run(json),
        Commands::Trace {
            algorithm,
            input,
            size,
            seed,
            output,
        } => commands::trace::run(commands::trace::TraceCommandConfig {
            algorithm: &algorithm,
            input: input.as_deref(),
            size,
            seed,
            output_path: output.as_deref(),
        }),
        Commands::Play {
            algorithm,
            input,
            size,
            speed,
            seed,
        } => commands::play::run(&algorithm, input.as_deref(), size, speed, seed),
        Commands::Compare {
            algorithms,
            input,
            size,
            speed,
            seed,
        } => commands::compare::run(&algorithms, input.as_deref(), size, speed, seed),
    }
}
