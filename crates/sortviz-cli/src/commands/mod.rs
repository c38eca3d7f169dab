pub mod compare;
pub mod list;
pub mod play;
pub mod trace;

use sortviz_core::{AlgorithmId, RandomArrayOptions, generate_random_array};

/// Parse "5,3,4,1" (whitespace tolerated) into values.
pub fn parse_input_list(raw: &str) -> Result<Vec<i64>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|e| format!("invalid input value {s:?}: {e}"))
        })
        .collect()
}

/// Parse a comma-separated algorithm list, or "all" for the whole catalog.
pub fn parse_algorithms(raw: &str) -> Result<Vec<AlgorithmId>, String> {
    if raw.trim().eq_ignore_ascii_case("all") {
        return Ok(AlgorithmId::ALL.to_vec());
    }
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<AlgorithmId>().map_err(|e| e.to_string()))
        .collect()
}

/// Explicit input when given, otherwise a random array of `size` values.
pub fn make_input(input: Option<&str>, size: usize, seed: Option<u64>) -> Result<Vec<i64>, String> {
    match input {
        Some(raw) => parse_input_list(raw),
        None => {
            let options = RandomArrayOptions {
                seed,
                ..RandomArrayOptions::with_size(size)
            };
            generate_random_array(&options).map_err(|e| e.to_string())
        }
    }
}

/// Print `message` to stderr and exit with status 1.
pub fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}
