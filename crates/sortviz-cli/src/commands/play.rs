use sortviz_core::AlgorithmId;

pub fn run(algorithm: &str, input: Option<&str>, size: usize, speed: u8, seed: Option<u64>) {
    let algorithm: AlgorithmId = algorithm.parse().unwrap_or_else(|e| super::fail(e));
    let values = super::make_input(input, size, seed).unwrap_or_else(|e| super::fail(e));

    let mut app = crate::tui::app::App::new(algorithm, values, speed);
    if let Err(e) = app.run() {
        eprintln!("TUI error: {e}");
        std::process::exit(1);
    }
}
