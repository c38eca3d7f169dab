pub fn run(algorithms: &str, input: Option<&str>, size: usize, speed: u8, seed: Option<u64>) {
    let selected = super::parse_algorithms(algorithms).unwrap_or_else(|e| super::fail(e));
    let values = super::make_input(input, size, seed).unwrap_or_else(|e| super::fail(e));

    let mut app = crate::tui::compare_app::CompareApp::new(&selected, values, speed)
        .unwrap_or_else(|e| super::fail(e));
    if let Err(e) = app.run() {
        eprintln!("TUI error: {e}");
        std::process::exit(1);
    }
}
