use sortviz_core::list_algorithms;

pub fn run(json: bool) {
    let catalog = list_algorithms();

    if json {
        match serde_json::to_string_pretty(catalog) {
            Ok(text) => println!("{text}"),
            Err(e) => super::fail(format!("failed to serialize catalog: {e}")),
        }
        return;
    }

    println!("{} algorithms:\n", catalog.len());
    println!(
        "  {:<16} {:<16} {:<11} {:<11} {:<11}",
        "ID", "NAME", "BEST", "AVERAGE", "WORST"
    );
    for info in catalog {
        println!(
            "  {:<16} {:<16} {:<11} {:<11} {:<11}",
            info.id.as_str(),
            info.display_name,
            info.complexity.best,
            info.complexity.average,
            info.complexity.worst
        );
    }
    println!();
    for info in catalog {
        println!("  {}: {}", info.display_name, info.description);
    }
}
