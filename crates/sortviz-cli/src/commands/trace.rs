use std::path::Path;

use sortviz_core::{AlgorithmExecution, AlgorithmId, SortStep, execute_algorithm_with_input};

pub struct TraceCommandConfig<'a> {
    pub algorithm: &'a str,
    pub input: Option<&'a str>,
    pub size: usize,
    pub seed: Option<u64>,
    pub output_path: Option<&'a str>,
}

pub fn run(config: TraceCommandConfig<'_>) {
    let algorithm: AlgorithmId = config
        .algorithm
        .parse()
        .unwrap_or_else(|e| super::fail(e));
    let input = super::make_input(config.input, config.size, config.seed)
        .unwrap_or_else(|e| super::fail(e));

    let execution = execute_algorithm_with_input(algorithm, &input);

    if let Some(path) = config.output_path {
        match write_trace_json(Path::new(path), &execution) {
            Ok(()) => println!(
                "{} steps of {} written to {path}",
                execution.steps.len(),
                algorithm.display_name()
            ),
            Err(e) => super::fail(format!("failed to write {path}: {e}")),
        }
        return;
    }

    println!(
        "{} on {} values: {} steps\n",
        algorithm.display_name(),
        input.len(),
        execution.steps.len()
    );
    for (index, step) in execution.steps.iter().enumerate() {
        println!("{}", format_step(index, step));
    }
}

/// Serialize an execution as `{algorithm, input, steps}`.
pub fn write_trace_json(path: &Path, execution: &AlgorithmExecution<i64>) -> std::io::Result<()> {
    let json = serde_json::json!({
        "algorithm": execution.algorithm,
        "input": execution.input,
        "steps": execution.steps,
    });
    let text = serde_json::to_string_pretty(&json).map_err(std::io::Error::other)?;
    std::fs::write(path, text)
}

/// One summary line: index, operation, touched indices, extra metadata.
pub fn format_step(index: usize, step: &SortStep<i64>) -> String {
    let operation = step.operation().map(|op| op.as_str()).unwrap_or("-");
    let mut line = format!("{index:>5}  {operation:<18}");

    if !step.compared_indices.is_empty() {
        line.push_str(&format!(" cmp={:?}", step.compared_indices));
    }
    if !step.modified_indices.is_empty() {
        line.push_str(&format!(" mod={:?}", step.modified_indices));
    }
    if let Some(pass) = step.pass() {
        line.push_str(&format!(" pass={pass}"));
    }
    if let Some(range) = step.range() {
        line.push_str(&format!(" range={}..={}", range.start, range.end));
    }
    if let Some(pivot) = step.pivot_index() {
        line.push_str(&format!(" pivot={pivot}"));
    }
    if let Some(partition) = step.partition_index() {
        line.push_str(&format!(" partition={partition}"));
    }

    const PREVIEW: usize = 12;
    let shown: Vec<String> = step
        .snapshot
        .iter()
        .take(PREVIEW)
        .map(|v| v.to_string())
        .collect();
    let more = if step.snapshot.len() > PREVIEW { ", ..." } else { "" };
    line.push_str(&format!("  [{}{more}]", shown.join(", ")));
    line
}
