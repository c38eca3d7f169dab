//! TUI rendering for the player and the compare view.
//!
//! Player:
//!
//! ┌──────────────────────────────────────────────────────────┐
//! │  sortviz   Bubble Sort   running   step 42/380           │
//! ├───────────────────────────────────────┬──────────────────┤
//! │ swap                                  │  Bubble Sort     │
//! │          ▆█                           │  O(n) O(n^2)     │
//! │       ▃█ ██    ▅█                     │                  │
//! │    ▂█ ██ ██ ▄█ ██ ▇█                  │  step 42/380     │
//! │ ▁█ ██ ██ ██ ██ ██ ██                  │  op: swap        │
//! ├───────────────────────────────────────┴──────────────────┤
//! │  space: start/pause   r: reset   n: shuffle   q: quit    │
//! └──────────────────────────────────────────────────────────┘
//!
//! Compare: one bordered bar panel per selected algorithm in a grid, with
//! the selection line above the key bar.

use std::time::Instant;

use ratatui::{prelude::*, widgets::*};

use sortviz_core::{
    AlgorithmId, BarVisualState, ControlAvailability, PlaybackStatus, RenderFrame,
    RenderTransition, SortStep, Surface, SurfaceDimensions, VisualSemantics, configure_surface,
    map_step_to_bar_states, render_bars_frame,
};

use super::app::App;
use super::compare_app::CompareApp;
use super::surface::{BufferSurface, to_color};

// ---------------------------------------------------------------------------
// Bars widget
// ---------------------------------------------------------------------------

/// One step drawn as bars through the core renderer.
struct BarsView<'a> {
    step: &'a SortStep<i64>,
    status: PlaybackStatus,
    labels: Option<&'a [usize]>,
    transition: Option<RenderTransition<i64>>,
    caption: Option<String>,
}

impl Widget for BarsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let logical = SurfaceDimensions::default();
        let ratio = f64::from(area.width) / logical.width;
        let Ok(mut configured) =
            configure_surface(BufferSurface::new(buf, area, logical), logical, Some(ratio))
        else {
            return;
        };

        let states = map_step_to_bar_states(self.step, self.status);
        let frame = RenderFrame {
            snapshot: &self.step.snapshot,
            states: &states,
            labels: self.labels,
        };
        let semantics = VisualSemantics::default();
        render_bars_frame(
            &mut configured.surface,
            &frame,
            &semantics,
            self.transition.as_ref(),
        );

        if let Some(caption) = self.caption {
            configured
                .surface
                .fill_text(&caption, 0.0, 0.0, semantics.color_for(BarVisualState::Compared));
        }
    }
}

fn caption(step: &SortStep<i64>) -> Option<String> {
    let op = step.operation()?;
    let mut text = format!(" {op}");
    if !step.compared_indices.is_empty() {
        text.push_str(&format!(" {:?}", step.compared_indices));
    }
    Some(text)
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

pub fn draw(f: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Min(10),   // main
            Constraint::Length(1), // status
            Constraint::Length(1), // keys
        ])
        .split(f.area());

    draw_title(f, rows[0], app);
    draw_main(f, rows[1], app);
    draw_status_line(f, rows[2], app.message(), app.input().len(), app.speed());
    draw_keys(f, rows[3], app.availability(), false);
}

fn status_style(status: PlaybackStatus) -> Style {
    let color = match status {
        PlaybackStatus::Idle => Color::Gray,
        PlaybackStatus::Running => Color::Green,
        PlaybackStatus::Paused => Color::Yellow,
        PlaybackStatus::Finished => Color::Cyan,
    };
    Style::default().bold().fg(color)
}

fn draw_title(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Line::from(vec![
            Span::styled(" sortviz ", Style::default().bold().fg(Color::Cyan)),
            Span::raw("  "),
            Span::styled(
                app.algorithm().display_name(),
                Style::default().bold().fg(Color::Yellow),
            ),
            Span::raw("  "),
            Span::styled(app.status().as_str(), status_style(app.status())),
            Span::styled(
                format!("  step {}/{} ", app.step_index() + 1, app.step_count()),
                Style::default().fg(Color::DarkGray),
            ),
        ]));

    f.render_widget(block, area);
}

fn draw_main(f: &mut Frame, area: Rect, app: &App) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(34)])
        .split(area);

    let step = app.step();
    let labels = app.labels();
    let bars = BarsView {
        step,
        status: app.status(),
        labels: Some(labels.as_slice()),
        transition: app.transition_at(Instant::now()),
        caption: caption(step),
    };
    let block = Block::default().borders(Borders::ALL).title(format!(
        " {} values ",
        step.snapshot.len()
    ));
    let inner = block.inner(cols[0]);
    f.render_widget(block, cols[0]);
    f.render_widget(bars, inner);

    draw_info(f, cols[1], app);
}

fn draw_info(f: &mut Frame, area: Rect, app: &App) {
    let info = app.algorithm().info();
    let step = app.step();
    let cadence = app.cadence();

    let mut lines = vec![
        Line::from(Span::styled(
            info.display_name,
            Style::default().bold().fg(Color::Cyan),
        )),
        Line::from(Span::styled(
            format!(
                "best {}  avg {}  worst {}",
                info.complexity.best, info.complexity.average, info.complexity.worst
            ),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(info.description),
        Line::from(""),
        Line::from(vec![
            Span::styled("step: ", Style::default().bold()),
            Span::raw(format!("{}/{}", app.step_index() + 1, app.step_count())),
        ]),
        Line::from(vec![
            Span::styled("op: ", Style::default().bold()),
            Span::styled(
                step.operation().map_or("-", |op| op.as_str()),
                Style::default().fg(Color::Yellow),
            ),
        ]),
    ];

    if let Some(pass) = step.pass() {
        lines.push(Line::from(format!("pass: {pass}")));
    }
    if let Some(range) = step.range() {
        lines.push(Line::from(format!("range: {}..={}", range.start, range.end)));
    }
    if let Some(pivot) = step.pivot_index() {
        lines.push(Line::from(format!("pivot: {pivot}")));
    }
    if let Some(partition) = step.partition_index() {
        lines.push(Line::from(format!("partition: {partition}")));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(format!(
        "speed {}  size {}",
        app.speed(),
        app.array_size()
    )));
    lines.push(Line::from(Span::styled(
        format!(
            "{} ms/tick  {} step(s)/tick",
            cadence.interval_ms, cadence.steps_per_tick
        ),
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default().borders(Borders::ALL).title(" Info ");
    let p = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    f.render_widget(p, area);
}

fn draw_status_line(f: &mut Frame, area: Rect, message: Option<&str>, len: usize, speed: u8) {
    let line = match message {
        Some(message) => Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(Span::styled(
            format!(" {len} values  speed {speed}"),
            Style::default().fg(Color::DarkGray),
        )),
    };
    f.render_widget(Paragraph::new(line), area);
}

/// Key help; controls the current status disables are dimmed.
fn draw_keys(f: &mut Frame, area: Rect, controls: ControlAvailability, compare: bool) {
    let play_label = if controls.pause {
        "pause"
    } else if controls.resume {
        "resume"
    } else {
        "start"
    };
    let mut keys = vec![
        ("space", play_label, controls.start || controls.pause || controls.resume),
        ("e", "end", controls.pause || controls.resume),
        ("r", "reset", controls.reset),
        ("n", "shuffle", controls.randomize),
        ("[ ]", "size", controls.array_size),
        ("+ -", "speed", controls.speed),
    ];
    if compare {
        keys.push(("1-5", "toggle", controls.algorithm_select));
    } else {
        keys.push(("a", "algorithm", controls.algorithm_select));
    }
    keys.push(("q", "quit", true));

    let enabled = Style::default().bg(Color::DarkGray).fg(Color::White);
    let disabled = Style::default().bg(Color::DarkGray).fg(Color::Black);
    let spans: Vec<Span> = keys
        .into_iter()
        .map(|(key, label, live)| {
            Span::styled(
                format!(" {key}: {label}  "),
                if live { enabled } else { disabled },
            )
        })
        .collect();

    let bar = Paragraph::new(Line::from(spans)).style(enabled);
    f.render_widget(bar, area);
}

// ---------------------------------------------------------------------------
// Compare
// ---------------------------------------------------------------------------

pub fn draw_compare(f: &mut Frame, app: &CompareApp) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Min(8),    // panels
            Constraint::Length(1), // selection
            Constraint::Length(1), // status
            Constraint::Length(1), // keys
        ])
        .split(f.area());

    let state = app.state();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Line::from(vec![
            Span::styled(" sortviz compare ", Style::default().bold().fg(Color::Cyan)),
            Span::raw("  "),
            Span::styled(state.status.as_str(), status_style(state.status)),
            Span::styled(
                format!(
                    "  {} panels  {} ms/tick  x{}  {} ",
                    state.panels.len(),
                    app.interval_ms(),
                    app.steps_per_tick(),
                    state.session_id
                ),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    f.render_widget(block, rows[0]);

    for (panel, area) in state.panels.iter().zip(panel_grid(rows[1], state.panels.len())) {
        let info = panel.algorithm.info();
        let title = Line::from(vec![
            Span::styled(
                format!(" {} ", info.display_name),
                Style::default().bold().fg(Color::Yellow),
            ),
            Span::styled(panel.status.as_str(), status_style(panel.status)),
            Span::styled(
                format!(
                    "  {}/{}  {} ",
                    panel.step_index + 1,
                    panel.steps.len(),
                    info.complexity.average
                ),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        let block = Block::default().borders(Borders::ALL).title(title);
        let inner = block.inner(area);
        f.render_widget(block, area);
        f.render_widget(
            BarsView {
                step: panel.step,
                status: panel.status,
                labels: None,
                transition: None,
                caption: None,
            },
            inner,
        );
    }

    draw_selection(f, rows[2], state.selected);
    draw_status_line(f, rows[3], app.message(), state.shared_input.len(), app.speed());
    draw_keys(f, rows[4], app.availability(), true);
}

/// Split `area` into `count` cells: up to three columns, rows as needed.
fn panel_grid(area: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let cols = match count {
        1 | 2 => count,
        3 | 4 => 2,
        _ => 3,
    };
    let rows = count.div_ceil(cols);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
        .split(area);

    row_areas
        .iter()
        .flat_map(|row| {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, cols as u32); cols])
                .split(*row)
                .to_vec()
        })
        .take(count)
        .collect()
}

fn draw_selection(f: &mut Frame, area: Rect, selected: &[AlgorithmId]) {
    let semantics = VisualSemantics::default();
    let mut spans = vec![Span::raw(" ")];
    for (slot, id) in AlgorithmId::ALL.iter().enumerate() {
        let on = selected.contains(id);
        let style = if on {
            Style::default()
                .bold()
                .fg(to_color(semantics.color_for(BarVisualState::Completed)))
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mark = if on { "x" } else { " " };
        spans.push(Span::styled(
            format!("[{}] {} {}  ", slot + 1, mark, id.display_name()),
            style,
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn player_shows_algorithm_and_bars() {
        let app = App::new(AlgorithmId::QuickSort, vec![4, 1, 3, 2, 5], 50);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Quick Sort"));
        assert!(text.contains("step 1/"));
        assert!(text.contains("op: start"));

        let neutral = to_color(VisualSemantics::default().neutral);
        let buffer = terminal.backend().buffer();
        let painted = buffer.content.iter().filter(|c| c.bg == neutral).count();
        assert!(painted > 0, "expected neutral bars in the frame");
    }

    #[test]
    fn compare_draws_one_panel_per_selection() {
        let app = CompareApp::new(
            &[AlgorithmId::BubbleSort, AlgorithmId::MergeSort, AlgorithmId::QuickSort],
            vec![3, 1, 2, 5, 4],
            50,
        )
        .unwrap();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| draw_compare(f, &app)).unwrap();

        let text = screen_text(&terminal);
        for name in [" Bubble Sort ", " Merge Sort ", " Quick Sort "] {
            assert!(text.contains(name), "missing panel {name}");
        }
        assert!(text.contains("[1] x Bubble Sort"));
        assert!(text.contains("[2]   Insertion Sort"));
    }

    #[test]
    fn grid_fits_panels() {
        let area = Rect::new(0, 0, 90, 30);
        assert!(panel_grid(area, 0).is_empty());
        assert_eq!(panel_grid(area, 1), vec![area]);
        let five = panel_grid(area, 5);
        assert_eq!(five.len(), 5);
        assert!(five.iter().all(|cell| cell.width == 30 && cell.height == 15));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let app = App::new(AlgorithmId::BubbleSort, vec![2, 1], 50);
        let mut terminal = Terminal::new(TestBackend::new(10, 5)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();
    }
}
