//! Blocking terminal charts for the usage log and forecast timeline.
//!
//! Feature-gated behind `tui`. Each chart takes over the terminal
//! (raw mode, alternate screen) and blocks until dismissed with `q`,
//! `Esc`, or Ctrl-C.

mod layout;

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::forecast::model::Evaluation;
use crate::usage_log::Reading;

/// One named line on a chart.
pub struct Series {
    /// Legend label.
    pub name: String,
    /// `(x, y)` points in draw order.
    pub points: Vec<(f64, f64)>,
}

/// Everything the renderer needs for one chart screen.
pub struct ChartSpec {
    /// Chart title.
    pub title: String,
    /// Y-axis label.
    pub y_label: String,
    /// Labels for the left and right ends of the x-axis.
    pub x_labels: (String, String),
    /// Lines to draw.
    pub series: Vec<Series>,
}

/// Charts the usage log as kWh over logged order.
///
/// # Errors
///
/// Returns an `io::Error` if the terminal cannot be configured or drawn.
pub fn run_usage_chart(rows: &[Reading]) -> io::Result<()> {
    let points: Vec<(f64, f64)> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| (i as f64, r.kwh))
        .collect();
    let x_labels = (
        rows.first().map_or_else(String::new, |r| r.timestamp.clone()),
        rows.last().map_or_else(String::new, |r| r.timestamp.clone()),
    );
    run_chart(&ChartSpec {
        title: " Energy Usage History ".to_string(),
        y_label: "kWh".to_string(),
        x_labels,
        series: vec![Series {
            name: "kWh".to_string(),
            points,
        }],
    })
}

/// Charts actual vs predicted closes over the held-out test window.
///
/// # Errors
///
/// Returns an `io::Error` if the terminal cannot be configured or drawn.
pub fn run_forecast_chart(symbol: &str, evaluation: &Evaluation) -> io::Result<()> {
    let to_points = |values: &[f64]| {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64, v))
            .collect::<Vec<_>>()
    };
    run_chart(&ChartSpec {
        title: format!(" {symbol} Close: Actual vs Predicted (test window) "),
        y_label: "price".to_string(),
        x_labels: (
            "test start".to_string(),
            format!("+{} days", evaluation.test_len),
        ),
        series: vec![
            Series {
                name: "Actual".to_string(),
                points: to_points(&evaluation.actual_test),
            },
            Series {
                name: "Predicted".to_string(),
                points: to_points(&evaluation.predicted_test),
            },
        ],
    })
}

/// Renders one chart and blocks until the viewer dismisses it.
fn run_chart(spec: &ChartSpec) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e);
    }

    let backend = CrosstermBackend::new(stdout);
    let result = Terminal::new(backend).and_then(|mut terminal| {
        let outcome = view_loop(&mut terminal, spec);
        let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();
        outcome
    });

    // Teardown must run even when drawing failed.
    let _ = disable_raw_mode();
    result
}

/// Draws the chart and waits for a dismissal key.
fn view_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    spec: &ChartSpec,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| layout::render(frame, spec))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(());
                    }
                    _ => {}
                }
            }
        }
    }
}
