//! Chart rendering for the blocking viewer.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, Paragraph};

use super::ChartSpec;

/// Line colors cycled across series.
const SERIES_COLORS: [Color; 2] = [Color::Cyan, Color::Yellow];
/// Footer help text color.
const FOOTER_FG: Color = Color::DarkGray;

/// Renders the chart frame with a one-line footer of keybindings.
pub fn render(frame: &mut Frame, spec: &ChartSpec) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(1)])
        .split(frame.area());

    render_chart(frame, spec, chunks[0]);

    let footer = Paragraph::new(Line::from(Span::styled(
        " q/Esc: close",
        Style::default().fg(FOOTER_FG),
    )));
    frame.render_widget(footer, chunks[1]);
}

fn render_chart(frame: &mut Frame, spec: &ChartSpec, area: ratatui::layout::Rect) {
    let datasets: Vec<Dataset> = spec
        .series
        .iter()
        .enumerate()
        .map(|(i, s)| {
            Dataset::default()
                .name(s.name.clone())
                .marker(symbols::Marker::Braille)
                .style(Style::default().fg(SERIES_COLORS[i % SERIES_COLORS.len()]))
                .data(&s.points)
        })
        .collect();

    let [y_lo, y_hi] = auto_bounds_y(&spec.series);
    let x_hi = spec
        .series
        .iter()
        .filter_map(|s| s.points.last())
        .map(|p| p.0)
        .fold(1.0, f64::max);

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(spec.title.clone())
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .bounds([0.0, x_hi])
                .labels(vec![spec.x_labels.0.clone(), spec.x_labels.1.clone()]),
        )
        .y_axis(
            Axis::default()
                .title(spec.y_label.clone())
                .bounds([y_lo, y_hi])
                .labels(vec![format!("{y_lo:.1}"), format!("{y_hi:.1}")]),
        );

    frame.render_widget(chart, area);
}

/// Computes Y-axis bounds across all series with 10% padding.
fn auto_bounds_y(series: &[super::Series]) -> [f64; 2] {
    let all = series.iter().flat_map(|s| s.points.iter().map(|&(_, y)| y));
    let min = all.clone().fold(f64::INFINITY, f64::min);
    let max = all.fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return [-1.0, 1.0];
    }
    let range = (max - min).max(0.1);
    let pad = range * 0.1;
    [min - pad, max + pad]
}
