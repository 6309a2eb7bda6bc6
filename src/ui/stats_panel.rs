use crate::calc::{DerivedStats, DerivedView, NextGoal};
use crate::ui::{CLIMBED_COLOR, REMAINING_COLOR, bold_fg, panel};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Paragraph, Wrap,
        canvas::{Canvas, Points},
    },
};
use std::f64::consts::TAU;

const CLIMBING_TIP: &str =
    "Enjoy the climb. Check your fitness and gear before every summit, and leave no trace.";

const RING_RADII: [f64; 3] = [0.72, 0.82, 0.92];
const RING_SAMPLES: usize = 240;

/// One category of the completion chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSlice {
    pub label: &'static str,
    pub value: usize,
    pub color: Color,
}

pub fn chart_data(stats: &DerivedStats) -> [ChartSlice; 2] {
    [
        ChartSlice {
            label: "Climbed",
            value: stats.climbed,
            color: CLIMBED_COLOR,
        },
        ChartSlice {
            label: "Remaining",
            value: stats.remaining,
            color: REMAINING_COLOR,
        },
    ]
}

/// Ring sample points for each slice, clockwise from twelve o'clock, each
/// slice covering its share of the turn. With nothing to show every point
/// goes to the last slice.
fn ring_points(slices: &[ChartSlice], samples: usize) -> Vec<Vec<(f64, f64)>> {
    let mut points = vec![Vec::new(); slices.len()];
    if slices.is_empty() {
        return points;
    }
    let total: usize = slices.iter().map(|s| s.value).sum();
    for i in 0..samples {
        let t = (i as f64 + 0.5) / samples as f64;
        let slot = if total == 0 {
            slices.len() - 1
        } else {
            let mut acc = 0.0;
            slices
                .iter()
                .position(|s| {
                    acc += s.value as f64 / total as f64;
                    t < acc
                })
                .unwrap_or(slices.len() - 1)
        };
        let angle = TAU / 4.0 - t * TAU;
        points[slot].extend(RING_RADII.iter().map(|r| (r * angle.cos(), r * angle.sin())));
    }
    points
}

/// Bounds that keep the ring circular inside `area`.
fn ring_bounds(area: Rect) -> ([f64; 2], [f64; 2]) {
    let aspect = f64::from(area.width.max(1)) / (2.0 * f64::from(area.height.max(1)));
    if aspect >= 1.0 {
        ([-aspect, aspect], [-1.0, 1.0])
    } else {
        ([-1.0, 1.0], [-1.0 / aspect, 1.0 / aspect])
    }
}

pub fn render(f: &mut Frame, area: Rect, view: &DerivedView) {
    let block = panel(" Progress ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // ring chart
            Constraint::Length(2), // climbed / remaining counters
            Constraint::Length(1), // next goal
        ])
        .split(inner);

    render_ring(f, rows[0], &view.stats);
    render_counters(f, rows[1], &view.stats);

    let goal_style = match view.next_goal {
        NextGoal::Complete => Style::default().fg(Color::Black).bg(CLIMBED_COLOR),
        NextGoal::Peak(_) => Style::default().fg(CLIMBED_COLOR),
    };
    let goal = Paragraph::new(view.next_goal.to_string())
        .alignment(Alignment::Center)
        .style(goal_style.add_modifier(Modifier::BOLD));
    f.render_widget(goal, rows[2]);
}

fn render_ring(f: &mut Frame, area: Rect, stats: &DerivedStats) {
    let slices = chart_data(stats);
    let points = ring_points(&slices, RING_SAMPLES);
    let (x_bounds, y_bounds) = ring_bounds(area);
    let label = format!("{}%", stats.percentage);
    // Shift left by half the label so it sits centred.
    let cell_width = (x_bounds[1] - x_bounds[0]) / f64::from(area.width.max(1));
    let label_x = -(label.chars().count() as f64) / 2.0 * cell_width;

    let canvas = Canvas::default()
        .marker(symbols::Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            for (slice, coords) in slices.iter().zip(&points) {
                ctx.draw(&Points {
                    coords,
                    color: slice.color,
                });
            }
            ctx.print(label_x, 0.0, Span::styled(label.clone(), bold_fg(Color::White)));
        });
    f.render_widget(canvas, area);
}

fn render_counters(f: &mut Frame, area: Rect, stats: &DerivedStats) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    for (slice, rect) in chart_data(stats).iter().zip(cols.iter()) {
        let lines = vec![
            Line::from(Span::styled(slice.label, Style::default().fg(Color::DarkGray))),
            Line::from(Span::styled(slice.value.to_string(), bold_fg(Color::White))),
        ];
        f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), *rect);
    }
}

/// Static reminder card under the filter box.
pub fn render_tip(f: &mut Frame, area: Rect) {
    let tip = Paragraph::new(CLIMBING_TIP)
        .style(Style::default().fg(CLIMBED_COLOR))
        .wrap(Wrap { trim: true })
        .block(panel(" Climbing Tip "));
    f.render_widget(tip, area);
}
