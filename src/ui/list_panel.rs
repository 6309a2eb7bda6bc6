use crate::calc::{CaseMode, FilterState};
use crate::data::{ClimbState, Peak};
use crate::ui::{CLIMBED_COLOR, UNCLIMBED_COLOR, bold_fg, panel};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
};

const SELECTED_BG: Color = Color::Rgb(30, 41, 59);

/// Filtered peaks, one row each. Row selection lives in `table_state`.
pub fn render_list(
    f: &mut Frame,
    area: Rect,
    peaks: &[&Peak],
    state: &ClimbState,
    table_state: &mut TableState,
) {
    let block = panel(" Peaks ")
        .title(Line::from(format!(" {} shown ", peaks.len())).right_aligned())
        .title_bottom(Line::from(" Enter/Space: toggle climbed ").centered());

    if peaks.is_empty() {
        let empty = Paragraph::new("No peaks match the current filters")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let rows: Vec<Row> = peaks.iter().map(|p| peak_row(p, state.contains(&p.id))).collect();
    let widths = [
        Constraint::Length(4),
        Constraint::Min(12),
        Constraint::Length(6),
        Constraint::Length(3),
        Constraint::Fill(1),
    ];
    let table = Table::new(rows, widths)
        .block(block)
        .column_spacing(1)
        .row_highlight_style(
            Style::default()
                .bg(SELECTED_BG)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");
    f.render_stateful_widget(table, area, table_state);
}

fn peak_row(peak: &Peak, climbed: bool) -> Row<'static> {
    let badge = if climbed {
        Cell::from("✓").style(bold_fg(CLIMBED_COLOR))
    } else {
        Cell::from(format!("#{}", peak.rank)).style(Style::default().fg(UNCLIMBED_COLOR))
    };
    let name_style = if climbed {
        bold_fg(Color::White)
    } else {
        Style::default().fg(UNCLIMBED_COLOR)
    };
    Row::new(vec![
        badge,
        Cell::from(peak.name.clone()).style(name_style),
        Cell::from(format!("{}m", peak.height)).style(Style::default().fg(Color::DarkGray)),
        Cell::from(peak.difficulty.label()),
        Cell::from(peak.notes.clone().unwrap_or_default()).style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ),
    ])
}

/// Search box and range selector.
pub fn render_filters(
    f: &mut Frame,
    area: Rect,
    filter: &FilterState,
    editing: bool,
    case: CaseMode,
) {
    let label = Style::default().fg(Color::DarkGray);
    let mut search = vec![Span::styled("Search ", label), Span::raw(filter.search.clone())];
    if editing {
        search.push(Span::styled("▏", Style::default().fg(CLIMBED_COLOR)));
    } else if filter.search.is_empty() {
        search.push(Span::styled("press / to search name or location", label));
    }
    if case == CaseMode::Sensitive {
        search.push(Span::styled("  [Aa]", label));
    }

    let lines = vec![
        Line::from(search),
        Line::from(vec![
            Span::styled("Range  ", label),
            Span::styled(format!("◀ {} ▶", filter.range), bold_fg(Color::White)),
            Span::styled("  r/R", label),
        ]),
    ];
    let title = if editing { " Filter (typing) " } else { " Filter " };
    f.render_widget(Paragraph::new(lines).block(panel(title)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::RangeFilter;
    use crate::data::peak::test_peak;
    use crate::ui::buffer_text;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_render_list_marks_climbed_rows() {
        let a = test_peak("A", 1, "R");
        let b = test_peak("B", 2, "R");
        let peaks = vec![&a, &b];
        let state = ClimbState::from_ids(["A"]);
        let mut table_state = TableState::default().with_selected(Some(0));
        let mut terminal = Terminal::new(TestBackend::new(60, 8)).unwrap();
        terminal
            .draw(|f| render_list(f, f.area(), &peaks, &state, &mut table_state))
            .unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("✓"));
        assert!(text.contains("#2"));
        assert!(text.contains("Peak A"));
        assert!(text.contains("2 shown"));
    }

    #[test]
    fn test_render_list_empty_message() {
        let mut table_state = TableState::default();
        let mut terminal = Terminal::new(TestBackend::new(50, 6)).unwrap();
        terminal
            .draw(|f| render_list(f, f.area(), &[], &ClimbState::default(), &mut table_state))
            .unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("No peaks match"));
        assert!(text.contains("0 shown"));
    }

    #[test]
    fn test_render_filters_shows_search_and_range() {
        let filter = FilterState {
            search: "Yushan".to_string(),
            range: RangeFilter::Named("Yushan Range".to_string()),
        };
        let mut terminal = Terminal::new(TestBackend::new(50, 4)).unwrap();
        terminal
            .draw(|f| render_filters(f, f.area(), &filter, true, CaseMode::Insensitive))
            .unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Search Yushan"));
        assert!(text.contains("Yushan Range"));
        assert!(text.contains("typing"));
    }
}
