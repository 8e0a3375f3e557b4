use crate::app::App;
use crate::refill::form::{FieldState, MachineForm};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};

pub fn render(frame: &mut Frame, area: Rect, app: &App, index: usize, machine: &MachineForm) {
    let focused = app.is_focused(index);
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let block = Block::default()
        .title(format!("Machine {}", machine.name))
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let sections = Layout::vertical([Constraint::Min(3), Constraint::Length(2)]).split(inner);

    let selected = app.selected_row(index);
    let rows: Vec<Row> = machine
        .fields
        .iter()
        .enumerate()
        .map(|(row, field)| field_row(field, focused && row == selected))
        .collect();

    let header = Row::new(vec!["Coin", "Max", "Current", "Refill", "New total"]).style(
        Style::default()
            .fg(Color::LightCyan)
            .add_modifier(Modifier::BOLD),
    );
    let widths = [
        Constraint::Length(7),
        Constraint::Length(6),
        Constraint::Length(10),
        Constraint::Length(17),
        Constraint::Length(10),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White))
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    if focused && !machine.fields.is_empty() {
        state.select(Some(selected.min(machine.fields.len() - 1)));
    }
    frame.render_stateful_widget(table, sections[0], &mut state);

    let summary = machine.summary();
    let summary_line = Line::from(vec![
        Span::raw("Load "),
        Span::styled(
            format!("{} coins", summary.coins),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("  •  value "),
        Span::styled(
            format_euros(summary.value_cents),
            Style::default().fg(Color::LightGreen),
        ),
        Span::raw(format!(
            "  •  {}/{} entered",
            summary.entered,
            machine.fields.len()
        )),
    ]);
    frame.render_widget(Paragraph::new(summary_line), sections[1]);
}

fn field_row(field: &FieldState, editing: bool) -> Row<'static> {
    let mut current = field.input().to_string();
    if editing {
        current.push('▏');
    }

    let (refill, total) = match field.quote() {
        None => (Cell::from(""), Cell::from("")),
        Some(quote) if quote.capacity_reached => (
            Cell::from(Span::styled(
                "capacity reached",
                Style::default().fg(Color::LightRed),
            )),
            Cell::from(format_count(quote.new_total)),
        ),
        Some(quote) => (
            Cell::from(Span::styled(
                format!("+{}", quote.refill),
                Style::default().fg(Color::LightGreen),
            )),
            Cell::from(format_count(quote.new_total)),
        ),
    };

    Row::new(vec![
        Cell::from(Span::styled(
            field.denomination.label(),
            Style::default().fg(Color::Yellow),
        )),
        Cell::from(field.capacity.to_string()),
        Cell::from(current),
        refill,
        total,
    ])
}

pub fn format_count(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as u64)
    } else {
        format!("{value:.2}")
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

pub fn format_euros(cents: u64) -> String {
    format!("€{}.{:02}", cents / 100, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_drop_trailing_zeros() {
        assert_eq!(format_count(920.0), "920");
        assert_eq!(format_count(399.5), "399.5");
        assert_eq!(format_count(12.25), "12.25");
    }

    #[test]
    fn euros_keep_two_decimals() {
        assert_eq!(format_euros(9_500), "€95.00");
        assert_eq!(format_euros(705), "€7.05");
    }
}
