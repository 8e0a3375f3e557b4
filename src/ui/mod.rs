use crate::app::App;
use crate::config::ConfigSource;
use crate::refill::form::RefillForm;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

pub mod machine_view;

pub fn render(frame: &mut Frame, app: &App, form: &RefillForm, source: &ConfigSource) {
    let size = frame.size();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(6),
            Constraint::Length(2),
        ])
        .split(size);

    render_header(frame, layout[0], source);

    let machine_count = form.machines().len().max(1) as u32;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            (0..machine_count)
                .map(|_| Constraint::Ratio(1, machine_count))
                .collect::<Vec<_>>(),
        )
        .split(layout[1]);

    for (index, machine) in form.machines().iter().enumerate() {
        machine_view::render(frame, columns[index], app, index, machine);
    }

    render_log(frame, layout[2], form);
    render_footer(frame, layout[3]);
}

fn render_header(frame: &mut Frame, area: Rect, source: &ConfigSource) {
    let source = match source {
        ConfigSource::BuiltIn => "built-in capacities".to_string(),
        ConfigSource::File(path) => path.display().to_string(),
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(
                "Coin Refill",
                Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  •  Capacities: "),
            Span::styled(source, Style::default().fg(Color::Yellow)),
        ]),
        Line::from(vec![Span::raw(
            "Type the coins currently in each tube; refills are rounded to whole rolls.",
        )]),
    ];

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(paragraph, area);
}

fn render_log(frame: &mut Frame, area: Rect, form: &RefillForm) {
    let block = Block::default().title("Event Log").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut items: Vec<ListItem> = form
        .messages()
        .rev()
        .map(|msg| ListItem::new(msg.clone()))
        .collect();
    if items.is_empty() {
        items.push(ListItem::new("Nothing to report yet."));
    }
    frame.render_widget(List::new(items), inner);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let instructions = Paragraph::new(Line::from(vec![
        Span::raw("Hotkeys: "),
        Span::styled("[0-9 .]", Style::default().fg(Color::Yellow)),
        Span::raw(" enter count  •  "),
        Span::styled("[Backspace]", Style::default().fg(Color::Yellow)),
        Span::raw(" erase  •  "),
        Span::styled("[J/K]", Style::default().fg(Color::Yellow)),
        Span::raw(" navigate  •  "),
        Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" switch machine  •  "),
        Span::styled("[C]", Style::default().fg(Color::Yellow)),
        Span::raw(" clear row  •  "),
        Span::styled("[R]", Style::default().fg(Color::Yellow)),
        Span::raw(" reset machine  •  "),
        Span::styled("[Q]", Style::default().fg(Color::Yellow)),
        Span::raw(" quit"),
    ]))
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::TOP));
    frame.render_widget(instructions, area);
}
