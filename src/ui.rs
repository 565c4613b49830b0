use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{status_style, App, Focus, MenuOption, Screen};
use crate::campaign::act_title;
use crate::companion::Speaker;
use crate::progress::{ActiveTool, DayStatus};
use crate::puzzle::PuzzleWidget;

pub fn draw_ui(f: &mut Frame, app: &App) {
    if matches!(app.screen, Screen::Title) {
        draw_title_screen(f, app);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(8),
        ])
        .split(f.area());

    draw_status_bar(f, app, chunks[0]);

    // Main content: case file + puzzle/radio
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    draw_case_file(f, app, main_chunks[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(10)])
        .split(main_chunks[1]);
    draw_puzzle(f, app, right[0]);
    draw_radio(f, app, right[1]);

    draw_message(f, app, chunks[2]);

    match &app.screen {
        Screen::DayComplete { day, reward } => draw_day_complete(f, *day, reward.as_deref()),
        Screen::Inventory => draw_inventory(f, app),
        Screen::CaseClosed => draw_case_closed(f, app),
        Screen::Title | Screen::Playing => {}
    }
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let store = app.session.store();
    let summary = store.summary();
    let day = store.current_day();
    let act = app.day().map(|d| d.meta.act).unwrap_or(1);
    let tool_style = match store.active_tool() {
        ActiveTool::None => Style::default().fg(Color::DarkGray),
        ActiveTool::Uv => Style::default().fg(Color::Magenta),
        ActiveTool::Flashlight => Style::default().fg(Color::Yellow),
    };

    let status = Line::from(vec![
        Span::styled(
            " RED PROTOCOL ",
            Style::default().fg(Color::White).bg(Color::Red),
        ),
        Span::raw("  "),
        Span::styled(
            format!(" Day {}/{} ", day, summary.total),
            status_style(store.day_status(day)),
        ),
        Span::raw("  "),
        Span::styled(
            format!(" {} ", act_title(act)),
            Style::default().fg(Color::White).bg(Color::DarkGray),
        ),
        Span::raw("  "),
        Span::styled(
            format!(" Solved: {} ({}%) ", summary.solved, summary.percentage),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("  "),
        Span::styled(
            format!(" Tool: {} ", store.active_tool().label()),
            tool_style,
        ),
        Span::raw("  "),
        Span::styled(
            if store.is_muted() { " MUTED " } else { " SOUND " },
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    let status_block = Paragraph::new(status).block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(status_block, area);
}

fn draw_case_file(f: &mut Frame, app: &App, area: Rect) {
    let (title, text) = match app.day() {
        Some(day) => (
            format!(" Case File: {} ", day.title(app.locale)),
            day.narrative(app.locale).to_string(),
        ),
        None => (" Case File ".to_string(), "No file for this day yet.".to_string()),
    };
    let narrative = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(Color::White));
    f.render_widget(narrative, area);
}

fn draw_puzzle(f: &mut Frame, app: &App, area: Rect) {
    let store = app.session.store();
    let day = store.current_day();
    let kind = app.day().map(|d| d.kind().label()).unwrap_or("Unknown");

    if store.day_status(day) == DayStatus::Solved {
        let reward = app
            .day()
            .and_then(|d| d.reward_name(app.locale))
            .map(|r| format!("\n\nCollected: {r}"))
            .unwrap_or_default();
        let secured = Paragraph::new(format!("EVIDENCE SECURED\n\nDay {day} Complete{reward}"))
            .block(Block::default().borders(Borders::ALL).title(format!(" {kind} ")))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD));
        f.render_widget(secured, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    let (prompt, show_input) = match &app.widget {
        PuzzleWidget::AnswerEntry { prompt } => (prompt.to_string(), true),
        PuzzleWidget::CodeEntry { digits } => (
            format!(
                "Enter the {digits}-digit combination.\n\nKeyed in: {}%",
                store.puzzle_progress(day)
            ),
            true,
        ),
        PuzzleWidget::Interaction { prompt } => (format!("{prompt}\n\n[ Press ENTER ]"), false),
        PuzzleWidget::Unavailable => (
            "Puzzle in development.\n\nCheck back soon, detective.".to_string(),
            false,
        ),
    };
    let mechanic = app
        .day()
        .and_then(|d| d.challenge.mechanic.as_deref())
        .map(|m| format!("\n\n({m})"))
        .unwrap_or_default();
    let border = if app.focus == Focus::Puzzle {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let panel = Paragraph::new(format!("{prompt}{mechanic}"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(format!(" {kind} ")),
        )
        .wrap(Wrap { trim: false });

    if show_input {
        f.render_widget(panel, chunks[0]);
        f.render_widget(&app.answer, chunks[1]);
    } else {
        f.render_widget(panel, area);
    }
}

fn draw_radio(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    let transcript = app.companion.transcript();
    let visible = chunks[0].height.saturating_sub(2) as usize;
    let lines: Vec<Line> = transcript
        .iter()
        .skip(transcript.len().saturating_sub(visible))
        .map(|line| match line.speaker {
            Speaker::Inspector => Line::from(Span::styled(
                format!("> {}", line.text),
                Style::default().fg(Color::White),
            )),
            Speaker::AgentK => Line::from(Span::styled(
                format!("K: {}", line.text),
                Style::default().fg(Color::Green),
            )),
        })
        .collect();
    let border = if app.focus == Focus::Chat {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let log = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(" Agent K "),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(log, chunks[0]);
    f.render_widget(&app.chat_input, chunks[1]);
}

fn draw_message(f: &mut Frame, app: &App, area: Rect) {
    let message_content = if app.command_mode {
        format!(":{}", app.command_buffer)
    } else {
        app.message.clone()
    };
    let (message_style, message_title) = if app.command_mode {
        (Style::default().fg(Color::White).bg(Color::DarkGray), " Command ")
    } else {
        (app.message_style, " Dispatch [F1 Hint | F2 UV | F3 Torch | F4 Mute | :q Quit] ")
    };
    let message = Paragraph::new(message_content)
        .block(Block::default().borders(Borders::ALL).title(message_title))
        .wrap(Wrap { trim: false })
        .style(message_style)
        .scroll((app.message_scroll, 0));
    f.render_widget(message, area);
}

fn centered(area: Rect, width_pct: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - width_pct) / 2),
            Constraint::Percentage(width_pct),
            Constraint::Percentage((100 - width_pct) / 2),
        ])
        .split(vertical[1])[1]
}

fn draw_day_complete(f: &mut Frame, day: u32, reward: Option<&str>) {
    let area = centered(f.area(), 50, 9);
    let reward = reward
        .map(|r| format!("Collected: {r}"))
        .unwrap_or_default();
    let popup = Paragraph::new(format!(
        "*** EVIDENCE SECURED ***\n\nDay {day} complete.\n{reward}\n\n[ Press ENTER ]"
    ))
    .block(Block::default().borders(Borders::ALL).title(" CASE UPDATE "))
    .alignment(Alignment::Center)
    .style(Style::default().fg(Color::Black).bg(Color::Green));
    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

fn draw_inventory(f: &mut Frame, app: &App) {
    let items = app.session.store().inventory();
    let area = centered(f.area(), 60, (items.len() as u16 + 4).clamp(6, 28));
    let lines: Vec<Line> = if items.is_empty() {
        vec![Line::from("Evidence locker is empty.")]
    } else {
        items
            .iter()
            .map(|item| {
                Line::from(vec![
                    Span::styled(
                        format!("Day {:>2}  ", item.day_found),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(item.name.clone(), Style::default().fg(Color::Yellow)),
                    Span::raw(format!("  {}", item.description)),
                ])
            })
            .collect()
    };
    let popup = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Evidence Locker [Esc: Close] "),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

fn draw_case_closed(f: &mut Frame, app: &App) {
    let area = centered(f.area(), 60, 12);
    let store = app.session.store();
    let hints: usize = (1..=store.summary().total).map(|d| store.hints_seen(d)).sum();
    let popup = Paragraph::new(format!(
        "=== CASE CLOSED ===\n\n\
        Days solved:     {:>4}\n\
        Evidence found:  {:>4}\n\
        Hints taken:     {:>4}\n\n\
        Mission accomplished, Inspector.\n\n\
        Press ENTER to exit...",
        store.summary().solved,
        store.inventory().len(),
        hints,
    ))
    .block(Block::default().borders(Borders::ALL).title(" RED PROTOCOL "))
    .alignment(Alignment::Center)
    .style(
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

fn draw_title_screen(f: &mut Frame, app: &App) {
    let area = f.area();

    let title_art = r#"
    ╔═══════════════════════════════════════════════════════════╗
    ║                                                           ║
    ║         ██████╗ ███████╗██████╗                           ║
    ║         ██╔══██╗██╔════╝██╔══██╗                          ║
    ║         ██████╔╝█████╗  ██║  ██║                          ║
    ║         ██╔══██╗██╔══╝  ██║  ██║                          ║
    ║         ██║  ██║███████╗██████╔╝                          ║
    ║         ╚═╝  ╚═╝╚══════╝╚═════╝                           ║
    ║                                                           ║
    ║              P  R  O  T  O  C  O  L                       ║
    ║                                                           ║
    ║         "The Silent Night Affair - 24 days to Christmas"  ║
    ║                                                           ║
    ╚═══════════════════════════════════════════════════════════╝
"#;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(17),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(1),
        ])
        .split(area);

    let title = Paragraph::new(title_art)
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let options = [
        (MenuOption::Continue, "  CONTINUE  "),
        (MenuOption::NewGame, "  NEW INVESTIGATION  "),
        (MenuOption::Quit, "  QUIT  "),
    ];
    for (i, (option, label)) in options.into_iter().enumerate() {
        let style = if app.menu_selection == option {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let item = Paragraph::new(label)
            .style(style)
            .alignment(Alignment::Center);
        f.render_widget(item, chunks[i + 1]);
    }

    let help = Paragraph::new("↑/↓ to select  •  ENTER to confirm  •  q to quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[4]);
}
