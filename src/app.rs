use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{debug, info};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};
use tui_textarea::TextArea;

use crate::campaign::{Day, Locale};
use crate::companion::Companion;
use crate::progress::{DayStatus, ProgressEvent, Tool};
use crate::puzzle::{resolve, widget_for, PuzzleOutcome, PuzzleWidget, Resolution};
use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Title,
    Playing,
    DayComplete { day: u32, reward: Option<String> },
    Inventory,
    CaseClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Continue,
    NewGame,
    Quit,
}

impl MenuOption {
    pub fn next(self) -> Self {
        match self {
            MenuOption::Continue => MenuOption::NewGame,
            MenuOption::NewGame => MenuOption::Quit,
            MenuOption::Quit => MenuOption::Continue,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            MenuOption::Continue => MenuOption::Quit,
            MenuOption::NewGame => MenuOption::Continue,
            MenuOption::Quit => MenuOption::NewGame,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Puzzle,
    Chat,
}

pub struct App {
    pub session: Session,
    pub companion: Companion,
    pub locale: Locale,
    pub answer: TextArea<'static>,
    pub chat_input: TextArea<'static>,
    pub widget: PuzzleWidget,
    pub message: String,
    pub message_style: Style,
    pub message_scroll: u16,
    pub screen: Screen,
    pub menu_selection: MenuOption,
    pub focus: Focus,
    pub command_mode: bool,
    pub command_buffer: String,
    pub should_quit: bool,
}

fn input_box(title: &'static str) -> TextArea<'static> {
    let mut input = TextArea::default();
    input.set_block(Block::default().borders(Borders::ALL).title(title));
    input.set_cursor_line_style(Style::default());
    input
}

impl App {
    pub fn new(session: Session, companion: Companion, locale: Locale) -> Self {
        let mut app = App {
            session,
            companion,
            locale,
            answer: input_box(" Answer [Enter: Submit] "),
            chat_input: input_box(" Walkie-Talkie [Tab: Switch] "),
            widget: PuzzleWidget::Unavailable,
            message: String::from("*Ksshh* Agent K here. Talk to me if you get stuck."),
            message_style: Style::default().fg(Color::Yellow),
            message_scroll: 0,
            screen: Screen::Title,
            menu_selection: MenuOption::Continue,
            focus: Focus::Puzzle,
            command_mode: false,
            command_buffer: String::new(),
            should_quit: false,
        };
        app.load_day();
        app
    }

    pub fn day(&self) -> Option<&Day> {
        self.session.store().current_day_data()
    }

    fn say(&mut self, text: impl Into<String>, color: Color) {
        self.message = text.into();
        self.message_style = Style::default().fg(color);
        self.message_scroll = 0;
    }

    /// Remounts the puzzle panel for the current day.
    pub fn load_day(&mut self) {
        let widget = widget_for(self.day());
        let title = match &widget {
            PuzzleWidget::CodeEntry { .. } => " Keypad [Enter: Try Code] ",
            _ => " Answer [Enter: Submit] ",
        };
        self.answer = input_box(title);
        self.widget = widget;
        self.focus = Focus::Puzzle;
    }

    pub fn start_new(&mut self) {
        self.session.reset();
        self.companion.clear();
        self.screen = Screen::Playing;
        self.load_day();
        self.say(
            "*Ksshh* New case file. Start with the wreckage, Inspector.",
            Color::Yellow,
        );
        info!("new investigation started");
    }

    pub fn continue_game(&mut self) {
        self.screen = Screen::Playing;
        self.load_day();
        let day = self.session.store().current_day();
        self.say(format!("*Ksshh* Back on Day {day}. Where were we?"), Color::Yellow);
    }

    pub fn submit_answer(&mut self) {
        let day = self.session.store().current_day();
        let outcome = match self.widget {
            PuzzleWidget::AnswerEntry { .. } | PuzzleWidget::CodeEntry { .. } => {
                let text = self.answer.lines().join("");
                if text.trim().is_empty() {
                    return;
                }
                PuzzleOutcome::Answer(text)
            }
            PuzzleWidget::Interaction { .. } => PuzzleOutcome::Interaction,
            PuzzleWidget::Unavailable => return,
        };

        match resolve(&mut self.session, day, outcome) {
            Resolution::Solved => self.collect_events(),
            Resolution::Rejected => {
                if let PuzzleWidget::CodeEntry { .. } = self.widget {
                    self.load_day();
                    self.track_keypad();
                }
                let text = self.companion.lines().wrong_answer.clone();
                self.say(text, Color::Red);
            }
            Resolution::Ignored => {}
        }
    }

    /// Surfaces store events: a completed day raises the modal.
    pub fn collect_events(&mut self) {
        for event in self.session.drain_events() {
            match event {
                ProgressEvent::DayCompleted { day, reward } => {
                    self.screen = Screen::DayComplete { day, reward };
                }
                ProgressEvent::DayUnlocked(day) => debug!("ui notified: day {day} unlocked"),
            }
        }
    }

    /// Leaves the day-complete modal, moving on to the next day.
    pub fn advance_day(&mut self) {
        if self.session.store().is_campaign_complete() {
            self.screen = Screen::CaseClosed;
            return;
        }
        let next = self.session.store().current_day() + 1;
        self.session.set_current_day(next);
        self.screen = Screen::Playing;
        self.load_day();
        self.say(
            format!("*Ksshh* Day {} is open. Let's go.", self.session.store().current_day()),
            Color::Yellow,
        );
    }

    pub fn show_hint(&mut self) {
        let day = self.session.store().current_day();
        match self.session.next_hint(day) {
            Ok(hint) => self.say(format!("HINT: {hint}"), Color::Cyan),
            Err(_) => self.say("*Ksshh* Nothing on file for this one.", Color::DarkGray),
        }
    }

    pub fn toggle_tool(&mut self, tool: Tool) {
        self.session.toggle_tool(tool);
        let active = self.session.store().active_tool();
        self.say(format!("Active tool: {}", active.label()), Color::Magenta);
    }

    /// Moves `delta` days; locked days are refused without a message.
    pub fn navigate(&mut self, delta: i64) {
        let current = self.session.store().current_day() as i64;
        let target = current + delta;
        if target < 1 {
            return;
        }
        let before = self.session.store().current_day();
        self.session.set_current_day(target as u32);
        if self.session.store().current_day() != before {
            self.load_day();
            self.message_scroll = 0;
        }
    }

    pub fn send_chat(&mut self) {
        let text = self.chat_input.lines().join(" ");
        if text.trim().is_empty() {
            return;
        }
        self.chat_input = input_box(" Walkie-Talkie [Tab: Switch] ");
        let reply = self.companion.handle(&mut self.session, &text);
        self.say(reply, Color::Green);
        self.collect_events();
    }

    fn run_command(&mut self) {
        let command = std::mem::take(&mut self.command_buffer);
        self.command_mode = false;
        match command.as_str() {
            "q" | "quit" => self.should_quit = true,
            "inventory" | "inv" => self.screen = Screen::Inventory,
            "hint" => self.show_hint(),
            "mute" => self.session.toggle_mute(),
            "reset" => self.start_new(),
            "help" => self.say(
                "Commands: :q (quit), :hint, :inventory, :mute, :reset",
                Color::Cyan,
            ),
            "" => {}
            other => {
                let text = format!("Unknown command: {other}");
                self.say(text, Color::Red);
            }
        }
    }

    /// Reports how much of the combination has been keyed in.
    fn track_keypad(&mut self) {
        if let PuzzleWidget::CodeEntry { digits } = self.widget {
            let entered = self.answer.lines().join("").chars().count();
            let percent = (entered * 100 / digits.max(1)).min(100) as u8;
            let day = self.session.store().current_day();
            self.session.update_puzzle_progress(day, percent);
        }
    }

    fn accepts_char(&self, c: char) -> bool {
        match self.widget {
            PuzzleWidget::CodeEntry { digits } => {
                c.is_ascii_digit() && self.answer.lines().join("").chars().count() < digits
            }
            PuzzleWidget::AnswerEntry { .. } => true,
            PuzzleWidget::Interaction { .. } | PuzzleWidget::Unavailable => false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.screen {
            Screen::Title => {
                match key.code {
                    KeyCode::Down | KeyCode::Char('j') => {
                        self.menu_selection = self.menu_selection.next();
                    }
                    KeyCode::Up | KeyCode::Char('k') => {
                        self.menu_selection = self.menu_selection.prev();
                    }
                    KeyCode::Enter => match self.menu_selection {
                        MenuOption::Continue => self.continue_game(),
                        MenuOption::NewGame => self.start_new(),
                        MenuOption::Quit => self.should_quit = true,
                    },
                    KeyCode::Char('q') => self.should_quit = true,
                    _ => {}
                }
                return;
            }
            Screen::DayComplete { .. } => {
                if key.code == KeyCode::Enter {
                    self.advance_day();
                }
                return;
            }
            Screen::Inventory => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('i')) {
                    self.screen = Screen::Playing;
                }
                return;
            }
            Screen::CaseClosed => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                    self.should_quit = true;
                }
                return;
            }
            Screen::Playing => {}
        }

        // Command mode handling (vim-style :q)
        if self.command_mode {
            match key.code {
                KeyCode::Esc => {
                    self.command_mode = false;
                    self.command_buffer.clear();
                }
                KeyCode::Enter => self.run_command(),
                KeyCode::Backspace => {
                    self.command_buffer.pop();
                    if self.command_buffer.is_empty() {
                        self.command_mode = false;
                    }
                }
                KeyCode::Char(c) => self.command_buffer.push(c),
                _ => {}
            }
            return;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char(':'), KeyModifiers::NONE) if self.focus == Focus::Puzzle => {
                self.command_mode = true;
                self.command_buffer.clear();
            }
            (KeyCode::Tab, _) => {
                self.focus = match self.focus {
                    Focus::Puzzle => Focus::Chat,
                    Focus::Chat => Focus::Puzzle,
                };
            }
            (KeyCode::Esc, _) => {
                self.say("Type :q to quit", Color::DarkGray);
            }
            (KeyCode::F(1), _) => self.show_hint(),
            (KeyCode::F(2), _) => self.toggle_tool(Tool::UvLight),
            (KeyCode::F(3), _) => self.toggle_tool(Tool::Flashlight),
            (KeyCode::F(4), _) => self.session.toggle_mute(),
            (KeyCode::PageDown, _) => self.navigate(1),
            (KeyCode::PageUp, _) => self.navigate(-1),
            (KeyCode::Down, KeyModifiers::SHIFT) => {
                let lines = self.message.lines().count() as u16;
                if self.message_scroll < lines.saturating_sub(5) {
                    self.message_scroll += 3;
                }
            }
            (KeyCode::Up, KeyModifiers::SHIFT) => {
                self.message_scroll = self.message_scroll.saturating_sub(3);
            }
            (KeyCode::Enter, _) => match self.focus {
                Focus::Puzzle => self.submit_answer(),
                Focus::Chat => self.send_chat(),
            },
            _ => match self.focus {
                Focus::Chat => {
                    self.chat_input.input(key);
                }
                Focus::Puzzle => {
                    let solved =
                        self.session.store().day_status(self.session.store().current_day())
                            == DayStatus::Solved;
                    let allowed = match key.code {
                        KeyCode::Char(c) => self.accepts_char(c),
                        _ => true,
                    };
                    if !solved && allowed {
                        self.answer.input(key);
                        self.track_keypad();
                    }
                }
            },
        }
    }
}

pub fn status_style(status: DayStatus) -> Style {
    match status {
        DayStatus::Locked => Style::default().fg(Color::DarkGray),
        DayStatus::Active => Style::default().fg(Color::Yellow),
        DayStatus::Solved => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    }
}
