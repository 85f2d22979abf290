//! UI state management for the calculator page

use std::collections::VecDeque;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::types::Role;
use crate::session::state::Session;

/// Maximum activity log entries to keep
const MAX_LOG_ENTRIES: usize = 50;

/// Which widget receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Attacker,
    Defender,
    Moves,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Attacker => Focus::Defender,
            Focus::Defender => Focus::Moves,
            Focus::Moves => Focus::Attacker,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Attacker => Focus::Moves,
            Focus::Defender => Focus::Attacker,
            Focus::Moves => Focus::Defender,
        }
    }

    pub fn role(self) -> Option<Role> {
        match self {
            Focus::Attacker => Some(Role::Attacker),
            Focus::Defender => Some(Role::Defender),
            Focus::Moves => None,
        }
    }
}

/// What the event loop should do after a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    None,
    Quit,
    InputChanged(Role, String),
    /// `None` is the placeholder entry
    SelectMove(Option<String>),
    DismissAlert,
}

/// An entry in the activity log
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub seq: u64,
    pub message: String,
    pub category: LogCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogCategory {
    Input,
    Calculation,
    System,
}

/// Page UI state
#[derive(Debug, Default)]
pub struct PageUI {
    pub focus: Focus,
    pub attacker_input: String,
    pub defender_input: String,
    /// Index into the session's move options (0 = placeholder)
    pub move_cursor: usize,
    pub activity_log: VecDeque<LogEntry>,
    next_seq: u64,
}

impl PageUI {
    pub fn new() -> Self {
        Self {
            activity_log: VecDeque::with_capacity(MAX_LOG_ENTRIES),
            ..Default::default()
        }
    }

    /// Add an entry to the activity log
    pub fn log(&mut self, message: String, category: LogCategory) {
        if self.activity_log.len() >= MAX_LOG_ENTRIES {
            self.activity_log.pop_front();
        }
        self.next_seq += 1;
        self.activity_log.push_back(LogEntry {
            seq: self.next_seq,
            message,
            category,
        });
    }

    pub fn input(&self, role: Role) -> &str {
        match role {
            Role::Attacker => &self.attacker_input,
            Role::Defender => &self.defender_input,
        }
    }

    fn input_mut(&mut self, role: Role) -> &mut String {
        match role {
            Role::Attacker => &mut self.attacker_input,
            Role::Defender => &mut self.defender_input,
        }
    }

    /// Keep the cursor inside the current option list
    pub fn clamp_cursor(&mut self, option_count: usize) {
        self.move_cursor = self.move_cursor.min(option_count.saturating_sub(1));
    }

    /// Follow the session's move list; a replaced list puts the cursor back
    /// on the placeholder
    pub fn sync_moves(&mut self, previous: &Session, current: &Session) {
        if current.moves != previous.moves {
            self.move_cursor = 0;
        }
        self.clamp_cursor(current.move_options().len());
    }

    /// Translate a key press into a command
    pub fn handle_key(&mut self, key: KeyEvent, session: &Session) -> UiCommand {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return UiCommand::Quit;
        }

        // The alert blocks everything else until dismissed
        if session.alert.is_some() {
            return match key.code {
                KeyCode::Esc | KeyCode::Enter => UiCommand::DismissAlert,
                _ => UiCommand::None,
            };
        }

        match key.code {
            KeyCode::Esc => return UiCommand::Quit,
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return UiCommand::None;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return UiCommand::None;
            }
            _ => {}
        }

        match self.focus.role() {
            Some(role) => self.handle_text_key(role, key),
            None => self.handle_list_key(key, session),
        }
    }

    fn handle_text_key(&mut self, role: Role, key: KeyEvent) -> UiCommand {
        let input = self.input_mut(role);
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => input.push(c),
            KeyCode::Backspace => {
                if input.pop().is_none() {
                    return UiCommand::None;
                }
            }
            _ => return UiCommand::None,
        }
        UiCommand::InputChanged(role, input.clone())
    }

    fn handle_list_key(&mut self, key: KeyEvent, session: &Session) -> UiCommand {
        let options = session.move_options();
        match key.code {
            KeyCode::Up => {
                self.move_cursor = self.move_cursor.saturating_sub(1);
                UiCommand::None
            }
            KeyCode::Down => {
                self.move_cursor += 1;
                self.clamp_cursor(options.len());
                UiCommand::None
            }
            KeyCode::Enter => {
                self.clamp_cursor(options.len());
                let choice = if self.move_cursor == 0 {
                    None
                } else {
                    options.get(self.move_cursor).cloned()
                };
                let label = choice.clone().unwrap_or_else(|| "no move".into());
                self.log(format!("Selected {}", label), LogCategory::Calculation);
                UiCommand::SelectMove(choice)
            }
            _ => UiCommand::None,
        }
    }
}
