//! Stateful selection list with a text-filter sub-mode.
//!
//! While the filter input is active every key belongs to it, so the step
//! controller never sees a stage-advance key mid-filter.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style, Stylize};
use ratatui::text::Line;
use ratatui::widgets::{Block, List, ListItem, ListState};
use ratatui::Frame;

use crate::items::SelectableItem;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Filter {
    Inactive,
    /// The user is typing into the filter prompt.
    Editing(String),
    /// A filter has been confirmed and still narrows the list.
    Applied(String),
}

impl Filter {
    fn query(&self) -> Option<&str> {
        match self {
            Filter::Inactive => None,
            Filter::Editing(q) | Filter::Applied(q) => Some(q),
        }
    }
}

pub struct ItemList {
    title: String,
    items: Vec<SelectableItem>,
    /// Indices into `items` surviving the current filter, in order.
    visible: Vec<usize>,
    state: ListState,
    filter: Filter,
}

impl ItemList {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
            visible: Vec::new(),
            state: ListState::default(),
            filter: Filter::Inactive,
        }
    }

    pub fn set_items(&mut self, items: Vec<SelectableItem>) {
        self.items = items;
        self.filter = Filter::Inactive;
        self.refilter();
    }

    /// True while the filter prompt is capturing keystrokes.
    pub fn is_filtering(&self) -> bool {
        matches!(self.filter, Filter::Editing(_))
    }

    /// The item under the cursor, honoring any active filter.
    pub fn selected(&self) -> Option<&SelectableItem> {
        let visible_index = self.state.selected()?;
        let item_index = *self.visible.get(visible_index)?;
        self.items.get(item_index)
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if let Filter::Editing(query) = &mut self.filter {
            match key.code {
                KeyCode::Char(c) => {
                    query.push(c);
                    self.refilter();
                }
                KeyCode::Backspace => {
                    query.pop();
                    self.refilter();
                }
                KeyCode::Enter => {
                    let query = std::mem::take(query);
                    self.filter = match query.is_empty() {
                        true => Filter::Inactive,
                        false => Filter::Applied(query),
                    };
                }
                KeyCode::Esc => {
                    self.filter = Filter::Inactive;
                    self.refilter();
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('/') => {
                self.filter = Filter::Editing(String::new());
                self.refilter();
            }
            KeyCode::Esc => {
                if matches!(self.filter, Filter::Applied(_)) {
                    self.filter = Filter::Inactive;
                    self.refilter();
                }
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            _ => {}
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.visible.is_empty() {
            self.state.select(None);
            return;
        }
        let current = self.state.selected().unwrap_or(0) as isize;
        let last = self.visible.len() as isize - 1;
        self.state.select(Some(current.saturating_add(delta).clamp(0, last) as usize));
    }

    fn refilter(&mut self) {
        let query = self.filter.query().unwrap_or("").to_lowercase();
        self.visible = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| query.is_empty() || item.title.to_lowercase().contains(&query))
            .map(|(i, _)| i)
            .collect();
        self.state
            .select((!self.visible.is_empty()).then_some(0));
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let heading = match &self.filter {
            Filter::Editing(query) => Line::from(format!("{} /{query}_", self.title)),
            Filter::Applied(query) => Line::from(format!("{} /{query}", self.title)),
            Filter::Inactive => Line::from(self.title.clone()),
        }
        .bold();

        let entries: Vec<ListItem> = self
            .visible
            .iter()
            .map(|&i| {
                let item = &self.items[i];
                ListItem::new(vec![
                    Line::from(item.title.clone()),
                    Line::from(item.description.clone()).dim(),
                ])
            })
            .collect();

        let list = List::new(entries)
            .block(Block::new().title(heading))
            .highlight_symbol("> ")
            .highlight_style(Style::new().add_modifier(Modifier::BOLD).cyan());

        frame.render_stateful_widget(list, area, &mut self.state);
    }
}
