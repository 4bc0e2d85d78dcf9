//! Overlay widgets.

use std::fmt::Display;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap};

use crate::app::{Dialog, DialogKind, Menu};
use crate::theme::Theme;
use crate::ui::centered_rect;

/// A menu drawn as a bordered list with a cursor.
pub struct MenuModal<'a, T> {
    theme: &'a Theme,
    title: String,
    menu: &'a Menu<T>,
    /// Items that are listed but do nothing.
    is_inert: fn(T) -> bool,
}

impl<'a, T: Copy + Display> MenuModal<'a, T> {
    pub fn new(theme: &'a Theme, title: impl Into<String>, menu: &'a Menu<T>) -> Self {
        Self {
            theme,
            title: title.into(),
            menu,
            is_inert: |_| false,
        }
    }

    pub fn inert_when(mut self, is_inert: fn(T) -> bool) -> Self {
        self.is_inert = is_inert;
        self
    }
}

impl<T: Copy + Display> Widget for MenuModal<'_, T> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = self
            .menu
            .items()
            .iter()
            .map(|item| item.to_string().chars().count())
            .chain([self.title.chars().count()])
            .max()
            .unwrap_or(0) as u16
            + 8;
        let height = self.menu.items().len() as u16 + 2;
        let popup_area = centered_rect(area, width, height);

        Clear.render(popup_area, buf);

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(self.theme.title)
            .borders(Borders::ALL)
            .border_style(self.theme.border_active)
            .style(Style::default().bg(self.theme.background));

        let lines: Vec<Line> = self
            .menu
            .items()
            .iter()
            .enumerate()
            .map(|(index, &item)| {
                let marker = if index == self.menu.cursor() { "▶ " } else { "  " };
                let style = if index == self.menu.cursor() {
                    self.theme.selected
                } else if (self.is_inert)(item) {
                    Style::default().fg(self.theme.muted)
                } else {
                    Style::default().fg(self.theme.foreground)
                };
                Line::from(vec![Span::raw(marker), Span::styled(item.to_string(), style)])
            })
            .collect();

        Paragraph::new(lines).block(block).render(popup_area, buf);
    }
}

/// A dialog drawn as a bordered box with its answer hints.
pub struct DialogModal<'a> {
    theme: &'a Theme,
    dialog: &'a Dialog,
}

impl<'a> DialogModal<'a> {
    pub fn new(theme: &'a Theme, dialog: &'a Dialog) -> Self {
        Self { theme, dialog }
    }
}

impl Widget for DialogModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (title, accent, hints) = match self.dialog.kind() {
            DialogKind::Confirmation(_) => (" Confirm ", self.theme.warning, "[A] OK   [B] Cancel"),
            DialogKind::Info(_) => (" Info ", self.theme.info, "[A/B] Dismiss"),
        };

        let width = 56;
        let text_width = usize::from(width.min(area.width.saturating_sub(4)).saturating_sub(4)).max(1);
        let text_lines = self.dialog.message().chars().count().div_ceil(text_width) as u16;
        let popup_area = centered_rect(area, width, text_lines + 5);

        Clear.render(popup_area, buf);

        let block = Block::default()
            .title(title)
            .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .style(Style::default().bg(self.theme.background));

        let lines = vec![
            Line::styled(
                self.dialog.message().to_string(),
                Style::default().fg(self.theme.foreground),
            ),
            Line::raw(""),
            Line::styled(hints, self.theme.help_key),
        ];

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .centered()
            .render(popup_area, buf);
    }
}
