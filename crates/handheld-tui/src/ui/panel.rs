//! One directory panel.

use itertools::Itertools;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, StatefulWidget, Widget};

use handheld_core::EntryKind;

use crate::app::PanelState;
use crate::theme::Theme;

/// Renders a panel's breadcrumbs and listing.
pub struct PanelView<'a> {
    panel: &'a PanelState,
    theme: &'a Theme,
    active: bool,
}

impl<'a> PanelView<'a> {
    pub fn new(panel: &'a PanelState, theme: &'a Theme, active: bool) -> Self {
        Self {
            panel,
            theme,
            active,
        }
    }
}

impl Widget for PanelView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(" {} ", self.panel.breadcrumbs().iter().join(" › "));
        let block = Block::default()
            .title(title)
            .title_style(if self.active {
                self.theme.title
            } else {
                self.theme.help_desc
            })
            .borders(Borders::ALL)
            .border_style(if self.active {
                self.theme.border_active
            } else {
                self.theme.border
            });

        let items: Vec<ListItem> = self
            .panel
            .entries()
            .iter()
            .map(|entry| {
                let style = match entry.kind {
                    EntryKind::Parent | EntryKind::Directory => self.theme.directory,
                    EntryKind::File => self.theme.file,
                    EntryKind::Drive => self.theme.drive,
                };
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{} ", entry.glyph())),
                    Span::styled(entry.name.clone(), style),
                ]))
            })
            .collect();

        if items.is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            Line::styled("  (empty)", self.theme.help_desc).render(inner, buf);
            return;
        }

        let list = List::new(items).block(block).highlight_style(if self.active {
            self.theme.selected
        } else {
            self.theme.selected_inactive
        });
        let mut state = ListState::default().with_selected(Some(self.panel.selected()));
        StatefulWidget::render(list, area, buf, &mut state);
    }
}
