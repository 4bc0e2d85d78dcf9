//! Application rendering.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use handheld_core::PanelId;
use handheld_ops::FileSystemProvider;

use crate::event::{hints, quit_chord};
use crate::theme::Theme;
use crate::ui::modals::{DialogModal, MenuModal};
use crate::ui::{PanelView, format_size};

use super::commander::Commander;
use super::menu::PopupAction;

/// Main render function for the application.
pub fn render_app<P: FileSystemProvider>(
    commander: &Commander<P>,
    theme: &Theme,
    area: Rect,
    buf: &mut Buffer,
) {
    buf.set_style(area, Style::default().bg(theme.background).fg(theme.foreground));

    let [header, content, status, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(commander, theme, header, buf);

    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(content);
    for (panel, panel_area) in [(PanelId::Left, left), (PanelId::Right, right)] {
        let active = commander.active_panel() == panel;
        PanelView::new(commander.panel(panel), theme, active).render(panel_area, buf);
    }

    render_status(commander, theme, status, buf);
    render_footer(commander, theme, footer, buf);

    // Lowest priority first so the dialog ends up on top.
    let modals = commander.modals();
    if let Some(menu) = modals.context_menu() {
        MenuModal::new(theme, "Menu", &menu.menu).render(content, buf);
    }
    if let Some(popup) = modals.popup_menu() {
        let title = commander
            .panel(popup.target_panel)
            .entry(popup.target_index)
            .map_or_else(|| "Actions".to_string(), |entry| entry.name.clone());
        MenuModal::new(theme, title, &popup.menu)
            .inert_when(PopupAction::is_reserved)
            .render(content, buf);
    }
    if let Some(dialog) = modals.dialog() {
        DialogModal::new(theme, dialog).render(content, buf);
    }
}

fn render_header<P: FileSystemProvider>(
    commander: &Commander<P>,
    theme: &Theme,
    area: Rect,
    buf: &mut Buffer,
) {
    let mut spans = vec![Span::styled(" handheld-commander ", theme.title)];

    if let (Some(op), Some(progress)) = (commander.in_flight(), commander.progress()) {
        let files = progress.files_completed;
        spans.push(Span::styled(
            format!(
                " {} {} · {} file{} · {}",
                op.kind,
                op.source.name,
                files,
                if files == 1 { "" } else { "s" },
                format_size(progress.bytes_processed)
            ),
            theme.progress_bar,
        ));
    }

    Paragraph::new(Line::from(spans))
        .style(theme.header)
        .render(area, buf);
}

fn render_status<P: FileSystemProvider>(
    commander: &Commander<P>,
    theme: &Theme,
    area: Rect,
    buf: &mut Buffer,
) {
    let Some(status) = commander.status() else {
        return;
    };
    Line::styled(
        format!(" {}", status.text),
        Style::default().fg(theme.status_color(status.kind)),
    )
    .render(area, buf);
}

fn render_footer<P: FileSystemProvider>(
    commander: &Commander<P>,
    theme: &Theme,
    area: Rect,
    buf: &mut Buffer,
) {
    let confirmation = commander
        .modals()
        .dialog()
        .is_some_and(|dialog| dialog.is_confirmation());

    let mut spans = Vec::new();
    for (key, desc) in hints(commander.active_layer(), confirmation) {
        spans.push(Span::styled(format!(" {key}"), theme.help_key));
        spans.push(Span::styled(format!(" {desc} "), theme.help_desc));
    }
    spans.push(Span::styled(format!(" {}", quit_chord()), theme.help_key));
    spans.push(Span::styled(" Exit", theme.help_desc));

    Paragraph::new(Line::from(spans))
        .style(theme.footer)
        .render(area, buf);
}
