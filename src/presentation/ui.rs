use crate::application::{App, AppMode, ApplicationModal, ModalFocus, Playground, Toast};
use crate::domain::{NameHint, Severity};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const NAME_PLACEHOLDER: &str = "E.g. query-bot";
const TOAST_WIDTH: u16 = 48;

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, chunks[0]);
    render_playground(f, &app.playground, chunks[1]);
    render_status_bar(f, app, chunks[2]);

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
    if app.modal.is_open() {
        render_modal(f, &app.modal);
    }
    render_toasts(f, app.toasts.iter());
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("ragapp - RAG Playground").style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn labeled(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<18}"), Style::default().fg(Color::Yellow)),
        Span::raw(value),
    ])
}

fn render_playground(f: &mut Frame, playground: &Playground, area: Rect) {
    let model = playground
        .models
        .iter()
        .find(|model| model.name == playground.selected_model)
        .map(|model| format!("{} ({})", model.name, model.provider))
        .unwrap_or_else(|| format!("{} (not enabled)", playground.selected_model));
    let retriever = playground
        .retriever()
        .map(|retriever| {
            if retriever.summary.is_empty() {
                retriever.name.clone()
            } else {
                format!("{} - {}", retriever.name, retriever.summary)
            }
        })
        .unwrap_or_else(|| "none".to_string());

    let mut lines = vec![
        labeled("Collection", playground.collection.clone()),
        labeled("Model [m]", model),
        labeled("Retriever [r]", retriever),
        labeled("Query controller", playground.query_controller.clone()),
        labeled("Model config", playground.model_config_text.clone()),
        labeled("Retriever config", playground.retriever_config_text.clone()),
        Line::from(""),
        Line::styled("Prompt template", Style::default().fg(Color::Yellow)),
    ];
    lines.extend(playground.prompt_template.lines().map(|line| Line::from(line.to_string())));

    let summary = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Playground"))
        .wrap(Wrap { trim: false });
    f.render_widget(summary, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let (text, style) = if app.modal.is_open() {
        (
            "Tab/↑↓: move | Enter: activate | Ctrl+N: add question | Ctrl+D: remove question | Ctrl+S: create | Esc: cancel",
            Style::default().fg(Color::Green),
        )
    } else {
        match app.mode {
            AppMode::Normal => (
                "c: create application | m: next model | r: next retriever | x: dismiss | F1/?: help | q: quit",
                Style::default(),
            ),
            AppMode::Help => (
                "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help",
                Style::default().fg(Color::Cyan),
            ),
        }
    };

    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(style);
    f.render_widget(status, area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn focus_marker(focused: bool) -> Span<'static> {
    if focused {
        Span::styled("> ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    } else {
        Span::raw("  ")
    }
}

fn text_field(text: &str, placeholder: &str, focused: bool) -> Line<'static> {
    let content = if text.is_empty() {
        Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(text.to_string())
    };
    Line::from(vec![focus_marker(focused), content])
}

fn button(label: &str, focused: bool, enabled: bool) -> Span<'static> {
    let style = match (enabled, focused) {
        (false, _) => Style::default().fg(Color::DarkGray),
        (true, true) => Style::default().bg(Color::Blue).fg(Color::White),
        (true, false) => Style::default(),
    };
    Span::styled(format!("[ {label} ]"), style)
}

/// Greedy word wrap at `width` columns.
fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn render_modal(f: &mut Frame, modal: &ApplicationModal) {
    let area = centered_rect(72, 22, f.area());
    f.render_widget(Clear, area);

    let mut lines = vec![Line::from("Enter the name of the application")];
    let name_row = lines.len();
    lines.push(text_field(modal.name.as_str(), NAME_PLACEHOLDER, modal.focus == ModalFocus::Name));
    match modal.name.hint() {
        NameHint::None => lines.push(Line::from("")),
        NameHint::Invalid(message) => {
            let width = area.width.saturating_sub(4) as usize;
            for chunk in wrap_words(message, width) {
                lines.push(Line::styled(format!("  {chunk}"), Style::default().fg(Color::Red)));
            }
        }
        NameHint::Preview(qualified) => lines.push(Line::from(vec![
            Span::raw("  The application name will be generated as "),
            Span::styled(format!("\"{qualified}\""), Style::default().add_modifier(Modifier::BOLD)),
        ])),
    }

    lines.push(Line::from(""));
    lines.push(Line::from("Questions (Optional)"));
    let first_question_row = lines.len();
    for (index, question) in modal.questions.as_slice().iter().enumerate() {
        let mut line = text_field(
            question,
            &format!("Question {}", index + 1),
            modal.focus == ModalFocus::Question(index),
        );
        line.spans.push(Span::styled("  [del: Ctrl+D]", Style::default().fg(Color::DarkGray)));
        lines.push(line);
    }

    let add_focused = modal.focus == ModalFocus::AddQuestion;
    lines.push(Line::from(vec![
        focus_marker(add_focused),
        button("Add Question", add_focused, modal.questions.can_add()),
    ]));
    match modal.add_question_tooltip() {
        Some(tooltip) if add_focused => {
            lines.push(Line::styled(format!("  {tooltip}"), Style::default().fg(Color::Yellow)))
        }
        _ => lines.push(Line::from("")),
    }

    let create_label = if modal.is_submitting() { "Creating..." } else { "Create" };
    lines.push(Line::from(vec![
        Span::raw("  "),
        button("Cancel", modal.focus == ModalFocus::Cancel, true),
        Span::raw("  "),
        button(create_label, modal.focus == ModalFocus::Create, !modal.is_submitting()),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Create Application")
        .style(Style::default().fg(Color::White));
    let inner = block.inner(area);
    f.render_widget(Paragraph::new(lines).block(block), area);

    let cursor_row = match modal.focus {
        ModalFocus::Name => Some(name_row),
        ModalFocus::Question(index) => Some(first_question_row + index),
        _ => None,
    };
    let cursor = cursor_row.and_then(|row| {
        let x = u16::try_from(modal.cursor_position).ok()?;
        let y = u16::try_from(row).ok()?;
        Some((inner.x.saturating_add(2).saturating_add(x), inner.y.saturating_add(y)))
    });
    if let Some((x, y)) = cursor {
        if x < inner.right() && y < inner.bottom() {
            f.set_cursor_position((x, y));
        }
    }
}

fn render_toasts<'a>(f: &mut Frame, toasts: impl Iterator<Item = &'a Toast>) {
    let area = f.area();
    let width = TOAST_WIDTH.min(area.width);
    let mut bottom = area.bottom().saturating_sub(3);

    let toasts: Vec<&Toast> = toasts.collect();
    for toast in toasts.into_iter().rev() {
        let height = if toast.detail.is_some() { 4 } else { 3 };
        if bottom < area.y + height {
            break;
        }
        let rect = Rect {
            x: area.right().saturating_sub(width),
            y: bottom - height,
            width,
            height,
        };
        bottom -= height;

        let (label, color) = match toast.severity {
            Severity::Success => ("success", Color::Green),
            Severity::Error => ("error", Color::Red),
            Severity::Info => ("info", Color::Cyan),
        };
        let mut lines = vec![Line::from(toast.title.clone())];
        if let Some(detail) = &toast.detail {
            lines.push(Line::styled(detail.clone(), Style::default().fg(Color::Gray)));
        }

        f.render_widget(Clear, rect);
        let widget = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(label)
                    .border_style(Style::default().fg(color)),
            )
            .wrap(Wrap { trim: true });
        f.render_widget(widget, rect);
    }
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("ragapp Help (Line {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

const HELP_TEXT: &str = r#"RAGAPP PLAYGROUND

=== PLAYGROUND ===
c / n           Open "Create Application"
m               Select the next enabled model
r               Select the next retriever (cycles back to none)
any key         Also dismisses the oldest notification
F1 or ?         Show this help
q               Quit

=== CREATE APPLICATION ===
Name            Must start with a lowercase letter; then lowercase
                letters, digits and hyphens only. The application is
                created as "<name>-rag-app".
Questions       Up to 4 optional example questions, 100 characters each.
                Empty and duplicate questions are sent as typed.

Tab / ↓         Next field or button
Shift+Tab / ↑   Previous field or button
Enter           Activate the focused button (or move to the next field)
Ctrl+N          Add a question
Ctrl+D          Remove the focused question
Ctrl+S          Create from anywhere in the form
Esc             Cancel; clears the name and all questions

The selections shown on the playground (collection, model, retriever,
configurations, prompt template, query controller) are read at the
moment you press Create.

A successful create clears the name and closes the form; questions stay
until the form is cancelled. A failed create keeps everything so you can
fix it and try again.

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/?/q      Close this help window"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NotificationSink;
    use ratatui::{backend::TestBackend, Terminal};

    fn render_to_string(app: &App) -> String {
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render_ui(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_modal_shows_preview_for_valid_name() {
        let mut app = App::default();
        app.open_create_application();
        app.modal.set_name("query-bot");

        let screen = render_to_string(&app);
        assert!(screen.contains("Create Application"));
        assert!(screen.contains("\"query-bot-rag-app\""));
    }

    #[test]
    fn test_very_long_pasted_name_renders() {
        let mut app = App::default();
        app.open_create_application();
        app.modal.set_name("a".repeat(70_000));
        assert!(app.modal.cursor_position > usize::from(u16::MAX));

        let screen = render_to_string(&app);
        assert!(screen.contains("Create Application"));
    }

    #[test]
    fn test_modal_shows_error_for_invalid_name() {
        let mut app = App::default();
        app.open_create_application();
        app.modal.set_name("Query");

        let screen = render_to_string(&app);
        assert!(screen.contains("Application name should start with a lowercase letter"));
        assert!(!screen.contains("-rag-app"));
    }

    #[test]
    fn test_empty_name_shows_placeholder_only() {
        let mut app = App::default();
        app.open_create_application();

        let screen = render_to_string(&app);
        assert!(screen.contains(NAME_PLACEHOLDER));
        assert!(!screen.contains("will be generated as"));
        assert!(!screen.contains("should start with"));
    }

    #[test]
    fn test_tooltip_at_question_cap() {
        let mut app = App::default();
        app.open_create_application();
        for _ in 0..4 {
            app.modal.add_question();
        }
        app.modal.focus = ModalFocus::AddQuestion;

        let screen = render_to_string(&app);
        assert!(screen.contains("Question 4"));
        assert!(screen.contains("Maximum 4 questions are allowed"));
    }

    #[test]
    fn test_wrap_words() {
        assert_eq!(wrap_words("one two three four", 9), vec!["one two", "three", "four"]);
        assert!(wrap_words("", 10).is_empty());
    }

    #[test]
    fn test_toast_rendered() {
        let mut app = App::default();
        app.toasts.notify(Severity::Error, "Failed to create application", Some("boom"));

        let screen = render_to_string(&app);
        assert!(screen.contains("Failed to create application"));
        assert!(screen.contains("boom"));
    }
}
