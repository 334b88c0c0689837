use crate::application::{App, AppMode, ModalFocus, PendingSubmission, TextEdit};
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    /// Routes a key press. Returns a submission when the key fired Create.
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) -> Option<PendingSubmission> {
        if app.modal.is_open() {
            return Self::handle_modal(app, key, modifiers);
        }
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
        None
    }

    /// Every key also dismisses the oldest notification.
    fn handle_normal_mode(app: &mut App, key: KeyCode) {
        app.toasts.dismiss_oldest();
        match key {
            KeyCode::Char('c') | KeyCode::Char('n') => {
                app.open_create_application();
            }
            KeyCode::Char('m') => {
                app.playground.cycle_model();
            }
            KeyCode::Char('r') => {
                app.playground.cycle_retriever();
            }
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.mode = AppMode::Help;
                app.help_scroll = 0;
            }
            KeyCode::Char('q') => {
                // Will be handled by main loop
            }
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.mode = AppMode::Normal;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }

    fn handle_modal(app: &mut App, key: KeyCode, modifiers: KeyModifiers) -> Option<PendingSubmission> {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match key {
                KeyCode::Char('s') => return app.submit_application(),
                KeyCode::Char('n') => {
                    app.modal.add_question();
                }
                KeyCode::Char('d') => app.modal.remove_focused_question(),
                _ => {}
            }
            return None;
        }

        match key {
            KeyCode::Esc => app.close_create_application(),
            KeyCode::Tab | KeyCode::Down => app.modal.focus_next(),
            KeyCode::BackTab | KeyCode::Up => app.modal.focus_previous(),
            KeyCode::Enter => match app.modal.focus {
                ModalFocus::Name | ModalFocus::Question(_) => app.modal.focus_next(),
                ModalFocus::AddQuestion => {
                    app.modal.add_question();
                }
                ModalFocus::Cancel => app.close_create_application(),
                ModalFocus::Create => return app.submit_application(),
            },
            KeyCode::Backspace => app.modal.edit(TextEdit::Backspace),
            KeyCode::Delete => app.modal.edit(TextEdit::Delete),
            KeyCode::Left => app.modal.edit(TextEdit::Left),
            KeyCode::Right => app.modal.edit(TextEdit::Right),
            KeyCode::Home => app.modal.edit(TextEdit::Home),
            KeyCode::End => app.modal.edit(TextEdit::End),
            KeyCode::Char(c) => app.modal.edit(TextEdit::Insert(c)),
            _ => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::Playground;
    use crate::application::ToastQueue;
    use crate::domain::{EnabledModel, NotificationSink, Severity};

    fn create_test_app() -> App {
        let playground = Playground {
            collection: "docs".to_string(),
            models: vec![EnabledModel { name: "gpt".to_string(), provider: "openai".to_string() }],
            selected_model: "gpt".to_string(),
            model_config_text: "{}".to_string(),
            retriever_config_text: "{}".to_string(),
            ..Playground::default()
        };
        App::new(playground, ToastQueue::default())
    }

    fn press(app: &mut App, key: KeyCode) -> Option<PendingSubmission> {
        InputHandler::handle_key_event(app, key, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_open_modal_key_binding() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('c'));
        assert!(app.modal.is_open());
        assert!(!app.accepts_quit());
    }

    #[test]
    fn test_q_is_typed_inside_modal() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('c'));
        type_text(&mut app, "q-bot");
        assert_eq!(app.modal.name.as_str(), "q-bot");
    }

    #[test]
    fn test_escape_cancels_and_clears() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('c'));
        type_text(&mut app, "bot");
        InputHandler::handle_key_event(&mut app, KeyCode::Char('n'), KeyModifiers::CONTROL);
        type_text(&mut app, "why?");

        press(&mut app, KeyCode::Esc);

        assert!(!app.modal.is_open());
        assert!(app.modal.name.is_empty());
        assert!(app.modal.questions.is_empty());
    }

    #[test]
    fn test_add_question_via_button_is_capped() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('c'));
        for _ in 0..6 {
            app.modal.focus = ModalFocus::AddQuestion;
            press(&mut app, KeyCode::Enter);
        }
        assert_eq!(app.modal.questions.len(), 4);
    }

    #[test]
    fn test_typing_into_question() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('c'));
        InputHandler::handle_key_event(&mut app, KeyCode::Char('n'), KeyModifiers::CONTROL);
        type_text(&mut app, "What is RAG?");
        assert_eq!(app.modal.questions.get(0), Some("What is RAG?"));

        InputHandler::handle_key_event(&mut app, KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert!(app.modal.questions.is_empty());
    }

    #[test]
    fn test_enter_on_create_submits() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('c'));
        type_text(&mut app, "bot");
        app.modal.focus = ModalFocus::Create;

        let pending = press(&mut app, KeyCode::Enter).unwrap();
        assert_eq!(pending.request.name, "bot-rag-app");
        assert!(app.modal.is_submitting());
    }

    #[test]
    fn test_ctrl_s_with_empty_name_notifies() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('c'));

        let pending = InputHandler::handle_key_event(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL);

        assert!(pending.is_none());
        assert_eq!(app.toasts.latest().unwrap().title, "Application name is required");
    }

    #[test]
    fn test_cycle_selections() {
        let mut app = create_test_app();
        app.playground.models.push(EnabledModel { name: "llama".to_string(), provider: "ollama".to_string() });
        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.playground.selected_model, "llama");
    }

    #[test]
    fn test_any_key_dismisses_oldest_toast() {
        let mut app = create_test_app();
        app.toasts.notify(Severity::Error, "first", None);
        app.toasts.notify(Severity::Success, "second", None);

        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.toasts.len(), 1);
        assert_eq!(app.toasts.latest().unwrap().title, "second");

        press(&mut app, KeyCode::Char('x'));
        assert!(app.toasts.is_empty());
    }

    #[test]
    fn test_modal_keys_keep_toasts() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('c'));
        app.toasts.notify(Severity::Info, "note", None);
        type_text(&mut app, "bot");
        assert_eq!(app.toasts.len(), 1);
    }

    #[test]
    fn test_help_toggle() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('?'));
        assert!(matches!(app.mode, AppMode::Help));
        press(&mut app, KeyCode::Down);
        assert_eq!(app.help_scroll, 1);
        press(&mut app, KeyCode::Esc);
        assert!(matches!(app.mode, AppMode::Normal));
    }
}
