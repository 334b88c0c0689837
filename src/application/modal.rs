//! Form state for the "Create Application" modal.
//!
//! The modal owns the candidate name and the question draft. Submission is
//! split in two halves so the blocking service call can run elsewhere:
//! [`ApplicationModal::begin_submit`] validates and assembles the request,
//! [`ApplicationModal::complete_submit`] applies whatever the service returned.

use crate::domain::{
    build_request, ApplicationName, CreateApplicationRequest, DomainError, QuestionDraft,
    SelectionContext, ServiceError, INVALID_NAME_MESSAGE, MAX_QUESTIONS, MAX_QUESTION_LENGTH,
};
use thiserror::Error;

pub const MAX_QUESTIONS_TOOLTIP: &str = "Maximum 4 questions are allowed";

/// Element of the modal that currently receives keyboard input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModalFocus {
    #[default]
    Name,
    Question(usize),
    AddQuestion,
    Cancel,
    Create,
}

/// Identifies one submission so late results can be matched to their modal session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTicket(u64);

/// A validated request waiting to be sent to the creation service.
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    pub ticket: SubmissionTicket,
    pub request: CreateApplicationRequest,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Application name is required")]
    MissingName,
    #[error("Application name is invalid")]
    InvalidName,
    #[error("a submission is already in progress")]
    AlreadySubmitting,
    #[error("could not assemble request: {0}")]
    Assembly(#[from] DomainError),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl SubmitError {
    /// Title of the notification shown for this error.
    pub fn title(&self) -> &'static str {
        match self {
            SubmitError::MissingName => "Application name is required",
            SubmitError::InvalidName => "Application name is invalid",
            SubmitError::AlreadySubmitting => "Submission already in progress",
            SubmitError::Assembly(_) | SubmitError::Service(_) => "Failed to create application",
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            SubmitError::InvalidName => Some(INVALID_NAME_MESSAGE),
            SubmitError::Service(error) => error.detail(),
            _ => None,
        }
    }
}

/// What became of a submission once the service answered.
#[derive(Debug)]
pub enum SubmitOutcome {
    Created,
    Failed(SubmitError),
    /// The modal was closed after the request went out; its state was left alone.
    Stale(Result<(), ServiceError>),
}

#[derive(Debug, Clone, Copy)]
pub enum TextEdit {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
}

impl TextEdit {
    /// Applies the edit to `text`. `cursor` counts characters, not bytes.
    fn apply(self, text: &mut String, cursor: &mut usize, limit: Option<usize>) {
        let len = text.chars().count();
        *cursor = (*cursor).min(len);
        match self {
            TextEdit::Insert(c) => {
                if limit.is_some_and(|max| len >= max) {
                    return;
                }
                let offset = byte_offset(text, *cursor);
                text.insert(offset, c);
                *cursor += 1;
            }
            TextEdit::Backspace => {
                if *cursor > 0 {
                    *cursor -= 1;
                    let offset = byte_offset(text, *cursor);
                    text.remove(offset);
                }
            }
            TextEdit::Delete => {
                if *cursor < len {
                    let offset = byte_offset(text, *cursor);
                    text.remove(offset);
                }
            }
            TextEdit::Left => *cursor = cursor.saturating_sub(1),
            TextEdit::Right => *cursor = (*cursor + 1).min(len),
            TextEdit::Home => *cursor = 0,
            TextEdit::End => *cursor = len,
        }
    }
}

fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}

/// State of the modal. One instance lives for the whole app; every close
/// resets it to the empty baseline.
///
/// # Examples
///
/// ```
/// use ragapp::application::ApplicationModal;
///
/// let mut modal = ApplicationModal::default();
/// modal.open();
/// modal.set_name("query-bot");
/// assert!(modal.add_question());
/// modal.update_question(0, "What is in the Q3 report?");
/// assert_eq!(modal.questions.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ApplicationModal {
    open: bool,
    /// Candidate name, exactly as typed
    pub name: ApplicationName,
    /// Optional seed questions in display order
    pub questions: QuestionDraft,
    /// Element receiving keyboard input
    pub focus: ModalFocus,
    /// Cursor position, in characters, within the focused text field
    pub cursor_position: usize,
    /// Request still running in the background, whether or not its form was closed
    in_flight: Option<SubmissionTicket>,
    /// Ticket whose result may still update this form session
    live: Option<SubmissionTicket>,
    last_ticket: u64,
}

impl ApplicationModal {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// True while a submission is in flight; the Create control shows a loading state.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn open(&mut self) {
        self.open = true;
        self.focus = ModalFocus::Name;
        self.cursor_position = self.name.as_str().chars().count();
    }

    /// Cancel/close path: clears the name and every question, then closes.
    ///
    /// A submission still in flight keeps blocking Create after a reopen, but
    /// its result no longer belongs to this session and comes back stale.
    pub fn close(&mut self) {
        self.name.clear();
        self.questions.clear();
        self.open = false;
        self.live = None;
        self.focus = ModalFocus::Name;
        self.cursor_position = 0;
    }

    pub fn set_name(&mut self, raw: impl Into<String>) {
        self.name.set(raw);
        if self.focus == ModalFocus::Name {
            self.cursor_position = self.name.as_str().chars().count();
        }
    }

    /// Appends an empty question and focuses it. Inert at the cap.
    pub fn add_question(&mut self) -> bool {
        if !self.questions.add() {
            return false;
        }
        self.focus = ModalFocus::Question(self.questions.len() - 1);
        self.cursor_position = 0;
        true
    }

    pub fn update_question(&mut self, index: usize, text: impl Into<String>) {
        self.questions.update(index, text);
        if self.focus == ModalFocus::Question(index) {
            self.cursor_position = self.focused_text_len();
        }
    }

    pub fn remove_question(&mut self, index: usize) {
        if self.questions.remove(index).is_none() {
            return;
        }
        if let ModalFocus::Question(focused) = self.focus {
            if focused == index {
                self.focus = if index < self.questions.len() {
                    ModalFocus::Question(index)
                } else if index > 0 {
                    ModalFocus::Question(index - 1)
                } else {
                    ModalFocus::AddQuestion
                };
                self.cursor_position = self.focused_text_len();
            } else if focused > index {
                self.focus = ModalFocus::Question(focused - 1);
            }
        }
    }

    pub fn remove_focused_question(&mut self) {
        if let ModalFocus::Question(index) = self.focus {
            self.remove_question(index);
        }
    }

    /// Explanation shown next to the Add Question control when it is disabled.
    pub fn add_question_tooltip(&self) -> Option<&'static str> {
        if self.questions.can_add() {
            None
        } else {
            Some(MAX_QUESTIONS_TOOLTIP)
        }
    }

    fn focus_ring(&self) -> Vec<ModalFocus> {
        let mut ring = Vec::with_capacity(MAX_QUESTIONS + 4);
        ring.push(ModalFocus::Name);
        ring.extend((0..self.questions.len()).map(ModalFocus::Question));
        ring.extend([ModalFocus::AddQuestion, ModalFocus::Cancel, ModalFocus::Create]);
        ring
    }

    fn move_focus(&mut self, forward: bool) {
        let ring = self.focus_ring();
        let current = ring.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (current + 1) % ring.len()
        } else {
            (current + ring.len() - 1) % ring.len()
        };
        self.focus = ring[next];
        self.cursor_position = self.focused_text_len();
    }

    pub fn focus_next(&mut self) {
        self.move_focus(true);
    }

    pub fn focus_previous(&mut self) {
        self.move_focus(false);
    }

    fn focused_text_len(&self) -> usize {
        match self.focus {
            ModalFocus::Name => self.name.as_str().chars().count(),
            ModalFocus::Question(index) => self.questions.get(index).map_or(0, |q| q.chars().count()),
            _ => 0,
        }
    }

    /// Applies a keystroke to the focused text field. Questions stop
    /// accepting characters at [`MAX_QUESTION_LENGTH`].
    pub fn edit(&mut self, edit: TextEdit) {
        let cursor = &mut self.cursor_position;
        let (text, limit) = match self.focus {
            ModalFocus::Name => (self.name.as_mut_string(), None),
            ModalFocus::Question(index) => match self.questions.get_mut(index) {
                Some(text) => (text, Some(MAX_QUESTION_LENGTH)),
                None => return,
            },
            _ => return,
        };
        edit.apply(text, cursor, limit);
    }

    /// Validates the form and assembles the request against `context`.
    ///
    /// On success the modal is marked as submitting until
    /// [`complete_submit`](Self::complete_submit) is called with the returned ticket.
    ///
    /// # Errors
    ///
    /// Fails without side effects when a submission is already pending, the
    /// name is empty or does not match the name pattern, or the request
    /// cannot be assembled from `context`.
    pub fn begin_submit(&mut self, context: &SelectionContext) -> Result<PendingSubmission, SubmitError> {
        if self.in_flight.is_some() {
            return Err(SubmitError::AlreadySubmitting);
        }
        if self.name.is_empty() {
            return Err(SubmitError::MissingName);
        }
        if !self.name.is_valid() {
            return Err(SubmitError::InvalidName);
        }

        let request = build_request(&self.name, &self.questions, context)?;
        self.last_ticket += 1;
        let ticket = SubmissionTicket(self.last_ticket);
        self.in_flight = Some(ticket);
        self.live = Some(ticket);
        Ok(PendingSubmission { ticket, request })
    }

    /// Applies the service result for `ticket`.
    ///
    /// Success clears the name and closes the modal but keeps the question
    /// draft; only the cancel/close path clears questions. Failure leaves
    /// the form untouched so the user can correct and resubmit.
    pub fn complete_submit(&mut self, ticket: SubmissionTicket, result: Result<(), ServiceError>) -> SubmitOutcome {
        if self.in_flight == Some(ticket) {
            self.in_flight = None;
        }
        if self.live != Some(ticket) {
            return SubmitOutcome::Stale(result);
        }
        self.live = None;

        match result {
            Ok(()) => {
                self.name.clear();
                self.open = false;
                self.focus = ModalFocus::Name;
                self.cursor_position = 0;
                SubmitOutcome::Created
            }
            Err(error) => SubmitOutcome::Failed(SubmitError::Service(error)),
        }
    }
}
