//! Application state for the playground terminal UI.
//!
//! This module holds the top-level state, the mode switch, and the
//! submission workflow that ties the creation modal to its collaborators.

use super::modal::{ApplicationModal, PendingSubmission, SubmissionTicket, SubmitError, SubmitOutcome};
use super::notifications::ToastQueue;
use super::playground::Playground;
use crate::domain::{ApplicationService, NotificationSink, SelectionProvider, ServiceError, Severity};

pub const SUCCESS_TITLE: &str = "Application created successfully";

/// Represents the current mode of the main screen.
///
/// The creation modal is an overlay; while it is open it takes all input
/// regardless of the mode underneath.
#[derive(Debug)]
pub enum AppMode {
    /// Playground summary - shortcuts cycle selections and open the modal
    Normal,
    /// Help screen is displayed
    Help,
}

/// Main application state.
///
/// # Examples
///
/// ```
/// use ragapp::application::App;
///
/// let mut app = App::default();
/// app.open_create_application();
/// assert!(app.modal.is_open());
/// app.close_create_application();
/// assert!(!app.modal.is_open());
/// ```
#[derive(Debug)]
pub struct App {
    /// Current mode of the main screen
    pub mode: AppMode,
    /// Live playground selections
    pub playground: Playground,
    /// "Create Application" modal
    pub modal: ApplicationModal,
    /// Notifications waiting to be shown
    pub toasts: ToastQueue,
    /// Scroll position in help text
    pub help_scroll: usize,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Playground::default(), ToastQueue::default())
    }
}

impl App {
    pub fn new(playground: Playground, toasts: ToastQueue) -> Self {
        Self {
            mode: AppMode::Normal,
            playground,
            modal: ApplicationModal::default(),
            toasts,
            help_scroll: 0,
        }
    }

    /// True when a plain `q` should quit rather than be typed somewhere.
    pub fn accepts_quit(&self) -> bool {
        matches!(self.mode, AppMode::Normal) && !self.modal.is_open()
    }

    pub fn open_create_application(&mut self) {
        self.mode = AppMode::Normal;
        self.modal.open();
    }

    /// Cancel/close path of the modal.
    pub fn close_create_application(&mut self) {
        if self.modal.is_submitting() {
            tracing::debug!("closing modal with a submission in flight");
        }
        self.modal.close();
    }

    /// Validates the form against a fresh playground snapshot.
    ///
    /// Returns the request to send, or `None` after notifying the user of
    /// why nothing was sent.
    pub fn submit_application(&mut self) -> Option<PendingSubmission> {
        let context = self.playground.snapshot();
        match self.modal.begin_submit(&context) {
            Ok(pending) => {
                tracing::info!(
                    name = %pending.request.name,
                    questions = pending.request.questions.len(),
                    "submitting application"
                );
                Some(pending)
            }
            Err(SubmitError::AlreadySubmitting) => {
                tracing::debug!("submit ignored; request already in flight");
                None
            }
            Err(error) => {
                tracing::warn!(%error, "application submit rejected");
                self.report_failure(&error);
                None
            }
        }
    }

    /// Applies the creation service's answer for `ticket`.
    pub fn apply_submission_result(&mut self, ticket: SubmissionTicket, result: Result<(), ServiceError>) {
        match self.modal.complete_submit(ticket, result) {
            SubmitOutcome::Created => {
                tracing::info!("application created");
                self.toasts.notify(Severity::Success, SUCCESS_TITLE, None);
            }
            SubmitOutcome::Failed(error) => {
                tracing::error!(%error, "application creation failed");
                self.report_failure(&error);
            }
            SubmitOutcome::Stale(result) => {
                tracing::debug!(ok = result.is_ok(), "submission finished after modal closed");
                match result {
                    Ok(()) => self.toasts.notify(Severity::Success, SUCCESS_TITLE, None),
                    Err(error) => self.report_failure(&SubmitError::Service(error)),
                }
            }
        }
    }

    /// Runs a whole submission on the calling thread.
    pub fn submit_and_wait(&mut self, service: &dyn ApplicationService) {
        if let Some(pending) = self.submit_application() {
            let result = service.create(&pending.request);
            self.apply_submission_result(pending.ticket, result);
        }
    }

    fn report_failure(&mut self, error: &SubmitError) {
        self.toasts.notify(Severity::Error, error.title(), error.detail());
    }

    pub fn on_tick(&mut self) {
        self.toasts.tick();
    }
}
