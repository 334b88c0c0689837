//! Seams to the collaborators the creation workflow consumes.

use super::errors::ServiceError;
use super::models::{CreateApplicationRequest, SelectionContext};

/// Live source of playground selections, read when Submit fires.
pub trait SelectionProvider {
    fn snapshot(&self) -> SelectionContext;
}

impl SelectionProvider for SelectionContext {
    fn snapshot(&self) -> SelectionContext {
        self.clone()
    }
}

/// Backend that creates the application.
///
/// Calls block; the UI runs them off the event loop thread.
pub trait ApplicationService: Send + Sync {
    fn create(&self, request: &CreateApplicationRequest) -> Result<(), ServiceError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

/// Fire-and-forget user notifications.
pub trait NotificationSink {
    fn notify(&mut self, severity: Severity, title: &str, detail: Option<&str>);
}
