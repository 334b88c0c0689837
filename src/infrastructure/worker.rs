//! Runs creation requests off the UI thread.

use crate::application::{PendingSubmission, SubmissionTicket};
use crate::domain::{ApplicationService, ServiceError};
use std::io;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

pub type SubmissionResult = (SubmissionTicket, Result<(), ServiceError>);

/// Sends `pending` on a background thread and reports back over `results`.
///
/// The request cannot be cancelled once started; the UI decides whether the
/// answer still applies by comparing tickets.
pub fn spawn_submission(
    service: Arc<dyn ApplicationService>,
    pending: PendingSubmission,
    results: Sender<SubmissionResult>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("create-application".to_string())
        .spawn(move || {
            let result = service.create(&pending.request);
            if let Err(error) = &result {
                tracing::warn!(%error, "create application call failed");
            }
            if results.send((pending.ticket, result)).is_err() {
                tracing::debug!("UI exited before submission finished");
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationModal;
    use crate::domain::{CreateApplicationRequest, EnabledModel, SelectionContext};
    use std::sync::mpsc;
    use std::time::Duration;

    struct FixedService(Result<(), ServiceError>);

    impl ApplicationService for FixedService {
        fn create(&self, _request: &CreateApplicationRequest) -> Result<(), ServiceError> {
            self.0.clone()
        }
    }

    fn create_pending() -> (ApplicationModal, PendingSubmission) {
        let context = SelectionContext {
            enabled_models: vec![EnabledModel { name: "gpt".to_string(), provider: "openai".to_string() }],
            selected_query_model: "gpt".to_string(),
            model_config_text: "{}".to_string(),
            retriever_config_text: "{}".to_string(),
            ..SelectionContext::default()
        };
        let mut modal = ApplicationModal::default();
        modal.open();
        modal.set_name("bot");
        let pending = modal.begin_submit(&context).unwrap();
        (modal, pending)
    }

    #[test]
    fn test_result_delivered_with_ticket() {
        let (mut modal, pending) = create_pending();
        let ticket = pending.ticket;
        let (tx, rx) = mpsc::channel();

        let handle = spawn_submission(Arc::new(FixedService(Ok(()))), pending, tx).unwrap();
        let (received, result) = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        handle.join().unwrap();

        assert_eq!(received, ticket);
        assert!(result.is_ok());
        modal.complete_submit(received, result);
        assert!(!modal.is_open());
    }

    #[test]
    fn test_dropped_receiver_is_tolerated() {
        let (_modal, pending) = create_pending();
        let (tx, rx) = mpsc::channel();
        drop(rx);

        let service = FixedService(Err(ServiceError::Transport("offline".to_string())));
        let handle = spawn_submission(Arc::new(service), pending, tx).unwrap();
        assert!(handle.join().is_ok());
    }
}
