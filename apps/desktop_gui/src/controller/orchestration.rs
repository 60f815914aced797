//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};
use shared::domain::{Language, UserInfo};

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::reducer::{SessionState, Submission},
};

/// Queues `cmd` for the backend. On failure the status line explains why and `false` is returned.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Backend command processor disconnected (possible startup/runtime failure)"
                    .to_string();
            false
        }
    }
}

/// Submits a reading and hands it to the backend. A command that cannot be
/// queued fails the session immediately so the UI never waits on it.
pub fn start_reading(
    state: &mut SessionState,
    cmd_tx: &Sender<BackendCommand>,
    user: UserInfo,
    language: Language,
    status: &mut String,
) -> Submission {
    let submission = state.submit(user);
    tracing::info!(
        session = %submission.session,
        sign = %submission.sign,
        "reading submitted"
    );
    if !dispatch_backend_command(cmd_tx, BackendCommand::Submit(submission.clone()), status) {
        state.fail(submission.session, language.connection_error_message());
    }
    submission
}

/// Returns to the form and cancels the reading still in flight, if any.
pub fn reset_reading(
    state: &mut SessionState,
    cmd_tx: &Sender<BackendCommand>,
    status: &mut String,
) {
    if let Some(session) = state.reset() {
        tracing::info!(%session, "cancelling in-flight reading");
        dispatch_backend_command(cmd_tx, BackendCommand::Cancel { session }, status);
    }
}
