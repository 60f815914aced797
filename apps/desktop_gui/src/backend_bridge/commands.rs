//! Backend commands queued from UI to backend worker.

use crate::controller::reducer::{SessionId, Submission};

#[derive(Debug)]
pub enum BackendCommand {
    /// Run the fan-out for a new session, superseding any reading still in flight.
    Submit(Submission),
    Cancel {
        session: SessionId,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Submit(_) => "submit",
            BackendCommand::Cancel { .. } => "cancel",
        }
    }
}
