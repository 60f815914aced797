//! Backend worker thread: owns the tokio runtime and one task per in-flight reading.

use std::{sync::Arc, thread};

use client_core::{
    cancel_pair, config::Settings, run_analysis, CancelHandle, ContentGenerator, FanoutPolicy,
    GeminiClient,
};
use crossbeam_channel::{Receiver, Sender};
use shared::domain::Language;
use tokio::task::JoinHandle;

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::{
        events::{UiError, UiErrorContext, UiEvent},
        reducer::{SessionId, Submission},
    },
};

struct InFlight {
    session: SessionId,
    cancel: CancelHandle,
    task: JoinHandle<()>,
}

impl InFlight {
    fn stop(self) {
        self.cancel.cancel();
        self.task.abort();
    }
}

/// Starts the worker with a Gemini client built from `settings`.
pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: Settings) {
    let generator = match GeminiClient::from_settings(&settings) {
        Ok(client) => Some(Arc::new(client) as Arc<dyn ContentGenerator>),
        Err(err) => {
            tracing::error!("generation client unavailable: {err}");
            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                err.to_string(),
            )));
            None
        }
    };
    launch_with(
        cmd_rx,
        ui_tx,
        generator,
        settings.language,
        FanoutPolicy::default(),
    );
}

/// Starts the worker thread around any generator. Without one every submission fails.
pub fn launch_with(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    generator: Option<Arc<dyn ContentGenerator>>,
    language: Language,
    policy: FanoutPolicy,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let _ = ui_tx.try_send(UiEvent::Info("Ready to read the stars".to_string()));

            let mut in_flight: Option<InFlight> = None;
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Submit(submission) => {
                        if let Some(previous) = in_flight.take() {
                            tracing::debug!(session = %previous.session, "superseding in-flight reading");
                            previous.stop();
                        }
                        in_flight = Some(spawn_reading(
                            submission,
                            generator.clone(),
                            language,
                            policy,
                            ui_tx.clone(),
                        ));
                    }
                    BackendCommand::Cancel { session } => {
                        match in_flight.take() {
                            Some(current) if current.session == session => {
                                tracing::info!(%session, "reading cancelled");
                                current.stop();
                            }
                            other => in_flight = other,
                        }
                    }
                }
            }

            if let Some(current) = in_flight.take() {
                current.stop();
            }
            tracing::debug!("backend command queue closed; worker exiting");
        });
    })
}

fn spawn_reading(
    submission: Submission,
    generator: Option<Arc<dyn ContentGenerator>>,
    language: Language,
    policy: FanoutPolicy,
    ui_tx: Sender<UiEvent>,
) -> InFlight {
    let Submission {
        session,
        user,
        sign,
    } = submission;
    let (cancel, signal) = cancel_pair();

    let task = tokio::spawn(async move {
        let failed = || UiEvent::AnalysisFailed {
            session,
            message: language.connection_error_message().to_string(),
        };
        let Some(generator) = generator else {
            tracing::error!(%session, "no generation client configured");
            let _ = ui_tx.try_send(failed());
            return;
        };

        let event = match run_analysis(generator.as_ref(), &user, sign, policy, signal).await {
            Ok(report) => UiEvent::AnalysisCompleted { session, report },
            Err(err) if err.is_cancelled() => return,
            Err(err) => {
                tracing::error!(%session, "reading failed: {err}");
                failed()
            }
        };
        let _ = ui_tx.try_send(event);
    });

    InFlight {
        session,
        cancel,
        task,
    }
}
