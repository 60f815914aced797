//! Concurrent fan-out of the three generation calls with an explicit per-call policy.

use std::{fmt, future::Future};

use shared::{
    domain::{UserInfo, ZodiacSign},
    protocol::AnalysisReport,
};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::{error::GenerationError, ContentGenerator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    Horoscope,
    NatalAnalysis,
    ZodiacImage,
}

impl CallKind {
    pub fn label(self) -> &'static str {
        match self {
            CallKind::Horoscope => "horoscope",
            CallKind::NatalAnalysis => "natal_analysis",
            CallKind::ZodiacImage => "zodiac_image",
        }
    }
}

impl fmt::Display for CallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a failing call affects the whole fan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallPolicy {
    /// Failure aborts the join and drops the calls still in flight.
    Required,
    /// Failure is logged and the result is treated as absent.
    Optional,
    /// The call is never issued.
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanoutPolicy {
    pub horoscope: CallPolicy,
    pub natal_analysis: CallPolicy,
    pub zodiac_image: CallPolicy,
}

impl Default for FanoutPolicy {
    fn default() -> Self {
        Self {
            horoscope: CallPolicy::Required,
            natal_analysis: CallPolicy::Required,
            zodiac_image: CallPolicy::Optional,
        }
    }
}

impl FanoutPolicy {
    pub fn for_call(&self, kind: CallKind) -> CallPolicy {
        match kind {
            CallKind::Horoscope => self.horoscope,
            CallKind::NatalAnalysis => self.natal_analysis,
            CallKind::ZodiacImage => self.zodiac_image,
        }
    }

    pub fn without_image(self) -> Self {
        Self {
            zodiac_image: CallPolicy::Skipped,
            ..self
        }
    }
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("{kind} call failed: {source}")]
    CallFailed {
        kind: CallKind,
        #[source]
        source: GenerationError,
    },
    #[error("{0} result is needed for the report but was not produced")]
    MissingResult(CallKind),
    #[error("analysis was cancelled")]
    Cancelled,
}

impl AnalysisError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AnalysisError::Cancelled)
    }
}

/// Owner side of a cancellation pair. Cancelling or dropping it cancels every signal.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

pub fn cancel_pair() -> (CancelHandle, CancelSignal) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelSignal { rx })
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn signal(&self) -> CancelSignal {
        CancelSignal {
            rx: self.tx.subscribe(),
        }
    }
}

impl CancelSignal {
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }

    /// Resolves once the handle cancels or is dropped.
    pub async fn cancelled(&mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                return;
            }
        }
    }
}

async fn settle<T>(
    kind: CallKind,
    policy: CallPolicy,
    call: impl Future<Output = Result<T, GenerationError>>,
) -> Result<Option<T>, AnalysisError> {
    match policy {
        CallPolicy::Skipped => Ok(None),
        CallPolicy::Required => call
            .await
            .map(Some)
            .map_err(|source| AnalysisError::CallFailed { kind, source }),
        CallPolicy::Optional => match call.await {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!(call = %kind, "optional call degraded to absent: {err}");
                Ok(None)
            }
        },
    }
}

/// Issues the horoscope, natal-analysis and image calls concurrently and merges them.
///
/// The join is fail-fast on `Required` calls. Cancellation wins over any
/// result that has not been produced yet.
pub async fn run_analysis<G>(
    generator: &G,
    user: &UserInfo,
    sign: ZodiacSign,
    policy: FanoutPolicy,
    mut cancel: CancelSignal,
) -> Result<AnalysisReport, AnalysisError>
where
    G: ContentGenerator + ?Sized,
{
    info!(%sign, user = %user.name, "starting analysis fan-out");

    let fanout = async {
        tokio::try_join!(
            settle(
                CallKind::Horoscope,
                policy.horoscope,
                generator.horoscope(user, sign)
            ),
            settle(
                CallKind::NatalAnalysis,
                policy.natal_analysis,
                generator.natal_analysis(user, sign)
            ),
            settle(
                CallKind::ZodiacImage,
                policy.zodiac_image,
                generator.zodiac_image(sign)
            ),
        )
    };

    let (prediction, natal_analysis, image) = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            info!(%sign, "analysis fan-out cancelled");
            return Err(AnalysisError::Cancelled);
        }
        settled = fanout => settled?,
    };

    let prediction = prediction.ok_or(AnalysisError::MissingResult(CallKind::Horoscope))?;
    let natal_analysis =
        natal_analysis.ok_or(AnalysisError::MissingResult(CallKind::NatalAnalysis))?;
    let zodiac_image = image.flatten().map(|image| image.data_url());

    info!(
        %sign,
        has_image = zodiac_image.is_some(),
        "analysis fan-out complete"
    );
    Ok(AnalysisReport {
        sign,
        prediction,
        natal_analysis,
        zodiac_image,
    })
}

#[cfg(test)]
#[path = "tests/fanout_tests.rs"]
mod tests;
