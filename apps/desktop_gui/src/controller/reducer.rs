//! Submission workflow state owned by the UI thread.

use std::fmt;

use shared::{
    domain::{UserInfo, ZodiacSign},
    protocol::{split_paragraphs, AnalysisReport, HoroscopePrediction},
};

/// Identifies one submission. Allocated monotonically and never reused, even across resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Failed,
}

/// What the orchestrator needs to dispatch a freshly submitted reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub session: SessionId,
    pub user: UserInfo,
    pub sign: ZodiacSign,
}

#[derive(Debug, Default)]
pub struct SessionState {
    last_session: u64,
    current: Option<SessionId>,
    user: Option<UserInfo>,
    sign: Option<ZodiacSign>,
    prediction: Option<HoroscopePrediction>,
    natal_analysis: Option<String>,
    zodiac_image: Option<String>,
    loading: bool,
    error: Option<String>,
}

impl SessionState {
    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Failed
        } else if self.prediction.is_some() {
            Phase::Success
        } else {
            Phase::Idle
        }
    }

    /// Starts a new cycle. Any earlier session becomes stale.
    pub fn submit(&mut self, user: UserInfo) -> Submission {
        self.last_session += 1;
        let session = SessionId(self.last_session);
        let sign = ZodiacSign::from_birth_date(user.birth_date);

        self.current = Some(session);
        self.user = Some(user.clone());
        self.sign = Some(sign);
        self.prediction = None;
        self.natal_analysis = None;
        self.zodiac_image = None;
        self.error = None;
        self.loading = true;

        Submission {
            session,
            user,
            sign,
        }
    }

    /// Applies a finished fan-out. Returns `false` when the event was stale.
    pub fn complete(&mut self, session: SessionId, report: AnalysisReport) -> bool {
        if !self.is_in_flight(session) {
            tracing::debug!(%session, "ignoring stale completion");
            return false;
        }
        self.prediction = Some(report.prediction);
        self.natal_analysis = Some(report.natal_analysis);
        self.zodiac_image = report.zodiac_image;
        self.error = None;
        self.loading = false;
        true
    }

    /// Applies a failed fan-out. Returns `false` when the event was stale.
    pub fn fail(&mut self, session: SessionId, message: impl Into<String>) -> bool {
        if !self.is_in_flight(session) {
            tracing::debug!(%session, "ignoring stale failure");
            return false;
        }
        self.prediction = None;
        self.natal_analysis = None;
        self.zodiac_image = None;
        self.error = Some(message.into());
        self.loading = false;
        true
    }

    /// Clears every view field. Returns the session that was still in flight, if any.
    pub fn reset(&mut self) -> Option<SessionId> {
        let in_flight = self.current.filter(|_| self.loading);
        *self = Self {
            last_session: self.last_session,
            ..Self::default()
        };
        in_flight
    }

    fn is_in_flight(&self, session: SessionId) -> bool {
        self.loading && self.current == Some(session)
    }

    pub fn current_session(&self) -> Option<SessionId> {
        self.current
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }

    pub fn sign(&self) -> Option<ZodiacSign> {
        self.sign
    }

    pub fn prediction(&self) -> Option<&HoroscopePrediction> {
        self.prediction.as_ref()
    }

    pub fn natal_analysis(&self) -> Option<&str> {
        self.natal_analysis.as_deref()
    }

    pub fn zodiac_image(&self) -> Option<&str> {
        self.zodiac_image.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Natal analysis split into non-blank paragraphs.
    pub fn natal_paragraphs(&self) -> Vec<&str> {
        self.natal_analysis
            .as_deref()
            .map(split_paragraphs)
            .unwrap_or_default()
    }
}
