use super::*;

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::protocol::HoroscopePrediction;

use crate::image::ZodiacImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Behavior {
    Succeed,
    Fail,
    Hang,
    NoImage,
}

struct ScriptedGenerator {
    horoscope: Behavior,
    natal: Behavior,
    image: Behavior,
    horoscope_calls: Arc<AtomicUsize>,
    natal_calls: Arc<AtomicUsize>,
    image_calls: Arc<AtomicUsize>,
}

impl ScriptedGenerator {
    fn new(horoscope: Behavior, natal: Behavior, image: Behavior) -> Self {
        Self {
            horoscope,
            natal,
            image,
            horoscope_calls: Arc::new(AtomicUsize::new(0)),
            natal_calls: Arc::new(AtomicUsize::new(0)),
            image_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn all_succeed() -> Self {
        Self::new(Behavior::Succeed, Behavior::Succeed, Behavior::Succeed)
    }
}

async fn act<T>(behavior: Behavior, value: T) -> Result<T, GenerationError> {
    match behavior {
        Behavior::Succeed | Behavior::NoImage => Ok(value),
        Behavior::Fail => Err(GenerationError::EmptyResponse),
        Behavior::Hang => std::future::pending().await,
    }
}

fn prediction() -> HoroscopePrediction {
    HoroscopePrediction {
        daily: "The sun warms your plans.".into(),
        love: "An old friend writes.".into(),
        career: "A steady week.".into(),
        health: "Sleep early.".into(),
        astrological_advice: "Follow the moon.".into(),
    }
}

#[async_trait]
impl ContentGenerator for ScriptedGenerator {
    async fn horoscope(
        &self,
        _user: &UserInfo,
        _sign: ZodiacSign,
    ) -> Result<HoroscopePrediction, GenerationError> {
        self.horoscope_calls.fetch_add(1, Ordering::SeqCst);
        act(self.horoscope, prediction()).await
    }

    async fn natal_analysis(
        &self,
        user: &UserInfo,
        sign: ZodiacSign,
    ) -> Result<String, GenerationError> {
        self.natal_calls.fetch_add(1, Ordering::SeqCst);
        act(self.natal, format!("{} carries the sun in {sign}.", user.name)).await
    }

    async fn zodiac_image(&self, _sign: ZodiacSign) -> Result<Option<ZodiacImage>, GenerationError> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        let image = (self.image != Behavior::NoImage).then(|| ZodiacImage::new(None, "AAEC"));
        act(self.image, image).await
    }
}

fn lina() -> UserInfo {
    UserInfo::new(
        "Lina",
        NaiveDate::from_ymd_opt(1990, 8, 10).expect("date"),
        None,
        None,
    )
    .expect("user")
}

async fn run(
    generator: &ScriptedGenerator,
    policy: FanoutPolicy,
) -> Result<AnalysisReport, AnalysisError> {
    let (_handle, signal) = cancel_pair();
    run_analysis(generator, &lina(), ZodiacSign::Leo, policy, signal).await
}

#[test]
fn default_policy_requires_text_and_tolerates_image() {
    let policy = FanoutPolicy::default();
    assert_eq!(policy.for_call(CallKind::Horoscope), CallPolicy::Required);
    assert_eq!(policy.for_call(CallKind::NatalAnalysis), CallPolicy::Required);
    assert_eq!(policy.for_call(CallKind::ZodiacImage), CallPolicy::Optional);
    assert_eq!(
        policy.without_image().for_call(CallKind::ZodiacImage),
        CallPolicy::Skipped
    );
}

#[tokio::test]
async fn successful_fanout_merges_all_three_results() {
    let generator = ScriptedGenerator::all_succeed();
    let report = run(&generator, FanoutPolicy::default())
        .await
        .expect("report");

    assert_eq!(report.sign, ZodiacSign::Leo);
    assert_eq!(report.prediction, prediction());
    assert_eq!(report.natal_analysis, "Lina carries the sun in Leo.");
    assert_eq!(
        report.zodiac_image.as_deref(),
        Some("data:image/png;base64,AAEC")
    );
    assert_eq!(generator.horoscope_calls.load(Ordering::SeqCst), 1);
    assert_eq!(generator.natal_calls.load(Ordering::SeqCst), 1);
    assert_eq!(generator.image_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn image_failure_degrades_to_no_image() {
    let generator = ScriptedGenerator::new(Behavior::Succeed, Behavior::Succeed, Behavior::Fail);
    let report = run(&generator, FanoutPolicy::default())
        .await
        .expect("report despite image failure");
    assert_eq!(report.zodiac_image, None);
    assert_eq!(report.prediction, prediction());
}

#[tokio::test]
async fn response_without_inline_image_yields_no_image() {
    let generator =
        ScriptedGenerator::new(Behavior::Succeed, Behavior::Succeed, Behavior::NoImage);
    let report = run(&generator, FanoutPolicy::default())
        .await
        .expect("report");
    assert_eq!(report.zodiac_image, None);
}

#[tokio::test]
async fn horoscope_failure_fails_the_whole_cycle() {
    let generator = ScriptedGenerator::new(Behavior::Fail, Behavior::Succeed, Behavior::Succeed);
    let err = run(&generator, FanoutPolicy::default())
        .await
        .expect_err("must fail");
    assert!(matches!(
        err,
        AnalysisError::CallFailed {
            kind: CallKind::Horoscope,
            ..
        }
    ));
}

#[tokio::test]
async fn natal_failure_fails_the_whole_cycle() {
    let generator = ScriptedGenerator::new(Behavior::Succeed, Behavior::Fail, Behavior::Fail);
    let err = run(&generator, FanoutPolicy::default())
        .await
        .expect_err("must fail");
    assert!(matches!(
        err,
        AnalysisError::CallFailed {
            kind: CallKind::NatalAnalysis,
            ..
        }
    ));
}

#[tokio::test]
async fn required_failure_does_not_wait_for_pending_calls() {
    let generator = ScriptedGenerator::new(Behavior::Fail, Behavior::Hang, Behavior::Hang);
    let result = tokio::time::timeout(
        Duration::from_secs(5),
        run(&generator, FanoutPolicy::default()),
    )
    .await
    .expect("fail-fast join must not hang");
    assert!(matches!(
        result,
        Err(AnalysisError::CallFailed {
            kind: CallKind::Horoscope,
            ..
        })
    ));
}

#[tokio::test]
async fn skipped_image_is_never_requested() {
    let generator = ScriptedGenerator::all_succeed();
    let report = run(&generator, FanoutPolicy::default().without_image())
        .await
        .expect("report");
    assert_eq!(report.zodiac_image, None);
    assert_eq!(generator.image_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn relaxed_horoscope_failure_reports_missing_result() {
    let generator = ScriptedGenerator::new(Behavior::Fail, Behavior::Succeed, Behavior::Succeed);
    let policy = FanoutPolicy {
        horoscope: CallPolicy::Optional,
        ..FanoutPolicy::default()
    };
    let err = run(&generator, policy).await.expect_err("must fail");
    assert!(matches!(err, AnalysisError::MissingResult(CallKind::Horoscope)));
}

#[tokio::test]
async fn strict_image_policy_propagates_image_failure() {
    let generator = ScriptedGenerator::new(Behavior::Succeed, Behavior::Succeed, Behavior::Fail);
    let policy = FanoutPolicy {
        zodiac_image: CallPolicy::Required,
        ..FanoutPolicy::default()
    };
    let err = run(&generator, policy).await.expect_err("must fail");
    assert!(matches!(
        err,
        AnalysisError::CallFailed {
            kind: CallKind::ZodiacImage,
            ..
        }
    ));
}

#[tokio::test]
async fn cancelling_in_flight_fanout_returns_cancelled() {
    let generator = Arc::new(ScriptedGenerator::new(
        Behavior::Hang,
        Behavior::Hang,
        Behavior::Hang,
    ));
    let (handle, signal) = cancel_pair();
    let task = {
        let generator = Arc::clone(&generator);
        tokio::spawn(async move {
            run_analysis(
                generator.as_ref(),
                &lina(),
                ZodiacSign::Leo,
                FanoutPolicy::default(),
                signal,
            )
            .await
        })
    };

    tokio::time::sleep(Duration::from_millis(20)).await;
    handle.cancel();

    let result = tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("cancelled promptly")
        .expect("task joined");
    assert!(result.expect_err("cancelled").is_cancelled());
}

#[tokio::test]
async fn dropping_the_handle_cancels() {
    let generator = ScriptedGenerator::new(Behavior::Hang, Behavior::Hang, Behavior::Hang);
    let (handle, signal) = cancel_pair();
    assert!(!signal.is_cancelled());
    drop(handle);
    assert!(signal.is_cancelled());

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        run_analysis(
            &generator,
            &lina(),
            ZodiacSign::Leo,
            FanoutPolicy::default(),
            signal,
        ),
    )
    .await
    .expect("dropped handle cancels");
    assert!(matches!(result, Err(AnalysisError::Cancelled)));
}

#[tokio::test]
async fn cancellation_before_start_wins_over_ready_results() {
    let generator = ScriptedGenerator::all_succeed();
    let (handle, signal) = cancel_pair();
    let extra = handle.signal();
    handle.cancel();
    assert!(extra.is_cancelled());

    let result = run_analysis(
        &generator,
        &lina(),
        ZodiacSign::Leo,
        FanoutPolicy::default(),
        signal,
    )
    .await;
    assert!(matches!(result, Err(AnalysisError::Cancelled)));
}
