use std::fmt;
use std::time::Duration;

use log::{debug, info, warn};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use simple_moving_average::{SMA, SumTreeSMA};

use crate::PrepVistaError;
use crate::devices::{MediaConstraints, MediaDevices, MediaStream};
use crate::scheduler::Scheduler;
use crate::workflow::{PhaseMachine, Workflow};

pub const DURATION_OPTIONS_MIN: [u32; 4] = [15, 30, 45, 60];
pub const MIN_DIFFICULTY: u8 = 1;
pub const MAX_DIFFICULTY: u8 = 5;

const COUNTDOWN_TICK: Duration = Duration::from_secs(1);
/// One hour of samples at the default refresh period.
const METRIC_WINDOW: usize = 1800;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterviewType {
    Hr,
    Technical,
    Behavioral,
}

impl InterviewType {
    pub const ALL: [InterviewType; 3] = [
        InterviewType::Hr,
        InterviewType::Technical,
        InterviewType::Behavioral,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            InterviewType::Hr => "General questions about background and fit",
            InterviewType::Technical => "Role-specific technical questions",
            InterviewType::Behavioral => "Situation-based questions",
        }
    }

    pub fn questions(&self) -> &'static [&'static str] {
        match self {
            InterviewType::Hr => &[
                "Tell me about yourself and your background.",
                "Why are you interested in this position?",
                "What are your greatest strengths?",
                "Describe a challenging situation you've overcome.",
                "Where do you see yourself in 5 years?",
            ],
            InterviewType::Technical => &[
                "Explain the difference between REST and GraphQL APIs.",
                "How would you optimize a slow database query?",
                "Describe your approach to debugging a complex issue.",
                "What are the principles of good software architecture?",
                "How do you ensure code quality in your projects?",
            ],
            InterviewType::Behavioral => &[
                "Describe a time when you had to work with a difficult team member.",
                "Tell me about a project where you had to learn something new quickly.",
                "How do you handle tight deadlines and pressure?",
                "Describe a situation where you had to make a difficult decision.",
                "Tell me about a time you failed and what you learned from it.",
            ],
        }
    }
}

impl fmt::Display for InterviewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterviewType::Hr => write!(f, "HR Interview"),
            InterviewType::Technical => write!(f, "Technical Interview"),
            InterviewType::Behavioral => write!(f, "Behavioral Interview"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterviewSetup {
    pub interview_type: InterviewType,
    pub difficulty: u8,
    pub duration_minutes: u32,
    pub video_on: bool,
    pub audio_on: bool,
}

impl Default for InterviewSetup {
    fn default() -> Self {
        Self {
            interview_type: InterviewType::Hr,
            difficulty: 2,
            duration_minutes: 30,
            video_on: true,
            audio_on: true,
        }
    }
}

/// The four live feedback gauges, each kept within `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveMetrics {
    pub eye_contact: f64,
    pub posture: f64,
    pub confidence: f64,
    pub speech_pace: f64,
}

impl Default for LiveMetrics {
    fn default() -> Self {
        Self {
            eye_contact: 75.,
            posture: 82.,
            confidence: 68.,
            speech_pace: 85.,
        }
    }
}

impl LiveMetrics {
    /// Full width of the random nudge per gauge: eye contact, posture,
    /// confidence, speech pace.
    pub const SPREAD: [f64; 4] = [10., 8., 12., 6.];

    pub fn as_array(&self) -> [f64; 4] {
        [self.eye_contact, self.posture, self.confidence, self.speech_pace]
    }

    /// Adds the deltas and clamps every gauge to `[0, 100]`.
    pub fn apply(&mut self, deltas: [f64; 4]) {
        let clamp = |value: f64, delta: f64| {
            let next = value + delta;
            if next.is_nan() { value } else { next.clamp(0., 100.) }
        };
        self.eye_contact = clamp(self.eye_contact, deltas[0]);
        self.posture = clamp(self.posture, deltas[1]);
        self.confidence = clamp(self.confidence, deltas[2]);
        self.speech_pace = clamp(self.speech_pace, deltas[3]);
    }

    /// Nudges every gauge by a uniform delta in `[-spread / 2, spread / 2)`.
    pub fn jitter(&mut self, rng: &mut dyn RngCore) {
        let deltas = Self::SPREAD.map(|spread| (rng.r#gen::<f64>() - 0.5) * spread);
        self.apply(deltas);
    }
}

pub struct LiveSession {
    pub setup: InterviewSetup,
    pub time_remaining_s: u64,
    pub current_question: usize,
    pub metrics: LiveMetrics,
    averages: [SumTreeSMA<f64, f64, METRIC_WINDOW>; 4],
}

impl LiveSession {
    fn new(setup: InterviewSetup) -> Self {
        let metrics = LiveMetrics::default();
        let mut averages = [(); 4].map(|_| SumTreeSMA::new());
        for (average, value) in averages.iter_mut().zip(metrics.as_array()) {
            average.add_sample(value);
        }
        Self {
            setup,
            time_remaining_s: u64::from(setup.duration_minutes) * 60,
            current_question: 0,
            metrics,
            averages,
        }
    }

    fn record_sample(&mut self) {
        for (average, value) in self.averages.iter_mut().zip(self.metrics.as_array()) {
            average.add_sample(value);
        }
    }

    pub fn questions(&self) -> &'static [&'static str] {
        self.setup.interview_type.questions()
    }

    pub fn question(&self) -> &'static str {
        self.questions()[self.current_question]
    }

    fn metric_averages(&self) -> [u8; 4] {
        self.averages
            .each_ref()
            .map(|average| average.get_average().round().clamp(0., 100.) as u8)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewSummary {
    pub interview_type: InterviewType,
    pub overall_score: u8,
    pub duration_minutes: u32,
    pub questions_answered: usize,
    pub average_eye_contact: u8,
    pub average_posture: u8,
    pub average_confidence: u8,
    pub average_speech_pace: u8,
    pub feedback: Vec<String>,
}

pub struct InterviewWorkflow;

impl Workflow for InterviewWorkflow {
    type Session = LiveSession;
    type Report = InterviewSummary;

    fn name(&self) -> &'static str {
        "live interview"
    }

    fn validate(&self, session: &LiveSession) -> Result<(), PrepVistaError> {
        if session.setup.duration_minutes == 0 {
            return Err(PrepVistaError::InvalidInput {
                field: "duration".to_string(),
                reason: "must be at least one minute".to_string(),
            });
        }
        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&session.setup.difficulty) {
            return Err(PrepVistaError::InvalidInput {
                field: "difficulty".to_string(),
                reason: format!("must be between {MIN_DIFFICULTY} and {MAX_DIFFICULTY}"),
            });
        }
        Ok(())
    }

    // the countdown decides when the session ends
    fn processing_delay(&self, _session: &LiveSession) -> Option<Duration> {
        None
    }

    fn finish(&self, session: &LiveSession) -> InterviewSummary {
        let [eye_contact, posture, confidence, speech_pace] = session.metric_averages();
        let overall = (u32::from(eye_contact)
            + u32::from(posture)
            + u32::from(confidence)
            + u32::from(speech_pace)) as f64
            / 4.;
        let minutes_left = (session.time_remaining_s / 60) as u32;
        InterviewSummary {
            interview_type: session.setup.interview_type,
            overall_score: overall.round() as u8,
            duration_minutes: session.setup.duration_minutes.saturating_sub(minutes_left),
            questions_answered: session.current_question + 1,
            average_eye_contact: eye_contact,
            average_posture: posture,
            average_confidence: confidence,
            average_speech_pace: speech_pace,
            feedback: [
                "Strong technical knowledge demonstrated",
                "Good communication skills",
                "Maintain better eye contact",
                "Speak with more confidence",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterviewStage {
    Setup,
    Active,
    Complete,
}

#[derive(Debug, Clone, PartialEq)]
enum InterviewTimer {
    Countdown,
    Metrics,
}

pub struct InterviewPanel {
    pub setup: InterviewSetup,
    machine: PhaseMachine<InterviewWorkflow>,
    scheduler: Scheduler<InterviewTimer>,
    stream: Option<MediaStream>,
    metrics_period: Duration,
    last_error: Option<String>,
}

impl InterviewPanel {
    pub fn new(metrics_period: Duration) -> Self {
        Self {
            setup: InterviewSetup::default(),
            machine: PhaseMachine::new(InterviewWorkflow),
            scheduler: Scheduler::new(),
            stream: None,
            metrics_period,
            last_error: None,
        }
    }

    pub fn stage(&self) -> InterviewStage {
        if self.machine.is_processing() {
            InterviewStage::Active
        } else if self.machine.is_done() {
            InterviewStage::Complete
        } else {
            InterviewStage::Setup
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn has_stream(&self) -> bool {
        self.stream.is_some()
    }

    /// `Setup -> Active`. The capture devices are requested first; a denial is
    /// kept as a message and the panel stays in setup.
    pub fn start(&mut self, devices: &mut dyn MediaDevices) -> Result<(), PrepVistaError> {
        if self.stage() != InterviewStage::Setup {
            return Err(PrepVistaError::invalid_transition(
                self.machine.workflow().name(),
                "start",
                self.machine.phase().label(),
            ));
        }
        let session = LiveSession::new(self.setup);
        if let Err(e) = self.machine.workflow().validate(&session) {
            self.last_error = Some(e.to_string());
            return Err(e);
        }

        let stream = match devices.acquire_stream(MediaConstraints::AUDIO_VIDEO) {
            Ok(stream) => stream,
            Err(e) => {
                warn!("Could not start interview: {e}");
                self.last_error = Some(e.to_string());
                return Err(e);
            }
        };
        if let Err(e) = self
            .machine
            .begin(session, &mut self.scheduler, InterviewTimer::Countdown)
        {
            devices.release(stream);
            self.last_error = Some(e.to_string());
            return Err(e);
        }

        self.stream = Some(stream);
        self.scheduler
            .schedule_every(COUNTDOWN_TICK, InterviewTimer::Countdown);
        self.scheduler
            .schedule_every(self.metrics_period, InterviewTimer::Metrics);
        self.last_error = None;
        info!(
            "{} started: {} minutes, difficulty {}",
            self.setup.interview_type, self.setup.duration_minutes, self.setup.difficulty
        );
        Ok(())
    }

    pub fn advance(
        &mut self,
        elapsed: Duration,
        devices: &mut dyn MediaDevices,
        rng: &mut dyn RngCore,
    ) {
        let until = self.scheduler.horizon(elapsed);
        while let Some(timer) = self.scheduler.poll(until) {
            let Some(session) = self.machine.session_mut() else {
                continue;
            };
            match timer {
                InterviewTimer::Countdown => {
                    session.time_remaining_s = session.time_remaining_s.saturating_sub(1);
                    if session.time_remaining_s == 0 {
                        debug!("Interview time is up");
                        self.finish(devices);
                    }
                }
                InterviewTimer::Metrics => {
                    session.metrics.jitter(rng);
                    session.record_sample();
                }
            }
        }
    }

    pub fn next_question(&mut self) {
        if let Some(session) = self.machine.session_mut() {
            session.current_question =
                (session.current_question + 1).min(session.questions().len() - 1);
        }
    }

    /// Manual "End Interview".
    pub fn end(&mut self, devices: &mut dyn MediaDevices) {
        if self.stage() == InterviewStage::Active {
            self.finish(devices);
        }
    }

    fn finish(&mut self, devices: &mut dyn MediaDevices) {
        self.scheduler.cancel_all();
        if let Some(stream) = self.stream.take() {
            devices.release(stream);
        }
        if let Ok(summary) = self.machine.complete(&mut self.scheduler) {
            info!(
                "Interview complete: {} minutes, {} questions",
                summary.duration_minutes, summary.questions_answered
            );
        }
    }

    pub fn session(&self) -> Option<&LiveSession> {
        match self.stage() {
            InterviewStage::Active => self.machine.session(),
            _ => None,
        }
    }

    pub fn time_remaining_s(&self) -> Option<u64> {
        self.session().map(|s| s.time_remaining_s)
    }

    pub fn metrics(&self) -> Option<&LiveMetrics> {
        self.session().map(|s| &s.metrics)
    }

    pub fn summary(&self) -> Option<&InterviewSummary> {
        self.machine.report()
    }

    /// "New Interview": back to setup, keeping the last setup choices.
    pub fn new_interview(&mut self, devices: &mut dyn MediaDevices) {
        self.exit(devices);
        self.machine.reset(&mut self.scheduler);
    }

    pub fn toggle_video(&mut self) {
        self.setup.video_on = !self.setup.video_on;
    }

    pub fn toggle_audio(&mut self) {
        self.setup.audio_on = !self.setup.audio_on;
    }

    /// Cancels both ticks and releases the capture stream if one is open.
    pub fn exit(&mut self, devices: &mut dyn MediaDevices) {
        self.scheduler.cancel_all();
        if let Some(stream) = self.stream.take() {
            devices.release(stream);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::{DevicePermissions, SimulatedDevices};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn setup(duration_minutes: u32) -> InterviewSetup {
        InterviewSetup {
            duration_minutes,
            ..Default::default()
        }
    }

    #[test]
    fn test_countdown_completes_exactly_at_zero() {
        let mut devices = SimulatedDevices::new(DevicePermissions::default());
        let mut rng = StdRng::seed_from_u64(1);
        let mut panel = InterviewPanel::new(Duration::from_secs(2));
        panel.setup = setup(1);
        panel.start(&mut devices).unwrap();
        assert_eq!(panel.time_remaining_s(), Some(60));

        let mut previous = 60;
        for _ in 0..59 {
            panel.advance(Duration::from_secs(1), &mut devices, &mut rng);
            let remaining = panel.time_remaining_s().unwrap();
            assert_eq!(remaining, previous - 1);
            previous = remaining;
        }
        assert_eq!(panel.stage(), InterviewStage::Active);

        panel.advance(Duration::from_secs(1), &mut devices, &mut rng);
        assert_eq!(panel.stage(), InterviewStage::Complete);
        assert_eq!(devices.open_streams(), 0);
        assert_eq!(panel.summary().unwrap().duration_minutes, 1);
    }

    #[test]
    fn test_sub_second_advance_does_not_tick() {
        let mut devices = SimulatedDevices::new(DevicePermissions::default());
        let mut rng = StdRng::seed_from_u64(1);
        let mut panel = InterviewPanel::new(Duration::from_secs(2));
        panel.start(&mut devices).unwrap();
        panel.advance(Duration::from_millis(999), &mut devices, &mut rng);
        assert_eq!(panel.time_remaining_s(), Some(30 * 60));
        panel.advance(Duration::from_millis(1), &mut devices, &mut rng);
        assert_eq!(panel.time_remaining_s(), Some(30 * 60 - 1));
    }

    #[test]
    fn test_manual_end_summary() {
        let mut devices = SimulatedDevices::new(DevicePermissions::default());
        let mut rng = StdRng::seed_from_u64(3);
        let mut panel = InterviewPanel::new(Duration::from_secs(2));
        panel.setup = setup(15);
        panel.start(&mut devices).unwrap();
        panel.next_question();
        panel.next_question();
        panel.advance(Duration::from_secs(5 * 60), &mut devices, &mut rng);
        panel.end(&mut devices);

        let summary = panel.summary().unwrap();
        assert_eq!(summary.duration_minutes, 5);
        assert_eq!(summary.questions_answered, 3);
        assert_eq!(summary.feedback.len(), 4);
        assert!(summary.overall_score <= 100);
        assert_eq!(devices.open_streams(), 0);
    }

    #[test]
    fn test_permission_denied_stays_in_setup() {
        let mut devices = SimulatedDevices::new(DevicePermissions {
            camera: true,
            microphone: false,
        });
        let mut panel = InterviewPanel::new(Duration::from_secs(2));
        assert!(panel.start(&mut devices).is_err());
        assert_eq!(panel.stage(), InterviewStage::Setup);
        assert!(panel.last_error().unwrap().contains("microphone"));
        assert!(!panel.has_stream());
    }

    #[test]
    fn test_invalid_setup_does_not_open_stream() {
        let mut devices = SimulatedDevices::new(DevicePermissions::default());
        let mut panel = InterviewPanel::new(Duration::from_secs(2));
        panel.setup.difficulty = 9;
        assert!(panel.start(&mut devices).is_err());
        assert_eq!(devices.open_streams(), 0);
    }

    #[test]
    fn test_question_index_is_capped() {
        let mut devices = SimulatedDevices::new(DevicePermissions::default());
        let mut panel = InterviewPanel::new(Duration::from_secs(2));
        panel.start(&mut devices).unwrap();
        for _ in 0..20 {
            panel.next_question();
        }
        let session = panel.session().unwrap();
        assert_eq!(session.current_question, session.questions().len() - 1);
    }

    #[test]
    fn test_new_interview_returns_to_setup() {
        let mut devices = SimulatedDevices::new(DevicePermissions::default());
        let mut panel = InterviewPanel::new(Duration::from_secs(2));
        panel.start(&mut devices).unwrap();
        panel.end(&mut devices);
        panel.new_interview(&mut devices);
        assert_eq!(panel.stage(), InterviewStage::Setup);
        assert!(panel.summary().is_none());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_metrics_stay_in_bounds(
            deltas in prop::collection::vec(prop::array::uniform4(-1000.0f64..1000.0), 0..200),
        ) {
            let mut metrics = LiveMetrics::default();
            for step in deltas {
                metrics.apply(step);
                for value in metrics.as_array() {
                    prop_assert!((0.0..=100.0).contains(&value));
                }
            }
        }

        #[test]
        fn prop_jitter_stays_in_bounds(seed in any::<u64>(), steps in 0usize..500) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut metrics = LiveMetrics::default();
            for _ in 0..steps {
                metrics.jitter(&mut rng);
                for value in metrics.as_array() {
                    prop_assert!((0.0..=100.0).contains(&value));
                }
            }
        }
    }
}
