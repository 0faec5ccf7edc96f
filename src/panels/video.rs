use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::PrepVistaError;
use crate::devices::{MediaConstraints, MediaDevices, MediaStream};
use crate::files::SelectedFile;
use crate::scheduler::Scheduler;
use crate::workflow::{PhaseMachine, Workflow};

pub const PRACTICE_PROMPTS: [&str; 5] = [
    "Tell me about yourself and your background.",
    "Why are you interested in this position?",
    "What are your greatest strengths and weaknesses?",
    "Describe a challenging project you've worked on.",
    "Where do you see yourself in 5 years?",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoReport {
    pub eye_contact_percentage: u8,
    pub posture_score: u8,
    pub gesture_analysis: String,
    pub emotional_analysis: String,
    pub speech_quality: u8,
    pub confidence: u8,
    pub overall_score: u8,
    pub improvements: Vec<String>,
    pub strengths: Vec<String>,
}

impl VideoReport {
    fn sample() -> Self {
        Self {
            eye_contact_percentage: 78,
            posture_score: 85,
            gesture_analysis: "Natural and confident hand gestures".to_string(),
            emotional_analysis: "Positive and engaged demeanor".to_string(),
            speech_quality: 82,
            confidence: 79,
            overall_score: 81,
            improvements: [
                "Maintain eye contact for longer periods",
                "Speak slightly slower for better clarity",
                "Use more varied hand gestures",
                "Improve posture in the first 30 seconds",
            ]
            .map(String::from)
            .to_vec(),
            strengths: [
                "Clear articulation and pronunciation",
                "Good facial expressions",
                "Professional appearance",
                "Structured responses",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

/// Where the footage under analysis came from.
#[derive(Debug, Clone, PartialEq)]
pub enum VideoSource {
    Recording { duration_s: u64 },
    Upload(SelectedFile),
}

pub struct VideoAnalyzer {
    delay: Duration,
}

impl Workflow for VideoAnalyzer {
    type Session = VideoSource;
    type Report = VideoReport;

    fn name(&self) -> &'static str {
        "video analysis"
    }

    fn validate(&self, session: &VideoSource) -> Result<(), PrepVistaError> {
        match session {
            VideoSource::Recording { .. } => Ok(()),
            VideoSource::Upload(file) => file.check_video(),
        }
    }

    fn processing_delay(&self, _session: &VideoSource) -> Option<Duration> {
        Some(self.delay)
    }

    fn finish(&self, _session: &VideoSource) -> VideoReport {
        VideoReport::sample()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoStage {
    Idle,
    Recording,
    Recorded,
    Analyzing,
    Result,
}

#[derive(Debug, Clone, PartialEq)]
enum VideoTimer {
    RecordingTick,
    AnalysisDone,
}

#[derive(Debug)]
enum Recorder {
    Idle,
    Recording {
        stream: MediaStream,
        elapsed_s: u64,
    },
    Recorded(VideoSource),
}

pub struct VideoPanel {
    machine: PhaseMachine<VideoAnalyzer>,
    scheduler: Scheduler<VideoTimer>,
    recorder: Recorder,
    max_recording_s: u64,
    current_prompt: usize,
    last_error: Option<String>,
}

impl VideoPanel {
    pub fn new(analysis_delay: Duration, max_recording_s: u64) -> Self {
        Self {
            machine: PhaseMachine::new(VideoAnalyzer {
                delay: analysis_delay,
            }),
            scheduler: Scheduler::new(),
            recorder: Recorder::Idle,
            max_recording_s,
            current_prompt: 0,
            last_error: None,
        }
    }

    pub fn stage(&self) -> VideoStage {
        if self.machine.is_done() {
            return VideoStage::Result;
        }
        if self.machine.is_processing() {
            return VideoStage::Analyzing;
        }
        match self.recorder {
            Recorder::Idle => VideoStage::Idle,
            Recorder::Recording { .. } => VideoStage::Recording,
            Recorder::Recorded(_) => VideoStage::Recorded,
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Seconds recorded so far, while recording.
    pub fn recording_elapsed(&self) -> Option<u64> {
        match self.recorder {
            Recorder::Recording { elapsed_s, .. } => Some(elapsed_s),
            _ => None,
        }
    }

    pub fn max_recording_s(&self) -> u64 {
        self.max_recording_s
    }

    /// The take waiting for analysis, or the one that was analysed.
    pub fn source(&self) -> Option<&VideoSource> {
        match &self.recorder {
            Recorder::Recorded(source) => Some(source),
            _ => self.machine.session(),
        }
    }

    /// `Idle -> Recording`. A permission denial is kept as a message and the
    /// panel stays idle.
    pub fn start_recording(
        &mut self,
        devices: &mut dyn MediaDevices,
    ) -> Result<(), PrepVistaError> {
        if self.stage() != VideoStage::Idle {
            return Err(PrepVistaError::invalid_transition(
                "video recorder",
                "start recording",
                self.machine.phase().label(),
            ));
        }
        let stream = devices
            .acquire_stream(MediaConstraints::AUDIO_VIDEO)
            .map_err(|e| {
                warn!("Could not start recording: {e}");
                self.last_error = Some(e.to_string());
                e
            })?;

        self.scheduler
            .schedule_every(Duration::from_secs(1), VideoTimer::RecordingTick);
        self.last_error = None;
        self.recorder = Recorder::Recording {
            stream,
            elapsed_s: 0,
        };
        info!("Recording started");
        Ok(())
    }

    /// `Recording -> Recorded`, releasing the capture stream.
    pub fn stop_recording(&mut self, devices: &mut dyn MediaDevices) {
        let recorder = std::mem::replace(&mut self.recorder, Recorder::Idle);
        self.recorder = match recorder {
            Recorder::Recording { stream, elapsed_s } => {
                self.scheduler.cancel_all();
                devices.release(stream);
                info!("Recording stopped after {elapsed_s}s");
                Recorder::Recorded(VideoSource::Recording {
                    duration_s: elapsed_s,
                })
            }
            other => other,
        };
    }

    /// `Idle -> Recorded` from an uploaded file.
    pub fn upload(&mut self, file: SelectedFile) -> Result<(), PrepVistaError> {
        if self.stage() != VideoStage::Idle {
            return Err(PrepVistaError::invalid_transition(
                "video recorder",
                "upload",
                self.machine.phase().label(),
            ));
        }
        if let Err(e) = file.check_video() {
            warn!("Rejected video upload: {e}");
            self.last_error = Some(e.to_string());
            return Err(e);
        }
        info!("Uploaded video {}", file.name);
        self.last_error = None;
        self.recorder = Recorder::Recorded(VideoSource::Upload(file));
        Ok(())
    }

    /// "Re-record": drop the current take.
    pub fn discard_take(&mut self) {
        if let Recorder::Recorded(_) = self.recorder {
            self.recorder = Recorder::Idle;
        }
    }

    pub fn analyze(&mut self) -> Result<(), PrepVistaError> {
        let recorder = std::mem::replace(&mut self.recorder, Recorder::Idle);
        let source = match recorder {
            Recorder::Recorded(source) => source,
            other => {
                self.recorder = other;
                return Err(PrepVistaError::invalid_transition(
                    "video analysis",
                    "analyze",
                    "nothing is recorded",
                ));
            }
        };
        if let Err(e) = self
            .machine
            .begin(source.clone(), &mut self.scheduler, VideoTimer::AnalysisDone)
        {
            self.recorder = Recorder::Recorded(source);
            return Err(e);
        }
        Ok(())
    }

    pub fn advance(&mut self, elapsed: Duration, devices: &mut dyn MediaDevices) {
        let until = self.scheduler.horizon(elapsed);
        while let Some(timer) = self.scheduler.poll(until) {
            match timer {
                VideoTimer::RecordingTick => {
                    let mut at_cap = false;
                    if let Recorder::Recording { elapsed_s, .. } = &mut self.recorder {
                        *elapsed_s += 1;
                        at_cap = *elapsed_s >= self.max_recording_s;
                    }
                    if at_cap {
                        info!("Recording reached the {}s cap", self.max_recording_s);
                        self.stop_recording(devices);
                    }
                }
                VideoTimer::AnalysisDone => {
                    if let Ok(report) = self.machine.complete(&mut self.scheduler) {
                        info!("Video analysis finished, overall {}", report.overall_score);
                    }
                }
            }
        }
    }

    pub fn report(&self) -> Option<&VideoReport> {
        self.machine.report()
    }

    /// "New Recording": back to idle, releasing anything still open.
    pub fn start_over(&mut self, devices: &mut dyn MediaDevices) {
        self.exit(devices);
        self.machine.reset(&mut self.scheduler);
        self.recorder = Recorder::Idle;
    }

    pub fn current_prompt(&self) -> (usize, &'static str) {
        (self.current_prompt, PRACTICE_PROMPTS[self.current_prompt])
    }

    pub fn prompt_label(&self) -> String {
        format!(
            "Practice question {} of {}",
            self.current_prompt + 1,
            PRACTICE_PROMPTS.len()
        )
    }

    pub fn next_prompt(&mut self) {
        self.current_prompt = (self.current_prompt + 1).min(PRACTICE_PROMPTS.len() - 1);
    }

    pub fn previous_prompt(&mut self) {
        self.current_prompt = self.current_prompt.saturating_sub(1);
    }

    /// Cancels every timer and releases the capture stream if one is open.
    pub fn exit(&mut self, devices: &mut dyn MediaDevices) {
        self.scheduler.cancel_all();
        if matches!(self.recorder, Recorder::Recording { .. }) {
            let recorder = std::mem::replace(&mut self.recorder, Recorder::Idle);
            if let Recorder::Recording { stream, .. } = recorder {
                devices.release(stream);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::{DevicePermissions, SimulatedDevices};

    fn panel() -> VideoPanel {
        VideoPanel::new(Duration::from_secs(3), 300)
    }

    #[test]
    fn test_record_analyze_cycle() {
        let mut devices = SimulatedDevices::new(DevicePermissions::default());
        let mut panel = panel();
        panel.start_recording(&mut devices).unwrap();
        assert_eq!(panel.stage(), VideoStage::Recording);
        assert_eq!(devices.open_streams(), 1);

        panel.advance(Duration::from_millis(4500), &mut devices);
        assert_eq!(panel.recording_elapsed(), Some(4));

        panel.stop_recording(&mut devices);
        assert_eq!(panel.stage(), VideoStage::Recorded);
        assert_eq!(devices.open_streams(), 0);
        assert_eq!(panel.source(), Some(&VideoSource::Recording { duration_s: 4 }));

        panel.analyze().unwrap();
        assert_eq!(panel.stage(), VideoStage::Analyzing);
        panel.advance(Duration::from_secs(3), &mut devices);
        assert_eq!(panel.stage(), VideoStage::Result);
        assert_eq!(panel.report().unwrap().overall_score, 81);
    }

    #[test]
    fn test_recording_stops_at_cap() {
        let mut devices = SimulatedDevices::new(DevicePermissions::default());
        let mut panel = VideoPanel::new(Duration::from_secs(3), 5);
        panel.start_recording(&mut devices).unwrap();

        panel.advance(Duration::from_secs(60), &mut devices);
        assert_eq!(panel.stage(), VideoStage::Recorded);
        assert_eq!(panel.source(), Some(&VideoSource::Recording { duration_s: 5 }));
        assert_eq!(devices.open_streams(), 0);
    }

    #[test]
    fn test_permission_denied_stays_idle() {
        let mut devices = SimulatedDevices::new(DevicePermissions {
            camera: false,
            microphone: true,
        });
        let mut panel = panel();
        assert!(matches!(
            panel.start_recording(&mut devices),
            Err(PrepVistaError::PermissionDenied { .. })
        ));
        assert_eq!(panel.stage(), VideoStage::Idle);
        assert!(panel.last_error().unwrap().contains("camera"));
    }

    #[test]
    fn test_upload_path() {
        let mut panel = panel();
        let pdf = SelectedFile::new("notes.pdf", Some("application/pdf"), 10);
        assert!(panel.upload(pdf).is_err());
        assert_eq!(panel.stage(), VideoStage::Idle);

        let clip = SelectedFile::new("answer.mp4", Some("video/mp4"), 10);
        panel.upload(clip).unwrap();
        assert_eq!(panel.stage(), VideoStage::Recorded);

        panel.discard_take();
        assert_eq!(panel.stage(), VideoStage::Idle);
    }

    #[test]
    fn test_prompt_label_counts_every_prompt() {
        let mut panel = panel();
        assert_eq!(panel.prompt_label(), "Practice question 1 of 5");
        for _ in 0..PRACTICE_PROMPTS.len() {
            panel.next_prompt();
        }
        assert_eq!(
            panel.prompt_label(),
            format!("Practice question {0} of {0}", PRACTICE_PROMPTS.len())
        );
    }

    #[test]
    fn test_analyze_requires_take() {
        let mut panel = panel();
        assert!(panel.analyze().is_err());
        assert_eq!(panel.stage(), VideoStage::Idle);
    }

    #[test]
    fn test_exit_while_recording_releases_stream() {
        let mut devices = SimulatedDevices::new(DevicePermissions::default());
        let mut panel = panel();
        panel.start_recording(&mut devices).unwrap();
        panel.exit(&mut devices);
        assert_eq!(devices.open_streams(), 0);

        panel.advance(Duration::from_secs(10), &mut devices);
        assert_eq!(panel.recording_elapsed(), None);
    }

    #[test]
    fn test_prompt_navigation_is_bounded() {
        let mut panel = panel();
        panel.previous_prompt();
        assert_eq!(panel.current_prompt().0, 0);
        for _ in 0..10 {
            panel.next_prompt();
        }
        assert_eq!(panel.current_prompt().0, PRACTICE_PROMPTS.len() - 1);
    }
}
