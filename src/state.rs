//! UI state for the reviewer page.
//!
//! `ReviewState` is the single owner of the language selection, the live
//! detection indicator and the submission phase. Components hold it in an
//! `RwSignal` and change it only through these methods.

use tracing::{debug, info, warn};

use crate::api::AnalyzeRequest;
use crate::error::ClientError;
use crate::language::{LanguageSelection, LanguageTag};
use crate::report::ReportView;
use crate::sniffer;

/// Submission phase. Errors are transient and land back in `Empty`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AnalysisPhase {
    /// Nothing analyzed yet, or cleared.
    #[default]
    Empty,
    /// Request in flight
    Loading,
    /// Last analysis succeeded
    Results(Box<ReportView>),
}

/// Live detection indicator under the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetectionFeedback {
    #[default]
    None,
    Detected(LanguageTag),
    Unidentified,
}

/// Snapshot sent to the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Sequence number; a result is only accepted for the latest one.
    pub id: u64,
    pub code: String,
    pub language: LanguageSelection,
}

impl Submission {
    pub fn request(&self) -> AnalyzeRequest {
        AnalyzeRequest {
            code: self.code.clone(),
            language: self.language,
        }
    }
}

/// How the submitted language was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The user picked it.
    Manual,
    /// Auto mode, sniffed at submit time.
    Detected(LanguageTag),
    /// Auto mode and the sniffer gave up; the service decides.
    Unresolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejected {
    EmptySample,
    InFlight,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReviewState {
    selection: LanguageSelection,
    detection: DetectionFeedback,
    phase: AnalysisPhase,
    /// Id of the most recent submission. Survives `clear`.
    last_submission: u64,
}

impl ReviewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> LanguageSelection {
        self.selection
    }

    pub fn detection(&self) -> DetectionFeedback {
        self.detection
    }

    pub fn phase(&self) -> &AnalysisPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == AnalysisPhase::Loading
    }

    pub fn report(&self) -> Option<&ReportView> {
        match &self.phase {
            AnalysisPhase::Results(report) => Some(report),
            _ => None,
        }
    }

    /// Language the editor should highlight right now.
    pub fn effective_language(&self) -> Option<LanguageTag> {
        match (self.selection, self.detection) {
            (LanguageSelection::Tag(tag), _) => Some(tag),
            (LanguageSelection::Auto, DetectionFeedback::Detected(tag)) => Some(tag),
            _ => None,
        }
    }

    /// Switch language mode. Clears the detection indicator either way.
    pub fn select(&mut self, selection: LanguageSelection) {
        info!("Language selection: {}", selection.as_str());
        self.selection = selection;
        self.detection = DetectionFeedback::None;
    }

    /// Whether typing should (re)schedule a detection pass.
    pub fn should_auto_detect(&self, sample: &str) -> bool {
        self.selection == LanguageSelection::Auto && sniffer::is_detectable(sample)
    }

    /// Store a detection result. Ignored once the user picked a language,
    /// since a timer may fire after a manual selection.
    pub fn record_detection(&mut self, detected: Option<LanguageTag>) -> bool {
        if self.selection != LanguageSelection::Auto {
            debug!("Dropping detection result, manual language selected");
            return false;
        }
        self.detection = match detected {
            Some(tag) => DetectionFeedback::Detected(tag),
            None => DetectionFeedback::Unidentified,
        };
        true
    }

    /// Empty/Results → Loading. Resolves auto mode on the submitted snapshot.
    pub fn begin_submission(
        &mut self,
        sample: &str,
    ) -> Result<(Submission, Resolution), SubmitRejected> {
        if self.is_loading() {
            return Err(SubmitRejected::InFlight);
        }
        let code = sample.trim();
        if code.is_empty() {
            return Err(SubmitRejected::EmptySample);
        }

        let (language, resolution) = match self.selection {
            LanguageSelection::Tag(tag) => (LanguageSelection::Tag(tag), Resolution::Manual),
            LanguageSelection::Auto => match sniffer::detect(code) {
                Some(tag) => (LanguageSelection::Tag(tag), Resolution::Detected(tag)),
                None => (LanguageSelection::Auto, Resolution::Unresolved),
            },
        };

        self.last_submission += 1;
        self.phase = AnalysisPhase::Loading;
        Ok((
            Submission {
                id: self.last_submission,
                code: code.to_string(),
                language,
            },
            resolution,
        ))
    }

    /// Loading → Results on success, Loading → Empty on failure. A result for
    /// anything but the latest submission (e.g. one sent before a clear) is
    /// dropped.
    pub fn finish_submission(
        &mut self,
        id: u64,
        outcome: Result<ReportView, ClientError>,
    ) -> Result<(), ClientError> {
        if !self.is_loading() || id != self.last_submission {
            warn!("Dropping analysis result for submission {}, not pending", id);
            return Ok(());
        }
        match outcome {
            Ok(report) => {
                self.phase = AnalysisPhase::Results(Box::new(report));
                Ok(())
            }
            Err(e) => {
                self.phase = AnalysisPhase::Empty;
                Err(e)
            }
        }
    }

    /// Back to a blank page in auto mode. Any in-flight result is orphaned.
    pub fn clear(&mut self) {
        *self = Self {
            last_submission: self.last_submission,
            ..Self::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PYTHON_SAMPLE: &str = "def total(xs):\n    if not xs:\n        return 0\n    elif len(xs) == 1:\n        return xs[0]\n";

    #[test]
    fn test_empty_sample_is_rejected() {
        let mut state = ReviewState::new();
        assert_eq!(state.begin_submission("  \n\t"), Err(SubmitRejected::EmptySample));
        assert_eq!(state.phase(), &AnalysisPhase::Empty);
    }

    #[test]
    fn test_second_submission_rejected_while_loading() {
        let mut state = ReviewState::new();
        assert!(state.begin_submission("print(1)").is_ok());
        assert!(state.is_loading());
        assert_eq!(state.begin_submission("print(2)"), Err(SubmitRejected::InFlight));
    }

    #[test]
    fn test_auto_mode_resolves_at_submit() {
        let mut state = ReviewState::new();
        let (submission, resolution) = state.begin_submission(PYTHON_SAMPLE).unwrap();
        assert_eq!(submission.language, LanguageSelection::Tag(LanguageTag::Python));
        assert_eq!(resolution, Resolution::Detected(LanguageTag::Python));
        assert_eq!(submission.code, PYTHON_SAMPLE.trim());
    }

    #[test]
    fn test_unresolved_auto_is_sent_as_auto() {
        let mut state = ReviewState::new();
        let (submission, resolution) = state.begin_submission("print(1)").unwrap();
        assert_eq!(submission.language, LanguageSelection::Auto);
        assert_eq!(resolution, Resolution::Unresolved);
        assert_eq!(
            serde_json::to_value(submission.request()).unwrap()["language"],
            "auto"
        );
    }

    #[test]
    fn test_manual_selection_wins_over_detection() {
        let mut state = ReviewState::new();
        state.select(LanguageSelection::Tag(LanguageTag::Delphi));
        let (submission, resolution) = state.begin_submission(PYTHON_SAMPLE).unwrap();
        assert_eq!(submission.language, LanguageSelection::Tag(LanguageTag::Delphi));
        assert_eq!(resolution, Resolution::Manual);
    }

    #[test]
    fn test_manual_selection_suppresses_auto_detection() {
        let mut state = ReviewState::new();
        assert!(state.should_auto_detect(PYTHON_SAMPLE));
        state.select(LanguageSelection::Tag(LanguageTag::Java));
        assert!(!state.should_auto_detect(PYTHON_SAMPLE));
        assert!(!state.record_detection(Some(LanguageTag::Python)));
        assert_eq!(state.detection(), DetectionFeedback::None);
        assert_eq!(state.effective_language(), Some(LanguageTag::Java));

        state.select(LanguageSelection::Auto);
        assert!(state.should_auto_detect(PYTHON_SAMPLE));
    }

    #[test]
    fn test_short_sample_never_auto_detects() {
        let state = ReviewState::new();
        assert!(!state.should_auto_detect("def f():\n    elif x: pass"));
    }

    #[test]
    fn test_detection_feedback() {
        let mut state = ReviewState::new();
        assert!(state.record_detection(None));
        assert_eq!(state.detection(), DetectionFeedback::Unidentified);
        assert_eq!(state.effective_language(), None);
        assert!(state.record_detection(Some(LanguageTag::Sql)));
        assert_eq!(state.effective_language(), Some(LanguageTag::Sql));
    }

    #[test]
    fn test_failure_returns_to_empty_and_allows_resubmit() {
        let mut state = ReviewState::new();
        let (submission, _) = state.begin_submission("print(1)").unwrap();
        let err = state
            .finish_submission(submission.id, Err(ClientError::Status(500)))
            .unwrap_err();
        assert_eq!(err, ClientError::Status(500));
        assert_eq!(state.phase(), &AnalysisPhase::Empty);
        assert!(state.begin_submission("print(1)").is_ok());
    }

    #[test]
    fn test_result_after_clear_is_dropped() {
        let mut state = ReviewState::new();
        let (submission, _) = state.begin_submission("print(1)").unwrap();
        state.clear();
        assert!(state
            .finish_submission(submission.id, Err(ClientError::Status(500)))
            .is_ok());
        assert_eq!(state.phase(), &AnalysisPhase::Empty);
    }

    #[test]
    fn test_stale_result_after_clear_and_resubmit_is_dropped() {
        let mut state = ReviewState::new();
        let (first, _) = state.begin_submission("SELECT a FROM b WHERE c = 1").unwrap();
        state.clear();
        let (second, _) = state.begin_submission(PYTHON_SAMPLE).unwrap();
        assert_ne!(first.id, second.id);

        // first response arrives while the second is pending
        assert!(state
            .finish_submission(first.id, Err(ClientError::Status(500)))
            .is_ok());
        assert!(state.is_loading(), "Second submission must stay pending");

        let err = state
            .finish_submission(second.id, Err(ClientError::Status(502)))
            .unwrap_err();
        assert_eq!(err, ClientError::Status(502));
        assert_eq!(state.phase(), &AnalysisPhase::Empty);
    }

    #[test]
    fn test_selection_changes_leave_phase_untouched() {
        let mut state = ReviewState::new();
        let (submission, _) = state.begin_submission("print(1)").unwrap();
        let before = state.phase().clone();
        state.record_detection(Some(LanguageTag::Python));
        state.select(LanguageSelection::Tag(LanguageTag::Java));
        assert_eq!(state.phase(), &before);
        assert_eq!(submission.id, 1);
    }

    #[test]
    fn test_clear_resets_selection() {
        let mut state = ReviewState::new();
        state.select(LanguageSelection::Tag(LanguageTag::Sql));
        state.clear();
        assert_eq!(state.selection(), LanguageSelection::Auto);
        assert_eq!(state.detection(), DetectionFeedback::None);
    }
}
