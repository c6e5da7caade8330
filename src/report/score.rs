/// Quality band derived from the service's 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    OptimizationsRecommended,
    NeedsRefactor,
    Critical,
}

impl ScoreBand {
    /// Every color class a band can apply. Exactly one is active at a time.
    pub const CLASSES: [&'static str; 4] = [
        "score-excellent",
        "score-good",
        "score-fair",
        "score-critical",
    ];

    /// Lower bounds are inclusive: 90 is excellent, 89 is not.
    pub fn classify(score: u8) -> Self {
        match score {
            90.. => ScoreBand::Excellent,
            70..=89 => ScoreBand::OptimizationsRecommended,
            50..=69 => ScoreBand::NeedsRefactor,
            _ => ScoreBand::Critical,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent code!",
            ScoreBand::OptimizationsRecommended => "Optimizations recommended",
            ScoreBand::NeedsRefactor => "Needs refactoring",
            ScoreBand::Critical => "Critical problems detected",
        }
    }

    pub fn color_class(self) -> &'static str {
        match self {
            ScoreBand::Excellent => Self::CLASSES[0],
            ScoreBand::OptimizationsRecommended => Self::CLASSES[1],
            ScoreBand::NeedsRefactor => Self::CLASSES[2],
            ScoreBand::Critical => Self::CLASSES[3],
        }
    }
}

/// Score as displayed in the gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreView {
    pub value: u8,
    pub band: ScoreBand,
}

impl ScoreView {
    /// A missing score counts as 0. Out-of-range values are clamped.
    pub fn from_raw(raw: Option<f64>) -> Self {
        let value = raw
            .filter(|v| v.is_finite())
            .map(|v| v.round().clamp(0.0, 100.0) as u8)
            .unwrap_or(0);
        Self {
            value,
            band: ScoreBand::classify(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries_are_inclusive() {
        assert_eq!(ScoreBand::classify(100), ScoreBand::Excellent);
        assert_eq!(ScoreBand::classify(90), ScoreBand::Excellent);
        assert_eq!(ScoreBand::classify(89), ScoreBand::OptimizationsRecommended);
        assert_eq!(ScoreBand::classify(70), ScoreBand::OptimizationsRecommended);
        assert_eq!(ScoreBand::classify(69), ScoreBand::NeedsRefactor);
        assert_eq!(ScoreBand::classify(50), ScoreBand::NeedsRefactor);
        assert_eq!(ScoreBand::classify(49), ScoreBand::Critical);
        assert_eq!(ScoreBand::classify(0), ScoreBand::Critical);
    }

    #[test]
    fn test_each_band_has_its_own_class() {
        let bands = [
            ScoreBand::Excellent,
            ScoreBand::OptimizationsRecommended,
            ScoreBand::NeedsRefactor,
            ScoreBand::Critical,
        ];
        let mut classes: Vec<_> = bands.iter().map(|b| b.color_class()).collect();
        classes.dedup();
        assert_eq!(classes.len(), 4);
    }

    #[test]
    fn test_missing_score_is_zero() {
        let view = ScoreView::from_raw(None);
        assert_eq!(view.value, 0);
        assert_eq!(view.band, ScoreBand::Critical);
    }

    #[test]
    fn test_out_of_range_score_is_clamped() {
        assert_eq!(ScoreView::from_raw(Some(140.0)).value, 100);
        assert_eq!(ScoreView::from_raw(Some(-3.0)).value, 0);
        assert_eq!(ScoreView::from_raw(Some(f64::NAN)).value, 0);
        assert_eq!(ScoreView::from_raw(Some(89.6)).band, ScoreBand::Excellent);
    }
}
