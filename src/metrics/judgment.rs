use std::time::Duration;

const EXCELLENT_BELOW: Duration = Duration::from_millis(200);
const FAIR_BELOW: Duration = Duration::from_millis(500);

/// Qualitative bucket for an average latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatencyJudgment {
    Excellent,
    Fair,
    Slow,
}

impl LatencyJudgment {
    #[must_use]
    pub fn classify(average: Duration) -> Self {
        if average < EXCELLENT_BELOW {
            LatencyJudgment::Excellent
        } else if average < FAIR_BELOW {
            LatencyJudgment::Fair
        } else {
            LatencyJudgment::Slow
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            LatencyJudgment::Excellent => "excellent",
            LatencyJudgment::Fair => "fair",
            LatencyJudgment::Slow => "slow",
        }
    }
}
