use serde::{Deserialize, Serialize};

use super::ScoreResult;

/// Score band used to select the completion message template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

impl ScoreBand {
    pub const fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => ScoreBand::Excellent,
            60..=79 => ScoreBand::Good,
            40..=59 => ScoreBand::Fair,
            _ => ScoreBand::NeedsImprovement,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "excellent",
            ScoreBand::Good => "good",
            ScoreBand::Fair => "fair",
            ScoreBand::NeedsImprovement => "needs improvement",
        }
    }

    /// How many insights the band's template includes, `None` meaning all.
    const fn insight_limit(self) -> Option<usize> {
        match self {
            ScoreBand::Excellent => Some(0),
            ScoreBand::Good => Some(1),
            ScoreBand::Fair => Some(2),
            ScoreBand::NeedsImprovement => None,
        }
    }

    const fn headline(self) -> &'static str {
        match self {
            ScoreBand::Excellent => {
                "Excellent work! Your choices today are strongly supporting your health."
            }
            ScoreBand::Good => "Good job today! You're building healthy habits.",
            ScoreBand::Fair => "Fair day. There's room to feel even better tomorrow.",
            ScoreBand::NeedsImprovement => {
                "Today looks like it needs improvement, and small changes add up."
            }
        }
    }
}

pub(crate) fn render_message(result: &ScoreResult) -> String {
    let band = ScoreBand::from_score(result.score);
    let limit = band
        .insight_limit()
        .unwrap_or(result.insights.len())
        .min(result.insights.len());

    let mut message = band.headline().to_string();
    for insight in &result.insights[..limit] {
        message.push(' ');
        message.push_str(insight);
    }
    message
}
