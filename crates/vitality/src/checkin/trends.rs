use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::catalog;
use super::domain::{AnswerValue, CheckinAnswers, CheckinQuestion, Impact, Pillar};

/// Direction of change for a signal between two check-ins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improving,
    Stable,
    Declining,
}

impl TrendDirection {
    fn from_ordering(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Greater => TrendDirection::Improving,
            Ordering::Equal => TrendDirection::Stable,
            Ordering::Less => TrendDirection::Declining,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            TrendDirection::Improving => "improving",
            TrendDirection::Stable => "stable",
            TrendDirection::Declining => "declining",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalTrend {
    pub question_id: String,
    pub signal_id: String,
    pub pillar: Pillar,
    pub previous: AnswerValue,
    pub current: AnswerValue,
    pub delta: i64,
    pub direction: TrendDirection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub previous_score: u8,
    pub current_score: u8,
    pub score_delta: i16,
    pub improving: usize,
    pub declining: usize,
    pub trends: Vec<SignalTrend>,
}

impl TrendSummary {
    pub fn new(previous_score: u8, current_score: u8, trends: Vec<SignalTrend>) -> Self {
        let improving = trends
            .iter()
            .filter(|trend| trend.direction == TrendDirection::Improving)
            .count();
        let declining = trends
            .iter()
            .filter(|trend| trend.direction == TrendDirection::Declining)
            .count();

        Self {
            previous_score,
            current_score,
            score_delta: i16::from(current_score) - i16::from(previous_score),
            improving,
            declining,
            trends,
        }
    }

    pub fn overall(&self) -> TrendDirection {
        TrendDirection::from_ordering(self.score_delta.cmp(&0))
    }
}

/// Ordinal rank of an answer: impact when the option carries one, else list position.
fn ordinal(question: &CheckinQuestion, answer: &AnswerValue) -> Option<i64> {
    let position = question.option_position(answer)?;
    let rank = match question.options[position].impact {
        Some(Impact::Positive) => 2,
        Some(Impact::Neutral) => 1,
        Some(Impact::Negative) => 0,
        // first listed option is the best one
        None => (question.options.len() - 1 - position) as i64,
    };
    Some(rank)
}

fn trend_for(
    question: &CheckinQuestion,
    previous: &AnswerValue,
    current: &AnswerValue,
) -> Option<SignalTrend> {
    let previous_rank = ordinal(question, previous);
    let current_rank = ordinal(question, current);
    let numeric = previous.as_numeric().zip(current.as_numeric());

    let (delta, direction) = match (previous_rank, current_rank, numeric) {
        (Some(before), Some(after), Some((from, to))) => (
            to.saturating_sub(from),
            TrendDirection::from_ordering(after.cmp(&before)),
        ),
        (Some(before), Some(after), None) => {
            (after - before, TrendDirection::from_ordering(after.cmp(&before)))
        }
        // off-catalog numbers: compare the raw values, the delta saturates
        (_, _, Some((from, to))) => (
            to.saturating_sub(from),
            TrendDirection::from_ordering(to.cmp(&from)),
        ),
        _ => return None,
    };

    Some(SignalTrend {
        question_id: question.id.to_string(),
        signal_id: question.signal_id.to_string(),
        pillar: question.pillar,
        previous: previous.clone(),
        current: current.clone(),
        delta,
        direction,
    })
}

/// Compares catalog questions answered in both check-ins, in catalog order.
pub fn compare_checkins(previous: &CheckinAnswers, current: &CheckinAnswers) -> Vec<SignalTrend> {
    catalog::questions()
        .iter()
        .filter_map(|question| {
            let before = previous.get(question.id)?;
            let after = current.get(question.id)?;
            trend_for(question, before, after)
        })
        .collect()
}
