mod config;
mod message;
mod rules;

pub use config::InsightThresholds;
pub use message::ScoreBand;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::catalog;
use super::domain::{CheckinAnswers, CheckinQuestion, Pillar};

/// Lifestyle score with the per-pillar breakdown and advisories behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u8,
    pub breakdown: BTreeMap<Pillar, i32>,
    pub insights: Vec<String>,
}

impl ScoreResult {
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score)
    }

    pub fn pillar_points(&self, pillar: Pillar) -> i32 {
        self.breakdown.get(&pillar).copied().unwrap_or(0)
    }
}

/// Stateless scorer over a question catalog.
///
/// Unknown question ids and unknown option values contribute nothing; scoring
/// never fails.
#[derive(Debug, Clone)]
pub struct LifestyleScorer {
    questions: &'static [CheckinQuestion],
    thresholds: InsightThresholds,
}

impl Default for LifestyleScorer {
    fn default() -> Self {
        Self::new(InsightThresholds::default())
    }
}

impl LifestyleScorer {
    pub fn new(thresholds: InsightThresholds) -> Self {
        Self::with_catalog(catalog::questions(), thresholds)
    }

    pub fn with_catalog(questions: &'static [CheckinQuestion], thresholds: InsightThresholds) -> Self {
        Self {
            questions,
            thresholds,
        }
    }

    pub fn thresholds(&self) -> &InsightThresholds {
        &self.thresholds
    }

    pub fn score(&self, answers: &CheckinAnswers) -> ScoreResult {
        let tally = rules::tally_answers(self.questions, answers);
        // the denominator counts every answered key, general pillar included
        let score = rules::lifestyle_score(tally.positive, answers.len());
        let insights = rules::collect_insights(&tally.breakdown, &self.thresholds);

        tracing::debug!(
            score,
            positive = tally.positive,
            negative = tally.negative,
            answered = answers.len(),
            "scored check-in answers"
        );

        ScoreResult {
            score,
            breakdown: tally.breakdown,
            insights,
        }
    }

    pub fn message(&self, answers: &CheckinAnswers) -> String {
        message::render_message(&self.score(answers))
    }

    pub fn message_for(&self, result: &ScoreResult) -> String {
        message::render_message(result)
    }
}

/// Scores answers against the built-in catalog with default thresholds.
pub fn calculate_lifestyle_score(answers: &CheckinAnswers) -> ScoreResult {
    LifestyleScorer::default().score(answers)
}

/// Builds the completion message for answers using the built-in catalog.
pub fn generate_lifestyle_message(answers: &CheckinAnswers) -> String {
    LifestyleScorer::default().message(answers)
}
