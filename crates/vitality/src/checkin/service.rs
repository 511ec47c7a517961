use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{CheckinAnswers, CheckinId, UserId};
use super::repository::{
    CheckinRecord, CheckinRepository, RepositoryError, SignalSink, SignalSinkError,
};
use super::scoring::{LifestyleScorer, ScoreBand, ScoreResult};
use super::signals::{map_answers_to_signals, stamp_signals};
use super::trends::{compare_checkins, TrendSummary};

/// Service composing the scorer, signal capture, and check-in storage.
pub struct CheckinService<R, S> {
    repository: Arc<R>,
    signals: Arc<S>,
    scorer: Arc<LifestyleScorer>,
    history_limit: usize,
}

static CHECKIN_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_checkin_id() -> CheckinId {
    let id = CHECKIN_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    CheckinId(format!("chk-{id:06}"))
}

/// Score and message computed without persisting anything.
#[derive(Debug, Clone, Serialize)]
pub struct CheckinPreview {
    #[serde(flatten)]
    pub result: ScoreResult,
    pub band: ScoreBand,
    pub message: String,
}

impl<R, S> CheckinService<R, S>
where
    R: CheckinRepository + 'static,
    S: SignalSink + 'static,
{
    pub fn new(repository: Arc<R>, signals: Arc<S>, scorer: LifestyleScorer) -> Self {
        Self {
            repository,
            signals,
            scorer: Arc::new(scorer),
            history_limit: 30,
        }
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.max(2);
        self
    }

    pub fn preview(&self, answers: &CheckinAnswers) -> CheckinPreview {
        let result = self.scorer.score(answers);
        let message = self.scorer.message_for(&result);
        CheckinPreview {
            band: result.band(),
            result,
            message,
        }
    }

    /// Completes a check-in: captures signals, scores, and stores the record.
    pub fn complete(
        &self,
        user_id: UserId,
        answers: CheckinAnswers,
        captured_at: DateTime<Utc>,
    ) -> Result<CheckinRecord, CheckinServiceError> {
        if answers.is_empty() {
            return Err(CheckinServiceError::EmptyCheckin);
        }

        let signals = stamp_signals(map_answers_to_signals(&answers), captured_at);
        let signal_count = signals.len();
        self.signals.capture(&user_id, signals).map_err(|err| {
            tracing::warn!(user_id = %user_id.0, error = %err, "signal capture failed");
            err
        })?;

        let CheckinPreview {
            result, message, ..
        } = self.preview(&answers);

        let record = CheckinRecord {
            checkin_id: next_checkin_id(),
            user_id,
            completed_at: captured_at,
            answers,
            result,
            message,
        };

        let stored = self.repository.insert(record)?;
        tracing::info!(
            checkin_id = %stored.checkin_id.0,
            user_id = %stored.user_id.0,
            score = stored.result.score,
            signal_count,
            "check-in completed"
        );
        Ok(stored)
    }

    pub fn get(&self, checkin_id: &CheckinId) -> Result<CheckinRecord, CheckinServiceError> {
        let record = self
            .repository
            .fetch(checkin_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Recent check-ins for a user, newest first.
    pub fn history(&self, user_id: &UserId) -> Result<Vec<CheckinRecord>, CheckinServiceError> {
        Ok(self.repository.recent(user_id, self.history_limit)?)
    }

    /// Compares the two most recent check-ins of a user.
    pub fn trends(&self, user_id: &UserId) -> Result<TrendSummary, CheckinServiceError> {
        let recent = self.repository.recent(user_id, 2)?;
        let [current, previous, ..] = recent.as_slice() else {
            return Err(CheckinServiceError::InsufficientHistory {
                available: recent.len(),
            });
        };

        let trends = compare_checkins(&previous.answers, &current.answers);
        Ok(TrendSummary::new(
            previous.result.score,
            current.result.score,
            trends,
        ))
    }
}

/// Error raised by the check-in service.
#[derive(Debug, thiserror::Error)]
pub enum CheckinServiceError {
    #[error("check-in has no answers")]
    EmptyCheckin,
    #[error("trend comparison needs two check-ins, found {available}")]
    InsufficientHistory { available: usize },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Signals(#[from] SignalSinkError),
}
