use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{CapturedSignal, CheckinAnswers, CheckinId, UserId};
use super::scoring::{ScoreBand, ScoreResult};

/// Stored result of a completed check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckinRecord {
    pub checkin_id: CheckinId,
    pub user_id: UserId,
    pub completed_at: DateTime<Utc>,
    pub answers: CheckinAnswers,
    pub result: ScoreResult,
    pub message: String,
}

impl CheckinRecord {
    pub fn summary_view(&self) -> CheckinSummaryView {
        CheckinSummaryView {
            checkin_id: self.checkin_id.clone(),
            user_id: self.user_id.clone(),
            completed_at: self.completed_at,
            score: self.result.score,
            band: self.result.band(),
            message: self.message.clone(),
            insights: self.result.insights.clone(),
        }
    }
}

/// Storage abstraction so the service can be exercised without a backend.
pub trait CheckinRepository: Send + Sync {
    fn insert(&self, record: CheckinRecord) -> Result<CheckinRecord, RepositoryError>;
    fn fetch(&self, id: &CheckinId) -> Result<Option<CheckinRecord>, RepositoryError>;
    /// Most recent check-ins for a user, newest first. Equal completion times
    /// order by descending check-in id.
    fn recent(&self, user: &UserId, limit: usize) -> Result<Vec<CheckinRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook for the health-data store that receives captured signals.
pub trait SignalSink: Send + Sync {
    fn capture(&self, user: &UserId, signals: Vec<CapturedSignal>) -> Result<(), SignalSinkError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SignalSinkError {
    #[error("signal capture unavailable: {0}")]
    Transport(String),
}

/// Public representation of a completed check-in.
#[derive(Debug, Clone, Serialize)]
pub struct CheckinSummaryView {
    pub checkin_id: CheckinId,
    pub user_id: UserId,
    pub completed_at: DateTime<Utc>,
    pub score: u8,
    pub band: ScoreBand,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub insights: Vec<String>,
}
