//! Daily lifestyle check-in: question catalog, answer-to-signal mapping,
//! lifestyle scoring with pillar advisories, and completion messages.
//!
//! The scoring pieces are pure functions over the static catalog. The service,
//! repository, and router layers wrap them for persistence and HTTP access.

pub mod catalog;
pub mod domain;
pub mod history;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod signals;
pub mod trends;

#[cfg(test)]
mod tests;

pub use domain::{
    AnswerValue, CapturedSignal, CheckinAnswers, CheckinId, CheckinOption, CheckinQuestion,
    Impact, OptionValue, Pillar, SignalRecord, UserId, CHECKIN_SIGNAL_SOURCE,
};
pub use history::{CheckinHistoryImporter, HistoricalCheckin, HistoryImportError};
pub use repository::{
    CheckinRecord, CheckinRepository, CheckinSummaryView, RepositoryError, SignalSink,
    SignalSinkError,
};
pub use router::{checkin_router, CompleteCheckinRequest};
pub use scoring::{
    calculate_lifestyle_score, generate_lifestyle_message, InsightThresholds, LifestyleScorer,
    ScoreBand, ScoreResult,
};
pub use service::{CheckinPreview, CheckinService, CheckinServiceError};
pub use signals::{map_answers_to_signals, stamp_signals, write_signals_csv};
pub use trends::{compare_checkins, SignalTrend, TrendDirection, TrendSummary};
