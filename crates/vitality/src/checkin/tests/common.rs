use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::checkin::domain::{CapturedSignal, CheckinAnswers, CheckinId, UserId};
use crate::checkin::repository::{
    CheckinRecord, CheckinRepository, RepositoryError, SignalSink, SignalSinkError,
};
use crate::checkin::{checkin_router, CheckinService, LifestyleScorer};

pub(super) fn healthy_answers() -> CheckinAnswers {
    CheckinAnswers::new()
        .with("meal_quality", "healthy")
        .with("physical_activity", "moderate")
        .with("sleep_duration", 7)
        .with("stress_level", "relaxed")
}

pub(super) fn unhealthy_answers() -> CheckinAnswers {
    CheckinAnswers::new()
        .with("meal_quality", "unhealthy")
        .with("physical_activity", "none")
        .with("sleep_duration", 4)
        .with("stress_level", "very_stressed")
}

pub(super) fn user() -> UserId {
    UserId("user-42".to_string())
}

pub(super) fn day(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, day, 21, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn build_service() -> (
    CheckinService<MemoryRepository, MemorySignals>,
    Arc<MemoryRepository>,
    Arc<MemorySignals>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let signals = Arc::new(MemorySignals::default());
    let service = CheckinService::new(
        repository.clone(),
        signals.clone(),
        LifestyleScorer::default(),
    );
    (service, repository, signals)
}

pub(super) fn router_with_service(
    service: CheckinService<MemoryRepository, MemorySignals>,
) -> axum::Router {
    checkin_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<CheckinId, CheckinRecord>>>,
}

impl CheckinRepository for MemoryRepository {
    fn insert(&self, record: CheckinRecord) -> Result<CheckinRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.checkin_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.checkin_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &CheckinId) -> Result<Option<CheckinRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn recent(&self, user: &UserId, limit: usize) -> Result<Vec<CheckinRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<CheckinRecord> = guard
            .values()
            .filter(|record| &record.user_id == user)
            .cloned()
            .collect();
        records.sort_by(|a, b| {
            b.completed_at
                .cmp(&a.completed_at)
                .then_with(|| b.checkin_id.cmp(&a.checkin_id))
        });
        records.truncate(limit);
        Ok(records)
    }
}

#[derive(Default, Clone)]
pub(super) struct MemorySignals {
    captured: Arc<Mutex<Vec<(UserId, CapturedSignal)>>>,
}

impl MemorySignals {
    pub(super) fn captured(&self) -> Vec<(UserId, CapturedSignal)> {
        self.captured.lock().expect("signal mutex poisoned").clone()
    }
}

impl SignalSink for MemorySignals {
    fn capture(&self, user: &UserId, signals: Vec<CapturedSignal>) -> Result<(), SignalSinkError> {
        let mut guard = self.captured.lock().expect("signal mutex poisoned");
        guard.extend(signals.into_iter().map(|signal| (user.clone(), signal)));
        Ok(())
    }
}

pub(super) struct OfflineSignals;

impl SignalSink for OfflineSignals {
    fn capture(&self, _user: &UserId, _signals: Vec<CapturedSignal>) -> Result<(), SignalSinkError> {
        Err(SignalSinkError::Transport("health store offline".to_string()))
    }
}

pub(super) struct ConflictRepository;

impl CheckinRepository for ConflictRepository {
    fn insert(&self, _record: CheckinRecord) -> Result<CheckinRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(&self, _id: &CheckinId) -> Result<Option<CheckinRecord>, RepositoryError> {
        Ok(None)
    }

    fn recent(&self, _user: &UserId, _limit: usize) -> Result<Vec<CheckinRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl CheckinRepository for UnavailableRepository {
    fn insert(&self, _record: CheckinRecord) -> Result<CheckinRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &CheckinId) -> Result<Option<CheckinRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn recent(&self, _user: &UserId, _limit: usize) -> Result<Vec<CheckinRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
