use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use vitality::checkin::{
    CapturedSignal, CheckinId, CheckinRecord, CheckinRepository, RepositoryError, SignalSink,
    SignalSinkError, UserId,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCheckinRepository {
    records: Arc<Mutex<HashMap<CheckinId, CheckinRecord>>>,
}

fn poisoned<T>(_: T) -> RepositoryError {
    RepositoryError::Unavailable("check-in store lock poisoned".to_string())
}

impl CheckinRepository for InMemoryCheckinRepository {
    fn insert(&self, record: CheckinRecord) -> Result<CheckinRecord, RepositoryError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        if guard.contains_key(&record.checkin_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.checkin_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &CheckinId) -> Result<Option<CheckinRecord>, RepositoryError> {
        let guard = self.records.lock().map_err(poisoned)?;
        Ok(guard.get(id).cloned())
    }

    fn recent(&self, user: &UserId, limit: usize) -> Result<Vec<CheckinRecord>, RepositoryError> {
        let guard = self.records.lock().map_err(poisoned)?;
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
pub(crate) struct InMemorySignalSink {
    signals: Arc<Mutex<Vec<(UserId, CapturedSignal)>>>,
}

impl SignalSink for InMemorySignalSink {
    fn capture(&self, user: &UserId, signals: Vec<CapturedSignal>) -> Result<(), SignalSinkError> {
        let mut guard = self
            .signals
            .lock()
            .map_err(|_| SignalSinkError::Transport("signal buffer lock poisoned".to_string()))?;
        guard.extend(signals.into_iter().map(|signal| (user.clone(), signal)));
        Ok(())
    }
}

impl InMemorySignalSink {
    pub(crate) fn captured(&self) -> Vec<CapturedSignal> {
        self.signals
            .lock()
            .map(|guard| guard.iter().map(|(_, signal)| signal.clone()).collect())
            .unwrap_or_default()
    }
}
