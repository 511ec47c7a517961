use std::io::Write;

use chrono::{DateTime, Utc};

use super::catalog;
use super::domain::{
    CapturedSignal, CheckinAnswers, CheckinQuestion, SignalRecord, CHECKIN_SIGNAL_SOURCE,
};

/// Maps answers onto signal records in catalog order.
pub fn map_answers_to_signals(answers: &CheckinAnswers) -> Vec<SignalRecord> {
    map_with_catalog(catalog::questions(), answers)
}

pub(crate) fn map_with_catalog(
    questions: &[CheckinQuestion],
    answers: &CheckinAnswers,
) -> Vec<SignalRecord> {
    let mut ordered: Vec<&CheckinQuestion> = questions.iter().collect();
    ordered.sort_by_key(|question| question.order);

    ordered
        .into_iter()
        .filter_map(|question| {
            answers.get(question.id).map(|value| SignalRecord {
                signal_id: question.signal_id.to_string(),
                value: value.clone(),
                source: CHECKIN_SIGNAL_SOURCE.to_string(),
            })
        })
        .collect()
}

/// Stamps every record with the caller-supplied capture time.
pub fn stamp_signals(records: Vec<SignalRecord>, captured_at: DateTime<Utc>) -> Vec<CapturedSignal> {
    records
        .into_iter()
        .map(|record| record.captured_at(captured_at))
        .collect()
}

/// Writes captured signals as CSV with a `signal_id,value,source,captured_at` header.
pub fn write_signals_csv<W: Write>(signals: &[CapturedSignal], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["signal_id", "value", "source", "captured_at"])?;
    for signal in signals {
        let value = signal.value.to_string();
        let captured_at = signal.captured_at.to_rfc3339();
        csv_writer.write_record([
            signal.signal_id.as_str(),
            value.as_str(),
            signal.source.as_str(),
            captured_at.as_str(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}
