use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use super::domain::{AnswerValue, CheckinAnswers};

#[derive(Debug)]
pub enum HistoryImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidDate { line: u64, value: String },
}

impl std::fmt::Display for HistoryImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryImportError::Io(err) => write!(f, "failed to read check-in history: {}", err),
            HistoryImportError::Csv(err) => write!(f, "invalid check-in history CSV: {}", err),
            HistoryImportError::InvalidDate { line, value } => write!(
                f,
                "line {}: '{}' is not a YYYY-MM-DD check-in date",
                line, value
            ),
        }
    }
}

impl std::error::Error for HistoryImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HistoryImportError::Io(err) => Some(err),
            HistoryImportError::Csv(err) => Some(err),
            HistoryImportError::InvalidDate { .. } => None,
        }
    }
}

impl From<std::io::Error> for HistoryImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for HistoryImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Answers recovered for a single day of an exported history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoricalCheckin {
    pub date: NaiveDate,
    pub answers: CheckinAnswers,
}

#[derive(Debug, Deserialize)]
struct HistoryRow {
    checkin_date: String,
    question_id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    value: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|raw| !raw.trim().is_empty()))
}

/// Reads `checkin_date,question_id,value` exports back into per-day answers.
pub struct CheckinHistoryImporter;

impl CheckinHistoryImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<HistoricalCheckin>, HistoryImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<HistoricalCheckin>, HistoryImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut days: BTreeMap<NaiveDate, CheckinAnswers> = BTreeMap::new();

        for (index, row) in csv_reader.deserialize::<HistoryRow>().enumerate() {
            let row = row?;
            // header occupies line 1
            let line = index as u64 + 2;
            let date = NaiveDate::parse_from_str(&row.checkin_date, "%Y-%m-%d").map_err(|_| {
                HistoryImportError::InvalidDate {
                    line,
                    value: row.checkin_date.clone(),
                }
            })?;

            let Some(raw) = row.value else {
                continue;
            };
            days.entry(date)
                .or_default()
                .set(row.question_id, AnswerValue::parse(&raw));
        }

        tracing::debug!(days = days.len(), "imported check-in history");

        Ok(days
            .into_iter()
            .map(|(date, answers)| HistoricalCheckin { date, answers })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const EXPORT: &str = "checkin_date,question_id,value\n\
        2025-03-02,meal_quality,healthy\n\
        2025-03-01,meal_quality,unhealthy\n\
        2025-03-01,sleep_duration,5\n\
        2025-03-02,sleep_duration, 8 \n\
        2025-03-02,stress_level,\n";

    #[test]
    fn groups_rows_by_day_in_ascending_order() {
        let history =
            CheckinHistoryImporter::from_reader(Cursor::new(EXPORT)).expect("history parses");

        assert_eq!(history.len(), 2);
        assert_eq!(
            history[0].date,
            NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date")
        );
        assert_eq!(
            history[0].answers.get("sleep_duration"),
            Some(&AnswerValue::Numeric(5))
        );
        assert_eq!(
            history[1].answers.get("sleep_duration"),
            Some(&AnswerValue::Numeric(8))
        );
    }

    #[test]
    fn blank_values_are_treated_as_unanswered() {
        let history =
            CheckinHistoryImporter::from_reader(Cursor::new(EXPORT)).expect("history parses");

        assert!(history[1].answers.get("stress_level").is_none());
        assert_eq!(history[1].answers.len(), 2);
    }

    #[test]
    fn rejects_malformed_dates() {
        let export = "checkin_date,question_id,value\n03/01/2025,meal_quality,healthy\n";

        match CheckinHistoryImporter::from_reader(Cursor::new(export)) {
            Err(HistoryImportError::InvalidDate { line, value }) => {
                assert_eq!(line, 2);
                assert_eq!(value, "03/01/2025");
            }
            other => panic!("expected invalid date error, got {other:?}"),
        }
    }
}
