use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier wrapper for the account that owns a check-in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Identifier wrapper for a completed check-in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CheckinId(pub String);

/// Lifestyle category used to group questions and score contributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pillar {
    Diet,
    Activity,
    Sleep,
    Stress,
    General,
}

impl Pillar {
    /// Pillars that contribute to the lifestyle score, in insight order.
    pub const SCORED: [Pillar; 4] = [Pillar::Diet, Pillar::Activity, Pillar::Sleep, Pillar::Stress];

    pub const fn label(self) -> &'static str {
        match self {
            Pillar::Diet => "diet",
            Pillar::Activity => "activity",
            Pillar::Sleep => "sleep",
            Pillar::Stress => "stress",
            Pillar::General => "general",
        }
    }

    pub const fn is_scored(self) -> bool {
        !matches!(self, Pillar::General)
    }
}

/// Polarity a selected option contributes toward the lifestyle score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    Positive,
    Neutral,
    Negative,
}

impl Impact {
    pub const fn points(self) -> i32 {
        match self {
            Impact::Positive => 1,
            Impact::Neutral => 0,
            Impact::Negative => -1,
        }
    }
}

/// Static value attached to a catalog option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Numeric(i64),
    Categorical(&'static str),
}

impl OptionValue {
    pub fn to_answer(self) -> AnswerValue {
        match self {
            OptionValue::Numeric(value) => AnswerValue::Numeric(value),
            OptionValue::Categorical(value) => AnswerValue::Categorical(value.to_string()),
        }
    }
}

/// One selectable option of a check-in question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckinOption {
    pub label: &'static str,
    pub value: OptionValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<Impact>,
}

/// Immutable catalog entry describing a single daily check-in question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckinQuestion {
    pub id: &'static str,
    pub order: u16,
    pub signal_id: &'static str,
    pub pillar: Pillar,
    pub prompt: &'static str,
    pub options: &'static [CheckinOption],
}

impl CheckinQuestion {
    /// Finds the option whose value matches the given answer.
    pub fn option_for(&self, answer: &AnswerValue) -> Option<&'static CheckinOption> {
        self.options
            .iter()
            .find(|option| answer.matches(option.value))
    }

    /// Position of the option matching the given answer, if any.
    pub fn option_position(&self, answer: &AnswerValue) -> Option<usize> {
        self.options
            .iter()
            .position(|option| answer.matches(option.value))
    }
}

/// A user-selected answer value.
///
/// Serialized untagged so answers travel as plain JSON numbers or strings.
/// Any other JSON scalar or structure is kept as its text form, which never
/// matches an option.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Numeric(i64),
    Categorical(String),
}

impl AnswerValue {
    pub fn categorical(value: impl Into<String>) -> Self {
        Self::Categorical(value.into())
    }

    /// Parses raw text, treating integers as numeric answers.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<i64>() {
            Ok(value) => Self::Numeric(value),
            Err(_) => Self::Categorical(trimmed.to_string()),
        }
    }

    pub fn matches(&self, option: OptionValue) -> bool {
        match (self, option) {
            (AnswerValue::Numeric(answer), OptionValue::Numeric(value)) => *answer == value,
            (AnswerValue::Categorical(answer), OptionValue::Categorical(value)) => answer == value,
            _ => false,
        }
    }

    pub fn as_numeric(&self) -> Option<i64> {
        match self {
            AnswerValue::Numeric(value) => Some(*value),
            AnswerValue::Categorical(_) => None,
        }
    }
}

impl<'de> Deserialize<'de> for AnswerValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(match raw {
            serde_json::Value::String(value) => Self::Categorical(value),
            serde_json::Value::Number(number) => match number.as_i64() {
                Some(value) => Self::Numeric(value),
                None => Self::Categorical(number.to_string()),
            },
            other => Self::Categorical(other.to_string()),
        })
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Numeric(value) => write!(f, "{value}"),
            AnswerValue::Categorical(value) => f.write_str(value),
        }
    }
}

impl From<i64> for AnswerValue {
    fn from(value: i64) -> Self {
        Self::Numeric(value)
    }
}

impl From<i32> for AnswerValue {
    fn from(value: i32) -> Self {
        Self::Numeric(i64::from(value))
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        Self::Categorical(value.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        Self::Categorical(value)
    }
}

/// Answers gathered during one check-in session, keyed by question id.
///
/// Any subset of the catalog may be present and unknown ids are kept; they
/// count toward the answered total but contribute nothing else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CheckinAnswers(BTreeMap<String, AnswerValue>);

impl CheckinAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, question_id: impl Into<String>, value: impl Into<AnswerValue>) {
        self.0.insert(question_id.into(), value.into());
    }

    pub fn with(mut self, question_id: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        self.set(question_id, value);
        self
    }

    pub fn clear(&mut self, question_id: &str) -> Option<AnswerValue> {
        self.0.remove(question_id)
    }

    pub fn get(&self, question_id: &str) -> Option<&AnswerValue> {
        self.0.get(question_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl<K, V> FromIterator<(K, V)> for CheckinAnswers
where
    K: Into<String>,
    V: Into<AnswerValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut answers = Self::new();
        for (key, value) in iter {
            answers.set(key, value);
        }
        answers
    }
}

impl<'de> Deserialize<'de> for CheckinAnswers {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // null marks an unanswered question
        let raw = BTreeMap::<String, Option<AnswerValue>>::deserialize(deserializer)?;
        Ok(Self(
            raw.into_iter()
                .filter_map(|(key, value)| value.map(|value| (key, value)))
                .collect(),
        ))
    }
}

/// Source tag attached to every signal produced by the daily check-in.
pub const CHECKIN_SIGNAL_SOURCE: &str = "daily_checkin";

/// Normalized observation produced from a single answered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalRecord {
    pub signal_id: String,
    pub value: AnswerValue,
    pub source: String,
}

impl SignalRecord {
    pub fn captured_at(self, captured_at: DateTime<Utc>) -> CapturedSignal {
        CapturedSignal {
            signal_id: self.signal_id,
            value: self.value,
            source: self.source,
            captured_at,
        }
    }
}

/// Signal stamped with the capture time, ready for the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedSignal {
    pub signal_id: String,
    pub value: AnswerValue,
    pub source: String,
    pub captured_at: DateTime<Utc>,
}
