use super::domain::{CheckinOption, CheckinQuestion, Impact, OptionValue, Pillar};

const fn option(label: &'static str, value: &'static str, impact: Option<Impact>) -> CheckinOption {
    CheckinOption {
        label,
        value: OptionValue::Categorical(value),
        impact,
    }
}

const fn numeric(label: &'static str, value: i64, impact: Option<Impact>) -> CheckinOption {
    CheckinOption {
        label,
        value: OptionValue::Numeric(value),
        impact,
    }
}

const POSITIVE: Option<Impact> = Some(Impact::Positive);
const NEUTRAL: Option<Impact> = Some(Impact::Neutral);
const NEGATIVE: Option<Impact> = Some(Impact::Negative);

static QUESTIONS: [CheckinQuestion; 11] = [
    CheckinQuestion {
        id: "general_wellbeing",
        order: 1,
        signal_id: "wellbeing_rating",
        pillar: Pillar::General,
        prompt: "How are you feeling overall today?",
        options: &[
            option("Great", "great", None),
            option("Good", "good", None),
            option("Okay", "okay", None),
            option("Not great", "poor", None),
        ],
    },
    CheckinQuestion {
        id: "energy_level",
        order: 2,
        signal_id: "energy_level",
        pillar: Pillar::General,
        prompt: "How would you rate your energy today?",
        options: &[
            option("High", "high", None),
            option("Moderate", "moderate", None),
            option("Low", "low", None),
        ],
    },
    CheckinQuestion {
        id: "meal_quality",
        order: 3,
        signal_id: "diet_quality",
        pillar: Pillar::Diet,
        prompt: "How would you describe your meals today?",
        options: &[
            option("Mostly whole foods", "healthy", POSITIVE),
            option("A balanced mix", "balanced", NEUTRAL),
            option("Mostly processed or fast food", "unhealthy", NEGATIVE),
        ],
    },
    CheckinQuestion {
        id: "water_intake",
        order: 4,
        signal_id: "water_glasses",
        pillar: Pillar::Diet,
        prompt: "How many glasses of water did you drink?",
        options: &[
            option("8 or more", "8_plus", POSITIVE),
            option("5 to 7", "5_to_7", NEUTRAL),
            option("4 or fewer", "4_or_fewer", NEGATIVE),
        ],
    },
    CheckinQuestion {
        id: "late_snacking",
        order: 5,
        signal_id: "late_night_eating",
        pillar: Pillar::Diet,
        prompt: "Did you eat within two hours of bedtime?",
        options: &[
            option("No", "no", POSITIVE),
            option("A light snack", "light", NEUTRAL),
            option("A full meal", "heavy", NEGATIVE),
        ],
    },
    CheckinQuestion {
        id: "physical_activity",
        order: 6,
        signal_id: "exercise_intensity",
        pillar: Pillar::Activity,
        prompt: "How active were you today?",
        options: &[
            option("Vigorous workout", "vigorous", POSITIVE),
            option("Moderate activity", "moderate", POSITIVE),
            option("Light movement", "light", NEUTRAL),
            option("No exercise", "none", NEGATIVE),
        ],
    },
    CheckinQuestion {
        id: "sitting_time",
        order: 7,
        signal_id: "sedentary_hours",
        pillar: Pillar::Activity,
        prompt: "How many hours did you spend sitting?",
        options: &[
            option("Less than 5 hours", "under_5", POSITIVE),
            option("5-8 hours", "5_to_8", NEUTRAL),
            option("More than 8 hours", "over_8", NEGATIVE),
        ],
    },
    CheckinQuestion {
        id: "sleep_duration",
        order: 8,
        signal_id: "sleep_hours",
        pillar: Pillar::Sleep,
        prompt: "How many hours did you sleep last night?",
        options: &[
            numeric("8 or more", 8, POSITIVE),
            numeric("7", 7, POSITIVE),
            numeric("6", 6, NEUTRAL),
            numeric("5", 5, NEGATIVE),
            numeric("4 or fewer", 4, NEGATIVE),
        ],
    },
    CheckinQuestion {
        id: "sleep_quality",
        order: 9,
        signal_id: "sleep_quality",
        pillar: Pillar::Sleep,
        prompt: "How well did you sleep?",
        options: &[
            option("Restful", "restful", POSITIVE),
            option("Fair", "fair", NEUTRAL),
            option("Restless", "restless", NEGATIVE),
        ],
    },
    CheckinQuestion {
        id: "stress_level",
        order: 10,
        signal_id: "stress_level",
        pillar: Pillar::Stress,
        prompt: "How stressed do you feel today?",
        options: &[
            option("Relaxed", "relaxed", POSITIVE),
            option("Manageable", "manageable", NEUTRAL),
            option("Stressed", "stressed", NEGATIVE),
            option("Very stressed", "very_stressed", NEGATIVE),
        ],
    },
    CheckinQuestion {
        id: "overwhelmed",
        order: 11,
        signal_id: "overwhelm_frequency",
        pillar: Pillar::Stress,
        prompt: "How often did you feel overwhelmed today?",
        options: &[
            option("Not at all", "never", POSITIVE),
            option("Once or twice", "sometimes", NEUTRAL),
            option("Most of the day", "often", NEGATIVE),
        ],
    },
];

/// Daily check-in questions in presentation order.
pub fn questions() -> &'static [CheckinQuestion] {
    &QUESTIONS
}

pub fn question(id: &str) -> Option<&'static CheckinQuestion> {
    QUESTIONS.iter().find(|question| question.id == id)
}

pub fn questions_for(pillar: Pillar) -> impl Iterator<Item = &'static CheckinQuestion> {
    QUESTIONS
        .iter()
        .filter(move |question| question.pillar == pillar)
}
