use super::common::*;
use crate::checkin::domain::{AnswerValue, CheckinAnswers, Pillar};
use crate::checkin::{
    calculate_lifestyle_score, generate_lifestyle_message, InsightThresholds, LifestyleScorer,
    ScoreBand,
};

const DIET_ADVISORY: &str = "Try adding more whole foods and water to your meals tomorrow.";
const ACTIVITY_ADVISORY: &str = "A short walk or a few stretch breaks can offset a sedentary day.";
const SLEEP_ADVISORY: &str = "Aim for 7-9 hours of sleep by keeping a consistent bedtime.";
const STRESS_ADVISORY: &str =
    "Consider a few minutes of deep breathing or meditation to ease stress.";

#[test]
fn all_positive_answers_score_one_hundred() {
    let result = calculate_lifestyle_score(&healthy_answers());

    assert_eq!(result.score, 100);
    assert!(result.insights.is_empty());
    for pillar in Pillar::SCORED {
        assert_eq!(result.pillar_points(pillar), 1, "{pillar:?}");
    }
}

#[test]
fn all_negative_answers_skip_stress_advisory_until_net_stress_below_minus_one() {
    let result = calculate_lifestyle_score(&unhealthy_answers());

    assert_eq!(result.score, 0);
    assert_eq!(result.pillar_points(Pillar::Stress), -1);
    // a single negative stress answer stays above the stress threshold
    assert_eq!(
        result.insights,
        vec![DIET_ADVISORY, ACTIVITY_ADVISORY, SLEEP_ADVISORY]
    );
}

#[test]
fn stress_advisory_needs_two_negative_stress_answers() {
    let answers = unhealthy_answers().with("overwhelmed", "often");

    let result = calculate_lifestyle_score(&answers);

    assert_eq!(result.score, 0);
    assert_eq!(result.pillar_points(Pillar::Stress), -2);
    assert_eq!(
        result.insights,
        vec![
            DIET_ADVISORY,
            ACTIVITY_ADVISORY,
            SLEEP_ADVISORY,
            STRESS_ADVISORY
        ]
    );
}

#[test]
fn stress_threshold_is_configurable() {
    let scorer = LifestyleScorer::new(InsightThresholds {
        stress: 0,
        ..InsightThresholds::default()
    });

    let result = scorer.score(&unhealthy_answers());

    assert_eq!(result.insights.len(), 4);
    assert_eq!(result.insights[3], STRESS_ADVISORY);
}

#[test]
fn empty_answers_score_zero_without_insights() {
    let result = calculate_lifestyle_score(&CheckinAnswers::new());

    assert_eq!(result.score, 0);
    assert!(result.insights.is_empty());
    assert!(result.breakdown.values().all(|points| *points == 0));
}

#[test]
fn general_answers_count_toward_denominator_only() {
    let answers = CheckinAnswers::new()
        .with("meal_quality", "healthy")
        .with("general_wellbeing", "great");

    let result = calculate_lifestyle_score(&answers);

    assert_eq!(result.score, 50);
    assert!(!result.breakdown.contains_key(&Pillar::General));
}

#[test]
fn unknown_questions_and_values_contribute_nothing() {
    let answers = CheckinAnswers::new()
        .with("meal_quality", "pizza")
        .with("hydration_mood", "splashy")
        .with("physical_activity", "vigorous");

    let result = calculate_lifestyle_score(&answers);

    assert_eq!(result.pillar_points(Pillar::Diet), 0);
    assert_eq!(result.pillar_points(Pillar::Activity), 1);
    assert_eq!(result.score, 33);
}

#[test]
fn numeric_and_categorical_values_do_not_cross_match() {
    let answers = CheckinAnswers::new().with("sleep_duration", "7");

    let result = calculate_lifestyle_score(&answers);

    assert_eq!(result.pillar_points(Pillar::Sleep), 0);
    assert_eq!(result.score, 0);
}

#[test]
fn score_rounds_to_nearest_integer() {
    let answers = CheckinAnswers::new()
        .with("meal_quality", "healthy")
        .with("physical_activity", "vigorous")
        .with("stress_level", "stressed");

    let result = calculate_lifestyle_score(&answers);

    assert_eq!(result.score, 67);
    assert!(result.insights.is_empty());
}

#[test]
fn neutral_answers_add_no_points() {
    let answers = CheckinAnswers::new().with("sitting_time", "5_to_8");

    let result = calculate_lifestyle_score(&answers);

    assert_eq!(result.score, 0);
    assert_eq!(result.pillar_points(Pillar::Activity), 0);
    assert!(result.insights.is_empty());
}

#[test]
fn scoring_is_repeatable() {
    let answers = unhealthy_answers().with("water_intake", "8_plus");

    assert_eq!(
        calculate_lifestyle_score(&answers),
        calculate_lifestyle_score(&answers)
    );
}

#[test]
fn scores_stay_within_bounds_for_every_single_option() {
    for question in crate::checkin::catalog::questions() {
        for option in question.options {
            let answers = CheckinAnswers::new().with(question.id, option.value.to_answer());
            let score = calculate_lifestyle_score(&answers).score;
            assert!(score == 0 || score == 100, "{} -> {score}", question.id);
        }
    }
}

#[test]
fn message_uses_excellent_band_at_eighty() {
    let answers = healthy_answers().with("energy_level", "high");

    let result = calculate_lifestyle_score(&answers);
    let message = generate_lifestyle_message(&answers);

    assert_eq!(result.score, 80);
    assert_eq!(result.band(), ScoreBand::Excellent);
    assert!(message.starts_with("Excellent"));
}

#[test]
fn message_uses_good_band_at_sixty() {
    let answers = CheckinAnswers::new()
        .with("meal_quality", "healthy")
        .with("physical_activity", "moderate")
        .with("sleep_duration", 7)
        .with("energy_level", "high")
        .with("general_wellbeing", "great");

    assert_eq!(calculate_lifestyle_score(&answers).score, 60);
    assert!(generate_lifestyle_message(&answers).starts_with("Good job"));
}

#[test]
fn fair_message_includes_top_insights() {
    let answers = CheckinAnswers::new()
        .with("meal_quality", "healthy")
        .with("water_intake", "4_or_fewer")
        .with("physical_activity", "vigorous")
        .with("sleep_duration", 4)
        .with("sitting_time", "over_8");

    let result = calculate_lifestyle_score(&answers);
    let message = generate_lifestyle_message(&answers);

    assert_eq!(result.score, 40);
    assert_eq!(result.insights, vec![SLEEP_ADVISORY]);
    assert!(message.starts_with("Fair day"));
    assert!(message.ends_with(SLEEP_ADVISORY));
}

#[test]
fn low_scores_include_every_insight_in_message() {
    let answers = unhealthy_answers().with("overwhelmed", "often");

    let message = generate_lifestyle_message(&answers);

    for advisory in [
        DIET_ADVISORY,
        ACTIVITY_ADVISORY,
        SLEEP_ADVISORY,
        STRESS_ADVISORY,
    ] {
        assert!(message.contains(advisory), "missing {advisory}");
    }
}

#[test]
fn non_integer_json_answers_count_but_never_match() {
    let answers: CheckinAnswers =
        serde_json::from_str(r#"{"meal_quality":"healthy","sleep_duration":7.5}"#)
            .expect("answers parse");

    assert_eq!(
        answers.get("sleep_duration"),
        Some(&AnswerValue::Categorical("7.5".to_string()))
    );
    let result = calculate_lifestyle_score(&answers);
    assert_eq!(result.score, 50);
    assert_eq!(result.pillar_points(Pillar::Sleep), 0);
}

#[test]
fn boolean_and_structured_answers_are_kept_as_text() {
    let answers: CheckinAnswers =
        serde_json::from_str(r#"{"bogus":true,"meal_quality":["healthy"],"stress_level":"relaxed"}"#)
            .expect("answers parse");

    assert_eq!(answers.len(), 3);
    assert_eq!(
        answers.get("bogus"),
        Some(&AnswerValue::Categorical("true".to_string()))
    );
    let result = calculate_lifestyle_score(&answers);
    assert_eq!(result.pillar_points(Pillar::Diet), 0);
    assert_eq!(result.score, 33);
}
