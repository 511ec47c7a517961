use std::collections::BTreeMap;

use super::super::domain::{CheckinAnswers, CheckinQuestion, Impact, Pillar};
use super::config::InsightThresholds;

pub(crate) struct ImpactTally {
    pub positive: u32,
    pub negative: u32,
    pub breakdown: BTreeMap<Pillar, i32>,
}

pub(crate) fn tally_answers(questions: &[CheckinQuestion], answers: &CheckinAnswers) -> ImpactTally {
    let mut breakdown: BTreeMap<Pillar, i32> =
        Pillar::SCORED.iter().map(|pillar| (*pillar, 0)).collect();
    let mut positive = 0;
    let mut negative = 0;

    for question in questions.iter().filter(|question| question.pillar.is_scored()) {
        let Some(answer) = answers.get(question.id) else {
            continue;
        };
        let Some(impact) = question.option_for(answer).and_then(|option| option.impact) else {
            continue;
        };

        *breakdown.entry(question.pillar).or_insert(0) += impact.points();
        match impact {
            Impact::Positive => positive += 1,
            Impact::Negative => negative += 1,
            Impact::Neutral => {}
        }
    }

    ImpactTally {
        positive,
        negative,
        breakdown,
    }
}

/// `round(100 * positive / answered)`, zero when nothing was answered.
pub(crate) fn lifestyle_score(positive: u32, answered: usize) -> u8 {
    if answered == 0 {
        return 0;
    }
    let ratio = f64::from(positive) / answered as f64;
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}

pub(crate) fn pillar_advisory(pillar: Pillar) -> Option<&'static str> {
    match pillar {
        Pillar::Diet => Some(
            "Try adding more whole foods and water to your meals tomorrow.",
        ),
        Pillar::Activity => Some(
            "A short walk or a few stretch breaks can offset a sedentary day.",
        ),
        Pillar::Sleep => Some(
            "Aim for 7-9 hours of sleep by keeping a consistent bedtime.",
        ),
        Pillar::Stress => Some(
            "Consider a few minutes of deep breathing or meditation to ease stress.",
        ),
        Pillar::General => None,
    }
}

pub(crate) fn collect_insights(
    breakdown: &BTreeMap<Pillar, i32>,
    thresholds: &InsightThresholds,
) -> Vec<String> {
    Pillar::SCORED
        .iter()
        .filter(|pillar| {
            let net = breakdown.get(pillar).copied().unwrap_or(0);
            thresholds
                .for_pillar(**pillar)
                .is_some_and(|threshold| net < threshold)
        })
        .filter_map(|pillar| pillar_advisory(*pillar))
        .map(str::to_string)
        .collect()
}
