use crate::infra::{InMemoryCheckinRepository, InMemorySignalSink};
use crate::routes::summarize_history;
use chrono::{TimeZone, Utc};
use clap::Args;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use vitality::checkin::{
    catalog, map_answers_to_signals, stamp_signals, write_signals_csv, AnswerValue,
    CapturedSignal, CheckinAnswers, CheckinHistoryImporter, CheckinService, LifestyleScorer,
    Pillar, ScoreResult, UserId,
};
use vitality::error::AppError;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Answer in question_id=value form; repeat for each answered question
    #[arg(long = "answer", value_parser = parse_answer)]
    pub(crate) answers: Vec<(String, AnswerValue)>,
}

#[derive(Args, Debug)]
pub(crate) struct HistoryArgs {
    /// CSV export with checkin_date,question_id,value columns
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Write the stamped signals for every imported day to this CSV file
    #[arg(long)]
    pub(crate) export_signals: Option<PathBuf>,
}

pub(crate) fn parse_answer(raw: &str) -> Result<(String, AnswerValue), String> {
    let (question_id, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected question_id=value, got '{raw}'"))?;
    let question_id = question_id.trim();
    if question_id.is_empty() || value.trim().is_empty() {
        return Err(format!("expected question_id=value, got '{raw}'"));
    }
    Ok((question_id.to_string(), AnswerValue::parse(value)))
}

pub(crate) fn run_questions() {
    println!("Daily check-in questions");
    for question in catalog::questions() {
        println!(
            "\n{}. {} [{}] -> signal {}",
            question.order,
            question.prompt,
            question.pillar.label(),
            question.signal_id
        );
        for option in question.options {
            let impact = option
                .impact
                .map(|impact| format!("{impact:?}").to_lowercase())
                .unwrap_or_else(|| "unscored".to_string());
            println!(
                "   - {} = {} ({impact})",
                option.label,
                option.value.to_answer()
            );
        }
    }
}

pub(crate) fn run_score(args: ScoreArgs) {
    let answers: CheckinAnswers = args.answers.into_iter().collect();
    let scorer = LifestyleScorer::default();
    let result = scorer.score(&answers);
    render_result(&answers, &result);
    println!("\n{}", scorer.message_for(&result));
}

fn render_result(answers: &CheckinAnswers, result: &ScoreResult) {
    println!(
        "Lifestyle score: {} ({}) from {} answer(s)",
        result.score,
        result.band().label(),
        answers.len()
    );
    println!("Pillar breakdown");
    for pillar in Pillar::SCORED {
        println!("- {}: {:+}", pillar.label(), result.pillar_points(pillar));
    }
    if result.insights.is_empty() {
        println!("Insights: none");
    } else {
        println!("Insights");
        for insight in &result.insights {
            println!("- {insight}");
        }
    }
}

pub(crate) fn run_history(args: HistoryArgs) -> Result<(), AppError> {
    let HistoryArgs {
        csv,
        export_signals,
    } = args;

    let history = CheckinHistoryImporter::from_path(&csv)?;
    let report = summarize_history(&history);

    println!("Check-in history from {}", csv.display());
    for day in &report.days {
        println!(
            "- {}: score {} ({}), {} answer(s)",
            day.date,
            day.score,
            day.band.label(),
            day.answered
        );
    }

    match &report.latest_trend {
        Some(trend) => {
            println!(
                "\nLatest change: {} ({:+} points, {} improving, {} declining)",
                trend.overall().label(),
                trend.score_delta,
                trend.improving,
                trend.declining
            );
            for signal in &trend.trends {
                println!(
                    "- {}: {} -> {} ({})",
                    signal.signal_id,
                    signal.previous,
                    signal.current,
                    signal.direction.label()
                );
            }
        }
        None => println!("\nLatest change: need at least two days to compare"),
    }

    if let Some(path) = export_signals {
        let mut stamped: Vec<CapturedSignal> = Vec::new();
        for entry in &history {
            let Some(midnight) = entry.date.and_hms_opt(0, 0, 0) else {
                continue;
            };
            let captured_at = Utc.from_utc_datetime(&midnight);
            stamped.extend(stamp_signals(
                map_answers_to_signals(&entry.answers),
                captured_at,
            ));
        }
        write_signals_csv(&stamped, File::create(&path)?)?;
        println!("\nWrote {} signal(s) to {}", stamped.len(), path.display());
    }

    Ok(())
}

fn demo_day(meal: &str, activity: &str, sleep: i64, stress: &str) -> CheckinAnswers {
    CheckinAnswers::new()
        .with("general_wellbeing", "okay")
        .with("meal_quality", meal)
        .with("physical_activity", activity)
        .with("sleep_duration", sleep)
        .with("stress_level", stress)
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    let repository = Arc::new(InMemoryCheckinRepository::default());
    let sink = Arc::new(InMemorySignalSink::default());
    let service = CheckinService::new(repository, sink.clone(), LifestyleScorer::default());
    let user = UserId("demo-user".to_string());

    let sessions = [
        (1, demo_day("unhealthy", "none", 5, "stressed")),
        (2, demo_day("healthy", "moderate", 7, "manageable")),
    ];

    println!("Daily check-in demo");
    for (day, answers) in sessions {
        let Some(completed_at) = Utc.with_ymd_and_hms(2025, 3, day, 21, 0, 0).single() else {
            continue;
        };
        let record = service.complete(user.clone(), answers, completed_at)?;
        println!("\nDay {day} ({})", record.checkin_id.0);
        render_result(&record.answers, &record.result);
        println!("Message: {}", record.message);
    }

    let summary = service.trends(&user)?;
    println!(
        "\nTrend: {} ({:+} points)",
        summary.overall().label(),
        summary.score_delta
    );
    for trend in &summary.trends {
        println!(
            "- {}: {} -> {} ({})",
            trend.question_id,
            trend.previous,
            trend.current,
            trend.direction.label()
        );
    }

    println!("\nCaptured signals");
    for signal in sink.captured() {
        println!(
            "- {} = {} [{} @ {}]",
            signal.signal_id,
            signal.value,
            signal.source,
            signal.captured_at.to_rfc3339()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_and_categorical_answers() {
        assert_eq!(
            parse_answer("sleep_duration=7").expect("parses"),
            ("sleep_duration".to_string(), AnswerValue::Numeric(7))
        );
        assert_eq!(
            parse_answer("meal_quality = healthy").expect("parses"),
            (
                "meal_quality".to_string(),
                AnswerValue::Categorical("healthy".to_string())
            )
        );
    }

    #[test]
    fn rejects_answers_without_separator() {
        assert!(parse_answer("meal_quality").is_err());
        assert!(parse_answer("=healthy").is_err());
    }

    #[test]
    fn demo_runs_end_to_end() {
        run_demo().expect("demo completes");
    }

    #[test]
    fn history_command_reports_and_exports_from_one_import() {
        let dir = std::env::temp_dir().join(format!("vitality-history-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir");
        let csv = dir.join("history.csv");
        let export = dir.join("signals.csv");
        std::fs::write(
            &csv,
            "checkin_date,question_id,value\n\
             2025-05-01,meal_quality,unhealthy\n\
             2025-05-01,sleep_duration,5\n\
             2025-05-02,meal_quality,healthy\n",
        )
        .expect("history written");

        run_history(HistoryArgs {
            csv: csv.clone(),
            export_signals: Some(export.clone()),
        })
        .expect("history runs");

        let exported = std::fs::read_to_string(&export).expect("export written");
        let lines: Vec<&str> = exported.lines().collect();
        assert_eq!(lines[0], "signal_id,value,source,captured_at");
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("diet_quality,unhealthy,daily_checkin,2025-05-01T00:00:00"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
