use std::collections::BTreeMap;
use std::fmt::Write;

use chrono::NaiveDateTime;

use crate::board::Board;
use crate::forecast;
use crate::messages::format_date;
use crate::models::{Dream, Insight, InsightStatus};
use crate::sentiment::Lexicon;

pub fn summarize_by_status(insights: &[(&Dream, Insight)]) -> Vec<(InsightStatus, usize)> {
    let mut map: BTreeMap<InsightStatus, usize> = BTreeMap::new();
    for (_, insight) in insights {
        *map.entry(insight.status).or_insert(0) += 1;
    }

    let mut summaries: Vec<(InsightStatus, usize)> = map.into_iter().collect();
    summaries.sort_by(|a, b| b.1.cmp(&a.1));
    summaries
}

pub fn build_report(board: &Board, now: NaiveDateTime, lexicon: &Lexicon) -> String {
    let insights: Vec<(&Dream, Insight)> = board
        .iter()
        .map(|dream| (dream, forecast::analyze(&dream.goal, now, lexicon)))
        .collect();
    let summaries = summarize_by_status(&insights);

    let mut output = String::new();

    let _ = writeln!(output, "# DreamScape Forecast Report");
    let _ = writeln!(
        output,
        "Generated on {} for {} dreams",
        format_date(now.date()),
        board.len()
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Status Mix");

    if summaries.is_empty() {
        let _ = writeln!(output, "No dreams on the board yet.");
    } else {
        for (status, count) in summaries.iter() {
            let _ = writeln!(output, "- {}: {} dreams", status.label(), count);
        }
    }

    for (dream, insight) in insights.iter() {
        let _ = writeln!(output);
        let _ = writeln!(output, "## {} ({})", dream.title, dream.category);
        let _ = writeln!(
            output,
            "- Progress {}% toward {}",
            dream.goal.progress,
            format_date(dream.goal.target_date)
        );
        let _ = writeln!(
            output,
            "- Status {} ({:?}), velocity {:.2}%/day vs required {:.2}%/day",
            insight.status.label(),
            insight.tone,
            insight.velocity,
            insight.required_velocity
        );
        match insight.predicted_completion {
            Some(date) => {
                let _ = writeln!(output, "- Predicted completion {}", format_date(date));
            }
            None => {
                let _ = writeln!(output, "- No completion forecast yet");
            }
        }
        let _ = writeln!(output, "- {}", insight.message);
    }

    output
}
