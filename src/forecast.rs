use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use crate::messages;
use crate::models::{Goal, Insight, InsightStatus};
use crate::sentiment::Lexicon;

const MS_PER_DAY: i64 = 86_400_000;

/// Required rate once the deadline is reached or passed.
pub const EXHAUSTED_REQUIRED_VELOCITY: f64 = 100.0;

/// A dream is flagged for a boost when it moves slower than this share of the
/// required rate.
pub const BOOST_RATIO: f64 = 0.5;

/// Raw timeline figures the status rules are evaluated against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub total_days: i64,
    pub days_passed: i64,
    pub days_left: i64,
    pub progress: i32,
    pub velocity: f64,
    pub required_velocity: f64,
}

type Rule = (InsightStatus, fn(&Metrics) -> bool);

/// Evaluated top to bottom; the first matching rule decides the status.
const RULES: [Rule; 5] = [
    (InsightStatus::Overdue, |m: &Metrics| m.days_left < 0 && m.progress < 100),
    (InsightStatus::Completed, |m: &Metrics| m.progress >= 100),
    (InsightStatus::NeedsBoost, |m: &Metrics| {
        m.velocity < m.required_velocity * BOOST_RATIO
    }),
    (InsightStatus::OnFire, |m: &Metrics| m.velocity >= m.required_velocity),
    (InsightStatus::OnTrack, |_: &Metrics| true),
];

pub fn analyze(goal: &Goal, now: NaiveDateTime, lexicon: &Lexicon) -> Insight {
    let metrics = measure(goal, now);
    let predicted_completion = predict_completion(metrics.progress, metrics.velocity, now);
    let sentiment_score = lexicon.score(&goal.logs);
    let status = classify(&metrics);

    let mut message = messages::base_message(
        status,
        metrics.velocity,
        metrics.required_velocity,
        predicted_completion,
    );
    if let Some(note) = messages::sentiment_note(sentiment_score) {
        message.push_str(note);
    }

    Insight {
        status,
        tone: status.tone(),
        message,
        velocity: metrics.velocity,
        required_velocity: metrics.required_velocity,
        predicted_completion,
        sentiment_score,
    }
}

pub fn measure(goal: &Goal, now: NaiveDateTime) -> Metrics {
    let start = midnight(goal.start_date);
    let target = midnight(goal.target_date);

    let days_passed = days_between(start, now);
    let days_left = days_between(now, target);
    let progress = f64::from(goal.progress);

    let velocity = if days_passed > 0 {
        progress / days_passed as f64
    } else {
        0.0
    };
    let required_velocity = if days_left > 0 {
        (100.0 - progress) / days_left as f64
    } else {
        EXHAUSTED_REQUIRED_VELOCITY
    };

    Metrics {
        total_days: days_between(start, target),
        days_passed,
        days_left,
        progress: goal.progress,
        velocity,
        required_velocity,
    }
}

pub fn classify(metrics: &Metrics) -> InsightStatus {
    RULES
        .iter()
        .find(|(_, applies)| applies(metrics))
        .map(|(status, _)| *status)
        .unwrap_or(InsightStatus::OnTrack)
}

/// Whole days from `from` to `to`, rounding partial days toward `to`'s side.
pub fn days_between(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    let ms = (to - from).num_milliseconds();
    let days = ms.div_euclid(MS_PER_DAY);
    if ms.rem_euclid(MS_PER_DAY) == 0 {
        days
    } else {
        days + 1
    }
}

/// Date the dream reaches 100% at the current velocity. Partial days round
/// down, so overshot progress (above 100) lands on the earlier calendar day.
pub fn predict_completion(progress: i32, velocity: f64, now: NaiveDateTime) -> Option<NaiveDate> {
    if velocity <= 0.0 {
        return None;
    }
    let days_needed = (100.0 - f64::from(progress)) / velocity;
    if !days_needed.is_finite() {
        return None;
    }
    // Out-of-range spans yield no prediction instead of an invalid date.
    let delta = TimeDelta::try_days(days_needed.floor() as i64)?;
    now.checked_add_signed(delta).map(|at| at.date())
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(chrono::NaiveTime::MIN)
}
