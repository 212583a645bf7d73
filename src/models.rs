use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub date: NaiveDate,
    pub text: String,
}

/// Timeline, progress and journal of a single dream. Journal is newest-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub start_date: NaiveDate,
    pub target_date: NaiveDate,
    pub progress: i32,
    #[serde(default)]
    pub logs: Vec<JournalEntry>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Personal,
    Travel,
    Career,
    Asset,
    Experience,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Category::Personal => "Personal",
            Category::Travel => "Travel",
            Category::Career => "Career",
            Category::Asset => "Asset",
            Category::Experience => "Experience",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dream {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub category: Category,
    #[serde(flatten)]
    pub goal: Goal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InsightStatus {
    Overdue,
    Completed,
    NeedsBoost,
    OnFire,
    OnTrack,
}

impl InsightStatus {
    pub fn tone(self) -> InsightTone {
        match self {
            InsightStatus::Overdue => InsightTone::Critical,
            InsightStatus::Completed | InsightStatus::OnFire => InsightTone::Success,
            InsightStatus::NeedsBoost => InsightTone::Warning,
            InsightStatus::OnTrack => InsightTone::Neutral,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InsightStatus::Overdue => "Overdue",
            InsightStatus::Completed => "Completed",
            InsightStatus::NeedsBoost => "Perlu Boost",
            InsightStatus::OnFire => "On Fire",
            InsightStatus::OnTrack => "On Track",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightTone {
    Critical,
    Success,
    Warning,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub status: InsightStatus,
    pub tone: InsightTone,
    pub message: String,
    pub velocity: f64,
    pub required_velocity: f64,
    pub predicted_completion: Option<NaiveDate>,
    pub sentiment_score: i64,
}
