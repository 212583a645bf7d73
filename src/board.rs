use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DreamError, Result};
use crate::models::{Category, Dream, Goal, JournalEntry};

/// In-memory collection of dreams, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    dreams: Vec<Dream>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed() -> Result<Self> {
        let dreams = vec![
            Dream {
                id: Uuid::parse_str("6f1c2a7e-3b9d-4c51-9a0e-5d8b7f2e41c3")
                    .map_err(|e| DreamError::InvalidInput(e.to_string()))?,
                title: "Solo Trip ke Switzerland".to_string(),
                category: Category::Travel,
                goal: Goal {
                    start_date: ymd(2024, 1, 1)?,
                    target_date: ymd(2025, 12, 31)?,
                    progress: 25,
                    logs: vec![
                        JournalEntry {
                            date: ymd(2024, 1, 15)?,
                            text: "Bikin paspor elektronik selesai. Antri panjang tapi worth it."
                                .to_string(),
                        },
                        JournalEntry {
                            date: ymd(2024, 3, 1)?,
                            text: "Cek harga tiket, masih mahal banget. Harus nabung lebih keras. Agak stress liat harganya.".to_string(),
                        },
                    ],
                },
            },
            Dream {
                id: Uuid::parse_str("a2d4e8f0-1c3b-4e6a-8f9d-0b2c4e6a8d1f")
                    .map_err(|e| DreamError::InvalidInput(e.to_string()))?,
                title: "Upgrade Setup Gaming".to_string(),
                category: Category::Asset,
                goal: Goal {
                    start_date: ymd(2024, 6, 1)?,
                    target_date: ymd(2024, 9, 1)?,
                    progress: 85,
                    logs: vec![
                        JournalEntry {
                            date: ymd(2024, 6, 10)?,
                            text: "Beli monitor 144hz, akhirnya! Happy banget.".to_string(),
                        },
                        JournalEntry {
                            date: ymd(2024, 7, 20)?,
                            text: "Keyboard mechanical custom udah dateng. Tinggal VGA.".to_string(),
                        },
                    ],
                },
            },
        ];
        Ok(Self { dreams })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let mut board: Board = serde_json::from_str(&raw)?;
        for dream in board.dreams.iter_mut() {
            let clamped = clamp_progress(dream.goal.progress);
            if clamped != dream.goal.progress {
                tracing::warn!(id = %dream.id, progress = dream.goal.progress, "clamping progress");
                dream.goal.progress = clamped;
            }
        }
        tracing::debug!(path = %path.display(), dreams = board.len(), "loaded board");
        Ok(board)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn len(&self) -> usize {
        self.dreams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dreams.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dream> {
        self.dreams.iter()
    }

    pub fn get(&self, id: Uuid) -> Result<&Dream> {
        self.dreams
            .iter()
            .find(|dream| dream.id == id)
            .ok_or(DreamError::NotFound(id))
    }

    fn get_mut(&mut self, id: Uuid) -> Result<&mut Dream> {
        self.dreams
            .iter_mut()
            .find(|dream| dream.id == id)
            .ok_or(DreamError::NotFound(id))
    }

    /// Starts a new dream today with no progress and an empty journal.
    pub fn add(
        &mut self,
        title: &str,
        category: Category,
        target_date: NaiveDate,
        today: NaiveDate,
    ) -> Result<Uuid> {
        let title = title.trim();
        if title.is_empty() {
            return Err(DreamError::InvalidInput("title must not be empty".to_string()));
        }
        let id = Uuid::new_v4();
        self.dreams.push(Dream {
            id,
            title: title.to_string(),
            category,
            goal: Goal {
                start_date: today,
                target_date,
                progress: 0,
                logs: Vec::new(),
            },
        });
        tracing::info!(%id, title, "added dream");
        Ok(id)
    }

    pub fn update_progress(&mut self, id: Uuid, value: i32) -> Result<i32> {
        let dream = self.get_mut(id)?;
        dream.goal.progress = clamp_progress(value);
        tracing::debug!(%id, progress = dream.goal.progress, "updated progress");
        Ok(dream.goal.progress)
    }

    /// Newest entries go first. Blank text is ignored and reported as `false`.
    pub fn add_log(&mut self, id: Uuid, date: NaiveDate, text: &str) -> Result<bool> {
        let dream = self.get_mut(id)?;
        if text.trim().is_empty() {
            return Ok(false);
        }
        dream.goal.logs.insert(
            0,
            JournalEntry {
                date,
                text: text.to_string(),
            },
        );
        Ok(true)
    }

    pub fn remove(&mut self, id: Uuid) -> Result<Dream> {
        let index = self
            .dreams
            .iter()
            .position(|dream| dream.id == id)
            .ok_or(DreamError::NotFound(id))?;
        let dream = self.dreams.remove(index);
        tracing::info!(%id, title = %dream.title, "removed dream");
        Ok(dream)
    }

    /// Reads `dream_id,date,text` rows and prepends each to its dream's journal in
    /// file order. Returns (imported, skipped); rows for unknown dreams are skipped.
    pub fn import_journal(&mut self, csv_path: &Path) -> Result<(usize, usize)> {
        #[derive(Deserialize)]
        struct CsvRow {
            dream_id: Uuid,
            date: NaiveDate,
            text: String,
        }

        let mut reader = csv::Reader::from_path(csv_path)?;
        let mut imported = 0usize;
        let mut skipped = 0usize;

        for result in reader.deserialize::<CsvRow>() {
            let row = result?;
            match self.add_log(row.dream_id, row.date, &row.text) {
                Ok(true) => imported += 1,
                Ok(false) => skipped += 1,
                Err(DreamError::NotFound(id)) => {
                    tracing::warn!(%id, "skipping journal row for unknown dream");
                    skipped += 1;
                }
                Err(other) => return Err(other),
            }
        }

        tracing::info!(imported, skipped, path = %csv_path.display(), "imported journal");
        Ok((imported, skipped))
    }
}

pub fn clamp_progress(value: i32) -> i32 {
    value.clamp(0, 100)
}

fn ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| DreamError::InvalidInput(format!("invalid date {year}-{month}-{day}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn scratch_file(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{name}", Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn seed_contains_sample_dreams() {
        let board = Board::seed().unwrap();
        assert_eq!(board.len(), 2);
        let titles: Vec<&str> = board.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles, ["Solo Trip ke Switzerland", "Upgrade Setup Gaming"]);
    }

    #[test]
    fn new_dream_starts_today_at_zero() {
        let mut board = Board::new();
        let id = board
            .add("Belajar piano", Category::Personal, date(2025, 6, 1), date(2025, 1, 1))
            .unwrap();
        let dream = board.get(id).unwrap();
        assert_eq!(dream.goal.start_date, date(2025, 1, 1));
        assert_eq!(dream.goal.progress, 0);
        assert!(dream.goal.logs.is_empty());
    }

    #[test]
    fn blank_title_is_rejected() {
        let mut board = Board::new();
        let result = board.add("   ", Category::Career, date(2025, 6, 1), date(2025, 1, 1));
        assert!(matches!(result, Err(DreamError::InvalidInput(_))));
        assert!(board.is_empty());
    }

    #[test]
    fn progress_is_clamped() {
        let mut board = Board::seed().unwrap();
        let id = board.iter().next().unwrap().id;
        assert_eq!(board.update_progress(id, 140).unwrap(), 100);
        assert_eq!(board.update_progress(id, -5).unwrap(), 0);
        assert_eq!(board.update_progress(id, 42).unwrap(), 42);
    }

    #[test]
    fn logs_are_prepended_and_blank_ones_ignored() {
        let mut board = Board::seed().unwrap();
        let id = board.iter().next().unwrap().id;
        assert!(board.add_log(id, date(2024, 4, 1), "Nabung lancar").unwrap());
        assert!(!board.add_log(id, date(2024, 4, 2), "  ").unwrap());
        let logs = &board.get(id).unwrap().goal.logs;
        assert_eq!(logs.len(), 3);
        assert_eq!(logs[0].text, "Nabung lancar");
    }

    #[test]
    fn unknown_dream_is_not_found() {
        let mut board = Board::seed().unwrap();
        let missing = Uuid::new_v4();
        assert!(matches!(board.get(missing), Err(DreamError::NotFound(_))));
        assert!(matches!(
            board.update_progress(missing, 10),
            Err(DreamError::NotFound(_))
        ));
        assert!(matches!(board.remove(missing), Err(DreamError::NotFound(_))));
    }

    #[test]
    fn remove_drops_dream() {
        let mut board = Board::seed().unwrap();
        let id = board.iter().next().unwrap().id;
        let removed = board.remove(id).unwrap();
        assert_eq!(removed.title, "Solo Trip ke Switzerland");
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn board_survives_json_exchange_and_clamps_on_load() {
        let mut board = Board::seed().unwrap();
        let id = board.iter().next().unwrap().id;
        let json = board.to_json().unwrap().replace("\"progress\": 25", "\"progress\": 250");
        let path = scratch_file("board.json", &json);

        let loaded = Board::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded.get(id).unwrap().goal.progress, 100);

        board.update_progress(id, 100).unwrap();
        assert_eq!(loaded, board);
    }

    #[test]
    fn journal_import_skips_unknown_dreams() {
        let mut board = Board::seed().unwrap();
        let id = board.iter().next().unwrap().id;
        let csv = format!(
            "dream_id,date,text\n{id},2024-04-01,Gaji masuk\n{id},2024-04-02,Akhirnya dapat promo\n{},2024-04-03,Nyasar\n",
            Uuid::new_v4()
        );
        let path = scratch_file("journal.csv", &csv);

        let (imported, skipped) = board.import_journal(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!((imported, skipped), (2, 1));
        let logs = &board.get(id).unwrap().goal.logs;
        assert_eq!(logs[0].text, "Akhirnya dapat promo");
        assert_eq!(logs[1].text, "Gaji masuk");
    }
}
