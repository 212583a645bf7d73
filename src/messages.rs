//! Indonesian message table for insights.

use chrono::{Datelike, NaiveDate};

use crate::models::InsightStatus;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

const STRESS_NOTE: &str = " AI juga mendeteksi kamu agak stress di jurnal. Jangan lupa istirahat, mimpi ini untuk kebahagiaanmu, bukan beban.";
const ENERGY_NOTE: &str =
    " Energi positif di jurnalmu sangat bagus, ini akan mempercepat manifestasi!";

/// Short `id-ID` date, e.g. `15 Jan 2025`.
pub fn format_date(date: NaiveDate) -> String {
    format!("{} {} {}", date.day(), MONTHS[date.month0() as usize], date.year())
}

pub fn base_message(
    status: InsightStatus,
    velocity: f64,
    required_velocity: f64,
    predicted: Option<NaiveDate>,
) -> String {
    match status {
        InsightStatus::Overdue => "Target waktu sudah terlewat. AI menyarankan untuk 'Reschedule' tanggal targetmu agar psikologis tidak terbebani rasa bersalah.".to_string(),
        InsightStatus::Completed => {
            "Sempurna! Kamu sudah mencapai garis finish. Saatnya membuat mimpi baru.".to_string()
        }
        InsightStatus::NeedsBoost => {
            let finish = predicted
                .map(format_date)
                .unwrap_or_else(|| "waktu yang sangat lama".to_string());
            format!(
                "Kecepatanmu ({velocity:.2}%/hari) jauh di bawah kebutuhan ({required_velocity:.2}%/hari). Di kecepatan ini, kamu baru akan selesai pada {finish}. Coba breakdown target menjadi lebih kecil."
            )
        }
        InsightStatus::OnFire => {
            let finish = predicted.map(format_date).unwrap_or_default();
            format!(
                "Luar biasa! Di kecepatan ini, kamu diprediksi selesai pada {finish}, lebih cepat dari deadline. Pertahankan momentum ini!"
            )
        }
        InsightStatus::OnTrack => "Kamu berada di jalur yang benar. Konsistensi adalah kunci. Jangan lupa update progress sekecil apapun.".to_string(),
    }
}

/// Note appended for a clearly stressed or clearly upbeat journal.
pub fn sentiment_note(score: i64) -> Option<&'static str> {
    match score {
        s if s < -1 => Some(STRESS_NOTE),
        s if s > 1 => Some(ENERGY_NOTE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_use_indonesian_short_months() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 17).unwrap();
        assert_eq!(format_date(date), "17 Agu 2025");
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(format_date(date), "1 Mei 2024");
    }

    #[test]
    fn boost_message_without_prediction_says_very_long() {
        let message = base_message(InsightStatus::NeedsBoost, 0.0, 100.0, None);
        assert!(message.contains("(0.00%/hari)"));
        assert!(message.contains("(100.00%/hari)"));
        assert!(message.contains("waktu yang sangat lama"));
    }

    #[test]
    fn notes_only_outside_neutral_band() {
        assert_eq!(sentiment_note(-2), Some(STRESS_NOTE));
        assert_eq!(sentiment_note(-1), None);
        assert_eq!(sentiment_note(0), None);
        assert_eq!(sentiment_note(1), None);
        assert_eq!(sentiment_note(2), Some(ENERGY_NOTE));
    }
}
