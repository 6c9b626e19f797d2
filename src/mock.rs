//! Демонстрационные данные рекламных площадок.

use crate::types::Record;
use chrono::{Days, NaiveDate};
use rand::Rng;
use rand::seq::SliceRandom;

const BRANDS: [&str; 3] = ["Acme", "Acme Home", "Acme Kids"];
const DEVICES: [&str; 3] = ["MOBILE", "DESKTOP", "APP"];
const DAYS: u64 = 60;

/// Площадка, имитацию которой нужно построить.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockSource {
    /// Meta Ads.
    Meta,
    /// Google Ads.
    Google,
    /// TikTok Ads.
    TikTok,
}

impl MockSource {
    /// Короткое имя источника.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Meta => "meta",
            Self::Google => "google",
            Self::TikTok => "tiktok",
        }
    }

    const fn channels(self) -> &'static [&'static str] {
        match self {
            Self::Meta => &["meta"],
            Self::Google => &["google_ads"],
            Self::TikTok => &["tiktok"],
        }
    }
}

/// Генерирует записи за 60 дней до `today` включительно.
///
/// # Пример
///
/// ```
/// # use campaign_insight::{mock, MockSource};
/// # use rand::SeedableRng;
/// let today = chrono::NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let rows = mock::generate(MockSource::Google, today, &mut rng);
/// assert_eq!(rows.len(), 60 * 3);
/// assert!(rows.iter().all(|r| r.channel == "google_ads"));
/// ```
pub fn generate<R: Rng>(source: MockSource, today: NaiveDate, rng: &mut R) -> Vec<Record> {
    let name = source.name();
    let account = format!("{}_ACCOUNT_01", name.to_uppercase());
    let mut rows = Vec::new();

    for day in 0..DAYS {
        let Some(date) = today.checked_sub_days(Days::new(day)) else {
            break;
        };
        let date = date.format("%Y-%m-%d").to_string();

        for channel in source.channels() {
            for device in DEVICES {
                let spend = rng.gen_range(1000.0..6000.0);
                let multiplier: f64 = rng.gen_range(0.5..5.5);
                let brand = BRANDS.choose(rng).copied().unwrap_or(BRANDS[0]);
                rows.push(Record {
                    date: date.clone(),
                    brand: brand.to_string(),
                    account: account.clone(),
                    channel: (*channel).to_string(),
                    device: device.to_string(),
                    campaign_name: format!("{name}_{channel}_{device}_Camp_{day}"),
                    spend,
                    revenue: spend * multiplier,
                    clicks: (spend / 2.0).floor(),
                    impressions: (spend * 20.0).floor(),
                    conversions: (spend / 50.0).floor(),
                });
            }
        }
    }

    rows
}
