//! Сборка компактной выгрузки и контекста для внешнего сервиса аналитики.

use crate::config::Config;
use crate::dataset::{top_by, top_roas};
use crate::error::InsightError;
use crate::types::{ALL, FilterState, KpiSnapshot, Record};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashSet;

/// Заголовок CSV в выгрузке для внешнего сервиса.
pub const SYNC_CSV_HEADER: &str = "date,brand,channel,device,campaign,spend,revenue,clicks,impressions";

const OVERVIEW_BRAND: &str = "Overview";
const DATASET_LABEL: &str = "Filtered dataset (CSV format)";

/// Данные кампаний внутри [`SyncPayload`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCampaignData {
    /// Подпись набора данных.
    pub campaign_name: String,
    /// Суммарный расход.
    pub spend: f64,
    /// Суммарная выручка.
    pub revenue: f64,
    /// Сжатая CSV-выгрузка.
    pub csv_content: String,
}

/// Конверт для передачи во внешний сервис.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncPayload {
    /// Бренд из фильтра или «Overview».
    pub brand_name: String,
    /// Текстовый отчёт.
    pub report: String,
    /// Данные кампаний.
    pub raw_campaign_data: RawCampaignData,
}

impl SyncPayload {
    /// Сериализует конверт в JSON.
    #[inline]
    pub fn to_json(&self) -> Result<String, InsightError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Контекст для чат-ассистента: отчёт, крупнейшие строки и фильтры.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisContext {
    /// Текстовый отчёт.
    pub report: String,
    /// Отфильтрованные строки по убыванию расхода.
    pub raw_data: Vec<Record>,
    /// Фильтры, при которых собран контекст.
    pub filters: FilterState,
}

/// Собирает конверт для внешнего сервиса из отфильтрованных строк.
///
/// Пустой `narrative` заменяется короткой сводкой по KPI.
pub fn build_sync_payload(
    filtered: &[&Record],
    filter: &FilterState,
    kpi: &KpiSnapshot,
    narrative: &str,
    config: &Config,
) -> SyncPayload {
    let brand_name = if filter.brand == ALL {
        OVERVIEW_BRAND.to_string()
    } else {
        filter.brand.clone()
    };

    SyncPayload {
        brand_name,
        report: report_text(narrative, filter, kpi),
        raw_campaign_data: RawCampaignData {
            campaign_name: DATASET_LABEL.to_string(),
            spend: kpi.total_spend,
            revenue: kpi.total_revenue,
            csv_content: sync_csv(&sync_rows(filtered, config)),
        },
    }
}

/// Собирает контекст для чата: строки по убыванию расхода, не больше лимита.
pub fn build_analysis_context(
    filtered: &[&Record],
    filter: &FilterState,
    kpi: &KpiSnapshot,
    narrative: &str,
    config: &Config,
) -> AnalysisContext {
    AnalysisContext {
        report: report_text(narrative, filter, kpi),
        raw_data: top_by(filtered, config.context_limit, |r| r.spend)
            .into_iter()
            .cloned()
            .collect(),
        filters: filter.clone(),
    }
}

/// Текст отчёта или запасная сводка, если текста нет.
fn report_text(narrative: &str, filter: &FilterState, kpi: &KpiSnapshot) -> String {
    if narrative.trim().is_empty() {
        summary_line(filter, kpi)
    } else {
        narrative.to_string()
    }
}

/// Однострочная сводка по периоду, расходу и ROAS.
pub fn summary_line(filter: &FilterState, kpi: &KpiSnapshot) -> String {
    format!(
        "SUMMARY REPORT: {} - {}. Spend: {:.0}, ROAS: {:.2}",
        filter.start_date, filter.end_date, kpi.total_spend, kpi.roas
    )
}

/// Объединение четырёх рейтингов без повторов по паре (кампания, дата).
///
/// При повторе остаётся первое вхождение.
pub fn sync_rows<'a>(filtered: &[&'a Record], config: &Config) -> Vec<&'a Record> {
    let limit = config.sync_slice_limit;
    let combined = top_by(filtered, limit, |r| r.spend)
        .into_iter()
        .chain(top_by(filtered, limit, |r| r.clicks))
        .chain(top_by(filtered, limit, |r| r.impressions))
        .chain(top_roas(filtered, config.roas_min_spend, limit));

    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    combined
        .filter(|&r| seen.insert((r.campaign_name.as_str(), r.date.as_str())))
        .collect()
}

/// Сериализует строки в CSV из девяти столбцов.
pub fn sync_csv(rows: &[&Record]) -> String {
    let mut out = String::from(SYNC_CSV_HEADER);
    out.push('\n');
    let lines: Vec<String> = rows.iter().map(|r| csv_line(r)).collect();
    out.push_str(&lines.join("\n"));
    out
}

fn csv_line(r: &Record) -> String {
    format!(
        "{},{},{},{},{},{},{},{},{}",
        escaped(&r.date),
        escaped(&r.brand),
        escaped(&r.channel),
        escaped(&r.device),
        quoted(&r.campaign_name),
        r.spend.round(),
        r.revenue.round(),
        r.clicks,
        r.impressions
    )
}

/// Значение в двойных кавычках, внутренние кавычки удваиваются.
fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Кавычки ставятся, только если значение иначе сломает разбиение строки.
fn escaped(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(quoted(value))
    } else {
        Cow::Borrowed(value)
    }
}
