//! Доменные типы: строки выгрузки, фильтры и агрегаты.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Значение фильтра бренда или аккаунта, означающее «без ограничения».
pub const ALL: &str = "All";

/// Каноническое поле выгрузки, к которому сопоставляются столбцы CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Дата наблюдения.
    Date,
    /// Бренд.
    Brand,
    /// Рекламный аккаунт.
    Account,
    /// Рекламная площадка.
    Channel,
    /// Тип устройства.
    Device,
    /// Название кампании.
    Campaign,
    /// Расход.
    Spend,
    /// Выручка (ценность конверсий).
    Revenue,
    /// Клики.
    Clicks,
    /// Показы.
    Impressions,
}

impl Field {
    /// Все поля в порядке разрешения столбцов.
    pub const ALL: [Self; 10] = [
        Self::Date,
        Self::Brand,
        Self::Account,
        Self::Channel,
        Self::Device,
        Self::Campaign,
        Self::Spend,
        Self::Revenue,
        Self::Clicks,
        Self::Impressions,
    ];
}

/// Одно наблюдение: кампания × день × площадка × устройство.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Дата в формате ISO `yyyy-mm-dd`.
    pub date: String,
    /// Бренд.
    pub brand: String,
    /// Рекламный аккаунт.
    pub account: String,
    /// Площадка.
    pub channel: String,
    /// Устройство.
    pub device: String,
    /// Название кампании.
    pub campaign_name: String,
    /// Расход.
    pub spend: f64,
    /// Выручка.
    pub revenue: f64,
    /// Клики.
    pub clicks: f64,
    /// Показы.
    pub impressions: f64,
    /// Количество конверсий. Парсер CSV его не заполняет.
    pub conversions: f64,
}

impl Record {
    /// ROAS строки, ноль при нулевом расходе.
    #[inline]
    pub fn roas(&self) -> f64 {
        ratio(self.revenue, self.spend)
    }
}

/// Состояние фильтров дашборда.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Начало периода включительно; пустая строка означает отсутствие ограничения.
    pub start_date: String,
    /// Конец периода включительно; пустая строка означает отсутствие ограничения.
    pub end_date: String,
    /// Бренд или [`ALL`].
    pub brand: String,
    /// Аккаунт или [`ALL`].
    pub account: String,
    /// Допустимые площадки; пустое множество означает все.
    pub channels: BTreeSet<String>,
    /// Допустимые устройства; пустое множество означает все.
    pub devices: BTreeSet<String>,
}

/// Сводные KPI по набору строк.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSnapshot {
    /// Суммарный расход.
    pub total_spend: f64,
    /// Суммарная выручка.
    pub total_revenue: f64,
    /// Выручка / расход.
    pub roas: f64,
    /// Расход / клики.
    pub cpc: f64,
    /// Клики / показы × 100.
    pub ctr: f64,
    /// Суммарные клики.
    pub total_clicks: f64,
    /// Суммарные показы.
    pub total_impressions: f64,
}

/// Варианты табличного представления отфильтрованных строк.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableView {
    /// Первые строки в исходном порядке.
    #[default]
    All,
    /// Больше всего показов.
    TopImpressions,
    /// Меньше всего показов.
    BottomImpressions,
    /// Больше всего кликов.
    TopClicks,
    /// Лучший ROAS среди строк с заметным расходом.
    TopRoas,
}

/// Точка временного ряда расходов и выручки.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    /// Дата.
    pub date: String,
    /// Расход за дату.
    pub spend: f64,
    /// Выручка за дату.
    pub revenue: f64,
}

/// Итоги по одной группе площадок.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary<'a> {
    /// Название группы.
    pub name: String,
    /// Строки группы в порядке исходного набора.
    pub records: Vec<&'a Record>,
    /// KPI группы.
    pub kpi: KpiSnapshot,
}

/// Сравнение двух групп площадок.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelSplit<'a> {
    /// Первая группа (по умолчанию Meta).
    pub first: GroupSummary<'a>,
    /// Вторая группа (по умолчанию Google).
    pub second: GroupSummary<'a>,
}

/// Списки значений для выпадающих фильтров.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Бренды.
    pub brands: Vec<String>,
    /// Аккаунты.
    pub accounts: Vec<String>,
    /// Площадки.
    pub channels: Vec<String>,
    /// Устройства.
    pub devices: Vec<String>,
}

/// Деление с нулём при нулевом знаменателе.
#[inline]
pub(crate) fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}
