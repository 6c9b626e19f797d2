//! Набор записей и производные представления: фильтрация, рейтинги, KPI.

use crate::config::{ChannelGroup, ChannelGroups, Config};
use crate::types::{
    ChannelSplit, FilterOptions, FilterState, GroupSummary, KpiSnapshot, Record, TableView,
    TimeSeriesPoint, ratio,
};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Загруженный набор записей. После создания не изменяется.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
    dropped_rows: usize,
}

impl Dataset {
    /// Создаёт набор из готовых записей.
    #[inline]
    pub const fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            dropped_rows: 0,
        }
    }

    pub(crate) const fn with_dropped(records: Vec<Record>, dropped_rows: usize) -> Self {
        Self {
            records,
            dropped_rows,
        }
    }

    /// Все записи в порядке загрузки.
    #[inline]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Сколько строк исходного файла было отброшено при разборе.
    #[inline]
    pub const fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    /// Пуст ли набор.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Значения для фильтров по всему набору, без учёта текущих фильтров.
    pub fn options(&self) -> FilterOptions {
        let unique = |key: fn(&Record) -> &str| -> Vec<String> {
            self.records
                .iter()
                .map(key)
                .filter(|v| !v.is_empty())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .map(str::to_string)
                .collect()
        };
        FilterOptions {
            brands: unique(|r| r.brand.as_str()),
            accounts: unique(|r| r.account.as_str()),
            channels: unique(|r| r.channel.as_str()),
            devices: unique(|r| r.device.as_str()),
        }
    }

    /// Максимальная (лексикографически) непустая дата.
    pub fn max_date(&self) -> Option<&str> {
        self.records
            .iter()
            .map(|r| r.date.as_str())
            .filter(|d| !d.is_empty())
            .max()
    }

    /// Фильтр по умолчанию после загрузки: окно в `days` дней до последней даты.
    pub fn default_filter(&self, days: u32) -> FilterState {
        self.max_date()
            .map_or_else(FilterState::default, |max| {
                FilterState::window_ending(max, days)
            })
    }

    /// Записи, проходящие фильтр, в исходном порядке.
    pub fn filtered(&self, filter: &FilterState) -> Vec<&Record> {
        self.records.iter().filter(|r| filter.matches(r)).collect()
    }

    /// Все представления для текущего фильтра.
    #[inline]
    pub fn views(&self, filter: &FilterState, config: &Config) -> Views<'_> {
        compute_views(&self.records, filter, config)
    }
}

/// Производные представления отфильтрованных записей.
#[derive(Debug, Clone)]
pub struct Views<'a> {
    /// Отфильтрованные записи.
    pub filtered: Vec<&'a Record>,
    /// KPI по отфильтрованным записям.
    pub kpi: KpiSnapshot,
    /// Расход и выручка по датам.
    pub time_series: Vec<TimeSeriesPoint>,
    /// Сравнение групп площадок.
    pub channel_split: ChannelSplit<'a>,
}

impl<'a> Views<'a> {
    /// Табличное представление отфильтрованных записей.
    #[inline]
    pub fn table(&self, view: TableView, config: &Config) -> Vec<&'a Record> {
        table_view(&self.filtered, view, config)
    }
}

/// Пересчитывает все представления целиком.
pub fn compute_views<'a>(records: &'a [Record], filter: &FilterState, config: &Config) -> Views<'a> {
    let filtered: Vec<&Record> = records.iter().filter(|r| filter.matches(r)).collect();
    let kpi = KpiSnapshot::from_records(filtered.iter().copied());
    let time_series = time_series(&filtered);
    let channel_split = channel_split(&filtered, &config.channel_groups);
    Views {
        filtered,
        kpi,
        time_series,
        channel_split,
    }
}

impl KpiSnapshot {
    /// Суммирует показатели и считает отношения, ноль при нулевом знаменателе.
    ///
    /// # Пример
    ///
    /// ```
    /// # use campaign_insight::{KpiSnapshot, Record};
    /// let kpi = KpiSnapshot::from_records(std::iter::empty::<&Record>());
    /// assert_eq!(kpi.roas, 0.0);
    /// assert_eq!(kpi.ctr, 0.0);
    /// ```
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut kpi = Self::default();
        for r in records {
            kpi.total_spend += r.spend;
            kpi.total_revenue += r.revenue;
            kpi.total_clicks += r.clicks;
            kpi.total_impressions += r.impressions;
        }
        kpi.roas = ratio(kpi.total_revenue, kpi.total_spend);
        kpi.cpc = ratio(kpi.total_spend, kpi.total_clicks);
        kpi.ctr = ratio(kpi.total_clicks, kpi.total_impressions) * 100.0;
        kpi
    }
}

/// Сортирует и обрезает строки для выбранной таблицы.
pub fn table_view<'a>(rows: &[&'a Record], view: TableView, config: &Config) -> Vec<&'a Record> {
    match view {
        TableView::All => rows.iter().copied().take(config.all_limit).collect(),
        TableView::TopImpressions => top_by(rows, config.table_limit, |r| r.impressions),
        TableView::BottomImpressions => {
            let mut sorted = rows.to_vec();
            sorted.sort_by(|a, b| a.impressions.total_cmp(&b.impressions));
            sorted.truncate(config.table_limit);
            sorted
        }
        TableView::TopClicks => top_by(rows, config.table_limit, |r| r.clicks),
        TableView::TopRoas => top_roas(rows, config.roas_min_spend, config.table_limit),
    }
}

/// Первые `limit` строк по убыванию ключа; порядок равных сохраняется.
pub(crate) fn top_by<'a, F>(rows: &[&'a Record], limit: usize, key: F) -> Vec<&'a Record>
where
    F: Fn(&Record) -> f64,
{
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| descending(key(a), key(b)));
    sorted.truncate(limit);
    sorted
}

/// Лучшие по ROAS строки с расходом строго больше `min_spend`.
pub(crate) fn top_roas<'a>(rows: &[&'a Record], min_spend: f64, limit: usize) -> Vec<&'a Record> {
    let eligible: Vec<&Record> = rows
        .iter()
        .copied()
        .filter(|r| r.spend > min_spend)
        .collect();
    top_by(&eligible, limit, Record::roas)
}

#[inline]
fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

/// Расход и выручка по датам, по возрастанию даты.
pub fn time_series(rows: &[&Record]) -> Vec<TimeSeriesPoint> {
    let mut map: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    for r in rows {
        let entry = map.entry(r.date.as_str()).or_insert((0.0, 0.0));
        entry.0 += r.spend;
        entry.1 += r.revenue;
    }
    map.into_iter()
        .map(|(date, (spend, revenue))| TimeSeriesPoint {
            date: date.to_string(),
            spend,
            revenue,
        })
        .collect()
}

/// Делит строки на две группы площадок и считает итоги каждой.
///
/// Строки вне обеих групп в сравнение не попадают.
pub fn channel_split<'a>(rows: &[&'a Record], groups: &ChannelGroups) -> ChannelSplit<'a> {
    ChannelSplit {
        first: summarize_group(rows, &groups.first),
        second: summarize_group(rows, &groups.second),
    }
}

fn summarize_group<'a>(rows: &[&'a Record], group: &ChannelGroup) -> GroupSummary<'a> {
    let records: Vec<&'a Record> = rows
        .iter()
        .copied()
        .filter(|r| group.contains(&r.channel))
        .collect();
    GroupSummary {
        name: group.name.clone(),
        kpi: KpiSnapshot::from_records(records.iter().copied()),
        records,
    }
}
