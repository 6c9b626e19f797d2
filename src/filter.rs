//! Операции над состоянием фильтров.

use crate::types::{ALL, FilterState, Record};
use crate::utils::parse_iso_date;
use chrono::Days;
use std::collections::BTreeSet;

impl Default for FilterState {
    fn default() -> Self {
        Self {
            start_date: String::new(),
            end_date: String::new(),
            brand: ALL.to_string(),
            account: ALL.to_string(),
            channels: BTreeSet::new(),
            devices: BTreeSet::new(),
        }
    }
}

impl FilterState {
    /// Фильтр по умолчанию: последние `days` дней до `max_date` включительно.
    ///
    /// Если `max_date` не ISO-дата, начало периода остаётся открытым.
    ///
    /// # Пример
    ///
    /// ```
    /// # use campaign_insight::FilterState;
    /// let filter = FilterState::window_ending("2024-03-31", 30);
    /// assert_eq!(filter.start_date, "2024-03-01");
    /// assert_eq!(filter.end_date, "2024-03-31");
    /// ```
    pub fn window_ending(max_date: &str, days: u32) -> Self {
        let start_date = parse_iso_date(max_date)
            .and_then(|end| end.checked_sub_days(Days::new(u64::from(days))))
            .map(|start| start.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        Self {
            start_date,
            end_date: max_date.to_string(),
            ..Self::default()
        }
    }

    /// Проходит ли запись все активные условия.
    pub fn matches(&self, record: &Record) -> bool {
        if !self.start_date.is_empty() && record.date.as_str() < self.start_date.as_str() {
            return false;
        }
        if !self.end_date.is_empty() && record.date.as_str() > self.end_date.as_str() {
            return false;
        }
        if self.brand != ALL && record.brand != self.brand {
            return false;
        }
        if self.account != ALL && record.account != self.account {
            return false;
        }
        if !self.channels.is_empty() && !self.channels.contains(&record.channel) {
            return false;
        }
        if !self.devices.is_empty() && !self.devices.contains(&record.device) {
            return false;
        }
        true
    }

    /// Добавляет площадку в выбор или убирает её оттуда.
    pub fn toggle_channel(&mut self, channel: &str) {
        toggle(&mut self.channels, channel);
    }

    /// Добавляет устройство в выбор или убирает его оттуда.
    pub fn toggle_device(&mut self, device: &str) {
        toggle(&mut self.devices, device);
    }

    /// Текстовое описание фильтров для внешнего сервиса аналитики.
    pub fn describe(&self) -> String {
        format!(
            "Date range: {} - {}\nBrand: {}\nAccount: {}\nChannels: {}\nDevices: {}",
            self.start_date,
            self.end_date,
            self.brand,
            self.account,
            join_or_all(&self.channels),
            join_or_all(&self.devices),
        )
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}

fn join_or_all(set: &BTreeSet<String>) -> String {
    if set.is_empty() {
        ALL.to_string()
    } else {
        set.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
    }
}
