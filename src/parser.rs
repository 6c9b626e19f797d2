//! Нормализация строк выгрузки в записи [`Record`].

use crate::columns::ColumnMap;
use crate::config::ColumnConfig;
use crate::raw::CsvTable;
use crate::types::{Field, Record};
use crate::utils::{normalize_date, parse_locale_number};
use tracing::debug;

/// Результат нормализации: записи и число отброшенных строк.
#[derive(Debug, Clone, Default)]
pub struct ParsedRows {
    /// Записи в порядке файла.
    pub records: Vec<Record>,
    /// Строки, отброшенные как битые.
    pub dropped_rows: usize,
}

impl CsvTable {
    /// Сопоставляет столбцы и превращает строки в записи.
    ///
    /// Строки короче `min_fields` ячеек отбрасываются без ошибки.
    pub fn records(&self, columns: &ColumnConfig, min_fields: usize) -> ParsedRows {
        let map = ColumnMap::resolve(self.headers.as_slice(), columns);
        debug!(missing = ?map.missing(), "Columns resolved");

        let mut records = Vec::with_capacity(self.rows.len());
        let mut dropped_rows = self.unreadable_rows;
        for cells in &self.rows {
            if cells.len() < min_fields {
                dropped_rows += 1;
                continue;
            }
            records.push(normalize_row(cells, &map, columns));
        }

        ParsedRows {
            records,
            dropped_rows,
        }
    }
}

/// Строит запись из ячеек одной строки.
fn normalize_row(cells: &[String], map: &ColumnMap, columns: &ColumnConfig) -> Record {
    let cell = |field: Field| {
        map.index(field)
            .and_then(|idx| cells.get(idx))
            .map(String::as_str)
    };
    let text = |field: Field| -> String {
        match cell(field) {
            Some(value) if !value.is_empty() => value.to_string(),
            _ => columns.default_for(field).to_string(),
        }
    };
    let number = |field: Field| -> f64 { cell(field).map_or(0.0, parse_locale_number) };

    Record {
        date: normalize_date(&text(Field::Date)),
        brand: text(Field::Brand),
        account: text(Field::Account),
        channel: text(Field::Channel),
        device: text(Field::Device),
        campaign_name: text(Field::Campaign),
        spend: number(Field::Spend),
        revenue: number(Field::Revenue),
        clicks: number(Field::Clicks),
        impressions: number(Field::Impressions),
        conversions: 0.0,
    }
}
