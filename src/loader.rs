//! Обёртка над разбором для загрузки набора данных.

use crate::config::{ColumnConfig, Config};
use crate::dataset::Dataset;
use crate::error::InsightError;
use crate::raw::{CsvTable, RawExport};
use tracing::{info, warn};

/// Builder для загрузки [`Dataset`] из CSV-выгрузки.
pub struct DatasetLoader<'a> {
    raw: &'a RawExport,
    columns: ColumnConfig,
    min_fields: usize,
}

impl<'a> DatasetLoader<'a> {
    /// Создаёт builder с настройками по умолчанию.
    ///
    /// # Пример
    ///
    /// ```
    /// # use campaign_insight::{DatasetLoader, RawExport};
    /// let raw = RawExport::from_str("platform;harcama;tarih;cihaz;gelir\nmeta;1.000,50;2024-01-01;APP;10");
    /// let dataset = DatasetLoader::new(&raw).load().unwrap();
    /// assert_eq!(dataset.records().len(), 1);
    /// assert_eq!(dataset.records()[0].spend, 1000.5);
    /// ```
    #[inline]
    pub fn new(raw: &'a RawExport) -> Self {
        let config = Config::default();
        Self {
            raw,
            columns: config.columns,
            min_fields: config.min_fields,
        }
    }

    /// Берёт таблицу столбцов и минимальную длину строки из настроек.
    #[inline]
    pub fn config(mut self, config: &Config) -> Self {
        self.columns = config.columns.clone();
        self.min_fields = config.min_fields;
        self
    }

    /// Заменяет таблицу сопоставления столбцов.
    #[inline]
    pub fn columns(mut self, columns: ColumnConfig) -> Self {
        self.columns = columns;
        self
    }

    /// Задаёт минимальное число ячеек в строке данных.
    #[inline]
    pub const fn min_fields(mut self, min_fields: usize) -> Self {
        self.min_fields = min_fields;
        self
    }

    /// Выполняет разбор с текущими настройками.
    pub fn load(self) -> Result<Dataset, InsightError> {
        let table = CsvTable::parse(self.raw)?;
        let parsed = table.records(&self.columns, self.min_fields);
        if parsed.dropped_rows > 0 {
            warn!(dropped = parsed.dropped_rows, "Malformed rows skipped");
        }
        info!(
            records = parsed.records.len(),
            columns = table.headers.len(),
            "Campaign export loaded"
        );
        Ok(Dataset::with_dropped(parsed.records, parsed.dropped_rows))
    }
}
