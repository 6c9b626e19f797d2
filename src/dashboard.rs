//! Состояние сеанса: набор данных, фильтры и текст аналитики.

use crate::config::Config;
use crate::dataset::{Dataset, Views};
use crate::error::InsightError;
use crate::export::{AnalysisContext, SyncPayload, build_analysis_context, build_sync_payload};
use crate::loader::DatasetLoader;
use crate::mock::{self, MockSource};
use crate::raw::RawExport;
use crate::types::{FilterOptions, FilterState, KpiSnapshot, Record, TableView};
use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};

/// Текст, который сохраняется, если сервис аналитики не ответил.
pub const NARRATIVE_FALLBACK: &str = "Automatic analysis could not be generated.";

/// Внешний сервис, превращающий KPI и фильтры в текстовый вывод.
pub trait NarrativeService {
    /// Возвращает текстовую сводку для KPI при заданных фильтрах.
    fn summarize(&self, kpi: &KpiSnapshot, filter: &FilterState) -> Result<String, InsightError>;
}

/// Сеанс работы с дашбордом.
///
/// Каждая загрузка целиком заменяет набор данных и сбрасывает фильтры
/// к окну по умолчанию от последней даты.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    config: Config,
    dataset: Option<Dataset>,
    filter: FilterState,
    narrative: String,
}

impl Dashboard {
    /// Создаёт пустой сеанс с указанными настройками.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Настройки сеанса.
    #[inline]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Загруженный набор данных.
    #[inline]
    pub const fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// Текущие фильтры.
    #[inline]
    pub const fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Текущий текст аналитики (может быть пустым).
    #[inline]
    pub fn narrative(&self) -> &str {
        &self.narrative
    }

    /// Загружает CSV-выгрузку.
    pub fn load_csv(&mut self, raw: &RawExport) -> Result<&Dataset, InsightError> {
        let dataset = DatasetLoader::new(raw).config(&self.config).load()?;
        Ok(self.replace(dataset))
    }

    /// Загружает готовые записи.
    pub fn load_records(&mut self, records: Vec<Record>) -> &Dataset {
        self.replace(Dataset::new(records))
    }

    /// Загружает демонстрационные данные площадки.
    pub fn load_mock(&mut self, source: MockSource, today: NaiveDate, seed: u64) -> &Dataset {
        let mut rng = StdRng::seed_from_u64(seed);
        let records = mock::generate(source, today, &mut rng);
        info!(source = source.name(), records = records.len(), "Mock feed generated");
        self.load_records(records)
    }

    fn replace(&mut self, dataset: Dataset) -> &Dataset {
        self.filter = dataset.default_filter(self.config.default_window_days);
        self.narrative.clear();
        self.dataset.insert(dataset)
    }

    /// Заменяет фильтры целиком.
    #[inline]
    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
    }

    /// Изменяемый доступ к фильтрам.
    #[inline]
    pub const fn filter_mut(&mut self) -> &mut FilterState {
        &mut self.filter
    }

    /// Сохраняет текст аналитики, полученный извне.
    #[inline]
    pub fn set_narrative(&mut self, narrative: impl Into<String>) {
        self.narrative = narrative.into();
    }

    /// Значения для фильтров по всему набору.
    pub fn options(&self) -> FilterOptions {
        self.dataset
            .as_ref()
            .map(Dataset::options)
            .unwrap_or_default()
    }

    /// Все представления для текущих фильтров; без данных они пусты.
    pub fn views(&self) -> Views<'_> {
        let records = self.dataset.as_ref().map_or(&[][..], Dataset::records);
        crate::dataset::compute_views(records, &self.filter, &self.config)
    }

    /// Табличное представление для текущих фильтров.
    pub fn table(&self, view: TableView) -> Vec<&Record> {
        self.views().table(view, &self.config)
    }

    /// Запрашивает текст аналитики у внешнего сервиса.
    ///
    /// Ошибка сервиса не прерывает работу: сохраняется запасной текст.
    pub fn refresh_narrative<S: NarrativeService + ?Sized>(&mut self, service: &S) -> &str {
        let kpi = self.views().kpi;
        self.narrative = match service.summarize(&kpi, &self.filter) {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, "Narrative generation failed");
                NARRATIVE_FALLBACK.to_string()
            }
        };
        &self.narrative
    }

    /// Конверт для внешнего сервиса по текущим фильтрам.
    pub fn sync_payload(&self) -> Result<SyncPayload, InsightError> {
        if self.dataset.is_none() {
            return Err(InsightError::NoData);
        }
        let views = self.views();
        Ok(build_sync_payload(
            &views.filtered,
            &self.filter,
            &views.kpi,
            &self.narrative,
            &self.config,
        ))
    }

    /// Контекст для чат-ассистента по текущим фильтрам.
    pub fn analysis_context(&self) -> Result<AnalysisContext, InsightError> {
        if self.dataset.is_none() {
            return Err(InsightError::NoData);
        }
        let views = self.views();
        Ok(build_analysis_context(
            &views.filtered,
            &self.filter,
            &views.kpi,
            &self.narrative,
            &self.config,
        ))
    }
}
