#![warn(missing_docs)]
//! Библиотека для загрузки выгрузок рекламных кампаний, их фильтрации
//! и расчёта маркетинговых KPI.

mod columns;
mod config;
mod dashboard;
mod dataset;
mod error;
mod export;
mod filter;
mod loader;
pub mod mock;
mod parser;
mod raw;
mod types;
mod utils;

pub use crate::columns::ColumnMap;
pub use crate::config::{Alias, ChannelGroup, ChannelGroups, ColumnConfig, Config, FieldSpec};
pub use crate::dashboard::{Dashboard, NARRATIVE_FALLBACK, NarrativeService};
pub use crate::dataset::{Dataset, Views, channel_split, compute_views, table_view, time_series};
pub use crate::error::InsightError;
pub use crate::export::{
    AnalysisContext, RawCampaignData, SYNC_CSV_HEADER, SyncPayload, build_analysis_context,
    build_sync_payload, summary_line, sync_csv, sync_rows,
};
pub use crate::loader::DatasetLoader;
pub use crate::mock::MockSource;
pub use crate::parser::ParsedRows;
pub use crate::raw::{CsvTable, RawExport};
pub use crate::types::*;
pub use crate::utils::{normalize_date, parse_locale_number};
