//! Ошибки загрузки выгрузок и построения отчётов.

/// Ошибка загрузки или обработки выгрузки кампаний.
///
/// Проблемы качества данных (битые строки, нечисловые ячейки, деление
/// на ноль) ошибкой не считаются и сводятся к нулевым значениям.
#[derive(thiserror::Error, Debug)]
pub enum InsightError {
    /// Ошибка ввода-вывода при чтении исходного файла.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Ошибка токенизации CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// Ошибка сериализации или чтения JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// В выгрузке нет заголовка и хотя бы одной строки данных,
    /// либо набор данных ещё не загружен.
    #[error("No data available")]
    NoData,
    /// Внешний сервис текстовой аналитики вернул ошибку.
    #[error("Narrative service error: {0}")]
    Narrative(String),
}
