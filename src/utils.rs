//! Вспомогательные парсеры чисел, дат и очистка ячеек.

use chrono::NaiveDate;

/// Нормализует числовую строку, удаляя пробелы, знак плюса итд.
fn normalize_number(input: &str) -> String {
    input
        .chars()
        .filter(|ch| !matches!(*ch, ' ' | '\u{a0}' | '\u{202f}' | '+'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Разбирает число в европейской записи (`1.234,56`), никогда не падает.
///
/// Пустая строка и любое нераспознанное значение дают ноль.
///
/// # Пример
///
/// ```
/// # use campaign_insight::parse_locale_number;
/// assert_eq!(parse_locale_number("1.234,56"), 1234.56);
/// assert_eq!(parse_locale_number("1234,5"), 1234.5);
/// assert_eq!(parse_locale_number("abc"), 0.0);
/// ```
pub fn parse_locale_number(value: &str) -> f64 {
    let normalized = normalize_number(value);
    if normalized.is_empty() {
        return 0.0;
    }
    let candidate = if normalized.contains('.') && normalized.contains(',') {
        normalized.replace('.', "").replacen(',', ".", 1)
    } else if normalized.contains(',') {
        normalized.replacen(',', ".", 1)
    } else {
        normalized
    };
    // `f64::from_str` принимает "inf" и "NaN", их тоже считаем мусором.
    candidate
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Снимает с ячейки окружающие пробелы и одну парную пару двойных кавычек.
///
/// Одиночная кавычка с одного края считается частью значения.
pub fn clean_cell(value: &str) -> String {
    let trimmed = value.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .map_or(trimmed, str::trim)
        .to_string()
}

/// Приводит заголовок столбца к виду для сравнения с алиасами.
pub fn normalize_header(value: &str) -> String {
    clean_cell(&value.replace('\u{feff}', "")).to_lowercase()
}

/// Приводит дату к ISO `yyyy-mm-dd`, если она записана как `dd.mm.yyyy`
/// или `dd/mm/yyyy`. Остальные значения возвращаются без изменений.
pub fn normalize_date(value: &str) -> String {
    let trimmed = value.trim();
    if NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_ok() {
        return trimmed.to_string();
    }
    ["%d.%m.%Y", "%d/%m/%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .map_or_else(
            || trimmed.to_string(),
            |date| date.format("%Y-%m-%d").to_string(),
        )
}

/// Разбирает ISO-дату.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}
