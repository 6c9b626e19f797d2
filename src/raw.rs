//! Работа с исходным текстом выгрузки и его разбиением на ячейки.

use crate::error::InsightError;
use std::io::Read;
use tracing::{debug, warn};

/// Исходный текст выгрузки без разбора.
#[derive(Debug, Clone)]
pub struct RawExport {
    /// Полный текст файла.
    pub text: String,
}

impl RawExport {
    /// Читает выгрузку из произвольного `Read`.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, InsightError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(Self { text })
    }

    /// Создаёт выгрузку из готовой строки.
    #[inline]
    pub fn from_str(s: &str) -> Self {
        Self {
            text: s.to_string(),
        }
    }
}

/// Выгрузка, разбитая на заголовок и строки ячеек.
#[derive(Debug, Clone)]
pub struct CsvTable {
    /// Разделитель, определённый по строке заголовков.
    pub delimiter: u8,
    /// Ячейки заголовка (очищенные, регистр сохранён).
    pub headers: Vec<String>,
    /// Строки данных.
    pub rows: Vec<Vec<String>>,
    /// Строки, которые токенизатор не смог прочитать.
    pub unreadable_rows: usize,
}

impl CsvTable {
    /// Разбивает текст на ячейки.
    ///
    /// Пустые строки отбрасываются. Если после этого осталось меньше двух
    /// строк, возвращается [`InsightError::NoData`]. Каждая строка файла
    /// разбирается отдельно, поэтому незакрытая кавычка портит только свою
    /// строку.
    pub fn parse(raw: &RawExport) -> Result<Self, InsightError> {
        let lines: Vec<&str> = raw
            .text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .collect();
        if lines.len() < 2 {
            return Err(InsightError::NoData);
        }

        let delimiter = detect_delimiter(lines[0]);
        debug!(delimiter = %char::from(delimiter), lines = lines.len(), "CSV delimiter detected");

        let builder = line_reader(delimiter);
        let headers = split_line(&builder, lines[0].trim_start_matches('\u{feff}'))?;

        let mut rows = Vec::with_capacity(lines.len() - 1);
        let mut unreadable_rows = 0;
        for (idx, line) in lines.iter().enumerate().skip(1) {
            match split_line(&builder, line) {
                Ok(cells) => rows.push(cells),
                Err(err) => {
                    warn!(row = idx, error = %err, "Unreadable CSV row skipped");
                    unreadable_rows += 1;
                }
            }
        }

        Ok(Self {
            delimiter,
            headers,
            rows,
            unreadable_rows,
        })
    }
}

/// Точка с запятой в строке заголовков означает европейский CSV.
#[inline]
fn detect_delimiter(header_line: &str) -> u8 {
    if header_line.contains(';') { b';' } else { b',' }
}

fn line_reader(delimiter: u8) -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .trim(csv::Trim::All);
    builder
}

/// Разбивает одну строку файла на ячейки с учётом кавычек.
fn split_line(builder: &csv::ReaderBuilder, line: &str) -> Result<Vec<String>, csv::Error> {
    let mut reader = builder.from_reader(line.as_bytes());
    let mut record = csv::StringRecord::new();
    reader.read_record(&mut record)?;
    Ok(record.iter().map(str::to_string).collect())
}
