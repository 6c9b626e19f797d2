//! Сопоставление заголовков CSV каноническим полям.

use crate::config::ColumnConfig;
use crate::types::Field;
use crate::utils::normalize_header;
use std::collections::BTreeMap;

/// Индексы столбцов для каждого канонического поля.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnMap {
    indices: BTreeMap<Field, usize>,
}

impl ColumnMap {
    /// Разрешает столбцы по строке заголовков.
    ///
    /// Для каждого поля берётся самый левый заголовок, совпавший
    /// с любым из его алиасов.
    ///
    /// # Пример
    ///
    /// ```
    /// # use campaign_insight::{ColumnConfig, ColumnMap, Field};
    /// let map = ColumnMap::resolve(&["Tarih", "harcama", "platform"], &ColumnConfig::default());
    /// assert_eq!(map.index(Field::Date), Some(0));
    /// assert_eq!(map.index(Field::Channel), Some(2));
    /// assert_eq!(map.index(Field::Brand), None);
    /// ```
    pub fn resolve<S: AsRef<str>>(headers: &[S], config: &ColumnConfig) -> Self {
        let normalized: Vec<String> = headers
            .iter()
            .map(|h| normalize_header(h.as_ref()))
            .collect();

        let mut indices = BTreeMap::new();
        for spec in &config.fields {
            let found = normalized
                .iter()
                .position(|header| spec.aliases.iter().any(|alias| alias.matches(header)));
            if let Some(idx) = found {
                indices.insert(spec.field, idx);
            }
        }
        Self { indices }
    }

    /// Индекс столбца поля или `None`, если столбец не найден.
    #[inline]
    pub fn index(&self, field: Field) -> Option<usize> {
        self.indices.get(&field).copied()
    }

    /// Поля, для которых столбец не найден.
    pub fn missing(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| !self.indices.contains_key(f))
            .collect()
    }
}
