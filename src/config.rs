//! Настройки разбора выгрузок и построения представлений.

use crate::error::InsightError;
use crate::types::Field;
use serde::{Deserialize, Deserializer, Serialize};
use std::io::Read;

/// Правило сопоставления заголовка столбца с полем.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alias {
    /// Заголовок совпадает с текстом целиком.
    Exact(String),
    /// Заголовок содержит текст как подстроку.
    Contains(String),
}

impl Alias {
    /// Проверяет нормализованный (нижний регистр) заголовок.
    #[inline]
    pub fn matches(&self, header: &str) -> bool {
        match self {
            Self::Exact(text) => header == text,
            Self::Contains(text) => header.contains(text.as_str()),
        }
    }
}

/// Алиасы и значение по умолчанию для одного поля.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Поле.
    pub field: Field,
    /// Алиасы заголовков (в нижнем регистре).
    pub aliases: Vec<Alias>,
    /// Значение для строк без столбца или с пустой ячейкой.
    #[serde(default)]
    pub default: String,
}

impl FieldSpec {
    fn new(field: Field, aliases: Vec<Alias>, default: &str) -> Self {
        Self {
            field,
            aliases,
            default: default.to_string(),
        }
    }
}

/// Таблица сопоставления столбцов.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnConfig {
    /// Описания полей.
    pub fields: Vec<FieldSpec>,
}

impl ColumnConfig {
    /// Описание поля, если оно есть в таблице.
    pub fn spec(&self, field: Field) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.field == field)
    }

    /// Значение по умолчанию для поля.
    pub fn default_for(&self, field: Field) -> &str {
        self.spec(field).map_or("", |spec| spec.default.as_str())
    }
}

impl Default for ColumnConfig {
    fn default() -> Self {
        let exact = |names: &[&str]| -> Vec<Alias> {
            names.iter().map(|n| Alias::Exact((*n).to_string())).collect()
        };
        Self {
            fields: vec![
                FieldSpec::new(
                    Field::Date,
                    vec![
                        Alias::Contains("tarih".to_string()),
                        Alias::Contains("date".to_string()),
                    ],
                    "",
                ),
                FieldSpec::new(Field::Brand, exact(&["co_marka", "brand", "marka"]), "Unknown Brand"),
                FieldSpec::new(Field::Account, exact(&["hesap_adi", "account"]), "Unknown Account"),
                FieldSpec::new(Field::Channel, exact(&["platform", "mecra"]), "Other"),
                FieldSpec::new(
                    Field::Device,
                    exact(&["cihaz_platformu", "cihaz", "device"]),
                    "Other",
                ),
                FieldSpec::new(Field::Campaign, exact(&["kampanya_adi", "campaign"]), "Campaign"),
                FieldSpec::new(Field::Spend, exact(&["harcama", "spend", "cost"]), ""),
                FieldSpec::new(Field::Revenue, exact(&["donusum", "gelir", "revenue"]), ""),
                FieldSpec::new(Field::Clicks, exact(&["tiklama", "clicks"]), ""),
                FieldSpec::new(Field::Impressions, exact(&["gosterim", "impressions"]), ""),
            ],
        }
    }
}

/// Группа площадок для кросс-сравнения.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelGroup {
    /// Название группы.
    pub name: String,
    /// Подстроки названия площадки в нижнем регистре.
    #[serde(deserialize_with = "lowercase_patterns")]
    pub patterns: Vec<String>,
}

impl ChannelGroup {
    /// Создаёт группу из названия и подстрок.
    pub fn new(name: &str, patterns: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            patterns: patterns.iter().map(|p| p.to_lowercase()).collect(),
        }
    }

    /// Относится ли площадка к группе.
    pub fn contains(&self, channel: &str) -> bool {
        let lower = channel.to_lowercase();
        self.patterns.iter().any(|p| lower.contains(p.as_str()))
    }
}

fn lowercase_patterns<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let patterns = Vec::<String>::deserialize(deserializer)?;
    Ok(patterns.iter().map(|p| p.to_lowercase()).collect())
}

/// Две группы площадок, которые сравниваются друг с другом.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelGroups {
    /// Первая группа.
    pub first: ChannelGroup,
    /// Вторая группа.
    pub second: ChannelGroup,
}

impl Default for ChannelGroups {
    fn default() -> Self {
        Self {
            first: ChannelGroup::new("meta", &["meta", "facebook", "instagram"]),
            second: ChannelGroup::new("google", &["google", "youtube"]),
        }
    }
}

/// Общие настройки библиотеки.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Таблица сопоставления столбцов.
    pub columns: ColumnConfig,
    /// Минимальное число ячеек в строке данных.
    pub min_fields: usize,
    /// Порог расхода для рейтинга по ROAS.
    pub roas_min_spend: f64,
    /// Размер рейтинговых таблиц.
    pub table_limit: usize,
    /// Размер таблицы «все строки».
    pub all_limit: usize,
    /// Размер каждого среза в выгрузке для внешнего сервиса.
    pub sync_slice_limit: usize,
    /// Максимум строк в контексте для чата.
    pub context_limit: usize,
    /// Длина периода по умолчанию после загрузки, в днях.
    pub default_window_days: u32,
    /// Группы площадок для кросс-сравнения.
    pub channel_groups: ChannelGroups,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            columns: ColumnConfig::default(),
            min_fields: 5,
            roas_min_spend: 100.0,
            table_limit: 20,
            all_limit: 50,
            sync_slice_limit: 50,
            context_limit: 3000,
            default_window_days: 30,
            channel_groups: ChannelGroups::default(),
        }
    }
}

impl Config {
    /// Читает настройки из JSON; отсутствующие ключи берутся по умолчанию.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, InsightError> {
        Ok(serde_json::from_reader(reader)?)
    }
}
