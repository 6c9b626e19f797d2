use campaign_insight::{
    ColumnConfig, ColumnMap, CsvTable, Dataset, DatasetLoader, Field, InsightError, RawExport,
    parse_locale_number,
};

fn load_fixture(name: &str) -> Dataset {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    let text = std::fs::read_to_string(path).expect("read fixture");
    let raw = RawExport::from_str(&text);
    DatasetLoader::new(&raw).load().expect("parse fixture")
}

#[test]
fn parses_locale_numbers() {
    assert_eq!(parse_locale_number("1.234,56"), 1234.56);
    assert_eq!(parse_locale_number("1234,5"), 1234.5);
    assert_eq!(parse_locale_number("1234.5"), 1234.5);
    assert_eq!(parse_locale_number(" 12 000,25 "), 12000.25);
    assert_eq!(parse_locale_number(""), 0.0);
    assert_eq!(parse_locale_number("abc"), 0.0);
    assert_eq!(parse_locale_number("inf"), 0.0);
    assert_eq!(parse_locale_number("NaN"), 0.0);
}

#[test]
fn resolves_leftmost_matching_header() {
    let headers = ["Campaign", "\"Spend\"", "cost", "report_date", "tarih", "PLATFORM"];
    let config = ColumnConfig::default();
    let map = ColumnMap::resolve(&headers, &config);
    assert_eq!(map.index(Field::Campaign), Some(0));
    assert_eq!(map.index(Field::Spend), Some(1));
    assert_eq!(map.index(Field::Date), Some(3));
    assert_eq!(map.index(Field::Channel), Some(5));
    assert_eq!(map.index(Field::Brand), None);
    assert_eq!(map, ColumnMap::resolve(&headers, &config));
}

#[test]
fn parses_fixture_export() {
    let dataset = load_fixture("campaigns.csv");
    let records = dataset.records();
    assert_eq!(records.len(), 5);
    assert_eq!(dataset.dropped_rows(), 1);

    let first = &records[0];
    assert_eq!(first.date, "2024-01-01");
    assert_eq!(first.brand, "Acme");
    assert_eq!(first.account, "Acme TR");
    assert_eq!(first.channel, "meta");
    assert_eq!(first.device, "MOBILE");
    assert_eq!(first.campaign_name, "Winter; Sale");
    assert_eq!(first.spend, 1200.5);
    assert_eq!(first.revenue, 4801.0);
    assert_eq!(first.clicks, 120.0);
    assert_eq!(first.impressions, 12000.0);
    assert_eq!(first.conversions, 0.0);

    let last = &records[4];
    assert_eq!(last.date, "2024-01-15");
    assert_eq!(last.campaign_name, "Kids \"Back\" Video");
    assert_eq!(last.spend, 1000.0);
    assert_eq!(last.revenue, 3000.0);
}

#[test]
fn parses_comma_export_with_mixed_aliases() {
    let raw = RawExport::from_str(
        "platform,device,tarih,harcama,donusum,tiklama,gosterim\n\
         meta,MOBILE,2024-01-01,1000,5000,100,10000\n\
         google_ads,DESKTOP,2024-01-02,2000,1000,50,20000",
    );
    let dataset = DatasetLoader::new(&raw).load().unwrap();
    let records = dataset.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].channel, "google_ads");
    assert_eq!(records[1].revenue, 1000.0);
    assert_eq!(records[0].brand, "Unknown Brand");
    assert_eq!(records[0].account, "Unknown Account");
    assert_eq!(records[0].campaign_name, "Campaign");
}

#[test]
fn unresolved_columns_fall_back_to_defaults() {
    let raw = RawExport::from_str("a,b,c,d,e\n1,2,3,4,5");
    let dataset = DatasetLoader::new(&raw).load().unwrap();
    let record = &dataset.records()[0];
    assert_eq!(record.date, "");
    assert_eq!(record.channel, "Other");
    assert_eq!(record.device, "Other");
    assert_eq!(record.spend, 0.0);
    assert_eq!(record.impressions, 0.0);
}

#[test]
fn drops_short_rows() {
    let raw = RawExport::from_str(
        "platform,cihaz,date,spend,revenue\n\
         meta,APP,2024-01-01,10,20\n\
         only,three,fields\n\
         google,APP,2024-01-02,30,40\n",
    );
    let dataset = DatasetLoader::new(&raw).load().unwrap();
    assert_eq!(dataset.records().len(), 4 - 1 - 1);
    assert_eq!(dataset.dropped_rows(), 1);
}

#[test]
fn stray_quote_spoils_only_its_own_line() {
    let raw = RawExport::from_str(
        "platform,device,tarih,harcama,gelir,kampanya_adi\n\
         meta,APP,2024-01-01,10,20,First\n\
         google,APP,2024-01-02,30,40,\"Broken\n\
         google,APP,2024-01-03,50,60,Last\n",
    );
    let table = CsvTable::parse(&raw).unwrap();
    assert_eq!(table.rows.len() + table.unreadable_rows, 3);

    let dataset = DatasetLoader::new(&raw).load().unwrap();
    assert_eq!(dataset.records().len() + dataset.dropped_rows(), 3);
    let names: Vec<&str> = dataset
        .records()
        .iter()
        .map(|r| r.campaign_name.as_str())
        .collect();
    assert_eq!(names.first(), Some(&"First"));
    assert_eq!(names.last(), Some(&"Last"));
    assert!(names.iter().all(|name| !name.contains('\n')));
    assert_eq!(dataset.records().last().map(|r| r.spend), Some(50.0));
}

#[test]
fn keeps_escaped_quotes_at_value_edges() {
    let raw = RawExport::from_str(
        "tarih;platform;cihaz;harcama;kampanya_adi\n\
         2024-01-01;meta;APP;10;\"Summer \"\"Sale\"\"\"\n\
         2024-01-02;meta;APP;20;\"\"\"Best\"\" deal\"\n",
    );
    let dataset = DatasetLoader::new(&raw).load().unwrap();
    let names: Vec<&str> = dataset
        .records()
        .iter()
        .map(|r| r.campaign_name.as_str())
        .collect();
    assert_eq!(names, ["Summer \"Sale\"", "\"Best\" deal"]);
}

#[test]
fn min_fields_is_configurable() {
    let raw = RawExport::from_str("platform,spend,date\nmeta,10,2024-01-01");
    let strict = DatasetLoader::new(&raw).load().unwrap();
    assert!(strict.is_empty());
    let relaxed = DatasetLoader::new(&raw).min_fields(3).load().unwrap();
    assert_eq!(relaxed.records().len(), 1);
    assert_eq!(relaxed.records()[0].spend, 10.0);
}

#[test]
fn rejects_exports_without_data_rows() {
    for text in ["", "platform;harcama;tarih;cihaz;gelir", "\n  \nplatform,spend\n\n"] {
        let raw = RawExport::from_str(text);
        assert!(matches!(CsvTable::parse(&raw), Err(InsightError::NoData)));
        assert!(matches!(
            DatasetLoader::new(&raw).load(),
            Err(InsightError::NoData)
        ));
    }
}

#[test]
fn detects_delimiter_from_header() {
    let semicolon = CsvTable::parse(&RawExport::from_str("a;b,c\n1;2,5")).unwrap();
    assert_eq!(semicolon.delimiter, b';');
    assert_eq!(semicolon.rows[0], vec!["1".to_string(), "2,5".to_string()]);

    let comma = CsvTable::parse(&RawExport::from_str("a,b\n1,\"x, y\"")).unwrap();
    assert_eq!(comma.delimiter, b',');
    assert_eq!(comma.rows[0][1], "x, y");
}

#[test]
fn strips_bom_and_quotes_from_headers() {
    let raw = RawExport::from_str(
        "\u{feff}\"Platform\";\"Harcama\";\"Tarih\";\"Cihaz\";\"Gelir\"\n\
         \"meta\";\"1.000,5\";\"2024-02-01\";\"APP\";\"2.001\"",
    );
    let dataset = DatasetLoader::new(&raw).load().unwrap();
    let record = &dataset.records()[0];
    assert_eq!(record.channel, "meta");
    assert_eq!(record.spend, 1000.5);
    assert_eq!(record.date, "2024-02-01");
    assert_eq!(record.revenue, 2.001);
}

#[test]
fn normalizes_european_dates() {
    assert_eq!(campaign_insight::normalize_date("05.03.2024"), "2024-03-05");
    assert_eq!(campaign_insight::normalize_date("05/03/2024"), "2024-03-05");
    assert_eq!(campaign_insight::normalize_date("2024-03-05"), "2024-03-05");
    assert_eq!(campaign_insight::normalize_date("March 5"), "March 5");
}
