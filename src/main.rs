//! Пример CLI: читает CSV-выгрузку кампаний и выводит сводку KPI.

use std::env;
use std::fs::File;

use campaign_insight::{Config, Dashboard, RawExport, TableView};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let path = if let Some(path) = args.next() {
        path
    } else {
        println!("Usage: campaign-insight <export.csv> [config.json]");
        return Ok(());
    };
    let config = match args.next() {
        Some(config_path) => Config::from_reader(File::open(config_path)?)?,
        None => Config::default(),
    };

    let raw = RawExport::from_reader(File::open(&path)?)?;
    let mut dashboard = Dashboard::new(config);
    let dataset = dashboard.load_csv(&raw)?;
    println!(
        "Записей: {}, отброшено строк: {}",
        dataset.records().len(),
        dataset.dropped_rows()
    );

    let filter = dashboard.filter();
    println!("Период: {} - {}", filter.start_date, filter.end_date);

    let views = dashboard.views();
    let kpi = views.kpi;
    println!(
        "Расход: {:.0}, выручка: {:.0}, ROAS: {:.2}, CPC: {:.2}, CTR: {:.2}%",
        kpi.total_spend, kpi.total_revenue, kpi.roas, kpi.cpc, kpi.ctr
    );
    println!(
        "Клики: {}, показы: {}, дней в ряду: {}",
        kpi.total_clicks,
        kpi.total_impressions,
        views.time_series.len()
    );
    for group in [&views.channel_split.first, &views.channel_split.second] {
        println!(
            "Группа {}: {} строк, расход {:.0}, ROAS {:.2}",
            group.name,
            group.records.len(),
            group.kpi.total_spend,
            group.kpi.roas
        );
    }

    let top = views.table(TableView::TopRoas, dashboard.config());
    println!("Лучшие по ROAS: {} строк", top.len());
    for record in top.iter().take(5) {
        println!(
            "  {} {} {}: ROAS {:.2}",
            record.date,
            record.channel,
            record.campaign_name,
            record.roas()
        );
    }
    Ok(())
}
