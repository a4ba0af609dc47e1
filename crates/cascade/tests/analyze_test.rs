//! End-to-end tests over a local statement file.

use cascade::data::{DataError, JsonFileSource};
use cascade::{FetchConfig, PeriodType, StepLabel, analyze};
use rstest::rstest;
use std::io::Write;

const STATEMENTS: &str = r#"[
    {"period_ending": "2021-12-31", "total_revenue": 800.0, "gross_profit": 400.0,
     "ebitda": 200.0, "ebit": 150.0, "total_pre_tax_income": 120.0, "net_income": 100.0},
    {"period_ending": "2023-12-31", "total_revenue": 1000.0, "gross_profit": 600.0,
     "ebitda": 400.0, "ebit": 350.0, "total_pre_tax_income": 300.0, "net_income": 200.0},
    {"period_ending": "2022-12-31", "total_revenue": null}
]"#;

fn statement_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(STATEMENTS.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_analyze_orders_and_charts() {
    let file = statement_file();
    let source = JsonFileSource::new(file.path());

    let report = analyze(&source, " xyz ", &FetchConfig::default()).await.unwrap();

    assert_eq!(report.symbol, "XYZ");
    assert_eq!(report.period_type, PeriodType::Annual);
    let years: Vec<String> = report
        .periods
        .iter()
        .map(|p| p.period_ending.format("%Y").to_string())
        .collect();
    assert_eq!(years, vec!["2023", "2022", "2021"]);

    let latest = report.waterfalls[0].waterfall.as_ref().unwrap();
    assert_eq!(latest.step(StepLabel::CostOfRevenue).delta, -40.0);
    assert!(report.waterfalls[1].waterfall.is_none());
    assert!(report.waterfalls[2].waterfall.is_some());
}

#[rstest]
#[case(1, 1)]
#[case(2, 2)]
#[case(10, 3)]
#[tokio::test]
async fn test_analyze_respects_limit(#[case] limit: usize, #[case] expected: usize) {
    let file = statement_file();
    let source = JsonFileSource::new(file.path());
    let config = FetchConfig::new(PeriodType::Annual, limit);

    let report = analyze(&source, "XYZ", &config).await.unwrap();
    assert_eq!(report.periods.len(), expected);
}

#[tokio::test]
async fn test_analyze_rejects_blank_symbol() {
    let file = statement_file();
    let source = JsonFileSource::new(file.path());

    let result = analyze(&source, "   ", &FetchConfig::default()).await;
    assert!(matches!(result, Err(DataError::InvalidSymbol(_))));
}
