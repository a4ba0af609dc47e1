//! Integration tests for statement tables, charts and exports.

use cascade_data::{JsonFileSource, PeriodType};
use cascade_output::{
    DEFAULT_CHART_WIDTH, ExportFormat, Exporter, IncomeTable, ReportBuilder, StatementExport,
    WaterfallExport, period_waterfalls, render_waterfall_svg, render_waterfall_text,
};

const STATEMENTS: &str = r#"[
    {
        "period_ending": "2023-12-31",
        "currency": "USD",
        "total_revenue": 1000.0,
        "gross_profit": 600.0,
        "ebitda": 400.0,
        "ebit": 350.0,
        "total_pre_tax_income": 300.0,
        "net_income": 200.0
    },
    {
        "period_ending": "2022-12-31",
        "currency": "USD",
        "total_revenue": 500.0,
        "ebitda": 100.0,
        "ebit": 100.0,
        "total_pre_tax_income": 50.0,
        "net_income": 10.0
    },
    {
        "period_ending": "2021-12-31",
        "total_revenue": 0.0
    }
]"#;

#[test]
fn test_full_presentation_workflow() {
    let periods = JsonFileSource::parse(STATEMENTS).unwrap();
    assert_eq!(periods.len(), 3);

    // Table keeps every period, charts skip the one without revenue
    let table = IncomeTable::new("XYZ", &periods);
    assert_eq!(table.columns, vec!["2023", "2022", "2021"]);
    assert_eq!(table.rows[1].cells, vec!["600", "N/A", "N/A"]);

    let waterfalls = period_waterfalls(&periods);
    let charted: Vec<_> = waterfalls
        .iter()
        .filter_map(|pw| pw.waterfall.as_ref().map(|w| (pw.title("XYZ"), w)))
        .collect();
    assert_eq!(charted.len(), 2);

    for (title, waterfall) in &charted {
        let text = render_waterfall_text(title, waterfall, DEFAULT_CHART_WIDTH);
        assert!(text.starts_with(title.as_str()));
        assert_eq!(text.lines().count(), 2 + 6 + 1);

        let svg = render_waterfall_svg(title, waterfall).unwrap();
        assert!(svg.contains(title.as_str()));
    }

    let text = render_waterfall_text(&charted[1].0, charted[1].1, DEFAULT_CHART_WIDTH);
    assert!(text.contains(" -100.0%"));
    assert!(text.lines().last().unwrap().ends_with("2.0%"));
}

#[test]
fn test_exports_and_report() {
    let periods = JsonFileSource::parse(STATEMENTS).unwrap();

    let statements = StatementExport::new("XYZ".to_string(), periods.clone());
    let csv = statements.export_to_string(ExportFormat::Csv).unwrap();
    assert_eq!(csv.lines().count(), 4);

    let waterfalls = WaterfallExport::new("XYZ".to_string(), period_waterfalls(&periods));
    let csv = waterfalls.export_to_string(ExportFormat::Csv).unwrap();
    assert_eq!(csv.lines().count(), 1 + 2 * 6);
    assert!(csv.contains("XYZ,2022-12-31,Cost of Revenue,-100.0,100.0"));

    let report = ReportBuilder::new()
        .symbol("XYZ")
        .period_type(PeriodType::Annual)
        .periods(periods)
        .build()
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["periods"].as_array().unwrap().len(), 3);
    assert!(json["waterfalls"][2]["waterfall"].is_null());
}
