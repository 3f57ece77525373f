// ═══════════════════════════════════════════════════════════════════
// Render Tests — HtmlPieRenderer artifact output
// ═══════════════════════════════════════════════════════════════════

use balance_report_core::render::{ChartRenderer, HtmlPieRenderer};

#[test]
fn renders_the_pie_chart_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = HtmlPieRenderer::new(dir.path());

    let labels = vec!["BTC".to_string(), "ETH".to_string()];
    let values = vec![0.5, 0.06];

    let path = renderer
        .render_pie(&labels, &values, "Estimated value: 0.56 BTC", "totalBalance")
        .unwrap();

    assert_eq!(path, dir.path().join("totalBalance_chart.html"));

    let html = std::fs::read_to_string(&path).unwrap();
    assert!(html.contains("Estimated value: 0.56 BTC"));
    assert!(html.contains(r#"["BTC","ETH"]"#));
    assert!(html.contains("[0.5,0.06]"));
    assert!(html.contains("plotly"));
}

#[test]
fn title_quoting_is_handled_by_the_renderer() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = HtmlPieRenderer::new(dir.path());

    let path = renderer
        .render_pie(&[], &[], r#"a "quoted" title"#, "edge")
        .unwrap();

    let html = std::fs::read_to_string(&path).unwrap();
    // serde_json escapes the embedded quotes
    assert!(html.contains(r#""a \"quoted\" title""#));
}

#[test]
fn rendering_into_a_missing_directory_fails() {
    let renderer = HtmlPieRenderer::new("/nonexistent/surely/missing");
    let err = renderer.render_pie(&[], &[], "t", "x").unwrap_err();
    assert!(matches!(
        err,
        balance_report_core::errors::CoreError::FileIO(_)
    ));
}
