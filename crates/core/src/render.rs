use std::path::{Path, PathBuf};

use crate::errors::CoreError;

/// Renders the (labels, values) projection into a visual artifact.
///
/// External collaborator seam: the core computes every number on the report,
/// a renderer only draws it. Swapping the output medium touches nothing
/// upstream.
pub trait ChartRenderer {
    /// Write a pie chart; returns the path of the written artifact.
    fn render_pie(
        &self,
        labels: &[String],
        values: &[f64],
        title: &str,
        output_name: &str,
    ) -> Result<PathBuf, CoreError>;
}

/// Renders the pie as a self-contained HTML page plotted by plotly.js
/// (loaded from its CDN). The artifact lands at
/// `{out_dir}/{output_name}_chart.html`.
pub struct HtmlPieRenderer {
    out_dir: PathBuf,
}

impl HtmlPieRenderer {
    pub fn new(out_dir: impl AsRef<Path>) -> Self {
        Self {
            out_dir: out_dir.as_ref().to_path_buf(),
        }
    }
}

impl Default for HtmlPieRenderer {
    fn default() -> Self {
        Self::new(".")
    }
}

impl ChartRenderer for HtmlPieRenderer {
    fn render_pie(
        &self,
        labels: &[String],
        values: &[f64],
        title: &str,
        output_name: &str,
    ) -> Result<PathBuf, CoreError> {
        // serde_json handles the quoting/escaping of everything embedded
        // in the page, title included.
        let labels_json = serde_json::to_string(labels)?;
        let values_json = serde_json::to_string(values)?;
        let title_json = serde_json::to_string(title)?;

        let html = format!(
            r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{output_name}</title>
  <script src="https://cdn.plot.ly/plotly-2.32.0.min.js"></script>
</head>
<body>
  <div id="chart"></div>
  <script>
    Plotly.newPlot("chart", [{{
      type: "pie",
      labels: {labels_json},
      values: {values_json}
    }}], {{ title: {title_json} }});
  </script>
</body>
</html>
"#
        );

        let path = self.out_dir.join(format!("{output_name}_chart.html"));
        std::fs::write(&path, html)?;
        Ok(path)
    }
}
