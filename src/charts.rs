// Chart Data Builder - figures for the dashboard
//
// Figures are plain serde structs mirroring the Plotly figure schema
// (`{data: [...], layout: {...}}`); the page hands the JSON straight to
// `Plotly.newPlot`.

use serde::Serialize;

use crate::aggregation::{CategorySummary, DailySummary};

/// Plotly's "Pastel" qualitative palette
pub const PASTEL: [&str; 11] = [
    "rgb(102, 197, 204)",
    "rgb(246, 207, 113)",
    "rgb(248, 156, 116)",
    "rgb(220, 176, 242)",
    "rgb(135, 197, 95)",
    "rgb(158, 185, 243)",
    "rgb(254, 136, 177)",
    "rgb(201, 219, 116)",
    "rgb(139, 224, 164)",
    "rgb(180, 151, 231)",
    "rgb(179, 179, 179)",
];

const DAILY_HOVER_TEMPLATE: &str = "Date: %{x}<br>Amount: $%{y:.2f}<extra></extra>";

// ============================================================================
// FIGURE MODEL
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Pie(PieTrace),
    Scatter(ScatterTrace),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieTrace {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub textposition: &'static str,
    pub textinfo: &'static str,
    pub marker: Marker,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub colors: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterTrace {
    /// ISO date keys; selection events report these back as `x`
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub mode: &'static str,

    /// Per-point identifiers (index into the series)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customdata: Option<Vec<usize>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dragmode: Option<&'static str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub clickmode: Option<&'static str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovermode: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Title,
}

impl Title {
    fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Layout {
    fn titled(text: impl Into<String>) -> Self {
        Self {
            title: Title::new(text),
            xaxis: None,
            yaxis: None,
            dragmode: None,
            clickmode: None,
            hovermode: None,
        }
    }

    fn with_date_amount_axes(mut self) -> Self {
        self.xaxis = Some(Axis { title: Title::new("Date") });
        self.yaxis = Some(Axis { title: Title::new("Amount ($)") });
        self
    }
}

impl Figure {
    /// JSON safe to embed inside a `<script>` element
    pub fn to_script_json(&self) -> serde_json::Result<String> {
        Ok(script_safe(serde_json::to_string(self)?))
    }
}

/// Escape every `<` in serialized JSON as `\u003c`
///
/// `<` only occurs inside JSON strings, so the result parses to the same
/// value while never forming `</script` or `<!--` in the page.
pub fn script_safe(json: String) -> String {
    if json.contains('<') {
        json.replace('<', "\\u003c")
    } else {
        json
    }
}

// ============================================================================
// BUILDERS
// ============================================================================

/// "Spending by Category" pie
pub fn category_pie_chart(summaries: &[CategorySummary]) -> Figure {
    let trace = PieTrace {
        labels: summaries.iter().map(|s| s.category.to_string()).collect(),
        values: summaries.iter().map(|s| s.total).collect(),
        textposition: "inside",
        textinfo: "percent+label",
        marker: Marker {
            colors: PASTEL.iter().copied().cycle().take(summaries.len()).collect(),
        },
    };

    Figure {
        data: vec![Trace::Pie(trace)],
        layout: Layout::titled("Spending by Category"),
    }
}

/// "Daily Spending Over Time" line chart with brush selection enabled
pub fn spending_time_chart(daily: &[DailySummary]) -> Figure {
    let mut trace = line_trace(daily);
    trace.customdata = Some((0..daily.len()).collect());
    trace.hovertemplate = Some(DAILY_HOVER_TEMPLATE);

    let mut layout = Layout::titled("Daily Spending Over Time").with_date_amount_axes();
    layout.dragmode = Some("select");
    layout.clickmode = Some("event+select");
    layout.hovermode = Some("closest");

    Figure {
        data: vec![Trace::Scatter(trace)],
        layout,
    }
}

/// "<label> Spending Over Time" for a single category
pub fn category_time_chart(label: &str, daily: &[DailySummary]) -> Figure {
    Figure {
        data: vec![Trace::Scatter(line_trace(daily))],
        layout: Layout::titled(format!("{} Spending Over Time", label)).with_date_amount_axes(),
    }
}

fn line_trace(daily: &[DailySummary]) -> ScatterTrace {
    ScatterTrace {
        x: daily.iter().map(|d| d.date.format("%Y-%m-%d").to_string()).collect(),
        y: daily.iter().map(|d| d.total).collect(),
        mode: "lines+markers",
        customdata: None,
        hovertemplate: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Category;
    use chrono::NaiveDate;
    use serde_json::json;

    fn point_count(figure: &Figure) -> usize {
        match figure.data.first() {
            Some(Trace::Scatter(trace)) => trace.x.len(),
            _ => 0,
        }
    }

    fn daily() -> Vec<DailySummary> {
        vec![
            DailySummary { date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(), total: 10.5 },
            DailySummary { date: NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(), total: 4.25 },
        ]
    }

    #[test]
    fn test_pie_chart_json() {
        let summaries = vec![
            CategorySummary { category: Category::Dining, total: 30.0 },
            CategorySummary { category: Category::Healthcare, total: 12.0 },
        ];

        let value = serde_json::to_value(category_pie_chart(&summaries)).unwrap();

        assert_eq!(value["data"][0]["type"], "pie");
        assert_eq!(value["data"][0]["labels"], json!(["Dining", "Healthcare"]));
        assert_eq!(value["data"][0]["values"], json!([30.0, 12.0]));
        assert_eq!(value["data"][0]["textinfo"], "percent+label");
        assert_eq!(value["data"][0]["marker"]["colors"], json!([PASTEL[0], PASTEL[1]]));
        assert_eq!(value["layout"]["title"]["text"], "Spending by Category");
    }

    #[test]
    fn test_time_chart_has_point_ids_and_select_mode() {
        let figure = spending_time_chart(&daily());
        assert_eq!(point_count(&figure), 2);

        let value = serde_json::to_value(&figure).unwrap();
        let trace = &value["data"][0];
        assert_eq!(trace["type"], "scatter");
        assert_eq!(trace["mode"], "lines+markers");
        assert_eq!(trace["x"], json!(["2024-05-01", "2024-05-03"]));
        assert_eq!(trace["y"], json!([10.5, 4.25]));
        assert_eq!(trace["customdata"], json!([0, 1]));
        assert_eq!(trace["hovertemplate"], DAILY_HOVER_TEMPLATE);

        let layout = &value["layout"];
        assert_eq!(layout["dragmode"], "select");
        assert_eq!(layout["clickmode"], "event+select");
        assert_eq!(layout["hovermode"], "closest");
        assert_eq!(layout["xaxis"]["title"]["text"], "Date");
        assert_eq!(layout["yaxis"]["title"]["text"], "Amount ($)");
    }

    #[test]
    fn test_category_chart_omits_selection_settings() {
        let value = serde_json::to_value(category_time_chart("Healthcare", &daily())).unwrap();

        assert_eq!(value["layout"]["title"]["text"], "Healthcare Spending Over Time");
        assert!(value["layout"].get("dragmode").is_none());
        assert!(value["data"][0].get("customdata").is_none());
    }

    #[test]
    fn test_empty_series() {
        let figure = category_time_chart("Pets", &[]);
        assert_eq!(point_count(&figure), 0);

        let value = serde_json::to_value(&figure).unwrap();
        assert_eq!(value["data"][0]["x"], json!([]));
    }

    #[test]
    fn test_script_json_escapes_closing_tags() {
        let figure = category_time_chart("</script><script>alert(1)", &[]);
        let json = figure.to_script_json().unwrap();

        assert!(!json.contains('<'));
        assert!(json.contains("\\u003c/script>"));
        let back: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            back["layout"]["title"]["text"],
            "</script><script>alert(1) Spending Over Time"
        );
    }

    #[test]
    fn test_script_json_escapes_comment_openers() {
        let figure = category_time_chart("<!--<script", &daily());
        let json = figure.to_script_json().unwrap();

        assert!(!json.contains("<!--"));
        assert!(!json.contains("<script"));
        let back: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back["layout"]["title"]["text"], "<!--<script Spending Over Time");
    }

    #[test]
    fn test_script_safe_leaves_plain_json_alone() {
        let json = r#"{"a":"b"}"#.to_string();
        assert_eq!(script_safe(json.clone()), json);
    }
}
