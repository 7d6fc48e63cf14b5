/// Chart renderers and output file handling
///
/// A renderer receives a finished `TimeSeries` and a writer; it never looks
/// at entries or the store. The HTML renderer produces a single
/// self-contained page with an inline SVG line and the series as JSON.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};

use crate::chart::{ChartError, TimeSeries};

/// Draws a series into some output
pub trait ChartRenderer {
    fn render(&self, series: &TimeSeries, out: &mut dyn Write) -> Result<(), ChartError>;

    /// Render into a newly created file
    fn render_to_file(&self, series: &TimeSeries, path: &Path) -> Result<(), ChartError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.render(series, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// Renders a standalone HTML page
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
    pub line_color: String,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self {
            width: 960,
            height: 480,
            margin: 60,
            line_color: "#5470c6".to_string(),
        }
    }
}

impl HtmlRenderer {
    /// Map series points into SVG coordinates
    fn plot_points(&self, series: &TimeSeries) -> Vec<(f64, f64)> {
        let (Some((x_min, x_max)), Some((w_min, w_max))) =
            (series.x_bounds(), series.weight_bounds())
        else {
            return Vec::new();
        };

        let margin = self.margin as f64;
        let plot_width = self.width as f64 - 2.0 * margin;
        let plot_height = self.height as f64 - 2.0 * margin;

        let mut w_pad = (w_max - w_min) * 0.1;
        if w_pad == 0.0 {
            w_pad = 1.0;
        }
        let w_lo = w_min - w_pad;
        let w_span = (w_max + w_pad) - w_lo;
        let x_span = x_max - x_min;

        series
            .points
            .iter()
            .map(|p| {
                let x = if x_span == 0.0 {
                    margin + plot_width / 2.0
                } else {
                    margin + (p.x - x_min) / x_span * plot_width
                };
                let y = margin + (1.0 - (p.weight - w_lo) / w_span) * plot_height;
                (x, y)
            })
            .collect()
    }

    fn svg(&self, series: &TimeSeries) -> String {
        let points = self.plot_points(series);
        let polyline = points
            .iter()
            .map(|(x, y)| format!("{:.1},{:.1}", x, y))
            .collect::<Vec<_>>()
            .join(" ");

        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#,
            w = self.width,
            h = self.height
        );
        let m = self.margin;
        svg.push_str(&format!(
            r##"<line x1="{m}" y1="{b}" x2="{r}" y2="{b}" stroke="#888"/><line x1="{m}" y1="{m}" x2="{m}" y2="{b}" stroke="#888"/>"##,
            m = m,
            b = self.height - m,
            r = self.width - m
        ));
        svg.push_str(&format!(
            r#"<polyline fill="none" stroke="{}" stroke-width="2" points="{}"/>"#,
            escape_html(&self.line_color),
            polyline
        ));
        for ((x, y), point) in points.iter().zip(&series.points) {
            svg.push_str(&format!(
                r#"<circle cx="{:.1}" cy="{:.1}" r="4" fill="{}"><title>{}: {:.1} {}</title></circle>"#,
                x,
                y,
                escape_html(&self.line_color),
                escape_html(&point.label),
                point.weight,
                escape_html(&series.unit)
            ));
        }
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" text-anchor="middle">{}</text>"#,
            self.width / 2,
            self.height - m / 4,
            series.axis.label()
        ));
        svg.push_str("</svg>");
        svg
    }
}

impl ChartRenderer for HtmlRenderer {
    fn render(&self, series: &TimeSeries, out: &mut dyn Write) -> Result<(), ChartError> {
        // "</" would end the script element early
        let data = serde_json::to_string(series)?.replace("</", "<\\/");
        let title = escape_html(&series.title);

        writeln!(out, "<!DOCTYPE html>")?;
        writeln!(out, "<html lang=\"en\">")?;
        writeln!(out, "<head>")?;
        writeln!(out, "<meta charset=\"utf-8\">")?;
        writeln!(out, "<title>{}</title>", title)?;
        writeln!(
            out,
            "<style>body{{font-family:sans-serif;text-align:center}}svg{{max-width:100%;height:auto}}</style>"
        )?;
        writeln!(out, "</head>")?;
        writeln!(out, "<body>")?;
        writeln!(out, "<h1>{}</h1>", title)?;
        writeln!(out, "<h2>{}</h2>", escape_html(&series.subtitle))?;
        writeln!(out, "{}", self.svg(series))?;
        writeln!(
            out,
            "<script type=\"application/json\" id=\"weight-series\">{}</script>",
            data
        )?;
        writeln!(out, "</body>")?;
        writeln!(out, "</html>")?;
        Ok(())
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Resolve where a chart file goes, creating directories as needed
pub fn resolve_output_path(dir: &Path, filename: Option<&str>) -> Result<PathBuf, ChartError> {
    resolve_output_path_at(dir, filename, Local::now().naive_local())
}

/// Same as `resolve_output_path` with an explicit clock for generated names
pub fn resolve_output_path_at(
    dir: &Path,
    filename: Option<&str>,
    now: NaiveDateTime,
) -> Result<PathBuf, ChartError> {
    let filename = match filename.filter(|f| !f.is_empty()) {
        Some(name) => name.to_string(),
        None => format!("weight-chart_{}.html", now.format("%Y-%m-%d_%H-%M-%S")),
    };

    let mut path = dir.join(filename);
    if path.extension().is_none() {
        let mut name = path.into_os_string();
        name.push(".html");
        path = PathBuf::from(name);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    Ok(path)
}
