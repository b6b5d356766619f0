//! Hourly temperature chart
//!
//! Turns parallel timestamp / temperature series into plot geometry and the
//! inline SVG the weather panel shows under the current temperature.

use crate::html::escape;
use std::fmt::Write;

/// Canvas width in SVG units
pub const WIDTH: f64 = 640.0;
/// Canvas height in SVG units
pub const HEIGHT: f64 = 180.0;
/// Padding on every side of the plot area
pub const PAD: f64 = 24.0;

const PLOT_WIDTH: f64 = WIDTH - PAD * 2.0;
const PLOT_HEIGHT: f64 = HEIGHT - PAD * 2.0;
const LABEL_Y: f64 = HEIGHT - 6.0;

/// One plotted sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Chart description derived from one temperature series
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureChart {
    /// Plotted samples, left to right
    pub points: Vec<Point>,
    /// `HH:MM` labels for the first, middle and last timestamps
    pub labels: Vec<String>,
    /// Lower bound of the plotted range
    pub min: f64,
    /// Upper bound of the plotted range
    pub max: f64,
}

impl TemperatureChart {
    /// Build the chart, or `None` when there is nothing to plot.
    ///
    /// Non-finite temperatures are dropped before scaling. Labels come from
    /// `times` as given, at indices `0`, `n / 2` and `n - 1`.
    #[must_use]
    pub fn build(times: &[String], temps: &[f64]) -> Option<Self> {
        if times.is_empty() || temps.is_empty() {
            return None;
        }

        let safe: Vec<f64> = temps.iter().copied().filter(|t| t.is_finite()).collect();
        if safe.is_empty() {
            return None;
        }

        let mut min = safe.iter().copied().fold(f64::INFINITY, f64::min);
        let mut max = safe.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if min == max {
            min -= 1.0;
            max += 1.0;
        }

        let step = if safe.len() > 1 {
            PLOT_WIDTH / (safe.len() - 1) as f64
        } else {
            PLOT_WIDTH
        };

        let points = safe
            .iter()
            .enumerate()
            .map(|(index, temp)| Point {
                x: PAD + index as f64 * step,
                y: PAD + (1.0 - (temp - min) / (max - min)) * PLOT_HEIGHT,
            })
            .collect();

        let n = times.len();
        let labels = times
            .iter()
            .enumerate()
            .filter(|(index, _)| *index == 0 || *index == n / 2 || *index == n - 1)
            .map(|(_, time)| time_of_day(time))
            .collect();

        Some(Self {
            points,
            labels,
            min,
            max,
        })
    }

    /// Closed area polygon: baseline, every point, baseline
    #[must_use]
    pub fn area(&self) -> Vec<Point> {
        let baseline = HEIGHT - PAD;
        let mut area = Vec::with_capacity(self.points.len() + 2);
        area.push(Point { x: PAD, y: baseline });
        area.extend_from_slice(&self.points);
        area.push(Point {
            x: WIDTH - PAD,
            y: baseline,
        });
        area
    }

    /// `Min 12.3°C · Max 21.0°C`
    #[must_use]
    pub fn range_text(&self) -> String {
        format!("Min {:.1}°C · Max {:.1}°C", self.min, self.max)
    }

    /// Inline SVG block rendered under the current temperature
    #[must_use]
    pub fn to_svg(&self) -> String {
        let label = |i: usize| self.labels.get(i).map(|l| escape(l)).unwrap_or_default();
        format!(
            r#"
    <div class="chart-wrapper">
      <div class="chart-title">Temperature (next 24h)</div>
      <svg class="weather-chart" viewBox="0 0 {WIDTH} {HEIGHT}" role="img" aria-label="Temperature chart">
        <polyline class="chart-area" points="{area}" />
        <polyline class="chart-line" points="{line}" />
        <text class="chart-label" x="{PAD}" y="{LABEL_Y}">{first}</text>
        <text class="chart-label" x="{mid_x}" y="{LABEL_Y}" text-anchor="middle">{middle}</text>
        <text class="chart-label" x="{end_x}" y="{LABEL_Y}" text-anchor="end">{last}</text>
      </svg>
      <div class="chart-range">{range}</div>
    </div>
  "#,
            area = points_attr(&self.area()),
            line = points_attr(&self.points),
            mid_x = WIDTH / 2.0,
            end_x = WIDTH - PAD,
            first = label(0),
            middle = label(1),
            last = label(2),
            range = self.range_text(),
        )
    }
}

/// `x,y x,y ...` as used by `<polyline points>`
fn points_attr(points: &[Point]) -> String {
    let mut out = String::new();
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{},{}", p.x, p.y);
    }
    out
}

/// `2024-05-01T13:00` -> `13:00`
fn time_of_day(timestamp: &str) -> String {
    timestamp.chars().skip(11).take(5).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn hours(n: usize) -> Vec<String> {
        (0..n).map(|h| format!("2024-05-01T{h:02}:00")).collect()
    }

    #[test]
    fn test_empty_inputs_produce_no_chart() {
        assert!(TemperatureChart::build(&[], &[1.0]).is_none());
        assert!(TemperatureChart::build(&hours(3), &[]).is_none());
    }

    #[test]
    fn test_all_non_finite_produces_no_chart() {
        let temps = [f64::NAN, f64::INFINITY, f64::NEG_INFINITY];
        assert!(TemperatureChart::build(&hours(3), &temps).is_none());
    }

    #[rstest]
    #[case(&[5.0])]
    #[case(&[5.0, 5.0, 5.0])]
    #[case(&[-3.5, -3.5])]
    fn test_flat_series_is_widened(#[case] temps: &[f64]) {
        let chart = TemperatureChart::build(&hours(temps.len()), temps).unwrap();
        assert_eq!(chart.max - chart.min, 2.0);
        assert_eq!(chart.min, temps[0] - 1.0);
        // a flat line sits in the vertical middle
        for p in &chart.points {
            assert_eq!(p.y, PAD + PLOT_HEIGHT / 2.0);
        }
    }

    #[test]
    fn test_single_sample_uses_full_width_step() {
        let chart = TemperatureChart::build(&hours(1), &[12.0]).unwrap();
        assert_eq!(chart.points, vec![Point { x: PAD, y: 90.0 }]);
        assert_eq!(chart.labels, vec!["00:00".to_string()]);
    }

    #[test]
    fn test_geometry_spans_plot_area() {
        let chart = TemperatureChart::build(&hours(3), &[10.0, 20.0, 15.0]).unwrap();
        assert_eq!(
            chart.points,
            vec![
                Point { x: 24.0, y: 156.0 },
                Point { x: 320.0, y: 24.0 },
                Point { x: 616.0, y: 90.0 },
            ]
        );
        let area = chart.area();
        assert_eq!(area.first(), Some(&Point { x: 24.0, y: 156.0 }));
        assert_eq!(area.last(), Some(&Point { x: 616.0, y: 156.0 }));
        assert_eq!(area.len(), 5);
    }

    #[test]
    fn test_non_finite_values_are_skipped() {
        let temps = [10.0, f64::NAN, 20.0, f64::INFINITY];
        let chart = TemperatureChart::build(&hours(4), &temps).unwrap();
        assert_eq!(chart.points.len(), 2);
        assert_eq!(chart.min, 10.0);
        assert_eq!(chart.max, 20.0);
        assert_eq!(chart.points[1].x, 616.0);
    }

    #[rstest]
    #[case(3, &["00:00", "01:00", "02:00"])]
    #[case(24, &["00:00", "12:00", "23:00"])]
    #[case(7, &["00:00", "03:00", "06:00"])]
    #[case(2, &["00:00", "01:00"])]
    fn test_labels_come_from_unfiltered_timestamps(#[case] n: usize, #[case] expected: &[&str]) {
        // only one finite temperature: labels still follow the timestamp array
        let mut temps = vec![f64::NAN; n];
        temps[0] = 4.0;
        let chart = TemperatureChart::build(&hours(n), &temps).unwrap();
        assert_eq!(chart.labels, expected);
    }

    #[test]
    fn test_short_timestamps_give_empty_labels() {
        let times = vec!["now".to_string(), "later".to_string(), "2024-05-01T09:30".to_string()];
        let chart = TemperatureChart::build(&times, &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(chart.labels, vec!["", "", "09:30"]);
    }

    #[test]
    fn test_range_text_rounds_to_one_decimal() {
        let chart = TemperatureChart::build(&hours(2), &[12.34, 20.96]).unwrap();
        assert_eq!(chart.range_text(), "Min 12.3°C · Max 21.0°C");
    }

    #[test]
    fn test_build_is_idempotent() {
        let times = hours(24);
        let temps: Vec<f64> = (0..24).map(|h| 10.0 + (h as f64 * 0.7).sin() * 5.0).collect();
        let a = TemperatureChart::build(&times, &temps).unwrap();
        let b = TemperatureChart::build(&times, &temps).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_svg(), b.to_svg());
    }

    #[test]
    fn test_svg_markup() {
        let chart = TemperatureChart::build(&hours(3), &[10.0, 20.0, 15.0]).unwrap();
        let svg = chart.to_svg();
        assert!(svg.contains(r#"viewBox="0 0 640 180""#));
        assert!(svg.contains(r#"class="chart-line" points="24,156 320,24 616,90""#));
        assert!(svg.contains(r#"class="chart-area" points="24,156 24,156 320,24 616,90 616,156""#));
        assert!(svg.contains(r#"x="320" y="174" text-anchor="middle">01:00</text>"#));
        assert!(svg.contains("Min 10.0°C · Max 20.0°C"));
        assert_eq!(svg.matches("class=\"chart-label\"").count(), 3);
    }
}
