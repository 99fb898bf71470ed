//! Chart rendering
//!
//! Draws the two-panel PNG: grouped daily standing/sitting bars on top and
//! the per-day timeline of intervals below.

use crate::error::DeskError;
use crate::report::{DayReport, ReportData};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle};
use std::path::Path;

/// Output size in pixels (14 x 10 inches at 150 dpi)
pub const IMAGE_SIZE: (u32, u32) = (2100, 1500);

pub const STANDING_COLOR: RGBColor = RGBColor(0x2e, 0xcc, 0x71);
pub const SITTING_COLOR: RGBColor = RGBColor(0xe7, 0x4c, 0x3c);

const BAR_WIDTH: f64 = 0.35;
const TIMELINE_BAR_HEIGHT: f64 = 0.6;
const TIMELINE_START_HOUR: f64 = 7.0;
const TIMELINE_END_HOUR: f64 = 18.0;

/// Whether the system can supply the sans-serif font the chart text uses
pub fn fonts_available() -> bool {
    label_font().box_size("Standing").is_ok()
}

/// Render the daily bar chart and the timeline into a PNG at `path`
pub fn render_png(report: &ReportData, path: &Path) -> Result<(), DeskError> {
    if !fonts_available() {
        return Err(DeskError::Chart(
            "no sans-serif font found for chart labels".to_string(),
        ));
    }

    let root = BitMapBackend::new(path, IMAGE_SIZE).into_drawing_area();
    draw_report(&root, report).map_err(|e| DeskError::Chart(e.to_string()))?;
    log::info!("wrote chart to {}", path.display());
    Ok(())
}

/// Draw both panels onto any plotters backend
pub fn draw_report<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    report: &ReportData,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let panels = root.split_evenly((2, 1));
    draw_daily_bars(&panels[0], report)?;
    draw_timeline(&panels[1], report)?;

    root.present()
}

fn title_font() -> FontDesc<'static> {
    FontDesc::new(FontFamily::SansSerif, 32.0, FontStyle::Bold)
}

fn label_font() -> FontDesc<'static> {
    FontDesc::new(FontFamily::SansSerif, 20.0, FontStyle::Normal)
}

fn legend_swatch(x: i32, y: i32, color: RGBColor) -> Rectangle<(i32, i32)> {
    Rectangle::new([(x, y - 8), (x + 20, y + 8)], color.filled())
}

/// Label of the day at integer position `x`, blank between days
fn day_label(labels: &[String], x: f64) -> String {
    let idx = x.round();
    if (x - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

/// One bar per day, shifted by `offset` from the day's position
fn day_bars(
    report: &ReportData,
    offset: f64,
    value: fn(&DayReport) -> f64,
    color: RGBColor,
) -> impl Iterator<Item = Rectangle<(f64, f64)>> + '_ {
    report.days.iter().enumerate().map(move |(i, day)| {
        let center = i as f64 + offset;
        Rectangle::new(
            [
                (center - BAR_WIDTH / 2.0, 0.0),
                (center + BAR_WIDTH / 2.0, value(day)),
            ],
            color.filled(),
        )
    })
}

/// Timeline bars of one state, clipped to the visible hours.
///
/// The first day is drawn on the top row.
fn timeline_bars(
    report: &ReportData,
    standing: bool,
    color: RGBColor,
) -> Vec<Rectangle<(f64, f64)>> {
    let n = report.len();
    let mut bars = Vec::new();
    for (i, day) in report.days.iter().enumerate() {
        let y = (n - 1 - i) as f64;
        for segment in day.segments.iter().filter(|s| s.is_standing == standing) {
            let start = segment.start_hour.max(TIMELINE_START_HOUR);
            let end = (segment.start_hour + segment.duration_hours).min(TIMELINE_END_HOUR);
            if end <= start {
                continue;
            }
            bars.push(Rectangle::new(
                [
                    (start, y - TIMELINE_BAR_HEIGHT / 2.0),
                    (end, y + TIMELINE_BAR_HEIGHT / 2.0),
                ],
                color.mix(0.8).filled(),
            ));
        }
    }
    bars
}

fn draw_daily_bars<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    report: &ReportData,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let labels = report.labels();
    let n = report.len().max(1);
    let y_max = report.max_minutes() * 1.15;

    let mut chart = ChartBuilder::on(area)
        .caption("Daily Standing vs Sitting Time", title_font())
        .margin(25)
        .set_label_area_size(LabelAreaPosition::Left, 80)
        .set_label_area_size(LabelAreaPosition::Bottom, 50)
        .build_cartesian_2d(-0.5..(n as f64 - 0.5), 0.0..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(WHITE)
        .bold_line_style(BLACK.mix(0.3))
        .x_labels(n)
        .x_label_formatter(&|x| day_label(&labels, *x))
        .y_label_formatter(&|y| format!("{:.0}", y))
        .y_desc("Minutes")
        .label_style(label_font())
        .draw()?;

    chart
        .draw_series(day_bars(
            report,
            -BAR_WIDTH / 2.0,
            |d| d.standing_minutes,
            STANDING_COLOR,
        ))?
        .label("Standing")
        .legend(|(x, y)| legend_swatch(x, y, STANDING_COLOR));

    chart
        .draw_series(day_bars(
            report,
            BAR_WIDTH / 2.0,
            |d| d.sitting_minutes,
            SITTING_COLOR,
        ))?
        .label("Sitting")
        .legend(|(x, y)| legend_swatch(x, y, SITTING_COLOR));

    // Value labels above every non-empty bar
    let value_style =
        TextStyle::from(FontDesc::new(FontFamily::SansSerif, 16.0, FontStyle::Normal))
            .pos(Pos::new(HPos::Center, VPos::Bottom));
    let mut annotations = Vec::new();
    for (i, day) in report.days.iter().enumerate() {
        for (offset, value) in [
            (-BAR_WIDTH / 2.0, day.standing_minutes),
            (BAR_WIDTH / 2.0, day.sitting_minutes),
        ] {
            if value > 0.0 {
                annotations.push(Text::new(
                    format!("{}", value as i64),
                    (i as f64 + offset, value),
                    value_style.clone(),
                ));
            }
        }
    }
    chart.draw_series(annotations)?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK.mix(0.5))
        .label_font(label_font())
        .draw()
}

fn draw_timeline<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    report: &ReportData,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let labels = report.labels();
    let n = report.len().max(1);
    let row_label = |y: f64| {
        let idx = y.round();
        if (y - idx).abs() > 1e-6 || idx < 0.0 || idx as usize >= n {
            return String::new();
        }
        day_label(&labels, (n - 1 - idx as usize) as f64)
    };

    let mut chart = ChartBuilder::on(area)
        .caption(
            "Daily Timeline (Standing = Green, Sitting = Red)",
            title_font(),
        )
        .margin(25)
        .set_label_area_size(LabelAreaPosition::Left, 140)
        .set_label_area_size(LabelAreaPosition::Bottom, 50)
        .build_cartesian_2d(
            TIMELINE_START_HOUR..TIMELINE_END_HOUR,
            -0.5..(n as f64 - 0.5),
        )?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .light_line_style(WHITE)
        .bold_line_style(BLACK.mix(0.3))
        .x_labels((TIMELINE_END_HOUR - TIMELINE_START_HOUR) as usize + 1)
        .x_label_formatter(&|x| format!("{}:00", x.round() as i64))
        .y_labels(n)
        .y_label_formatter(&|y| row_label(*y))
        .x_desc("Hour of Day")
        .label_style(label_font())
        .draw()?;

    chart
        .draw_series(timeline_bars(report, true, STANDING_COLOR))?
        .label("Standing")
        .legend(|(x, y)| legend_swatch(x, y, STANDING_COLOR));

    chart
        .draw_series(timeline_bars(report, false, SITTING_COLOR))?
        .label("Sitting")
        .legend(|(x, y)| legend_swatch(x, y, SITTING_COLOR));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK.mix(0.5))
        .label_font(label_font())
        .draw()
}
