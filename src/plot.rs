use egui::Color32;
use egui_plot::{Corner, Legend, Line, Plot, PlotUi};

use crate::color::{generate_palette, ColorPalette};
use crate::data::model::Dataset;
use crate::error::Error;

// ---------------------------------------------------------------------------
// Time-series styling
// ---------------------------------------------------------------------------

/// Visual style shared by all time-series figures of a paper.
#[derive(Debug, Clone)]
pub struct TimeSeriesStyle {
    pub xlabel: String,
    pub ylabel: String,
    /// Legend placement on the plot.
    pub legend_corner: Corner,
    pub legend_alpha: f32,
    pub line_width: f32,
    /// Colour cycle for the series. Empty means "generate one per series".
    pub colors: Vec<Color32>,
    pub show_grid: bool,
    /// Shift x values so the series starts at zero. Useful when the x-axis
    /// holds absolute timestamps.
    pub normalize_x: bool,
}

impl Default for TimeSeriesStyle {
    fn default() -> Self {
        Self {
            xlabel: "Time (s)".to_string(),
            ylabel: "Value".to_string(),
            legend_corner: Corner::RightTop,
            legend_alpha: 0.95,
            line_width: 2.0,
            colors: ColorPalette::categorical(),
            show_grid: true,
            normalize_x: true,
        }
    }
}

impl TimeSeriesStyle {
    /// Apply axis labels, legend placement, and grid settings to a plot
    /// builder.
    pub fn apply<'a>(&self, plot: Plot<'a>) -> Plot<'a> {
        plot.legend(
            Legend::default()
                .position(self.legend_corner)
                .background_alpha(self.legend_alpha),
        )
        .x_axis_label(self.xlabel.clone())
        .y_axis_label(self.ylabel.clone())
        .show_grid(self.show_grid)
    }
}

// ---------------------------------------------------------------------------
// Series extraction
// ---------------------------------------------------------------------------

/// Pair the `x` and `y` columns into plot points, skipping rows where
/// either side is missing or non-numeric.
pub fn series_points(
    dataset: &Dataset,
    x: &str,
    y: &str,
    normalize_x: bool,
) -> Result<Vec<[f64; 2]>, Error> {
    let xs = dataset
        .column(x)
        .ok_or_else(|| Error::UnknownColumn(x.to_string()))?;
    let ys = dataset
        .column(y)
        .ok_or_else(|| Error::UnknownColumn(y.to_string()))?;

    let mut points: Vec<[f64; 2]> = xs
        .iter()
        .zip(ys)
        .filter_map(|(xv, yv)| Some([xv.as_f64()?, yv.as_f64()?]))
        .collect();

    if normalize_x {
        let x0 = points
            .iter()
            .map(|p| p[0])
            .fold(f64::INFINITY, f64::min);
        if x0.is_finite() {
            for p in &mut points {
                p[0] -= x0;
            }
        }
    }

    Ok(points)
}

// ---------------------------------------------------------------------------
// Plotting onto a caller-supplied handle
// ---------------------------------------------------------------------------

/// Push one styled line per `y` column into the caller's plot handle.
/// The handle is mutated in place; this crate never owns a drawing
/// surface.
pub fn plot_time_series<S: AsRef<str>>(
    plot_ui: &mut PlotUi,
    dataset: &Dataset,
    x: &str,
    y: &[S],
    style: &TimeSeriesStyle,
) -> Result<(), Error> {
    let generated;
    let colors: &[Color32] = if style.colors.is_empty() {
        generated = generate_palette(y.len());
        &generated
    } else {
        &style.colors
    };

    for (i, column) in y.iter().enumerate() {
        let name = column.as_ref();
        let points = series_points(dataset, x, name, style.normalize_x)?;
        let color = colors
            .get(i % colors.len().max(1))
            .copied()
            .unwrap_or(ColorPalette::BLACK);

        let line = Line::new(points)
            .name(name)
            .color(color)
            .width(style.line_width);
        plot_ui.line(line);
    }

    Ok(())
}
