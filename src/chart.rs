//! Static two-panel PNG of a longitudinal diagram.

use std::path::{Path, PathBuf};

use log::info;
use plotters::prelude::*;

use crate::diagram::{LongitudinalDiagram, PlotSeries};
use crate::errors::ExportError;
use crate::results::ForceKind;

/// Output resolution in dots per inch.
pub const DPI: u32 = 300;
/// Figure edge length in inches; the figure is square.
pub const FIGURE_INCHES: u32 = 10;

/// Map any drawing failure onto [`ExportError::Chart`].
fn chart_error(error: impl std::fmt::Display) -> ExportError {
    ExportError::Chart(error.to_string())
}

/// Plotters colour of a force kind.
fn series_color(kind: ForceKind) -> RGBColor {
    match kind {
        ForceKind::Moment => BLUE,
        ForceKind::Shear => RED,
    }
}

/// Axis label of a force kind.
fn value_label(kind: ForceKind) -> String {
    match kind {
        ForceKind::Moment => format!("Moment ({})", kind.unit()),
        ForceKind::Shear => format!("Shear Force ({})", kind.unit()),
    }
}

/// Value range with some headroom; a flat series still gets a visible band.
fn padded_range(series: &PlotSeries) -> (f64, f64) {
    let (low, high) = series.value_range().unwrap_or((0.0, 0.0));
    let (low, high) = (low.min(0.0), high.max(0.0));
    let pad = if high > low { (high - low) * 0.05 } else { 1.0 };
    (low - pad, high + pad)
}

/// Draw one force panel.
fn draw_panel<DB>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    diagram: &LongitudinalDiagram,
    kind: ForceKind,
) -> Result<(), ExportError>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let series = diagram.series(kind);
    let color = series_color(kind);
    let (low, high) = padded_range(series);
    let length = diagram.length().max(f64::EPSILON);

    let mut chart = ChartBuilder::on(area)
        .caption(
            format!("{} Diagram (Central Girder)", kind.name()),
            ("sans-serif", 64),
        )
        .margin(40)
        .x_label_area_size(120)
        .y_label_area_size(180)
        .build_cartesian_2d(0.0..length, low..high)
        .map_err(chart_error)?;

    chart
        .configure_mesh()
        .x_desc("Bridge Length (m)")
        .y_desc(value_label(kind))
        .label_style(("sans-serif", 36))
        .axis_desc_style(("sans-serif", 44))
        .draw()
        .map_err(chart_error)?;

    chart
        .draw_series(AreaSeries::new(
            series.points.iter().copied(),
            0.0,
            &color.mix(0.3),
        ))
        .map_err(chart_error)?;
    chart
        .draw_series(LineSeries::new(
            series.points.iter().copied(),
            color.stroke_width(4),
        ))
        .map_err(chart_error)?
        .label(format!("{} ({})", kind.name(), kind.symbol()))
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 40, y)], color.stroke_width(4)));

    chart
        .configure_series_labels()
        .label_font(("sans-serif", 36))
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(chart_error)?;
    Ok(())
}

/// Hidden sibling the image is drawn into before being moved into place.
fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.partial.png"))
}

/// Draw both panels into a bitmap at `path`.
fn draw_png(diagram: &LongitudinalDiagram, path: &Path) -> Result<(), ExportError> {
    let edge = DPI * FIGURE_INCHES;
    let root = BitMapBackend::new(path, (edge, edge)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_error)?;
    let panels = root.split_evenly((2, 1));
    for (panel, kind) in panels.iter().zip(ForceKind::ALL) {
        draw_panel(panel, diagram, kind)?;
    }
    root.present().map_err(chart_error)
}

/// Render `diagram` as a two-panel PNG, moment above shear.
///
/// The parent directory is created when missing. The image is drawn under a
/// temporary name and renamed once complete, so a failed render leaves no
/// file at `path`.
///
/// # Errors
///
/// Returns [`ExportError::Io`] when the directory or file cannot be written
/// and [`ExportError::Chart`] when drawing fails.
pub fn render_diagram_png(
    diagram: &LongitudinalDiagram,
    path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| ExportError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let staging = staging_path(path);
    if let Err(error) = draw_png(diagram, &staging) {
        let _ = std::fs::remove_file(&staging);
        return Err(error);
    }
    std::fs::rename(&staging, path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("wrote {} diagram to {}", diagram.girder, path.display());
    Ok(())
}
