//! Plain-text summary of a longitudinal diagram.

use std::fmt::Write;

use crate::diagram::LongitudinalDiagram;
use crate::results::ForceKind;

/// Render a textual summary of a longitudinal diagram.
///
/// The report lists the element length and, for each force, the peak
/// positive and negative values with the distance they occur at. Sagging
/// moments are positive in the dataset's sign convention.
#[must_use]
pub fn render_summary(diagram: &LongitudinalDiagram) -> String {
    let mut output = String::new();

    writeln!(
        &mut output,
        "{} ({} points per series, element length = {:.3} m, span = {:.3} m)",
        diagram.girder,
        diagram.moment.len(),
        diagram.element_length,
        diagram.length()
    )
    .expect("writing to string cannot fail");

    for kind in ForceKind::ALL {
        let series = diagram.series(kind);
        let unit = kind.unit();
        match (series.max_point(), series.min_point()) {
            (Some((max_at, max)), Some((min_at, min))) => writeln!(
                &mut output,
                "{} ({}): max {max:+.2} {unit} at {max_at:.3} m, min {min:+.2} {unit} at {min_at:.3} m",
                kind.name(),
                kind.symbol()
            )
            .expect("writing to string cannot fail"),
            _ => writeln!(&mut output, "{} ({}): no data", kind.name(), kind.symbol())
                .expect("writing to string cannot fail"),
        }
    }

    output
}
