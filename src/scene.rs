//! The interactive 3D bridge scene: frame, curtains and the force toggle.

use std::path::Path;

use log::info;
use plotly::common::Title;
use plotly::layout::update_menu::{
    Button, ButtonMethod, UpdateMenu, UpdateMenuDirection, UpdateMenuType,
};
use plotly::layout::{AspectMode, Axis, LayoutScene};
use plotly::{Layout, Plot};
use serde_json::json;

use crate::curtain::Curtain;
use crate::errors::ExportError;
use crate::figure::{line_trace, LineStyle};
use crate::geometry::Polyline;
use crate::results::ForceKind;

/// Title shown before either button is pressed.
pub const SCENE_TITLE: &str = "3D Bridge Forces (Interactive)";

/// When a trace is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceGroup {
    /// Shown whichever force is selected.
    Always,
    /// Shown only while this force is selected.
    Force(ForceKind),
}

/// One named set of polylines in the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneTrace {
    /// Legend name.
    pub name: String,
    /// Polylines drawn by the trace.
    pub polylines: Vec<Polyline>,
    /// CSS colour name.
    pub color: &'static str,
    /// Line width in pixels.
    pub width: f64,
    /// Visibility group.
    pub group: TraceGroup,
}

/// Frame and curtains, ready to export.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Traces in drawing order.
    pub traces: Vec<SceneTrace>,
    /// Force shown when the scene opens.
    pub initial: ForceKind,
}

impl Scene {
    /// Assemble the bridge scene.
    ///
    /// The frame comes first, followed by every moment curtain and then every
    /// shear curtain, each group keeping the order of `curtains`.
    #[must_use]
    pub fn bridge(frame: Vec<Polyline>, curtains: &[Curtain]) -> Self {
        let mut traces = vec![SceneTrace {
            name: "Bridge Frame".to_owned(),
            polylines: frame,
            color: "lightgrey",
            width: 2.0,
            group: TraceGroup::Always,
        }];
        for kind in ForceKind::ALL {
            traces.extend(
                curtains
                    .iter()
                    .filter(|curtain| curtain.kind == kind)
                    .map(|curtain| SceneTrace {
                        name: format!("{} ({})", curtain.girder, kind.symbol()),
                        polylines: curtain.polylines(),
                        color: kind.color(),
                        width: 4.0,
                        group: TraceGroup::Force(kind),
                    }),
            );
        }
        Self {
            traces,
            initial: ForceKind::Moment,
        }
    }

    /// Visibility of every trace while `kind` is selected.
    #[must_use]
    pub fn visibility(&self, kind: ForceKind) -> Vec<bool> {
        self.traces
            .iter()
            .map(|trace| match trace.group {
                TraceGroup::Always => true,
                TraceGroup::Force(group) => group == kind,
            })
            .collect()
    }

    /// The plotly figure for the scene.
    #[must_use]
    pub fn figure(&self) -> Plot {
        let mut plot = Plot::new();
        for (trace, visible) in self.traces.iter().zip(self.visibility(self.initial)) {
            let style = LineStyle {
                color: trace.color,
                width: trace.width,
            };
            plot.add_trace(line_trace(&trace.name, &trace.polylines, style, visible));
        }

        let buttons = ForceKind::ALL
            .into_iter()
            .map(|kind| {
                let title = format!("3D {} Diagram ({})", kind.name(), kind.symbol());
                Button::new()
                    .label(&format!("Show {} ({})", kind.name(), kind.symbol()))
                    .method(ButtonMethod::Update)
                    .args(json!([
                        { "visible": self.visibility(kind) },
                        { "title": { "text": title } }
                    ]))
            })
            .collect();

        let scene = LayoutScene::new()
            .x_axis(Axis::new().title(Title::with_text("Length (X)")))
            .y_axis(Axis::new().title(Title::with_text("Force Magnitude (Y)")))
            .z_axis(Axis::new().title(Title::with_text("Width (Z)")))
            .aspect_mode(AspectMode::Data);

        plot.set_layout(
            Layout::new()
                .title(Title::with_text(SCENE_TITLE))
                .scene(scene)
                .update_menus(vec![UpdateMenu::new()
                    .ty(UpdateMenuType::Buttons)
                    .direction(UpdateMenuDirection::Left)
                    .x(0.05)
                    .y(1.0)
                    .buttons(buttons)]),
        );
        plot
    }

    /// Render the scene as a standalone HTML page with plotly.js embedded.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.figure().to_html()
    }

    /// Write the scene to `path` as an HTML page.
    ///
    /// The parent directory must already exist.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Io`] when the file cannot be written.
    pub fn write_html(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_html()).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("wrote {} traces to {}", self.traces.len(), path.display());
        Ok(())
    }
}
