//! End-to-end runs of the 2D diagram and the 3D model.

use std::path::PathBuf;

use log::{debug, warn};

use crate::chart::render_diagram_png;
use crate::config::BridgeConfig;
use crate::curtain::{build_curtain, Curtain};
use crate::diagram::{build_longitudinal_diagram, LongitudinalDiagram};
use crate::errors::PipelineError;
use crate::model::BridgeModel;
use crate::results::{ForceDataset, ForceKind, ResultsStore};
use crate::scene::Scene;

/// Result of a diagram run.
#[derive(Debug)]
pub struct DiagramOutcome {
    /// Series that were drawn.
    pub diagram: LongitudinalDiagram,
    /// Where the image was written.
    pub output: PathBuf,
}

/// Result of a model run.
#[derive(Debug)]
pub struct ModelOutcome {
    /// Scene that was exported.
    pub scene: Scene,
    /// Where the document was written.
    pub output: PathBuf,
}

/// Load the dataset named in `config` and draw the reference girder.
///
/// # Errors
///
/// Returns [`PipelineError`] when the configuration is invalid, the dataset
/// cannot be loaded, a value is missing or the image cannot be written.
pub fn run_girder_diagram(config: &BridgeConfig) -> Result<DiagramOutcome, PipelineError> {
    config.validate()?;
    let dataset = ForceDataset::load(&config.dataset)?;
    run_girder_diagram_with(&dataset, config)
}

/// Draw the reference girder from an already loaded store.
///
/// # Errors
///
/// As [`run_girder_diagram`], without the loading step.
pub fn run_girder_diagram_with<S>(
    store: &S,
    config: &BridgeConfig,
) -> Result<DiagramOutcome, PipelineError>
where
    S: ResultsStore + ?Sized,
{
    config.validate()?;
    let girder = config.reference()?;
    let diagram = build_longitudinal_diagram(store, girder, config.span)?;
    report_discontinuities(&diagram, config.continuity_tolerance);
    render_diagram_png(&diagram, &config.diagram_output)?;
    Ok(DiagramOutcome {
        diagram,
        output: config.diagram_output.clone(),
    })
}

/// Log element boundaries where adjacent ends disagree.
///
/// Bending moment is continuous unless a concentrated moment is applied, so
/// a moment jump is a warning. Shear jumps under every point load and is only
/// logged for debugging.
fn report_discontinuities(diagram: &LongitudinalDiagram, tolerance: f64) {
    for jump in diagram.moment.discontinuities(tolerance) {
        warn!(
            "{}: moment jumps from {:.3} to {:.3} {} at {:.3} m",
            diagram.girder,
            jump.left,
            jump.right,
            ForceKind::Moment.unit(),
            jump.position
        );
    }
    for jump in diagram.shear.discontinuities(tolerance) {
        debug!(
            "{}: shear jumps from {:.3} to {:.3} {} at {:.3} m",
            diagram.girder,
            jump.left,
            jump.right,
            ForceKind::Shear.unit(),
            jump.position
        );
    }
}

/// Load the dataset and geometry named in `config` and export the 3D model.
///
/// # Errors
///
/// Returns [`PipelineError`] when the configuration is invalid, an input
/// cannot be loaded, a lookup fails or the document cannot be written.
pub fn run_bridge_model(config: &BridgeConfig) -> Result<ModelOutcome, PipelineError> {
    config.validate()?;
    let dataset = ForceDataset::load(&config.dataset)?;
    let model = BridgeModel::load(&config.geometry)?;
    run_bridge_model_with(&dataset, &model, config)
}

/// Export the 3D model from an already loaded store and geometry.
///
/// # Errors
///
/// As [`run_bridge_model`], without the loading step.
pub fn run_bridge_model_with<S>(
    store: &S,
    model: &BridgeModel,
    config: &BridgeConfig,
) -> Result<ModelOutcome, PipelineError>
where
    S: ResultsStore + ?Sized,
{
    config.validate()?;
    for girder in &config.girders {
        for (from, to) in model.chain_gaps(&girder.elements)? {
            warn!(
                "{}: element {from} does not end where element {to} starts",
                girder.name
            );
        }
    }

    let frame = model.wireframe();
    let curtains = ForceKind::ALL
        .into_iter()
        .flat_map(move |kind| {
            config.girders.iter().map(move |girder| {
                build_curtain(store, model, girder, kind, config.scale_factor)
            })
        })
        .collect::<Result<Vec<Curtain>, _>>()?;

    let scene = Scene::bridge(frame, &curtains);
    scene.write_html(&config.model_output)?;
    println!(
        "Successfully exported 3D model to '{}'",
        config.model_output.display()
    );
    Ok(ModelOutcome {
        scene,
        output: config.model_output.clone(),
    })
}
