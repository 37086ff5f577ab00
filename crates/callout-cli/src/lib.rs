//! CLI logic for the Callout scene renderer.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use callout::{CalloutError, SceneBuilder};

/// Run the Callout CLI application
///
/// Reads the input scene, renders it and writes the SVG to the output file.
///
/// # Errors
///
/// Returns `CalloutError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Scene parsing errors
/// - Invalid node types or attributes
pub fn run(args: &Args) -> Result<(), CalloutError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing scene"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = SceneBuilder::new(app_config);
    let scene = builder.parse(&source)?;
    let svg = builder.render_svg(&scene)?;

    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
