//! CLI logic for the Canopy diagram tool.
//!
//! The CLI is a headless host for the engine: it loads a record forest from
//! TOML, builds a diagram, optionally replays a scripted interaction session
//! against it, and writes the final state as SVG.

pub mod error_adapter;
pub mod records;
pub mod script;

mod args;
mod config;
mod error;

pub use args::Args;
pub use config::ConfigError;
pub use error::{CliError, Document, TomlError};

use log::info;

use canopy::Diagram;

/// Run the Canopy CLI application
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration, records or script parse errors
/// - Invalid configuration values or duplicate record ids
/// - SVG export errors
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing records"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let records = records::load_records(&args.input)?;

    let mut diagram = Diagram::new(app_config)?;
    diagram.build(records)?;
    diagram.on_node_selected(|node| {
        info!(
            node_id:% = node.id,
            kind:% = node.kind,
            label = node.label.as_str(),
            payload_keys = node.payload.len();
            "Selected node"
        );
    });

    if let Some(script_path) = &args.script {
        let steps = script::load_script(script_path)?;
        script::replay(&mut diagram, &steps)?;
    }

    diagram.export_svg(&args.output)?;
    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
