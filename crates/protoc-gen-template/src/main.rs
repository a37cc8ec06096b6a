//! protoc-gen-template - protoc plugin and template debugging tool
//!
//! Modes:
//! - no arguments - protoc plugin mode (request on stdin, response on stdout)
//! - `protoc-gen-template render` - render from a descriptor set without protoc
//! - `protoc-gen-template model` - print the model a template would receive

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use protoc_gen_template::{logging, output, plugin};
use protogen_core::PluginOptions;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "protoc-gen-template")]
#[command(author, version, about = "Render protobuf schemas through templates", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render files from a descriptor set (protoc --descriptor_set_out)
    Render {
        /// Serialized FileDescriptorSet
        #[arg(short, long)]
        descriptor_set: PathBuf,

        /// Plugin parameter string (template=...,lang=...,...)
        #[arg(short, long)]
        parameter: String,

        /// Files to generate (default: every file in the set)
        #[arg(short, long)]
        file: Vec<String>,

        /// Output directory for generated files
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },

    /// Print the built model as JSON
    Model {
        /// Serialized FileDescriptorSet
        #[arg(short, long)]
        descriptor_set: PathBuf,

        /// Plugin parameter string (template=...,lang=...,...)
        #[arg(short, long)]
        parameter: String,

        /// Files to generate (default: every file in the set)
        #[arg(short, long)]
        file: Vec<String>,
    },
}

fn load_request(
    path: &Path,
    parameter: String,
    files: Vec<String>,
) -> Result<prost_types::compiler::CodeGeneratorRequest> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {path:?}"))?;

    plugin::request_from_descriptor_set(&bytes, parameter, files)
        .with_context(|| format!("Failed to decode descriptor set {path:?}"))
}

fn main() -> Result<()> {
    logging::init();

    let cli = Cli::parse();

    match cli.command {
        None => {
            plugin::run_stdio()?;
        }
        Some(Commands::Render {
            descriptor_set,
            parameter,
            file,
            out,
        }) => {
            let request = load_request(&descriptor_set, parameter, file)?;
            let response = plugin::generate_in(&request, &out)?;
            output::write_all(&response.file, &out)
                .with_context(|| format!("Failed to write output to {out:?}"))?;
        }
        Some(Commands::Model {
            descriptor_set,
            parameter,
            file,
        }) => {
            let request = load_request(&descriptor_set, parameter, file)?;
            let options = PluginOptions::from_parameter(request.parameter())?;
            let models = plugin::build_models(&request, &options)?;
            println!("{}", serde_json::to_string_pretty(&models)?);
        }
    }

    Ok(())
}
