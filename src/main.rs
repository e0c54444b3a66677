//! acsets - command-line front end for schema descriptors and instances.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use acsets::codec::CodecConfig;
use acsets::files;
use acsets::interchange::{self, JsonSchemaOptions};
use acsets::petri::PetriSchema;
use acsets::AcsetResult;

/// Work with acset schemas and their JSON instances
#[derive(Parser)]
#[command(name = "acsets", version, about)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a built-in Petri net schema
    Schema {
        /// Schema name (e.g. LabelledPetriNet)
        name: String,
        /// Print the derived JSON-Schema instead of the descriptor
        #[arg(long)]
        json_schema: bool,
        /// `$id` of the derived JSON-Schema
        #[arg(long, requires = "json_schema")]
        uri: Option<String>,
    },

    /// Decode an instance against a schema descriptor and report table sizes
    Check {
        /// Schema descriptor file
        #[arg(long)]
        schema: PathBuf,
        /// Instance file
        instance: PathBuf,
    },

    /// Derive JSON-Schemas for every descriptor in a directory
    Convert {
        /// Directory of `*.json` schema descriptors
        descriptor_dir: PathBuf,
        /// Output directory
        out_dir: PathBuf,
        /// Base URI used to build each `$id`
        #[arg(long)]
        base_uri: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = CodecConfig::new().pretty(cli.pretty);
    match run(cli.command, &config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command, config: &CodecConfig) -> AcsetResult<ExitCode> {
    match command {
        Command::Schema {
            name,
            json_schema,
            uri,
        } => {
            let Some(variant) = PetriSchema::from_name(&name) else {
                let known: Vec<&str> = PetriSchema::ALL.iter().map(|s| s.name()).collect();
                eprintln!("Unknown schema '{}'. Known schemas: {}", name, known.join(", "));
                return Ok(ExitCode::FAILURE);
            };
            let schema = variant.build()?;
            let text = if json_schema {
                let mut options = JsonSchemaOptions::new();
                if let Some(uri) = uri {
                    options = options.uri(uri);
                }
                config.render(&interchange::derive_json_schema(&schema, &options))?
            } else {
                interchange::to_descriptor_string(&schema, config)?
            };
            println!("{}", text);
        }
        Command::Check { schema, instance } => {
            let schema = files::read_schema(&schema)?;
            let acs = files::read_acset(&instance, schema)?;
            debug!(acset = acs.name(), "instance decoded");
            for ob in acs.schema().obs() {
                println!("{}\t{}", ob.name, acs.nparts(ob)?);
            }
        }
        Command::Convert {
            descriptor_dir,
            out_dir,
            base_uri,
        } => {
            let written =
                files::convert_directory(&descriptor_dir, &out_dir, base_uri.as_deref(), config)?;
            for path in &written {
                println!("{}", path.display());
            }
            println!("({} written)", written.len());
        }
    }
    Ok(ExitCode::SUCCESS)
}
