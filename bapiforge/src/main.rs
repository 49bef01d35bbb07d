use std::path::PathBuf;

use anyhow::Result;
use bapiforge::{
    bapigen::ParameterSchema,
    ctx::{Adapter, AppContext, GenerateOptions},
    session::MergeOutcome,
};
use clap::{Parser, Subcommand};
use colored::Colorize;
use log::debug;

#[derive(Parser)]
#[command(version, about = "Generate entities from BAPI parameter schemas", long_about = None)]
struct Cli {
    /// Workspace directory holding the session document and connection properties.
    #[arg(short, long, global = true)]
    workspace: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate entities for a function and register them with a session
    Generate(GenerateArgs),
    /// List all connection properties
    ListProperties,
    /// Set a connection property
    SetProperty {
        /// The property key
        #[arg(long)]
        key: String,
        /// The property value
        #[arg(long)]
        value: String,
    },
    /// Delete a connection property
    DeleteProperty {
        /// The property key
        #[arg(long)]
        key: String,
    },
    /// List the configured sessions
    Sessions,
    /// Print the JSON Schema of the parameter schema file format
    Schema,
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// Parameter schema file (json or toml)
    #[arg(short, long)]
    schema: PathBuf,
    /// Entity name, defaults to the camel-cased function name
    #[arg(short, long)]
    name: Option<String>,
    /// Package of the generated entities
    #[arg(short, long)]
    package: Option<String>,
    /// Output directory for entity definitions
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// Connection adapter of a new session
    #[arg(short, long, value_enum, default_value_t = Adapter::Jco)]
    adapter: Adapter,
    /// Existing session to register the entity with
    #[arg(long, conflicts_with = "replace")]
    session: Option<String>,
    /// Replace a session sharing the configured name instead of updating it
    #[arg(long)]
    replace: bool,
}

fn main() -> Result<()> {
    env_logger::builder()
        .format_module_path(false)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    let workspace = match cli.workspace {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    debug!("workspace: {}", workspace.display());
    let ctx = AppContext::new(workspace);

    match cli.command {
        Commands::Generate(args) => {
            let report = ctx.generate(&GenerateOptions {
                schema: args.schema,
                name: args.name,
                package: args.package,
                out_dir: args.out,
                adapter: args.adapter,
                session: args.session,
                replace: args.replace,
            })?;

            let msg = match &report.outcome {
                MergeOutcome::Added { name } => format!("Session [{name}] added"),
                MergeOutcome::Replaced { name } => format!("Session [{name}] replaced"),
                MergeOutcome::Updated { name } => format!("Session [{name}] updated"),
            };
            println!("{}", msg.green());
            println!(
                "{}",
                format!("Wrote configuration file [{}]", ctx.paths.sessions().display())
                    .bold()
                    .purple()
            );
        }
        Commands::ListProperties => {
            let properties = ctx.properties()?;
            for (key, value) in properties.entries() {
                println!("{key}={value}");
            }
        }
        Commands::SetProperty { key, value } => {
            let mut properties = ctx.properties()?;
            properties.set(key, value);
            properties.save()?;
        }
        Commands::DeleteProperty { key } => {
            let mut properties = ctx.properties()?;
            if properties.delete(&key).is_none() {
                println!("{}", format!("Property [{key}] not set").yellow());
            }
            properties.save()?;
        }
        Commands::Sessions => {
            let sessions = ctx.sessions()?;
            for name in sessions.names() {
                println!("{name}");
            }
        }
        Commands::Schema => {
            let schema = schemars::schema_for!(ParameterSchema);
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }

    Ok(())
}
