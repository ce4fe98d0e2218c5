//! Command line front end.
//!
//! ```text
//! profile-builder classes [--all]
//! profile-builder generate --name "Cargo manifest" --class Container --class Goods [--submit]
//! profile-builder profiles
//! profile-builder serve [--binding 0.0.0.0] [--port 8000]
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use crate::{
    app::{self, AppContext},
    config::Config,
    environment::{resolve_from_env, Environment},
    logger,
    ontology::{hierarchy::ClassOrigin, store::OntologyStore, value_objects::Iri},
    profile::{
        catalog::{self, AvailableField, FieldSource},
        ProfileError, SavedProfile, SelectedField, SelectionSet, SubmissionReceipt,
    },
    server, Error, Result,
};

#[derive(Parser)]
#[command(name = "profile-builder", version, about)]
struct Cli {
    /// Configuration environment (`config/<environment>.yaml`).
    #[arg(global = true, short, long)]
    environment: Option<String>,

    /// Folder holding the environment configuration files.
    #[arg(global = true, long, default_value = crate::config::CONFIG_FOLDER)]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the fields available for selection.
    Classes {
        /// Include classes only known from subclass edges.
        #[arg(long)]
        all: bool,
    },
    /// Build a profile, write `<name>.ttl` and record it.
    Generate(GenerateArgs),
    /// List saved profiles.
    Profiles,
    /// Start the HTTP backend.
    Serve {
        #[arg(short, long)]
        binding: Option<String>,
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Profile name.
    #[arg(short, long)]
    pub name: String,
    /// Class IRI or label; repeat for several.
    #[arg(short = 'c', long = "class", required = true)]
    pub classes: Vec<String>,
    /// Export directory, overriding `profiles.export_dir`.
    #[arg(short, long)]
    pub out: Option<PathBuf>,
    /// Also post the fields to `profiles.endpoint`.
    #[arg(long)]
    pub submit: bool,
    /// Print the JSON projection.
    #[arg(long)]
    pub json: bool,
}

/// What `generate` did.
#[derive(Debug)]
pub struct GeneratedProfile {
    pub saved: SavedProfile,
    /// Inputs skipped because they resolved to an already selected field.
    pub duplicates: Vec<String>,
    /// Present when submission was requested.
    pub submission: Option<std::result::Result<SubmissionReceipt, ProfileError>>,
}

/// Parses arguments and runs the selected command.
///
/// # Errors
///
/// Configuration, validation, I/O and submission failures.
pub async fn main() -> Result<()> {
    let cli = Cli::parse();
    let environment = Environment::from(resolve_from_env(cli.environment.as_deref()));
    let config = environment.load_from_folder(&cli.config_dir)?;
    logger::init(&config.logger);
    tracing::debug!(%environment, "starting");

    match cli.command {
        Commands::Classes { all } => list_classes(&config, all).await,
        Commands::Generate(args) => generate(config, &args).await,
        Commands::Profiles => list_profiles(&config).await,
        Commands::Serve { binding, port } => {
            let binding = binding.unwrap_or_else(|| config.server.binding.clone());
            let port = port.unwrap_or(config.server.port);
            let ctx = AppContext::create(config).await?;
            server::serve(ctx, &binding, port).await
        }
    }
}

async fn load_ontology(config: &Config) -> Result<OntologyStore> {
    let loader = app::create_loader(config)?;
    Ok(app::load_or_empty(config, &loader).await)
}

async fn list_classes(config: &Config, all: bool) -> Result<()> {
    let ontology = load_ontology(config).await?;
    if !ontology.is_loaded() {
        println!("{}", "ontology unavailable, offering builtin fields".yellow());
    }

    if all && ontology.is_loaded() {
        for node in ontology.hierarchy().nodes() {
            let origin = match node.origin() {
                ClassOrigin::Declared => "declared".green(),
                ClassOrigin::Inferred => "inferred".yellow(),
            };
            println!("{:<24} {:<9} {}", node.label().bold(), origin, node.iri());
        }
        return Ok(());
    }

    for available in catalog::available_fields(&ontology, config.ontology.sort_by_label) {
        let source = match available.source {
            FieldSource::Declared => "declared".green(),
            FieldSource::Builtin => "builtin".cyan(),
        };
        println!(
            "{:<24} {:<9} {}",
            available.field.label.bold(),
            source,
            available.field.iri
        );
    }
    Ok(())
}

/// Resolves each input to a field: an available field by IRI or unique
/// label, else the input parsed as an IRI.
///
/// # Errors
///
/// [`Error::BadRequest`] for input that is neither.
pub fn resolve_selection(
    available: &[AvailableField],
    inputs: &[String],
) -> Result<(SelectionSet, Vec<String>)> {
    let mut selection = SelectionSet::new();
    let mut duplicates = Vec::new();
    for input in inputs {
        let field = match catalog::resolve(available, input) {
            Some(field) => field.clone(),
            None => SelectedField::new(Iri::new(input.as_str()).map_err(|_| {
                Error::BadRequest(format!("`{input}` is neither a known class nor an IRI"))
            })?),
        };
        if !selection.add(field) {
            duplicates.push(input.clone());
        }
    }
    Ok((selection, duplicates))
}

/// Loads the ontology, saves the profile and optionally submits it.
///
/// # Errors
///
/// Unresolvable inputs, an empty name, export and store failures. A failed
/// submission is reported in [`GeneratedProfile::submission`].
pub async fn generate_profile(mut config: Config, args: &GenerateArgs) -> Result<GeneratedProfile> {
    if let Some(out) = &args.out {
        config.profiles.export_dir.clone_from(out);
    }
    let ontology = load_ontology(&config).await?;
    let available = catalog::available_fields(&ontology, config.ontology.sort_by_label);
    let (selection, duplicates) = resolve_selection(&available, &args.classes)?;

    let mut service = app::create_profile_service(&config).await?;
    let saved = service.save(&ontology, &args.name, &selection).await?;
    let submission = if args.submit {
        Some(service.submit(&selection).await)
    } else {
        None
    };
    Ok(GeneratedProfile {
        saved,
        duplicates,
        submission,
    })
}

async fn generate(config: Config, args: &GenerateArgs) -> Result<()> {
    let generated = generate_profile(config, args).await?;
    for input in &generated.duplicates {
        println!("{} `{input}` selected twice", "skipping".yellow());
    }
    let saved = &generated.saved;
    println!(
        "{} {} ({} classes)",
        "wrote".green(),
        saved.path.display(),
        saved.document.declarations.len()
    );
    if args.json {
        println!("{}", serde_json::to_string_pretty(&saved.document.json)?);
    }

    match generated.submission {
        Some(Ok(receipt)) => println!("{} {}", "submitted".green(), receipt.message),
        Some(Err(err)) => {
            println!("{} {err}", "submission failed:".red());
            return Err(err.into());
        }
        None => {}
    }
    Ok(())
}

async fn list_profiles(config: &Config) -> Result<()> {
    let service = app::create_profile_service(config).await?;
    let records = service.store().list();
    if records.is_empty() {
        println!("no saved profiles");
    }
    for record in records {
        let labels: Vec<_> = record.fields.iter().map(|f| f.label.as_str()).collect();
        println!(
            "{:<24} {} [{}]",
            record.name.bold(),
            record.saved_at.format("%Y-%m-%d %H:%M:%S"),
            labels.join(", ")
        );
    }
    Ok(())
}
