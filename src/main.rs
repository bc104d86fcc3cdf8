use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tfusage::config::{self, Config};
use tfusage::exit_codes::{codes, exit_code_for_anyhow};
use tfusage::output::{self, OutputFormat};
use tfusage::resource::load_resources;
use tfusage::templates::{TemplateStore, UsageTemplate};
use tfusage::usage::{self, UsageEngine};

#[derive(Parser)]
#[command(name = "tfusage")]
#[command(
    about = "Usage assumptions for Terraform cost estimates",
    long_about = "tfusage turns plain-language answers about how cloud resources are used into the\nusage assumptions a Terraform cost estimate needs.\n\nSupports:\n  - aws_instance (monthly hours)\n  - aws_lambda_function (monthly requests)\n  - aws_dynamodb_table (read/write request units, storage)\n\nFeatures:\n  - One question per resource, answers aligned by position\n  - Rule-based answer parsing (24/7, business hours, 5k, 2 million, ...)\n  - Built-in and custom usage templates\n  - Infracost breakdown input"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    output: OutputFormat,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the question to answer for each resource
    Questions {
        /// Resources file (JSON array or infracost breakdown)
        #[arg(short, long)]
        resources: PathBuf,
    },
    /// Generate usage assumptions from answers
    Generate {
        /// Resources file (JSON array or infracost breakdown)
        #[arg(short, long)]
        resources: PathBuf,
        /// Answers file (JSON array of strings, aligned with resources)
        #[arg(long)]
        answers: Option<PathBuf>,
        /// Answer text, repeatable; appended after answers from --answers
        #[arg(short, long = "answer")]
        answer: Vec<String>,
    },
    /// Manage usage templates
    Templates {
        #[command(subcommand)]
        subcommand: TemplateCommands,
    },
    /// Initialize configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = ".tfusage.toml")]
        path: PathBuf,
    },
}

#[derive(Subcommand)]
enum TemplateCommands {
    /// List built-in and custom templates
    List,
    /// Show a template
    Show { id: String },
    /// Apply a template to resources
    Apply {
        id: String,
        /// Resources file (JSON array or infracost breakdown)
        #[arg(short, long)]
        resources: PathBuf,
    },
    /// Save a custom template from a JSON file
    Save { file: PathBuf },
    /// Delete a custom template
    Delete { id: String },
}

fn main() {
    let cli = Cli::parse();

    // Setup logging - only warnings and errors unless verbose
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let code = match run(cli) {
        Ok(()) => codes::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_code_for_anyhow(&e)
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<()> {
    if let Commands::Init { path } = &cli.command {
        return config::init_config(path);
    }

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Questions { resources } => {
            ask(&resources, cli.output)?;
        }
        Commands::Generate {
            resources,
            answers,
            answer,
        } => {
            let engine = UsageEngine::new(config.defaults.clone());
            generate(&engine, &resources, answers.as_deref(), answer, cli.output)?;
        }
        Commands::Templates { subcommand } => {
            let store = TemplateStore::new(&config.templates.dir);
            handle_templates(subcommand, &store, cli.output)?;
        }
        Commands::Init { .. } => {}
    }

    Ok(())
}

fn ask(resources_path: &Path, format: OutputFormat) -> Result<()> {
    let resources = load_resources(resources_path)
        .with_context(|| format!("Failed to load resources: {}", resources_path.display()))?;
    let questions = usage::questions(&resources);
    info!("Generated {} questions", questions.iter().filter(|q| !q.is_empty()).count());
    println!("{}", output::render_questions(&resources, &questions, format)?);
    Ok(())
}

fn generate(
    engine: &UsageEngine,
    resources_path: &Path,
    answers_path: Option<&Path>,
    extra_answers: Vec<String>,
    format: OutputFormat,
) -> Result<()> {
    let resources = load_resources(resources_path)
        .with_context(|| format!("Failed to load resources: {}", resources_path.display()))?;

    let mut answers = match answers_path {
        Some(path) => read_answers(path)?,
        None => Vec::new(),
    };
    answers.extend(extra_answers);

    info!(
        "Generating usage for {} resources from {} answers",
        resources.len(),
        answers.len()
    );

    let usage = engine.generate_usage(&resources, answers.as_slice());
    println!("{}", output::render_usage(&usage.to_params(), format)?);
    Ok(())
}

fn read_answers(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read answers: {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| {
        format!(
            "Failed to parse answers: {} (expected a JSON array of strings)",
            path.display()
        )
    })
}

fn handle_templates(cmd: TemplateCommands, store: &TemplateStore, format: OutputFormat) -> Result<()> {
    match cmd {
        TemplateCommands::List => {
            println!("{}", output::render_templates(&store.all(), format)?);
        }
        TemplateCommands::Show { id } => {
            let template = store
                .get(&id)?
                .ok_or_else(|| tfusage::error::UsageError::TemplateNotFound(id.clone()))?;
            println!("{}", output::render_template(&template, format)?);
        }
        TemplateCommands::Apply { id, resources } => {
            let resources = load_resources(&resources)
                .with_context(|| format!("Failed to load resources: {}", resources.display()))?;
            let usage = store
                .apply(&id, &resources)
                .with_context(|| format!("Failed to apply template {}", id))?;
            println!("{}", output::render_usage(&usage, format)?);
        }
        TemplateCommands::Save { file } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read template: {}", file.display()))?;
            let template: UsageTemplate = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse template: {}", file.display()))?;
            let saved = store.save(template)?;
            println!("Saved template: {}", saved.id);
        }
        TemplateCommands::Delete { id } => {
            store.delete(&id)?;
            println!("Deleted template: {}", id);
        }
    }
    Ok(())
}
