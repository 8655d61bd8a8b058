// src/main.rs
// cineprompt - cinematic prompt builder, template library and image analyzer

use anyhow::{Context, Result};
use cineprompt::{
    clipboard::SystemClipboard,
    config::{EnvConfig, FileConfig, Settings},
    image::ImagePayload,
    llm::{GeminiClient, PromptService, UnconfiguredService},
    prompt::{FormatOptions, PromptField, PromptSection, format_display, format_prompt, presets},
    session::Session,
    studio::{Repl, Studio},
    web,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "cineprompt")]
#[command(about = "Cinematic prompt builder, template library and image-to-prompt analyzer")]
#[command(version)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive terminal studio (default)
    Studio,

    /// Local JSON API over one in-memory session
    Serve {
        /// Port to listen on (default from config, else 3030)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the formatted prompt for a section read from a JSON file
    Format {
        /// JSON file with all eight fields; omitted means an empty form
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Prepend the strict identity clause
        #[arg(long)]
        strict: bool,

        /// Use the library/analyzer layout instead of the builder one
        #[arg(long)]
        display: bool,
    },

    /// List keyword presets
    Keywords {
        /// Only this field (e.g. lighting, targetCharacter)
        field: Option<String>,
    },

    /// Reverse-engineer a prompt from an image
    Analyze { image: PathBuf },

    /// Split free-form prompt text into the eight sections
    Parse { text: String },

    /// Refine a section read from a JSON file
    Optimize {
        #[arg(short, long)]
        file: PathBuf,
    },
}

fn build_service(settings: &Settings) -> Arc<dyn PromptService> {
    match settings.api_key {
        Some(ref key) => {
            info!(model = %settings.model, "Prompt service: Gemini");
            Arc::new(GeminiClient::with_timeout(
                key.clone(),
                settings.model.clone(),
                settings.timeout,
            ))
        }
        None => {
            warn!("No API key - analyze, auto-fill and optimize are unavailable");
            Arc::new(UnconfiguredService)
        }
    }
}

async fn read_section(path: &Path) -> Result<PromptSection> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not a complete prompt section", path.display()))
}

async fn run_studio(settings: &Settings) -> Result<()> {
    let session = Session::new().with_strict_identity(settings.strict_identity);
    let studio = Studio::new(session, build_service(settings), SystemClipboard);
    Repl::new(studio)?.run().await
}

async fn run_web_server(settings: &Settings, port: u16) -> Result<()> {
    let session = Session::new().with_strict_identity(settings.strict_identity);
    let state = web::state::AppState::new(session, build_service(settings));
    let app = web::create_router(state);

    let addr = format!("127.0.0.1:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("cineprompt API running on http://localhost:{}", port);
    println!("cineprompt API running on http://localhost:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

fn print_keywords(field: Option<String>) -> Result<()> {
    let fields = match field {
        Some(name) => vec![
            PromptField::parse(&name).with_context(|| format!("unknown field '{}'", name))?,
        ],
        None => PromptField::ALL.to_vec(),
    };
    for field in fields {
        println!("{} ({})", field.label(), field);
        for keyword in presets(field) {
            println!("  {}", keyword);
        }
    }
    Ok(())
}

fn print_section(section: &PromptSection) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(section)?);
    println!();
    println!("{}", format_display(section));
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Some(home) = dirs::home_dir() {
        let _ = dotenvy::from_path(home.join(".cineprompt/.env"));
    }
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        match &cli.command {
            Some(Commands::Serve { .. }) => Level::INFO,
            _ => Level::WARN,
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let env = EnvConfig::load();
    let validation = env.validate();
    if !validation.is_valid() {
        anyhow::bail!("{}", validation.report());
    }
    for warning in &validation.warnings {
        warn!("{}", warning);
    }
    let settings = Settings::resolve(&env, &FileConfig::load());

    match cli.command {
        None | Some(Commands::Studio) => run_studio(&settings).await?,
        Some(Commands::Serve { port }) => {
            run_web_server(&settings, port.unwrap_or(settings.port)).await?
        }
        Some(Commands::Format {
            file,
            strict,
            display,
        }) => {
            let section = match file {
                Some(path) => read_section(&path).await?,
                None => PromptSection::empty(),
            };
            let text = if display {
                format_display(&section)
            } else {
                format_prompt(&section, FormatOptions::strict(strict || settings.strict_identity))
            };
            println!("{}", text);
        }
        Some(Commands::Keywords { field }) => print_keywords(field)?,
        Some(Commands::Analyze { image }) => {
            let image = ImagePayload::load(&image).await?;
            let section = build_service(&settings).analyze_image(&image).await?;
            print_section(&section)?;
        }
        Some(Commands::Parse { text }) => {
            let parsed = build_service(&settings).parse_free_text(&text).await?;
            println!("Title: {}", parsed.title);
            print_section(&parsed.prompt)?;
        }
        Some(Commands::Optimize { file }) => {
            let section = read_section(&file).await?;
            let optimized = build_service(&settings).optimize(&section).await?;
            print_section(&optimized)?;
        }
    }

    Ok(())
}
