use clap::Parser;
use clap::Subcommand;
use tracing::info;
use vta::config::AppConfig;
use vta::Result;

#[derive(Parser)]
#[command(name = "vta")]
#[command(about = "Virtual Teaching Assistant - a RAG service answering course questions")]
#[command(version)]
struct Cli {
    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        /// Port to bind to
        #[arg(short, long, default_value = "8000")]
        port: u16,
        /// Enable CORS
        #[arg(long)]
        cors: bool,
    },
    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first so logging can pick up the configured level
    let config = AppConfig::load()?;

    let level = if cli.verbose { "debug" } else { config.log_level() };
    vta::logging::init_logging_with_level(level)?;
    info!("Configuration loaded successfully");

    match cli.command {
        Commands::Serve { host, port, cors } => {
            println!("🚀 Starting Virtual TA API Server");
            println!("==================================\n");
            println!("📍 Host: {host}");
            println!("🔌 Port: {port}");
            println!("🌐 CORS: {}", if cors { "Enabled" } else { "Disabled" });
            println!();

            vta::api::serve_api(&config, host, port, cors).await?;
        }
        Commands::Config => {
            handle_config_command(&config);
        }
    }

    Ok(())
}

fn handle_config_command(config: &AppConfig) {
    println!("📋 Virtual TA Configuration:");
    println!();

    println!("🌐 Server:");
    println!("  Host: {}", config.host());
    println!("  Port: {}", config.port());
    println!();

    println!("📝 Logging:");
    println!("  Level: {}", config.logging.level);
    println!("  Backtrace: {}", config.logging.backtrace);
    println!();

    println!("🗂️  Source Registry:");
    println!("  Endpoint: {}", config.registry_endpoint());
    println!("  Course collection: {}", config.course_collection());
    println!("  Forum collection: {}", config.forum_collection());
    println!(
        "  Max results per collection: {}",
        config.max_per_collection()
    );
    println!();

    println!("🧠 Language model:");
    println!("  Endpoint: {}", config.llm_endpoint());
    println!("  Model: {}", config.llm_model());
    println!("  Vision model: {}", config.vision_model());
    println!("  API key: {}", config.masked_api_key());
    println!();

    println!("📚 Corpus:");
    println!("  Course file: {}", config.corpus.course_path);
    println!("  Forum file: {}", config.corpus.forum_path);
    println!();

    println!("🎓 Service:");
    println!("  Name: {}", config.service_name());
    println!("  Course: {}", config.course_name());
}
