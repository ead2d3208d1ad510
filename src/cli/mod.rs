use crate::api::PortalClient;
use crate::chat::{ChatBackend, Conversation, DispatchStatus};
use crate::config::{Config, load_config, save_config};
use crate::scripted::ScriptedBackend;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "hatchbot")]
#[command(about = "Conversational onboarding for hackathon portals", version = crate::VERSION)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize hatchbot configuration
    Onboard,
    /// Talk to the onboarding agent
    Chat {
        /// Send one message and exit instead of starting the interactive loop
        #[arg(short, long)]
        message: Option<String>,
        /// Use the built-in scripted flow instead of the backend
        #[arg(long)]
        scripted: bool,
        /// Override the configured API base address
        #[arg(long)]
        api_url: Option<String>,
    },
    /// Fetch the collected-parameters summary for a session
    Summary {
        /// Session id issued by the backend
        #[arg(short, long)]
        session: String,
        #[arg(long)]
        api_url: Option<String>,
    },
    /// Show configuration and backend health
    Status,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Onboard => onboard()?,
        Commands::Chat {
            message,
            scripted,
            api_url,
        } => chat(message, scripted, api_url).await?,
        Commands::Summary { session, api_url } => summary(&session, api_url).await?,
        Commands::Status => status().await?,
    }

    Ok(())
}

fn onboard() -> Result<()> {
    println!("{} Initializing hatchbot...", crate::LOGO);

    let config_path = crate::config::get_config_path()?;
    if config_path.exists() {
        println!(
            "\u{26a0}\u{fe0f}  Config already exists at {}",
            config_path.display()
        );
        println!("Overwrite? (y/N): ");
        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            return Ok(());
        }
    }

    let config = Config::default();
    save_config(&config, Some(config_path.as_path()))?;
    println!("\u{2713} Created config at {}", config_path.display());

    Ok(())
}

fn build_client(config: &Config, api_url: Option<String>) -> PortalClient {
    match api_url {
        Some(url) => PortalClient::from_config_at(config, url),
        None => PortalClient::from_config(config),
    }
}

fn build_backend(
    config: &Config,
    scripted: bool,
    api_url: Option<String>,
) -> Arc<dyn ChatBackend> {
    if scripted || config.chat.scripted {
        Arc::new(ScriptedBackend::new())
    } else {
        Arc::new(build_client(config, api_url))
    }
}

async fn chat(message: Option<String>, scripted: bool, api_url: Option<String>) -> Result<()> {
    let config = load_config(None)?;
    config.validate()?;
    let backend = build_backend(&config, scripted, api_url);

    let mut convo = Conversation::start(backend).await;
    if let Some(greeting) = convo.last_reply() {
        println!("{} {}\n", crate::LOGO, greeting);
    }

    if let Some(msg) = message {
        let reply = one_shot(&mut convo, &msg).await?;
        println!("{} {}", crate::LOGO, reply);
        return Ok(());
    }

    interactive_repl(&mut convo).await
}

/// Single exchange for `chat --message`. Unlike the interactive loop, a
/// rejected dispatch is an error here: there is no second chance to type
/// something.
async fn one_shot(convo: &mut Conversation, msg: &str) -> Result<String> {
    match convo.send(msg).await {
        DispatchStatus::Exchanged => Ok(convo.last_reply().unwrap_or_default().to_string()),
        DispatchStatus::EmptyInput => anyhow::bail!("message is empty; nothing to send"),
        DispatchStatus::Busy => anyhow::bail!("a message is already in flight"),
    }
}

async fn interactive_repl(convo: &mut Conversation) -> Result<()> {
    use std::io::{self, BufRead, Write};

    println!("Interactive mode (Ctrl+C to exit)\n");
    loop {
        print!("You: ");
        io::stdout().flush()?;

        let stdin = io::stdin();
        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            // EOF — piped input ran out
            return Ok(());
        }

        match convo.send(&input).await {
            DispatchStatus::Exchanged => {
                if let Some(reply) = convo.last_reply() {
                    println!("\n{} {}\n", crate::LOGO, reply);
                }
            }
            DispatchStatus::EmptyInput | DispatchStatus::Busy => {}
        }
    }
}

async fn summary(session: &str, api_url: Option<String>) -> Result<()> {
    let config = load_config(None)?;
    config.validate()?;
    let client = build_client(&config, api_url);

    let summary = client.session_summary(session).await?;
    println!("{}", summary);
    Ok(())
}

async fn status() -> Result<()> {
    let config = load_config(None)?;
    let config_path = crate::config::get_config_path()?;

    println!("hatchbot v{}", crate::VERSION);
    println!(
        "Config: {} ({})",
        config_path.display(),
        if config_path.exists() {
            "present"
        } else {
            "defaults"
        }
    );
    println!("API base: {}", config.api_base_url());

    let client = build_client(&config, None);
    match client.health().await {
        Ok(true) => println!("Backend: healthy"),
        Ok(false) => println!("Backend: responding but not healthy"),
        Err(e) => println!("Backend: unreachable ({})", e),
    }

    Ok(())
}
