mod error;
mod http;

use std::io::Write;
use std::time::Duration;

use chat::{ChatService, ChatWidget, Turn, WidgetConfig};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::Level;

use crate::error::CliError;
use crate::http::{DEFAULT_TIMEOUT_SECS, ReqwestChatService};

#[derive(Parser, Debug)]
#[command(name = "chatbot-cli", about = "Terminal front end for the chatbot widget endpoint")]
struct Cli {
    #[arg(long, env = "CHATBOT_API_URL", default_value = chat::DEFAULT_API_URL)]
    api_url: String,

    #[arg(long, env = "CHATBOT_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Log request diagnostics to stderr.
    #[arg(long, short)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the chat service is up.
    Ping,
    /// Send one message and print the reply.
    Send {
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// Interactive chat; `/quit` or EOF exits.
    Chat {
        #[arg(long)]
        no_greeting: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let service = ReqwestChatService::new(&cli.api_url, Duration::from_secs(cli.timeout_secs))?;
    let config = WidgetConfig::with_endpoint(service.endpoint().as_str());

    match cli.command {
        Command::Ping => run_ping(&service).await,
        Command::Send { message } => run_send(&service, config, &message.join(" ")).await,
        Command::Chat { no_greeting } => {
            let config = if no_greeting { config.greeting(None) } else { config };
            run_chat(&service, config).await
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_ping(service: &ReqwestChatService) -> Result<(), CliError> {
    let body = service.health().await?;
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

async fn run_send<S>(service: &S, config: WidgetConfig, message: &str) -> Result<(), CliError>
where
    S: ChatService + ?Sized,
{
    let mut widget = ChatWidget::new(config.greeting(None));
    widget.toggle();
    widget.set_draft(message);

    if widget.submit(service).await.is_none() {
        tracing::debug!("blank message; nothing sent");
        return Ok(());
    }
    for turn in widget.turns() {
        println!("{}", format_turn(turn));
    }
    Ok(())
}

async fn run_chat(service: &ReqwestChatService, config: WidgetConfig) -> Result<(), CliError> {
    let mut widget = ChatWidget::new(config);
    widget.toggle();
    for turn in widget.turns() {
        println!("{}", format_turn(turn));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim() == "/quit" {
            break;
        }

        widget.set_draft(line);
        if let Some(turn) = widget.submit(service).await {
            println!("{}", format_turn(turn));
        }
    }
    Ok(())
}

fn prompt() -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "user> ")?;
    stdout.flush()?;
    Ok(())
}

/// Right-align the role label so user and bot text line up.
fn format_turn(turn: &Turn) -> String {
    format!("{:>4}> {}", turn.role().as_str(), turn.text())
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use async_trait::async_trait;
    use chat::{ChatReply, ServiceError};

    use super::*;

    #[test]
    fn format_turn_aligns_role_labels() {
        assert_eq!(format_turn(&Turn::user("hi")), "user> hi");
        assert_eq!(format_turn(&Turn::bot("Hello!")), " bot> Hello!");
    }

    #[test]
    fn cli_parses_send_words_into_one_message() {
        let cli = Cli::try_parse_from(["chatbot-cli", "send", "hello", "there"]).expect("parse");
        let Command::Send { message } = cli.command else {
            panic!("expected send command");
        };
        assert_eq!(message.join(" "), "hello there");
    }

    #[test]
    fn cli_send_requires_a_message() {
        assert!(Cli::try_parse_from(["chatbot-cli", "send"]).is_err());
    }

    struct CountingService(Cell<usize>);

    #[async_trait(?Send)]
    impl ChatService for CountingService {
        async fn send(&self, _message: &str) -> Result<ChatReply, ServiceError> {
            self.0.set(self.0.get() + 1);
            Ok(ChatReply::ok("pong"))
        }
    }

    #[tokio::test]
    async fn send_with_blank_message_is_silent_success() {
        let service = CountingService(Cell::new(0));
        assert!(run_send(&service, WidgetConfig::default(), "   ").await.is_ok());
        assert_eq!(service.0.get(), 0);
    }

    #[tokio::test]
    async fn send_with_message_issues_one_request() {
        let service = CountingService(Cell::new(0));
        assert!(run_send(&service, WidgetConfig::default(), "ping").await.is_ok());
        assert_eq!(service.0.get(), 1);
    }

    #[test]
    fn cli_accepts_api_url_override() {
        let cli = Cli::try_parse_from(["chatbot-cli", "--api-url", "http://10.0.0.5:8000/api/chat", "ping"])
            .expect("parse");
        assert_eq!(cli.api_url, "http://10.0.0.5:8000/api/chat");
        assert!(matches!(cli.command, Command::Ping));
    }
}
