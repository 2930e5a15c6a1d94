//! `poop` command line.
//!
//! ```bash
//! poop chat                          # interactive terminal
//! poop say "what is bitcoin"         # one reply
//! poop faucet status --wallet <addr>
//! poop faucet claim --wallet <addr>  # prompts for the signed challenge
//! poop faucet watch --wallet <addr>  # countdown and stats until Ctrl-C
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use poop_lib::faucet::{
    format_countdown, short_address, ClaimReport, FaucetApi, FaucetSession, HttpFaucetApi, Notice,
    PromptSigner, SystemClock,
};
use poop_lib::terminal::is_exit_command;
use poop_lib::{logging, Config, MessageKind, Responder, SubmitError, Terminal};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

#[derive(Parser)]
#[command(name = "poop")]
#[command(version)]
#[command(about = "Proof of Operational Poop: a rude chatbot and a $POOP faucet client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Faucet API base URL (overrides config and POOP_API_BASE)
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Debug logging to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat terminal
    Chat,

    /// Reply to a single line and exit
    Say {
        /// What to say
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,

        /// Also print the matched category
        #[arg(long)]
        intent: bool,
    },

    /// Talk to the token faucet
    Faucet {
        #[command(subcommand)]
        command: FaucetCommand,
    },
}

#[derive(Subcommand)]
enum FaucetCommand {
    /// Eligibility, balance and mode
    Status {
        #[arg(long, short)]
        wallet: Option<String>,
    },
    /// Total claims and unique wallets
    Stats,
    /// Claim tokens for a wallet
    Claim {
        #[arg(long, short)]
        wallet: String,
    },
    /// Follow the cooldown and stats until interrupted
    Watch {
        #[arg(long, short)]
        wallet: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(base) = cli.api_base {
        config.faucet.api_base = base;
    }
    debug!(api_base = %config.faucet.api_base, "Configuration loaded");

    match cli.command {
        Commands::Chat => chat(config).await,
        Commands::Say { words, intent } => say(&words.join(" "), intent),
        Commands::Faucet { command } => faucet(config, command).await,
    }
}

async fn chat(config: Config) -> Result<()> {
    let responder = Responder::new().context("Failed to build responder")?;
    let mut terminal = Terminal::new(responder, config.terminal);
    let mut stdout = tokio::io::stdout();

    for message in terminal.messages() {
        print_message(&mut stdout, message.kind, &message.clock_label(), &message.text).await?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let delay = match terminal.submit(&line) {
            Ok(delay) => delay,
            Err(SubmitError::Blank) => continue,
            Err(e) => {
                debug!(error = %e, "Input refused");
                continue;
            }
        };
        stdout.write_all(b"AI is typing...\r").await?;
        stdout.flush().await?;
        tokio::time::sleep(delay).await;
        if let Some(reply) = terminal.complete() {
            let (kind, label, text) = (reply.kind, reply.clock_label(), reply.text.clone());
            print_message(&mut stdout, kind, &label, &text).await?;
        }
        if is_exit_command(&line) {
            break;
        }
    }
    Ok(())
}

async fn print_message(
    out: &mut tokio::io::Stdout,
    kind: MessageKind,
    clock: &str,
    text: &str,
) -> Result<()> {
    let who = match kind {
        MessageKind::User => "YOU",
        MessageKind::System => "SYS",
        MessageKind::Ai => "AI ",
    };
    out.write_all(format!("[{}] {} {}\n", clock, who, text).as_bytes())
        .await?;
    out.flush().await?;
    Ok(())
}

fn say(input: &str, show_intent: bool) -> Result<()> {
    let mut responder = Responder::new().context("Failed to build responder")?;
    if show_intent {
        let intent = responder
            .classify(input)
            .map(|intent| intent.to_string())
            .unwrap_or_else(|| "fallback".to_string());
        println!("({})", intent);
    }
    println!("{}", responder.respond(input));
    Ok(())
}

async fn faucet(config: Config, command: FaucetCommand) -> Result<()> {
    let api = Arc::new(HttpFaucetApi::new(&config.faucet).context("Invalid faucet configuration")?);
    debug!(base = %api.base(), "Faucet client ready");

    match command {
        FaucetCommand::Status { wallet } => {
            let status = api.status(wallet.as_deref()).await?;
            println!("can claim:  {}", status.can_claim);
            if status.cooldown_remaining > 0 {
                println!("cooldown:   {}", format_countdown(status.cooldown_remaining));
            }
            println!("balance:    {} $POOP", status.faucet_balance);
            if status.mock_mode {
                println!("mode:       mock");
            }
        }
        FaucetCommand::Stats => {
            let stats = api.stats().await?;
            println!("total claims:   {}", stats.total_claims);
            println!("unique wallets: {}", stats.unique_wallets);
        }
        FaucetCommand::Claim { wallet } => {
            let (session, mut notices) = FaucetSession::new(api, Arc::new(SystemClock), &config.faucet);
            session.connect(wallet.as_str()).await;
            print_notices(&mut notices);

            let signer = PromptSigner::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout());
            let report = session.claim(&signer).await;
            print_notices(&mut notices);

            match report {
                ClaimReport::Skipped(reason) => println!("{}", reason),
                ClaimReport::Granted { .. } | ClaimReport::CoolingDown { .. } => {
                    let snapshot = session.snapshot().await;
                    if snapshot.remaining_seconds > 0 {
                        println!("Next flush in {}", format_countdown(snapshot.remaining_seconds));
                    }
                }
                _ => {}
            }
        }
        FaucetCommand::Watch { wallet } => {
            let (session, notices) = FaucetSession::new(api, Arc::new(SystemClock), &config.faucet);
            session.connect(wallet.as_str()).await;
            session.start_stats_poll().await;
            watch(&session, notices).await?;
        }
    }
    Ok(())
}

async fn watch(session: &FaucetSession, mut notices: mpsc::UnboundedReceiver<Notice>) -> Result<()> {
    let mut refresh = tokio::time::interval(Duration::from_secs(1));
    let interrupted = tokio::signal::ctrl_c();
    tokio::pin!(interrupted);
    loop {
        tokio::select! {
            _ = &mut interrupted => break,
            Some(notice) = notices.recv() => println!("\n{}", notice),
            _ = refresh.tick() => {
                let snapshot = session.snapshot().await;
                let wallet = snapshot.wallet.as_deref().map(short_address).unwrap_or_default();
                let state = if snapshot.can_claim {
                    "READY".to_string()
                } else if snapshot.claiming {
                    "FLUSHING".to_string()
                } else {
                    format_countdown(snapshot.remaining_seconds)
                };
                print!(
                    "\r{}  {}  claims: {}  wallets: {}  balance: {} ",
                    wallet,
                    state,
                    snapshot.stats.total_claims,
                    snapshot.stats.unique_wallets,
                    snapshot.stats.balance
                );
                std::io::stdout().flush().context("Failed to write to stdout")?;
            }
        }
    }
    session.disconnect().await;
    println!();
    Ok(())
}

fn print_notices(notices: &mut mpsc::UnboundedReceiver<Notice>) {
    while let Ok(notice) = notices.try_recv() {
        println!("{}", notice);
    }
}
