use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use tictactoe_rpc::client::{GamePollingClient, GameView};
use tictactoe_rpc::config::ClientConfig;

#[derive(Parser)]
#[command(name = "tictactoe-client", about = "Join a tic-tac-toe game and play from the terminal")]
struct Args {
    /// Server base URL (overrides TICTACTOE_SERVER_URL)
    #[arg(long)]
    server: Option<String>,

    /// JSON-RPC endpoint path (overrides TICTACTOE_RPC_PATH)
    #[arg(long)]
    rpc_path: Option<String>,

    /// Refresh interval in milliseconds (overrides TICTACTOE_POLL_INTERVAL_MS)
    #[arg(long)]
    poll_interval_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tictactoe_rpc=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = ClientConfig::from_env();
    if let Some(server) = args.server {
        config.server_url = server.trim_end_matches('/').to_string();
    }
    if let Some(path) = args.rpc_path {
        config.rpc_path = path;
    }
    if let Some(ms) = args.poll_interval_ms.filter(|ms| *ms > 0) {
        config.poll_interval = Duration::from_millis(ms);
    }

    let client = match GamePollingClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut views = client.subscribe();
    let session = match client.join().await {
        Ok(session) => session,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let piece = session
        .piece
        .map(|p| p.symbol().to_string())
        .unwrap_or_else(|| "?".to_string());
    println!("joined game {} as {piece}", session.game_id);
    println!("enter moves as: <row> <col>  (0-2)");

    let mut last_board = None;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let view = views.borrow_and_update().clone();
        if last_board != Some(view.board) {
            println!("\n{}", view.board);
            last_board = Some(view.board);
        }
        if let Some(code) = finished(&view) {
            return code;
        }

        tokio::select! {
            changed = views.changed() => {
                if changed.is_err() {
                    return ExitCode::FAILURE;
                }
            }
            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) => match parse_move(&line) {
                        Some((row, col)) => {
                            if let Err(e) = client.place(row, col).await {
                                eprintln!("{e}");
                            }
                        }
                        None => eprintln!("expected two numbers, e.g. `1 2`"),
                    },
                    Ok(None) => return ExitCode::SUCCESS,
                    Err(e) => {
                        eprintln!("failed to read stdin: {e}");
                        return ExitCode::FAILURE;
                    }
                }
            }
        }
    }
}

fn finished(view: &GameView) -> Option<ExitCode> {
    if let Some(outcome) = view.outcome {
        println!("{}", outcome.message());
        return Some(ExitCode::SUCCESS);
    }
    if let Some(ref error) = view.poll_error {
        eprintln!("lost contact with the game: {error}");
        return Some(ExitCode::FAILURE);
    }
    None
}

fn parse_move(line: &str) -> Option<(usize, usize)> {
    let mut parts = line.split(|c: char| c.is_whitespace() || c == ',').filter(|p| !p.is_empty());
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((row, col))
}
