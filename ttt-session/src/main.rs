use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ttt_rules::{Notation, Player};
use ttt_session::{Controller, GameMode, Session, SessionConfig, SessionEvent, SharedSession};

/// 终端命令
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Move(usize),
    NewGame,
    Mode(GameMode),
    Score,
    ResetScores,
    Board,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        let words: Vec<String> = line.split_whitespace().map(|w| w.to_lowercase()).collect();
        let words: Vec<&str> = words.iter().map(String::as_str).collect();

        match words.as_slice() {
            [] => Command::Empty,
            ["q" | "quit" | "exit"] => Command::Quit,
            ["new" | "reset"] => Command::NewGame,
            ["score" | "scores"] => Command::Score,
            ["reset-score" | "reset-scores"] => Command::ResetScores,
            ["board" | "status"] => Command::Board,
            ["help" | "?"] => Command::Help,
            ["mode", "pvp"] => Command::Mode(GameMode::TwoPlayer),
            ["mode", "ai"] => Command::Mode(GameMode::vs_computer()),
            ["mode", "ai", side] => match side.chars().next().and_then(Player::from_char) {
                Some(computer) if side.len() == 1 => Command::Mode(GameMode::VsComputer { computer }),
                _ => Command::Unknown(line.trim().to_string()),
            },
            [cell] => match Notation::parse_cell(cell) {
                Ok(index) => Command::Move(index),
                Err(_) => Command::Unknown(line.trim().to_string()),
            },
            _ => Command::Unknown(line.trim().to_string()),
        }
    }
}

const HELP: &str = "\
Commands:
  1-9 or a1..c3   place a mark
  new             start a new game (scores are kept)
  mode pvp        two players
  mode ai [x|o]   play against the computer (computer plays O by default)
  score           show scores
  reset-scores    clear scores
  board           show the board
  quit            exit";

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志（输出到 stderr，不干扰棋盘显示）
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("ttt_session=info".parse()?))
        .init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = SessionConfig::load_or_default(config_path.as_deref())
        .context("加载配置失败")?;
    info!("井字棋启动, 模式: {:?}", config.mode);

    let session = Session::new(&config).shared();
    let events = session.lock().await.subscribe();
    let printer = tokio::spawn(print_events(events));

    println!("{}\n", HELP);
    show_board(&session).await;

    let mut computer_turn: Option<JoinHandle<()>> = None;
    start_computer_turn(&session, &mut computer_turn).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("读取输入失败")? {
        match Command::parse(&line) {
            Command::Quit => break,
            Command::Empty => {}
            Command::Help => println!("{}", HELP),
            Command::Board => show_board(&session).await,
            Command::Score => {
                let scores = *session.lock().await.scores();
                println!("Score  X: {}  O: {}  Draw: {}", scores.x_wins, scores.o_wins, scores.draws);
            }
            Command::ResetScores => session.lock().await.reset_scores(),
            Command::NewGame => session.lock().await.new_game(),
            Command::Mode(mode) => session.lock().await.set_mode(mode),
            Command::Move(index) => {
                // 非法走子已通过事件显示
                if let Err(e) = session.lock().await.human_move(index) {
                    if !matches!(e, ttt_session::SessionError::Rule(_)) {
                        println!("{}", e);
                    }
                }
            }
            Command::Unknown(input) => println!("Unknown command: {:?} (type `help`)", input),
        }

        start_computer_turn(&session, &mut computer_turn).await;
    }

    if let Some(handle) = computer_turn {
        handle.abort();
    }
    printer.abort();
    info!("再见");
    Ok(())
}

/// 轮到电脑时在后台走子；已有任务在运行则跳过
async fn start_computer_turn(session: &SharedSession, handle: &mut Option<JoinHandle<()>>) {
    if handle.as_ref().is_some_and(|h| !h.is_finished()) {
        return;
    }
    if !session.lock().await.needs_computer_move() {
        return;
    }

    let session = session.clone();
    *handle = Some(tokio::spawn(async move {
        loop {
            if let Err(e) = Session::run_computer_turn(&session).await {
                error!("电脑走子失败: {}", e);
                break;
            }
            // 等待期间可能已重开新局，且新局仍由电脑先手
            if !session.lock().await.needs_computer_move() {
                break;
            }
        }
    }));
}

async fn show_board(session: &SharedSession) {
    let session = session.lock().await;
    println!("{}", Notation::render(session.game().board()));
    println!("{}", session.status_text());
}

/// 订阅会话事件并打印
async fn print_events(mut events: broadcast::Receiver<SessionEvent>) {
    loop {
        let event = match events.recv().await {
            Ok(event) => event,
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!("事件积压，跳过 {} 条", skipped);
                continue;
            }
            Err(broadcast::error::RecvError::Closed) => break,
        };

        match event {
            SessionEvent::MovePlayed { mv, by, board } => {
                let who = match by {
                    Controller::Computer => "AI".to_string(),
                    Controller::Human => format!("Player {}", mv.player),
                };
                let cell = Notation::cell_name(mv.index).unwrap_or_default();
                println!("\n{} plays {}\n", who, cell);
                println!("{}", Notation::render(&board));
            }
            SessionEvent::MoveRejected { reason, .. } => println!("{}", reason),
            SessionEvent::TurnChanged { player, controller } => match controller {
                Controller::Computer => println!("AI is thinking..."),
                Controller::Human => println!("Player {}'s turn", player),
            },
            SessionEvent::GameWon { winner, line, by } => {
                match by {
                    Controller::Computer => println!("AI wins!"),
                    Controller::Human => println!("{} wins!", winner),
                }
                if let Some(line) = line {
                    let cells: Vec<String> = line
                        .iter()
                        .filter_map(|&i| Notation::cell_name(i))
                        .collect();
                    println!("Winning line: {}", cells.join(" "));
                }
                println!("Type `new` to play again.");
            }
            SessionEvent::GameDrawn => {
                println!("It's a draw!");
                println!("Type `new` to play again.");
            }
            SessionEvent::ScoreUpdated(scores) => {
                println!("Score  X: {}  O: {}  Draw: {}", scores.x_wins, scores.o_wins, scores.draws);
            }
            SessionEvent::NewGame { version } => {
                println!("\n=== Game #{} ===\n", version + 1);
                println!("{}", Notation::render(&ttt_rules::Board::empty()));
            }
            SessionEvent::ModeChanged(mode) => match mode {
                GameMode::TwoPlayer => println!("Mode: two players"),
                GameMode::VsComputer { computer } => println!("Mode: vs computer (AI plays {})", computer),
            },
        }
    }
}
