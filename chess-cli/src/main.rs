use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use chess_ai::{AiConfig, AiEngine};
use chess_cli::render::board_diagram;
use chess_cli::{load_config, save_game, GameOutcome, SelfPlay, Step};
use chess_core::{Fen, State, ENDGAME_FEN, INITIAL_FEN};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 国际象棋引擎自我对弈
#[derive(Parser, Debug)]
#[command(name = "chess-cli", version, about = "国际象棋引擎自我对弈")]
struct Cli {
    /// 搜索深度（覆盖配置文件）
    #[arg(long)]
    depth: Option<u8>,

    /// 置换表容量（条目数，覆盖配置文件）
    #[arg(long)]
    cache_capacity: Option<usize>,

    /// 引擎配置 JSON 文件
    #[arg(long)]
    config: Option<PathBuf>,

    /// 起始布局
    #[arg(long, default_value = "standard", value_enum)]
    layout: Layout,

    /// 起始局面 FEN（优先于 --layout）
    #[arg(long)]
    fen: Option<String>,

    /// 最多走多少步
    #[arg(long, default_value = "200")]
    max_plies: u32,

    /// 每步输出一行 JSON 而不是棋盘图
    #[arg(long)]
    json: bool,

    /// 对局结束后把棋谱保存到该文件
    #[arg(long)]
    save: Option<PathBuf>,
}

/// 起始布局
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Layout {
    /// 标准开局
    Standard,
    /// 简化残局
    Endgame,
}

impl Layout {
    fn fen(self) -> &'static str {
        match self {
            Layout::Standard => INITIAL_FEN,
            Layout::Endgame => ENDGAME_FEN,
        }
    }
}

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("chess_cli=info".parse()?))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AiConfig::default(),
    };
    if let Some(depth) = cli.depth {
        config.max_depth = depth;
    }
    if let Some(capacity) = cli.cache_capacity {
        config.cache_capacity = capacity;
    }

    let fen = cli.fen.as_deref().unwrap_or(cli.layout.fen());
    let state = Fen::parse(fen).with_context(|| format!("无法解析起始局面: {}", fen))?;

    info!(
        depth = config.max_depth,
        cache_capacity = config.cache_capacity,
        fen,
        "self-play starting"
    );

    let depth = config.max_depth;
    let mut game = SelfPlay::new(AiEngine::new(config), state, depth, cli.max_plies);
    if !cli.json {
        print_board(game.state());
    }

    let started = Instant::now();
    let outcome = loop {
        match game.step()? {
            Step::Moved(record) => {
                if cli.json {
                    println!("{}", serde_json::to_string(&record)?);
                } else {
                    println!(
                        "{}. {} {}{} score {} nodes {} ({} ms)",
                        record.ply,
                        record.player,
                        record.from,
                        record.to,
                        record.score,
                        record.nodes,
                        record.elapsed_ms
                    );
                    print_board(game.state());
                }
            }
            Step::Finished(outcome) => break outcome,
        }
    };

    let stats = game.engine().cache().stats();
    info!(
        plies = game.history().len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        cache_used = stats.used,
        hit_rate = stats.hit_rate(),
        "self-play finished"
    );

    match outcome {
        GameOutcome::KingCaptured { winner } => println!("{} wins", winner),
        GameOutcome::NoMove => println!("no move available"),
        GameOutcome::PlyLimit => println!("stopped after {} plies", cli.max_plies),
    }

    if let Some(path) = &cli.save {
        save_game(path, &game.record(outcome))?;
        info!(path = %path.display(), "game saved");
    }

    Ok(())
}

fn print_board(state: &State) {
    println!("{}\n", board_diagram(state));
}
