//! 配置读取与棋谱存储

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chess_ai::AiConfig;

use crate::game::GameRecord;

/// 从 JSON 文件读取引擎配置，缺省字段取默认值
pub fn load_config(path: &Path) -> Result<AiConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("读取配置文件失败: {:?}", path))?;

    AiConfig::from_json(&content).with_context(|| format!("解析配置文件失败: {:?}", path))
}

/// 保存棋谱为 JSON
pub fn save_game(path: &Path, record: &GameRecord) -> Result<()> {
    let json_content = serde_json::to_string_pretty(record).context("序列化棋谱失败")?;

    fs::write(path, json_content).with_context(|| format!("写入文件失败: {:?}", path))?;

    Ok(())
}

/// 读取已保存的棋谱
pub fn load_game(path: &Path) -> Result<GameRecord> {
    if !path.exists() {
        anyhow::bail!("棋谱文件不存在: {:?}", path);
    }

    let content =
        fs::read_to_string(path).with_context(|| format!("读取文件失败: {:?}", path))?;

    serde_json::from_str(&content).context("解析棋谱文件失败")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameOutcome, MoveRecord};
    use chess_core::{Player, INITIAL_FEN};
    use tempfile::tempdir;

    #[test]
    fn test_load_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("engine.json");
        fs::write(&path, r#"{"max_depth": 3, "stand_pat_threshold": 200}"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.stand_pat_threshold, 200);
        assert_eq!(config.cache_capacity, AiConfig::default().cache_capacity);
    }

    #[test]
    fn test_load_config_errors() {
        let dir = tempdir().unwrap();
        assert!(load_config(&dir.path().join("missing.json")).is_err());

        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("解析配置文件失败"));
    }

    #[test]
    fn test_save_and_load_game() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("game.json");
        let record = GameRecord {
            start_fen: INITIAL_FEN.to_string(),
            depth: 2,
            moves: vec![MoveRecord {
                ply: 1,
                player: Player::White,
                from: "e2".to_string(),
                to: "e4".to_string(),
                score: -100,
                nodes: 421,
                elapsed_ms: 3,
            }],
            outcome: GameOutcome::PlyLimit,
            final_fen: "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3".to_string(),
        };

        save_game(&path, &record).unwrap();
        let loaded = load_game(&path).unwrap();
        assert_eq!(loaded.moves, record.moves);
        assert_eq!(loaded.outcome, GameOutcome::PlyLimit);
        assert_eq!(loaded.final_fen, record.final_fen);

        assert!(load_game(&dir.path().join("missing.json")).is_err());
    }
}
