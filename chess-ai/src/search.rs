//! 搜索引擎
//!
//! 实现 Minimax + Alpha-Beta 剪枝 + 置换表。白方取极大、黑方取极小，
//! 局面分一律是白方视角。

use std::cmp::Reverse;

use chess_core::{Move, MoveGenerator, Player, State};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::transposition::{EntryType, TranspositionTable};

/// 默认将杀分（根节点窗口为其三倍）
pub const MATE_VALUE: i32 = 9000;

/// 王被吃后的分数放大倍数
const DECISIVE_FACTOR: i32 = 8;

/// AI 配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// `best_move` 使用的搜索深度
    pub max_depth: u8,
    /// 置换表容量（条目数）
    pub cache_capacity: usize,
    /// 将杀分
    pub mate_value: i32,
    /// 极大层在剩余深度不超过该值时跳过低分走法
    pub stand_pat_depth: u8,
    /// 跳过走法的分数阈值
    pub stand_pat_threshold: i32,
}

impl AiConfig {
    /// 指定深度，其余取默认值
    pub fn with_depth(max_depth: u8) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    /// 从 JSON 读取配置，缺省字段取默认值
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// 根节点的搜索窗口上界
    pub fn window(&self) -> i32 {
        3 * self.mate_value
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            cache_capacity: 200_000,
            mate_value: MATE_VALUE,
            stand_pat_depth: 0,
            stand_pat_threshold: 150,
        }
    }
}

/// 搜索结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// 根局面分数（白方视角）
    pub score: i32,
    /// 最佳走法（标准化视角）
    pub best_move: Option<Move>,
    /// 本次搜索的节点数
    pub nodes: u64,
}

/// AI 引擎
pub struct AiEngine {
    config: AiConfig,
    cache: TranspositionTable,
    nodes_searched: u64,
}

impl AiEngine {
    /// 创建新的 AI 引擎
    pub fn new(config: AiConfig) -> Self {
        let cache = TranspositionTable::new(config.cache_capacity);
        Self {
            config,
            cache,
            nodes_searched: 0,
        }
    }

    /// 按配置深度搜索最佳走法
    pub fn best_move(&mut self, state: &State) -> SearchResult {
        self.search(state, self.config.max_depth)
    }

    /// 搜索指定深度
    ///
    /// 置换表在多次搜索之间保留；最佳走法从根局面的置换表条目读出。
    pub fn search(&mut self, state: &State, depth: u8) -> SearchResult {
        self.nodes_searched = 0;
        let window = self.config.window();

        let score = self.alpha_beta(state, depth, -window, window);
        let best_move = self.cache.probe(state).and_then(|entry| entry.best_move);

        debug!(
            depth,
            score,
            nodes = self.nodes_searched,
            cache = self.cache.len(),
            hit_rate = self.cache.hit_rate(),
            "search finished"
        );

        SearchResult {
            score,
            best_move,
            nodes: self.nodes_searched,
        }
    }

    /// Alpha-Beta 搜索
    fn alpha_beta(&mut self, state: &State, depth: u8, mut alpha: i32, mut beta: i32) -> i32 {
        self.nodes_searched += 1;

        if depth == 0 {
            return state.score;
        }

        // 少了一个王：胜负已分
        if state.king_count() < 2 {
            return state.score * DECISIVE_FACTOR;
        }

        if let Some(entry) = self.cache.probe(state) {
            if entry.depth >= depth && entry.usable(alpha, beta) {
                return entry.score;
            }
        }

        let (alpha_orig, beta_orig) = (alpha, beta);
        let mut best_move = None;

        // 按增量估值从高到低排序，好的走法先搜
        let mut moves: Vec<Move> = MoveGenerator::moves(state).collect();
        moves.sort_by_key(|mv| Reverse(state.value(*mv)));

        let (score, entry_type) = match state.turn {
            Player::White => {
                for mv in moves {
                    let child = state.successor(mv);
                    if depth <= self.config.stand_pat_depth
                        && child.score < self.config.stand_pat_threshold
                    {
                        continue;
                    }
                    let score = self.alpha_beta(&child, depth - 1, alpha, beta);
                    if score > alpha {
                        alpha = score;
                        best_move = Some(mv);
                        if alpha >= beta {
                            break;
                        }
                    }
                }
                let entry_type = if alpha >= beta {
                    EntryType::LowerBound
                } else if alpha == alpha_orig {
                    EntryType::UpperBound
                } else {
                    EntryType::Exact
                };
                (alpha, entry_type)
            }
            Player::Black => {
                for mv in moves {
                    let child = state.successor(mv);
                    let score = self.alpha_beta(&child, depth - 1, alpha, beta);
                    if score < beta {
                        beta = score;
                        best_move = Some(mv);
                        if alpha >= beta {
                            break;
                        }
                    }
                }
                let entry_type = if alpha >= beta {
                    EntryType::UpperBound
                } else if beta == beta_orig {
                    EntryType::LowerBound
                } else {
                    EntryType::Exact
                };
                (beta, entry_type)
            }
        };

        self.cache.store(state, depth, score, entry_type, best_move);
        score
    }

    /// 获取最近一次搜索的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }

    /// 置换表
    pub fn cache(&self) -> &TranspositionTable {
        &self.cache
    }

    /// 清空置换表
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }
}

impl Default for AiEngine {
    fn default() -> Self {
        Self::new(AiConfig::default())
    }
}
