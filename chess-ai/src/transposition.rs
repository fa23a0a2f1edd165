//! 置换表
//!
//! 用于缓存已搜索过的局面，避免重复计算。以完整局面为键，不同走法顺序
//! 到达的相同局面共用一个条目。

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chess_core::{Move, State};
use tracing::{trace, warn};

/// 置换表条目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// 精确值
    Exact,
    /// 下界（Beta 截断）
    LowerBound,
    /// 上界（未能提高 Alpha）
    UpperBound,
}

/// 置换表条目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    /// 搜索深度
    pub depth: u8,
    /// 评估分数
    pub score: i32,
    /// 条目类型
    pub entry_type: EntryType,
    /// 最佳走法
    pub best_move: Option<Move>,
}

impl TTEntry {
    /// 在 (alpha, beta) 窗口下该条目的分数能否直接使用
    pub fn usable(&self, alpha: i32, beta: i32) -> bool {
        match self.entry_type {
            EntryType::Exact => true,
            EntryType::LowerBound => self.score >= beta,
            EntryType::UpperBound => self.score <= alpha,
        }
    }
}

/// 置换表
///
/// 容量有上限，超出时淘汰最早插入的条目。对已有键重复写入时原地覆盖，
/// 不改变其插入顺序。
pub struct TranspositionTable {
    entries: HashMap<Arc<State>, TTEntry>,
    /// 插入顺序
    order: VecDeque<Arc<State>>,
    capacity: usize,
    /// 命中次数
    hits: AtomicU64,
    /// 查询次数
    probes: AtomicU64,
    /// 淘汰次数
    evictions: u64,
}

impl TranspositionTable {
    /// 创建指定容量（条目数）的置换表
    pub fn new(capacity: usize) -> Self {
        if capacity == 0 {
            warn!("transposition table capacity 0 requested, using 1");
        }
        let capacity = capacity.max(1);

        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity,
            hits: AtomicU64::new(0),
            probes: AtomicU64::new(0),
            evictions: 0,
        }
    }

    /// 查询条目
    pub fn probe(&self, state: &State) -> Option<&TTEntry> {
        self.probes.fetch_add(1, Ordering::Relaxed);

        let entry = self.entries.get(state);
        if entry.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
        entry
    }

    /// 存储条目（后写覆盖先写）
    pub fn store(
        &mut self,
        state: &State,
        depth: u8,
        score: i32,
        entry_type: EntryType,
        best_move: Option<Move>,
    ) {
        let entry = TTEntry {
            depth,
            score,
            entry_type,
            best_move,
        };

        if let Some(existing) = self.entries.get_mut(state) {
            *existing = entry;
            return;
        }

        let key = Arc::new(state.clone());
        self.order.push_back(Arc::clone(&key));
        self.entries.insert(key, entry);

        while self.entries.len() > self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&*oldest);
            self.evictions += 1;
            trace!(evictions = self.evictions, "transposition table evicted oldest entry");
        }
    }

    /// 条目数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 容量上限
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 清空表
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.evictions = 0;
        self.hits.store(0, Ordering::Relaxed);
        self.probes.store(0, Ordering::Relaxed);
    }

    /// 获取命中率
    pub fn hit_rate(&self) -> f64 {
        self.stats().hit_rate()
    }

    /// 获取统计信息
    pub fn stats(&self) -> TTStats {
        TTStats {
            capacity: self.capacity,
            used: self.entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            probes: self.probes.load(Ordering::Relaxed),
            evictions: self.evictions,
        }
    }
}

/// 置换表统计信息
#[derive(Debug, Clone)]
pub struct TTStats {
    pub capacity: usize,
    pub used: usize,
    pub hits: u64,
    pub probes: u64,
    pub evictions: u64,
}

impl TTStats {
    pub fn hit_rate(&self) -> f64 {
        if self.probes == 0 {
            0.0
        } else {
            self.hits as f64 / self.probes as f64
        }
    }

    pub fn usage(&self) -> f64 {
        self.used as f64 / self.capacity as f64
    }
}
