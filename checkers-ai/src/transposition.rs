//! 置换表
//!
//! 缓存已搜索过的局面，每次搜索开始时清空

use std::sync::atomic::{AtomicU64, Ordering};

/// 置换表条目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// 精确值
    Exact,
    /// 下界（Beta 截断）
    LowerBound,
    /// 上界（Alpha 截断）
    UpperBound,
}

/// 置换表条目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    /// Zobrist 哈希的高 32 位（用于验证）
    pub key: u32,
    /// 评估分数
    pub score: i32,
    /// 剩余搜索深度
    pub depth: u8,
    /// 条目类型
    pub entry_type: EntryType,
    /// 最佳走法在生成顺序中的下标
    pub best_move: Option<u8>,
}

/// 置换表
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    size: usize,
    /// 命中次数
    hits: AtomicU64,
    /// 查询次数
    probes: AtomicU64,
}

impl TranspositionTable {
    /// 创建指定大小的置换表
    ///
    /// # Arguments
    /// * `size_mb` - 表大小（MB），至少分配一个条目
    pub fn new(size_mb: usize) -> Self {
        let entry_size = std::mem::size_of::<Option<TTEntry>>();
        let size = ((size_mb * 1024 * 1024) / entry_size).max(1);

        Self {
            entries: vec![None; size],
            size,
            hits: AtomicU64::new(0),
            probes: AtomicU64::new(0),
        }
    }

    /// 创建默认大小（8MB）的置换表
    pub fn default_size() -> Self {
        Self::new(8)
    }

    #[inline]
    fn index(&self, hash: u64) -> usize {
        (hash % self.size as u64) as usize
    }

    #[inline]
    fn verification_key(hash: u64) -> u32 {
        (hash >> 32) as u32
    }

    /// 查询条目
    pub fn probe(&self, hash: u64) -> Option<&TTEntry> {
        self.probes.fetch_add(1, Ordering::Relaxed);

        let key = Self::verification_key(hash);
        match &self.entries[self.index(hash)] {
            Some(entry) if entry.key == key => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry)
            }
            _ => None,
        }
    }

    /// 存储条目
    ///
    /// 同一局面只在新深度不小于旧深度时覆盖，不同局面直接覆盖。
    pub fn store(
        &mut self,
        hash: u64,
        score: i32,
        depth: u8,
        entry_type: EntryType,
        best_move: Option<u8>,
    ) {
        let index = self.index(hash);
        let key = Self::verification_key(hash);

        let should_replace = match &self.entries[index] {
            None => true,
            Some(existing) => existing.key != key || depth >= existing.depth,
        };

        if should_replace {
            self.entries[index] = Some(TTEntry {
                key,
                score,
                depth,
                entry_type,
                best_move,
            });
        }
    }

    /// 清空表
    pub fn clear(&mut self) {
        self.entries.fill(None);
        self.hits.store(0, Ordering::Relaxed);
        self.probes.store(0, Ordering::Relaxed);
    }

    /// 获取统计信息
    pub fn stats(&self) -> TTStats {
        TTStats {
            entries: self.size,
            used: self.entries.iter().filter(|e| e.is_some()).count(),
            hits: self.hits.load(Ordering::Relaxed),
            probes: self.probes.load(Ordering::Relaxed),
        }
    }
}

/// 置换表统计信息
#[derive(Debug, Clone)]
pub struct TTStats {
    pub entries: usize,
    pub used: usize,
    pub hits: u64,
    pub probes: u64,
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
        self.used as f64 / self.entries as f64
    }
}
