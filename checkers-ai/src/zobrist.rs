//! Zobrist 哈希
//!
//! 置换表的局面键

use checkers_rules::{Board, Coord, Piece, Side, PLAYABLE_SQUARES};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Zobrist 哈希表
///
/// 使用固定种子的随机数为每个深色格上的每种棋子生成哈希值
pub struct ZobristTable {
    /// 棋子哈希值 [side][king][square]
    pieces: [[[u64; PLAYABLE_SQUARES]; 2]; 2],
    /// 黑方走子时异或的哈希值
    side_to_move: u64,
}

impl ZobristTable {
    /// 创建新的 Zobrist 表（使用固定种子保证确定性）
    pub fn new() -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(0xC4EC_4E25_0B0A_4D5E);

        let mut pieces = [[[0u64; PLAYABLE_SQUARES]; 2]; 2];
        for side in pieces.iter_mut() {
            for kind in side.iter_mut() {
                for square in kind.iter_mut() {
                    *square = rng.gen();
                }
            }
        }

        Self {
            pieces,
            side_to_move: rng.gen(),
        }
    }

    /// 计算局面的完整哈希值
    pub fn hash(&self, board: &Board, side_to_move: Side) -> u64 {
        let mut hash = board
            .all_pieces()
            .into_iter()
            .fold(0u64, |hash, (pos, piece)| hash ^ self.piece_hash(piece, pos));

        if side_to_move == Side::Black {
            hash ^= self.side_to_move;
        }

        hash
    }

    /// 获取棋子在某格的哈希值（浅色格为 0）
    #[inline]
    pub fn piece_hash(&self, piece: Piece, pos: Coord) -> u64 {
        let side_idx = match piece.side {
            Side::Red => 0,
            Side::Black => 1,
        };
        let kind_idx = usize::from(piece.king);
        pos.to_index()
            .map(|index| self.pieces[side_idx][kind_idx][index])
            .unwrap_or(0)
    }
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new()
    }
}
