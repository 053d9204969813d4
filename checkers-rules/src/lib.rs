//! 跳棋规则库
//!
//! 包含:
//! - 坐标、棋子、棋盘等核心数据结构
//! - 走法生成和规则验证（强制吃子、连跳、升变）
//! - 棋盘图示格式

mod board;
mod constants;
mod coord;
mod diagram;
mod error;
mod moves;
mod piece;

pub use board::{Board, BoardState, GameStatus};
pub use constants::*;
pub use coord::{Coord, DIAGONALS};
pub use diagram::{Diagram, INITIAL_DIAGRAM};
pub use error::{CheckersError, Result};
pub use moves::{Move, MoveGenerator};
pub use piece::{Piece, Side};

/// 指定阵营在给定状态下的合法走法（用于走法提示和输入验证）
pub fn legal_moves(state: &BoardState, side: Side) -> Vec<Move> {
    state.legal_moves_for(side)
}

/// 执行走法，走法不合法时返回错误且原状态不变
pub fn apply_move(state: &BoardState, mv: &Move) -> Result<BoardState> {
    state.apply(mv)
}

/// 游戏是否结束（走子方无合法走法）
pub fn is_game_over(state: &BoardState) -> bool {
    state.is_terminal()
}

/// 胜者，游戏未结束时为 None
pub fn winner(state: &BoardState) -> Option<Side> {
    state.winner()
}
