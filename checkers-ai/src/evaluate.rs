//! 局面评估函数

use checkers_rules::{Board, BoardState, Coord, Piece, Side, BOARD_SIZE};

/// 兵的基础分值
pub const MAN_VALUE: i32 = 100;

/// 王的基础分值
pub const KING_VALUE: i32 = 250;

/// 兵位于边列或边行时的加分（各算一次）
pub const EDGE_BONUS: i32 = 25;

/// 胜负分值，远大于任何子力差
pub const WIN_SCORE: i32 = 100_000;

/// 评估器
pub struct Evaluator;

impl Evaluator {
    /// 评估局面（`side` 视角，正值对 `side` 有利）
    ///
    /// 走子方无合法走法时直接返回胜负分。
    pub fn evaluate(state: &BoardState, side: Side) -> i32 {
        if state.is_terminal() {
            return if state.side_to_move == side {
                -WIN_SCORE
            } else {
                WIN_SCORE
            };
        }

        Self::positional(&state.board, side)
    }

    /// 子力加位置分之差（不判断胜负）
    pub fn positional(board: &Board, side: Side) -> i32 {
        board
            .all_pieces()
            .into_iter()
            .map(|(pos, piece)| {
                let value = Self::piece_value(piece) + Self::position_bonus(pos, piece);
                if piece.side == side {
                    value
                } else {
                    -value
                }
            })
            .sum()
    }

    /// 快速评估（仅计算子力差）
    pub fn material(board: &Board, side: Side) -> i32 {
        board
            .all_pieces()
            .into_iter()
            .map(|(_, piece)| {
                let value = Self::piece_value(piece);
                if piece.side == side {
                    value
                } else {
                    -value
                }
            })
            .sum()
    }

    /// 棋子基础分值
    pub fn piece_value(piece: Piece) -> i32 {
        if piece.king {
            KING_VALUE
        } else {
            MAN_VALUE
        }
    }

    /// 位置加分：边列、边行的兵各加一次
    fn position_bonus(pos: Coord, piece: Piece) -> i32 {
        if piece.king {
            return 0;
        }

        let last = BOARD_SIZE as i8 - 1;
        let mut bonus = 0;
        if pos.x == 0 || pos.x == last {
            bonus += EDGE_BONUS;
        }
        if pos.y == 0 || pos.y == last {
            bonus += EDGE_BONUS;
        }
        bonus
    }
}
