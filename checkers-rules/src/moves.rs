//! 走法生成和验证
//!
//! 强制吃子：只要任一棋子可以吃子，合法走法集合就只包含吃子走法。
//! 连跳：吃子后若同一棋子还能继续吃，必须继续，每条不可再延伸的路径是一个独立走法。
//! 兵在连跳途中到达底线立即升变，走法在该格结束。

use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardState};
use crate::constants::MAX_CAPTURE_CHAIN;
use crate::coord::Coord;
use crate::piece::{Piece, Side};

/// 走法
///
/// 一个棋子从 `from` 出发，依次落在 `path` 中的各格。
/// 普通走法 `path` 只有一格且 `captured` 为空；吃子走法每跳一次吃掉一子。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// 起始位置
    pub from: Coord,
    /// 依次落脚的位置，最后一格为终点
    pub path: Vec<Coord>,
    /// 被吃棋子的位置（按吃子顺序）
    pub captured: Vec<Coord>,
    /// 走完后是否升变为王
    pub promotes: bool,
}

impl Move {
    /// 创建普通走法
    pub fn step(from: Coord, to: Coord, promotes: bool) -> Self {
        Self {
            from,
            path: vec![to],
            captured: Vec::new(),
            promotes,
        }
    }

    /// 创建吃子走法
    pub fn capture(from: Coord, path: Vec<Coord>, captured: Vec<Coord>, promotes: bool) -> Self {
        Self {
            from,
            path,
            captured,
            promotes,
        }
    }

    /// 终点
    pub fn to(&self) -> Coord {
        self.path.last().copied().unwrap_or(self.from)
    }

    /// 是否为吃子走法
    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let separator = if self.is_capture() { " x " } else { " -> " };
        write!(f, "{}", self.from)?;
        for pos in &self.path {
            write!(f, "{}{}", separator, pos)?;
        }
        Ok(())
    }
}

/// 走法生成器
pub struct MoveGenerator;

impl MoveGenerator {
    /// 生成指定阵营的所有合法走法
    ///
    /// 有吃子走法时只返回所有棋子的最长吃子路径，否则返回所有普通走法。
    pub fn legal_moves(board: &Board, side: Side) -> Vec<Move> {
        let pieces = board.pieces(side);

        let mut captures = Vec::new();
        for &(pos, piece) in &pieces {
            Self::generate_captures(board, pos, piece, &mut captures);
        }
        if !captures.is_empty() {
            return captures;
        }

        let mut steps = Vec::with_capacity(pieces.len() * 2);
        for &(pos, piece) in &pieces {
            Self::generate_steps(board, pos, piece, &mut steps);
        }
        steps
    }

    /// 当前走子方的合法走法
    pub fn generate_legal(state: &BoardState) -> Vec<Move> {
        Self::legal_moves(&state.board, state.side_to_move)
    }

    /// 单个棋子的合法走法（已考虑全局强制吃子，用于走法提示）
    pub fn piece_moves(board: &Board, pos: Coord) -> Vec<Move> {
        let Some(piece) = board.get(pos) else {
            return Vec::new();
        };

        let mut moves = Vec::new();
        if Self::has_capture(board, piece.side) {
            Self::generate_captures(board, pos, piece, &mut moves);
        } else {
            Self::generate_steps(board, pos, piece, &mut moves);
        }
        moves
    }

    /// 指定阵营是否存在至少一个吃子
    pub fn has_capture(board: &Board, side: Side) -> bool {
        board
            .pieces(side)
            .into_iter()
            .any(|(pos, piece)| Self::can_jump(board, pos, piece))
    }

    /// 指定阵营是否还有任何走法（比完整生成更快，用于终局判断）
    pub fn has_any_move(board: &Board, side: Side) -> bool {
        board.pieces(side).into_iter().any(|(pos, piece)| {
            piece
                .directions()
                .any(|dir| board.is_vacant(pos + dir))
                || Self::can_jump(board, pos, piece)
        })
    }

    /// 生成单个棋子的普通走法
    fn generate_steps(board: &Board, pos: Coord, piece: Piece, moves: &mut Vec<Move>) {
        for dir in piece.directions() {
            let to = pos + dir;
            if board.is_vacant(to) {
                moves.push(Move::step(pos, to, piece.promotes_at(to)));
            }
        }
    }

    /// 生成单个棋子的所有最长吃子路径
    fn generate_captures(board: &Board, pos: Coord, piece: Piece, moves: &mut Vec<Move>) {
        if !Self::can_jump(board, pos, piece) {
            return;
        }
        let mut path = Vec::with_capacity(MAX_CAPTURE_CHAIN);
        let mut captured = Vec::with_capacity(MAX_CAPTURE_CHAIN);
        Self::extend_captures(board, pos, pos, piece, &mut path, &mut captured, moves);
    }

    /// 深度优先延伸吃子路径
    ///
    /// `board` 上的棋子已经走到 `pos`，沿途被吃的棋子已经移除，
    /// 因此同一棋子不会被吃两次，起点格也会空出。
    fn extend_captures(
        board: &Board,
        from: Coord,
        pos: Coord,
        piece: Piece,
        path: &mut Vec<Coord>,
        captured: &mut Vec<Coord>,
        moves: &mut Vec<Move>,
    ) {
        let mut extended = false;

        for dir in piece.directions() {
            let Some(landing) = Self::jump_target(board, pos, piece, dir) else {
                continue;
            };
            extended = true;

            let over = pos + dir;
            let mut next = *board;
            next.set(over, None);
            next.move_piece(pos, landing);

            path.push(landing);
            captured.push(over);

            if piece.promotes_at(landing) {
                // 兵到达底线立即升变，本次走法到此结束
                moves.push(Move::capture(from, path.clone(), captured.clone(), true));
            } else {
                Self::extend_captures(&next, from, landing, piece, path, captured, moves);
            }

            path.pop();
            captured.pop();
        }

        if !extended && !path.is_empty() {
            moves.push(Move::capture(from, path.clone(), captured.clone(), false));
        }
    }

    /// 沿 `dir` 方向的跳吃落点：相邻格是对方棋子且再下一格为空
    fn jump_target(board: &Board, pos: Coord, piece: Piece, dir: Coord) -> Option<Coord> {
        let target = board.get(pos + dir)?;
        let landing = pos + dir.scale(2);
        (target.side != piece.side && board.is_vacant(landing)).then_some(landing)
    }

    /// 棋子当前是否可以吃子
    fn can_jump(board: &Board, pos: Coord, piece: Piece) -> bool {
        piece
            .directions()
            .any(|dir| Self::jump_target(board, pos, piece, dir).is_some())
    }
}
