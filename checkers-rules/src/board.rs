//! 棋盘状态

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::constants::{BOARD_SIZE, PLAYABLE_SQUARES};
use crate::coord::Coord;
use crate::error::{CheckersError, Result};
use crate::moves::{Move, MoveGenerator};
use crate::piece::{Piece, Side};

/// 棋盘
///
/// 只存储 32 个深色格，索引见 [`Coord::to_index`]。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    squares: [Option<Piece>; PLAYABLE_SQUARES],
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            squares: [None; PLAYABLE_SQUARES],
        }
    }

    /// 创建初始棋盘：每方 12 个兵占据靠近己方底线的三行深色格
    pub fn initial() -> Self {
        let mut board = Self::empty();

        for side in [Side::Red, Side::Black] {
            for y in side.home_rows() {
                for x in 0..BOARD_SIZE as i8 {
                    let pos = Coord::new(x, y);
                    if pos.is_playable() {
                        board.set(pos, Some(Piece::man(side)));
                    }
                }
            }
        }

        board
    }

    /// 获取指定位置的棋子（浅色格、越界返回 None）
    pub fn get(&self, pos: Coord) -> Option<Piece> {
        pos.to_index().and_then(|index| self.squares[index])
    }

    /// 设置指定位置的棋子（浅色格、越界时忽略）
    pub fn set(&mut self, pos: Coord, piece: Option<Piece>) {
        if let Some(index) = pos.to_index() {
            self.squares[index] = piece;
        }
    }

    /// 放置棋子，位置不是深色格时报错
    pub fn place(&mut self, pos: Coord, piece: Piece) -> Result<()> {
        let index = pos
            .to_index()
            .ok_or(CheckersError::InvalidCoord { x: pos.x, y: pos.y })?;
        self.squares[index] = Some(piece);
        Ok(())
    }

    /// 检查位置是否为空的深色格
    pub fn is_vacant(&self, pos: Coord) -> bool {
        pos.is_playable() && self.get(pos).is_none()
    }

    /// 移动棋子（不检查规则），返回目标格原有的棋子
    pub fn move_piece(&mut self, from: Coord, to: Coord) -> Option<Piece> {
        let piece = self.get(from);
        let replaced = self.get(to);
        self.set(from, None);
        self.set(to, piece);
        replaced
    }

    /// 获取指定阵营的所有棋子位置（按紧凑索引顺序）
    pub fn pieces(&self, side: Side) -> Vec<(Coord, Piece)> {
        self.all_pieces()
            .into_iter()
            .filter(|(_, piece)| piece.side == side)
            .collect()
    }

    /// 获取所有棋子（按紧凑索引顺序）
    pub fn all_pieces(&self) -> Vec<(Coord, Piece)> {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(index, square)| {
                let piece = (*square)?;
                Coord::from_index(index).map(|pos| (pos, piece))
            })
            .collect()
    }

    /// 指定阵营的棋子数
    pub fn count(&self, side: Side) -> usize {
        self.squares
            .iter()
            .flatten()
            .filter(|piece| piece.side == side)
            .count()
    }

    /// 指定阵营的王数
    pub fn kings(&self, side: Side) -> usize {
        self.squares
            .iter()
            .flatten()
            .filter(|piece| piece.side == side && piece.king)
            .count()
    }

    /// 执行走法（不检查规则）：移除被吃棋子、移动棋子、处理升变
    pub fn play(&mut self, mv: &Move) {
        for captured in &mv.captured {
            self.set(*captured, None);
        }

        let Some(piece) = self.get(mv.from) else {
            return;
        };
        self.set(mv.from, None);

        let piece = if mv.promotes { piece.promoted() } else { piece };
        self.set(mv.to(), Some(piece));
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

/// 游戏状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// 进行中
    InProgress,
    /// 一方获胜
    Won(Side),
}

/// 完整的棋盘状态（棋盘 + 走子方）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    /// 棋盘
    pub board: Board,
    /// 当前走子方
    pub side_to_move: Side,
}

impl BoardState {
    /// 创建初始状态（红方先走）
    pub fn initial() -> Self {
        Self {
            board: Board::initial(),
            side_to_move: Side::Red,
        }
    }

    /// 从棋盘创建状态
    pub fn from_board(board: Board, side_to_move: Side) -> Self {
        Self { board, side_to_move }
    }

    /// 指定阵营的合法走法
    pub fn legal_moves_for(&self, side: Side) -> Vec<Move> {
        MoveGenerator::legal_moves(&self.board, side)
    }

    /// 当前走子方的合法走法
    pub fn legal_moves(&self) -> Vec<Move> {
        self.legal_moves_for(self.side_to_move)
    }

    /// 当前走子方无子可动
    pub fn is_terminal(&self) -> bool {
        !MoveGenerator::has_any_move(&self.board, self.side_to_move)
    }

    /// 游戏状态：走子方无合法走法（包括无子）即判负
    pub fn status(&self) -> GameStatus {
        if self.is_terminal() {
            GameStatus::Won(self.side_to_move.opponent())
        } else {
            GameStatus::InProgress
        }
    }

    /// 胜者
    pub fn winner(&self) -> Option<Side> {
        match self.status() {
            GameStatus::Won(side) => Some(side),
            GameStatus::InProgress => None,
        }
    }

    /// 执行走法并返回新状态
    ///
    /// 走法必须在当前合法走法集合中，否则返回 `InvalidMove` 且原状态不变。
    /// 对方棋子的走法、终局后的走法同样属于不合法走法。
    pub fn apply(&self, mv: &Move) -> Result<BoardState> {
        if !self.legal_moves().contains(mv) {
            return Err(CheckersError::InvalidMove {
                from: mv.from,
                to: mv.to(),
            });
        }

        trace!("执行走法 {} ({:?})", mv, self.side_to_move);
        Ok(self.apply_unchecked(mv))
    }

    /// 执行走法（不检查规则，供搜索使用生成器产生的走法）
    pub fn apply_unchecked(&self, mv: &Move) -> BoardState {
        let mut board = self.board;
        board.play(mv);
        BoardState {
            board,
            side_to_move: self.side_to_move.opponent(),
        }
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::Diagram;

    #[test]
    fn test_initial_board() {
        let board = Board::initial();

        assert_eq!(board.count(Side::Red), 12);
        assert_eq!(board.count(Side::Black), 12);
        assert_eq!(board.kings(Side::Red), 0);
        assert_eq!(board.kings(Side::Black), 0);

        for (pos, piece) in board.all_pieces() {
            assert!(pos.is_playable());
            assert!(!piece.king);
            assert!(piece.side.home_rows().contains(&pos.y));
        }

        // 中间两行为空
        for x in 0..8 {
            assert!(board.get(Coord::new(x, 3)).is_none());
            assert!(board.get(Coord::new(x, 4)).is_none());
        }
    }

    #[test]
    fn test_light_square_is_never_occupied() {
        let mut board = Board::empty();
        board.set(Coord::new(0, 0), Some(Piece::man(Side::Red)));
        assert!(board.get(Coord::new(0, 0)).is_none());
        assert_eq!(board.count(Side::Red), 0);

        let err = board.place(Coord::new(0, 0), Piece::man(Side::Red)).unwrap_err();
        assert_eq!(err, CheckersError::InvalidCoord { x: 0, y: 0 });
    }

    #[test]
    fn test_move_piece() {
        let mut board = Board::initial();
        let from = Coord::new(0, 5);
        let to = Coord::new(1, 4);

        let replaced = board.move_piece(from, to);
        assert!(replaced.is_none());
        assert!(board.get(from).is_none());
        assert_eq!(board.get(to), Some(Piece::man(Side::Red)));
    }

    #[test]
    fn test_apply_capture_removes_piece() {
        let state = Diagram::parse_state(
            "
            -.-.-.-.
            .-b-r-.-
            -.-r-.-.
            .-.-.-.-
            -.-.-.-.
            .-.-.-.-
            -.-.-.-.
            .-.-.-.-
            r
            ",
        )
        .unwrap();

        let moves = state.legal_moves();
        assert_eq!(moves.len(), 1);

        let next = state.apply(&moves[0]).unwrap();
        assert!(next.board.get(Coord::new(3, 2)).is_none());
        assert!(next.board.get(Coord::new(2, 1)).is_none());
        assert_eq!(next.board.get(Coord::new(1, 0)), Some(Piece::king(Side::Red)));
        assert_eq!(next.side_to_move, Side::Black);

        // 黑方无子，红方获胜
        assert!(next.is_terminal());
        assert_eq!(next.winner(), Some(Side::Red));
    }

    #[test]
    fn test_apply_rejects_illegal_move_without_mutation() {
        let state = BoardState::initial();
        let snapshot = state.clone();

        // 后退一步不合法
        let mv = Move::step(Coord::new(1, 4), Coord::new(0, 5), false);
        assert!(matches!(
            state.apply(&mv),
            Err(CheckersError::InvalidMove { .. })
        ));

        // 黑方棋子不能在红方回合移动
        let mv = Move::step(Coord::new(1, 2), Coord::new(0, 3), false);
        assert_eq!(
            state.apply(&mv),
            Err(CheckersError::InvalidMove {
                from: Coord::new(1, 2),
                to: Coord::new(0, 3),
            })
        );

        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_apply_on_finished_game() {
        let state = Diagram::parse_state(
            "
            -.-.-.-.
            .-.-.-.-
            -.-.-.-.
            .-.-.-.-
            -.-.-.-.
            .-.-.-.-
            -.-.-.-.
            r-.-.-.-
            b
            ",
        )
        .unwrap();

        assert_eq!(state.winner(), Some(Side::Red));
        let mv = Move::step(Coord::new(0, 7), Coord::new(1, 6), false);
        assert_eq!(
            state.apply(&mv),
            Err(CheckersError::InvalidMove {
                from: Coord::new(0, 7),
                to: Coord::new(1, 6),
            })
        );
    }

    #[test]
    fn test_initial_state_in_progress() {
        let state = BoardState::initial();
        assert_eq!(state.status(), GameStatus::InProgress);
        assert_eq!(state.winner(), None);
        assert!(!state.is_terminal());
    }
}
