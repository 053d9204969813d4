//! 棋盘图示格式解析和生成
//!
//! 图示格式：
//! `<8 行棋盘> [走子方]`
//!
//! - 行 0 在最前，行之间用 `/` 或空白分隔
//! - 浅色格写作 `-`，深色空格写作 `.`
//! - `r`/`R` 为红方兵/王，`b`/`B` 为黑方兵/王
//! - 走子方为 `r` 或 `b`，缺省为红方
//!
//! 示例（初始局面）：
//! `-b-b-b-b/b-b-b-b-/-b-b-b-b/.-.-.-.-/-.-.-.-./r-r-r-r-/-r-r-r-r/r-r-r-r- r`

use crate::board::{Board, BoardState};
use crate::constants::BOARD_SIZE;
use crate::coord::Coord;
use crate::error::{CheckersError, Result};
use crate::piece::{Piece, Side};

/// 初始局面图示
pub const INITIAL_DIAGRAM: &str =
    "-b-b-b-b/b-b-b-b-/-b-b-b-b/.-.-.-.-/-.-.-.-./r-r-r-r-/-r-r-r-r/r-r-r-r- r";

/// 浅色格字符
const LIGHT_SQUARE: char = '-';

/// 深色空格字符
const EMPTY_SQUARE: char = '.';

/// 棋盘图示处理
pub struct Diagram;

impl Diagram {
    /// 解析图示为棋盘（忽略走子方）
    pub fn parse(diagram: &str) -> Result<Board> {
        Self::parse_state(diagram).map(|state| state.board)
    }

    /// 解析图示为棋盘状态
    pub fn parse_state(diagram: &str) -> Result<BoardState> {
        let mut tokens: Vec<&str> = diagram.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(invalid("Empty diagram"));
        }

        // 解析走子方（默认红方）
        let mut side_to_move = Side::Red;
        if tokens.len() > 1 {
            if let Some(last) = tokens.last() {
                if last.chars().count() == 1 {
                    side_to_move = last
                        .chars()
                        .next()
                        .and_then(Self::parse_side)
                        .ok_or_else(|| invalid(format!("Invalid side to move: {}", last)))?;
                    tokens.pop();
                }
            }
        }

        let board = Self::parse_board(&tokens)?;
        Ok(BoardState::from_board(board, side_to_move))
    }

    /// 解析棋盘部分
    fn parse_board(tokens: &[&str]) -> Result<Board> {
        let rows: Vec<&str> = tokens
            .iter()
            .flat_map(|token| token.split('/'))
            .filter(|row| !row.is_empty())
            .collect();

        if rows.len() != BOARD_SIZE {
            return Err(invalid(format!("Expected {} rows, got {}", BOARD_SIZE, rows.len())));
        }

        let mut board = Board::empty();
        for (y, row) in rows.iter().enumerate() {
            let chars: Vec<char> = row.chars().collect();
            if chars.len() != BOARD_SIZE {
                return Err(invalid(format!(
                    "Row {} has {} columns, expected {}",
                    y,
                    chars.len(),
                    BOARD_SIZE
                )));
            }

            for (x, &c) in chars.iter().enumerate() {
                let pos = Coord::new(x as i8, y as i8);
                if !pos.is_playable() {
                    if c != LIGHT_SQUARE {
                        return Err(invalid(format!("Light square {} must be '{}', got '{}'", pos, LIGHT_SQUARE, c)));
                    }
                    continue;
                }

                if c == EMPTY_SQUARE {
                    continue;
                }
                let piece = Piece::from_diagram_char(c)
                    .ok_or_else(|| invalid(format!("Invalid piece character '{}' at {}", c, pos)))?;
                board.place(pos, piece)?;
            }
        }

        Ok(board)
    }

    fn parse_side(c: char) -> Option<Side> {
        match c {
            'r' => Some(Side::Red),
            'b' => Some(Side::Black),
            _ => None,
        }
    }

    /// 将棋盘转换为图示（行之间用 `/` 分隔）
    pub fn board_to_string(board: &Board) -> String {
        let mut rows = Vec::with_capacity(BOARD_SIZE);

        for y in 0..BOARD_SIZE as i8 {
            let row: String = (0..BOARD_SIZE as i8)
                .map(|x| {
                    let pos = Coord::new(x, y);
                    if !pos.is_playable() {
                        LIGHT_SQUARE
                    } else {
                        board
                            .get(pos)
                            .map(|piece| piece.to_diagram_char())
                            .unwrap_or(EMPTY_SQUARE)
                    }
                })
                .collect();
            rows.push(row);
        }

        rows.join("/")
    }

    /// 将棋盘状态转换为图示
    pub fn to_string(state: &BoardState) -> String {
        format!(
            "{} {}",
            Self::board_to_string(&state.board),
            state.side_to_move.to_diagram_char()
        )
    }

    /// 多行形式，便于日志输出
    pub fn to_pretty(board: &Board) -> String {
        Self::board_to_string(board).replace('/', "\n")
    }
}

fn invalid(reason: impl Into<String>) -> CheckersError {
    CheckersError::InvalidDiagram {
        reason: reason.into(),
    }
}
