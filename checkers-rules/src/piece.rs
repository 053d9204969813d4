//! 棋子定义

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SIZE, INITIAL_ROWS};
use crate::coord::{Coord, DIAGONALS};

/// 阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// 红方（先手，在下方，向行 0 前进）
    Red,
    /// 黑方（后手，在上方，向行 7 前进）
    Black,
}

impl Side {
    /// 获取对方阵营
    pub fn opponent(&self) -> Side {
        match self {
            Side::Red => Side::Black,
            Side::Black => Side::Red,
        }
    }

    /// 前进方向的行增量
    pub fn forward(&self) -> i8 {
        match self {
            Side::Red => -1,
            Side::Black => 1,
        }
    }

    /// 升变行（离己方底线最远的一行）
    pub fn promotion_row(&self) -> i8 {
        match self {
            Side::Red => 0,
            Side::Black => BOARD_SIZE as i8 - 1,
        }
    }

    /// 初始棋子所在的行
    pub fn home_rows(&self) -> std::ops::RangeInclusive<i8> {
        let rows = INITIAL_ROWS as i8;
        let last = BOARD_SIZE as i8 - 1;
        match self {
            Side::Red => (last - rows + 1)..=last,
            Side::Black => 0..=(rows - 1),
        }
    }

    /// 获取图示字符（小写为兵，大写为王）
    pub fn to_diagram_char(&self) -> char {
        match self {
            Side::Red => 'r',
            Side::Black => 'b',
        }
    }

    /// 从图示字符解析
    pub fn from_diagram_char(c: char) -> Option<Side> {
        match c {
            'r' | 'R' => Some(Side::Red),
            'b' | 'B' => Some(Side::Black),
            _ => None,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Red => write!(f, "Red"),
            Side::Black => write!(f, "Black"),
        }
    }
}

/// 棋子
///
/// 普通兵与王使用同一类型，`king` 标志决定可走方向，一旦升变不再回退。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub side: Side,
    pub king: bool,
}

impl Piece {
    /// 创建普通兵
    pub fn man(side: Side) -> Self {
        Self { side, king: false }
    }

    /// 创建王
    pub fn king(side: Side) -> Self {
        Self { side, king: true }
    }

    /// 升变后的棋子
    pub fn promoted(self) -> Self {
        Self { king: true, ..self }
    }

    /// 可走/可吃的方向：兵只能斜向前，王四个斜向都可以
    pub fn directions(self) -> impl Iterator<Item = Coord> {
        let forward = self.side.forward();
        DIAGONALS
            .into_iter()
            .filter(move |dir| self.king || dir.y == forward)
    }

    /// 落在指定格时是否触发升变
    pub fn promotes_at(&self, pos: Coord) -> bool {
        !self.king && pos.y == self.side.promotion_row()
    }

    /// 获取图示字符
    pub fn to_diagram_char(&self) -> char {
        let c = self.side.to_diagram_char();
        if self.king {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }

    /// 从图示字符解析
    pub fn from_diagram_char(c: char) -> Option<Piece> {
        Side::from_diagram_char(c).map(|side| Piece {
            side,
            king: c.is_ascii_uppercase(),
        })
    }
}
