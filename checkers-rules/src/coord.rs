//! 坐标与方向向量

use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SIZE, PLAYABLE_SQUARES};

/// 棋盘坐标 / 方向向量
///
/// 既表示格子位置 `(列, 行)`，也表示移动方向（如 `(1, -1)`）。
/// 作为位置使用时，合法范围为 `[0, 7] x [0, 7]`，行 0 在棋盘上方。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// 列
    pub x: i8,
    /// 行
    pub y: i8,
}

/// 四个斜向方向
pub const DIAGONALS: [Coord; 4] = [
    Coord::new(1, 1),
    Coord::new(1, -1),
    Coord::new(-1, 1),
    Coord::new(-1, -1),
];

impl Coord {
    /// 创建坐标（不检查边界）
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// 检查是否在棋盘内
    pub fn is_on_board(&self) -> bool {
        (0..BOARD_SIZE as i8).contains(&self.x) && (0..BOARD_SIZE as i8).contains(&self.y)
    }

    /// 检查是否为可落子的深色格
    pub fn is_playable(&self) -> bool {
        self.is_on_board() && (self.x + self.y) % 2 == 1
    }

    /// 转换为深色格的紧凑索引（0-31），浅色格或越界返回 None
    pub fn to_index(&self) -> Option<usize> {
        if self.is_playable() {
            Some(self.y as usize * 4 + self.x as usize / 2)
        } else {
            None
        }
    }

    /// 从紧凑索引还原坐标
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= PLAYABLE_SQUARES {
            return None;
        }
        let y = (index / 4) as i8;
        // 偶数行的深色格在奇数列，奇数行在偶数列
        let x = (index % 4) as i8 * 2 + if y % 2 == 0 { 1 } else { 0 };
        Some(Self { x, y })
    }

    /// 向量按标量缩放
    pub fn scale(&self, factor: i8) -> Coord {
        Coord::new(self.x * factor, self.y * factor)
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_arithmetic() {
        assert_eq!(Coord::new(1, 2) + Coord::new(3, 4), Coord::new(4, 6));
        assert_eq!(Coord::new(2, 1) + Coord::new(-3, -4), Coord::new(-1, -3));
        assert_eq!(Coord::new(2, 1).scale(-3), Coord::new(-6, -3));
    }

    #[test]
    fn test_playable_squares() {
        assert!(!Coord::new(0, 0).is_playable());
        assert!(Coord::new(0, 1).is_playable());
        assert!(Coord::new(1, 0).is_playable());
        assert!(!Coord::new(1, 1).is_playable());
        assert!(!Coord::new(8, 1).is_playable());
        assert!(!Coord::new(-1, 0).is_playable());
    }

    #[test]
    fn test_index_roundtrip_covers_all_dark_squares() {
        let mut seen = 0;
        for y in 0..8 {
            for x in 0..8 {
                let coord = Coord::new(x, y);
                match coord.to_index() {
                    Some(index) => {
                        assert_eq!(Coord::from_index(index), Some(coord));
                        seen += 1;
                    }
                    None => assert!(!coord.is_playable()),
                }
            }
        }
        assert_eq!(seen, 32);
        assert_eq!(Coord::from_index(32), None);
    }
}
