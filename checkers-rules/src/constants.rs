//! 规则常量定义

/// 棋盘边长（行数 = 列数）
pub const BOARD_SIZE: usize = 8;

/// 可落子的深色格数量
pub const PLAYABLE_SQUARES: usize = 32;

/// 每方初始棋子数
pub const PIECES_PER_SIDE: usize = 12;

/// 每方初始占据的行数
pub const INITIAL_ROWS: usize = 3;

/// 连跳路径的最大长度（一次最多吃光对方所有棋子）
pub const MAX_CAPTURE_CHAIN: usize = PIECES_PER_SIDE;
