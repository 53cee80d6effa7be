// src/config/board.rs
//! 盤面の大きさやカードの数に関する定数を定義するよ！
//! セルの添字計算はぜんぶここの値を使うこと。

pub const PIPS_PER_SUIT: u8 = 13; // 1スートあたりのランク数
pub const SUIT_COUNT: usize = 4; // スートの数
pub const DECK_SIZE: usize = PIPS_PER_SUIT as usize * SUIT_COUNT; // 52枚

pub const PIP_ACE: u8 = 1;
pub const PIP_KING: u8 = 13;

// --- 盤面 (Field) ---
pub const FIELD_WIDTH: usize = 7; // 場札の列数
pub const FIELD_HEIGHT: usize = DECK_SIZE; // 1列に積める最大枚数 (理論上の最大)
pub const BOARD_CELLS: usize = FIELD_WIDTH * FIELD_HEIGHT; // 場札部分のセル数 (364)
pub const FOUNDATION_COUNT: usize = SUIT_COUNT; // 組札はスートごとに1つ
pub const TOTAL_CELLS: usize = BOARD_CELLS + FOUNDATION_COUNT; // 組札を含めた全セル数 (368)

/// 最下段の先頭セルの添字。ここから先の場札セルは常に「手前」扱い。
pub const BOTTOM_ROW_START: usize = BOARD_CELLS - FIELD_WIDTH;

// --- ヒント探索 ---
pub const MAX_PATH_DEPTH: usize = 16;

// --- セーブデータ ---
pub const SNAPSHOT_MAGIC: [u8; 4] = *b"YUKN";
pub const SNAPSHOT_VERSION: u8 = 1;
pub const SNAPSHOT_LEN: usize = SNAPSHOT_MAGIC.len() + 1 + TOTAL_CELLS;
