//! ルール判定で共通して使うヘルパー関数を置くよ。

use crate::components::card::Suit;
use crate::config::board::{BOARD_CELLS, TOTAL_CELLS};

/// スートに対応する組札セルの添字。組札は場札セルのすぐ後ろに並んでいる。
pub fn foundation_cell(suit: Suit) -> usize {
    BOARD_CELLS + suit.index()
}

/// 組札セルの添字からスートを取得する。組札セルでなければ None。
pub fn foundation_suit(cell: usize) -> Option<Suit> {
    if (BOARD_CELLS..TOTAL_CELLS).contains(&cell) {
        Suit::from_index(cell - BOARD_CELLS)
    } else {
        None
    }
}
