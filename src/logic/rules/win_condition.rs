//! ゲームの勝利条件判定ロジックを定義するよ。

use crate::components::card::Card;

/// 4つの組札の一番上がぜんぶ K ならクリア！🏆
pub fn check_win_condition(foundation_tops: &[Card]) -> bool {
    foundation_tops.len() == 4 && foundation_tops.iter().all(|top| top.is_king())
}
