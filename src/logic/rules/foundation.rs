//! 組札 (Foundation) へのカード移動ルールを定義するよ。

use crate::components::card::Card;

/// `card` を、いま一番上が `top` の組札に送れるかチェックする。
///
/// スートが合っているかは呼び出し側 (組札はスートごとに1つ) で保証する前提。
/// - 組札が空なら A だけ
/// - そうでなければ top の次のランクだけ
pub fn can_feed_onto(top: Card, card: Card) -> bool {
    if card.is_nil() || card.is_hidden() {
        return false;
    }
    if top.is_nil() {
        return card.is_ace();
    }
    debug_assert_eq!(top.suit(), card.suit(), "foundation suit mismatch");
    top.pip() + 1 == card.pip()
}
