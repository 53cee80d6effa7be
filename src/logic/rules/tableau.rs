//! 場札 (Tableau) へのカード移動ルールを定義するよ。

use crate::components::card::Card;

/// `card` を `onto` のすぐ下に置けるかチェックする。
/// 両方とも表向きで、色違いで、`onto` がちょうど1つ上のランクのときだけ OK。
pub fn is_placeable(card: Card, onto: Card) -> bool {
    if card.is_nil() || onto.is_nil() {
        return false;
    }
    if card.is_hidden() || onto.is_hidden() {
        return false;
    }
    if card.color() == onto.color() {
        return false;
    }
    card.pip() + 1 == onto.pip()
}

/// 空いた列に置けるのは K から始まる束だけ。
pub fn can_open_empty_column(card: Card) -> bool {
    !card.is_hidden() && card.is_king()
}

/// 上下に並んだ2枚が「つながっている」か (ホストが束の区切りを描くのに使う)。
/// A の下には何もつながらない。
pub fn is_tied(upper: Card, lower: Card) -> bool {
    if upper.is_ace() {
        return false;
    }
    is_placeable(lower, upper)
}
