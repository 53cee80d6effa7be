// src/logic/rules/tests.rs
//! rules モジュール内の関数のユニットテスト。

use super::*; // rules/mod.rs 経由で各ルール関数が re-export されてる
use crate::components::card::{Card, Suit};
use crate::config::board::{BOARD_CELLS, TOTAL_CELLS};

#[test]
fn test_is_placeable() {
    let queen_hearts = Card::new(Suit::Heart, 12);
    let jack_spades = Card::new(Suit::Spade, 11);
    let jack_diamonds = Card::new(Suit::Diamond, 11);
    let ten_spades = Card::new(Suit::Spade, 10);

    assert!(is_placeable(jack_spades, queen_hearts), "Q♥ の下に J♠ は置けるはず");
    assert!(!is_placeable(jack_diamonds, queen_hearts), "同色なので置けないはず");
    assert!(!is_placeable(ten_spades, queen_hearts), "ランク違いなので置けないはず");
    assert!(!is_placeable(queen_hearts, jack_spades), "逆向きは置けないはず");
}

#[test]
fn test_is_placeable_rejects_hidden_and_nil() {
    let queen_hearts = Card::new(Suit::Heart, 12);
    let jack_spades = Card::new(Suit::Spade, 11);

    assert!(!is_placeable(jack_spades.hide(), queen_hearts));
    assert!(!is_placeable(jack_spades, queen_hearts.hide()));
    assert!(!is_placeable(Card::NIL, queen_hearts));
    assert!(!is_placeable(jack_spades, Card::NIL));
}

#[test]
fn test_empty_column_needs_a_king() {
    assert!(can_open_empty_column(Card::new(Suit::Club, 13)));
    assert!(!can_open_empty_column(Card::new(Suit::Club, 13).hide()));
    assert!(!can_open_empty_column(Card::new(Suit::Club, 12)));
    assert!(!can_open_empty_column(Card::NIL));
}

#[test]
fn test_is_tied() {
    let five_clubs = Card::new(Suit::Club, 5);
    let four_hearts = Card::new(Suit::Heart, 4);
    assert!(is_tied(five_clubs, four_hearts));
    assert!(!is_tied(four_hearts, five_clubs));
    assert!(!is_tied(five_clubs, Card::NIL));
    assert!(!is_tied(five_clubs.hide(), four_hearts));
}

#[test]
fn test_can_feed_onto() {
    let ace_spades = Card::new(Suit::Spade, 1);
    let two_spades = Card::new(Suit::Spade, 2);
    let three_spades = Card::new(Suit::Spade, 3);

    // 空の組札には A だけ
    assert!(can_feed_onto(Card::NIL, ace_spades));
    assert!(!can_feed_onto(Card::NIL, two_spades));
    assert!(!can_feed_onto(Card::NIL, ace_spades.hide()));

    // A の上には 2 だけ
    assert!(can_feed_onto(ace_spades, two_spades));
    assert!(!can_feed_onto(ace_spades, three_spades));
    assert!(!can_feed_onto(ace_spades, two_spades.hide()));
    assert!(!can_feed_onto(ace_spades, Card::NIL));
}

#[test]
fn test_win_condition() {
    let kings: Vec<Card> = Suit::ALL.iter().map(|&suit| Card::new(suit, 13)).collect();
    assert!(check_win_condition(&kings), "K が4枚そろえばクリアなはず！🏆");

    let mut almost = kings.clone();
    almost[2] = Card::new(Suit::Diamond, 12);
    assert!(!check_win_condition(&almost), "Q が残ってるとクリアじゃないはず");

    let empty = [Card::NIL; 4];
    assert!(!check_win_condition(&empty));
}

#[test]
fn test_foundation_cells() {
    assert_eq!(foundation_cell(Suit::Spade), BOARD_CELLS);
    assert_eq!(foundation_cell(Suit::Club), TOTAL_CELLS - 1);
    for suit in Suit::ALL {
        assert_eq!(foundation_suit(foundation_cell(suit)), Some(suit));
    }
    assert_eq!(foundation_suit(0), None);
    assert_eq!(foundation_suit(TOTAL_CELLS), None);
}
