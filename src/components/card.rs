// src/components/card.rs

// serde を使う宣言！スートや色は JSON にしてホストに渡すよ。
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::board::{DECK_SIZE, PIPS_PER_SUIT, PIP_ACE, PIP_KING};

/// カードのスート（マーク）を表す列挙型だよ！
///
/// 並び順はカードの内部エンコードと組札の添字にそのまま使うので、変えちゃダメ！
/// 0: Spade, 1: Heart, 2: Diamond, 3: Club
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spade = 0,
    Heart = 1,
    Diamond = 2,
    Club = 3,
}

impl Suit {
    /// エンコード順に並べた全スート。
    pub const ALL: [Suit; 4] = [Suit::Spade, Suit::Heart, Suit::Diamond, Suit::Club];

    /// 添字 (0-3) からスートを取得する。範囲外なら None。
    pub fn from_index(index: usize) -> Option<Suit> {
        Suit::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn color(self) -> SuitColor {
        match self {
            Suit::Heart | Suit::Diamond => SuitColor::Red,
            Suit::Spade | Suit::Club => SuitColor::Black,
        }
    }

    /// 表示用の1文字。
    pub fn letter(self) -> char {
        match self {
            Suit::Spade => 'S',
            Suit::Heart => 'H',
            Suit::Diamond => 'D',
            Suit::Club => 'C',
        }
    }
}

/// カードの色（赤か黒か）。場札に重ねるときは色違いが条件！
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuitColor {
    Black,
    Red,
}

impl SuitColor {
    pub fn opposite(self) -> SuitColor {
        match self {
            SuitColor::Black => SuitColor::Red,
            SuitColor::Red => SuitColor::Black,
        }
    }
}

/// 1枚のカード（または空きセル）を表す小さな値型だよ！🃏
///
/// 中身は1つの整数にぎゅっと詰めてある:
/// - `suit * 13 + (pip - 1)` が表向きのカード (0..52)
/// - そこに `+52` すると裏向き (52..104)
/// - `-1` は「何もない」(nil)
///
/// 生の値はセーブデータの境界 (`from_raw` / `raw`) 以外では見せないよ。
/// nil に対してスートやランクを聞くのは呼び出し側のバグなので debug ビルドでは panic する。
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    raw: i8,
}

const HIDDEN_OFFSET: i8 = DECK_SIZE as i8;
const NIL_RAW: i8 = -1;
const RAW_MAX: i8 = HIDDEN_OFFSET * 2 - 1;

impl Card {
    /// 空きセル。
    pub const NIL: Card = Card { raw: NIL_RAW };

    /// 表向きのカードを作る。`pip` は 1 (A) から 13 (K)。
    pub fn new(suit: Suit, pip: u8) -> Card {
        debug_assert!((PIP_ACE..=PIP_KING).contains(&pip), "pip out of range: {}", pip);
        Card {
            raw: (suit as i8) * PIPS_PER_SUIT as i8 + (pip as i8 - 1),
        }
    }

    /// 生の値からカードを復元する。-1..=103 以外は None。
    pub fn from_raw(raw: i8) -> Option<Card> {
        if (NIL_RAW..=RAW_MAX).contains(&raw) {
            Some(Card { raw })
        } else {
            None
        }
    }

    pub fn raw(self) -> i8 {
        self.raw
    }

    pub fn is_nil(self) -> bool {
        self.raw == NIL_RAW
    }

    pub fn is_hidden(self) -> bool {
        self.raw >= HIDDEN_OFFSET
    }

    /// 表向きにしたカードを返す。nil はそのまま。
    pub fn show(self) -> Card {
        if self.is_hidden() {
            Card { raw: self.raw - HIDDEN_OFFSET }
        } else {
            self
        }
    }

    /// 裏向きにしたカードを返す。nil はそのまま。
    pub fn hide(self) -> Card {
        if self.is_nil() || self.is_hidden() {
            self
        } else {
            Card { raw: self.raw + HIDDEN_OFFSET }
        }
    }

    /// ランク (1..=13)。
    pub fn pip(self) -> u8 {
        debug_assert!(!self.is_nil(), "pip() called on a nil card");
        (self.show().raw as u8 % PIPS_PER_SUIT) + 1
    }

    pub fn suit(self) -> Suit {
        debug_assert!(!self.is_nil(), "suit() called on a nil card");
        Suit::ALL[(self.show().raw as u8 / PIPS_PER_SUIT) as usize]
    }

    pub fn color(self) -> SuitColor {
        self.suit().color()
    }

    pub fn is_ace(self) -> bool {
        !self.is_nil() && self.pip() == PIP_ACE
    }

    pub fn is_king(self) -> bool {
        !self.is_nil() && self.pip() == PIP_KING
    }

    /// 表示用のコード。nil は空文字、裏向きは "HID"、それ以外は "S10" や "HQ" みたいな形。
    pub fn code(self) -> String {
        if self.is_nil() {
            return String::new();
        }
        if self.is_hidden() {
            return "HID".to_string();
        }
        let pip = match self.pip() {
            1 => "A".to_string(),
            11 => "J".to_string(),
            12 => "Q".to_string(),
            13 => "K".to_string(),
            n => n.to_string(),
        };
        format!("{}{}", self.suit().letter(), pip)
    }
}

impl Default for Card {
    fn default() -> Self {
        Card::NIL
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nil() {
            f.write_str("Card(nil)")
        } else if self.is_hidden() {
            write!(f, "Card({} hidden)", self.show().code())
        } else {
            write!(f, "Card({})", self.code())
        }
    }
}

// --- テスト ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_values_round_trip() {
        for raw in -1..=RAW_MAX {
            let card = Card::from_raw(raw).expect("valid raw value");
            assert_eq!(card.raw(), raw);
        }
        assert_eq!(Card::from_raw(-2), None);
        assert_eq!(Card::from_raw(RAW_MAX + 1), None);
    }

    #[test]
    fn encoding_matches_suit_and_pip() {
        let card = Card::new(Suit::Diamond, 12);
        assert_eq!(card.raw(), 2 * 13 + 11);
        assert_eq!(card.suit(), Suit::Diamond);
        assert_eq!(card.pip(), 12);
        assert_eq!(card.color(), SuitColor::Red);

        let hidden = card.hide();
        assert!(hidden.is_hidden());
        assert_eq!(hidden.raw(), card.raw() + 52);
        // 裏向きでもスートとランクは読める
        assert_eq!(hidden.suit(), Suit::Diamond);
        assert_eq!(hidden.pip(), 12);
    }

    #[test]
    fn show_and_hide_toggle_only_the_hidden_flag() {
        for raw in 0..52 {
            let card = Card::from_raw(raw).unwrap();
            assert_eq!(card.hide().show(), card);
            assert_eq!(card.hide().hide(), card.hide());
            assert_eq!(card.show(), card);
            let hidden = card.hide();
            assert_eq!(hidden.show().hide(), hidden);
            assert_eq!(hidden.show().suit(), hidden.suit());
            assert_eq!(hidden.show().pip(), hidden.pip());
        }
        assert_eq!(Card::NIL.show(), Card::NIL);
        assert_eq!(Card::NIL.hide(), Card::NIL);
    }

    #[test]
    fn nil_is_neither_hidden_nor_a_rank() {
        assert!(Card::NIL.is_nil());
        assert!(!Card::NIL.is_hidden());
        assert!(!Card::NIL.is_ace());
        assert!(!Card::NIL.is_king());
        assert_eq!(Card::default(), Card::NIL);
    }

    #[test]
    fn colors() {
        assert_eq!(Suit::Heart.color(), SuitColor::Red);
        assert_eq!(Suit::Diamond.color(), SuitColor::Red);
        assert_eq!(Suit::Club.color(), SuitColor::Black);
        assert_eq!(Suit::Spade.color(), SuitColor::Black);
        assert_eq!(SuitColor::Red.opposite(), SuitColor::Black);
    }

    #[test]
    fn display_codes() {
        assert_eq!(Card::new(Suit::Spade, 1).code(), "SA");
        assert_eq!(Card::new(Suit::Heart, 10).code(), "H10");
        assert_eq!(Card::new(Suit::Club, 13).to_string(), "CK");
        assert_eq!(Card::new(Suit::Diamond, 11).hide().code(), "HID");
        assert_eq!(Card::NIL.code(), "");
        assert_eq!(format!("{:?}", Card::new(Suit::Heart, 2).hide()), "Card(H2 hidden)");
    }
}
