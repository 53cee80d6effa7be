// src/logic/deck.rs

use crate::components::card::Card;
use crate::config::board::DECK_SIZE;
use rand::{seq::SliceRandom, thread_rng, Rng};

/// 52枚のカードデッキだよ！🃏 配るときにだけ使う使い捨ての山。
///
/// 作った時点ではエンコード順 (S,H,D,C × A..K) に並んでいて、全部表向き。
/// `next()` で上から1枚ずつ取り出して、尽きたら nil を返すよ。
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    next_index: usize,
}

impl Deck {
    /// 標準的な52枚のデッキを生成する。
    pub fn new() -> Self {
        let cards = (0..DECK_SIZE as i8)
            .filter_map(Card::from_raw)
            .collect();
        Self { cards, next_index: 0 }
    }

    /// OS の乱数でシャッフルする。
    pub fn shuffle(&mut self) {
        let mut rng = thread_rng(); // 乱数生成器を取得
        self.shuffle_with(&mut rng);
    }

    /// 渡された乱数生成器でシャッフルする。シード固定の配り直しはこっち。
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
        self.next_index = 0;
    }

    /// 次の1枚を取り出す。もう残ってなければ nil。
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Card {
        match self.cards.get(self.next_index) {
            Some(&card) => {
                self.next_index += 1;
                card
            }
            None => Card::NIL,
        }
    }

    /// まだ配っていない枚数。
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.next_index
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
