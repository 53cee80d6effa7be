// src/logic/field.rs
//! 盤面 (Field) だよ！ 7列の場札と4つの組札を1本の配列で持つ。
//!
//! - 場札は 幅7 × 高さ52 のグリッドを行優先で並べたもの (添字 = 行 * 7 + 列)。
//! - その後ろに組札セルが4つ、スートの順番で並ぶ。
//! - 各列のカードは0行目から隙間なく下に積まれる。一番下のカードが「手前」で、動かせるのはそこから。
//!
//! 合法手かどうかのチェックはこのモジュールの問い合わせ関数でやって、
//! `swap` や `feed_foundation` みたいな変更系はチェック済みの前提で呼ぶよ。

use std::fmt;
use std::ops::{Index, IndexMut};

use itertools::{iproduct, Itertools};
use log::{debug, info, warn};
use rand::{thread_rng, Rng};

use crate::components::card::{Card, Suit};
use crate::config::board::{
    BOARD_CELLS, BOTTOM_ROW_START, FIELD_HEIGHT, FIELD_WIDTH, FOUNDATION_COUNT, TOTAL_CELLS,
};
use crate::logic::deck::Deck;
use crate::logic::rules;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Field {
    cells: [Card; TOTAL_CELLS],
}

impl Field {
    /// カードが1枚もない盤面。テストやセーブデータの読み込みで使う。
    pub fn empty() -> Self {
        Self {
            cells: [Card::NIL; TOTAL_CELLS],
        }
    }

    /// OS の乱数でシャッフルして配った新しい盤面。
    pub fn new() -> Self {
        Self::with_rng(&mut thread_rng())
    }

    /// 渡された乱数生成器でシャッフルして配る。
    pub fn with_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Deck::new();
        deck.shuffle_with(rng);
        Self::dealt_from(deck)
    }

    /// デッキを上から順に配る。シャッフルは呼び出し側の仕事。
    pub fn dealt_from(mut deck: Deck) -> Self {
        let mut field = Self::empty();
        field.deal_triangle(&mut deck);
        field.deal_round_robin(&mut deck);
        info!("Field: dealt a new game ({} cards on the tableau)", field.tableau_card_count());
        field
    }

    /// 新しくシャッフルして配り直す。
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// 三角形フェーズ: y 段目では y..7 列に1枚ずつ。x == y のときだけ表向き。
    /// 終わると列 x には x+1 枚 (一番下だけ表向き) が積まれて、合計28枚。
    pub(crate) fn deal_triangle(&mut self, deck: &mut Deck) {
        for y in 0..FIELD_WIDTH {
            for x in y..FIELD_WIDTH {
                let card = deck.next();
                if x == y {
                    self.push(x, card.show());
                } else {
                    self.push(x, card.hide());
                }
            }
        }
    }

    /// 残りのカードを 1..7 列に順番に表向きで配る (0列目には配らない)。
    pub(crate) fn deal_round_robin(&mut self, deck: &mut Deck) {
        let mut col = 1;
        loop {
            let card = deck.next();
            if card.is_nil() {
                break;
            }
            self.push(col, card.show());
            col += 1;
            if col >= FIELD_WIDTH {
                col = 1;
            }
        }
    }

    /// 列の一番下の空きセルにカードを積む。列が満杯なら何もしない。
    pub fn push(&mut self, col: usize, card: Card) {
        debug_assert!(col < FIELD_WIDTH, "column out of range: {}", col);
        match Self::column_cells(col).find(|&pos| self.cells[pos].is_nil()) {
            Some(pos) => self.cells[pos] = card,
            None => warn!("Field: column {} is full, dropped {:?}", col, card),
        }
    }

    /// 列に属する場札セルの添字を上から順に返す。
    pub fn column_cells(col: usize) -> impl Iterator<Item = usize> {
        (col..BOARD_CELLS).step_by(FIELD_WIDTH)
    }

    pub fn column_of(pos: usize) -> usize {
        pos % FIELD_WIDTH
    }

    pub fn row_of(pos: usize) -> usize {
        pos / FIELD_WIDTH
    }

    /// 列に積まれているカードの枚数。
    pub fn column_len(&self, col: usize) -> usize {
        Self::column_cells(col)
            .take_while(|&pos| !self.cells[pos].is_nil())
            .count()
    }

    /// 指定セルのカード。範囲外なら nil。
    pub fn card_at(&self, pos: usize) -> Card {
        self.cells.get(pos).copied().unwrap_or(Card::NIL)
    }

    /// 全セルをそのまま見る (セーブデータ用)。
    pub fn cells(&self) -> &[Card] {
        &self.cells
    }

    /// すぐ下のセルが空いているか (＝その列の手前か)。
    /// 最下段は常に手前。組札セルや範囲外は手前じゃない。
    pub fn is_front(&self, pos: usize) -> bool {
        if (BOTTOM_ROW_START..BOARD_CELLS).contains(&pos) {
            return true;
        }
        if pos < BOTTOM_ROW_START {
            return self.cells[pos + FIELD_WIDTH].is_nil();
        }
        false
    }

    /// 列の手前のセル。空の列なら0行目のセルが返る。列番号が範囲外なら None。
    pub fn get_front(&self, col: usize) -> Option<usize> {
        if col >= FIELD_WIDTH {
            return None;
        }
        Self::column_cells(col).find(|&pos| self.is_front(pos))
    }

    /// `a` と `b` から下に向かって1段ずつ中身を入れ替えていく。
    /// 両方 nil になったか、どちらかが盤外に出たら止まる。合法かどうかは見ない！
    pub fn swap(&mut self, a: usize, b: usize) {
        debug_assert!(a < BOARD_CELLS && b < BOARD_CELLS, "swap out of range: {} <-> {}", a, b);
        debug!("Field: swapping runs starting at {} and {}", a, b);
        let (mut a, mut b) = (a, b);
        while a < BOARD_CELLS && b < BOARD_CELLS {
            if self.cells[a].is_nil() && self.cells[b].is_nil() {
                break;
            }
            self.cells.swap(a, b);
            a += FIELD_WIDTH;
            b += FIELD_WIDTH;
        }
    }

    /// 手前に出てきた裏向きカードをめくる。最下段は無条件で表向きにする。
    pub fn show_available(&mut self) {
        for pos in 0..BOTTOM_ROW_START {
            let card = self.cells[pos];
            if card.is_hidden() && self.cells[pos + FIELD_WIDTH].is_nil() {
                self.cells[pos] = card.show();
            }
        }
        for pos in BOTTOM_ROW_START..BOARD_CELLS {
            self.cells[pos] = self.cells[pos].show();
        }
    }

    /// 組札の一番上のカード (空なら nil)。
    pub fn foundation_top(&self, suit: Suit) -> Card {
        self.cells[rules::foundation_cell(suit)]
    }

    pub fn foundation_tops(&self) -> [Card; FOUNDATION_COUNT] {
        Suit::ALL.map(|suit| self.foundation_top(suit))
    }

    /// 指定セルのカードを組札に送れるかチェックする。
    pub fn can_feed_foundation(&self, pos: usize) -> bool {
        if !self.is_front(pos) {
            return false;
        }
        let card = self.cells[pos];
        if card.is_nil() || card.is_hidden() {
            return false;
        }
        rules::can_feed_onto(self.foundation_top(card.suit()), card)
    }

    /// 指定セルのカードを組札に送って、送り先の組札セルを返す。
    /// `can_feed_foundation` で確認済みの前提だよ。
    pub fn feed_foundation(&mut self, pos: usize) -> usize {
        debug_assert!(self.can_feed_foundation(pos), "feed_foundation on an unfeedable cell {}", pos);
        let card = self.cells[pos];
        let target = rules::foundation_cell(card.suit());
        self.cells[target] = card;
        self.cells[pos] = Card::NIL;
        debug!("Field: fed {} from {} to foundation", card, pos);
        target
    }

    /// 4つの組札がぜんぶ K まで積み上がったらクリア！
    pub fn is_finished(&self) -> bool {
        rules::check_win_condition(&self.foundation_tops())
    }

    /// 指定セルのカードとその真下のカードが束としてつながっているか。
    pub fn is_tied(&self, pos: usize) -> bool {
        if pos >= BOTTOM_ROW_START {
            return false;
        }
        rules::is_tied(self.cells[pos], self.cells[pos + FIELD_WIDTH])
    }

    /// 指定セルのカードをすぐ下に受け入れられるカードの位置をぜんぶ集める。
    /// (色違いでランクがちょうど1つ上の表向きカード)
    pub fn placement_targets(&self, pos: usize) -> Vec<usize> {
        let card = self.card_at(pos);
        if card.is_nil() || card.is_hidden() {
            return Vec::new();
        }
        (0..BOARD_CELLS)
            .filter(|&target| rules::is_placeable(card, self.cells[target]))
            .collect()
    }

    /// `from` と同じ列を、1つ下から順に (最後は上に戻って) 探して、
    /// 指定ランクの表向きカードを見つける。最後に `from` 自身も調べる。
    pub fn find_next_with_pip(&self, from: usize, pip: u8) -> Option<usize> {
        if from >= BOARD_CELLS {
            return None;
        }
        let col = Self::column_of(from);
        let row = Self::row_of(from);
        (1..=FIELD_HEIGHT)
            .map(|step| ((row + step) % FIELD_HEIGHT) * FIELD_WIDTH + col)
            .find(|&pos| {
                let card = self.cells[pos];
                !card.is_nil() && !card.is_hidden() && card.pip() == pip
            })
    }

    /// 場札に乗っているカードの枚数。
    pub fn tableau_card_count(&self) -> usize {
        self.cells[..BOARD_CELLS].iter().filter(|card| !card.is_nil()).count()
    }

    /// 一番深い列の長さ (表示用)。
    fn deepest_column(&self) -> usize {
        (0..FIELD_WIDTH).map(|col| self.column_len(col)).max().unwrap_or(0)
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<usize> for Field {
    type Output = Card;

    fn index(&self, pos: usize) -> &Card {
        &self.cells[pos]
    }
}

impl IndexMut<usize> for Field {
    fn index_mut(&mut self, pos: usize) -> &mut Card {
        &mut self.cells[pos]
    }
}

/// デバッグ用のテキスト表示。1行目が組札、その下が場札。
impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let foundations = self
            .foundation_tops()
            .iter()
            .map(|card| format!("[{:>3}]", card.code()))
            .join(" ");
        writeln!(f, "{}", foundations)?;

        let rows = self.deepest_column();
        let codes: Vec<String> = iproduct!(0..rows, 0..FIELD_WIDTH)
            .map(|(row, col)| {
                let card = self.cells[row * FIELD_WIDTH + col];
                if card.is_nil() {
                    "  .".to_string()
                } else {
                    format!("{:>3}", card.code())
                }
            })
            .collect();
        for line in codes.chunks(FIELD_WIDTH) {
            writeln!(f, "{}", line.iter().join(" "))?;
        }
        Ok(())
    }
}
