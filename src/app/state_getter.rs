//! Converts the current Field (and hint trees) into the JSON shapes in `protocol`.

use log::{error, info};
use serde::Serialize;

use crate::components::card::Suit;
use crate::config::board::{BOARD_CELLS, FIELD_HEIGHT, FIELD_WIDTH};
use crate::logic::field::Field;
use crate::logic::path_finder::PathFinder;
use crate::logic::rules;
use crate::protocol::{BoardData, CardData, FoundationData, HintData, HintEdgeData};

/// 盤面をホスト向けのデータに変換する。
pub fn board_data(field: &Field) -> BoardData {
    let cards = (0..BOARD_CELLS)
        .filter(|&pos| !field[pos].is_nil())
        .map(|pos| {
            let card = field[pos];
            let is_face_up = !card.is_hidden();
            CardData {
                position: pos,
                column: Field::column_of(pos),
                row: Field::row_of(pos),
                code: card.code(),
                suit: is_face_up.then(|| card.suit()),
                pip: is_face_up.then(|| card.pip()),
                is_face_up,
                is_front: field.is_front(pos),
                is_tied: field.is_tied(pos),
            }
        })
        .collect();

    let foundations = Suit::ALL
        .iter()
        .map(|&suit| {
            let top = field.foundation_top(suit);
            FoundationData {
                suit,
                cell: rules::foundation_cell(suit),
                top: (!top.is_nil()).then(|| top.code()),
                count: if top.is_nil() { 0 } else { top.pip() },
            }
        })
        .collect();

    BoardData {
        width: FIELD_WIDTH,
        height: FIELD_HEIGHT,
        cards,
        foundations,
        is_finished: field.is_finished(),
    }
}

/// ヒント探索の結果をホスト向けのデータに変換する。
pub fn hint_data(field: &Field, start: usize, max_depth: usize) -> HintData {
    let tree = PathFinder::with_max_depth(field, max_depth).compute(start);
    let edges = tree
        .edges()
        .into_iter()
        .map(|(from, to, depth)| HintEdgeData { from, to, depth })
        .collect();
    HintData {
        start,
        edges,
        targets: field.placement_targets(start),
    }
}

/// 盤面を JSON 文字列にする。
pub fn get_board_json(field: &Field) -> Result<String, String> {
    info!("Getting board state...");
    to_json(&board_data(field), "board state")
}

/// ヒントを JSON 文字列にする。
pub fn get_hint_json(field: &Field, start: usize, max_depth: usize) -> Result<String, String> {
    if start >= BOARD_CELLS {
        let error_msg = format!("Hint start {} is outside the board", start);
        error!("{}", error_msg);
        return Err(error_msg);
    }
    to_json(&hint_data(field, start, max_depth), "hint")
}

/// serde_json で文字列にする共通処理。失敗したらログを出して String のエラーにする。
pub fn to_json<T: Serialize>(value: &T, what: &str) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| {
        let error_msg = format!("Failed to serialize {}: {}", what, e);
        error!("{}", error_msg);
        error_msg
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::card::Card;

    #[test]
    fn board_data_hides_face_down_cards() {
        let mut field = Field::empty();
        field.push(0, Card::new(Suit::Heart, 6).hide());
        field.push(0, Card::new(Suit::Club, 5));
        field[rules::foundation_cell(Suit::Spade)] = Card::new(Suit::Spade, 2);

        let board = board_data(&field);
        assert_eq!(board.cards.len(), 2);
        let hidden = &board.cards[0];
        assert_eq!(hidden.code, "HID");
        assert_eq!(hidden.suit, None);
        assert!(!hidden.is_front);
        let front = &board.cards[1];
        assert_eq!(front.code, "C5");
        assert_eq!(front.pip, Some(5));
        assert_eq!(front.row, 1);
        assert!(front.is_front);

        assert_eq!(board.foundations[0].top.as_deref(), Some("S2"));
        assert_eq!(board.foundations[0].count, 2);
        assert_eq!(board.foundations[1].top, None);
        assert!(!board.is_finished);
    }

    #[test]
    fn board_json_is_valid_json() {
        let field = Field::empty();
        let json = get_board_json(&field).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["width"], 7);
        assert_eq!(value["foundations"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn hint_json_rejects_foundation_cells() {
        let field = Field::empty();
        assert!(get_hint_json(&field, BOARD_CELLS, 16).is_err());
        let json = get_hint_json(&field, 0, 16).unwrap();
        assert!(json.contains("\"edges\":[]"));
    }
}
