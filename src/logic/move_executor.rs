// src/logic/move_executor.rs
//! 「選んだカードをこの列へ」を実際の移動に変換して実行するモジュールだよ！🚚
//!
//! - `compute_run_move`: 動かせるかチェックして、1枚ずつの移動 (`Movement`) の並びを作る
//! - `apply_run_move`: それを盤面に反映する
//! - `auto_resolve`: 手前のカードを組札に送れるだけ送る (もう送れなくなるまで繰り返す)
//! - `resolve_selection`: 選択 → 決定 の操作をまとめて処理する
//!
//! 反則手はエラーじゃなくて `MoveRejection` で理由を返すだけ。panic はしない。

use std::fmt;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::board::{BOARD_CELLS, FIELD_WIDTH};
use crate::logic::field::Field;
use crate::logic::rules;

/// 1枚のカードの移動。`from` の中身が `to` に移る。アニメーション再生にも使う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub from: usize,
    pub to: usize,
}

/// チェック済みの束移動。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunMove {
    /// 束の一番上のカードの位置。
    pub source: usize,
    /// 束の一番上のカードが着地するセル。
    pub destination: usize,
    /// 束の上から順に並んだ移動。
    pub movements: Vec<Movement>,
}

/// 移動できなかった理由。ホストのステータス表示に使う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveRejection {
    NothingSelected,
    SameColumn,
    NotPlaceable,
    ColumnNotEmpty,
    NoRoom,
    InvalidPosition,
}

impl fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            MoveRejection::NothingSelected => "no face-up card is selected",
            MoveRejection::SameColumn => "the card is already in that column",
            MoveRejection::NotPlaceable => "the card cannot be placed there",
            MoveRejection::ColumnNotEmpty => "a King needs an empty column",
            MoveRejection::NoRoom => "the column has no room for the run",
            MoveRejection::InvalidPosition => "position is outside the board",
        };
        f.write_str(message)
    }
}

/// 選択 → 決定 の結果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    Moved(Vec<Movement>),
    Fed(Movement),
    Rejected(MoveRejection),
}

/// `selected` から列の底までの束を `target_col` の手前に動かせるかチェックして、移動の並びを返す。
///
/// - K が先頭の束は空の列にだけ置ける (0行目に着地)
/// - それ以外は、手前のカードが色違いで1つ上のランクなら、そのすぐ下に着地
/// - 着地先のセルは全部盤内で空いてないとダメ
pub fn compute_run_move(
    field: &Field,
    selected: usize,
    target_col: usize,
) -> Result<RunMove, MoveRejection> {
    if selected >= BOARD_CELLS || target_col >= FIELD_WIDTH {
        return Err(MoveRejection::InvalidPosition);
    }
    let card = field[selected];
    if card.is_nil() || card.is_hidden() {
        return Err(MoveRejection::NothingSelected);
    }
    if Field::column_of(selected) == target_col {
        return Err(MoveRejection::SameColumn);
    }

    let front = field
        .get_front(target_col)
        .ok_or(MoveRejection::InvalidPosition)?;
    let front_card = field[front];

    let destination = if front_card.is_nil() {
        if !rules::can_open_empty_column(card) {
            return Err(MoveRejection::NotPlaceable);
        }
        front
    } else {
        if card.is_king() {
            return Err(MoveRejection::ColumnNotEmpty);
        }
        if !rules::is_placeable(card, front_card) {
            return Err(MoveRejection::NotPlaceable);
        }
        front + FIELD_WIDTH
    };

    let movements = Field::column_cells(Field::column_of(selected))
        .skip(Field::row_of(selected))
        .take_while(|&from| !field[from].is_nil())
        .enumerate()
        .map(|(offset, from)| {
            let to = destination + offset * FIELD_WIDTH;
            if to >= BOARD_CELLS || !field[to].is_nil() {
                Err(MoveRejection::NoRoom)
            } else {
                Ok(Movement { from, to })
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        "MoveExecutor: run of {} from {} to column {} is legal",
        movements.len(),
        selected,
        target_col
    );
    Ok(RunMove {
        source: selected,
        destination,
        movements,
    })
}

/// チェック済みの束移動を盤面に反映して、見えるようになったカードをめくる。
pub fn apply_run_move(field: &mut Field, run: &RunMove) {
    field.swap(run.source, run.destination);
    field.show_available();
    info!(
        "MoveExecutor: moved {} card(s) from {} to {}",
        run.movements.len(),
        run.source,
        run.destination
    );
}

/// 手前のカードを組札に送れるだけ送る。1周して何も送れなかったら終わり。
/// 最後に1回だけ `show_available` を呼ぶので、途中でめくれるはずの裏向きカードは今回は送られない。
pub fn auto_resolve(field: &mut Field) -> Vec<Movement> {
    let mut movements = Vec::new();
    loop {
        let mut fed_any = false;
        for col in 0..FIELD_WIDTH {
            let Some(front) = field.get_front(col) else {
                continue;
            };
            if field.can_feed_foundation(front) {
                let to = field.feed_foundation(front);
                movements.push(Movement { from: front, to });
                fed_any = true;
            }
        }
        if !fed_any {
            break;
        }
    }
    field.show_available();
    if !movements.is_empty() {
        info!("MoveExecutor: auto-fed {} card(s) to the foundations", movements.len());
    }
    movements
}

/// 選択中のカードとカーソル位置から操作を決める。
///
/// カーソルが選択中のカードと同じ列なら、カーソルのカードを組札へ送ってみる。
/// 別の列なら、その列の手前へ束を動かしてみる。
pub fn resolve_selection(
    field: &mut Field,
    selected: Option<usize>,
    cursor: usize,
) -> SelectionOutcome {
    let Some(selected) = selected else {
        return SelectionOutcome::Rejected(MoveRejection::NothingSelected);
    };
    if selected >= BOARD_CELLS || cursor >= BOARD_CELLS {
        return SelectionOutcome::Rejected(MoveRejection::InvalidPosition);
    }
    let card = field[selected];
    if card.is_nil() || card.is_hidden() {
        return SelectionOutcome::Rejected(MoveRejection::NothingSelected);
    }

    if Field::column_of(cursor) == Field::column_of(selected) {
        if !field.can_feed_foundation(cursor) {
            return SelectionOutcome::Rejected(MoveRejection::SameColumn);
        }
        let to = field.feed_foundation(cursor);
        field.show_available();
        return SelectionOutcome::Fed(Movement { from: cursor, to });
    }

    match compute_run_move(field, selected, Field::column_of(cursor)) {
        Ok(run) => {
            apply_run_move(field, &run);
            SelectionOutcome::Moved(run.movements)
        }
        Err(reason) => {
            debug!("MoveExecutor: rejected {} -> {}: {}", selected, cursor, reason);
            SelectionOutcome::Rejected(reason)
        }
    }
}
