// src/logic/playback.rs
//! 記録した移動をコマ送りで再生するためのヘルパー。
//! 補間やタイミングはホスト側の仕事で、ここは「n 手目の盤面」を作るだけ。

use crate::components::card::Card;
use crate::logic::field::Field;
use crate::logic::move_executor::Movement;

#[derive(Debug, Clone)]
pub struct Playback {
    base: Field,
    movements: Vec<Movement>,
    /// 操作が終わったあとの本物の盤面 (めくれたカードも反映済み)。
    result: Option<Field>,
}

impl Playback {
    pub fn new(base: Field, movements: Vec<Movement>) -> Self {
        Self {
            base,
            movements,
            result: None,
        }
    }

    /// 最後のコマとして返す盤面を覚えさせる。
    /// 移動だけでは裏向きカードがめくれないので、最後はこっちを使う。
    pub fn with_result(mut self, result: Field) -> Self {
        self.result = Some(result);
        self
    }

    pub fn len(&self) -> usize {
        self.movements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movements.is_empty()
    }

    /// 最初の `step` 手を適用した盤面。`step` が長さ以上なら最後の盤面。
    pub fn field_at(&self, step: usize) -> Field {
        if step >= self.len() {
            if let Some(result) = &self.result {
                return result.clone();
            }
        }
        let mut field = self.base.clone();
        for movement in self.movements.iter().take(step) {
            field[movement.to] = field[movement.from];
            field[movement.from] = Card::NIL;
        }
        field
    }

    /// `step` 手目で動いているカードの移動。最後を過ぎたら最後の移動を返す。
    pub fn movement(&self, step: usize) -> Option<Movement> {
        self.movements
            .get(step)
            .or_else(|| self.movements.last())
            .copied()
    }
}
