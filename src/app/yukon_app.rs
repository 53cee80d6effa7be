// src/app/yukon_app.rs

// --- 必要なものをインポート ---
use log::{error, info, warn};
use rand::{rngs::StdRng, SeedableRng};
use wasm_bindgen::prelude::*;

use crate::app::state_getter;
use crate::config::Settings;
use crate::logic::field::Field;
use crate::logic::move_executor::{self, Movement, SelectionOutcome};
use crate::logic::playback::Playback;
use crate::protocol::{MoveResultData, MoveStatus, PlaybackFrameData};

/// JS ホストから使うゲーム本体だよ！🎮
///
/// 盤面 (`Field`) と設定を1つずつ持つだけ。コールバックもバックグラウンド処理もないので
/// `Arc<Mutex<_>>` はいらない。最後に実行した操作は再生用に `Playback` として覚えておく。
#[wasm_bindgen]
pub struct YukonApp {
    field: Field,
    settings: Settings,
    last_playback: Option<Playback>,
}

#[wasm_bindgen]
impl YukonApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        info!("YukonApp: Initializing with default settings...");
        Self::from_settings(Settings::default())
    }

    /// JSON の設定から作る。壊れた JSON ならエラー。
    pub fn with_settings(json: &str) -> Result<YukonApp, JsValue> {
        Self::parse_settings(json)
            .map(Self::from_settings)
            .map_err(|e| JsValue::from_str(&e))
    }

    /// 配り直す。シードが設定されていれば同じ配り方になる。
    pub fn reset(&mut self) {
        self.field = Self::deal(&self.settings);
        self.last_playback = None;
        info!("YukonApp: Field reset.");
    }

    /// 指定セルのカードのコード ("" / "HID" / "S10" など)。
    pub fn card_code(&self, position: usize) -> String {
        self.field.card_at(position).code()
    }

    pub fn is_front(&self, position: usize) -> bool {
        self.field.is_front(position)
    }

    pub fn get_front(&self, column: usize) -> Option<usize> {
        self.field.get_front(column)
    }

    /// カーソルの列で、指定ランクの次の表向きカードを探す (下へ進んで上に戻る)。
    pub fn find_next_with_pip(&self, from: usize, pip: u8) -> Option<usize> {
        self.field.find_next_with_pip(from, pip)
    }

    pub fn can_feed_foundation(&self, position: usize) -> bool {
        self.field.can_feed_foundation(position)
    }

    /// 1枚だけ組札に送る。送れたら true。
    pub fn feed_foundation(&mut self, position: usize) -> bool {
        self.feed_inner(position).is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.field.is_finished()
    }

    pub fn board_json(&self) -> Result<String, JsValue> {
        state_getter::get_board_json(&self.field).map_err(|e| JsValue::from_str(&e))
    }

    pub fn hint_json(&self, start: usize) -> Result<String, JsValue> {
        state_getter::get_hint_json(&self.field, start, self.settings.max_path_depth)
            .map_err(|e| JsValue::from_str(&e))
    }

    /// 選択中のカード (なければ undefined) とカーソル位置で操作を確定する。
    pub fn select(&mut self, selected: Option<usize>, cursor: usize) -> Result<String, JsValue> {
        let result = self.select_inner(selected, cursor);
        state_getter::to_json(&result, "move result").map_err(|e| JsValue::from_str(&e))
    }

    /// 送れるだけ組札に送る。
    pub fn auto_resolve(&mut self) -> Result<String, JsValue> {
        let result = self.auto_resolve_inner();
        state_getter::to_json(&result, "move result").map_err(|e| JsValue::from_str(&e))
    }

    /// 最後の操作を `step` 手目まで再生した盤面。
    pub fn playback_frame_json(&self, step: usize) -> Result<String, JsValue> {
        self.playback_frame_inner(step)
            .and_then(|frame| state_getter::to_json(&frame, "playback frame"))
            .map_err(|e| JsValue::from_str(&e))
    }

    /// セーブデータのバイト列。
    pub fn save(&self) -> Vec<u8> {
        self.field.to_snapshot()
    }

    /// セーブデータを読み込む。失敗したら今の盤面のまま。
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.load_inner(bytes).map_err(|e| JsValue::from_str(&e))
    }
}

// --- JS には公開しない内部処理 (ネイティブのテストからも呼べる) ---
impl YukonApp {
    pub(crate) fn from_settings(settings: Settings) -> Self {
        let field = Self::deal(&settings);
        Self {
            field,
            settings,
            last_playback: None,
        }
    }

    fn parse_settings(json: &str) -> Result<Settings, String> {
        Settings::from_json(json).map_err(|e| {
            error!("YukonApp: {}", e);
            e
        })
    }

    fn deal(settings: &Settings) -> Field {
        match settings.seed {
            Some(seed) => Field::with_rng(&mut StdRng::seed_from_u64(seed)),
            None => Field::new(),
        }
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub(crate) fn feed_inner(&mut self, position: usize) -> Option<Movement> {
        if !self.field.can_feed_foundation(position) {
            warn!("YukonApp: cell {} cannot be fed to a foundation", position);
            return None;
        }
        let base = self.field.clone();
        let to = self.field.feed_foundation(position);
        self.field.show_available();
        let movement = Movement { from: position, to };
        self.last_playback = Some(Playback::new(base, vec![movement]).with_result(self.field.clone()));
        Some(movement)
    }

    pub(crate) fn select_inner(&mut self, selected: Option<usize>, cursor: usize) -> MoveResultData {
        let base = self.field.clone();
        let outcome = move_executor::resolve_selection(&mut self.field, selected, cursor);
        let (status, mut movements) = match outcome {
            SelectionOutcome::Moved(movements) => (MoveStatus::Moved, movements),
            SelectionOutcome::Fed(movement) => (MoveStatus::Fed, vec![movement]),
            SelectionOutcome::Rejected(reason) => {
                return MoveResultData {
                    status: MoveStatus::Rejected,
                    movements: Vec::new(),
                    reason: Some(reason.to_string()),
                    is_finished: self.field.is_finished(),
                };
            }
        };

        if self.settings.auto_resolve_after_move {
            movements.extend(move_executor::auto_resolve(&mut self.field));
        }
        self.last_playback = Some(Playback::new(base, movements.clone()).with_result(self.field.clone()));
        MoveResultData {
            status,
            movements,
            reason: None,
            is_finished: self.field.is_finished(),
        }
    }

    pub(crate) fn auto_resolve_inner(&mut self) -> MoveResultData {
        let base = self.field.clone();
        let movements = move_executor::auto_resolve(&mut self.field);
        self.last_playback = Some(Playback::new(base, movements.clone()).with_result(self.field.clone()));
        MoveResultData {
            status: if movements.is_empty() { MoveStatus::Rejected } else { MoveStatus::Fed },
            reason: movements
                .is_empty()
                .then(|| "nothing can be fed to the foundations".to_string()),
            movements,
            is_finished: self.field.is_finished(),
        }
    }

    pub(crate) fn playback_frame_inner(&self, step: usize) -> Result<PlaybackFrameData, String> {
        let playback = self.last_playback.as_ref().ok_or_else(|| {
            let error_msg = "No move has been recorded for playback".to_string();
            warn!("YukonApp: {}", error_msg);
            error_msg
        })?;
        Ok(PlaybackFrameData {
            step: step.min(playback.len()),
            total: playback.len(),
            movement: playback.movement(step),
            board: state_getter::board_data(&playback.field_at(step)),
        })
    }

    pub(crate) fn load_inner(&mut self, bytes: &[u8]) -> Result<(), String> {
        let field = Field::from_snapshot(bytes).map_err(|e| {
            let error_msg = format!("Failed to load snapshot: {}", e);
            error!("YukonApp: {}", error_msg);
            error_msg
        })?;
        self.field = field;
        self.last_playback = None;
        info!("YukonApp: snapshot loaded.");
        Ok(())
    }
}

impl Default for YukonApp {
    fn default() -> Self {
        Self::new()
    }
}
