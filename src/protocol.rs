// src/protocol.rs

// このファイルは、Rust (WASM) と JS ホストの間でやり取りするデータの形を定義するよ！💌
// ホストは描画担当で、ここの構造体を JSON で受け取って画面を作る。
// `Serialize` で Rust → JSON、`Deserialize` で JSON → Rust。
use serde::{Deserialize, Serialize};

use crate::components::card::Suit;
use crate::logic::move_executor::Movement;

/// 場札に乗っているカード1枚の情報。空きセルは送らない。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CardData {
    /// セル番号 (行 * 7 + 列)。
    pub position: usize,
    pub column: usize,
    pub row: usize,
    /// "S10" や "HQ"、裏向きなら "HID"。
    pub code: String,
    /// 裏向きのカードは中身を教えない。
    pub suit: Option<Suit>,
    pub pip: Option<u8>,
    pub is_face_up: bool,
    /// 列の手前 (動かせるカード) かどうか。
    pub is_front: bool,
    /// すぐ下のカードと束としてつながっているか。
    pub is_tied: bool,
}

/// 組札1つ分の情報。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FoundationData {
    pub suit: Suit,
    pub cell: usize,
    /// 一番上のカードのコード。空なら None。
    pub top: Option<String>,
    /// 積まれている枚数 (= 一番上のランク)。
    pub count: u8,
}

/// 盤面全体。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BoardData {
    pub width: usize,
    pub height: usize,
    pub cards: Vec<CardData>,
    pub foundations: Vec<FoundationData>,
    pub is_finished: bool,
}

/// ヒントの矢印1本。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintEdgeData {
    pub from: usize,
    pub to: usize,
    pub depth: usize,
}

/// ヒント表示用のデータ。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HintData {
    pub start: usize,
    pub edges: Vec<HintEdgeData>,
    /// 選んだカードを下に受け入れられるカードの位置 (ハイライト用)。
    pub targets: Vec<usize>,
}

/// 操作の結果の種類。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MoveStatus {
    Moved,
    Fed,
    Rejected,
}

/// 選択・組札送り・自動解決の結果。`movements` をホストがアニメーションに使う。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MoveResultData {
    pub status: MoveStatus,
    pub movements: Vec<Movement>,
    /// 拒否されたときの理由 (ステータス表示用)。
    pub reason: Option<String>,
    pub is_finished: bool,
}

/// 再生中の1コマ。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PlaybackFrameData {
    pub step: usize,
    pub total: usize,
    pub movement: Option<Movement>,
    pub board: BoardData,
}
