// src/logic/rules/mod.rs
//! Yukon のルール判定をまとめるよ！
//! ここの関数はカード同士の関係だけを見る純粋な判定で、盤面の状態は Field 側が持つ。

pub mod common;
pub mod foundation;
pub mod tableau;
pub mod win_condition;

#[cfg(test)]
mod tests;

// 各モジュールから公開したい関数をここで再エクスポート！
pub use common::*;
pub use foundation::*;
pub use tableau::*;
pub use win_condition::*;
