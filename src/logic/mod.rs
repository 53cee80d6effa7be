// src/logic/mod.rs
//! ゲームのロジック (盤面・ルール・探索・移動) をまとめるモジュール。
//! ここは wasm-bindgen に依存しないので、普通の `cargo test` で全部テストできるよ。

pub mod deck;
pub mod field;
pub mod move_executor;
pub mod path_finder;
pub mod playback;
pub mod rules;
pub mod snapshot;

pub use field::Field;
pub use move_executor::{Movement, MoveRejection, RunMove, SelectionOutcome};
pub use path_finder::{PathFinder, PathTree};
pub use snapshot::SnapshotError;
