// src/config/mod.rs
//! 盤面の定数とランタイム設定をまとめるモジュール。

pub mod board;
pub mod settings;

pub use settings::Settings;
