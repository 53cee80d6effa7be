// src/lib.rs

// WASM と JavaScript を繋ぐための基本！
use wasm_bindgen::prelude::*;
use log::info;

// 自分で作ったモジュールたち！
pub mod app;
pub mod components;
pub mod config;
pub mod logic;
pub mod protocol;

pub use app::yukon_app::YukonApp;
pub use components::card::{Card, Suit, SuitColor};
pub use config::Settings;
pub use logic::field::Field;

// main 関数の代わりに、Wasm がロードされた時に最初に実行される関数だよ。
// ロガーはホスト側で好きなものを入れてね (ここでは入れない)。
#[wasm_bindgen(start)]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
    info!("Panic hook set!");
}
