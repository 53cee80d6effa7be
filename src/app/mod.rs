// src/app/mod.rs
//! JS ホスト向けの窓口 (YukonApp) と、盤面を JSON にする処理を置くモジュールだよ！

pub mod state_getter;
pub mod yukon_app;
