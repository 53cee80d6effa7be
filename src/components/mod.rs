// src/components/mod.rs

// components モジュールに属するサブモジュールを宣言するよ！
// 盤面に置かれる値はカードだけなので、今は card.rs だけ。
pub mod card;

pub use card::{Card, Suit, SuitColor};
