// src/logic/snapshot.rs
//! 盤面のセーブデータ形式だよ！💾
//!
//! レイアウト (全部で 373 バイト):
//! - 先頭4バイト: マジック `b"YUKN"`
//! - 1バイト: フォーマットのバージョン (今は 1)
//! - 残り: 368 セルを添字順に1バイトずつ。
//!   空きセルは `0xFF`、カードは `ランク(0..12) | スート << 4 | 裏向き << 6`。
//!
//! 読み込みは全部チェックしてから盤面を組み立てるので、失敗したら呼び出し側の盤面はそのまま。

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use log::{error, info};

use crate::components::card::{Card, Suit};
use crate::config::board::{
    BOARD_CELLS, PIPS_PER_SUIT, SNAPSHOT_LEN, SNAPSHOT_MAGIC, SNAPSHOT_VERSION, TOTAL_CELLS,
};
use crate::logic::field::Field;
use crate::logic::rules;

const NIL_BYTE: u8 = 0xFF;
const SUIT_SHIFT: u8 = 4;
const HIDDEN_BIT: u8 = 1 << 6;
const RANK_MASK: u8 = 0x0F;
const SUIT_MASK: u8 = 0x03;
const HEADER_LEN: usize = SNAPSHOT_MAGIC.len() + 1;

/// セーブデータの読み書きで起きるエラー。
#[derive(Debug)]
pub enum SnapshotError {
    Io(io::Error),
    BadLength { expected: usize, actual: usize },
    BadMagic,
    UnsupportedVersion(u8),
    /// `index` はセル番号 (ヘッダを除いた位置)。
    InvalidCell { index: usize, byte: u8 },
    /// 組札セルに別スートや裏向きのカードが入ってた。
    InvalidFoundation { index: usize },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Io(err) => write!(f, "snapshot I/O failed: {}", err),
            SnapshotError::BadLength { expected, actual } => {
                write!(f, "snapshot must be {} bytes, got {}", expected, actual)
            }
            SnapshotError::BadMagic => f.write_str("not a Yukon snapshot (bad magic)"),
            SnapshotError::UnsupportedVersion(version) => {
                write!(f, "unsupported snapshot version {}", version)
            }
            SnapshotError::InvalidCell { index, byte } => {
                write!(f, "invalid cell byte 0x{:02X} at cell {}", byte, index)
            }
            SnapshotError::InvalidFoundation { index } => {
                write!(f, "foundation cell {} holds a card it cannot hold", index)
            }
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for SnapshotError {
    fn from(err: io::Error) -> Self {
        SnapshotError::Io(err)
    }
}

/// カード1枚を1バイトにする。
pub fn encode_cell(card: Card) -> u8 {
    if card.is_nil() {
        return NIL_BYTE;
    }
    let rank = card.pip() - 1;
    let suit = card.suit().index() as u8;
    let hidden = if card.is_hidden() { HIDDEN_BIT } else { 0 };
    rank | (suit << SUIT_SHIFT) | hidden
}

/// 1バイトからカードを復元する。使われてないビットが立ってたり、ランクが範囲外なら None。
pub fn decode_cell(byte: u8) -> Option<Card> {
    if byte == NIL_BYTE {
        return Some(Card::NIL);
    }
    if byte & !(RANK_MASK | (SUIT_MASK << SUIT_SHIFT) | HIDDEN_BIT) != 0 {
        return None;
    }
    let rank = byte & RANK_MASK;
    if rank >= PIPS_PER_SUIT {
        return None;
    }
    let suit = Suit::from_index(((byte >> SUIT_SHIFT) & SUIT_MASK) as usize)?;
    let card = Card::new(suit, rank + 1);
    Some(if byte & HIDDEN_BIT != 0 { card.hide() } else { card })
}

impl Field {
    /// 盤面をセーブデータのバイト列にする。
    pub fn to_snapshot(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(SNAPSHOT_LEN);
        bytes.extend_from_slice(&SNAPSHOT_MAGIC);
        bytes.push(SNAPSHOT_VERSION);
        bytes.extend(self.cells().iter().map(|&card| encode_cell(card)));
        bytes
    }

    /// セーブデータから盤面を作る。
    pub fn from_snapshot(bytes: &[u8]) -> Result<Field, SnapshotError> {
        if bytes.len() != SNAPSHOT_LEN {
            return Err(SnapshotError::BadLength {
                expected: SNAPSHOT_LEN,
                actual: bytes.len(),
            });
        }
        if bytes[..SNAPSHOT_MAGIC.len()] != SNAPSHOT_MAGIC {
            return Err(SnapshotError::BadMagic);
        }
        let version = bytes[SNAPSHOT_MAGIC.len()];
        if version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(version));
        }

        let mut field = Field::empty();
        for (index, &byte) in bytes[HEADER_LEN..].iter().enumerate() {
            let card = decode_cell(byte).ok_or(SnapshotError::InvalidCell { index, byte })?;
            if index >= BOARD_CELLS && !card.is_nil() {
                let expected = rules::foundation_suit(index);
                if card.is_hidden() || expected != Some(card.suit()) {
                    return Err(SnapshotError::InvalidFoundation { index });
                }
            }
            field[index] = card;
        }
        debug_assert_eq!(field.cells().len(), TOTAL_CELLS);
        Ok(field)
    }

    /// ファイルに書き出す。
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        fs::write(path, self.to_snapshot()).map_err(|err| {
            error!("Snapshot: failed to write {}: {}", path.display(), err);
            SnapshotError::from(err)
        })?;
        info!("Snapshot: saved to {}", path.display());
        Ok(())
    }

    /// ファイルから読み込んで自分を置き換える。失敗したら何も変えない。
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let loaded = Field::from_snapshot(&bytes).map_err(|err| {
            error!("Snapshot: rejected {}: {}", path.display(), err);
            err
        })?;
        *self = loaded;
        info!("Snapshot: loaded from {}", path.display());
        Ok(())
    }
}

// --- テスト ---
#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::path::PathBuf;

    fn seeded_field(seed: u64) -> Field {
        Field::with_rng(&mut StdRng::seed_from_u64(seed))
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("yukon_{}_{}.bin", name, std::process::id()))
    }

    #[test]
    fn cell_bytes_round_trip_every_card() {
        for raw in -1..104i8 {
            let card = Card::from_raw(raw).unwrap();
            assert_eq!(decode_cell(encode_cell(card)), Some(card), "raw {}", raw);
        }
        assert_eq!(encode_cell(Card::NIL), 0xFF);
        assert_eq!(encode_cell(Card::new(Suit::Heart, 1)), 0x10);
        assert_eq!(encode_cell(Card::new(Suit::Club, 13).hide()), 0x0C | 0x30 | 0x40);
    }

    #[test]
    fn invalid_cell_bytes_are_rejected() {
        assert_eq!(decode_cell(0x0D), None, "ランク 13 は範囲外");
        assert_eq!(decode_cell(0x80), None, "最上位ビットは使わない");
        assert_eq!(decode_cell(0xFE), None);
    }

    #[test]
    fn snapshot_round_trip() {
        let field = seeded_field(11);
        let bytes = field.to_snapshot();
        assert_eq!(bytes.len(), 373);
        assert_eq!(&bytes[..4], b"YUKN");
        assert_eq!(bytes[4], 1);

        let restored = Field::from_snapshot(&bytes).unwrap();
        assert_eq!(restored, field);
        assert_eq!(restored.to_snapshot(), bytes);
    }

    #[test]
    fn snapshot_keeps_foundations() {
        let mut field = Field::empty();
        field[rules::foundation_cell(Suit::Heart)] = Card::new(Suit::Heart, 3);
        field.push(4, Card::new(Suit::Spade, 7).hide());
        let restored = Field::from_snapshot(&field.to_snapshot()).unwrap();
        assert_eq!(restored, field);
        assert_eq!(restored.foundation_top(Suit::Heart), Card::new(Suit::Heart, 3));
    }

    #[test]
    fn header_errors() {
        let bytes = seeded_field(1).to_snapshot();

        let short = &bytes[..100];
        assert!(matches!(
            Field::from_snapshot(short),
            Err(SnapshotError::BadLength { expected: 373, actual: 100 })
        ));

        let mut bad_magic = bytes.clone();
        bad_magic[0] = b'X';
        assert!(matches!(Field::from_snapshot(&bad_magic), Err(SnapshotError::BadMagic)));

        let mut bad_version = bytes.clone();
        bad_version[4] = 2;
        assert!(matches!(
            Field::from_snapshot(&bad_version),
            Err(SnapshotError::UnsupportedVersion(2))
        ));
    }

    #[test]
    fn corrupt_cell_is_reported_with_its_index() {
        let mut bytes = seeded_field(2).to_snapshot();
        bytes[HEADER_LEN + 10] = 0x0E;
        assert!(matches!(
            Field::from_snapshot(&bytes),
            Err(SnapshotError::InvalidCell { index: 10, byte: 0x0E })
        ));
    }

    #[test]
    fn foundation_must_match_its_suit() {
        let mut field = Field::empty();
        let spade_cell = rules::foundation_cell(Suit::Spade);
        field[spade_cell] = Card::new(Suit::Heart, 1);
        assert!(matches!(
            Field::from_snapshot(&field.to_snapshot()),
            Err(SnapshotError::InvalidFoundation { index }) if index == spade_cell
        ));

        field[spade_cell] = Card::new(Suit::Spade, 1).hide();
        assert!(matches!(
            Field::from_snapshot(&field.to_snapshot()),
            Err(SnapshotError::InvalidFoundation { .. })
        ));
    }

    #[test]
    fn file_round_trip() {
        let path = temp_path("round_trip");
        let field = seeded_field(5);
        field.save_to_file(&path).unwrap();

        let mut loaded = Field::empty();
        loaded.load_from_file(&path).unwrap();
        assert_eq!(loaded, field);

        // save(load(save(f))) == save(f)
        loaded.save_to_file(&path).unwrap();
        assert_eq!(fs::read(&path).unwrap(), field.to_snapshot());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn failed_load_leaves_the_field_untouched() {
        let path = temp_path("corrupt");
        fs::write(&path, b"YUKN\x01 too short").unwrap();

        let mut field = seeded_field(8);
        let before = field.clone();
        assert!(field.load_from_file(&path).is_err());
        assert_eq!(field, before);

        let missing = temp_path("missing_file_that_does_not_exist");
        let err = field.load_from_file(&missing).unwrap_err();
        assert!(matches!(err, SnapshotError::Io(_)));
        assert!(err.to_string().starts_with("snapshot I/O failed"));
        assert_eq!(field, before);
        let _ = fs::remove_file(&path);
    }
}
