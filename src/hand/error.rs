use std::fmt;

use crate::model::*;

// 点数計算の失敗理由
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    InvalidTileCount(usize),   // 槓子を3枚として数えた枚数が14枚ではない
    InvalidTile(Tile),         // 存在しない牌
    TooManyCopies(Tile),       // 同じ牌が5枚以上
    InvalidWind(Tnum),         // 自風, 場風が東南西北以外
    InvalidMeld(Meld),         // 面子として成立していない鳴き
    MeldNotInHand(Meld),       // 鳴きの構成牌が手牌に含まれていない
    WinningTileNotInHand(Tile), // 和了牌が(鳴き以外の)手牌に含まれていない
    NoValidDecomposition,      // 和了形ではない
    NoYaku,                    // 和了形だが役がない
}

impl fmt::Display for ScoringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ScoringError::*;
        match self {
            InvalidTileCount(n) => write!(f, "hand must have 14 tiles (got {})", n),
            InvalidTile(t) => write!(f, "invalid tile: {}", t),
            TooManyCopies(t) => write!(f, "more than 4 copies of {}", t),
            InvalidWind(w) => write!(f, "invalid wind: {}", w),
            InvalidMeld(m) => write!(f, "invalid meld: {}", m),
            MeldNotInHand(m) => write!(f, "meld tiles are not in hand: {}", m),
            WinningTileNotInHand(t) => write!(f, "winning tile is not in hand: {}", t),
            NoValidDecomposition => write!(f, "not a winning hand"),
            NoYaku => write!(f, "winning hand has no yaku"),
        }
    }
}

impl std::error::Error for ScoringError {}
