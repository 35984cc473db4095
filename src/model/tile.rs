use std::str::FromStr;

use serde::{de, ser};

use super::*;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile(pub Type, pub Tnum); // (type index, number index)
pub const Z8: Tile = Tile(TZ, UK); // unknown tile

// 么九牌 (国士無双の構成牌)
pub const ORPHANS: [Tile; 13] = [
    Tile(TM, 1),
    Tile(TM, 9),
    Tile(TP, 1),
    Tile(TP, 9),
    Tile(TS, 1),
    Tile(TS, 9),
    Tile(TZ, WE),
    Tile(TZ, WS),
    Tile(TZ, WW),
    Tile(TZ, WN),
    Tile(TZ, DW),
    Tile(TZ, DG),
    Tile(TZ, DR),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Suit {
    Man,
    Pin,
    Sou,
    Honor,
}

impl Suit {
    #[inline]
    pub fn index(self) -> Type {
        match self {
            Suit::Man => TM,
            Suit::Pin => TP,
            Suit::Sou => TS,
            Suit::Honor => TZ,
        }
    }
}

impl Tile {
    pub fn new(suit: Suit, rank: Tnum, is_red_five: bool) -> Self {
        if is_red_five {
            Self(suit.index(), 0)
        } else {
            Self(suit.index(), rank)
        }
    }

    pub fn suit(&self) -> Suit {
        match self.0 {
            TM => Suit::Man,
            TP => Suit::Pin,
            TS => Suit::Sou,
            _ => Suit::Honor,
        }
    }

    // number index(赤5考慮)を返却
    #[inline]
    pub fn n(&self) -> Tnum {
        if self.1 == 0 {
            5
        } else {
            self.1
        }
    }

    #[inline]
    pub fn is_red_five(&self) -> bool {
        self.0 != TZ && self.1 == 0
    }

    // 赤5の場合,通常の5を返却. それ以外の場合はコピーをそのまま返却.
    #[inline]
    pub fn to_normal(self) -> Self {
        Self(self.0, self.n())
    }

    // 実在する牌かどうか (赤5は数牌のみ)
    pub fn is_valid(&self) -> bool {
        match self.0 {
            TM | TP | TS => self.1 <= 9,
            TZ => (WE..=DR).contains(&self.1),
            _ => false,
        }
    }

    // 数牌
    #[inline]
    pub fn is_suit(&self) -> bool {
        self.0 != TZ
    }

    // 字牌
    #[inline]
    pub fn is_hornor(&self) -> bool {
        self.0 == TZ
    }

    // 1,9牌
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.0 != TZ && (self.1 == 1 || self.1 == 9)
    }

    // 么九牌
    #[inline]
    pub fn is_end(&self) -> bool {
        self.0 == TZ || self.1 == 1 || self.1 == 9
    }

    // 中張牌
    #[inline]
    pub fn is_simple(&self) -> bool {
        !self.is_end()
    }

    // 風牌
    #[inline]
    pub fn is_wind(&self) -> bool {
        self.0 == TZ && self.1 <= WN
    }

    // 三元牌
    #[inline]
    pub fn is_doragon(&self) -> bool {
        self.0 == TZ && DW <= self.1 && self.1 <= DR
    }

    // 緑一色の構成牌 (索子2,3,4,6,8, 發)
    pub fn is_green(&self) -> bool {
        match self.0 {
            TS => matches!(self.n(), 2 | 3 | 4 | 6 | 8),
            TZ => self.1 == DG,
            _ => false,
        }
    }

    // ドラ表示牌とみなした場合のドラ(次の牌)を返却
    pub fn dora_from_indicator(&self) -> Tile {
        let ni = if self.is_hornor() {
            match self.1 {
                WN => WE,
                DR => DW,
                i => i + 1,
            }
        } else {
            match self.n() {
                9 => 1,
                i => i + 1,
            }
        };
        Tile(self.0, ni)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", ['m', 'p', 's', 'z'][self.0.min(TZ)], self.1)
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl PartialOrd for Tile {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tile {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        if self.0 != other.0 {
            return self.0.cmp(&other.0);
        }

        // 赤5は通常の5の直前に並べる
        let a = (self.n(), self.1 != 0);
        let b = (other.n(), other.1 != 0);
        a.cmp(&b)
    }
}

impl FromStr for Tile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 2 {
            return Err(format!("invalid tile symbol: '{}'", s));
        }
        let ti = match chars[0] {
            'm' => TM,
            'p' => TP,
            's' => TS,
            'z' => TZ,
            c => return Err(format!("invalid tile type char: '{}'", c)),
        };
        let ni = chars[1]
            .to_digit(10)
            .ok_or_else(|| format!("invalid tile number char: '{}'", chars[1]))?
            as Tnum;
        let t = Tile(ti, ni);
        if !t.is_valid() {
            return Err(format!("invalid tile symbol: '{}'", s));
        }
        Ok(t)
    }
}

impl ser::Serialize for Tile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

struct TileVisitor;

impl<'de> de::Visitor<'de> for TileVisitor {
    type Value = Tile;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("tile symbol")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        v.parse().map_err(E::custom)
    }
}

impl<'de> de::Deserialize<'de> for Tile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_str(TileVisitor)
    }
}

// [TileTable]
// index 0 は赤5の枚数 (赤5は同時に5の枚数にも含まれる)
pub type TileRow = [usize; TNUM];
pub type TileTable = [TileRow; TYPE];

pub fn inc_tile(tt: &mut TileTable, tile: Tile) {
    let t = tile;
    tt[t.0][t.1] += 1;
    if t.1 == 0 {
        // 0は赤5のフラグなので本来の5をたてる
        tt[t.0][5] += 1;
    }
}

// 牌が存在しない場合はfalseを返却して何もしない
pub fn dec_tile(tt: &mut TileTable, tile: Tile) -> bool {
    let t = tile;
    if tt[t.0][t.1] == 0 {
        return false;
    }
    if t.1 == 5 && tt[t.0][5] == tt[t.0][0] {
        return false; // 通常の5が残っていない
    }
    tt[t.0][t.1] -= 1;
    if t.1 == 0 {
        tt[t.0][5] -= 1;
    }
    true
}

// 通常の5が無い場合は赤5を取り除く
pub fn take_tile(tt: &mut TileTable, tile: Tile) -> bool {
    dec_tile(tt, tile) || (tile.is_suit() && tile.1 == 5 && dec_tile(tt, Tile(tile.0, 0)))
}

pub fn tiles_to_tile_table(tiles: &[Tile]) -> TileTable {
    let mut tt = TileTable::default();
    for &t in tiles {
        inc_tile(&mut tt, t);
    }
    tt
}

pub fn tiles_from_tile_table(tt: &TileTable) -> Vec<Tile> {
    let mut hand = vec![];
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            for c in 0..tt[ti][ni] {
                if ti != TZ && ni == 5 && c < tt[ti][0] {
                    hand.push(Tile(ti, 0)); // 赤5
                } else {
                    hand.push(Tile(ti, ni));
                }
            }
        }
    }
    hand
}

#[test]
fn test_tile_symbol() {
    let t: Tile = "p0".parse().unwrap();
    assert_eq!(t, Tile(TP, 0));
    assert!(t.is_red_five());
    assert_eq!(t.to_normal(), Tile(TP, 5));
    assert_eq!(t.suit(), Suit::Pin);
    assert_eq!(t.n(), 5);
    assert_eq!(Tile::new(Suit::Pin, 5, true), t);
    assert_eq!(Tile::new(Suit::Honor, DR, false), Tile(TZ, DR));
    assert!("z8".parse::<Tile>().is_err());
    assert!("z0".parse::<Tile>().is_err());
    assert!("x1".parse::<Tile>().is_err());
}

#[test]
fn test_dora_from_indicator() {
    assert_eq!(Tile(TM, 9).dora_from_indicator(), Tile(TM, 1));
    assert_eq!(Tile(TS, 0).dora_from_indicator(), Tile(TS, 6));
    assert_eq!(Tile(TZ, WN).dora_from_indicator(), Tile(TZ, WE));
    assert_eq!(Tile(TZ, DR).dora_from_indicator(), Tile(TZ, DW));
    assert_eq!(Tile(TZ, DW).dora_from_indicator(), Tile(TZ, DG));
}

#[test]
fn test_tiletable() {
    let hand: Vec<Tile> = ["p3", "p4", "p0", "p5", "s1", "z6", "z6"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
    let mut tt = tiles_to_tile_table(&hand);
    assert_eq!(tt[TP][5], 2);
    assert_eq!(tt[TP][0], 1);
    assert_eq!(tiles_from_tile_table(&tt), hand);

    assert!(dec_tile(&mut tt, Tile(TP, 5)));
    assert!(!dec_tile(&mut tt, Tile(TP, 5))); // 残りは赤5のみ
    assert!(dec_tile(&mut tt, Tile(TP, 0)));
    assert_eq!(tt[TP][5], 0);
}
