use super::*;

// 面子・雀頭
// tileは順子の場合は先頭の牌. 赤5は通常の5として保持する.
// concealed: 鳴きによって成立していない面子 (暗刻, 暗槓)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Meld {
    Sequence { tile: Tile, concealed: bool },
    Triplet { tile: Tile, concealed: bool },
    Quad { tile: Tile, concealed: bool },
    Pair { tile: Tile },
}

use Meld::*;

impl Meld {
    // チー
    pub fn chii(first: Tile) -> Self {
        Sequence {
            tile: first.to_normal(),
            concealed: false,
        }
    }

    // ポン
    pub fn pon(t: Tile) -> Self {
        Triplet {
            tile: t.to_normal(),
            concealed: false,
        }
    }

    // 明槓 (大明槓 + 加槓)
    pub fn minkan(t: Tile) -> Self {
        Quad {
            tile: t.to_normal(),
            concealed: false,
        }
    }

    // 暗槓
    pub fn ankan(t: Tile) -> Self {
        Quad {
            tile: t.to_normal(),
            concealed: true,
        }
    }

    #[inline]
    pub fn tile(&self) -> Tile {
        match *self {
            Sequence { tile, .. } | Triplet { tile, .. } | Quad { tile, .. } | Pair { tile } => {
                tile
            }
        }
    }

    // 雀頭は常に手牌の中にあるのでtrue
    #[inline]
    pub fn is_concealed(&self) -> bool {
        match *self {
            Sequence { concealed, .. } | Triplet { concealed, .. } | Quad { concealed, .. } => {
                concealed
            }
            Pair { .. } => true,
        }
    }

    #[inline]
    pub fn is_sequence(&self) -> bool {
        matches!(self, Sequence { .. })
    }

    // 刻子または槓子
    #[inline]
    pub fn is_set_of_same(&self) -> bool {
        matches!(self, Triplet { .. } | Quad { .. })
    }

    #[inline]
    pub fn is_quad(&self) -> bool {
        matches!(self, Quad { .. })
    }

    #[inline]
    pub fn is_pair(&self) -> bool {
        matches!(self, Pair { .. })
    }

    // 構成牌の一覧 (赤5の区別はなし)
    pub fn tiles(&self) -> Vec<Tile> {
        let t = self.tile();
        match self {
            Sequence { .. } => (0..3).map(|i| Tile(t.0, t.1 + i)).collect(),
            Triplet { .. } => vec![t; 3],
            Quad { .. } => vec![t; 4],
            Pair { .. } => vec![t; 2],
        }
    }

    pub fn contains(&self, t: Tile) -> bool {
        let t = t.to_normal();
        let m = self.tile();
        match self {
            Sequence { .. } => t.0 == m.0 && m.1 <= t.1 && t.1 < m.1 + 3,
            _ => t == m,
        }
    }

    // 么九牌を含むかどうか
    pub fn has_end(&self) -> bool {
        self.tiles().iter().any(|t| t.is_end())
    }

    // 手牌の枚数勘定上の枚数 (槓子も3枚扱い)
    pub fn count_as(&self) -> usize {
        match self {
            Pair { .. } => 2,
            _ => 3,
        }
    }

    pub fn is_valid(&self) -> bool {
        let t = self.tile();
        if !t.is_valid() || t.1 == 0 {
            return false;
        }
        match self {
            Sequence { .. } => t.is_suit() && t.1 <= 7,
            _ => true,
        }
    }
}

impl fmt::Display for Meld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tiles = self.tiles();
        write!(f, "{}", ['m', 'p', 's', 'z'][tiles[0].0.min(TZ)])?;
        for t in &tiles {
            write!(f, "{}", t.1)?;
        }
        if !self.is_concealed() {
            write!(f, "+")?;
        }
        Ok(())
    }
}

#[test]
fn test_meld_tiles() {
    let m = Meld::chii(Tile(TS, 0));
    assert_eq!(m.tile(), Tile(TS, 5));
    assert_eq!(m.tiles(), vec![Tile(TS, 5), Tile(TS, 6), Tile(TS, 7)]);
    assert!(m.contains(Tile(TS, 0)));
    assert!(!m.contains(Tile(TS, 8)));
    assert_eq!(m.to_string(), "s567+");

    let m = Meld::ankan(Tile(TZ, DR));
    assert_eq!(m.tiles().len(), 4);
    assert_eq!(m.count_as(), 3);
    assert!(m.is_concealed());
    assert_eq!(m.to_string(), "z7777");

    assert!(!Meld::chii(Tile(TM, 8)).is_valid());
    assert!(!Meld::pon(Tile(TZ, UK)).is_valid());
}
