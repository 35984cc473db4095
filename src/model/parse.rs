use super::*;

// 和了牌の待ちの形
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Wait {
    Ryanmen, // 両面
    Kanchan, // 嵌張
    Penchan, // 辺張
    Shanpon, // 双碰
    Tanki,   // 単騎
}

// 和了形の解釈 (構造的な分解) の1つ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Parse {
    // 4面子1雀頭 (鳴きを含む)
    // win_meld: 和了牌を含む面子のindex. Noneの場合は雀頭 (単騎待ち)
    Standard {
        melds: Vec<Meld>,
        pair: Meld,
        wait: Wait,
        win_meld: Option<Index>,
    },
    // 七対子
    SevenPairs { pairs: Vec<Meld> },
    // 国士無双 pairは重複している么九牌
    ThirteenOrphans { pair: Tile },
}

use Parse::*;

impl Parse {
    #[inline]
    pub fn is_standard(&self) -> bool {
        matches!(self, Standard { .. })
    }

    #[inline]
    pub fn is_seven_pairs(&self) -> bool {
        matches!(self, SevenPairs { .. })
    }

    #[inline]
    pub fn is_thirteen_orphans(&self) -> bool {
        matches!(self, ThirteenOrphans { .. })
    }

    // 雀頭を除く面子 (七対子, 国士無双は空)
    pub fn melds(&self) -> &[Meld] {
        match self {
            Standard { melds, .. } => melds,
            _ => &[],
        }
    }

    // 面子と雀頭 (七対子は7つの雀頭, 国士無双は空)
    pub fn groups(&self) -> Vec<Meld> {
        match self {
            Standard { melds, pair, .. } => {
                let mut v = melds.clone();
                v.push(*pair);
                v
            }
            SevenPairs { pairs } => pairs.clone(),
            ThirteenOrphans { .. } => vec![],
        }
    }

    // 雀頭の牌 (七対子は対象外)
    pub fn pair_tile(&self) -> Option<Tile> {
        match self {
            Standard { pair, .. } => Some(pair.tile()),
            ThirteenOrphans { pair } => Some(*pair),
            SevenPairs { .. } => None,
        }
    }

    // 全構成牌 (赤5の区別はなし)
    pub fn tiles(&self) -> Vec<Tile> {
        match self {
            ThirteenOrphans { pair } => {
                let mut v = ORPHANS.to_vec();
                v.push(*pair);
                v.sort();
                v
            }
            _ => self.groups().iter().flat_map(|g| g.tiles()).collect(),
        }
    }

    pub fn wait(&self) -> Wait {
        match self {
            Standard { wait, .. } => *wait,
            _ => Wait::Tanki,
        }
    }

    #[inline]
    pub fn is_two_sided_wait(&self) -> bool {
        self.wait() == Wait::Ryanmen
    }

    // 門前 (鳴いた面子がない)
    pub fn is_menzen(&self) -> bool {
        self.melds().iter().all(|m| m.is_concealed())
    }

    // 暗刻(暗槓を含む)かどうか
    // ロン和了で和了牌により完成した刻子は明刻として扱う
    pub fn is_closed_set(&self, i: Index, is_tsumo: bool) -> bool {
        match self {
            Standard {
                melds, win_meld, ..
            } => {
                let m = &melds[i];
                m.is_set_of_same() && m.is_concealed() && (is_tsumo || *win_meld != Some(i))
            }
            _ => false,
        }
    }

    // 暗刻(暗槓を含む)の数
    pub fn count_closed_sets(&self, is_tsumo: bool) -> usize {
        (0..self.melds().len())
            .filter(|&i| self.is_closed_set(i, is_tsumo))
            .count()
    }

    // 手牌の枚数勘定上の枚数 (常に14になる)
    pub fn count_as(&self) -> usize {
        match self {
            ThirteenOrphans { .. } => HAND,
            _ => self.groups().iter().map(|g| g.count_as()).sum(),
        }
    }
}

impl fmt::Display for Parse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThirteenOrphans { pair } => write!(f, "kokushi({})", pair),
            _ => {
                let gs: Vec<String> = self.groups().iter().map(|g| g.to_string()).collect();
                write!(f, "{} ({:?})", gs.join(" "), self.wait())
            }
        }
    }
}

#[test]
fn test_parse_tiles() {
    let p = Standard {
        melds: vec![
            Meld::chii(Tile(TM, 1)),
            Meld::ankan(Tile(TZ, WE)),
            Meld::Triplet {
                tile: Tile(TP, 7),
                concealed: true,
            },
            Meld::Sequence {
                tile: Tile(TS, 4),
                concealed: true,
            },
        ],
        pair: Meld::Pair { tile: Tile(TM, 5) },
        wait: Wait::Shanpon,
        win_meld: Some(2),
    };
    assert_eq!(p.tiles().len(), 15);
    assert_eq!(p.count_as(), HAND);
    assert!(!p.is_menzen());
    assert!(p.is_closed_set(1, false));
    assert!(!p.is_closed_set(2, false)); // ロンで完成した刻子
    assert!(p.is_closed_set(2, true));
    assert_eq!(p.count_closed_sets(false), 1);

    let k = ThirteenOrphans { pair: Tile(TZ, DR) };
    assert_eq!(k.tiles().len(), HAND);
    assert_eq!(k.count_as(), HAND);
    assert!(k.is_menzen());
}
