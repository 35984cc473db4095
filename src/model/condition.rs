use super::*;

// 特殊条件による役のフラグ
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WinFlags {
    pub ippatsu: bool, // 一発
    pub chankan: bool, // 槍槓
    pub rinshan: bool, // 嶺上開花
    pub haitei: bool,  // 海底摸月
    pub houtei: bool,  // 河底撈魚
    pub tenhou: bool,  // 天和
    pub chihou: bool,  // 地和
}

// 和了時の卓の状況
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conditions {
    pub seat_wind: Tnum,               // 自風 (東: 1, 南: 2, 西: 3, 北: 4)
    pub round_wind: Tnum,              // 場風 (同上)
    pub is_riichi: bool,               // 立直
    pub is_double_riichi: bool,        // ダブル立直
    pub is_tsumo: bool,                // ツモ和了
    pub winning_tile: Tile,            // 和了牌
    pub dora_indicators: Vec<Tile>,    // ドラ表示牌 (注:ドラそのものではない)
    pub uradora_indicators: Vec<Tile>, // 裏ドラ表示牌 立直時のみ有効
    pub flags: WinFlags,               // 特殊条件
    pub melds: Vec<Meld>,              // 鳴き(暗槓を含む) 構成牌は手牌側にも含めること
    pub honba: usize,                  // 本場
}

impl Default for Conditions {
    fn default() -> Self {
        Self {
            seat_wind: WE,
            round_wind: WE,
            is_riichi: false,
            is_double_riichi: false,
            is_tsumo: false,
            winning_tile: Z8,
            dora_indicators: vec![],
            uradora_indicators: vec![],
            flags: WinFlags::default(),
            melds: vec![],
            honba: 0,
        }
    }
}

impl Conditions {
    // 親番 (自風が東)
    #[inline]
    pub fn is_dealer(&self) -> bool {
        self.seat_wind == WE
    }

    // 門前 (暗槓以外の鳴きがない)
    pub fn is_menzen(&self) -> bool {
        self.melds.iter().all(|m| m.is_concealed())
    }

    // 立直またはダブル立直
    #[inline]
    pub fn has_riichi(&self) -> bool {
        self.is_riichi || self.is_double_riichi
    }

    pub fn count_quads(&self) -> usize {
        self.melds.iter().filter(|m| m.is_quad()).count()
    }
}

#[test]
fn test_conditions_json_default() {
    let cond: Conditions =
        serde_json::from_str(r#"{"seat_wind": 2, "winning_tile": "s4", "flags": {"haitei": true}}"#)
            .unwrap();
    assert_eq!(cond.seat_wind, WS);
    assert_eq!(cond.round_wind, WE);
    assert_eq!(cond.winning_tile, Tile(TS, 4));
    assert!(cond.flags.haitei);
    assert!(!cond.flags.houtei);
    assert!(!cond.is_dealer());
    assert!(cond.is_menzen());
}
