use super::*;

// 成立した役 (ドラを含む)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YakuMatch {
    pub name: String,
    pub han: usize, // 鳴きありの場合は食い下がり後の翻数
}

impl YakuMatch {
    pub fn new(name: &str, han: usize) -> Self {
        Self {
            name: name.to_string(),
            han,
        }
    }
}

impl fmt::Display for YakuMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.han)
    }
}

// 支払いの内訳
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Payment {
    // ロン (放銃者が全額を支払う)
    Ron {
        total: Point,
    },
    // 親のツモ (子3人が同額を支払う)
    DealerTsumo {
        from_each: Point,
        total: Point,
    },
    // 子のツモ (親と子で支払いが異なる)
    NonDealerTsumo {
        from_dealer: Point,
        from_others: Point,
        total: Point,
    },
}

impl Payment {
    pub fn total(&self) -> Point {
        match *self {
            Payment::Ron { total }
            | Payment::DealerTsumo { total, .. }
            | Payment::NonDealerTsumo { total, .. } => total,
        }
    }

    // 本場の加算 (1本場につき300点, ツモの場合は各自100点)
    pub fn with_honba(self, honba: usize) -> Self {
        let h = honba as Point * 100;
        match self {
            Payment::Ron { total } => Payment::Ron {
                total: total + h * 3,
            },
            Payment::DealerTsumo { from_each, .. } => Payment::DealerTsumo {
                from_each: from_each + h,
                total: (from_each + h) * 3,
            },
            Payment::NonDealerTsumo {
                from_dealer,
                from_others,
                ..
            } => Payment::NonDealerTsumo {
                from_dealer: from_dealer + h,
                from_others: from_others + h,
                total: from_dealer + h + (from_others + h) * 2,
            },
        }
    }
}

impl fmt::Display for Payment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payment::Ron { total } => write!(f, "{}", total),
            Payment::DealerTsumo { from_each, total } => {
                write!(f, "{} ({} all)", total, from_each)
            }
            Payment::NonDealerTsumo {
                from_dealer,
                from_others,
                total,
            } => write!(f, "{} ({}/{})", total, from_others, from_dealer),
        }
    }
}

// 点数計算の結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    pub yaku: Vec<YakuMatch>, // 役一覧(ドラを含む)
    pub han: usize,           // 飜数(ドラを含む)
    pub fu: usize,            // 符数
    pub base_points: Point,   // 基本点
    pub payment: Payment,     // 支払い(本場を含む)
    pub title: String,        // 満貫, 跳満, ...
    pub parse: Parse,         // 採用した和了形の解釈
}

#[test]
fn test_payment_honba() {
    let p = Payment::Ron { total: 7700 }.with_honba(2);
    assert_eq!(p.total(), 8300);

    let p = Payment::DealerTsumo {
        from_each: 2600,
        total: 7800,
    }
    .with_honba(1);
    assert_eq!(
        p,
        Payment::DealerTsumo {
            from_each: 2700,
            total: 8100
        }
    );

    let p = Payment::NonDealerTsumo {
        from_dealer: 2000,
        from_others: 1000,
        total: 4000,
    }
    .with_honba(1);
    assert_eq!(p.total(), 4300);
    assert_eq!(p.to_string(), "4300 (1100/2100)");
}
