use crate::model::*;

use super::decompose::decompose;
use super::error::ScoringError;
use super::fu::calc_fu;
use super::point::*;
use super::yaku::evaluate;

use ScoringError::*;

// 手牌と卓の状況から点数を計算
// tiles: 和了牌と鳴きの構成牌を含むすべての手牌 (槓子は4枚)
// 和了形の解釈が複数ある場合は最も支払いの高いものを採用
pub fn score(tiles: &[Tile], cond: &Conditions) -> Result<ScoreResult, ScoringError> {
    let concealed = validate(tiles, cond)?;

    let parses = decompose(&concealed, &cond.melds, cond.winning_tile);
    if parses.is_empty() {
        return Err(NoValidDecomposition);
    }

    let hand = tiles_to_tile_table(tiles);
    let mut best: Option<ScoreResult> = None;
    for parse in parses {
        if let Some(res) = evaluate_parse(parse, cond, &hand) {
            if best.as_ref().map_or(true, |b| is_better(&res, b)) {
                best = Some(res);
            }
        }
    }

    let mut res = best.ok_or(NoYaku)?;
    res.payment = res.payment.with_honba(cond.honba);
    Ok(res)
}

// 解釈1つ分の役, 符, 点数を計算 (役なしの場合はNone)
pub fn evaluate_parse(parse: Parse, cond: &Conditions, hand: &TileTable) -> Option<ScoreResult> {
    let yaku = evaluate(&parse, cond, hand);
    if yaku.is_empty() {
        return None;
    }

    let han = yaku.iter().map(|y| y.han).sum();
    let fu = calc_fu(
        &parse,
        cond.is_tsumo,
        parse.is_menzen(),
        cond.seat_wind,
        cond.round_wind,
    );
    let (base_points, payment) = aggregate(han, fu, cond.is_tsumo, cond.is_dealer());

    Some(ScoreResult {
        yaku,
        han,
        fu,
        base_points,
        payment,
        title: get_score_title(base_points),
        parse,
    })
}

// 支払い, 翻数, 符の順に比較 (同じ場合は先に列挙された解釈を優先)
fn is_better(a: &ScoreResult, b: &ScoreResult) -> bool {
    (a.payment.total(), a.han, a.fu) > (b.payment.total(), b.han, b.fu)
}

// 入力の検証を行い,鳴き以外の手牌のTileTableを返却
fn validate(tiles: &[Tile], cond: &Conditions) -> Result<TileTable, ScoringError> {
    let indicators = cond.dora_indicators.iter().chain(&cond.uradora_indicators);
    for &t in tiles.iter().chain([&cond.winning_tile]).chain(indicators) {
        if !t.is_valid() {
            return Err(InvalidTile(t));
        }
    }

    for w in [cond.seat_wind, cond.round_wind] {
        if !(WE..=WN).contains(&w) {
            return Err(InvalidWind(w));
        }
    }

    // 槓子は3枚として数える
    if tiles.len().saturating_sub(cond.count_quads()) != HAND {
        return Err(InvalidTileCount(tiles.len()));
    }

    let mut tt = tiles_to_tile_table(tiles);
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            if tt[ti][ni] > 4 {
                return Err(TooManyCopies(Tile(ti, ni)));
            }
        }
    }

    // 鳴きの構成牌を取り除く
    for m in &cond.melds {
        let is_call = !m.is_concealed();
        if !m.is_valid() || m.is_pair() || !(is_call || m.is_quad()) {
            return Err(InvalidMeld(*m));
        }
        for t in m.tiles() {
            if !take_tile(&mut tt, t) {
                return Err(MeldNotInHand(*m));
            }
        }
    }

    let wt = cond.winning_tile;
    if tt[wt.0][wt.1] == 0 {
        return Err(WinningTileNotInHand(wt));
    }

    Ok(tt)
}

#[cfg(test)]
use crate::util::string::tiles_from_string;

#[cfg(test)]
fn score_str(exp: &str, cond: &Conditions) -> Result<ScoreResult, ScoringError> {
    score(&tiles_from_string(exp).unwrap(), cond)
}

#[test]
fn test_riichi_ron_triplet() {
    let cond = Conditions {
        is_riichi: true,
        winning_tile: Tile(TP, 7),
        ..Default::default()
    };
    let res = score_str("m123p456s456p777m55", &cond).unwrap();
    assert_eq!(res.yaku, vec![YakuMatch::new("Riichi", 1)]);
    assert_eq!(res.han, 1);
    assert_eq!(res.fu, 30);
    assert_eq!(res.payment, Payment::Ron { total: 1500 });
}

#[test]
fn test_pinfu_tsumo_scenario() {
    let cond = Conditions {
        is_riichi: true,
        is_tsumo: true,
        winning_tile: Tile(TS, 1),
        seat_wind: WS,
        round_wind: WE,
        ..Default::default()
    };
    let res = score_str("m234234p345s123p66", &cond).unwrap();
    let names: Vec<&str> = res.yaku.iter().map(|y| y.name.as_str()).collect();
    assert_eq!(names, vec!["Riichi", "Menzen-Tsumo", "Pinfu", "Iipeikou"]);
    assert_eq!(res.han, 4);
    assert_eq!(res.fu, 20);
    // 20符4翻: 1280 -> 1300/2600
    assert_eq!(
        res.payment,
        Payment::NonDealerTsumo {
            from_dealer: 2600,
            from_others: 1300,
            total: 5200,
        }
    );
}

#[test]
fn test_tenhou_scenario() {
    let cond = Conditions {
        is_tsumo: true,
        seat_wind: WE,
        winning_tile: Tile(TP, 2),
        flags: WinFlags {
            tenhou: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let res = score_str("m111p234s567z222p22", &cond).unwrap();
    assert_eq!(res.yaku, vec![YakuMatch::new("Tenhou", 13)]);
    assert_eq!(res.han, 13);
    assert_eq!(res.title, "Yakuman");
    assert_eq!(
        res.payment,
        Payment::DealerTsumo {
            from_each: 16000,
            total: 48000,
        }
    );
}

#[test]
fn test_choose_best_parse() {
    // 三連刻: 順子(一盃口)よりも刻子(三暗刻)の方が高い
    let cond = Conditions {
        is_tsumo: true,
        winning_tile: Tile(TS, 7),
        ..Default::default()
    };
    let res = score_str("m111222333p55s789", &cond).unwrap();
    assert!(res.yaku.contains(&YakuMatch::new("Sanankou", 2)));
    assert_eq!(res.parse.count_closed_sets(true), 3);

    // 七対子と二盃口
    let cond = Conditions {
        is_riichi: true,
        winning_tile: Tile(TS, 7),
        ..Default::default()
    };
    let res = score_str("m223344p445566s77", &cond).unwrap();
    assert!(res.parse.is_standard());
    assert!(res.yaku.contains(&YakuMatch::new("Ryanpeikou", 3)));
    assert!(res.yaku.contains(&YakuMatch::new("Tanyao", 1)));
}

#[test]
fn test_seven_pairs_not_overridden() {
    // 数牌と字牌にまたがる七対子は通常形に分解できない
    let cond = Conditions {
        winning_tile: Tile(TZ, DR),
        ..Default::default()
    };
    let res = score_str("m1199p3388s55z1177", &cond).unwrap();
    assert!(res.parse.is_seven_pairs());
    assert_eq!(res.fu, 25);
    assert_eq!(res.yaku, vec![YakuMatch::new("Chiitoitsu", 2)]);
    assert_eq!(res.payment.total(), 2400);
}

#[test]
fn test_called_melds_and_honba() {
    let cond = Conditions {
        winning_tile: Tile(TS, 8),
        melds: vec![Meld::pon(Tile(TZ, DR)), Meld::minkan(Tile(TP, 9))],
        honba: 2,
        ..Default::default()
    };
    // 中(1翻) 明槓(么九牌)32符 + 中の明刻 8符 => 60符1翻
    let res = score_str("m234s67888z777p9999", &cond).unwrap();
    assert_eq!(res.yaku, vec![YakuMatch::new("Yakuhai (Chun)", 1)]);
    assert_eq!(res.fu, 60);
    // 親のロン 60符1翻: 480 * 6 = 2880 -> 2900, 2本場で+600
    assert_eq!(res.payment, Payment::Ron { total: 3500 });
}

#[test]
fn test_errors() {
    let cond = Conditions {
        winning_tile: Tile(TS, 9),
        ..Default::default()
    };
    assert_eq!(
        score_str("m123p456s789z111", &cond).unwrap_err(),
        InvalidTileCount(12)
    );
    assert_eq!(
        score_str("m123456789p1357s9", &cond).unwrap_err(),
        NoValidDecomposition
    );
    assert_eq!(
        score_str("m11111p456s789z111", &cond).unwrap_err(),
        TooManyCopies(Tile(TM, 1))
    );
    assert_eq!(
        score_str("m123p456s78z11122m9", &cond).unwrap_err(),
        WinningTileNotInHand(Tile(TS, 9))
    );
    assert_eq!(
        score_str("m123p456s789z11122", &Conditions::default()).unwrap_err(),
        InvalidTile(Z8)
    );

    let bad_wind = Conditions {
        seat_wind: 5,
        ..cond.clone()
    };
    assert_eq!(
        score_str("m123p456s789z11122", &bad_wind).unwrap_err(),
        InvalidWind(5)
    );

    let bad_meld = Conditions {
        melds: vec![Meld::pon(Tile(TP, 1))],
        ..cond.clone()
    };
    assert_eq!(
        score_str("m123p456s789z11122", &bad_meld).unwrap_err(),
        MeldNotInHand(Meld::pon(Tile(TP, 1)))
    );

    // 役なし (鳴きあり, 役牌なし, ドラのみ)
    let no_yaku = Conditions {
        melds: vec![Meld::chii(Tile(TP, 4))],
        dora_indicators: vec![Tile(TM, 1)],
        ..cond
    };
    assert_eq!(
        score_str("m123p456s789z33322", &no_yaku).unwrap_err(),
        NoYaku
    );
}
