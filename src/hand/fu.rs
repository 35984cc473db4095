use crate::model::*;

// 平和形 (4順子すべて門前, 役牌以外の雀頭, 両面待ち)
pub fn is_pinfu_shape(parse: &Parse, seat_wind: Tnum, round_wind: Tnum) -> bool {
    match parse {
        Parse::Standard { melds, pair, .. } => {
            melds.iter().all(|m| m.is_sequence() && m.is_concealed())
                && calc_pair_fu(pair.tile(), seat_wind, round_wind) == 0
                && parse.is_two_sided_wait()
        }
        _ => false,
    }
}

// 雀頭の符 (三元牌, 自風, 場風はそれぞれ2符. 連風牌は4符)
pub fn calc_pair_fu(t: Tile, seat_wind: Tnum, round_wind: Tnum) -> usize {
    if t.is_doragon() {
        return 2;
    }
    if !t.is_hornor() {
        return 0;
    }

    let mut fu = 0;
    if t.1 == seat_wind {
        fu += 2;
    }
    if t.1 == round_wind {
        fu += 2;
    }
    fu
}

// 面子の符 (么九牌の場合は2倍)
pub fn calc_meld_fu(m: &Meld, is_closed: bool) -> usize {
    let fu = match (m, is_closed) {
        (Meld::Triplet { .. }, false) => 4,
        (Meld::Triplet { .. }, true) => 8,
        (Meld::Quad { .. }, false) => 16,
        (Meld::Quad { .. }, true) => 32,
        _ => return 0,
    };
    if m.tile().is_end() {
        fu * 2
    } else {
        fu
    }
}

// 和了形の解釈から符を計算
pub fn calc_fu(
    parse: &Parse,
    is_tsumo: bool,   // ツモ和了
    is_menzen: bool,  // 門前
    seat_wind: Tnum,  // 自風
    round_wind: Tnum, // 場風
) -> usize {
    if parse.is_seven_pairs() {
        return 25;
    }
    if is_pinfu_shape(parse, seat_wind, round_wind) {
        return if is_tsumo { 20 } else { 30 };
    }

    // 副底
    let mut fu = 20;

    // 門前ツモ
    if is_tsumo && is_menzen {
        fu += 2;
    }

    // 面子
    for (i, m) in parse.melds().iter().enumerate() {
        fu += calc_meld_fu(m, parse.is_closed_set(i, is_tsumo));
    }

    // 雀頭
    if let Parse::Standard { pair, .. } = parse {
        fu += calc_pair_fu(pair.tile(), seat_wind, round_wind);
    }

    (fu + 9) / 10 * 10 // １の位は切り上げ
}

#[cfg(test)]
fn parse_of(exp: &str, melds: &[Meld], wt: Tile) -> Vec<Parse> {
    let tiles = crate::util::string::tiles_from_string(exp).unwrap();
    super::decompose::decompose(&tiles_to_tile_table(&tiles), melds, wt)
}

#[test]
fn test_pinfu_fu() {
    let ps = parse_of("m234678p345s12366", &[], Tile(TS, 1));
    assert_eq!(ps.len(), 1);
    assert!(is_pinfu_shape(&ps[0], WS, WE));
    assert_eq!(calc_fu(&ps[0], true, true, WS, WE), 20);
    assert_eq!(calc_fu(&ps[0], false, true, WS, WE), 30);

    // 嵌張待ちは平和形ではない
    let ps = parse_of("m234678p345s12366", &[], Tile(TS, 2));
    assert!(!is_pinfu_shape(&ps[0], WS, WE));
    assert_eq!(calc_fu(&ps[0], true, true, WS, WE), 30);
    assert_eq!(calc_fu(&ps[0], false, true, WS, WE), 20);
}

#[test]
fn test_chiitoitsu_fu() {
    let ps = parse_of("m1155p2277s99z1155", &[], Tile(TZ, DW));
    assert!(ps.iter().all(|p| p.is_seven_pairs()));
    assert_eq!(calc_fu(&ps[0], true, true, WE, WE), 25);
    assert_eq!(calc_fu(&ps[0], false, true, WE, WE), 25);
}

#[test]
fn test_meld_fu() {
    assert_eq!(calc_meld_fu(&Meld::pon(Tile(TP, 5)), false), 4);
    assert_eq!(calc_meld_fu(&Meld::pon(Tile(TZ, DR)), false), 8);
    assert_eq!(calc_meld_fu(&Meld::ankan(Tile(TM, 9)), true), 64);
    assert_eq!(calc_meld_fu(&Meld::minkan(Tile(TS, 3)), false), 16);
    assert_eq!(calc_meld_fu(&Meld::chii(Tile(TS, 3)), false), 0);
}

#[test]
fn test_pair_fu() {
    assert_eq!(calc_pair_fu(Tile(TZ, WE), WE, WE), 4); // 連風牌
    assert_eq!(calc_pair_fu(Tile(TZ, WE), WS, WE), 2);
    assert_eq!(calc_pair_fu(Tile(TZ, WN), WS, WE), 0);
    assert_eq!(calc_pair_fu(Tile(TZ, DG), WS, WE), 2);
    assert_eq!(calc_pair_fu(Tile(TM, 1), WS, WE), 0);
}

#[test]
fn test_general_fu() {
    // ロンで完成した刻子は明刻 (p777: 4符), 雀頭 m55: 0符 => 24 -> 30
    let ps = parse_of("m123p456s456p777m55", &[], Tile(TP, 7));
    assert_eq!(calc_fu(&ps[0], false, true, WE, WE), 30);
    // ツモなら暗刻 (8符) + ツモ(2符) => 30
    assert_eq!(calc_fu(&ps[0], true, true, WE, WE), 30);

    // 暗槓(么九牌) 64符 + 中の暗刻 16符 + 東の雀頭(連風牌) 4符 + ツモ 2符 => 106 -> 110
    let melds = vec![Meld::ankan(Tile(TM, 1))];
    let ps = parse_of("p234s678z777z11", &melds, Tile(TS, 8));
    assert_eq!(ps.len(), 1);
    assert_eq!(calc_fu(&ps[0], true, true, WE, WE), 110);
}
