use crate::model::*;
use crate::util::misc::{vec_count, Res};

pub fn tile_type_from_char(ch: char) -> Res<Type> {
    match ch {
        'm' => Ok(TM),
        'p' => Ok(TP),
        's' => Ok(TS),
        'z' => Ok(TZ),
        _ => Err(format!("invalid tile type char: {}", ch))?,
    }
}

pub fn tile_type_to_char(ti: Type) -> char {
    ['m', 'p', 's', 'z'][ti.min(TZ)]
}

pub fn wind_from_char(ch: char) -> Res<Tnum> {
    Ok(match ch {
        'E' => WE,
        'S' => WS,
        'W' => WW,
        'N' => WN,
        _ => Err(format!("invalid wind char: {}", ch))?,
    })
}

pub fn wind_to_char(ni: Tnum) -> char {
    match ni {
        WE => 'E',
        WS => 'S',
        WW => 'W',
        WN => 'N',
        _ => '?',
    }
}

// "m123p0z77" のような表記を牌のリストに変換 (0は赤5)
pub fn tiles_from_string(exp: &str) -> Res<Vec<Tile>> {
    let mut tiles = vec![];
    let mut ti = None;
    for ch in exp.chars() {
        match ch {
            'm' | 'p' | 's' | 'z' => ti = Some(tile_type_from_char(ch)?),
            '0'..='9' => {
                let ti = ti.ok_or("tile number befor tile type")?;
                let t = Tile(ti, ch as usize - '0' as usize);
                if !t.is_valid() {
                    Err(format!("invalid tile: {}", t))?;
                }
                tiles.push(t);
            }
            _ => Err(format!("invalid char: '{}'", ch))?,
        }
    }
    Ok(tiles)
}

pub fn tiles_to_string(tiles: &[Tile]) -> String {
    let mut res = String::new();
    let mut last_ti = None;
    for t in tiles {
        if last_ti != Some(t.0) {
            last_ti = Some(t.0);
            res.push(tile_type_to_char(t.0));
        }
        res.push_str(&t.1.to_string());
    }
    res
}

// 鳴きの表記を面子に変換
// "m123+" (チー), "p777+" (ポン), "z1111+" (明槓), "s2222" (暗槓)
// '+'は鳴いた牌の印で位置は問わない
pub fn meld_from_string(exp: &str) -> Res<Meld> {
    let is_call = exp.contains('+');
    let tiles = tiles_from_string(&exp.replace('+', ""))?;
    if tiles.len() < 3 {
        Err(format!("invalid meld: '{}'", exp))?;
    }

    let mut nis: Vec<Tnum> = tiles.iter().map(|t| t.n()).collect();
    nis.sort_unstable();
    let mut diffs = vec![];
    for w in nis.windows(2) {
        diffs.push(w[1] - w[0]);
    }
    let first = Tile(tiles[0].0, nis[0]);

    let meld = if diffs.len() == 2 && vec_count(&diffs, &1) == 2 && first.is_suit() {
        Meld::chii(first)
    } else if diffs.len() == 2 && vec_count(&diffs, &0) == 2 {
        Meld::pon(first)
    } else if diffs.len() == 3 && vec_count(&diffs, &0) == 3 {
        if is_call {
            Meld::minkan(first)
        } else {
            Meld::ankan(first)
        }
    } else {
        Err(format!("invalid meld: '{}'", exp))?
    };

    if meld.count_as() == 3 && !meld.is_quad() && !is_call {
        Err(format!("chii and pon must have '+': '{}'", exp))?;
    }
    if tiles.iter().any(|t| t.0 != first.0) {
        Err(format!("invalid meld: '{}'", exp))?;
    }

    Ok(meld)
}

// 手牌と卓の状況を計算機モード(C)の式に変換 (点数の検証部分は含まない)
// 和了牌を手牌の末尾に置き,鳴きの構成牌の赤5はそのまま鳴きの側に残す
pub fn hand_to_expression(tiles: &[Tile], cond: &Conditions) -> Res<String> {
    let mut tt = tiles_to_tile_table(tiles);
    let wt = cond.winning_tile;
    if !dec_tile(&mut tt, wt) {
        Err(format!("winning tile is not in hand: {}", wt))?;
    }

    let mut exp_melds = vec![];
    for m in &cond.melds {
        let mut ts = vec![];
        for t in m.tiles() {
            if dec_tile(&mut tt, t) {
                ts.push(t);
            } else if t.is_suit() && t.1 == 5 && dec_tile(&mut tt, Tile(t.0, 0)) {
                ts.push(Tile(t.0, 0));
            } else {
                Err(format!("meld tiles are not in hand: {}", m))?;
            }
        }
        let call = if m.is_concealed() { "" } else { "+" };
        exp_melds.push(format!("{}{}", tiles_to_string(&ts), call));
    }

    let mut hand = tiles_from_tile_table(&tt);
    hand.push(wt);

    let mut exp = tiles_to_string(&hand);
    if !cond.is_tsumo {
        exp.push('+');
    }
    for m in &exp_melds {
        exp += &format!(",{}", m);
    }

    exp += &format!(
        "/{}{},{},{},{}",
        wind_to_char(cond.round_wind),
        wind_to_char(cond.seat_wind),
        tiles_to_string(&cond.dora_indicators),
        tiles_to_string(&cond.uradora_indicators),
        cond.honba,
    );

    let f = &cond.flags;
    let flags = [
        (cond.is_riichi, "riichi"),
        (cond.is_double_riichi, "double_riichi"),
        (f.ippatsu, "ippatsu"),
        (f.haitei, "haitei"),
        (f.houtei, "houtei"),
        (f.rinshan, "rinshan"),
        (f.chankan, "chankan"),
        (f.tenhou, "tenhou"),
        (f.chihou, "chihou"),
    ];
    let names: Vec<&str> = flags.iter().filter(|(b, _)| *b).map(|(_, n)| *n).collect();
    exp += &format!("/{}", names.join(","));

    Ok(exp)
}

#[test]
fn test_tiles_string() {
    let hand_str = "p34777s1230567z66";
    let hand = tiles_from_string(hand_str).unwrap();
    assert_eq!(hand.len(), 14);
    assert_eq!(hand[8], Tile(TS, 0));
    assert_eq!(tiles_to_string(&hand), hand_str);
    assert!(tiles_from_string("123").is_err());
    assert!(tiles_from_string("z8").is_err());
    assert!(tiles_from_string("m1x").is_err());
}

#[test]
fn test_meld_from_string() {
    assert_eq!(meld_from_string("m3+12").unwrap(), Meld::chii(Tile(TM, 1)));
    assert_eq!(meld_from_string("s406+").unwrap(), Meld::chii(Tile(TS, 4)));
    assert_eq!(meld_from_string("p777+").unwrap(), Meld::pon(Tile(TP, 7)));
    assert_eq!(meld_from_string("z1111+").unwrap(), Meld::minkan(Tile(TZ, WE)));
    assert_eq!(meld_from_string("s2222").unwrap(), Meld::ankan(Tile(TS, 2)));
    assert!(meld_from_string("p777").is_err());
    assert!(meld_from_string("z123+").is_err());
    assert!(meld_from_string("m124+").is_err());
}

#[test]
fn test_wind_char() {
    for ch in ['E', 'S', 'W', 'N'] {
        assert_eq!(wind_to_char(wind_from_char(ch).unwrap()), ch);
    }
    assert!(wind_from_char('X').is_err());
}

#[test]
fn test_hand_to_expression() {
    let mut tiles = tiles_from_string("m234p0678s556677p6z7777").unwrap();
    tiles.sort();
    let cond = Conditions {
        seat_wind: WW,
        round_wind: WS,
        is_riichi: true,
        winning_tile: Tile(TP, 6),
        dora_indicators: vec![Tile(TM, 1)],
        uradora_indicators: vec![Tile(TS, 4)],
        flags: WinFlags {
            ippatsu: true,
            ..Default::default()
        },
        melds: vec![Meld::ankan(Tile(TZ, DR))],
        honba: 2,
        ..Default::default()
    };
    assert_eq!(
        hand_to_expression(&tiles, &cond).unwrap(),
        "m234p0678s556677p6+,z7777/SW,m1,s4,2/riichi,ippatsu"
    );

    let cond = Conditions {
        melds: vec![Meld::pon(Tile(TZ, WE))],
        ..cond
    };
    assert!(hand_to_expression(&tiles, &cond).is_err());
}
