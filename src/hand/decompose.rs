use crate::model::*;

// 列挙する解釈の上限 (14枚の手牌では実際にはこの数に達しない)
pub const MAX_PARSES: usize = 64;

// [完成形判定 (面子, 雀頭)]

// それぞれの牌種について"枚数を3で割った余り"と"余り数の集計"を返却
pub fn calc_mods_cnts(hand: &TileTable) -> ([usize; 4], [usize; 3]) {
    let mut mods = [0; TYPE];
    for ti in 0..TYPE {
        mods[ti] = hand[ti][1..10].iter().sum();
        mods[ti] %= 3;
    }

    let mut cnts = [0; 3];
    for ti in 0..TYPE {
        cnts[mods[ti]] += 1;
    }

    (mods, cnts)
}

// 面子のみで構成されているかの判定
pub fn is_sets(tr: &TileRow, ti: Type) -> bool {
    let (mut n0, mut n1, mut n2);
    n0 = tr[1];
    n1 = tr[2];
    for i in 1..8 {
        n2 = tr[i + 2];
        let n = n0 % 3;
        if (ti == TZ && n != 0) || (n1 < n || n2 < n) {
            return false;
        }
        n0 = n1 - n;
        n1 = n2 - n;
    }
    n0 % 3 == 0 && n1 % 3 == 0
}

// 牌種が完成面子+雀頭の場合において雀頭候補となる牌を返す
// [1,4,7], [2,5,8], [3,6,9] のいずれか
pub fn calc_pair_candidate_index(tr: &TileRow) -> Vec<Tnum> {
    // 面子の和は3で割り切れるので余りの値によって雀頭候補を絞り込める
    let mut sum = 0;
    for i in 1..TNUM {
        sum += i * tr[i];
    }
    let mod3 = sum % 3;
    (1..4).map(|i| 3 * i - mod3).collect()
}

// 牌種が完成面子+雀頭のみで構成されている場合,雀頭のリストを返す.
// 基本的に1つだが,3113,3111113のような形の場合2つ
pub fn calc_pair_candidate(tr: &TileRow, ti: Type) -> Vec<Tile> {
    // 雀頭候補それぞれについて外してみた結果が完成面子になっているかをチェック
    let mut tr = *tr;
    let mut res = vec![];
    for ni in calc_pair_candidate_index(&tr) {
        if tr[ni] < 2 {
            continue;
        }
        tr[ni] -= 2;
        if is_sets(&tr, ti) {
            res.push(Tile(ti, ni));
        }
        tr[ni] += 2;
    }

    res
}

// 14 - (副露数) * 3 枚の手牌において和了形である場合,雀頭候補のリストを返却
pub fn calc_possibole_pairs(hand: &TileTable) -> Vec<Tile> {
    let (mods, cnts) = calc_mods_cnts(hand);
    let mut res = vec![];

    if cnts[1] != 0 || cnts[2] != 1 {
        return vec![];
    }

    for ti in 0..TYPE {
        if mods[ti] == 2 {
            let pairs = calc_pair_candidate(&hand[ti], ti);
            if pairs.is_empty() {
                return vec![];
            }
            res = pairs;
        } else if !is_sets(&hand[ti], ti) {
            return vec![];
        }
    }

    res
}

// 国士無双
pub fn is_kokushimusou_win(hand: &TileTable) -> bool {
    let mut count = 0;
    for ti in 0..TZ {
        if hand[ti][1] == 0 || hand[ti][9] == 0 {
            return false;
        }
        for ni in 2..9 {
            if hand[ti][ni] != 0 {
                return false;
            }
        }
        count += hand[ti][1] + hand[ti][9]
    }
    for ni in 1..8 {
        if hand[TZ][ni] == 0 {
            return false;
        }
        count += hand[TZ][ni]
    }

    count == HAND
}

// [和了形の分解]

// 手牌(鳴き以外, 和了牌を含む)と鳴きから考えられるすべての和了形の解釈を返却
// 和了形でない場合は空のリストを返却
pub fn decompose(hand: &TileTable, melds: &[Meld], winning_tile: Tile) -> Vec<Parse> {
    let hand = normalize(hand);

    // 国士無双は他の形に分解できないので単独で返却
    let kokushi = parse_into_kokusimusou_win(&hand, melds);
    if !kokushi.is_empty() {
        return kokushi;
    }

    let mut res = parse_into_chiitoitsu_win(&hand, melds);
    for p in parse_into_normal_win(&hand, melds, winning_tile) {
        if res.len() >= MAX_PARSES {
            break;
        }
        if !res.contains(&p) {
            res.push(p);
        }
    }

    res
}

// 赤5の枚数を取り除いたTileTableを返却
fn normalize(hand: &TileTable) -> TileTable {
    let mut tt = *hand;
    for tr in &mut tt {
        tr[0] = 0;
    }
    tt
}

// 手牌が完成形(国士無双)なら重複している么九牌を雀頭とした解釈を返却
fn parse_into_kokusimusou_win(hand: &TileTable, melds: &[Meld]) -> Vec<Parse> {
    if !melds.is_empty() || !is_kokushimusou_win(hand) {
        return vec![];
    }

    ORPHANS
        .iter()
        .find(|t| hand[t.0][t.1] == 2)
        .map(|&pair| vec![Parse::ThirteenOrphans { pair }])
        .unwrap_or_default()
}

// 手牌が完成形(七対子)ならすべて対子に分解して返却
fn parse_into_chiitoitsu_win(hand: &TileTable, melds: &[Meld]) -> Vec<Parse> {
    if !melds.is_empty() {
        return vec![];
    }

    let mut pairs = vec![];
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            match hand[ti][ni] {
                0 => {}
                2 => pairs.push(Meld::Pair { tile: Tile(ti, ni) }),
                _ => return vec![], // 4枚使いの七対子は認めない
            }
        }
    }

    if pairs.len() == 7 {
        vec![Parse::SevenPairs { pairs }]
    } else {
        vec![]
    }
}

// 手牌が完成形(4面子1雀頭)なら考えられるすべての分解と和了牌の解釈を返却
fn parse_into_normal_win(hand: &TileTable, melds: &[Meld], winning_tile: Tile) -> Vec<Parse> {
    if melds.len() > 4 {
        return vec![];
    }

    let mut res = vec![];
    for pair in calc_possibole_pairs(hand) {
        let mut tt = *hand;
        tt[pair.0][pair.1] -= 2;

        let mut split = vec![];
        split_into_sets(&mut tt, &mut vec![], &mut split);
        for sets in split {
            if sets.len() + melds.len() != 4 {
                continue;
            }
            for p in attribute_winning_tile(sets, melds, pair, winning_tile) {
                if res.len() >= MAX_PARSES {
                    return res;
                }
                res.push(p);
            }
        }
    }

    res
}

// 先頭の牌から順に刻子と順子を取り出して,すべての分割を列挙
// 先頭の牌は刻子(1つまで)か順子の先頭にしかなり得ないので,
// 刻子の有無を決めれば残りの枚数はすべて順子となり重複は発生しない
fn split_into_sets(tt: &mut TileTable, sets: &mut Vec<Meld>, res: &mut Vec<Vec<Meld>>) {
    if res.len() >= MAX_PARSES {
        return;
    }

    let mut first = None;
    'outer: for ti in 0..TYPE {
        for ni in 1..TNUM {
            if tt[ti][ni] > 0 {
                first = Some((ti, ni));
                break 'outer;
            }
        }
    }

    let (ti, ni) = match first {
        Some(p) => p,
        None => {
            res.push(sets.clone());
            return;
        }
    };

    let n = tt[ti][ni];
    if n >= 3 {
        tt[ti][ni] -= 3;
        sets.push(Meld::Triplet {
            tile: Tile(ti, ni),
            concealed: true,
        });
        take_sequences(tt, (ti, ni), n - 3, sets, res);
        sets.pop();
        tt[ti][ni] += 3;
    }
    take_sequences(tt, (ti, ni), n, sets, res);
}

fn take_sequences(
    tt: &mut TileTable,
    (ti, ni): (Type, Tnum),
    k: usize,
    sets: &mut Vec<Meld>,
    res: &mut Vec<Vec<Meld>>,
) {
    if k == 0 {
        split_into_sets(tt, sets, res);
        return;
    }
    if ti == TZ || ni > 7 || tt[ti][ni] < k || tt[ti][ni + 1] < k || tt[ti][ni + 2] < k {
        return;
    }

    for i in 0..3 {
        tt[ti][ni + i] -= k;
    }
    for _ in 0..k {
        sets.push(Meld::Sequence {
            tile: Tile(ti, ni),
            concealed: true,
        });
    }
    split_into_sets(tt, sets, res);
    for _ in 0..k {
        sets.pop();
    }
    for i in 0..3 {
        tt[ti][ni + i] += k;
    }
}

// 和了牌を含む面子(または雀頭)ごとに待ちの形を決定した解釈を返却
// 同一の面子が複数ある場合はどれに含めても同じなので1つにまとめる
fn attribute_winning_tile(
    sets: Vec<Meld>,
    called: &[Meld],
    pair: Tile,
    winning_tile: Tile,
) -> Vec<Parse> {
    let wt = winning_tile.to_normal();
    let mut roles: Vec<(Option<Index>, Wait)> = vec![];

    if pair == wt {
        roles.push((None, Wait::Tanki));
    }
    for (i, s) in sets.iter().enumerate() {
        if !s.contains(wt) || sets[..i].contains(s) {
            continue;
        }
        let wait = match s {
            Meld::Sequence { tile, .. } => classify_sequence_wait(tile.1, wt.1),
            _ => Wait::Shanpon,
        };
        roles.push((Some(i), wait));
    }

    let mut melds = sets;
    melds.extend_from_slice(called);
    roles
        .into_iter()
        .map(|(win_meld, wait)| Parse::Standard {
            melds: melds.clone(),
            pair: Meld::Pair { tile: pair },
            wait,
            win_meld,
        })
        .collect()
}

// 順子の先頭の数字と和了牌の数字から待ちの形を判定
fn classify_sequence_wait(start: Tnum, win: Tnum) -> Wait {
    match win - start {
        1 => Wait::Kanchan,
        0 if start == 7 => Wait::Penchan, // 89待ちの7
        2 if start == 1 => Wait::Penchan, // 12待ちの3
        _ => Wait::Ryanmen,
    }
}

#[cfg(test)]
fn table(exp: &str) -> TileTable {
    tiles_to_tile_table(&crate::util::string::tiles_from_string(exp).unwrap())
}

#[test]
fn test_sanrenkou_split() {
    // 三連刻は刻子3つと順子3つの2通り
    let hand = table("m111222333p55s789");
    let parses = decompose(&hand, &[], Tile(TS, 7));
    let n_triplets: Vec<usize> = parses
        .iter()
        .map(|p| p.melds().iter().filter(|m| m.is_set_of_same()).count())
        .collect();
    assert_eq!(parses.len(), 2);
    assert!(n_triplets.contains(&3));
    assert!(n_triplets.contains(&0));
    for p in &parses {
        assert_eq!(p.count_as(), HAND);
        assert_eq!(p.wait(), Wait::Penchan);
    }
}

#[test]
fn test_kokushi_short_circuit() {
    let hand = table("m19p19s19z12345677");
    let parses = decompose(&hand, &[], Tile(TZ, DR));
    assert_eq!(parses, vec![Parse::ThirteenOrphans { pair: Tile(TZ, DR) }]);
}

#[test]
fn test_chiitoitsu_and_standard() {
    // 七対子と二盃口の両方の解釈が可能
    let hand = table("m112233p445566s77");
    let parses = decompose(&hand, &[], Tile(TS, 7));
    assert!(parses.iter().any(|p| p.is_seven_pairs()));
    assert!(parses.iter().any(|p| p.is_standard()));
}

#[test]
fn test_winning_tile_roles() {
    // m6は雀頭(単騎)にも順子(両面)にも含めることができる
    let hand = table("m45666p123s456z111");
    let parses = decompose(&hand, &[], Tile(TM, 6));
    let waits: Vec<Wait> = parses.iter().map(|p| p.wait()).collect();
    assert_eq!(parses.len(), 2);
    assert!(waits.contains(&Wait::Tanki));
    assert!(waits.contains(&Wait::Ryanmen));
}

#[test]
fn test_with_called_melds() {
    let melds = vec![Meld::pon(Tile(TZ, DW)), Meld::chii(Tile(TP, 1))];
    let hand = table("m234s06788");
    let parses = decompose(&hand, &melds, Tile(TS, 8));
    assert_eq!(parses.len(), 1);
    let p = &parses[0];
    assert_eq!(p.melds().len(), 4);
    assert_eq!(p.pair_tile(), Some(Tile(TS, 8)));
    assert_eq!(p.wait(), Wait::Tanki);
    assert!(!p.is_menzen());
}

#[test]
fn test_not_win() {
    let hand = table("m123456789p1357z1");
    assert!(decompose(&hand, &[], Tile(TZ, WE)).is_empty());
}

#[test]
fn test_classify_sequence_wait() {
    assert_eq!(classify_sequence_wait(1, 3), Wait::Penchan);
    assert_eq!(classify_sequence_wait(7, 7), Wait::Penchan);
    assert_eq!(classify_sequence_wait(7, 9), Wait::Ryanmen);
    assert_eq!(classify_sequence_wait(3, 4), Wait::Kanchan);
    assert_eq!(classify_sequence_wait(1, 1), Wait::Ryanmen);
}
