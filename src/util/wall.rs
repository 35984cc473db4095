use rand::prelude::*;
use rand::rngs::StdRng;

use crate::model::*;

pub fn create_wall(seed: u64, n_red5: usize) -> Vec<Tile> {
    let n_red5 = n_red5.min(TILE);
    let mut wall = Vec::new();
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            if ti == TZ && ni > DR {
                break;
            }
            for n in 0..TILE {
                let ni2 = if ti != TZ && ni == 5 && n < n_red5 {
                    0
                } else {
                    ni
                }; // 赤5
                wall.push(Tile(ti, ni2));
            }
        }
    }

    let mut rng: StdRng = SeedableRng::seed_from_u64(seed);
    wall.shuffle(&mut rng);
    wall
}

// 牌山から和了形の手牌と卓の状況をランダムに生成
// 役の有無は考慮しないので役なしの手牌も生成される
#[derive(Debug)]
pub struct HandGenerator {
    rng: StdRng,
}

impl HandGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SeedableRng::seed_from_u64(seed),
        }
    }

    // (鳴きと和了牌を含むすべての手牌, 卓の状況)を返却
    pub fn next_hand(&mut self) -> (Vec<Tile>, Conditions) {
        let wall = create_wall(self.rng.gen(), 1);
        let mut rest = tiles_to_tile_table(&wall);
        for tr in &mut rest {
            tr[0] = 0; // 赤5は後から置き換える
        }

        let mut concealed = vec![];
        let mut melds = vec![];
        if self.rng.gen_range(0..16) == 0 {
            self.pick_pairs(&wall, &mut rest, &mut concealed);
        } else {
            self.pick_sets(&wall, &mut rest, &mut concealed, &mut melds);
        }

        let mut called: Vec<Tile> = melds.iter().flat_map(|m: &Meld| m.tiles()).collect();
        self.replace_red_five(&mut concealed, &mut called);

        let cond = self.create_conditions(&wall, &concealed, melds);
        concealed.extend(called);
        concealed.sort();
        (concealed, cond)
    }

    // 七対子
    fn pick_pairs(&mut self, wall: &[Tile], rest: &mut TileTable, concealed: &mut Vec<Tile>) {
        let mut n = 0;
        for t in wall {
            let t = t.to_normal();
            if n == 7 {
                break;
            }
            if rest[t.0][t.1] == TILE {
                rest[t.0][t.1] -= 2;
                concealed.extend([t, t]);
                n += 1;
            }
        }
    }

    // 4面子1雀頭 (一部の面子は鳴きとして扱う)
    fn pick_sets(
        &mut self,
        wall: &[Tile],
        rest: &mut TileTable,
        concealed: &mut Vec<Tile>,
        melds: &mut Vec<Meld>,
    ) {
        let mut it = wall.iter().cycle();
        let mut n = 0;
        while n < 4 {
            let t = match it.next() {
                Some(t) => t.to_normal(),
                None => return,
            };
            let m = match self.rng.gen_range(0..10) {
                0..=4 => Meld::Sequence {
                    tile: t,
                    concealed: true,
                },
                5..=8 => Meld::Triplet {
                    tile: t,
                    concealed: true,
                },
                _ => Meld::Quad {
                    tile: t,
                    concealed: true,
                },
            };
            if !m.is_valid() || !take_meld(rest, &m) {
                continue;
            }
            n += 1;

            let is_call = self.rng.gen_bool(0.25);
            match m {
                Meld::Sequence { tile, .. } if is_call => melds.push(Meld::chii(tile)),
                Meld::Triplet { tile, .. } if is_call => melds.push(Meld::pon(tile)),
                Meld::Quad { tile, .. } if is_call => melds.push(Meld::minkan(tile)),
                Meld::Quad { tile, .. } => melds.push(Meld::ankan(tile)),
                _ => concealed.extend(m.tiles()),
            }
        }

        for t in wall {
            let t = t.to_normal();
            if rest[t.0][t.1] >= 2 {
                concealed.extend([t, t]);
                return;
            }
        }
    }

    // 各色の最初の5を一定確率で赤5に置き換え
    fn replace_red_five(&mut self, concealed: &mut [Tile], called: &mut [Tile]) {
        for suit in [Suit::Man, Suit::Pin, Suit::Sou] {
            if !self.rng.gen_bool(0.5) {
                continue;
            }
            let five = Tile::new(suit, 5, false);
            if let Some(t) = concealed.iter_mut().chain(called.iter_mut()).find(|t| **t == five) {
                *t = Tile::new(suit, 5, true);
            }
        }
    }

    fn create_conditions(&mut self, wall: &[Tile], concealed: &[Tile], melds: Vec<Meld>) -> Conditions {
        let rng = &mut self.rng;
        let is_menzen = melds.iter().all(|m| m.is_concealed());
        let has_quad = melds.iter().any(|m| m.is_quad());
        let is_tsumo = rng.gen_bool(0.5);
        let is_riichi = is_menzen && rng.gen_bool(0.5);
        let is_double_riichi = is_riichi && rng.gen_bool(0.1);

        let mut flags = WinFlags {
            ippatsu: is_riichi && rng.gen_bool(0.1),
            ..Default::default()
        };
        if is_tsumo {
            flags.haitei = rng.gen_bool(0.05);
            flags.rinshan = has_quad && rng.gen_bool(0.2);
        } else {
            flags.houtei = rng.gen_bool(0.05);
            flags.chankan = rng.gen_bool(0.05);
        }

        // 牌山の末尾を王牌としてドラ表示牌に使用
        let n = wall.len();
        Conditions {
            seat_wind: rng.gen_range(WE..=WN),
            round_wind: rng.gen_range(WE..=WN),
            is_riichi: is_riichi && !is_double_riichi,
            is_double_riichi,
            is_tsumo,
            winning_tile: *concealed.choose(rng).unwrap_or(&Z8),
            dora_indicators: vec![wall[n - 1]],
            uradora_indicators: if is_riichi { vec![wall[n - 2]] } else { vec![] },
            flags,
            melds,
            honba: rng.gen_range(0..3),
        }
    }
}

// 残り枚数のTileTableから面子の構成牌を取り除く (足りない場合は何もしない)
fn take_meld(rest: &mut TileTable, m: &Meld) -> bool {
    let mut tt = *rest;
    for t in m.tiles() {
        if tt[t.0][t.1] == 0 {
            return false;
        }
        tt[t.0][t.1] -= 1;
    }
    *rest = tt;
    true
}

#[test]
fn test_create_wall() {
    let wall = create_wall(0, 1);
    assert_eq!(wall.len(), 136);
    assert_eq!(wall.iter().filter(|t| t.is_red_five()).count(), 3);
    assert_eq!(wall, create_wall(0, 1));
}

#[test]
fn test_generated_hands_are_wins() {
    use crate::hand::{decompose, score, ScoringError};

    let mut gen = HandGenerator::new(1);
    for _ in 0..500 {
        let (tiles, cond) = gen.next_hand();
        let n_quads = cond.count_quads();
        assert_eq!(tiles.len() - n_quads, HAND, "{:?}", tiles);

        match score(&tiles, &cond) {
            Ok(res) => assert_eq!(res.parse.count_as(), HAND),
            Err(e) => assert_eq!(e, ScoringError::NoYaku, "{:?} {:?}", tiles, cond),
        }

        // 和了牌は手牌(鳴き以外)に含まれるので常に分解できる
        let mut tt = tiles_to_tile_table(&tiles);
        for m in &cond.melds {
            for t in m.tiles() {
                take_tile(&mut tt, t);
            }
        }
        assert!(!decompose(&tt, &cond.melds, cond.winning_tile).is_empty());
    }
}

#[test]
fn test_fu_properties() {
    use crate::hand::{calc_fu, evaluate, is_pinfu_shape, score};

    let mut gen = HandGenerator::new(7);
    for _ in 0..500 {
        let (tiles, cond) = gen.next_hand();
        let res = match score(&tiles, &cond) {
            Ok(res) => res,
            Err(_) => continue,
        };

        let p = &res.parse;
        if p.is_seven_pairs() {
            assert_eq!(res.fu, 25);
        } else if is_pinfu_shape(p, cond.seat_wind, cond.round_wind) {
            assert_eq!(res.fu, if cond.is_tsumo { 20 } else { 30 });
        } else {
            assert_eq!(res.fu % 10, 0);
        }
        assert_eq!(
            res.fu,
            calc_fu(p, cond.is_tsumo, p.is_menzen(), cond.seat_wind, cond.round_wind)
        );

        // 役判定は何度行っても同じ結果になる
        let hand = tiles_to_tile_table(&tiles);
        let a = evaluate(p, &cond, &hand);
        let b = evaluate(p, &cond, &hand);
        assert_eq!(a, b);
        assert_eq!(a.iter().map(|y| y.han).sum::<usize>(), res.han);

        // 国士無双は単独
        if p.is_thirteen_orphans() {
            assert_eq!(a.len(), 1);
        }
    }
}
