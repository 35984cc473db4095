use crate::model::*;

use Yaku::*;

// 役の階層 (表示順)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Yakuman,
    Han1,
    Han2,
    Han3,
    Han6,
}

// 役の一覧
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Yaku {
    // 役満
    KokushiMusou,
    Tenhou,
    Chihou,
    Suuankou,
    ChuurenPoutou,
    Daisuushii,
    Tsuuiisou,
    Daisangen,
    Ryuuiisou,
    Chinroutou,
    Suukantsu,
    Shousuushii,
    // 1翻
    Riichi,
    DoubleRiichi,
    Ippatsu,
    MenzenTsumo,
    Pinfu,
    Iipeikou,
    Haku,
    Hatsu,
    Chun,
    SeatWind,
    RoundWind,
    Tanyao,
    Haitei,
    Houtei,
    Rinshan,
    Chankan,
    // 2翻
    Chiitoitsu,
    Toitoi,
    Sanankou,
    SanshokuDoukou,
    Sankantsu,
    Shousangen,
    Honroutou,
    SanshokuDoujun,
    Ittsuu,
    Chanta,
    // 3翻
    Ryanpeikou,
    Junchan,
    Honitsu,
    // 6翻
    Chinitsu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YakuDefine {
    pub name: &'static str,
    pub fan_close: usize, // 鳴きなしの翻
    pub fan_open: usize,  // 鳴きありの翻(食い下がり) 0の場合は門前限定
}

macro_rules! define {
    ($n: expr, $c: expr, $o: expr) => {
        YakuDefine {
            name: $n,
            fan_close: $c,
            fan_open: $o,
        }
    };
}

impl Yaku {
    pub fn define(self) -> YakuDefine {
        match self {
            KokushiMusou => define!("Kokushi Musou", 13, 0),
            Tenhou => define!("Tenhou", 13, 0),
            Chihou => define!("Chihou", 13, 0),
            Suuankou => define!("Suuankou", 13, 0),
            ChuurenPoutou => define!("Chuuren Poutou", 13, 0),
            Daisuushii => define!("Daisuushii", 13, 13),
            Tsuuiisou => define!("Tsuuiisou", 13, 13),
            Daisangen => define!("Daisangen", 13, 13),
            Ryuuiisou => define!("Ryuuiisou", 13, 13),
            Chinroutou => define!("Chinroutou", 13, 13),
            Suukantsu => define!("Suukantsu", 13, 13),
            Shousuushii => define!("Shousuushii", 13, 13),
            Riichi => define!("Riichi", 1, 0),
            DoubleRiichi => define!("Double Riichi", 2, 0),
            Ippatsu => define!("Ippatsu", 1, 0),
            MenzenTsumo => define!("Menzen-Tsumo", 1, 0),
            Pinfu => define!("Pinfu", 1, 0),
            Iipeikou => define!("Iipeikou", 1, 0),
            Haku => define!("Yakuhai (Haku)", 1, 1),
            Hatsu => define!("Yakuhai (Hatsu)", 1, 1),
            Chun => define!("Yakuhai (Chun)", 1, 1),
            SeatWind => define!("Seat Wind", 1, 1),
            RoundWind => define!("Round Wind", 1, 1),
            Tanyao => define!("Tanyao", 1, 1),
            Haitei => define!("Haitei", 1, 1),
            Houtei => define!("Houtei", 1, 1),
            Rinshan => define!("Rinshan", 1, 1),
            Chankan => define!("Chankan", 1, 1),
            Chiitoitsu => define!("Chiitoitsu", 2, 0),
            Toitoi => define!("Toitoi", 2, 2),
            Sanankou => define!("Sanankou", 2, 2),
            SanshokuDoukou => define!("Sanshoku Doukou", 2, 2),
            Sankantsu => define!("Sankantsu", 2, 2),
            Shousangen => define!("Shousangen", 2, 2),
            Honroutou => define!("Honroutou", 2, 2),
            SanshokuDoujun => define!("Sanshoku Doujun", 3, 2),
            Ittsuu => define!("Ittsuu", 3, 2),
            Chanta => define!("Chanta", 3, 2),
            Ryanpeikou => define!("Ryanpeikou", 3, 0),
            Junchan => define!("Junchan", 3, 2),
            Honitsu => define!("Honitsu", 3, 2),
            Chinitsu => define!("Chinitsu", 6, 5),
        }
    }

    pub fn tier(self) -> Tier {
        match self {
            KokushiMusou | Tenhou | Chihou | Suuankou | ChuurenPoutou | Daisuushii | Tsuuiisou
            | Daisangen | Ryuuiisou | Chinroutou | Suukantsu | Shousuushii => Tier::Yakuman,
            Riichi | DoubleRiichi | Ippatsu | MenzenTsumo | Pinfu | Iipeikou | Haku | Hatsu
            | Chun | SeatWind | RoundWind | Tanyao | Haitei | Houtei | Rinshan | Chankan => {
                Tier::Han1
            }
            Chiitoitsu | Toitoi | Sanankou | SanshokuDoukou | Sankantsu | Shousangen
            | Honroutou | SanshokuDoujun | Ittsuu | Chanta => Tier::Han2,
            Ryanpeikou | Junchan | Honitsu => Tier::Han3,
            Chinitsu => Tier::Han6,
        }
    }

    #[inline]
    pub fn name(self) -> &'static str {
        self.define().name
    }

    // 門前かどうかによる翻数 (0の場合は不成立)
    pub fn han(self, is_menzen: bool) -> usize {
        let d = self.define();
        if is_menzen {
            d.fan_close
        } else {
            d.fan_open
        }
    }

    fn check(self, ctx: &YakuContext) -> bool {
        match self {
            KokushiMusou => is_kokushimusou(ctx),
            Tenhou => is_tenhou(ctx),
            Chihou => is_chihou(ctx),
            Suuankou => is_suuankou(ctx),
            ChuurenPoutou => is_chuurenpoutou(ctx),
            Daisuushii => is_daisuushii(ctx),
            Tsuuiisou => is_tsuuiisou(ctx),
            Daisangen => is_daisangen(ctx),
            Ryuuiisou => is_ryuuiisou(ctx),
            Chinroutou => is_chinroutou(ctx),
            Suukantsu => is_suukantsu(ctx),
            Shousuushii => is_shousuushii(ctx),
            Riichi => is_riichi(ctx),
            DoubleRiichi => is_double_riichi(ctx),
            Ippatsu => is_ippatsu(ctx),
            MenzenTsumo => is_menzentsumo(ctx),
            Pinfu => is_pinfu(ctx),
            Iipeikou => is_iipeikou(ctx),
            Haku => is_haku(ctx),
            Hatsu => is_hatsu(ctx),
            Chun => is_chun(ctx),
            SeatWind => is_jikaze(ctx),
            RoundWind => is_bakaze(ctx),
            Tanyao => is_tanyaochuu(ctx),
            Haitei => is_haitei(ctx),
            Houtei => is_houtei(ctx),
            Rinshan => is_rinshan(ctx),
            Chankan => is_chankan(ctx),
            Chiitoitsu => is_chiitoitsu(ctx),
            Toitoi => is_toitoihou(ctx),
            Sanankou => is_sanankou(ctx),
            SanshokuDoukou => is_sanshokudoukou(ctx),
            Sankantsu => is_sankantsu(ctx),
            Shousangen => is_shousangen(ctx),
            Honroutou => is_honroutou(ctx),
            SanshokuDoujun => is_sanshokudoujun(ctx),
            Ittsuu => is_ikkitsuukan(ctx),
            Chanta => is_chanta(ctx),
            Ryanpeikou => is_ryanpeikou(ctx),
            Junchan => is_junchan(ctx),
            Honitsu => is_honiisou(ctx),
            Chinitsu => is_chiniisou(ctx),
        }
    }
}

// 役満の判定順 (優先度順)
static YAKUMAN_LIST: &[Yaku] = &[
    KokushiMusou,
    Tenhou,
    Chihou,
    Suuankou,
    ChuurenPoutou,
    Daisuushii,
    Tsuuiisou,
    Daisangen,
    Ryuuiisou,
    Chinroutou,
    Suukantsu,
    Shousuushii,
];

// 役満以外の役
static YAKU_LIST: &[Yaku] = &[
    Riichi,
    DoubleRiichi,
    Ippatsu,
    MenzenTsumo,
    Pinfu,
    Iipeikou,
    Haku,
    Hatsu,
    Chun,
    SeatWind,
    RoundWind,
    Tanyao,
    Haitei,
    Houtei,
    Rinshan,
    Chankan,
    Chiitoitsu,
    Toitoi,
    Sanankou,
    SanshokuDoukou,
    Sankantsu,
    Shousangen,
    Honroutou,
    SanshokuDoujun,
    Ittsuu,
    Chanta,
    Ryanpeikou,
    Junchan,
    Honitsu,
    Chinitsu,
];

// 役の優先順位 =================================================================
// * 国士無双は単独で返却
// * 大四喜と字一色が両方成立した場合はその2つのみを返却
// * それ以外の役満が成立した場合は以降の役満を判定しない (大四喜を除く)
// * 役満が存在する場合は役満以外の役(ドラを含む)は判定しない
// * 以下の役は排他的であり各判定関数で重複しないようにしている
//     立直, ダブル立直
//     一盃口, 二盃口
//     チャンタ, 純チャン, 混老頭
//     混一色, 清一色

// 和了形の解釈と卓の状況から成立する役(ドラを含む)を返却
// hand: 鳴きを含むすべての手牌 (赤5, ドラの集計に使用)
// 役が1つもない場合は空のリストを返却 (ドラのみでは和了できない)
pub fn evaluate(parse: &Parse, cond: &Conditions, hand: &TileTable) -> Vec<YakuMatch> {
    let ctx = YakuContext::new(parse, cond, hand);

    let yakuman = ctx.calc_yakuman();
    if !yakuman.is_empty() {
        return yakuman
            .iter()
            .map(|y| YakuMatch::new(y.name(), y.han(true)))
            .collect();
    }

    let yaku = ctx.calc_yaku();
    if yaku.is_empty() {
        return vec![];
    }

    let mut res: Vec<YakuMatch> = yaku
        .iter()
        .map(|y| YakuMatch::new(y.name(), y.han(!ctx.is_open)))
        .collect();
    res.extend(ctx.calc_dora());
    res
}

// ドラ表示牌からドラの枚数を集計
pub fn count_dora(hand: &TileTable, indicators: &[Tile]) -> usize {
    indicators
        .iter()
        .map(|i| {
            let d = i.dora_from_indicator();
            hand[d.0][d.1]
        })
        .sum()
}

// 赤5の枚数
pub fn count_aka_dora(hand: &TileTable) -> usize {
    hand[TM][0] + hand[TP][0] + hand[TS][0]
}

#[derive(Debug)]
pub struct YakuContext<'a> {
    parse: &'a Parse,       // 鳴きを含むすべての面子
    cond: &'a Conditions,   // 卓の状況
    hand: &'a TileTable,    // 元々の手牌(鳴きを含む) 九蓮宝燈, ドラの判定などに使用
    tiles: Vec<Tile>,       // 和了形の構成牌 (赤5の区別なし)
    pair_tile: Tile,        // 雀頭の牌 (七対子, 国士無双はZ8)
    is_open: bool,          // 鳴きの有無
    counts: Counts,         // 面子や牌種別のカウント
    iipeikou_count: usize,  // 一盃口, 二盃口用
    yakuhai_check: TileRow, // 字牌の刻子,槓子のカウント(雀頭は含まない)
}

impl<'a> YakuContext<'a> {
    pub fn new(parse: &'a Parse, cond: &'a Conditions, hand: &'a TileTable) -> Self {
        let pair_tile = match parse {
            Parse::Standard { pair, .. } => pair.tile(),
            _ => Z8,
        };
        let mut counts = count_type(parse);
        counts.ankou_total = parse.count_closed_sets(cond.is_tsumo);

        Self {
            parse,
            cond,
            hand,
            tiles: parse.tiles(),
            pair_tile,
            is_open: !parse.is_menzen(),
            counts,
            iipeikou_count: count_iipeikou(parse),
            yakuhai_check: check_yakuhai(parse),
        }
    }

    // 成立した役満を優先順位に従って返却
    pub fn calc_yakuman(&self) -> Vec<Yaku> {
        if KokushiMusou.check(self) {
            return vec![KokushiMusou];
        }
        // 大四喜と字一色が両方成立する場合は他の役満よりも優先
        if Daisuushii.check(self) && Tsuuiisou.check(self) {
            return vec![Daisuushii, Tsuuiisou];
        }

        let mut res = vec![];
        for &y in &YAKUMAN_LIST[1..] {
            if !y.check(self) {
                continue;
            }
            res.push(y);
            if y != Daisuushii {
                break; // 大四喜の場合のみ以降の役満の判定を続行
            }
        }
        res
    }

    // 成立した役満以外の役を階層順に返却
    pub fn calc_yaku(&self) -> Vec<Yaku> {
        let mut res: Vec<Yaku> = YAKU_LIST
            .iter()
            .copied()
            .filter(|y| y.han(!self.is_open) != 0 && y.check(self))
            .collect();
        res.sort_by_key(|y| y.tier());
        res
    }

    // ドラ, 赤ドラ, 裏ドラ (立直時のみ)
    pub fn calc_dora(&self) -> Vec<YakuMatch> {
        let mut res = vec![];
        let n = count_dora(self.hand, &self.cond.dora_indicators);
        if n != 0 {
            res.push(YakuMatch::new("Dora", n));
        }
        let n = count_aka_dora(self.hand);
        if n != 0 {
            res.push(YakuMatch::new("Aka Dora", n));
        }
        if self.cond.has_riichi() {
            let n = count_dora(self.hand, &self.cond.uradora_indicators);
            if n != 0 {
                res.push(YakuMatch::new("Ura Dora", n));
            }
        }
        res
    }

    fn is_value_tile(&self, t: Tile) -> bool {
        t.is_doragon() || (t.is_hornor() && (t.1 == self.cond.seat_wind || t.1 == self.cond.round_wind))
    }

    fn has_wind_set(&self, w: Tnum) -> bool {
        (WE..=WN).contains(&w) && self.yakuhai_check[w] != 0
    }

    fn wind_sets(&self) -> usize {
        let yc = &self.yakuhai_check;
        yc[WE] + yc[WS] + yc[WW] + yc[WN]
    }

    fn dragon_sets(&self) -> usize {
        let yc = &self.yakuhai_check;
        yc[DW] + yc[DG] + yc[DR]
    }

    // 同じ数字の面子が3種類の数牌すべてにあるか
    fn has_three_colors(&self, f: fn(&Meld) -> bool) -> bool {
        let melds = self.parse.melds();
        (1..TNUM).any(|ni| {
            (TM..=TS).all(|ti| melds.iter().any(|m| f(m) && m.tile() == Tile(ti, ni)))
        })
    }

    // 数牌の種類数
    fn count_suits(&self) -> usize {
        let tis = &self.counts.tis;
        (TM..=TS).filter(|&ti| tis[ti] != 0).count()
    }
}

#[derive(Debug, Default)]
struct Counts {
    pair: usize,
    shuntsu: usize,
    koutsu: usize,
    chii: usize,
    pon: usize,
    minkan: usize,
    ankan: usize,
    shuntsu_total: usize, // shuntsu + chii
    koutsu_total: usize,  // koutsu + pon + minkan + ankan
    ankou_total: usize,   // 暗刻 + 暗槓 (ロンで完成した刻子は含まない)
    kantsu_total: usize,  // minkan + ankan
    tis: [usize; TYPE],   // tile Type Indices counts (面子, 雀頭単位)
}

fn count_type(parse: &Parse) -> Counts {
    let mut cnt = Counts::default();
    for g in parse.groups() {
        match g {
            Meld::Pair { .. } => cnt.pair += 1,
            Meld::Sequence { concealed: true, .. } => cnt.shuntsu += 1,
            Meld::Sequence { .. } => cnt.chii += 1,
            Meld::Triplet { concealed: true, .. } => cnt.koutsu += 1,
            Meld::Triplet { .. } => cnt.pon += 1,
            Meld::Quad { concealed: true, .. } => cnt.ankan += 1,
            Meld::Quad { .. } => cnt.minkan += 1,
        }
        cnt.tis[g.tile().0] += 1;
    }
    cnt.shuntsu_total = cnt.shuntsu + cnt.chii;
    cnt.koutsu_total = cnt.koutsu + cnt.pon + cnt.minkan + cnt.ankan;
    cnt.kantsu_total = cnt.minkan + cnt.ankan;

    cnt
}

fn count_iipeikou(parse: &Parse) -> usize {
    let mut n = 0;
    let mut shuntsu = TileTable::default();
    for m in parse.melds() {
        if let Meld::Sequence {
            tile,
            concealed: true,
        } = m
        {
            shuntsu[tile.0][tile.1] += 1;
            if shuntsu[tile.0][tile.1] % 2 == 0 {
                n += 1;
            }
        }
    }

    n
}

fn check_yakuhai(parse: &Parse) -> TileRow {
    let mut tr = TileRow::default();
    for m in parse.melds() {
        let t = m.tile();
        if m.is_set_of_same() && t.is_hornor() {
            tr[t.1] += 1;
        }
    }

    tr
}

// [役満]

// 国士無双
fn is_kokushimusou(ctx: &YakuContext) -> bool {
    ctx.parse.is_thirteen_orphans()
}

// 天和
fn is_tenhou(ctx: &YakuContext) -> bool {
    ctx.cond.flags.tenhou && ctx.cond.is_tsumo && ctx.cond.is_dealer()
}

// 地和
fn is_chihou(ctx: &YakuContext) -> bool {
    ctx.cond.flags.chihou && ctx.cond.is_tsumo && !ctx.cond.is_dealer()
}

// 四暗刻
fn is_suuankou(ctx: &YakuContext) -> bool {
    ctx.counts.ankou_total == 4
}

// 九蓮宝燈
fn is_chuurenpoutou(ctx: &YakuContext) -> bool {
    if ctx.is_open || ctx.counts.kantsu_total != 0 || !ctx.parse.is_standard() {
        return false;
    }

    let tis = &ctx.counts.tis;
    let ti = if tis[TM] == 5 {
        TM
    } else if tis[TP] == 5 {
        TP
    } else if tis[TS] == 5 {
        TS
    } else {
        return false;
    };

    let h = &ctx.hand;
    if h[ti][1] < 3 || h[ti][9] < 3 {
        return false;
    }
    for ni in 2..9 {
        if h[ti][ni] == 0 {
            return false;
        }
    }

    true
}

// 大四喜
fn is_daisuushii(ctx: &YakuContext) -> bool {
    ctx.wind_sets() == 4
}

// 字一色
fn is_tsuuiisou(ctx: &YakuContext) -> bool {
    !ctx.parse.is_thirteen_orphans() && ctx.tiles.iter().all(|t| t.is_hornor())
}

// 大三元
fn is_daisangen(ctx: &YakuContext) -> bool {
    ctx.dragon_sets() == 3
}

// 緑一色
fn is_ryuuiisou(ctx: &YakuContext) -> bool {
    !ctx.parse.is_thirteen_orphans() && ctx.tiles.iter().all(|t| t.is_green())
}

// 清老頭
fn is_chinroutou(ctx: &YakuContext) -> bool {
    !ctx.parse.is_thirteen_orphans() && ctx.tiles.iter().all(|t| t.is_terminal())
}

// 四槓子
fn is_suukantsu(ctx: &YakuContext) -> bool {
    ctx.counts.kantsu_total == 4
}

// 小四喜
fn is_shousuushii(ctx: &YakuContext) -> bool {
    ctx.wind_sets() == 3 && ctx.pair_tile.is_wind()
}

// [1翻]

// 立直
fn is_riichi(ctx: &YakuContext) -> bool {
    ctx.cond.is_riichi && !ctx.cond.is_double_riichi
}

// ダブル立直
fn is_double_riichi(ctx: &YakuContext) -> bool {
    ctx.cond.is_double_riichi
}

// 一発
fn is_ippatsu(ctx: &YakuContext) -> bool {
    ctx.cond.flags.ippatsu && ctx.cond.has_riichi()
}

// 門前自摸
fn is_menzentsumo(ctx: &YakuContext) -> bool {
    ctx.cond.is_tsumo
}

// 平和
fn is_pinfu(ctx: &YakuContext) -> bool {
    ctx.counts.shuntsu == 4 && !ctx.is_value_tile(ctx.pair_tile) && ctx.parse.is_two_sided_wait()
}

// 一盃口
fn is_iipeikou(ctx: &YakuContext) -> bool {
    !ctx.is_open && ctx.iipeikou_count == 1
}

// 白
fn is_haku(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[DW] != 0
}

// 發
fn is_hatsu(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[DG] != 0
}

// 中
fn is_chun(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[DR] != 0
}

// 自風
fn is_jikaze(ctx: &YakuContext) -> bool {
    ctx.has_wind_set(ctx.cond.seat_wind)
}

// 場風
fn is_bakaze(ctx: &YakuContext) -> bool {
    ctx.has_wind_set(ctx.cond.round_wind)
}

// 断么九
fn is_tanyaochuu(ctx: &YakuContext) -> bool {
    !ctx.parse.is_thirteen_orphans() && ctx.tiles.iter().all(|t| t.is_simple())
}

// 海底摸月
fn is_haitei(ctx: &YakuContext) -> bool {
    ctx.cond.flags.haitei && ctx.cond.is_tsumo
}

// 河底撈魚
fn is_houtei(ctx: &YakuContext) -> bool {
    ctx.cond.flags.houtei && !ctx.cond.is_tsumo
}

// 嶺上開花
fn is_rinshan(ctx: &YakuContext) -> bool {
    ctx.cond.flags.rinshan && ctx.cond.is_tsumo
}

// 槍槓
fn is_chankan(ctx: &YakuContext) -> bool {
    ctx.cond.flags.chankan && !ctx.cond.is_tsumo
}

// [2翻]

// 七対子
fn is_chiitoitsu(ctx: &YakuContext) -> bool {
    ctx.parse.is_seven_pairs()
}

// 対々和
fn is_toitoihou(ctx: &YakuContext) -> bool {
    ctx.counts.koutsu_total == 4
}

// 三暗刻
fn is_sanankou(ctx: &YakuContext) -> bool {
    ctx.counts.ankou_total >= 3
}

// 三色同刻
fn is_sanshokudoukou(ctx: &YakuContext) -> bool {
    ctx.counts.koutsu_total >= 3 && ctx.has_three_colors(Meld::is_set_of_same)
}

// 三槓子
fn is_sankantsu(ctx: &YakuContext) -> bool {
    ctx.counts.kantsu_total == 3
}

// 小三元
fn is_shousangen(ctx: &YakuContext) -> bool {
    ctx.dragon_sets() == 2 && ctx.pair_tile.is_doragon()
}

// 混老頭
fn is_honroutou(ctx: &YakuContext) -> bool {
    if ctx.parse.is_thirteen_orphans() || ctx.counts.shuntsu_total != 0 {
        return false;
    }

    let has_hornor = ctx.tiles.iter().any(|t| t.is_hornor());
    let has_terminal = ctx.tiles.iter().any(|t| t.is_terminal());
    has_hornor && has_terminal && ctx.tiles.iter().all(|t| t.is_end())
}

// 三色同順
fn is_sanshokudoujun(ctx: &YakuContext) -> bool {
    ctx.counts.shuntsu_total >= 3 && ctx.has_three_colors(Meld::is_sequence)
}

// 一気通貫
fn is_ikkitsuukan(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu_total < 3 {
        return false;
    }

    let melds = ctx.parse.melds();
    (TM..=TS).any(|ti| {
        [1, 4, 7]
            .iter()
            .all(|&ni| melds.iter().any(|m| m.is_sequence() && m.tile() == Tile(ti, ni)))
    })
}

// チャンタ
fn is_chanta(ctx: &YakuContext) -> bool {
    if !ctx.parse.is_standard() || ctx.counts.shuntsu_total == 0 {
        return false;
    }

    let groups = ctx.parse.groups();
    groups.iter().all(|g| g.has_end()) && groups.iter().any(|g| g.tile().is_hornor())
}

// [3翻]

// 二盃口
fn is_ryanpeikou(ctx: &YakuContext) -> bool {
    !ctx.is_open && ctx.iipeikou_count == 2
}

// 純チャン
fn is_junchan(ctx: &YakuContext) -> bool {
    if !ctx.parse.is_standard() || ctx.counts.shuntsu_total == 0 {
        return false;
    }

    ctx.parse
        .groups()
        .iter()
        .all(|g| g.has_end() && !g.tile().is_hornor())
}

// 混一色
fn is_honiisou(ctx: &YakuContext) -> bool {
    ctx.count_suits() == 1 && ctx.counts.tis[TZ] != 0
}

// [6翻]

// 清一色
fn is_chiniisou(ctx: &YakuContext) -> bool {
    ctx.count_suits() == 1 && ctx.counts.tis[TZ] == 0
}

#[cfg(test)]
use super::decompose::decompose;

// テスト用: 手牌(鳴き以外)の表記から最も翻数の高い解釈の役一覧を返却
#[cfg(test)]
fn best_yaku(exp: &str, cond: &Conditions) -> Vec<YakuMatch> {
    let concealed = crate::util::string::tiles_from_string(exp).unwrap();
    let mut all = concealed.clone();
    for m in &cond.melds {
        all.extend(m.tiles());
    }
    let hand = tiles_to_tile_table(&all);
    decompose(&tiles_to_tile_table(&concealed), &cond.melds, cond.winning_tile)
        .iter()
        .map(|p| evaluate(p, cond, &hand))
        .max_by_key(|v| v.iter().map(|y| y.han).sum::<usize>())
        .unwrap_or_default()
}

#[cfg(test)]
fn names(v: &[YakuMatch]) -> Vec<&str> {
    v.iter().map(|y| y.name.as_str()).collect()
}

#[test]
fn test_riichi_ron_on_triplet() {
    let cond = Conditions {
        is_riichi: true,
        winning_tile: Tile(TP, 7),
        ..Default::default()
    };
    let yaku = best_yaku("m123p456s456p777m55", &cond);
    assert_eq!(yaku, vec![YakuMatch::new("Riichi", 1)]);
}

#[test]
fn test_pinfu_iipeikou_tsumo() {
    let cond = Conditions {
        is_riichi: true,
        is_tsumo: true,
        winning_tile: Tile(TS, 1),
        seat_wind: WS,
        round_wind: WE,
        ..Default::default()
    };
    let yaku = best_yaku("m234234p345s123p66", &cond);
    assert_eq!(names(&yaku), vec!["Riichi", "Menzen-Tsumo", "Pinfu", "Iipeikou"]);
    assert_eq!(yaku.iter().map(|y| y.han).sum::<usize>(), 4);
}

#[test]
fn test_tenhou_overrides() {
    let cond = Conditions {
        is_tsumo: true,
        winning_tile: Tile(TM, 9),
        flags: WinFlags {
            tenhou: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let yaku = best_yaku("m123456789p11s789", &cond);
    assert_eq!(yaku, vec![YakuMatch::new("Tenhou", 13)]);

    // 子の天和は成立しない
    let cond = Conditions {
        seat_wind: WS,
        ..cond
    };
    let yaku = best_yaku("m123456789p11s789", &cond);
    assert!(!names(&yaku).contains(&"Tenhou"));
}

#[test]
fn test_kokushi_alone() {
    let cond = Conditions {
        is_riichi: true,
        is_tsumo: true,
        winning_tile: Tile(TZ, DR),
        dora_indicators: vec![Tile(TZ, DG)],
        flags: WinFlags {
            tenhou: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let yaku = best_yaku("m19p19s19z12345677", &cond);
    assert_eq!(yaku, vec![YakuMatch::new("Kokushi Musou", 13)]);
}

#[test]
fn test_daisuushii_tsuuiisou() {
    let cond = Conditions {
        winning_tile: Tile(TZ, DW),
        melds: vec![Meld::pon(Tile(TZ, WE))],
        ..Default::default()
    };
    let yaku = best_yaku("z22233344455", &cond);
    assert_eq!(names(&yaku), vec!["Daisuushii", "Tsuuiisou"]);
    assert_eq!(yaku.iter().map(|y| y.han).sum::<usize>(), 26);
}

#[test]
fn test_daisuushii_tsuuiisou_over_suuankou() {
    // 門前自摸の四暗刻形でも大四喜と字一色のみ
    let cond = Conditions {
        is_tsumo: true,
        winning_tile: Tile(TZ, DW),
        ..Default::default()
    };
    let yaku = best_yaku("z11122233344455", &cond);
    assert_eq!(names(&yaku), vec!["Daisuushii", "Tsuuiisou"]);
    assert_eq!(yaku.iter().map(|y| y.han).sum::<usize>(), 26);
}

#[test]
fn test_yakuman_stops_scan() {
    // 大三元 + 字一色 は字一色のみ
    let cond = Conditions {
        winning_tile: Tile(TZ, WE),
        melds: vec![Meld::pon(Tile(TZ, DW))],
        ..Default::default()
    };
    let yaku = best_yaku("z66677711122", &cond);
    assert_eq!(names(&yaku), vec!["Tsuuiisou"]);
}

#[test]
fn test_suuankou_ron_shanpon() {
    // ロンで完成した刻子は暗刻に数えない
    let cond = Conditions {
        winning_tile: Tile(TS, 9),
        ..Default::default()
    };
    let yaku = best_yaku("m111p333s555999z22", &cond);
    let n = names(&yaku);
    assert!(!n.contains(&"Suuankou"));
    assert!(n.contains(&"Sanankou"));
    assert!(n.contains(&"Toitoi"));

    let cond = Conditions {
        is_tsumo: true,
        ..cond
    };
    let yaku = best_yaku("m111p333s555999z22", &cond);
    assert_eq!(names(&yaku), vec!["Suuankou"]);
}

#[test]
fn test_open_hand_kuisagari() {
    let cond = Conditions {
        winning_tile: Tile(TS, 9),
        melds: vec![Meld::chii(Tile(TS, 1))],
        ..Default::default()
    };
    let yaku = best_yaku("s456789z11z222", &cond);
    assert_eq!(
        yaku,
        vec![
            YakuMatch::new("Ittsuu", 2),
            YakuMatch::new("Honitsu", 2),
        ]
    );
}

#[test]
fn test_yakuhai_winds() {
    // 東場の東家: 東の刻子は自風と場風の両方
    let cond = Conditions {
        winning_tile: Tile(TP, 6),
        melds: vec![Meld::pon(Tile(TZ, WE))],
        ..Default::default()
    };
    let yaku = best_yaku("m234p456s678s99", &cond);
    assert!(names(&yaku).starts_with(&["Seat Wind", "Round Wind"]));
}

#[test]
fn test_dora_kinds() {
    let cond = Conditions {
        is_riichi: true,
        winning_tile: Tile(TP, 7),
        dora_indicators: vec![Tile(TM, 1)],
        uradora_indicators: vec![Tile(TS, 4)],
        ..Default::default()
    };
    let yaku = best_yaku("m234p067s556677p88", &cond);
    let n = names(&yaku);
    assert_eq!(n.last(), Some(&"Ura Dora"));
    assert!(yaku.contains(&YakuMatch::new("Dora", 1)));
    assert!(yaku.contains(&YakuMatch::new("Aka Dora", 1)));
    assert!(yaku.contains(&YakuMatch::new("Ura Dora", 2)));

    // 立直なしでは裏ドラは数えない
    let cond = Conditions {
        is_riichi: false,
        ..cond
    };
    let yaku = best_yaku("m234p067s556677p88", &cond);
    assert!(!names(&yaku).contains(&"Ura Dora"));
}

#[test]
fn test_no_yaku() {
    let cond = Conditions {
        winning_tile: Tile(TS, 9),
        dora_indicators: vec![Tile(TM, 1)],
        melds: vec![Meld::chii(Tile(TS, 1))],
        ..Default::default()
    };
    assert!(best_yaku("m222p456s78999", &cond).is_empty());
}

#[test]
fn test_exclusive_pairs() {
    // 二盃口は一盃口と重複しない
    let cond = Conditions {
        winning_tile: Tile(TS, 7),
        ..Default::default()
    };
    let n = names(&best_yaku("m112233p445566s77", &cond)).join(",");
    assert!(n.contains("Ryanpeikou"));
    assert!(!n.contains("Iipeikou"));

    // 純チャンはチャンタと重複しない
    let cond = Conditions {
        winning_tile: Tile(TP, 9),
        ..Default::default()
    };
    let yaku = best_yaku("m123789p11789s999", &cond);
    let n = names(&yaku);
    assert!(n.contains(&"Junchan"));
    assert!(!n.contains(&"Chanta"));
}

#[test]
fn test_evaluate_idempotent() {
    let cond = Conditions {
        is_riichi: true,
        winning_tile: Tile(TS, 5),
        ..Default::default()
    };
    let a = best_yaku("m234234p345s12355", &cond);
    let b = best_yaku("m234234p345s12355", &cond);
    assert!(!a.is_empty());
    assert_eq!(a, b);
}

#[test]
fn test_yakuman_hands() {
    let ron = |t: Tile, melds: Vec<Meld>| Conditions {
        winning_tile: t,
        melds,
        ..Default::default()
    };

    let yaku = best_yaku("s23423466688z666", &ron(Tile(TS, 8), vec![]));
    assert_eq!(names(&yaku), vec!["Ryuuiisou"]);

    let yaku = best_yaku("m111999p111s99", &ron(Tile(TS, 9), vec![Meld::pon(Tile(TP, 9))]));
    assert_eq!(names(&yaku), vec!["Chinroutou"]);

    let yaku = best_yaku("m1112345678999m5", &ron(Tile(TM, 5), vec![]));
    assert_eq!(names(&yaku), vec!["Chuuren Poutou"]);

    let melds = vec![
        Meld::minkan(Tile(TM, 1)),
        Meld::minkan(Tile(TP, 2)),
        Meld::minkan(Tile(TS, 3)),
        Meld::minkan(Tile(TZ, WE)),
    ];
    let yaku = best_yaku("m99", &ron(Tile(TM, 9), melds));
    assert_eq!(names(&yaku), vec!["Suukantsu"]);

    let yaku = best_yaku("z555666777m123p11", &ron(Tile(TP, 1), vec![]));
    assert_eq!(names(&yaku), vec!["Daisangen"]);

    let yaku = best_yaku("m123z11122233344", &ron(Tile(TM, 3), vec![]));
    assert_eq!(names(&yaku), vec!["Shousuushii"]);
}

#[test]
fn test_chihou() {
    let cond = Conditions {
        seat_wind: WS,
        is_tsumo: true,
        winning_tile: Tile(TM, 9),
        flags: WinFlags {
            chihou: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let yaku = best_yaku("m123456789p11s789", &cond);
    assert_eq!(yaku, vec![YakuMatch::new("Chihou", 13)]);

    // ロンと親では成立しない
    let ron = Conditions {
        is_tsumo: false,
        ..cond.clone()
    };
    let yaku = best_yaku("m123456789p11s789", &ron);
    assert!(!names(&yaku).contains(&"Chihou"));

    let dealer = Conditions {
        seat_wind: WE,
        ..cond
    };
    let yaku = best_yaku("m123456789p11s789", &dealer);
    assert!(!names(&yaku).contains(&"Chihou"));
}

#[test]
fn test_two_han_sets() {
    let cond = Conditions {
        winning_tile: Tile(TP, 5),
        melds: vec![
            Meld::minkan(Tile(TM, 1)),
            Meld::minkan(Tile(TP, 2)),
            Meld::ankan(Tile(TS, 3)),
        ],
        ..Default::default()
    };
    let yaku = best_yaku("m234p55", &cond);
    assert_eq!(yaku, vec![YakuMatch::new("Sankantsu", 2)]);

    let cond = Conditions {
        winning_tile: Tile(TM, 5),
        ..Default::default()
    };
    let yaku = best_yaku("m222p222s222m345z11", &cond);
    assert!(yaku.contains(&YakuMatch::new("Sanshoku Doukou", 2)));
    assert!(yaku.contains(&YakuMatch::new("Sanankou", 2)));

    // 小三元は役牌と複合
    let cond = Conditions {
        winning_tile: Tile(TP, 8),
        ..Default::default()
    };
    let yaku = best_yaku("z555666z77m234p678", &cond);
    assert!(yaku.contains(&YakuMatch::new("Shousangen", 2)));
    assert!(yaku.contains(&YakuMatch::new("Yakuhai (Haku)", 1)));
    assert!(yaku.contains(&YakuMatch::new("Yakuhai (Hatsu)", 1)));
    assert!(!names(&yaku).contains(&"Yakuhai (Chun)"));

    // 混老頭は順子を含まないのでチャンタにならない
    let cond = Conditions {
        winning_tile: Tile(TZ, DG),
        melds: vec![Meld::pon(Tile(TM, 1))],
        ..Default::default()
    };
    let yaku = best_yaku("p999s111z22266", &cond);
    assert!(yaku.contains(&YakuMatch::new("Honroutou", 2)));
    assert!(yaku.contains(&YakuMatch::new("Toitoi", 2)));
    assert!(!names(&yaku).contains(&"Chanta"));
}

#[test]
fn test_kuisagari_values() {
    let cond = Conditions {
        winning_tile: Tile(TM, 9),
        ..Default::default()
    };
    let yaku = best_yaku("m123789p123s123p55", &cond);
    assert_eq!(yaku, vec![YakuMatch::new("Sanshoku Doujun", 3)]);

    let cond = Conditions {
        melds: vec![Meld::chii(Tile(TM, 1))],
        ..cond
    };
    let yaku = best_yaku("m789p123s123p55", &cond);
    assert_eq!(yaku, vec![YakuMatch::new("Sanshoku Doujun", 2)]);

    // 字牌を含むので純チャンではなくチャンタ
    let cond = Conditions {
        winning_tile: Tile(TS, 9),
        ..Default::default()
    };
    let yaku = best_yaku("m123789p789z111s99", &cond);
    assert!(yaku.contains(&YakuMatch::new("Chanta", 3)));
    assert!(!names(&yaku).contains(&"Junchan"));

    let cond = Conditions {
        winning_tile: Tile(TM, 9),
        ..Default::default()
    };
    let yaku = best_yaku("m11223345678955", &cond);
    assert!(yaku.contains(&YakuMatch::new("Chinitsu", 6)));
    assert!(yaku.contains(&YakuMatch::new("Ittsuu", 3)));

    let cond = Conditions {
        melds: vec![Meld::chii(Tile(TM, 1))],
        ..cond
    };
    let yaku = best_yaku("m45678912355", &cond);
    assert!(yaku.contains(&YakuMatch::new("Chinitsu", 5)));
    assert!(yaku.contains(&YakuMatch::new("Ittsuu", 2)));
}

#[test]
fn test_riichi_kinds() {
    let cond = Conditions {
        is_riichi: true,
        is_double_riichi: true,
        winning_tile: Tile(TP, 7),
        ..Default::default()
    };
    let yaku = best_yaku("m123p456s456p777m55", &cond);
    assert_eq!(yaku, vec![YakuMatch::new("Double Riichi", 2)]);

    let cond = Conditions {
        flags: WinFlags {
            ippatsu: true,
            ..Default::default()
        },
        ..cond
    };
    let yaku = best_yaku("m123p456s456p777m55", &cond);
    assert_eq!(names(&yaku), vec!["Double Riichi", "Ippatsu"]);

    // 立直なしの一発はない
    let cond = Conditions {
        is_riichi: false,
        is_double_riichi: false,
        ..cond
    };
    assert!(best_yaku("m123p456s456p777m55", &cond).is_empty());
}

#[test]
fn test_last_tile_flags() {
    let cond = |is_tsumo: bool, flags: WinFlags| Conditions {
        is_riichi: true,
        is_tsumo,
        winning_tile: Tile(TP, 7),
        flags,
        ..Default::default()
    };
    let houtei = WinFlags {
        houtei: true,
        ..Default::default()
    };
    let chankan = WinFlags {
        chankan: true,
        ..Default::default()
    };
    let haitei = WinFlags {
        haitei: true,
        ..Default::default()
    };
    let rinshan = WinFlags {
        rinshan: true,
        ..Default::default()
    };
    let hand = "m123p456s456p777m55";

    // 河底と槍槓はロンのみ
    assert!(names(&best_yaku(hand, &cond(false, houtei))).contains(&"Houtei"));
    assert!(!names(&best_yaku(hand, &cond(true, houtei))).contains(&"Houtei"));
    assert!(names(&best_yaku(hand, &cond(false, chankan))).contains(&"Chankan"));
    assert!(!names(&best_yaku(hand, &cond(true, chankan))).contains(&"Chankan"));

    // 海底と嶺上はツモのみ
    assert!(names(&best_yaku(hand, &cond(true, haitei))).contains(&"Haitei"));
    assert!(!names(&best_yaku(hand, &cond(false, haitei))).contains(&"Haitei"));
    assert!(names(&best_yaku(hand, &cond(true, rinshan))).contains(&"Rinshan"));
    assert!(!names(&best_yaku(hand, &cond(false, rinshan))).contains(&"Rinshan"));
}
