// 手牌の分解, 役判定, 符計算, 点数計算を行うモジュール
mod decompose;
mod error;
mod evaluate;
mod fu;
mod point;
mod yaku;

pub use self::{
    decompose::{decompose, is_kokushimusou_win, MAX_PARSES},
    error::ScoringError,
    evaluate::{evaluate_parse, score},
    fu::{calc_fu, is_pinfu_shape},
    point::{aggregate, calc_base_point, get_score_title},
    yaku::{count_aka_dora, count_dora, evaluate, Tier, Yaku, YakuDefine},
};
