// 点数計算のデータモデル
mod condition;
mod define;
mod meld;
mod parse;
mod tile;
mod win_context;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use self::{condition::*, define::*, meld::*, parse::*, tile::*, win_context::*};
