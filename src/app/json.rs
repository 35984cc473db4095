use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::hand::score;
use crate::model::*;
use crate::util::log::set_debug;
use crate::util::misc::*;

use crate::{debug, error};

// 入力: {"tiles": ["m1", ...], "conditions": {...}}
// 複数の場合は配列で与える
#[derive(Debug, Clone, Deserialize)]
pub struct ScoreRequest {
    pub tiles: Vec<Tile>,
    #[serde(default)]
    pub conditions: Conditions,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ScoreResponse {
    Ok(ScoreResult),
    Error { error: String },
}

impl ScoreRequest {
    pub fn process(&self) -> ScoreResponse {
        match score(&self.tiles, &self.conditions) {
            Ok(res) => ScoreResponse::Ok(res),
            Err(e) => ScoreResponse::Error {
                error: e.to_string(),
            },
        }
    }
}

// 単体のリクエストと配列の両方を受け付ける
pub fn process_json(input: &str) -> Res<String> {
    let value: serde_json::Value = serde_json::from_str(input)?;
    let out = if value.is_array() {
        let reqs: Vec<ScoreRequest> = serde_json::from_value(value)?;
        let res: Vec<ScoreResponse> = reqs.iter().map(|r| r.process()).collect();
        serde_json::to_string_pretty(&res)?
    } else {
        let req: ScoreRequest = serde_json::from_value(value)?;
        serde_json::to_string_pretty(&req.process())?
    };
    Ok(out)
}

#[derive(Debug)]
pub struct JsonApp {
    args: Vec<String>,
}

impl JsonApp {
    pub fn new(args: Vec<String>) -> Self {
        Self { args }
    }

    pub fn run(&mut self) {
        let mut file_path = "".to_string();
        let mut it = self.args.iter();
        while let Some(s) = it.next() {
            match s.as_str() {
                "-d" => set_debug(true),
                "-f" => file_path = next_value(&mut it, s),
                opt => {
                    error!("unknown option: {}", opt);
                    return;
                }
            }
        }

        match self.read_input(&file_path).and_then(|s| process_json(&s)) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                error!("{}", e);
                println!("{}", serde_json::json!({ "error": e.to_string() }));
            }
        }
    }

    // ファイル指定がない場合は標準入力から読み込み
    fn read_input(&self, file_path: &str) -> Res<String> {
        let input = if file_path.is_empty() {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        } else {
            std::fs::read_to_string(file_path)?
        };
        debug!("input: {}", input);
        Ok(input)
    }
}

#[test]
fn test_process_json() {
    let input = r#"{
        "tiles": ["m1", "m2", "m3", "p4", "p5", "p6", "s4", "s5", "s6",
                  "p7", "p7", "p7", "m5", "m5"],
        "conditions": {"is_riichi": true, "winning_tile": "p7"}
    }"#;
    let out: serde_json::Value = serde_json::from_str(&process_json(input).unwrap()).unwrap();
    assert_eq!(out["han"], 1);
    assert_eq!(out["fu"], 30);
    assert_eq!(out["yaku"][0]["name"], "Riichi");
    assert_eq!(out["payment"]["kind"], "ron");
    assert_eq!(out["payment"]["total"], 1500);
    assert_eq!(out["parse"]["shape"], "standard");
}

#[test]
fn test_process_json_batch() {
    let input = r#"[
        {"tiles": ["m1", "m2", "m3"], "conditions": {"winning_tile": "m1"}},
        {"tiles": ["z1", "z1", "z2", "z2", "z3", "z3", "z4", "z4",
                   "z5", "z5", "z6", "z6", "z7", "z7"],
         "conditions": {"winning_tile": "z7", "is_tsumo": true, "seat_wind": 2}}
    ]"#;
    let out: serde_json::Value = serde_json::from_str(&process_json(input).unwrap()).unwrap();
    assert_eq!(out[0]["error"], "hand must have 14 tiles (got 3)");
    assert_eq!(out[1]["yaku"][0]["name"], "Tsuuiisou");
    assert_eq!(out[1]["title"], "Yakuman");
    assert_eq!(out[1]["payment"]["total"], 32000);

    assert!(process_json("{").is_err());
    assert!(process_json(r#"{"tiles": ["x1"]}"#).is_err());
}
