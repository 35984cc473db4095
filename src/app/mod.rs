// mainから直接呼び出すアプリケーションの動作モード(C, J, G)のモジュール

mod calculator;
mod generator;
mod json;

pub use calculator::CalculatorApp;
pub use generator::GeneratorApp;
pub use json::{process_json, JsonApp, ScoreRequest, ScoreResponse};
