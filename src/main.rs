use mahjong_score::app;
use mahjong_score::error;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        error!("mode not specified");
        return;
    }

    let args2 = args[2..].to_vec();
    match args[1].as_str() {
        "C" => {
            // Calculator (役計算モード)
            app::CalculatorApp::new(args2).run();
        }
        "J" => {
            // Json (JSON入出力モード)
            app::JsonApp::new(args2).run();
        }
        "G" => {
            // Generator (ランダム和了形の生成と集計モード)
            app::GeneratorApp::new(args2).run();
        }
        m => {
            error!("unknown mode: {}", m)
        }
    }
}
