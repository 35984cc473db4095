use crate::model::*;

fn ceil(n: Point) -> Point {
    (n + 99) / 100 * 100
}

// 翻数と符から基本点を計算
pub fn calc_base_point(han: usize, fu: usize) -> Point {
    match han {
        13.. => 8000,     // 役満 (数え役満を含む)
        11..=12 => 6000,  // 三倍満
        8..=10 => 4000,   // 倍満
        6..=7 => 3000,    // 跳満
        5 => 2000,        // 満貫
        4 if fu >= 40 => 2000,
        3 if fu >= 70 => 2000,
        _ => (fu * 2_usize.pow(han as u32 + 2)).min(2000) as Point,
    }
}

pub fn get_score_title(base_point: Point) -> String {
    match base_point {
        8000 => "Yakuman",
        6000 => "Sanbaiman",
        4000 => "Baiman",
        3000 => "Haneman",
        2000 => "Mangan",
        _ => "",
    }
    .to_string()
}

// 翻数(ドラを含む)と符から(基本点, 支払い)を返却
// 各支払いは基本点に倍率を掛けた後で100点単位に切り上げ
pub fn aggregate(han: usize, fu: usize, is_tsumo: bool, is_dealer: bool) -> (Point, Payment) {
    let base = calc_base_point(han, fu);
    let payment = match (is_tsumo, is_dealer) {
        (true, true) => {
            let from_each = ceil(base * 2);
            Payment::DealerTsumo {
                from_each,
                total: from_each * 3,
            }
        }
        (true, false) => {
            let from_dealer = ceil(base * 2);
            let from_others = ceil(base);
            Payment::NonDealerTsumo {
                from_dealer,
                from_others,
                total: from_dealer + from_others * 2,
            }
        }
        (false, true) => Payment::Ron {
            total: ceil(base * 6),
        },
        (false, false) => Payment::Ron {
            total: ceil(base * 4),
        },
    };
    (base, payment)
}

// cargo test print_points_table -- --nocapture
#[test]
fn print_points_table() {
    let fu_list = [20, 25, 30, 40, 50, 60, 70, 80, 90, 100, 110];

    println!("points (non-dealer) =========================================");
    for fu in fu_list {
        print!("[{fu:3} fu] ");
        for han in 1..=4 {
            let (_, p) = aggregate(han, fu, false, false);
            print!("{han}han:{:5} ", p.total())
        }
        println!();
    }
    for han in 5..=13 {
        let (base, p) = aggregate(han, 30, true, false);
        println!("{han:2}han: {} {}", p, get_score_title(base));
    }
}

#[test]
fn test_base_point() {
    assert_eq!(calc_base_point(1, 30), 240);
    assert_eq!(calc_base_point(3, 60), 1920);
    assert_eq!(calc_base_point(3, 70), 2000);
    assert_eq!(calc_base_point(4, 30), 1920);
    assert_eq!(calc_base_point(4, 40), 2000);
    assert_eq!(calc_base_point(2, 110), 1760);
    assert_eq!(calc_base_point(5, 20), 2000);
    assert_eq!(calc_base_point(7, 30), 3000);
    assert_eq!(calc_base_point(10, 30), 4000);
    assert_eq!(calc_base_point(12, 30), 6000);
    assert_eq!(calc_base_point(26, 30), 8000);
    assert_eq!(get_score_title(calc_base_point(6, 30)), "Haneman");
    assert_eq!(get_score_title(calc_base_point(2, 30)), "");
}

#[test]
fn test_aggregate() {
    // 子 30符1翻: 240 -> ロン 1000, ツモ 300/500
    assert_eq!(aggregate(1, 30, false, false).1, Payment::Ron { total: 1000 });
    assert_eq!(
        aggregate(1, 30, true, false).1,
        Payment::NonDealerTsumo {
            from_dealer: 500,
            from_others: 300,
            total: 1100,
        }
    );
    // 親 40符2翻: 640 -> ロン 3900, ツモ 1300オール
    assert_eq!(aggregate(2, 40, false, true).1, Payment::Ron { total: 3900 });
    assert_eq!(
        aggregate(2, 40, true, true).1,
        Payment::DealerTsumo {
            from_each: 1300,
            total: 3900,
        }
    );
    // 満貫以上
    assert_eq!(aggregate(5, 30, false, false).1.total(), 8000);
    assert_eq!(aggregate(13, 30, false, true).1.total(), 48000);
    assert_eq!(aggregate(26, 30, true, false).1.total(), 32000);
}

#[test]
fn test_dealer_payments() {
    for han in 1..=4 {
        for fu in [20, 25, 30, 40, 50, 60, 70, 80, 90, 100, 110] {
            let base = calc_base_point(han, fu);
            if base >= 2000 {
                continue;
            }
            let (_, ron) = aggregate(han, fu, false, true);
            assert_eq!(ron.total(), ceil(base * 6));
            let (_, tsumo) = aggregate(han, fu, true, true);
            assert_eq!(tsumo.total(), 3 * ceil(base * 2));
        }
    }
}
