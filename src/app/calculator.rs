use std::fs::File;
use std::io::{self, BufRead};

use crate::hand::score;
use crate::model::*;
use crate::util::log::set_debug;
use crate::util::misc::*;
use crate::util::string::*;

use crate::{debug, error, warn};

#[derive(Debug)]
pub struct CalculatorApp {
    args: Vec<String>,
}

impl CalculatorApp {
    pub fn new(args: Vec<String>) -> Self {
        Self { args }
    }

    pub fn run(&mut self) {
        let mut file_path = "".to_string();
        let mut exp = "".to_string();
        let mut it = self.args.iter();
        while let Some(s) = it.next() {
            match s.as_str() {
                "-d" => set_debug(true),
                "-f" => file_path = next_value(&mut it, s),
                _ => {
                    if s.starts_with('-') {
                        error!("unknown option: {}", s);
                        return;
                    }
                    if !exp.is_empty() {
                        error!("multiple expression is not allowed");
                        return;
                    }
                    exp = s.clone();
                }
            }
        }

        if file_path.is_empty() == exp.is_empty() {
            print_usage();
            return;
        }

        let res = if !exp.is_empty() {
            self.process_expression(&exp).map(|_| ())
        } else {
            self.run_from_file(&file_path)
        };
        if let Err(e) = res {
            error!("{}", e);
        }
    }

    fn run_from_file(&self, file_path: &str) -> Res {
        let file = File::open(file_path)?;
        let lines = io::BufReader::new(file).lines();
        let mut n_error = 0;
        for exp in lines.map_while(Result::ok) {
            let e = exp.replace(' ', "");
            if e.is_empty() || e.starts_with('#') {
                // 空行とコメント行はスキップ
                println!("> {}", exp);
            } else {
                match self.process_expression(&exp) {
                    Ok(Verify::Error) => {
                        warn!("verify failed: {}", exp);
                        n_error += 1;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        error!("{}", e);
                        n_error += 1;
                    }
                }
            }
            println!();
        }

        if n_error != 0 {
            Err(format!("{} expression(s) failed", n_error))?;
        }
        Ok(())
    }

    fn process_expression(&self, exp: &str) -> Res<Verify> {
        let mut calculator = Calculator::new();
        calculator.parse(exp)?;
        Ok(calculator.run())
    }
}

#[derive(Debug, PartialEq)]
enum Verify {
    Ok,
    Error,
    Skip,
}

#[derive(Debug)]
struct Calculator {
    // score params
    tiles: Vec<Tile>,
    cond: Conditions,
    // score verify
    verify: bool,
    fu: usize,
    han: usize,
    total: Point,
}

impl Calculator {
    fn new() -> Self {
        Self {
            tiles: vec![],
            cond: Conditions {
                is_tsumo: true,
                ..Default::default()
            },
            verify: false,
            fu: 0,
            han: 0,
            total: 0,
        }
    }

    fn parse(&mut self, input: &str) -> Res {
        println!("> {}", input);

        let input = input.replace(' ', "");
        let input = input.split('#').next().unwrap_or_default(); // コメント削除
        let exps: Vec<&str> = input.split('/').collect();
        let len = exps.len();
        if len > 0 {
            self.parse_hand_meld(exps[0])?;
        }
        if len > 1 {
            self.parse_stage_info(exps[1])?;
        }
        if len > 2 {
            self.parse_flags(exps[2])?;
        }
        if len > 3 {
            self.parse_score_verify(exps[3])?;
        }

        debug!("{:?}", self);
        Ok(())
    }

    fn run(&self) -> Verify {
        let (fu, han, total) = match score(&self.tiles, &self.cond) {
            Ok(res) => {
                debug!("{}", res.parse);
                println!("yaku: {}", vec_to_string(&res.yaku));
                println!(
                    "fu: {}, han: {}, base: {}, score: {} {}",
                    res.fu, res.han, res.base_points, res.payment, res.title
                );
                (res.fu, res.han, res.payment.total())
            }
            Err(e) => {
                println!("not win hand: {}", e);
                (0, 0, 0)
            }
        };

        let verify = if !self.verify {
            Verify::Skip
        } else if self.han >= 13 || total == 0 {
            // 役満と和了できない場合は得点のみをチェック
            if total == self.total {
                Verify::Ok
            } else {
                Verify::Error
            }
        } else if fu == self.fu && han == self.han && total == self.total {
            Verify::Ok
        } else {
            Verify::Error
        };
        println!("verify: {:?}", verify);
        verify
    }

    fn parse_hand_meld(&mut self, input: &str) -> Res {
        let mut exp_hand = "".to_string();
        let mut exp_melds = vec![];
        for exp in input.split(',') {
            if exp_hand.is_empty() {
                if exp.ends_with('+') {
                    self.cond.is_tsumo = false;
                }
                exp_hand = exp.replace('+', "");
            } else {
                exp_melds.push(exp.to_string());
            }
        }

        // 手牌 (最後の牌が和了牌)
        let hand = tiles_from_string(&exp_hand)?;
        self.cond.winning_tile = *hand.last().ok_or("empty hand")?;
        self.tiles.extend(hand);

        // 鳴き
        for exp_meld in &exp_melds {
            let m = meld_from_string(exp_meld)?;
            self.tiles.extend(tiles_from_string(&exp_meld.replace('+', ""))?);
            self.cond.melds.push(m);
        }

        Ok(())
    }

    fn parse_stage_info(&mut self, input: &str) -> Res {
        let exps: Vec<&str> = input.split(',').collect();
        let len = exps.len();
        if len > 0 {
            let chars: Vec<char> = exps[0].chars().collect();
            if chars.len() != 2 {
                Err(format!("stage info len is not 2: {}", exps[0]))?;
            }
            self.cond.round_wind = wind_from_char(chars[0])?;
            self.cond.seat_wind = wind_from_char(chars[1])?;
        }
        if len > 1 {
            self.cond.dora_indicators = tiles_from_string(exps[1])?;
        }
        if len > 2 {
            self.cond.uradora_indicators = tiles_from_string(exps[2])?;
        }
        if len > 3 && !exps[3].is_empty() {
            self.cond.honba = exps[3].parse()?;
        }
        Ok(())
    }

    fn parse_flags(&mut self, input: &str) -> Res {
        let f = &mut self.cond.flags;
        for y in input.split(',') {
            match y {
                "riichi" => self.cond.is_riichi = true,
                "double_riichi" => self.cond.is_double_riichi = true,
                "ippatsu" => f.ippatsu = true,
                "haitei" => f.haitei = true,
                "houtei" => f.houtei = true,
                "rinshan" => f.rinshan = true,
                "chankan" => f.chankan = true,
                "tenhou" => f.tenhou = true,
                "chihou" => f.chihou = true,
                "" => {}
                _ => Err(format!("invalid flag: {}", y))?,
            }
        }
        Ok(())
    }

    fn parse_score_verify(&mut self, input: &str) -> Res {
        let exps: Vec<&str> = input.split(',').collect();
        if exps.len() != 3 {
            Err(format!("invalid score verify info: {}", input))?;
        }
        self.fu = exps[0].parse::<usize>()?;
        self.han = exps[1].parse::<usize>()?;
        self.total = exps[2].parse::<Point>()?;
        self.verify = true;
        Ok(())
    }
}

fn print_usage() {
    error!(
        r"invalid input
Usage
    $ cargo run C EXPRESSION [-d]
    $ cargo run C -f FILE [-d]
Expression
    HAND[,MELD...][/ROUND SEAT[,DORA[,URA[,HONBA]]]][/FLAG,...][/FU,HAN,TOTAL]
    ex) m123p456s456p77m55p7+,z777+/ES,m1/riichi/40,2,2600
Options
    -d: print debug info
    -f: read expresisons from file instead of a commandline expression
"
    );
}

#[test]
fn test_calculator() {
    let file = File::open("tests/win_hands.txt").unwrap();
    let lines = io::BufReader::new(file).lines();
    for exp in lines.map_while(Result::ok) {
        let e = exp.replace(' ', "");
        if e.is_empty() || e.starts_with('#') {
            // 空行とコメント行はスキップ
            println!("> {}", exp);
        } else {
            let mut calculator = Calculator::new();
            calculator.parse(&e).unwrap();
            assert_eq!(Verify::Ok, calculator.run());
        }
    }
}

#[test]
fn test_parse_expression() {
    let mut c = Calculator::new();
    c.parse("m234p0678s556677p6+,z7777/SW,m1,s4,2/riichi,ippatsu")
        .unwrap();
    assert_eq!(c.tiles.len(), 18);
    assert_eq!(c.cond.winning_tile, Tile(TP, 6));
    assert!(!c.cond.is_tsumo);
    assert_eq!(c.cond.melds, vec![Meld::ankan(Tile(TZ, DR))]);
    assert_eq!((c.cond.round_wind, c.cond.seat_wind), (WS, WW));
    assert_eq!(c.cond.dora_indicators, vec![Tile(TM, 1)]);
    assert_eq!(c.cond.uradora_indicators, vec![Tile(TS, 4)]);
    assert_eq!(c.cond.honba, 2);
    assert!(c.cond.is_riichi && c.cond.flags.ippatsu);
    assert!(!c.verify);

    assert!(Calculator::new().parse("m123/ES/unknown").is_err());
    assert!(Calculator::new().parse("m123/XS").is_err());
}

#[test]
fn test_generated_expression() {
    use crate::util::wall::HandGenerator;

    let mut gen = HandGenerator::new(3);
    for _ in 0..200 {
        let (tiles, cond) = gen.next_hand();
        let exp = hand_to_expression(&tiles, &cond).unwrap();
        let mut c = Calculator::new();
        c.parse(&exp).unwrap();
        assert_eq!(c.cond, cond);
        assert_eq!(tiles_to_tile_table(&c.tiles), tiles_to_tile_table(&tiles));
        assert_eq!(score(&c.tiles, &c.cond), score(&tiles, &cond));
    }
}
