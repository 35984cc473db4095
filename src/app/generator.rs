use std::collections::BTreeMap;
use std::sync::mpsc;
use std::{thread, time};

use rand::prelude::*;

use crate::hand::score;
use crate::util::log::set_debug;
use crate::util::misc::*;
use crate::util::string::hand_to_expression;
use crate::util::wall::HandGenerator;

use crate::{debug, error, error_exit, info};

const BATCH: u32 = 1000;

// 和了形をランダムに生成して点数計算を行う (動作確認とベンチマーク用)
#[derive(Debug)]
pub struct GeneratorApp {
    seed: u64,
    n_hand: u32,
    n_thread: u32,
    write: bool,
}

impl GeneratorApp {
    pub fn new(args: Vec<String>) -> Self {
        let mut app = Self {
            seed: 0,
            n_hand: 10000,
            n_thread: 16,
            write: false,
        };

        let mut it = args.iter();
        while let Some(s) = it.next() {
            match s.as_str() {
                "-s" => app.seed = next_value(&mut it, s),
                "-n" => app.n_hand = next_value(&mut it, s),
                "-t" => app.n_thread = next_value(&mut it, s),
                "-w" => app.write = true,
                "-d" => set_debug(true),
                opt => error_exit!("unknown option: {}", opt),
            }
        }

        if app.seed == 0 {
            app.seed = unixtime_now() as u64;
        }
        if app.n_thread == 0 {
            app.n_thread = 1;
        }

        app
    }

    pub fn run(&mut self) {
        info!("seed: {}, hands: {}, threads: {}", self.seed, self.n_hand, self.n_thread);
        let start = time::Instant::now();
        let summary = self.collect();
        info!(
            "{} hands in {}ms",
            summary.n_hand,
            start.elapsed().as_millis()
        );
        summary.print();
    }

    // BATCH単位でスレッドに振り分けて集計
    fn collect(&self) -> Summary {
        let mut n_hand = 0;
        let mut n_thread = 0;
        let mut rng: StdRng = SeedableRng::seed_from_u64(self.seed);
        let (tx, rx) = mpsc::channel();
        let mut summary = Summary::default();
        loop {
            while n_hand < self.n_hand && n_thread < self.n_thread {
                let n = BATCH.min(self.n_hand - n_hand);
                n_hand += n;
                n_thread += 1;

                let seed = rng.next_u64();
                let write = self.write;
                let tx2 = tx.clone();
                thread::spawn(move || {
                    let start = time::Instant::now();
                    let s = run_batch(seed, n, write);
                    let _ = tx2.send((seed, s, start.elapsed()));
                });
            }

            if n_thread == 0 {
                break;
            }

            // 実行中のバッチが終わるまでブロック
            match rx.recv() {
                Ok((seed, s, elapsed)) => {
                    debug!(
                        "batch seed: {:20}, hands: {:5}, {:4}ms",
                        seed,
                        s.n_hand,
                        elapsed.as_millis()
                    );
                    summary.merge(s);
                    n_thread -= 1;
                }
                Err(e) => {
                    error!("{}", e);
                    break;
                }
            }
        }
        summary
    }
}

// 生成した手牌の集計結果
#[derive(Debug, Default)]
struct Summary {
    n_hand: u32,
    total_points: u64,
    titles: BTreeMap<String, u32>, // 満貫, 跳満, ... (満貫未満は翻数)
    errors: BTreeMap<String, u32>,
}

impl Summary {
    fn merge(&mut self, other: Summary) {
        self.n_hand += other.n_hand;
        self.total_points += other.total_points;
        for (k, v) in other.titles {
            *self.titles.entry(k).or_insert(0) += v;
        }
        for (k, v) in other.errors {
            *self.errors.entry(k).or_insert(0) += v;
        }
    }

    fn print(&self) {
        let n_win: u32 = self.titles.values().sum();
        println!(
            "win: {}/{}, avg_points: {}",
            n_win,
            self.n_hand,
            self.total_points / n_win.max(1) as u64
        );
        for (k, v) in &self.titles {
            println!("{:>10}: {:6} ({:.2}%)", k, v, rate(*v, self.n_hand));
        }
        for (k, v) in &self.errors {
            println!("{:>10}: {:6} ({:.2}%)", k, v, rate(*v, self.n_hand));
        }
    }
}

fn rate(n: u32, total: u32) -> f64 {
    n as f64 * 100.0 / total.max(1) as f64
}

fn run_batch(seed: u64, n: u32, write: bool) -> Summary {
    let mut gen = HandGenerator::new(seed);
    let mut s = Summary::default();
    for _ in 0..n {
        let (tiles, cond) = gen.next_hand();
        s.n_hand += 1;

        let verify = match score(&tiles, &cond) {
            Ok(res) => {
                let title = if res.title.is_empty() {
                    format!("{}han", res.han)
                } else {
                    res.title.clone()
                };
                *s.titles.entry(title).or_insert(0) += 1;
                s.total_points += res.payment.total() as u64;
                format!("{},{},{}", res.fu, res.han, res.payment.total())
            }
            Err(e) => {
                *s.errors.entry(format!("{:?}", e)).or_insert(0) += 1;
                "0,0,0".to_string()
            }
        };

        // 計算機モード(C)の-fオプションで読み込める形式で出力
        if write {
            match hand_to_expression(&tiles, &cond) {
                Ok(exp) => println!("{}/{}", exp, verify),
                Err(e) => error!("{}", e),
            }
        }
    }
    s
}

#[test]
fn test_run_batch() {
    let s = run_batch(1, 200, false);
    assert_eq!(s.n_hand, 200);
    let n_win: u32 = s.titles.values().sum();
    let n_error: u32 = s.errors.values().sum();
    assert_eq!(n_win + n_error, 200);
    assert!(s.errors.keys().all(|k| k == "NoYaku"));

    // シードが同じなら結果も同じ
    let s2 = run_batch(1, 200, false);
    assert_eq!(s.titles, s2.titles);
    assert_eq!(s.total_points, s2.total_points);
}

#[test]
fn test_collect_threads() {
    let app = GeneratorApp {
        seed: 5,
        n_hand: 2500,
        n_thread: 2,
        write: false,
    };
    let s = app.collect();
    assert_eq!(s.n_hand, 2500);
    let n_win: u32 = s.titles.values().sum();
    let n_error: u32 = s.errors.values().sum();
    assert_eq!(n_win + n_error, 2500);

    // 生成数が0の場合はスレッドを起動せずに終了
    let app = GeneratorApp {
        seed: 5,
        n_hand: 0,
        n_thread: 4,
        write: false,
    };
    assert_eq!(app.collect().n_hand, 0);
}
