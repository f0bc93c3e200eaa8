use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use mensetsu::{
    AnswerKey, CategoryFilter, Config, Difficulty, DifficultyFilter, PracticeSession,
    QuestionBank, Recorder, SilenceDevice, TerminalBell,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

/// Mock interview practice trainer
#[derive(Debug, Parser)]
#[command(name = "mensetsu", version)]
struct Args {
    /// Config file (without extension, `config` crate conventions)
    #[arg(short, long, default_value = "config/mensetsu")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config).unwrap_or_else(|e| {
        info!("No config loaded ({}); using defaults", e);
        Config::default()
    });

    info!("mensetsu v0.1.0");
    info!("Questions: {}", cfg.session.questions_path);
    info!("Recordings: {}", cfg.audio.recordings_path);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    // The question data is the only thing the session cannot run without;
    // a failed load blocks everything behind a manual reload
    let bank = loop {
        match QuestionBank::load(&cfg.session.questions_path) {
            Ok(bank) => break bank,
            Err(e) => {
                error!("Failed to load question data: {:#}", e);
                println!("質問データの読み込みに失敗しました。`reload` で再試行、`quit` で終了します。");
                match lines.next_line().await? {
                    Some(line) if line.trim() == "reload" => continue,
                    Some(line) if line.trim() == "quit" => return Ok(()),
                    Some(_) => continue,
                    None => return Ok(()),
                }
            }
        }
    };

    let device = SilenceDevice::new(cfg.audio.sample_rate, cfg.audio.channels);
    let recorder = Recorder::new(
        Box::new(device),
        &cfg.audio.recordings_path,
        cfg.audio.sample_rate,
        cfg.audio.channels,
    )?;

    let session = PracticeSession::new(
        bank,
        AnswerKey::builtin(),
        recorder,
        Arc::new(TerminalBell),
        cfg.session.default_duration_secs,
    );

    println!("模擬面接トレーニング — `next` で開始、`help` でコマンド一覧");

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (cmd, rest) = match line.split_once(' ') {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };

        match cmd {
            "" => {}
            "next" => match session.advance().await {
                Some(q) => {
                    println!(
                        "質問 #{} [{} / 難易度: {}]",
                        q.id,
                        q.category,
                        q.difficulty.label()
                    );
                    println!("{}", q.question);
                }
                None => println!("条件に合う質問がありません。フィルタを変更してください。"),
            },
            "answer" => {
                if session.toggle_answer().await {
                    match session.answer_for_current().await {
                        Some(answer) => println!("回答例: {}", answer),
                        None => println!("質問が選択されていません。"),
                    }
                } else {
                    println!("回答例を隠しました。");
                }
            }
            "record" => session.start_recording().await?,
            "stop" => session.stop_recording().await,
            "restart" => session.restart_timer().await,
            "time" => match rest.parse::<u32>() {
                Ok(secs) => {
                    if session.set_duration(secs).await {
                        println!("回答時間: {}秒", secs);
                    } else {
                        println!("回答時間は正の整数で指定してください。");
                    }
                }
                Err(_) => println!("回答時間は正の整数で指定してください。"),
            },
            "category" => {
                let filter = if rest == "all" || rest == "すべて" {
                    CategoryFilter::All
                } else if rest.is_empty() {
                    println!("カテゴリ: {}", session.categories().join(", "));
                    continue;
                } else {
                    CategoryFilter::Category(rest.to_string())
                };
                session.set_category(filter).await;
            }
            "difficulty" => {
                let filter = match rest {
                    "all" | "すべて" => DifficultyFilter::All,
                    "易" => DifficultyFilter::Level(Difficulty::Easy),
                    "中" => DifficultyFilter::Level(Difficulty::Medium),
                    "難" => DifficultyFilter::Level(Difficulty::Hard),
                    _ => {
                        println!("難易度は 易 / 中 / 難 / all のいずれかです。");
                        continue;
                    }
                };
                session.set_difficulty(filter).await;
            }
            "status" => {
                let snap = session.snapshot().await;
                println!(
                    "残り時間: {}  タイマー: {}  録音: {}",
                    format_time(snap.remaining_secs),
                    if snap.timer_active { "動作中" } else { "停止" },
                    if snap.is_recording { "録音中" } else { "なし" },
                );
            }
            "history" => {
                let history = session.history().await;
                if history.is_empty() {
                    println!("まだ履歴がありません。");
                }
                for entry in history {
                    println!(
                        "[{}] #{} {} (回答時間: {})",
                        entry.attempted_at.format("%H:%M:%S"),
                        entry.question.id,
                        entry.question.question,
                        format_time(entry.time_spent_secs),
                    );
                }
            }
            "recordings" => {
                let recordings = session.recordings().await;
                if recordings.is_empty() {
                    println!("まだ録音がありません。");
                }
                for clip in recordings {
                    println!(
                        "#{} {} ({:.1}s) → {}",
                        clip.question_id,
                        clip.question_text,
                        clip.duration_seconds,
                        clip.path.display(),
                    );
                }
            }
            "help" => {
                println!(
                    "next / answer / record / stop / restart / time <秒> / \
                     category <名前|all> / difficulty <易|中|難|all> / \
                     status / history / recordings / quit"
                );
            }
            "quit" => break,
            other => println!("不明なコマンド: {} (`help` 参照)", other),
        }
    }

    session.shutdown().await;

    Ok(())
}

fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
