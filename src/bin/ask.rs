//! Interactive one-shot prompt: read one question, print one answer, exit.
//!
//! Run with: cargo run --bin advisor-ask

use std::io::{self, BufRead, Write};

use advisor_rag::{config::AdvisorConfig, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "advisor_rag=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AdvisorConfig::load()?;
    let state = AppState::new(config)?;

    println!("안녕하세요! 컴공도우미봇 입니다. 어떤 질문을 하고싶으신가요?");
    print!("\n질문: ");
    io::stdout().flush()?;

    let mut query = String::new();
    io::stdin().lock().read_line(&mut query)?;

    let answer = state.answer(&query).await;

    println!("\n[컴공도우미봇 답변]:");
    println!("{}", answer);

    Ok(())
}
