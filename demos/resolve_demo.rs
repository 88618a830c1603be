//! Resolution demo
//!
//! Resolves a few names against mainnet, walks the display items of each with
//! a cursor, and shows how a newer submission supersedes an older one.

use anyhow::Result;
use std::time::Duration;

use ensqr::{
    derive_items, Cursor, EnsQrConfig, EnsQrError, ResolutionOutcome, ResolutionPipeline,
    ResolutionSession, RpcNameService,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    println!("🚀 ensqr Resolution Demo");
    println!("========================");

    let config = EnsQrConfig::builder()
        .request_timeout(Duration::from_secs(15))
        .build()?;
    let service = RpcNameService::new(&config)?;
    let pipeline = ResolutionPipeline::new(service, config);

    println!("\n📋 Demo 1: Record sets and display items");
    println!("-----------------------------------------");

    for name in ["vitalik.eth", "nick.eth", "definitely-not-registered-ensqr.eth"] {
        println!("🔍 Resolving: {}", name);
        match pipeline.resolve(name).await? {
            ResolutionOutcome::Found(records) => {
                let items = derive_items(&records);
                let mut cursor = Cursor::new();
                loop {
                    if let Some(item) = cursor.current(&items) {
                        println!("  [{}] {}: {}", cursor.index(), item.label, item.payload);
                    }
                    if !cursor.has_next(&items) {
                        break;
                    }
                    cursor = cursor.next(&items);
                }
            }
            ResolutionOutcome::NothingFound => println!("  ❌ No ENS name found"),
        }
    }

    println!("\n📋 Demo 2: Superseded requests");
    println!("-------------------------------");

    let mut session = ResolutionSession::new(pipeline);
    let first = session.submit("vitalik.eth");
    let second = session.submit("nick.eth");

    match first.outcome().await {
        Err(EnsQrError::Superseded(name)) => println!("  ⏭️  {} was superseded", name),
        other => println!("  first request finished anyway: {:?}", other.map(|o| o.is_found())),
    }
    let outcome = second.outcome().await?;
    println!("  ✅ nick.eth found: {}", outcome.is_found());

    Ok(())
}
