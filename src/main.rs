use barter_market::mock::{self, CURRENT_USER};
use barter_market::store::PropertyStore;
use barter_market::{Decision, MarketConfig, Marketplace, MemoryStore, ProposalDraft, UserId};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🏠 Barter Market - in-memory demo");
    info!("=================================");

    let config = match std::env::args().nth(1) {
        Some(path) => MarketConfig::from_json_file(&path)?,
        None => MarketConfig::default(),
    };

    let store = Arc::new(MemoryStore::seeded(mock::users(), mock::properties(), mock::proposals()));
    let market = Marketplace::new(store, config);
    let me = UserId::from(CURRENT_USER);

    // Featured shelf
    let featured = market.featured().await?;
    info!("✨ {} featured listings", featured.len());
    for (i, property) in featured.iter().enumerate() {
        println!("{}. {} ({})", i + 1, property.title, property.display_value());
        println!("   {} - {} متر، {} اتاق", property.city, property.area, property.rooms);
        if !property.barter_preferences.is_empty() {
            println!("   Barter for: {}", property.barter_preferences.join("، "));
        }
        println!("   Status: {} / {}", property.status, property.verification());
        println!();
    }

    // Search like the home page form does
    let all_types = market.config().all_types_label.clone();
    let results = market.search_form("ویلا", "شیراز", &all_types).await?;
    info!("🔎 Found {} villas in Shiraz", results.len());

    // Offer one of my properties for the first hit
    if let Some(target) = results.first() {
        let mine = market.my_properties(&me).await?;
        if let Some(offered) = mine.iter().find(|p| p.is_available() && p.id != target.id) {
            let proposal = market
                .submit_proposal(
                    &me,
                    &target.id,
                    ProposalDraft {
                        offered_property: Some(offered.id.clone()),
                        message: "معاوضه با مابه‌التفاوت؟".to_string(),
                        cash_difference: Some(-5_000_000),
                    },
                )
                .await?;

            // Receiver accepts; both listings move to pending deal
            let proposal = market.decide_proposal(&proposal.receiver, &proposal.id, Decision::Accept).await?;
            info!("🤝 Proposal {} is {}", proposal.id, proposal.status);
        }
    }

    let received = market.received_proposals(&me).await?;
    let sent = market.sent_proposals(&me).await?;
    info!("📬 {} received, {} sent proposals", received.len(), sent.len());

    // Save snapshots
    let listings = market.store().list_properties().await?;
    tokio::fs::write("listings.json", serde_json::to_string_pretty(&listings)?).await?;
    let dashboard = serde_json::json!({ "received": received, "sent": sent });
    tokio::fs::write("proposals.json", serde_json::to_string_pretty(&dashboard)?).await?;
    info!("💾 Saved listings.json and proposals.json");

    Ok(())
}
