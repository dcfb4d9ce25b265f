//! The `stats` command: print history store counters.

use anyhow::Context;

use prospect_core::AppConfig;
use prospect_store::HistoryStore;

pub fn execute(config: &AppConfig) -> anyhow::Result<()> {
    let store = HistoryStore::open(&config.data_dir).context("history store is unavailable")?;
    let stats = store.stats();

    println!("History store — {}", config.data_dir.display());
    println!("  processed: {}", stats.total_processed);
    println!("  approved:  {}", stats.total_approved);
    println!("  approval rate: {:.1}%", stats.approval_rate);

    if !stats.by_platform.is_empty() {
        println!();
        println!("By platform:");
        for (platform, (processed, approved)) in &stats.by_platform {
            println!("  {platform:<10} processed: {processed:<6} approved: {approved}");
        }
    }

    Ok(())
}
