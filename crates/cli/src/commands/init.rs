//! Initialize .vdr-badge.toml configuration

use anyhow::Result;
use std::path::Path;
use vdr_badge_core::config::CONFIG_FILE_NAME;
use vdr_badge_core::BadgeConfig;

pub fn run(path: Option<&Path>) -> Result<()> {
    let target_path = path.unwrap_or_else(|| Path::new("."));
    let config_path = target_path.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        println!("⚠️  {} already exists at {:?}", CONFIG_FILE_NAME, config_path);
        return Ok(());
    }

    let config = BadgeConfig::default();
    config.save(&config_path)?;

    println!("✅ Created {} at {:?}", CONFIG_FILE_NAME, config_path);
    println!("\nSet [link] base_url to link badges to your projects, then run:");
    println!("  vdr-badge combined bom.vdr.json -o badge.svg");

    Ok(())
}
