//! `uniassist onboard`: First-time setup.

use std::path::Path;
use uniassist_config::AppConfig;

pub async fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = super::config_path(config_path);

    println!("UniAssist — First-Time Setup");
    println!("============================\n");

    if let Some(config_dir) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !config_dir.exists() {
            std::fs::create_dir_all(config_dir)?;
            println!("✅ Created config directory: {}", config_dir.display());
        } else {
            println!("  Config directory exists: {}", config_dir.display());
        }
    }

    if config_path.exists() {
        println!("\n⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run onboard.\n");
        return Ok(());
    }

    std::fs::write(&config_path, AppConfig::default_toml())?;
    println!("✅ Created config.toml at: {}", config_path.display());
    println!("\n📝 Next steps:");
    println!("   1. Put your Groq key in .env as GROQ_API_KEY=gsk_...");
    println!("   2. Add SENDER_EMAIL, SENDER_NAME, SENDER_PASSKEY and RECEIVER_EMAIL for the email assistant");
    println!("   3. Place the reference document at the [paths] document location (default DIU.pdf)");
    println!("   4. Run `uniassist doctor`, then `uniassist chat`\n");

    Ok(())
}
