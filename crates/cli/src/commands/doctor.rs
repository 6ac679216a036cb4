//! `uniassist doctor`: Diagnose configuration, files and connectivity.

use std::path::Path;
use uniassist_config::AppConfig;
use uniassist_core::history::HistoryStore;
use uniassist_history::{JsonFileStore, ReferenceDataset};

pub async fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 UniAssist Doctor — System Diagnostics");
    println!("=======================================\n");

    let mut issues = 0;

    let path = super::config_path(config_path);
    if !path.exists() {
        println!("  ⚠️  No config file at {} — using defaults (run `uniassist onboard`)", path.display());
    }

    let config = match super::load_config(config_path) {
        Ok(config) => {
            println!("  ✅ Config valid");
            config
        }
        Err(e) => {
            println!("  ❌ {e}");
            println!("\n  ⚠️  Cannot continue without a valid config.");
            return Ok(());
        }
    };

    if config.has_api_key() {
        println!("  ✅ API key configured");
    } else {
        println!("  ❌ No API key — set GROQ_API_KEY or add api_key to config.toml");
        issues += 1;
    }

    issues += check_document(&config);
    issues += check_history(&config).await;
    issues += check_email(&config);
    issues += check_provider(&config).await;

    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}

fn check_document(config: &AppConfig) -> usize {
    let source = match uniassist_document::open(&config.paths.document) {
        Ok(source) => source,
        Err(e) => {
            println!("  ❌ Reference document: {e}");
            return 1;
        }
    };

    let text = uniassist_document::load_document_text(source.as_ref());
    if text.is_empty() {
        println!("  ❌ No text extracted from {}", config.paths.document.display());
        1
    } else {
        println!(
            "  ✅ Reference document readable ({} characters)",
            text.chars().count()
        );
        0
    }
}

async fn check_history(config: &AppConfig) -> usize {
    let mut issues = 0;

    match JsonFileStore::new(&config.paths.history).load().await {
        Ok(messages) => println!("  ✅ History readable ({} messages)", messages.len()),
        Err(e) => {
            println!("  ❌ {e}");
            issues += 1;
        }
    }

    match ReferenceDataset::load(&config.paths.reference_dataset).await {
        Ok(dataset) => println!("  ✅ Reference dataset readable ({} messages)", dataset.len()),
        Err(e) => {
            println!("  ⚠️  {e} — it will be ignored");
            issues += 1;
        }
    }

    issues
}

fn check_email(config: &AppConfig) -> usize {
    let email = &config.email;
    if email.receiver_email.is_none() || email.sender_name.is_none() {
        println!("  ⚠️  Email identity incomplete — set SENDER_NAME and RECEIVER_EMAIL");
        return 1;
    }
    if email.sender_email.is_none() || email.sender_passkey.is_none() {
        println!("  ✅ Email identity configured (drafting only, no SENDER_EMAIL/SENDER_PASSKEY)");
    } else {
        println!(
            "  ✅ Email identity configured, sending via {}:{}",
            email.smtp_host, email.smtp_port
        );
    }
    0
}

async fn check_provider(config: &AppConfig) -> usize {
    let router = uniassist_providers::build_from_config(config);
    let Some(provider) = router.default() else {
        println!("  ❌ Provider '{}' is not configured", config.default_provider);
        return 1;
    };

    match provider.health_check().await {
        Ok(true) => {
            println!("  ✅ Provider '{}' reachable", provider.name());
            0
        }
        Ok(false) => {
            println!("  ❌ Provider '{}' did not respond", provider.name());
            1
        }
        Err(e) => {
            println!("  ❌ Provider '{}': {e}", provider.name());
            1
        }
    }
}
