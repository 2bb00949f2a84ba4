use anyhow::Result;

use crate::cli::output::OutputOptions;
use crate::core::config::{AppConfig, ProviderConfig, BASE_URL_ENV, MANAGEMENT_KEY_ENV};
use crate::core::providers::Provider;

pub fn init(_opts: &OutputOptions) -> Result<()> {
    let path = AppConfig::config_path();
    if path.exists() {
        eprintln!("Config file already exists at {}", path.display());
        eprintln!("Remove it first if you want to regenerate.");
        return Ok(());
    }

    match AppConfig::default().save() {
        Ok(path) => {
            println!("Generated config at {}", path.display());
            println!(
                "  Set base_url and management_key there, or export {} and {}.",
                BASE_URL_ENV, MANAGEMENT_KEY_ENV
            );
        }
        Err(e) => {
            eprintln!("Failed to generate config: {}", e);
            std::process::exit(1);
        }
    }
    Ok(())
}

pub fn add(provider_id: &str, _opts: &OutputOptions) -> Result<()> {
    let provider = match Provider::from_id(provider_id) {
        Some(p) => p,
        None => {
            eprintln!("Unknown provider: {}", provider_id);
            std::process::exit(1);
        }
    };

    let mut config = AppConfig::load()?;

    if let Some(existing) = config.providers.iter().find(|p| p.id == provider.id()) {
        if existing.enabled {
            eprintln!("Provider '{}' is already enabled", provider.id());
            std::process::exit(1);
        }
    }

    // Enable existing entry or add a new one
    let mut found = false;
    for p in &mut config.providers {
        if p.id == provider.id() {
            p.enabled = true;
            found = true;
            break;
        }
    }
    if !found {
        config.providers.push(ProviderConfig {
            id: provider.id().to_string(),
            enabled: true,
        });
    }

    config.save()?;
    println!("Enabled provider: {}", provider.id());
    Ok(())
}

pub fn remove(provider_id: &str, _opts: &OutputOptions) -> Result<()> {
    let provider = match Provider::from_id(provider_id) {
        Some(p) => p,
        None => {
            eprintln!("Unknown provider: {}", provider_id);
            std::process::exit(1);
        }
    };

    let mut config = AppConfig::load()?;

    match config.providers.iter().find(|p| p.id == provider.id()) {
        Some(existing) if !existing.enabled => {
            eprintln!("Provider '{}' is already disabled", provider.id());
            std::process::exit(1);
        }
        None => {
            eprintln!("Provider '{}' is already disabled", provider.id());
            std::process::exit(1);
        }
        _ => {}
    }

    for p in &mut config.providers {
        if p.id == provider.id() {
            p.enabled = false;
            break;
        }
    }

    config.save()?;
    println!("Disabled provider: {}", provider.id());
    Ok(())
}

pub fn check(_opts: &OutputOptions) -> Result<()> {
    let path = AppConfig::config_path();
    if !path.exists() {
        eprintln!("No config file found at {}", path.display());
        eprintln!("Run `quotabar config init` to create one.");
        return Ok(());
    }

    let mut config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    let issues = config.validate();
    if !issues.is_empty() {
        eprintln!("Config issues found in {}:", path.display());
        for issue in &issues {
            eprintln!("  - {}", issue);
        }
        std::process::exit(1);
    }

    println!("Config is valid: {}", path.display());

    let tracked: Vec<&str> = config.tracked_providers().iter().map(|p| p.id()).collect();
    if tracked.is_empty() {
        println!("  No providers tracked.");
    } else {
        println!("  Tracked providers: {}", tracked.join(", "));
    }

    config.apply_env();
    if config.base_url.is_none() {
        println!("  Note: base_url is not set (file or {}).", BASE_URL_ENV);
    }
    if config.management_key.is_none() {
        println!(
            "  Note: management_key is not set (file or {}).",
            MANAGEMENT_KEY_ENV
        );
    }
    Ok(())
}
