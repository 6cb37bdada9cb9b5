//! `pegwise doctor` — Diagnose configuration problems.

use pegwise_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 Pegwise Doctor");
    println!("=================\n");

    let mut issues = 0;

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("  ✅ Config file found at {}", config_path.display());
    } else {
        println!("  ℹ️  No config file at {} — defaults in effect", config_path.display());
    }

    match AppConfig::load() {
        Ok(config) => {
            println!("  ✅ Config valid");
            println!("     model: {}", config.model);
            println!("     api_url: {}", config.api_url);
            println!("     max_moves: {}", config.max_moves);

            if config.api_key.is_some() {
                println!("  ✅ API key configured");
            } else {
                println!("  ❌ No API key — set api_key in config.toml or PEGWISE_API_KEY / OPENAI_API_KEY");
                issues += 1;
            }
        }
        Err(e) => {
            println!("  ❌ Config invalid: {e}");
            issues += 1;
        }
    }

    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
