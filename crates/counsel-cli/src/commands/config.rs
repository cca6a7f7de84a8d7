use anyhow::Result;
use colored::Colorize;
use std::path::Path;

pub fn run(config_path: Option<&Path>, init: bool) -> Result<()> {
    let repository = super::repository(config_path)?;

    if init {
        if repository.path().exists() {
            println!(
                "{}",
                format!("Config already exists: {}", repository.path().display()).yellow()
            );
        } else {
            repository.save(&Default::default())?;
            println!(
                "{}",
                format!("✅ Wrote default config to {}", repository.path().display()).green()
            );
        }
    }

    let config = repository.load_effective()?;
    println!("{}", format!("# {}", repository.path().display()).bright_black());
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
