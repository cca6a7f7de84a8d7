use anyhow::Result;
use colored::Colorize;
use counsel_core::risk::{RiskDetector, RiskVerdict};
use counsel_infrastructure::PatternFile;
use std::path::Path;

pub fn run(config_path: Option<&Path>, text: &str, json: bool) -> Result<()> {
    let config = super::load_config(config_path)?;
    let supplement = PatternFile::new(&config.extra_patterns_path).load()?;
    let detector = RiskDetector::with_supplement(&supplement);

    let verdict = detector.evaluate(text, None);
    if json {
        println!("{}", serde_json::to_string_pretty(&verdict)?);
    } else {
        print_verdict(&verdict);
    }
    Ok(())
}

fn print_verdict(verdict: &RiskVerdict) {
    if verdict.is_unsafe {
        println!("{}", "UNSAFE".red().bold());
    } else {
        println!("{}", "safe".green().bold());
    }

    if verdict.matched_snippets.is_empty() {
        println!("{}", "No risk patterns matched.".bright_black());
        return;
    }
    for snippet in &verdict.matched_snippets {
        let line = format!("  [{}] {}", snippet.category, snippet.text);
        if snippet.category.is_critical() {
            println!("{}", line.red());
        } else {
            println!("{}", line.yellow());
        }
    }
}
