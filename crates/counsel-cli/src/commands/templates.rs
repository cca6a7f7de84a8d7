use anyhow::Result;
use colored::Colorize;
use counsel_core::template::{TemplateRepository, TemplateType};
use counsel_infrastructure::DirTemplateRepository;
use std::path::Path;
use strum::IntoEnumIterator;

pub async fn run(config_path: Option<&Path>) -> Result<()> {
    let config = super::load_config(config_path)?;
    let catalog = DirTemplateRepository::new(&config.template_dir)
        .load_catalog()
        .await?;

    println!(
        "{}",
        format!(
            "{} templates in {}",
            catalog.len(),
            config.template_dir.display()
        )
        .bright_magenta()
        .bold()
    );

    for kind in TemplateType::iter() {
        let templates: Vec<_> = catalog.by_type(kind).collect();
        println!();
        println!(
            "{}",
            format!("{} ({}) - {}", kind.id_prefix(), templates.len(), kind.description()).cyan()
        );
        for template in templates {
            println!("  {} {}", template.id.bright_white(), template.title);
        }
    }

    let untyped: Vec<_> = catalog.iter().filter(|t| t.kind().is_none()).collect();
    if !untyped.is_empty() {
        println!();
        println!("{}", "Unknown type (never retrieved):".yellow());
        for template in untyped {
            println!("  {} {}", template.id, template.title);
        }
    }
    Ok(())
}
