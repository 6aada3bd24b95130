use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use folio_document::{find_template, templates as builtin_templates};
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct NewArgs {
    /// Template id (see `folio templates`)
    pub template: String,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn templates() -> Result<()> {
    println!("{}", "Available templates:".bright_blue().bold());
    println!();

    for template in builtin_templates() {
        println!(
            "  {:<16} {} - {}",
            template.id.green(),
            template.name,
            template.description
        );
    }

    Ok(())
}

pub fn new(args: NewArgs) -> Result<()> {
    let content = template_content(&args.template)?;

    match args.output {
        Some(path) => {
            if path.exists() {
                return Err(anyhow!("Refusing to overwrite {}", path.display()));
            }
            fs::write(&path, content)?;
            println!("  {} Created {}", "✓".green(), path.display());
        }
        None => println!("{}", content),
    }

    Ok(())
}

/// Persisted content for a template; the blank template gives an empty string
fn template_content(id: &str) -> Result<String> {
    let template = find_template(id).ok_or_else(|| {
        let ids: Vec<&str> = builtin_templates().iter().map(|t| t.id).collect();
        anyhow!("Unknown template `{}`. Available: {}", id, ids.join(", "))
    })?;
    Ok(template.content())
}
