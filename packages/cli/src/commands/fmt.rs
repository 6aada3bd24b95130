use anyhow::Result;
use clap::Args;
use colored::Colorize;
use folio_document::serializer;
use folio_editor::{ContentOrigin, Document, EditorConfig};
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub struct FmtArgs {
    /// Document file to format
    pub input: PathBuf,

    /// Rewrite the file in place instead of printing to stdout
    #[arg(short, long)]
    pub write: bool,

    /// Indented output
    #[arg(long)]
    pub pretty: bool,
}

pub fn fmt(args: FmtArgs, config: &EditorConfig) -> Result<()> {
    let source = fs::read_to_string(&args.input)?;
    let (output, origin) = format_source(&source, args.pretty, config)?;

    if origin == ContentOrigin::PlainTextFallback {
        info!(file = %args.input.display(), "Converted plain text to a document");
    }

    if args.write {
        if output == source {
            println!("  {} {} (unchanged)", "✓".green(), args.input.display());
        } else {
            fs::write(&args.input, &output)?;
            println!("  {} {}", "✓".green(), args.input.display());
        }
    } else {
        println!("{}", output);
    }

    Ok(())
}

/// Canonical serialization of `source`, loaded the way the editor loads it
pub fn format_source(
    source: &str,
    pretty: bool,
    config: &EditorConfig,
) -> Result<(String, ContentOrigin)> {
    let doc = Document::from_content("fmt", source, config)?;

    let output = if pretty {
        serializer::serialize_pretty(doc.tree())
    } else {
        serializer::serialize(doc.tree())
    };

    Ok((output, doc.origin()))
}
