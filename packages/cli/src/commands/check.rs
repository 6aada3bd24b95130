use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use folio_document::{serializer, FormatError};
use folio_editor::EditorConfig;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Document files or directories of .json documents
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,
}

/// Result of checking one file
#[derive(Debug)]
pub enum CheckOutcome {
    Valid { blocks: usize, images: usize },
    Invalid(FormatError),
}

pub fn check(args: CheckArgs, config: &EditorConfig) -> Result<()> {
    println!("🔍 {} Folio document check", "Starting".green().bold());
    println!();

    let files = collect_files(&args.inputs)?;
    let mut failed = 0;

    for file in &files {
        match check_file(file)? {
            CheckOutcome::Valid { blocks, images } => {
                println!(
                    "  {} {} ({} blocks, {} images)",
                    "✓".green(),
                    file.display(),
                    blocks,
                    images
                );
            }
            CheckOutcome::Invalid(err) => {
                failed += 1;
                eprintln!("  {} {} - {}", "✗".red(), file.display(), err);
                if config.plain_text_fallback && matches!(err, FormatError::Syntax { .. }) {
                    eprintln!("      {} the editor would open this as plain text", "note:".yellow());
                }
            }
        }
    }

    println!();
    println!("   Files checked: {}", files.len());

    if failed > 0 {
        return Err(anyhow!("{} of {} documents are invalid", failed, files.len()));
    }

    println!("   {} No issues found!", "✓".green());
    Ok(())
}

/// Deserialize one file; format problems are an outcome, IO problems an error
pub fn check_file(path: &Path) -> Result<CheckOutcome> {
    let source = fs::read_to_string(path)?;

    Ok(match serializer::deserialize(&source) {
        Ok(tree) => CheckOutcome::Valid {
            blocks: tree.root().child_count(),
            images: tree.images().len(),
        },
        Err(err) => CheckOutcome::Invalid(err),
    })
}

fn collect_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_file() {
            files.push(input.clone());
        } else if input.is_dir() {
            files.extend(find_json_files(input));
        } else {
            return Err(anyhow!("Input path does not exist: {}", input.display()));
        }
    }

    Ok(files)
}

fn find_json_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("json"))
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_check_valid_and_invalid_files() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.json");
        let bad = dir.path().join("bad.json");
        fs::write(
            &good,
            r#"{"type":"doc","content":[{"type":"paragraph","content":[{"type":"text","text":"hi"}]}]}"#,
        )
        .unwrap();
        fs::write(&bad, r#"{"type":"paragraph"}"#).unwrap();

        assert!(matches!(
            check_file(&good).unwrap(),
            CheckOutcome::Valid { blocks: 1, images: 0 }
        ));
        assert!(matches!(
            check_file(&bad).unwrap(),
            CheckOutcome::Invalid(FormatError::RootNotDoc(_))
        ));
    }

    #[test]
    fn test_directories_are_walked() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("a.json"), "{}").unwrap();
        fs::write(dir.path().join("b.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "skip me").unwrap();

        let files = collect_files(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_missing_input() {
        let result = collect_files(&[PathBuf::from("/definitely/not/here.json")]);
        assert!(result.is_err());
    }
}
