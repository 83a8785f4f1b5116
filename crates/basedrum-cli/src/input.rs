//! File loading helpers shared by the commands.

use anyhow::{Context, Result};
use std::path::Path;

use basedrum_spec::song::SongDocument;
use basedrum_spec::user::UserData;
use basedrum_spec::validation::parse_document;

/// Loads and fully validates a song document from a file.
pub fn load_document(path: &str) -> Result<SongDocument> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("could not read song document {}", path))?;
    parse_document(&json).with_context(|| format!("invalid song document {}", path))
}

/// Loads a user-data snapshot from a file. Missing fields are tolerated.
pub fn load_user_data(path: &str) -> Result<UserData> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("could not read user data {}", path))?;
    UserData::from_json(&json).with_context(|| format!("invalid user data {}", path))
}

/// Writes a string to a file or stdout when no path is given.
pub fn write_output(output: Option<&str>, contents: &str) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("could not create {}", parent.display()))?;
                }
            }
            std::fs::write(path, contents).with_context(|| format!("could not write {}", path))
        }
        None => {
            println!("{}", contents);
            Ok(())
        }
    }
}
