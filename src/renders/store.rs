//! JSON persistence for exported chains
//!
//! A chain file records the rule its edges were computed under next to the
//! chains themselves:
//!
//! ```text
//! { "rule": "B3/S23", "chains": [{ "starter": ..., "frames": [...] }, ...] }
//! ```
//!
//! Each `{ starter, frames }` entry is the structure the core promises to keep
//! stable.

use super::ExportedChain;
use crate::errors::LifeError;
use crate::life::Rule;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Contents of a chain file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainFile {
    pub rule: Rule,
    pub chains: Vec<ExportedChain>,
}

pub fn save_chains(path: &Path, file: &ChainFile) -> Result<(), LifeError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, file)?;
    writer.flush()?;
    Ok(())
}

pub fn load_chains(path: &Path) -> Result<ChainFile, LifeError> {
    let reader = BufReader::new(File::open(path)?);
    let file = serde_json::from_reader(reader)?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::life::Fingerprint;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("lifeframe-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("store");
        let file = ChainFile {
            rule: Rule::CONWAY,
            chains: vec![ExportedChain {
                starter: Fingerprint::from_raw("0,0;0,1;0,2"),
                frames: vec![
                    Fingerprint::from_raw("0,0;0,1;0,2"),
                    Fingerprint::from_raw("-1,1;0,1;1,1"),
                    Fingerprint::from_raw("0,0;0,1;0,2"),
                ],
            }],
        };

        save_chains(&path, &file).unwrap();
        let loaded = load_chains(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, file);
    }

    #[test]
    fn test_persisted_shape() {
        let file = ChainFile {
            rule: Rule::CONWAY,
            chains: vec![ExportedChain {
                starter: Fingerprint::from_raw("0,0"),
                frames: vec![Fingerprint::from_raw("0,0"), Fingerprint::empty()],
            }],
        };
        let json = serde_json::to_string(&file).unwrap();
        assert_eq!(
            json,
            r#"{"rule":"B3/S23","chains":[{"starter":"0,0","frames":["0,0",""]}]}"#
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("lifeframe-store-does-not-exist.json");
        assert!(matches!(load_chains(&path), Err(LifeError::Io(_))));
    }

    #[test]
    fn test_corrupt_file_is_serialization_error() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "{ not json").unwrap();
        let result = load_chains(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(LifeError::Serialization(_))));
    }

    #[test]
    fn test_bad_rule_in_file_is_rejected() {
        let path = temp_path("bad-rule");
        std::fs::write(&path, r#"{"rule":"B0/S8","chains":[]}"#).unwrap();
        let result = load_chains(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(LifeError::Serialization(_))));
    }
}
