use crate::refill::capacity::CapacityTable;
use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::CONFIG_FILE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    BuiltIn,
    File(PathBuf),
}

/// Loads the capacity table. Without an explicit path a missing
/// `refill.ron` falls back to the built-in table; an explicit path must exist.
pub fn load_table(explicit: Option<&Path>) -> Result<(CapacityTable, ConfigSource)> {
    let path = explicit.unwrap_or_else(|| Path::new(CONFIG_FILE));
    match fs::read_to_string(path) {
        Ok(content) => {
            let table = parse_table(&content)
                .with_context(|| format!("invalid capacity table in {}", path.display()))?;
            info!(path = %path.display(), machines = table.machines.len(), "loaded capacity table");
            Ok((table, ConfigSource::File(path.to_path_buf())))
        }
        Err(err) if err.kind() == ErrorKind::NotFound && explicit.is_none() => {
            debug!(path = %path.display(), "no config file, using built-in capacities");
            Ok((CapacityTable::default(), ConfigSource::BuiltIn))
        }
        Err(err) => {
            Err(err).with_context(|| format!("failed to read config {}", path.display()))
        }
    }
}

pub(crate) fn parse_table(content: &str) -> Result<CapacityTable> {
    let table: CapacityTable = ron::from_str(content)?;
    table.validate()?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refill::capacity::ConfigError;
    use crate::refill::denomination::Denomination;

    #[test]
    fn parses_hand_written_table() {
        let content = r#"(
            machines: [
                (name: "P1", slots: [
                    (denomination: TwentyCents, capacity: 300),
                    (denomination: TwoEuro, capacity: 150),
                ]),
            ],
        )"#;
        let table = parse_table(content).expect("valid table");
        assert_eq!(table.capacity("P1", Denomination::TwoEuro), Ok(150));
    }

    #[test]
    fn rejects_zero_capacity() {
        let content = r#"(machines: [(name: "P1", slots: [(denomination: TenCents, capacity: 0)])])"#;
        let err = parse_table(content).expect_err("zero capacity");
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::ZeroCapacity { .. })
        ));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("coin-refill-does-not-exist.ron");
        assert!(load_table(Some(&path)).is_err());
    }
}
