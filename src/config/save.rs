use crate::refill::capacity::CapacityTable;
use anyhow::{Result, bail};
use ron::ser::PrettyConfig;
use std::fs;
use std::path::Path;
use tracing::info;

pub fn render_table(table: &CapacityTable) -> Result<String> {
    let pretty = PrettyConfig::new();
    Ok(ron::ser::to_string_pretty(table, pretty)?)
}

pub fn save_table(table: &CapacityTable, path: &Path, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    fs::write(path, render_table(table)?)?;
    info!(path = %path.display(), "wrote capacity table");
    Ok(())
}
