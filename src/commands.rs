use crate::config::{self, ConfigSource};
use crate::refill::calculator;
use crate::refill::capacity::CapacityTable;
use crate::refill::denomination::Denomination;
use crate::ui::machine_view::format_count;
use anyhow::Result;
use std::fmt::Write as _;
use std::path::Path;
use tracing::debug;

/// One form row, computed outside the interactive UI.
pub fn calc(
    table: &CapacityTable,
    machine: &str,
    denomination: Denomination,
    current: Option<&str>,
) -> Result<String> {
    let capacity = table.capacity(machine, denomination)?;
    let name = &table.machine(machine)?.name;
    let input = current.unwrap_or("");
    let quote = calculator::quote(input, capacity, denomination);
    debug!(machine = %name, %denomination, input, ?quote, "calc");

    let mut out = String::new();
    writeln!(
        out,
        "{name} {denomination} (capacity {capacity}, rolls of {})",
        denomination.rounding_step()
    )?;
    match quote {
        None => {
            writeln!(out, "current:   ")?;
            writeln!(out, "refill:    ")?;
            writeln!(out, "new total: ")?;
        }
        Some(quote) => {
            writeln!(out, "current:   {}", format_count(quote.current))?;
            if quote.capacity_reached {
                writeln!(out, "refill:    0 (capacity reached)")?;
            } else {
                writeln!(out, "refill:    {}", quote.refill)?;
            }
            writeln!(out, "new total: {}", format_count(quote.new_total))?;
        }
    }
    Ok(out)
}

pub fn table(table: &CapacityTable, source: &ConfigSource) -> Result<String> {
    let mut out = String::new();
    match source {
        ConfigSource::BuiltIn => writeln!(out, "Capacities (built-in)")?,
        ConfigSource::File(path) => writeln!(out, "Capacities ({})", path.display())?,
    }
    writeln!(out, "{:<8} {:<7} {:>8} {:>5}", "Machine", "Coin", "Max", "Roll")?;
    for machine in &table.machines {
        for slot in &machine.slots {
            writeln!(
                out,
                "{:<8} {:<7} {:>8} {:>5}",
                machine.name,
                slot.denomination.label(),
                slot.capacity,
                slot.denomination.rounding_step()
            )?;
        }
    }
    Ok(out)
}

pub fn init_config(output: &Path, force: bool) -> Result<()> {
    config::save_table(&CapacityTable::default(), output, force)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calc_reports_refill_and_total() {
        let out = calc(
            &CapacityTable::default(),
            "k12",
            Denomination::TenCents,
            Some("120"),
        )
        .expect("known row");
        assert!(out.starts_with("K12 10ct (capacity 1000, rolls of 100)"));
        assert!(out.contains("refill:    800\n"));
        assert!(out.contains("new total: 920\n"));
    }

    #[test]
    fn calc_flags_capacity_reached() {
        let out = calc(
            &CapacityTable::default(),
            "K11",
            Denomination::FiftyCents,
            Some("500"),
        )
        .expect("known row");
        assert!(out.contains("refill:    0 (capacity reached)"));
        assert!(out.contains("new total: 500"));
    }

    #[test]
    fn calc_without_current_leaves_fields_empty() {
        let out = calc(&CapacityTable::default(), "K11", Denomination::TwentyCents, None)
            .expect("known row");
        assert!(out.contains("refill:    \n"));
        assert!(out.contains("new total: \n"));
    }

    #[test]
    fn calc_rejects_unstocked_denomination() {
        let err = calc(&CapacityTable::default(), "K12", Denomination::TwentyCents, Some("1"))
            .expect_err("K12 has no 20ct tube");
        assert_eq!(err.to_string(), "machine K12 does not stock 20ct");
    }

    #[test]
    fn table_lists_every_slot() {
        let out = table(&CapacityTable::default(), &ConfigSource::BuiltIn).expect("render");
        assert_eq!(out.lines().count(), 2 + 7);
        assert!(out.contains("K12      2Euro        600    50"));
    }
}
