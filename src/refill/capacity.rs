use super::denomination::Denomination;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub denomination: Denomination,
    pub capacity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineConfig {
    pub name: String,
    pub slots: Vec<Slot>,
}

impl MachineConfig {
    pub fn capacity(&self, denomination: Denomination) -> Option<u32> {
        self.slots
            .iter()
            .find(|slot| slot.denomination == denomination)
            .map(|slot| slot.capacity)
    }
}

/// Maximum coin counts per machine and denomination. Built once at startup
/// and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityTable {
    pub machines: Vec<MachineConfig>,
}

impl Default for CapacityTable {
    fn default() -> Self {
        Self {
            machines: vec![
                machine(
                    "K11",
                    &[
                        (Denomination::TenCents, 770),
                        (Denomination::TwentyCents, 500),
                        (Denomination::FiftyCents, 400),
                        (Denomination::TwoEuro, 380),
                    ],
                ),
                machine(
                    "K12",
                    &[
                        (Denomination::TenCents, 1000),
                        (Denomination::FiftyCents, 500),
                        (Denomination::TwoEuro, 600),
                    ],
                ),
            ],
        }
    }
}

fn machine(name: &str, slots: &[(Denomination, u32)]) -> MachineConfig {
    MachineConfig {
        name: name.to_string(),
        slots: slots
            .iter()
            .map(|&(denomination, capacity)| Slot {
                denomination,
                capacity,
            })
            .collect(),
    }
}

impl CapacityTable {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.machines.is_empty() {
            return Err(ConfigError::NoMachines);
        }
        let mut names = HashSet::new();
        for machine in &self.machines {
            let name = machine.name.trim();
            if name.is_empty() {
                return Err(ConfigError::BlankMachineName);
            }
            if !names.insert(name.to_ascii_lowercase()) {
                return Err(ConfigError::DuplicateMachine(name.to_string()));
            }
            if machine.slots.is_empty() {
                return Err(ConfigError::NoSlots(name.to_string()));
            }
            let mut seen = HashSet::new();
            for slot in &machine.slots {
                if !seen.insert(slot.denomination) {
                    return Err(ConfigError::DuplicateDenomination {
                        machine: name.to_string(),
                        denomination: slot.denomination,
                    });
                }
                if slot.capacity == 0 {
                    return Err(ConfigError::ZeroCapacity {
                        machine: name.to_string(),
                        denomination: slot.denomination,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn machine(&self, name: &str) -> Result<&MachineConfig, UnknownMachine> {
        self.machines
            .iter()
            .find(|machine| machine.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| UnknownMachine(name.trim().to_string()))
    }

    pub fn capacity(&self, machine: &str, denomination: Denomination) -> Result<u32, LookupError> {
        let config = self.machine(machine)?;
        config
            .capacity(denomination)
            .ok_or_else(|| LookupError::NotStocked {
                machine: config.name.clone(),
                denomination,
            })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("capacity table lists no machines")]
    NoMachines,
    #[error("machine name must not be blank")]
    BlankMachineName,
    #[error("machine {0} is listed more than once")]
    DuplicateMachine(String),
    #[error("machine {0} has no denominations")]
    NoSlots(String),
    #[error("machine {machine} lists {denomination} more than once")]
    DuplicateDenomination {
        machine: String,
        denomination: Denomination,
    },
    #[error("machine {machine} has zero capacity for {denomination}")]
    ZeroCapacity {
        machine: String,
        denomination: Denomination,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown machine `{0}`")]
pub struct UnknownMachine(pub String);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error(transparent)]
    UnknownMachine(#[from] UnknownMachine),
    #[error("machine {machine} does not stock {denomination}")]
    NotStocked {
        machine: String,
        denomination: Denomination,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_matches_machine_labels() {
        let table = CapacityTable::default();
        assert!(table.validate().is_ok());
        assert_eq!(table.capacity("K11", Denomination::TenCents), Ok(770));
        assert_eq!(table.capacity("K11", Denomination::TwentyCents), Ok(500));
        assert_eq!(table.capacity("K11", Denomination::FiftyCents), Ok(400));
        assert_eq!(table.capacity("K11", Denomination::TwoEuro), Ok(380));
        assert_eq!(table.capacity("k12", Denomination::TenCents), Ok(1000));
        assert_eq!(table.capacity("K12", Denomination::FiftyCents), Ok(500));
        assert_eq!(table.capacity("K12", Denomination::TwoEuro), Ok(600));
    }

    #[test]
    fn k12_does_not_stock_twenty_cents() {
        let table = CapacityTable::default();
        assert_eq!(
            table.capacity("K12", Denomination::TwentyCents),
            Err(LookupError::NotStocked {
                machine: "K12".to_string(),
                denomination: Denomination::TwentyCents,
            })
        );
        assert!(matches!(
            table.capacity("K99", Denomination::TenCents),
            Err(LookupError::UnknownMachine(_))
        ));
    }

    #[test]
    fn validation_rejects_broken_tables() {
        let mut table = CapacityTable::default();
        table.machines[1].name = "k11".to_string();
        assert_eq!(
            table.validate(),
            Err(ConfigError::DuplicateMachine("k11".to_string()))
        );

        let mut table = CapacityTable::default();
        table.machines[0].slots[2].capacity = 0;
        assert!(matches!(
            table.validate(),
            Err(ConfigError::ZeroCapacity { .. })
        ));

        let mut table = CapacityTable::default();
        table.machines[0].slots[1].denomination = Denomination::TenCents;
        assert!(matches!(
            table.validate(),
            Err(ConfigError::DuplicateDenomination { .. })
        ));

        let table = CapacityTable { machines: vec![] };
        assert_eq!(table.validate(), Err(ConfigError::NoMachines));
    }
}
