use super::calculator::{self, RefillQuote};
use super::capacity::{CapacityTable, MachineConfig};
use super::denomination::Denomination;
use std::collections::VecDeque;
use tracing::{debug, info};

const MAX_MESSAGES: usize = 8;
pub const MAX_INPUT_LEN: usize = 8;

#[derive(Debug, Clone)]
pub struct FieldState {
    pub denomination: Denomination,
    pub capacity: u32,
    input: String,
}

impl FieldState {
    fn new(denomination: Denomination, capacity: u32) -> Self {
        Self {
            denomination,
            capacity,
            input: String::new(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Derived on every call; nothing computed is cached.
    pub fn quote(&self) -> Option<RefillQuote> {
        calculator::quote(&self.input, self.capacity, self.denomination)
    }

    fn capacity_reached(&self) -> bool {
        self.quote().is_some_and(|quote| quote.capacity_reached)
    }
}

#[derive(Debug, Clone)]
pub struct MachineForm {
    pub name: String,
    pub fields: Vec<FieldState>,
}

impl MachineForm {
    fn from_config(config: &MachineConfig) -> Self {
        Self {
            name: config.name.clone(),
            fields: config
                .slots
                .iter()
                .map(|slot| FieldState::new(slot.denomination, slot.capacity))
                .collect(),
        }
    }

    pub fn summary(&self) -> MachineSummary {
        let mut summary = MachineSummary::default();
        for field in &self.fields {
            if let Some(quote) = field.quote() {
                summary.entered += 1;
                summary.coins += u64::from(quote.refill);
                summary.value_cents +=
                    u64::from(quote.refill) * field.denomination.face_value_cents();
                if quote.capacity_reached {
                    summary.full += 1;
                }
            }
        }
        summary
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MachineSummary {
    pub entered: usize,
    pub full: usize,
    pub coins: u64,
    pub value_cents: u64,
}

/// Input state for every (machine, denomination) row of the form.
pub struct RefillForm {
    machines: Vec<MachineForm>,
    messages: VecDeque<String>,
}

impl RefillForm {
    pub fn new(table: &CapacityTable) -> Self {
        Self {
            machines: table.machines.iter().map(MachineForm::from_config).collect(),
            messages: VecDeque::with_capacity(MAX_MESSAGES),
        }
    }

    pub fn machines(&self) -> &[MachineForm] {
        &self.machines
    }

    #[cfg(test)]
    pub(crate) fn field(&self, machine: usize, row: usize) -> Option<&FieldState> {
        self.machines.get(machine)?.fields.get(row)
    }

    pub fn row_count(&self, machine: usize) -> usize {
        self.machines
            .get(machine)
            .map(|machine| machine.fields.len())
            .unwrap_or(0)
    }

    /// Appends a typed character. Only digits and a decimal point are taken;
    /// returns whether the input changed.
    pub fn push_char(&mut self, machine: usize, row: usize, ch: char) -> bool {
        if !(ch.is_ascii_digit() || ch == '.') {
            return false;
        }
        self.edit(machine, row, |input| {
            if input.len() >= MAX_INPUT_LEN {
                return false;
            }
            input.push(ch);
            true
        })
    }

    pub fn backspace(&mut self, machine: usize, row: usize) -> bool {
        self.edit(machine, row, |input| input.pop().is_some())
    }

    pub fn clear_field(&mut self, machine: usize, row: usize) -> bool {
        self.edit(machine, row, |input| {
            if input.is_empty() {
                return false;
            }
            input.clear();
            true
        })
    }

    #[cfg(test)]
    pub(crate) fn set_input(&mut self, machine: usize, row: usize, text: &str) -> bool {
        let text: String = text.chars().take(MAX_INPUT_LEN).collect();
        self.edit(machine, row, |input| {
            if *input == text {
                return false;
            }
            *input = text;
            true
        })
    }

    pub fn reset_machine(&mut self, machine: usize) {
        let Some(form) = self.machines.get_mut(machine) else {
            return;
        };
        for field in &mut form.fields {
            field.input.clear();
        }
        let name = form.name.clone();
        info!(machine = %name, "form reset");
        self.push_message(format!("{name}: all counts cleared."));
    }

    pub fn messages(&self) -> impl DoubleEndedIterator<Item = &String> {
        self.messages.iter()
    }

    pub fn add_message<S: Into<String>>(&mut self, message: S) {
        self.push_message(message.into());
    }

    fn edit(
        &mut self,
        machine: usize,
        row: usize,
        apply: impl FnOnce(&mut String) -> bool,
    ) -> bool {
        let Some(form) = self.machines.get_mut(machine) else {
            return false;
        };
        let Some(field) = form.fields.get_mut(row) else {
            return false;
        };

        let was_full = field.capacity_reached();
        if !apply(&mut field.input) {
            return false;
        }

        let quote = field.quote();
        debug!(
            machine = %form.name,
            denomination = %field.denomination,
            input = %field.input,
            refill = ?quote.map(|quote| quote.refill),
            "count updated"
        );

        let now_full = quote.is_some_and(|quote| quote.capacity_reached);
        if now_full && !was_full {
            let message = format!(
                "{} {}: capacity reached ({}/{}).",
                form.name,
                field.denomination,
                field.input,
                field.capacity
            );
            self.push_message(message);
        }
        true
    }

    fn push_message(&mut self, message: String) {
        if self.messages.len() >= MAX_MESSAGES {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }
}
