#[derive(Debug, Default)]
pub struct App {
    focused_machine: usize,
    selected_rows: Vec<usize>,
}

impl App {
    pub fn new(machine_count: usize) -> Self {
        Self {
            focused_machine: 0,
            selected_rows: vec![0; machine_count],
        }
    }

    pub fn focused_machine(&self) -> usize {
        self.focused_machine
    }

    pub fn is_focused(&self, machine: usize) -> bool {
        self.focused_machine == machine
    }

    pub fn next_focus(&mut self) {
        let len = self.selected_rows.len();
        if len > 0 {
            self.focused_machine = (self.focused_machine + 1) % len;
        }
    }

    pub fn previous_focus(&mut self) {
        let len = self.selected_rows.len();
        if len > 0 {
            self.focused_machine = (self.focused_machine + len - 1) % len;
        }
    }

    pub fn selected_row(&self, machine: usize) -> usize {
        self.selected_rows.get(machine).copied().unwrap_or(0)
    }

    /// Moves the focused machine's row cursor, wrapping at either end.
    pub fn move_selection(&mut self, delta: isize, row_count: usize) {
        let Some(selected) = self.selected_rows.get_mut(self.focused_machine) else {
            return;
        };
        if row_count == 0 {
            *selected = 0;
            return;
        }
        let mut idx = *selected as isize + delta;
        if idx < 0 {
            idx = row_count as isize - 1;
        } else if idx >= row_count as isize {
            idx = 0;
        }
        *selected = idx as usize;
    }
}
