mod load;
mod save;

pub use load::{ConfigSource, load_table};
pub use save::save_table;

pub const CONFIG_FILE: &str = "refill.ron";
