mod app;
mod commands;
mod config;
mod logging;
mod refill;
mod ui;

use anyhow::Result;
use app::App;
use clap::{Parser, Subcommand};
use config::{CONFIG_FILE, ConfigSource};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use logging::LogTarget;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use refill::denomination::Denomination;
use refill::form::RefillForm;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task;
use tracing::info;

/// Works out how many coins to load into each tube of a coin machine.
#[derive(Parser)]
#[command(name = "coin-refill")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Capacity table (RON). Defaults to ./refill.ron, then built-in values.
    #[arg(short, long, global = true, env = "REFILL_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Write logs to this file (the interactive form logs nowhere otherwise)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the refill for a single tube
    Calc {
        /// Machine name, e.g. K11
        #[arg(short, long)]
        machine: String,

        /// Coin type: 10ct, 20ct, 50ct or 2Euro
        #[arg(short, long)]
        denomination: Denomination,

        /// Coins currently in the tube; omit when unknown
        current: Option<String>,
    },

    /// Print the active capacity table
    Table,

    /// Write the built-in capacity table as a starting config
    InitConfig {
        #[arg(short, long, default_value = CONFIG_FILE)]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let target = match (&cli.log_file, &cli.command) {
        (Some(path), _) => LogTarget::File(path),
        (None, Some(_)) => LogTarget::Stderr,
        (None, None) => LogTarget::Silent,
    };
    logging::init(cli.verbose, target)?;

    match cli.command {
        Some(Commands::Calc {
            machine,
            denomination,
            current,
        }) => {
            let (table, _) = config::load_table(cli.config.as_deref())?;
            print!(
                "{}",
                commands::calc(&table, &machine, denomination, current.as_deref())?
            );
            Ok(())
        }
        Some(Commands::Table) => {
            let (table, source) = config::load_table(cli.config.as_deref())?;
            print!("{}", commands::table(&table, &source)?);
            Ok(())
        }
        Some(Commands::InitConfig { output, force }) => commands::init_config(&output, force),
        None => {
            let (table, source) = config::load_table(cli.config.as_deref())?;
            let mut form = RefillForm::new(&table);
            form.add_message(format!("Loaded {} machines.", table.machines.len()));

            let mut terminal = setup_terminal()?;
            let result = run(&mut terminal, &mut form, &source).await;
            restore_terminal(&mut terminal)?;
            result
        }
    }
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    form: &mut RefillForm,
    source: &ConfigSource,
) -> Result<()> {
    let mut app = App::new(form.machines().len());

    let (input_tx, mut input_rx) = mpsc::unbounded_channel();
    let reader = task::spawn_blocking(move || forward_input(&input_tx, read_terminal_event));

    let redraw_rate = Duration::from_millis(250);
    info!("form started");

    loop {
        terminal.draw(|f| ui::render(f, &app, form, source))?;

        tokio::select! {
            event = input_rx.recv() => {
                match event {
                    Some(event) => {
                        if handle_event(event, &mut app, form) {
                            break;
                        }
                    }
                    None => break,
                }
            }
            _ = tokio::time::sleep(redraw_rate) => {}
        }
    }

    // The reader notices the closed channel on its next poll timeout.
    drop(input_rx);
    reader.await?;
    info!("form closed");
    Ok(())
}

const INPUT_POLL: Duration = Duration::from_millis(100);

/// Pumps terminal events into the form loop until the loop hangs up.
fn forward_input<F>(input_tx: &mpsc::UnboundedSender<Event>, mut next_event: F)
where
    F: FnMut(Duration) -> io::Result<Option<Event>>,
{
    while !input_tx.is_closed() {
        match next_event(INPUT_POLL) {
            Ok(Some(event)) => {
                if input_tx.send(event).is_err() {
                    break;
                }
            }
            Ok(None) => {}
            Err(_) => break,
        }
    }
}

fn read_terminal_event(timeout: Duration) -> io::Result<Option<Event>> {
    if crossterm::event::poll(timeout)? {
        crossterm::event::read().map(Some)
    } else {
        Ok(None)
    }
}

fn handle_event(event: Event, app: &mut App, form: &mut RefillForm) -> bool {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key_event(key, app, form),
        _ => false,
    }
}

fn handle_key_event(key: KeyEvent, app: &mut App, form: &mut RefillForm) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    let machine = app.focused_machine();
    let row = app.selected_row(machine);

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => {
            app.next_focus()
        }
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => {
            app.previous_focus()
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => {
            app.move_selection(-1, form.row_count(machine))
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Enter => {
            app.move_selection(1, form.row_count(machine))
        }
        KeyCode::Backspace => {
            form.backspace(machine, row);
        }
        KeyCode::Delete | KeyCode::Char('c') | KeyCode::Char('C') => {
            form.clear_field(machine, row);
        }
        KeyCode::Char('r') | KeyCode::Char('R') => form.reset_machine(machine),
        KeyCode::Char(ch) => {
            form.push_char(machine, row, ch);
        }
        _ => {}
    }
    false
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
