//! Terminal rendering and the interactive prompt.

use std::{
    fmt,
    sync::atomic::{AtomicBool, Ordering},
};

use citycast_core::{WeatherApp, WeatherRecord, WeatherView};
use inquire::{InquireError, Select, Text};

/// Prints results to stdout and alerts to stderr.
#[derive(Debug)]
pub struct TerminalView {
    skip_next_list: AtomicBool,
}

impl TerminalView {
    pub fn new() -> Self {
        Self { skip_next_list: AtomicBool::new(false) }
    }

    /// Don't print the list restored at startup.
    pub fn without_startup_list() -> Self {
        Self { skip_next_list: AtomicBool::new(true) }
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherView for TerminalView {
    fn render(&self, record: &WeatherRecord) {
        println!();
        println!("{}", record.city);
        println!("{}°C", record.temperature);
        println!("{}", record.description);
        println!("Wind Speed: {} km/h", record.wind_speed);
        println!();
    }

    fn render_recent(&self, records: &[WeatherRecord]) {
        if self.skip_next_list.swap(false, Ordering::Relaxed) {
            return;
        }

        if records.is_empty() {
            println!("No recent searches.");
            return;
        }

        println!("Recent searches:");
        for (i, record) in records.iter().enumerate() {
            println!("  {}. {}", i + 1, record.city);
        }
    }

    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }
}

#[derive(Debug, Clone)]
enum MenuItem {
    Search,
    Recent { index: usize, city: String },
    Quit,
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuItem::Search => f.write_str("Search a city"),
            MenuItem::Recent { city, .. } => write!(f, "Recent: {city}"),
            MenuItem::Quit => f.write_str("Quit"),
        }
    }
}

fn menu(app: &WeatherApp) -> Vec<MenuItem> {
    let mut items = vec![MenuItem::Search];
    items.extend(
        app.recent()
            .into_iter()
            .enumerate()
            .map(|(index, record)| MenuItem::Recent { index, city: record.city }),
    );
    items.push(MenuItem::Quit);
    items
}

fn is_cancel(err: &InquireError) -> bool {
    matches!(err, InquireError::OperationCanceled | InquireError::OperationInterrupted)
}

/// Menu loop: search by name, re-run a recent entry, or quit.
/// Esc on the city prompt returns to the menu; Esc or Ctrl-C on the menu quits.
pub async fn run_interactive(app: &WeatherApp) -> anyhow::Result<()> {
    loop {
        let choice = match Select::new("What next?", menu(app)).prompt() {
            Ok(choice) => choice,
            Err(err) if is_cancel(&err) => break,
            Err(err) => return Err(err.into()),
        };

        match choice {
            MenuItem::Search => {
                let input = match Text::new("City:").prompt() {
                    Ok(input) => input,
                    Err(err) if is_cancel(&err) => continue,
                    Err(err) => return Err(err.into()),
                };
                app.search(&input).await;
            }
            MenuItem::Recent { index, city } => {
                println!("City: {city}");
                app.search_recent(index).await;
            }
            MenuItem::Quit => break,
        }
    }

    Ok(())
}
