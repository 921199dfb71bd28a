use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Local, TimeZone, Utc};
use prettytable::{Cell, Row, Table};
use uuid::Uuid;

use crate::countdown::{parse_code, Countdown};
use crate::model::TimerStore;

const LABEL_WIDTH: usize = 28;

// the shared notion of "current time", in milliseconds since the epoch
fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn add_timer(store: &mut TimerStore, label: &str, duration_ms: i64) -> Result<()> {
    store.add(label, duration_ms, now_ms())?;
    println!(
        "{}. {} ({})",
        store.timers().len(),
        label,
        Countdown::from_remaining(duration_ms)
    );
    return Ok(());
}

// An edit is all-or-nothing: an empty label, a code that does not parse or
// a stale position leaves everything untouched, silently.
pub fn edit_timer(store: &mut TimerStore, position: usize, label: &str, code: &str) -> Result<()> {
    let id = match id_at(store, position) {
        Some(id) => id,
        None => return Ok(()),
    };

    let duration_ms = parse_code(code).ok();
    if store.update(id, label, duration_ms, now_ms())? {
        println!(
            "{}. {} ({})",
            position,
            label,
            Countdown::from_remaining(duration_ms.unwrap_or(0))
        );
    }
    Ok(())
}

pub fn remove_timer(store: &mut TimerStore, position: usize) -> Result<()> {
    if let Some(id) = id_at(store, position) {
        store.remove(id)?;
    }
    Ok(())
}

pub fn list(store: &TimerStore) -> Result<()> {
    if store.timers().is_empty() {
        println!("No timers yet! use 'cuenta add' to start one.");
        return Ok(());
    }

    render_table(store, now_ms()).printstd();
    Ok(())
}

/// Keep the table on screen, redrawn once per second until Ctrl-C. Done
/// timers stay visible in their terminal state.
pub fn watch(store: &TimerStore) -> Result<()> {
    if store.timers().is_empty() {
        println!("No timers yet! use 'cuenta add' to start one.");
        return Ok(());
    }

    let running = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&running);
    ctrlc::set_handler(move || flag.store(false, Ordering::SeqCst))
        .context("Failed to set the Ctrl-C handler.")?;

    while running.load(Ordering::SeqCst) {
        // clear and home, then redraw the whole view
        print!("\x1B[2J\x1B[1;1H");
        println!("{} timer(s). ctrl-c to leave.", store.timers().len());
        render_table(store, now_ms()).printstd();
        io::stdout().flush().context("Failed to flush the display.")?;

        thread::sleep(Duration::from_millis(1000));
    }

    println!();
    Ok(())
}

// One row per timer: position, label, remaining, ends-at. Done timers get
// the red terminal marker instead of a breakdown.
fn render_table(store: &TimerStore, now_ms: i64) -> Table {
    let mut table = Table::new();
    table.add_row(row!["#", "timer", "remaining", "ends at"]);

    for (index, timer) in store.timers().iter().enumerate() {
        let countdown = Countdown::at(timer.end_time, now_ms);
        let remaining = if countdown.is_done() {
            Cell::new("DONE").style_spec("Fr")
        } else {
            Cell::new(&countdown.to_string())
        };

        table.add_row(Row::new(vec![
            Cell::new(&(index + 1).to_string()),
            Cell::new(&textwrap::fill(&timer.label, LABEL_WIDTH)),
            remaining,
            Cell::new(&fmt_end_time(timer.end_time)),
        ]));
    }

    table
}

// local wall-clock rendering of an absolute end time
fn fmt_end_time(end_time_ms: i64) -> String {
    match Local.timestamp_millis_opt(end_time_ms).single() {
        Some(end) => end.format("%Y-%m-%d %T").to_string(),
        None => "-".to_string(),
    }
}

// resolve a 1-based list position to the stored id
fn id_at(store: &TimerStore, position: usize) -> Option<Uuid> {
    store.timers().get(position.checked_sub(1)?).map(|t| t.id)
}
