#[macro_use] extern crate prettytable;

use structopt::StructOpt;
use anyhow::anyhow;
use std::path::PathBuf;
use directories::ProjectDirs;

mod cli;
mod countdown;
mod interface;
mod model;
mod storage;

use crate::model::TimerStore;
use crate::storage::FileStore;

use cli::{Command::*, CommandLineArgs};

fn find_default_store_file() -> Option<PathBuf> {
    if let Some(base_dirs) = ProjectDirs::from("com", "gozque", "cuenta") {
        let root_dir = base_dirs.data_dir();
        if !root_dir.exists() {
            std::fs::create_dir_all(root_dir).expect("Failed to create directory.");
        }
        let mut path = PathBuf::from(root_dir);
        path.push("timers.json");
        Some(path)
    } else {
        None
    }
}

fn main() -> anyhow::Result<()> {
    // Get the command-line arguments.
    let CommandLineArgs { action, store_file } = CommandLineArgs::from_args();

    // Unpack the store file.
    let store_file = store_file
        .or_else(find_default_store_file)
        .ok_or(anyhow!("Failed to find a store file."))?;

    // The slot never fails a startup: missing or corrupt data is an empty
    // collection.
    let mut store = TimerStore::load(Box::new(FileStore::new(store_file)));

    // Perform the action.
    match action {
        Add { label, time } => interface::add_timer(&mut store, &label, time),
        Edit {
            position,
            label,
            time,
        } => interface::edit_timer(&mut store, position, &label, &time),
        Rm { position } => interface::remove_timer(&mut store, position),
        List => interface::list(&store),
        Watch => interface::watch(&store),
    }?;
    Ok(())
}
