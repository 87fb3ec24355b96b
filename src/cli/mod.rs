//! Command-line front end
//!
//! Each command group opens the store it needs on top of file storage,
//! dispatches one action and prints the result.

pub mod init;
pub mod onboarding;
pub mod progress;
pub mod student;

use crate::clock::{Clock, SystemClock};
use crate::state::{Reducer, Store};
use crate::storage::JsonFileStorage;
use crate::{Context, Result};
use serde::Serialize;
use std::path::Path;
use std::rc::Rc;

/// Open a store backed by JSON files in `storage_dir`
pub fn open_store<S: Reducer>(storage_dir: &Path) -> Result<Store<S>> {
    open_store_with_clock(storage_dir, Rc::new(SystemClock))
}

pub fn open_store_with_clock<S: Reducer>(storage_dir: &Path, clock: Rc<dyn Clock>) -> Result<Store<S>> {
    Store::open(JsonFileStorage::new(storage_dir), clock)
        .with_context(|| format!("Failed to open {} in {}", S::STORAGE_KEY, storage_dir.display()))
}

/// Print a value as pretty JSON
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
