use super::kv::KeyValueStore;
use crate::error::{DrinkError, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory key-value store for testing.
///
/// Uses `RefCell` for interior mutability since everything runs on a single
/// thread, which lets the trait take `&self` everywhere.
#[derive(Default)]
pub struct MemKeyValueStore {
    entries: RefCell<HashMap<String, String>>,
    simulate_read_error: Cell<bool>,
    simulate_write_error: Cell<bool>,
    reads: Cell<usize>,
    writes: Cell<usize>,
}

impl MemKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable read error simulation for testing error handling.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.set(simulate);
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Raw value under `key`, bypassing counters and error simulation.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Store a raw value, bypassing counters and error simulation.
    pub fn put_raw(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl KeyValueStore for MemKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.reads.set(self.reads.get() + 1);
        if self.simulate_read_error.get() {
            return Err(DrinkError::Store("Simulated read error".to_string()));
        }
        Ok(self.entries.borrow().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.writes.set(self.writes.get() + 1);
        if self.simulate_write_error.get() {
            return Err(DrinkError::Store("Simulated write error".to_string()));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
