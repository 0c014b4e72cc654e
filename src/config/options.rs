// src/config/options.rs
use std::path::PathBuf;

use super::consts::WORKERS;
use crate::specs::DatasetKind;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StateSelector {
    All,
    /// Names or codes, resolved against the registry at run start.
    Named(Vec<String>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub dataset: DatasetKind,
    pub states: StateSelector,
    pub workers: usize,
    /// Also write the CSV to this local path.
    pub out: Option<PathBuf>,
    /// Upload + trigger after harvesting. Off for dry runs.
    pub publish: bool,
    pub list_states: bool,
}

impl RunOptions {
    pub fn new() -> Self {
        Self {
            dataset: DatasetKind::WaterLevel,
            states: StateSelector::All,
            workers: WORKERS,
            out: None,
            publish: true,
            list_states: false,
        }
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self::new()
    }
}
