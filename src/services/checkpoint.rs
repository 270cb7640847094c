use crate::domain::storage::{RecordTable, Storage};
use crate::domain::Period;
use crate::error::Result;
use std::sync::Arc;
use tracing::info;

pub struct CheckpointResolver {
    store: Arc<dyn Storage>,
}

impl CheckpointResolver {
    pub fn new(store: Arc<dyn Storage + 'static>) -> Self {
        Self { store }
    }

    /// Latest stored period, `None` when the table is empty.
    pub fn last_period(&self, table: RecordTable) -> Result<Option<Period>> {
        self.store.last_period(table)
    }

    /// First period not yet stored, or `None` when there is nothing to resume from.
    pub fn resume_from(&self, table: RecordTable, season_weeks: u32) -> Result<Option<Period>> {
        let resume = self
            .last_period(table)?
            .map(|last| last.next(season_weeks));

        match resume {
            Some(start) => info!("Resuming {} from {}", table.name(), start),
            None => info!("No stored {} yet", table.name()),
        }

        Ok(resume)
    }
}
