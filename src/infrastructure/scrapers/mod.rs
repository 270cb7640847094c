use crate::domain::Period;
use crate::error::Result;

pub(crate) mod markup;
pub(crate) mod matchup_list;
pub(crate) mod player_table;
pub(crate) mod sanitize;

pub trait PageExtractor {
    type Record;

    /// Records on one fetched page, stamped with `period`. `Ok(None)` means
    /// the page carries no data fragment at all.
    fn extract(&self, page: &str, period: Period) -> Result<Option<Vec<Self::Record>>>;
}
