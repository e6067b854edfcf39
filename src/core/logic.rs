use crate::core::aggregate::{PayParams, PaySummary, Report, group_by_day};
use crate::core::filter::Filter;
use crate::db::store::TimeCardStore;
use crate::errors::AppResult;

/// Read side of the application: every view reloads from the store.
pub struct Core;

impl Core {
    pub fn load_report<S: TimeCardStore>(
        store: &S,
        filter: Filter,
        pay: PayParams,
    ) -> AppResult<Report> {
        let all = store.fetch_all()?;
        Ok(Report::build(&all, filter, pay))
    }

    /// Totals over every valid stored card.
    pub fn earnings<S: TimeCardStore>(store: &S, pay: PayParams) -> AppResult<PaySummary> {
        let all = store.fetch_all()?;
        Ok(pay.summary(group_by_day(&all).total_hours))
    }
}
