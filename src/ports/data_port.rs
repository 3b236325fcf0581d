//! Market data port trait.

use crate::domain::error::AppError;
use crate::domain::ohlcv::Bar;
use std::collections::{BTreeMap, BTreeSet};

pub trait MarketDataPort {
    /// Daily bars for each requested symbol covering the trailing `months`.
    ///
    /// Every requested symbol appears in the result; a symbol the provider
    /// knows nothing about maps to an empty series. An `Err` means the
    /// provider itself failed.
    fn get_historical_data(
        &self,
        symbols: &BTreeSet<String>,
        months: u32,
    ) -> Result<BTreeMap<String, Vec<Bar>>, AppError>;
}
