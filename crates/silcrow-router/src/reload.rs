//! Hot-swappable route table
//!
//! Readers take a snapshot with [`SharedRouteTable::load`] and keep matching against it
//! even while a reload publishes a newer table.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::RouterConfig;
use crate::table::{RouteDeclaration, RouteTable};
use crate::RouteError;

/// A [`RouteTable`] that can be replaced atomically while in use
pub struct SharedRouteTable<H> {
    current: ArcSwap<RouteTable<H>>,
}

impl<H> SharedRouteTable<H> {
    pub fn new(table: RouteTable<H>) -> Self {
        Self {
            current: ArcSwap::from_pointee(table),
        }
    }

    /// The current table; stays valid across later swaps
    pub fn load(&self) -> Arc<RouteTable<H>> {
        self.current.load_full()
    }

    /// Publishes an already built table
    pub fn store(&self, table: RouteTable<H>) {
        self.current.store(Arc::new(table));
        tracing::debug!("Route table swapped");
    }

    /// Rebuilds from `declarations` and publishes the result
    ///
    /// On failure the previous table stays in place and the error is returned.
    pub fn reload<I>(&self, declarations: I, config: &RouterConfig) -> Result<Arc<RouteTable<H>>, RouteError>
    where
        I: IntoIterator<Item = RouteDeclaration<H>>,
    {
        match RouteTable::build_with_config(declarations, config) {
            Ok(table) => {
                let table = Arc::new(table);
                self.current.store(Arc::clone(&table));
                tracing::debug!("Route table reloaded with {} routes", table.len());
                Ok(table)
            }
            Err(err) => {
                tracing::error!("Route reload rejected, keeping previous table: {}", err);
                Err(err)
            }
        }
    }
}

impl<H> From<RouteTable<H>> for SharedRouteTable<H> {
    fn from(table: RouteTable<H>) -> Self {
        Self::new(table)
    }
}
