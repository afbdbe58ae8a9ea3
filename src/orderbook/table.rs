//! Table-based order book: each side is a two-level ordered map.
//!
//! The outer map is keyed by price and the inner map by
//! `(timestamp, order id)`, so the first inner entry is always the earliest
//! order at that price. The buy side reads its best level from the highest
//! outer key and the sell side from the lowest. All operations are
//! O(log P) in the number of distinct price levels.

use super::matching::{self, BookSide};
use super::order::{Order, OrderId, Side};
use super::snapshot::{DepthLevel, DepthSnapshot};
use crate::utils::current_time_millis;
use std::collections::BTreeMap;
use std::sync::Mutex;
use tracing::trace;

/// Orders resting at one price, earliest timestamp first. The id component
/// keeps same-timestamp orders distinct instead of overwriting them.
type PriceLevel = BTreeMap<(u64, OrderId), Order>;

/// One half of the book as a price-ordered table of levels.
pub(crate) struct TableSide {
    side: Side,
    levels: BTreeMap<u64, PriceLevel>,
}

impl TableSide {
    fn new(side: Side) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
        }
    }

    /// Price of the best level: highest for buys, lowest for sells.
    fn best_level_price(&self) -> Option<u64> {
        match self.side {
            Side::Buy => self.levels.last_key_value().map(|(price, _)| *price),
            Side::Sell => self.levels.first_key_value().map(|(price, _)| *price),
        }
    }

    /// Aggregate the top `depth` price levels, best first.
    fn depth(&self, depth: usize) -> Vec<DepthLevel> {
        let levels: Box<dyn Iterator<Item = (&u64, &PriceLevel)> + '_> = match self.side {
            Side::Buy => Box::new(self.levels.iter().rev()),
            Side::Sell => Box::new(self.levels.iter()),
        };
        levels
            .take(depth)
            .map(|(price, level)| DepthLevel {
                price: *price,
                quantity: level.values().map(Order::quantity).sum(),
            })
            .collect()
    }

    fn orders(&self) -> impl Iterator<Item = &Order> {
        self.levels.values().flat_map(|level| level.values())
    }
}

impl BookSide for TableSide {
    fn best_price(&self) -> Option<u64> {
        self.best_level_price()
    }

    fn pop_best(&mut self) -> Option<Order> {
        let price = self.best_level_price()?;
        let level = self.levels.get_mut(&price)?;
        let (_, order) = level.pop_first()?;
        if level.is_empty() {
            self.levels.remove(&price);
        }
        Some(order)
    }

    fn insert(&mut self, order: Order) {
        self.levels
            .entry(order.price())
            .or_default()
            .insert((order.timestamp(), order.id()), order);
    }
}

struct TableState {
    buys: TableSide,
    sells: TableSide,
    fulfilled: Vec<Order>,
}

/// Order book for a single symbol backed by nested ordered maps.
pub struct TableBook {
    symbol: String,
    state: Mutex<TableState>,
}

impl TableBook {
    /// Create an empty book for `symbol`.
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            state: Mutex::new(TableState {
                buys: TableSide::new(Side::Buy),
                sells: TableSide::new(Side::Sell),
                fulfilled: Vec::new(),
            }),
        }
    }

    /// The symbol this book trades.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Match `order` against the opposite side and rest any residual.
    pub fn process(&self, order: Order) {
        trace!("Order book {}: processing {}", self.symbol, order);
        let mut state = self.state.lock().unwrap();
        let state = &mut *state;
        matching::process_incoming(order, &mut state.buys, &mut state.sells, &mut state.fulfilled);
    }

    /// Best `depth` buy price levels with aggregated quantities.
    pub fn top_buy(&self, depth: usize) -> Vec<DepthLevel> {
        self.state.lock().unwrap().buys.depth(depth)
    }

    /// Best `depth` sell price levels with aggregated quantities.
    pub fn top_sell(&self, depth: usize) -> Vec<DepthLevel> {
        self.state.lock().unwrap().sells.depth(depth)
    }

    /// Snapshot both sides under a single lock acquisition.
    pub fn snapshot(&self, depth: usize) -> DepthSnapshot {
        let state = self.state.lock().unwrap();
        DepthSnapshot {
            symbol: self.symbol.clone(),
            timestamp: current_time_millis(),
            bids: state.buys.depth(depth),
            asks: state.sells.depth(depth),
        }
    }

    /// All orders currently resting on either side.
    pub fn resting_orders(&self) -> Vec<Order> {
        let state = self.state.lock().unwrap();
        state
            .buys
            .orders()
            .chain(state.sells.orders())
            .cloned()
            .collect()
    }

    /// Orders fully filled by this book, in completion order.
    pub fn fulfilled_orders(&self) -> Vec<Order> {
        self.state.lock().unwrap().fulfilled.clone()
    }
}
