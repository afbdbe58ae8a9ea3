//! Heap-based order book: each side is a priority queue of orders.
//!
//! A rank wrapper folds price and timestamp into price-time priority, so the
//! heap top is always the best order: highest price for buys, lowest for
//! sells, earlier timestamps winning ties. Depth queries pop the top of the
//! heap into a scratch buffer and push everything back afterwards; under the
//! book lock this is safe, at O(k log N) for k orders read.

use super::matching::{self, BookSide};
use super::order::{Order, Side};
use super::snapshot::{DepthLevel, DepthSnapshot};
use crate::utils::current_time_millis;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::Mutex;
use tracing::trace;

/// Max-heap wrapper: the greatest `Ranked` is the best order of its side.
struct Ranked(Order);

impl Ranked {
    fn priority_key(&self) -> (u64, std::cmp::Reverse<u64>, std::cmp::Reverse<u64>) {
        let price = match self.0.side() {
            // Buys want high prices on top; sells want low prices, so their
            // price component is flipped before comparison.
            Side::Buy => self.0.price(),
            Side::Sell => u64::MAX - self.0.price(),
        };
        (
            price,
            std::cmp::Reverse(self.0.timestamp()),
            std::cmp::Reverse(self.0.id().value()),
        )
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority_key().cmp(&other.priority_key())
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

/// One half of the book as a priority queue.
pub(crate) struct HeapSide {
    heap: BinaryHeap<Ranked>,
}

impl HeapSide {
    fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    /// Aggregate the top `depth` price levels, best first.
    ///
    /// Pops until `depth` distinct prices have been drained (finishing the
    /// last level so its quantity is complete), then restores the heap.
    fn depth(&mut self, depth: usize) -> Vec<DepthLevel> {
        let mut levels: Vec<DepthLevel> = Vec::new();
        let mut scratch = Vec::new();

        while let Some(price) = self.heap.peek().map(|ranked| ranked.0.price()) {
            let last_matches = matches!(levels.last(), Some(level) if level.price == price);
            if !last_matches {
                if levels.len() == depth {
                    break;
                }
                levels.push(DepthLevel { price, quantity: 0 });
            }
            let ranked = match self.heap.pop() {
                Some(ranked) => ranked,
                None => break,
            };
            if let Some(level) = levels.last_mut() {
                level.quantity += ranked.0.quantity();
            }
            scratch.push(ranked);
        }

        for ranked in scratch {
            self.heap.push(ranked);
        }
        levels
    }

    fn orders(&self) -> impl Iterator<Item = &Order> {
        self.heap.iter().map(|ranked| &ranked.0)
    }
}

impl BookSide for HeapSide {
    fn best_price(&self) -> Option<u64> {
        self.heap.peek().map(|ranked| ranked.0.price())
    }

    fn pop_best(&mut self) -> Option<Order> {
        self.heap.pop().map(|ranked| ranked.0)
    }

    fn insert(&mut self, order: Order) {
        self.heap.push(Ranked(order));
    }
}

struct HeapState {
    buys: HeapSide,
    sells: HeapSide,
    fulfilled: Vec<Order>,
}

/// Order book for a single symbol backed by two priority queues.
pub struct HeapBook {
    symbol: String,
    state: Mutex<HeapState>,
}

impl HeapBook {
    /// Create an empty book for `symbol`.
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            state: Mutex::new(HeapState {
                buys: HeapSide::new(),
                sells: HeapSide::new(),
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
        let mut state = self.state.lock().unwrap();
        let bids = state.buys.depth(depth);
        let asks = state.sells.depth(depth);
        DepthSnapshot {
            symbol: self.symbol.clone(),
            timestamp: current_time_millis(),
            bids,
            asks,
        }
    }

    /// All orders currently resting on either side, in heap order.
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
