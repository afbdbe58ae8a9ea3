//! Depth snapshots for market data.

use serde::{Deserialize, Serialize};

/// One price level of aggregated resting quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthLevel {
    /// Price of the level in ticks
    pub price: u64,
    /// Sum of resting order quantities at this price
    pub quantity: u64,
}

/// A snapshot of both sides of a book at a specific point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthSnapshot {
    /// The symbol this snapshot describes
    pub symbol: String,

    /// Timestamp when the snapshot was created (milliseconds since epoch)
    pub timestamp: u64,

    /// Buy price levels, highest price first
    pub bids: Vec<DepthLevel>,

    /// Sell price levels, lowest price first
    pub asks: Vec<DepthLevel>,
}

impl DepthSnapshot {
    /// Get the best bid price and quantity.
    pub fn best_bid(&self) -> Option<(u64, u64)> {
        self.bids.first().map(|level| (level.price, level.quantity))
    }

    /// Get the best ask price and quantity.
    pub fn best_ask(&self) -> Option<(u64, u64)> {
        self.asks.first().map(|level| (level.price, level.quantity))
    }

    /// Get the spread (best ask - best bid).
    pub fn spread(&self) -> Option<u64> {
        match (self.best_bid(), self.best_ask()) {
            (Some((bid_price, _)), Some((ask_price, _))) => {
                Some(ask_price.saturating_sub(bid_price))
            }
            _ => None,
        }
    }

    /// Get the mid price (average of best bid and best ask).
    pub fn mid_price(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some((bid_price, _)), Some((ask_price, _))) => {
                Some((bid_price as f64 + ask_price as f64) / 2.0)
            }
            _ => None,
        }
    }

    /// Total resting quantity across the bid levels included.
    pub fn total_bid_volume(&self) -> u64 {
        self.bids.iter().map(|level| level.quantity).sum()
    }

    /// Total resting quantity across the ask levels included.
    pub fn total_ask_volume(&self) -> u64 {
        self.asks.iter().map(|level| level.quantity).sum()
    }
}
