//! Core order types shared by every book implementation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the book an order belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Bid side: willing to pay at most the limit price
    Buy,
    /// Ask side: willing to accept at least the limit price
    Sell,
}

impl Side {
    /// Returns the side an order of this side matches against.
    pub fn opposite(&self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Engine-assigned order identifier.
///
/// Ids are handed out by the engine's atomic counter at submission time and
/// are unique for the lifetime of the engine.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct OrderId(pub u64);

impl OrderId {
    /// Create an order id from a raw value.
    pub fn from_u64(value: u64) -> Self {
        OrderId(value)
    }

    /// The raw numeric value of this id.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single execution against a counterparty order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fill {
    /// Id of the order on the other side of the trade
    pub counterparty: OrderId,
    /// Quantity exchanged in this fill
    pub quantity: u64,
}

/// Submission payload for a new order. The engine assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSpec {
    /// Buy or sell
    pub side: Side,
    /// Symbol the order applies to
    pub symbol: String,
    /// Limit price in integer ticks
    pub price: u64,
    /// Quantity to trade; must be positive
    pub quantity: u64,
    /// Client-supplied timestamp, the secondary priority key
    pub timestamp: u64,
}

/// A limit order admitted to the engine.
///
/// `quantity` is the quantity still open; it only ever decreases as fills
/// accumulate, and the sum of fill quantities plus the open quantity always
/// equals the quantity originally submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    symbol: String,
    side: Side,
    price: u64,
    quantity: u64,
    timestamp: u64,
    fills: Vec<Fill>,
}

impl Order {
    /// Create a new order with no fills.
    pub fn new(
        id: OrderId,
        symbol: impl Into<String>,
        side: Side,
        price: u64,
        quantity: u64,
        timestamp: u64,
    ) -> Self {
        Self {
            id,
            symbol: symbol.into(),
            side,
            price,
            quantity,
            timestamp,
            fills: Vec::new(),
        }
    }

    /// The engine-assigned id.
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// The symbol this order trades.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Buy or sell.
    pub fn side(&self) -> Side {
        self.side
    }

    /// Limit price in ticks.
    pub fn price(&self) -> u64 {
        self.price
    }

    /// Quantity still open.
    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Client-supplied priority timestamp.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Executions recorded against this order, in fill order.
    pub fn fills(&self) -> &[Fill] {
        &self.fills
    }

    /// Quantity traded so far.
    pub fn filled_quantity(&self) -> u64 {
        self.fills.iter().map(|fill| fill.quantity).sum()
    }

    /// Quantity submitted originally.
    pub fn submitted_quantity(&self) -> u64 {
        self.quantity + self.filled_quantity()
    }

    /// True once the whole submitted quantity has traded.
    pub fn is_filled(&self) -> bool {
        self.quantity == 0
    }

    /// Whether an opposite-side resting order at `opposite_price` is an
    /// acceptable counterparty. Equal prices cross.
    pub(crate) fn crosses(&self, opposite_price: u64) -> bool {
        match self.side {
            Side::Buy => opposite_price <= self.price,
            Side::Sell => opposite_price >= self.price,
        }
    }

    /// Record a fill of `quantity` against `counterparty`, reducing the open
    /// quantity. `quantity` must not exceed the open quantity.
    pub(crate) fn record_fill(&mut self, counterparty: OrderId, quantity: u64) {
        debug_assert!(quantity > 0 && quantity <= self.quantity);
        self.quantity -= quantity;
        self.fills.push(Fill {
            counterparty,
            quantity,
        });
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}@{} ts={}",
            self.id, self.side, self.symbol, self.quantity, self.price, self.timestamp
        )
    }
}
