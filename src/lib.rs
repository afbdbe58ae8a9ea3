//! # Multi-Symbol Limit Order Matching Engine
//!
//! An in-memory limit-order matching engine for a fixed universe of symbols.
//! Each symbol gets its own two-sided book with strict price-time priority;
//! incoming limit orders are matched greedily against the opposite side and
//! any residual quantity rests on the book. Producers submit orders
//! asynchronously and a fixed pool of worker threads drains them through a
//! shared queue into the per-symbol books.
//!
//! ## Key Features
//!
//! - **Two interchangeable book implementations**: a table book built from
//!   nested ordered maps of price levels, and a heap book built from
//!   priority queues of orders. Both expose the same contract: process an
//!   incoming order, and report the best N price levels with aggregated
//!   quantity.
//!
//! - **Deterministic price-time priority**: better-priced orders always fill
//!   first; ties go to the earlier client timestamp. Prices are integer tick
//!   counts, so ordering is total and exact equality crosses.
//!
//! - **Asynchronous ingest**: [`Engine::add_order`] assigns a monotonic order
//!   id and enqueues without blocking on matching. Orders for different
//!   symbols are processed in parallel; each book serializes its own
//!   matching and depth queries behind its own lock.
//!
//! - **Complete fill audit**: every order carries the append-only list of
//!   `(counterparty, quantity)` fills recorded against it, and fully filled
//!   orders are archived per book.
//!
//! - **Drained shutdown**: [`Engine::shutdown`] (also run on drop) stops
//!   ingestion, processes everything still queued, and joins the workers.
//!
//! ## Example
//!
//! ```
//! use matching_engine_rs::{BookType, Engine, OrderSpec, Side};
//!
//! let mut engine = Engine::new(4);
//! engine.set_up(BookType::Table, ["GOOG", "MSFT"]);
//!
//! engine.add_order(OrderSpec {
//!     side: Side::Sell,
//!     symbol: "GOOG".to_string(),
//!     price: 1000,
//!     quantity: 10,
//!     timestamp: 1,
//! }).unwrap();
//! engine.add_order(OrderSpec {
//!     side: Side::Buy,
//!     symbol: "GOOG".to_string(),
//!     price: 1000,
//!     quantity: 4,
//!     timestamp: 2,
//! }).unwrap();
//!
//! engine.shutdown();
//! let depth = engine.top_sell("GOOG", 1).unwrap();
//! assert_eq!(depth[0].quantity, 6);
//! ```
//!
//! ## Scope
//!
//! The engine keeps no durable state and speaks no wire protocol. There is no
//! cancellation or amendment, no market or stop orders, and no backpressure
//! on the pending queue; the supported use case is a fixed symbol universe
//! configured once at start-up.

mod engine;
mod orderbook;
mod utils;

pub use engine::error::EngineError;
pub use engine::Engine;
pub use orderbook::{
    Book, BookType, DepthLevel, DepthSnapshot, Fill, HeapBook, Order, OrderId, OrderSpec, Side,
    TableBook,
};
pub use utils::{current_time_millis, setup_logger};
