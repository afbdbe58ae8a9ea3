//! Variant dispatch over the two book implementations.

use super::heap::HeapBook;
use super::order::Order;
use super::snapshot::{DepthLevel, DepthSnapshot};
use super::table::TableBook;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which book implementation to create for each symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookType {
    /// Priority queues of orders per side
    Heap,
    /// Nested ordered maps of price levels per side
    Table,
}

impl fmt::Display for BookType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookType::Heap => write!(f, "heap"),
            BookType::Table => write!(f, "table"),
        }
    }
}

/// A single-symbol order book of either implementation.
///
/// Both variants provide the same contract: `process` serializes matching
/// behind the book's own lock, and the depth queries aggregate resting
/// quantity by price level, best level first.
pub enum Book {
    /// Priority-queue backed book
    Heap(HeapBook),
    /// Ordered-map backed book
    Table(TableBook),
}

impl Book {
    /// Create an empty book of the requested type.
    pub fn new(book_type: BookType, symbol: &str) -> Self {
        match book_type {
            BookType::Heap => Book::Heap(HeapBook::new(symbol)),
            BookType::Table => Book::Table(TableBook::new(symbol)),
        }
    }

    /// The symbol this book trades.
    pub fn symbol(&self) -> &str {
        match self {
            Book::Heap(book) => book.symbol(),
            Book::Table(book) => book.symbol(),
        }
    }

    /// The implementation backing this book.
    pub fn book_type(&self) -> BookType {
        match self {
            Book::Heap(_) => BookType::Heap,
            Book::Table(_) => BookType::Table,
        }
    }

    /// Match `order` against the opposite side and rest any residual.
    pub fn process(&self, order: Order) {
        match self {
            Book::Heap(book) => book.process(order),
            Book::Table(book) => book.process(order),
        }
    }

    /// Best `depth` buy price levels, best first.
    pub fn top_buy(&self, depth: usize) -> Vec<DepthLevel> {
        match self {
            Book::Heap(book) => book.top_buy(depth),
            Book::Table(book) => book.top_buy(depth),
        }
    }

    /// Best `depth` sell price levels, best first.
    pub fn top_sell(&self, depth: usize) -> Vec<DepthLevel> {
        match self {
            Book::Heap(book) => book.top_sell(depth),
            Book::Table(book) => book.top_sell(depth),
        }
    }

    /// Consistent two-sided snapshot to the requested depth.
    pub fn snapshot(&self, depth: usize) -> DepthSnapshot {
        match self {
            Book::Heap(book) => book.snapshot(depth),
            Book::Table(book) => book.snapshot(depth),
        }
    }

    /// All orders currently resting on either side.
    pub fn resting_orders(&self) -> Vec<Order> {
        match self {
            Book::Heap(book) => book.resting_orders(),
            Book::Table(book) => book.resting_orders(),
        }
    }

    /// Orders fully filled by this book, in completion order.
    pub fn fulfilled_orders(&self) -> Vec<Order> {
        match self {
            Book::Heap(book) => book.fulfilled_orders(),
            Book::Table(book) => book.fulfilled_orders(),
        }
    }
}
