//! Ingest dispatcher: a shared pending queue drained by a fixed worker pool.
//!
//! Producers call [`Engine::add_order`], which assigns a monotonic order id,
//! enqueues the order, and wakes one worker. Each worker dequeues one order
//! at a time, routes it to the owning symbol's book, and lets the book match
//! it. Orders for different symbols are processed in parallel; orders for the
//! same symbol are serialized by the book's own lock. Priority is defined by
//! the client-supplied timestamp, not by which worker dequeues first.

pub mod error;

use crate::orderbook::{Book, BookType, DepthLevel, DepthSnapshot, Order, OrderId, OrderSpec};
use dashmap::DashMap;
use error::EngineError;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use tracing::{debug, error, trace};

struct QueueState {
    pending: VecDeque<Order>,
    shutdown: bool,
}

struct Shared {
    queue: Mutex<QueueState>,
    available: Condvar,
    /// Populated by `set_up`, read-only while ingest runs.
    books: DashMap<String, Book>,
    next_order_id: AtomicU64,
}

/// Multi-symbol matching engine.
///
/// Construction spawns the worker pool; [`Engine::set_up`] creates one book
/// per symbol; [`Engine::shutdown`] (or drop) drains the pending queue and
/// joins the workers, so every admitted order ends up resting or fulfilled.
pub struct Engine {
    shared: Arc<Shared>,
    workers: Vec<JoinHandle<()>>,
}

impl Engine {
    /// Create an engine with `worker_count` dispatcher threads.
    pub fn new(worker_count: usize) -> Self {
        let shared = Arc::new(Shared {
            queue: Mutex::new(QueueState {
                pending: VecDeque::new(),
                shutdown: false,
            }),
            available: Condvar::new(),
            books: DashMap::new(),
            next_order_id: AtomicU64::new(1),
        });

        let workers = (0..worker_count)
            .map(|worker| {
                let shared = Arc::clone(&shared);
                thread::Builder::new()
                    .name(format!("matching-worker-{}", worker))
                    .spawn(move || run_worker(worker, shared))
                    .expect("failed to spawn matching worker")
            })
            .collect();

        debug!("Engine started with {} workers", worker_count);
        Self { shared, workers }
    }

    /// Create one book of `book_type` per symbol. Must be called before
    /// orders are submitted; calling it again replaces the named books.
    pub fn set_up<I, S>(&self, book_type: BookType, symbols: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for symbol in symbols {
            let symbol = symbol.into();
            debug!("Engine: creating {} book for {}", book_type, symbol);
            let book = Book::new(book_type, &symbol);
            self.shared.books.insert(symbol, book);
        }
    }

    /// Admit an order for asynchronous processing.
    ///
    /// Validates the submission, assigns the next order id from the engine's
    /// monotonic counter, and enqueues it for the worker pool. Returns the
    /// assigned id.
    pub fn add_order(&self, spec: OrderSpec) -> Result<OrderId, EngineError> {
        if self.shared.books.is_empty() {
            return Err(EngineError::NotConfigured);
        }
        if !self.shared.books.contains_key(&spec.symbol) {
            return Err(EngineError::UnknownSymbol(spec.symbol));
        }
        if spec.quantity == 0 {
            return Err(EngineError::InvalidQuantity(spec.quantity));
        }
        if spec.price == 0 {
            return Err(EngineError::InvalidPrice(spec.price));
        }

        // Id assignment stays outside the queue lock.
        let id = OrderId(self.shared.next_order_id.fetch_add(1, Ordering::Relaxed));
        let order = Order::new(id, spec.symbol, spec.side, spec.price, spec.quantity, spec.timestamp);
        trace!("Engine: admitting {}", order);

        {
            let mut state = self.shared.queue.lock().unwrap();
            if state.shutdown {
                return Err(EngineError::EngineStopped);
            }
            state.pending.push_back(order);
        }
        self.shared.available.notify_one();
        Ok(id)
    }

    /// Best `depth` buy price levels for `symbol`, aggregated per level.
    pub fn top_buy(&self, symbol: &str, depth: usize) -> Result<Vec<DepthLevel>, EngineError> {
        self.with_book(symbol, |book| book.top_buy(depth))
    }

    /// Best `depth` sell price levels for `symbol`, aggregated per level.
    pub fn top_sell(&self, symbol: &str, depth: usize) -> Result<Vec<DepthLevel>, EngineError> {
        self.with_book(symbol, |book| book.top_sell(depth))
    }

    /// Consistent two-sided snapshot of `symbol` to the requested depth.
    pub fn depth_snapshot(
        &self,
        symbol: &str,
        depth: usize,
    ) -> Result<DepthSnapshot, EngineError> {
        self.with_book(symbol, |book| book.snapshot(depth))
    }

    /// Orders currently resting on `symbol`'s book.
    pub fn resting_orders(&self, symbol: &str) -> Result<Vec<Order>, EngineError> {
        self.with_book(symbol, |book| book.resting_orders())
    }

    /// Orders fully filled on `symbol`'s book, in completion order.
    pub fn fulfilled_orders(&self, symbol: &str) -> Result<Vec<Order>, EngineError> {
        self.with_book(symbol, |book| book.fulfilled_orders())
    }

    /// Stop accepting orders, drain the pending queue, and join the workers.
    ///
    /// Workers exit only once the queue is empty, so on return every admitted
    /// order is either resting on a book or in a fulfilled list. Idempotent.
    pub fn shutdown(&mut self) {
        {
            let mut state = self.shared.queue.lock().unwrap();
            if state.shutdown && self.workers.is_empty() {
                return;
            }
            state.shutdown = true;
        }
        self.shared.available.notify_all();
        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                error!("Engine: a worker panicked during shutdown");
            }
        }
        debug!("Engine: shutdown complete");
    }

    fn with_book<T>(
        &self,
        symbol: &str,
        query: impl FnOnce(&Book) -> T,
    ) -> Result<T, EngineError> {
        let book = self
            .shared
            .books
            .get(symbol)
            .ok_or_else(|| EngineError::UnknownSymbol(symbol.to_string()))?;
        Ok(query(book.value()))
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_worker(worker: usize, shared: Arc<Shared>) {
    debug!("worker {} started", worker);
    loop {
        let order = {
            let mut state = shared.queue.lock().unwrap();
            loop {
                if let Some(order) = state.pending.pop_front() {
                    break order;
                }
                if state.shutdown {
                    debug!("worker {} exiting", worker);
                    return;
                }
                state = shared.available.wait(state).unwrap();
            }
        };

        // add_order only admits known symbols, so the lookup cannot miss
        // while the engine is used through its public surface.
        match shared.books.get(order.symbol()) {
            Some(book) => book.process(order),
            None => error!(
                "worker {}: dropping order {} for unknown symbol {}",
                worker,
                order.id(),
                order.symbol()
            ),
        }
    }
}
