//! Contains the core matching logic shared by both book implementations.

use super::order::{Order, Side};
use tracing::trace;

/// The minimal surface a half-book must expose for matching to run against
/// it. "Best" means highest price for the buy side and lowest price for the
/// sell side, with earlier timestamps winning ties.
pub(crate) trait BookSide {
    /// Price of the best resting order, if the side is non-empty.
    fn best_price(&self) -> Option<u64>;

    /// Remove and return the best resting order.
    fn pop_best(&mut self) -> Option<Order>;

    /// Rest an order on this side. Priority is a pure function of
    /// (price, timestamp, id), so re-inserting an order popped from this side
    /// restores it to its original position.
    fn insert(&mut self, order: Order);
}

/// Apply `incoming` to a book: sweep the opposite side while prices cross,
/// then rest any residual quantity on the order's own side.
///
/// Fully filled orders, incoming or resting, are appended to `fulfilled`.
/// A resting order that is only partially consumed goes back onto the
/// opposite side with unchanged keys, preserving its priority.
pub(crate) fn process_incoming<S: BookSide>(
    mut incoming: Order,
    buys: &mut S,
    sells: &mut S,
    fulfilled: &mut Vec<Order>,
) {
    {
        let opposite = match incoming.side() {
            Side::Buy => &mut *sells,
            Side::Sell => &mut *buys,
        };

        while incoming.quantity() > 0 {
            let best_price = match opposite.best_price() {
                Some(price) => price,
                None => break,
            };
            if !incoming.crosses(best_price) {
                break;
            }

            let mut resting = match opposite.pop_best() {
                Some(order) => order,
                None => break,
            };

            let traded = incoming.quantity().min(resting.quantity());
            incoming.record_fill(resting.id(), traded);
            resting.record_fill(incoming.id(), traded);
            trace!(
                "matched incoming {} with resting {} for {} at {}",
                incoming.id(),
                resting.id(),
                traded,
                resting.price()
            );

            if resting.quantity() == 0 {
                fulfilled.push(resting);
            } else {
                opposite.insert(resting);
            }
        }
    }

    if incoming.quantity() == 0 {
        fulfilled.push(incoming);
    } else {
        match incoming.side() {
            Side::Buy => buys.insert(incoming),
            Side::Sell => sells.insert(incoming),
        }
    }
}
