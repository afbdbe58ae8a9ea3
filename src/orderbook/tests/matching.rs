#[cfg(test)]
mod tests {
    use crate::orderbook::{Book, BookType, Order, OrderId, Side};

    const VARIANTS: [BookType; 2] = [BookType::Heap, BookType::Table];

    fn order(id: u64, side: Side, price: u64, quantity: u64, timestamp: u64) -> Order {
        Order::new(OrderId(id), "X", side, price, quantity, timestamp)
    }

    fn find(orders: &[Order], id: u64) -> &Order {
        orders
            .iter()
            .find(|o| o.id() == OrderId(id))
            .unwrap_or_else(|| panic!("order {id} not found"))
    }

    #[test]
    fn test_simple_cross_fills_both_orders() {
        // SELL @100 qty 10, then BUY @100 qty 10: both fully filled.
        for variant in VARIANTS {
            let book = Book::new(variant, "X");
            book.process(order(1, Side::Sell, 100, 10, 1));
            book.process(order(2, Side::Buy, 100, 10, 2));

            assert!(book.top_buy(1).is_empty());
            assert!(book.top_sell(1).is_empty());

            let fulfilled = book.fulfilled_orders();
            assert_eq!(fulfilled.len(), 2);
            assert!(fulfilled.iter().all(Order::is_filled));
        }
    }

    #[test]
    fn test_partial_fill_rests_the_remainder() {
        // SELL @100 qty 10, then BUY @100 qty 4: buy archived, sell rests 6.
        for variant in VARIANTS {
            let book = Book::new(variant, "X");
            book.process(order(1, Side::Sell, 100, 10, 1));
            book.process(order(2, Side::Buy, 100, 4, 2));

            assert!(book.top_buy(1).is_empty());
            let depth = book.top_sell(1);
            assert_eq!((depth[0].price, depth[0].quantity), (100, 6));

            let fulfilled = book.fulfilled_orders();
            assert_eq!(fulfilled.len(), 1);
            assert_eq!(fulfilled[0].id(), OrderId(2));
        }
    }

    #[test]
    fn test_non_crossing_orders_rest() {
        // SELL @101 and BUY @100 do not trade.
        for variant in VARIANTS {
            let book = Book::new(variant, "X");
            book.process(order(1, Side::Sell, 101, 5, 1));
            book.process(order(2, Side::Buy, 100, 5, 2));

            let buys = book.top_buy(1);
            let sells = book.top_sell(1);
            assert_eq!((buys[0].price, buys[0].quantity), (100, 5));
            assert_eq!((sells[0].price, sells[0].quantity), (101, 5));
            assert!(book.fulfilled_orders().is_empty());
        }
    }

    #[test]
    fn test_sweep_through_multiple_price_levels() {
        // SELL @100 qty 3, SELL @101 qty 3, then BUY @101 qty 5.
        for variant in VARIANTS {
            let book = Book::new(variant, "X");
            book.process(order(1, Side::Sell, 100, 3, 1));
            book.process(order(2, Side::Sell, 101, 3, 2));
            book.process(order(3, Side::Buy, 101, 5, 3));

            let depth = book.top_sell(2);
            assert_eq!(depth.len(), 1);
            assert_eq!((depth[0].price, depth[0].quantity), (101, 1));

            let fulfilled = book.fulfilled_orders();
            assert_eq!(find(&fulfilled, 1).filled_quantity(), 3);
            let buy = find(&fulfilled, 3);
            assert!(buy.is_filled());
            // The buy swept the cheap level first.
            assert_eq!(buy.fills()[0].counterparty, OrderId(1));
            assert_eq!(buy.fills()[0].quantity, 3);
            assert_eq!(buy.fills()[1].counterparty, OrderId(2));
            assert_eq!(buy.fills()[1].quantity, 2);
        }
    }

    #[test]
    fn test_time_priority_at_equal_price() {
        // Two sells at the same price; the earlier timestamp is consumed.
        for variant in VARIANTS {
            let book = Book::new(variant, "X");
            book.process(order(1, Side::Sell, 100, 5, 1));
            book.process(order(2, Side::Sell, 100, 5, 2));
            book.process(order(3, Side::Buy, 100, 5, 3));

            let depth = book.top_sell(1);
            assert_eq!((depth[0].price, depth[0].quantity), (100, 5));

            let resting = book.resting_orders();
            assert_eq!(resting.len(), 1);
            assert_eq!(resting[0].id(), OrderId(2));

            let fulfilled = book.fulfilled_orders();
            assert_eq!(find(&fulfilled, 1).fills()[0].counterparty, OrderId(3));
        }
    }

    #[test]
    fn test_fills_are_mutual_and_paired() {
        for variant in VARIANTS {
            let book = Book::new(variant, "X");
            book.process(order(1, Side::Sell, 100, 10, 1));
            book.process(order(2, Side::Buy, 100, 4, 2));

            let fulfilled = book.fulfilled_orders();
            let resting = book.resting_orders();
            let buy = find(&fulfilled, 2);
            let sell = find(&resting, 1);

            assert_eq!(buy.fills().len(), 1);
            assert_eq!(buy.fills()[0].counterparty, OrderId(1));
            assert_eq!(buy.fills()[0].quantity, 4);

            assert_eq!(sell.fills().len(), 1);
            assert_eq!(sell.fills()[0].counterparty, OrderId(2));
            assert_eq!(sell.fills()[0].quantity, 4);
        }
    }

    #[test]
    fn test_incoming_price_bounds_the_sweep() {
        // A buy never lifts offers above its own limit.
        for variant in VARIANTS {
            let book = Book::new(variant, "X");
            book.process(order(1, Side::Sell, 100, 2, 1));
            book.process(order(2, Side::Sell, 103, 2, 2));
            book.process(order(3, Side::Buy, 101, 5, 3));

            let sells = book.top_sell(2);
            assert_eq!(sells.len(), 1);
            assert_eq!(sells[0].price, 103);

            let buys = book.top_buy(1);
            assert_eq!((buys[0].price, buys[0].quantity), (101, 3));
        }
    }

    #[test]
    fn test_book_never_crosses_after_a_sequence() {
        for variant in VARIANTS {
            let book = Book::new(variant, "X");
            let orders = [
                (1, Side::Buy, 100, 5),
                (2, Side::Sell, 99, 3),
                (3, Side::Sell, 104, 7),
                (4, Side::Buy, 105, 6),
                (5, Side::Sell, 101, 2),
                (6, Side::Buy, 98, 4),
                (7, Side::Sell, 97, 10),
            ];
            for (id, side, price, quantity) in orders {
                book.process(order(id, side, price, quantity, id));
            }

            let best_buy = book.top_buy(1).first().map(|level| level.price);
            let best_sell = book.top_sell(1).first().map(|level| level.price);
            if let (Some(buy), Some(sell)) = (best_buy, best_sell) {
                assert!(buy < sell, "{variant:?} book crossed: {buy} >= {sell}");
            }
        }
    }
}
