use skyfare_shared::FlightOffer;

/// Stable ascending sort by price; equal prices keep their input order.
pub fn sort_by_price<'a>(mut offers: Vec<&'a FlightOffer>) -> Vec<&'a FlightOffer> {
    offers.sort_by(|a, b| a.price.total_cmp(&b.price));
    offers
}

/// Price of the first offer in an already sorted list.
pub fn cheapest_price(sorted: &[&FlightOffer]) -> Option<f64> {
    sorted.first().map(|o| o.price)
}

/// Lowest price in an unsorted list.
pub fn min_price(offers: &[FlightOffer]) -> Option<f64> {
    offers.iter().map(|o| o.price).min_by(|a, b| a.total_cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::offer;

    #[test]
    fn test_sorts_ascending() {
        let offers = vec![offer("0", "X", 0, 100.0), offer("1", "X", 1, 200.0), offer("2", "X", 2, 50.0)];
        let sorted = sort_by_price(offers.iter().collect());
        let ids: Vec<&str> = sorted.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "0", "1"]);
        assert_eq!(cheapest_price(&sorted), Some(50.0));
        assert!(sorted.windows(2).all(|w| w[0].price <= w[1].price));
    }

    #[test]
    fn test_ties_keep_input_order() {
        let offers = vec![
            offer("first", "X", 0, 300.0),
            offer("cheap", "X", 0, 100.0),
            offer("second", "X", 0, 300.0),
            offer("third", "X", 0, 300.0),
        ];
        let sorted = sort_by_price(offers.iter().collect());
        let ids: Vec<&str> = sorted.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["cheap", "first", "second", "third"]);
    }

    #[test]
    fn test_empty() {
        let sorted = sort_by_price(Vec::new());
        assert!(sorted.is_empty());
        assert_eq!(cheapest_price(&sorted), None);
        assert_eq!(min_price(&[]), None);
    }

    #[test]
    fn test_min_price() {
        let offers = vec![offer("a", "X", 0, 4999.5), offer("b", "X", 0, 4800.0)];
        assert_eq!(min_price(&offers), Some(4800.0));
    }
}
