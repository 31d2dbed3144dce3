use crate::utils::error::{OrderError, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Flat tax applied to the product subtotal (7.5%).
pub const TAX_RATE: Decimal = Decimal::from_parts(75, 0, 0, false, 3);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub products: HashMap<String, Decimal>,
}

impl Order {
    pub fn new(id: i64, products: HashMap<String, Decimal>) -> Self {
        Self { id, products }
    }

    /// Parses a single raw CSV line such as
    /// `"1","Slivered Almonds:22.88;Wholewheat flour:1.93"`.
    pub fn from_csv_row(row: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(row.as_bytes());

        let mut record = csv::StringRecord::new();
        if !reader.read_record(&mut record)? {
            return Err(OrderError::invalid_argument("empty CSV row"));
        }

        let mut trailing = csv::StringRecord::new();
        if reader.read_record(&mut trailing)? {
            return Err(OrderError::invalid_argument(format!(
                "expected a single CSV row, found more after '{}'",
                record.iter().collect::<Vec<_>>().join(",")
            )));
        }

        Self::from_csv_record(&record)
    }

    /// Builds an order from an already split record: `[id, products]`.
    pub fn from_csv_record(record: &csv::StringRecord) -> Result<Self> {
        if record.len() != 2 {
            return Err(OrderError::invalid_argument(format!(
                "expected 2 fields (id, products), found {}",
                record.len()
            )));
        }

        let id = parse_id(&record[0])?;
        let products = parse_products(&record[1])?;

        Ok(Self { id, products })
    }

    pub fn subtotal(&self) -> Decimal {
        self.products.values().copied().sum()
    }

    pub fn tax(&self) -> Decimal {
        (self.subtotal() * TAX_RATE).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Subtotal plus tax rounded to cents. An order with no products totals exactly zero.
    pub fn total(&self) -> Decimal {
        if self.products.is_empty() {
            return Decimal::ZERO;
        }
        self.subtotal() + self.tax()
    }

    /// Same as [`Order::total`], or `None` when the sum leaves the `Decimal` range.
    pub fn checked_total(&self) -> Option<Decimal> {
        checked_total(&self.products)
    }

    /// Inserts a product unless the name is already present; an existing price is never replaced.
    pub fn add_product(&mut self, name: impl Into<String>, price: Decimal) -> bool {
        let name = name.into();
        if self.products.contains_key(&name) {
            tracing::debug!(order_id = self.id, product = %name, "product already present");
            return false;
        }
        self.products.insert(name, price);
        true
    }

    pub fn remove_product(&mut self, name: &str) -> bool {
        self.products.remove(name).is_some()
    }
}

fn parse_id(field: &str) -> Result<i64> {
    let field = field.trim();
    field
        .parse::<i64>()
        .map_err(|_| OrderError::invalid_argument(format!("order id '{}' is not an integer", field)))
}

fn parse_products(field: &str) -> Result<HashMap<String, Decimal>> {
    let mut products = HashMap::new();

    for pair in field.split(';').map(str::trim).filter(|p| !p.is_empty()) {
        // Names may contain ':'; the price is always after the last one.
        let (name, price) = pair.rsplit_once(':').ok_or_else(|| {
            OrderError::invalid_argument(format!("product '{}' is missing a ':price'", pair))
        })?;

        let name = name.trim();
        if name.is_empty() {
            return Err(OrderError::invalid_argument(format!(
                "product '{}' has an empty name",
                pair
            )));
        }

        let price = Decimal::from_str(price.trim()).map_err(|_| {
            OrderError::invalid_argument(format!(
                "price '{}' for '{}' is not a decimal number",
                price.trim(),
                name
            ))
        })?;
        if price.is_sign_negative() && !price.is_zero() {
            return Err(OrderError::invalid_argument(format!(
                "price {} for '{}' is negative",
                price, name
            )));
        }

        if products.insert(name.to_string(), price).is_some() {
            return Err(OrderError::invalid_argument(format!(
                "product '{}' appears more than once",
                name
            )));
        }
    }

    if checked_total(&products).is_none() {
        return Err(OrderError::invalid_argument(
            "product prices add up to more than the largest representable total",
        ));
    }

    Ok(products)
}

fn checked_total(products: &HashMap<String, Decimal>) -> Option<Decimal> {
    let subtotal = products
        .values()
        .try_fold(Decimal::ZERO, |acc, price| acc.checked_add(*price))?;
    let tax = subtotal
        .checked_mul(TAX_RATE)?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    subtotal.checked_add(tax)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_order() -> Order {
        let products = HashMap::from([
            ("banana".to_string(), dec("1.99")),
            ("cracker".to_string(), dec("3.00")),
        ]);
        Order::new(1337, products)
    }

    #[test]
    fn test_new_keeps_id_and_products() {
        let order = Order::new(1337, HashMap::new());
        assert_eq!(order.id, 1337);
        assert_eq!(order.products.len(), 0);
    }

    #[test]
    fn test_tax_rate_is_seven_and_a_half_percent() {
        assert_eq!(TAX_RATE, dec("0.075"));
    }

    #[test]
    fn test_total_adds_rounded_tax() {
        let order = sample_order();
        // 4.99 * 0.075 = 0.37425 -> 0.37
        assert_eq!(order.subtotal(), dec("4.99"));
        assert_eq!(order.tax(), dec("0.37"));
        assert_eq!(order.total(), dec("5.36"));
    }

    #[test]
    fn test_total_rounds_midpoint_away_from_zero() {
        // Exact decimal: 3.00 * 0.075 = 0.225 -> 0.23. Binary floats see
        // 0.22499999999999998 here and land on 3.22.
        let order = Order::new(2, HashMap::from([("tea".to_string(), dec("3.00"))]));
        assert_eq!(order.total(), dec("3.23"));
    }

    #[test]
    fn test_total_of_empty_order_is_zero() {
        let order = Order::new(1337, HashMap::new());
        assert_eq!(order.total(), Decimal::ZERO);
    }

    #[test]
    fn test_add_product() {
        let mut order = sample_order();

        assert!(order.add_product("salad", dec("4.25")));
        assert_eq!(order.products.len(), 3);
        assert_eq!(order.products.get("salad"), Some(&dec("4.25")));
    }

    #[test]
    fn test_add_existing_product_returns_false_and_keeps_price() {
        let mut order = sample_order();
        let before_total = order.total();

        assert!(!order.add_product("banana", dec("4.25")));
        assert!(!order.add_product("banana", dec("9.99")));

        assert_eq!(order.products.get("banana"), Some(&dec("1.99")));
        assert_eq!(order.total(), before_total);
    }

    #[test]
    fn test_remove_product() {
        let mut order = sample_order();

        assert!(order.remove_product("cracker"));
        assert_eq!(order.products.len(), 1);
        assert!(!order.products.contains_key("cracker"));

        assert!(!order.remove_product("cracker"));
        assert!(!order.remove_product("salad"));
        assert_eq!(order.products.len(), 1);
    }

    #[test]
    fn test_from_csv_row_quoted() {
        let order = Order::from_csv_row(
            r#""1","Slivered Almonds:22.88;Wholewheat flour:1.93;Grape Seed Oil:74.9""#,
        )
        .unwrap();

        let expected = HashMap::from([
            ("Slivered Almonds".to_string(), dec("22.88")),
            ("Wholewheat flour".to_string(), dec("1.93")),
            ("Grape Seed Oil".to_string(), dec("74.9")),
        ]);
        assert_eq!(order.id, 1);
        assert_eq!(order.products, expected);
    }

    #[test]
    fn test_from_csv_row_unquoted_with_spacing() {
        let order = Order::from_csv_row("42, Allspice:64.74 ; Bran:14.72;").unwrap();
        assert_eq!(order.id, 42);
        assert_eq!(order.products.len(), 2);
        assert_eq!(order.products["Allspice"], dec("64.74"));
        assert_eq!(order.products["Bran"], dec("14.72"));
    }

    #[test]
    fn test_from_csv_row_empty_product_field() {
        let order = Order::from_csv_row("7,").unwrap();
        assert_eq!(order.id, 7);
        assert!(order.products.is_empty());
        assert_eq!(order.total(), Decimal::ZERO);
    }

    #[test]
    fn test_from_csv_row_name_containing_colon() {
        let order = Order::from_csv_row("3,Tea: Earl Grey:4.50").unwrap();
        assert_eq!(order.products["Tea: Earl Grey"], dec("4.50"));
    }

    #[test]
    fn test_from_csv_row_rejects_malformed_rows() {
        let cases = [
            "abc,Bran:1.00",
            "1.5,Bran:1.00",
            "1,Bran",
            "1,Bran:cheap",
            "1,:1.00",
            "1,Bran:-1.00",
            "1,Bran:1.00;Bran:2.00",
            "1",
            "1,Bran:1.00,extra",
            "",
            "1,A:1.00\nx,y",
        ];

        for row in cases {
            let err = Order::from_csv_row(row).unwrap_err();
            assert!(
                matches!(err, OrderError::InvalidArgument { .. }),
                "row {:?} gave {:?}",
                row,
                err
            );
        }
    }

    #[test]
    fn test_from_csv_row_rejects_overflowing_prices() {
        let rows = [
            "1,A:50000000000000000000000000000;B:50000000000000000000000000000",
            // subtotal fits, subtotal plus tax does not
            "2,A:75000000000000000000000000000",
        ];

        for row in rows {
            let err = Order::from_csv_row(row).unwrap_err();
            assert!(matches!(err, OrderError::InvalidArgument { .. }), "{:?}", err);
        }
    }

    #[test]
    fn test_checked_total_matches_total() {
        let order = sample_order();
        assert_eq!(order.checked_total(), Some(order.total()));
        assert_eq!(Order::new(1, HashMap::new()).checked_total(), Some(Decimal::ZERO));
    }

    #[test]
    fn test_from_csv_row_allows_trailing_newline() {
        let order = Order::from_csv_row("5,Bran:14.72\n").unwrap();
        assert_eq!(order.id, 5);
    }

    #[test]
    fn test_serializes_to_json() {
        let order = Order::new(9, HashMap::from([("Bran".to_string(), dec("14.72"))]));
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["id"], 9);
        assert_eq!(json["products"]["Bran"], "14.72");
    }
}
