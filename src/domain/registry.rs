use crate::domain::order::Order;
use crate::utils::error::{OrderError, Result};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Orders loaded from one CSV file, queryable by id.
///
/// A registry starts empty and is filled by [`OrderRegistry::read`]. Every
/// caller owns its own registry, so separate loads never observe each other.
#[derive(Debug, Clone, Default)]
pub struct OrderRegistry {
    orders: Vec<Order>,
}

impl OrderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every line of the CSV file at `path`, failing on the first malformed line.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Reading orders from {}", path.display());

        let file = File::open(path).map_err(|source| OrderError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let registry = Self::from_reader(file).map_err(|e| match e {
            OrderError::Csv(err) if err.is_io_error() => match err.into_kind() {
                csv::ErrorKind::Io(source) => OrderError::Io {
                    path: path.display().to_string(),
                    source,
                },
                kind => OrderError::invalid_argument(format!("{:?}", kind)),
            },
            other => other,
        })?;

        tracing::info!(
            "Loaded {} orders from {}",
            registry.len(),
            path.display()
        );
        Ok(registry)
    }

    /// Parses headerless `id,products` lines from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut orders = Vec::new();
        let mut grand_total = Decimal::ZERO;
        for record in csv_reader.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let order = Order::from_csv_record(&record).map_err(|e| {
                tracing::warn!("Rejecting malformed order on line {}: {}", line, e);
                e.at_line(line)
            })?;

            // Keeps grand_total() from overflowing on a loaded registry.
            grand_total = order
                .checked_total()
                .and_then(|total| grand_total.checked_add(total))
                .ok_or_else(|| {
                    OrderError::invalid_argument(
                        "order totals add up past the largest representable amount",
                    )
                    .at_line(line)
                })?;
            orders.push(order);
        }

        Ok(Self { orders })
    }

    /// Re-reads `path` and replaces the current orders. On error the
    /// previously loaded orders are kept.
    pub fn reload<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let fresh = Self::read(path)?;
        if !self.orders.is_empty() {
            tracing::debug!(
                "Replacing {} previously loaded orders with {}",
                self.orders.len(),
                fresh.len()
            );
        }
        self.orders = fresh.orders;
        Ok(())
    }

    pub fn all(&self) -> &[Order] {
        &self.orders
    }

    /// First order in file order whose id matches.
    pub fn find(&self, id: i64) -> Result<&Order> {
        self.orders
            .iter()
            .find(|order| order.id == id)
            .ok_or(OrderError::NotFound { id })
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn grand_total(&self) -> Decimal {
        self.orders.iter().map(Order::total).sum()
    }
}
