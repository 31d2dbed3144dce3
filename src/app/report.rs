use crate::config::toml_config::OutputFormat;
use crate::domain::{order::Order, registry::OrderRegistry};
use crate::utils::error::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct OrderView<'a> {
    id: i64,
    products: Vec<ProductView<'a>>,
    subtotal: String,
    tax: String,
    total: String,
}

#[derive(Debug, Serialize)]
struct ProductView<'a> {
    name: &'a str,
    price: String,
}

#[derive(Debug, Serialize)]
struct SummaryView {
    orders: usize,
    grand_total: String,
}

impl<'a> OrderView<'a> {
    fn from_order(order: &'a Order) -> Self {
        let mut products: Vec<ProductView<'a>> = order
            .products
            .iter()
            .map(|(name, price)| ProductView {
                name: name.as_str(),
                price: price.to_string(),
            })
            .collect();
        products.sort_by(|a, b| a.name.cmp(b.name));

        Self {
            id: order.id,
            products,
            subtotal: order.subtotal().to_string(),
            tax: order.tax().to_string(),
            total: order.total().to_string(),
        }
    }
}

pub fn render_list(registry: &OrderRegistry, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let views: Vec<OrderView> = registry.all().iter().map(OrderView::from_order).collect();
            Ok(serde_json::to_string_pretty(&views)?)
        }
        OutputFormat::Table => {
            let mut out = format!("{:>6}  {:>8}  {:>10}\n", "ID", "PRODUCTS", "TOTAL");
            for order in registry.all() {
                out.push_str(&format!(
                    "{:>6}  {:>8}  {:>10}\n",
                    order.id,
                    order.products.len(),
                    order.total()
                ));
            }
            Ok(out)
        }
    }
}

pub fn render_order(order: &Order, format: OutputFormat) -> Result<String> {
    let view = OrderView::from_order(order);
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&view)?),
        OutputFormat::Table => {
            let mut out = format!("Order {}\n", view.id);
            let lines = view
                .products
                .iter()
                .map(|product| (product.name, product.price.as_str()))
                .chain([
                    ("Subtotal", view.subtotal.as_str()),
                    ("Tax", view.tax.as_str()),
                    ("Total", view.total.as_str()),
                ]);
            for (label, amount) in lines {
                out.push_str(&format!("  {:<30} {:>10}\n", label, amount));
            }
            Ok(out)
        }
    }
}

pub fn render_summary(registry: &OrderRegistry, format: OutputFormat) -> Result<String> {
    let view = SummaryView {
        orders: registry.len(),
        grand_total: registry.grand_total().to_string(),
    };
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&view)?),
        OutputFormat::Table => Ok(format!(
            "Orders: {}\nGrand total: {}\n",
            view.orders, view.grand_total
        )),
    }
}
