//! Section Rendering
//!
//! Maps decoded payloads to the view models of the metric cards and the two
//! tables. Every render replaces the whole section, so rendering the same
//! payload twice yields the same output.

use serde::Serialize;

use crate::format::{self, escape_html, peso};
use crate::model::{Metrics, RecentOrder, TopProduct};

/// Placeholder shown when there are no pending orders
pub const NO_ORDERS: &str = "No pending orders found";

/// Placeholder shown when there are no top products
pub const NO_PRODUCTS: &str = "No products found";

/// Category label for products without one
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Text of the four stat cards
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCards {
    pub total_sales: String,
    pub total_orders: String,
    pub pending_orders: String,
    pub low_stock_items: String,
}

impl MetricCards {
    pub fn from_metrics(metrics: &Metrics) -> Self {
        Self {
            total_sales: peso(metrics.total_sales),
            total_orders: metrics.total_orders.to_string(),
            pending_orders: metrics.pending_orders.to_string(),
            low_stock_items: metrics.low_stock_items.to_string(),
        }
    }

    /// `(title, value)` pairs in card order
    pub fn entries(&self) -> [(&'static str, &str); 4] {
        [
            ("Total Sales", self.total_sales.as_str()),
            ("Total Orders", self.total_orders.as_str()),
            ("Pending Orders", self.pending_orders.as_str()),
            ("Low Stock Items", self.low_stock_items.as_str()),
        ]
    }
}

/// A table body: either real rows or a single placeholder row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableBody<R> {
    Placeholder { text: &'static str, colspan: usize },
    Rows { rows: Vec<R> },
}

impl<R> TableBody<R> {
    pub fn row_count(&self) -> usize {
        match self {
            TableBody::Placeholder { .. } => 1,
            TableBody::Rows { rows } => rows.len(),
        }
    }
}

/// Something that renders as one `<tr>`
pub trait TableRow {
    /// Cell markup, already escaped
    fn cells_html(&self) -> Vec<String>;
}

impl<R: TableRow> TableBody<R> {
    /// Markup for the `<tbody>` contents
    pub fn to_html(&self) -> String {
        match self {
            TableBody::Placeholder { text, colspan } => format!(
                "<tr><td colspan=\"{}\" style=\"text-align: center; color: #64748b;\">{}</td></tr>",
                colspan,
                escape_html(text)
            ),
            TableBody::Rows { rows } => rows
                .iter()
                .map(|row| {
                    let cells: String = row
                        .cells_html()
                        .into_iter()
                        .map(|cell| format!("<td>{}</td>", cell))
                        .collect();
                    format!("<tr>{}</tr>", cells)
                })
                .collect(),
        }
    }
}

/// One pending order, ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentOrderRow {
    /// `#17`
    pub reference: String,
    pub customer: String,
    /// `₱1500.00`, amount as received
    pub amount: String,
    pub status: String,
    /// Badge class, the lowercased status
    pub status_class: String,
    pub date: String,
}

impl RecentOrderRow {
    pub fn from_order(order: &RecentOrder) -> Self {
        let id = match &order.id {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };

        Self {
            reference: format!("#{}", id),
            customer: order.customer.clone(),
            amount: format!("{}{}", format::CURRENCY, order.amount),
            status: order.status.clone(),
            status_class: order.status.to_lowercase(),
            date: order.date.clone(),
        }
    }
}

impl TableRow for RecentOrderRow {
    fn cells_html(&self) -> Vec<String> {
        vec![
            escape_html(&self.reference),
            escape_html(&self.customer),
            escape_html(&self.amount),
            format!(
                "<span class=\"status-badge {}\">{}</span>",
                escape_html(&self.status_class),
                escape_html(&self.status)
            ),
            escape_html(&self.date),
        ]
    }
}

/// One best-selling product, ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopProductRow {
    pub name: String,
    pub category: String,
    pub quantity: String,
    /// `₱12,500.00`
    pub revenue: String,
}

impl TopProductRow {
    pub fn from_product(product: &TopProduct) -> Self {
        let category = product
            .category
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(UNCATEGORIZED);

        Self {
            name: product.product_name.clone(),
            category: category.to_string(),
            quantity: product.quantity_sold.to_string(),
            revenue: peso(product.revenue.value()),
        }
    }
}

impl TableRow for TopProductRow {
    fn cells_html(&self) -> Vec<String> {
        vec![
            escape_html(&self.name),
            escape_html(&self.category),
            escape_html(&self.quantity),
            escape_html(&self.revenue),
        ]
    }
}

/// Pending orders table (5 columns)
pub fn recent_orders(orders: &[RecentOrder]) -> TableBody<RecentOrderRow> {
    if orders.is_empty() {
        return TableBody::Placeholder {
            text: NO_ORDERS,
            colspan: 5,
        };
    }
    TableBody::Rows {
        rows: orders.iter().map(RecentOrderRow::from_order).collect(),
    }
}

/// Top products table (4 columns)
pub fn top_products(products: &[TopProduct]) -> TableBody<TopProductRow> {
    if products.is_empty() {
        return TableBody::Placeholder {
            text: NO_PRODUCTS,
            colspan: 4,
        };
    }
    TableBody::Rows {
        rows: products.iter().map(TopProductRow::from_product).collect(),
    }
}
