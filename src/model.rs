//! Response Models
//!
//! JSON shapes served by the dashboard AJAX endpoints. Every endpoint wraps
//! its data in the same `{ success, data, message }` envelope.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DashboardError, DashboardResult};

/// A dashboard section backed by one AJAX endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    Metrics,
    SalesOverview,
    SalesByCategory,
    RecentOrders,
    TopProducts,
    ProductsCheck,
}

impl Section {
    /// All sections, in the order a poll cycle issues them
    pub const ALL: [Section; 6] = [
        Section::Metrics,
        Section::SalesOverview,
        Section::SalesByCategory,
        Section::RecentOrders,
        Section::TopProducts,
        Section::ProductsCheck,
    ];

    /// Endpoint slug
    pub fn slug(&self) -> &'static str {
        match self {
            Section::Metrics => "metrics",
            Section::SalesOverview => "sales-overview",
            Section::SalesByCategory => "sales-by-category",
            Section::RecentOrders => "recent-orders",
            Section::TopProducts => "top-products",
            Section::ProductsCheck => "products-check",
        }
    }

    /// Path relative to the site root, e.g. `/dashboard/ajax/metrics/`
    pub fn path(&self) -> String {
        format!("/dashboard/ajax/{}/", self.slug())
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Common response envelope
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Unwrap the data of a successful envelope
    pub fn into_data(self, section: Section) -> DashboardResult<T> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(DashboardError::Unsuccessful {
                section,
                message: self.message,
            }),
        }
    }
}

/// A numeric field the server sends either as a number or as a
/// preformatted decimal string (`"1500.00"`)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    /// Numeric value; unparseable text counts as zero
    pub fn value(&self) -> f64 {
        match self {
            Amount::Number(n) => *n,
            Amount::Text(s) => s.trim().parse().unwrap_or(0.0),
        }
    }
}

impl Default for Amount {
    fn default() -> Self {
        Amount::Number(0.0)
    }
}

impl fmt::Display for Amount {
    /// Text is shown exactly as received, numbers with two decimals
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Number(n) => write!(f, "{:.2}", n),
            Amount::Text(s) => f.write_str(s),
        }
    }
}

/// Headline metrics
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub total_sales: f64,
    pub total_orders: u64,
    pub pending_orders: u64,
    pub low_stock_items: u64,
}

/// This week vs. last week sales, one value per label
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesOverview {
    pub labels: Vec<String>,
    pub current_week: Vec<f64>,
    pub prev_week: Vec<f64>,
}

/// Sales split by category, already shaped as a chart dataset
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CategoryBreakdown {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub datasets: Vec<CategoryDataset>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDataset {
    #[serde(default)]
    pub label: Option<String>,
    /// Gaps in the series arrive as `null`
    #[serde(default)]
    pub data: Vec<Option<f64>>,
    #[serde(default)]
    pub background_color: Vec<String>,
}

/// A pending order row
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RecentOrder {
    pub id: serde_json::Value,
    pub customer: String,
    pub amount: Amount,
    pub status: String,
    pub date: String,
}

/// A best-selling product row
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TopProduct {
    pub product_name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub quantity_sold: u64,
    #[serde(default)]
    pub revenue: Amount,
}

/// Inventory check used to raise the low-stock toast
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsCheck {
    pub total_products: u64,
    pub low_stock_items: u64,
    #[serde(default)]
    pub low_stock_threshold: Option<u64>,
    #[serde(default)]
    pub low_stock_products: Vec<LowStockProduct>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LowStockProduct {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub stock: i64,
    #[serde(default)]
    pub image: Option<String>,
}

/// A decoded section payload
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Metrics(Metrics),
    SalesOverview(SalesOverview),
    SalesByCategory(CategoryBreakdown),
    RecentOrders(Vec<RecentOrder>),
    TopProducts(Vec<TopProduct>),
    ProductsCheck(ProductsCheck),
}

impl Payload {
    /// Decode a raw JSON body for the given section
    pub fn decode(section: Section, body: serde_json::Value) -> DashboardResult<Self> {
        Ok(match section {
            Section::Metrics => Payload::Metrics(unwrap_envelope(section, body)?),
            Section::SalesOverview => Payload::SalesOverview(unwrap_envelope(section, body)?),
            Section::SalesByCategory => Payload::SalesByCategory(unwrap_envelope(section, body)?),
            Section::RecentOrders => Payload::RecentOrders(unwrap_list(section, body)?),
            Section::TopProducts => Payload::TopProducts(unwrap_list(section, body)?),
            Section::ProductsCheck => Payload::ProductsCheck(unwrap_envelope(section, body)?),
        })
    }

    /// Section this payload belongs to
    pub fn section(&self) -> Section {
        match self {
            Payload::Metrics(_) => Section::Metrics,
            Payload::SalesOverview(_) => Section::SalesOverview,
            Payload::SalesByCategory(_) => Section::SalesByCategory,
            Payload::RecentOrders(_) => Section::RecentOrders,
            Payload::TopProducts(_) => Section::TopProducts,
            Payload::ProductsCheck(_) => Section::ProductsCheck,
        }
    }
}

fn unwrap_envelope<T: DeserializeOwned>(
    section: Section,
    body: serde_json::Value,
) -> DashboardResult<T> {
    // Failed envelopes may omit or malform `data`
    if body.get("success").and_then(|v| v.as_bool()) == Some(false) {
        return Err(DashboardError::Unsuccessful {
            section,
            message: body
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string),
        });
    }

    let envelope: Envelope<T> =
        serde_json::from_value(body).map_err(|e| DashboardError::Parse {
            section,
            message: e.to_string(),
        })?;

    envelope.into_data(section)
}

/// A successful list envelope with `data: null` renders as an empty list
fn unwrap_list<T: DeserializeOwned>(
    section: Section,
    body: serde_json::Value,
) -> DashboardResult<Vec<T>> {
    let succeeded = body.get("success").and_then(|v| v.as_bool()) == Some(true);
    if succeeded && body.get("data").map_or(false, |d| d.is_null()) {
        return Ok(Vec::new());
    }
    unwrap_envelope(section, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_section_paths() {
        assert_eq!(Section::Metrics.path(), "/dashboard/ajax/metrics/");
        assert_eq!(
            Section::SalesByCategory.path(),
            "/dashboard/ajax/sales-by-category/"
        );
        assert_eq!(Section::ALL[5], Section::ProductsCheck);
    }

    #[test]
    fn test_decode_metrics() {
        let body = json!({
            "success": true,
            "data": {
                "totalSales": 1234567.891,
                "totalOrders": 42,
                "pendingOrders": 3,
                "lowStockItems": 7
            }
        });

        match Payload::decode(Section::Metrics, body).unwrap() {
            Payload::Metrics(m) => {
                assert_eq!(m.total_orders, 42);
                assert_eq!(m.low_stock_items, 7);
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[test]
    fn test_decode_unsuccessful() {
        let body = json!({ "success": false, "message": "database offline" });
        let err = Payload::decode(Section::TopProducts, body).unwrap_err();
        assert_eq!(
            err,
            DashboardError::Unsuccessful {
                section: Section::TopProducts,
                message: Some("database offline".to_string()),
            }
        );
    }

    #[test]
    fn test_decode_success_without_data() {
        let body = json!({ "success": true });
        let err = Payload::decode(Section::Metrics, body).unwrap_err();
        assert!(err.is_logical());
    }

    #[test]
    fn test_decode_envelope_without_data_field() {
        let envelope: Envelope<Metrics> =
            serde_json::from_value(json!({ "success": false, "message": "nope" })).unwrap();
        assert!(envelope.data.is_none());
        assert_eq!(envelope.message.as_deref(), Some("nope"));
    }

    #[test]
    fn test_decode_category_with_null_point() {
        let body = json!({
            "success": true,
            "data": {
                "labels": ["CPU", "GPU", "RAM"],
                "datasets": [{ "data": [1200.0, null, 300.5], "backgroundColor": ["#4e73df"] }]
            }
        });

        match Payload::decode(Section::SalesByCategory, body).unwrap() {
            Payload::SalesByCategory(breakdown) => {
                assert_eq!(breakdown.datasets[0].data, vec![Some(1200.0), None, Some(300.5)]);
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[test]
    fn test_decode_schema_mismatch() {
        let body = json!({ "success": true, "data": { "labels": "Mon" } });
        let err = Payload::decode(Section::SalesOverview, body).unwrap_err();
        assert!(matches!(err, DashboardError::Parse { .. }));
    }

    #[test]
    fn test_decode_orders_with_string_amounts() {
        let body = json!({
            "success": true,
            "data": [{
                "id": 17,
                "customer": "Juan Dela Cruz",
                "date": "Mar 02, 2025 14:05",
                "amount": "1500.00",
                "status": "Pending"
            }]
        });

        match Payload::decode(Section::RecentOrders, body).unwrap() {
            Payload::RecentOrders(rows) => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].amount.to_string(), "1500.00");
                assert_eq!(rows[0].amount.value(), 1500.0);
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[test]
    fn test_decode_null_product_list() {
        let body = json!({ "success": true, "data": null });
        assert_eq!(
            Payload::decode(Section::TopProducts, body).unwrap(),
            Payload::TopProducts(Vec::new())
        );
    }

    #[test]
    fn test_decode_products_check() {
        let body = json!({
            "success": true,
            "data": {
                "totalProducts": 120,
                "lowStockItems": 2,
                "lowStockThreshold": 10,
                "lowStockProducts": [
                    { "id": 1, "name": "RTX 3080", "category": "GPU", "stock": 2, "image": "/x.png" },
                    { "name": "Ryzen 5", "stock": 0 }
                ]
            }
        });

        match Payload::decode(Section::ProductsCheck, body).unwrap() {
            Payload::ProductsCheck(check) => {
                assert_eq!(check.low_stock_items, 2);
                assert_eq!(check.low_stock_products[1].category, None);
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }
}
