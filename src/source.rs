//! Data Sources
//!
//! A [`DashboardSource`] fetches the raw JSON body of one section. The poll
//! helpers here decode bodies into [`Payload`]s and yield the sections of a
//! cycle in completion order.

use async_trait::async_trait;
use futures_util::future::{FutureExt, LocalBoxFuture};
use futures_util::stream::FuturesUnordered;

use crate::error::DashboardResult;
use crate::model::{Payload, Section};

/// Fetches section bodies from wherever the dashboard data lives.
///
/// Futures are not required to be `Send`: the browser's fetch futures are
/// bound to the main thread.
#[async_trait(?Send)]
pub trait DashboardSource {
    /// GET the section's endpoint and return its JSON body
    async fn fetch(&self, section: Section) -> DashboardResult<serde_json::Value>;
}

/// Fetch and decode one section
pub async fn fetch_section<S>(source: &S, section: Section) -> DashboardResult<Payload>
where
    S: DashboardSource + ?Sized,
{
    let body = source.fetch(section).await?;
    Payload::decode(section, body)
}

/// A poll cycle's in-flight fetches
pub type PollStream<'a> = FuturesUnordered<LocalBoxFuture<'a, (Section, DashboardResult<Payload>)>>;

/// Issue every section of a poll cycle, in [`Section::ALL`] order.
///
/// The returned stream yields each section as soon as its fetch settles, so
/// one slow or failing endpoint never holds back the others.
pub fn poll_sections<S>(source: &S) -> PollStream<'_>
where
    S: DashboardSource + ?Sized,
{
    Section::ALL
        .iter()
        .map(|&section| {
            async move { (section, fetch_section(source, section).await) }.boxed_local()
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::DashboardError;
    use futures_util::StreamExt;
    use serde_json::{json, Value};
    use std::collections::HashMap;

    /// In-memory source returning canned bodies
    #[derive(Default)]
    pub(crate) struct StaticSource {
        pub bodies: HashMap<Section, DashboardResult<Value>>,
    }

    impl StaticSource {
        pub(crate) fn healthy() -> Self {
            let mut bodies = HashMap::new();
            bodies.insert(
                Section::Metrics,
                Ok(json!({ "success": true, "data": {
                    "totalSales": 15230.5, "totalOrders": 12, "pendingOrders": 2, "lowStockItems": 4
                }})),
            );
            bodies.insert(
                Section::SalesOverview,
                Ok(json!({ "success": true, "data": {
                    "labels": ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
                    "currentWeek": [100.0, 0.0, 0.0, 250.0, 0.0, 0.0, 0.0],
                    "prevWeek": [0.0, 0.0, 80.0, 0.0, 0.0, 0.0, 0.0]
                }})),
            );
            bodies.insert(
                Section::SalesByCategory,
                Ok(json!({ "success": true, "data": {
                    "labels": ["Processors", "Memory"],
                    "datasets": [{ "data": [300.0, 100.0], "backgroundColor": ["#3b82f6", "#10b981"] }]
                }})),
            );
            bodies.insert(Section::RecentOrders, Ok(json!({ "success": true, "data": [] })));
            bodies.insert(
                Section::TopProducts,
                Ok(json!({ "success": true, "data": [
                    { "product_name": "NVIDIA RTX 3080", "category": null, "quantity_sold": 18, "revenue": "14400.00" }
                ]})),
            );
            bodies.insert(
                Section::ProductsCheck,
                Ok(json!({ "success": true, "data": {
                    "totalProducts": 80, "lowStockItems": 4, "lowStockThreshold": 10,
                    "lowStockProducts": [
                        { "name": "A", "stock": 1 }, { "name": "B", "stock": 2 },
                        { "name": "C", "stock": 3 }, { "name": "D", "stock": 4 }
                    ]
                }})),
            );
            Self { bodies }
        }
    }

    #[async_trait(?Send)]
    impl DashboardSource for StaticSource {
        async fn fetch(&self, section: Section) -> DashboardResult<Value> {
            self.bodies
                .get(&section)
                .cloned()
                .unwrap_or_else(|| Err(DashboardError::Network("connection refused".into())))
        }
    }

    #[tokio::test]
    async fn test_poll_yields_every_section() {
        let source = StaticSource::healthy();
        let results: Vec<_> = poll_sections(&source).collect().await;

        assert_eq!(results.len(), 6);
        assert!(results.iter().all(|(_, r)| r.is_ok()));
    }

    #[tokio::test]
    async fn test_failures_are_isolated() {
        let mut source = StaticSource::healthy();
        source.bodies.remove(&Section::Metrics);
        source.bodies.insert(
            Section::TopProducts,
            Ok(json!({ "success": false, "message": "boom" })),
        );

        let results: HashMap<_, _> = poll_sections(&source).collect::<Vec<_>>().await.into_iter().collect();

        assert!(matches!(results[&Section::Metrics], Err(DashboardError::Network(_))));
        assert!(results[&Section::TopProducts].as_ref().unwrap_err().is_logical());
        assert!(results[&Section::RecentOrders].is_ok());
        assert!(results[&Section::ProductsCheck].is_ok());
    }
}
