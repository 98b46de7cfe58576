use std::sync::Arc;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use postgrest::Postgrest;

use crate::types::Order;

/// Read access to persisted orders.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn get_order(&self, order_id: &str) -> Result<Option<Order>>;
}

#[derive(Clone)]
pub struct SupabaseClient {
    client: Arc<Postgrest>,
    service_role_key: String,
}

impl SupabaseClient {
    pub fn new(url: &str, anon_key: &str, service_role_key: &str) -> Self {
        let client = Arc::new(Postgrest::new(rest_url(url))
            .insert_header("apikey", anon_key)
            .insert_header("Authorization", format!("Bearer {}", service_role_key)));

        SupabaseClient {
            client,
            service_role_key: service_role_key.to_string(),
        }
    }
}

#[async_trait]
impl OrderStore for SupabaseClient {
    async fn get_order(&self, order_id: &str) -> Result<Option<Order>> {
        tracing::info!("Fetching order with id: {}", order_id);

        let response = self.client.as_ref()
            .from("orders")
            .select("id,client_name,total,payment_method,status,type,created_at")
            .eq("id", order_id)
            .auth(&self.service_role_key)
            .execute()
            .await
            .map_err(|e| anyhow!("Failed to fetch order: {}", e))?;

        let status = response.status();
        let text = response.text().await
            .map_err(|e| anyhow!("Failed to read response: {}", e))?;

        if !status.is_success() {
            return Err(anyhow!("Order query failed with {}: {}", status, text));
        }

        let orders: Vec<Order> = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse order: {}", e))?;

        Ok(orders.into_iter().next())
    }
}

/// Ensure the URL ends with /rest/v1
fn rest_url(url: &str) -> String {
    if url.ends_with("/rest/v1") {
        url.to_string()
    } else {
        format!("{}/rest/v1", url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_url() {
        assert_eq!(rest_url("https://abc.supabase.co"), "https://abc.supabase.co/rest/v1");
        assert_eq!(rest_url("https://abc.supabase.co/"), "https://abc.supabase.co/rest/v1");
        assert_eq!(rest_url("https://abc.supabase.co/rest/v1"), "https://abc.supabase.co/rest/v1");
    }
}
