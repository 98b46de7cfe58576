use axum::{
    routing::{get, post},
    Router,
    extract::{rejection::JsonRejection, Path, Json},
    http::StatusCode,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::config::MerchantConfig;
use crate::error::PixError;
use crate::payment::{order_reference, ChargeRequest};
use crate::payment::uri::qr_code_url;
use crate::supabase::OrderStore;

type ApiError = (StatusCode, Json<Value>);

#[derive(Serialize)]
pub struct ChargeResponse {
    pub payload: String,
    pub qr_code_url: String,
}

#[derive(Serialize)]
pub struct OrderChargeResponse {
    pub order_id: String,
    pub payload: String,
    pub qr_code_url: String,
}

pub struct HttpServer {
    merchant: Arc<MerchantConfig>,
    orders: Arc<dyn OrderStore>,
}

impl HttpServer {
    pub fn new(merchant: MerchantConfig, orders: Arc<dyn OrderStore>) -> Self {
        Self { merchant: Arc::new(merchant), orders }
    }

    pub fn router(&self) -> Router {
        let merchant = self.merchant.clone();
        let orders = self.orders.clone();

        Router::new()
            // Charge from explicit parameters
            .route("/api/v1/pix", post({
                let merchant = merchant.clone();
                move |body: Result<Json<ChargeRequest>, JsonRejection>| async move {
                    let Json(request) = body.map_err(malformed)?;
                    let payload = request.payload().map_err(rejected)?;
                    let qr_code_url = render_link(&merchant, &payload)?;

                    Ok::<_, ApiError>(Json(ChargeResponse { payload, qr_code_url }))
                }
            }))

            // Charge for a stored order, paid to the configured merchant
            .route("/api/v1/orders/:order_id/pix", get(move |Path(order_id): Path<String>| async move {
                let order = match orders.get_order(&order_id).await {
                    Ok(Some(order)) => order,
                    Ok(None) => return Err(error(StatusCode::NOT_FOUND, format!("Order {} not found", order_id))),
                    Err(e) => {
                        tracing::error!("Error fetching order: {}", e);
                        return Err(error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch order".to_string()));
                    }
                };

                if order.total <= 0.0 {
                    return Err(error(
                        StatusCode::UNPROCESSABLE_ENTITY,
                        format!("Order {} has nothing to charge", order.id),
                    ));
                }

                let request = ChargeRequest {
                    destination_key: merchant.pix_key.clone(),
                    merchant_name: merchant.name.clone(),
                    merchant_city: merchant.city.clone(),
                    transaction_id: order_reference(&order.id),
                    amount: order.total,
                };
                let payload = request.payload().map_err(rejected)?;
                let qr_code_url = render_link(&merchant, &payload)?;

                tracing::info!("Issued PIX charge for order {}", order.id);

                Ok::<_, ApiError>(Json(OrderChargeResponse {
                    order_id: order.id,
                    payload,
                    qr_code_url,
                }))
            }))
    }
}

fn error(status: StatusCode, message: String) -> ApiError {
    (status, Json(json!({ "error": message })))
}

fn malformed(rejection: JsonRejection) -> ApiError {
    tracing::info!("Malformed charge request: {}", rejection.body_text());
    error(rejection.status(), rejection.body_text())
}

fn rejected(e: PixError) -> ApiError {
    tracing::info!("Rejected charge: {}", e);
    error(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
}

fn render_link(merchant: &MerchantConfig, payload: &str) -> Result<String, ApiError> {
    qr_code_url(&merchant.qr_service_url, merchant.qr_size, payload).map_err(|e| {
        tracing::error!("Error building QR link: {}", e);
        error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to build QR link".to_string())
    })
}
