use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "PIX")]
    Pix,
    #[serde(rename = "CRÉDITO")]
    Credit,
    #[serde(rename = "DÉBITO")]
    Debit,
    #[serde(rename = "DINHEIRO")]
    Cash,
    #[serde(rename = "A PRAZO")]
    Account,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "PENDENTE")]
    Pending,
    #[serde(rename = "CONFIRMADO")]
    Confirmed,
    #[serde(rename = "CANCELADO")]
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    Delivery,
    Pickup,
    Pos,
}

/// Row of the `orders` table, as far as charging is concerned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub client_name: String,
    pub total: f64,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub created_at: DateTime<Utc>,
}
