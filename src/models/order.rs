//! Order model and status machines.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::cart::CartItem;

/// Delivery progress of an order.
///
/// `update_order_status` replaces the status unconditionally; the edge graph
/// (pending → accepted → preparing → awaiting_delivery → out_for_delivery →
/// delivered, cancelled from pending/accepted) is a UI contract, not an
/// engine one. POS orders are born `Delivered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Accepted,
    Preparing,
    AwaitingDelivery,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Accepted => "accepted",
            OrderStatus::Preparing => "preparing",
            OrderStatus::AwaitingDelivery => "awaiting_delivery",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Customer-facing label for the tracking page.
    pub fn label_pt(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pedido Recebido",
            OrderStatus::Accepted => "Pedido Confirmado",
            OrderStatus::Preparing => "Em Preparo",
            OrderStatus::AwaitingDelivery => "Aguardando Entregador",
            OrderStatus::OutForDelivery => "Saiu para Entrega",
            OrderStatus::Delivered => "Entregue",
            OrderStatus::Cancelled => "Cancelado",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Online orders awaiting settlement action.
    Pending,
    Paid,
    /// Fiado until the receivable is settled.
    Unpaid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Unpaid => "unpaid",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Pix,
    Cartao,
    Dinheiro,
    Fiado,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Pix => "pix",
            PaymentMethod::Cartao => "cartao",
            PaymentMethod::Dinheiro => "dinheiro",
            PaymentMethod::Fiado => "fiado",
        }
    }

    /// Receipt label.
    pub fn label_pt(&self) -> &'static str {
        match self {
            PaymentMethod::Pix => "Pix",
            PaymentMethod::Cartao => "Cartão na Entrega",
            PaymentMethod::Dinheiro => "Dinheiro na Entrega",
            PaymentMethod::Fiado => "Fiado",
        }
    }
}

/// An immutable snapshot of cart + customer + totals. Only `status` and
/// `payment_status` mutate after creation.
///
/// Invariant: `total == Σ items.total_price + delivery_fee + surcharge`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    /// Epoch milliseconds at placement.
    pub timestamp: i64,
    pub items: Vec<CartItem>,
    pub total: Decimal,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub neighborhood: String,
    pub delivery_fee: Decimal,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub is_online_order: bool,
    pub payment_status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_delivery_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_point: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_cpf: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surcharge: Option<Decimal>,
}

impl Order {
    pub fn items_total(&self) -> Decimal {
        self.items.iter().map(|i| i.total_price).sum()
    }
}
