//! Order engine: placement, status transitions, settlement and the
//! order-board partitions.

use std::rc::Rc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::error::StoreError;
use crate::models::{Order, OrderStatus, PaymentMethod, PaymentStatus};

use super::broadcast::OrderBroadcast;
use super::notification::NotificationSink;
use super::store::DataStore;

/// Walk-in customer name for counter sales.
const WALK_IN_CUSTOMER: &str = "Cliente Balcão";

/// Checkout form for an online order. Lengths are checked on trimmed input.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OnlineOrderDetails {
    #[validate(length(min = 3, message = "customer name too short"))]
    pub customer_name: String,
    #[validate(length(min = 9, message = "customer phone too short"))]
    pub customer_phone: String,
    #[validate(length(min = 6, message = "customer address too short"))]
    pub customer_address: String,
    /// Neighborhood name; must match a configured delivery zone.
    pub neighborhood: String,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub scheduled_delivery_time: Option<i64>,
    #[serde(default)]
    pub reference_point: Option<String>,
}

impl OnlineOrderDetails {
    fn normalized(mut self) -> Self {
        self.customer_name = self.customer_name.trim().to_string();
        self.customer_phone = self.customer_phone.trim().to_string();
        self.customer_address = self.customer_address.trim().to_string();
        self.neighborhood = self.neighborhood.trim().to_string();
        self
    }
}

/// POS checkout form. Customer fields are only required for deliveries and
/// fiado sales; counter sales need none of them.
#[derive(Debug, Clone, Default)]
pub struct PosOrderDetails {
    pub is_delivery: bool,
    pub is_free_delivery: bool,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    /// Selected delivery zone id, when `is_delivery`.
    pub zone_id: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    pub customer_cpf: String,
    pub payment_due_date: Option<NaiveDate>,
}

fn customer_fields_valid(name: &str, phone: &str, address: &str) -> bool {
    name.trim().chars().count() > 2
        && phone.trim().chars().count() > 8
        && address.trim().chars().count() > 5
}

/// Creates orders, advances them and keeps the order board views.
pub struct OrderEngine {
    store: Rc<DataStore>,
    sink: Rc<dyn NotificationSink>,
    broadcast: Rc<OrderBroadcast>,
}

impl OrderEngine {
    pub fn new(
        store: Rc<DataStore>,
        sink: Rc<dyn NotificationSink>,
        broadcast: Rc<OrderBroadcast>,
    ) -> Self {
        Self {
            store,
            sink,
            broadcast,
        }
    }

    /// Place an online order from the current cart.
    ///
    /// The cart snapshot is captured before the cart is cleared and the
    /// notification sink fires before this returns. The chime is only
    /// sounded when an operator is logged in; customers placing orders on
    /// their own device must not alert themselves.
    pub fn place_online_order(&self, details: OnlineOrderDetails) -> Result<Order, StoreError> {
        let items = self.store.cart.get();
        if items.is_empty() {
            return Err(StoreError::invalid("cart is empty"));
        }

        let details = details.normalized();
        details.validate()?;

        let zone = self
            .store
            .zone_by_neighborhood(&details.neighborhood)
            .ok_or_else(|| {
                StoreError::invalid(format!("unknown delivery zone: {}", details.neighborhood))
            })?;

        let now = Utc::now().timestamp_millis();
        let order = Order {
            id: format!("WEB-{now}"),
            timestamp: now,
            total: self.store.cart_total() + zone.fee,
            items,
            customer_name: details.customer_name,
            customer_phone: details.customer_phone,
            customer_address: details.customer_address,
            neighborhood: zone.neighborhood,
            delivery_fee: zone.fee,
            payment_method: details.payment_method,
            status: OrderStatus::Pending,
            is_online_order: true,
            payment_status: PaymentStatus::Pending,
            scheduled_delivery_time: details.scheduled_delivery_time,
            reference_point: details.reference_point,
            customer_cpf: None,
            payment_due_date: None,
            surcharge: None,
        };

        self.store
            .orders
            .update(|orders| orders.insert(0, order.clone()));

        if self.store.current_user.read().is_some() {
            self.sink.announce_new_order();
        }
        self.broadcast.publish(&order);
        self.store.clear_cart();

        tracing::info!(order_id = %order.id, total = %order.total, "online order placed");
        Ok(order)
    }

    /// Place a point-of-sale order from the current cart.
    ///
    /// The order is born `Delivered`; payment is `Unpaid` for fiado and
    /// `Paid` otherwise. The cart is left intact for the receipt screen;
    /// the caller clears it on acknowledge via [`DataStore::clear_cart`].
    pub fn place_pos_order(&self, details: PosOrderDetails) -> Result<Order, StoreError> {
        let items = self.store.cart.get();
        if items.is_empty() {
            return Err(StoreError::invalid("cart is empty"));
        }

        let method = details
            .payment_method
            .ok_or_else(|| StoreError::invalid("no payment method selected"))?;
        let is_fiado = method == PaymentMethod::Fiado;

        let zone = if details.is_delivery {
            let id = details
                .zone_id
                .as_deref()
                .ok_or_else(|| StoreError::invalid("no delivery zone selected"))?;
            Some(
                self.store
                    .zone_by_id(id)
                    .ok_or_else(|| StoreError::invalid(format!("unknown delivery zone: {id}")))?,
            )
        } else {
            None
        };

        if details.is_delivery
            && !customer_fields_valid(
                &details.customer_name,
                &details.customer_phone,
                &details.customer_address,
            )
        {
            return Err(StoreError::invalid("delivery details are incomplete"));
        }

        if is_fiado {
            // Credit sales need an identified customer even at the counter.
            if !details.is_delivery
                && !customer_fields_valid(
                    &details.customer_name,
                    &details.customer_phone,
                    &details.customer_address,
                )
            {
                return Err(StoreError::invalid("fiado customer details are incomplete"));
            }
            if details.customer_cpf.trim().chars().count() <= 10 {
                return Err(StoreError::invalid("fiado requires a customer CPF"));
            }
            if details.payment_due_date.is_none() {
                return Err(StoreError::invalid("fiado requires a payment due date"));
            }
        }

        let delivery_fee = match &zone {
            Some(zone) if !details.is_free_delivery => zone.fee,
            _ => Decimal::ZERO,
        };

        let cart_total = self.store.cart_total();
        let surcharge = is_fiado.then(|| {
            let rate = self.store.settings.read().fiado_surcharge_percentage;
            ((cart_total + delivery_fee) * rate / Decimal::ONE_HUNDRED).round_dp(2)
        });
        let total = cart_total + delivery_fee + surcharge.unwrap_or(Decimal::ZERO);

        let identified = details.is_delivery || is_fiado;
        let now = Utc::now().timestamp_millis();
        let millis = now.to_string();
        let order = Order {
            id: format!("POS-{}", &millis[millis.len().saturating_sub(6)..]),
            timestamp: now,
            items,
            total,
            customer_name: if identified {
                details.customer_name.trim().to_string()
            } else {
                WALK_IN_CUSTOMER.to_string()
            },
            customer_phone: if identified {
                details.customer_phone.trim().to_string()
            } else {
                String::new()
            },
            customer_address: if identified {
                details.customer_address.trim().to_string()
            } else {
                String::new()
            },
            neighborhood: zone.map(|z| z.neighborhood).unwrap_or_default(),
            delivery_fee,
            payment_method: method,
            status: OrderStatus::Delivered,
            is_online_order: false,
            payment_status: if is_fiado {
                PaymentStatus::Unpaid
            } else {
                PaymentStatus::Paid
            },
            scheduled_delivery_time: None,
            reference_point: None,
            customer_cpf: is_fiado.then(|| details.customer_cpf.trim().to_string()),
            payment_due_date: if is_fiado { details.payment_due_date } else { None },
            surcharge,
        };

        self.store
            .orders
            .update(|orders| orders.insert(0, order.clone()));

        tracing::info!(order_id = %order.id, method = method.as_str(), total = %order.total, "pos order placed");
        Ok(order)
    }

    /// Replace an order's status. No edge validation: the screens only offer
    /// legal next steps, and re-applying the same status is a no-op by
    /// construction. Returns whether the order exists.
    pub fn update_order_status(&self, order_id: &str, status: OrderStatus) -> bool {
        let mut found = false;
        self.store.orders.update(|orders| {
            if let Some(order) = orders.iter_mut().find(|o| o.id == order_id) {
                order.status = status;
                found = true;
            }
        });

        if found {
            if matches!(status, OrderStatus::Accepted | OrderStatus::Cancelled) {
                self.sink.silence_new_order();
            }
            tracing::debug!(order_id, status = status.as_str(), "order status updated");
        } else {
            tracing::warn!(order_id, "status update for unknown order");
        }
        found
    }

    /// Settle or flag an order's payment. Fiado receivables go
    /// `Unpaid → Paid` on admin action; no reverse transition exists.
    pub fn update_order_payment_status(&self, order_id: &str, status: PaymentStatus) -> bool {
        let mut found = false;
        self.store.orders.update(|orders| {
            if let Some(order) = orders.iter_mut().find(|o| o.id == order_id) {
                order.payment_status = status;
                found = true;
            }
        });
        found
    }

    pub fn find_order(&self, order_id: &str) -> Option<Order> {
        self.store.orders.read().iter().find(|o| o.id == order_id).cloned()
    }

    // --- Order board partitions ----------------------------------------

    fn online_with_status(&self, status: OrderStatus) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .store
            .orders
            .read()
            .iter()
            .filter(|o| o.is_online_order && o.status == status)
            .cloned()
            .collect();
        orders.sort_by_key(|o| o.timestamp);
        orders
    }

    /// Pending online orders that are due now: unscheduled, or scheduled for
    /// a time that has arrived.
    pub fn pending_orders(&self, now_ms: i64) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .store
            .orders
            .read()
            .iter()
            .filter(|o| {
                o.is_online_order
                    && o.status == OrderStatus::Pending
                    && o.scheduled_delivery_time.map_or(true, |t| t <= now_ms)
            })
            .cloned()
            .collect();
        orders.sort_by_key(|o| o.timestamp);
        orders
    }

    /// Pending online orders scheduled for later, soonest first.
    pub fn scheduled_orders(&self, now_ms: i64) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .store
            .orders
            .read()
            .iter()
            .filter(|o| {
                o.is_online_order
                    && o.status == OrderStatus::Pending
                    && o.scheduled_delivery_time.map_or(false, |t| t > now_ms)
            })
            .cloned()
            .collect();
        orders.sort_by_key(|o| o.scheduled_delivery_time);
        orders
    }

    pub fn confirmed_orders(&self) -> Vec<Order> {
        self.online_with_status(OrderStatus::Accepted)
    }

    pub fn preparing_orders(&self) -> Vec<Order> {
        self.online_with_status(OrderStatus::Preparing)
    }

    pub fn awaiting_delivery_orders(&self) -> Vec<Order> {
        self.online_with_status(OrderStatus::AwaitingDelivery)
    }

    pub fn out_for_delivery_orders(&self) -> Vec<Order> {
        self.online_with_status(OrderStatus::OutForDelivery)
    }

    fn with_status(&self, status: OrderStatus) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .store
            .orders
            .read()
            .iter()
            .filter(|o| o.status == status)
            .cloned()
            .collect();
        orders.sort_by_key(|o| o.timestamp);
        orders
    }

    /// Kitchen columns include POS orders; they filter on status alone.
    pub fn kitchen_accepted(&self) -> Vec<Order> {
        self.with_status(OrderStatus::Accepted)
    }

    pub fn kitchen_preparing(&self) -> Vec<Order> {
        self.with_status(OrderStatus::Preparing)
    }

    /// Open fiado receivables.
    pub fn accounts_receivable(&self) -> Vec<Order> {
        self.store
            .orders
            .read()
            .iter()
            .filter(|o| {
                o.payment_method == PaymentMethod::Fiado
                    && o.payment_status == PaymentStatus::Unpaid
            })
            .cloned()
            .collect()
    }
}
