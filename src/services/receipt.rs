//! WhatsApp receipt messages and share links.
//!
//! Message text mirrors the printed receipt: WhatsApp bold/italic markers,
//! one block per item with toppings grouped under their modifier group, then
//! the totals, the payment method and the order code.

use chrono::DateTime;
use rust_decimal::Decimal;

use crate::models::{CartTopping, Order, PaymentMethod};

use super::store::DataStore;

/// Percent-encode for a URL query value: RFC 3986 unreserved characters pass
/// through, everything else becomes uppercase `%XX` per UTF-8 byte.
pub fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

fn money(value: Decimal) -> String {
    format!("{:.2}", value)
}

/// Cart toppings bucketed under their modifier group's display name, in
/// first-seen order. Groups deleted from the catalog fall back to a generic
/// heading.
fn group_toppings<'a>(
    store: &DataStore,
    toppings: &'a [CartTopping],
) -> Vec<(String, Vec<&'a CartTopping>)> {
    let groups = store.modifier_groups.read();
    let mut buckets: Vec<(String, String, Vec<&CartTopping>)> = Vec::new();
    for topping in toppings {
        let Some(group_id) = topping.modifier.group_id.as_deref() else {
            continue;
        };
        match buckets.iter_mut().find(|(id, _, _)| id == group_id) {
            Some((_, _, bucket)) => bucket.push(topping),
            None => {
                let name = groups
                    .iter()
                    .find(|g| g.id == group_id)
                    .map(|g| g.name.clone())
                    .unwrap_or_else(|| "Adicionais".to_string());
                buckets.push((group_id.to_string(), name, vec![topping]));
            }
        }
    }
    buckets
        .into_iter()
        .map(|(_, name, toppings)| (name, toppings))
        .collect()
}

/// The full order receipt text. `cash_for_change` adds the bring-change
/// lines for cash payments.
pub fn order_message(store: &DataStore, order: &Order, cash_for_change: Option<Decimal>) -> String {
    let mut message = String::from("Olá! Gostaria de fazer o seguinte pedido:\n\n");
    message.push_str(&format!("*Cliente:* {}\n", order.customer_name));
    message.push_str(&format!(
        "*Endereço:* {}, {}\n\n",
        order.neighborhood, order.customer_address
    ));
    message.push_str("*Itens do Pedido:*\n");

    for item in &order.items {
        message.push_str("---------------------\n");
        message.push_str(&format!(
            "*{} ({})* - R$ {}\n",
            item.product.name,
            item.size.name,
            money(item.base_price())
        ));
        for (group_name, toppings) in group_toppings(store, &item.toppings) {
            message.push_str(&format!("  *_{group_name}_*\n"));
            for topping in toppings {
                message.push_str(&format!(
                    "    - {}: + R$ {}\n",
                    topping.modifier.name,
                    money(topping.modifier.price)
                ));
            }
        }
        if !item.notes.is_empty() {
            message.push_str(&format!("  _Obs: {}_\n", item.notes));
        }
    }

    message.push_str("\n---------------------\n");
    message.push_str(&format!(
        "*Subtotal:* R$ {}\n",
        money(order.total - order.delivery_fee)
    ));
    message.push_str(&format!(
        "*Taxa de Entrega:* R$ {}\n",
        money(order.delivery_fee)
    ));
    message.push_str(&format!("*TOTAL:* R$ {}\n\n", money(order.total)));
    message.push_str(&format!(
        "*Forma de Pagamento:* {}\n",
        order.payment_method.label_pt()
    ));

    if order.payment_method == PaymentMethod::Dinheiro {
        if let Some(cash) = cash_for_change.filter(|c| *c > Decimal::ZERO) {
            message.push_str(&format!("*Levar troco para:* R$ {}\n", money(cash)));
            let change_due = cash - order.total;
            if change_due > Decimal::ZERO {
                message.push_str(&format!("*Troco:* R$ {}\n", money(change_due)));
            }
        }
    }

    if let Some(when) = order
        .scheduled_delivery_time
        .and_then(DateTime::from_timestamp_millis)
    {
        message.push_str(&format!(
            "*Entrega Agendada:* {}\n",
            when.format("%d/%m/%Y %H:%M")
        ));
    }

    message.push_str(&format!("\n*Código do Pedido:* {}\n", order.id));
    message
}

/// Deep link that opens the store's WhatsApp chat with the receipt prefilled.
pub fn whatsapp_order_link(
    store: &DataStore,
    order: &Order,
    cash_for_change: Option<Decimal>,
) -> String {
    let phone = store.settings.read().whatsapp_number.clone();
    let message = order_message(store, order, cash_for_change);
    format!(
        "https://api.whatsapp.com/send?phone={phone}&text={}",
        percent_encode(&message)
    )
}

/// Share link for the tracking page: short order code plus the current
/// status label. No phone, the customer picks the recipient.
pub fn tracking_share_link(store: &DataStore, order: &Order) -> String {
    let short_id: String = order.id.chars().take(6).collect();
    let message = format!(
        "Acompanhe meu pedido #{short_id} na {}! O status atual é: *{}*.",
        store.settings.read().store_name,
        order.status.label_pt()
    );
    format!(
        "https://api.whatsapp.com/send?text={}",
        percent_encode(&message)
    )
}
