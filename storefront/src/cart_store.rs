//! Legacy client-side cart, kept only for carts created before checkout
//! moved server-side. New code should use the cart hooks, which talk to the
//! authenticated server cart.

use std::sync::Arc;

use payloads::MaterialId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::storage::{CART_KEY, Storage};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalCartItem {
    pub matl_id: MaterialId,
    pub name: String,
    pub price: Decimal,
    pub qty: u32,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Offline cart persisted under [`CART_KEY`].
#[deprecated(note = "the cart lives server-side now; use `hooks::use_cart`")]
pub struct CartStore {
    storage: Arc<dyn Storage>,
    items: Vec<LocalCartItem>,
}

#[allow(deprecated)]
impl CartStore {
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let items = storage
            .get(CART_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        Self { storage, items }
    }

    pub fn items(&self) -> &[LocalCartItem] {
        &self.items
    }

    /// Add an item, merging quantities when the material is already present.
    pub fn add(&mut self, item: LocalCartItem) {
        match self.items.iter_mut().find(|i| i.matl_id == item.matl_id) {
            Some(existing) => existing.qty += item.qty,
            None => self.items.push(item),
        }
        self.persist();
    }

    /// Set an item's quantity. Zero removes the item.
    pub fn update_qty(&mut self, matl_id: MaterialId, qty: u32) {
        if qty == 0 {
            self.remove(matl_id);
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|i| i.matl_id == matl_id) {
            item.qty = qty;
            self.persist();
        }
    }

    pub fn remove(&mut self, matl_id: MaterialId) {
        self.items.retain(|i| i.matl_id != matl_id);
        self.persist();
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|i| i.qty).sum()
    }

    pub fn total_amount(&self) -> Decimal {
        self.items
            .iter()
            .map(|i| i.price * Decimal::from(i.qty))
            .sum()
    }

    fn persist(&self) {
        match serde_json::to_string(&self.items) {
            Ok(serialized) => self.storage.set(CART_KEY, &serialized),
            Err(e) => tracing::error!("failed to serialize cart: {e}"),
        }
    }
}

/// Format an amount as Indonesian rupiah: `Rp 1.250.000`. Fractions are
/// rounded away; rupiah prices are whole numbers.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round();
    let digits = rounded.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-Rp {grouped}")
    } else {
        format!("Rp {grouped}")
    }
}
