//! Response payloads, including the uniform envelope every endpoint returns.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Banner, CartItemId, OrderId, OrderStatus, PaymentInfo, ShippingCost, User};

/// Pagination block carried in the envelope's `meta` field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub current_page: u32,
    pub last_page: u32,
    pub per_page: u32,
    pub total: u64,
}

/// The uniform wrapper returned by every API call.
///
/// Services hand this back verbatim; callers extract `data`. Field-level
/// validation errors arrive in `errors`, keyed by input field name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PaginationMeta>,
}

/// Laravel-style paginator carried *inside* the envelope's `data` field on
/// listing endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub current_page: u32,
    pub last_page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl<T> Default for PaginatedResponse<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            current_page: 1,
            last_page: 1,
            per_page: 0,
            total: 0,
        }
    }
}

/// Banner listings wrap the page and meta one level down instead of using
/// the envelope's `meta` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BannerList {
    pub data: Vec<Banner>,
    pub meta: PaginationMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The authenticated customer record.
    pub partner: User,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub partner: User,
    pub token: String,
    pub email_sent: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItemAdded {
    pub cart_dtl_id: CartItemId,
    pub qty: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartCount {
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub order_id: OrderId,
    pub order_no: String,
    pub total_amount: Decimal,
    pub items_count: u32,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofUpload {
    pub payment: PaymentInfo,
    pub proof_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorOption {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewStatistics {
    pub average_rating: f64,
    pub total_reviews: u32,
    /// Review counts keyed by star rating, "1".."5".
    pub rating_distribution: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculateShippingResponse {
    pub courier: String,
    pub code: String,
    pub costs: Vec<ShippingCost>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheapestShippingResponse {
    pub courier: String,
    pub code: String,
    pub service: String,
    pub description: String,
    pub cost: Decimal,
    pub etd: String,
}
