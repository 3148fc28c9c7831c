//! Wire-level contract with the storefront REST API: identifier newtypes,
//! domain models, request/response payloads, the endpoint registry, and the
//! typed [`APIClient`](api_client::APIClient).

use std::collections::BTreeMap;

use derive_more::Display;
use jiff::Timestamp;
use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub mod api_client;
pub mod endpoints;
pub mod requests;
pub mod responses;

pub use api_client::{APIClient, ApiError, error_message};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Serialize,
            Deserialize,
            Display,
        )]
        pub struct $name(pub i64);
    };
}

id_newtype!(UserId);
id_newtype!(BannerId);
id_newtype!(MaterialId);
id_newtype!(CartItemId);
id_newtype!(OrderId);
id_newtype!(PaymentId);
id_newtype!(ReviewId);

/// A registered storefront customer, called a "partner" on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub code: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub email_verified_at: Option<Timestamp>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub is_online_shop_customer: Option<bool>,
}

/// Promotional banner shown on the landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    pub id: BannerId,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub image_path: String,
    pub start_date: Date,
    pub end_date: Date,
    pub is_active: bool,
    pub is_currently_active: bool,
    pub display_order: u32,
    pub link_url: String,
    pub materials_count: u32,
    #[serde(default)]
    pub materials: Option<Vec<Material>>,
    pub created_at: Timestamp,
}

/// Free-form product specifications. Known keys are typed; everything else
/// the backend sends is preserved in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialSpecs {
    #[serde(default)]
    pub color_name: Option<String>,
    #[serde(default)]
    pub color_code: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub ram: Option<String>,
    #[serde(default)]
    pub storage: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// A sellable product. "Material" is the backend's inventory term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: MaterialId,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub descr: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub type_code: Option<String>,
    #[serde(default)]
    pub is_display: Option<bool>,
    pub is_promotion: bool,
    #[serde(default)]
    pub promotion_price: Option<Decimal>,
    #[serde(default)]
    pub promotion_start_date: Option<Date>,
    #[serde(default)]
    pub promotion_end_date: Option<Date>,
    #[serde(default)]
    pub specs: Option<MaterialSpecs>,
    pub price: Decimal,
    /// Price after any active promotion is applied.
    pub final_price: Decimal,
    #[serde(default)]
    pub discount_percentage: Option<Decimal>,
    #[serde(default)]
    pub avg_rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<u32>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    /// Star-count histogram, keyed "1".."5". Only on the detail endpoint.
    #[serde(default)]
    pub rating_stats: Option<BTreeMap<String, u32>>,
    #[serde(default)]
    pub reviews: Option<responses::PaginatedResponse<Review>>,
}

/// One line in the server-side cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub matl_id: MaterialId,
    pub matl_code: String,
    pub matl_name: String,
    pub qty: u32,
    pub price: Decimal,
    pub discount: Decimal,
    pub subtotal: Decimal,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// The authenticated user's server-side cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub cart_id: i64,
    pub items: Vec<CartItem>,
    pub total_items: u32,
    pub total_amount: Decimal,
}

/// Single-letter order status codes used by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "P")]
    Pending,
    #[serde(rename = "C")]
    Confirmed,
    #[serde(rename = "S")]
    Shipped,
    #[serde(rename = "D")]
    Delivered,
    #[serde(rename = "X")]
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "P",
            Self::Confirmed => "C",
            Self::Shipped => "S",
            Self::Delivered => "D",
            Self::Cancelled => "X",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub matl_id: MaterialId,
    pub matl_name: String,
    #[serde(default)]
    pub matl_code: Option<String>,
    pub qty: u32,
    pub price: Decimal,
    pub discount: Decimal,
    pub subtotal: Decimal,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub order_no: String,
    pub order_date: String,
    pub status_code: OrderStatus,
    pub status_name: String,
    #[serde(default)]
    pub shipping_address: Option<String>,
    #[serde(default)]
    pub shipping_city: Option<String>,
    #[serde(default)]
    pub shipping_postal_code: Option<String>,
    #[serde(default)]
    pub shipping_phone: Option<String>,
    pub shipping_cost: Decimal,
    #[serde(default)]
    pub shipping_courier: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Present on the detail endpoint, omitted from listings.
    #[serde(default)]
    pub items: Option<Vec<OrderItem>>,
    #[serde(default)]
    pub subtotal: Option<Decimal>,
    pub total_amount: Decimal,
    pub items_count: u32,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub payment: Option<PaymentInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub code: String,
    pub name: String,
    pub description: String,
    /// Manual transfer methods require a proof-of-payment upload.
    pub requires_proof: bool,
}

/// Payment record. Nearly everything is optional because the backend emits
/// different subsets on the order detail, payment list, and upload endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentInfo {
    #[serde(default)]
    pub id: Option<PaymentId>,
    #[serde(default)]
    pub tr_id: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub status_code: Option<String>,
    #[serde(default)]
    pub status_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub proof_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    #[serde(default)]
    pub order_hdr_id: Option<OrderId>,
    #[serde(default)]
    pub matl_id: Option<MaterialId>,
    pub rating: u8,
    pub review: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub is_approved: Option<bool>,
    pub created_at: Timestamp,
    #[serde(default)]
    pub images: Option<Vec<String>>,
}

/// Province from the shipping rate provider. Ids are provider-issued strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Province {
    pub province_id: String,
    pub province: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub city_id: String,
    pub province_id: String,
    pub province: String,
    #[serde(rename = "type")]
    pub city_type: String,
    pub city_name: String,
    pub postal_code: String,
}

/// One courier service tier with its cost and delivery estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingCost {
    pub service: String,
    pub description: String,
    pub cost: Decimal,
    pub etd: String,
    #[serde(default)]
    pub note: Option<String>,
}
