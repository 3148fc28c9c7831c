//! Request payloads and filter records sent to the storefront API.

use reqwest::multipart::{Form, Part};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{MaterialId, OrderId, OrderStatus, UserId};
use crate::endpoints::build_query_string;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Register {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Login {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyEmail {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangePassword {
    pub current_password: String,
    pub password: String,
    pub password_confirmation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddToCart {
    pub matl_id: MaterialId,
    pub qty: u32,
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateCartItem {
    pub qty: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkout {
    pub shipping_address: String,
    pub shipping_city: String,
    pub shipping_postal_code: String,
    pub shipping_phone: String,
    pub shipping_cost: Decimal,
    pub shipping_courier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelOrder {
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateReview {
    pub order_hdr_id: OrderId,
    pub matl_id: MaterialId,
    pub rating: u8,
    pub review: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculateShipping {
    /// Origin city id from the rate provider.
    pub origin: u32,
    pub destination: u32,
    /// Total parcel weight in grams.
    pub weight: u32,
    pub courier: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculateMultiple {
    pub origin: u32,
    pub destination: u32,
    pub weight: u32,
    pub couriers: Vec<String>,
}

/// Proof-of-payment image attached to a manual bank transfer.
#[derive(Debug, Clone, PartialEq)]
pub struct ProofFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Multipart payment-proof submission. Unlike the JSON payloads this one is
/// sent as a form, so it converts itself into a [`reqwest::multipart::Form`].
#[derive(Debug, Clone, PartialEq)]
pub struct UploadPaymentProof {
    pub order_id: OrderId,
    pub partner_id: UserId,
    pub payment_method: String,
    pub amount: Decimal,
    pub payment_proof: ProofFile,
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
    pub account_name: Option<String>,
    pub notes: Option<String>,
}

impl UploadPaymentProof {
    pub fn into_form(self) -> Form {
        let mut form = Form::new()
            .text("order_id", self.order_id.to_string())
            .text("partner_id", self.partner_id.to_string())
            .text("payment_method", self.payment_method)
            .text("amount", self.amount.to_string())
            .part(
                "payment_proof",
                Part::bytes(self.payment_proof.bytes).file_name(self.payment_proof.filename),
            );
        if let Some(bank_name) = self.bank_name {
            form = form.text("bank_name", bank_name);
        }
        if let Some(account_number) = self.account_number {
            form = form.text("account_number", account_number);
        }
        if let Some(account_name) = self.account_name {
            form = form.text("account_name", account_name);
        }
        if let Some(notes) = self.notes {
            form = form.text("notes", notes);
        }
        form
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    Price,
    Name,
    CreatedAt,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Name => "name",
            Self::CreatedAt => "created_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Catalog listing filters. Unset fields are omitted from the query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialFilters {
    pub category: Option<String>,
    pub brand: Option<String>,
    pub search: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub is_promotion: Option<bool>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

impl MaterialFilters {
    pub fn to_query(&self) -> String {
        build_query_string(&[
            ("category", self.category.clone()),
            ("brand", self.brand.clone()),
            ("search", self.search.clone()),
            ("color", self.color.clone()),
            ("size", self.size.clone()),
            ("is_promotion", self.is_promotion.map(|v| v.to_string())),
            ("min_price", self.min_price.map(|v| v.to_string())),
            ("max_price", self.max_price.map(|v| v.to_string())),
            ("sort_by", self.sort_by.map(|v| v.as_str().to_string())),
            ("sort_order", self.sort_order.map(|v| v.as_str().to_string())),
            ("per_page", self.per_page.map(|v| v.to_string())),
            ("page", self.page.map(|v| v.to_string())),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderFilters {
    pub status_code: Option<OrderStatus>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl OrderFilters {
    pub fn to_query(&self) -> String {
        build_query_string(&[
            ("status_code", self.status_code.map(|v| v.as_str().to_string())),
            ("start_date", self.start_date.clone()),
            ("end_date", self.end_date.clone()),
            ("page", self.page.map(|v| v.to_string())),
            ("per_page", self.per_page.map(|v| v.to_string())),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewFilters {
    pub matl_id: Option<MaterialId>,
    pub rating: Option<u8>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ReviewFilters {
    pub fn to_query(&self) -> String {
        build_query_string(&[
            ("matl_id", self.matl_id.map(|v| v.to_string())),
            ("rating", self.rating.map(|v| v.to_string())),
            ("page", self.page.map(|v| v.to_string())),
            ("per_page", self.per_page.map(|v| v.to_string())),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BannerFilters {
    pub active_only: Option<bool>,
    pub per_page: Option<u32>,
    pub no_pagination: Option<bool>,
    pub page: Option<u32>,
}

impl BannerFilters {
    pub fn to_query(&self) -> String {
        build_query_string(&[
            ("active_only", self.active_only.map(|v| v.to_string())),
            ("per_page", self.per_page.map(|v| v.to_string())),
            ("no_pagination", self.no_pagination.map(|v| v.to_string())),
            ("page", self.page.map(|v| v.to_string())),
        ])
    }
}
