use std::collections::BTreeMap;

use reqwest::StatusCode;
use reqwest::multipart::Form;
use serde::Serialize;
use serde_json::Value;

use crate::{
    Banner, BannerId, Cart, CartItemId, Material, MaterialId, Order, OrderId, PaymentId,
    PaymentInfo, PaymentMethod, Province, Review, User, endpoints, requests, responses,
};
use crate::City;
use crate::responses::{ApiResponse, PaginatedResponse};

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// An API client for interfacing with the storefront backend.
#[derive(Debug, Clone)]
pub struct APIClient {
    /// Base origin, e.g. `https://shop.example.com`. May be empty for
    /// same-origin use behind a proxy.
    pub address: String,
    pub inner_client: reqwest::Client,
}

/// Helper methods for http actions
impl APIClient {
    fn format_url(&self, path: &str) -> String {
        format!("{}{}/{path}", &self.address, endpoints::BASE_PATH)
    }

    async fn get(&self, path: &str, token: Option<&str>) -> ReqwestResult {
        let mut request = self.inner_client.get(self.format_url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await
    }

    async fn post(
        &self,
        path: &str,
        body: &impl Serialize,
        token: Option<&str>,
    ) -> ReqwestResult {
        let mut request = self.inner_client.post(self.format_url(path)).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await
    }

    async fn put(
        &self,
        path: &str,
        body: &impl Serialize,
        token: Option<&str>,
    ) -> ReqwestResult {
        let mut request = self.inner_client.put(self.format_url(path)).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await
    }

    async fn delete(&self, path: &str, token: Option<&str>) -> ReqwestResult {
        let mut request = self.inner_client.delete(self.format_url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await
    }

    /// Multipart upload. The form body is passed through unmodified; reqwest
    /// sets the multipart content type itself.
    async fn upload(&self, path: &str, form: Form, token: Option<&str>) -> ReqwestResult {
        let mut request = self.inner_client.post(self.format_url(path)).multipart(form);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await
    }
}

/// Authentication operations
impl APIClient {
    pub async fn register(
        &self,
        details: &requests::Register,
    ) -> Result<ApiResponse<responses::RegisterResponse>, ApiError> {
        let response = self.post(endpoints::auth::REGISTER, details, None).await;
        ok_envelope(response).await
    }

    pub async fn login(
        &self,
        credentials: &requests::Login,
    ) -> Result<ApiResponse<responses::LoginResponse>, ApiError> {
        let response = self.post(endpoints::auth::LOGIN, credentials, None).await;
        ok_envelope(response).await
    }

    pub async fn logout(&self, token: &str) -> Result<ApiResponse<Value>, ApiError> {
        let response = self
            .post(endpoints::auth::LOGOUT, &serde_json::json!({}), Some(token))
            .await;
        ok_envelope(response).await
    }

    /// Verify email address using the code from the verification email.
    pub async fn verify_email(
        &self,
        details: &requests::VerifyEmail,
    ) -> Result<ApiResponse<Value>, ApiError> {
        let response = self.post(endpoints::auth::VERIFY_EMAIL, details, None).await;
        ok_envelope(response).await
    }

    /// Resend the email verification code for the given address.
    pub async fn resend_verification_email(
        &self,
        email: &str,
    ) -> Result<ApiResponse<Value>, ApiError> {
        let response = self
            .post(
                endpoints::auth::RESEND_VERIFICATION,
                &serde_json::json!({ "email": email }),
                None,
            )
            .await;
        ok_envelope(response).await
    }

    /// Get the current user's profile information.
    pub async fn user_profile(&self, token: &str) -> Result<ApiResponse<User>, ApiError> {
        let response = self.get(endpoints::auth::PROFILE, Some(token)).await;
        ok_envelope(response).await
    }

    pub async fn update_profile(
        &self,
        details: &requests::UpdateProfile,
        token: &str,
    ) -> Result<ApiResponse<User>, ApiError> {
        let response = self
            .put(endpoints::auth::UPDATE_PROFILE, details, Some(token))
            .await;
        ok_envelope(response).await
    }

    pub async fn change_password(
        &self,
        details: &requests::ChangePassword,
        token: &str,
    ) -> Result<ApiResponse<Value>, ApiError> {
        let response = self
            .put(endpoints::auth::CHANGE_PASSWORD, details, Some(token))
            .await;
        ok_envelope(response).await
    }
}

/// Banner operations
impl APIClient {
    pub async fn list_banners(
        &self,
        filters: &requests::BannerFilters,
    ) -> Result<ApiResponse<responses::BannerList>, ApiError> {
        let path = format!("{}{}", endpoints::banners::LIST, filters.to_query());
        let response = self.get(&path, None).await;
        ok_envelope(response).await
    }

    /// Banners currently inside their display window, for the homepage.
    pub async fn active_banners(&self) -> Result<ApiResponse<Vec<Banner>>, ApiError> {
        let response = self.get(endpoints::banners::ACTIVE, None).await;
        ok_envelope(response).await
    }

    pub async fn get_banner(&self, id: BannerId) -> Result<ApiResponse<Banner>, ApiError> {
        let response = self.get(&endpoints::banners::detail(id), None).await;
        ok_envelope(response).await
    }

    pub async fn banner_materials(
        &self,
        id: BannerId,
    ) -> Result<ApiResponse<Vec<Material>>, ApiError> {
        let response = self.get(&endpoints::banners::materials(id), None).await;
        ok_envelope(response).await
    }
}

/// Material (catalog) operations
impl APIClient {
    pub async fn list_materials(
        &self,
        filters: &requests::MaterialFilters,
    ) -> Result<ApiResponse<PaginatedResponse<Material>>, ApiError> {
        let path = format!("{}{}", endpoints::materials::LIST, filters.to_query());
        let response = self.get(&path, None).await;
        ok_envelope(response).await
    }

    pub async fn get_material(
        &self,
        id: MaterialId,
    ) -> Result<ApiResponse<Material>, ApiError> {
        let response = self.get(&endpoints::materials::detail(id), None).await;
        ok_envelope(response).await
    }

    pub async fn list_promotions(
        &self,
        filters: &requests::MaterialFilters,
    ) -> Result<ApiResponse<PaginatedResponse<Material>>, ApiError> {
        let path = format!("{}{}", endpoints::materials::PROMOTIONS, filters.to_query());
        let response = self.get(&path, None).await;
        ok_envelope(response).await
    }

    pub async fn list_categories(&self) -> Result<ApiResponse<Vec<String>>, ApiError> {
        let response = self.get(endpoints::materials::CATEGORIES, None).await;
        ok_envelope(response).await
    }

    pub async fn list_brands(&self) -> Result<ApiResponse<Vec<String>>, ApiError> {
        let response = self.get(endpoints::materials::BRANDS, None).await;
        ok_envelope(response).await
    }

    pub async fn list_sizes(&self) -> Result<ApiResponse<Vec<String>>, ApiError> {
        let response = self.get(endpoints::materials::SIZES, None).await;
        ok_envelope(response).await
    }

    pub async fn list_colors(
        &self,
    ) -> Result<ApiResponse<Vec<responses::ColorOption>>, ApiError> {
        let response = self.get(endpoints::materials::COLORS, None).await;
        ok_envelope(response).await
    }
}

/// Cart operations
impl APIClient {
    pub async fn get_cart(&self, token: &str) -> Result<ApiResponse<Cart>, ApiError> {
        let response = self.get(endpoints::cart::GET, Some(token)).await;
        ok_envelope(response).await
    }

    pub async fn add_cart_item(
        &self,
        details: &requests::AddToCart,
        token: &str,
    ) -> Result<ApiResponse<responses::CartItemAdded>, ApiError> {
        let response = self.post(endpoints::cart::ADD, details, Some(token)).await;
        ok_envelope(response).await
    }

    pub async fn update_cart_item(
        &self,
        id: CartItemId,
        details: &requests::UpdateCartItem,
        token: &str,
    ) -> Result<ApiResponse<Value>, ApiError> {
        let response = self.put(&endpoints::cart::item(id), details, Some(token)).await;
        ok_envelope(response).await
    }

    pub async fn remove_cart_item(
        &self,
        id: CartItemId,
        token: &str,
    ) -> Result<ApiResponse<Value>, ApiError> {
        let response = self.delete(&endpoints::cart::item(id), Some(token)).await;
        ok_envelope(response).await
    }

    pub async fn cart_count(
        &self,
        token: &str,
    ) -> Result<ApiResponse<responses::CartCount>, ApiError> {
        let response = self.get(endpoints::cart::COUNT, Some(token)).await;
        ok_envelope(response).await
    }

    pub async fn clear_cart(&self, token: &str) -> Result<ApiResponse<Value>, ApiError> {
        let response = self.delete(endpoints::cart::CLEAR, Some(token)).await;
        ok_envelope(response).await
    }
}

/// Order operations
impl APIClient {
    pub async fn list_orders(
        &self,
        filters: &requests::OrderFilters,
        token: &str,
    ) -> Result<ApiResponse<PaginatedResponse<Order>>, ApiError> {
        let path = format!("{}{}", endpoints::orders::LIST, filters.to_query());
        let response = self.get(&path, Some(token)).await;
        ok_envelope(response).await
    }

    pub async fn get_order(
        &self,
        id: OrderId,
        token: &str,
    ) -> Result<ApiResponse<Order>, ApiError> {
        let response = self.get(&endpoints::orders::detail(id), Some(token)).await;
        ok_envelope(response).await
    }

    /// Create an order from the current cart contents.
    pub async fn checkout(
        &self,
        details: &requests::Checkout,
        token: &str,
    ) -> Result<ApiResponse<responses::CheckoutResponse>, ApiError> {
        let response = self
            .post(endpoints::orders::CHECKOUT, details, Some(token))
            .await;
        ok_envelope(response).await
    }

    pub async fn cancel_order(
        &self,
        id: OrderId,
        details: &requests::CancelOrder,
        token: &str,
    ) -> Result<ApiResponse<Value>, ApiError> {
        let response = self
            .post(&endpoints::orders::cancel(id), details, Some(token))
            .await;
        ok_envelope(response).await
    }
}

/// Payment operations
impl APIClient {
    pub async fn payment_methods(
        &self,
        token: &str,
    ) -> Result<ApiResponse<Vec<PaymentMethod>>, ApiError> {
        let response = self.get(endpoints::payments::METHODS, Some(token)).await;
        ok_envelope(response).await
    }

    pub async fn upload_payment_proof(
        &self,
        details: requests::UploadPaymentProof,
        token: &str,
    ) -> Result<ApiResponse<responses::ProofUpload>, ApiError> {
        let response = self
            .upload(endpoints::payments::UPLOAD_PROOF, details.into_form(), Some(token))
            .await;
        ok_envelope(response).await
    }

    pub async fn list_payments(
        &self,
        token: &str,
    ) -> Result<ApiResponse<Vec<PaymentInfo>>, ApiError> {
        let response = self.get(endpoints::payments::LIST, Some(token)).await;
        ok_envelope(response).await
    }

    pub async fn get_payment(
        &self,
        id: PaymentId,
        token: &str,
    ) -> Result<ApiResponse<PaymentInfo>, ApiError> {
        let response = self.get(&endpoints::payments::detail(id), Some(token)).await;
        ok_envelope(response).await
    }
}

/// Review operations
impl APIClient {
    pub async fn list_reviews(
        &self,
        filters: &requests::ReviewFilters,
    ) -> Result<ApiResponse<PaginatedResponse<Review>>, ApiError> {
        let path = format!("{}{}", endpoints::reviews::LIST, filters.to_query());
        let response = self.get(&path, None).await;
        ok_envelope(response).await
    }

    pub async fn create_review(
        &self,
        details: &requests::CreateReview,
        token: &str,
    ) -> Result<ApiResponse<Review>, ApiError> {
        let response = self.post(endpoints::reviews::CREATE, details, Some(token)).await;
        ok_envelope(response).await
    }

    pub async fn review_statistics(
        &self,
        matl_id: MaterialId,
    ) -> Result<ApiResponse<responses::ReviewStatistics>, ApiError> {
        let response = self.get(&endpoints::reviews::statistics(matl_id), None).await;
        ok_envelope(response).await
    }
}

/// Shipping operations
impl APIClient {
    pub async fn list_provinces(&self) -> Result<ApiResponse<Vec<Province>>, ApiError> {
        let response = self.get(endpoints::shipping::PROVINCES, None).await;
        ok_envelope(response).await
    }

    pub async fn list_cities(
        &self,
        province_id: Option<&str>,
    ) -> Result<ApiResponse<Vec<City>>, ApiError> {
        let query = endpoints::build_query_string(&[(
            "province_id",
            province_id.map(str::to_string),
        )]);
        let path = format!("{}{query}", endpoints::shipping::CITIES);
        let response = self.get(&path, None).await;
        ok_envelope(response).await
    }

    pub async fn calculate_shipping(
        &self,
        details: &requests::CalculateShipping,
        token: &str,
    ) -> Result<ApiResponse<responses::CalculateShippingResponse>, ApiError> {
        let response = self
            .post(endpoints::shipping::CALCULATE, details, Some(token))
            .await;
        ok_envelope(response).await
    }

    pub async fn calculate_shipping_multiple(
        &self,
        details: &requests::CalculateMultiple,
        token: &str,
    ) -> Result<ApiResponse<Vec<responses::CalculateShippingResponse>>, ApiError> {
        let response = self
            .post(endpoints::shipping::CALCULATE_MULTIPLE, details, Some(token))
            .await;
        ok_envelope(response).await
    }

    pub async fn cheapest_shipping(
        &self,
        details: &requests::CalculateMultiple,
        token: &str,
    ) -> Result<ApiResponse<responses::CheapestShippingResponse>, ApiError> {
        let response = self
            .post(endpoints::shipping::CHEAPEST, details, Some(token))
            .await;
        ok_envelope(response).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-2xx response, decoded from the envelope.
    #[error("{message}")]
    Api {
        status: StatusCode,
        message: String,
        /// Field-level validation errors, keyed by input field name.
        errors: Option<BTreeMap<String, Vec<String>>>,
    },
    /// The transport call itself failed: connection refused, timeout, or a
    /// body that was not well-formed JSON.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Raised before any network call is attempted.
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// HTTP status code, or 0 for failures with no HTTP response.
    pub fn status(&self) -> u16 {
        match self {
            Self::Api { status, .. } => status.as_u16(),
            Self::Network(_) | Self::Validation(_) => 0,
        }
    }

    pub fn field_errors(&self) -> Option<&BTreeMap<String, Vec<String>>> {
        match self {
            Self::Api { errors, .. } => errors.as_ref(),
            _ => None,
        }
    }
}

/// Resolve an error to a single displayable message. The first field-level
/// validation error wins over the envelope's top-level message.
pub fn error_message(error: &ApiError) -> String {
    if let ApiError::Api {
        errors: Some(errors),
        message,
        ..
    } = error
    {
        if let Some(first) = errors.values().next().and_then(|messages| messages.first()) {
            return first.clone();
        }
        return message.clone();
    }
    error.to_string()
}

/// Decode a response into the envelope, or an appropriate error.
///
/// The body is parsed before the status check so that non-2xx responses can
/// surface the envelope's message and field errors. A body that fails to
/// parse is a transport failure regardless of status.
pub async fn ok_envelope<T: serde::de::DeserializeOwned>(
    result: ReqwestResult,
) -> Result<ApiResponse<T>, ApiError> {
    let response = result?;
    let status = response.status();
    let envelope: ApiResponse<T> = response.json().await?;
    if !status.is_success() {
        return Err(ApiError::Api {
            status,
            message: envelope
                .message
                .unwrap_or_else(|| "API request failed".to_string()),
            errors: envelope.errors,
        });
    }
    Ok(envelope)
}
