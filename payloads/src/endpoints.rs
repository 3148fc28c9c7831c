//! Endpoint registry: relative path templates for every API area, plus the
//! query-string builder. Paths are relative to [`BASE_PATH`]; the client
//! joins them with the configured origin in
//! [`APIClient::format_url`](crate::api_client::APIClient).

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Fixed API prefix shared by every endpoint.
pub const BASE_PATH: &str = "/api/v1/trdretail1";

pub mod auth {
    pub const REGISTER: &str = "auth/register";
    pub const LOGIN: &str = "auth/login";
    pub const LOGOUT: &str = "auth/logout";
    pub const VERIFY_EMAIL: &str = "auth/verify-email";
    pub const RESEND_VERIFICATION: &str = "auth/resend-verification";
    pub const PROFILE: &str = "auth/profile";
    pub const UPDATE_PROFILE: &str = "auth/profile";
    pub const CHANGE_PASSWORD: &str = "auth/change-password";
}

pub mod banners {
    use crate::BannerId;

    pub const LIST: &str = "banners";
    pub const ACTIVE: &str = "banners/active";

    pub fn detail(id: BannerId) -> String {
        format!("banners/{id}")
    }

    pub fn materials(id: BannerId) -> String {
        format!("banners/{id}/materials")
    }
}

pub mod materials {
    use crate::MaterialId;

    pub const LIST: &str = "materials";
    pub const PROMOTIONS: &str = "materials/promotions";
    pub const CATEGORIES: &str = "materials/categories";
    pub const BRANDS: &str = "materials/brands";
    pub const SIZES: &str = "materials/sizes";
    pub const COLORS: &str = "materials/colors";

    pub fn detail(id: MaterialId) -> String {
        format!("materials/{id}")
    }
}

pub mod cart {
    use crate::CartItemId;

    pub const GET: &str = "cart";
    pub const ADD: &str = "cart/add";
    pub const COUNT: &str = "cart/count";
    pub const CLEAR: &str = "cart/clear";

    pub fn item(id: CartItemId) -> String {
        format!("cart/items/{id}")
    }
}

pub mod orders {
    use crate::OrderId;

    pub const LIST: &str = "orders";
    pub const CHECKOUT: &str = "orders/checkout";

    pub fn detail(id: OrderId) -> String {
        format!("orders/{id}")
    }

    pub fn cancel(id: OrderId) -> String {
        format!("orders/{id}/cancel")
    }
}

pub mod payments {
    use crate::PaymentId;

    pub const LIST: &str = "payments";
    pub const UPLOAD_PROOF: &str = "payments";
    pub const METHODS: &str = "payments/methods";

    pub fn detail(id: PaymentId) -> String {
        format!("payments/{id}")
    }
}

pub mod reviews {
    use crate::MaterialId;

    pub const LIST: &str = "reviews";
    pub const CREATE: &str = "reviews";

    pub fn statistics(matl_id: MaterialId) -> String {
        format!("reviews/statistics/{matl_id}")
    }
}

pub mod shipping {
    pub const PROVINCES: &str = "shipping/provinces";
    pub const CITIES: &str = "shipping/cities";
    pub const CALCULATE: &str = "shipping/calculate";
    pub const CALCULATE_MULTIPLE: &str = "shipping/calculate-multiple";
    pub const CHEAPEST: &str = "shipping/cheapest";
}

/// Everything except RFC 3986 unreserved characters gets percent-encoded,
/// so a space becomes `%20`, never `+`.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Flatten optional key/value pairs into a query string.
///
/// Pairs whose value is `None` or an empty string are omitted entirely
/// rather than sent as empty parameters. Returns an empty string when
/// nothing survives the filter, otherwise `?k=v&...`.
pub fn build_query_string(pairs: &[(&str, Option<String>)]) -> String {
    let mut query = String::new();
    for (key, value) in pairs {
        let Some(value) = value else { continue };
        if value.is_empty() {
            continue;
        }
        query.push(if query.is_empty() { '?' } else { '&' });
        query.push_str(key);
        query.push('=');
        query.push_str(&utf8_percent_encode(value, QUERY_ENCODE_SET).to_string());
    }
    query
}
