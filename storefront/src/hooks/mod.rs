//! Per-resource data hooks built on the [`Fetch`](crate::fetch::Fetch)
//! engine. Each constructs a live value over the API client (or, for
//! authenticated resources, the [`Session`](crate::session::Session)) with
//! that resource's revalidation defaults baked in.

pub mod use_banners;
pub mod use_cart;
pub mod use_materials;
pub mod use_orders;
pub mod use_payments;
pub mod use_reviews;
pub mod use_shipping;

pub use use_banners::{use_active_banners, use_banner, use_banner_materials, use_banners};
pub use use_cart::{CartHandle, use_cart, use_cart_count};
pub use use_materials::{
    use_brands, use_categories, use_colors, use_material, use_materials, use_promotions,
    use_sizes,
};
pub use use_orders::{use_order, use_orders};
pub use use_payments::{use_payment_methods, use_payments};
pub use use_reviews::{use_review_statistics, use_reviews};
pub use use_shipping::{use_cities, use_provinces};
