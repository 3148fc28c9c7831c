use payloads::{APIClient, ApiError, Banner, BannerId, Material, requests, responses};

use crate::fetch::{Fetch, FetchOptions};

/// How often the homepage banner rotation re-checks the active window.
const ACTIVE_BANNERS_REFRESH: std::time::Duration = std::time::Duration::from_secs(60);

/// Banners currently inside their display window, refreshed every minute so
/// a banner expiring mid-session drops out without a reload.
pub fn use_active_banners(client: APIClient) -> Fetch<Vec<Banner>> {
    let options = FetchOptions {
        refresh_interval: Some(ACTIVE_BANNERS_REFRESH),
        ..FetchOptions::enabled()
    };
    Fetch::new(
        (),
        move |()| {
            let client = client.clone();
            async move {
                let response = client.active_banners().await?;
                Ok(response.data.unwrap_or_default())
            }
        },
        options,
    )
}

pub fn use_banners(
    client: APIClient,
    filters: requests::BannerFilters,
) -> Fetch<responses::BannerList, requests::BannerFilters> {
    Fetch::new(
        filters,
        move |filters| {
            let client = client.clone();
            async move {
                let response = client.list_banners(&filters).await?;
                response
                    .data
                    .ok_or_else(|| ApiError::Validation("banner list had no data".to_string()))
            }
        },
        FetchOptions::enabled(),
    )
}

pub fn use_banner(client: APIClient, id: BannerId) -> Fetch<Banner, BannerId> {
    Fetch::new(
        id,
        move |id| {
            let client = client.clone();
            async move {
                let response = client.get_banner(id).await?;
                response
                    .data
                    .ok_or_else(|| ApiError::Validation("banner not found".to_string()))
            }
        },
        FetchOptions::enabled(),
    )
}

pub fn use_banner_materials(client: APIClient, id: BannerId) -> Fetch<Vec<Material>, BannerId> {
    Fetch::new(
        id,
        move |id| {
            let client = client.clone();
            async move {
                let response = client.banner_materials(id).await?;
                Ok(response.data.unwrap_or_default())
            }
        },
        FetchOptions::enabled(),
    )
}
