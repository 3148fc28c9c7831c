use payloads::{APIClient, ApiError, Material, MaterialId, requests, responses};

use crate::fetch::{Fetch, FetchOptions};

/// Catalog listing. Updating the deps with new filters refetches the page.
pub fn use_materials(
    client: APIClient,
    filters: requests::MaterialFilters,
) -> Fetch<responses::PaginatedResponse<Material>, requests::MaterialFilters> {
    Fetch::new(
        filters,
        move |filters| {
            let client = client.clone();
            async move {
                let response = client.list_materials(&filters).await?;
                Ok(response.data.unwrap_or_default())
            }
        },
        FetchOptions::enabled(),
    )
}

pub fn use_material(client: APIClient, id: MaterialId) -> Fetch<Material, MaterialId> {
    Fetch::new(
        id,
        move |id| {
            let client = client.clone();
            async move {
                let response = client.get_material(id).await?;
                response
                    .data
                    .ok_or_else(|| ApiError::Validation("material not found".to_string()))
            }
        },
        FetchOptions::enabled(),
    )
}

pub fn use_promotions(
    client: APIClient,
    filters: requests::MaterialFilters,
) -> Fetch<responses::PaginatedResponse<Material>, requests::MaterialFilters> {
    Fetch::new(
        filters,
        move |filters| {
            let client = client.clone();
            async move {
                let response = client.list_promotions(&filters).await?;
                Ok(response.data.unwrap_or_default())
            }
        },
        FetchOptions::enabled(),
    )
}

pub fn use_categories(client: APIClient) -> Fetch<Vec<String>> {
    Fetch::new(
        (),
        move |()| {
            let client = client.clone();
            async move {
                let response = client.list_categories().await?;
                Ok(response.data.unwrap_or_default())
            }
        },
        FetchOptions::enabled(),
    )
}

pub fn use_brands(client: APIClient) -> Fetch<Vec<String>> {
    Fetch::new(
        (),
        move |()| {
            let client = client.clone();
            async move {
                let response = client.list_brands().await?;
                Ok(response.data.unwrap_or_default())
            }
        },
        FetchOptions::enabled(),
    )
}

pub fn use_sizes(client: APIClient) -> Fetch<Vec<String>> {
    Fetch::new(
        (),
        move |()| {
            let client = client.clone();
            async move {
                let response = client.list_sizes().await?;
                Ok(response.data.unwrap_or_default())
            }
        },
        FetchOptions::enabled(),
    )
}

pub fn use_colors(client: APIClient) -> Fetch<Vec<responses::ColorOption>> {
    Fetch::new(
        (),
        move |()| {
            let client = client.clone();
            async move {
                let response = client.list_colors().await?;
                Ok(response.data.unwrap_or_default())
            }
        },
        FetchOptions::enabled(),
    )
}
