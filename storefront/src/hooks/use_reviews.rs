use payloads::{APIClient, ApiError, MaterialId, Review, requests, responses};

use crate::fetch::{Fetch, FetchOptions};

pub fn use_reviews(
    client: APIClient,
    filters: requests::ReviewFilters,
) -> Fetch<responses::PaginatedResponse<Review>, requests::ReviewFilters> {
    Fetch::new(
        filters,
        move |filters| {
            let client = client.clone();
            async move {
                let response = client.list_reviews(&filters).await?;
                Ok(response.data.unwrap_or_default())
            }
        },
        FetchOptions::enabled(),
    )
}

pub fn use_review_statistics(
    client: APIClient,
    matl_id: MaterialId,
) -> Fetch<responses::ReviewStatistics, MaterialId> {
    Fetch::new(
        matl_id,
        move |matl_id| {
            let client = client.clone();
            async move {
                let response = client.review_statistics(matl_id).await?;
                response.data.ok_or_else(|| {
                    ApiError::Validation("review statistics had no data".to_string())
                })
            }
        },
        FetchOptions::enabled(),
    )
}
