use payloads::{ApiError, Order, OrderId, requests, responses};

use crate::fetch::{Fetch, FetchOptions};
use crate::session::Session;

/// The authenticated user's order history. Resolves to `None` without a
/// login.
pub fn use_orders(
    session: Session,
    filters: requests::OrderFilters,
) -> Fetch<Option<responses::PaginatedResponse<Order>>, requests::OrderFilters> {
    Fetch::new(
        filters,
        move |filters| {
            let session = session.clone();
            async move {
                let Some(token) = session.token() else {
                    return Ok(None);
                };
                let response = session.client().list_orders(&filters, &token).await?;
                Ok(Some(response.data.unwrap_or_default()))
            }
        },
        FetchOptions::enabled(),
    )
}

pub fn use_order(session: Session, id: OrderId) -> Fetch<Option<Order>, OrderId> {
    Fetch::new(
        id,
        move |id| {
            let session = session.clone();
            async move {
                let Some(token) = session.token() else {
                    return Ok(None);
                };
                let response = session.client().get_order(id, &token).await?;
                let order = response
                    .data
                    .ok_or_else(|| ApiError::Validation("order not found".to_string()))?;
                Ok(Some(order))
            }
        },
        FetchOptions::enabled(),
    )
}
