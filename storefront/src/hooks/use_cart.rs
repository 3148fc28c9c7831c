use std::sync::atomic::{AtomicU64, Ordering};

use payloads::{ApiError, Cart, CartItemId, requests, responses};

use crate::fetch::{Fetch, FetchOptions, FocusSignal};
use crate::session::Session;

/// How often the header badge re-checks the cart item count.
const CART_COUNT_REFRESH: std::time::Duration = std::time::Duration::from_secs(30);

/// The server-side cart with its mutators. Every successful mutation bumps
/// the mutate key, which revalidates the cart fetch.
pub struct CartHandle {
    session: Session,
    fetch: Fetch<Option<Cart>, u64>,
    mutate_key: AtomicU64,
}

/// The authenticated user's cart. Resolves to `None` without a login; pass
/// a [`FocusSignal`] to revalidate when the app regains focus.
pub fn use_cart(session: Session, focus: Option<FocusSignal>) -> CartHandle {
    let options = FetchOptions {
        focus,
        ..FetchOptions::enabled()
    };
    let fetch_session = session.clone();
    let fetch = Fetch::new(
        0u64,
        move |_mutate_key| {
            let session = fetch_session.clone();
            async move {
                let Some(token) = session.token() else {
                    return Ok(None);
                };
                let response = session.client().get_cart(&token).await?;
                Ok(response.data)
            }
        },
        options,
    );
    CartHandle {
        session,
        fetch,
        mutate_key: AtomicU64::new(0),
    }
}

impl CartHandle {
    pub fn fetch(&self) -> &Fetch<Option<Cart>, u64> {
        &self.fetch
    }

    pub async fn add(
        &self,
        details: &requests::AddToCart,
    ) -> Result<responses::CartItemAdded, ApiError> {
        let token = self.require_token()?;
        let response = self.session.client().add_cart_item(details, &token).await?;
        let added = response
            .data
            .ok_or_else(|| ApiError::Validation("add to cart returned no data".to_string()))?;
        self.mutate();
        Ok(added)
    }

    pub async fn update_item(
        &self,
        id: CartItemId,
        details: &requests::UpdateCartItem,
    ) -> Result<(), ApiError> {
        let token = self.require_token()?;
        self.session
            .client()
            .update_cart_item(id, details, &token)
            .await?;
        self.mutate();
        Ok(())
    }

    pub async fn remove_item(&self, id: CartItemId) -> Result<(), ApiError> {
        let token = self.require_token()?;
        self.session.client().remove_cart_item(id, &token).await?;
        self.mutate();
        Ok(())
    }

    pub async fn clear(&self) -> Result<(), ApiError> {
        let token = self.require_token()?;
        self.session.client().clear_cart(&token).await?;
        self.mutate();
        Ok(())
    }

    /// Force a revalidation, e.g. after login or checkout.
    pub fn mutate(&self) {
        let key = self.mutate_key.fetch_add(1, Ordering::SeqCst) + 1;
        self.fetch.update_deps(key);
    }

    fn require_token(&self) -> Result<String, ApiError> {
        self.session
            .token()
            .ok_or_else(|| ApiError::Validation("not logged in".to_string()))
    }
}

/// Item count for the header badge, polled every 30 seconds. Resolves to
/// `None` without a login.
pub fn use_cart_count(session: Session) -> Fetch<Option<u32>> {
    let options = FetchOptions {
        refresh_interval: Some(CART_COUNT_REFRESH),
        ..FetchOptions::enabled()
    };
    Fetch::new(
        (),
        move |()| {
            let session = session.clone();
            async move {
                let Some(token) = session.token() else {
                    return Ok(None);
                };
                let response = session.client().cart_count(&token).await?;
                Ok(response.data.map(|c| c.count))
            }
        },
        options,
    )
}
