use payloads::{PaymentInfo, PaymentMethod};

use crate::fetch::{Fetch, FetchOptions};
use crate::session::Session;

/// Available payment methods. Resolves to `None` without a login.
pub fn use_payment_methods(session: Session) -> Fetch<Option<Vec<PaymentMethod>>> {
    Fetch::new(
        (),
        move |()| {
            let session = session.clone();
            async move {
                let Some(token) = session.token() else {
                    return Ok(None);
                };
                let response = session.client().payment_methods(&token).await?;
                Ok(Some(response.data.unwrap_or_default()))
            }
        },
        FetchOptions::enabled(),
    )
}

/// The authenticated user's payment records.
pub fn use_payments(session: Session) -> Fetch<Option<Vec<PaymentInfo>>> {
    Fetch::new(
        (),
        move |()| {
            let session = session.clone();
            async move {
                let Some(token) = session.token() else {
                    return Ok(None);
                };
                let response = session.client().list_payments(&token).await?;
                Ok(Some(response.data.unwrap_or_default()))
            }
        },
        FetchOptions::enabled(),
    )
}
