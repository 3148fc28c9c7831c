use payloads::{APIClient, City, Province};

use crate::fetch::{Fetch, FetchOptions};

pub fn use_provinces(client: APIClient) -> Fetch<Vec<Province>> {
    Fetch::new(
        (),
        move |()| {
            let client = client.clone();
            async move {
                let response = client.list_provinces().await?;
                Ok(response.data.unwrap_or_default())
            }
        },
        FetchOptions::enabled(),
    )
}

/// Cities within a province. Starts disabled when no province is chosen;
/// once the user picks one, call `update_deps(Some(id))` and
/// `set_enabled(true)`.
pub fn use_cities(
    client: APIClient,
    province_id: Option<String>,
) -> Fetch<Vec<City>, Option<String>> {
    let options = FetchOptions {
        enabled: province_id.is_some(),
        ..Default::default()
    };
    Fetch::new(
        province_id,
        move |province_id: Option<String>| {
            let client = client.clone();
            async move {
                let response = client.list_cities(province_id.as_deref()).await?;
                Ok(response.data.unwrap_or_default())
            }
        },
        options,
    )
}
