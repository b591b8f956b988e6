use gloo_net::http::Request;

use crate::error::{MapError, Result};
use crate::model::GeoData;
use crate::topology;

/// Fetches the topology document and decodes every group in it.
pub async fn load_geodata(url: &str) -> Result<GeoData> {
    let response = Request::get(url).send().await?;
    if !response.ok() {
        return Err(MapError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }
    let body = response.text().await?;
    let data = topology::decode_str(&body)?;
    log::info!(
        "loaded {} feature groups ({} features) from {}",
        data.groups.len(),
        data.groups.values().map(|g| g.features.len()).sum::<usize>(),
        url
    );
    Ok(data)
}
