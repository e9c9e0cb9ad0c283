//! IP-based geolocation, the terminal stand-in for a platform
//! position API. One best-effort GET against ipinfo.io; failures
//! surface through [`ApiError`] like any weather fetch.

use serde::Deserialize;

use crate::error::ApiError;

const IPINFO_URL: &str = "https://ipinfo.io/json";

/// A resolved position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
struct IpinfoResponse {
    /// "latitude,longitude"
    loc: String,
}

/// Resolve the machine's position from its public IP.
pub async fn current_position() -> Result<Coordinates, ApiError> {
    fetch_position(IPINFO_URL).await
}

async fn fetch_position(url: &str) -> Result<Coordinates, ApiError> {
    tracing::debug!("resolving position from public IP");

    let res = reqwest::Client::new()
        .get(url)
        .send()
        .await
        .map_err(ApiError::Network)?;

    let status = res.status();
    let body = res.text().await.map_err(ApiError::Network)?;

    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            body: truncate_body(&body),
        });
    }

    let parsed: IpinfoResponse =
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))?;

    parse_loc(&parsed.loc)
}

fn parse_loc(loc: &str) -> Result<Coordinates, ApiError> {
    let (lat, lon) = loc
        .split_once(',')
        .ok_or_else(|| ApiError::Decode(format!("bad loc field '{loc}'")))?;

    let lat = lat
        .trim()
        .parse()
        .map_err(|_| ApiError::Decode(format!("bad latitude in loc field '{loc}'")))?;
    let lon = lon
        .trim()
        .parse()
        .map_err(|_| ApiError::Decode(format!("bad longitude in loc field '{loc}'")))?;

    Ok(Coordinates { lat, lon })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiErrorKind;
    use serde_json::json;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn parse_loc_accepts_lat_lon_pair() {
        let pos = parse_loc("31.5204,74.3587").expect("loc must parse");
        assert_eq!(pos.lat, 31.5204);
        assert_eq!(pos.lon, 74.3587);
    }

    #[test]
    fn parse_loc_rejects_garbage() {
        assert_eq!(parse_loc("no-comma").unwrap_err().kind(), ApiErrorKind::Decode);
        assert_eq!(parse_loc("31.5,east").unwrap_err().kind(), ApiErrorKind::Decode);
    }

    #[tokio::test]
    async fn fetch_position_parses_ipinfo_response() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "city": "Lahore",
                "loc": "31.5,74.3",
                "timezone": "Asia/Karachi"
            })))
            .mount(&server)
            .await;

        let pos = fetch_position(&server.uri()).await.expect("must resolve");
        assert_eq!(pos, Coordinates { lat: 31.5, lon: 74.3 });
    }

    #[tokio::test]
    async fn fetch_position_surfaces_http_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let err = fetch_position(&server.uri()).await.unwrap_err();
        assert_eq!(err.kind(), ApiErrorKind::Status);
    }
}
