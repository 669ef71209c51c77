// src/core/net.rs

// Blocking HTTPS GET against stats.nba.com. The endpoint rejects requests that
// don't look like they come from the nba.com site, hence the header set.

use std::time::{ Duration, Instant };

use reqwest::blocking::Client;
use reqwest::header::{ HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, ORIGIN, REFERER };

use crate::config::consts::{ ORIGIN as ORIGIN_URL, REFERER as REFERER_URL, STATS_BASE, USER_AGENT };
use crate::error::ProviderError;

pub struct StatsHttp {
    client: Client,
}

impl StatsHttp {
    pub fn new(timeout: Duration) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(REFERER, HeaderValue::from_static(REFERER_URL));
        headers.insert(ORIGIN, HeaderValue::from_static(ORIGIN_URL));
        headers.insert("x-nba-stats-origin", HeaderValue::from_static("stats"));
        headers.insert("x-nba-stats-token", HeaderValue::from_static("true"));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Http { url: s!(STATS_BASE), source: e })?;

        Ok(Self { client })
    }

    /// GET `<STATS_BASE><endpoint>?<query>` and return the body. Non-2xx is an error.
    pub fn get(&self, endpoint: &str, query: &[(&str, String)]) -> Result<String, ProviderError> {
        let url = join!(STATS_BASE, endpoint);
        let t = Instant::now();

        let body = self.client
            .get(&url)
            .query(query)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.text())
            .map_err(|e| ProviderError::Http { url: url.clone(), source: e })?;

        logd!("Net: GET {} {:?} ({} bytes) in {:?}", endpoint, query, body.len(), t.elapsed());
        Ok(body)
    }
}
