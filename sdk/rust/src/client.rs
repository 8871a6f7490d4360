use reqwest::{Client, Response, Url};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub name: String,
    pub price_per_person: f64,
}

pub struct FeedClient {
    client: Client,
    base_url: String,
}

impl FeedClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::builder().no_proxy().build().unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the static hero.
    pub async fn get_hero(&self) -> Result<Hero, Box<dyn std::error::Error>> {
        let resp = self.get(&["hero", "get-hero"], "application/json").await?;
        decode(resp).await
    }

    /// Collect every restaurant priced at or below `price`, logged under `uid`.
    pub async fn restaurants(&self, uid: &str, price: &str) -> Result<Vec<Restaurant>, Box<dyn std::error::Error>> {
        let resp = self
            .get(&[uid, "restaurants", price], "application/json")
            .await?;
        decode(resp).await
    }

    /// Same as [`FeedClient::restaurants`] but over newline-delimited JSON.
    pub async fn restaurants_ndjson(&self, uid: &str, price: &str) -> Result<Vec<Restaurant>, Box<dyn std::error::Error>> {
        let resp = self
            .get(&[uid, "restaurants", price], "application/x-ndjson")
            .await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(format!("Service returned error status {}: {}", status, text).into());
        }

        let mut items = Vec::new();
        for line in text.lines().filter(|l| !l.is_empty()) {
            items.push(serde_json::from_str(line)?);
        }
        Ok(items)
    }

    /// Raw GET with an explicit `Accept` header. Each segment is
    /// percent-encoded onto the base URL.
    pub async fn get(&self, segments: &[&str], accept: &str) -> Result<Response, Box<dyn std::error::Error>> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| format!("{} cannot be used as a base URL", self.base_url))?
            .pop_if_empty()
            .extend(segments);

        let resp = self.client.get(url).header("Accept", accept).send().await?;
        Ok(resp)
    }
}

async fn decode<T: serde::de::DeserializeOwned>(resp: Response) -> Result<T, Box<dyn std::error::Error>> {
    let status = resp.status();
    let text = resp.text().await?;

    if !status.is_success() {
        return Err(format!("Service returned error status {}: {}", status, text).into());
    }

    Ok(serde_json::from_str(&text)?)
}
