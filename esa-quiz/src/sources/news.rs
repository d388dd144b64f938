//! News feed search client
//!
//! Queries an RSS search endpoint (Google News by default) and parses the
//! returned document into [`NewsFeed`] items. Only `<item>` children are
//! read; channel-level `<title>`/`<link>` elements are ignored.

use super::{build_http_client, build_rate_limiter, check_status};
use crate::config::{NewsLocale, SourcesConfig};
use crate::types::{FeedItem, NewsFeed, NewsSource, SourceError};
use governor::DefaultDirectRateLimiter;
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::Client;
use tracing::debug;

/// RSS search client
pub struct NewsFeedClient {
    http_client: Client,
    feed_url: String,
    locale: NewsLocale,
    rate_limiter: DefaultDirectRateLimiter,
}

impl NewsFeedClient {
    pub fn new(config: &SourcesConfig) -> Result<Self, SourceError> {
        Ok(Self {
            http_client: build_http_client(config)?,
            feed_url: config.news_feed_url.clone(),
            locale: config.news_locale.clone(),
            rate_limiter: build_rate_limiter(config.requests_per_second),
        })
    }
}

#[async_trait::async_trait]
impl NewsSource for NewsFeedClient {
    fn name(&self) -> &'static str {
        "NewsFeed"
    }

    async fn search(&self, query: &str) -> Result<NewsFeed, SourceError> {
        self.rate_limiter.until_ready().await;

        debug!(query = %query, "Searching news feed");

        let response = self
            .http_client
            .get(&self.feed_url)
            .query(&[
                ("q", query),
                ("hl", self.locale.hl.as_str()),
                ("gl", self.locale.gl.as_str()),
                ("ceid", self.locale.ceid.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("News feed request failed: {}", e)))?;

        let response = check_status(response, "news feed").await?;

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Network(format!("News feed body read failed: {}", e)))?;

        let feed = parse_feed(&body)?;

        debug!(query = %query, items = feed.items.len(), "News feed parsed");

        Ok(feed)
    }
}

#[derive(Debug, Clone, Copy)]
enum ItemField {
    Title,
    Link,
}

/// Parse an RSS document into feed items
///
/// Documents without an `<rss>` or `<channel>` element (e.g. HTML error
/// pages) are rejected as [`SourceError::Parse`].
pub fn parse_feed(xml: &str) -> Result<NewsFeed, SourceError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut items = Vec::new();
    let mut current: Option<FeedItem> = None;
    let mut field: Option<ItemField> = None;
    let mut is_rss = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"rss" | b"channel" => is_rss = true,
                b"item" => {
                    current = Some(FeedItem::default());
                    field = None;
                }
                b"title" if current.is_some() => field = Some(ItemField::Title),
                b"link" if current.is_some() => field = Some(ItemField::Link),
                _ => field = None,
            },
            Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"item" {
                    items.push(FeedItem::default());
                }
            }
            Ok(Event::Text(text)) => {
                if let (Some(item), Some(field)) = (current.as_mut(), field) {
                    let text = text
                        .unescape()
                        .map_err(|e| SourceError::Parse(format!("Bad feed text: {}", e)))?;
                    append_field(item, field, &text);
                }
            }
            Ok(Event::CData(data)) => {
                if let (Some(item), Some(field)) = (current.as_mut(), field) {
                    let bytes = data.into_inner();
                    append_field(item, field, &String::from_utf8_lossy(&bytes));
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"item" => {
                    if let Some(item) = current.take() {
                        items.push(item);
                    }
                    field = None;
                }
                b"title" | b"link" => field = None,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(SourceError::Parse(format!(
                    "Malformed feed at byte {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    if !is_rss {
        return Err(SourceError::Parse("Response is not an RSS document".to_string()));
    }

    Ok(NewsFeed { items })
}

fn append_field(item: &mut FeedItem, field: ItemField, text: &str) {
    let slot = match field {
        ItemField::Title => &mut item.title,
        ItemField::Link => &mut item.link,
    };
    slot.get_or_insert_with(String::new).push_str(text);
}
