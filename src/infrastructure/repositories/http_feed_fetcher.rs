use super::feed_fetcher::{FeedFetcher, FetchError};
use crate::domain::feed::{FeedDocument, FeedItem};
use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::Client;
use rss::Channel;
use std::time::Duration;

const USER_AGENT: &str = concat!("feed-aggregator/", env!("CARGO_PKG_VERSION"));

/// Fetches RSS 2.0 feeds over HTTP with a fixed per-request timeout
pub struct HttpFeedFetcher {
    client: Client,
}

impl HttpFeedFetcher {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl FeedFetcher for HttpFeedFetcher {
    async fn fetch(&self, url: &str) -> Result<FeedDocument, FetchError> {
        tracing::debug!(feed_url = url, "Fetching feed");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(FetchError::Transport)?;

        let body = response.bytes().await.map_err(FetchError::Body)?;

        let document = parse_document(&body)?;

        tracing::debug!(
            feed_url = url,
            items = document.items.len(),
            "Feed parsed"
        );

        Ok(document)
    }
}

/// Parse an RSS 2.0 body. Extensions and unknown elements are ignored; absent
/// fields become empty strings.
pub fn parse_document(body: &[u8]) -> Result<FeedDocument, FetchError> {
    let channel = Channel::read_from(body)?;
    ensure_root_closed(body)?;
    Ok(FeedDocument::from(channel))
}

/// `Channel::read_from` stops at `</channel>`, so a body cut off after it
/// still parses. Walk the whole document and require every element closed.
fn ensure_root_closed(body: &[u8]) -> Result<(), rss::Error> {
    let mut reader = Reader::from_reader(body);
    let mut buf = Vec::new();
    let mut depth: usize = 0;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => depth = depth.saturating_sub(1),
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(_) => return Err(rss::Error::Eof),
        }
        buf.clear();
    }

    if depth == 0 {
        Ok(())
    } else {
        Err(rss::Error::Eof)
    }
}

impl From<Channel> for FeedDocument {
    fn from(channel: Channel) -> Self {
        let items = channel
            .items()
            .iter()
            .map(|item| FeedItem {
                title: item.title().unwrap_or_default().to_string(),
                link: item.link().unwrap_or_default().to_string(),
                description: item.description().unwrap_or_default().to_string(),
                pub_date: item.pub_date().unwrap_or_default().to_string(),
            })
            .collect();

        FeedDocument {
            title: channel.title().to_string(),
            link: channel.link().to_string(),
            description: channel.description().to_string(),
            items,
        }
    }
}
