use super::model::NewPost;
use crate::domain::feed::FeedItem;
use chrono::{DateTime, FixedOffset, Utc};
use uuid::Uuid;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum NormalizeError {
    #[error("failed to parse publish date {0:?}")]
    InvalidPublishDate(String),
}

/// Timestamp layouts accepted for `pubDate`, tried in this order
#[derive(Debug, Clone, Copy)]
enum DateLayout {
    /// `Mon, 02 Jan 2006 15:04:05 -0700`, `Mon, 02 Jan 2006 15:04:05 MST`
    /// and `02 Jan 06 15:04 MST`
    Rfc2822,
    /// `2006-01-02T15:04:05Z07:00`
    Rfc3339,
}

const LAYOUTS: [DateLayout; 2] = [DateLayout::Rfc2822, DateLayout::Rfc3339];

impl DateLayout {
    fn parse(self, value: &str) -> Option<DateTime<Utc>> {
        let parsed = match self {
            DateLayout::Rfc2822 => DateTime::parse_from_rfc2822(value)
                .ok()
                .or_else(|| parse_with_unlisted_zone(value)),
            DateLayout::Rfc3339 => DateTime::parse_from_rfc3339(value).ok(),
        };
        parsed.map(|dt| dt.with_timezone(&Utc))
    }
}

/// Parse a raw `pubDate` against every supported layout
pub fn parse_published_at(raw: &str) -> Result<DateTime<Utc>, NormalizeError> {
    let value = raw.trim();
    LAYOUTS
        .iter()
        .find_map(|layout| layout.parse(value))
        .ok_or_else(|| NormalizeError::InvalidPublishDate(raw.to_string()))
}

/// Turn a raw feed item into an insertable post.
///
/// Title, link and feed id pass through untouched; URL validity is the
/// store's concern. An empty description becomes `None`.
pub fn normalize(item: FeedItem, feed_id: Uuid) -> Result<NewPost, NormalizeError> {
    let published_at = parse_published_at(&item.pub_date)?;

    let description = if item.description.is_empty() {
        None
    } else {
        Some(item.description)
    };

    let now = Utc::now();
    Ok(NewPost {
        id: Uuid::new_v4(),
        title: item.title,
        description,
        published_at,
        url: item.link,
        feed_id,
        created_at: now,
        updated_at: now,
    })
}

// chrono only knows the zone names RFC 2822 lists. Any other upper-case
// abbreviation, `UTC` included, is read as UTC.
fn parse_with_unlisted_zone(value: &str) -> Option<DateTime<FixedOffset>> {
    let (local, zone) = value.rsplit_once(' ')?;
    if !(2..=5).contains(&zone.len()) || !zone.chars().all(|c| c.is_ascii_uppercase()) {
        return None;
    }
    DateTime::parse_from_rfc2822(&format!("{} +0000", local)).ok()
}
