//! Storage friendly snapshot of a parsed status.

use anyhow::{Context, Result, bail};
use minicbor::{Decode, Encode};
use serde::{Deserialize, Serialize};

use super::audience::Visibility;
use super::model::Attachment;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Encode, Decode)]
struct Header {
    #[n(0)]
    version: u32,
}

impl Header {
    const V_1: Header = Header { version: 1 };
}

/// Every field derived from an incoming post, ready to be stored.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, Encode, Decode)]
pub struct ParsedStatus {
    #[n(0)]
    pub uri: Option<String>,
    #[n(1)]
    pub url: Option<String>,
    #[n(2)]
    pub text: String,
    #[n(3)]
    pub processed_text: String,
    #[n(4)]
    pub spoiler_text: Option<String>,
    #[n(5)]
    pub language: Option<String>,
    #[n(6)]
    pub reply: bool,
    #[n(7)]
    pub in_reply_to: Option<String>,
    #[n(8)]
    pub visibility: Visibility,
    #[n(9)]
    pub sensitive: bool,
    /// Milliseconds since the Unix epoch.
    #[n(10)]
    pub published_at: Option<i64>,
    #[n(11)]
    pub edited_at: Option<i64>,
    #[n(12)]
    pub mentions: Vec<String>,
    #[n(13)]
    pub hashtags: Vec<String>,
    #[n(14)]
    pub attachments: Vec<Attachment>,
    /// `None` when the count is unknown.
    #[n(15)]
    pub favourites_count: Option<u64>,
    #[n(16)]
    pub reblogs_count: Option<u64>,
    #[n(17)]
    pub replies_count: Option<u64>,
    #[n(18)]
    pub quote_policy: u32,
}

impl ParsedStatus {
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        minicbor::to_vec((Header::V_1, self)).context("unable to serialize status")
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<ParsedStatus> {
        let (header, status): (Header, ParsedStatus) =
            minicbor::decode(bytes).context("unable to deserialize status")?;
        if header != Header::V_1 {
            tracing::error!(target: "status", ?header, "invalid status header version");
            bail!("unsupported status version {}", header.version);
        }
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use super::{Header, ParsedStatus};
    use crate::activity_pub::audience::Visibility;
    use crate::activity_pub::model::Attachment;

    fn status() -> ParsedStatus {
        ParsedStatus {
            uri: Some("https://example.com/actor/post1".to_string()),
            url: None,
            text: "@bob lorem ipsum".to_string(),
            processed_text: "@bob lorem ipsum".to_string(),
            spoiler_text: None,
            language: Some("en".to_string()),
            reply: false,
            in_reply_to: None,
            visibility: Visibility::Unlisted,
            sensitive: false,
            published_at: Some(1_730_697_136_000),
            edited_at: None,
            mentions: vec!["https://example.com/users/bob".to_string()],
            hashtags: vec![],
            attachments: vec![Attachment {
                url: "https://example.com/media/1.png".to_string(),
                media_type: Some("image/png".to_string()),
                description: None,
            }],
            favourites_count: None,
            reblogs_count: Some(1),
            replies_count: Some(0),
            quote_policy: 2 << 16,
        }
    }

    #[test]
    fn storage_encoding() -> Result<()> {
        let status = status();
        let bytes = status.to_bytes()?;
        assert_eq!(ParsedStatus::from_bytes(&bytes)?, status);
        Ok(())
    }

    #[test]
    fn unknown_version() -> Result<()> {
        let bytes = minicbor::to_vec((Header { version: 9 }, &status()))?;
        assert!(ParsedStatus::from_bytes(&bytes).is_err());
        assert!(ParsedStatus::from_bytes(&[0xff, 0x00]).is_err());
        Ok(())
    }

    #[test]
    fn json_output() -> Result<()> {
        let value = serde_json::to_value(status())?;
        assert_eq!(value["visibility"], "unlisted");
        assert_eq!(value["favourites_count"], serde_json::Value::Null);
        Ok(())
    }
}
