use serde::{Deserialize, Serialize};

/// Token ids with metadata, `1..=MAX_TOKEN_ID`.
pub const MAX_TOKEN_ID: u64 = 10_000;

pub const COMMUNITY_URL: &str = "https://t.me/hrumdrops";

/// Path of the collection image relative to the site root.
pub const IMAGE_PATH: &str = "/static/images/pharosRussia.jpg";

const DESCRIPTION: &str = "Эксклюзивный NFT-бейдж для российских пользователей блокчейна \
PHAROS. Символ принадлежности к инновационному сообществу децентрализованных технологий. \
Присоединяйтесь к нашему сообществу: https://t.me/hrumdrops";

/// ERC-721 metadata JSON of one token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub description: String,
    pub image: String,
    pub external_url: String,
    pub attributes: Vec<Attribute>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub trait_type: String,
    pub value: AttributeValue,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Number(u64),
    Text(String),
}

impl Attribute {
    fn text(trait_type: &str, value: &str) -> Self {
        Self { trait_type: trait_type.to_string(), value: AttributeValue::Text(value.to_string()) }
    }
}

impl TokenMetadata {
    /// Metadata of `token_id`, with the image served from `base_url`. `None` for ids outside
    /// the collection.
    pub fn for_token(token_id: u64, base_url: &str) -> Option<Self> {
        if !(1..=MAX_TOKEN_ID).contains(&token_id) {
            return None;
        }
        Some(Self {
            name: format!("Pharos Russia #{token_id}"),
            description: DESCRIPTION.to_string(),
            image: format!("{}{IMAGE_PATH}", base_url.trim_end_matches('/')),
            external_url: COMMUNITY_URL.to_string(),
            attributes: vec![
                Attribute::text("Edition", "Pharos Russia"),
                Attribute::text("Country", "Russia"),
                Attribute::text("Blockchain", "PHAROS"),
                Attribute::text("Rarity", "Exclusive"),
                Attribute {
                    trait_type: "Token ID".to_string(),
                    value: AttributeValue::Number(token_id),
                },
                Attribute::text("Community", "HrumDrops"),
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_bounds() {
        assert!(TokenMetadata::for_token(0, "http://localhost").is_none());
        assert!(TokenMetadata::for_token(MAX_TOKEN_ID + 1, "http://localhost").is_none());
        let last = TokenMetadata::for_token(MAX_TOKEN_ID, "http://localhost/").unwrap();
        assert_eq!(last.name, "Pharos Russia #10000");
        assert_eq!(last.image, "http://localhost/static/images/pharosRussia.jpg");
    }

    #[test]
    fn token_id_attribute_is_numeric() {
        let metadata = TokenMetadata::for_token(7, "https://a.b").unwrap();
        let json = serde_json::to_value(metadata).unwrap();
        assert_eq!(json["attributes"][4]["trait_type"], "Token ID");
        assert_eq!(json["attributes"][4]["value"], 7);
        assert_eq!(json["attributes"][0]["value"], "Pharos Russia");
    }
}
