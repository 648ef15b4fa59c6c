use serde::{Deserialize, Serialize};
use std::fmt;

/// Price as sent by clients, either `"250"` or `250`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Text(text) => f.write_str(text),
            Price::Number(number) => write!(f, "{}", number),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateQrRequest {
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub price: Option<Price>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateQrResponse {
    pub success: bool,
    pub filename: String,
    pub url: String,
}
