//! Page block configs
//!
//! A tenant's landing page is an ordered sequence of blocks stored as
//! JSON. [`Block::from_value`] is the single parse boundary: known
//! kinds get a typed payload, unknown kinds become
//! [`Block::Unrecognized`] and are preserved verbatim so a newer
//! editor's config survives a round trip through an older server.
//!
//! Wire shape: `{"type": "hero", "data": {…}}`, data keys camelCase.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::AppError;

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Hero(HeroBlock),
    Gallery(GalleryBlock),
    MenuPreview(MenuPreviewBlock),
    Cta(CtaBlock),
    Footer,
    /// Unknown kind, kept as stored. Skipped at render time.
    Unrecognized { kind: String },
}

/// Full-width opener. Every field is optional; heading and subheading
/// fall back to the café's tagline and description at render time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroBlock {
    pub heading: Option<String>,
    pub subheading: Option<String>,
    pub background_image: Option<String>,
    pub cta_text: Option<String>,
    pub cta_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GalleryBlock {
    pub heading: Option<String>,
    pub images: Vec<GalleryImage>,
    pub columns: Option<u8>,
}

impl GalleryBlock {
    /// Grid columns clamped to 1..=4; anything else means 3.
    pub fn effective_columns(&self) -> u8 {
        match self.columns {
            Some(n @ 1..=4) => n,
            _ => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub url: String,
    #[serde(default)]
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MenuPreviewBlock {
    pub heading: String,
    pub description: Option<String>,
    pub show_count: usize,
    pub filter_popular: bool,
}

impl Default for MenuPreviewBlock {
    fn default() -> Self {
        Self {
            heading: "Our Popular Dishes".into(),
            description: None,
            show_count: 6,
            filter_popular: true,
        }
    }
}

/// Call-to-action band. Heading, button text and button link are
/// required; a config missing them is rejected at save time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CtaBlock {
    pub heading: String,
    #[serde(default)]
    pub description: Option<String>,
    pub button_text: String,
    pub button_link: String,
    #[serde(default)]
    pub background_style: BackgroundStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundStyle {
    #[default]
    Solid,
    Gradient,
}

impl Block {
    /// Parse one stored block config.
    ///
    /// A known kind with a malformed payload is an error; an unknown
    /// kind is not (it parses to [`Block::Unrecognized`]).
    pub fn from_value(value: &Value) -> Result<Block, AppError> {
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| AppError::validation("Block config is missing a 'type' field"))?;
        let data = value.get("data").cloned().unwrap_or(Value::Null);
        // null data means "all defaults" for the optional-field blocks
        let data = if data.is_null() {
            Value::Object(serde_json::Map::new())
        } else {
            data
        };

        let block = match kind {
            "hero" => Block::Hero(parse_data(kind, data)?),
            "gallery" => Block::Gallery(parse_data(kind, data)?),
            "menu_preview" => Block::MenuPreview(parse_data(kind, data)?),
            "cta" => Block::Cta(parse_data(kind, data)?),
            "footer" => Block::Footer,
            other => Block::Unrecognized {
                kind: other.to_string(),
            },
        };
        Ok(block)
    }

    pub fn kind(&self) -> &str {
        match self {
            Block::Hero(_) => "hero",
            Block::Gallery(_) => "gallery",
            Block::MenuPreview(_) => "menu_preview",
            Block::Cta(_) => "cta",
            Block::Footer => "footer",
            Block::Unrecognized { kind } => kind,
        }
    }
}

fn parse_data<T: serde::de::DeserializeOwned>(kind: &str, data: Value) -> Result<T, AppError> {
    serde_json::from_value(data)
        .map_err(|e| AppError::validation(format!("Invalid '{kind}' block: {e}")))
}

/// Validate a full block sequence as submitted by the website editor.
/// Unrecognized kinds pass (they are preserved, not rendered).
pub fn validate_blocks(blocks: &[Value]) -> Result<(), AppError> {
    for (index, value) in blocks.iter().enumerate() {
        Block::from_value(value)
            .map_err(|e| AppError::validation(format!("Block {index}: {e}")))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn hero_with_empty_data_parses_to_defaults() {
        let block = Block::from_value(&json!({"type": "hero", "data": {}})).unwrap();
        assert_eq!(block, Block::Hero(HeroBlock::default()));
        let block = Block::from_value(&json!({"type": "hero"})).unwrap();
        assert_eq!(block, Block::Hero(HeroBlock::default()));
    }

    #[test]
    fn menu_preview_defaults_to_six_popular_items() {
        let Block::MenuPreview(preview) =
            Block::from_value(&json!({"type": "menu_preview", "data": {}})).unwrap()
        else {
            panic!("wrong variant");
        };
        assert_eq!(preview.show_count, 6);
        assert!(preview.filter_popular);
        assert_eq!(preview.heading, "Our Popular Dishes");
    }

    #[test]
    fn cta_requires_heading_button_text_and_link() {
        let err = Block::from_value(&json!({
            "type": "cta",
            "data": {"heading": "Visit us"}
        }));
        assert!(err.is_err());

        let ok = Block::from_value(&json!({
            "type": "cta",
            "data": {
                "heading": "Visit us",
                "buttonText": "Order now",
                "buttonLink": "/menu",
                "backgroundStyle": "gradient"
            }
        }))
        .unwrap();
        let Block::Cta(cta) = ok else {
            panic!("wrong variant")
        };
        assert_eq!(cta.background_style, BackgroundStyle::Gradient);
    }

    #[test]
    fn unknown_kind_is_preserved_not_rejected() {
        let block =
            Block::from_value(&json!({"type": "countdown", "data": {"until": "2027"}})).unwrap();
        assert_eq!(
            block,
            Block::Unrecognized {
                kind: "countdown".into()
            }
        );
        assert!(validate_blocks(&[json!({"type": "countdown", "data": {}})]).is_ok());
    }

    #[test]
    fn missing_type_field_is_rejected() {
        assert!(Block::from_value(&json!({"data": {}})).is_err());
        assert!(validate_blocks(&[json!({"data": {}})]).is_err());
    }

    #[test]
    fn gallery_columns_clamp() {
        let gallery = GalleryBlock {
            columns: Some(9),
            ..Default::default()
        };
        assert_eq!(gallery.effective_columns(), 3);
        let gallery = GalleryBlock {
            columns: Some(2),
            ..Default::default()
        };
        assert_eq!(gallery.effective_columns(), 2);
        assert_eq!(GalleryBlock::default().effective_columns(), 3);
    }
}
