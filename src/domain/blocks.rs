//! Block and template descriptor records produced by the authoring system.
//!
//! Records are read once per render pass and never mutated. Field names on the
//! wire are camelCase to match what the editor persists.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::types::TemplateCategory;

/// Identifies which visual behavior a block uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRef {
    pub id: String,
    pub name: String,
    /// Dispatch key; exact-match and case-sensitive.
    pub slug: String,
    #[serde(default)]
    pub category: TemplateCategory,
    /// Raw template markup used only when no compiled renderer is registered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_code: Option<String>,
}

impl TemplateRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: slug.into(),
            category: TemplateCategory::Other,
            component_code: None,
        }
    }

    pub fn with_component_code(mut self, code: impl Into<String>) -> Self {
        self.component_code = Some(code.into());
        self
    }
}

/// One placed, configured instance of a template on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: String,
    pub template_ref: TemplateRef,
    #[serde(default = "empty_config")]
    pub config: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_css: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_classes: Option<String>,
    #[serde(default)]
    pub hide_on_mobile: bool,
    #[serde(default)]
    pub hide_on_tablet: bool,
    #[serde(default)]
    pub hide_on_desktop: bool,
}

impl Block {
    pub fn new(id: impl Into<String>, template_ref: TemplateRef) -> Self {
        Self {
            id: id.into(),
            template_ref,
            config: empty_config(),
            custom_css: None,
            custom_classes: None,
            hide_on_mobile: false,
            hide_on_tablet: false,
            hide_on_desktop: false,
        }
    }

    pub fn with_config(mut self, config: Value) -> Self {
        self.config = config;
        self
    }

    pub fn with_custom_css(mut self, css: impl Into<String>) -> Self {
        self.custom_css = Some(css.into());
        self
    }

    pub fn with_custom_classes(mut self, classes: impl Into<String>) -> Self {
        self.custom_classes = Some(classes.into());
        self
    }

    pub fn hidden_on(mut self, mobile: bool, tablet: bool, desktop: bool) -> Self {
        self.hide_on_mobile = mobile;
        self.hide_on_tablet = tablet;
        self.hide_on_desktop = desktop;
        self
    }

    pub fn slug(&self) -> &str {
        self.template_ref.slug.as_str()
    }
}

/// Input document for a single render pass: an ordered list of blocks.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingPage {
    /// Forwarded to renderers that attribute submissions to a page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

fn empty_config() -> Value {
    Value::Object(serde_json::Map::new())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn block_deserializes_from_editor_shape() {
        let block: Block = serde_json::from_value(json!({
            "id": "blk_1",
            "templateRef": {
                "id": "tpl_9",
                "name": "FAQ Accordion",
                "slug": "faq-accordion",
                "category": "faq"
            },
            "config": { "title": "Questions" },
            "customClasses": "bg-muted",
            "hideOnTablet": true
        }))
        .expect("block parses");

        assert_eq!(block.slug(), "faq-accordion");
        assert_eq!(block.template_ref.category, TemplateCategory::Faq);
        assert!(block.template_ref.component_code.is_none());
        assert_eq!(block.custom_classes.as_deref(), Some("bg-muted"));
        assert!(!block.hide_on_mobile);
        assert!(block.hide_on_tablet);
        assert!(!block.hide_on_desktop);
    }

    #[test]
    fn missing_config_defaults_to_empty_object() {
        let block: Block = serde_json::from_value(json!({
            "id": "blk_2",
            "templateRef": { "id": "t", "name": "Spacer", "slug": "spacer" }
        }))
        .expect("block parses");

        assert_eq!(block.config, json!({}));
        assert_eq!(block.template_ref.category, TemplateCategory::Other);
    }

    #[test]
    fn landing_page_keeps_block_order() {
        let page: LandingPage = serde_json::from_value(json!({
            "id": "lp_1",
            "blocks": [
                { "id": "a", "templateRef": { "id": "t", "name": "A", "slug": "spacer" } },
                { "id": "b", "templateRef": { "id": "t", "name": "B", "slug": "divider" } }
            ]
        }))
        .expect("page parses");

        let ids: Vec<&str> = page.blocks.iter().map(|block| block.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(page.id.as_deref(), Some("lp_1"));
    }
}
