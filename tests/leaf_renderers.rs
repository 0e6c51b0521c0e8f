use serde_json::{Value, json};
use storefront_blocks::application::render::{
    BlockDispatcher, RenderPath, RenderPipelineConfig, RenderedBlock, block_registry,
};
use storefront_blocks::domain::blocks::{Block, TemplateRef};

fn render(slug: &str, config: Value, landing_page_id: Option<&str>) -> RenderedBlock {
    let dispatcher = BlockDispatcher::new(block_registry(), RenderPipelineConfig::default());
    let block = Block::new("blk_1", TemplateRef::new("tpl_1", slug, slug)).with_config(config);
    dispatcher.render(&block, landing_page_id)
}

#[test]
fn every_registered_slug_renders_with_empty_config() {
    let registry = block_registry();
    for slug in registry.slugs() {
        for config in [json!(null), json!({})] {
            let rendered = render(slug, config, None);
            assert_eq!(rendered.path, RenderPath::Compiled, "slug {slug}");
            assert!(!rendered.html.contains("Template failed"), "slug {slug}");
        }
    }
}

#[test]
fn contact_form_skips_invalid_pattern_and_keeps_valid_one() {
    let rendered = render(
        "contact-form",
        json!({
            "fields": [
                { "name": "zip", "label": "ZIP", "pattern": "^[0-9]{5}$", "required": true },
                { "name": "ref", "label": "Reference", "pattern": "(?P<broken" }
            ]
        }),
        Some("lp_42"),
    );
    assert_eq!(rendered.html.matches("pattern=").count(), 1);
    assert!(rendered.html.contains("^[0-9]{5}$"));
    assert!(rendered.html.contains(r#"name="ref""#));
    assert!(
        rendered
            .html
            .contains(r#"<input type="hidden" name="landing_page_id" value="lp_42">"#)
    );
}

#[test]
fn forms_omit_landing_page_id_when_absent() {
    for slug in ["contact-form", "newsletter-signup"] {
        let rendered = render(slug, json!({}), None);
        assert!(!rendered.html.contains("landing_page_id"), "slug {slug}");
    }
}

#[test]
fn unsafe_urls_become_fragment_links() {
    let cases = [
        ("hero-banner", json!({ "ctaText": "Go", "ctaUrl": "javascript:alert(1)" })),
        ("cta-banner", json!({ "buttonUrl": " JavaScript:alert(1)" })),
        (
            "pricing-table",
            json!({ "plans": [{ "name": "One", "ctaText": "Buy", "ctaUrl": "vbscript:x" }] }),
        ),
        ("announcement-bar", json!({ "linkUrl": "data:text/html,<script>x</script>" })),
    ];
    for (slug, config) in cases {
        let rendered = render(slug, config, None);
        let lower = rendered.html.to_ascii_lowercase();
        assert!(!lower.contains("javascript:"), "slug {slug}");
        assert!(!lower.contains("vbscript:"), "slug {slug}");
        assert!(!lower.contains("data:text"), "slug {slug}");
        assert!(rendered.html.contains(r##"href="#""##), "slug {slug}");
    }
}

#[test]
fn schemes_split_by_controls_are_still_rejected() {
    for url in ["java\tscript:alert(1)", "java\nscript:alert(1)", "\x01javascript:alert(1)"] {
        let rendered = render("hero-banner", json!({ "ctaText": "Go", "ctaUrl": url }), None);
        assert!(rendered.html.contains(r##"href="#""##), "url {url:?}");
        assert!(!rendered.html.contains("script:"), "url {url:?}");
    }
}

#[test]
fn author_text_is_escaped_in_every_leaf() {
    let payload = "<script>alert(1)</script>";
    let cases = [
        ("hero-banner", json!({ "headline": payload })),
        ("rich-text", json!({ "body": payload })),
        ("faq-accordion", json!({ "faqs": [{ "question": payload, "answer": payload }] })),
        ("testimonial-grid", json!({ "testimonials": [{ "quote": payload }] })),
        ("cta-banner", json!({ "headline": payload })),
    ];
    for (slug, config) in cases {
        let rendered = render(slug, config, None);
        assert!(!rendered.html.contains("<script>"), "slug {slug}");
    }
}

#[test]
fn mismatched_config_falls_back_to_defaults() {
    let rendered = render("faq-accordion", json!({ "faqs": 42 }), None);
    assert_eq!(rendered.path, RenderPath::Compiled);
    assert!(rendered.html.contains("How long does shipping take?"));

    let rendered = render("feature-grid", json!({ "columns": 9 }), None);
    assert!(rendered.html.contains("feature-grid--cols-4"));
}

#[test]
fn scalar_item_text_does_not_reset_the_block() {
    let rendered = render(
        "testimonial-grid",
        json!({ "testimonials": [{ "quote": "Fast shipping", "author": 1984, "role": true }] }),
        None,
    );
    assert!(rendered.html.contains("Fast shipping"));
    assert!(rendered.html.contains("1984"));

    let rendered = render(
        "pricing-table",
        json!({ "plans": [{ "name": 2026, "price": 9, "badge": null }] }),
        None,
    );
    assert!(rendered.html.contains("2026"));

    let rendered = render(
        "feature-grid",
        json!({ "features": [{ "title": "Free returns", "description": 30 }] }),
        None,
    );
    assert!(rendered.html.contains("Free returns"));
    assert!(rendered.html.contains("30"));
}

#[test]
fn video_embed_rejects_plain_http() {
    let rendered = render("video", json!({ "videoUrl": "http://player.example/1" }), None);
    assert!(!rendered.html.contains("<iframe"));

    let rendered = render("video", json!({ "videoUrl": "https://player.example/1" }), None);
    assert!(rendered.html.contains("<iframe"));
}
