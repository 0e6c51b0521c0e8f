use std::path::PathBuf;

use serde_json::json;
use storefront_blocks::application::render::{
    BlockDispatcher, RenderPath, RenderPipelineConfig, block_registry, compose_page,
};
use storefront_blocks::domain::blocks::{Block, LandingPage, TemplateRef};
use storefront_blocks::infra::input::load_landing_page;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn dispatcher() -> BlockDispatcher {
    BlockDispatcher::new(block_registry(), RenderPipelineConfig::default())
}

fn fixture_page() -> LandingPage {
    load_landing_page(&fixture("landing_page.json")).expect("fixture page loads")
}

#[test]
fn fixture_page_renders_every_block_in_order() {
    let page = fixture_page();
    let rendered = compose_page(&dispatcher(), &page);

    let ids: Vec<&str> = rendered.blocks.iter().map(|b| b.block_id.as_str()).collect();
    assert_eq!(
        ids,
        [
            "blk_hero",
            "blk_faq",
            "blk_unknown",
            "blk_promo",
            "blk_form",
            "blk_pricing"
        ]
    );
    let paths: Vec<RenderPath> = rendered.blocks.iter().map(|b| b.path).collect();
    assert_eq!(
        paths,
        [
            RenderPath::Compiled,
            RenderPath::Compiled,
            RenderPath::Placeholder,
            RenderPath::Interpolated,
            RenderPath::Compiled,
            RenderPath::Compiled
        ]
    );
    assert_eq!(rendered.degraded().count(), 1);

    let positions: Vec<usize> = ids
        .iter()
        .map(|id| {
            rendered
                .html
                .find(&format!(r#"data-block-id="{id}""#))
                .expect("wrapper present")
        })
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn unregistered_slug_without_markup_names_the_template() {
    let rendered = compose_page(&dispatcher(), &fixture_page());
    let block = &rendered.blocks[2];
    assert!(block.html.contains("Template not implemented: Mystery Block"));
    assert!(block.html.contains(r#"data-template-slug="mystery-block""#));
}

#[test]
fn faq_with_one_entry_renders_one_open_details() {
    let rendered = compose_page(&dispatcher(), &fixture_page());
    let faq = &rendered.blocks[1].html;
    assert_eq!(faq.matches("<details").count(), 1);
    assert_eq!(faq.matches(" open>").count(), 1);
    assert!(faq.contains("Q1"));
    assert!(faq.contains("<p>A1</p>"));
}

#[test]
fn interpolated_markup_escapes_values_and_keeps_unknown_tokens() {
    let rendered = compose_page(&dispatcher(), &fixture_page());
    let promo = &rendered.blocks[3].html;
    assert!(promo.contains(r#"<div class="promo">&lt;b&gt;Hi&lt;/b&gt; {{missing}}</div>"#));
}

#[test]
fn wrapper_carries_visibility_and_scoped_style() {
    let rendered = compose_page(&dispatcher(), &fixture_page());
    let form = &rendered.blocks[4].html;
    assert!(form.starts_with(
        r#"<style data-block-style="blk_form">[data-block-id="blk_form"] { padding: 2rem }</style>"#
    ));
    assert!(form.contains(r#"class="landing-block max-md:hidden bg-sand""#));
    assert!(form.contains(r#"name="landing_page_id" value="lp_spring""#));
    assert!(!form.contains("pattern="));
}

#[test]
fn unsafe_urls_and_schema_mismatches_degrade_quietly() {
    let rendered = compose_page(&dispatcher(), &fixture_page());
    let hero = &rendered.blocks[0].html;
    assert!(!hero.contains("javascript:"));
    assert!(hero.contains(r##"href="#""##));

    let pricing = &rendered.blocks[5].html;
    assert!(pricing.contains("Starter"));
}

#[test]
fn aliases_render_identically_to_canonical_slug() {
    let registry = block_registry();
    let dispatcher = dispatcher();
    let config = json!({ "headline": "Same either way" });
    let render = |slug: &str| {
        let block =
            Block::new("blk", TemplateRef::new("tpl", "Hero", slug)).with_config(config.clone());
        dispatcher
            .render(&block, None)
            .html
            .replace(&format!(r#"data-template-slug="{slug}""#), "")
    };

    for entry in registry.entries() {
        for alias in entry.aliases() {
            assert!(registry.shares_renderer(entry.canonical(), alias));
        }
    }
    assert_eq!(render("hero-banner"), render("hero"));
    assert_eq!(render("hero"), render("hero-centered"));
}

#[test]
fn document_wraps_fragment_with_page_metadata() {
    let rendered = compose_page(&dispatcher(), &fixture_page());
    let document = rendered.document();
    assert!(document.starts_with("<!DOCTYPE html>"));
    assert!(document.contains("<title>Spring Collection</title>"));
    assert!(document.contains(r#"data-landing-page-id="lp_spring""#));
    assert!(document.contains(&rendered.html));
}

#[test]
fn custom_wrapper_class_is_used_for_every_block() {
    let config = RenderPipelineConfig {
        wrapper_class: "lp-block".to_string(),
        ..RenderPipelineConfig::default()
    };
    let dispatcher = BlockDispatcher::new(block_registry(), config);
    let rendered = compose_page(&dispatcher, &fixture_page());
    assert_eq!(rendered.html.matches(r#"<section class="lp-block"#).count(), 6);
    assert!(!rendered.html.contains("landing-block"));
}
