use metrics::{SharedString, Unit};
use metrics_util::CompositeKey;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use serde_json::json;
use storefront_blocks::application::render::metric_names::{
    METRIC_BLOCKS_RENDERED, METRIC_CONFIG_FALLBACK, METRIC_PAGE_RENDER_MS,
};
use storefront_blocks::application::render::{
    BlockDispatcher, RenderPipelineConfig, block_registry, compose_page,
};
use storefront_blocks::domain::blocks::{Block, LandingPage, TemplateRef};

fn sample_page() -> LandingPage {
    LandingPage {
        id: Some("lp_metrics".to_string()),
        title: None,
        blocks: vec![
            Block::new("a", TemplateRef::new("t1", "Hero", "hero")),
            Block::new("b", TemplateRef::new("t2", "FAQ", "faq"))
                .with_config(json!({ "faqs": "not-a-list" })),
            Block::new("c", TemplateRef::new("t3", "Legacy", "legacy-promo"))
                .with_config(json!({ "headline": "Hi" })),
            Block::new(
                "d",
                TemplateRef::new("t4", "Promo", "custom-promo")
                    .with_component_code("<p>{{headline}}</p>"),
            )
            .with_config(json!({ "headline": "Hi" })),
        ],
    }
}

type Entry = (CompositeKey, Option<Unit>, Option<SharedString>, DebugValue);

fn counter(entries: &[Entry], name: &str, label: (&str, &str)) -> u64 {
    entries
        .iter()
        .filter(|(key, _, _, _)| {
            key.key().name() == name
                && key
                    .key()
                    .labels()
                    .any(|l| l.key() == label.0 && l.value() == label.1)
        })
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(count) => *count,
            _ => 0,
        })
        .sum()
}

#[test]
fn page_render_emits_path_fallback_and_latency_metrics() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    let dispatcher = BlockDispatcher::new(block_registry(), RenderPipelineConfig::default());

    metrics::with_local_recorder(&recorder, || {
        compose_page(&dispatcher, &sample_page());
    });
    let entries = snapshotter.snapshot().into_vec();

    assert_eq!(
        counter(&entries, METRIC_BLOCKS_RENDERED, ("path", "compiled")),
        2
    );
    assert_eq!(
        counter(&entries, METRIC_BLOCKS_RENDERED, ("path", "placeholder")),
        1
    );
    assert_eq!(
        counter(&entries, METRIC_BLOCKS_RENDERED, ("path", "interpolated")),
        1
    );
    assert_eq!(
        counter(&entries, METRIC_CONFIG_FALLBACK, ("slug", "faq")),
        1
    );

    let histograms: Vec<usize> = entries
        .iter()
        .filter(|(key, _, _, _)| key.key().name() == METRIC_PAGE_RENDER_MS)
        .filter_map(|(_, _, _, value)| match value {
            DebugValue::Histogram(samples) => Some(samples.len()),
            _ => None,
        })
        .collect();
    assert_eq!(histograms, vec![1]);
}

#[test]
fn well_formed_config_records_no_fallback() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    let dispatcher = BlockDispatcher::new(block_registry(), RenderPipelineConfig::default());
    let block = Block::new("a", TemplateRef::new("t", "Pricing", "pricing"))
        .with_config(json!({ "plans": [{ "name": "Solo", "price": 4 }] }));

    metrics::with_local_recorder(&recorder, || {
        dispatcher.render(&block, None);
    });
    let entries = snapshotter.snapshot().into_vec();

    assert_eq!(
        counter(&entries, METRIC_CONFIG_FALLBACK, ("slug", "pricing")),
        0
    );
    assert_eq!(
        counter(&entries, METRIC_BLOCKS_RENDERED, ("path", "compiled")),
        1
    );
}
