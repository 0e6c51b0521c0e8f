use std::{
    fs,
    io::{self, Write},
    path::Path,
    process::ExitCode,
    sync::Arc,
};

use serde::Serialize;
use storefront_blocks::{
    application::{
        error::AppError,
        render::{
            BlockDispatcher, RenderPath, RenderPipelineConfig, RendererRegistry,
            active_render_config, compose_page, configure_render_pipeline,
        },
    },
    config::{self, Command, RenderArgs, TemplatesArgs},
    infra::{error::InfraError, input, telemetry},
};
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            report_application_error(&error);
            ExitCode::from(error.exit_code())
        }
    }
}

fn report_application_error(error: &AppError) {
    let report = error.report();
    if dispatcher::has_been_set() {
        error!(
            summary = error.presentation_message(),
            error = %report,
            "application error"
        );
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(
            summary = error.presentation_message(),
            error = %report,
            "application error"
        );
    });
}

fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    telemetry::init(&settings.logging)?;
    configure_render_pipeline(RenderPipelineConfig::from(&settings.render))?;

    let registry = Arc::new(RendererRegistry::with_builtin_renderers()?);
    let dispatcher = BlockDispatcher::new(registry, active_render_config());

    match cli_args.command {
        Command::Render(args) => run_render(&dispatcher, &args),
        Command::Templates(args) => run_templates(&dispatcher, &args),
    }
}

fn run_render(dispatcher: &BlockDispatcher, args: &RenderArgs) -> Result<(), AppError> {
    let page = input::load_landing_page(&args.file)?;
    let rendered = compose_page(dispatcher, &page);

    let degraded = rendered.degraded().count();
    if degraded > 0 {
        warn!(
            target = "storefront_blocks::render",
            landing_page_id = rendered.landing_page_id.as_deref(),
            degraded,
            "some blocks rendered as placeholders"
        );
    }
    info!(
        target = "storefront_blocks::render",
        file = %args.file.display(),
        landing_page_id = rendered.landing_page_id.as_deref(),
        blocks = rendered.blocks.len(),
        compiled = rendered.count(RenderPath::Compiled),
        interpolated = rendered.count(RenderPath::Interpolated),
        "landing page rendered"
    );

    let html = if args.fragment {
        rendered.html
    } else {
        rendered.document()
    };
    write_output(args.output.as_deref(), &html)
}

#[derive(Serialize)]
struct TemplateListing<'a> {
    slug: &'a str,
    aliases: &'a [String],
}

fn run_templates(dispatcher: &BlockDispatcher, args: &TemplatesArgs) -> Result<(), AppError> {
    let mut listing: Vec<TemplateListing<'_>> = dispatcher
        .registry()
        .entries()
        .map(|entry| TemplateListing {
            slug: entry.canonical(),
            aliases: entry.aliases(),
        })
        .collect();
    listing.sort_by(|left, right| left.slug.cmp(right.slug));

    let text = if args.json {
        serde_json::to_string_pretty(&listing)
            .map_err(|err| AppError::unexpected(format!("failed to encode listing: {err}")))?
    } else {
        listing
            .iter()
            .map(|item| {
                if item.aliases.is_empty() {
                    item.slug.to_string()
                } else {
                    format!("{} ({})", item.slug, item.aliases.join(", "))
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    };
    write_output(None, &text)
}

fn write_output(path: Option<&Path>, contents: &str) -> Result<(), AppError> {
    match path {
        Some(path) => {
            fs::write(path, contents).map_err(InfraError::from)?;
            info!(
                target = "storefront_blocks::render",
                path = %path.display(),
                bytes = contents.len(),
                "output written"
            );
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{contents}").map_err(InfraError::from)?;
            stdout.flush().map_err(InfraError::from)?;
        }
    }
    Ok(())
}
