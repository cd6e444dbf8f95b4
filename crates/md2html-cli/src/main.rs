use anyhow::{Context, Result};
use md2html_config::{Config, RenderConfig};
use md2html_engine::{Page, convert, io};
use std::{env, path::Path, process};

/// Read `input`, convert it and write the HTML to `output`.
fn run(input: &Path, output: &Path, render: &RenderConfig) -> Result<()> {
    let markdown = io::read_markdown(input)
        .with_context(|| format!("Failed to read '{}'", input.display()))?;

    let body = convert(&markdown)
        .with_context(|| format!("Failed to convert '{}'", input.display()))?;

    let html = if render.standalone {
        page_for(render).wrap(&body)
    } else {
        body
    };

    io::write_html(output, &html)
        .with_context(|| format!("Failed to write '{}'", output.display()))?;
    Ok(())
}

fn page_for(render: &RenderConfig) -> Page {
    let mut page = Page::new();
    if let Some(title) = &render.title {
        page = page.with_title(title);
    }
    if let Some(href) = render.stylesheet_href() {
        page = page.with_stylesheet(href);
    }
    page
}

/// Usage line, named after the invoked program when the OS reports it.
fn usage(args: &[String]) -> String {
    let program = args.first().map_or("md2html", String::as_str);
    format!("Usage: {program} <input.md> <output.html>")
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("{}", usage(&args));
        process::exit(1);
    }
    let input = Path::new(&args[1]);
    let output = Path::new(&args[2]);

    let config_path = Config::config_path();
    let config = match Config::load() {
        Ok(Some(config)) => {
            log::info!("Loaded config from {}", config_path.display());
            config
        }
        Ok(None) => Config::default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = run(input, output, &config.render) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
    log::info!("Converted {} to {}", input.display(), output.display());
    Ok(())
}
