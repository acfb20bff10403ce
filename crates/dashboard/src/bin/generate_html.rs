//! Binary to generate the HTML shells from Rust
//!
//! Run with: cargo run --bin generate_html [out_dir]
//!
//! Writes `dashboard.html` (summary page) and `graphs.html` (grid page).
//! Both load the same WASM bundle; the app picks the page from the URL path.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

const PAGES: [(&str, &str); 2] = [
    ("dashboard.html", "bench-trends: build times"),
    ("graphs.html", "bench-trends: graphs"),
];

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let out_dir = PathBuf::from(std::env::args().nth(1).unwrap_or_else(|| "dist".to_string()));
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    for (file, title) in PAGES {
        let path = out_dir.join(file);
        fs::write(&path, page_shell(title))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Generated: {}", path.display());
    }

    Ok(())
}

fn page_shell(title: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{styles}
    </style>
</head>
<body>
    <div id="main"></div>
    <script type="module">
        import init from './bench_trends_dashboard.js';
        init();
    </script>
</body>
</html>"#,
        styles = base_styles(),
    )
}

fn base_styles() -> &'static str {
    r#"        * { margin: 0; padding: 0; box-sizing: border-box; }
        html, body { min-height: 100%; }
        #main { min-height: 100vh; }"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_loads_bundle() {
        let html = page_shell("bench-trends: graphs");
        assert!(html.contains("<title>bench-trends: graphs</title>"));
        assert!(html.contains("./bench_trends_dashboard.js"));
        assert!(html.contains(r#"<div id="main"></div>"#));
    }
}
