//! sitemap-gen: build a sitemap from a JSON list of candidate entries.
//!
//! `entries.json` is an array of objects with at least a `url` field. The
//! resulting `<urlset>` is written to stdout. Identifier directories are
//! resolved against the current working directory.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use sitemeter_core::error::{Result, SiteError};
use sitemeter_core::sitemap::SitemapEntry;
use sitemeter_server::{classifier_from_config, config, sitemap};

const DEFAULT_CONFIG_PATH: &str = "sitemeter.yaml";

#[derive(Parser, Debug)]
#[command(name = "sitemap-gen")]
#[command(version, about = "Build a sitemap <urlset> from candidate entries")]
struct Args {
    /// JSON array of sitemap entries (`[{"url": ...}, ...]`)
    entries: PathBuf,

    /// Config file; must exist when given (defaults to ./sitemeter.yaml if present)
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(&args.entries, args.config.as_deref()).await {
        Ok(xml) => {
            print!("{xml}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, code = e.code().as_str(), "sitemap build aborted");
            ExitCode::FAILURE
        }
    }
}

async fn run(entries_path: &Path, config_path: Option<&Path>) -> Result<String> {
    let cfg = config::load_selected(config_path, DEFAULT_CONFIG_PATH)?;
    let cwd = std::env::current_dir()
        .map_err(|e| SiteError::Internal(format!("current dir unavailable: {e}")))?;

    let raw = tokio::fs::read_to_string(entries_path)
        .await
        .map_err(|e| SiteError::InvalidInput(format!("read {} failed: {e}", entries_path.display())))?;
    let entries: Vec<SitemapEntry> = serde_json::from_str(&raw)
        .map_err(|e| SiteError::InvalidInput(format!("{}: {e}", entries_path.display())))?;

    let classifier = classifier_from_config(&cfg.sitemap, &cwd);
    let (kept, _stats) = sitemap::build_sitemap(&classifier, entries).await?;
    Ok(sitemap::render_urlset(&kept))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_argument_is_optional() {
        let args = Args::try_parse_from(["sitemap-gen", "entries.json"]).unwrap();
        assert_eq!(args.entries, PathBuf::from("entries.json"));
        assert!(args.config.is_none());

        let args = Args::try_parse_from(["sitemap-gen", "entries.json", "site.yaml"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("site.yaml")));
    }

    #[test]
    fn rejects_extra_and_unknown_arguments() {
        assert!(Args::try_parse_from(["sitemap-gen", "e.json", "c.yaml", "extra-arg"]).is_err());
        assert!(Args::try_parse_from(["sitemap-gen", "--bogus", "e.json"]).is_err());
        assert!(Args::try_parse_from(["sitemap-gen"]).is_err());
    }

    #[test]
    fn help_is_not_an_entries_path() {
        let err = Args::try_parse_from(["sitemap-gen", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[tokio::test]
    async fn named_config_must_exist() {
        let tmp = tempfile::tempdir().unwrap();
        let entries = tmp.path().join("e.json");
        std::fs::write(&entries, r#"[{"url":"https://roadmap.sh"}]"#).unwrap();

        let err = run(&entries, Some(tmp.path().join("nonexistent.yaml").as_path())).await.unwrap_err();
        assert!(err.to_string().contains("read config failed"), "{err}");
    }
}
