//! Configuration resolution.
//!
//! # Responsibilities
//! - Normalize any [`ConfigInput`] into one [`Configuration`]
//! - Pick the configuration file from a candidate list
//! - Merge in-memory configuration over the file contents
//! - Report capture-syntax warnings for regex rules
//!
//! # Design Decisions
//! - Never fails: unreadable or malformed sources contribute nothing
//! - Each absorbed failure is an explicit `Result`, logged at debug
//! - Object input never doubles as a file name; it always pairs with the
//!   default candidate files
//! - Deferred providers are handed back without being called

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::config::diagnostics::{self, Diagnostic};
use crate::config::input::{ConfigInput, ConfigProvider};
use crate::config::loader::{self, default_config_files};
use crate::config::schema::Configuration;
use crate::routing::engine::{active_engine, RegexEngine};

/// Outcome of resolution.
#[derive(Clone)]
pub enum ResolvedConfig {
    /// Provider to call when the configuration is needed.
    Deferred(ConfigProvider),
    Ready(Configuration),
}

impl ResolvedConfig {
    pub fn is_deferred(&self) -> bool {
        matches!(self, ResolvedConfig::Deferred(_))
    }

    pub fn as_ready(&self) -> Option<&Configuration> {
        match self {
            ResolvedConfig::Ready(config) => Some(config),
            ResolvedConfig::Deferred(_) => None,
        }
    }

    /// The configuration, calling the provider if resolution was deferred.
    pub fn into_configuration(self) -> Configuration {
        match self {
            ResolvedConfig::Ready(config) => config,
            ResolvedConfig::Deferred(provider) => provider(),
        }
    }
}

impl std::fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolvedConfig::Deferred(_) => f.write_str("Deferred(..)"),
            ResolvedConfig::Ready(config) => f.debug_tuple("Ready").field(config).finish(),
        }
    }
}

/// Where the file-backed part of the configuration comes from.
#[derive(Debug)]
enum FileSource {
    Candidates(Vec<PathBuf>),
    Path(PathBuf),
}

/// Resolves configuration input relative to a base directory.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    base_dir: PathBuf,
    candidates: Vec<PathBuf>,
    engine: RegexEngine,
}

impl Default for ConfigResolver {
    fn default() -> Self {
        let base_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            base_dir,
            candidates: default_config_files(),
            engine: active_engine(),
        }
    }
}

impl ConfigResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory relative paths and candidate files are looked up in.
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Candidate files used when no file is named explicitly.
    pub fn with_candidates(mut self, candidates: Vec<PathBuf>) -> Self {
        self.candidates = candidates;
        self
    }

    /// Engine the diagnostics are checked against.
    pub fn with_engine(mut self, engine: RegexEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve `input` and log any capture-syntax warnings.
    pub fn resolve(&self, input: impl Into<ConfigInput>) -> ResolvedConfig {
        let (resolved, diagnostics) = self.resolve_with_diagnostics(input);
        for diagnostic in &diagnostics {
            for line in diagnostic.lines() {
                tracing::warn!(
                    kind = diagnostic.kind.key(),
                    index = diagnostic.index,
                    "{}",
                    line
                );
            }
        }
        resolved
    }

    /// Resolve `input`, returning warnings instead of logging them.
    pub fn resolve_with_diagnostics(
        &self,
        input: impl Into<ConfigInput>,
    ) -> (ResolvedConfig, Vec<Diagnostic>) {
        let (inline, source) = match input.into() {
            ConfigInput::Deferred(provider) => {
                return (ResolvedConfig::Deferred(provider), Vec::new());
            }
            ConfigInput::Absent => (Map::new(), self.default_source()),
            ConfigInput::RawText(text) if text.is_empty() => (Map::new(), self.default_source()),
            ConfigInput::RawText(text) => match serde_json::from_str::<Value>(&text) {
                Ok(Value::Object(map)) => (map, self.default_source()),
                Ok(other) => {
                    tracing::debug!(
                        value = %other,
                        "Inline configuration is not an object, ignoring"
                    );
                    (Map::new(), self.default_source())
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Input is not JSON, treating it as a file name");
                    (Map::new(), FileSource::Path(PathBuf::from(text)))
                }
            },
            ConfigInput::Inline(map) => (map, self.default_source()),
            ConfigInput::FilenameList(names) => (Map::new(), FileSource::Candidates(names)),
            ConfigInput::Filename(name) if name.as_os_str().is_empty() => {
                (Map::new(), self.default_source())
            }
            ConfigInput::Filename(name) => (Map::new(), FileSource::Path(name)),
        };

        let mut config = Configuration::from_map(self.load_file(source));
        config.merge(inline);

        let diagnostics = diagnostics::scan(&config, self.engine);
        (ResolvedConfig::Ready(config), diagnostics)
    }

    fn default_source(&self) -> FileSource {
        FileSource::Candidates(self.candidates.clone())
    }

    /// File-backed configuration; empty when there is nothing usable to read.
    fn load_file(&self, source: FileSource) -> Map<String, Value> {
        let path = match source {
            FileSource::Candidates(names) => {
                match loader::find_config_file(&self.base_dir, &names) {
                    Some(path) => path,
                    None => {
                        tracing::debug!(candidates = ?names, "No configuration file found");
                        return Map::new();
                    }
                }
            }
            FileSource::Path(path) => self.base_dir.join(path),
        };

        if !loader::is_json_file(&path) {
            tracing::debug!(path = %path.display(), "Not a JSON file, skipping");
            return Map::new();
        }

        match loader::load_config(&path) {
            Ok(map) => {
                tracing::debug!(
                    path = %path.display(),
                    keys = map.len(),
                    "Configuration file loaded"
                );
                map
            }
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring unusable configuration file");
                Map::new()
            }
        }
    }
}

/// Resolve with the current directory, default candidates and active engine.
pub fn resolve(input: impl Into<ConfigInput>) -> ResolvedConfig {
    ConfigResolver::default().resolve(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::diagnostics::CaptureIssue;
    use serde_json::json;
    use std::fs;
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// Log sink shared between a test and its subscriber.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn resolver(dir: &TempDir) -> ConfigResolver {
        ConfigResolver::new()
            .with_base_dir(dir.path())
            .with_engine(RegexEngine::Standard)
    }

    fn ready(resolved: ResolvedConfig) -> serde_json::Value {
        serde_json::to_value(resolved.as_ready().expect("resolved config")).unwrap()
    }

    #[test]
    fn test_absent_without_files_is_empty() {
        let dir = TempDir::new().unwrap();
        assert_eq!(ready(resolver(&dir).resolve(ConfigInput::Absent)), json!({}));
    }

    #[test]
    fn test_empty_text_uses_default_candidates() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("superstatic.json"), r#"{"public": "dist"}"#).unwrap();

        let absent = ready(resolver(&dir).resolve(ConfigInput::Absent));
        assert_eq!(absent, json!({"public": "dist"}));
        assert_eq!(ready(resolver(&dir).resolve("")), absent);
        assert_eq!(ready(resolver(&dir).resolve(Some(""))), absent);
        assert_eq!(ready(resolver(&dir).resolve(json!(""))), absent);
        assert_eq!(ready(resolver(&dir).resolve(ConfigInput::RawText(String::new()))), absent);
        assert_eq!(ready(resolver(&dir).resolve(PathBuf::new())), absent);
    }

    #[test]
    fn test_raw_text() {
        let dir = TempDir::new().unwrap();
        let text =
            r#"{"public": "dist", "rewrites": [{"source": "**", "destination": "/index.html"}]}"#;

        let resolved = resolver(&dir).resolve(text);
        assert_eq!(ready(resolved), serde_json::from_str::<Value>(text).unwrap());
    }

    #[test]
    fn test_non_object_json_contributes_nothing() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("firebase.json"), r#"{"public": "site"}"#).unwrap();

        let resolved = resolver(&dir).resolve(ConfigInput::RawText("[1, 2]".into()));
        assert_eq!(ready(resolved), json!({"public": "site"}));
    }

    #[test]
    fn test_unparseable_raw_text_is_a_file_name() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("custom.json"), r#"{"public": "custom"}"#).unwrap();

        let resolved = resolver(&dir).resolve(ConfigInput::RawText("custom.json".into()));
        assert_eq!(ready(resolved), json!({"public": "custom"}));
    }

    #[test]
    fn test_inline_overrides_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("superstatic.json"),
            r#"{"public": "dist", "cleanUrls": true, "trailingSlash": {"a": 1}}"#,
        )
        .unwrap();

        let inline = json!({"public": "build", "trailingSlash": {"b": 2}});
        let resolved = resolver(&dir).resolve(inline);
        assert_eq!(
            ready(resolved),
            json!({"public": "build", "cleanUrls": true, "trailingSlash": {"b": 2}})
        );
    }

    #[test]
    fn test_candidate_order() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.json"), r#"{"from": "b"}"#).unwrap();
        fs::write(dir.path().join("c.json"), r#"{"from": "c"}"#).unwrap();

        let names = vec![PathBuf::from("a.json"), PathBuf::from("b.json"), PathBuf::from("c.json")];
        assert_eq!(ready(resolver(&dir).resolve(names)), json!({"from": "b"}));
    }

    #[test]
    fn test_hosting_unwrapped() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("wrapped.json"),
            r#"{"hosting": {"public": "dist", "headers": []}}"#,
        )
        .unwrap();
        fs::write(dir.path().join("flat.json"), r#"{"public": "dist", "headers": []}"#).unwrap();

        let wrapped = ready(resolver(&dir).resolve(PathBuf::from("wrapped.json")));
        let flat = ready(resolver(&dir).resolve(PathBuf::from("flat.json")));
        assert_eq!(wrapped, flat);
    }

    #[test]
    fn test_bad_files_degrade_to_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("superstatic.json"), "{ broken").unwrap();
        fs::write(dir.path().join("site.yaml"), "public: dist").unwrap();

        assert_eq!(ready(resolver(&dir).resolve(ConfigInput::Absent)), json!({}));
        assert_eq!(ready(resolver(&dir).resolve(PathBuf::from("site.yaml"))), json!({}));
        assert_eq!(ready(resolver(&dir).resolve(PathBuf::from("missing.json"))), json!({}));
    }

    #[test]
    fn test_deferred_is_not_called() {
        let dir = TempDir::new().unwrap();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let resolved = resolver(&dir).resolve(ConfigInput::deferred(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Configuration::new()
        }));

        assert!(resolved.is_deferred());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        resolved.into_configuration();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_diagnostics_do_not_change_config() {
        let dir = TempDir::new().unwrap();
        let inline = json!({"rewrites": [{"regex": "^/(?P<page>.+)$", "destination": "/x"}]});

        let (resolved, diagnostics) = resolver(&dir).resolve_with_diagnostics(inline.clone());
        assert_eq!(ready(resolved), inline);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].issue, CaptureIssue::Re2CaptureWithoutRe2);
    }

    #[test]
    fn test_resolve_logs_diagnostics() {
        let dir = TempDir::new().unwrap();
        let inline = json!({"rewrites": [{"regex": "^/u/(?P<id>\\d+)$", "destination": "/u"}]});

        let logs = CapturedLogs::default();
        let sink = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || sink.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();

        let resolved = tracing::subscriber::with_default(subscriber, || {
            resolver(&dir).resolve(inline.clone())
        });
        assert_eq!(ready(resolved), inline);

        let output = logs.contents();
        assert_eq!(output.matches("WARN").count(), 2);
        assert!(output.contains("appears to use RE2 capturing groups"));
        assert!(output.contains("until the RE2 engine is enabled"));
        assert!(output.contains("kind=\"rewrites\""));
    }

    #[test]
    fn test_resolve_is_quiet_without_findings() {
        let dir = TempDir::new().unwrap();
        let logs = CapturedLogs::default();
        let sink = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || sink.clone())
            .with_max_level(tracing::Level::WARN)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            resolver(&dir).resolve(json!({"rewrites": [{"regex": "^/a$", "destination": "/a"}]}))
        });
        assert!(logs.contents().is_empty());
    }
}
