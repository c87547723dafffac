use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use supersettings_core::{ApplyOutcome, HostEvent, SettingsMapping, SuperSettings, Target, TargetId};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// In-memory stand-in for an editor view.
#[derive(Debug, Clone, Default)]
pub struct View {
    id: TargetId,
    path: Option<PathBuf>,
    syntax: Option<String>,
    settings: SettingsMapping,
}

impl View {
    pub fn new(id: TargetId) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn settings(&self) -> &SettingsMapping {
        &self.settings
    }
}

impl Target for View {
    fn id(&self) -> TargetId {
        self.id
    }

    fn file_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn syntax(&self) -> Option<&str> {
        self.syntax.as_deref()
    }

    fn setting(&self, key: &str) -> Option<&Value> {
        self.settings.get(key)
    }

    fn set_setting(&mut self, key: &str, value: Value) {
        self.settings.insert(key.to_string(), value);
    }
}

/// One line of the `serve` input stream.
#[derive(Debug, Clone, Deserialize)]
pub struct EventLine {
    pub event: HostEvent,
    pub id: TargetId,
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub syntax: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AppliedLine<'a> {
    pub id: TargetId,
    pub settings: &'a SettingsMapping,
}

/// Views known to the host, keyed by id.
#[derive(Debug, Default)]
pub struct Session {
    views: HashMap<TargetId, View>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route one event to the service. Returns the view when settings were applied.
    pub fn dispatch(&mut self, service: &SuperSettings, line: EventLine) -> Option<&View> {
        let view = self
            .views
            .entry(line.id)
            .or_insert_with(|| View::new(line.id));
        if line.path.is_some() {
            view.path = line.path;
        }
        if line.syntax.is_some() {
            view.syntax = line.syntax;
        }

        match service.handle(line.event, view) {
            ApplyOutcome::Applied { .. } => self.views.get(&line.id),
            ApplyOutcome::Forgotten => {
                self.views.remove(&line.id);
                None
            }
            ApplyOutcome::AlreadyApplied | ApplyOutcome::NoFile => None,
        }
    }
}

/// Read JSON event lines until EOF, writing one JSON line per applied view.
pub async fn serve<R, W>(service: &SuperSettings, reader: R, mut writer: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut session = Session::new();
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let event: EventLine = match serde_json::from_str(line) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed event line");
                continue;
            }
        };

        if let Some(view) = session.dispatch(service, event) {
            let out = serde_json::to_string(&AppliedLine {
                id: view.id,
                settings: view.settings(),
            })?;
            writer.write_all(out.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use supersettings_core::SettingsLayout;

    fn tree() -> tempfile::TempDir {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("sub")).unwrap();
        std::fs::write(
            root.path().join("Preferences.sublime-settings"),
            r#"{"A": true, "override": false}"#,
        )
        .unwrap();
        std::fs::write(
            root.path().join("sub/txt.sublime-settings"),
            r#"{"C": true, "override": true}"#,
        )
        .unwrap();
        root
    }

    fn event(value: serde_json::Value) -> String {
        format!("{}\n", value)
    }

    async fn run(input: String) -> Vec<serde_json::Value> {
        let service = SuperSettings::new(SettingsLayout::default());
        let mut output = Vec::new();
        serve(&service, input.as_bytes(), &mut output).await.unwrap();
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_load_emits_settings_once() {
        let root = tree();
        let file = root.path().join("sub/file.txt");
        let syntax = "Packages/Text/txt.sublime-syntax";

        let mut input = String::new();
        input.push_str(&event(json!({"event": "load", "id": 1, "path": file, "syntax": syntax})));
        input.push_str(&event(json!({"event": "save", "id": 1})));

        let out = run(input).await;
        assert_eq!(out.len(), 1);
        assert_eq!(
            out[0],
            json!({"id": 1, "settings": {"A": true, "C": true, "override": true}})
        );
    }

    #[tokio::test]
    async fn test_new_file_applies_on_save() {
        let root = tree();
        let file = root.path().join("new.txt");

        let mut input = String::new();
        input.push_str(&event(json!({"event": "load", "id": 5})));
        input.push_str(&event(json!({"event": "save", "id": 5, "path": file})));

        let out = run(input).await;
        assert_eq!(out.len(), 1);
        assert_eq!(out[0]["settings"], json!({"A": true, "override": false}));
    }

    #[tokio::test]
    async fn test_close_allows_reapply() {
        let root = tree();
        let file = root.path().join("a.txt");

        let mut input = String::new();
        input.push_str(&event(json!({"event": "load", "id": 2, "path": file})));
        input.push_str(&event(json!({"event": "close", "id": 2})));
        input.push_str("not json\n\n");
        input.push_str(&event(json!({"event": "load", "id": 2, "path": file})));

        let out = run(input).await;
        assert_eq!(out.len(), 2);
    }
}
