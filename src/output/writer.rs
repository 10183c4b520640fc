use crate::translation::{LanguageMap, TranslationTable};
use crate::utils::{I18nConfig, I18nError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Writes one pretty-printed JSON file per language.
pub struct JsonFileWriter {
    output_dir: PathBuf,
    suffix: Option<String>,
    file_names: HashMap<String, String>,
}

impl JsonFileWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            suffix: None,
            file_names: HashMap::new(),
        }
    }

    pub fn from_config(config: &I18nConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            suffix: config.suffix.clone(),
            file_names: config.field_file_name_map.clone().unwrap_or_default(),
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn with_file_name(mut self, lang: impl Into<String>, name: impl Into<String>) -> Self {
        self.file_names.insert(lang.into(), name.into());
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// `<name>.<suffix>json`, where `name` is the override for `lang` if any.
    /// The suffix is inserted verbatim, so `"i18n."` gives `en.i18n.json`.
    pub fn file_name(&self, lang: &str) -> String {
        let name = self.file_names.get(lang).map(String::as_str).unwrap_or(lang);
        format!("{}.{}json", name, self.suffix.as_deref().unwrap_or(""))
    }

    pub fn path_for(&self, lang: &str) -> PathBuf {
        self.output_dir.join(self.file_name(lang))
    }

    /// Creates the output directory and writes every language of `table`.
    /// Files already written stay on disk if a later one fails.
    pub async fn write_all(&self, table: &TranslationTable) -> Result<Vec<PathBuf>> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| I18nError::write_failure(&self.output_dir, e))?;

        let mut written = Vec::with_capacity(table.languages().len());
        for (lang, entries) in table.iter() {
            let path = self.path_for(lang);
            write_json(&path, entries).await?;

            if entries.is_empty() {
                warn!(lang, path = %path.display(), "No translations found, wrote an empty file");
            } else {
                info!(lang, entries = entries.len(), path = %path.display(), "Wrote translations");
            }
            written.push(path);
        }

        Ok(written)
    }
}

async fn write_json(path: &Path, entries: &LanguageMap) -> Result<()> {
    let content = serde_json::to_string_pretty(entries)
        .map_err(|e| I18nError::write_failure(path, e.into()))?;
    tokio::fs::write(path, content)
        .await
        .map_err(|e| I18nError::write_failure(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitable::RecordRow;

    fn table(langs: &[&str], rows: &[RecordRow]) -> TranslationTable {
        let mut table = TranslationTable::new("key", langs.iter().map(|l| l.to_string()).collect());
        for row in rows {
            table.merge_row(row);
        }
        table
    }

    #[test]
    fn file_names_use_override_and_suffix() {
        let writer = JsonFileWriter::new("dist").with_file_name("zh", "zh-CN");
        assert_eq!(writer.file_name("zh"), "zh-CN.json");
        assert_eq!(writer.file_name("en"), "en.json");

        let writer = writer.with_suffix("i18n.");
        assert_eq!(writer.file_name("zh"), "zh-CN.i18n.json");
        assert_eq!(writer.file_name("en"), "en.i18n.json");
        assert_eq!(writer.path_for("en"), PathBuf::from("dist").join("en.i18n.json"));
    }

    #[tokio::test]
    async fn writes_an_empty_object_for_languages_without_rows() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("dist");
        let writer = JsonFileWriter::new(&out);

        let written = writer.write_all(&table(&["en", "zh"], &[])).await.unwrap();

        assert_eq!(written, vec![out.join("en.json"), out.join("zh.json")]);
        for path in written {
            assert_eq!(std::fs::read_to_string(path).unwrap(), "{}");
        }
    }

    #[tokio::test]
    async fn creates_missing_ancestors_and_pretty_prints() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("src").join("locales").join("generated");
        let writer = JsonFileWriter::new(&out).with_file_name("zh", "zh-CN");

        let rows = [
            RecordRow::new([("key", "hello"), ("en", "Hello"), ("zh", "你好")]),
            RecordRow::new([("key", "bye"), ("en", "Bye")]),
        ];
        writer.write_all(&table(&["en", "zh"], &rows)).await.unwrap();

        assert_eq!(
            std::fs::read_to_string(out.join("en.json")).unwrap(),
            "{\n  \"bye\": \"Bye\",\n  \"hello\": \"Hello\"\n}"
        );
        assert_eq!(
            std::fs::read_to_string(out.join("zh-CN.json")).unwrap(),
            "{\n  \"hello\": \"你好\"\n}"
        );
        assert!(!out.join("zh.json").exists());
    }

    #[tokio::test]
    async fn unwritable_output_dir_is_a_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("dist");
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = JsonFileWriter::new(&blocker)
            .write_all(&table(&["en"], &[]))
            .await
            .unwrap_err();

        assert!(matches!(err, I18nError::WriteFailure { ref path, .. } if *path == blocker));
        assert_eq!(err.exit_code(), 6);
    }
}
