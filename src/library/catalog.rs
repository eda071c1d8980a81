//! Fixed lists of candidate file names.
//!
//! Directories are never scanned; the catalog says which names to probe.
//! A manifest file lists them one per line:
//!
//! ```text
//! # articles come first
//! Getting started.md
//!
//! [files]
//! starter.zip | Project starter template
//! ```

use std::fs;
use std::path::Path;

use super::SourceError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub filename: String,
    pub description: Option<String>,
}

impl CatalogEntry {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            description: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn parse(line: &str) -> Self {
        match line.split_once('|') {
            Some((name, description)) => {
                let description = description.trim();
                Self {
                    filename: name.trim().to_owned(),
                    description: (!description.is_empty()).then(|| description.to_owned()),
                }
            }
            None => Self::new(line),
        }
    }
}

/// Article and resource names to probe, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub articles: Vec<CatalogEntry>,
    pub files: Vec<CatalogEntry>,
}

#[derive(Clone, Copy)]
enum Section {
    Articles,
    Files,
}

impl Manifest {
    /// Parse manifest text. Entries before any section header are articles.
    pub fn parse(text: &str) -> Self {
        let mut manifest = Self::default();
        let mut section = Section::Articles;
        for line in text.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line {
                "[articles]" => section = Section::Articles,
                "[files]" => section = Section::Files,
                _ => {
                    let entry = CatalogEntry::parse(line);
                    if entry.filename.is_empty() {
                        continue;
                    }
                    match section {
                        Section::Articles => manifest.articles.push(entry),
                        Section::Files => manifest.files.push(entry),
                    }
                }
            }
        }
        manifest
    }

    /// Load a manifest file.
    ///
    /// # Errors
    /// Returns [`SourceError::Manifest`] if the file cannot be read.
    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let text = fs::read_to_string(path).map_err(|source| SourceError::Manifest {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    /// The names the site shipped with, used when no manifest is configured.
    pub fn builtin() -> Self {
        Self {
            articles: [
                "现代Web开发技术概述.md",
                "响应式设计最佳实践.md",
                "JavaScript ES6+新特性详解.md",
                "📚 四川省双流中学 2025-2026 学年上期第一次质量监测.md",
                "半期考试周总结.md",
            ]
            .into_iter()
            .map(CatalogEntry::new)
            .collect(),
            files: vec![
                CatalogEntry::new("学习资料1.pdf").with_description("Web开发入门指南"),
                CatalogEntry::new("工具软件.zip").with_description("开发工具集合包"),
                CatalogEntry::new("项目模板.rar").with_description("项目启动模板"),
            ],
        }
    }
}
