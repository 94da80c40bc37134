//! Interactive HTML report.
//!
//! The report is a single page rendered from an embedded template. The tree
//! is embedded as JSON and drawn client-side by `scandisk.js`, which is
//! written next to the page along with its stylesheet and icons so the output
//! directory is self-contained.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::Local;
use tracing::debug;

use crate::{
    error::{Error, Result},
    render::json::to_json,
    tree::Node,
};

/// Page template. `{{ data }}` is required; `{{ title }}` and `{{ generated }}`
/// are filled in when present.
pub const TEMPLATE: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/scandisk.html"));

const DATA_PLACEHOLDER: &str = "{{ data }}";
const TITLE_PLACEHOLDER: &str = "{{ title }}";
const GENERATED_PLACEHOLDER: &str = "{{ generated }}";

/// Static files the page loads, written next to it.
pub const ASSETS: &[(&str, &[u8])] = &[
    (
        "scandisk.js",
        include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/scandisk.js")),
    ),
    (
        "scandisk.css",
        include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/scandisk.css")),
    ),
    (
        "folder.svg",
        include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/folder.svg")),
    ),
    (
        "file.svg",
        include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/file.svg")),
    ),
];

/// An HTML report destination.
#[derive(Clone, Debug)]
pub struct HtmlReport {
    path: PathBuf,
}

impl HtmlReport {
    /// Report written to `filename`, with `.html` appended unless it already
    /// ends that way.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::path::Path;
    /// # use scandisk::render::HtmlReport;
    /// assert_eq!(HtmlReport::new("output").path(), Path::new("output.html"));
    /// assert_eq!(HtmlReport::new("usage.html").path(), Path::new("usage.html"));
    /// ```
    #[must_use]
    pub fn new(filename: &str) -> Self {
        let path = if filename.ends_with(".html") {
            PathBuf::from(filename)
        } else {
            PathBuf::from(format!("{filename}.html"))
        };
        Self { path }
    }

    /// Where the page will be written.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory receiving the page and its assets.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Render the page and write it together with its assets.
    ///
    /// Returns the path of the written page.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`] or [`Error::Template`] if the page cannot
    /// be rendered, and [`Error::Write`] if the page or an asset cannot be
    /// written.
    pub fn write(&self, root: &Node) -> Result<&Path> {
        let generated = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let page = render_page(TEMPLATE, root, &generated)?;

        write_file(&self.path, page.as_bytes())?;
        debug!(path = %self.path.display(), bytes = page.len(), "report written");

        let dir = self.output_dir();
        for (name, contents) in ASSETS {
            write_file(&dir.join(name), contents)?;
        }

        Ok(&self.path)
    }
}

/// Fill `template` with the tree's JSON, its root label and a timestamp.
///
/// The JSON is embedded inside a `<script>` element, so every `<` is written
/// as the JSON escape `\u003c` and the data can never close the element.
///
/// # Errors
///
/// Returns [`Error::Template`] if `template` has no `{{ data }}` placeholder,
/// or [`Error::Serialize`] if the tree cannot be serialized.
pub fn render_page(template: &str, root: &Node, generated: &str) -> Result<String> {
    if !template.contains(DATA_PLACEHOLDER) {
        return Err(Error::Template {
            placeholder: DATA_PLACEHOLDER,
        });
    }

    let data = to_json(root)?.replace('<', "\\u003c");
    let title = escape_html(&root.label());
    let generated = escape_html(generated);
    let substitutions = [
        (DATA_PLACEHOLDER, data.as_str()),
        (TITLE_PLACEHOLDER, title.as_str()),
        (GENERATED_PLACEHOLDER, generated.as_str()),
    ];

    // Single pass: inserted values are never scanned for placeholders.
    let mut page = String::with_capacity(template.len() + data.len());
    let mut rest = template;
    loop {
        let next = substitutions
            .iter()
            .filter_map(|&(placeholder, value)| {
                rest.find(placeholder).map(|start| (start, placeholder, value))
            })
            .min_by_key(|&(start, _, _)| start);
        let Some((start, placeholder, value)) = next else {
            page.push_str(rest);
            break;
        };
        page.push_str(&rest[..start]);
        page.push_str(value);
        rest = &rest[start + placeholder.len()..];
    }

    Ok(page)
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
