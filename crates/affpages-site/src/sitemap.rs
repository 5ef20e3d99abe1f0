//! `sitemap.xml` load, merge, and save.
//!
//! The whole file is read into memory, new URLs are merged in by `loc`, and
//! the result is rewritten through a temp file. Entries keep their original
//! order; new ones are appended.

use std::io;
use std::path::Path;

use chrono::NaiveDate;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::SiteError;
use crate::writer::write_atomic;

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

const DEFAULT_CHANGEFREQ: &str = "weekly";
const DEFAULT_PRIORITY: &str = "0.8";

/// Bytes escaped in a single URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'\\')
    .add(b'^')
    .add(b'|');

/// Public URL of a generated page: `<base>/<percent-encoded file name>`.
#[must_use]
pub fn page_url(base_url: &str, file_name: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        utf8_percent_encode(file_name, PATH_SEGMENT)
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: Option<String>,
    pub changefreq: Option<String>,
    pub priority: Option<String>,
}

impl SitemapEntry {
    fn empty() -> Self {
        Self {
            loc: String::new(),
            lastmod: None,
            changefreq: None,
            priority: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sitemap {
    entries: Vec<SitemapEntry>,
}

impl Sitemap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a sitemap from disk. A missing file yields an empty sitemap.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Io`] when the file exists but cannot be read and
    /// [`SiteError::Xml`] when it is not well-formed.
    pub fn load(path: &Path) -> Result<Self, SiteError> {
        let xml = match std::fs::read_to_string(path) {
            Ok(xml) => xml,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no sitemap yet, starting empty");
                return Ok(Self::new());
            }
            Err(e) => return Err(SiteError::io(path, e)),
        };
        Self::parse(&xml).map_err(|source| SiteError::Xml {
            path: path.display().to_string(),
            source,
        })
    }

    /// Parses `<url>` entries out of a `urlset` document. Unknown child
    /// elements are ignored, as are `<url>` blocks without a `<loc>`.
    ///
    /// # Errors
    ///
    /// Returns the reader error for malformed XML.
    pub fn parse(xml: &str) -> Result<Self, quick_xml::Error> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut entries = Vec::new();
        let mut current: Option<SitemapEntry> = None;
        let mut current_tag = String::new();

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    if name == "url" {
                        current = Some(SitemapEntry::empty());
                    }
                    current_tag = name;
                }
                Event::End(e) => {
                    if e.local_name().as_ref() == b"url" {
                        if let Some(entry) = current.take() {
                            if !entry.loc.is_empty() {
                                entries.push(entry);
                            }
                        }
                    }
                    current_tag.clear();
                }
                Event::Text(e) => {
                    if let Some(entry) = current.as_mut() {
                        let text = e.unescape().unwrap_or_default().into_owned();
                        match current_tag.as_str() {
                            "loc" => entry.loc = text,
                            "lastmod" => entry.lastmod = Some(text),
                            "changefreq" => entry.changefreq = Some(text),
                            "priority" => entry.priority = Some(text),
                            _ => {}
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(Self { entries })
    }

    #[must_use]
    pub fn contains(&self, loc: &str) -> bool {
        self.entries.iter().any(|e| e.loc == loc)
    }

    /// Adds `loc` with the default change frequency and priority.
    ///
    /// Returns `false` and leaves the sitemap unchanged if `loc` is already
    /// present.
    pub fn add_url(&mut self, loc: &str, lastmod: NaiveDate) -> bool {
        if self.contains(loc) {
            return false;
        }
        self.entries.push(SitemapEntry {
            loc: loc.to_owned(),
            lastmod: Some(lastmod.format("%Y-%m-%d").to_string()),
            changefreq: Some(DEFAULT_CHANGEFREQ.to_owned()),
            priority: Some(DEFAULT_PRIORITY.to_owned()),
        });
        true
    }

    #[must_use]
    pub fn entries(&self) -> &[SitemapEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes the sitemap as an indented UTF-8 `urlset` document.
    ///
    /// # Errors
    ///
    /// Only fails if the in-memory writer does.
    pub fn to_xml(&self) -> io::Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer.write_event(Event::Start(
            BytesStart::new("urlset").with_attributes([("xmlns", SITEMAP_NS)]),
        ))?;

        for entry in &self.entries {
            writer.write_event(Event::Start(BytesStart::new("url")))?;
            write_text_element(&mut writer, "loc", &entry.loc)?;
            let optional = [
                ("lastmod", &entry.lastmod),
                ("changefreq", &entry.changefreq),
                ("priority", &entry.priority),
            ];
            for (tag, value) in optional {
                if let Some(value) = value {
                    write_text_element(&mut writer, tag, value)?;
                }
            }
            writer.write_event(Event::End(BytesEnd::new("url")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("urlset")))?;

        let mut xml = String::from_utf8_lossy(&writer.into_inner()).into_owned();
        xml.push('\n');
        Ok(xml)
    }

    /// Rewrites the sitemap at `path` through a temp file.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), SiteError> {
        let xml = self.to_xml().map_err(|e| SiteError::io(path, e))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| SiteError::io(parent, e))?;
        }
        write_atomic(path, xml.as_bytes())
    }
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, tag: &str, text: &str) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

#[cfg(test)]
#[path = "sitemap_test.rs"]
mod tests;
