use quick_xml::events::Event;
use quick_xml::Reader;

/// Shape of a parsed sitemap document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitemapDocument {
    /// `<urlset>`: every `<url><loc>` is a page URL
    UrlSet(Vec<String>),
    /// `<sitemapindex>`: every `<sitemap><loc>` is a child sitemap URL
    Index(Vec<String>),
    /// Well-formed XML with some other root element (local name kept)
    Unknown(String),
}

/// Which `<loc>` container the root element calls for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RootKind {
    UrlSet,
    Index,
}

impl RootKind {
    fn entry_element(self) -> &'static [u8] {
        match self {
            Self::UrlSet => b"url",
            Self::Index => b"sitemap",
        }
    }
}

/// Parses sitemap XML into its document shape
///
/// Elements are matched by local name, so `<urlset>`, `<sm:urlset>` and a
/// default-namespaced `<urlset xmlns="...">` all parse the same way. `<loc>`
/// values are trimmed and empty ones are dropped.
///
/// # Errors
///
/// Returns the underlying `quick_xml::Error` when the document is not
/// well-formed XML.
///
/// # Examples
///
/// ```
/// use llms_sitemap::sitemap::{parse_sitemap, SitemapDocument};
///
/// let xml = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
///   <url><loc>https://example.com/a</loc></url>
/// </urlset>"#;
///
/// assert_eq!(
///     parse_sitemap(xml).unwrap(),
///     SitemapDocument::UrlSet(vec!["https://example.com/a".to_string()])
/// );
/// ```
pub fn parse_sitemap(xml: &str) -> Result<SitemapDocument, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut root: Option<RootKind> = None;
    let mut locs = Vec::new();
    let mut depth = 0usize;
    let mut entry_depth: Option<usize> = None;
    let mut in_loc = false;
    let mut current = String::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                depth += 1;
                let name = e.local_name();
                match root {
                    None => match name.as_ref() {
                        b"urlset" => root = Some(RootKind::UrlSet),
                        b"sitemapindex" => root = Some(RootKind::Index),
                        other => {
                            return Ok(SitemapDocument::Unknown(
                                String::from_utf8_lossy(other).into_owned(),
                            ))
                        }
                    },
                    Some(kind) => match entry_depth {
                        // Entries are direct children of the root
                        None if depth == 2 && name.as_ref() == kind.entry_element() => {
                            entry_depth = Some(depth);
                        }
                        // `<loc>` only counts as a direct child of the entry
                        Some(entry) if depth == entry + 1 && name.as_ref() == b"loc" => {
                            in_loc = true;
                            current.clear();
                        }
                        _ => {}
                    },
                }
            }
            Event::Empty(e) if root.is_none() => {
                return Ok(match e.local_name().as_ref() {
                    b"urlset" => SitemapDocument::UrlSet(Vec::new()),
                    b"sitemapindex" => SitemapDocument::Index(Vec::new()),
                    other => SitemapDocument::Unknown(String::from_utf8_lossy(other).into_owned()),
                });
            }
            Event::Text(e) if in_loc => {
                current.push_str(&e.unescape()?);
            }
            Event::CData(e) if in_loc => {
                current.push_str(&String::from_utf8_lossy(&e.into_inner()));
            }
            Event::End(_) => {
                if in_loc {
                    let loc = current.trim();
                    if !loc.is_empty() {
                        locs.push(loc.to_string());
                    }
                    in_loc = false;
                }
                if entry_depth == Some(depth) {
                    entry_depth = None;
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(match root {
        Some(RootKind::UrlSet) => SitemapDocument::UrlSet(locs),
        Some(RootKind::Index) => SitemapDocument::Index(locs),
        None => SitemapDocument::Unknown(String::new()),
    })
}
