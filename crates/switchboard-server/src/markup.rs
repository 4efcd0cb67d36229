//! HTML generation for the dashboard pages.
//!
//! Uses `quick-xml`'s writer API, so every piece of text and every attribute
//! value is escaped on the way out. Chat messages and post bodies are user
//! input and end up here verbatim.

use std::io::Cursor;

use quick_xml::{
  Writer,
  events::{BytesEnd, BytesStart, BytesText, Event},
};
use switchboard_core::analytics::AnalyticsSnapshot;

use crate::error::Error;

// ─── Navigation ───────────────────────────────────────────────────────────────

/// The dashboard's pages, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
  Dashboard,
  Social,
  Chat,
  Crm,
  Analytics,
  Training,
  Config,
}

impl Nav {
  pub const ALL: [Nav; 7] = [
    Nav::Dashboard,
    Nav::Social,
    Nav::Chat,
    Nav::Crm,
    Nav::Analytics,
    Nav::Training,
    Nav::Config,
  ];

  pub fn path(self) -> &'static str {
    match self {
      Nav::Dashboard => "/",
      Nav::Social => "/social",
      Nav::Chat => "/chat",
      Nav::Crm => "/crm",
      Nav::Analytics => "/analytics",
      Nav::Training => "/training",
      Nav::Config => "/config",
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Nav::Dashboard => "Dashboard",
      Nav::Social => "Social",
      Nav::Chat => "Chat",
      Nav::Crm => "CRM",
      Nav::Analytics => "Analytics",
      Nav::Training => "Training",
      Nav::Config => "Config",
    }
  }
}

const STYLESHEET: &str = "body{font-family:sans-serif;margin:2rem;color:#222}\
nav a{margin-right:1rem}nav a.active{font-weight:bold}\
.stats span{margin-right:1.5rem}\
table{border-collapse:collapse;margin-top:.5rem}\
th,td{border:1px solid #ccc;padding:.25rem .5rem;text-align:left}\
dt{font-weight:bold}dd{margin:0 0 .5rem 1rem}";

// ─── Page builder ─────────────────────────────────────────────────────────────

pub struct Page {
  writer: Writer<Cursor<Vec<u8>>>,
}

impl Page {
  /// Open a page: document head, navigation, the analytics strip shown on
  /// every page, and the `<h1>`.
  pub fn new(
    title: &str,
    active: Nav,
    analytics: &AnalyticsSnapshot,
  ) -> Result<Self, Error> {
    let mut page = Self {
      writer: Writer::new(Cursor::new(Vec::new())),
    };

    page.write(Event::DocType(BytesText::from_escaped("html")))?;
    page.open("html", &[("lang", "en")])?;

    page.open("head", &[])?;
    page.write(Event::Empty(with_attrs("meta", &[("charset", "utf-8")])))?;
    page.element("title", &format!("{title} · Switchboard"))?;
    page.open("style", &[])?;
    page.write(Event::Text(BytesText::from_escaped(STYLESHEET)))?;
    page.close("style")?;
    page.close("head")?;

    page.open("body", &[])?;
    page.open("nav", &[])?;
    for item in Nav::ALL {
      let mut attrs = vec![("href", item.path())];
      if item == active {
        attrs.push(("class", "active"));
      }
      page.open("a", &attrs)?;
      page.text(item.label())?;
      page.close("a")?;
    }
    page.close("nav")?;

    page.open("div", &[("class", "stats")])?;
    for (label, value) in [
      ("Total chats", analytics.total_chats.to_string()),
      ("Avg. resolution", analytics.avg_resolution.clone()),
      ("Fallback rate", format!("{:.1}%", analytics.fallback_rate)),
      ("Social posts", analytics.social_posts.to_string()),
    ] {
      page.element("span", &format!("{label}: {value}"))?;
    }
    page.close("div")?;

    page.open("main", &[])?;
    page.element("h1", title)?;
    Ok(page)
  }

  pub fn heading(&mut self, text: &str) -> Result<&mut Self, Error> {
    self.element("h2", text)?;
    Ok(self)
  }

  pub fn paragraph(&mut self, text: &str) -> Result<&mut Self, Error> {
    self.element("p", text)?;
    Ok(self)
  }

  /// A `<dl>` of label/value pairs.
  pub fn details<'a>(
    &mut self,
    items: impl IntoIterator<Item = (&'a str, String)>,
  ) -> Result<&mut Self, Error> {
    self.open("dl", &[])?;
    for (term, value) in items {
      self.element("dt", term)?;
      self.element("dd", &value)?;
    }
    self.close("dl")?;
    Ok(self)
  }

  /// A table, or `empty` as a paragraph when there are no rows.
  pub fn table(
    &mut self,
    headers: &[&str],
    rows: impl IntoIterator<Item = Vec<String>>,
    empty: &str,
  ) -> Result<&mut Self, Error> {
    let mut rows = rows.into_iter().peekable();
    if rows.peek().is_none() {
      return self.paragraph(empty);
    }

    self.open("table", &[])?;
    self.open("thead", &[])?;
    self.open("tr", &[])?;
    for header in headers {
      self.element("th", header)?;
    }
    self.close("tr")?;
    self.close("thead")?;

    self.open("tbody", &[])?;
    for row in rows {
      self.open("tr", &[])?;
      for cell in &row {
        self.element("td", cell)?;
      }
      self.close("tr")?;
    }
    self.close("tbody")?;
    self.close("table")?;
    Ok(self)
  }

  pub fn finish(mut self) -> Result<String, Error> {
    self.close("main")?;
    self.close("body")?;
    self.close("html")?;
    String::from_utf8(self.writer.into_inner().into_inner())
      .map_err(|e| Error::Render(e.to_string()))
  }

  // ── Low-level helpers ─────────────────────────────────────────────────────

  fn write(&mut self, event: Event<'_>) -> Result<(), Error> {
    self
      .writer
      .write_event(event)
      .map_err(|e| Error::Render(e.to_string()))
  }

  fn open(&mut self, tag: &str, attrs: &[(&str, &str)]) -> Result<(), Error> {
    self.write(Event::Start(with_attrs(tag, attrs)))
  }

  fn close(&mut self, tag: &str) -> Result<(), Error> {
    self.write(Event::End(BytesEnd::new(tag)))
  }

  fn text(&mut self, text: &str) -> Result<(), Error> {
    self.write(Event::Text(BytesText::new(text)))
  }

  fn element(&mut self, tag: &str, text: &str) -> Result<(), Error> {
    self.open(tag, &[])?;
    self.text(text)?;
    self.close(tag)
  }
}

fn with_attrs<'a>(tag: &'a str, attrs: &[(&'a str, &'a str)]) -> BytesStart<'a> {
  let mut start = BytesStart::new(tag);
  for attr in attrs {
    start.push_attribute(*attr);
  }
  start
}

// ─── Tests ────────────────────────────────────────────────────────────────────
