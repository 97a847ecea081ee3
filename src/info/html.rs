//! Minimal HTML element model for info panels.
//!
//! Values read from the database are escaped; [`HtmlText::Markup`] is for
//! text built here that carries `action:` links. A `<warning>` marker in
//! markup renders as a warning span.

use std::fmt::Write;

const WARNING_MARKER: &str = "<warning>";
const WARNING_SPAN: &str = "<span class=\"warning\">Warning:</span>";

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HtmlText {
    Plain(String),
    Markup(String),
}

impl HtmlText {
    pub fn to_html(&self) -> String {
        let html = match self {
            HtmlText::Plain(text) => escape(text),
            HtmlText::Markup(markup) => markup.replace(WARNING_MARKER, WARNING_SPAN),
        };
        html.replace('\n', "<br>")
    }

    pub fn is_empty(&self) -> bool {
        match self {
            HtmlText::Plain(text) | HtmlText::Markup(text) => text.is_empty(),
        }
    }
}

impl From<&str> for HtmlText {
    fn from(text: &str) -> Self {
        HtmlText::Plain(text.to_string())
    }
}

impl From<String> for HtmlText {
    fn from(text: String) -> Self {
        HtmlText::Plain(text)
    }
}

impl From<i64> for HtmlText {
    fn from(value: i64) -> Self {
        HtmlText::Plain(value.to_string())
    }
}

pub fn markup(text: impl Into<String>) -> HtmlText {
    HtmlText::Markup(text.into())
}

fn render_attrs(attrs: &[(String, String)]) -> String {
    let mut out = String::new();
    for (key, value) in attrs {
        let _ = write!(out, " {}=\"{}\"", key, escape(value));
    }
    out
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HtmlTableCol {
    pub text: HtmlText,
    pub attrs: Vec<(String, String)>,
}

impl HtmlTableCol {
    pub fn new(text: impl Into<HtmlText>) -> Self {
        Self {
            text: text.into(),
            attrs: Vec::new(),
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.attrs.push(("class".to_string(), class.to_string()));
        self
    }

    pub fn to_html(&self) -> String {
        format!("<td{}>{}</td>", render_attrs(&self.attrs), self.text.to_html())
    }
}

impl From<HtmlText> for HtmlTableCol {
    fn from(text: HtmlText) -> Self {
        HtmlTableCol::new(text)
    }
}

impl From<&str> for HtmlTableCol {
    fn from(text: &str) -> Self {
        HtmlTableCol::new(text)
    }
}

impl From<String> for HtmlTableCol {
    fn from(text: String) -> Self {
        HtmlTableCol::new(text)
    }
}

impl From<i64> for HtmlTableCol {
    fn from(value: i64) -> Self {
        HtmlTableCol::new(value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HtmlTableHeader(pub Vec<String>);

impl HtmlTableHeader {
    pub fn new(titles: &[&str]) -> Self {
        Self(titles.iter().map(|t| t.to_string()).collect())
    }

    pub fn to_html(&self) -> String {
        let cells: String = self
            .0
            .iter()
            .map(|title| format!("<th>{}</th>", escape(title)))
            .collect();
        format!("<tr>{}</tr>", cells)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HtmlTableRow {
    Header(HtmlTableHeader),
    Cols(Vec<HtmlTableCol>),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HtmlTable {
    pub rows: Vec<HtmlTableRow>,
    pub attrs: Vec<(String, String)>,
}

impl HtmlTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Two-column label/value table.
    pub fn key_values(rows: Vec<(&str, HtmlTableCol)>) -> Self {
        let mut table = Self::new();
        for (label, value) in rows {
            table.push_row(vec![HtmlTableCol::new(label), value]);
        }
        table
    }

    /// Table whose first row is a header, styled as such.
    pub fn with_header(titles: &[&str]) -> Self {
        Self {
            rows: vec![HtmlTableRow::Header(HtmlTableHeader::new(titles))],
            attrs: vec![("class".to_string(), "header".to_string())],
        }
    }

    pub fn push_row(&mut self, cols: Vec<HtmlTableCol>) {
        self.rows.push(HtmlTableRow::Cols(cols));
    }

    pub fn to_html(&self) -> String {
        let mut out = format!("<table{}>", render_attrs(&self.attrs));
        for row in &self.rows {
            match row {
                HtmlTableRow::Header(header) => out.push_str(&header.to_html()),
                HtmlTableRow::Cols(cols) => {
                    out.push_str("<tr>");
                    for col in cols {
                        out.push_str(&col.to_html());
                    }
                    out.push_str("</tr>");
                }
            }
        }
        out.push_str("</table>");
        out
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HtmlParagraph(pub HtmlText);

impl HtmlParagraph {
    pub fn to_html(&self) -> String {
        format!("<p>{}</p>", self.0.to_html())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HtmlList(pub Vec<HtmlText>);

impl HtmlList {
    pub fn to_html(&self) -> String {
        let items: String = self
            .0
            .iter()
            .map(|item| format!("<li>{}</li>", item.to_html()))
            .collect();
        format!("<ul>{}</ul>", items)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HtmlSection {
    pub title: String,
    pub content: Vec<HtmlElem>,
}

impl HtmlSection {
    pub fn new(title: &str, content: Vec<HtmlElem>) -> Self {
        Self {
            title: title.to_string(),
            content,
        }
    }

    pub fn to_html(&self) -> String {
        format!(
            "<div class=\"section\"><h2>{}</h2><div>{}</div></div>",
            escape(&self.title),
            render(&self.content)
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HtmlElem {
    Text(HtmlText),
    Table(HtmlTable),
    Paragraph(HtmlParagraph),
    List(HtmlList),
    Section(HtmlSection),
}

impl HtmlElem {
    pub fn to_html(&self) -> String {
        match self {
            HtmlElem::Text(text) => text.to_html(),
            HtmlElem::Table(table) => table.to_html(),
            HtmlElem::Paragraph(paragraph) => paragraph.to_html(),
            HtmlElem::List(list) => list.to_html(),
            HtmlElem::Section(section) => section.to_html(),
        }
    }

    pub fn paragraph(text: HtmlText) -> Self {
        HtmlElem::Paragraph(HtmlParagraph(text))
    }

    /// Paragraph holding a `<warning>` marked message.
    pub fn warning(message: &str) -> Self {
        Self::paragraph(markup(format!("{} {}", WARNING_MARKER, message)))
    }
}

impl From<HtmlTable> for HtmlElem {
    fn from(table: HtmlTable) -> Self {
        HtmlElem::Table(table)
    }
}

impl From<HtmlSection> for HtmlElem {
    fn from(section: HtmlSection) -> Self {
        HtmlElem::Section(section)
    }
}

pub fn render(elems: &[HtmlElem]) -> String {
    elems.iter().map(HtmlElem::to_html).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_escaped() {
        let text = HtmlText::from("a < b & \"c\"\nnext");
        assert_eq!(text.to_html(), "a &lt; b &amp; &quot;c&quot;<br>next");
    }

    #[test]
    fn test_markup_keeps_links_and_renders_warnings() {
        let text = markup("<warning> Unknown (<a href=\"action:rows/recount\">find out</a>)");
        assert_eq!(
            text.to_html(),
            "<span class=\"warning\">Warning:</span> Unknown (<a href=\"action:rows/recount\">find out</a>)"
        );
    }

    #[test]
    fn test_plain_warning_marker_is_not_trusted() {
        assert_eq!(HtmlText::from("<warning>").to_html(), "&lt;warning&gt;");
    }

    #[test]
    fn test_header_table() {
        let mut table = HtmlTable::with_header(&["Name", "Column(s)"]);
        table.push_row(vec!["PK_ROADS".into(), HtmlTableCol::new("ID").with_class("underline")]);
        assert_eq!(
            table.to_html(),
            "<table class=\"header\"><tr><th>Name</th><th>Column(s)</th></tr>\
             <tr><td>PK_ROADS</td><td class=\"underline\">ID</td></tr></table>"
        );
    }

    #[test]
    fn test_section_and_list() {
        let section = HtmlSection::new(
            "Fields",
            vec![
                HtmlElem::List(HtmlList(vec!["one".into(), "two".into()])),
                HtmlElem::warning("careful"),
            ],
        );
        assert_eq!(
            section.to_html(),
            "<div class=\"section\"><h2>Fields</h2><div><ul><li>one</li><li>two</li></ul>\
             <p><span class=\"warning\">Warning:</span> careful</p></div></div>"
        );
    }
}
