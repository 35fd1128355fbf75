//! WordprocessingML: work-order document writer and paragraph extraction

use std::fmt::Write as _;

use quick_xml::events::Event;
use quick_xml::Reader;

use super::{esc, open_archive, read_part, write_package, OoxmlError, XML_DECL};

const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const DOCUMENT_PART: &str = "word/document.xml";

/// A4 portrait with 2.5 cm margins, in twentieths of a point.
const PAGE_WIDTH: u32 = 11_906;
const PAGE_HEIGHT: u32 = 16_838;
const PAGE_MARGIN: u32 = 1_417;

/// Appends body blocks and serialises them into a `.docx` package.
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    body: String,
}

/// Runs of one paragraph; `\n` inside the text becomes a line break.
fn runs(text: &str, bold: bool) -> String {
    let mut xml = String::from("<w:r>");
    if bold {
        xml.push_str("<w:rPr><w:b/></w:rPr>");
    }
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            xml.push_str("<w:br/>");
        }
        let _ = write!(xml, r#"<w:t xml:space="preserve">{}</w:t>"#, esc(line));
    }
    xml.push_str("</w:r>");
    xml
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Heading of level 1 to 3.
    pub fn heading(&mut self, level: u8, text: &str) -> &mut Self {
        let level = level.clamp(1, 3);
        let _ = write!(
            self.body,
            r#"<w:p><w:pPr><w:pStyle w:val="Heading{level}"/></w:pPr>{}</w:p>"#,
            runs(text, false)
        );
        self
    }

    pub fn paragraph(&mut self, text: &str) -> &mut Self {
        let _ = write!(self.body, "<w:p>{}</w:p>", runs(text, false));
        self
    }

    /// Item of a bulleted list.
    pub fn bullet(&mut self, text: &str) -> &mut Self {
        let _ = write!(
            self.body,
            r#"<w:p><w:pPr><w:pStyle w:val="ListBullet"/><w:numPr><w:ilvl w:val="0"/><w:numId w:val="1"/></w:numPr></w:pPr>{}</w:p>"#,
            runs(text, false)
        );
        self
    }

    /// Bordered table with a bold centred header row.
    pub fn table(&mut self, headers: &[&str], rows: &[Vec<String>]) -> &mut Self {
        self.body.push_str(r#"<w:tbl><w:tblPr><w:tblStyle w:val="TableGrid"/><w:tblW w:w="0" w:type="auto"/><w:tblBorders>"#);
        for side in ["top", "left", "bottom", "right", "insideH", "insideV"] {
            let _ = write!(self.body, r#"<w:{side} w:val="single" w:sz="4" w:space="0" w:color="000000"/>"#);
        }
        self.body.push_str("</w:tblBorders></w:tblPr><w:tblGrid>");
        for _ in headers {
            self.body.push_str("<w:gridCol/>");
        }
        self.body.push_str("</w:tblGrid><w:tr>");
        for header in headers {
            let _ = write!(
                self.body,
                r#"<w:tc><w:p><w:pPr><w:jc w:val="center"/></w:pPr>{}</w:p></w:tc>"#,
                runs(header, true)
            );
        }
        self.body.push_str("</w:tr>");
        for row in rows {
            self.body.push_str("<w:tr>");
            for i in 0..headers.len() {
                let text = row.get(i).map_or("", String::as_str);
                let _ = write!(self.body, "<w:tc><w:p>{}</w:p></w:tc>", runs(text, false));
            }
            self.body.push_str("</w:tr>");
        }
        self.body.push_str("</w:tbl>");
        self
    }

    fn document_xml(&self) -> String {
        format!(
            r#"{XML_DECL}<w:document xmlns:w="{NS_W}"><w:body>{}<w:sectPr><w:pgSz w:w="{PAGE_WIDTH}" w:h="{PAGE_HEIGHT}"/><w:pgMar w:top="{PAGE_MARGIN}" w:right="{PAGE_MARGIN}" w:bottom="{PAGE_MARGIN}" w:left="{PAGE_MARGIN}" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr></w:body></w:document>"#,
            self.body
        )
    }

    fn styles_xml() -> String {
        let mut xml = format!(
            r#"{XML_DECL}<w:styles xmlns:w="{NS_W}"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri"/><w:sz w:val="22"/></w:rPr></w:rPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style>"#
        );
        for (level, size, colour) in [(1, 32, "2F5496"), (2, 26, "2F5496"), (3, 24, "1F3763")] {
            let _ = write!(
                xml,
                r#"<w:style w:type="paragraph" w:styleId="Heading{level}"><w:name w:val="heading {level}"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:pPr><w:keepNext/><w:spacing w:before="240" w:after="80"/><w:outlineLvl w:val="{}"/></w:pPr><w:rPr><w:b/><w:color w:val="{colour}"/><w:sz w:val="{size}"/></w:rPr></w:style>"#,
                level - 1
            );
        }
        xml.push_str(r#"<w:style w:type="paragraph" w:styleId="ListBullet"><w:name w:val="List Bullet"/><w:basedOn w:val="Normal"/><w:pPr><w:numPr><w:numId w:val="1"/></w:numPr></w:pPr></w:style>"#);
        xml.push_str(r#"<w:style w:type="table" w:styleId="TableGrid"><w:name w:val="Table Grid"/></w:style></w:styles>"#);
        xml
    }

    fn numbering_xml() -> String {
        format!(
            r#"{XML_DECL}<w:numbering xmlns:w="{NS_W}"><w:abstractNum w:abstractNumId="0"><w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="•"/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr></w:lvl></w:abstractNum><w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num></w:numbering>"#
        )
    }

    /// Serialise the document to `.docx` bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, OoxmlError> {
        let content_types = format!(
            r#"{XML_DECL}<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/></Types>"#
        );
        let root_rels = format!(
            r#"{XML_DECL}<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#
        );
        let document_rels = format!(
            r#"{XML_DECL}<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/></Relationships>"#
        );
        write_package(&[
            ("[Content_Types].xml", content_types),
            ("_rels/.rels", root_rels),
            (DOCUMENT_PART, self.document_xml()),
            ("word/_rels/document.xml.rels", document_rels),
            ("word/styles.xml", Self::styles_xml()),
            ("word/numbering.xml", Self::numbering_xml()),
        ])
    }
}

/// Text of the body paragraphs of a `.docx`, one per line. Paragraphs inside
/// tables are skipped; line breaks and tabs inside a paragraph are kept.
pub fn extract_document_text(bytes: &[u8]) -> Result<String, OoxmlError> {
    let mut archive = open_archive(bytes)?;
    let xml = read_part(&mut archive, DOCUMENT_PART)?;

    let mut paragraphs: Vec<String> = Vec::new();
    let mut reader = Reader::from_reader(xml.as_slice());
    let mut buf = Vec::new();
    let mut table_depth = 0usize;
    let mut current: Option<String> = None;
    let mut in_t = false;
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"tbl" => table_depth += 1,
                b"p" if table_depth == 0 => current = Some(String::new()),
                b"t" => in_t = current.is_some(),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"p" if table_depth == 0 => paragraphs.push(String::new()),
                b"br" | b"cr" => {
                    if let Some(p) = current.as_mut() {
                        p.push('\n');
                    }
                }
                b"tab" => {
                    if let Some(p) = current.as_mut() {
                        p.push('\t');
                    }
                }
                _ => {}
            },
            Ok(Event::Text(te)) if in_t => {
                if let Some(p) = current.as_mut() {
                    p.push_str(&te.unescape().unwrap_or_default());
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"tbl" => table_depth = table_depth.saturating_sub(1),
                b"p" if table_depth == 0 => paragraphs.extend(current.take()),
                b"t" => in_t = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::xml(DOCUMENT_PART, e)),
            _ => {}
        }
        buf.clear();
    }
    Ok(paragraphs.join("\n"))
}
