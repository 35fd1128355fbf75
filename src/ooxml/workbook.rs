//! SpreadsheetML: first-sheet reader and single-sheet styled writer

use std::fmt::Write as _;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{esc, open_archive, read_part, write_package, Archive, OoxmlError, XML_DECL};

const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const NS_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// SpreadsheetML grid limits (last cell `XFD1048576`).
const MAX_COLUMNS: usize = 16_384;
const MAX_ROWS: usize = 1_048_576;

// ============================================================================
// Cells
// ============================================================================

/// Value of one worksheet cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Display form: integral numbers without a decimal point.
    pub fn to_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
            Self::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        }
    }
}

/// Rows of a worksheet, top to bottom. Missing cells are `Cell::Empty`;
/// rows are not padded to a common width.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    /// First row, or nothing for an empty sheet.
    pub fn header(&self) -> &[Cell] {
        self.rows.first().map_or(&[], Vec::as_slice)
    }

    /// Rows after the header.
    pub fn data_rows(&self) -> &[Vec<Cell>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// Cell at (row, column), `Empty` when out of range.
    pub fn cell(row: &[Cell], column: usize) -> &Cell {
        const EMPTY: &Cell = &Cell::Empty;
        row.get(column).unwrap_or(EMPTY)
    }
}

// ============================================================================
// Reading
// ============================================================================

/// Read the first worksheet of an `.xlsx` package.
pub fn read_first_sheet(bytes: &[u8]) -> Result<Sheet, OoxmlError> {
    let mut archive = open_archive(bytes)?;
    let shared = match read_part(&mut archive, "xl/sharedStrings.xml") {
        Ok(xml) => parse_shared_strings(&xml)?,
        Err(OoxmlError::MissingPart(_)) => Vec::new(),
        Err(e) => return Err(e),
    };
    let part = first_sheet_part(&mut archive)?;
    let xml = read_part(&mut archive, &part)?;
    parse_sheet(&xml, &part, &shared)
}

fn attr(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key || a.key.local_name().as_ref() == key)
        .map(|a| String::from_utf8_lossy(&a.value).into_owned())
}

/// Worksheet part of the first `<sheet>` in the workbook, through the
/// workbook relationships; lowest-numbered `sheetN.xml` when those are absent.
fn first_sheet_part(archive: &mut Archive<'_>) -> Result<String, OoxmlError> {
    if let Some(part) = sheet_part_from_workbook(archive)? {
        return Ok(part);
    }
    let mut names: Vec<String> = archive
        .file_names()
        .filter(|n| n.starts_with("xl/worksheets/sheet") && n.ends_with(".xml"))
        .map(str::to_string)
        .collect();
    names.sort_by_key(|name| {
        name.trim_start_matches("xl/worksheets/sheet")
            .trim_end_matches(".xml")
            .parse::<u32>()
            .unwrap_or(u32::MAX)
    });
    names
        .into_iter()
        .next()
        .ok_or_else(|| OoxmlError::MissingPart("xl/worksheets/sheet1.xml".to_string()))
}

fn sheet_part_from_workbook(archive: &mut Archive<'_>) -> Result<Option<String>, OoxmlError> {
    let (Ok(workbook), Ok(rels)) = (
        read_part(archive, "xl/workbook.xml"),
        read_part(archive, "xl/_rels/workbook.xml.rels"),
    ) else {
        return Ok(None);
    };

    let mut rel_id = None;
    let mut reader = Reader::from_reader(workbook.as_slice());
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e) | Event::Empty(e)) if e.local_name().as_ref() == b"sheet" => {
                rel_id = attr(&e, b"id");
                break;
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::xml("xl/workbook.xml", e)),
            _ => {}
        }
        buf.clear();
    }
    let Some(rel_id) = rel_id else {
        return Ok(None);
    };

    let mut reader = Reader::from_reader(rels.as_slice());
    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e) | Event::Empty(e)) if e.local_name().as_ref() == b"Relationship" => {
                if attr(&e, b"Id").as_deref() == Some(rel_id.as_str()) {
                    return Ok(attr(&e, b"Target").map(|t| match t.strip_prefix('/') {
                        Some(absolute) => absolute.to_string(),
                        None => format!("xl/{t}"),
                    }));
                }
            }
            Ok(Event::Eof) => return Ok(None),
            Err(e) => return Err(OoxmlError::xml("xl/_rels/workbook.xml.rels", e)),
            _ => {}
        }
    }
}

/// Shared strings; rich-text runs of one `<si>` are concatenated.
fn parse_shared_strings(xml: &[u8]) -> Result<Vec<String>, OoxmlError> {
    let mut strings = Vec::new();
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut current: Option<String> = None;
    let mut in_t = false;
    // Phonetic runs (<rPh>) repeat the text in kana and are skipped
    let mut in_phonetic = false;
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"si" => current = Some(String::new()),
                b"t" if !in_phonetic => in_t = true,
                b"rPh" => in_phonetic = true,
                _ => {}
            },
            Ok(Event::Empty(e)) if e.local_name().as_ref() == b"si" => strings.push(String::new()),
            Ok(Event::Text(te)) if in_t => {
                if let Some(s) = current.as_mut() {
                    s.push_str(&te.unescape().unwrap_or_default());
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"si" => strings.extend(current.take()),
                b"t" => in_t = false,
                b"rPh" => in_phonetic = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::xml("xl/sharedStrings.xml", e)),
            _ => {}
        }
        buf.clear();
    }
    Ok(strings)
}

/// Zero-based column of a cell reference (`"C7"` -> 2). `None` without
/// letters or past column `XFD`.
fn column_index(reference: &str) -> Option<usize> {
    let n = reference
        .bytes()
        .take_while(u8::is_ascii_alphabetic)
        .try_fold(0usize, |acc, b| {
            acc.checked_mul(26)?.checked_add(usize::from(b.to_ascii_uppercase() - b'A') + 1)
        })?;
    n.checked_sub(1).filter(|&c| c < MAX_COLUMNS)
}

/// Zero-based row of a cell reference or `<row r>` value. `None` when
/// missing, zero or past row 1048576.
fn row_index(reference: &str) -> Option<usize> {
    let digits = reference.trim_start_matches(|c: char| c.is_ascii_alphabetic());
    digits.parse::<usize>().ok().and_then(|r| r.checked_sub(1)).filter(|&r| r < MAX_ROWS)
}

/// (row, column) of an optional `r` attribute on `<c>`.
fn cell_position(reference: Option<&str>, part: &str) -> Result<Option<(usize, usize)>, OoxmlError> {
    let Some(reference) = reference else {
        return Ok(None);
    };
    match (row_index(reference), column_index(reference)) {
        (Some(row), Some(column)) => Ok(Some((row, column))),
        _ => Err(out_of_range(part, reference)),
    }
}

/// Zero-based row of an optional `r` attribute on `<row>`.
fn row_position(reference: Option<&str>, part: &str) -> Result<Option<usize>, OoxmlError> {
    reference
        .map(|r| row_index(r).ok_or_else(|| out_of_range(part, r)))
        .transpose()
}

fn out_of_range(part: &str, reference: &str) -> OoxmlError {
    OoxmlError::CellOutOfRange { part: part.to_string(), reference: reference.to_string() }
}

fn place(rows: &mut Vec<Vec<Cell>>, row: usize, column: usize, value: Cell) {
    if rows.len() <= row {
        rows.resize_with(row + 1, Vec::new);
    }
    let cells = &mut rows[row];
    if cells.len() <= column {
        cells.resize(column + 1, Cell::Empty);
    }
    cells[column] = value;
}

#[derive(Default)]
struct PendingCell {
    row: usize,
    column: usize,
    kind: Option<String>,
    value: Option<String>,
    inline: Option<String>,
}

impl PendingCell {
    fn resolve(self, shared: &[String]) -> Cell {
        match self.kind.as_deref() {
            Some("inlineStr") => self.inline.map_or(Cell::Empty, Cell::Text),
            Some("s") => self
                .value
                .and_then(|v| v.trim().parse::<usize>().ok())
                .and_then(|i| shared.get(i).cloned())
                .map_or(Cell::Empty, Cell::Text),
            Some("b") => self.value.map_or(Cell::Empty, |v| Cell::Bool(v.trim() == "1")),
            Some("str" | "e") => self.value.map_or(Cell::Empty, Cell::Text),
            _ => match self.value {
                None => Cell::Empty,
                Some(v) => v.trim().parse::<f64>().map_or(Cell::Text(v), Cell::Number),
            },
        }
    }
}

fn parse_sheet(xml: &[u8], part: &str, shared: &[String]) -> Result<Sheet, OoxmlError> {
    let mut rows: Vec<Vec<Cell>> = Vec::new();
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();

    let mut next_row = 0usize;
    let mut current_row = 0usize;
    let mut next_column = 0usize;
    let mut cell: Option<PendingCell> = None;
    let mut in_v = false;
    let mut in_inline_t = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"row" => {
                    current_row = row_position(attr(&e, b"r").as_deref(), part)?.unwrap_or(next_row);
                    next_row = current_row + 1;
                    next_column = 0;
                    if rows.len() <= current_row {
                        rows.resize_with(current_row + 1, Vec::new);
                    }
                }
                b"c" => {
                    let (row, column) =
                        cell_position(attr(&e, b"r").as_deref(), part)?.unwrap_or((current_row, next_column));
                    if column >= MAX_COLUMNS {
                        return Err(out_of_range(part, &column_name(column)));
                    }
                    next_column = column + 1;
                    cell = Some(PendingCell { row, column, kind: attr(&e, b"t"), ..Default::default() });
                }
                b"v" => in_v = true,
                b"t" => in_inline_t = cell.is_some(),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"c" => {
                    let position = cell_position(attr(&e, b"r").as_deref(), part)?;
                    next_column = position.map_or(next_column, |(_, column)| column) + 1;
                }
                b"row" => {
                    current_row = row_position(attr(&e, b"r").as_deref(), part)?.unwrap_or(next_row);
                    next_row = current_row + 1;
                    if rows.len() <= current_row {
                        rows.resize_with(current_row + 1, Vec::new);
                    }
                }
                _ => {}
            },
            Ok(Event::Text(te)) => {
                if let Some(pending) = cell.as_mut() {
                    let text = te.unescape().unwrap_or_default();
                    if in_v {
                        pending.value.get_or_insert_with(String::new).push_str(&text);
                    } else if in_inline_t {
                        pending.inline.get_or_insert_with(String::new).push_str(&text);
                    }
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"v" => in_v = false,
                b"t" => in_inline_t = false,
                b"c" => {
                    if let Some(pending) = cell.take() {
                        let (row, column) = (pending.row, pending.column);
                        let value = pending.resolve(shared);
                        if !value.is_empty() {
                            place(&mut rows, row, column, value);
                        }
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::xml(part, e)),
            _ => {}
        }
        buf.clear();
    }

    while rows.last().is_some_and(|r| r.iter().all(Cell::is_empty)) {
        rows.pop();
    }
    Ok(Sheet { rows })
}

// ============================================================================
// Writing
// ============================================================================

/// Visual format of a written cell. Colours are 6-digit RGB hex.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CellFormat {
    pub bold: bool,
    pub font_colour: Option<String>,
    pub fill: Option<String>,
    pub border: bool,
    pub wrap: bool,
    pub centered: bool,
}

impl CellFormat {
    fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WriteCell {
    pub value: Cell,
    pub format: CellFormat,
}

impl WriteCell {
    pub fn plain(value: Cell) -> Self {
        Self { value, format: CellFormat::default() }
    }

    pub const fn styled(value: Cell, format: CellFormat) -> Self {
        Self { value, format }
    }
}

/// Builds a single-sheet workbook.
#[derive(Debug, Clone)]
pub struct WorkbookWriter {
    sheet_name: String,
    widths: Vec<f64>,
    rows: Vec<Vec<WriteCell>>,
}

/// Distinct fonts, fills and cell formats of a workbook.
struct StyleTable {
    fonts: Vec<(bool, Option<String>)>,
    fills: Vec<String>,
    formats: Vec<CellFormat>,
}

impl StyleTable {
    fn collect(rows: &[Vec<WriteCell>]) -> Self {
        let mut table = Self { fonts: vec![(false, None)], fills: Vec::new(), formats: Vec::new() };
        for format in rows.iter().flatten().map(|c| &c.format) {
            if format.is_default() || table.formats.contains(format) {
                continue;
            }
            let font = (format.bold, format.font_colour.clone());
            if !table.fonts.contains(&font) {
                table.fonts.push(font);
            }
            if let Some(fill) = &format.fill {
                if !table.fills.contains(fill) {
                    table.fills.push(fill.clone());
                }
            }
            table.formats.push(format.clone());
        }
        table
    }

    /// `s` attribute of a cell; 0 is the default format.
    fn style_id(&self, format: &CellFormat) -> usize {
        self.formats.iter().position(|f| f == format).map_or(0, |i| i + 1)
    }

    fn to_xml(&self) -> String {
        let mut xml = format!(r#"{XML_DECL}<styleSheet xmlns="{NS_MAIN}">"#);

        let _ = write!(xml, r#"<fonts count="{}">"#, self.fonts.len());
        for (bold, colour) in &self.fonts {
            xml.push_str("<font>");
            if *bold {
                xml.push_str("<b/>");
            }
            xml.push_str(r#"<sz val="11"/>"#);
            if let Some(c) = colour {
                let _ = write!(xml, r#"<color rgb="FF{}"/>"#, esc(c));
            }
            xml.push_str(r#"<name val="Calibri"/><family val="2"/></font>"#);
        }
        xml.push_str("</fonts>");

        // Fills 0 and 1 are reserved by the format
        let _ = write!(
            xml,
            r#"<fills count="{}"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill>"#,
            self.fills.len() + 2
        );
        for fill in &self.fills {
            let _ = write!(
                xml,
                r#"<fill><patternFill patternType="solid"><fgColor rgb="FF{}"/><bgColor indexed="64"/></patternFill></fill>"#,
                esc(fill)
            );
        }
        xml.push_str("</fills>");

        xml.push_str(r#"<borders count="2"><border><left/><right/><top/><bottom/><diagonal/></border><border>"#);
        for side in ["left", "right", "top", "bottom"] {
            let _ = write!(xml, r#"<{side} style="thin"><color indexed="64"/></{side}>"#);
        }
        xml.push_str("<diagonal/></border></borders>");

        xml.push_str(r#"<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>"#);
        let _ = write!(
            xml,
            r#"<cellXfs count="{}"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>"#,
            self.formats.len() + 1
        );
        for format in &self.formats {
            let font_id = self
                .fonts
                .iter()
                .position(|(b, c)| *b == format.bold && *c == format.font_colour)
                .unwrap_or(0);
            let fill_id = format
                .fill
                .as_ref()
                .and_then(|f| self.fills.iter().position(|x| x == f))
                .map_or(0, |i| i + 2);
            let border_id = usize::from(format.border);
            let _ = write!(
                xml,
                r#"<xf numFmtId="0" fontId="{font_id}" fillId="{fill_id}" borderId="{border_id}" xfId="0" applyFont="1" applyFill="1" applyBorder="1" applyAlignment="1"><alignment vertical="center""#
            );
            if format.centered {
                xml.push_str(r#" horizontal="center""#);
            }
            if format.wrap {
                xml.push_str(r#" wrapText="1""#);
            }
            xml.push_str("/></xf>");
        }
        xml.push_str("</cellXfs>");
        xml.push_str(r#"<cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>"#);
        xml.push_str("</styleSheet>");
        xml
    }
}

/// Spreadsheet column name of a zero-based index (`0` -> `A`, `27` -> `AB`).
fn column_name(mut index: usize) -> String {
    let mut name = Vec::new();
    loop {
        name.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    name.reverse();
    String::from_utf8_lossy(&name).into_owned()
}

impl WorkbookWriter {
    pub fn new(sheet_name: &str) -> Self {
        // Sheet names are limited to 31 characters
        let sheet_name: String = sheet_name.chars().take(31).collect();
        Self { sheet_name, widths: Vec::new(), rows: Vec::new() }
    }

    #[must_use]
    pub fn column_widths(mut self, widths: &[f64]) -> Self {
        self.widths = widths.to_vec();
        self
    }

    pub fn push_row(&mut self, row: Vec<WriteCell>) {
        self.rows.push(row);
    }

    fn sheet_xml(&self, styles: &StyleTable) -> String {
        let mut xml = format!(r#"{XML_DECL}<worksheet xmlns="{NS_MAIN}" xmlns:r="{NS_REL}">"#);
        if !self.widths.is_empty() {
            xml.push_str("<cols>");
            for (i, width) in self.widths.iter().enumerate() {
                let _ = write!(
                    xml,
                    r#"<col min="{n}" max="{n}" width="{width}" customWidth="1"/>"#,
                    n = i + 1
                );
            }
            xml.push_str("</cols>");
        }
        xml.push_str("<sheetData>");
        for (r, row) in self.rows.iter().enumerate() {
            let _ = write!(xml, r#"<row r="{}">"#, r + 1);
            for (c, cell) in row.iter().enumerate() {
                let reference = format!("{}{}", column_name(c), r + 1);
                let style = match styles.style_id(&cell.format) {
                    0 => String::new(),
                    id => format!(r#" s="{id}""#),
                };
                match &cell.value {
                    Cell::Empty => {
                        if !style.is_empty() {
                            let _ = write!(xml, r#"<c r="{reference}"{style}/>"#);
                        }
                    }
                    Cell::Text(s) => {
                        let _ = write!(
                            xml,
                            r#"<c r="{reference}"{style} t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
                            esc(s)
                        );
                    }
                    Cell::Number(n) => {
                        let _ = write!(xml, r#"<c r="{reference}"{style}><v>{n}</v></c>"#);
                    }
                    Cell::Bool(b) => {
                        let _ = write!(xml, r#"<c r="{reference}"{style} t="b"><v>{}</v></c>"#, u8::from(*b));
                    }
                }
            }
            xml.push_str("</row>");
        }
        xml.push_str("</sheetData></worksheet>");
        xml
    }

    /// Serialise the workbook to `.xlsx` bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, OoxmlError> {
        let styles = StyleTable::collect(&self.rows);
        let content_types = format!(
            r#"{XML_DECL}<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/></Types>"#
        );
        let root_rels = format!(
            r#"{XML_DECL}<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#
        );
        let workbook = format!(
            r#"{XML_DECL}<workbook xmlns="{NS_MAIN}" xmlns:r="{NS_REL}"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
            esc(&self.sheet_name)
        );
        let workbook_rels = format!(
            r#"{XML_DECL}<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#
        );
        write_package(&[
            ("[Content_Types].xml", content_types),
            ("_rels/.rels", root_rels),
            ("xl/workbook.xml", workbook),
            ("xl/_rels/workbook.xml.rels", workbook_rels),
            ("xl/styles.xml", styles.to_xml()),
            ("xl/worksheets/sheet1.xml", self.sheet_xml(&styles)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_format() -> CellFormat {
        CellFormat {
            bold: true,
            font_colour: Some("FFFFFF".into()),
            fill: Some("0066CC".into()),
            border: true,
            wrap: true,
            centered: true,
        }
    }

    #[test]
    fn test_column_names_and_indices() {
        assert_eq!(column_name(0), "A");
        assert_eq!(column_name(25), "Z");
        assert_eq!(column_name(26), "AA");
        assert_eq!(column_name(27), "AB");
        assert_eq!(column_index("A1"), Some(0));
        assert_eq!(column_index("AB12"), Some(27));
        assert_eq!(row_index("AB12"), Some(11));
        assert_eq!(column_index("12"), None);
        assert_eq!(column_index("XFD1"), Some(MAX_COLUMNS - 1));
        assert_eq!(column_index("XFE1"), None);
        assert_eq!(column_index("ZZZZZZZZZZZZZZZZ1"), None);
        assert_eq!(row_index("A1048576"), Some(MAX_ROWS - 1));
        assert_eq!(row_index("A1048577"), None);
        assert_eq!(row_index("A0"), None);
    }

    #[test]
    fn test_references_outside_the_grid_are_rejected() {
        let long_column = parse_sheet(
            br#"<worksheet><sheetData><row r="1"><c r="ZZZZZZZZZZZZZZZZ1"><v>1</v></c></row></sheetData></worksheet>"#,
            "sheet1.xml",
            &[],
        );
        assert!(matches!(
            long_column,
            Err(OoxmlError::CellOutOfRange { ref reference, .. }) if reference == "ZZZZZZZZZZZZZZZZ1"
        ));

        let far_row = parse_sheet(
            br#"<worksheet><sheetData><row r="200000000"><c><v>1</v></c></row></sheetData></worksheet>"#,
            "sheet1.xml",
            &[],
        );
        assert!(matches!(far_row, Err(OoxmlError::CellOutOfRange { .. })));

        let empty_cell = parse_sheet(
            br#"<worksheet><sheetData><row r="1"><c r="XFE1"/></row></sheetData></worksheet>"#,
            "sheet1.xml",
            &[],
        );
        assert!(matches!(empty_cell, Err(OoxmlError::CellOutOfRange { .. })));

        let last_cell = parse_sheet(
            br#"<worksheet><sheetData><row r="2"><c r="XFD2"><v>7</v></c></row></sheetData></worksheet>"#,
            "sheet1.xml",
            &[],
        )
        .unwrap();
        assert_eq!(Sheet::cell(&last_cell.rows[1], MAX_COLUMNS - 1), &Cell::Number(7.0));
    }

    #[test]
    fn test_written_workbook_reads_back() {
        let mut writer = WorkbookWriter::new("AMDEC").column_widths(&[20.0, 5.0]);
        writer.push_row(vec![
            WriteCell::styled(Cell::text("Composant"), header_format()),
            WriteCell::styled(Cell::text("C"), header_format()),
        ]);
        writer.push_row(vec![
            WriteCell::plain(Cell::text("Économiseur BT & <HT>")),
            WriteCell::plain(Cell::Number(24.0)),
        ]);
        writer.push_row(vec![WriteCell::plain(Cell::Empty), WriteCell::plain(Cell::Number(2.5))]);

        let bytes = writer.to_bytes().unwrap();
        let sheet = read_first_sheet(&bytes).unwrap();
        assert_eq!(sheet.header(), &[Cell::text("Composant"), Cell::text("C")]);
        assert_eq!(sheet.data_rows()[0][0], Cell::text("Économiseur BT & <HT>"));
        assert_eq!(sheet.data_rows()[0][1], Cell::Number(24.0));
        assert_eq!(sheet.data_rows()[1][0], Cell::Empty);
        assert_eq!(Sheet::cell(&sheet.data_rows()[1], 1).to_text(), "2.5");
        assert_eq!(Sheet::cell(&sheet.data_rows()[1], 9), &Cell::Empty);
    }

    #[test]
    fn test_styles_are_deduplicated() {
        let mut writer = WorkbookWriter::new("S");
        writer.push_row(vec![
            WriteCell::styled(Cell::text("a"), header_format()),
            WriteCell::styled(Cell::text("b"), header_format()),
            WriteCell::plain(Cell::text("c")),
        ]);
        let styles = StyleTable::collect(&writer.rows);
        assert_eq!(styles.formats.len(), 1);
        assert_eq!(styles.fills, vec!["0066CC".to_string()]);
        assert_eq!(styles.style_id(&header_format()), 1);
        assert_eq!(styles.style_id(&CellFormat::default()), 0);
        assert!(styles.to_xml().contains(r#"<fgColor rgb="FF0066CC"/>"#));
    }

    #[test]
    fn test_shared_strings_and_sparse_cells() {
        let shared = parse_shared_strings(
            br#"<sst><si><t>Composant</t></si><si><r><t>Sous-</t></r><r><t>composant</t></r></si></sst>"#,
        )
        .unwrap();
        assert_eq!(shared, vec!["Composant", "Sous-composant"]);

        let sheet = parse_sheet(
            br#"<worksheet><sheetData>
                <row r="1"><c r="A1" t="s"><v>0</v></c><c r="C1" t="s"><v>1</v></c></row>
                <row r="3"><c r="B3"><v>1.5</v></c><c r="C3" t="b"><v>1</v></c></row>
                <row r="4"/>
            </sheetData></worksheet>"#,
            "sheet1.xml",
            &shared,
        )
        .unwrap();
        assert_eq!(sheet.rows.len(), 3, "trailing empty row trimmed");
        assert_eq!(sheet.rows[0], vec![Cell::text("Composant"), Cell::Empty, Cell::text("Sous-composant")]);
        assert!(sheet.rows[1].is_empty());
        assert_eq!(sheet.rows[2], vec![Cell::Empty, Cell::Number(1.5), Cell::Bool(true)]);
    }
}
