//! CSV reader for the error-code catalogue.

use super::error::ParseError;
use crate::types::{ErrorRecord, ModalLink};
use csv::StringRecord;

/// Manufacturer value marking a row that carries the dataset version stamp.
const VERSION_MARKER: &str = "csvversion";

/// Delimiters tried when sniffing the header line, in order of preference.
const DELIMITER_CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Records parsed from one catalogue text.
#[derive(Debug, Default)]
pub(crate) struct ParsedRows {
    pub records: Vec<ErrorRecord>,
    pub schema_version: Option<String>,
}

pub(crate) fn is_version_marker(manufacturer: &str) -> bool {
    manufacturer.trim().eq_ignore_ascii_case(VERSION_MARKER)
}

/// Parses catalogue text into records.
///
/// Fails as a whole on the first structural error; no partial result is
/// returned.
pub(crate) fn parse_rows(text: &str) -> Result<ParsedRows, ParseError> {
    let delimiter = sniff_delimiter(text);
    // The reader accepts a quote left open at EOF and swallows every
    // following row into one field.
    if let Some(line) = unterminated_quote(text, delimiter) {
        return Err(ParseError::UnterminatedQuote { line });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(ParseError::MissingHeader);
    }

    let columns = ColumnMap::from_headers(&headers);
    if columns.is_empty() {
        return Err(ParseError::UnknownLayout {
            header: headers.iter().collect::<Vec<_>>().join(","),
        });
    }

    let mut parsed = ParsedRows::default();
    for row in reader.records() {
        let row = row?;
        let record = columns.record(&row);

        if is_version_marker(&record.manufacturer) {
            if parsed.schema_version.is_none() {
                parsed.schema_version = version_stamp(&record);
            }
            continue;
        }

        parsed.records.push(record);
    }

    Ok(parsed)
}

/// Picks the candidate delimiter that occurs most often in the header line.
fn sniff_delimiter(text: &str) -> u8 {
    let Some(header) = text.lines().find(|line| !line.trim().is_empty()) else {
        return b',';
    };

    let mut best = (b',', 0);
    for candidate in DELIMITER_CANDIDATES {
        let count = header.bytes().filter(|b| *b == candidate).count();
        if count > best.1 {
            best = (candidate, count);
        }
    }
    best.0
}

/// Returns the 1-based line of a quoted field that is never closed.
///
/// Quotes only open a field at its start; elsewhere they are literal, and
/// `""` inside a quoted field is an escaped quote.
fn unterminated_quote(text: &str, delimiter: u8) -> Option<usize> {
    let mut line = 1;
    let mut opened_at = None;
    let mut field_start = true;
    let mut bytes = text.bytes().peekable();

    while let Some(byte) = bytes.next() {
        if byte == b'\n' {
            line += 1;
        }
        if opened_at.is_some() {
            if byte == b'"' {
                if bytes.peek() == Some(&b'"') {
                    bytes.next();
                } else {
                    opened_at = None;
                }
            }
            continue;
        }
        field_start = match byte {
            b'"' if field_start => {
                opened_at = Some(line);
                false
            }
            b'\n' | b'\r' => true,
            _ => byte == delimiter,
        };
    }
    opened_at
}

fn version_stamp(record: &ErrorRecord) -> Option<String> {
    [&record.schema_version, &record.code, &record.device_type]
        .into_iter()
        .find(|value| !value.is_empty())
        .cloned()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Manufacturer,
    DeviceType,
    Code,
    Keywords,
    ErrorText,
    RemedyText,
    InfoText,
    ExtraText,
    Category,
    Link,
    DeviceImage,
    Details,
    ModalLinks,
    SchemaVersion,
}

impl Column {
    const COUNT: usize = 14;

    /// Accepted header names, compared after trimming and lower-casing.
    fn aliases(self) -> &'static [&'static str] {
        match self {
            Column::Manufacturer => &["hersteller", "manufacturer"],
            Column::DeviceType => &["typ", "type", "device_type", "devicetype", "device type"],
            Column::Code => &["code", "fehlercode", "error_code"],
            Column::Keywords => &["suchbegriffe", "keywords", "schlagwoerter"],
            Column::ErrorText => &["fehler", "error", "error_text"],
            Column::RemedyText => &["ursache", "massnahme", "maßnahme", "remedy", "remedy_text"],
            Column::InfoText => &["info", "infos", "info_text"],
            Column::ExtraText => &["weitere", "extra", "extra_text"],
            Column::Category => &["kategorie", "category"],
            Column::Link => &["link"],
            Column::DeviceImage => &["typbild", "device_image", "device_image_path"],
            Column::Details => &["details", "details_ref"],
            Column::ModalLinks => &["modallinks", "modal_links", "links"],
            Column::SchemaVersion => &["csvversion", "version", "schema_version"],
        }
    }

    fn all() -> [Column; Self::COUNT] {
        [
            Column::Manufacturer,
            Column::DeviceType,
            Column::Code,
            Column::Keywords,
            Column::ErrorText,
            Column::RemedyText,
            Column::InfoText,
            Column::ExtraText,
            Column::Category,
            Column::Link,
            Column::DeviceImage,
            Column::Details,
            Column::ModalLinks,
            Column::SchemaVersion,
        ]
    }

    fn from_header(name: &str) -> Option<Column> {
        let name = name.trim().trim_start_matches('\u{feff}').to_lowercase();
        Self::all()
            .into_iter()
            .find(|column| column.aliases().contains(&name.as_str()))
    }
}

/// Header position of every known column; the first matching header wins.
struct ColumnMap {
    positions: [Option<usize>; Column::COUNT],
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Self {
        let mut positions = [None; Column::COUNT];
        for (index, name) in headers.iter().enumerate() {
            if let Some(column) = Column::from_header(name) {
                positions[column as usize].get_or_insert(index);
            }
        }
        Self { positions }
    }

    fn is_empty(&self) -> bool {
        self.positions.iter().all(Option::is_none)
    }

    fn get<'r>(&self, row: &'r StringRecord, column: Column) -> &'r str {
        self.positions[column as usize]
            .and_then(|index| row.get(index))
            .map(str::trim)
            .unwrap_or("")
    }

    fn record(&self, row: &StringRecord) -> ErrorRecord {
        let field = |column| self.get(row, column).to_string();
        ErrorRecord {
            manufacturer: field(Column::Manufacturer),
            device_type: field(Column::DeviceType),
            code: field(Column::Code),
            keywords: field(Column::Keywords),
            error_text: field(Column::ErrorText),
            remedy_text: field(Column::RemedyText),
            info_text: field(Column::InfoText),
            extra_text: field(Column::ExtraText),
            category: field(Column::Category),
            link: field(Column::Link),
            device_image_path: field(Column::DeviceImage),
            details_ref: field(Column::Details),
            modal_links: ModalLink::parse_list(self.get(row, Column::ModalLinks)),
            schema_version: field(Column::SchemaVersion),
        }
    }
}
