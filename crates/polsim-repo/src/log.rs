use camino::{Utf8Path, Utf8PathBuf};
use polsim_domain::{Request, RequestRecord};
use polsim_types::ids;

/// Columns every request log must carry. Other columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    ids::COLUMN_USER_ID,
    ids::ATTR_ROLE,
    ids::ATTR_DEPARTMENT,
    ids::ATTR_RESOURCE,
    ids::ATTR_ACTION,
];

#[derive(Debug, thiserror::Error)]
pub enum RequestLogError {
    #[error("cannot read request log {path}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid CSV in request log {path}")]
    Csv {
        path: Utf8PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("request log {path} has no `{column}` column")]
    MissingColumn { path: Utf8PathBuf, column: &'static str },

    #[error("request log {path} line {line}: missing value for `{column}`")]
    MalformedRequest {
        path: Utf8PathBuf,
        line: u64,
        column: &'static str,
    },
}

/// Header positions of the required columns, in `REQUIRED_COLUMNS` order.
struct Columns([usize; 5]);

impl Columns {
    fn locate(path: &Utf8Path, headers: &csv::StringRecord) -> Result<Self, RequestLogError> {
        let mut idx = [0usize; 5];
        for (slot, &column) in REQUIRED_COLUMNS.iter().enumerate() {
            idx[slot] = headers
                .iter()
                .position(|h| h.trim() == column)
                .ok_or_else(|| RequestLogError::MissingColumn {
                    path: path.to_owned(),
                    column,
                })?;
        }
        Ok(Self(idx))
    }
}

/// Parse a CSV request log with a header row. `path` is only used for error context.
pub fn parse_request_log<R: std::io::Read>(
    path: &Utf8Path,
    reader: R,
) -> Result<Vec<RequestRecord>, RequestLogError> {
    let csv_err = |source: csv::Error| RequestLogError::Csv {
        path: path.to_owned(),
        source,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers().map_err(csv_err)?.clone();
    let columns = Columns::locate(path, &headers)?;

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row.map_err(csv_err)?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();

        let mut values = [""; 5];
        for (slot, &column) in REQUIRED_COLUMNS.iter().enumerate() {
            values[slot] = row.get(columns.0[slot]).ok_or_else(|| {
                RequestLogError::MalformedRequest {
                    path: path.to_owned(),
                    line,
                    column,
                }
            })?;
        }

        let [user_id, role, department, resource, action] = values;
        records.push(RequestRecord::new(
            user_id,
            Request::new(role, department, resource, action),
        ));
    }

    Ok(records)
}

pub fn read_request_log(path: &Utf8Path) -> Result<Vec<RequestRecord>, RequestLogError> {
    let file = std::fs::File::open(path).map_err(|source| RequestLogError::Read {
        path: path.to_owned(),
        source,
    })?;
    let records = parse_request_log(path, std::io::BufReader::new(file))?;
    tracing::debug!(path = %path, requests = records.len(), "read request log");
    Ok(records)
}
