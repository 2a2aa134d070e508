//! Pure request construction.
//!
//! One builder per logical operation; each returns a [`RequestParts`]
//! descriptor without performing any I/O, so the exact URL and body can be
//! asserted byte-for-byte in tests. The URL suffixes reproduce the backend
//! dialect exactly, including its historical irregularities (the display
//! family yields `wsrvfunc=&action=…`, the row count yields
//! `wsrvfunc=func=displayrowct…` with no leading `&`).

use reqwest::Method;

use crate::error::{ClientError, Result};
use crate::filter::{FilterClause, RecordId, filter_fragment};
use crate::payload::DataPayload;

/// Path under the base URL where every app-served resource lives.
const APPS_PATH: &str = "/apps/";
/// Web service entry point with the JSON format preselected; the operation
/// suffix is appended after `wsrvfunc=`.
const WEBSERVICE_ENTRY: &str = "webservice.jsp?wsrvformat=json&wsrvfunc=";

/// Identifier channel, used by edits and deletes.
const EID_PARAM: &str = "&eid=";
/// Generic filter channel, used by every other non-login operation.
const RTFILTER_PARAM: &str = "&rtfilter=";

pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// The logical operations the translator understands. Each maps to one URL
/// template of the backend dialect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Login,
    View,
    Edit,
    EditAll,
    Create,
    Delete,
    App,
    Attach,
    RowCount,
    Custom,
}

/// A fully constructed outbound request, ready for dispatch.
///
/// `content_type` is `None` for the multipart upload, whose body is
/// supplied by the transport layer; for that operation the serialized
/// data/filter fragment rides on the URL instead of in `body`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestParts {
    pub operation: Operation,
    pub url: String,
    pub method: Method,
    pub content_type: Option<&'static str>,
    pub body: String,
}

fn form_parts(operation: Operation, url: String, body: String) -> RequestParts {
    RequestParts {
        operation,
        url,
        method: Method::POST,
        content_type: Some(FORM_URLENCODED),
        body,
    }
}

fn non_empty(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ClientError::Invalid(format!("{what} must not be empty")));
    }
    Ok(())
}

fn positive(value: u32, what: &str) -> Result<()> {
    if value == 0 {
        return Err(ClientError::Invalid(format!("{what} must be >= 1")));
    }
    Ok(())
}

pub fn login(base_url: &str) -> RequestParts {
    let url = format!("{base_url}{APPS_PATH}{WEBSERVICE_ENTRY}signin");
    form_parts(Operation::Login, url, String::new())
}

pub fn view(
    base_url: &str,
    transaction: &str,
    start_row: u32,
    rows_per_page: u32,
    filter: &[FilterClause],
) -> Result<RequestParts> {
    non_empty(transaction, "transaction")?;
    positive(start_row, "start_row")?;
    positive(rows_per_page, "rows_per_page")?;
    let url = format!(
        "{base_url}{APPS_PATH}{WEBSERVICE_ENTRY}&action=display&pagename=list.jsp&func=display&tran={transaction}&frow={start_row}&rpp={rows_per_page}&silentfunc=true"
    );
    Ok(form_parts(
        Operation::View,
        url,
        filter_fragment(filter, RTFILTER_PARAM),
    ))
}

pub fn create(base_url: &str, transaction: &str, data: &DataPayload) -> Result<RequestParts> {
    non_empty(transaction, "transaction")?;
    let url = format!(
        "{base_url}{APPS_PATH}{WEBSERVICE_ENTRY}&action=display&pagename=edit.jsp&func=editadd&tran={transaction}&silentfunc=true"
    );
    Ok(form_parts(Operation::Create, url, data.render()))
}

pub fn edit(
    base_url: &str,
    transaction: &str,
    data: &DataPayload,
    id: &RecordId,
) -> Result<RequestParts> {
    non_empty(transaction, "transaction")?;
    let url = format!(
        "{base_url}{APPS_PATH}{WEBSERVICE_ENTRY}&action=display&pagename=edit.jsp&func=edit&tran={transaction}&silentfunc=true"
    );
    Ok(form_parts(Operation::Edit, url, edit_body(data, id)))
}

pub fn edit_all(
    base_url: &str,
    transaction: &str,
    data: &DataPayload,
    id: &RecordId,
) -> Result<RequestParts> {
    non_empty(transaction, "transaction")?;
    let url = format!(
        "{base_url}{APPS_PATH}{WEBSERVICE_ENTRY}&action=display&pagename=edit.jsp&func=editall&tran={transaction}&silentfunc=true"
    );
    Ok(form_parts(Operation::EditAll, url, edit_body(data, id)))
}

fn edit_body(data: &DataPayload, id: &RecordId) -> String {
    let mut body = data.render();
    body.push_str(EID_PARAM);
    body.push_str(&id.render());
    body
}

/// Delete routes its filter through the identifier channel, not the generic
/// filter channel. An empty filter means the server-side "delete all".
pub fn delete(base_url: &str, transaction: &str, filter: &[FilterClause]) -> Result<RequestParts> {
    non_empty(transaction, "transaction")?;
    let url = format!(
        "{base_url}{APPS_PATH}{WEBSERVICE_ENTRY}&action=display&pagename=list.jsp&func=delete&tran={transaction}&silentfunc=true"
    );
    Ok(form_parts(
        Operation::Delete,
        url,
        filter_fragment(filter, EID_PARAM),
    ))
}

pub fn app(
    base_url: &str,
    func: &str,
    data: &DataPayload,
    start_row: u32,
    rows_per_page: u32,
    filter: &[FilterClause],
) -> Result<RequestParts> {
    non_empty(func, "function name")?;
    positive(start_row, "start_row")?;
    positive(rows_per_page, "rows_per_page")?;
    let url = format!(
        "{base_url}{APPS_PATH}{WEBSERVICE_ENTRY}&func={func}&frow={start_row}&rpp={rows_per_page}&silentfunc=true"
    );
    let mut body = data.render();
    body.push_str(&filter_fragment(filter, RTFILTER_PARAM));
    Ok(form_parts(Operation::App, url, body))
}

pub fn row_count(base_url: &str, transaction: &str, filter: &[FilterClause]) -> Result<RequestParts> {
    non_empty(transaction, "transaction")?;
    let url =
        format!("{base_url}{APPS_PATH}{WEBSERVICE_ENTRY}func=displayrowct&tran={transaction}&silentfunc=true");
    Ok(form_parts(
        Operation::RowCount,
        url,
        filter_fragment(filter, RTFILTER_PARAM),
    ))
}

/// The upload descriptor carries the serialized data/filter fragment on the
/// URL; the multipart body is attached at dispatch.
pub fn attach(
    base_url: &str,
    func: &str,
    data: &DataPayload,
    filter: &[FilterClause],
) -> Result<RequestParts> {
    non_empty(func, "function name")?;
    let mut url = format!("{base_url}{APPS_PATH}{WEBSERVICE_ENTRY}&func={func}&silentfunc=true");
    url.push_str(&data.render());
    url.push_str(&filter_fragment(filter, RTFILTER_PARAM));
    Ok(RequestParts {
        operation: Operation::Attach,
        url,
        method: Method::POST,
        content_type: None,
        body: String::new(),
    })
}

/// Posts to an arbitrary sub-path under the app namespace, bypassing the
/// web service entry point.
pub fn custom(
    base_url: &str,
    path: &str,
    data: &DataPayload,
    filter: &[FilterClause],
) -> Result<RequestParts> {
    non_empty(path, "path")?;
    let url = format!("{base_url}{APPS_PATH}{path}");
    let mut body = data.render();
    body.push_str(&filter_fragment(filter, RTFILTER_PARAM));
    Ok(form_parts(Operation::Custom, url, body))
}
