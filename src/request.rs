//! Translate an [`OptionSet`] into the method, query parameters and body of a
//! single Table API call.
//!
//! Parameters are encoded sparsely: an option still at its default is left
//! out of the query entirely rather than sent with its default value.

use crate::{constants::TABLE_API_PATH, operation::Operation, options::OptionSet};
use bytes::Bytes;
use reqwest::Method;
use std::collections::BTreeMap;

pub const DISPLAY_VALUE: &str = "sysparm_display_value";
pub const EXCLUDE_REFERENCE_LINK: &str = "sysparm_exclude_reference_link";
pub const FIELDS: &str = "sysparm_fields";
pub const INPUT_DISPLAY_VALUE: &str = "sysparm_input_display_value";
pub const LIMIT: &str = "sysparm_limit";
pub const QUERY: &str = "sysparm_query";
pub const QUERY_NO_DOMAIN: &str = "sysparm_query_no_domain";
pub const SUPPRESS_AUTO_SYS_FIELD: &str = "sysparm_suppress_auto_sys_field";
pub const SUPPRESS_PAGINATION_HEADER: &str = "sysparm_suppress_pagination_header";

/// A fully shaped request, ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltRequest {
    pub method: Method,
    /// Path below the instance URL, e.g. `/api/now/table/incident`
    pub path: String,
    pub query: BTreeMap<String, String>,
    pub body: Option<Bytes>,
}

#[derive(Default)]
struct Params(BTreeMap<String, String>);

impl Params {
    fn flag(&mut self, name: &str, set: bool) -> &mut Self {
        if set {
            self.0.insert(name.to_string(), "true".to_string());
        }
        self
    }

    fn value(&mut self, name: &str, value: Option<&str>) -> &mut Self {
        if let Some(v) = value.filter(|v| !v.is_empty()) {
            self.0.insert(name.to_string(), v.to_string());
        }
        self
    }

    fn display_value(&mut self, opts: &OptionSet) -> &mut Self {
        let dv = opts.display_value.as_deref().filter(|v| *v != "false");
        self.value(DISPLAY_VALUE, dv)
    }

    /// Parameters shared by record-writing operations (insert and update).
    fn write_common(&mut self, opts: &OptionSet) -> &mut Self {
        self.display_value(opts)
            .flag(EXCLUDE_REFERENCE_LINK, opts.exclude_reference_link)
            .flag(INPUT_DISPLAY_VALUE, opts.input_display_value)
            .flag(SUPPRESS_AUTO_SYS_FIELD, opts.suppress_auto_sys_fields)
            .value(FIELDS, opts.fields.as_deref())
    }

    /// Parameters shared by read operations (get and list).
    fn read_common(&mut self, opts: &OptionSet) -> &mut Self {
        self.display_value(opts)
            .flag(EXCLUDE_REFERENCE_LINK, opts.exclude_reference_link)
            .value(FIELDS, opts.fields.as_deref())
    }
}

/// Compose the encoded query for a list call, appending the order clause.
///
/// The `^` separator is emitted even when there is no preceding query.
pub fn encoded_query(opts: &OptionSet) -> String {
    let mut query = opts.query.clone().unwrap_or_default();
    if let Some(field) = opts.order_by.as_deref().filter(|f| !f.is_empty()) {
        let operator = if opts.order_asc {
            "ORDERBY"
        } else {
            "ORDERBYDESC"
        };
        query.push('^');
        query.push_str(operator);
        query.push_str(field);
    }
    query
}

/// Build the request for `op`. Pure: no I/O and no dependency on anything
/// but the arguments.
pub fn build(op: Operation, opts: &OptionSet) -> BuiltRequest {
    let mut params = Params::default();
    let payload = || opts.payload().map(|d| Bytes::copy_from_slice(d.as_bytes()));

    let (method, body) = match op {
        Operation::Get => {
            params.read_common(opts);
            (Method::GET, None)
        }
        Operation::List => {
            let query = encoded_query(opts);
            params
                .read_common(opts)
                .flag(SUPPRESS_PAGINATION_HEADER, opts.suppress_pagination_header)
                .value(QUERY, Some(query.as_str()));
            if opts.limit > 0 {
                params.0.insert(LIMIT.to_string(), opts.limit.to_string());
            }
            (Method::GET, None)
        }
        Operation::Insert => {
            params.write_common(opts);
            (Method::POST, payload())
        }
        Operation::Update => {
            params
                .write_common(opts)
                .flag(QUERY_NO_DOMAIN, opts.query_no_domain);
            (Method::PATCH, payload())
        }
        Operation::Delete => {
            params.flag(QUERY_NO_DOMAIN, opts.query_no_domain);
            (Method::DELETE, None)
        }
    };

    BuiltRequest {
        method,
        path: format!("{}/{}", TABLE_API_PATH, opts.resource),
        query: params.0,
        body,
    }
}
