//! The flat, immutable option record built once from the command line.
//!
//! Optional string options are `None` when the flag was never given *or* was
//! given an empty value, so request building can test for "unset" directly
//! instead of comparing against a zero value.

use crate::constants::DEFAULT_LIMIT;
use std::path::PathBuf;

/// Every recognized flag plus the positional resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSet {
    /// Raw request body (JSON, passed through untouched)
    pub data: Option<String>,
    /// `false`, `true` or `all`; absent means `false`
    pub display_value: Option<String>,
    pub exclude_reference_link: bool,
    /// Comma-separated field list
    pub fields: Option<String>,
    pub input_display_value: bool,
    pub limit: i64,
    pub order_asc: bool,
    pub order_by: Option<String>,
    pub query_no_domain: bool,
    pub suppress_auto_sys_fields: bool,
    pub suppress_pagination_header: bool,
    /// Encoded query
    pub query: Option<String>,
    pub delete: bool,
    /// `table_name` or `table_name/sys_id`
    pub resource: String,
    pub auth: AuthOverrides,
}

/// Credential overrides given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthOverrides {
    pub instance: Option<String>,
    /// `username` or `username:password`
    pub user: Option<String>,
    pub auth_file: Option<PathBuf>,
}

impl OptionSet {
    /// An option set for `resource` with every other option at its default.
    pub fn new(resource: impl Into<String>) -> Self {
        OptionSet {
            data: None,
            display_value: None,
            exclude_reference_link: false,
            fields: None,
            input_display_value: false,
            limit: DEFAULT_LIMIT,
            order_asc: false,
            order_by: None,
            query_no_domain: false,
            suppress_auto_sys_fields: false,
            suppress_pagination_header: false,
            query: None,
            delete: false,
            resource: resource.into(),
            auth: AuthOverrides::default(),
        }
    }

    /// True when the resource names a single record (`table_name/sys_id`).
    pub fn targets_record(&self) -> bool {
        self.resource.contains('/')
    }

    /// The request payload, if one was given.
    pub fn payload(&self) -> Option<&str> {
        self.data.as_deref().filter(|d| !d.is_empty())
    }
}

/// Collapse an empty string to `None`.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_defaults() {
        let opts = OptionSet::new("incident");
        assert_eq!(opts.resource, "incident");
        assert_eq!(opts.limit, 100);
        assert_eq!(opts.display_value, None);
        assert!(!opts.delete);
        assert_eq!(opts.auth, AuthOverrides::default());
    }

    #[test]
    fn test_targets_record() {
        assert!(!OptionSet::new("incident").targets_record());
        assert!(OptionSet::new("incident/af204b6f").targets_record());
    }

    #[test]
    fn test_empty_payload_is_unset() {
        let mut opts = OptionSet::new("incident");
        opts.data = Some(String::new());
        assert_eq!(opts.payload(), None);

        opts.data = Some("{}".to_string());
        assert_eq!(opts.payload(), Some("{}"));
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some("x".into())), Some("x".to_string()));
    }
}
