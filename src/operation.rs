//! Inference of the Table API operation from the resource and flags.

use crate::options::OptionSet;
use std::fmt;

/// The Table API operation an invocation maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Get,
    List,
    Insert,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Get => "get",
            Operation::List => "list",
            Operation::Insert => "insert",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Infer the intended operation from the resource shape and the
/// `--delete`/`--data` flags.
///
/// A `table/sys_id` resource is a delete when `--delete` is set (regardless of
/// any payload), an update when a payload is present and a get otherwise. A
/// bare table name is an insert with a payload and a list without one.
pub fn classify(opts: &OptionSet) -> Operation {
    if opts.targets_record() {
        if opts.delete {
            return Operation::Delete;
        }
        if opts.payload().is_some() {
            return Operation::Update;
        }
        return Operation::Get;
    }

    if opts.delete {
        tracing::warn!(
            resource = %opts.resource,
            "--delete needs a table_name/sys_id resource; ignoring it"
        );
    }

    if opts.payload().is_some() {
        Operation::Insert
    } else {
        Operation::List
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(resource: &str, data: &str, delete: bool) -> OptionSet {
        let mut o = OptionSet::new(resource);
        o.data = Some(data.to_string());
        o.delete = delete;
        o
    }

    #[test]
    fn test_record_with_delete_is_delete() {
        assert_eq!(classify(&opts("incident/abc", "", true)), Operation::Delete);
        assert_eq!(
            classify(&opts("incident/abc", r#"{"impact":2}"#, true)),
            Operation::Delete
        );
    }

    #[test]
    fn test_record_without_data_is_get() {
        assert_eq!(classify(&opts("incident/abc", "", false)), Operation::Get);
        assert_eq!(classify(&OptionSet::new("incident/abc")), Operation::Get);
    }

    #[test]
    fn test_record_with_data_is_update() {
        assert_eq!(
            classify(&opts("incident/abc", r#"{"urgency":2}"#, false)),
            Operation::Update
        );
    }

    #[test]
    fn test_table_with_data_is_insert() {
        assert_eq!(
            classify(&opts("incident", r#"{"short_description":"hi"}"#, false)),
            Operation::Insert
        );
    }

    #[test]
    fn test_table_without_data_is_list() {
        assert_eq!(classify(&opts("incident", "", false)), Operation::List);
        assert_eq!(classify(&OptionSet::new("incident")), Operation::List);
    }

    #[test]
    fn test_delete_on_bare_table_is_ignored() {
        assert_eq!(classify(&opts("incident", "", true)), Operation::List);
        assert_eq!(classify(&opts("incident", "{}", true)), Operation::Insert);
    }

    #[test]
    fn test_display() {
        assert_eq!(Operation::Update.to_string(), "update");
    }
}
