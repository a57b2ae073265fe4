//! # snowy
//!
//! Core library for the `snowy` command-line client of the ServiceNow Table
//! API. One invocation resolves credentials, infers the operation from the
//! resource argument and flags, shapes a single request and prints the raw
//! response body.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::{io::Read, path::PathBuf};

pub mod client;
pub mod commands;
pub mod constants;
pub mod credentials;
pub mod logging;
pub mod operation;
pub mod options;
pub mod request;

use constants::DEFAULT_LIMIT;
use options::{non_empty, AuthOverrides, OptionSet};

const AFTER_HELP: &str = "\
Operations are inferred from RESOURCE and options:

  snowy incident                                     list records of a table
  snowy incident/<sys_id>                            get one record
  snowy -d '{\"short_description\":\"hi\"}' incident     insert a record
  snowy -d '{\"urgency\":2}' incident/<sys_id>         update a record
  snowy --delete incident/<sys_id>                   delete a record

Credentials are taken from the first complete source:
  1. --instance together with --user (prompts for the password if USER has no ':')
  2. SNOWY_INSTANCE_URL, SNOWY_USERNAME and SNOWY_PASSWORD
  3. the file given with --auth-file
  4. ~/.snowy

A credential file holds the instance URL, username and password on three lines.";

/// Command-line client for the ServiceNow Table API
///
/// A single positional RESOURCE (`table_name` or `table_name/sys_id`) plus a
/// handful of flags select one of list, get, insert, update or delete.
#[derive(Parser, Debug)]
#[command(
    name = "snowy",
    version,
    about = "CLI for the ServiceNow Table API",
    long_about = "snowy sends one request to the ServiceNow Table API and prints the raw response.\n\nIt guesses the intended operation (list, get, insert, update or delete) from RESOURCE and\nthe given options; deleting a record always needs an explicit --delete.",
    after_help = AFTER_HELP,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Request body; use `-` to read it from stdin
    #[arg(short = 'd', long, value_name = "JSON", help_heading = "ServiceNow")]
    pub data: Option<String>,

    /// Return display values (true), actual values (false) or both (all) [default: false]
    #[arg(long, value_name = "VALUE", help_heading = "ServiceNow")]
    pub display_value: Option<String>,

    /// Encoded query used to filter the results
    #[arg(short = 'q', long, help_heading = "ServiceNow")]
    pub query: Option<String>,

    /// Exclude Table API links for reference fields
    #[arg(long, help_heading = "ServiceNow")]
    pub exclude_reference_link: bool,

    /// Comma-separated list of fields to return
    #[arg(short = 'f', long, value_name = "CSV", help_heading = "ServiceNow")]
    pub fields: Option<String>,

    /// Set field values using their display value
    #[arg(long, help_heading = "ServiceNow")]
    pub input_display_value: bool,

    /// Maximum number of records returned per page
    #[arg(
        short = 'l',
        long,
        default_value_t = DEFAULT_LIMIT,
        allow_negative_numbers = true,
        help_heading = "ServiceNow"
    )]
    pub limit: i64,

    /// Order the results ascending instead of descending
    #[arg(short = 'A', long, help_heading = "ServiceNow")]
    pub order_asc: bool,

    /// Field to order the results by
    #[arg(short = 'o', long, value_name = "FIELD", help_heading = "ServiceNow")]
    pub order_by: Option<String>,

    /// Access data across domains if authorized
    #[arg(long, help_heading = "ServiceNow")]
    pub query_no_domain: bool,

    /// Suppress auto generation of system fields
    #[arg(long, help_heading = "ServiceNow")]
    pub suppress_auto_sys_fields: bool,

    /// Suppress the pagination header
    #[arg(long, help_heading = "ServiceNow")]
    pub suppress_pagination_header: bool,

    /// Instance name or URL; https:// is added when no scheme is given
    #[arg(short = 'i', long, help_heading = "Authentication")]
    pub instance: Option<String>,

    /// `username` or `username:password`; needs --instance
    #[arg(short = 'u', long, help_heading = "Authentication")]
    pub user: Option<String>,

    /// Credential file to use instead of ~/.snowy
    #[arg(long, value_name = "PATH", help_heading = "Authentication")]
    pub auth_file: Option<PathBuf>,

    /// Delete the record named by table_name/sys_id
    #[arg(short = 'D', long, help_heading = "HTTP")]
    pub delete: bool,

    /// Increase log verbosity on stderr (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,

    /// `table_name` or `table_name/sys_id`
    #[arg(required_unless_present = "completions")]
    pub resource: Option<String>,
}

impl Cli {
    /// Freeze the parsed arguments into an [`OptionSet`].
    ///
    /// A `--data -` payload is read from `stdin` here so that classification
    /// sees the real body.
    pub fn into_options(self, stdin: impl Read) -> Result<OptionSet> {
        let resource = non_empty(self.resource).context("missing RESOURCE argument")?;
        let data = match self.data.as_deref() {
            Some("-") => Some(read_payload(stdin)?),
            _ => self.data,
        };

        Ok(OptionSet {
            data: non_empty(data),
            display_value: non_empty(self.display_value),
            exclude_reference_link: self.exclude_reference_link,
            fields: non_empty(self.fields),
            input_display_value: self.input_display_value,
            limit: self.limit,
            order_asc: self.order_asc,
            order_by: non_empty(self.order_by),
            query_no_domain: self.query_no_domain,
            suppress_auto_sys_fields: self.suppress_auto_sys_fields,
            suppress_pagination_header: self.suppress_pagination_header,
            query: non_empty(self.query),
            delete: self.delete,
            resource,
            auth: AuthOverrides {
                instance: non_empty(self.instance),
                user: non_empty(self.user),
                auth_file: self.auth_file,
            },
        })
    }
}

fn read_payload(mut stdin: impl Read) -> Result<String> {
    let mut buf = String::new();
    stdin
        .read_to_string(&mut buf)
        .context("reading request body from stdin")?;
    if buf.ends_with('\n') {
        buf.pop();
        if buf.ends_with('\r') {
            buf.pop();
        }
    }
    Ok(buf)
}
