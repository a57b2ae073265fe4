use crate::{
    client::TableClient,
    credentials::{CredentialResolver, Credentials, PasswordPrompt},
    operation::classify,
    options::OptionSet,
    request::build,
};
use anyhow::{Context, Result};
use reqwest::StatusCode;
use std::io::{self, Write};

pub async fn run(opts: &OptionSet, prompt: &dyn PasswordPrompt) -> Result<()> {
    let creds = CredentialResolver::new(prompt).resolve(&opts.auth)?;
    let mut stdout = io::stdout();
    execute(opts, &creds, &mut stdout).await?;
    Ok(())
}

/// Classify, build and send the request, then copy the response body to
/// `out` followed by a newline.
///
/// Returns the HTTP status, which is reported but never treated as a failure.
pub async fn execute(
    opts: &OptionSet,
    creds: &Credentials,
    out: &mut impl Write,
) -> Result<StatusCode> {
    let op = classify(opts);
    tracing::info!(operation = %op, resource = %opts.resource, "inferred operation");

    let req = build(op, opts);
    let client = TableClient::new(creds)?;
    let resp = client.send(&req).await?;

    out.write_all(&resp.body)
        .and_then(|_| out.write_all(b"\n"))
        .and_then(|_| out.flush())
        .context("writing response body")?;
    Ok(resp.status)
}
