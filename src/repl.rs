//! Interactive search loop and result rendering.
//!
//! The line-oriented counterpart of the original search-as-you-type page:
//! each input line becomes one `execute_query` call against the in-memory
//! catalog. `:types a,b` narrows the type filter, `:types` clears it,
//! `:quit` (or EOF) exits.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};

use crate::auth;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::models::DocType;
use crate::query::{execute_query, QueryOutcome, QueryParams, SearchHit, TypeFilter};

/// Display budget for body-text previews.
const SNIPPET_MAX_CHARS: usize = 350;

/// Parse a comma-separated list of type labels into a filter.
///
/// An empty or blank spec clears the filter, which matches everything.
pub fn parse_type_filter(spec: &str) -> Result<TypeFilter> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Ok(TypeFilter::all());
    }
    spec.split(',')
        .map(|label| label.parse::<DocType>())
        .collect()
}

/// Print a query outcome in the CLI result format.
pub fn print_outcome(outcome: &QueryOutcome, params: &QueryParams) {
    match outcome {
        QueryOutcome::TooShort => {
            println!(
                "Type at least {} characters to search.",
                params.min_query_chars
            );
        }
        QueryOutcome::Empty => println!("No results."),
        QueryOutcome::Results(hits) => {
            for (i, hit) in hits.iter().enumerate() {
                print_hit(i + 1, hit);
            }
        }
    }
}

fn print_hit(rank: usize, hit: &SearchHit) {
    let doc = &hit.document;
    println!(
        "{}. [{}] {} (score {})",
        rank,
        doc.doc_type.as_str().to_uppercase(),
        doc.filename,
        hit.score
    );
    if doc.pdf_url.is_empty() {
        println!("    pdf: not available");
    } else {
        println!("    pdf: {}", doc.pdf_url);
    }
    println!(
        "    excerpt: \"{}\"",
        snippet(&doc.text, SNIPPET_MAX_CHARS).replace('\n', " ")
    );
    println!("    id: {}", doc.id);
    println!();
}

/// Truncate body text to a display preview.
pub fn snippet(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}…", cut)
}

/// Run the interactive loop over a fully ingested catalog.
pub fn run_repl(config: &Config, catalog: &Catalog) -> Result<()> {
    if !config.users.is_empty() {
        prompt_login(config)?;
    }

    let params = QueryParams {
        result_limit: config.retrieval.result_limit,
        min_query_chars: config.retrieval.min_query_chars,
    };
    let mut filter = TypeFilter::all();

    println!(
        "{} documents loaded. Type a query, ':types a,b' to filter, ':quit' to exit.",
        catalog.store().len()
    );

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim();

        if line.is_empty() {
            continue;
        }
        if line == ":quit" || line == ":q" {
            break;
        }
        if let Some(spec) = line.strip_prefix(":types") {
            match parse_type_filter(spec) {
                Ok(parsed) => {
                    filter = parsed;
                    if filter.is_unrestricted() {
                        println!("filter: all types");
                    } else {
                        println!("filter: {}", filter.labels().join(", "));
                    }
                }
                Err(err) => println!("{:#}", err),
            }
            continue;
        }

        print_outcome(&execute_query(catalog, line, &filter, &params), &params);
    }

    Ok(())
}

/// Ask for credentials on stdin, three attempts.
fn prompt_login(config: &Config) -> Result<()> {
    let stdin = io::stdin();
    for _ in 0..3 {
        print!("username: ");
        io::stdout().flush()?;
        let mut username = String::new();
        if stdin.lock().read_line(&mut username)? == 0 {
            bail!("Login aborted");
        }

        print!("password: ");
        io::stdout().flush()?;
        let mut password = String::new();
        if stdin.lock().read_line(&mut password)? == 0 {
            bail!("Login aborted");
        }

        match auth::login(&config.users, username.trim(), password.trim_end_matches('\n')) {
            Some(session) => {
                println!("Logged in as {} ({})", session.username, session.role);
                return Ok(());
            }
            None => println!("Invalid credentials."),
        }
    }
    bail!("Too many failed login attempts")
}
