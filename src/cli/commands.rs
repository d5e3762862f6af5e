//! CLI command implementations
//!
//! Commands read from and write to the handles they are given; only
//! `run_command` touches the process's stdin/stdout.

use std::io::{self, BufRead, Write};
use std::path::Path;

use serde_json::{json, Value};

use crate::config::Config;
use crate::observability::{log_event_with_fields, Event, Logger};
use crate::schema::{catalog, SchemaError, ValidationError, Validator};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_lines, write_accepted, write_error, write_json, write_rejected};

/// Outcome counts for one validation stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationTally {
    pub accepted: usize,
    pub rejected: usize,
    pub malformed: usize,
}

impl ValidationTally {
    /// Documents read, including malformed lines
    pub fn total(&self) -> usize {
        self.accepted + self.rejected + self.malformed
    }

    /// Documents that did not produce a record
    pub fn failed(&self) -> usize {
        self.rejected + self.malformed
    }
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Validate { schema, config } => {
            let config = load_config(config.as_deref())?;
            let stdin = io::stdin();
            let stdout = io::stdout();

            let tally = validate(&schema, &config, stdin.lock(), &mut stdout.lock())?;
            if tally.failed() > 0 {
                return Err(CliError::validation_failed(tally.failed(), tally.total()));
            }
            Ok(())
        }
        Command::Schemas => schemas(&mut io::stdout().lock()),
    }
}

/// Loads config and applies its log threshold.
fn load_config(path: Option<&Path>) -> CliResult<Config> {
    let config = Config::load_or_default(path)?;
    Logger::set_min_severity(config.min_severity()?);

    let source = path.map_or_else(|| "<defaults>".to_string(), |p| p.display().to_string());
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("coerce", if config.coerce { "true" } else { "false" }),
            ("source", source.as_str()),
            ("unknown_fields", config.unknown_fields.as_str()),
        ],
    );

    Ok(config)
}

/// Validate a stream of JSON documents against one schema
///
/// Each non-blank input line produces exactly one output line. Rejected and
/// malformed lines do not stop the stream; the returned tally reports them.
pub fn validate<R: BufRead, W: Write>(
    schema_name: &str,
    config: &Config,
    input: R,
    out: &mut W,
) -> CliResult<ValidationTally> {
    let schema = match catalog::find(schema_name) {
        Some(schema) => schema,
        None => {
            log_event_with_fields(Event::UnknownSchema, &[("schema", schema_name)]);
            return Err(CliError::unknown_schema(schema_name));
        }
    };

    let collection = schema.collection();
    let validator = Validator::new(config.validator_options());
    let mut tally = ValidationTally::default();

    log_event_with_fields(Event::ValidationBegin, &[("collection", collection.as_str())]);

    for entry in read_lines(input) {
        let (line_no, text) = entry?;
        let line_label = line_no.to_string();

        let parsed = text
            .map_err(|e| SchemaError::MalformedInput(format!("line is not valid UTF-8: {}", e)))
            .and_then(|line| {
                serde_json::from_str::<Value>(&line)
                    .map_err(|e| SchemaError::MalformedInput(e.to_string()))
            });

        let document = match parsed {
            Ok(value) => value,
            Err(err) => {
                tally.malformed += 1;
                log_event_with_fields(
                    Event::MalformedInput,
                    &[("line", line_label.as_str()), ("reason", err.to_string().as_str())],
                );
                write_error(out, err.code(), line_no, &err.to_string())?;
                continue;
            }
        };

        match validator.validate(&schema, &document) {
            Ok(normalized) => {
                tally.accepted += 1;
                log_event_with_fields(
                    Event::DocumentAccepted,
                    &[("collection", collection.as_str()), ("line", line_label.as_str())],
                );
                write_accepted(out, &collection, normalized)?;
            }
            Err(err) => {
                tally.rejected += 1;
                log_event_with_fields(
                    Event::DocumentRejected,
                    &[
                        ("collection", collection.as_str()),
                        ("line", line_label.as_str()),
                        ("violations", err.violations().len().to_string().as_str()),
                    ],
                );
                write_rejected(out, ValidationError::CODE, &collection, line_no, err.violations())?;
            }
        }
    }

    log_event_with_fields(
        Event::ValidationComplete,
        &[
            ("accepted", tally.accepted.to_string().as_str()),
            ("collection", collection.as_str()),
            ("malformed", tally.malformed.to_string().as_str()),
            ("rejected", tally.rejected.to_string().as_str()),
        ],
    );

    Ok(tally)
}

/// Print the schema catalog
pub fn schemas<W: Write>(out: &mut W) -> CliResult<()> {
    let all = catalog::all();
    write_json(out, &json!({ "schemas": all }))?;

    log_event_with_fields(Event::CatalogListed, &[("count", all.len().to_string().as_str())]);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_validate(schema: &str, input: &str) -> (ValidationTally, Vec<Value>) {
        let mut out = Vec::new();
        let tally = validate(schema, &Config::default(), Cursor::new(input), &mut out).unwrap();
        let lines = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        (tally, lines)
    }

    #[test]
    fn test_one_output_line_per_document() {
        let input = concat!(
            "{\"name\":\"Ann\",\"email\":\"a@x.com\",\"address\":\"1 Rd\"}\n",
            "\n",
            "{\"name\":\"Bob\"}\n",
            "oops\n",
        );
        let (tally, lines) = run_validate("user", input);

        assert_eq!(tally, ValidationTally { accepted: 1, rejected: 1, malformed: 1 });
        assert_eq!(tally.failed(), 2);
        assert_eq!(lines.len(), 3);

        assert_eq!(lines[0]["status"], "ok");
        assert_eq!(lines[0]["collection"], "user");
        assert_eq!(lines[0]["data"]["is_active"], true);

        assert_eq!(lines[1]["status"], "error");
        assert_eq!(lines[1]["code"], "DOC_VALIDATION_FAILED");
        assert_eq!(lines[1]["line"], 3);
        assert_eq!(lines[1]["violations"][0]["field"], "email");
        assert_eq!(lines[1]["violations"][0]["kind"], "required_missing");

        assert_eq!(lines[2]["code"], "DOC_MALFORMED_INPUT");
        assert_eq!(lines[2]["line"], 4);
    }

    #[test]
    fn test_invalid_utf8_line_is_malformed() {
        let user = b"{\"name\":\"Ann\",\"email\":\"a@x.com\",\"address\":\"1 Rd\"}\n";
        let mut input = user.to_vec();
        input.extend_from_slice(b"\xff\xfe\n");
        input.extend_from_slice(user);

        let mut out = Vec::new();
        let tally = validate("user", &Config::default(), Cursor::new(input), &mut out).unwrap();
        assert_eq!(tally, ValidationTally { accepted: 2, rejected: 0, malformed: 1 });

        let lines: Vec<Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["status"], "ok");
        assert_eq!(lines[1]["code"], "DOC_MALFORMED_INPUT");
        assert_eq!(lines[1]["line"], 2);
        assert!(lines[1]["message"].as_str().unwrap().contains("UTF-8"));
        assert_eq!(lines[2]["status"], "ok");
    }

    #[test]
    fn test_unknown_schema() {
        let mut out = Vec::new();
        let err = validate("order", &Config::default(), Cursor::new("{}"), &mut out).unwrap_err();
        assert_eq!(err.code_str(), "DOC_CLI_UNKNOWN_SCHEMA");
        assert!(out.is_empty());
    }

    #[test]
    fn test_config_policy_applies() {
        let config = Config::from_json(r#"{"unknown_fields": "reject"}"#).unwrap();
        let mut out = Vec::new();
        let tally = validate(
            "BlogPost",
            &config,
            Cursor::new("{\"title\":\"t\",\"content\":\"c\",\"draft\":true}\n"),
            &mut out,
        )
        .unwrap();

        assert_eq!(tally.rejected, 1);
        let line: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(line["violations"][0]["kind"], "unknown_field");
        assert_eq!(line["violations"][0]["field"], "draft");
    }

    #[test]
    fn test_schemas_lists_catalog() {
        let mut out = Vec::new();
        schemas(&mut out).unwrap();

        let value: Value = serde_json::from_slice(&out).unwrap();
        let collections: Vec<&str> = value["schemas"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["collection"].as_str().unwrap())
            .collect();
        assert_eq!(collections, vec!["user", "product", "blogpost"]);
        assert_eq!(value["schemas"][2]["fields"][3]["default"], "AI Writer");
    }
}
