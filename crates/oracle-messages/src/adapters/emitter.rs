//! # Event Projection
//!
//! Turns an accepted message plus the ledger's events into sink records.
//!
//! | Message | Record key(s) |
//! |---------|---------------|
//! | CreateDataSource | `NEW_DATA_SOURCE` |
//! | EditDataSource | `UPDATE_DATA_SOURCE` |
//! | CreateOracleScript | `NEW_ORACLE_SCRIPT` |
//! | EditOracleScript | `UPDATE_ORACLE_SCRIPT` |
//! | RequestData | `NEW_REQUEST` |
//! | ReportData | `NEW_REPORT`, then one `NEW_RAW_REPORT` per raw report |
//! | Activate | `UPDATE_VALIDATOR_STATUS` |
//! | AddReporter | `SET_REPORTER` |
//! | RemoveReporter | `REMOVE_REPORTER` |
//!
//! Ids of newly created objects are assigned by the ledger and read from the
//! event map (`create_data_source.id`, `create_oracle_script.id`, `request.id`).

use crate::domain::{Msg, ValidatedMsg};
use crate::ports::outbound::{EmitterMessage, EvMap, JsDict, ProjectionError};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde_json::Value;

/// Ledger event types carrying newly assigned ids.
pub mod event_types {
    pub const CREATE_DATA_SOURCE: &str = "create_data_source";
    pub const CREATE_ORACLE_SCRIPT: &str = "create_oracle_script";
    pub const REQUEST: &str = "request";
    pub const ATTRIBUTE_ID: &str = "id";
}

/// Record keys.
pub mod keys {
    pub const NEW_DATA_SOURCE: &str = "NEW_DATA_SOURCE";
    pub const UPDATE_DATA_SOURCE: &str = "UPDATE_DATA_SOURCE";
    pub const NEW_ORACLE_SCRIPT: &str = "NEW_ORACLE_SCRIPT";
    pub const UPDATE_ORACLE_SCRIPT: &str = "UPDATE_ORACLE_SCRIPT";
    pub const NEW_REQUEST: &str = "NEW_REQUEST";
    pub const NEW_REPORT: &str = "NEW_REPORT";
    pub const NEW_RAW_REPORT: &str = "NEW_RAW_REPORT";
    pub const UPDATE_VALIDATOR_STATUS: &str = "UPDATE_VALIDATOR_STATUS";
    pub const SET_REPORTER: &str = "SET_REPORTER";
    pub const REMOVE_REPORTER: &str = "REMOVE_REPORTER";
}

/// Parse a decimal integer attribute value.
pub fn atoi(key: &str, value: &str) -> Result<u64, ProjectionError> {
    value.parse().map_err(|_| ProjectionError::InvalidInteger {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// First value of `<event_type>.id` in the ledger events, as an integer.
fn event_id(events: &EvMap, event_type: &str) -> Result<u64, ProjectionError> {
    let key = format!("{event_type}.{}", event_types::ATTRIBUTE_ID);
    let raw = events
        .get(&key)
        .and_then(|values| values.first())
        .ok_or_else(|| ProjectionError::MissingAttribute(key.clone()))?;
    atoi(&key, raw)
}

fn dict<const N: usize>(entries: [(&str, Value); N]) -> JsDict {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

fn b64(bytes: &[u8]) -> Value {
    Value::String(BASE64.encode(bytes))
}

/// Project an accepted message into sink records.
pub fn project(
    validated: &ValidatedMsg,
    events: &EvMap,
) -> Result<Vec<EmitterMessage>, ProjectionError> {
    let records = match validated.msg() {
        Msg::CreateDataSource(m) => {
            let id = event_id(events, event_types::CREATE_DATA_SOURCE)?;
            vec![EmitterMessage::new(
                keys::NEW_DATA_SOURCE,
                dict([
                    ("id", id.into()),
                    ("name", m.name.clone().into()),
                    ("description", m.description.clone().into()),
                    ("owner", m.owner.to_bech32().into()),
                    ("executable", b64(&m.executable)),
                ]),
            )]
        }
        Msg::EditDataSource(m) => vec![EmitterMessage::new(
            keys::UPDATE_DATA_SOURCE,
            dict([
                ("id", m.data_source_id.into()),
                ("name", m.name.clone().into()),
                ("description", m.description.clone().into()),
                ("owner", m.owner.to_bech32().into()),
                ("executable", b64(&m.executable)),
            ]),
        )],
        Msg::CreateOracleScript(m) => {
            let id = event_id(events, event_types::CREATE_ORACLE_SCRIPT)?;
            vec![EmitterMessage::new(
                keys::NEW_ORACLE_SCRIPT,
                dict([
                    ("id", id.into()),
                    ("name", m.name.clone().into()),
                    ("description", m.description.clone().into()),
                    ("owner", m.owner.to_bech32().into()),
                    ("schema", m.schema.clone().into()),
                    ("source_code_url", m.source_code_url.clone().into()),
                ]),
            )]
        }
        Msg::EditOracleScript(m) => vec![EmitterMessage::new(
            keys::UPDATE_ORACLE_SCRIPT,
            dict([
                ("id", m.oracle_script_id.into()),
                ("name", m.name.clone().into()),
                ("description", m.description.clone().into()),
                ("owner", m.owner.to_bech32().into()),
                ("schema", m.schema.clone().into()),
                ("source_code_url", m.source_code_url.clone().into()),
            ]),
        )],
        Msg::RequestData(m) => {
            let id = event_id(events, event_types::REQUEST)?;
            vec![EmitterMessage::new(
                keys::NEW_REQUEST,
                dict([
                    ("id", id.into()),
                    ("oracle_script_id", m.oracle_script_id.into()),
                    ("calldata", b64(&m.calldata)),
                    ("ask_count", m.ask_count.into()),
                    ("min_count", m.min_count.into()),
                    ("client_id", m.client_id.clone().into()),
                    ("sender", m.sender.to_bech32().into()),
                ]),
            )]
        }
        Msg::ReportData(m) => {
            let validator = m.validator.to_bech32();
            let mut records = Vec::with_capacity(m.raw_reports.len() + 1);
            records.push(EmitterMessage::new(
                keys::NEW_REPORT,
                dict([
                    ("request_id", m.request_id.into()),
                    ("validator", validator.clone().into()),
                    ("reporter", m.reporter.to_bech32().into()),
                ]),
            ));
            records.extend(m.raw_reports.iter().map(|raw| {
                EmitterMessage::new(
                    keys::NEW_RAW_REPORT,
                    dict([
                        ("request_id", m.request_id.into()),
                        ("validator", validator.clone().into()),
                        ("external_id", raw.external_id.into()),
                        ("exit_code", raw.exit_code.into()),
                        ("data", b64(&raw.data)),
                    ]),
                )
            }));
            records
        }
        Msg::Activate(m) => vec![EmitterMessage::new(
            keys::UPDATE_VALIDATOR_STATUS,
            dict([
                ("validator", m.validator.to_bech32().into()),
                ("is_active", true.into()),
            ]),
        )],
        Msg::AddReporter(m) => vec![EmitterMessage::new(
            keys::SET_REPORTER,
            dict([
                ("validator", m.validator.to_bech32().into()),
                ("reporter", m.reporter.to_bech32().into()),
            ]),
        )],
        Msg::RemoveReporter(m) => vec![EmitterMessage::new(
            keys::REMOVE_REPORTER,
            dict([
                ("validator", m.validator.to_bech32().into()),
                ("reporter", m.reporter.to_bech32().into()),
            ]),
        )],
    };
    Ok(records)
}
