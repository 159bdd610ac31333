//! # Message Catalog
//!
//! The nine oracle messages. Each has exactly one required signer and an
//! ordered, first-failure `validate`:
//!
//! | Message | Signer | Checks (in order) |
//! |---------|--------|-------------------|
//! | `MsgCreateDataSource` | sender | owner, sender, name, description, executable size, executable ≠ sentinel |
//! | `MsgEditDataSource` | sender | owner, sender, name, description, executable size, executable ≠ sentinel |
//! | `MsgCreateOracleScript` | sender | owner, sender, name, description, schema, url, code size, code ≠ sentinel |
//! | `MsgEditOracleScript` | sender | same as create |
//! | `MsgRequestData` | sender | sender, calldata, ask/min counts, client id |
//! | `MsgReportData` | reporter | validator, reporter, reports non-empty, data sizes, distinct external ids |
//! | `MsgActivate` | validator (account form) | validator |
//! | `MsgAddReporter` | validator (account form) | validator, reporter, no self report |
//! | `MsgRemoveReporter` | validator (account form) | validator, reporter, no self report |
//!
//! The serde derives describe the amino-JSON wire shape:
//! `{"type":"oracle/<Name>","value":{...}}` with quoted 64-bit integers and
//! base64 byte blobs.

use super::address::{AccAddress, ValAddress};
use super::constants::{
    MAX_CLIENT_ID_LENGTH, MAX_DATA_SIZE, MAX_DESCRIPTION_LENGTH, MAX_EXECUTABLE_SIZE,
    MAX_NAME_LENGTH, MAX_SCHEMA_LENGTH, MAX_URL_LENGTH, MAX_WASM_CODE_SIZE, ROUTE,
};
use super::errors::ValidationError;
use super::validators::{
    bounded_bytes, bounded_string, count_ordering, distinct_external_ids, no_self_report,
    non_empty, not_sentinel, valid_identity,
};
use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as, DisplayFromStr};

pub type DataSourceId = u64;
pub type OracleScriptId = u64;
pub type RequestId = u64;
pub type ExternalId = i64;

// =============================================================================
// Data sources
// =============================================================================

/// Register a new data source.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgCreateDataSource {
    pub owner: AccAddress,
    pub name: String,
    pub description: String,
    #[serde_as(as = "Base64")]
    pub executable: Vec<u8>,
    pub sender: AccAddress,
}

impl MsgCreateDataSource {
    pub fn new(
        owner: AccAddress,
        name: impl Into<String>,
        description: impl Into<String>,
        executable: impl Into<Vec<u8>>,
        sender: AccAddress,
    ) -> Self {
        Self {
            owner,
            name: name.into(),
            description: description.into(),
            executable: executable.into(),
            sender,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        valid_identity("owner", &self.owner)?;
        valid_identity("sender", &self.sender)?;
        validate_data_source_fields(&self.name, &self.description, &self.executable)
    }
}

/// Replace the fields of an existing data source.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgEditDataSource {
    #[serde_as(as = "DisplayFromStr")]
    pub data_source_id: DataSourceId,
    pub owner: AccAddress,
    pub name: String,
    pub description: String,
    #[serde_as(as = "Base64")]
    pub executable: Vec<u8>,
    pub sender: AccAddress,
}

impl MsgEditDataSource {
    pub fn new(
        data_source_id: DataSourceId,
        owner: AccAddress,
        name: impl Into<String>,
        description: impl Into<String>,
        executable: impl Into<Vec<u8>>,
        sender: AccAddress,
    ) -> Self {
        Self {
            data_source_id,
            owner,
            name: name.into(),
            description: description.into(),
            executable: executable.into(),
            sender,
        }
    }

    /// Existence of `data_source_id` is checked by the ledger, not here.
    pub fn validate(&self) -> Result<(), ValidationError> {
        valid_identity("owner", &self.owner)?;
        valid_identity("sender", &self.sender)?;
        validate_data_source_fields(&self.name, &self.description, &self.executable)
    }
}

fn validate_data_source_fields(
    name: &str,
    description: &str,
    executable: &[u8],
) -> Result<(), ValidationError> {
    bounded_string("name", name, MAX_NAME_LENGTH)?;
    bounded_string("description", description, MAX_DESCRIPTION_LENGTH)?;
    bounded_bytes("executable", executable, 1, MAX_EXECUTABLE_SIZE)?;
    not_sentinel("executable", executable)
}

// =============================================================================
// Oracle scripts
// =============================================================================

/// Register a new oracle script.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgCreateOracleScript {
    pub owner: AccAddress,
    pub name: String,
    pub description: String,
    #[serde_as(as = "Base64")]
    pub code: Vec<u8>,
    pub schema: String,
    pub source_code_url: String,
    pub sender: AccAddress,
}

impl MsgCreateOracleScript {
    pub fn new(
        owner: AccAddress,
        name: impl Into<String>,
        description: impl Into<String>,
        code: impl Into<Vec<u8>>,
        schema: impl Into<String>,
        source_code_url: impl Into<String>,
        sender: AccAddress,
    ) -> Self {
        Self {
            owner,
            name: name.into(),
            description: description.into(),
            code: code.into(),
            schema: schema.into(),
            source_code_url: source_code_url.into(),
            sender,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        valid_identity("owner", &self.owner)?;
        valid_identity("sender", &self.sender)?;
        validate_oracle_script_fields(
            &self.name,
            &self.description,
            &self.schema,
            &self.source_code_url,
            &self.code,
        )
    }
}

/// Replace the fields of an existing oracle script.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgEditOracleScript {
    #[serde_as(as = "DisplayFromStr")]
    pub oracle_script_id: OracleScriptId,
    pub owner: AccAddress,
    pub name: String,
    pub description: String,
    #[serde_as(as = "Base64")]
    pub code: Vec<u8>,
    pub schema: String,
    pub source_code_url: String,
    pub sender: AccAddress,
}

impl MsgEditOracleScript {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        oracle_script_id: OracleScriptId,
        owner: AccAddress,
        name: impl Into<String>,
        description: impl Into<String>,
        code: impl Into<Vec<u8>>,
        schema: impl Into<String>,
        source_code_url: impl Into<String>,
        sender: AccAddress,
    ) -> Self {
        Self {
            oracle_script_id,
            owner,
            name: name.into(),
            description: description.into(),
            code: code.into(),
            schema: schema.into(),
            source_code_url: source_code_url.into(),
            sender,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        valid_identity("owner", &self.owner)?;
        valid_identity("sender", &self.sender)?;
        validate_oracle_script_fields(
            &self.name,
            &self.description,
            &self.schema,
            &self.source_code_url,
            &self.code,
        )
    }
}

fn validate_oracle_script_fields(
    name: &str,
    description: &str,
    schema: &str,
    source_code_url: &str,
    code: &[u8],
) -> Result<(), ValidationError> {
    bounded_string("name", name, MAX_NAME_LENGTH)?;
    bounded_string("description", description, MAX_DESCRIPTION_LENGTH)?;
    bounded_string("schema", schema, MAX_SCHEMA_LENGTH)?;
    bounded_string("source_code_url", source_code_url, MAX_URL_LENGTH)?;
    bounded_bytes("code", code, 1, MAX_WASM_CODE_SIZE)?;
    not_sentinel("code", code)
}

// =============================================================================
// Requests and reports
// =============================================================================

/// Ask the validator set to run an oracle script.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgRequestData {
    #[serde_as(as = "DisplayFromStr")]
    pub oracle_script_id: OracleScriptId,
    #[serde_as(as = "Base64")]
    pub calldata: Vec<u8>,
    #[serde_as(as = "DisplayFromStr")]
    pub ask_count: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub min_count: u64,
    pub client_id: String,
    pub sender: AccAddress,
}

impl MsgRequestData {
    pub fn new(
        oracle_script_id: OracleScriptId,
        calldata: impl Into<Vec<u8>>,
        ask_count: u64,
        min_count: u64,
        client_id: impl Into<String>,
        sender: AccAddress,
    ) -> Self {
        Self {
            oracle_script_id,
            calldata: calldata.into(),
            ask_count,
            min_count,
            client_id: client_id.into(),
            sender,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        valid_identity("sender", &self.sender)?;
        bounded_bytes("calldata", &self.calldata, 0, MAX_DATA_SIZE)?;
        count_ordering(self.ask_count, self.min_count)?;
        bounded_string("client_id", &self.client_id, MAX_CLIENT_ID_LENGTH)
    }
}

/// One validator's answer for one external data-source call.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReport {
    #[serde_as(as = "DisplayFromStr")]
    pub external_id: ExternalId,
    pub exit_code: i32,
    #[serde_as(as = "Base64")]
    pub data: Vec<u8>,
}

impl RawReport {
    pub fn new(external_id: ExternalId, exit_code: i32, data: impl Into<Vec<u8>>) -> Self {
        Self {
            external_id,
            exit_code,
            data: data.into(),
        }
    }
}

/// Submit a validator's raw reports for a request. Signed by the reporter.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgReportData {
    #[serde_as(as = "DisplayFromStr")]
    pub request_id: RequestId,
    pub raw_reports: Vec<RawReport>,
    pub validator: ValAddress,
    pub reporter: AccAddress,
}

impl MsgReportData {
    pub fn new(
        request_id: RequestId,
        raw_reports: Vec<RawReport>,
        validator: ValAddress,
        reporter: AccAddress,
    ) -> Self {
        Self {
            request_id,
            raw_reports,
            validator,
            reporter,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        valid_identity("validator", &self.validator)?;
        valid_identity("reporter", &self.reporter)?;
        non_empty("raw_reports", self.raw_reports.len())?;
        for report in &self.raw_reports {
            bounded_bytes("data", &report.data, 0, MAX_DATA_SIZE)?;
        }
        distinct_external_ids(self.raw_reports.iter().map(|r| r.external_id))
    }
}

// =============================================================================
// Validator housekeeping
// =============================================================================

/// Re-activate a validator for oracle duty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgActivate {
    pub validator: ValAddress,
}

impl MsgActivate {
    pub fn new(validator: ValAddress) -> Self {
        Self { validator }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        valid_identity("validator", &self.validator)
    }
}

/// Authorize an account to report on a validator's behalf.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgAddReporter {
    pub validator: ValAddress,
    pub reporter: AccAddress,
}

impl MsgAddReporter {
    pub fn new(validator: ValAddress, reporter: AccAddress) -> Self {
        Self {
            validator,
            reporter,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_reporter_grant(&self.validator, &self.reporter)
    }
}

/// Revoke a reporter previously added by the validator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgRemoveReporter {
    pub validator: ValAddress,
    pub reporter: AccAddress,
}

impl MsgRemoveReporter {
    pub fn new(validator: ValAddress, reporter: AccAddress) -> Self {
        Self {
            validator,
            reporter,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_reporter_grant(&self.validator, &self.reporter)
    }
}

fn validate_reporter_grant(
    validator: &ValAddress,
    reporter: &AccAddress,
) -> Result<(), ValidationError> {
    valid_identity("validator", validator)?;
    valid_identity("reporter", reporter)?;
    no_self_report(validator, reporter)
}

// =============================================================================
// Closed message enumeration
// =============================================================================

/// Any oracle message, tagged the way it appears on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Msg {
    #[serde(rename = "oracle/CreateDataSource")]
    CreateDataSource(MsgCreateDataSource),
    #[serde(rename = "oracle/EditDataSource")]
    EditDataSource(MsgEditDataSource),
    #[serde(rename = "oracle/CreateOracleScript")]
    CreateOracleScript(MsgCreateOracleScript),
    #[serde(rename = "oracle/EditOracleScript")]
    EditOracleScript(MsgEditOracleScript),
    #[serde(rename = "oracle/Request")]
    RequestData(MsgRequestData),
    #[serde(rename = "oracle/Report")]
    ReportData(MsgReportData),
    #[serde(rename = "oracle/Activate")]
    Activate(MsgActivate),
    #[serde(rename = "oracle/AddReporter")]
    AddReporter(MsgAddReporter),
    #[serde(rename = "oracle/RemoveReporter")]
    RemoveReporter(MsgRemoveReporter),
}

impl Msg {
    /// Module route; identical for every oracle message.
    pub fn route(&self) -> &'static str {
        ROUTE
    }

    /// Short action name used for event attributes and logs.
    pub fn msg_type(&self) -> &'static str {
        match self {
            Self::CreateDataSource(_) => "create_data_source",
            Self::EditDataSource(_) => "edit_data_source",
            Self::CreateOracleScript(_) => "create_oracle_script",
            Self::EditOracleScript(_) => "edit_oracle_script",
            Self::RequestData(_) => "request",
            Self::ReportData(_) => "report",
            Self::Activate(_) => "activate",
            Self::AddReporter(_) => "add_reporter",
            Self::RemoveReporter(_) => "remove_reporter",
        }
    }

    /// Name used after `oracle/` in the signed envelope's `type`.
    pub fn amino_name(&self) -> &'static str {
        match self {
            Self::CreateDataSource(_) => "CreateDataSource",
            Self::EditDataSource(_) => "EditDataSource",
            Self::CreateOracleScript(_) => "CreateOracleScript",
            Self::EditOracleScript(_) => "EditOracleScript",
            Self::RequestData(_) => "Request",
            Self::ReportData(_) => "Report",
            Self::Activate(_) => "Activate",
            Self::AddReporter(_) => "AddReporter",
            Self::RemoveReporter(_) => "RemoveReporter",
        }
    }

    /// The single account whose signature authorizes this message.
    pub fn signer(&self) -> AccAddress {
        match self {
            Self::CreateDataSource(m) => m.sender.clone(),
            Self::EditDataSource(m) => m.sender.clone(),
            Self::CreateOracleScript(m) => m.sender.clone(),
            Self::EditOracleScript(m) => m.sender.clone(),
            Self::RequestData(m) => m.sender.clone(),
            Self::ReportData(m) => m.reporter.clone(),
            Self::Activate(m) => m.validator.to_account(),
            Self::AddReporter(m) => m.validator.to_account(),
            Self::RemoveReporter(m) => m.validator.to_account(),
        }
    }

    /// Run the variant's checks, returning the first failure.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::CreateDataSource(m) => m.validate(),
            Self::EditDataSource(m) => m.validate(),
            Self::CreateOracleScript(m) => m.validate(),
            Self::EditOracleScript(m) => m.validate(),
            Self::RequestData(m) => m.validate(),
            Self::ReportData(m) => m.validate(),
            Self::Activate(m) => m.validate(),
            Self::AddReporter(m) => m.validate(),
            Self::RemoveReporter(m) => m.validate(),
        }
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Msg {
                fn from(msg: $ty) -> Self {
                    Msg::$variant(msg)
                }
            }
        )*
    };
}

impl_from_variant!(
    CreateDataSource(MsgCreateDataSource),
    EditDataSource(MsgEditDataSource),
    CreateOracleScript(MsgCreateOracleScript),
    EditOracleScript(MsgEditOracleScript),
    RequestData(MsgRequestData),
    ReportData(MsgReportData),
    Activate(MsgActivate),
    AddReporter(MsgAddReporter),
    RemoveReporter(MsgRemoveReporter),
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::constants::DO_NOT_MODIFY_BYTES;
    use crate::domain::errors::ErrorKind;

    fn good() -> AccAddress {
        AccAddress::from([0u8; 20])
    }

    fn good_val() -> ValAddress {
        ValAddress::from([0u8; 20])
    }

    fn bad() -> AccAddress {
        AccAddress::from_bytes(b"BAD_ADDR".to_vec())
    }

    #[test]
    fn test_route_is_oracle_for_every_variant() {
        let msgs: Vec<Msg> = vec![
            MsgActivate::new(good_val()).into(),
            MsgAddReporter::new(good_val(), good()).into(),
            MsgRequestData::new(1, b"c".to_vec(), 1, 1, "", good()).into(),
        ];
        for msg in msgs {
            assert_eq!(msg.route(), "oracle");
        }
    }

    #[test]
    fn test_msg_types() {
        let signer = AccAddress::from(*b"01234567890123456789");
        let msg: Msg =
            MsgRequestData::new(1, b"calldata".to_vec(), 10, 5, "client-id", signer).into();
        assert_eq!(msg.msg_type(), "request");
        assert_eq!(msg.amino_name(), "Request");

        let msg: Msg = MsgRemoveReporter::new(good_val(), good()).into();
        assert_eq!(msg.msg_type(), "remove_reporter");
        assert_eq!(msg.amino_name(), "RemoveReporter");
    }

    #[test]
    fn test_signers() {
        let signer_acc = AccAddress::from(*b"01234567890123456789");
        let signer_val = ValAddress::from(*b"01234567890123456789");
        let another_acc = AccAddress::from(*b"98765432109876543210");
        let another_val = ValAddress::from(*b"98765432109876543210");

        let msgs: Vec<Msg> = vec![
            MsgCreateDataSource::new(
                another_acc.clone(),
                "name",
                "desc",
                b"exec".to_vec(),
                signer_acc.clone(),
            )
            .into(),
            MsgEditDataSource::new(
                1,
                another_acc.clone(),
                "name",
                "desc",
                b"exec".to_vec(),
                signer_acc.clone(),
            )
            .into(),
            MsgCreateOracleScript::new(
                another_acc.clone(),
                "name",
                "desc",
                b"code".to_vec(),
                "schema",
                "url",
                signer_acc.clone(),
            )
            .into(),
            MsgEditOracleScript::new(
                1,
                another_acc.clone(),
                "name",
                "desc",
                b"code".to_vec(),
                "schema",
                "url",
                signer_acc.clone(),
            )
            .into(),
            MsgRequestData::new(1, b"calldata".to_vec(), 10, 5, "client-id", signer_acc.clone())
                .into(),
            MsgReportData::new(
                1,
                vec![RawReport::new(1, 1, b"data1".to_vec())],
                another_val,
                signer_acc.clone(),
            )
            .into(),
            MsgActivate::new(signer_val.clone()).into(),
            MsgAddReporter::new(signer_val.clone(), another_acc.clone()).into(),
            MsgRemoveReporter::new(signer_val, another_acc).into(),
        ];

        for msg in msgs {
            assert_eq!(msg.signer(), signer_acc, "signer of {}", msg.msg_type());
        }
    }

    #[test]
    fn test_create_data_source_check_order() {
        // Both owner and name are bad: the address check runs first.
        let msg =
            MsgCreateDataSource::new(bad(), "x".repeat(200), "desc", b"exec".to_vec(), good());
        assert_eq!(msg.validate().unwrap_err().kind(), ErrorKind::InvalidAddress);

        // Name and executable are bad: name runs first.
        let msg = MsgCreateDataSource::new(good(), "x".repeat(200), "desc", Vec::new(), good());
        assert_eq!(msg.validate().unwrap_err().field(), Some("name"));

        let msg = MsgCreateDataSource::new(good(), "name", "desc", Vec::new(), good());
        assert_eq!(msg.validate().unwrap_err().kind(), ErrorKind::FieldTooShort);
    }

    #[test]
    fn test_edit_data_source_rejects_sentinel() {
        let executable = DO_NOT_MODIFY_BYTES.to_vec();
        let msg = MsgEditDataSource::new(1, good(), "name", "desc", executable, good());
        assert_eq!(
            msg.validate(),
            Err(ValidationError::ReservedValue { field: "executable" })
        );
    }

    #[test]
    fn test_oracle_script_schema_checked_before_url() {
        let msg = MsgCreateOracleScript::new(
            good(),
            "name",
            "desc",
            b"code".to_vec(),
            "x".repeat(1000),
            "x".repeat(200),
            good(),
        );
        assert_eq!(msg.validate().unwrap_err().field(), Some("schema"));
    }

    #[test]
    fn test_request_counts_checked_before_client_id() {
        let msg = MsgRequestData::new(1, b"calldata".to_vec(), 2, 5, "x".repeat(300), good());
        assert_eq!(msg.validate().unwrap_err().kind(), ErrorKind::InvalidCount);
    }

    #[test]
    fn test_report_data_size_checked_before_duplicates() {
        let msg = MsgReportData::new(
            1,
            vec![
                RawReport::new(1, 0, b"ok".to_vec()),
                RawReport::new(1, 0, vec![0u8; 500]),
            ],
            good_val(),
            good(),
        );
        assert_eq!(msg.validate().unwrap_err().kind(), ErrorKind::FieldTooLong);
    }

    #[test]
    fn test_report_requires_raw_reports() {
        let msg = MsgReportData::new(1, Vec::new(), good_val(), good());
        assert_eq!(
            msg.validate(),
            Err(ValidationError::FieldTooShort {
                field: "raw_reports",
                min: 1,
                actual: 0
            })
        );
    }

    #[test]
    fn test_remove_reporter_self_report() {
        let val = ValAddress::from([3u8; 20]);
        let msg = MsgRemoveReporter::new(val.clone(), val.to_account());
        assert_eq!(msg.validate(), Err(ValidationError::SelfReportDisallowed));
    }

    #[test]
    fn test_validate_is_pure() {
        let msg: Msg =
            MsgCreateDataSource::new(good(), "name", "desc", b"exec".to_vec(), good()).into();
        let before = msg.clone();
        assert!(msg.validate().is_ok());
        assert!(msg.validate().is_ok());
        assert_eq!(msg, before);
    }
}
