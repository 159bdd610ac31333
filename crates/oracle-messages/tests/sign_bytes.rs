//! # Sign-Bytes Compatibility Tests
//!
//! Canonical encodings that existing signers and verifiers already produce.
//! Any byte of difference here breaks signature verification, so these are
//! exact string comparisons.

use oracle_messages::{
    decode_msg, AccAddress, Msg, MsgActivate, MsgAddReporter, MsgCreateDataSource,
    MsgCreateOracleScript, MsgEditDataSource, MsgEditOracleScript, MsgRemoveReporter,
    MsgReportData, MsgRequestData, RawReport, ValAddress, ValidatedMsg,
};

// =============================================================================
// TEST HELPERS
// =============================================================================

const ACC0: &str = "band1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqq2vqal4";
const ACC1: &str = "band1qyqszqgpqyqszqgpqyqszqgpqyqszqgptupu45";
const VAL0: &str = "bandvaloper1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqx6y767";

fn acc(byte: u8) -> AccAddress {
    AccAddress::from([byte; 20])
}

fn val(byte: u8) -> ValAddress {
    ValAddress::from([byte; 20])
}

fn sign_bytes(msg: impl Into<Msg>) -> String {
    let validated: ValidatedMsg = msg.into().into_validated().unwrap();
    String::from_utf8(validated.sign_bytes()).unwrap()
}

/// The canonical bytes must also be a valid wire form of the same message.
fn assert_decodes_back(msg: impl Into<Msg>) {
    let msg = msg.into();
    let bytes = msg.clone().into_validated().unwrap().sign_bytes();
    assert_eq!(decode_msg(&bytes).unwrap(), msg);
}

// =============================================================================
// VECTORS
// =============================================================================

#[test]
fn test_create_data_source_sign_bytes() {
    let msg = MsgCreateDataSource::new(acc(0), "name", "desc", b"exec".to_vec(), acc(0));
    assert_eq!(
        sign_bytes(msg.clone()),
        format!(
            r#"{{"type":"oracle/CreateDataSource","value":{{"description":"desc","executable":"ZXhlYw==","name":"name","owner":"{ACC0}","sender":"{ACC0}"}}}}"#
        )
    );
    assert_decodes_back(msg);
}

#[test]
fn test_edit_data_source_sign_bytes() {
    let msg = MsgEditDataSource::new(1, acc(0), "name", "desc", b"exec".to_vec(), acc(0));
    assert_eq!(
        sign_bytes(msg.clone()),
        format!(
            r#"{{"type":"oracle/EditDataSource","value":{{"data_source_id":"1","description":"desc","executable":"ZXhlYw==","name":"name","owner":"{ACC0}","sender":"{ACC0}"}}}}"#
        )
    );
    assert_decodes_back(msg);
}

#[test]
fn test_create_oracle_script_sign_bytes() {
    let msg = MsgCreateOracleScript::new(
        acc(0),
        "name",
        "desc",
        b"code".to_vec(),
        "schema",
        "url",
        acc(0),
    );
    assert_eq!(
        sign_bytes(msg.clone()),
        format!(
            r#"{{"type":"oracle/CreateOracleScript","value":{{"code":"Y29kZQ==","description":"desc","name":"name","owner":"{ACC0}","schema":"schema","sender":"{ACC0}","source_code_url":"url"}}}}"#
        )
    );
    assert_decodes_back(msg);
}

#[test]
fn test_edit_oracle_script_sign_bytes() {
    let msg = MsgEditOracleScript::new(
        1,
        acc(0),
        "name",
        "desc",
        b"code".to_vec(),
        "schema",
        "url",
        acc(0),
    );
    assert_eq!(
        sign_bytes(msg.clone()),
        format!(
            r#"{{"type":"oracle/EditOracleScript","value":{{"code":"Y29kZQ==","description":"desc","name":"name","oracle_script_id":"1","owner":"{ACC0}","schema":"schema","sender":"{ACC0}","source_code_url":"url"}}}}"#
        )
    );
    assert_decodes_back(msg);
}

#[test]
fn test_request_data_sign_bytes() {
    let msg = MsgRequestData::new(1, b"calldata".to_vec(), 10, 5, "client-id", acc(0));
    assert_eq!(
        sign_bytes(msg.clone()),
        format!(
            r#"{{"type":"oracle/Request","value":{{"ask_count":"10","calldata":"Y2FsbGRhdGE=","client_id":"client-id","min_count":"5","oracle_script_id":"1","sender":"{ACC0}"}}}}"#
        )
    );
    assert_decodes_back(msg);
}

#[test]
fn test_report_data_sign_bytes() {
    let msg = MsgReportData::new(
        1,
        vec![
            RawReport::new(1, 1, b"data1".to_vec()),
            RawReport::new(2, 2, b"data2".to_vec()),
        ],
        val(0),
        acc(0),
    );
    assert_eq!(
        sign_bytes(msg.clone()),
        format!(
            r#"{{"type":"oracle/Report","value":{{"raw_reports":[{{"data":"ZGF0YTE=","exit_code":1,"external_id":"1"}},{{"data":"ZGF0YTI=","exit_code":2,"external_id":"2"}}],"reporter":"{ACC0}","request_id":"1","validator":"{VAL0}"}}}}"#
        )
    );
    assert_decodes_back(msg);
}

#[test]
fn test_activate_sign_bytes() {
    let msg = MsgActivate::new(val(0));
    assert_eq!(
        sign_bytes(msg.clone()),
        format!(r#"{{"type":"oracle/Activate","value":{{"validator":"{VAL0}"}}}}"#)
    );
    assert_decodes_back(msg);
}

#[test]
fn test_add_reporter_sign_bytes() {
    let msg = MsgAddReporter::new(val(0), acc(1));
    assert_eq!(
        sign_bytes(msg.clone()),
        format!(
            r#"{{"type":"oracle/AddReporter","value":{{"reporter":"{ACC1}","validator":"{VAL0}"}}}}"#
        )
    );
    assert_decodes_back(msg);
}

#[test]
fn test_remove_reporter_sign_bytes() {
    let msg = MsgRemoveReporter::new(val(0), acc(1));
    assert_eq!(
        sign_bytes(msg.clone()),
        format!(
            r#"{{"type":"oracle/RemoveReporter","value":{{"reporter":"{ACC1}","validator":"{VAL0}"}}}}"#
        )
    );
    assert_decodes_back(msg);
}

// =============================================================================
// ENCODING DETAILS
// =============================================================================

#[test]
fn test_raw_reports_keep_submission_order() {
    let msg = MsgReportData::new(
        1,
        vec![
            RawReport::new(9, 0, b"b".to_vec()),
            RawReport::new(3, 0, b"a".to_vec()),
        ],
        val(0),
        acc(0),
    );
    let bytes = sign_bytes(msg);
    let nine = bytes.find(r#""external_id":"9""#).unwrap();
    let three = bytes.find(r#""external_id":"3""#).unwrap();
    assert!(nine < three);
}

#[test]
fn test_negative_exit_code_and_external_id() {
    let msg = MsgReportData::new(1, vec![RawReport::new(-4, -1, Vec::new())], val(0), acc(0));
    let bytes = sign_bytes(msg);
    assert!(bytes.contains(r#"{"data":"","exit_code":-1,"external_id":"-4"}"#));
}

#[test]
fn test_max_u64_ids_are_quoted() {
    let msg = MsgRequestData::new(u64::MAX, Vec::new(), u64::MAX, 1, "", acc(0));
    let bytes = sign_bytes(msg);
    assert!(bytes.contains(r#""oracle_script_id":"18446744073709551615""#));
    assert!(bytes.contains(r#""ask_count":"18446744073709551615""#));
}

#[test]
fn test_empty_client_id_is_present() {
    let msg = MsgRequestData::new(1, Vec::new(), 1, 1, "", acc(0));
    let bytes = sign_bytes(msg);
    assert!(bytes.contains(r#""calldata":"""#));
    assert!(bytes.contains(r#""client_id":"""#));
}

#[test]
fn test_html_characters_are_escaped() {
    let msg = MsgCreateDataSource::new(acc(0), "a<b>&c", "desc", b"exec".to_vec(), acc(0));
    let bytes = sign_bytes(msg);
    assert!(bytes.contains(r#""name":"a\u003cb\u003e\u0026c""#));
}

#[test]
fn test_sign_bytes_match_across_instances() {
    let a = MsgRequestData::new(7, b"x".to_vec(), 3, 2, "id", acc(2));
    let b = MsgRequestData::new(7, b"x".to_vec(), 3, 2, "id", acc(2));
    assert_eq!(sign_bytes(a), sign_bytes(b));
}
