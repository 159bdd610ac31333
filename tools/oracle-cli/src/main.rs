//! oracle-cli: offline checks for oracle transaction messages.
//!
//! Input files hold amino-JSON envelopes (`{"type":"oracle/...","value":{...}}`),
//! either one envelope or an array of them. `-` reads stdin.

use std::fs;
use std::io::{self, Read};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use oracle_messages::{
    constants, decode_msgs, AccAddress, Msg, OracleMessageApi, OracleMessageService,
    ServiceConfig, TracingSink, ValAddress, ValidationError, ValidatedMsg, ACCOUNT_HRP,
    VALIDATOR_HRP,
};
use oracle_telemetry::{init_telemetry, log_event, log_msg_event, TelemetryConfig};

const SUBSYSTEM: &str = "oracle-cli";

#[derive(Parser, Debug)]
#[command(name = "oracle-cli", version)]
#[command(about = "Validate oracle messages and print their canonical sign bytes")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate every message in a file and report the result of each
    Validate {
        /// Input path, or `-` for stdin
        input: String,
    },
    /// Print the canonical sign bytes and their SHA-256 digest
    SignBytes {
        /// Input path, or `-` for stdin
        input: String,
    },
    /// Render a 20-byte hex identity in bech32
    Address {
        /// 40 hex characters
        hex: String,
        /// Use the validator prefix instead of the account prefix
        #[arg(long)]
        validator: bool,
    },
    /// Print the protocol constants as JSON
    Constants,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Validate { .. } => "validate",
            Command::SignBytes { .. } => "sign-bytes",
            Command::Address { .. } => "address",
            Command::Constants => "constants",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_telemetry(&TelemetryConfig::for_tool(SUBSYSTEM)).context("initializing logging")?;

    let config = ServiceConfig::from_env().context("loading service config")?;
    log_event!(
        info,
        SUBSYSTEM,
        "Command started",
        command = cli.cmd.name(),
        max_batch_size = config.max_batch_size
    );

    let service = build_service(config);
    match cli.cmd {
        Command::Validate { input } => {
            let msgs = decode_msgs(&read_input(&input)?).context("decoding messages")?;
            let results = service.validate_batch(msgs.clone())?;
            let rejected = results.iter().filter(|r| r.is_err()).count();
            for (msg, result) in msgs.iter().zip(&results) {
                println!("{}", validation_report(msg, result));
            }
            if rejected > 0 {
                bail!("{rejected} of {} messages failed validation", results.len());
            }
        }
        Command::SignBytes { input } => {
            for msg in decode_msgs(&read_input(&input)?).context("decoding messages")? {
                let msg_type = msg.msg_type();
                let validated = service
                    .validate(msg)
                    .with_context(|| format!("validating {msg_type} message"))?;
                let (bytes, digest) = sign_bytes_output(&validated)?;
                log_msg_event!(info, SUBSYSTEM, msg_type, "Sign bytes computed", digest = %digest);
                println!("{bytes}");
                println!("sha256:{digest}");
            }
        }
        Command::Address { hex, validator } => println!("{}", render_address(&hex, validator)?),
        Command::Constants => println!("{}", serde_json::to_string_pretty(&constants_json())?),
    }
    Ok(())
}

/// Service publishing to the log, with limits from `ORACLE_*` variables.
fn build_service(config: ServiceConfig) -> OracleMessageService<TracingSink> {
    OracleMessageService::with_config(TracingSink, config)
}

fn read_input(input: &str) -> Result<Vec<u8>> {
    if input == "-" {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("reading stdin")?;
        return Ok(buf);
    }
    fs::read(input).with_context(|| format!("reading {input}"))
}

fn validation_report(msg: &Msg, result: &Result<ValidatedMsg, ValidationError>) -> Value {
    match result {
        Ok(validated) => json!({
            "type": msg.msg_type(),
            "valid": true,
            "signer": validated.signer().to_bech32(),
        }),
        Err(e) => json!({
            "type": msg.msg_type(),
            "valid": false,
            "error": e.kind().as_str(),
            "field": e.field(),
            "detail": e.to_string(),
        }),
    }
}

fn sign_bytes_output(validated: &ValidatedMsg) -> Result<(String, String)> {
    let bytes = String::from_utf8(validated.sign_bytes()).context("sign bytes are not UTF-8")?;
    Ok((bytes, hex::encode(validated.sign_bytes_digest())))
}

fn render_address(hex_str: &str, validator: bool) -> Result<String> {
    let bytes = hex::decode(hex_str.trim_start_matches("0x")).context("decoding hex")?;
    let rendered = if validator {
        let address = ValAddress::from_bytes(bytes);
        address.verify_format().context("validator address")?;
        address.to_bech32()
    } else {
        let address = AccAddress::from_bytes(bytes);
        address.verify_format().context("account address")?;
        address.to_bech32()
    };
    Ok(rendered)
}

fn constants_json() -> Value {
    json!({
        "route": constants::ROUTE,
        "do_not_modify": constants::DO_NOT_MODIFY,
        "account_prefix": ACCOUNT_HRP,
        "validator_prefix": VALIDATOR_HRP,
        "max_name_length": constants::MAX_NAME_LENGTH,
        "max_description_length": constants::MAX_DESCRIPTION_LENGTH,
        "max_client_id_length": constants::MAX_CLIENT_ID_LENGTH,
        "max_schema_length": constants::MAX_SCHEMA_LENGTH,
        "max_url_length": constants::MAX_URL_LENGTH,
        "max_executable_size": constants::MAX_EXECUTABLE_SIZE,
        "max_wasm_code_size": constants::MAX_WASM_CODE_SIZE,
        "max_compiled_wasm_code_size": constants::MAX_COMPILED_WASM_CODE_SIZE,
        "max_data_size": constants::MAX_DATA_SIZE,
        "wasm_prepare_gas": constants::WASM_PREPARE_GAS,
        "wasm_execute_gas": constants::WASM_EXECUTE_GAS,
    })
}
