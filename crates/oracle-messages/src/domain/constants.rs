//! # Protocol Constants
//!
//! Size and length limits shared by every oracle message. These values are part
//! of the consensus contract: changing any of them changes which messages a node
//! accepts, so they are plain `const` items rather than configuration.

/// Route (module name) every oracle message is dispatched to.
pub const ROUTE: &str = "oracle";

/// Reserved marker meaning "leave this field unchanged".
///
/// Shared by data-source executables and oracle-script code. It is never
/// accepted as user-supplied content.
pub const DO_NOT_MODIFY: &str = "[do-not-modify]";

/// Byte form of [`DO_NOT_MODIFY`].
pub const DO_NOT_MODIFY_BYTES: &[u8] = DO_NOT_MODIFY.as_bytes();

// =============================================================================
// String limits (bytes)
// =============================================================================

pub const MAX_NAME_LENGTH: usize = 128;
pub const MAX_DESCRIPTION_LENGTH: usize = 4096;
pub const MAX_CLIENT_ID_LENGTH: usize = 128;
pub const MAX_SCHEMA_LENGTH: usize = 512;
pub const MAX_URL_LENGTH: usize = 128;

// =============================================================================
// Blob limits (bytes)
// =============================================================================

/// Data-source executable: 8 KiB.
pub const MAX_EXECUTABLE_SIZE: usize = 8 * 1024;
/// Oracle-script wasm code: 512 KiB.
pub const MAX_WASM_CODE_SIZE: usize = 512 * 1024;
/// Compiled wasm ceiling: 1 MiB. Enforced by the script engine, not here.
pub const MAX_COMPILED_WASM_CODE_SIZE: usize = 1024 * 1024;
/// Request calldata and raw-report data: 256 B.
pub const MAX_DATA_SIZE: usize = 256;

// =============================================================================
// Script engine gas (consumed externally)
// =============================================================================

pub const WASM_PREPARE_GAS: u64 = 1_000_000;
pub const WASM_EXECUTE_GAS: u64 = 5_000_000;
