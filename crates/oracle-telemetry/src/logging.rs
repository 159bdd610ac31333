//! Logging macros with consistent fields.
//!
//! Every line carries `subsystem`; message-related lines also carry
//! `msg_type`, so log queries can group by action without parsing text.

/// Log an event with a `subsystem` field.
#[macro_export]
macro_rules! log_event {
    ($level:ident, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            subsystem = $subsystem,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log an event about one oracle message.
///
/// ```rust,ignore
/// log_msg_event!(info, "oracle-cli", msg.msg_type(), "Message validated", signer = %signer);
/// ```
#[macro_export]
macro_rules! log_msg_event {
    ($level:ident, $subsystem:expr, $msg_type:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            subsystem = $subsystem,
            msg_type = $msg_type,
            $($($field)*,)?
            $msg
        )
    };
}
