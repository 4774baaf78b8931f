//! Operation boundary macros
//!
//! Each boundary event carries `component`, `op` and `event`; extra
//! `key = value` fields are passed through to `tracing` unchanged.

/// Log the start of an operation
///
/// ```
/// # use oleshki_core::log_op_start;
/// log_op_start!("diff_run");
/// log_op_start!("diff_run", run_id = "r1");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::oleshki_core_types::schema::EVENT_START,
            $($($field)*)?
        );
    };
}

/// Log the successful end of an operation
///
/// ```
/// # use oleshki_core::log_op_end;
/// log_op_end!("diff_run", duration_ms = 42, entries = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::oleshki_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)*)?
        );
    };
}

/// Log a failed operation with the stable code of its error
///
/// `$err` is anything convertible into [`ExError`](crate::errors::ExError).
///
/// ```
/// # use oleshki_core::log_op_error;
/// # use oleshki_core::errors::{ExError, ExErrorKind};
/// log_op_error!("diff_run", ExError::new(ExErrorKind::SnapshotRead), duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::oleshki_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            err_message = %ex_err,
            $($($field)*)?
        );
    }};
}
