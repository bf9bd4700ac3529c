use tracing::debug;

/// Display error in a user-friendly format without stack traces.
///
/// A broken pipe on stdout is a normal exit condition for piped input and
/// stays silent; everything else gets a short one-line message.
pub fn display_user_error(err: &anyhow::Error) {
    if let Some(io_err) = err.downcast_ref::<std::io::Error>()
        && io_err.kind() == std::io::ErrorKind::BrokenPipe
    {
        debug!("exiting on broken pipe: {err}");
        return;
    }
    eprintln!("qp: {err}");
}
