//! Opening one file in the window without letting it take the rest down.

use log::{debug, warn};
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

use crate::api::collaborators::{Notifier, Window};
use crate::api::models::DeliveryError;
use crate::util::panic_message;
use crate::util::report::ErrorReport;

/// Loads `path` into `window`.
///
/// Errors and panics from the window are converted into a
/// [`DeliveryError`], logged and reported through `notifier`. Returns
/// whether the file loaded.
pub(crate) fn deliver(
    window: &dyn Window,
    path: PathBuf,
    notifier: &dyn Notifier,
    issue_tracker: Option<&str>,
) -> bool {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| window.load_file(&path)));

    let err = match outcome {
        Ok(Ok(())) => {
            debug!("Opened {}", path.display());
            return true;
        }
        Ok(Err(e)) => e,
        Err(payload) => DeliveryError::Panicked {
            message: panic_message(payload.as_ref()),
            path,
        },
    };

    warn!("{err}");
    let report = ErrorReport::new(format!("Unable to open {}", err.path().display()), &err)
        .with_issue_tracker(issue_tracker.map(str::to_string));
    notifier.report_error(&report);
    false
}
