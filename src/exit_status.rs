//! Process exit statuses.
//!
//! | Status | Meaning |
//! |---|---|
//! | `0` | Every missing table was created, or nothing was missing. |
//! | `1` | At least one table could not be created. |
//! | `2` | The existing tables could not be listed. |
//! | `3` | Logging or `config.json` could not be set up. |

use crate::error::ProvisionError;
use crate::provisioner::ProvisionReport;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_CREATE_FAILED: u8 = 1;
pub const EXIT_BACKEND_UNAVAILABLE: u8 = 2;
pub const EXIT_CONFIG: u8 = 3;

/// Exit status for the result of a provisioning run.
pub fn exit_status(result: &Result<ProvisionReport, ProvisionError>) -> u8 {
    match result {
        Ok(report) if report.is_success() => EXIT_SUCCESS,
        Ok(_) => EXIT_CREATE_FAILED,
        Err(ProvisionError::BackendUnavailable(_)) => EXIT_BACKEND_UNAVAILABLE,
        Err(ProvisionError::CreateFailed { .. }) => EXIT_CREATE_FAILED,
    }
}
