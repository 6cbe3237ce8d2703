//! License status, injected into the pipeline.
//!
//! The combine and trim stages never look at it; only the HTML stage does, to
//! decide whether to stamp a banner on the receipt.

/// Outcome of a license check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseStatus {
    Licensed,
    Unlicensed,
}

/// Anything that can tell the pipeline whether it is licensed.
pub trait LicenseCheck {
    fn status(&self) -> LicenseStatus;
}

/// A fixed status, for callers that verified the license elsewhere (or tests).
impl LicenseCheck for LicenseStatus {
    fn status(&self) -> LicenseStatus {
        *self
    }
}
