//! The status modal.

use std::time::Duration;

/// How long a success message stays up before the modal closes itself.
pub const SUCCESS_DISMISS_AFTER: Duration = Duration::from_secs(3);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Loading,
    Success,
    Error,
    Info,
}

/// One state of the status modal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    kind: StatusKind,
    message: String,
}

impl Status {
    pub fn new(kind: StatusKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    pub fn loading(message: impl Into<String>) -> Self {
        Self::new(StatusKind::Loading, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(StatusKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(StatusKind::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(StatusKind::Info, message)
    }

    /// How to open the site from a mobile wallet's built-in browser.
    pub fn mobile_wallet_instructions(page_url: &str) -> Self {
        Self::info(format!(
            "To connect a wallet on mobile:\n\
             MetaMask: open the app, tap the browser tab and enter the site address.\n\
             OKX Wallet: open the app, go to \"Discover\" or \"DApps\" and enter the site \
             address.\n\
             Trust Wallet: open the app, tap \"Browser\" and enter the site address.\n\
             Site address: {page_url}"
        ))
    }

    pub fn kind(&self) -> StatusKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            StatusKind::Loading => "Processing",
            StatusKind::Success => "Success",
            StatusKind::Error => "Error",
            StatusKind::Info => "Instructions",
        }
    }

    /// Icon markup of the modal body.
    pub fn icon(&self) -> &'static str {
        match self.kind {
            StatusKind::Loading => "spinner-border text-primary",
            StatusKind::Success => "fas fa-check-circle text-success",
            StatusKind::Error => "fas fa-exclamation-circle text-danger",
            StatusKind::Info => "fas fa-info-circle text-info",
        }
    }

    /// Set for states that close on their own.
    pub fn auto_dismiss(&self) -> Option<Duration> {
        (self.kind == StatusKind::Success).then_some(SUCCESS_DISMISS_AFTER)
    }
}

/// Where statuses are rendered.
pub trait StatusSink {
    /// Replaces the modal content with `status` and opens it.
    fn show(&mut self, status: &Status);

    /// Closes the modal.
    fn hide(&mut self) {}
}

/// Keeps every shown status, for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordedStatus {
    pub shown: Vec<Status>,
}

#[cfg(test)]
impl RecordedStatus {
    pub fn last(&self) -> Option<&Status> {
        self.shown.last()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.shown.iter().map(Status::message).collect()
    }
}

#[cfg(test)]
impl StatusSink for RecordedStatus {
    fn show(&mut self, status: &Status) {
        self.shown.push(status.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_distinct_presentations() {
        let statuses = [
            Status::loading("a"),
            Status::success("b"),
            Status::error("c"),
            Status::mobile_wallet_instructions("https://mint.example.org"),
        ];
        let titles: Vec<_> = statuses.iter().map(Status::title).collect();
        assert_eq!(titles, ["Processing", "Success", "Error", "Instructions"]);

        let mut icons: Vec<_> = statuses.iter().map(Status::icon).collect();
        icons.dedup();
        assert_eq!(icons.len(), 4);

        assert_eq!(statuses[1].auto_dismiss(), Some(SUCCESS_DISMISS_AFTER));
        assert!(statuses[0].auto_dismiss().is_none());
        assert!(statuses[3].message().ends_with("https://mint.example.org"));
    }
}
