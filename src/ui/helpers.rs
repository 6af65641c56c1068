use anyhow::Error;

use crate::error::StoreError;

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

/// One-line message for a failed store operation. I/O failures carry their
/// root cause so the user sees which file could not be written.
pub(crate) fn describe(err: &StoreError) -> String {
    match err {
        StoreError::Persistence(inner) => format!("{err}: {}", surface_error(inner)),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;
    use crate::error::RecordKind;

    #[test]
    fn persistence_errors_show_root_cause() {
        let inner = anyhow!("disk full").context("failed to rewrite Program.txt");
        let message = describe(&StoreError::Persistence(inner));
        assert_eq!(message, "failed to update data file: disk full");
    }

    #[test]
    fn other_errors_use_display() {
        let err = StoreError::NotFound {
            kind: RecordKind::Channel,
            name: "Arte".into(),
        };
        assert_eq!(describe(&err), "Channel not found.");
    }
}
