use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::{CalendarDocument, Scope};
use crate::error::CfbError;

/// A document ready to be written, with the file it belongs in.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedDocument {
    pub scope: Scope,
    pub document: CalendarDocument,
}

impl PlannedDocument {
    pub fn file_name(&self) -> String {
        self.scope.file_name()
    }
}

/// Outcome of a publish run. Documents that were written stay written even
/// when others fail.
#[derive(Debug, Default)]
pub struct PublishReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<CfbError>,
}

impl PublishReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Write every planned document into `output_dir`, each as a full overwrite.
///
/// A failing document does not stop the rest.
pub fn publish(plans: &[PlannedDocument], output_dir: &Path) -> PublishReport {
    let mut report = PublishReport::default();

    for plan in plans {
        let path = output_dir.join(plan.file_name());
        match plan.document.write(&path) {
            Ok(()) => {
                info!(path = %path.display(), events = plan.document.events.len(), "published");
                report.written.push(path);
            }
            Err(e) => {
                warn!(scope = %plan.scope, "{e}");
                report.failed.push(e);
            }
        }
    }

    report
}
