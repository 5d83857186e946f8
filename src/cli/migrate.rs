use std::path::Path;

use super::{ExportOptions, ImportOptions, export, import};
use crate::{info, utils};

/// Export followed by import, sharing the same library file.
pub async fn migrate(library: &Path, export_opts: &ExportOptions, import_opts: &ImportOptions) {
    export(library, export_opts).await;

    if !import_opts.yes {
        utils::prompt("Press Enter to continue with the TIDAL login...");
    }
    info!("Continuing with TIDAL.");

    import(library, import_opts).await;
}
