//! Movie directories: a single video file named after the catalog title.

use std::path::Path;

use mediashelf_av::RemuxMetadata;
use mediashelf_common::{paths::dotted_extension, LedgerTable, MediaKind};
use tracing::{info, warn};

use super::naming::movie_filename;
use super::{apply, DirectoryReport, FileJob, ProcessContext, ProcessError};
use crate::scanner::{file_name, list_videos};

/// Rename, record, or verify the movie file in `dir`.
pub async fn process_movie(
    dir: &Path,
    ctx: &ProcessContext<'_>,
) -> Result<DirectoryReport, ProcessError> {
    let mut report = DirectoryReport::new(dir, MediaKind::Movie);

    let files = list_videos(dir).map_err(|source| ProcessError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let Some(file) = files.into_iter().next() else {
        warn!(directory = %dir.display(), "No video file directly in movie directory, skipping");
        return Ok(report);
    };

    let title = file_name(dir).trim().to_string();
    let movie = ctx
        .catalog
        .search_movie(&title)
        .await?
        .into_iter()
        // First result that can name a file; untitled entries are passed over.
        .find(|m| !m.title.trim().is_empty())
        .ok_or_else(|| ProcessError::NotFound {
            kind: "Movie",
            directory: dir.to_path_buf(),
            title: title.clone(),
        })?;
    info!(directory = %dir.display(), movie = %movie.title, "Matched movie");

    let job = FileJob {
        target: movie_filename(&movie.title, &dotted_extension(&file)),
        metadata: RemuxMetadata::movie(&movie.title, movie.year()),
        source: file,
    };

    report.files.push(apply(&job, LedgerTable::Movies, ctx).await);
    Ok(report)
}
