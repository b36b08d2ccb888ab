//! Series directories: one season, one file per episode.
//!
//! Files are paired with episodes by position. The lexically first video
//! file becomes the first episode the catalog lists for the season, and so
//! on. A season with fewer episodes than files is rejected before any file
//! is touched.

use std::path::{Path, PathBuf};

use mediashelf_av::RemuxMetadata;
use mediashelf_common::{paths::dotted_extension, LedgerTable, MediaKind};
use tracing::{info, warn};

use super::naming::{episode_filename, pad_width};
use super::{apply, DirectoryReport, FileJob, ProcessContext, ProcessError};
use crate::metadata::EpisodeRecord;
use crate::scanner::{file_name, list_videos, SeriesIdentity};

/// Rename, record, or verify every episode file in `dir`.
pub async fn process_series(
    dir: &Path,
    ctx: &ProcessContext<'_>,
) -> Result<DirectoryReport, ProcessError> {
    let mut report = DirectoryReport::new(dir, MediaKind::Series);

    let files = list_videos(dir).map_err(|source| ProcessError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    if files.is_empty() {
        warn!(directory = %dir.display(), "No video files directly in series directory, skipping");
        return Ok(report);
    }

    let identity = SeriesIdentity::parse(&file_name(dir));
    let title = search_title(dir, &identity);

    let show = ctx
        .catalog
        .search_tv(&title)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| ProcessError::NotFound {
            kind: "Show",
            directory: dir.to_path_buf(),
            title: title.clone(),
        })?;
    info!(
        directory = %dir.display(),
        show = %show.name,
        season = identity.season,
        "Matched show"
    );

    let season = ctx.catalog.season_details(show.id, identity.season).await?;
    let jobs = plan_episodes(&show.name, identity.season, &files, &season.episodes)?;

    for job in &jobs {
        report
            .files
            .push(apply(job, LedgerTable::Series, ctx).await);
    }

    Ok(report)
}

/// Title to search the catalog for.
///
/// A directory named only by its season (`Show/Season 2`) leaves an empty
/// title, so the parent directory name is used instead.
fn search_title(dir: &Path, identity: &SeriesIdentity) -> String {
    let title = identity.search_title();
    if !title.is_empty() {
        return title.to_string();
    }
    dir.parent()
        .map(|p| file_name(p).trim().to_string())
        .unwrap_or_default()
}

/// Pair each file with its episode and synthesize the new names.
///
/// Fails with [`ProcessError::SeasonMismatch`] naming every file past the end
/// of the episode list.
pub(crate) fn plan_episodes(
    show: &str,
    season: u32,
    files: &[PathBuf],
    episodes: &[EpisodeRecord],
) -> Result<Vec<FileJob>, ProcessError> {
    if files.len() > episodes.len() {
        return Err(ProcessError::SeasonMismatch {
            show: show.to_string(),
            season,
            episodes: episodes.len(),
            unmatched: files[episodes.len()..].iter().map(|f| file_name(f)).collect(),
        });
    }

    let width = pad_width(files.len());
    Ok(files
        .iter()
        .zip(episodes)
        .map(|(file, episode)| FileJob {
            source: file.clone(),
            target: episode_filename(
                show,
                season,
                episode.episode_number,
                width,
                &episode.name,
                &dotted_extension(file),
            ),
            metadata: RemuxMetadata::episode(&episode.name, show, episode.episode_number),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episodes(n: u32) -> Vec<EpisodeRecord> {
        (1..=n).map(|i| EpisodeRecord::new(i, format!("Episode {i}"))).collect()
    }

    fn files(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|n| PathBuf::from("/tv/Foo").join(n)).collect()
    }

    #[test]
    fn test_plan_pairs_by_position() {
        let eps = vec![EpisodeRecord::new(1, "Pilot"), EpisodeRecord::new(2, "Second")];
        let jobs = plan_episodes("Foo", 1, &files(&["a.mkv", "b.mkv"]), &eps).unwrap();

        let targets: Vec<_> = jobs.iter().map(|j| j.target.as_str()).collect();
        assert_eq!(targets, vec!["(Foo) [S1E1] Pilot.mkv", "(Foo) [S1E2] Second.mkv"]);
        assert_eq!(jobs[1].metadata, RemuxMetadata::episode("Second", "Foo", 2));
        assert_eq!(jobs[1].destination(), PathBuf::from("/tv/Foo/(Foo) [S1E2] Second.mkv"));
    }

    #[test]
    fn test_plan_pads_to_file_count() {
        let names: Vec<String> = (0..12).map(|i| format!("{i:02}.mp4")).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        let jobs = plan_episodes("Foo", 3, &files(&names), &episodes(12)).unwrap();
        assert_eq!(jobs[0].target, "(Foo) [S3E01] Episode 1.mp4");
        assert_eq!(jobs[11].target, "(Foo) [S3E12] Episode 12.mp4");
    }

    #[test]
    fn test_plan_fewer_files_than_episodes() {
        let jobs = plan_episodes("Foo", 1, &files(&["a.mkv"]), &episodes(10)).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].target, "(Foo) [S1E1] Episode 1.mkv");
    }

    #[test]
    fn test_plan_season_mismatch_lists_unmatched() {
        let err = plan_episodes("Foo", 1, &files(&["a.mkv", "b.mkv", "c.mkv"]), &episodes(1))
            .unwrap_err();
        match err {
            ProcessError::SeasonMismatch {
                episodes, unmatched, ..
            } => {
                assert_eq!(episodes, 1);
                assert_eq!(unmatched, vec!["b.mkv", "c.mkv"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_search_title_falls_back_to_parent() {
        let dir = Path::new("/tv/The Office/Season 2");
        let identity = SeriesIdentity::parse("Season 2");
        assert_eq!(search_title(dir, &identity), "The Office");

        let dir = Path::new("/tv/Foo Season 2");
        let identity = SeriesIdentity::parse("Foo Season 2");
        assert_eq!(search_title(dir, &identity), "Foo");
    }
}
