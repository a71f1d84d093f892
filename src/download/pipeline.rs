//! Fetch, extract and merge pipeline.
//!
//! The archive is streamed into a [`NamedTempFile`] created inside the output
//! directory. The temp file is removed when its guard drops, which covers every
//! failure path; the only explicit release is `persist` when the archive is kept.

use std::path::{Path, PathBuf};

use futures::{Stream, StreamExt};
use indicatif::ProgressBar;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;

use crate::api::AihubClient;
use crate::config::validate_dataset_key;
use crate::download::extract::unpack_archive;
use crate::download::merge::{merge_part_files, substitute_merged};
use crate::download::request::DownloadRequest;
use crate::download::result::DownloadResult;
use crate::error::{Error, Result};
use crate::fs::{archive_file_name, ensure_dir, resolve_output_dir};
use crate::output::create_download_bar;

/// Prefix of in-flight archive files.
const TEMP_PREFIX: &str = ".aihub-";

/// Run one download from request to result.
pub async fn run(client: &AihubClient, request: &DownloadRequest) -> Result<DownloadResult> {
    validate_dataset_key(&request.dataset_key)?;

    let output_dir = resolve_output_dir(
        request.output_dir.as_deref(),
        &client.config().download_dir,
    );
    let file_keys = request.file_keys.resolve();

    execute(client, request, &output_dir, &file_keys)
        .await
        .map_err(|e| Error::pipeline(&request.dataset_key, e))
}

async fn execute(
    client: &AihubClient,
    request: &DownloadRequest,
    output_dir: &Path,
    file_keys: &str,
) -> Result<DownloadResult> {
    ensure_dir(output_dir)?;

    let temp = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(".tar")
        .tempfile_in(output_dir)?;
    tracing::debug!("Streaming {} into {}", request.dataset_key, temp.path().display());

    let response = client.open_download(&request.dataset_key, file_keys).await?;

    let progress = match response.content_length() {
        Some(total) if request.show_progress && total > 0 => {
            Some(create_download_bar(
                total,
                &format!("Downloading {}", request.dataset_key),
            ))
        }
        _ => None,
    };

    let stream = response
        .bytes_stream()
        .map(|chunk| chunk.map_err(|e| client.transport_error(e)));
    let downloaded = stream_to_file(stream, &temp, progress).await?;
    tracing::info!("Received {} bytes for dataset {}", downloaded, request.dataset_key);

    let files = if request.extract {
        let dir = output_dir.to_path_buf();
        tokio::task::spawn_blocking(move || extract_and_merge(temp, &dir))
            .await
            .map_err(|e| Error::Extraction(format!("Extraction task failed: {}", e)))??
    } else {
        let final_path = output_dir.join(archive_file_name(&request.dataset_key)?);
        temp.persist(&final_path).map_err(|e| e.error)?;
        vec![final_path]
    };

    Ok(DownloadResult::completed(
        &request.dataset_key,
        file_keys.to_string(),
        downloaded,
        output_dir.to_path_buf(),
        files,
    ))
}

/// Write every chunk of `stream` to `temp` in order, returning the byte count.
pub(crate) async fn stream_to_file<S, B>(
    mut stream: S,
    temp: &NamedTempFile,
    progress: Option<ProgressBar>,
) -> Result<u64>
where
    S: Stream<Item = Result<B>> + Unpin,
    B: AsRef<[u8]>,
{
    let mut file = tokio::fs::File::from_std(temp.as_file().try_clone()?);
    let mut downloaded: u64 = 0;

    let outcome = async {
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            let bytes = chunk.as_ref();
            file.write_all(bytes).await?;
            downloaded += bytes.len() as u64;

            if let Some(ref pb) = progress {
                pb.set_position(downloaded);
            }
        }
        file.flush().await?;
        Ok::<_, Error>(())
    }
    .await;

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    outcome.map(|()| downloaded)
}

/// Blocking half of the pipeline. `temp` is dropped, and so deleted, on return.
fn extract_and_merge(temp: NamedTempFile, output_dir: &Path) -> Result<Vec<PathBuf>> {
    let members = unpack_archive(temp.path(), output_dir)?;
    let merged = merge_part_files(output_dir)?;
    Ok(substitute_merged(members, &merged))
}
