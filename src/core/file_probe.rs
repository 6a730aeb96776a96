use crate::domain::model::FileProbeResult;
use std::io;
use std::path::Path;

fn classify(path: &Path, read: io::Result<Vec<u8>>) -> FileProbeResult {
    match read {
        Ok(data) => FileProbeResult::found(data),
        Err(e) if e.kind() == io::ErrorKind::NotFound => FileProbeResult::missing(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read file");
            FileProbeResult::failed(e)
        }
    }
}

/// 讀取 `path` 的完整內容；檔案不存在不算錯誤
pub fn check_and_read_file<P: AsRef<Path>>(path: P) -> FileProbeResult {
    let path = path.as_ref();
    classify(path, std::fs::read(path))
}

pub async fn check_and_read_file_async<P: AsRef<Path>>(path: P) -> FileProbeResult {
    let path = path.as_ref();
    classify(path, tokio::fs::read(path).await)
}
