//! Atomic (temp-file + rename) writes for state files (spec §5, §9).
//!
//! A reader either sees the old file or the new one in full, never a
//! partially-written file — this backs the blob/metadata atomicity
//! invariant on `ChannelState`.

use std::path::Path;

use crate::error::RuntimeError;

/// Serializes `value` as pretty JSON and writes it to `path` atomically:
/// write to `{path}.tmp-{pid}`, then rename over `path`. Creates parent
/// directories on demand.
pub async fn write_json<T>(path: &Path, value: &T) -> Result<(), RuntimeError>
where
    T: serde::Serialize + Sync,
{
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| RuntimeError::io(parent, e))?;
    }

    let bytes =
        serde_json::to_vec_pretty(value).map_err(|e| RuntimeError::corrupt(path, e.to_string()))?;

    let tmp_path = path.with_extension(format!(
        "json.tmp-{}",
        std::process::id()
    ));

    tokio::fs::write(&tmp_path, &bytes)
        .await
        .map_err(|e| RuntimeError::io(&tmp_path, e))?;

    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| RuntimeError::io(path, e))?;

    Ok(())
}

/// Reads and deserializes `path` as JSON. Returns `Ok(None)` when the file
/// does not exist (spec §4.2: "NotFound ... is modeled as a successful null
/// return, not an error").
pub async fn read_json<T>(path: &Path) -> Result<Option<T>, RuntimeError>
where
    T: serde::de::DeserializeOwned,
{
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(RuntimeError::io(path, e)),
    };

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| RuntimeError::corrupt(path, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plugins").join("notes").join("global.json");

        write_json(&path, &json!({"count": 3})).await.unwrap();
        let read: Option<serde_json::Value> = read_json(&path).await.unwrap();
        assert_eq!(read, Some(json!({"count": 3})));
    }

    #[tokio::test]
    async fn missing_file_is_none_not_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let read: Option<serde_json::Value> = read_json(&path).await.unwrap();
        assert_eq!(read, None);
    }

    #[tokio::test]
    async fn corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        tokio::fs::write(&path, b"not json").await.unwrap();
        let result: Result<Option<serde_json::Value>, _> = read_json(&path).await;
        assert!(matches!(result, Err(RuntimeError::CorruptState { .. })));
    }
}
