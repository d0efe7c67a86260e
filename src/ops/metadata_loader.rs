use crate::error::{MetadataError, Result};
use crate::types::metadata::{CoverArt, TrackMetadata};
use lofty::{Accessor, PictureType, Probe, TaggedFileExt};
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

/// Reads the raw bytes of the audio resource, independent of the playback stream.
pub fn fetch_bytes(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(MetadataError::FileNotFound(path.to_path_buf()));
    }
    Ok(std::fs::read(path)?)
}

/// Parses embedded tags out of an in-memory audio file.
pub fn parse_tags(bytes: Vec<u8>) -> Result<TrackMetadata> {
    let tagged_file = Probe::new(Cursor::new(bytes)).guess_file_type()?.read()?;

    let tag = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag())
        .ok_or(MetadataError::NoTag)?;

    let pictures = tag.pictures();
    let cover_art = pictures
        .iter()
        .find(|p| matches!(p.pic_type(), PictureType::CoverFront))
        .or_else(|| pictures.first())
        .map(|picture| CoverArt {
            mime_type: picture.mime_type().map(|m| m.as_str().to_string()),
            data: picture.data().to_vec(),
        });

    Ok(TrackMetadata {
        title: tag.title().map(|s| s.to_string()),
        artist: tag.artist().map(|s| s.to_string()),
        album: tag.album().map(|s| s.to_string()),
        cover_art,
    })
}

pub fn load_metadata(path: &Path) -> Result<TrackMetadata> {
    parse_tags(fetch_bytes(path)?)
}

/// A one-shot background load. Once cancelled (or dropped) its result is never
/// handed out, even if the worker finishes afterwards.
pub struct MetadataTask {
    receiver: Receiver<Result<TrackMetadata>>,
    alive: Arc<AtomicBool>,
    finished: bool,
}

impl MetadataTask {
    pub fn spawn<F>(job: F) -> Self
    where
        F: FnOnce() -> Result<TrackMetadata> + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel();
        let alive = Arc::new(AtomicBool::new(true));
        let worker_alive = alive.clone();

        thread::spawn(move || {
            let result = job();
            if worker_alive.load(Ordering::Acquire) {
                // The receiver may already be gone; nothing to do then.
                let _ = sender.send(result);
            }
        });

        Self {
            receiver,
            alive,
            finished: false,
        }
    }

    pub fn for_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        Self::spawn(move || load_metadata(&path))
    }

    /// Non-blocking. Yields the result exactly once.
    pub fn poll(&mut self) -> Option<Result<TrackMetadata>> {
        if self.finished || !self.is_alive() {
            return None;
        }
        match self.receiver.try_recv() {
            Ok(result) => {
                self.finished = true;
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.finished = true;
                Some(Err(MetadataError::Disconnected))
            }
        }
    }

    pub fn cancel(&mut self) {
        self.alive.store(false, Ordering::Release);
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    #[cfg(test)]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Shared view of the liveness flag, for observing cancellation from
    /// outside the owner.
    #[cfg(test)]
    pub fn liveness(&self) -> Arc<AtomicBool> {
        self.alive.clone()
    }
}

impl Drop for MetadataTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel;
    use std::time::{Duration, Instant};

    fn wait_for(task: &mut MetadataTask) -> Option<Result<TrackMetadata>> {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if let Some(result) = task.poll() {
                return Some(result);
            }
            thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn test_task_delivers_result_once() {
        let mut task = MetadataTask::spawn(|| {
            Ok(TrackMetadata {
                title: Some("Outdate".to_string()),
                ..Default::default()
            })
        });
        let meta = wait_for(&mut task).unwrap().unwrap();
        assert_eq!(meta.title.as_deref(), Some("Outdate"));
        assert!(task.is_finished());
        assert!(task.poll().is_none());
    }

    #[test]
    fn test_cancelled_task_never_yields() {
        let (release_tx, release_rx) = channel::<()>();
        let mut task = MetadataTask::spawn(move || {
            let _ = release_rx.recv();
            Ok(TrackMetadata::default())
        });
        task.cancel();
        release_tx.send(()).unwrap();
        thread::sleep(Duration::from_millis(50));
        assert!(task.poll().is_none());
        assert!(!task.is_finished());
    }

    #[test]
    fn test_missing_file_is_reported() {
        let mut task = MetadataTask::for_path("/definitely/not/here.mp3");
        let result = wait_for(&mut task).unwrap();
        assert!(matches!(result, Err(MetadataError::FileNotFound(_))));
    }

    #[test]
    fn test_garbage_bytes_fail_to_parse() {
        let result = parse_tags(b"this is not an audio file".to_vec());
        assert!(result.is_err());
    }

    #[test]
    fn test_fetch_bytes_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("track.bin");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();
        assert_eq!(fetch_bytes(&path).unwrap(), vec![1, 2, 3]);
    }
}
