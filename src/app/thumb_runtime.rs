//! Background thumbnail decoding.
//!
//! Worker threads pull jobs from a shared queue, decode and downscale each
//! image to its card size, and send the result back over a channel so the
//! UI thread never blocks on image I/O.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc::UnboundedSender;

use crate::app::strip::Strip;
use crate::error::StripError;

#[derive(Debug)]
pub enum ThumbUpdate {
    Ready {
        strip: usize,
        item: usize,
        image: Arc<image::RgbaImage>,
    },
    Failed {
        strip: usize,
        item: usize,
        error: String,
    },
}

struct ThumbJob {
    strip: usize,
    item: usize,
    path: PathBuf,
    /// Target size in pixels (one column = 1 px, one row = 2 px).
    width_px: u32,
    height_px: u32,
}

/// Handle to a running set of decode workers.
pub struct ThumbLoader {
    cancel: Arc<AtomicBool>,
    workers: usize,
}

impl ThumbLoader {
    pub fn request_cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn worker_count(&self) -> usize {
        self.workers
    }
}

/// Queue a decode job for every card and start the workers.
pub fn spawn_thumbnail_workers(strips: &[Strip], tx: &UnboundedSender<ThumbUpdate>) -> ThumbLoader {
    let mut jobs = VecDeque::new();
    for (strip_idx, strip) in strips.iter().enumerate() {
        let height_px = u32::from(strip.sizing.thumb_rows) * 2;
        for (item_idx, item) in strip.items.iter().enumerate() {
            jobs.push_back(ThumbJob {
                strip: strip_idx,
                item: item_idx,
                path: item.entry.path.clone(),
                width_px: u32::from(item.thumb_cols),
                height_px,
            });
        }
    }

    let cancel = Arc::new(AtomicBool::new(false));
    let job_count = jobs.len();
    let queue = Arc::new(Mutex::new(jobs));

    let max_threads = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
        .max(1);
    let worker_count = if job_count == 0 {
        0
    } else {
        max_threads.min(job_count)
    };

    for _ in 0..worker_count {
        let queue = Arc::clone(&queue);
        let tx = tx.clone();
        let cancel = Arc::clone(&cancel);
        std::thread::spawn(move || loop {
            if cancel.load(Ordering::Relaxed) {
                break;
            }
            let job = {
                let mut q = match queue.lock() {
                    Ok(guard) => guard,
                    Err(_) => break,
                };
                match q.pop_front() {
                    Some(j) => j,
                    None => break,
                }
            };

            let update = match decode_thumbnail(&job) {
                Ok(image) => ThumbUpdate::Ready {
                    strip: job.strip,
                    item: job.item,
                    image: Arc::new(image),
                },
                Err(e) => {
                    tracing::warn!("thumbnail failed: {e}");
                    ThumbUpdate::Failed {
                        strip: job.strip,
                        item: job.item,
                        error: e.to_string(),
                    }
                }
            };
            if tx.send(update).is_err() {
                break; // receiver dropped
            }
        });
    }

    ThumbLoader {
        cancel,
        workers: worker_count,
    }
}

fn decode_thumbnail(job: &ThumbJob) -> crate::error::Result<image::RgbaImage> {
    let img = image::ImageReader::open(&job.path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| StripError::io(&job.path, e))?
        .decode()
        .map_err(|e| StripError::image(&job.path, e))?;
    Ok(img
        .thumbnail(job.width_px.max(1), job.height_px.max(1))
        .to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::strip::ItemSizing;
    use crate::core::scan::ImageEntry;

    fn entry(path: PathBuf, w: u32, h: u32) -> ImageEntry {
        ImageEntry {
            name: path.display().to_string(),
            path,
            width_px: w,
            height_px: h,
        }
    }

    #[test]
    fn test_workers_decode_and_report_failures() {
        let tmp = tempfile::tempdir().unwrap();
        let good = tmp.path().join("good.png");
        image::RgbaImage::from_pixel(64, 32, image::Rgba([200, 10, 10, 255]))
            .save(&good)
            .unwrap();
        let bad = tmp.path().join("bad.png");
        std::fs::write(&bad, b"garbage").unwrap();

        let sizing = ItemSizing {
            thumb_rows: 4,
            min_cols: 2,
            max_cols: 40,
        };
        let strip = Strip::new(
            tmp.path().to_path_buf(),
            vec![entry(good, 64, 32), entry(bad, 10, 10)],
            sizing,
            0.3,
        )
        .unwrap();

        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let loader = spawn_thumbnail_workers(std::slice::from_ref(&strip), &tx);
        drop(tx);
        assert!(loader.worker_count() >= 1);

        let mut ready = None;
        let mut failed = None;
        while let Some(update) = rx.blocking_recv() {
            match update {
                ThumbUpdate::Ready { item, image, .. } => ready = Some((item, image)),
                ThumbUpdate::Failed { item, .. } => failed = Some(item),
            }
        }

        let (item, image) = ready.expect("good image decoded");
        assert_eq!(item, 0);
        // 64x32 scaled into 16x8 keeps its 2:1 aspect.
        assert_eq!((image.width(), image.height()), (16, 8));
        assert_eq!(failed, Some(1));
    }

    #[test]
    fn test_no_jobs_no_workers() {
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        let loader = spawn_thumbnail_workers(&[], &tx);
        assert_eq!(loader.worker_count(), 0);
    }
}
