//! Path producer stage

use anyhow::{Context, Result};
use crossbeam::channel::{Receiver, bounded};
use crossbeam::select;
use std::path::PathBuf;
use std::thread;

use crate::parallel::CancellationToken;

/// Send `paths` in order on a bounded queue from a dedicated thread.
///
/// The queue closes once every path was sent, once cancellation fires, or
/// once all receivers are gone, whichever comes first.
pub fn feed_paths(
    paths: Vec<PathBuf>,
    buffer: usize,
    cancel: CancellationToken,
) -> Result<Receiver<PathBuf>> {
    let (path_tx, path_rx) = bounded(buffer);

    thread::Builder::new()
        .name("wordtally-feeder".to_string())
        .spawn(move || {
            let total = paths.len();
            let mut sent = 0usize;

            for path in paths {
                if cancel.is_cancelled() {
                    break;
                }
                select! {
                    send(path_tx, path) -> res => {
                        if res.is_err() {
                            break; // Workers dropped
                        }
                        sent += 1;
                    }
                    recv(cancel.signal()) -> _ => break,
                }
            }

            if sent < total {
                tracing::debug!("Path feeder stopped early after {sent}/{total} paths");
            }
            // path_tx drops here, closing the queue
        })
        .context("Failed to spawn path feeder thread")?;

    Ok(path_rx)
}
