//! Stream copiers for a running child.

use std::io::{self, ErrorKind, Read};

use once_cell::sync::Lazy;
use tokio::io::{AsyncWriteExt, copy};
use tokio::process::{ChildStderr, ChildStdin, ChildStdout};
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, warn};

use super::StdinSource;

pub(super) enum Sink {
    Stdout,
    File(tokio::fs::File),
}

pub(super) async fn drain_stdout(mut from: ChildStdout, sink: Sink) -> io::Result<u64> {
    match sink {
        Sink::Stdout => {
            let mut out = tokio::io::stdout();
            let n = copy(&mut from, &mut out).await?;
            out.flush().await?;
            Ok(n)
        }
        Sink::File(mut file) => {
            let n = copy(&mut from, &mut file).await?;
            // tokio files complete writes in the background until flushed
            file.flush().await?;
            Ok(n)
        }
    }
}

pub(super) async fn drain_stderr(mut from: ChildStderr) -> io::Result<u64> {
    let mut err = tokio::io::stderr();
    let n = copy(&mut from, &mut err).await?;
    err.flush().await?;
    Ok(n)
}

/// Best effort: a child that exits or closes stdin early just ends the feed.
pub(super) async fn feed_stdin(mut pipe: ChildStdin, source: StdinSource) -> io::Result<u64> {
    let fed = match source {
        StdinSource::Null => Ok(0),
        StdinSource::Bytes(bytes) => pipe.write_all(&bytes).await.map(|_| bytes.len() as u64),
        StdinSource::Inherit => forward_caller_stdin(&mut pipe).await,
    };
    match &fed {
        Ok(bytes) => debug!(bytes, "stdin closed"),
        Err(e) => debug!(error = %e, "stdin feed ended"),
    }
    // dropping the pipe closes the child's stdin
    drop(pipe);
    fed
}

/// The caller's stdin, read by a single thread for the whole process.
///
/// A blocking read on an idle terminal cannot be cancelled, so instead of a
/// reader per invocation there is one pump; each invocation borrows the
/// receiving end while its child runs and hands it back when aborted.
static CALLER_STDIN: Lazy<Mutex<mpsc::Receiver<Vec<u8>>>> = Lazy::new(|| {
    let (tx, rx) = mpsc::channel(16);
    let spawned = std::thread::Builder::new()
        .name("tropo-stdin".into())
        .spawn(move || pump_stdin(tx));
    if let Err(e) = spawned {
        warn!(error = %e, "failed to start stdin reader, children will see EOF");
    }
    Mutex::new(rx)
});

fn pump_stdin(tx: mpsc::Sender<Vec<u8>>) {
    let mut stdin = io::stdin().lock();
    let mut buf = vec![0u8; 8192];
    loop {
        match stdin.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                if tx.blocking_send(buf[..n].to_vec()).is_err() {
                    break;
                }
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                debug!(error = %e, "stdin read failed");
                break;
            }
        }
    }
}

async fn forward_caller_stdin(pipe: &mut ChildStdin) -> io::Result<u64> {
    let mut rx = CALLER_STDIN.lock().await;
    let mut total = 0u64;
    while let Some(chunk) = rx.recv().await {
        pipe.write_all(&chunk).await?;
        pipe.flush().await?;
        total += chunk.len() as u64;
    }
    Ok(total)
}
