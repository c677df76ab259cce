use kanal::AsyncSender;
use lughat_core::store::SnapshotCallback;
use lughat_core::types::AppEvent;

/// Callback that forwards store pushes into the event loop.
///
/// The feed is unbounded so `try_send` never drops a snapshot and pushes
/// arrive in the order the store made them.
pub fn store_callback(store_tx: AsyncSender<AppEvent>) -> SnapshotCallback {
    Box::new(move |result| {
        let event = match result {
            Ok(snapshot) => AppEvent::SnapshotReceived(snapshot),
            Err(e) => AppEvent::StoreFailed(e.to_string()),
        };
        match store_tx.try_send(event) {
            Ok(true) => {}
            Ok(false) => tracing::warn!("Store feed full, snapshot dropped"),
            Err(e) => tracing::warn!("Store feed closed: {e}"),
        }
    })
}
