use super::StreamParser;
use crate::error::StreamError;
use crate::markers;
use crate::sink::RenderSink;

impl StreamParser {
    /// End the stream.
    ///
    /// Only a pending backtick run is resolved. Pending hash, asterisk, and
    /// list-marker runs are dropped, and open blocks and spans are left as
    /// they are. After this, [`feed`](Self::feed) fails until
    /// [`start_stream`](Self::start_stream) is called.
    pub fn finish<S: RenderSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), StreamError> {
        if self.finished {
            return Err(StreamError::AlreadyFinished);
        }
        self.resolve_end(sink);
        Ok(())
    }

    pub(crate) fn resolve_end<S: RenderSink + ?Sized>(&mut self, sink: &mut S) {
        self.finished = true;

        let hashes = self.buffers.hashes.take();
        let asterisks = self.buffers.asterisks.take();
        let list_marker = std::mem::take(&mut self.buffers.list_marker);
        if hashes > 0 || asterisks > 0 || !list_marker.is_empty() {
            log::debug!(
                "discarding unresolved markers at end of stream: \
                 {hashes} hashes, {asterisks} asterisks, list marker {list_marker:?}"
            );
        }

        let ticks = self.buffers.backticks.take();
        if ticks > 0 {
            let outcome = markers::finalize_backticks(ticks, self.state.tick_context());
            log::debug!("{ticks} trailing backticks resolved to {outcome:?}");
            self.apply_tick_outcome(outcome, sink);
        }

        log::debug!(
            "stream finished in {:?} with {} inline spans open",
            self.state,
            self.inline.len()
        );
    }
}
