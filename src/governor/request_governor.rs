use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::{GovernorOptions, UpstreamError, UpstreamRequest, UpstreamResponse, UpstreamTransport};

/// Serializes and paces all calls to the upstream API.
///
/// The governor owns the single piece of shared mutable state in the system:
/// the instant of the most recently issued dispatch. Before every dispatch it
/// waits out any remaining deficit against `min_request_interval`, and after
/// a dispatch that matches the upstream's contention signature (HTTP 500 with
/// a JSON body carrying `Codigo: 10500`) it sleeps `retry_delay` and tries
/// again, up to `max_retries` times.
///
/// # Semantics & Limitations
///
/// **Best-effort concurrency:**
/// - The spacing check (read timestamp, sleep, write timestamp) is not one
///   atomic section
/// - Two concurrent callers can observe the same stale timestamp, wait out
///   the same deficit, and dispatch at effectively the same moment
/// - This is **expected behavior**, not a bug: at the expected call volume a
///   strict single-writer queue is not worth its complexity
///
/// **Sequential guarantee:**
/// - For callers entering one after another, consecutive dispatches are at
///   least `min_request_interval` apart as observed by this component
///
/// **Bounded latency:**
/// - One logical call performs at most `max_retries + 1` dispatch attempts;
///   its worst-case latency is
///   `min_request_interval × (max_retries + 1) + retry_delay × max_retries`
///   plus upstream latency
///
/// **No caching, no cancellation:**
/// - Every dispatch issues an independent upstream call
/// - A call either resolves or fails; the governor never cancels an attempt
pub struct RequestGovernor {
    options: GovernorOptions,
    last_dispatch: Mutex<Option<Instant>>,
}

impl RequestGovernor {
    /// Create a governor with the given tuning.
    ///
    /// The spacing state starts empty, so the first dispatch never waits.
    pub fn new(options: GovernorOptions) -> Self {
        Self {
            options,
            last_dispatch: Mutex::new(None),
        }
    } // end constructor

    /// Issue `request` through `transport`, pacing and retrying as needed.
    ///
    /// # Behavior
    ///
    /// 1. Wait out any remaining spacing deficit, then stamp the dispatch time
    /// 2. Perform the GET through the transport
    /// 3. On a 2xx response, return it verbatim
    /// 4. On the contention signature with budget remaining, sleep
    ///    `retry_delay` and start over from step 1
    /// 5. On anything else (other statuses, transport failures, exhausted
    ///    budget), propagate the failure unchanged
    ///
    /// # Returns
    ///
    /// - `Ok`: the upstream's successful response, untouched
    /// - [`UpstreamError::Rejected`]: non-success status, original status and
    ///   body attached (also the shape of an exhausted retry budget)
    /// - [`UpstreamError::Transport`]: the exchange never completed
    pub async fn dispatch(
        &self,
        transport: &dyn UpstreamTransport,
        request: &UpstreamRequest,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let mut retries_remaining = self.options.max_retries;

        loop {
            self.pace(request).await;

            match transport.get(request).await {
                Ok(response) if response.status().is_success() => return Ok(response),
                Ok(response) if response.is_contention() && retries_remaining > 0 => {
                    let attempt = self.options.max_retries - retries_remaining + 1;
                    warn!(
                        request = request.label(),
                        attempt,
                        max_retries = self.options.max_retries,
                        "upstream rejected concurrent request, retrying"
                    );

                    retries_remaining -= 1;
                    tokio::time::sleep(self.options.retry_delay).await;
                }
                Ok(response) => {
                    return Err(UpstreamError::Rejected {
                        status: response.status(),
                        body: response.into_body(),
                    });
                }
                Err(err) => return Err(err),
            }
        }
    } // end method dispatch

    /// Wait out the spacing deficit, then record now as the dispatch time.
    ///
    /// The read, the sleep and the write are deliberately separate steps;
    /// spacing under concurrent entry is best-effort (see the type docs).
    async fn pace(&self, request: &UpstreamRequest) {
        let deficit = match *self.last_dispatch.lock() {
            None => Duration::ZERO,
            Some(last) => self
                .options
                .min_request_interval
                .saturating_sub(last.elapsed()),
        };

        if !deficit.is_zero() {
            debug!(
                request = request.label(),
                wait_ms = deficit.as_millis() as u64,
                "pacing upstream dispatch"
            );
            tokio::time::sleep(deficit).await;
        }

        *self.last_dispatch.lock() = Some(Instant::now());
    } // end method pace
} // end of impl
