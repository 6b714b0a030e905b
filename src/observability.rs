use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("mobileguru.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("mobileguru.client.request_errors");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("mobileguru.client.request_duration_seconds");

// The retry policy wraps calls from both the chat client and the relay
// server, so its metrics live in their own family.
pub(crate) static RETRY_ATTEMPTS: Counter = Counter::new("mobileguru.retry.attempts");
pub(crate) static RETRY_BACKOFF: Moments = Moments::new("mobileguru.retry.backoff_seconds");

pub(crate) static RELAY_REQUESTS: Counter = Counter::new("mobileguru.relay.requests");
pub(crate) static RELAY_FAILURES: Counter = Counter::new("mobileguru.relay.failures");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);

    collector.register_counter(&RETRY_ATTEMPTS);
    collector.register_moments(&RETRY_BACKOFF);

    collector.register_counter(&RELAY_REQUESTS);
    collector.register_counter(&RELAY_FAILURES);
}
