//! Time source for the gateway: a monotonic reading for transmit deadlines and
//! the cooperative delay that separates poll cycles.
use embassy_time::Instant;
use futures_util::Future;

/// Clock abstraction; implementations wrap `embassy_time`, a HAL timer or a test double.
pub trait GatewayClock {
    /// Current monotonic time.
    fn now(&self) -> Instant;
    /// Asynchronously wait for `millis` milliseconds. The only suspension point of the loop.
    fn delay_ms<'a>(&'a mut self, millis: u32) -> impl Future<Output = ()> + 'a;
}
