use std::{
    ops::{Deref, DerefMut},
    time::{Duration, Instant},
};

pub struct TimedResult<T> {
    pub res: T,
    pub elapsed: Duration,
}

impl<T> Deref for TimedResult<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.res
    }
}

impl<T> DerefMut for TimedResult<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.res
    }
}

pub fn timed_scope<R, F: FnOnce() -> R>(f: F) -> TimedResult<R> {
    let begin = Instant::now();
    let res = f();

    let elapsed = begin.elapsed();

    TimedResult { res, elapsed }
}

pub fn timed_scope_log<R, F: FnOnce() -> R>(label: &'static str, f: F) -> TimedResult<R> {
    let time_res = timed_scope(f);
    log::log!(target: "scoped timer", log::Level::Info, "{}: {}", label, format_elapsed(time_res.elapsed));
    time_res
}

pub fn format_elapsed(elapsed: Duration) -> String {
    if elapsed < Duration::from_millis(1) {
        let micro = elapsed.as_secs_f32() * 1000. * 1000.;
        format!("{micro:.3}µs")
    } else if elapsed < Duration::from_secs(1) {
        let milli = elapsed.as_secs_f32() * 1000.;
        format!("{milli:.3}ms")
    } else if elapsed < Duration::from_secs(60) {
        let s = elapsed.as_secs_f32();
        format!("{s:.3}s")
    } else {
        // Minutes and more
        let elapsed_secs = elapsed.as_secs();
        let h = elapsed_secs / 3600;
        let m = (elapsed_secs / 60) % 60;
        let s = elapsed_secs % 60;
        format!("{h}h{m}m{s}s")
    }
}
