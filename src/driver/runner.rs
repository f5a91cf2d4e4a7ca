//! # Driver: trigger loop around one subject.
//!
//! ## Architecture
//! ```text
//! loop {
//!   ├─► wait for next trigger (cancellable)
//!   │     ├─ token cancelled  → Cancelled, exit
//!   │     ├─ stream ended     → TriggersClosed, exit
//!   │     ├─ Command::Graduate → Graduated, exit
//!   │     └─ Command::Next
//!   ├─► grade = source.next_grade()
//!   │     └─ None → SourceExhausted, exit
//!   ├─► report = subject.set_value(grade)
//!   └─► on_pass(&report)
//! }
//! ```
//!
//! ## Rules
//! - Passes run **sequentially** within one driver (never parallel)
//! - Cancellation is checked between passes only; a pass always completes
//! - The driver does not stop on subscriber failures; they are counted

use std::time::Duration;

use futures::stream::{self, BoxStream, Stream, StreamExt};
use tokio::select;
use tokio_util::sync::CancellationToken;

use crate::core::{PassReport, Subject};
use crate::source::GradeSource;

/// External trigger for the driving loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Produce and push the next grade.
    Next,
    /// Stop the loop.
    Graduate,
}

/// Why a driver loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A [`Command::Graduate`] was received.
    Graduated,
    /// The trigger stream ended.
    TriggersClosed,
    /// The grade source returned `None`.
    SourceExhausted,
    /// The cancellation token fired.
    Cancelled,
}

/// Totals for one driver run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverSummary {
    /// Passes this driver triggered.
    pub passes: u64,
    /// Delivery failures reported across those passes.
    pub failures: usize,
    /// Exit condition.
    pub reason: StopReason,
}

/// Pushes grades from a [`GradeSource`] into a [`Subject`] on each trigger.
pub struct Driver<G> {
    subject: Subject,
    source: G,
}

impl<G: GradeSource> Driver<G> {
    /// Creates a driver for `subject` fed by `source`.
    pub fn new(subject: Subject, source: G) -> Self {
        Self { subject, source }
    }

    /// Subject this driver pushes into.
    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    /// Runs until an exit condition; see [`StopReason`].
    pub async fn run<T>(self, triggers: T, token: CancellationToken) -> DriverSummary
    where
        T: Stream<Item = Command> + Unpin,
    {
        self.run_with(triggers, token, |_| {}).await
    }

    /// Like [`run`](Self::run), calling `on_pass` after every pass.
    ///
    /// `on_pass` is the place to render subscriber state: it runs after all
    /// subscribers have seen the value.
    pub async fn run_with<T, F>(
        mut self,
        mut triggers: T,
        token: CancellationToken,
        mut on_pass: F,
    ) -> DriverSummary
    where
        T: Stream<Item = Command> + Unpin,
        F: FnMut(&PassReport),
    {
        let mut passes: u64 = 0;
        let mut failures: usize = 0;

        let reason = loop {
            let cmd = select! {
                biased;
                _ = token.cancelled() => break StopReason::Cancelled,
                cmd = triggers.next() => cmd,
            };
            match cmd {
                None => break StopReason::TriggersClosed,
                Some(Command::Graduate) => break StopReason::Graduated,
                Some(Command::Next) => {}
            }

            let Some(grade) = self.source.next_grade() else {
                break StopReason::SourceExhausted;
            };
            let report = self.subject.set_value(grade);
            passes += 1;
            failures += report.failures.len();
            on_pass(&report);
        };

        tracing::info!(passes, failures, ?reason, "driver stopped");
        DriverSummary {
            passes,
            failures,
            reason,
        }
    }
}

/// Endless stream of [`Command::Next`], one per `period`.
///
/// The first tick fires immediately.
pub fn ticks(period: Duration) -> BoxStream<'static, Command> {
    let interval = tokio::time::interval(period);
    stream::unfold(interval, |mut interval| async move {
        interval.tick().await;
        Some((Command::Next, interval))
    })
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{RandomGrades, ScriptedGrades};
    use crate::subscribers::{AverageSubscriber, LatestValueSubscriber};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_graduate_stops_loop() {
        let subject = Subject::new();
        let avg = Arc::new(AverageSubscriber::new());
        let latest = Arc::new(LatestValueSubscriber::new());
        subject.register(&avg);
        subject.register(&latest);

        let triggers = stream::iter([
            Command::Next,
            Command::Next,
            Command::Graduate,
            Command::Next,
        ]);
        let mut rendered = Vec::new();
        let summary = Driver::new(subject.clone(), ScriptedGrades::new([10, 20, 30]))
            .run_with(triggers, CancellationToken::new(), |report| {
                rendered.push((report.value, avg.current_average()));
            })
            .await;

        assert_eq!(summary.reason, StopReason::Graduated);
        assert_eq!(summary.passes, 2);
        assert_eq!(rendered, vec![(10, Some(10)), (20, Some(15))]);
        assert_eq!(latest.latest_value(), Some(20));
    }

    #[tokio::test]
    async fn test_source_exhaustion_and_closed_triggers() {
        let exhausted = Driver::new(Subject::new(), ScriptedGrades::new([1]))
            .run(stream::iter([Command::Next, Command::Next]), CancellationToken::new())
            .await;
        assert_eq!(exhausted.reason, StopReason::SourceExhausted);
        assert_eq!(exhausted.passes, 1);

        let closed = Driver::new(Subject::new(), ScriptedGrades::new([1, 2, 3]))
            .run(stream::iter([Command::Next]), CancellationToken::new())
            .await;
        assert_eq!(closed.reason, StopReason::TriggersClosed);
        assert_eq!(closed.passes, 1);
    }

    #[tokio::test]
    async fn test_cancelled_token_wins_over_pending_triggers() {
        let token = CancellationToken::new();
        token.cancel();

        let summary = Driver::new(Subject::new(), RandomGrades::seeded(1))
            .run(stream::repeat(Command::Next), token)
            .await;

        assert_eq!(summary.reason, StopReason::Cancelled);
        assert_eq!(summary.passes, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_drive_seeded_grades_in_range() {
        let subject = Subject::new();
        let latest = Arc::new(LatestValueSubscriber::new());
        subject.register(&latest);

        let summary = Driver::new(subject.clone(), RandomGrades::seeded(99))
            .run(ticks(Duration::from_secs(1)).take(3), CancellationToken::new())
            .await;

        assert_eq!(summary.passes, 3);
        assert_eq!(subject.passes(), 3);
        let last = latest.latest_value().unwrap();
        assert!((1..=100).contains(&last));
    }
}
