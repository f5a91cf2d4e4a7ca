use std::sync::Arc;

use super::subject::Subject;
use crate::{core::Config, subscribers::Subscribe};

/// Builder for constructing a [`Subject`] with subscribers registered up front.
///
/// The builder holds strong references only until [`build`](Self::build);
/// afterwards the subject keeps weak references, so callers must keep their
/// own `Arc`s alive.
pub struct SubjectBuilder {
    cfg: Config,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl SubjectBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
        }
    }

    /// Adds one subscriber, registered in call order.
    pub fn with_subscriber<S: Subscribe>(mut self, sub: &Arc<S>) -> Self {
        self.subscribers.push(sub.clone());
        self
    }

    /// Adds type-erased subscribers, registered in vector order.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers.extend(subscribers);
        self
    }

    /// Builds the subject and registers every collected subscriber.
    ///
    /// Duplicates collapse into a single registration.
    pub fn build(self) -> Subject {
        let subject = Subject::with_config(self.cfg);
        for sub in &self.subscribers {
            subject.register_dyn(sub);
        }
        subject
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscribers::{AverageSubscriber, LatestValueSubscriber};

    #[test]
    fn test_builder_registers_in_order_and_dedups() {
        let avg = Arc::new(AverageSubscriber::new());
        let latest = Arc::new(LatestValueSubscriber::new());

        let subject = Subject::builder(Config::default())
            .with_subscriber(&avg)
            .with_subscriber(&latest)
            .with_subscribers(vec![avg.clone() as Arc<dyn Subscribe>])
            .build();

        assert_eq!(subject.len(), 2);
        subject.set_value(40);
        assert_eq!(avg.current_average(), Some(40));
        assert_eq!(latest.latest_value(), Some(40));
    }
}
