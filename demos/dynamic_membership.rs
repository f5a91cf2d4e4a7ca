//! # Example: dynamic_membership
//!
//! Demonstrates subscribers joining and leaving while grades flow, including
//! a subscriber that leaves from inside its own callback.
//!
//! ## Flow
//! ```text
//! t=0  register average, latest, quitter
//! t=1  set_value(..)  ──► quitter unregisters itself (still gets this pass)
//! t=2  set_value(..)  ──► quitter is gone
//! t=3  unregister latest
//! t=4  set_value(..)  ──► only average
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example dynamic_membership
//! ```

use std::sync::{Arc, Weak};

use gradecast::{
    AverageSubscriber, Grade, GradeSource, LatestValueSubscriber, RandomGrades, Subject,
    Subscribe, UpdateError,
};
use parking_lot::Mutex;

/// Takes one grade, then unsubscribes.
struct Quitter {
    subject: Subject,
    me: Mutex<Weak<Quitter>>,
}

impl Subscribe for Quitter {
    fn on_update(&self, grade: Grade) -> Result<(), UpdateError> {
        println!("[quitter] got {grade}, leaving");
        if let Some(me) = self.me.lock().upgrade() {
            self.subject.unregister(&me);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "quitter"
    }
}

fn main() {
    let subject = Subject::new();
    let average = Arc::new(AverageSubscriber::new());
    let latest = Arc::new(LatestValueSubscriber::new());
    let quitter = Arc::new(Quitter {
        subject: subject.clone(),
        me: Mutex::new(Weak::new()),
    });
    *quitter.me.lock() = Arc::downgrade(&quitter);

    subject.register(&average);
    subject.register(&latest);
    subject.register(&quitter);

    let mut grades = RandomGrades::seeded(2024);
    let mut push = |label: &str| {
        let Some(grade) = grades.next_grade() else {
            return;
        };
        let report = subject.set_value(grade);
        println!(
            "[{label}] pass={} grade={grade} recipients={} | {average} | {latest}",
            report.pass, report.recipients
        );
    };

    push("t=1");
    push("t=2");
    subject.unregister(&latest);
    push("t=4");

    println!("final: {subject:?}");
}
