//! # Grade sources.
//!
//! A [`GradeSource`] produces the values a driver pushes into a
//! [`Subject`](crate::Subject). Sources are injected, never hard-coded, so
//! runs can be reproduced.
//!
//! - [`RandomGrades`] - uniform grades in a closed range, seedable
//! - [`ScriptedGrades`] - a fixed sequence, then exhaustion

mod random;
mod scripted;

pub use random::RandomGrades;
pub use scripted::ScriptedGrades;

use crate::Grade;

/// Producer of grades.
pub trait GradeSource: Send {
    /// Next grade, or `None` once the source is exhausted.
    fn next_grade(&mut self) -> Option<Grade>;
}

impl<S: GradeSource + ?Sized> GradeSource for Box<S> {
    fn next_grade(&mut self) -> Option<Grade> {
        (**self).next_grade()
    }
}
