use std::collections::VecDeque;

use super::GradeSource;
use crate::Grade;

/// Yields a fixed sequence of grades, then `None`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedGrades {
    queue: VecDeque<Grade>,
}

impl ScriptedGrades {
    /// Creates a source that yields `grades` in order.
    pub fn new(grades: impl IntoIterator<Item = Grade>) -> Self {
        Self {
            queue: grades.into_iter().collect(),
        }
    }

    /// Grades not yet produced.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl GradeSource for ScriptedGrades {
    fn next_grade(&mut self) -> Option<Grade> {
        self.queue.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yields_in_order_then_exhausts() {
        let mut src = ScriptedGrades::new([10, 20, 30]);
        assert_eq!(src.next_grade(), Some(10));
        assert_eq!(src.remaining(), 2);
        assert_eq!(src.next_grade(), Some(20));
        assert_eq!(src.next_grade(), Some(30));
        assert_eq!(src.next_grade(), None);
    }
}
