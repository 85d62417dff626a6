//! Bounded undo/redo history
//!
//! [`HistoryStack`] is a linear buffer of snapshots with a cursor. Pushing
//! after stepping back abandons the redo branch; pushing past `max_length`
//! evicts the oldest snapshot.
//!
//! ```text
//! push A, B, C        [A B C]   index 2
//! back                [A B C]   index 1
//! push D              [A B D]   index 2   (C abandoned)
//! ```
//!
//! The stack is generic over the snapshot type. The editor stores
//! [`LiveSet`](crate::life::LiveSet) snapshots with their generation, not the
//! surrounding UI state.

use crate::errors::LifeError;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct HistoryStack<T> {
    entries: VecDeque<T>,
    index: usize,
    max_length: usize,
}

impl<T> HistoryStack<T> {
    pub fn new(max_length: usize) -> Result<Self, LifeError> {
        if max_length == 0 {
            return Err(LifeError::InvalidHistoryLength {
                requested: max_length,
            });
        }
        Ok(HistoryStack {
            entries: VecDeque::new(),
            index: 0,
            max_length,
        })
    }

    /// Record a new snapshot as the current state
    pub fn push_state(&mut self, snapshot: T) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.index + 1);
        }
        self.entries.push_back(snapshot);
        self.index = self.entries.len() - 1;

        if self.entries.len() > self.max_length {
            self.entries.pop_front();
            self.index -= 1;
        }
    }

    /// Step to the previous snapshot
    pub fn back(&mut self) -> Result<&T, LifeError> {
        if self.entries.is_empty() || self.index == 0 {
            return Err(self.out_of_range());
        }
        self.index -= 1;
        Ok(&self.entries[self.index])
    }

    /// Step to the next snapshot
    pub fn forward(&mut self) -> Result<&T, LifeError> {
        if self.index + 1 >= self.entries.len() {
            return Err(self.out_of_range());
        }
        self.index += 1;
        Ok(&self.entries[self.index])
    }

    /// Snapshot at the cursor, `None` when nothing has been pushed
    pub fn state(&self) -> Option<&T> {
        self.entries.get(self.index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Change the bound, evicting the oldest snapshots if it shrinks below `len`
    pub fn set_max_length(&mut self, max_length: usize) -> Result<(), LifeError> {
        if max_length == 0 {
            return Err(LifeError::InvalidHistoryLength {
                requested: max_length,
            });
        }
        self.max_length = max_length;

        let excess = self.entries.len().saturating_sub(max_length);
        self.entries.drain(..excess);
        self.index = self.index.saturating_sub(excess);
        Ok(())
    }

    fn out_of_range(&self) -> LifeError {
        LifeError::HistoryOutOfRange {
            index: self.index,
            len: self.entries.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(max_length: usize, values: &[i32]) -> HistoryStack<i32> {
        let mut history = HistoryStack::new(max_length).unwrap();
        for &v in values {
            history.push_state(v);
        }
        history
    }

    #[test]
    fn test_empty_stack() {
        let mut history: HistoryStack<i32> = HistoryStack::new(3).unwrap();
        assert_eq!(history.state(), None);
        assert_eq!(history.len(), 0);
        assert!(history.back().is_err());
        assert!(history.forward().is_err());
    }

    #[test]
    fn test_zero_length_rejected() {
        assert!(matches!(
            HistoryStack::<i32>::new(0),
            Err(LifeError::InvalidHistoryLength { requested: 0 })
        ));
        let mut history = filled(2, &[1]);
        assert!(history.set_max_length(0).is_err());
        assert_eq!(history.max_length(), 2);
    }

    #[test]
    fn test_back_and_forward() {
        let mut history = filled(5, &[1, 2, 3]);
        assert_eq!(history.state(), Some(&3));
        assert_eq!(history.back().copied().unwrap(), 2);
        assert_eq!(history.back().copied().unwrap(), 1);
        assert!(matches!(
            history.back(),
            Err(LifeError::HistoryOutOfRange { index: 0, len: 3 })
        ));
        assert_eq!(history.index(), 0);
        assert_eq!(history.forward().copied().unwrap(), 2);
        assert_eq!(history.forward().copied().unwrap(), 3);
        assert!(history.forward().is_err());
        assert_eq!(history.index(), 2);
    }

    #[test]
    fn test_overflow_evicts_oldest() {
        let history = filled(3, &[1, 2, 3, 4]);
        assert_eq!(history.len(), 3);
        assert_eq!(history.state(), Some(&4));
        assert_eq!(history.index(), 2);
        assert_eq!(history.entries.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
    }

    #[test]
    fn test_push_after_back_drops_redo() {
        let mut history = filled(5, &[1, 2, 3]);
        history.back().unwrap();
        history.back().unwrap();
        history.push_state(9);
        assert_eq!(history.entries.iter().copied().collect::<Vec<_>>(), vec![1, 9]);
        assert!(!history.can_go_forward());
        assert_eq!(history.state(), Some(&9));
    }

    #[test]
    fn test_shrink_max_length() {
        let mut history = filled(5, &[1, 2, 3, 4, 5]);
        history.back().unwrap();
        history.set_max_length(2).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.state(), Some(&4));
        assert_eq!(history.index(), 0);
    }
}
