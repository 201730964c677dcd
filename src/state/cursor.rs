use crate::error::{Error, Result};

/// Bounded index over `[min, max)` that wraps around in both directions,
/// optionally carrying one label per position.
#[derive(Debug, Clone)]
pub struct Cursor<T> {
    index: usize,
    min: usize,
    max: usize,
    mapping: Option<Vec<T>>,
}

impl<T> Cursor<T> {
    /// Create a cursor positioned at `min`.
    pub fn new(min: usize, max: usize) -> Result<Self> {
        if min >= max {
            return Err(Error::EmptyRange { min, max });
        }
        Ok(Self {
            index: min,
            min,
            max,
            mapping: None,
        })
    }

    /// Cursor over `0..labels.len()` with the labels already attached.
    pub fn over(labels: Vec<T>) -> Result<Self> {
        let mut cursor = Self::new(0, labels.len())?;
        cursor.set_mapping(labels)?;
        Ok(cursor)
    }

    pub fn get(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.max - self.min
    }

    pub fn set(&mut self, index: usize) -> Result<()> {
        if index < self.min || index >= self.max {
            return Err(Error::OutOfRange {
                index,
                min: self.min,
                max: self.max,
            });
        }
        self.index = index;
        Ok(())
    }

    pub fn increment(&mut self) {
        self.index = if self.index + 1 >= self.max {
            self.min
        } else {
            self.index + 1
        };
    }

    pub fn decrement(&mut self) {
        self.index = if self.index <= self.min {
            self.max - 1
        } else {
            self.index - 1
        };
    }

    /// Attach one label per position. The list must cover the whole range.
    pub fn set_mapping(&mut self, labels: Vec<T>) -> Result<()> {
        if labels.len() != self.len() {
            return Err(Error::LengthMismatch {
                expected: self.len(),
                got: labels.len(),
            });
        }
        self.mapping = Some(labels);
        Ok(())
    }

    /// Label at the current position, `None` when no mapping was attached.
    pub fn get_mapping(&self) -> Option<&T> {
        self.mapping
            .as_ref()
            .and_then(|labels| labels.get(self.index - self.min))
    }

    pub fn labels(&self) -> &[T] {
        self.mapping.as_deref().unwrap_or(&[])
    }
}

impl<T: PartialEq> Cursor<T> {
    /// Index whose label equals `label`, if any.
    pub fn position_of(&self, label: &T) -> Option<usize> {
        self.labels()
            .iter()
            .position(|l| l == label)
            .map(|offset| self.min + offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increment_cycles_back_to_start() {
        for start in 3..9 {
            let mut cursor: Cursor<()> = Cursor::new(3, 9).unwrap();
            cursor.set(start).unwrap();
            for _ in 0..cursor.len() {
                cursor.increment();
            }
            assert_eq!(cursor.get(), start);
        }
    }

    #[test]
    fn decrement_cycles_back_to_start() {
        let mut cursor: Cursor<()> = Cursor::new(0, 5).unwrap();
        cursor.set(2).unwrap();
        for _ in 0..5 {
            cursor.decrement();
        }
        assert_eq!(cursor.get(), 2);
    }

    #[test]
    fn movement_wraps_at_both_ends() {
        let mut cursor: Cursor<()> = Cursor::new(2, 4).unwrap();
        cursor.decrement();
        assert_eq!(cursor.get(), 3);
        cursor.increment();
        assert_eq!(cursor.get(), 2);
    }

    #[test]
    fn set_rejects_indices_outside_range() {
        let mut cursor: Cursor<()> = Cursor::new(1, 4).unwrap();
        assert!(matches!(cursor.set(0), Err(Error::OutOfRange { index: 0, .. })));
        assert!(matches!(cursor.set(4), Err(Error::OutOfRange { index: 4, .. })));
        cursor.set(3).unwrap();
        assert_eq!(cursor.get(), 3);
    }

    #[test]
    fn empty_range_is_rejected() {
        assert!(matches!(
            Cursor::<u32>::new(5, 5),
            Err(Error::EmptyRange { min: 5, max: 5 })
        ));
        assert!(Cursor::<u32>::over(Vec::new()).is_err());
    }

    #[test]
    fn mapping_length_must_match_range() {
        let mut cursor = Cursor::new(0, 3).unwrap();
        assert!(matches!(
            cursor.set_mapping(vec!["a", "b"]),
            Err(Error::LengthMismatch { expected: 3, got: 2 })
        ));
        assert!(cursor.set_mapping(vec!["a", "b", "c", "d"]).is_err());
        assert_eq!(cursor.get_mapping(), None);
        cursor.set_mapping(vec!["a", "b", "c"]).unwrap();
        assert_eq!(cursor.get_mapping(), Some(&"a"));
    }

    #[test]
    fn mapping_follows_index_through_moves() {
        let labels = vec![10, 20, 30, 40];
        let mut cursor = Cursor::new(2, 6).unwrap();
        cursor.set_mapping(labels.clone()).unwrap();
        let moves = [true, true, false, true, true, true, false, false, false, false];
        for forward in moves {
            if forward {
                cursor.increment();
            } else {
                cursor.decrement();
            }
            assert_eq!(cursor.get_mapping(), Some(&labels[cursor.get() - 2]));
        }
    }

    #[test]
    fn unmapped_cursor_reports_no_label() {
        let mut cursor: Cursor<&str> = Cursor::new(0, 8).unwrap();
        cursor.increment();
        assert_eq!(cursor.get_mapping(), None);
        assert!(cursor.labels().is_empty());
    }

    #[test]
    fn position_of_accounts_for_offset() {
        let mut cursor = Cursor::new(1, 4).unwrap();
        cursor.set_mapping(vec![2001u32, 2996, 3010]).unwrap();
        assert_eq!(cursor.position_of(&2996), Some(2));
        assert_eq!(cursor.position_of(&42), None);
    }
}
