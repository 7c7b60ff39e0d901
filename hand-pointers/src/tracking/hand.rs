//! Tracked hand identities

use std::fmt;

/// One of the fixed set of tracked hands
///
/// Each hand owns one pointer slot and one filter slot, indexed by
/// [`Hand::index`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    pub const COUNT: usize = 2;
    pub const ALL: [Hand; Hand::COUNT] = [Hand::Left, Hand::Right];

    pub fn index(self) -> usize {
        match self {
            Hand::Left => 0,
            Hand::Right => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Hand> {
        Hand::ALL.get(index).copied()
    }

    /// Resolve a handedness label ("Left" / "Right", any case)
    pub fn from_label(label: &str) -> Option<Hand> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("left") {
            Some(Hand::Left)
        } else if label.eq_ignore_ascii_case("right") {
            Some(Hand::Right)
        } else {
            None
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Hand::Left => "Left",
            Hand::Right => "Right",
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(Hand::from_label("Left"), Some(Hand::Left));
        assert_eq!(Hand::from_label("right"), Some(Hand::Right));
        assert_eq!(Hand::from_label(" RIGHT "), Some(Hand::Right));
        assert_eq!(Hand::from_label("Unknown"), None);
        assert_eq!(Hand::from_label(""), None);
    }

    #[test]
    fn test_indices_are_dense() {
        for (i, hand) in Hand::ALL.iter().enumerate() {
            assert_eq!(hand.index(), i);
            assert_eq!(Hand::from_index(i), Some(*hand));
        }
        assert_eq!(Hand::from_index(Hand::COUNT), None);
    }
}
