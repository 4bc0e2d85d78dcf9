//! Controller buttons and the bitmask sets sampled every tick.

use std::fmt;

use strum::{Display, EnumCount, EnumIter, IntoEnumIterator};

/// A physical controller button tracked by the application.
///
/// Declaration order is the order in which a layer consumes the edges of a
/// single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumCount)]
#[repr(u8)]
pub enum Button {
    #[strum(to_string = "Up")]
    DPadUp,
    #[strum(to_string = "Down")]
    DPadDown,
    #[strum(to_string = "Left")]
    DPadLeft,
    #[strum(to_string = "Right")]
    DPadRight,
    A,
    B,
    X,
    Y,
    #[strum(to_string = "LB")]
    LeftShoulder,
    #[strum(to_string = "RB")]
    RightShoulder,
    Start,
    Select,
}

const _: () = assert!(Button::COUNT <= u16::BITS as usize);

impl Button {
    /// Bit used for this button inside a [`ButtonSet`].
    pub const fn bit(self) -> u16 {
        1 << self as u8
    }
}

/// A set of buttons packed into a bitmask.
///
/// The same type carries both the raw held sample of one tick and the set of
/// edges fired in that tick.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ButtonSet(u16);

/// The buttons observed held during one poll.
pub type ButtonSample = ButtonSet;

impl ButtonSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Every tracked button.
    pub fn all() -> Self {
        Button::iter().collect()
    }

    /// Build a set from a raw bitmask, dropping bits that map to no button.
    pub fn from_bits(bits: u16) -> Self {
        Self(bits & Self::all().0)
    }

    /// The raw bitmask.
    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn contains(self, button: Button) -> bool {
        self.0 & button.bit() != 0
    }

    pub fn insert(&mut self, button: Button) {
        self.0 |= button.bit();
    }

    pub fn remove(&mut self, button: Button) {
        self.0 &= !button.bit();
    }

    /// Return a copy of this set with `button` added.
    pub const fn with(self, button: Button) -> Self {
        Self(self.0 | button.bit())
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Iterate the members in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Button> {
        Button::iter().filter(move |button| self.contains(*button))
    }
}

impl From<Button> for ButtonSet {
    fn from(button: Button) -> Self {
        Self(button.bit())
    }
}

impl FromIterator<Button> for ButtonSet {
    fn from_iter<I: IntoIterator<Item = Button>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl fmt::Debug for ButtonSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for ButtonSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        for (i, button) in self.iter().enumerate() {
            if i > 0 {
                write!(f, "+")?;
            }
            write!(f, "{button}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_remove_contains() {
        let mut set = ButtonSet::EMPTY;
        set.insert(Button::A);
        set.insert(Button::RightShoulder);
        assert!(set.contains(Button::A));
        assert!(set.contains(Button::RightShoulder));
        assert!(!set.contains(Button::B));
        assert_eq!(set.len(), 2);

        set.remove(Button::A);
        assert!(!set.contains(Button::A));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_iter_follows_declaration_order() {
        let set: ButtonSet = [Button::X, Button::DPadDown, Button::A].into_iter().collect();
        let order: Vec<Button> = set.iter().collect();
        assert_eq!(order, vec![Button::DPadDown, Button::A, Button::X]);
    }

    #[test]
    fn test_from_bits_drops_unknown_bits() {
        let set = ButtonSet::from_bits(u16::MAX);
        assert_eq!(set, ButtonSet::all());
        assert_eq!(set.len(), Button::COUNT);
    }

    #[test]
    fn test_display() {
        assert_eq!(ButtonSet::EMPTY.to_string(), "-");
        let set = ButtonSet::from(Button::Start).with(Button::Select);
        assert_eq!(set.to_string(), "Start+Select");
    }
}
