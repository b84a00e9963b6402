//! Decoded joystick types: JoystickSample and Buttons.

use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

/// Button state of one frame as a bitfield.
///
/// Each button's bit equals its bit index in the frame, so the raw value is
/// the first nine frame bits read as an integer.
///
/// # Example
///
/// ```
/// use sidewinder_proto::Buttons;
///
/// let buttons = Buttons::FIRE | Buttons::SHIFT;
/// assert!(buttons.contains(Buttons::FIRE));
/// assert!(!buttons.contains(Buttons::A));
/// assert_eq!(buttons.raw(), 0x101);
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(pub u16);

impl Buttons {
    pub const FIRE: Self = Self(1 << 0);
    /// Bit 2 in transmission order (frame bit 1).
    ///
    /// Two generations of SideWinder decoders disagree on which top-hat button
    /// this is: one calls it the top button, the other the large top button.
    /// [`Buttons::TOP_LARGE`] names the same bit.
    pub const TOP: Self = Self(1 << 1);
    /// Alias of [`Buttons::TOP`].
    pub const TOP_LARGE: Self = Self::TOP;
    pub const TOP_UP: Self = Self(1 << 2);
    pub const TOP_DOWN: Self = Self(1 << 3);
    pub const A: Self = Self(1 << 4);
    pub const B: Self = Self(1 << 5);
    pub const C: Self = Self(1 << 6);
    pub const D: Self = Self(1 << 7);
    pub const SHIFT: Self = Self(1 << 8);

    /// No buttons pressed.
    pub const NONE: Self = Self(0);

    /// All nine button bits.
    pub const MASK: u16 = 0x01FF;

    /// Check if the given button(s) are pressed.
    #[inline]
    #[must_use]
    pub const fn contains(self, button: Buttons) -> bool {
        (self.0 & button.0) == button.0
    }

    /// Set or clear button(s).
    #[inline]
    pub fn set(&mut self, button: Buttons, pressed: bool) {
        if pressed {
            self.0 |= button.0;
        } else {
            self.0 &= !button.0;
        }
    }

    /// Get the raw value, limited to the nine button bits.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0 & Self::MASK
    }

    /// Check if no buttons are pressed.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.raw() == 0
    }
}

impl BitOr for Buttons {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Buttons {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Buttons {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for Buttons {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl Not for Buttons {
    type Output = Self;

    #[inline]
    fn not(self) -> Self::Output {
        Self(!self.0 & Self::MASK)
    }
}

/// One decoded 48-bit frame.
///
/// Field widths follow the frame layout (see [`crate::codec`]); values are
/// never wider than their field. `reserved` and `parity` are carried as
/// received and never validated.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JoystickSample {
    pub fire: bool,
    /// Frame bit 1. Also known as the large top button, see
    /// [`JoystickSample::top_large`].
    pub top: bool,
    pub top_up: bool,
    pub top_down: bool,
    pub btn_a: bool,
    pub btn_b: bool,
    pub btn_c: bool,
    pub btn_d: bool,
    pub shift: bool,
    /// 10 bits, 0-1023.
    pub x: u16,
    /// 10 bits, 0-1023.
    pub y: u16,
    /// 7 bits, 0-127.
    pub m: u8,
    /// 6 bits, 0-63.
    pub r: u8,
    /// 4 bits, 0-15.
    pub head: u8,
    pub reserved: bool,
    pub parity: bool,
}

impl JoystickSample {
    /// All-zero sample, the state before any frame was published.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            fire: false,
            top: false,
            top_up: false,
            top_down: false,
            btn_a: false,
            btn_b: false,
            btn_c: false,
            btn_d: false,
            shift: false,
            x: 0,
            y: 0,
            m: 0,
            r: 0,
            head: 0,
            reserved: false,
            parity: false,
        }
    }

    /// Frame bit 1 under its other historical name.
    ///
    /// Same value as [`JoystickSample::top`]; which physical button it is
    /// remains unresolved.
    #[inline]
    #[must_use]
    pub const fn top_large(&self) -> bool {
        self.top
    }

    /// Collect the nine button fields into a bitset.
    #[must_use]
    pub fn buttons(&self) -> Buttons {
        let mut buttons = Buttons::NONE;
        buttons.set(Buttons::FIRE, self.fire);
        buttons.set(Buttons::TOP, self.top);
        buttons.set(Buttons::TOP_UP, self.top_up);
        buttons.set(Buttons::TOP_DOWN, self.top_down);
        buttons.set(Buttons::A, self.btn_a);
        buttons.set(Buttons::B, self.btn_b);
        buttons.set(Buttons::C, self.btn_c);
        buttons.set(Buttons::D, self.btn_d);
        buttons.set(Buttons::SHIFT, self.shift);
        buttons
    }

    /// Replace the nine button fields from a bitset.
    #[must_use]
    pub fn with_buttons(mut self, buttons: Buttons) -> Self {
        self.fire = buttons.contains(Buttons::FIRE);
        self.top = buttons.contains(Buttons::TOP);
        self.top_up = buttons.contains(Buttons::TOP_UP);
        self.top_down = buttons.contains(Buttons::TOP_DOWN);
        self.btn_a = buttons.contains(Buttons::A);
        self.btn_b = buttons.contains(Buttons::B);
        self.btn_c = buttons.contains(Buttons::C);
        self.btn_d = buttons.contains(Buttons::D);
        self.shift = buttons.contains(Buttons::SHIFT);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons_bitwise_or() {
        let buttons = Buttons::A | Buttons::D;
        assert!(buttons.contains(Buttons::A));
        assert!(buttons.contains(Buttons::D));
        assert!(!buttons.contains(Buttons::B));
    }

    #[test]
    fn test_buttons_not_stays_in_mask() {
        let buttons = !Buttons::FIRE;
        assert_eq!(buttons.raw(), 0x01FE);
        assert!(!buttons.contains(Buttons::FIRE));
        assert!(buttons.contains(Buttons::SHIFT));
    }

    #[test]
    fn test_top_large_is_top() {
        assert_eq!(Buttons::TOP_LARGE, Buttons::TOP);

        let sample = JoystickSample {
            top: true,
            ..JoystickSample::empty()
        };
        assert!(sample.top_large());
        assert!(sample.buttons().contains(Buttons::TOP_LARGE));
    }

    #[test]
    fn test_buttons_round_trip_through_sample() {
        let buttons = Buttons::FIRE | Buttons::TOP_DOWN | Buttons::C | Buttons::SHIFT;
        let sample = JoystickSample::empty().with_buttons(buttons);
        assert!(sample.fire);
        assert!(sample.top_down);
        assert!(sample.btn_c);
        assert!(sample.shift);
        assert!(!sample.btn_a);
        assert_eq!(sample.buttons(), buttons);
    }

    #[test]
    fn test_empty_is_default() {
        assert_eq!(JoystickSample::empty(), JoystickSample::default());
        assert!(JoystickSample::empty().buttons().is_empty());
    }
}
