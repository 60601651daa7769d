//! Typed flag sets carried by a shape.
//!
//! Bits shared with the persisted document format keep their stored
//! values so an external serializer can write them untouched.

use serde::{Deserialize, Serialize};

macro_rules! flag_set {
    ($(#[$meta:meta])* $name:ident { $($(#[$fmeta:meta])* $flag:ident = $bit:expr;)* }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            $($(#[$fmeta])* pub const $flag: $name = $name($bit);)*

            pub const fn empty() -> Self {
                Self(0)
            }

            pub const fn from_bits(bits: u32) -> Self {
                Self(bits)
            }

            pub const fn bits(self) -> u32 {
                self.0
            }

            pub const fn contains(self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }

            pub const fn intersects(self, other: Self) -> bool {
                self.0 & other.0 != 0
            }

            pub fn insert(&mut self, other: Self) {
                self.0 |= other.0;
            }

            pub fn remove(&mut self, other: Self) {
                self.0 &= !other.0;
            }

            pub fn set(&mut self, other: Self, on: bool) {
                if on {
                    self.insert(other);
                } else {
                    self.remove(other);
                }
            }

            pub const fn with(self, other: Self) -> Self {
                Self(self.0 | other.0)
            }
        }

        impl std::ops::BitOr for $name {
            type Output = Self;

            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }
    };
}

flag_set! {
    /// Object-level flags.
    ShapeFlags {
        /// Connection targets come from the shape's explicit connect points.
        USE_CONNECT = 0x0002_0000;
        /// Hook positions must be recomputed before the next render.
        HOOKS_DIRTY = 0x0100_0000;
        /// Resize keeps the aspect ratio unless the modifier is held.
        CONSTRAIN_ASPECT = 0x0200_0000;
    }
}

flag_set! {
    /// Orientation and handle flags.
    ExtraFlags {
        FLIP_HORIZONTAL = 8;
        FLIP_VERTICAL = 16;
        /// Rotation knob is hidden and rotate triggers are refused.
        NO_ROTATE = 32;
        /// Edge-center resize knobs are shown in addition to corners.
        SIDE_KNOBS = 1_048_576;
    }
}

flag_set! {
    /// Secondary flags.
    MoreFlags {
        /// Rounded corners use a fixed radius instead of a fraction of the
        /// smaller side.
        FIXED_ROUNDED_RECT = 0x0000_0040;
    }
}

impl ShapeFlags {
    pub fn use_connect(self) -> bool {
        self.contains(Self::USE_CONNECT)
    }

    pub fn hooks_dirty(self) -> bool {
        self.contains(Self::HOOKS_DIRTY)
    }

    pub fn constrain_aspect(self) -> bool {
        self.contains(Self::CONSTRAIN_ASPECT)
    }
}

impl ExtraFlags {
    pub fn flip_horizontal(self) -> bool {
        self.contains(Self::FLIP_HORIZONTAL)
    }

    pub fn flip_vertical(self) -> bool {
        self.contains(Self::FLIP_VERTICAL)
    }

    pub fn is_flipped(self) -> bool {
        self.intersects(Self::FLIP_HORIZONTAL | Self::FLIP_VERTICAL)
    }

    pub fn no_rotate(self) -> bool {
        self.contains(Self::NO_ROTATE)
    }

    pub fn side_knobs(self) -> bool {
        self.contains(Self::SIDE_KNOBS)
    }
}

impl MoreFlags {
    pub fn fixed_rounded_rect(self) -> bool {
        self.contains(Self::FIXED_ROUNDED_RECT)
    }
}
