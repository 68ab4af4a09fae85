// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Helper macros for defining the small strongly-typed descriptors used across sudocam.

//region Index

/// Defines the index of something as an integer of a certain type
///
/// # Example
/// ```
/// use sudocam_structures::define_index;
///
/// define_index!(SlotIndex, u32, "Index of a slot");
///
/// let slot: SlotIndex = 3.into();
/// assert_eq!(*slot, 3);
/// assert_eq!(slot.get(), 3);
/// ```
#[macro_export]
macro_rules! define_index {
    ($name:ident, $inner:ty, $doc:expr) => {
        #[doc = $doc]
        #[repr(transparent)]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize
        )]
        pub struct $name($inner);

        impl $name {

            // const constructor
            pub const fn from(var: $inner) -> Self {
                Self(var)
            }

            // const return method
            pub const fn get(&self) -> $inner {
                self.0
            }
        }

        impl std::ops::Deref for $name {
            type Target = $inner;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                $name(value)
            }
        }

        impl From<$name> for $inner {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

//endregion

//region XY

/// Creates a 2D coordinate type with x,y fields.
///
/// # Example
/// ```
/// use sudocam_structures::define_xy_coordinates;
///
/// define_xy_coordinates!(Point2D, u32, "Point2D", "A 2D point with u32 coordinates");
///
/// let point = Point2D::new(1, 2);
/// assert_eq!(point.x, 1);
/// assert_eq!(point.y, 2);
/// ```
#[macro_export]
macro_rules! define_xy_coordinates {
    ($name:ident, $var_type:ty, $friendly_name:expr, $doc_string:expr) => {

        #[doc = $doc_string]
        #[derive(Clone, Debug, PartialEq, Eq, Hash, Copy, serde::Serialize, serde::Deserialize)]
        pub struct $name {
            pub x: $var_type,
            pub y: $var_type,
        }

        impl $name {
            pub const fn new(x: $var_type, y: $var_type) -> Self {
                Self { x, y }
            }
        }

        impl From<$name> for ($var_type, $var_type) {
            fn from(value: $name) -> Self {
                (value.x, value.y)
            }
        }

        impl From<($var_type, $var_type)> for $name {
            fn from(value: ($var_type, $var_type)) -> Self {
                $name::new(value.0, value.1)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "{}({}, {})", $friendly_name, self.x, self.y)
            }
        }

    };
}

/// Creates a 2D dimension type with width,height fields and validation.
///
/// # Example
/// ```
/// use sudocam_structures::{define_xy_dimensions, SudocamDataError};
///
/// define_xy_dimensions!(Size2D, u32, "Size2D", 0, "A 2D size with positive dimensions");
///
/// let size = Size2D::new(640, 480).unwrap();
/// assert_eq!(size.width, 640);
/// assert_eq!(size.height, 480);
///
/// let invalid = Size2D::new(0, 480);
/// assert!(invalid.is_err());
/// ```
#[macro_export]
macro_rules! define_xy_dimensions {
    ($name:ident, $var_type:ty, $friendly_name:expr, $invalid_zero_value:expr, $doc_string:expr) => {

        #[doc = $doc_string]
        #[derive(Clone, Debug, PartialEq, Copy, Hash, Eq, serde::Serialize)]
        pub struct $name {
            pub width: $var_type,
            pub height: $var_type,
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                #[derive(serde::Deserialize)]
                struct Fields {
                    width: $var_type,
                    height: $var_type,
                }

                let fields = Fields::deserialize(deserializer)?;
                $name::new(fields.width, fields.height).map_err(serde::de::Error::custom)
            }
        }

        impl $name {
            pub fn new(x: $var_type, y: $var_type) -> Result<Self, SudocamDataError> {
                if x == $invalid_zero_value || y == $invalid_zero_value {
                    return Err(SudocamDataError::BadParameters(format!("Value cannot be {:?} in a {:?}!", $invalid_zero_value, $friendly_name)));
                }
                Ok(Self { width: x, height: y })
            }

            /// Total number of elements covered (width × height).
            pub fn number_elements(&self) -> usize {
                self.width as usize * self.height as usize
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "{}<{}, {}>", $friendly_name, self.width, self.height)
            }
        }

        impl From<$name> for ($var_type, $var_type) {
            fn from(value: $name) -> Self {
                (value.width, value.height)
            }
        }

        impl TryFrom<($var_type, $var_type)> for $name {
            type Error = SudocamDataError;
            fn try_from(value: ($var_type, $var_type)) -> Result<Self, Self::Error> {
                if value.0 == $invalid_zero_value {
                    return Err(SudocamDataError::BadParameters(format!("X value cannot be zero!")));
                }
                if value.1 == $invalid_zero_value {
                    return Err(SudocamDataError::BadParameters(format!("Y value cannot be zero!")));
                }
                Ok(Self { width: value.0, height: value.1 })
            }
        }

    }
}

//endregion
