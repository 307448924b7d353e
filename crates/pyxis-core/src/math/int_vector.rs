// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Provides 2D and 3D vector types with `i32` components.
//!
//! Integer vectors are used for grid coordinates, tile indices, and any
//! configuration value where fractional components are meaningless.

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

// --- IVec2 ---

/// A 2-dimensional vector with `i32` components.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
    Encode,
    Decode,
)]
#[repr(C)]
pub struct IVec2 {
    /// The x component of the vector.
    pub x: i32,
    /// The y component of the vector.
    pub y: i32,
}

impl IVec2 {
    /// A vector with all components set to `0`.
    pub const ZERO: Self = Self { x: 0, y: 0 };
    /// A vector with all components set to `1`.
    pub const ONE: Self = Self { x: 1, y: 1 };

    /// Creates a new `IVec2` with the specified components.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Calculates the dot product of this vector and another.
    #[inline]
    pub fn dot(&self, rhs: Self) -> i32 {
        self.x * rhs.x + self.y * rhs.y
    }
}

impl fmt::Display for IVec2 {
    /// Formats the vector in its configuration literal form, e.g. `(1, 2)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// --- Operator Overloads ---

impl Add for IVec2 {
    type Output = Self;
    /// Adds two vectors component-wise.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for IVec2 {
    type Output = Self;
    /// Subtracts two vectors component-wise.
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Mul<i32> for IVec2 {
    type Output = Self;
    /// Multiplies the vector by a scalar.
    #[inline]
    fn mul(self, rhs: i32) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

impl Neg for IVec2 {
    type Output = Self;
    /// Negates the vector.
    #[inline]
    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

// --- IVec3 ---

/// A 3-dimensional vector with `i32` components.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
    Encode,
    Decode,
)]
#[repr(C)]
pub struct IVec3 {
    /// The x component of the vector.
    pub x: i32,
    /// The y component of the vector.
    pub y: i32,
    /// The z component of the vector.
    pub z: i32,
}

impl IVec3 {
    /// A vector with all components set to `0`.
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };
    /// A vector with all components set to `1`.
    pub const ONE: Self = Self { x: 1, y: 1, z: 1 };

    /// Creates a new `IVec3` with the specified components.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Calculates the dot product of this vector and another.
    #[inline]
    pub fn dot(&self, rhs: Self) -> i32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }
}

impl fmt::Display for IVec3 {
    /// Formats the vector in its configuration literal form, e.g. `(1, 2, 3)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// --- Operator Overloads ---

impl Add for IVec3 {
    type Output = Self;
    /// Adds two vectors component-wise.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl Sub for IVec3 {
    type Output = Self;
    /// Subtracts two vectors component-wise.
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl Mul<i32> for IVec3 {
    type Output = Self;
    /// Multiplies the vector by a scalar.
    #[inline]
    fn mul(self, rhs: i32) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
        }
    }
}

impl Neg for IVec3 {
    type Output = Self;
    /// Negates the vector.
    #[inline]
    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ivec2_ops() {
        let v1 = IVec2::new(1, 2);
        let v2 = IVec2::new(3, 4);
        assert_eq!(v1 + v2, IVec2::new(4, 6));
        assert_eq!(v2 - v1, IVec2::new(2, 2));
        assert_eq!(v1 * 3, IVec2::new(3, 6));
        assert_eq!(-v1, IVec2::new(-1, -2));
        assert_eq!(v1.dot(v2), 11);
    }

    #[test]
    fn test_ivec2_display() {
        assert_eq!(IVec2::new(-1, 7).to_string(), "(-1, 7)");
    }

    #[test]
    fn test_ivec3_ops() {
        let v1 = IVec3::new(1, 2, 3);
        let v2 = IVec3::new(4, 5, 6);
        assert_eq!(v1 + v2, IVec3::new(5, 7, 9));
        assert_eq!(v1.dot(v2), 32);
    }

    #[test]
    fn test_ivec3_display() {
        assert_eq!(IVec3::new(1, 2, 3).to_string(), "(1, 2, 3)");
    }

    #[test]
    fn test_ivec_default_is_zero() {
        assert_eq!(IVec2::default(), IVec2::ZERO);
        assert_eq!(IVec3::default(), IVec3::ZERO);
    }
}
