//! # Builtin Functions
//!
//! Reserved names of the curve constructors and operators callable from MPPG,
//! with the parameter kinds the resolver checks operands against.
//!
//! ## Example
//!
//! ```rust
//! use mppg_parser::builtins::{Builtin, ParameterKind};
//!
//! let builtin = Builtin::from_name("ratency").unwrap();
//! assert_eq!(builtin.parameters(), &[ParameterKind::Number, ParameterKind::Number]);
//! assert!(!builtin.returns_number());
//! ```

use serde::{Deserialize, Serialize};

/// Kind of value a builtin parameter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterKind {
    /// A curve.
    Function,
    /// A rational number.
    Number,
}

use ParameterKind::{Function as F, Number as N};

/// A builtin constructor or curve operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Builtin {
    /// `ratency(rate, latency)`
    RateLatency,
    /// `bucket(rate, burst)`
    TokenBucket,
    /// `affine(rate, offset)`
    Affine,
    /// `step(at, height)`
    Step,
    /// `stair(offset, length, height)`
    Stair,
    /// `delay(d)`
    Delay,
    /// `zero`
    Zero,
    /// `epsilon`
    Epsilon,
    /// `star(f)`
    SubadditiveClosure,
    /// `hshift(f, d)`
    HorizontalShift,
    /// `vshift(f, v)`
    VerticalShift,
    /// `low_inv(f)`
    LowerPseudoInverse,
    /// `up_inv(f)`
    UpperPseudoInverse,
    /// `comp(f, g)`
    Composition,
    /// `upclosure(f)`
    UpperNonDecreasing,
    /// `nnupclosure(f)`
    NonNegativeUpperNonDecreasing,
    /// `left_ext(f)`
    LeftContinuous,
    /// `right_ext(f)`
    RightContinuous,
    /// `hdev(f, g)`
    HorizontalDeviation,
    /// `vdev(f, g)`
    VerticalDeviation,
}

impl Builtin {
    /// Every builtin, in declaration order.
    pub const ALL: [Builtin; 20] = [
        Self::RateLatency,
        Self::TokenBucket,
        Self::Affine,
        Self::Step,
        Self::Stair,
        Self::Delay,
        Self::Zero,
        Self::Epsilon,
        Self::SubadditiveClosure,
        Self::HorizontalShift,
        Self::VerticalShift,
        Self::LowerPseudoInverse,
        Self::UpperPseudoInverse,
        Self::Composition,
        Self::UpperNonDecreasing,
        Self::NonNegativeUpperNonDecreasing,
        Self::LeftContinuous,
        Self::RightContinuous,
        Self::HorizontalDeviation,
        Self::VerticalDeviation,
    ];

    /// Look up a builtin by its source name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }

    /// Source name of the builtin.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::RateLatency => "ratency",
            Self::TokenBucket => "bucket",
            Self::Affine => "affine",
            Self::Step => "step",
            Self::Stair => "stair",
            Self::Delay => "delay",
            Self::Zero => "zero",
            Self::Epsilon => "epsilon",
            Self::SubadditiveClosure => "star",
            Self::HorizontalShift => "hshift",
            Self::VerticalShift => "vshift",
            Self::LowerPseudoInverse => "low_inv",
            Self::UpperPseudoInverse => "up_inv",
            Self::Composition => "comp",
            Self::UpperNonDecreasing => "upclosure",
            Self::NonNegativeUpperNonDecreasing => "nnupclosure",
            Self::LeftContinuous => "left_ext",
            Self::RightContinuous => "right_ext",
            Self::HorizontalDeviation => "hdev",
            Self::VerticalDeviation => "vdev",
        }
    }

    /// Parameter kinds, in call order.
    pub const fn parameters(&self) -> &'static [ParameterKind] {
        match self {
            Self::RateLatency | Self::TokenBucket | Self::Affine | Self::Step => &[N, N],
            Self::Stair => &[N, N, N],
            Self::Delay => &[N],
            Self::Zero | Self::Epsilon => &[],
            Self::SubadditiveClosure
            | Self::LowerPseudoInverse
            | Self::UpperPseudoInverse
            | Self::UpperNonDecreasing
            | Self::NonNegativeUpperNonDecreasing
            | Self::LeftContinuous
            | Self::RightContinuous => &[F],
            Self::HorizontalShift | Self::VerticalShift => &[F, N],
            Self::Composition | Self::HorizontalDeviation | Self::VerticalDeviation => &[F, F],
        }
    }

    /// Number of arguments the builtin takes.
    pub const fn arity(&self) -> usize {
        self.parameters().len()
    }

    /// Whether the call produces a Number rather than a Function.
    pub const fn returns_number(&self) -> bool {
        matches!(self, Self::HorizontalDeviation | Self::VerticalDeviation)
    }
}

// =============================================================================
// TESTS
// =============================================================================
