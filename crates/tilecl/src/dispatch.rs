//! The host dispatch boundary.
//!
//! Kernels are monomorphized over an element type and a handful of integer
//! parameters, but the host only knows a runtime scalar tag and a runtime
//! head dimension. The macros here translate those runtime values into
//! concrete compile-time bindings, and every unsupported value is reported as
//! a structured [`DispatchError`] *before* any tile type is instantiated —
//! the addressing core itself never returns errors.

use alloc::string::String;
use core::fmt::{Debug, Display};
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Runtime tag for the closed set of supported scalar types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarKind {
    F32,
    F16,
    BF16,
}

impl ScalarKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ScalarKind::F32 => "float32",
            ScalarKind::F16 => "float16",
            ScalarKind::BF16 => "bfloat16",
        }
    }

    pub const fn bits(self) -> usize {
        match self {
            ScalarKind::F32 => 32,
            ScalarKind::F16 | ScalarKind::BF16 => 16,
        }
    }
}

impl Display for ScalarKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScalarKind {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "float32" | "float" | "f32" => Ok(ScalarKind::F32),
            "float16" | "half" | "f16" => Ok(ScalarKind::F16),
            "bfloat16" | "bf16" => Ok(ScalarKind::BF16),
            other => Err(DispatchError::UnsupportedScalar(other.into())),
        }
    }
}

/// Head dimensions the kernels are compiled for.
pub const SUPPORTED_HEAD_DIMS: [usize; 5] = [64, 128, 256, 512, 1024];

/// Checks a runtime head dimension against [`SUPPORTED_HEAD_DIMS`].
pub fn validate_head_dim(dim: usize) -> Result<usize, DispatchError> {
    if SUPPORTED_HEAD_DIMS.contains(&dim) {
        Ok(dim)
    } else {
        log::debug!("rejected head dimension {dim} at the dispatch boundary");
        Err(DispatchError::UnsupportedHeadDim(dim))
    }
}

/// A runtime configuration value the kernels were not compiled for.
#[derive(Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The scalar type name is not one of the supported tags.
    UnsupportedScalar(String),

    /// The head dimension is outside [`SUPPORTED_HEAD_DIMS`].
    UnsupportedHeadDim(usize),
}

impl Display for DispatchError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl Debug for DispatchError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DispatchError::UnsupportedScalar(name) => {
                write!(f, "Dispatch is not implemented for scalar type '{name}'")
            }
            DispatchError::UnsupportedHeadDim(dim) => {
                write!(
                    f,
                    "Dispatch is not implemented for head dimension {dim}; supported: {:?}",
                    SUPPORTED_HEAD_DIMS
                )
            }
        }
    }
}

impl core::error::Error for DispatchError {}

/// Binds a [`ScalarKind`] to a concrete element type alias and evaluates the
/// body once with that binding.
///
/// ```
/// use tilecl::{ScalarKind, dispatch_scalar};
///
/// let bits = dispatch_scalar!(ScalarKind::F16, E, {
///     core::mem::size_of::<E>() * 8
/// });
/// assert_eq!(bits, 16);
/// ```
#[macro_export]
macro_rules! dispatch_scalar {
    ($kind:expr, $elem:ident, $body:block) => {
        match $kind {
            $crate::ScalarKind::F32 => {
                #[allow(dead_code)]
                type $elem = f32;
                $body
            }
            $crate::ScalarKind::F16 => {
                #[allow(dead_code)]
                type $elem = $crate::half::f16;
                $body
            }
            $crate::ScalarKind::BF16 => {
                #[allow(dead_code)]
                type $elem = $crate::half::bf16;
                $body
            }
        }
    };
}

/// Binds a runtime head dimension from the supported set to a `const` and
/// evaluates the body once with that binding, so the body may use the name in
/// const generic position.
///
/// Returns `Err(DispatchError::UnsupportedHeadDim)` for any other value.
///
/// ```
/// use tilecl::dispatch_head_dim;
///
/// let numel = dispatch_head_dim!(128, DIM, {
///     tilecl::TileShape::<DIM, DIM>::NUMEL
/// });
/// assert_eq!(numel, Ok(16384));
/// ```
#[macro_export]
macro_rules! dispatch_head_dim {
    ($dim:expr, $name:ident, $body:block) => {
        match $dim {
            64 => {
                #[allow(dead_code)]
                const $name: usize = 64;
                ::core::result::Result::Ok($body)
            }
            128 => {
                #[allow(dead_code)]
                const $name: usize = 128;
                ::core::result::Result::Ok($body)
            }
            256 => {
                #[allow(dead_code)]
                const $name: usize = 256;
                ::core::result::Result::Ok($body)
            }
            512 => {
                #[allow(dead_code)]
                const $name: usize = 512;
                ::core::result::Result::Ok($body)
            }
            1024 => {
                #[allow(dead_code)]
                const $name: usize = 1024;
                ::core::result::Result::Ok($body)
            }
            other => ::core::result::Result::Err($crate::DispatchError::UnsupportedHeadDim(other)),
        }
    };
}
