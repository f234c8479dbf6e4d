//! SSE backing for [`F32x4`](super::F32x4) (x86/x86_64).
//!
//! The build script only selects this module when SSE is part of the target's
//! baseline feature set, so every intrinsic here is always executable.
#![allow(unused_unsafe)]

#[cfg(target_arch = "x86")]
use core::arch::x86::{
    __m128, _mm_add_ps, _mm_loadu_ps, _mm_mul_ps, _mm_set1_ps, _mm_storeu_ps, _mm_sub_ps,
};
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::{
    __m128, _mm_add_ps, _mm_loadu_ps, _mm_mul_ps, _mm_set1_ps, _mm_storeu_ps, _mm_sub_ps,
};

pub(super) type Raw = __m128;

#[inline(always)]
pub(super) fn splat(value: f32) -> Raw {
    // SAFETY: SSE is enabled for the whole target (see module docs).
    unsafe { _mm_set1_ps(value) }
}

#[inline(always)]
pub(super) fn load(values: &[f32; 4]) -> Raw {
    // SAFETY: `values` holds four readable floats; the load is unaligned.
    unsafe { _mm_loadu_ps(values.as_ptr()) }
}

#[inline(always)]
pub(super) fn store(v: Raw) -> [f32; 4] {
    let mut out = [0.0f32; 4];
    // SAFETY: `out` has room for four floats; the store is unaligned.
    unsafe { _mm_storeu_ps(out.as_mut_ptr(), v) };
    out
}

#[inline(always)]
pub(super) fn add(a: Raw, b: Raw) -> Raw {
    // SAFETY: SSE is enabled for the whole target.
    unsafe { _mm_add_ps(a, b) }
}

#[inline(always)]
pub(super) fn sub(a: Raw, b: Raw) -> Raw {
    // SAFETY: SSE is enabled for the whole target.
    unsafe { _mm_sub_ps(a, b) }
}

#[inline(always)]
pub(super) fn mul(a: Raw, b: Raw) -> Raw {
    // SAFETY: SSE is enabled for the whole target.
    unsafe { _mm_mul_ps(a, b) }
}
