//! NEON backing for [`F32x4`](super::F32x4) (aarch64).
#![allow(unused_unsafe)]

use core::arch::aarch64::{
    float32x4_t, vaddq_f32, vdupq_n_f32, vld1q_f32, vmulq_f32, vst1q_f32, vsubq_f32,
};

pub(super) type Raw = float32x4_t;

#[inline(always)]
pub(super) fn splat(value: f32) -> Raw {
    // SAFETY: the build script only selects NEON when the target enables it.
    unsafe { vdupq_n_f32(value) }
}

#[inline(always)]
pub(super) fn load(values: &[f32; 4]) -> Raw {
    // SAFETY: `values` holds four readable floats; vld1q has no alignment requirement.
    unsafe { vld1q_f32(values.as_ptr()) }
}

#[inline(always)]
pub(super) fn store(v: Raw) -> [f32; 4] {
    let mut out = [0.0f32; 4];
    // SAFETY: `out` has room for four floats.
    unsafe { vst1q_f32(out.as_mut_ptr(), v) };
    out
}

#[inline(always)]
pub(super) fn add(a: Raw, b: Raw) -> Raw {
    // SAFETY: NEON is enabled for the whole target.
    unsafe { vaddq_f32(a, b) }
}

#[inline(always)]
pub(super) fn sub(a: Raw, b: Raw) -> Raw {
    // SAFETY: NEON is enabled for the whole target.
    unsafe { vsubq_f32(a, b) }
}

#[inline(always)]
pub(super) fn mul(a: Raw, b: Raw) -> Raw {
    // SAFETY: NEON is enabled for the whole target.
    unsafe { vmulq_f32(a, b) }
}
